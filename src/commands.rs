// src/commands.rs

use crate::logger::TracingObserver;
use huffpack::{CodeTable, Frame, header};
use serde::Serialize;
use std::{
    ffi::OsString,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

const TEMP_SUFFIX: &str = ".tmp"; // For atomic writes

// `out.huff` is staged as `out.huff.tmp`, so the temp name only ever
// shadows the output itself.
fn temp_path(output: &Path) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

// Absolute form of a path that may not exist yet.
fn resolve(path: &Path) -> io::Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(p) => Ok(p),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let name = path.file_name().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("not a file path: {}", path.display()),
                )
            })?;
            let parent = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            Ok(fs::canonicalize(parent)?.join(name))
        }
        Err(e) => Err(e),
    }
}

// Refuses output paths whose final or staging file is the input itself.
fn check_paths(input: &Path, output: &Path) -> io::Result<()> {
    let input = resolve(input)?;
    for target in [output.to_path_buf(), temp_path(output)] {
        if resolve(&target)? == input {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("writing {} would overwrite the input", target.display()),
            ));
        }
    }
    Ok(())
}

// Writes to a sibling temp file first so a failed run never leaves a
// half-written output behind.
fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let temp = temp_path(path);
    fs::write(&temp, data)?;
    fs::rename(&temp, path)
}

pub fn compress_file(input: &Path, output: &Path) -> io::Result<()> {
    check_paths(input, output)?;
    let data = fs::read(input)?;
    let mut observer = TracingObserver::default();
    let packed = huffpack::compress_with(&data, &mut observer)?;

    write_atomic(output, &packed)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        original = data.len(),
        compressed = packed.len(),
        words = observer.words,
        "compressed"
    );
    Ok(())
}

pub fn decompress_file(input: &Path, output: &Path) -> io::Result<()> {
    check_paths(input, output)?;
    let packed = fs::read(input)?;
    let mut observer = TracingObserver::default();
    let data = huffpack::decompress_with(&packed, &mut observer)?;

    write_atomic(output, &data)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        compressed = packed.len(),
        restored = data.len(),
        "decompressed"
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CodeEntry {
    pub byte: u8,
    pub code: String,
}

/// What a compressed file's header says about its contents.
#[derive(Debug, Serialize)]
pub struct Report {
    pub header_len: usize,
    pub symbols: u64,
    pub leaves: usize,
    pub internal_nodes: usize,
    pub depth: usize,
    pub payload_len: usize,
    pub codes: Vec<CodeEntry>,
}

impl Report {
    pub fn from_compressed(packed: &[u8]) -> huffpack::Result<Self> {
        let frame = Frame::parse(packed)?;
        let tree = header::deserialize(frame.tree)?;
        let codes = CodeTable::generate(&tree)?;
        Ok(Report {
            header_len: frame.header_len(),
            symbols: frame.symbols,
            leaves: tree.leaf_count(),
            internal_nodes: tree.internal_count(),
            depth: tree.depth(),
            payload_len: frame.payload.len(),
            codes: codes
                .iter()
                .map(|(byte, code)| CodeEntry {
                    byte,
                    code: code.to_string(),
                })
                .collect(),
        })
    }
}

pub fn inspect_file(input: &Path, json: bool) -> io::Result<()> {
    let packed = fs::read(input)?;
    let report = Report::from_compressed(&packed)?;

    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
        return Ok(());
    }

    writeln!(stdout, "header length:  {}", report.header_len)?;
    writeln!(stdout, "symbols:        {}", report.symbols)?;
    writeln!(stdout, "leaves:         {}", report.leaves)?;
    writeln!(stdout, "internal nodes: {}", report.internal_nodes)?;
    writeln!(stdout, "depth:          {}", report.depth)?;
    writeln!(stdout, "payload length: {}", report.payload_len)?;
    writeln!(stdout, "codes:")?;
    for entry in &report.codes {
        writeln!(stdout, "  {:?}: {}", entry.byte as char, entry.code)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_for_gophers() {
        let packed = huffpack::compress(b"go go gophers").unwrap();
        let report = Report::from_compressed(&packed).unwrap();
        assert_eq!(report.symbols, 13);
        assert_eq!(report.leaves, 8);
        assert_eq!(report.internal_nodes, 7);
        assert_eq!(report.codes.len(), 8);
        assert_eq!(report.header_len + 4 + report.payload_len, packed.len());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["symbols"], 13);
        assert_eq!(json["codes"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn report_rejects_garbage() {
        assert!(Report::from_compressed(&[0, 0, 0, 9]).is_err());
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("huffpack-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn file_round_trip() {
        let dir = scratch_dir("round-trip");
        let original = dir.join("input.txt");
        let packed = dir.join("input.huff");
        let restored = dir.join("restored.txt");

        fs::write(&original, b"go go gophers").unwrap();
        compress_file(&original, &packed).unwrap();
        decompress_file(&packed, &restored).unwrap();
        assert_eq!(fs::read(&restored).unwrap(), b"go go gophers");
        assert!(!temp_path(&packed).exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn temp_file_keeps_clear_of_input() {
        let dir = scratch_dir("tmp-input");
        let input = dir.join("notes.tmp");
        let packed = dir.join("notes.huff");
        let restored = dir.join("notes.out");

        fs::write(&input, b"go go gophers").unwrap();
        compress_file(&input, &packed).unwrap();
        assert_eq!(fs::read(&input).unwrap(), b"go go gophers");
        assert_eq!(temp_path(&packed), dir.join("notes.huff.tmp"));

        decompress_file(&packed, &restored).unwrap();
        assert_eq!(fs::read(&restored).unwrap(), b"go go gophers");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unrelated_stem_tmp_is_untouched() {
        let dir = scratch_dir("tmp-sibling");
        let input = dir.join("input.txt");
        let packed = dir.join("data.huff");
        let sibling = dir.join("data.tmp");

        fs::write(&input, b"abracadabra").unwrap();
        fs::write(&sibling, b"keep me").unwrap();
        compress_file(&input, &packed).unwrap();
        assert_eq!(fs::read(&sibling).unwrap(), b"keep me");
        assert_eq!(huffpack::decompress(&fs::read(&packed).unwrap()).unwrap(), b"abracadabra");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn refuses_to_overwrite_input() {
        let dir = scratch_dir("overwrite");
        let input = dir.join("notes.huff.tmp");
        fs::write(&input, b"go go gophers").unwrap();

        let err = compress_file(&input, &dir.join("notes.huff")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        let err = compress_file(&input, &input).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(fs::read(&input).unwrap(), b"go go gophers");
        assert!(!dir.join("notes.huff").exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
