//! Compressed stream framing.
//!
//! ```text
//! [header length: u32 BE][symbol count: u64 BE][tree header][payload words]
//!                        |<------ header length bytes ----->|
//! ```
//!
//! The symbol count tells the decoder where the real codes end inside the
//! zero-padded final payload word.

use crate::bitcodec;
use crate::code::CodeTable;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::header;
use crate::observer::{CodecObserver, NoopObserver};
use crate::tree::HuffmanTree;

const LENGTH_PREFIX: usize = 4;
const SYMBOL_COUNT: usize = 8;

pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    compress_with(input, &mut NoopObserver)
}

pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    decompress_with(input, &mut NoopObserver)
}

pub fn compress_with(input: &[u8], observer: &mut dyn CodecObserver) -> Result<Vec<u8>> {
    let freq = FrequencyTable::from_bytes(input);
    let tree = HuffmanTree::from_frequencies(&freq)?;
    let codes = CodeTable::generate(&tree)?;
    observer.tree_built(&tree, &codes);

    let tree_len = header::encoded_len(tree.leaf_count());
    let header_len = SYMBOL_COUNT + tree_len;

    let mut out = Vec::with_capacity(LENGTH_PREFIX + header_len + input.len() / 2);
    // at most 256 leaves, so the header is well under u32::MAX
    out.extend_from_slice(&(header_len as u32).to_be_bytes());
    out.extend_from_slice(&(input.len() as u64).to_be_bytes());
    header::serialize_into(&tree, &mut out);
    observer.header_encoded(header_len, input.len() as u64);

    bitcodec::encode(input, &codes, &mut out, observer)?;
    Ok(out)
}

pub fn decompress_with(input: &[u8], observer: &mut dyn CodecObserver) -> Result<Vec<u8>> {
    let frame = Frame::parse(input)?;
    let tree = header::deserialize(frame.tree)?;
    observer.header_decoded(frame.header_len(), frame.symbols, &tree);
    bitcodec::decode(&tree, frame.payload, frame.symbols)
}

/// A compressed stream split into its parts, without decoding anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub symbols: u64,
    pub tree: &'a [u8],
    pub payload: &'a [u8],
}

impl<'a> Frame<'a> {
    pub fn parse(input: &'a [u8]) -> Result<Self> {
        let (prefix, rest) = input.split_first_chunk::<LENGTH_PREFIX>().ok_or(Error::TruncatedPayload {
            needed: LENGTH_PREFIX,
            available: input.len(),
        })?;
        let header_len = u32::from_be_bytes(*prefix) as usize;

        if rest.len() < header_len {
            return Err(Error::TruncatedPayload {
                needed: LENGTH_PREFIX + header_len,
                available: input.len(),
            });
        }
        let (header, payload) = rest.split_at(header_len);

        let (count, tree) = header
            .split_first_chunk::<SYMBOL_COUNT>()
            .ok_or_else(|| Error::corrupt(format!("header of {} bytes has no symbol count", header_len)))?;
        let symbols = u64::from_be_bytes(*count);
        if symbols == 0 {
            return Err(Error::corrupt("symbol count is zero"));
        }

        Ok(Frame {
            symbols,
            tree,
            payload,
        })
    }

    /// Bytes covered by the length prefix.
    pub fn header_len(&self) -> usize {
        SYMBOL_COUNT + self.tree.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(compress(b""), Err(Error::EmptyInput));
    }

    #[test]
    fn layout() {
        let out = compress(b"aaaa").unwrap();
        // header: count 4, leaf 'a'; payload: four 0 bits in one word
        let mut expected = vec![0, 0, 0, 10];
        expected.extend_from_slice(&4u64.to_be_bytes());
        expected.extend_from_slice(&[0xFF, b'a']);
        expected.extend_from_slice(&[0, 0, 0, 0]);
        assert_eq!(out, expected);
        assert_eq!(decompress(&out).unwrap(), b"aaaa");
    }

    #[test]
    fn frame_parts() {
        let out = compress(b"go go gophers").unwrap();
        let frame = Frame::parse(&out).unwrap();
        assert_eq!(frame.symbols, 13);
        assert_eq!(frame.tree.len(), header::encoded_len(8));
        assert_eq!(frame.payload.len() % 4, 0);
        assert_eq!(LENGTH_PREFIX + frame.header_len() + frame.payload.len(), out.len());
    }

    #[test]
    fn short_inputs_are_truncated() {
        assert!(matches!(decompress(&[]), Err(Error::TruncatedPayload { needed: 4, available: 0 })));
        assert!(matches!(decompress(&[0, 0]), Err(Error::TruncatedPayload { .. })));
        assert!(matches!(
            decompress(&[0, 0, 0, 20, 1, 2]),
            Err(Error::TruncatedPayload { needed: 24, available: 6 })
        ));
    }

    #[test]
    fn header_without_symbol_count() {
        assert!(matches!(decompress(&[0, 0, 0, 2, 0xFF, b'a']), Err(Error::CorruptHeader(_))));
    }

    #[test]
    fn zero_symbol_count() {
        let mut input = vec![0, 0, 0, 10];
        input.extend_from_slice(&0u64.to_be_bytes());
        input.extend_from_slice(&[0xFF, b'a']);
        assert!(matches!(decompress(&input), Err(Error::CorruptHeader(_))));
    }

    #[test]
    fn payload_cut_short() {
        let mut out = compress(b"go go gophers go go gophers").unwrap();
        out.truncate(out.len() - 4);
        assert!(matches!(decompress(&out), Err(Error::TruncatedPayload { .. })));
    }
}
