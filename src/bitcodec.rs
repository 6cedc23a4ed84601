//! Packing codes into big-endian 32-bit words and walking them back out.

use bitstream_io::{BigEndian, BitRead, BitReader};

use crate::code::{Code, CodeTable};
use crate::error::{Error, Result};
use crate::observer::CodecObserver;
use crate::tree::{HuffmanTree, NodeKind};

pub const WORD_BITS: u32 = 32;

#[inline]
fn shl(word: u32, n: u32) -> u32 {
    ((word as u64) << n) as u32
}

/// Accumulates codes into a 32-bit word, appending each full word to `out`
/// as four big-endian bytes.
pub struct WordPacker<'a> {
    out: &'a mut Vec<u8>,
    observer: &'a mut dyn CodecObserver,
    word: u32,
    used: u32,
}

impl<'a> WordPacker<'a> {
    pub fn new(out: &'a mut Vec<u8>, observer: &'a mut dyn CodecObserver) -> Self {
        Self {
            out,
            observer,
            word: 0,
            used: 0,
        }
    }

    pub fn push(&mut self, code: Code) {
        let len = code.len as u32;
        let free = WORD_BITS - self.used;
        if len <= free {
            self.word = shl(self.word, len) | code.bits;
            self.used += len;
            return;
        }

        // high part fills the current word, low part starts the next one
        let low_len = len - free;
        let bits = code.bits as u64;
        let high = (bits >> low_len) as u32;
        let low = (bits & ((1u64 << low_len) - 1)) as u32;

        let full = shl(self.word, free) | high;
        self.emit(full, WORD_BITS);
        self.word = low;
        self.used = low_len;
    }

    /// Writes out the last word, left-aligned so the unused low bits are zero.
    pub fn finish(mut self) {
        if self.used > 0 {
            let last = shl(self.word, WORD_BITS - self.used);
            self.emit(last, self.used);
        }
    }

    fn emit(&mut self, word: u32, bits: u32) {
        self.out.extend_from_slice(&word.to_be_bytes());
        self.observer.word_flushed(word, bits);
    }
}

/// Appends the packed codes for `data` to `out`.
pub fn encode(
    data: &[u8],
    codes: &CodeTable,
    out: &mut Vec<u8>,
    observer: &mut dyn CodecObserver,
) -> Result<()> {
    let mut packer = WordPacker::new(out, observer);
    for &byte in data {
        let code = codes.get(byte).ok_or(Error::UnknownSymbol(byte))?;
        packer.push(code);
    }
    packer.finish();
    Ok(())
}

/// Decodes exactly `symbols` bytes from `payload`.
///
/// Bits are read most significant first; `0` steps left and `1` steps right.
/// When the root is itself a leaf every bit yields that leaf. Bits left over
/// after the last symbol are padding and are never looked at.
pub fn decode(tree: &HuffmanTree, payload: &[u8], symbols: u64) -> Result<Vec<u8>> {
    let available_bits = payload.len() as u64 * 8;
    if symbols > available_bits {
        return Err(Error::TruncatedPayload {
            needed: symbols.div_ceil(8) as usize,
            available: payload.len(),
        });
    }

    let mut out = Vec::with_capacity(symbols as usize);
    let mut reader = BitReader::endian(payload, BigEndian);
    let root = tree.root();
    let mut at = root;

    while (out.len() as u64) < symbols {
        // Every bit is read by now and each symbol still owed takes at
        // least one more.
        let bit = reader.read_bit().map_err(|_| Error::TruncatedPayload {
            needed: (available_bits + (symbols - out.len() as u64)).div_ceil(8) as usize,
            available: payload.len(),
        })?;

        match tree.node(at).kind {
            NodeKind::Leaf(value) => out.push(value),
            NodeKind::Internal { left, right } => {
                at = if bit { right } else { left };
                if let NodeKind::Leaf(value) = tree.node(at).kind {
                    out.push(value);
                    at = root;
                }
            }
        }
    }
    Ok(out)
}
