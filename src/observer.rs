//! Hooks for watching a compress or decompress call from the outside.
//!
//! The codec itself never prints or logs. Callers that want diagnostics pass
//! an observer to [`compress_with`](crate::compress_with) or
//! [`decompress_with`](crate::decompress_with).

use crate::code::CodeTable;
use crate::tree::HuffmanTree;

pub trait CodecObserver {
    /// Called once the tree and its code table exist.
    fn tree_built(&mut self, _tree: &HuffmanTree, _codes: &CodeTable) {}

    /// Called after the header region is written.
    fn header_encoded(&mut self, _header_len: usize, _symbols: u64) {}

    /// Called for each 32-bit word appended to the payload. `bits` counts
    /// the code bits it carries; the last word may be partly padding.
    fn word_flushed(&mut self, _word: u32, _bits: u32) {}

    /// Called after the header region of a compressed stream is parsed.
    fn header_decoded(&mut self, _header_len: usize, _symbols: u64, _tree: &HuffmanTree) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CodecObserver for NoopObserver {}
