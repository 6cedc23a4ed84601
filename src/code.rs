use std::fmt;

use crate::error::{Error, Result};
use crate::tree::{HuffmanTree, NodeId, NodeKind};

/// Widest code the bit packer accepts.
pub const MAX_CODE_LEN: usize = 32;

/// A prefix code, right-aligned in `bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub bits: u32,
    pub len: u8,
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.bits, width = self.len as usize)
    }
}

/// Byte to code mapping, one entry per leaf of the tree it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
    count: usize,
}

impl CodeTable {
    /// Walks the tree depth-first: a left edge appends `0`, a right edge
    /// appends `1`. A tree that is a lone leaf gets the one-bit code `0`.
    pub fn generate(tree: &HuffmanTree) -> Result<Self> {
        let mut table = CodeTable {
            codes: [None; 256],
            count: 0,
        };

        if let NodeKind::Leaf(value) = tree.node(tree.root()).kind {
            table.insert(value, Code { bits: 0, len: 1 });
            return Ok(table);
        }

        let mut stack = vec![(tree.root(), 0u64, 0usize)];
        while let Some((id, bits, len)) = stack.pop() {
            match tree.node(id).kind {
                NodeKind::Leaf(value) => {
                    table.insert(
                        value,
                        Code {
                            bits: bits as u32,
                            len: len as u8,
                        },
                    );
                }
                NodeKind::Internal { left, right } => {
                    if len + 1 > MAX_CODE_LEN {
                        return Err(Error::CodeTooLong {
                            symbol: first_leaf(tree, left),
                            length: len + 1,
                        });
                    }
                    stack.push((right, (bits << 1) | 1, len + 1));
                    stack.push((left, bits << 1, len + 1));
                }
            }
        }
        Ok(table)
    }

    fn insert(&mut self, value: u8, code: Code) {
        if self.codes[value as usize].replace(code).is_none() {
            self.count += 1;
        }
    }

    pub fn get(&self, byte: u8) -> Option<Code> {
        self.codes[byte as usize]
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len as usize).max().unwrap_or(0)
    }

    /// Entries in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(b, c)| c.map(|c| (b as u8, c)))
    }
}

impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (byte, code) in self.iter() {
            writeln!(f, "{:?}: {}", byte as char, code)?;
        }
        Ok(())
    }
}

// Some leaf below `id`, used to name the symbol in a CodeTooLong error.
fn first_leaf(tree: &HuffmanTree, mut id: NodeId) -> u8 {
    loop {
        match tree.node(id).kind {
            NodeKind::Leaf(value) => return value,
            NodeKind::Internal { left, .. } => id = left,
        }
    }
}
