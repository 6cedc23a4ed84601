//! Post-order tree header.
//!
//! A leaf is written as the pair `[0xFF, value]` and an internal node as the
//! single byte `0x00`, children before parents, left before right. Because a
//! leaf unit always starts with `0xFF`, a `0x00` value byte is only ever read
//! as the second half of a leaf.

use crate::error::{Error, Result};
use crate::tree::{Arena, HuffmanTree, NodeId, NodeKind};

pub const LEAF_MARKER: u8 = 0xFF;
pub const INTERNAL_MARKER: u8 = 0x00;

/// Header size for a tree with `leaves` leaves.
pub fn encoded_len(leaves: usize) -> usize {
    2 * leaves + leaves.saturating_sub(1)
}

pub fn serialize(tree: &HuffmanTree) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(tree.leaf_count()));
    serialize_into(tree, &mut out);
    out
}

pub fn serialize_into(tree: &HuffmanTree, out: &mut Vec<u8>) {
    // (node, children already emitted)
    let mut stack = vec![(tree.root(), false)];
    while let Some((id, expanded)) = stack.pop() {
        match tree.node(id).kind {
            NodeKind::Leaf(value) => out.extend_from_slice(&[LEAF_MARKER, value]),
            NodeKind::Internal { .. } if expanded => out.push(INTERNAL_MARKER),
            NodeKind::Internal { left, right } => {
                stack.push((id, true));
                stack.push((right, false));
                stack.push((left, false));
            }
        }
    }
}

/// Rebuilds a tree from a header.
///
/// Scanning stops at a `0x00` seen while exactly one subtree is pending;
/// anything after it is ignored. Rebuilt leaves carry weight 1, since the
/// header stores no weights.
pub fn deserialize(header: &[u8]) -> Result<HuffmanTree> {
    let mut arena = Arena::with_capacity(header.len());
    let mut stack: Vec<NodeId> = Vec::new();

    let mut i = 0;
    while i < header.len() {
        match header[i] {
            LEAF_MARKER => {
                let value = *header
                    .get(i + 1)
                    .ok_or_else(|| Error::corrupt(format!("leaf at offset {} has no value byte", i)))?;
                stack.push(arena.leaf(value, 1));
                i += 2;
            }
            INTERNAL_MARKER => {
                if stack.len() == 1 {
                    break;
                }
                let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                    return Err(Error::corrupt(format!(
                        "internal node at offset {} needs two subtrees",
                        i
                    )));
                };
                stack.push(arena.join(left, right));
                i += 1;
            }
            other => {
                return Err(Error::corrupt(format!(
                    "unexpected byte 0x{:02x} at offset {}",
                    other, i
                )));
            }
        }
    }

    match stack.as_slice() {
        [root] => Ok(arena.into_tree(*root)),
        [] => Err(Error::corrupt("header holds no tree")),
        pending => Err(Error::corrupt(format!(
            "{} subtrees left unjoined",
            pending.len()
        ))),
    }
}
