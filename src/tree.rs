//! Arena-backed Huffman tree and the builder that merges it out of a
//! priority queue.
//!
//! Nodes live in a flat `Vec` and refer to their children by [`NodeId`], so
//! a tree is a single owned allocation with no recursive boxes. Every
//! traversal here is iterative; skewed frequency tables can produce trees
//! whose height approaches the alphabet size.

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::heap::PriorityQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf(u8),
    Internal { left: NodeId, right: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub weight: u64,
    pub kind: NodeKind,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    pub fn from_frequencies(freq: &FrequencyTable) -> Result<Self> {
        TreeBuilder::new(freq).build()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaf_count()
    }

    /// Length of the longest root-to-leaf path. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.node(id).kind {
                NodeKind::Leaf(_) => max = max.max(depth),
                NodeKind::Internal { left, right } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        max
    }

    /// Same shape with the same leaf values at the same positions. Weights
    /// are not compared.
    pub fn same_shape(&self, other: &HuffmanTree) -> bool {
        let mut stack = vec![(self.root, other.root)];
        while let Some((a, b)) = stack.pop() {
            match (self.node(a).kind, other.node(b).kind) {
                (NodeKind::Leaf(x), NodeKind::Leaf(y)) if x == y => {}
                (
                    NodeKind::Internal { left: al, right: ar },
                    NodeKind::Internal { left: bl, right: br },
                ) => {
                    stack.push((al, bl));
                    stack.push((ar, br));
                }
                _ => return false,
            }
        }
        true
    }

    /// Assembles a tree from nodes built elsewhere, e.g. by the header
    /// deserializer. Callers guarantee the arena is a strict binary tree.
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        Self { nodes, root }
    }
}

/// Grows an arena, handing back ids for new nodes.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn leaf(&mut self, value: u8, weight: u64) -> NodeId {
        self.push(Node {
            weight,
            kind: NodeKind::Leaf(value),
        })
    }

    /// Joins two subtrees under a new internal node.
    pub(crate) fn join(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let weight = self.nodes[left.index()]
            .weight
            .saturating_add(self.nodes[right.index()].weight);
        self.push(Node {
            weight,
            kind: NodeKind::Internal { left, right },
        })
    }

    pub(crate) fn weight(&self, id: NodeId) -> u64 {
        self.nodes[id.index()].weight
    }

    pub(crate) fn into_tree(self, root: NodeId) -> HuffmanTree {
        HuffmanTree::from_parts(self.nodes, root)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }
}

/// Queue entry: a subtree plus its ordering key.
#[derive(Debug, Clone, Copy)]
struct Pending {
    id: NodeId,
    weight: u64,
    seq: u32,
}

fn lighter_first(a: &Pending, b: &Pending) -> bool {
    (a.weight, a.seq) < (b.weight, b.seq)
}

/// Builds a Huffman tree by repeatedly merging the two lightest subtrees.
///
/// Equal weights are ordered by a sequence number: leaves are numbered in
/// ascending byte order, and every merged node takes the next number after
/// all existing ones. The same frequency table therefore always yields the
/// same tree.
pub struct TreeBuilder {
    arena: Arena,
    queue: PriorityQueue<Pending, fn(&Pending, &Pending) -> bool>,
    next_seq: u32,
}

impl TreeBuilder {
    /// Seeds the queue with one leaf per distinct byte.
    pub fn new(freq: &FrequencyTable) -> Self {
        let distinct = freq.len();
        let order: fn(&Pending, &Pending) -> bool = lighter_first;
        let mut builder = Self {
            arena: Arena::with_capacity(2 * distinct.max(1) - 1),
            queue: PriorityQueue::with_capacity(distinct, order),
            next_seq: 0,
        };
        for (byte, count) in freq.iter() {
            let id = builder.arena.leaf(byte, count);
            builder.enqueue(id);
        }
        builder
    }

    fn enqueue(&mut self, id: NodeId) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Pending {
            id,
            weight: self.arena.weight(id),
            seq,
        });
    }

    pub fn build(mut self) -> Result<HuffmanTree> {
        loop {
            let a = self.queue.pop().ok_or(Error::EmptyInput)?;
            let Some(b) = self.queue.pop() else {
                return Ok(self.arena.into_tree(a.id));
            };
            // first popped goes right, second popped goes left
            let parent = self.arena.join(b.id, a.id);
            self.enqueue(parent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_weights(tree: &HuffmanTree) {
        for node in tree.nodes() {
            match node.kind {
                NodeKind::Leaf(_) => assert!(node.weight >= 1),
                NodeKind::Internal { left, right } => {
                    assert_eq!(node.weight, tree.node(left).weight + tree.node(right).weight);
                }
            }
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(HuffmanTree::from_bytes(b"").unwrap_err(), Error::EmptyInput);
    }

    #[test]
    fn single_symbol_is_lone_leaf() {
        let tree = HuffmanTree::from_bytes(b"aaaa").unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.depth(), 0);
        let root = tree.node(tree.root());
        assert_eq!(root.kind, NodeKind::Leaf(b'a'));
        assert_eq!(root.weight, 4);
    }

    #[test]
    fn gophers_shape() {
        let tree = HuffmanTree::from_bytes(b"go go gophers").unwrap();
        assert_eq!(tree.leaf_count(), 8);
        assert_eq!(tree.internal_count(), 7);
        assert_eq!(tree.node(tree.root()).weight, 13);
        check_weights(&tree);
    }

    #[test]
    fn first_popped_goes_right() {
        // 'b' is lighter, so it is popped first and lands on the right
        let freq = FrequencyTable::from_counts([(b'a', 5), (b'b', 2)]);
        let tree = HuffmanTree::from_frequencies(&freq).unwrap();
        let NodeKind::Internal { left, right } = tree.node(tree.root()).kind else {
            panic!("root should be internal");
        };
        assert_eq!(tree.node(left).kind, NodeKind::Leaf(b'a'));
        assert_eq!(tree.node(right).kind, NodeKind::Leaf(b'b'));
    }

    #[test]
    fn ties_are_deterministic() {
        let a = HuffmanTree::from_bytes(b"abcdabcd").unwrap();
        let b = HuffmanTree::from_bytes(b"dcbadcba").unwrap();
        assert!(a.same_shape(&b));
    }

    #[test]
    fn same_shape_detects_swapped_leaves() {
        let a = HuffmanTree::from_frequencies(&FrequencyTable::from_counts([(1, 1), (2, 5)])).unwrap();
        let b = HuffmanTree::from_frequencies(&FrequencyTable::from_counts([(1, 5), (2, 1)])).unwrap();
        assert!(!a.same_shape(&b));
        assert!(a.same_shape(&a.clone()));
    }

    #[test]
    fn fibonacci_weights_build_a_chain() {
        let mut fib = vec![1u64, 1];
        while fib.len() < 20 {
            let n = fib[fib.len() - 1] + fib[fib.len() - 2];
            fib.push(n);
        }
        let freq = FrequencyTable::from_counts(fib.iter().enumerate().map(|(i, &w)| (i as u8, w)));
        let tree = HuffmanTree::from_frequencies(&freq).unwrap();
        assert_eq!(tree.depth(), 19);
        check_weights(&tree);
    }
}
