//! # huffpack
//!
//! Whole-buffer Huffman compression.
//!
//! ```rust
//! let packed = huffpack::compress(b"go go gophers")?;
//! assert_eq!(huffpack::decompress(&packed)?, b"go go gophers");
//! # Ok::<(), huffpack::Error>(())
//! ```
//!
//! A compressed buffer is a big-endian `u32` header length, the header (a
//! symbol count followed by the post-order tree, see [`header`]), then the
//! codes packed into big-endian 32-bit words (see [`bitcodec`]).

pub mod bitcodec;
pub mod code;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod header;
pub mod heap;
pub mod observer;
pub mod tree;

pub use code::{Code, CodeTable};
pub use codec::{Frame, compress, compress_with, decompress, decompress_with};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use heap::PriorityQueue;
pub use observer::{CodecObserver, NoopObserver};
pub use tree::{HuffmanTree, Node, NodeId, NodeKind, TreeBuilder};
