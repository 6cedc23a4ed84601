use huffpack::{CodeTable, CodecObserver, HuffmanTree};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// Initializer for logger
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: a global logger was already installed");
    }
}

/// Forwards codec events to tracing.
#[derive(Debug, Default)]
pub struct TracingObserver {
    pub words: usize,
}

impl CodecObserver for TracingObserver {
    fn tree_built(&mut self, tree: &HuffmanTree, codes: &CodeTable) {
        tracing::debug!(
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            longest_code = codes.max_len(),
            "huffman tree built"
        );
    }

    fn header_encoded(&mut self, header_len: usize, symbols: u64) {
        tracing::debug!(header_len, symbols, "header written");
    }

    fn word_flushed(&mut self, word: u32, bits: u32) {
        self.words += 1;
        tracing::trace!(word = %format!("{:032b}", word), bits, "word flushed");
    }

    fn header_decoded(&mut self, header_len: usize, symbols: u64, tree: &HuffmanTree) {
        tracing::debug!(header_len, symbols, leaves = tree.leaf_count(), "header read");
    }
}
