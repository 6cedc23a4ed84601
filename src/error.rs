//! Error types for compression and decompression.

use std::io;
use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// There are no bytes to build a tree from.
    #[error("cannot compress empty input")]
    EmptyInput,

    /// A code does not fit the 32-bit accumulator word.
    #[error("code for byte 0x{symbol:02x} needs {length} bits, limit is 32")]
    CodeTooLong { symbol: u8, length: usize },

    /// The serialized tree or its framing is malformed.
    #[error("corrupt header: {0}")]
    CorruptHeader(String),

    /// The input ends before the data it declares. `needed` is a lower
    /// bound: the exact size depends on codes the input never got to.
    #[error("truncated payload: need at least {needed} bytes, {available} available")]
    TruncatedPayload { needed: usize, available: usize },

    /// A byte to encode has no entry in the code table.
    #[error("no code for byte 0x{0:02x}")]
    UnknownSymbol(u8),
}

impl Error {
    pub(crate) fn corrupt(message: impl Into<String>) -> Self {
        Error::CorruptHeader(message.into())
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        let kind = match e {
            Error::EmptyInput => io::ErrorKind::InvalidInput,
            _ => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_kinds() {
        let e: io::Error = Error::EmptyInput.into();
        assert_eq!(e.kind(), io::ErrorKind::InvalidInput);

        let e: io::Error = Error::corrupt("stack underflow").into();
        assert_eq!(e.kind(), io::ErrorKind::InvalidData);
        assert!(e.to_string().contains("stack underflow"));
    }

    #[test]
    fn display_messages() {
        let e = Error::CodeTooLong { symbol: 0x41, length: 33 };
        assert_eq!(e.to_string(), "code for byte 0x41 needs 33 bits, limit is 32");

        let e = Error::TruncatedPayload { needed: 10, available: 4 };
        assert_eq!(e.to_string(), "truncated payload: need at least 10 bytes, 4 available");
    }
}
