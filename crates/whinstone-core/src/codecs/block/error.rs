use thiserror::Error;

use crate::codecs::common::error::ScanError;

/// Errors returned by block program encoding and decoding.
///
/// # Examples
/// ```
/// use whinstone_core::BlockCodeError;
///
/// let err = BlockCodeError::MissingHeader { offset: 0 };
/// assert!(err.to_string().contains("template header"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockCodeError {
    #[error("malformed code stream: {0}")]
    Scan(#[from] ScanError),
    #[error("malformed code stream: expected template header at offset {offset}")]
    MissingHeader { offset: usize },
    #[error("malformed code stream: unexpected byte 0x{byte:02x} at offset {offset} in {context}")]
    UnexpectedByte {
        byte: u8,
        offset: usize,
        context: &'static str,
    },
    #[error("malformed code stream: empty opcode at offset {offset}")]
    EmptyOpcode { offset: usize },
    #[error("{field} contains reserved byte 0x{byte:02x}")]
    FieldCollision { field: &'static str, byte: u8 },
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

impl BlockCodeError {
    /// True for failures caused by the input stream rather than by a value
    /// rejected at encode time.
    pub fn is_malformed_stream(&self) -> bool {
        !matches!(
            self,
            BlockCodeError::FieldCollision { .. } | BlockCodeError::EmptyField { .. }
        )
    }
}
