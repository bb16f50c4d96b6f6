use thiserror::Error;

use crate::codecs::common::error::ScanError;

/// Errors returned by layout encoding and decoding.
///
/// # Examples
/// ```
/// use whinstone_core::LayoutError;
///
/// let err = LayoutError::Unterminated { offset: 12, depth: 0 };
/// assert!(err.to_string().contains("unterminated"));
/// assert!(err.is_malformed_stream());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("malformed layout stream: {0}")]
    Scan(#[from] ScanError),
    #[error("malformed layout stream: unterminated node at depth {depth}, stream ended at offset {offset}")]
    Unterminated { offset: usize, depth: usize },
    #[error("malformed layout stream: unexpected byte 0x{byte:02x} at offset {offset} in {context}")]
    UnexpectedByte {
        byte: u8,
        offset: usize,
        context: &'static str,
    },
    #[error("malformed layout stream: empty view name at offset {offset}")]
    EmptyViewName { offset: usize },
    #[error("malformed layout stream: empty attribute name at offset {offset}")]
    EmptyAttributeName { offset: usize },
    #[error("malformed layout stream: {count} trailing byte(s) after root node at offset {offset}")]
    TrailingBytes { offset: usize, count: usize },
    #[error("{field} contains reserved byte 0x{byte:02x}")]
    FieldCollision { field: &'static str, byte: u8 },
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

impl LayoutError {
    /// True for failures caused by the input stream rather than by a value
    /// rejected at encode time.
    pub fn is_malformed_stream(&self) -> bool {
        matches!(
            self,
            LayoutError::Scan(_)
                | LayoutError::Unterminated { .. }
                | LayoutError::UnexpectedByte { .. }
                | LayoutError::EmptyViewName { .. }
                | LayoutError::EmptyAttributeName { .. }
                | LayoutError::TrailingBytes { .. }
        )
    }
}
