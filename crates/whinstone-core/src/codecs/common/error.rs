use thiserror::Error;

/// Low-level scanning failures, wrapped by every codec error.
///
/// # Examples
/// ```
/// use whinstone_core::ScanError;
///
/// let err = ScanError::Truncated { offset: 4, context: "opcode" };
/// assert!(err.to_string().contains("stream ended"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("stream ended at offset {offset} while reading {context}")]
    Truncated {
        offset: usize,
        context: &'static str,
    },
    #[error("{context} at offset {offset} is not valid UTF-8")]
    InvalidUtf8 {
        offset: usize,
        context: &'static str,
    },
}
