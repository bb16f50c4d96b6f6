use thiserror::Error;

use crate::codecs::common::error::ScanError;

/// Errors returned by metadata encoding and decoding.
///
/// # Examples
/// ```
/// use whinstone_core::MetadataError;
///
/// let err = MetadataError::VersionCodeOutOfRange { value: 256 };
/// assert!(err.to_string().contains("0..=255"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("malformed metadata record: {0}")]
    Scan(#[from] ScanError),
    #[error("malformed metadata record: found {found} of 3 field separators")]
    MissingSeparators { found: usize },
    #[error("malformed metadata record: missing version code byte at offset {offset}")]
    MissingVersionCode { offset: usize },
    #[error("malformed metadata record: {count} trailing byte(s) at offset {offset}")]
    TrailingBytes { offset: usize, count: usize },
    #[error("version code {value} does not fit the one-byte field (0..=255)")]
    VersionCodeOutOfRange { value: u32 },
    #[error("{field} contains reserved byte 0x{byte:02x}")]
    FieldCollision { field: &'static str, byte: u8 },
}

impl MetadataError {
    /// True for failures caused by the input stream rather than by a value
    /// rejected at encode time.
    pub fn is_malformed_stream(&self) -> bool {
        !matches!(
            self,
            MetadataError::VersionCodeOutOfRange { .. } | MetadataError::FieldCollision { .. }
        )
    }
}
