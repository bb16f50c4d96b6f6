pub use crate::codecs::common::FIELD_SEP;

/// Names of the separator-terminated text fields, in wire order, ahead of the
/// version byte. Also used as error context.
pub const TEXT_FIELDS: [&str; 3] = ["name", "package id", "version name"];

/// Largest version code the one-byte wire field can hold.
pub const MAX_VERSION_CODE: u32 = u8::MAX as u32;
