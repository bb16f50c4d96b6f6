//! Byte-scanning helpers shared by every codec.

pub mod error;
pub mod fields;
pub mod reader;

/// Field terminator used inside layout attributes, block records and the
/// metadata record.
pub const FIELD_SEP: u8 = 0x00;
