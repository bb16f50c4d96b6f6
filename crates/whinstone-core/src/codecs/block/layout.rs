pub use crate::codecs::common::FIELD_SEP;

/// Precedes the collection name.
pub const TEMPLATE_HEADER: u8 = 0x11;
/// Starts each block record.
pub const BLOCK_SEP: u8 = 0x22;

/// Width of the raw color run that follows `BLOCK_SEP`.
pub const COLOR_LEN: usize = 3;

/// Bytes that end any text field in the stream.
pub const FIELD_STOPS: [u8; 3] = [FIELD_SEP, TEMPLATE_HEADER, BLOCK_SEP];

/// Bytes that may never appear inside a collection name, opcode or parameter.
pub const RESERVED: [u8; 3] = FIELD_STOPS;
