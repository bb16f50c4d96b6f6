//! Block program codec.
//!
//! The stream opens with `TEMPLATE_HEADER collection_name 0x00`, followed by
//! one record per block: `BLOCK_SEP`, three raw color bytes, the opcode and
//! its `0x00` terminator, then `0x00 parameter` for each parameter.
//!
//! The color bytes are positional and unescaped, so any channel value
//! (including the marker values) is legal. The parser reads them through a
//! dedicated fixed-width step that never inspects their values.
//!
//! A block is finalized when the next marker arrives. The last block has no
//! following marker, so the parser flushes it explicitly at end of stream.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod writer;

pub use error::BlockCodeError;
pub use parser::decode_code;
pub use writer::encode_code;
