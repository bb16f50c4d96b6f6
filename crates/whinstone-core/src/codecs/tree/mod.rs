//! Layout tree codec.
//!
//! A node is written as its view name, one `ATTR_SEP`-introduced record per
//! attribute (`prefix 0x00 name 0x00 value`), then `CHILD_OPEN`, the
//! children's own encodings, and a closing `CHILD_CLOSE`. Every node writes
//! both brackets, even when it has no children, so each child encoding is
//! self-terminating.
//!
//! Decoding is cursor based and keeps unfinished ancestors on an explicit
//! stack. A `CHILD_CLOSE` always finishes the innermost open node, so a
//! parent's close is the first one seen after its last child has finished
//! and no lookbehind flag is needed. [`parser::decode_node`] reports how
//! many bytes the node occupied. Neither direction recurses, so tree depth
//! is bounded only by memory.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod writer;

pub use error::LayoutError;
pub use parser::decode_layout;
pub use writer::encode_layout;
