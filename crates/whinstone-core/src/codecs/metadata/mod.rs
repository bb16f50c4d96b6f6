//! Metadata record codec.
//!
//! Fixed layout: `name 0x00 package_id 0x00 version_name 0x00 version_code`,
//! where `version_code` is one raw byte. The three text fields are split
//! positionally on the first three separators, so the version byte may
//! itself be `0x00`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod writer;

pub use error::MetadataError;
pub use parser::decode_metadata;
pub use writer::encode_metadata;
