//! Marker-delimited codecs.
//!
//! Each codec follows a layered structure:
//! - `layout`: reserved bytes and limits (source of truth for the wire format)
//! - `reader`: codec conventions on top of the shared byte cursor
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `writer`: encoding, including reserved-byte validation
//! - `error`: explicit, actionable errors
//!
//! Codecs are pure and contain no I/O; the `project` module and the CLI
//! handle blob naming and storage.

pub mod block;
pub mod common;
pub mod metadata;
pub mod tree;
