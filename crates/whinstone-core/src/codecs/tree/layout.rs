pub use crate::codecs::common::FIELD_SEP;

/// Introduces one attribute record.
pub const ATTR_SEP: u8 = 0x11;
/// Opens a node's child region. Written once per node.
pub const CHILD_OPEN: u8 = 0x22;
/// Closes a node's child region. Written once per node.
pub const CHILD_CLOSE: u8 = 0x33;

/// A view name is scanned up to the first of these bytes. Only `ATTR_SEP`
/// and `CHILD_OPEN` may end it; `CHILD_CLOSE` in first position would read
/// as the parent's close, so all four are excluded from view names.
pub const VIEW_NAME_STOPS: [u8; 4] = [FIELD_SEP, ATTR_SEP, CHILD_OPEN, CHILD_CLOSE];

/// Attribute prefix and name end at the first `FIELD_SEP`.
pub const TERMINATED_FIELD_STOPS: [u8; 1] = [FIELD_SEP];

/// An attribute value ends at the marker that follows it.
pub const VALUE_STOPS: [u8; 2] = [ATTR_SEP, CHILD_OPEN];
