//! Whinstone core library: byte-level codecs for block-editor projects.
//!
//! A project is stored as a handful of named blobs. This crate turns the
//! three structured artifacts of a project into compact marker-delimited
//! byte streams and back:
//! - a UI layout tree (`codecs::tree`),
//! - a block program (`codecs::block`),
//! - a fixed metadata record (`codecs::metadata`).
//!
//! Every codec follows the same layering (layout/reader/parser/writer/error)
//! and is pure: no I/O, no shared state, safe to call concurrently on
//! disjoint inputs. The `project` module assembles the blobs into a
//! container; storing that container is left to the caller.
//!
//! Invariants:
//! - `decode(encode(x)) == x` for every value accepted by `encode`.
//! - Encoders refuse field values that contain reserved marker bytes, since
//!   the wire format has no escaping.
//! - Decoders never return a partially built value.
//!
//! # Examples
//! ```
//! use whinstone_core::{LayoutAttribute, LayoutNode, decode_layout, encode_layout};
//!
//! let node = LayoutNode {
//!     view_name: "TextView".to_string(),
//!     attributes: vec![LayoutAttribute::new("android", "text", "hi")],
//!     children: Vec::new(),
//! };
//! let bytes = encode_layout(&node)?;
//! assert_eq!(decode_layout(&bytes)?, node);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod codecs;
mod id;
mod project;

pub use codecs::block::{BlockCodeError, decode_code, encode_code};
pub use codecs::common::error::ScanError;
pub use codecs::metadata::{MetadataError, decode_metadata, encode_metadata};
pub use codecs::tree::{LayoutError, decode_layout, encode_layout};
pub use id::{FREE_ID_ALPHABET, FREE_ID_LEN, IdError, generate_free_id};
pub use project::{
    CODE_BLOB, FORMAT_VERSION, LAYOUT_BLOB, METADATA_BLOB, Project, ProjectError, ProjectFile,
    RawProject, VERSION_BLOB, check_version, load_project, parse_code, parse_layout,
    parse_metadata, save_project,
};

/// One view in a layout tree. Children are owned by their parent.
///
/// # Examples
/// ```
/// use whinstone_core::LayoutNode;
///
/// let root = LayoutNode::new("LinearLayout").with_child(LayoutNode::new("TextView"));
/// assert_eq!(root.children.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutNode {
    /// View kind, e.g. `LinearLayout`. Never empty.
    pub view_name: String,
    /// XML attributes in declaration order.
    #[serde(default)]
    pub attributes: Vec<LayoutAttribute>,
    /// Child views in declaration order.
    #[serde(default)]
    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    pub fn new(view_name: impl Into<String>) -> Self {
        Self {
            view_name: view_name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: LayoutAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_child(mut self, child: LayoutNode) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(&node.children);
        }
        count
    }

    /// Longest path from `self` to a leaf, counted in edges. A leaf is 0.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 0)];
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        deepest
    }
}

// Compared level by level from an explicit list so deep trees do not need
// one stack frame per level.
impl PartialEq for LayoutNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            if left.view_name != right.view_name
                || left.attributes != right.attributes
                || left.children.len() != right.children.len()
            {
                return false;
            }
            pending.extend(left.children.iter().zip(&right.children));
        }
        true
    }
}

impl Eq for LayoutNode {}

// Children are released from an explicit list; the default recursive drop
// would need one stack frame per level.
impl Drop for LayoutNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// A namespaced XML attribute such as `android:layout_width="match_parent"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutAttribute {
    /// Namespace prefix (`android`, `app`, ...). May be empty.
    pub prefix: String,
    /// Attribute name. Never empty.
    pub name: String,
    /// Attribute value. May be empty.
    pub value: String,
}

impl LayoutAttribute {
    pub fn new(prefix: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            name: name.into(),
            value: value.into(),
        }
    }
}

/// 8-bit RGB block color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub const fn to_bytes(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}

/// One opcode invocation with its color tag and positional parameters.
///
/// # Examples
/// ```
/// use whinstone_core::{Block, Rgb};
///
/// let block = Block::new("move", Rgb::new(255, 0, 0)).with_parameter("10");
/// assert_eq!(block.parameters, vec!["10".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub opcode: String,
    pub color: Rgb,
    #[serde(default)]
    pub parameters: Vec<String>,
}

impl Block {
    pub fn new(opcode: impl Into<String>, color: Rgb) -> Self {
        Self {
            opcode: opcode.into(),
            color,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameters.push(parameter.into());
        self
    }
}

/// Ordered blocks belonging to one block palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockProgram {
    /// Palette the blocks come from, e.g. `blocks-view`.
    pub collection_name: String,
    /// Blocks in definition order.
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// Project metadata record.
///
/// `version_code` is widened in memory, but the wire format stores a single
/// byte, so only `0..=255` can be encoded.
///
/// # Examples
/// ```
/// use whinstone_core::{MetadataRecord, decode_metadata, encode_metadata};
///
/// let record = MetadataRecord {
///     name: "Hello".to_string(),
///     package_id: "com.example.hello".to_string(),
///     version_name: "1.0".to_string(),
///     version_code: 1,
/// };
/// let bytes = encode_metadata(&record)?;
/// assert_eq!(decode_metadata(&bytes)?, record);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub name: String,
    pub package_id: String,
    pub version_name: String,
    pub version_code: u32,
}
