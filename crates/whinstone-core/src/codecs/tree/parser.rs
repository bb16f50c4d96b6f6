use super::error::LayoutError;
use super::layout;
use super::reader::LayoutReader;
use crate::{LayoutAttribute, LayoutNode};

/// Where the scan is inside the node currently being decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    ScanningHeader,
    ReadingAttribute,
    InChildren,
}

impl ScanState {
    fn after_marker(marker: u8) -> Self {
        if marker == layout::ATTR_SEP {
            ScanState::ReadingAttribute
        } else {
            ScanState::InChildren
        }
    }
}

/// Decode a complete layout stream into its root node.
///
/// The stream must contain exactly one root node; bytes left after the
/// root's `CHILD_CLOSE` are rejected.
pub fn decode_layout(stream: &[u8]) -> Result<LayoutNode, LayoutError> {
    let (root, consumed) = decode_node(stream, 0)?;
    if consumed < stream.len() {
        return Err(LayoutError::TrailingBytes {
            offset: consumed,
            count: stream.len() - consumed,
        });
    }
    tracing::debug!(
        bytes = stream.len(),
        nodes = root.node_count(),
        "decoded layout"
    );
    Ok(root)
}

/// Decode one node starting at `start`.
///
/// Returns the node and the number of bytes it occupies, including its
/// closing `CHILD_CLOSE`. Nesting is tracked on an explicit stack of
/// unfinished ancestors, so depth is limited only by memory.
pub fn decode_node(stream: &[u8], start: usize) -> Result<(LayoutNode, usize), LayoutError> {
    let mut reader = LayoutReader::at(stream, start);
    let mut ancestors: Vec<LayoutNode> = Vec::new();
    let mut node = LayoutNode::new(String::new());
    let mut state = ScanState::ScanningHeader;

    loop {
        state = match state {
            ScanState::ScanningHeader => {
                let (view_name, marker) = reader.read_view_name()?;
                node.view_name = view_name;
                ScanState::after_marker(marker)
            }
            ScanState::ReadingAttribute => {
                let prefix = reader.read_terminated("attribute prefix")?;
                let name_offset = reader.position();
                let name = reader.read_terminated("attribute name")?;
                if name.is_empty() {
                    return Err(LayoutError::EmptyAttributeName {
                        offset: name_offset,
                    });
                }
                let (value, marker) = reader.read_value()?;
                node.attributes.push(LayoutAttribute {
                    prefix,
                    name,
                    value,
                });
                ScanState::after_marker(marker)
            }
            ScanState::InChildren => match reader.peek() {
                Some(layout::CHILD_CLOSE) => {
                    reader.advance(1);
                    match ancestors.pop() {
                        Some(parent) => {
                            let finished = std::mem::replace(&mut node, parent);
                            node.children.push(finished);
                            ScanState::InChildren
                        }
                        None => return Ok((node, reader.position() - start)),
                    }
                }
                Some(_) => {
                    ancestors.push(std::mem::replace(&mut node, LayoutNode::new(String::new())));
                    ScanState::ScanningHeader
                }
                None => {
                    return Err(LayoutError::Unterminated {
                        offset: reader.position(),
                        depth: ancestors.len(),
                    });
                }
            },
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_layout, decode_node};
    use crate::codecs::common::error::ScanError;
    use crate::codecs::tree::error::LayoutError;
    use crate::codecs::tree::layout;
    use crate::{LayoutAttribute, LayoutNode};

    #[test]
    fn decode_childless_node() {
        let node = decode_layout(b"TextView\x22\x33").unwrap();
        assert_eq!(node, LayoutNode::new("TextView"));
    }

    #[test]
    fn decode_attributes_in_order() {
        let stream = b"Button\x11android\x00id\x00@+id/ok\x11android\x00text\x00OK\x22\x33";
        let node = decode_layout(stream).unwrap();
        assert_eq!(
            node.attributes,
            vec![
                LayoutAttribute::new("android", "id", "@+id/ok"),
                LayoutAttribute::new("android", "text", "OK"),
            ]
        );
    }

    #[test]
    fn decode_reports_consumed_length() {
        let stream = b"Root\x22Child\x22\x33\x33";
        let (child, consumed) = decode_node(stream, 5).unwrap();
        assert_eq!(child, LayoutNode::new("Child"));
        assert_eq!(consumed, 7);
    }

    #[test]
    fn child_close_is_not_mistaken_for_parent_close() {
        let stream = b"Root\x22A\x22B\x22\x33\x33C\x22\x33\x33";
        let node = decode_layout(stream).unwrap();
        let expected = LayoutNode::new("Root")
            .with_child(LayoutNode::new("A").with_child(LayoutNode::new("B")))
            .with_child(LayoutNode::new("C"));
        assert_eq!(node, expected);
    }

    #[test]
    fn missing_final_close_is_unterminated() {
        let err = decode_layout(b"Root\x22Child\x22\x33").unwrap_err();
        assert_eq!(err, LayoutError::Unterminated { offset: 12, depth: 0 });
        assert!(err.is_malformed_stream());
    }

    #[test]
    fn empty_stream_is_truncated() {
        let err = decode_layout(b"").unwrap_err();
        assert_eq!(
            err,
            LayoutError::Scan(ScanError::Truncated {
                offset: 0,
                context: "view name"
            })
        );
    }

    #[test]
    fn empty_attribute_name_is_rejected() {
        let err = decode_layout(b"View\x11android\x00\x00value\x22\x33").unwrap_err();
        assert_eq!(err, LayoutError::EmptyAttributeName { offset: 13 });
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let err = decode_layout(b"View\x22\x33extra").unwrap_err();
        assert_eq!(err, LayoutError::TrailingBytes { offset: 6, count: 5 });
    }

    #[test]
    fn unterminated_reports_open_depth() {
        let err = decode_layout(b"Root\x22Mid\x22Leaf\x22").unwrap_err();
        assert_eq!(err, LayoutError::Unterminated { offset: 14, depth: 2 });
    }

    #[test]
    fn deep_nesting_is_not_limited() {
        let levels = 10_000;
        let mut stream = Vec::new();
        for _ in 0..levels {
            stream.extend_from_slice(b"V\x22");
        }
        stream.extend(std::iter::repeat_n(layout::CHILD_CLOSE, levels));
        let node = decode_layout(&stream).unwrap();
        assert_eq!(node.node_count(), levels);
        assert_eq!(node.depth(), levels - 1);
    }
}
