use super::error::LayoutError;
use super::layout;
use crate::LayoutNode;
use crate::codecs::common::fields::find_reserved;

/// Pending work for the encoder's explicit stack.
enum Step<'a> {
    Open(&'a LayoutNode),
    Close,
}

/// Encode a layout tree.
///
/// Fails without producing output when a field contains one of its stop
/// bytes or when a view name or attribute name is empty. Depth is not
/// limited.
pub fn encode_layout(root: &LayoutNode) -> Result<Vec<u8>, LayoutError> {
    let mut out = Vec::new();
    let mut pending = vec![Step::Open(root)];

    while let Some(step) = pending.pop() {
        match step {
            Step::Open(node) => {
                write_header(&mut out, node)?;
                out.push(layout::CHILD_OPEN);
                pending.push(Step::Close);
                pending.extend(node.children.iter().rev().map(Step::Open));
            }
            Step::Close => out.push(layout::CHILD_CLOSE),
        }
    }

    tracing::debug!(
        nodes = root.node_count(),
        bytes = out.len(),
        "encoded layout"
    );
    Ok(out)
}

fn write_header(out: &mut Vec<u8>, node: &LayoutNode) -> Result<(), LayoutError> {
    write_field(out, "view name", &node.view_name, &layout::VIEW_NAME_STOPS, false)?;
    for attribute in &node.attributes {
        out.push(layout::ATTR_SEP);
        write_field(
            out,
            "attribute prefix",
            &attribute.prefix,
            &layout::TERMINATED_FIELD_STOPS,
            true,
        )?;
        out.push(layout::FIELD_SEP);
        write_field(
            out,
            "attribute name",
            &attribute.name,
            &layout::TERMINATED_FIELD_STOPS,
            false,
        )?;
        out.push(layout::FIELD_SEP);
        write_field(
            out,
            "attribute value",
            &attribute.value,
            &layout::VALUE_STOPS,
            true,
        )?;
    }
    Ok(())
}

fn write_field(
    out: &mut Vec<u8>,
    field: &'static str,
    value: &str,
    stops: &[u8],
    allow_empty: bool,
) -> Result<(), LayoutError> {
    if !allow_empty && value.is_empty() {
        return Err(LayoutError::EmptyField { field });
    }
    if let Some(byte) = find_reserved(value, stops) {
        return Err(LayoutError::FieldCollision { field, byte });
    }
    out.extend_from_slice(value.as_bytes());
    Ok(())
}
