use super::error::BlockCodeError;
use super::layout;
use crate::BlockProgram;
use crate::codecs::common::fields::find_reserved;

/// Encode a block program.
///
/// Fails without producing output when the collection name, an opcode or a
/// parameter contains `0x00`, `0x11` or `0x22`, or when an opcode is empty.
/// Colors are written raw and never fail.
pub fn encode_code(program: &BlockProgram) -> Result<Vec<u8>, BlockCodeError> {
    let mut out = Vec::new();
    out.push(layout::TEMPLATE_HEADER);
    write_field(&mut out, "collection name", &program.collection_name)?;
    out.push(layout::FIELD_SEP);

    for block in &program.blocks {
        out.push(layout::BLOCK_SEP);
        out.extend_from_slice(&block.color.to_bytes());
        if block.opcode.is_empty() {
            return Err(BlockCodeError::EmptyField { field: "opcode" });
        }
        write_field(&mut out, "opcode", &block.opcode)?;
        out.push(layout::FIELD_SEP);
        for parameter in &block.parameters {
            out.push(layout::FIELD_SEP);
            write_field(&mut out, "block parameter", parameter)?;
        }
    }

    tracing::debug!(
        blocks = program.blocks.len(),
        bytes = out.len(),
        "encoded block program"
    );
    Ok(out)
}

fn write_field(out: &mut Vec<u8>, field: &'static str, value: &str) -> Result<(), BlockCodeError> {
    if let Some(byte) = find_reserved(value, &layout::RESERVED) {
        return Err(BlockCodeError::FieldCollision { field, byte });
    }
    out.extend_from_slice(value.as_bytes());
    Ok(())
}
