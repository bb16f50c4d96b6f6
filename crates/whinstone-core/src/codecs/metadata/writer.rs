use super::error::MetadataError;
use super::layout;
use crate::MetadataRecord;
use crate::codecs::common::fields::find_reserved;

/// Encode a metadata record.
///
/// Version codes above 255 are rejected rather than truncated, and text
/// fields may not contain the `0x00` separator.
pub fn encode_metadata(record: &MetadataRecord) -> Result<Vec<u8>, MetadataError> {
    let version_code = u8::try_from(record.version_code).map_err(|_| {
        MetadataError::VersionCodeOutOfRange {
            value: record.version_code,
        }
    })?;

    let fields = [&record.name, &record.package_id, &record.version_name];
    let mut out = Vec::with_capacity(fields.iter().map(|f| f.len() + 1).sum::<usize>() + 1);
    for (field, value) in layout::TEXT_FIELDS.into_iter().zip(fields) {
        if let Some(byte) = find_reserved(value, &[layout::FIELD_SEP]) {
            return Err(MetadataError::FieldCollision { field, byte });
        }
        out.extend_from_slice(value.as_bytes());
        out.push(layout::FIELD_SEP);
    }
    out.push(version_code);
    Ok(out)
}
