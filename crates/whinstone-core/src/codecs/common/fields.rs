use super::error::ScanError;

/// Decode a scanned field as UTF-8. `offset` is where the field starts.
pub(crate) fn utf8_field(
    bytes: &[u8],
    offset: usize,
    context: &'static str,
) -> Result<String, ScanError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| ScanError::InvalidUtf8 { offset, context })
}

/// First reserved byte contained in `value`, if any.
pub(crate) fn find_reserved(value: &str, reserved: &[u8]) -> Option<u8> {
    value.bytes().find(|b| reserved.contains(b))
}
