use super::error::MetadataError;
use super::reader::MetadataReader;
use crate::MetadataRecord;

/// Decode a metadata record.
pub fn decode_metadata(stream: &[u8]) -> Result<MetadataRecord, MetadataError> {
    let mut reader = MetadataReader::new(stream);
    let name = reader.read_field(0)?;
    let package_id = reader.read_field(1)?;
    let version_name = reader.read_field(2)?;
    let version_code = reader.read_version_code()?;
    tracing::debug!(bytes = stream.len(), %package_id, "decoded metadata");
    Ok(MetadataRecord {
        name,
        package_id,
        version_name,
        version_code: u32::from(version_code),
    })
}

#[cfg(test)]
mod tests {
    use super::decode_metadata;
    use crate::MetadataRecord;
    use crate::codecs::metadata::error::MetadataError;

    #[test]
    fn decode_record() {
        let record = decode_metadata(b"Hello\x00com.example.hello\x001.0\x00\x07").unwrap();
        assert_eq!(
            record,
            MetadataRecord {
                name: "Hello".to_string(),
                package_id: "com.example.hello".to_string(),
                version_name: "1.0".to_string(),
                version_code: 7,
            }
        );
    }

    #[test]
    fn empty_fields_are_allowed() {
        let record = decode_metadata(b"\x00\x00\x00\xff").unwrap();
        assert_eq!(record.name, "");
        assert_eq!(record.version_code, 255);
    }

    #[test]
    fn too_few_separators() {
        let err = decode_metadata(b"Hello\x00com.example").unwrap_err();
        assert_eq!(err, MetadataError::MissingSeparators { found: 1 });
        assert!(err.is_malformed_stream());
    }

    #[test]
    fn missing_version_byte() {
        let err = decode_metadata(b"a\x00b\x00c\x00").unwrap_err();
        assert_eq!(err, MetadataError::MissingVersionCode { offset: 6 });
    }
}
