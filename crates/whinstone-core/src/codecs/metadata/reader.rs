use super::error::MetadataError;
use super::layout;
use crate::codecs::common::fields::utf8_field;
use crate::codecs::common::reader::ByteCursor;

pub struct MetadataReader<'a> {
    cursor: ByteCursor<'a>,
}

impl<'a> MetadataReader<'a> {
    pub fn new(stream: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(stream),
        }
    }

    /// Read the text field at `index` and its separator. `index` is the
    /// number of separators already consumed.
    pub fn read_field(&mut self, index: usize) -> Result<String, MetadataError> {
        let offset = self.cursor.position();
        let (bytes, stop) = self.cursor.take_until(&[layout::FIELD_SEP]);
        if stop.is_none() {
            return Err(MetadataError::MissingSeparators { found: index });
        }
        self.cursor.advance(1);
        let context = layout::TEXT_FIELDS.get(index).copied().unwrap_or("field");
        Ok(utf8_field(bytes, offset, context)?)
    }

    /// Read the final version byte; it must be the last byte of the record.
    pub fn read_version_code(&mut self) -> Result<u8, MetadataError> {
        let offset = self.cursor.position();
        let [code] = self
            .cursor
            .take_raw::<1>("version code")
            .map_err(|_| MetadataError::MissingVersionCode { offset })?;
        let rest = self.cursor.remaining();
        if !rest.is_empty() {
            return Err(MetadataError::TrailingBytes {
                offset: self.cursor.position(),
                count: rest.len(),
            });
        }
        Ok(code)
    }
}
