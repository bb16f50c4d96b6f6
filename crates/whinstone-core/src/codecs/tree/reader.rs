use super::error::LayoutError;
use super::layout;
use crate::codecs::common::error::ScanError;
use crate::codecs::common::fields::utf8_field;
use crate::codecs::common::reader::ByteCursor;

/// Layout conventions on top of [`ByteCursor`].
///
/// Each field kind is scanned up to its own stop set; the reader then
/// decides whether the stop byte is a legal terminator for the field.
pub struct LayoutReader<'a> {
    cursor: ByteCursor<'a>,
}

impl<'a> LayoutReader<'a> {
    pub fn at(stream: &'a [u8], start: usize) -> Self {
        Self {
            cursor: ByteCursor::starting_at(stream, start),
        }
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn peek(&self) -> Option<u8> {
        self.cursor.peek()
    }

    pub fn advance(&mut self, count: usize) {
        self.cursor.advance(count);
    }

    /// Read a view name and consume the marker that ends it
    /// (`ATTR_SEP` or `CHILD_OPEN`), which is returned.
    pub fn read_view_name(&mut self) -> Result<(String, u8), LayoutError> {
        let offset = self.position();
        let text = self.read_text(&layout::VIEW_NAME_STOPS, "view name")?;
        if text.is_empty() {
            return Err(LayoutError::EmptyViewName { offset });
        }
        let marker = self.expect_marker("view name")?;
        Ok((text, marker))
    }

    /// Read a `0x00`-terminated attribute field and consume the terminator.
    pub fn read_terminated(&mut self, context: &'static str) -> Result<String, LayoutError> {
        let text = self.read_text(&layout::TERMINATED_FIELD_STOPS, context)?;
        let offset = self.position();
        match self.cursor.next_byte() {
            Some(layout::FIELD_SEP) => Ok(text),
            Some(byte) => Err(LayoutError::UnexpectedByte {
                byte,
                offset,
                context,
            }),
            None => Err(ScanError::Truncated { offset, context }.into()),
        }
    }

    /// Read an attribute value. Values have no terminator of their own: they
    /// end at the marker that starts the next attribute or the child region.
    pub fn read_value(&mut self) -> Result<(String, u8), LayoutError> {
        let text = self.read_text(&layout::VALUE_STOPS, "attribute value")?;
        let marker = self.expect_marker("attribute value")?;
        Ok((text, marker))
    }

    fn read_text(&mut self, stops: &[u8], context: &'static str) -> Result<String, LayoutError> {
        let offset = self.position();
        let (bytes, stop) = self.cursor.take_until(stops);
        if stop.is_none() {
            return Err(ScanError::Truncated {
                offset: self.position(),
                context,
            }
            .into());
        }
        Ok(utf8_field(bytes, offset, context)?)
    }

    fn expect_marker(&mut self, context: &'static str) -> Result<u8, LayoutError> {
        let offset = self.position();
        match self.cursor.next_byte() {
            Some(byte @ (layout::ATTR_SEP | layout::CHILD_OPEN)) => Ok(byte),
            Some(byte) => Err(LayoutError::UnexpectedByte {
                byte,
                offset,
                context,
            }),
            None => Err(ScanError::Truncated { offset, context }.into()),
        }
    }
}
