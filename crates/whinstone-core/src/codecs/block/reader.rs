use super::error::BlockCodeError;
use super::layout;
use crate::Rgb;
use crate::codecs::common::error::ScanError;
use crate::codecs::common::fields::utf8_field;
use crate::codecs::common::reader::ByteCursor;

pub struct BlockReader<'a> {
    cursor: ByteCursor<'a>,
}

impl<'a> BlockReader<'a> {
    pub fn new(stream: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(stream),
        }
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    pub fn at_marker(&self) -> bool {
        matches!(
            self.cursor.peek(),
            Some(layout::TEMPLATE_HEADER | layout::BLOCK_SEP)
        )
    }

    /// Consume the marker that starts the next record.
    pub fn read_marker(&mut self) -> Result<u8, BlockCodeError> {
        let offset = self.position();
        match self.cursor.next_byte() {
            Some(byte @ (layout::TEMPLATE_HEADER | layout::BLOCK_SEP)) => Ok(byte),
            Some(byte) => Err(BlockCodeError::UnexpectedByte {
                byte,
                offset,
                context: "record start",
            }),
            None => Err(ScanError::Truncated {
                offset,
                context: "record start",
            }
            .into()),
        }
    }

    /// Read a `0x00`-terminated field and consume the terminator. Running
    /// into a marker before the terminator means the field was cut short.
    pub fn read_terminated(&mut self, context: &'static str) -> Result<String, BlockCodeError> {
        let offset = self.position();
        let (bytes, stop) = self.cursor.take_until(&layout::FIELD_STOPS);
        let end = self.position();
        match stop {
            Some(layout::FIELD_SEP) => {
                self.cursor.advance(1);
                Ok(utf8_field(bytes, offset, context)?)
            }
            Some(byte) => Err(BlockCodeError::UnexpectedByte {
                byte,
                offset: end,
                context,
            }),
            None => Err(ScanError::Truncated {
                offset: end,
                context,
            }
            .into()),
        }
    }

    /// Read the three positional color bytes. Their values are never
    /// compared against the markers.
    pub fn read_color(&mut self) -> Result<Rgb, BlockCodeError> {
        let bytes: [u8; layout::COLOR_LEN] = self.cursor.take_raw("block color")?;
        Ok(Rgb::from_bytes(bytes))
    }

    /// Read one `0x00`-introduced parameter. The parameter runs to the next
    /// separator, marker or end of stream, which is left unread.
    pub fn read_parameter(&mut self) -> Result<String, BlockCodeError> {
        let offset = self.position();
        match self.cursor.next_byte() {
            Some(layout::FIELD_SEP) => {}
            Some(byte) => {
                return Err(BlockCodeError::UnexpectedByte {
                    byte,
                    offset,
                    context: "block parameter",
                });
            }
            None => {
                return Err(ScanError::Truncated {
                    offset,
                    context: "block parameter",
                }
                .into());
            }
        }
        let start = self.position();
        let (bytes, _) = self.cursor.take_until(&layout::FIELD_STOPS);
        Ok(utf8_field(bytes, start, "block parameter")?)
    }
}

#[cfg(test)]
mod tests {
    use super::BlockReader;
    use crate::Rgb;
    use crate::codecs::block::error::BlockCodeError;
    use crate::codecs::common::error::ScanError;

    #[test]
    fn color_accepts_marker_values() {
        let mut reader = BlockReader::new(&[0x11, 0x22, 0x00]);
        assert_eq!(reader.read_color().unwrap(), Rgb::new(0x11, 0x22, 0x00));
        assert!(reader.is_at_end());
    }

    #[test]
    fn color_too_short() {
        let mut reader = BlockReader::new(&[0xff, 0x00]);
        let err = reader.read_color().unwrap_err();
        assert_eq!(
            err,
            BlockCodeError::Scan(ScanError::Truncated {
                offset: 2,
                context: "block color"
            })
        );
    }

    #[test]
    fn terminated_field_stops_at_separator() {
        let mut reader = BlockReader::new(b"motion\x00\x22");
        assert_eq!(reader.read_terminated("collection name").unwrap(), "motion");
        assert!(reader.at_marker());
    }

    #[test]
    fn terminated_field_cut_by_marker() {
        let mut reader = BlockReader::new(b"mov\x22");
        let err = reader.read_terminated("opcode").unwrap_err();
        assert_eq!(
            err,
            BlockCodeError::UnexpectedByte {
                byte: 0x22,
                offset: 3,
                context: "opcode"
            }
        );
    }

    #[test]
    fn parameter_runs_to_next_separator() {
        let mut reader = BlockReader::new(b"\x00hi\x002");
        assert_eq!(reader.read_parameter().unwrap(), "hi");
        assert_eq!(reader.read_parameter().unwrap(), "2");
        assert!(reader.is_at_end());
    }

    #[test]
    fn parameter_requires_separator() {
        let mut reader = BlockReader::new(b"x");
        let err = reader.read_parameter().unwrap_err();
        assert!(matches!(
            err,
            BlockCodeError::UnexpectedByte { byte: b'x', offset: 0, .. }
        ));
    }

    #[test]
    fn marker_rejects_plain_bytes() {
        let mut reader = BlockReader::new(b"z");
        assert!(matches!(
            reader.read_marker(),
            Err(BlockCodeError::UnexpectedByte { byte: b'z', .. })
        ));
    }
}
