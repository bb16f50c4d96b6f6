use super::error::BlockCodeError;
use super::layout;
use super::reader::BlockReader;
use crate::codecs::common::error::ScanError;
use crate::{Block, BlockProgram, Rgb};

/// Parser mode. `Block` carries the record being accumulated.
#[derive(Debug)]
enum ParseMode {
    /// Between records; the next byte must be a marker.
    Idle,
    Header,
    Color,
    Block(PendingBlock),
}

#[derive(Debug)]
struct PendingBlock {
    color: Rgb,
    opcode: Option<String>,
    parameters: Vec<String>,
}

impl PendingBlock {
    fn new(color: Rgb) -> Self {
        Self {
            color,
            opcode: None,
            parameters: Vec::new(),
        }
    }

    fn finish(self, offset: usize) -> Result<Block, BlockCodeError> {
        let opcode = self.opcode.ok_or(ScanError::Truncated {
            offset,
            context: "opcode",
        })?;
        Ok(Block {
            opcode,
            color: self.color,
            parameters: self.parameters,
        })
    }
}

/// Decode a block program stream.
///
/// # Examples
/// ```
/// use whinstone_core::decode_code;
///
/// let program = decode_code(b"\x11motion\x00\x22\xff\x00\x00move\x00\x0010")?;
/// assert_eq!(program.collection_name, "motion");
/// assert_eq!(program.blocks[0].parameters, vec!["10".to_string()]);
/// # Ok::<(), whinstone_core::BlockCodeError>(())
/// ```
pub fn decode_code(stream: &[u8]) -> Result<BlockProgram, BlockCodeError> {
    let mut reader = BlockReader::new(stream);
    let mut mode = ParseMode::Idle;
    let mut collection_name: Option<String> = None;
    let mut blocks = Vec::new();

    while !reader.is_at_end() {
        mode = match mode {
            ParseMode::Idle => {
                let offset = reader.position();
                match reader.read_marker()? {
                    layout::TEMPLATE_HEADER => ParseMode::Header,
                    _ if collection_name.is_none() => {
                        return Err(BlockCodeError::MissingHeader { offset });
                    }
                    _ => ParseMode::Color,
                }
            }
            ParseMode::Header => {
                let name = reader.read_terminated("collection name")?;
                if let Some(previous) = collection_name.replace(name) {
                    tracing::warn!(%previous, "repeated template header replaces collection name");
                }
                ParseMode::Idle
            }
            ParseMode::Color => ParseMode::Block(PendingBlock::new(reader.read_color()?)),
            ParseMode::Block(mut block) => {
                if block.opcode.is_none() {
                    let offset = reader.position();
                    let opcode = reader.read_terminated("opcode")?;
                    if opcode.is_empty() {
                        return Err(BlockCodeError::EmptyOpcode { offset });
                    }
                    block.opcode = Some(opcode);
                    ParseMode::Block(block)
                } else if reader.at_marker() {
                    blocks.push(block.finish(reader.position())?);
                    ParseMode::Idle
                } else {
                    block.parameters.push(reader.read_parameter()?);
                    ParseMode::Block(block)
                }
            }
        };
    }

    // The last block has no following marker to finalize it.
    let end = reader.position();
    match mode {
        ParseMode::Block(block) => blocks.push(block.finish(end)?),
        ParseMode::Header => {
            return Err(ScanError::Truncated {
                offset: end,
                context: "collection name",
            }
            .into());
        }
        ParseMode::Color => {
            return Err(ScanError::Truncated {
                offset: end,
                context: "block color",
            }
            .into());
        }
        ParseMode::Idle => {}
    }

    let collection_name = collection_name.ok_or(BlockCodeError::MissingHeader { offset: 0 })?;
    tracing::debug!(
        bytes = stream.len(),
        blocks = blocks.len(),
        collection = %collection_name,
        "decoded block program"
    );
    Ok(BlockProgram {
        collection_name,
        blocks,
    })
}

#[cfg(test)]
mod tests {
    use super::decode_code;
    use crate::codecs::block::error::BlockCodeError;
    use crate::codecs::common::error::ScanError;
    use crate::{Block, BlockProgram, Rgb};

    #[test]
    fn last_block_is_flushed() {
        let stream = b"\x11motion\x00\x22\xff\x00\x00move\x00\x0010\x22\x00\xff\x00say\x00\x00hi\x002";
        let program = decode_code(stream).unwrap();
        assert_eq!(
            program,
            BlockProgram {
                collection_name: "motion".to_string(),
                blocks: vec![
                    Block::new("move", Rgb::new(255, 0, 0)).with_parameter("10"),
                    Block::new("say", Rgb::new(0, 255, 0))
                        .with_parameter("hi")
                        .with_parameter("2"),
                ],
            }
        );
    }

    #[test]
    fn zero_parameters_decode_to_empty_list() {
        let program = decode_code(b"\x11c\x00\x22\x01\x02\x03stop\x00").unwrap();
        assert_eq!(program.blocks.len(), 1);
        assert!(program.blocks[0].parameters.is_empty());
    }

    #[test]
    fn empty_parameter_is_kept() {
        let program = decode_code(b"\x11c\x00\x22\x01\x02\x03log\x00\x00").unwrap();
        assert_eq!(program.blocks[0].parameters, vec![String::new()]);
    }

    #[test]
    fn color_bytes_equal_to_markers() {
        let stream = b"\x11c\x00\x22\x11\x22\x00noop\x00\x22\x22\x11\x11end\x00";
        let program = decode_code(stream).unwrap();
        assert_eq!(program.blocks[0].color, Rgb::new(0x11, 0x22, 0x00));
        assert_eq!(program.blocks[0].opcode, "noop");
        assert_eq!(program.blocks[1].color, Rgb::new(0x22, 0x11, 0x11));
        assert_eq!(program.blocks[1].opcode, "end");
    }

    #[test]
    fn header_only_program() {
        let program = decode_code(b"\x11blocks-view\x00").unwrap();
        assert_eq!(program.collection_name, "blocks-view");
        assert!(program.blocks.is_empty());
    }

    #[test]
    fn empty_stream_has_no_header() {
        let err = decode_code(b"").unwrap_err();
        assert_eq!(err, BlockCodeError::MissingHeader { offset: 0 });
    }

    #[test]
    fn block_before_header_is_rejected() {
        let err = decode_code(b"\x22\x00\x00\x00op\x00").unwrap_err();
        assert_eq!(err, BlockCodeError::MissingHeader { offset: 0 });
    }

    #[test]
    fn truncated_color() {
        let err = decode_code(b"\x11c\x00\x22\x01").unwrap_err();
        assert_eq!(
            err,
            BlockCodeError::Scan(ScanError::Truncated {
                offset: 5,
                context: "block color"
            })
        );
        assert!(err.is_malformed_stream());
    }

    #[test]
    fn unterminated_opcode() {
        let err = decode_code(b"\x11c\x00\x22\x01\x02\x03mov").unwrap_err();
        assert_eq!(
            err,
            BlockCodeError::Scan(ScanError::Truncated {
                offset: 10,
                context: "opcode"
            })
        );
    }

    #[test]
    fn missing_opcode_after_color() {
        let err = decode_code(b"\x11c\x00\x22\x01\x02\x03").unwrap_err();
        assert_eq!(
            err,
            BlockCodeError::Scan(ScanError::Truncated {
                offset: 7,
                context: "opcode"
            })
        );
    }

    #[test]
    fn unterminated_header() {
        let err = decode_code(b"\x11motion").unwrap_err();
        assert!(matches!(
            err,
            BlockCodeError::Scan(ScanError::Truncated {
                context: "collection name",
                ..
            })
        ));
    }

    #[test]
    fn repeated_header_replaces_collection_name() {
        let program = decode_code(b"\x11a\x00\x22\x00\x00\x00x\x00\x11b\x00").unwrap();
        assert_eq!(program.collection_name, "b");
        assert_eq!(program.blocks.len(), 1);
    }

    #[test]
    fn garbage_between_records() {
        let err = decode_code(b"\x11c\x00junk").unwrap_err();
        assert!(matches!(
            err,
            BlockCodeError::UnexpectedByte { byte: b'j', offset: 3, .. }
        ));
    }
}
