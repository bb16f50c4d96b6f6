use super::error::ScanError;

/// Forward-only cursor over an encoded stream.
///
/// Parsers never index the buffer directly; they either scan up to a stop
/// byte or take a fixed number of raw bytes, and the cursor tracks the
/// absolute offset for error reporting.
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Cursor over the whole stream, positioned at `pos`, so offsets stay
    /// absolute when a nested record is decoded in place.
    pub fn starting_at(bytes: &'a [u8], pos: usize) -> Self {
        Self {
            bytes,
            pos: pos.min(bytes.len()),
        }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Unread tail of the stream.
    pub fn remaining(&self) -> &'a [u8] {
        self.bytes.get(self.pos..).unwrap_or(&[])
    }

    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Skip `count` bytes. Callers only advance over bytes they have
    /// already inspected or that a nested decode reported as consumed.
    pub fn advance(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.bytes.len());
    }

    /// Scan forward until one of `stops` is found.
    ///
    /// Returns the scanned bytes and the stop byte, which is left unread.
    /// The stop is `None` when the stream ended first.
    pub fn take_until(&mut self, stops: &[u8]) -> (&'a [u8], Option<u8>) {
        let rest = self.remaining();
        let len = rest
            .iter()
            .position(|b| stops.contains(b))
            .unwrap_or(rest.len());
        self.pos += len;
        (&rest[..len], self.peek())
    }

    /// Take exactly `N` bytes without interpreting them.
    ///
    /// Used for positional fields whose values may collide with marker
    /// bytes; nothing here compares against any reserved value.
    pub fn take_raw<const N: usize>(
        &mut self,
        context: &'static str,
    ) -> Result<[u8; N], ScanError> {
        let chunk = self
            .remaining()
            .get(..N)
            .ok_or(ScanError::Truncated {
                offset: self.bytes.len(),
                context,
            })?;
        let mut out = [0u8; N];
        out.copy_from_slice(chunk);
        self.pos += N;
        Ok(out)
    }
}
