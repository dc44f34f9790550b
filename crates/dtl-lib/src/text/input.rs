//! Line-buffered DTL input with one byte of push-back.

use std::io::BufRead;

use tracing::trace;

use crate::error::{ErrorKind, TextPosition};
use crate::options::Limits;

pub struct TextInput<R> {
    reader: R,
    line: Vec<u8>,
    cursor: usize,
    line_number: usize,
    bytes_read: u64,
    command_bytes: u64,
    peeked: Option<u8>,
}

impl<R: BufRead> TextInput<R> {
    pub fn new(reader: R, limits: &Limits) -> Self {
        Self {
            reader,
            line: Vec::with_capacity(limits.line_len),
            cursor: 0,
            line_number: 0,
            bytes_read: 0,
            command_bytes: 0,
            peeked: None,
        }
    }

    /// Next byte, or `None` at end of input.
    pub fn next_byte(&mut self) -> Result<Option<u8>, ErrorKind> {
        let ch = match self.peeked.take() {
            Some(ch) => ch,
            None => {
                if self.cursor >= self.line.len() && !self.fill_line()? {
                    return Ok(None);
                }
                let ch = self.line[self.cursor];
                self.cursor += 1;
                ch
            }
        };
        self.bytes_read += 1;
        self.command_bytes += 1;
        Ok(Some(ch))
    }

    /// Push back the byte just read; the next `next_byte` returns it again.
    pub fn unread(&mut self, ch: u8) {
        debug_assert!(self.peeked.is_none(), "push-back slot already full");
        self.peeked = Some(ch);
        self.bytes_read = self.bytes_read.saturating_sub(1);
        self.command_bytes = self.command_bytes.saturating_sub(1);
    }

    /// Reset the per-command byte counter.
    pub fn start_command(&mut self) {
        self.command_bytes = 0;
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn position(&self) -> TextPosition {
        let pending = usize::from(self.peeked.is_some());
        TextPosition {
            line_number: self.line_number,
            column: self.cursor.saturating_sub(pending),
            line: String::from_utf8_lossy(&self.line).into_owned(),
            bytes_read: self.bytes_read,
            command_bytes: self.command_bytes,
            ..TextPosition::default()
        }
    }

    fn fill_line(&mut self) -> Result<bool, ErrorKind> {
        // Keep the last line around for error positions at end of input.
        if self.reader.fill_buf().map_err(ErrorKind::Read)?.is_empty() {
            return Ok(false);
        }
        self.line.clear();
        self.cursor = 0;
        let n = self
            .reader
            .read_until(b'\n', &mut self.line)
            .map_err(ErrorKind::Read)?;
        if n == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        trace!(line = self.line_number, len = n, "read DTL line");
        Ok(true)
    }
}
