//! Byte-level stream wrappers shared by both transcoders.

use std::io::{self, Read, Write};

use dtl_dvi::codec;

use crate::error::ErrorKind;

/// DVI input with one byte of push-back and a running offset.
pub(crate) struct DviInput<R> {
    inner: R,
    peeked: Option<u8>,
    offset: u64,
}

impl<R: Read> DviInput<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            peeked: None,
            offset: 0,
        }
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn next_byte(&mut self) -> Result<Option<u8>, ErrorKind> {
        if let Some(b) = self.peeked.take() {
            self.offset += 1;
            return Ok(Some(b));
        }
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.offset += 1;
                    return Ok(Some(buf[0]));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ErrorKind::Read(e)),
            }
        }
    }

    pub fn unread(&mut self, b: u8) {
        debug_assert!(self.peeked.is_none(), "push-back slot already full");
        self.peeked = Some(b);
        self.offset -= 1;
    }

    pub fn unsigned(&mut self, n: usize) -> Result<u32, ErrorKind> {
        codec::read_unsigned(n, self).map_err(ErrorKind::reading)
    }

    pub fn signed(&mut self, n: usize) -> Result<i32, ErrorKind> {
        codec::read_signed(n, self).map_err(ErrorKind::reading)
    }

    /// Exactly `len` raw bytes.
    pub fn payload(&mut self, len: u64) -> Result<Vec<u8>, ErrorKind> {
        let mut buf = Vec::new();
        self.by_ref()
            .take(len)
            .read_to_end(&mut buf)
            .map_err(ErrorKind::Read)?;
        if (buf.len() as u64) < len {
            return Err(ErrorKind::Codec(codec::CodecError::UnexpectedEof {
                needed: len as usize,
                got: buf.len(),
            }));
        }
        Ok(buf)
    }
}

impl<R: Read> Read for DviInput<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if let Some(b) = self.peeked.take() {
            buf[0] = b;
            self.offset += 1;
            return Ok(1);
        }
        let n = self.inner.read(buf)?;
        self.offset += n as u64;
        Ok(n)
    }
}

/// Output stream that counts the bytes written through it.
pub(crate) struct Sink<W> {
    inner: W,
    written: u64,
}

impl<W: Write> Sink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn byte(&mut self, b: u8) -> Result<(), ErrorKind> {
        self.write_all(&[b])?;
        Ok(())
    }

    pub fn unsigned(&mut self, n: usize, value: u32) -> Result<(), ErrorKind> {
        codec::write_unsigned(n, value, self).map_err(ErrorKind::writing)
    }

    pub fn signed(&mut self, n: usize, value: i32) -> Result<(), ErrorKind> {
        codec::write_signed(n, value, self).map_err(ErrorKind::writing)
    }
}

impl<W: Write> Write for Sink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
