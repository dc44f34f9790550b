//! Big-endian integer fields.
//!
//! DVI stores every number most significant byte first, in fields of 1 to 4
//! bytes. Signed fields are two's complement, the sign taken from the first
//! byte. Nothing is range-checked: reads accumulate with wrapping arithmetic
//! and writes keep the low `n` bytes of the value.

use std::io::{self, Read, Write};

/// Widest integer field in the format.
pub const MAX_WIDTH: usize = 4;

/// Errors from reading or writing an integer field.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("field width {0} is out of range (must be 1 to 4)")]
    InvalidWidth(usize),
    #[error("unexpected end of input: got {got} of {needed} bytes")]
    UnexpectedEof { needed: usize, got: usize },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

fn check_width(n: usize) -> Result<(), CodecError> {
    if (1..=MAX_WIDTH).contains(&n) {
        Ok(())
    } else {
        Err(CodecError::InvalidWidth(n))
    }
}

fn read_byte<R: Read>(r: &mut R, needed: usize, got: usize) -> Result<u8, CodecError> {
    let mut buf = [0u8; 1];
    loop {
        match r.read(&mut buf) {
            Ok(0) => return Err(CodecError::UnexpectedEof { needed, got }),
            Ok(_) => return Ok(buf[0]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Largest value an unsigned field of `n` bytes can hold.
pub fn max_unsigned(n: usize) -> Result<u32, CodecError> {
    check_width(n)?;
    Ok(u32::MAX >> (8 * (MAX_WIDTH - n)))
}

/// Read an `n`-byte unsigned big-endian field.
pub fn read_unsigned<R: Read>(n: usize, r: &mut R) -> Result<u32, CodecError> {
    check_width(n)?;
    let mut value: u32 = 0;
    for got in 0..n {
        let byte = read_byte(r, n, got)?;
        value = value.wrapping_mul(256).wrapping_add(u32::from(byte));
    }
    Ok(value)
}

/// Read an `n`-byte signed big-endian field.
pub fn read_signed<R: Read>(n: usize, r: &mut R) -> Result<i32, CodecError> {
    check_width(n)?;
    let mut value: i32 = 0;
    for got in 0..n {
        let byte = read_byte(r, n, got)?;
        let digit = if got == 0 && byte >= 128 {
            i32::from(byte) - 256
        } else {
            i32::from(byte)
        };
        value = value.wrapping_mul(256).wrapping_add(digit);
    }
    Ok(value)
}

/// Write the low `n` bytes of `value`, most significant first.
pub fn write_unsigned<W: Write>(n: usize, value: u32, w: &mut W) -> Result<(), CodecError> {
    check_width(n)?;
    let bytes = value.to_be_bytes();
    w.write_all(&bytes[MAX_WIDTH - n..])?;
    Ok(())
}

/// Write the low `n` bytes of the two's complement of `value`.
pub fn write_signed<W: Write>(n: usize, value: i32, w: &mut W) -> Result<(), CodecError> {
    write_unsigned(n, value as u32, w)
}
