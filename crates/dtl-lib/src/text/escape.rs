//! Escaping for the DTL writer.

use std::io::{self, Write};

use crate::options::Syntax;

/// One character of a set-character run.
pub fn write_sequence_char<W: Write>(out: &mut W, ch: u8, syntax: &Syntax) -> io::Result<()> {
    if syntax.escapes_in_sequence(ch) {
        out.write_all(&[syntax.escape, ch])
    } else {
        out.write_all(&[ch])
    }
}

/// A quoted string; bytes other than the escape and the string delimiter are
/// written unchanged.
pub fn write_message<W: Write>(out: &mut W, bytes: &[u8], syntax: &Syntax) -> io::Result<()> {
    out.write_all(&[syntax.string_delim])?;
    for &ch in bytes {
        if ch == syntax.escape || ch == syntax.string_delim {
            out.write_all(&[syntax.escape])?;
        }
        out.write_all(&[ch])?;
    }
    out.write_all(&[syntax.string_delim])
}
