//! Run configuration: DTL delimiters and size limits.

/// First word of every DTL file.
pub const VARIETY_KEYWORD: &str = "variety";
/// The only DTL variety this crate reads and writes.
pub const VARIETY: &str = "sequences-6";

/// Delimiter characters of the DTL grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Syntax {
    /// Opens and closes a quoted string.
    pub string_delim: u8,
    /// Makes the next character literal.
    pub escape: u8,
    /// Escaped as data inside character sequences.
    pub quote: u8,
    pub seq_open: u8,
    pub seq_close: u8,
    pub group_open: u8,
    pub group_close: u8,
    /// Wrap every command in the group delimiters.
    pub grouped: bool,
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            string_delim: b'\'',
            escape: b'\\',
            quote: b'"',
            seq_open: b'(',
            seq_close: b')',
            group_open: b'{',
            group_close: b'}',
            grouped: false,
        }
    }
}

impl Syntax {
    /// Whether `ch` must be escaped inside a character sequence.
    pub fn escapes_in_sequence(&self, ch: u8) -> bool {
        ch == self.escape || ch == self.quote || ch == self.seq_open || ch == self.seq_close
    }
}

/// Size limits of the text reader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Longest accepted word token.
    pub token_len: usize,
    /// Initial capacity of the line buffer; longer lines grow it.
    pub line_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            token_len: 255,
            line_len: 1024,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub syntax: Syntax,
    pub limits: Limits,
}

impl Options {
    pub fn grouped(mut self, value: bool) -> Self {
        self.syntax.grouped = value;
        self
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}
