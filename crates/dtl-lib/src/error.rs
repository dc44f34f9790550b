//! Fatal conversion errors.
//!
//! Every error carries the [`Location`] where the run stopped: a DTL line and
//! column with the running counters, or a DVI byte offset.

use std::io;

use dtl_dvi::{CodecError, TableError};

/// A fatal error and where it happened.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    pub location: Location,
}

impl Error {
    pub fn new(kind: ErrorKind, location: Location) -> Self {
        Self { kind, location }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}

impl From<TableError> for Error {
    fn from(err: TableError) -> Self {
        Self::new(ErrorKind::Table(err), Location::Unknown)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("DTL signature must begin with `variety`, not `{found}`")]
    MissingVarietyKeyword { found: String },

    #[error("DTL variety must be `{expected}`, not `{found}`")]
    WrongVariety {
        expected: &'static str,
        found: String,
    },

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("expected `{expected}` to open a command, found `{found}`")]
    MissingGroupOpen { expected: char, found: String },

    #[error("expected `{expected}` to close the command, found `{found}`")]
    MissingGroupClose { expected: char, found: String },

    #[error("premature end of input: expected {0}")]
    UnexpectedEnd(String),

    #[error("expected {what}, found `{found}`")]
    ExpectedNumber { what: &'static str, found: String },

    #[error("expected quoted {what}, found `{found}`")]
    ExpectedString { what: &'static str, found: String },

    #[error("character {0:#04x} is neither printable nor white space")]
    InvalidCharacter(u8),

    #[error("word longer than {limit} characters")]
    TokenTooLong { limit: usize },

    #[error("string of {len} bytes does not fit a {width}-byte length field")]
    LengthOverflow { len: usize, width: usize },

    #[error("bad post_post: {found} padding bytes `223`, at least 4 required")]
    ShortPadding { found: usize },

    #[error("bad post_post: byte {0} after the padding is not `223`")]
    TrailingByte(u8),

    #[error(transparent)]
    Codec(CodecError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("cannot read input: {0}")]
    Read(io::Error),

    #[error("cannot write output: {0}")]
    Write(#[from] io::Error),
}

impl ErrorKind {
    /// Classify a codec failure while reading.
    pub(crate) fn reading(err: CodecError) -> Self {
        match err {
            CodecError::Io(e) => Self::Read(e),
            other => Self::Codec(other),
        }
    }

    /// Classify a codec failure while writing.
    pub(crate) fn writing(err: CodecError) -> Self {
        match err {
            CodecError::Io(e) => Self::Write(e),
            other => Self::Codec(other),
        }
    }
}

/// Where a fatal error happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// In the DVI input of a binary-to-text run.
    Dvi(DviPosition),
    /// In the DTL input of a text-to-binary run.
    Dtl(TextPosition),
    /// Before any input was read.
    Unknown,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DviPosition {
    /// Byte offset of the failing command's opcode.
    pub offset: u64,
    /// Opcode being decoded, if one was read.
    pub opcode: Option<u8>,
    /// Commands completed before the failure.
    pub commands: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextPosition {
    /// 1-based number of the current line; 0 before the first line.
    pub line_number: usize,
    /// Byte offset of the read cursor within the line.
    pub column: usize,
    /// Current line, lossily decoded, including any line terminator.
    pub line: String,
    pub bytes_read: u64,
    /// Bytes read since the current command began.
    pub command_bytes: u64,
    pub dvi_written: u64,
    pub commands: u64,
}
