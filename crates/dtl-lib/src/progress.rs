//! Per-run state and the final report.

use std::fmt;

use dtl_dvi::constants::NO_ADDRESS;

use crate::diagnostics::Diagnostics;

/// Mutable state of one text-to-binary pass.
#[derive(Debug)]
pub(crate) struct Progress {
    pub commands: u64,
    /// Output offset of the last `bop`.
    pub last_bop: i32,
    /// Output offset of the `post`.
    pub postamble: i32,
    pub diagnostics: Diagnostics,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            commands: 0,
            last_bop: NO_ADDRESS,
            postamble: NO_ADDRESS,
            diagnostics: Diagnostics::new(),
        }
    }
}

/// Outcome of a successful run.
#[derive(Clone, Debug, Default)]
pub struct Report {
    /// DTL commands transcoded; a set-character run counts once.
    pub commands: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    /// DTL lines read or written.
    pub lines: usize,
    pub diagnostics: Diagnostics,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bytes read, {} bytes written, {} DTL lines, {} commands, {} warnings",
            self.bytes_read,
            self.bytes_written,
            self.lines,
            self.commands,
            self.diagnostics.len()
        )
    }
}
