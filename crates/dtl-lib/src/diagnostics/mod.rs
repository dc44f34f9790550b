//! Recoverable warnings and the fatal error printer.
//!
//! A warning records a value in the DTL input that disagrees with the value
//! computed from the data; the computed value is written and the run
//! continues. Warnings are kept in [`Diagnostics`] and logged as they happen.

mod printer;


use std::fmt;

use tracing::warn;

pub use printer::ErrorPrinter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// Declared length of a special or comment string.
    StringLength,
    FontAreaLength,
    FontNameLength,
    /// Previous-page pointer in `bop`.
    BopAddress,
    /// Last-page pointer in `post`.
    LastBopAddress,
    /// Postamble pointer in `post_post`.
    PostambleAddress,
    /// Fewer than four `223` tokens.
    PaddingCount,
    /// `223` tokens that would leave the file length unaligned.
    PaddingAlignment,
}

impl WarningKind {
    pub fn message(&self) -> &'static str {
        match self {
            Self::StringLength => "string length in DTL file is wrong",
            Self::FontAreaLength => "font area length in DTL file is wrong",
            Self::FontNameLength => "font name length in DTL file is wrong",
            Self::BopAddress => "previous bop address in DTL file is wrong",
            Self::LastBopAddress => "last bop address in DTL postamble is wrong",
            Self::PostambleAddress => "postamble address in DTL file is wrong",
            Self::PaddingCount => "fewer than four `223` padding bytes in DTL file",
            Self::PaddingAlignment => "`223` padding in DTL file leaves DVI length unaligned",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    /// Value found in the DTL input.
    pub declared: i64,
    /// Value written to the DVI output.
    pub actual: i64,
    /// DTL line the value was read on.
    pub line: usize,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {}: found {}, writing {}",
            self.line, self.kind, self.declared, self.actual
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

#[must_use = "warning not emitted, call .emit()"]
pub struct WarningBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    warning: Warning,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a warning of the given kind at a DTL line.
    pub fn report(&mut self, kind: WarningKind, line: usize) -> WarningBuilder<'_> {
        WarningBuilder {
            diagnostics: self,
            warning: Warning {
                kind,
                declared: 0,
                actual: 0,
                line,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.warnings.iter()
    }

    pub fn count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }

    pub fn has(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Warning;
    type IntoIter = std::slice::Iter<'a, Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.warnings.iter()
    }
}

impl WarningBuilder<'_> {
    pub fn declared(mut self, value: impl Into<i64>) -> Self {
        self.warning.declared = value.into();
        self
    }

    pub fn actual(mut self, value: impl Into<i64>) -> Self {
        self.warning.actual = value.into();
        self
    }

    pub fn emit(self) {
        let w = &self.warning;
        warn!(
            line = w.line,
            declared = w.declared,
            actual = w.actual,
            "{}",
            w.kind
        );
        self.diagnostics.warnings.push(self.warning);
    }
}
