//! Builder-pattern printer for fatal errors.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use crate::error::{Error, Location};

/// Renders an [`Error`] with the offending DTL line when there is one.
pub struct ErrorPrinter<'e, 'p> {
    error: &'e Error,
    path: Option<&'p str>,
    colored: bool,
}

impl<'e, 'p> ErrorPrinter<'e, 'p> {
    pub fn new(error: &'e Error) -> Self {
        Self {
            error,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: &'p str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };
        let message = self.error.kind.to_string();

        let report: Vec<Group> = match &self.error.location {
            Location::Dtl(pos) if !pos.line.is_empty() => {
                let source = pos.line.trim_end_matches(['\n', '\r']);
                let start = pos.column.saturating_sub(1).min(source.len());
                let end = (start + 1).min(source.len());
                let mut snippet = Snippet::source(source)
                    .line_start(pos.line_number)
                    .annotation(AnnotationKind::Primary.span(start..end));
                if let Some(p) = self.path {
                    snippet = snippet.path(p);
                }
                let note = format!(
                    "{} DTL bytes read ({} in this command), {} DVI bytes written, {} commands done",
                    pos.bytes_read, pos.command_bytes, pos.dvi_written, pos.commands
                );
                vec![
                    Level::ERROR
                        .primary_title(message.as_str())
                        .element(snippet)
                        .element(Level::NOTE.message(note)),
                ]
            }
            Location::Dtl(pos) => {
                let note = format!(
                    "at DTL line {}, {} DVI bytes written",
                    pos.line_number, pos.dvi_written
                );
                vec![
                    Level::ERROR
                        .primary_title(message.as_str())
                        .element(Level::NOTE.message(note)),
                ]
            }
            Location::Dvi(pos) => {
                let mut note = format!("at DVI byte {}", pos.offset);
                if let Some(opcode) = pos.opcode {
                    write!(note, " (opcode {opcode})")?;
                }
                write!(note, ", {} commands done", pos.commands)?;
                if let Some(p) = self.path {
                    note = format!("{p}: {note}");
                }
                vec![
                    Level::ERROR
                        .primary_title(message.as_str())
                        .element(Level::NOTE.message(note)),
                ]
            }
            Location::Unknown => vec![Group::with_title(
                Level::ERROR.primary_title(message.as_str()),
            )],
        };

        write!(w, "{}", renderer.render(&report))
    }
}

impl Error {
    pub fn printer(&self) -> ErrorPrinter<'_, '_> {
        ErrorPrinter::new(self)
    }
}
