//! Binary DVI to DTL text.
//!
//! One DTL command per line, after the `variety` line. Consecutive printable
//! set-character opcodes are coalesced into one parenthesized run.

use std::io::{self, Read, Write};

use dtl_dvi::constants::{MIN_PADDING, PADDING, SET_CHAR_LAST};
use dtl_dvi::{CommandKind, OpcodeDescriptor, OpcodeTable};
use tracing::debug;

use crate::binary::{DviInput, Sink};
use crate::error::{DviPosition, Error, ErrorKind, Location};
use crate::options::{Options, Syntax, VARIETY, VARIETY_KEYWORD};
use crate::progress::Report;
use crate::text::{is_printable, write_message, write_sequence_char};

/// Converts DVI to DTL.
#[derive(Clone, Copy, Debug)]
pub struct DviToDtl<'t> {
    table: &'t OpcodeTable,
    options: Options,
}

impl DviToDtl<'static> {
    pub fn new(options: Options) -> Result<Self, Error> {
        Ok(Self::with_table(OpcodeTable::standard()?, options))
    }
}

impl<'t> DviToDtl<'t> {
    pub fn with_table(table: &'t OpcodeTable, options: Options) -> Self {
        Self { table, options }
    }

    /// Transcode all of `input`, writing DTL to `output`.
    pub fn run<R: Read, W: Write>(&self, input: R, output: W) -> Result<Report, Error> {
        Decoder {
            table: self.table,
            syntax: self.options.syntax,
            input: DviInput::new(input),
            out: Sink::new(output),
            commands: 0,
        }
        .run()
    }
}

struct Decoder<'t, R, W> {
    table: &'t OpcodeTable,
    syntax: Syntax,
    input: DviInput<R>,
    out: Sink<W>,
    commands: u64,
}

impl<'t, R: Read, W: Write> Decoder<'t, R, W> {
    fn run(mut self) -> Result<Report, Error> {
        self.variety()
            .map_err(|e| self.error(ErrorKind::Write(e), 0, None))?;

        loop {
            let start = self.input.offset();
            let Some(opcode) = self
                .input
                .next_byte()
                .map_err(|kind| self.error(kind, start, None))?
            else {
                break;
            };
            self.command(opcode)
                .map_err(|kind| self.error(kind, start, Some(opcode)))?;
            self.commands += 1;
        }

        debug!(
            bytes = self.input.offset(),
            commands = self.commands,
            "DVI input done"
        );
        Ok(Report {
            commands: self.commands,
            bytes_read: self.input.offset(),
            bytes_written: self.out.written(),
            lines: self.commands as usize + 1,
            ..Report::default()
        })
    }

    /// The variety line is never grouped.
    fn variety(&mut self) -> io::Result<()> {
        writeln!(self.out, "{VARIETY_KEYWORD} {VARIETY}")?;
        self.out.flush()
    }

    fn error(&self, kind: ErrorKind, offset: u64, opcode: Option<u8>) -> Error {
        Error::new(
            kind,
            Location::Dvi(DviPosition {
                offset,
                opcode,
                commands: self.commands,
            }),
        )
    }

    fn command(&mut self, opcode: u8) -> Result<(), ErrorKind> {
        let table = self.table;
        let desc = table.get(opcode);
        debug!(
            offset = self.input.offset() - 1,
            opcode,
            name = desc.name.as_str(),
            "command"
        );

        if self.syntax.grouped {
            self.out.byte(self.syntax.group_open)?;
        }
        match desc.kind {
            CommandKind::SetChar(ch) => self.set_chars(desc, ch)?,
            CommandKind::Fixed => self.fixed(desc)?,
            CommandKind::FontNum(_) | CommandKind::Undefined => {
                self.out.write_all(desc.name.as_bytes())?
            }
            CommandKind::Special(n) => self.special(desc, n)?,
            CommandKind::FontDef(n) => self.font_def(desc, n)?,
            CommandKind::Pre => self.preamble(desc)?,
            CommandKind::Post => self.postamble(desc)?,
            CommandKind::PostPost => self.post_postamble(desc)?,
        }
        if self.syntax.grouped {
            self.out.byte(self.syntax.group_close)?;
        }
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }

    /// A printable character starts a run; others get their `\XX` name.
    fn set_chars(&mut self, desc: &OpcodeDescriptor, first: u8) -> Result<(), ErrorKind> {
        if !is_printable(first) {
            self.out.write_all(desc.name.as_bytes())?;
            return Ok(());
        }

        self.out.byte(self.syntax.seq_open)?;
        write_sequence_char(&mut self.out, first, &self.syntax)?;
        while let Some(b) = self.input.next_byte()? {
            if b <= SET_CHAR_LAST && is_printable(b) {
                write_sequence_char(&mut self.out, b, &self.syntax)?;
            } else {
                self.input.unread(b);
                break;
            }
        }
        self.out.byte(self.syntax.seq_close)?;
        Ok(())
    }

    fn fixed(&mut self, desc: &OpcodeDescriptor) -> Result<(), ErrorKind> {
        self.out.write_all(desc.name.as_bytes())?;
        for arg in desc.args {
            if arg.signed {
                let v = self.input.signed(arg.byte_width())?;
                write!(self.out, " {v}")?;
            } else {
                let v = self.input.unsigned(arg.byte_width())?;
                write!(self.out, " {v}")?;
            }
        }
        Ok(())
    }

    fn special(&mut self, desc: &OpcodeDescriptor, n: u8) -> Result<(), ErrorKind> {
        let len = self.input.unsigned(n as usize)?;
        write!(self.out, "{} {len} ", desc.name)?;
        let bytes = self.input.payload(u64::from(len))?;
        write_message(&mut self.out, &bytes, &self.syntax)?;
        Ok(())
    }

    fn font_def(&mut self, desc: &OpcodeDescriptor, n: u8) -> Result<(), ErrorKind> {
        write!(self.out, "{}", desc.name)?;
        if n == 4 {
            let k = self.input.signed(4)?;
            write!(self.out, " {k}")?;
        } else {
            let k = self.input.unsigned(n as usize)?;
            write!(self.out, " {k}")?;
        }
        let checksum = self.input.unsigned(4)?;
        let scale = self.input.unsigned(4)?;
        let design = self.input.unsigned(4)?;
        let area_len = self.input.unsigned(1)?;
        let name_len = self.input.unsigned(1)?;
        write!(
            self.out,
            " {checksum:o} {scale} {design} {area_len} {name_len} "
        )?;
        let area = self.input.payload(u64::from(area_len))?;
        let name = self.input.payload(u64::from(name_len))?;
        write_message(&mut self.out, &area, &self.syntax)?;
        self.out.byte(b' ')?;
        write_message(&mut self.out, &name, &self.syntax)?;
        Ok(())
    }

    fn preamble(&mut self, desc: &OpcodeDescriptor) -> Result<(), ErrorKind> {
        let id = self.input.unsigned(1)?;
        let num = self.input.unsigned(4)?;
        let den = self.input.unsigned(4)?;
        let mag = self.input.unsigned(4)?;
        let len = self.input.unsigned(1)?;
        write!(self.out, "{} {id} {num} {den} {mag} {len} ", desc.name)?;
        let comment = self.input.payload(u64::from(len))?;
        write_message(&mut self.out, &comment, &self.syntax)?;
        Ok(())
    }

    fn postamble(&mut self, desc: &OpcodeDescriptor) -> Result<(), ErrorKind> {
        let last_bop = self.input.signed(4)?;
        write!(self.out, "{} {last_bop}", desc.name)?;
        for _ in 0..5 {
            let v = self.input.unsigned(4)?;
            write!(self.out, " {v}")?;
        }
        for _ in 0..2 {
            let v = self.input.unsigned(2)?;
            write!(self.out, " {v}")?;
        }
        Ok(())
    }

    fn post_postamble(&mut self, desc: &OpcodeDescriptor) -> Result<(), ErrorKind> {
        let post = self.input.signed(4)?;
        let id = self.input.unsigned(1)?;
        write!(self.out, "{} {post} {id}", desc.name)?;

        let mut found = 0;
        let tail = loop {
            match self.input.next_byte()? {
                Some(PADDING) => {
                    write!(self.out, " {PADDING}")?;
                    found += 1;
                }
                other => break other,
            }
        };
        if found < MIN_PADDING {
            return Err(ErrorKind::ShortPadding { found });
        }
        if let Some(b) = tail {
            return Err(ErrorKind::TrailingByte(b));
        }
        Ok(())
    }
}
