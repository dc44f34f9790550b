//! DTL text to binary DVI.
//!
//! Commands are resolved by mnemonic and their arguments encoded per the
//! opcode table. Derived fields are recomputed from the bytes already
//! written: page and postamble back-pointers, string lengths, and the
//! trailing padding. Disagreeing input values become warnings.

use std::io::{BufRead, Write};

use dtl_dvi::constants::{BOP, FILE_ALIGN, MIN_PADDING, PADDING, SET_CHAR_LAST, SET1};
use dtl_dvi::{ArgSpec, CommandKind, OpcodeDescriptor, OpcodeTable, max_unsigned};
use tracing::{debug, info};

use crate::binary::Sink;
use crate::diagnostics::WarningKind;
use crate::error::{Error, ErrorKind, Location, TextPosition};
use crate::options::{Options, Syntax, VARIETY, VARIETY_KEYWORD};
use crate::progress::{Progress, Report};
use crate::text::{Token, Tokenizer, parse_octal, parse_signed, parse_unsigned};

/// `i num den mag` of `pre`; the comment follows.
const PRE_ARGS: [ArgSpec; 4] = [
    ArgSpec::unsigned(1),
    ArgSpec::unsigned(4),
    ArgSpec::unsigned(4),
    ArgSpec::unsigned(4),
];

/// `num den mag l u s t` of `post`, after the back-pointer.
const POST_ARGS: [ArgSpec; 7] = [
    ArgSpec::unsigned(4),
    ArgSpec::unsigned(4),
    ArgSpec::unsigned(4),
    ArgSpec::unsigned(4),
    ArgSpec::unsigned(4),
    ArgSpec::unsigned(2),
    ArgSpec::unsigned(2),
];

/// Converts DTL to DVI.
#[derive(Clone, Copy, Debug)]
pub struct DtlToDvi<'t> {
    table: &'t OpcodeTable,
    options: Options,
}

impl DtlToDvi<'static> {
    pub fn new(options: Options) -> Result<Self, Error> {
        Ok(Self::with_table(OpcodeTable::standard()?, options))
    }
}

impl<'t> DtlToDvi<'t> {
    pub fn with_table(table: &'t OpcodeTable, options: Options) -> Self {
        Self { table, options }
    }

    /// Transcode all of `input`, writing DVI to `output`.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<Report, Error> {
        Encoder {
            table: self.table,
            syntax: self.options.syntax,
            tokens: Tokenizer::new(input, &self.options),
            out: Sink::new(output),
            progress: Progress::default(),
        }
        .run()
    }
}

struct Encoder<'t, R, W> {
    table: &'t OpcodeTable,
    syntax: Syntax,
    tokens: Tokenizer<R>,
    out: Sink<W>,
    progress: Progress,
}

impl<'t, R: BufRead, W: Write> Encoder<'t, R, W> {
    fn run(mut self) -> Result<Report, Error> {
        self.variety().map_err(|kind| self.error(kind))?;

        loop {
            self.tokens.input_mut().start_command();
            match self.command() {
                Ok(true) => self.progress.commands += 1,
                Ok(false) => break,
                Err(kind) => return Err(self.error(kind)),
            }
        }
        self.out
            .flush()
            .map_err(|e| self.error(ErrorKind::Write(e)))?;

        let input = self.tokens.input();
        debug!(
            lines = input.line_number(),
            bytes = input.bytes_read(),
            "DTL input done"
        );
        Ok(Report {
            commands: self.progress.commands,
            bytes_read: input.bytes_read(),
            bytes_written: self.out.written(),
            lines: input.line_number(),
            diagnostics: self.progress.diagnostics,
        })
    }

    fn error(&self, kind: ErrorKind) -> Error {
        let position = TextPosition {
            dvi_written: self.out.written(),
            commands: self.progress.commands,
            ..self.tokens.input().position()
        };
        Error::new(kind, Location::Dtl(position))
    }

    fn render(&self, token: &Token) -> String {
        token.render(&self.syntax)
    }

    fn variety(&mut self) -> Result<(), ErrorKind> {
        match self.tokens.next_token()? {
            Token::Word(w) if w == VARIETY_KEYWORD.as_bytes() => {}
            other => {
                return Err(ErrorKind::MissingVarietyKeyword {
                    found: self.render(&other),
                });
            }
        }
        match self.tokens.next_token()? {
            Token::Word(w) if w == VARIETY.as_bytes() => {}
            other => {
                return Err(ErrorKind::WrongVariety {
                    expected: VARIETY,
                    found: self.render(&other),
                });
            }
        }
        info!("DTL variety {VARIETY} is OK");
        Ok(())
    }

    /// One command, group delimiters included. `false` at end of input.
    fn command(&mut self) -> Result<bool, ErrorKind> {
        let grouped = self.syntax.grouped;
        if grouped {
            match self.tokens.next_token()? {
                Token::End => return Ok(false),
                Token::GroupOpen => {}
                other => {
                    return Err(ErrorKind::MissingGroupOpen {
                        expected: char::from(self.syntax.group_open),
                        found: self.render(&other),
                    });
                }
            }
        }

        match self.tokens.next_token()? {
            Token::End if grouped => {
                return Err(ErrorKind::UnexpectedEnd("command name".to_string()));
            }
            Token::End => return Ok(false),
            Token::SeqOpen => self.set_sequence()?,
            Token::Word(word) => self.named(&word)?,
            other => return Err(ErrorKind::UnknownCommand(self.render(&other))),
        }

        if grouped {
            match self.tokens.next_token()? {
                Token::GroupClose => {}
                Token::End => {
                    return Err(ErrorKind::UnexpectedEnd(format!(
                        "`{}` closing the command",
                        char::from(self.syntax.group_close)
                    )));
                }
                other => {
                    return Err(ErrorKind::MissingGroupClose {
                        expected: char::from(self.syntax.group_close),
                        found: self.render(&other),
                    });
                }
            }
        }
        self.out.flush()?;
        Ok(true)
    }

    /// Characters up to the closing delimiter, one set command each.
    fn set_sequence(&mut self) -> Result<(), ErrorKind> {
        let syntax = self.syntax;
        let mut escaped = false;
        loop {
            let Some(ch) = self.tokens.input_mut().next_byte()? else {
                return Err(ErrorKind::UnexpectedEnd(format!(
                    "`{}` closing the character sequence",
                    char::from(syntax.seq_close)
                )));
            };
            if !escaped && ch == syntax.escape {
                escaped = true;
                continue;
            }
            if !escaped && ch == syntax.seq_close {
                return Ok(());
            }
            escaped = false;
            if ch <= SET_CHAR_LAST {
                self.out.byte(ch)?;
            } else {
                self.out.byte(SET1)?;
                self.out.unsigned(1, u32::from(ch))?;
            }
        }
    }

    fn named(&mut self, word: &[u8]) -> Result<(), ErrorKind> {
        let table = self.table;
        let opcode = std::str::from_utf8(word)
            .ok()
            .and_then(|name| table.lookup(name))
            .ok_or_else(|| ErrorKind::UnknownCommand(String::from_utf8_lossy(word).into_owned()))?;
        let desc = table.get(opcode);
        debug!(
            offset = self.out.written(),
            opcode,
            name = desc.name.as_str(),
            "command"
        );

        self.out.byte(opcode)?;
        match desc.kind {
            CommandKind::SetChar(_) | CommandKind::FontNum(_) | CommandKind::Undefined => {}
            CommandKind::Fixed if opcode == BOP => self.bop(desc)?,
            CommandKind::Fixed => self.numbers(desc.args)?,
            CommandKind::Special(n) => self.length_string(n, WarningKind::StringLength)?,
            CommandKind::FontDef(n) => self.font_def(n)?,
            CommandKind::Pre => {
                self.numbers(&PRE_ARGS)?;
                self.length_string(1, WarningKind::StringLength)?;
            }
            CommandKind::Post => self.postamble()?,
            CommandKind::PostPost => self.post_postamble()?,
        }
        Ok(())
    }

    fn numbers(&mut self, args: &[ArgSpec]) -> Result<(), ErrorKind> {
        for arg in args {
            if arg.signed {
                let v = self.signed_arg("signed number")?;
                self.out.signed(arg.byte_width(), v)?;
            } else {
                let v = self.unsigned_arg("unsigned number")?;
                self.out.unsigned(arg.byte_width(), v)?;
            }
        }
        Ok(())
    }

    fn bop(&mut self, desc: &OpcodeDescriptor) -> Result<(), ErrorKind> {
        let this_bop = self.out.written() as i32 - 1;
        let (counts, _pointer) = desc.args.split_at(desc.args.len() - 1);
        self.numbers(counts)?;
        self.back_pointer(WarningKind::BopAddress, self.progress.last_bop)?;
        self.progress.last_bop = this_bop;
        Ok(())
    }

    fn postamble(&mut self) -> Result<(), ErrorKind> {
        self.progress.postamble = self.out.written() as i32 - 1;
        self.back_pointer(WarningKind::LastBopAddress, self.progress.last_bop)?;
        self.numbers(&POST_ARGS)
    }

    fn post_postamble(&mut self) -> Result<(), ErrorKind> {
        self.back_pointer(WarningKind::PostambleAddress, self.progress.postamble)?;
        let id = self.unsigned_arg("DVI id")?;
        self.out.unsigned(1, id)?;

        let mut found = 0usize;
        loop {
            match self.tokens.next_token()? {
                Token::Word(w) if w == b"223" => found += 1,
                other => {
                    self.tokens.push_back(other);
                    break;
                }
            }
        }

        let line = self.tokens.input().line_number();
        let written = self.out.written();
        let mut padding = 0u64;
        while padding < MIN_PADDING as u64 || (written + padding) % FILE_ALIGN != 0 {
            padding += 1;
        }
        if found < MIN_PADDING {
            self.progress
                .diagnostics
                .report(WarningKind::PaddingCount, line)
                .declared(found as i64)
                .actual(padding as i64)
                .emit();
        }
        if (written + found as u64) % FILE_ALIGN != 0 {
            self.progress
                .diagnostics
                .report(WarningKind::PaddingAlignment, line)
                .declared(found as i64)
                .actual(padding as i64)
                .emit();
        }
        for _ in 0..padding {
            self.out.byte(PADDING)?;
        }
        Ok(())
    }

    /// Read a pointer and write the tracked value instead.
    fn back_pointer(&mut self, kind: WarningKind, expected: i32) -> Result<(), ErrorKind> {
        let declared = self.signed_arg("address")?;
        if declared != expected {
            let line = self.tokens.input().line_number();
            self.progress
                .diagnostics
                .report(kind, line)
                .declared(declared)
                .actual(expected)
                .emit();
        }
        self.out.signed(4, expected)
    }

    /// Declared length, then the quoted string whose length is written.
    fn length_string(&mut self, width: u8, kind: WarningKind) -> Result<(), ErrorKind> {
        let declared = self.unsigned_arg("string length")?;
        let bytes = self.string_arg("string")?;
        self.length(width, kind, declared, bytes.len())?;
        self.out.write_all(&bytes)?;
        Ok(())
    }

    fn font_def(&mut self, width: u8) -> Result<(), ErrorKind> {
        if width == 4 {
            let k = self.signed_arg("font number")?;
            self.out.signed(4, k)?;
        } else {
            let k = self.unsigned_arg("font number")?;
            self.out.unsigned(width as usize, k)?;
        }
        let checksum = self.octal_arg("octal checksum")?;
        self.out.unsigned(4, checksum)?;
        let scale = self.unsigned_arg("scale")?;
        self.out.unsigned(4, scale)?;
        let design = self.unsigned_arg("design size")?;
        self.out.unsigned(4, design)?;

        let area_len = self.unsigned_arg("font area length")?;
        let name_len = self.unsigned_arg("font name length")?;
        let area = self.string_arg("font area")?;
        self.length(1, WarningKind::FontAreaLength, area_len, area.len())?;
        let name = self.string_arg("font name")?;
        self.length(1, WarningKind::FontNameLength, name_len, name.len())?;
        self.out.write_all(&area)?;
        self.out.write_all(&name)?;
        Ok(())
    }

    /// Write the actual length of a string, warning if it was declared otherwise.
    fn length(
        &mut self,
        width: u8,
        kind: WarningKind,
        declared: u32,
        actual: usize,
    ) -> Result<(), ErrorKind> {
        let width = width as usize;
        let max = max_unsigned(width).map_err(ErrorKind::Codec)?;
        let Ok(len) = u32::try_from(actual) else {
            return Err(ErrorKind::LengthOverflow { len: actual, width });
        };
        if len > max {
            return Err(ErrorKind::LengthOverflow { len: actual, width });
        }
        if declared != len {
            let line = self.tokens.input().line_number();
            self.progress
                .diagnostics
                .report(kind, line)
                .declared(declared)
                .actual(len)
                .emit();
        }
        self.out.unsigned(width, len)
    }

    fn word(&mut self, what: &'static str) -> Result<Vec<u8>, ErrorKind> {
        match self.tokens.next_token()? {
            Token::Word(w) => Ok(w),
            Token::End => Err(ErrorKind::UnexpectedEnd(what.to_string())),
            other => Err(ErrorKind::ExpectedNumber {
                what,
                found: self.render(&other),
            }),
        }
    }

    fn unsigned_arg(&mut self, what: &'static str) -> Result<u32, ErrorKind> {
        let word = self.word(what)?;
        parse_unsigned(&word).ok_or_else(|| not_a_number(what, &word))
    }

    fn signed_arg(&mut self, what: &'static str) -> Result<i32, ErrorKind> {
        let word = self.word(what)?;
        parse_signed(&word).ok_or_else(|| not_a_number(what, &word))
    }

    fn octal_arg(&mut self, what: &'static str) -> Result<u32, ErrorKind> {
        let word = self.word(what)?;
        parse_octal(&word).ok_or_else(|| not_a_number(what, &word))
    }

    fn string_arg(&mut self, what: &'static str) -> Result<Vec<u8>, ErrorKind> {
        match self.tokens.next_token()? {
            Token::Message(bytes) => Ok(bytes),
            Token::End => Err(ErrorKind::UnexpectedEnd(format!("quoted {what}"))),
            other => Err(ErrorKind::ExpectedString {
                what,
                found: self.render(&other),
            }),
        }
    }
}

fn not_a_number(what: &'static str, word: &[u8]) -> ErrorKind {
    ErrorKind::ExpectedNumber {
        what,
        found: String::from_utf8_lossy(word).into_owned(),
    }
}
