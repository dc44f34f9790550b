//! DTL tokenizer.
//!
//! Tokens are words (maximal runs of non-white characters), quoted strings,
//! single sequence delimiters, and, when commands are grouped, single group
//! delimiters. A word never holds an unescaped group close.

use std::io::BufRead;

use tracing::trace;

use super::input::TextInput;
use super::{is_printable, is_space};
use crate::error::ErrorKind;
use crate::options::{Options, Syntax};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Word(Vec<u8>),
    /// Quoted string with escapes resolved.
    Message(Vec<u8>),
    SeqOpen,
    SeqClose,
    GroupOpen,
    GroupClose,
    End,
}

impl Token {
    /// Text of the token as it would appear in DTL, for messages.
    pub fn render(&self, syntax: &Syntax) -> String {
        match self {
            Self::Word(word) => String::from_utf8_lossy(word).into_owned(),
            Self::Message(bytes) => {
                let quote = char::from(syntax.string_delim);
                format!("{quote}{}{quote}", String::from_utf8_lossy(bytes))
            }
            Self::SeqOpen => char::from(syntax.seq_open).to_string(),
            Self::SeqClose => char::from(syntax.seq_close).to_string(),
            Self::GroupOpen => char::from(syntax.group_open).to_string(),
            Self::GroupClose => char::from(syntax.group_close).to_string(),
            Self::End => "end of input".to_string(),
        }
    }
}

pub struct Tokenizer<R> {
    input: TextInput<R>,
    syntax: Syntax,
    token_len: usize,
    lookahead: Option<Token>,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(reader: R, options: &Options) -> Self {
        Self {
            input: TextInput::new(reader, &options.limits),
            syntax: options.syntax,
            token_len: options.limits.token_len,
            lookahead: None,
        }
    }

    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    pub fn input(&self) -> &TextInput<R> {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextInput<R> {
        &mut self.input
    }

    /// Return a token to be handed out again by the next `next_token`.
    pub fn push_back(&mut self, token: Token) {
        debug_assert!(self.lookahead.is_none(), "lookahead slot already full");
        self.lookahead = Some(token);
    }

    pub fn next_token(&mut self) -> Result<Token, ErrorKind> {
        if let Some(token) = self.lookahead.take() {
            return Ok(token);
        }

        let Some(ch) = self.skip_space()? else {
            return Ok(Token::End);
        };

        let s = self.syntax;
        let token = if s.grouped && ch == s.group_open {
            Token::GroupOpen
        } else if s.grouped && ch == s.group_close {
            Token::GroupClose
        } else if ch == s.string_delim {
            Token::Message(self.read_message()?)
        } else if ch == s.seq_open {
            Token::SeqOpen
        } else if ch == s.seq_close {
            Token::SeqClose
        } else {
            Token::Word(self.read_word(ch)?)
        };

        trace!(token = %token.render(&self.syntax), "token");
        Ok(token)
    }

    fn skip_space(&mut self) -> Result<Option<u8>, ErrorKind> {
        while let Some(ch) = self.input.next_byte()? {
            if !is_space(ch) {
                check_char(ch)?;
                return Ok(Some(ch));
            }
        }
        Ok(None)
    }

    fn read_message(&mut self) -> Result<Vec<u8>, ErrorKind> {
        let mut bytes = Vec::new();
        let mut escaped = false;
        loop {
            let Some(ch) = self.input.next_byte()? else {
                let quote = char::from(self.syntax.string_delim);
                return Err(ErrorKind::UnexpectedEnd(format!(
                    "`{quote}` closing the string"
                )));
            };
            if escaped {
                bytes.push(ch);
                escaped = false;
            } else if ch == self.syntax.escape {
                escaped = true;
            } else if ch == self.syntax.string_delim {
                return Ok(bytes);
            } else {
                bytes.push(ch);
            }
        }
    }

    fn read_word(&mut self, first: u8) -> Result<Vec<u8>, ErrorKind> {
        let mut word = Vec::new();
        let mut escaped = false;
        let mut current = Some(first);
        while let Some(ch) = current {
            if is_space(ch) {
                break;
            }
            if !escaped && self.syntax.grouped && ch == self.syntax.group_close {
                self.input.unread(ch);
                break;
            }
            check_char(ch)?;
            escaped = !escaped && ch == self.syntax.escape;
            word.push(ch);
            if word.len() > self.token_len {
                return Err(ErrorKind::TokenTooLong {
                    limit: self.token_len,
                });
            }
            current = self.input.next_byte()?;
        }
        Ok(word)
    }
}

fn check_char(ch: u8) -> Result<(), ErrorKind> {
    if is_printable(ch) || is_space(ch) {
        Ok(())
    } else {
        Err(ErrorKind::InvalidCharacter(ch))
    }
}
