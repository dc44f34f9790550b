//! The DTL text layer: line input, tokenizer, numbers, and escaping.

mod escape;
mod input;
mod number;
mod tokenizer;

#[cfg(test)]
mod tokenizer_tests;

pub use escape::{write_message, write_sequence_char};
pub use input::TextInput;
pub use number::{parse_octal, parse_signed, parse_unsigned};
pub use tokenizer::{Token, Tokenizer};

/// White space as the C locale defines it (includes vertical tab).
pub fn is_space(ch: u8) -> bool {
    matches!(ch, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Printable ASCII, space included.
pub fn is_printable(ch: u8) -> bool {
    (0x20..=0x7E).contains(&ch)
}
