use indoc::indoc;

use super::{Token, Tokenizer};
use crate::error::ErrorKind;
use crate::options::{Limits, Options};

fn tokens(src: &str, options: &Options) -> Result<Vec<String>, ErrorKind> {
    let mut tokenizer = Tokenizer::new(src.as_bytes(), options);
    let mut out = Vec::new();
    loop {
        let token = tokenizer.next_token()?;
        if token == Token::End {
            return Ok(out);
        }
        out.push(token.render(&options.syntax));
    }
}

fn words(src: &str, options: &Options) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(src.as_bytes(), options);
    let mut out = Vec::new();
    loop {
        match tokenizer.next_token().unwrap() {
            Token::End => return out,
            token => out.push(token),
        }
    }
}

fn word(text: &str) -> Token {
    Token::Word(text.as_bytes().to_vec())
}

#[test]
fn splits_on_any_white_space() {
    let got = words("variety  sequences-6\n\tw3 -12\x0B\x0cfn0\r\n", &Options::default());
    assert_eq!(
        got,
        vec![
            word("variety"),
            word("sequences-6"),
            word("w3"),
            word("-12"),
            word("fn0")
        ]
    );
}

#[test]
fn quoted_strings_resolve_escapes() {
    let got = words(r"special1 5 'it\'s a \\ test' pre", &Options::default());
    assert_eq!(
        got,
        vec![
            word("special1"),
            word("5"),
            Token::Message(br"it's a \ test".to_vec()),
            word("pre"),
        ]
    );
}

#[test]
fn quoted_strings_span_lines() {
    let got = words("'a\nb'", &Options::default());
    assert_eq!(got, vec![Token::Message(b"a\nb".to_vec())]);
}

#[test]
fn sequence_delimiters_are_single_tokens() {
    let got = words("( )", &Options::default());
    assert_eq!(got, vec![Token::SeqOpen, Token::SeqClose]);
}

#[test]
fn braces_are_plain_words_without_grouping() {
    let got = words("{nop}", &Options::default());
    assert_eq!(got, vec![word("{nop}")]);
}

#[test]
fn grouping_splits_braces() {
    let src = indoc! {"
        {nop}
        { eop }
        {w1 -3}
    "};
    let got = tokens(src, &Options::default().grouped(true)).unwrap();
    insta::assert_snapshot!(got.join(" "), @"{ nop } { eop } { w1 -3 }");
}

#[test]
fn escaped_group_close_stays_in_word() {
    let got = words(r"{a\}b}", &Options::default().grouped(true));
    assert_eq!(got, vec![Token::GroupOpen, word(r"a\}b"), Token::GroupClose]);
}

#[test]
fn push_back_returns_token_again() {
    let mut tokenizer = Tokenizer::new(&b"223 eop"[..], &Options::default());
    assert_eq!(tokenizer.next_token().unwrap(), word("223"));
    let next = tokenizer.next_token().unwrap();
    tokenizer.push_back(next.clone());
    assert_eq!(tokenizer.next_token().unwrap(), next);
    assert_eq!(tokenizer.next_token().unwrap(), Token::End);
    assert_eq!(tokenizer.next_token().unwrap(), Token::End);
}

#[test]
fn counts_lines_and_bytes() {
    let mut tokenizer = Tokenizer::new(&b"a\nbb\n\ncc"[..], &Options::default());
    tokenizer.next_token().unwrap();
    tokenizer.next_token().unwrap();
    assert_eq!(tokenizer.input().line_number(), 2);
    tokenizer.next_token().unwrap();
    let position = tokenizer.input().position();
    assert_eq!(position.line_number, 4);
    assert_eq!(position.line, "cc");
    assert_eq!(position.column, 2);
    assert_eq!(tokenizer.input().bytes_read(), 8);
}

#[test]
fn unterminated_string_is_fatal() {
    let err = tokens("'abc", &Options::default()).unwrap_err();
    insta::assert_snapshot!(err, @"premature end of input: expected `'` closing the string");
}

#[test]
fn control_characters_are_fatal() {
    let err = tokens("nop \x01", &Options::default()).unwrap_err();
    assert!(matches!(err, ErrorKind::InvalidCharacter(0x01)));
    let err = tokens("no\x7Fp", &Options::default()).unwrap_err();
    insta::assert_snapshot!(err, @"character 0x7f is neither printable nor white space");
}

#[test]
fn control_characters_allowed_in_strings() {
    let got = words("'\x01\x7F'", &Options::default());
    assert_eq!(got, vec![Token::Message(vec![0x01, 0x7F])]);
}

#[test]
fn long_words_are_fatal() {
    let options = Options::default().limits(Limits {
        token_len: 4,
        line_len: 16,
    });
    assert_eq!(words("abcd", &options), vec![word("abcd")]);
    let err = tokens("abcde", &options).unwrap_err();
    assert!(matches!(err, ErrorKind::TokenTooLong { limit: 4 }));
}

#[test]
fn render_uses_syntax() {
    let syntax = Options::default().syntax;
    assert_eq!(Token::Message(b"x".to_vec()).render(&syntax), "'x'");
    assert_eq!(Token::SeqOpen.render(&syntax), "(");
    assert_eq!(Token::GroupClose.render(&syntax), "}");
    assert_eq!(Token::End.render(&syntax), "end of input");
}
