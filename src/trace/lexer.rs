//! Tokenizer for request log lines.
//!
//! A log line is a bracketed literal such as
//! `['placeholder', 'Alabama', 41115, 'default prompt', [12, 'SE-SE3']]`.
//! The lexer only knows about punctuation and scalar literals; the shape of
//! the line is checked by [`crate::trace::record::parse_line`].

use logos::Logos;

/// Lexical element of a log line.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    /// `[`
    #[token("[")]
    Open,
    /// `]`
    #[token("]")]
    Close,
    /// `,`
    #[token(",")]
    Comma,
    /// Signed integer literal. Values outside `i64` fail to lex.
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),
    /// Floating point literal, with a fraction, an exponent, or both.
    #[regex(r"-?[0-9]+(\.[0-9]*([eE][+-]?[0-9]+)?|[eE][+-]?[0-9]+)", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),
    /// Bare word such as `None` or `True`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    /// Quoted string with the quotes removed. Escapes are kept verbatim.
    #[regex(r#"'([^'\\\n]|\\.)*'"#, unquote)]
    #[regex(r#""([^"\\\n]|\\.)*""#, unquote)]
    Str(String),
}

fn unquote(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_owned()
}

/// Tokenizes a whole line, returning `None` on the first unrecognised input.
pub fn tokenize(line: &str) -> Option<Vec<Token>> {
    Token::lexer(line).collect::<Result<Vec<_>, _>>().ok()
}
