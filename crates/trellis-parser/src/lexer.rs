//! Tokenizer for constraint text.
//!
//! Tokens are separated by any run of whitespace and commas. Each token is
//! classified as an integer, one of the position sentinels `.` and `+`, or a
//! word (alignment names and decimal weights).

use std::fmt;

use nom::{
    bytes::complete::take_while1,
    character::complete::{digit1, one_of},
    combinator::{all_consuming, map, opt, recognize},
    multi::fold_many0,
    sequence::{pair, preceded, terminated},
    IResult,
};
use smallvec::SmallVec;

/// Tokens kept inline before spilling to the heap; the grammar accepts at most 8.
pub type Tokens<'a> = SmallVec<[Token<'a>; 8]>;

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// Signed integer that fits in an `i64`.
    Int(i64),
    /// `.`
    Same,
    /// `+`
    Next,
    /// Anything else.
    Word,
}

/// A token together with its source text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl Token<'_> {
    /// Whether the token may appear in the leading position/span group.
    pub fn is_bounds(&self) -> bool {
        !matches!(self.kind, TokenKind::Word)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

fn is_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

/// Parse a run of separators.
pub fn separator(input: &str) -> IResult<&str, &str> {
    take_while1(is_separator)(input)
}

/// Parse one raw token.
pub fn raw_token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !is_separator(c))(input)
}

/// Recognize an optionally signed decimal integer.
pub fn integer(input: &str) -> IResult<&str, &str> {
    recognize(pair(opt(one_of("+-")), digit1))(input)
}

/// Classify a raw token.
pub fn classify(text: &str) -> Token<'_> {
    let kind = match text {
        "." => TokenKind::Same,
        "+" => TokenKind::Next,
        _ => match all_consuming(integer)(text) {
            Ok((_, digits)) => digits
                .parse::<i64>()
                .map(TokenKind::Int)
                .unwrap_or(TokenKind::Word),
            Err(_) => TokenKind::Word,
        },
    };
    Token { kind, text }
}

fn push_token<'a>(mut tokens: Tokens<'a>, token: Token<'a>) -> Tokens<'a> {
    tokens.push(token);
    tokens
}

/// Split constraint text into classified tokens.
pub fn tokenize(input: &str) -> Tokens<'_> {
    let result: IResult<&str, Tokens<'_>> = preceded(
        opt(separator),
        fold_many0(
            terminated(map(raw_token, classify), opt(separator)),
            Tokens::new,
            push_token,
        ),
    )(input);

    match result {
        Ok((_, tokens)) => tokens,
        Err(_) => Tokens::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_separators() {
        assert_eq!(
            kinds(" 0, 1\t. +,,fill "),
            vec![
                TokenKind::Int(0),
                TokenKind::Int(1),
                TokenKind::Same,
                TokenKind::Next,
                TokenKind::Word,
            ]
        );
        assert!(tokenize("").is_empty());
        assert!(tokenize(" ,, ").is_empty());
    }

    #[test]
    fn test_integers() {
        assert_eq!(kinds("-3 +4 12"), vec![TokenKind::Int(-3), TokenKind::Int(4), TokenKind::Int(12)]);
        // Decimals and oversized integers are words.
        assert_eq!(kinds("1.5 99999999999999999999"), vec![TokenKind::Word, TokenKind::Word]);
        assert_eq!(kinds("3a"), vec![TokenKind::Word]);
    }

    #[test]
    fn test_token_text_preserved() {
        let tokens = tokenize("center,top");
        assert_eq!(tokens[0].text, "center");
        assert_eq!(tokens[1].to_string(), "top");
        assert!(!tokens[1].is_bounds());
    }
}
