//! Grammar rules for constraint text.
//!
//! ```text
//! [pos] [width height] [xAlign yAlign [xWeight yWeight]]
//! ```
//!
//! Integers, `.` and `+` form the leading bounds group; the first other
//! token starts the alignment group. A bounds group of odd length starts
//! with one of the shortcuts `.` (next column, same row) or `+` (column 0,
//! next row).

use nom::{combinator::all_consuming, number::complete::double};

use trellis_core::{
    Alignment, Axis, Constraint, ConstraintSyntaxError, GridPos, PerAxis, Span, Weight,
};

use crate::lexer::{tokenize, Token, TokenKind};

/// Largest number of tokens a constraint may have.
pub const MAX_TOKENS: usize = 8;

/// Parse constraint text.
pub fn parse_constraint(text: &str) -> Result<Constraint, ConstraintSyntaxError> {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return Err(ConstraintSyntaxError::Empty);
    }
    if tokens.len() > MAX_TOKENS {
        return Err(ConstraintSyntaxError::TokenCount {
            count: tokens.len(),
            text: text.to_string(),
        });
    }

    let bounds = tokens
        .iter()
        .position(|token| !token.is_bounds())
        .unwrap_or(tokens.len());
    let mut cursor = Cursor::new(&tokens);

    let (x, y) = if bounds == 0 {
        (GridPos::Next, GridPos::Same)
    } else if bounds % 2 == 1 {
        let token = cursor.advance();
        shortcut(&token)?
    } else {
        let x = position(Axis::Horizontal, &cursor.advance())?;
        let y = position(Axis::Vertical, &cursor.advance())?;
        (x, y)
    };
    let mut constraint = Constraint::new(x, y);

    // The bounds group left after the position always has even length.
    if cursor.index < bounds {
        let width = span(Axis::Horizontal, &cursor.advance())?;
        let height = span(Axis::Vertical, &cursor.advance())?;
        constraint = constraint.with_span(PerAxis::new(width, height));
    }

    if let Some(first) = cursor.peek() {
        cursor.advance();
        let second = cursor.pair_of(first, "y alignment")?;
        constraint = constraint.aligned(
            alignment(Axis::Horizontal, &first)?,
            alignment(Axis::Vertical, &second)?,
        );
    }

    if let Some(first) = cursor.peek() {
        cursor.advance();
        let second = cursor.pair_of(first, "y weight")?;
        constraint = constraint.with_weight(PerAxis::new(
            weight(Axis::Horizontal, &first)?,
            weight(Axis::Vertical, &second)?,
        ));
    }

    if let Some(token) = cursor.peek() {
        return Err(ConstraintSyntaxError::UnexpectedToken {
            token: token.to_string(),
            index: cursor.index,
        });
    }

    Ok(constraint)
}

struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    index: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, index: 0 }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.index).copied()
    }

    /// Take the current token. Only called where the bounds group length
    /// guarantees one is present.
    fn advance(&mut self) -> Token<'a> {
        let token = self.peek().unwrap_or(Token {
            kind: TokenKind::Word,
            text: "",
        });
        self.index += 1;
        token
    }

    /// Take the second token of a pair started by `first`.
    fn pair_of(&mut self, first: Token<'a>, expected: &'static str) -> Result<Token<'a>, ConstraintSyntaxError> {
        let second = self.peek().ok_or_else(|| ConstraintSyntaxError::MissingToken {
            expected,
            after: first.to_string(),
        })?;
        self.index += 1;
        Ok(second)
    }
}

fn shortcut(token: &Token<'_>) -> Result<(GridPos, GridPos), ConstraintSyntaxError> {
    match token.kind {
        TokenKind::Same => Ok((GridPos::Next, GridPos::Same)),
        TokenKind::Next => Ok((GridPos::At(0), GridPos::Next)),
        _ => Err(ConstraintSyntaxError::InvalidPosition {
            token: token.to_string(),
        }),
    }
}

fn position(axis: Axis, token: &Token<'_>) -> Result<GridPos, ConstraintSyntaxError> {
    match token.kind {
        TokenKind::Same => Ok(GridPos::Same),
        TokenKind::Next => Ok(GridPos::Next),
        TokenKind::Int(value) if value < 0 => {
            Err(ConstraintSyntaxError::NegativePosition { axis, value })
        }
        TokenKind::Int(value) => u32::try_from(value)
            .map(GridPos::At)
            .map_err(|_| invalid_number(token)),
        TokenKind::Word => Err(invalid_number(token)),
    }
}

fn span(axis: Axis, token: &Token<'_>) -> Result<Span, ConstraintSyntaxError> {
    match token.kind {
        TokenKind::Int(value) if value <= 0 => {
            Err(ConstraintSyntaxError::NonPositiveSpan { axis, value })
        }
        TokenKind::Int(value) => u32::try_from(value)
            .ok()
            .and_then(Span::new)
            .ok_or_else(|| invalid_number(token)),
        _ => Err(invalid_number(token)),
    }
}

fn alignment(axis: Axis, token: &Token<'_>) -> Result<Alignment, ConstraintSyntaxError> {
    Alignment::from_name(axis, token.text).ok_or_else(|| ConstraintSyntaxError::UnknownAlignment {
        axis,
        name: token.to_string(),
        expected: Alignment::names(axis),
    })
}

fn weight(axis: Axis, token: &Token<'_>) -> Result<Weight, ConstraintSyntaxError> {
    let value = all_consuming(double::<&str, nom::error::Error<&str>>)(token.text)
        .map(|(_, value)| value)
        .map_err(|_| invalid_number(token))?;
    Weight::new(value).ok_or(ConstraintSyntaxError::NegativeWeight { axis, value })
}

fn invalid_number(token: &Token<'_>) -> ConstraintSyntaxError {
    ConstraintSyntaxError::InvalidNumber {
        value: token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(c: &Constraint) -> (GridPos, GridPos) {
        (c.pos(Axis::Horizontal), c.pos(Axis::Vertical))
    }

    #[test]
    fn test_shortcuts() {
        let dot = parse_constraint(".").unwrap();
        assert_eq!(origin(&dot), (GridPos::Next, GridPos::Same));

        let plus = parse_constraint("+").unwrap();
        assert_eq!(origin(&plus), (GridPos::At(0), GridPos::Next));

        let plus_span = parse_constraint("+ 2 1").unwrap();
        assert_eq!(origin(&plus_span), (GridPos::At(0), GridPos::Next));
        assert_eq!(plus_span.span(Axis::Horizontal).cells(), 2);

        assert_eq!(
            parse_constraint("3"),
            Err(ConstraintSyntaxError::InvalidPosition {
                token: "3".to_string()
            })
        );
    }

    #[test]
    fn test_alignment_only() {
        let c = parse_constraint("fill top").unwrap();
        assert_eq!(origin(&c), (GridPos::Next, GridPos::Same));
        assert_eq!(c.alignment(Axis::Horizontal), Alignment::Fill);
        assert_eq!(c.alignment(Axis::Vertical), Alignment::Near);
        assert!(c.weight(Axis::Horizontal).is_auto());
    }

    #[test]
    fn test_full_constraint() {
        let c = parse_constraint("+ . 1 1 fill top 1 0").unwrap();
        assert_eq!(origin(&c), (GridPos::Next, GridPos::Same));
        assert_eq!(c.span(Axis::Vertical), Span::new(1).unwrap());
        assert_eq!(c.alignment(Axis::Horizontal), Alignment::Fill);
        assert_eq!(c.weight(Axis::Horizontal).value(), Some(1.0));
        assert_eq!(c.weight(Axis::Vertical).value(), Some(0.0));
    }

    #[test]
    fn test_absolute_with_commas() {
        let c = parse_constraint("0,0,2,1,fill,fill,0.5,0").unwrap();
        assert_eq!(origin(&c), (GridPos::At(0), GridPos::At(0)));
        assert_eq!(c.span(Axis::Horizontal).cells(), 2);
        assert_eq!(c.weight(Axis::Horizontal).value(), Some(0.5));
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(parse_constraint(""), Err(ConstraintSyntaxError::Empty));
        assert!(matches!(
            parse_constraint("a b"),
            Err(ConstraintSyntaxError::UnknownAlignment { axis: Axis::Horizontal, .. })
        ));
        assert!(matches!(
            parse_constraint("0 0 1 1 fill fill 1 1 1"),
            Err(ConstraintSyntaxError::TokenCount { count: 9, .. })
        ));
        assert_eq!(
            parse_constraint("-1 0"),
            Err(ConstraintSyntaxError::NegativePosition {
                axis: Axis::Horizontal,
                value: -1
            })
        );
        assert_eq!(
            parse_constraint("0 0 1 0"),
            Err(ConstraintSyntaxError::NonPositiveSpan {
                axis: Axis::Vertical,
                value: 0
            })
        );
        assert!(matches!(
            parse_constraint("0 0 fill fill -1 0"),
            Err(ConstraintSyntaxError::NegativeWeight { .. })
        ));
        assert!(matches!(
            parse_constraint("0 0 fill fill x 0"),
            Err(ConstraintSyntaxError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_constraint("0 0 fill"),
            Err(ConstraintSyntaxError::MissingToken { expected: "y alignment", .. })
        ));
        assert!(matches!(
            parse_constraint("0 0 fill fill 1"),
            Err(ConstraintSyntaxError::MissingToken { expected: "y weight", .. })
        ));
        assert!(matches!(
            parse_constraint("0 0 fill fill 1 1 extra"),
            Err(ConstraintSyntaxError::UnexpectedToken { index: 6, .. })
        ));
    }

    #[test]
    fn test_per_axis_alignment_names() {
        assert!(parse_constraint("0 0 top left").is_err());
        assert!(parse_constraint("0 0 left top").is_ok());
    }
}
