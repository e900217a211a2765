//! Parser for the Trellis constraint mini-language.
//!
//! Constraint text describes where an item sits in a grid:
//!
//! ```text
//! 0 0                   absolute cell (0, 0)
//! + . 1 1 fill top 1 0  next column, same row, fill horizontally, weight 1 on x
//! +                     first column of the next row
//! ```
//!
//! # Example
//!
//! ```
//! use trellis_core::{Alignment, Axis};
//! use trellis_parser::parse_constraint;
//!
//! let constraint = parse_constraint("0 0 2 1 fill center").unwrap();
//! assert_eq!(constraint.span(Axis::Horizontal).cells(), 2);
//! assert_eq!(constraint.alignment(Axis::Horizontal), Alignment::Fill);
//! ```

pub mod grammar;
pub mod lexer;

pub use grammar::{parse_constraint, MAX_TOKENS};
pub use lexer::{tokenize, Token, TokenKind};
