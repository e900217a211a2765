//! Error types for the Trellis layout engine.

use thiserror::Error;

use crate::axis::Axis;

/// Top-level error type for the Trellis layout engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrellisError {
    #[error(transparent)]
    ConstraintSyntax(#[from] ConstraintSyntaxError),

    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),
}

/// Malformed constraint text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintSyntaxError {
    #[error("Constraint text is empty")]
    Empty,

    #[error("Constraint must have between 1 and 8 tokens, found {count} in {text:?}")]
    TokenCount { count: usize, text: String },

    #[error("Invalid position {token:?}: a single position token must be '.' or '+'")]
    InvalidPosition { token: String },

    #[error("Invalid number format: {value:?}")]
    InvalidNumber { value: String },

    #[error("{axis} position must not be negative: {value}")]
    NegativePosition { axis: Axis, value: i64 },

    #[error("{axis} span must be a positive integer: {value}")]
    NonPositiveSpan { axis: Axis, value: i64 },

    #[error("{axis} weight must be a non-negative number: {value}")]
    NegativeWeight { axis: Axis, value: f64 },

    #[error("Alignment text must be one of {expected} but was {name:?}")]
    UnknownAlignment {
        axis: Axis,
        name: String,
        expected: String,
    },

    #[error("Missing {expected} after {after:?}")]
    MissingToken { expected: &'static str, after: String },

    #[error("Unexpected token {token:?} at position {index}")]
    UnexpectedToken { token: String, index: usize },
}

/// A bad value supplied to an API call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidArgumentError {
    #[error("{axis} gap must not be negative: {value}")]
    NegativeGap { axis: Axis, value: i32 },

    #[error("{axis} span must be a positive integer: {value}")]
    NonPositiveSpan { axis: Axis, value: u32 },

    #[error("{axis} weight must be a finite non-negative number: {value}")]
    InvalidWeight { axis: Axis, value: f64 },

    #[error("Alignment text must be one of {expected} but was {name:?}")]
    UnknownAlignment {
        axis: Axis,
        name: String,
        expected: String,
    },

    #[error("Component {key} is not managed by this layout")]
    UnknownComponent { key: String },

    #[error("Component {key} is not a child of the container")]
    MissingComponent { key: String },

    #[error("Row count and column count must not both be zero")]
    EmptyGrid,

    #[error("Member {id} is already registered with grid group {group:?}")]
    DuplicateMember { id: u64, group: String },

    #[error("Member {id} is not registered with grid group {group:?}")]
    UnknownMember { id: u64, group: String },
}
