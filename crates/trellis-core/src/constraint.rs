//! Placement constraints of a single item.
//!
//! A [`Constraint`] is an immutable value describing where an item starts,
//! how many strips it covers, how it is aligned inside its cell and how
//! eagerly it absorbs extra space. Positions may be relative to the item
//! added before it; [`Constraint::resolve`] turns them into absolute ones.

use std::num::NonZeroU32;

use crate::alignment::Alignment;
use crate::axis::{Axis, PerAxis};
use crate::errors::InvalidArgumentError;

/// Grid coordinate of an item's origin along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridPos {
    /// Absolute strip index.
    At(u32),
    /// Same strip as the previous item.
    Same,
    /// First strip after the previous item's span.
    Next,
}

/// Number of strips an item covers along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Span {
    Cells(NonZeroU32),
    /// Chosen by the layout; currently always a single strip.
    #[default]
    Auto,
}

impl Span {
    /// Explicit span; `None` for zero.
    pub fn new(cells: u32) -> Option<Span> {
        NonZeroU32::new(cells).map(Span::Cells)
    }

    /// Resolved number of strips.
    pub fn cells(self) -> u32 {
        match self {
            Span::Cells(n) => n.get(),
            Span::Auto => 1,
        }
    }
}

/// Resize weight along one axis: a finite non-negative number, or automatic.
///
/// An automatic weight is 0 for components whose minimum, preferred and
/// maximum extents agree and 1 otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Option<f64>", into = "Option<f64>"))]
pub struct Weight(Option<f64>);

impl Weight {
    pub const AUTO: Weight = Weight(None);

    /// Explicit weight; `None` unless `value` is finite and non-negative.
    pub fn new(value: f64) -> Option<Weight> {
        (value.is_finite() && value >= 0.0).then_some(Weight(Some(value)))
    }

    pub fn value(self) -> Option<f64> {
        self.0
    }

    pub fn is_auto(self) -> bool {
        self.0.is_none()
    }
}

impl TryFrom<Option<f64>> for Weight {
    type Error = String;

    fn try_from(value: Option<f64>) -> Result<Self, Self::Error> {
        match value {
            None => Ok(Weight::AUTO),
            Some(v) => Weight::new(v).ok_or_else(|| format!("invalid weight {v}")),
        }
    }
}

impl From<Weight> for Option<f64> {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

/// Where and how an item is placed in the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    pos: PerAxis<GridPos>,
    span: PerAxis<Span>,
    alignment: PerAxis<Alignment>,
    weight: PerAxis<Weight>,
}

impl Default for Constraint {
    /// Next column of the current row, everything else automatic.
    fn default() -> Self {
        Self::new(GridPos::Next, GridPos::Same)
    }
}

impl Constraint {
    pub fn new(x: GridPos, y: GridPos) -> Self {
        Self {
            pos: PerAxis::new(x, y),
            span: PerAxis::splat(Span::Auto),
            alignment: PerAxis::splat(Alignment::Auto),
            weight: PerAxis::splat(Weight::AUTO),
        }
    }

    /// Absolute cell `(x, y)`.
    pub fn at(x: u32, y: u32) -> Self {
        Self::new(GridPos::At(x), GridPos::At(y))
    }

    /// Cover `width` columns and `height` rows.
    pub fn spanning(self, width: u32, height: u32) -> Result<Self, InvalidArgumentError> {
        let cells = |axis, value| {
            Span::new(value).ok_or(InvalidArgumentError::NonPositiveSpan { axis, value })
        };
        Ok(self.with_span(PerAxis::new(
            cells(Axis::Horizontal, width)?,
            cells(Axis::Vertical, height)?,
        )))
    }

    pub fn with_span(mut self, span: PerAxis<Span>) -> Self {
        self.span = span;
        self
    }

    pub fn aligned(mut self, x: Alignment, y: Alignment) -> Self {
        self.alignment = PerAxis::new(x, y);
        self
    }

    /// Explicit weights; both must be finite and non-negative.
    pub fn weighted(self, x: f64, y: f64) -> Result<Self, InvalidArgumentError> {
        let weight = |axis, value| {
            Weight::new(value).ok_or(InvalidArgumentError::InvalidWeight { axis, value })
        };
        Ok(self.with_weight(PerAxis::new(
            weight(Axis::Horizontal, x)?,
            weight(Axis::Vertical, y)?,
        )))
    }

    pub fn with_weight(mut self, weight: PerAxis<Weight>) -> Self {
        self.weight = weight;
        self
    }

    pub fn pos(&self, axis: Axis) -> GridPos {
        self.pos[axis]
    }

    pub fn span(&self, axis: Axis) -> Span {
        self.span[axis]
    }

    pub fn alignment(&self, axis: Axis) -> Alignment {
        self.alignment[axis]
    }

    pub fn weight(&self, axis: Axis) -> Weight {
        self.weight[axis]
    }

    /// Absolute origin, if neither axis is relative.
    pub fn origin(&self) -> Option<PerAxis<u32>> {
        match (self.pos.x, self.pos.y) {
            (GridPos::At(x), GridPos::At(y)) => Some(PerAxis::new(x, y)),
            _ => None,
        }
    }

    pub fn is_absolute(&self) -> bool {
        self.origin().is_some()
    }

    /// Origin of this item given the previous item's resolved origin and span.
    pub fn resolve_origin(&self, last_origin: PerAxis<u32>, last_span: PerAxis<u32>) -> PerAxis<u32> {
        PerAxis::from_fn(|axis| match self.pos[axis] {
            GridPos::At(value) => value,
            GridPos::Same => last_origin[axis],
            GridPos::Next => last_origin[axis].saturating_add(last_span[axis]),
        })
    }

    /// Copy of this constraint with relative positions made absolute.
    pub fn resolve(&self, last_origin: PerAxis<u32>, last_span: PerAxis<u32>) -> Constraint {
        if self.is_absolute() {
            return *self;
        }
        let origin = self.resolve_origin(last_origin, last_span);
        Constraint {
            pos: origin.map(|_, v| GridPos::At(v)),
            ..*self
        }
    }
}
