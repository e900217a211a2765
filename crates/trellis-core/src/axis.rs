//! Axis selector and per-axis pairs.
//!
//! Rows and columns are solved by the same code; everything that differs by
//! direction is stored in a [`PerAxis`] and indexed by [`Axis`].

use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the two layout directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Columns run along this axis (x).
    Horizontal,
    /// Rows run along this axis (y).
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// Position of this axis in a two-element array.
    pub fn index(self) -> usize {
        match self {
            Axis::Horizontal => 0,
            Axis::Vertical => 1,
        }
    }

    /// The perpendicular axis.
    pub fn other(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "x"),
            Axis::Vertical => write!(f, "y"),
        }
    }
}

/// A value for each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerAxis<T> {
    pub x: T,
    pub y: T,
}

impl<T> PerAxis<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Apply `f` to both values, passing the axis along.
    pub fn map<U>(self, mut f: impl FnMut(Axis, T) -> U) -> PerAxis<U> {
        PerAxis {
            x: f(Axis::Horizontal, self.x),
            y: f(Axis::Vertical, self.y),
        }
    }

    /// Build a pair by evaluating `f` once per axis.
    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        Self {
            x: f(Axis::Horizontal),
            y: f(Axis::Vertical),
        }
    }

    pub fn zip<U>(self, other: PerAxis<U>) -> PerAxis<(T, U)> {
        PerAxis {
            x: (self.x, other.x),
            y: (self.y, other.y),
        }
    }

    pub fn as_ref(&self) -> PerAxis<&T> {
        PerAxis {
            x: &self.x,
            y: &self.y,
        }
    }
}

impl<T: Clone> PerAxis<T> {
    /// Same value on both axes.
    pub fn splat(value: T) -> Self {
        Self {
            x: value.clone(),
            y: value,
        }
    }
}

impl<T> Index<Axis> for PerAxis<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        match axis {
            Axis::Horizontal => &self.x,
            Axis::Vertical => &self.y,
        }
    }
}

impl<T> IndexMut<Axis> for PerAxis<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::Horizontal => &mut self.x,
            Axis::Vertical => &mut self.y,
        }
    }
}

impl<T> From<(T, T)> for PerAxis<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}
