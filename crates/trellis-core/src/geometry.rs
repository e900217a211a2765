//! Integer pixel geometry.

use std::ops::Add;

use glam::IVec2;

use crate::axis::Axis;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size::new(0, 0);

    /// Largest representable size, used for "unbounded" maxima.
    pub const MAX: Size = Size::new(i32::MAX, i32::MAX);

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Extent along `axis`.
    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn set(&mut self, axis: Axis, value: i32) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }

    pub fn to_vec(self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }
}

impl From<IVec2> for Size {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// A position and extent along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Segment {
    pub start: i32,
    pub size: i32,
}

impl Segment {
    pub const fn new(start: i32, size: i32) -> Self {
        Self { start, size }
    }

    pub fn end(&self) -> i32 {
        self.start + self.size
    }
}

/// Axis-aligned rectangle in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_vecs(position: IVec2, size: IVec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Start coordinate along `axis`.
    pub fn pos(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Extent along `axis`.
    pub fn extent(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn segment(&self, axis: Axis) -> Segment {
        Segment::new(self.pos(axis), self.extent(axis))
    }

    /// Replace the position and extent along `axis`.
    pub fn set_axis(&mut self, axis: Axis, segment: Segment) {
        match axis {
            Axis::Horizontal => {
                self.x = segment.start;
                self.width = segment.size;
            }
            Axis::Vertical => {
                self.y = segment.start;
                self.height = segment.size;
            }
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Border widths on the four sides of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Insets {
    pub const ZERO: Insets = Insets::new(0, 0, 0, 0);

    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Inset before the content along `axis` (left or top).
    pub fn leading(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Inset after the content along `axis` (right or bottom).
    pub fn trailing(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }

    pub fn total(&self, axis: Axis) -> i32 {
        self.leading(axis) + self.trailing(axis)
    }

    /// Content area of a box of `size` once these insets are removed.
    pub fn inner(&self, size: Size) -> Rect {
        Rect::new(
            self.left,
            self.top,
            size.width - self.total(Axis::Horizontal),
            size.height - self.total(Axis::Vertical),
        )
    }
}

impl Add for Insets {
    type Output = Insets;

    fn add(self, rhs: Insets) -> Insets {
        Insets::new(
            self.top + rhs.top,
            self.left + rhs.left,
            self.bottom + rhs.bottom,
            self.right + rhs.right,
        )
    }
}

/// Reading direction of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl Orientation {
    pub fn is_left_to_right(self) -> bool {
        self == Orientation::LeftToRight
    }
}
