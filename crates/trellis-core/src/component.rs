//! Capability traits the host implements for its widgets.
//!
//! The engine never owns components. It addresses them through a
//! [`Container`] by a host-chosen key and only ever reads their intrinsic
//! sizes and writes their bounds.

use std::fmt::Debug;
use std::hash::Hash;

use crate::axis::Axis;
use crate::geometry::{Insets, Orientation, Rect, Size};

/// A rectangular thing that can be laid out.
pub trait Component {
    fn minimum_size(&self) -> Size;

    fn preferred_size(&self) -> Size;

    fn maximum_size(&self) -> Size;

    /// Where the component prefers to sit when its cell is larger than it,
    /// `0.0` = leading edge, `1.0` = trailing edge.
    fn alignment_factor(&self, _axis: Axis) -> f64 {
        0.5
    }

    fn is_visible(&self) -> bool {
        true
    }

    fn set_bounds(&mut self, bounds: Rect);

    /// Whether any of minimum, preferred and maximum differ along `axis`.
    fn is_resizable(&self, axis: Axis) -> bool {
        let min = self.minimum_size().get(axis);
        let pref = self.preferred_size().get(axis);
        let max = self.maximum_size().get(axis);
        min != pref || pref != max
    }
}

/// The box a layout arranges children in.
pub trait Container {
    /// Host-side handle of a child.
    type Key: Clone + Eq + Hash + Debug;

    fn size(&self) -> Size;

    fn insets(&self) -> Insets {
        Insets::ZERO
    }

    fn orientation(&self) -> Orientation {
        Orientation::LeftToRight
    }

    /// Alignment factor of the container itself, used when placing the
    /// whole grid inside it.
    fn alignment_factor(&self, _axis: Axis) -> f64 {
        0.5
    }

    fn is_visible(&self) -> bool {
        true
    }

    fn child_count(&self) -> usize;

    /// Key of the child at `index` in host order.
    fn child_at(&self, index: usize) -> Option<Self::Key>;

    fn component(&self, key: &Self::Key) -> Option<&dyn Component>;

    fn component_mut(&mut self, key: &Self::Key) -> Option<&mut dyn Component>;
}
