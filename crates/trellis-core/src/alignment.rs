//! Per-axis alignment of a box inside a cell.
//!
//! The same rule places every item inside its resolved cell and the whole
//! grid inside its container. An alignment decides two things: whether the
//! box wants its preferred or its maximum extent, and where the leftover
//! space goes (the alignment factor, 0 = leading edge, 1 = trailing edge).

use crate::axis::Axis;
use crate::geometry::{Orientation, Segment};

/// Alignment variants shared by both axes.
///
/// `Near` and `Far` are spelled `left`/`right` on the horizontal axis and
/// `top`/`bottom` on the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Alignment {
    /// Leading edge in reading direction.
    Start,
    /// Trailing edge in reading direction.
    End,
    /// Left or top, regardless of reading direction.
    Near,
    Center,
    /// Right or bottom, regardless of reading direction.
    Far,
    /// Grow to the cell, bounded by the maximum extent.
    Fill,
    /// Preferred extent, positioned by the component's own alignment factor.
    Align,
    /// `Fill` for resizable components, `Align` otherwise.
    #[default]
    Auto,
}

const X_NAMES: [(&str, Alignment); 8] = [
    ("start", Alignment::Start),
    ("end", Alignment::End),
    ("left", Alignment::Near),
    ("center", Alignment::Center),
    ("right", Alignment::Far),
    ("fill", Alignment::Fill),
    ("align", Alignment::Align),
    ("auto", Alignment::Auto),
];

const Y_NAMES: [(&str, Alignment); 8] = [
    ("start", Alignment::Start),
    ("end", Alignment::End),
    ("top", Alignment::Near),
    ("center", Alignment::Center),
    ("bottom", Alignment::Far),
    ("fill", Alignment::Fill),
    ("align", Alignment::Align),
    ("auto", Alignment::Auto),
];

fn table(axis: Axis) -> &'static [(&'static str, Alignment); 8] {
    match axis {
        Axis::Horizontal => &X_NAMES,
        Axis::Vertical => &Y_NAMES,
    }
}

/// Inputs of a single [`Alignment::align`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignRequest {
    /// Cell the box is placed in.
    pub cell: Segment,
    pub preferred: i32,
    pub maximum: i32,
    /// The box's own alignment factor in `[0, 1]`.
    pub factor: f64,
}

impl Alignment {
    /// Look up an alignment by its name on `axis` (case-sensitive).
    pub fn from_name(axis: Axis, name: &str) -> Option<Alignment> {
        table(axis)
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, alignment)| *alignment)
    }

    /// The name of this alignment on `axis`.
    pub fn name(self, axis: Axis) -> &'static str {
        table(axis)
            .iter()
            .find(|(_, alignment)| *alignment == self)
            .map(|(name, _)| *name)
            .unwrap_or("auto")
    }

    /// All names accepted on `axis`, comma separated.
    pub fn names(axis: Axis) -> String {
        table(axis)
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Replace `Auto` by the concrete variant for a component.
    pub fn resolve_auto(self, resizable: bool) -> Alignment {
        match self {
            Alignment::Auto if resizable => Alignment::Fill,
            Alignment::Auto => Alignment::Align,
            other => other,
        }
    }

    fn uses_preferred_size(self) -> bool {
        self != Alignment::Fill
    }

    fn follows_orientation(self) -> bool {
        matches!(
            self,
            Alignment::Start | Alignment::End | Alignment::Align | Alignment::Auto
        )
    }

    fn fixed_factor(self) -> Option<f64> {
        match self {
            Alignment::Start | Alignment::Near => Some(0.0),
            Alignment::Center => Some(0.5),
            Alignment::End | Alignment::Far => Some(1.0),
            Alignment::Fill | Alignment::Align | Alignment::Auto => None,
        }
    }

    /// Place a box inside `request.cell` along `axis`.
    ///
    /// A box that wants at least the cell's extent gets exactly the cell.
    pub fn align(self, axis: Axis, request: AlignRequest, orientation: Orientation) -> Segment {
        let cell = request.cell;
        let desired = if self.uses_preferred_size() {
            request.preferred
        } else {
            request.maximum
        };

        if desired >= cell.size {
            return cell;
        }

        let mut factor = self
            .fixed_factor()
            .unwrap_or_else(|| request.factor.clamp(0.0, 1.0));
        if self.follows_orientation()
            && axis == Axis::Horizontal
            && !orientation.is_left_to_right()
        {
            factor = 1.0 - factor;
        }

        let space = cell.size - desired;
        Segment::new(cell.start + (factor * f64::from(space)) as i32, desired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(start: i32, size: i32, preferred: i32, maximum: i32, factor: f64) -> AlignRequest {
        AlignRequest {
            cell: Segment::new(start, size),
            preferred,
            maximum,
            factor,
        }
    }

    #[test]
    fn test_names_are_per_axis() {
        assert_eq!(Alignment::from_name(Axis::Horizontal, "left"), Some(Alignment::Near));
        assert_eq!(Alignment::from_name(Axis::Vertical, "left"), None);
        assert_eq!(Alignment::from_name(Axis::Vertical, "bottom"), Some(Alignment::Far));
        assert_eq!(Alignment::Far.name(Axis::Horizontal), "right");
        assert_eq!(Alignment::Far.name(Axis::Vertical), "bottom");
        assert!(Alignment::names(Axis::Vertical).contains("top"));
    }

    #[test]
    fn test_fixed_factors() {
        let ltr = Orientation::LeftToRight;
        let r = request(10, 100, 40, 1000, 0.5);
        assert_eq!(Alignment::Start.align(Axis::Horizontal, r, ltr), Segment::new(10, 40));
        assert_eq!(Alignment::Center.align(Axis::Horizontal, r, ltr), Segment::new(40, 40));
        assert_eq!(Alignment::End.align(Axis::Horizontal, r, ltr), Segment::new(70, 40));
        assert_eq!(Alignment::Far.align(Axis::Vertical, r, ltr), Segment::new(70, 40));
    }

    #[test]
    fn test_fill_uses_maximum_and_component_factor() {
        let ltr = Orientation::LeftToRight;
        let bounded = request(0, 100, 40, 60, 1.0);
        assert_eq!(Alignment::Fill.align(Axis::Horizontal, bounded, ltr), Segment::new(40, 60));

        let unbounded = request(0, 100, 40, i32::MAX, 0.0);
        assert_eq!(Alignment::Fill.align(Axis::Horizontal, unbounded, ltr), Segment::new(0, 100));
    }

    #[test]
    fn test_right_to_left_flips_start_but_not_near() {
        let rtl = Orientation::RightToLeft;
        let r = request(0, 100, 40, 40, 0.0);
        assert_eq!(Alignment::Start.align(Axis::Horizontal, r, rtl), Segment::new(60, 40));
        assert_eq!(Alignment::Near.align(Axis::Horizontal, r, rtl), Segment::new(0, 40));
        // Vertical axis is unaffected by reading direction.
        assert_eq!(Alignment::Start.align(Axis::Vertical, r, rtl), Segment::new(0, 40));
        assert_eq!(Alignment::Align.align(Axis::Horizontal, r, rtl), Segment::new(60, 40));
    }

    #[test]
    fn test_oversized_box_takes_cell() {
        let r = request(5, 30, 50, 50, 0.5);
        assert_eq!(
            Alignment::Center.align(Axis::Horizontal, r, Orientation::LeftToRight),
            Segment::new(5, 30)
        );
    }

    #[test]
    fn test_resolve_auto() {
        assert_eq!(Alignment::Auto.resolve_auto(true), Alignment::Fill);
        assert_eq!(Alignment::Auto.resolve_auto(false), Alignment::Align);
        assert_eq!(Alignment::Center.resolve_auto(true), Alignment::Center);
    }
}
