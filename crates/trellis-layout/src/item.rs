//! Items managed by a table layout.

use std::ops::Range;

use trellis_core::{Alignment, Axis, Component, Constraint, PerAxis, Weight};

/// Default alignment and weight for a kind of component.
///
/// Used wherever an item's constraint leaves the alignment or weight on
/// automatic. Anything still automatic afterwards is derived from whether
/// the component is resizable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefaults {
    pub alignment: PerAxis<Alignment>,
    pub weight: PerAxis<Weight>,
}

impl ItemDefaults {
    fn preset(x: Alignment, y: Alignment, x_weight: f64, y_weight: f64) -> Self {
        let weight = |value| Weight::new(value).unwrap_or(Weight::AUTO);
        Self {
            alignment: PerAxis::new(x, y),
            weight: PerAxis::new(weight(x_weight), weight(y_weight)),
        }
    }

    /// Text labels: leading edge, vertically centered, never stretched.
    pub fn label() -> Self {
        Self::preset(Alignment::Start, Alignment::Center, 0.0, 0.0)
    }

    /// Push buttons, check boxes and similar: same as labels.
    pub fn button() -> Self {
        Self::preset(Alignment::Start, Alignment::Center, 0.0, 0.0)
    }

    /// Text fields and combo boxes: stretch horizontally.
    pub fn text_field() -> Self {
        Self::preset(Alignment::Fill, Alignment::Center, 1.0, 0.0)
    }
}

/// Cached state of one item.
#[derive(Debug, Clone)]
pub(crate) struct Item {
    pub constraint: Constraint,
    pub defaults: ItemDefaults,
    /// Whether the intrinsic sizes below have been read at least once.
    pub refreshed: bool,
    pub origin: PerAxis<usize>,
    pub span: PerAxis<usize>,
    pub alignment: PerAxis<Alignment>,
    pub weight: PerAxis<f64>,
    pub minimum: PerAxis<i32>,
    pub preferred: PerAxis<i32>,
    pub maximum: PerAxis<i32>,
    /// Sum of the strip weights over the item's span.
    pub weight_total: PerAxis<f64>,
    /// Interior gaps folded into the item's cell.
    pub included_gaps: PerAxis<i32>,
}

impl Item {
    pub fn new(constraint: Constraint, defaults: ItemDefaults) -> Self {
        Self {
            constraint,
            defaults,
            refreshed: false,
            origin: PerAxis::splat(0),
            span: PerAxis::splat(1),
            alignment: PerAxis::splat(Alignment::Align),
            weight: PerAxis::splat(0.0),
            minimum: PerAxis::splat(0),
            preferred: PerAxis::splat(0),
            maximum: PerAxis::splat(0),
            weight_total: PerAxis::splat(0.0),
            included_gaps: PerAxis::splat(0),
        }
    }

    /// Re-read intrinsic sizes and resolve automatic alignment and weight.
    pub fn refresh(&mut self, component: &dyn Component) {
        let minimum = component.minimum_size();
        let preferred = component.preferred_size();
        let maximum = component.maximum_size();

        for axis in Axis::ALL {
            let resizable = component.is_resizable(axis);

            let mut alignment = self.constraint.alignment(axis);
            if alignment == Alignment::Auto {
                alignment = self.defaults.alignment[axis];
            }

            let weight = self
                .constraint
                .weight(axis)
                .value()
                .or_else(|| self.defaults.weight[axis].value())
                .unwrap_or(if resizable { 1.0 } else { 0.0 });

            self.alignment[axis] = alignment.resolve_auto(resizable);
            self.weight[axis] = weight;
            self.minimum[axis] = minimum.get(axis);
            self.preferred[axis] = preferred.get(axis);
            self.maximum[axis] = maximum.get(axis);
        }
        self.refreshed = true;
    }

    pub fn start(&self, axis: Axis) -> usize {
        self.origin[axis]
    }

    /// One past the last strip covered.
    pub fn end(&self, axis: Axis) -> usize {
        self.origin[axis] + self.span[axis]
    }

    pub fn strips(&self, axis: Axis) -> Range<usize> {
        self.start(axis)..self.end(axis)
    }

    pub fn is_spanning(&self, axis: Axis) -> bool {
        self.span[axis] > 1
    }
}
