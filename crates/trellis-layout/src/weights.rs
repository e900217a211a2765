//! Strip weights and gaps along one axis.

use indexmap::IndexMap;
use trellis_core::{Axis, Orientation};

use crate::item::Item;

/// How much a strip wants to grow, least restrictive first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub(crate) enum StripDesire {
    /// No item starts here; behaves as fixed.
    #[default]
    Unclaimed,
    /// A spanning item with positive weight starts here.
    PreferExpand,
    /// An item with weight 0 starts here.
    PreferFixed,
    /// A single-strip item with positive weight starts here.
    MustExpand,
}

impl StripDesire {
    pub fn is_expandable(self) -> bool {
        matches!(self, StripDesire::PreferExpand | StripDesire::MustExpand)
    }
}

/// Per-strip weights and gap flags of one axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct AxisWeights {
    pub desires: Vec<StripDesire>,
    pub weights: Vec<f64>,
    /// Whether a gap precedes the strip.
    pub has_gap: Vec<bool>,
    pub total_weight: f64,
    pub gap_total: i32,
}

/// Classify strips, place gaps and distribute item weights along `axis`.
///
/// Also records each item's weight total and included gap size.
pub(crate) fn resolve_weights<K>(
    items: &mut IndexMap<K, Item>,
    order: &[usize],
    axis: Axis,
    strip_count: usize,
    gap: i32,
    orientation: Orientation,
) -> AxisWeights {
    let mut desires = vec![StripDesire::Unclaimed; strip_count];
    let mut starts = vec![false; strip_count + 1];
    let mut ends = vec![false; strip_count + 1];

    for item in items.values() {
        let start = item.start(axis);
        let desire = if item.weight[axis] <= 0.0 {
            StripDesire::PreferFixed
        } else if item.is_spanning(axis) {
            StripDesire::PreferExpand
        } else {
            StripDesire::MustExpand
        };
        desires[start] = desires[start].max(desire);
        starts[start] = true;
        ends[item.end(axis)] = true;
    }

    // A gap goes before the first strip where an item starts after some
    // item has ended.
    let mut has_gap = vec![false; strip_count];
    let mut pending = false;
    for strip in 0..strip_count {
        pending |= ends[strip];
        if pending && starts[strip] {
            has_gap[strip] = true;
            pending = false;
        }
    }

    // Every weighted spanning item needs at least one expandable strip.
    for &index in order {
        let item = &items[index];
        if !item.is_spanning(axis) || item.weight[axis] <= 0.0 {
            continue;
        }
        let strips = item.strips(axis);
        if strips.clone().any(|strip| desires[strip].is_expandable()) {
            continue;
        }
        let trailing = if axis == Axis::Horizontal && !orientation.is_left_to_right() {
            strips.start
        } else {
            strips.end - 1
        };
        desires[trailing] = StripDesire::MustExpand;
    }

    let mut weights = vec![0.0; strip_count];
    for &index in order {
        let item = &mut items[index];
        let strips = item.strips(axis);

        item.included_gaps[axis] = strips
            .clone()
            .skip(1)
            .filter(|&strip| has_gap[strip])
            .count() as i32
            * gap;

        let expandable = strips.clone().filter(|&strip| desires[strip].is_expandable()).count();
        let weight = item.weight[axis];
        if weight > 0.0 && expandable > 0 {
            let share = weight / expandable as f64;
            for strip in strips.filter(|&strip| desires[strip].is_expandable()) {
                weights[strip] = f64::max(weights[strip], share);
            }
        }
    }

    let total_weight: f64 = weights.iter().sum();
    let gap_total = has_gap.iter().filter(|&&gapped| gapped).count() as i32 * gap;

    for &index in order {
        let item = &mut items[index];
        item.weight_total[axis] = item.strips(axis).map(|strip| weights[strip]).sum();
    }

    tracing::trace!(%axis, strips = strip_count, total_weight, gap_total, "weights resolved");

    AxisWeights {
        desires,
        weights,
        has_gap,
        total_weight,
        gap_total,
    }
}
