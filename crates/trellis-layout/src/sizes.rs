//! Minimum, preferred and maximum strip sizes along one axis.

use indexmap::IndexMap;
use trellis_core::{Alignment, Axis};

use crate::item::Item;
use crate::slack::Slack;
use crate::weights::AxisWeights;

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct AxisSizes {
    pub minimum: Vec<i32>,
    pub preferred: Vec<i32>,
    pub maximum: Vec<i32>,
    pub minimum_total: i64,
    pub preferred_total: i64,
    pub maximum_total: i64,
}

/// Negotiate strip sizes from the items' intrinsic sizes.
///
/// Weight-0 items are placed first and fix the size of the strips they
/// cover. Weighted items then spread whatever they need beyond those fixed
/// strips over their weighted strips, in proportion to strip weight.
pub(crate) fn resolve_sizes<K>(
    items: &IndexMap<K, Item>,
    order: &[usize],
    axis: Axis,
    weights: &AxisWeights,
    gap: i32,
) -> AxisSizes {
    let strip_count = weights.weights.len();
    let mut minimum = vec![0; strip_count];
    let mut preferred = vec![0; strip_count];
    let mut maximum: Vec<Option<i32>> = vec![None; strip_count];

    for &index in order {
        let item = &items[index];
        if item.weight[axis] != 0.0 {
            continue;
        }
        let share = f64::from(item.preferred[axis]) / item.span[axis] as f64;
        let mut slack = Slack::default();
        for strip in item.strips(axis) {
            let size = preferred[strip].max(slack.round(share));
            minimum[strip] = size;
            preferred[strip] = size;
        }
    }

    for &index in order {
        let item = &items[index];
        if item.weight[axis] <= 0.0 {
            continue;
        }
        let strips = item.strips(axis);

        let fixed: i64 = strips
            .clone()
            .map(|strip| {
                let mut size = 0;
                if weights.weights[strip] == 0.0 {
                    size += i64::from(preferred[strip]);
                }
                if strip > strips.start && weights.has_gap[strip] {
                    size += i64::from(gap);
                }
                size
            })
            .sum();
        let remaining = |size: i32| (i64::from(size) - fixed).max(0) as f64;
        let item_minimum = remaining(item.minimum[axis]);
        let item_preferred = remaining(item.preferred[axis]);
        let item_maximum = remaining(item.maximum[axis]);

        let total = item.weight_total[axis];
        let fills = item.alignment[axis] == Alignment::Fill;
        let (mut min_slack, mut pref_slack, mut max_slack) =
            (Slack::default(), Slack::default(), Slack::default());

        for strip in strips {
            let strip_weight = weights.weights[strip];
            if total != 0.0 && strip_weight <= 0.0 {
                continue;
            }
            let factor = if total == 0.0 {
                1.0 / item.span[axis] as f64
            } else {
                strip_weight / total
            };

            minimum[strip] = minimum[strip].max(min_slack.round(item_minimum * factor));
            preferred[strip] = preferred[strip].max(pref_slack.round(item_preferred * factor));
            let proposed = max_slack.round(item_maximum * factor);
            if fills {
                let current = maximum[strip].unwrap_or(i32::MAX);
                maximum[strip] = Some(minimum[strip].max(current.min(proposed)));
            }
        }
    }

    let mut sizes = AxisSizes::default();
    for strip in 0..strip_count {
        let min = minimum[strip];
        let pref = preferred[strip].max(min);
        let max = maximum[strip].unwrap_or(pref).max(pref);

        sizes.minimum_total += i64::from(min);
        sizes.preferred_total += i64::from(pref);
        sizes.maximum_total += i64::from(max);
        sizes.minimum.push(min);
        sizes.preferred.push(pref);
        sizes.maximum.push(max);
    }

    tracing::trace!(
        %axis,
        minimum = sizes.minimum_total,
        preferred = sizes.preferred_total,
        maximum = sizes.maximum_total,
        "strip sizes resolved"
    );
    sizes
}
