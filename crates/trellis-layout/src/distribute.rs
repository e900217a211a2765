//! Sharing extra (or missing) space between strips.

use crate::slack::Slack;

/// Strip sizes along one axis for a container that differs from the
/// preferred size by `extra` pixels (negative when smaller).
///
/// Weighted strips take a share of `extra` proportional to their weight.
/// A strip whose share would push it outside `[minimum, maximum]` is pinned
/// to that bound and leaves the pool; the amount it could not absorb is
/// handed to the remaining strips on the next pass.
pub(crate) fn distribute_extra(
    preferred: &[i32],
    minimum: &[i32],
    maximum: &[i32],
    weights: &[f64],
    total_weight: f64,
    extra: i64,
) -> Vec<i32> {
    let strip_count = preferred.len();
    let mut sizes = preferred.to_vec();
    if total_weight <= 0.0 {
        return sizes;
    }

    let mut done = vec![false; strip_count];
    let mut slack = Slack::default();
    let mut pass_extra = extra as f64;
    let mut pool_weight = total_weight;
    let mut unabsorbed = extra;

    for pass in 0.. {
        let mut pinned = false;
        let mut next_pool_weight = 0.0;

        for strip in 0..strip_count {
            if done[strip] {
                continue;
            }
            let weight = weights[strip];
            let base = sizes[strip];
            if weight == 0.0 {
                done[strip] = true;
                continue;
            }

            let proposed = slack.round(f64::from(base) + pass_extra * (weight / pool_weight));
            let size = if proposed < minimum[strip] {
                done[strip] = true;
                pinned = true;
                minimum[strip]
            } else if proposed > maximum[strip] {
                done[strip] = true;
                pinned = true;
                maximum[strip]
            } else {
                next_pool_weight += weight;
                proposed
            };
            unabsorbed -= i64::from(size) - i64::from(base);
            sizes[strip] = size;
        }

        tracing::trace!(pass, unabsorbed, pool_weight = next_pool_weight, "distributed extra space");
        if !pinned || next_pool_weight <= 0.0 {
            break;
        }
        pass_extra = unabsorbed as f64;
        pool_weight = next_pool_weight;
    }

    sizes
}

/// Scale minimum strip sizes down so they fit `available` pixels.
pub(crate) fn shrink_to_fit(minimum: &[i32], available: i64) -> Vec<i32> {
    let total: i64 = minimum.iter().map(|&size| i64::from(size)).sum();
    if total <= 0 || available >= total {
        return minimum.to_vec();
    }
    let scale = available.max(0) as f64 / total as f64;
    let mut slack = Slack::default();
    minimum
        .iter()
        .map(|&size| slack.round(f64::from(size) * scale).max(0))
        .collect()
}
