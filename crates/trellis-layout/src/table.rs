//! Placement table: which item occupies which cell.

use std::collections::HashMap;

use indexmap::IndexMap;
use trellis_core::{Axis, PerAxis};

use crate::item::Item;

/// Resolved grid placement of every item, built in insertion order.
#[derive(Debug, Clone, Default)]
pub(crate) struct PlacementTable {
    strip_counts: PerAxis<usize>,
    /// `(column, row)` to item index.
    cells: HashMap<(usize, usize), usize>,
    /// For each strip, the furthest end along the other axis of any item
    /// touching it.
    extents: PerAxis<Vec<usize>>,
    /// Item indices sorted by row, then column.
    row_major: Vec<usize>,
}

impl PlacementTable {
    /// Resolve relative positions and stamp every covered cell.
    ///
    /// Writes the resolved origin and span back into each item.
    pub fn build<K: std::fmt::Debug>(items: &mut IndexMap<K, Item>) -> Self {
        let mut table = PlacementTable::default();
        let mut last_origin = PerAxis::new(0u32, 0u32);
        let mut last_span = PerAxis::new(0u32, 0u32);

        for (index, (key, item)) in items.iter_mut().enumerate() {
            let origin = item.constraint.resolve_origin(last_origin, last_span);
            let span = PerAxis::from_fn(|axis| item.constraint.span(axis).cells());

            item.origin = origin.map(|_, v| v as usize);
            item.span = span.map(|_, v| v as usize);
            table.stamp(index, item, key);

            last_origin = origin;
            last_span = span;
        }

        for axis in Axis::ALL {
            table.strip_counts[axis] = items.values().map(|item| item.end(axis)).max().unwrap_or(0);
            let count = table.strip_counts[axis];
            table.extents[axis].resize(count, 0);
        }

        table.row_major = (0..items.len()).collect();
        table.row_major.sort_by_key(|&index| {
            let item = &items[index];
            (item.origin.y, item.origin.x)
        });

        tracing::debug!(
            items = items.len(),
            columns = table.strip_counts.x,
            rows = table.strip_counts.y,
            "placement table rebuilt"
        );
        table
    }

    fn stamp<K: std::fmt::Debug>(&mut self, index: usize, item: &Item, key: &K) {
        let mut overlapped = false;
        for y in item.strips(Axis::Vertical) {
            for x in item.strips(Axis::Horizontal) {
                if self.cells.insert((x, y), index).is_some() {
                    overlapped = true;
                }
            }
        }
        if overlapped {
            tracing::warn!(
                ?key,
                column = item.origin.x,
                row = item.origin.y,
                "item overlaps cells of an earlier item"
            );
        }

        for axis in Axis::ALL {
            let other_end = item.end(axis.other());
            let extents = &mut self.extents[axis];
            if extents.len() < item.end(axis) {
                extents.resize(item.end(axis), 0);
            }
            for strip in item.strips(axis) {
                extents[strip] = extents[strip].max(other_end);
            }
        }
    }

    pub fn strip_count(&self, axis: Axis) -> usize {
        self.strip_counts[axis]
    }

    pub fn strip_counts(&self) -> PerAxis<usize> {
        self.strip_counts
    }

    /// Index of the item covering cell `(x, y)`.
    pub fn item_at(&self, x: usize, y: usize) -> Option<usize> {
        self.cells.get(&(x, y)).copied()
    }

    /// How far along the other axis the items touching `strip` reach.
    pub fn extent(&self, axis: Axis, strip: usize) -> usize {
        self.extents[axis].get(strip).copied().unwrap_or(0)
    }

    pub fn row_major(&self) -> &[usize] {
        &self.row_major
    }
}
