//! Table layout: items at grid positions, strips sized by negotiation.
//!
//! # Example
//!
//! ```
//! use trellis_core::{Rect, Size};
//! use trellis_layout::headless::{Panel, Widget};
//! use trellis_layout::TableLayout;
//!
//! let mut panel = Panel::new(200, 20)
//!     .with_child("label", Widget::fixed(50, 20))
//!     .with_child("field", Widget::resizable(Size::new(30, 20), Size::new(60, 20)));
//!
//! let mut layout = TableLayout::new();
//! layout.add_item("label", "0 0").unwrap();
//! layout.add_item("field", "+ . 1 1 fill top 1 0").unwrap();
//! layout.layout(&mut panel).unwrap();
//!
//! assert_eq!(panel.bounds(&"field"), Some(Rect::new(54, 0, 146, 20)));
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use trellis_core::{
    AlignRequest, Axis, Constraint, ConstraintSyntaxError, Container, InvalidArgumentError,
    Orientation, PerAxis, Rect, Segment, Size,
};
use trellis_parser::parse_constraint;

use crate::config::TableConfig;
use crate::distribute::{distribute_extra, shrink_to_fit};
use crate::item::{Item, ItemDefaults};
use crate::sizes::{resolve_sizes, AxisSizes};
use crate::slack::saturate;
use crate::table::PlacementTable;
use crate::weights::{resolve_weights, AxisWeights};

/// Anything [`TableLayout::add_item`] accepts as a constraint.
pub trait IntoConstraint {
    fn into_constraint(self) -> Result<Constraint, ConstraintSyntaxError>;
}

impl IntoConstraint for Constraint {
    fn into_constraint(self) -> Result<Constraint, ConstraintSyntaxError> {
        Ok(self)
    }
}

impl IntoConstraint for &Constraint {
    fn into_constraint(self) -> Result<Constraint, ConstraintSyntaxError> {
        Ok(*self)
    }
}

impl IntoConstraint for &str {
    fn into_constraint(self) -> Result<Constraint, ConstraintSyntaxError> {
        parse_constraint(self)
    }
}

impl IntoConstraint for String {
    fn into_constraint(self) -> Result<Constraint, ConstraintSyntaxError> {
        parse_constraint(&self)
    }
}

impl IntoConstraint for &String {
    fn into_constraint(self) -> Result<Constraint, ConstraintSyntaxError> {
        parse_constraint(self)
    }
}

/// Resolved cell range of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub origin: PerAxis<usize>,
    pub span: PerAxis<usize>,
}

/// Negotiated strips along one axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StripMetrics {
    pub minimum: Vec<i32>,
    pub preferred: Vec<i32>,
    pub maximum: Vec<i32>,
    pub weights: Vec<f64>,
    /// Whether a gap precedes each strip.
    pub has_gap: Vec<bool>,
    pub gap_total: i32,
    pub total_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Regime {
    Minimum,
    Distributed,
    Maximum,
}

fn missing<K: Debug>(key: &K) -> InvalidArgumentError {
    InvalidArgumentError::MissingComponent {
        key: format!("{key:?}"),
    }
}

/// Offset of each strip from the table's leading edge.
fn strip_offsets(sizes: &[i32], has_gap: &[bool], gap: i32) -> Vec<i32> {
    let mut offsets = Vec::with_capacity(sizes.len());
    let mut offset = 0i32;
    for (strip, &size) in sizes.iter().enumerate() {
        if strip > 0 && has_gap[strip] {
            offset = offset.saturating_add(gap);
        }
        offsets.push(offset);
        offset = offset.saturating_add(size);
    }
    offsets
}

/// Lays out keyed items of a container on a grid of rows and columns.
///
/// Strip sizes are recomputed lazily: adding or removing items, changing
/// the configuration or calling [`invalidate`](Self::invalidate) marks the
/// layout dirty and the next query brings it up to date.
#[derive(Debug, Clone)]
pub struct TableLayout<K> {
    config: TableConfig,
    items: IndexMap<K, Item>,
    table: Option<PlacementTable>,
    weights: PerAxis<AxisWeights>,
    sizes: PerAxis<AxisSizes>,
    orientation: Orientation,
    dirty_weights_and_gaps: bool,
    dirty_strip_sizes: bool,
    dirty_intrinsic_sizes: bool,
}

impl<K: Clone + Eq + Hash + Debug> Default for TableLayout<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash + Debug> TableLayout<K> {
    pub fn new() -> Self {
        Self {
            config: TableConfig::default(),
            items: IndexMap::new(),
            table: None,
            weights: PerAxis::default(),
            sizes: PerAxis::default(),
            orientation: Orientation::LeftToRight,
            dirty_weights_and_gaps: true,
            dirty_strip_sizes: true,
            dirty_intrinsic_sizes: true,
        }
    }

    pub fn with_config(config: TableConfig) -> Result<Self, InvalidArgumentError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TableConfig) -> Result<(), InvalidArgumentError> {
        config.validate()?;
        self.config = config;
        self.dirty_weights_and_gaps = true;
        self.dirty_strip_sizes = true;
        Ok(())
    }

    /// Manage `key` at the cell described by `constraint`.
    ///
    /// Text is parsed before anything changes, so a syntax error leaves the
    /// layout as it was. Adding a key again replaces its constraint and moves
    /// it after all other items.
    pub fn add_item(
        &mut self,
        key: K,
        constraint: impl IntoConstraint,
    ) -> Result<(), ConstraintSyntaxError> {
        self.add_item_with_defaults(key, constraint, ItemDefaults::default())
    }

    /// Like [`add_item`](Self::add_item), with defaults for whatever the
    /// constraint leaves automatic.
    pub fn add_item_with_defaults(
        &mut self,
        key: K,
        constraint: impl IntoConstraint,
        defaults: ItemDefaults,
    ) -> Result<(), ConstraintSyntaxError> {
        let constraint = constraint.into_constraint()?;
        self.items.shift_remove(&key);
        self.items.insert(key, Item::new(constraint, defaults));
        self.structure_changed();
        Ok(())
    }

    /// Stop managing `key`. The component itself is not touched.
    pub fn remove_item(&mut self, key: &K) -> Result<(), InvalidArgumentError> {
        if self.items.shift_remove(key).is_none() {
            return Err(InvalidArgumentError::UnknownComponent {
                key: format!("{key:?}"),
            });
        }
        self.structure_changed();
        Ok(())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.items.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Managed keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.items.keys()
    }

    /// Forget cached intrinsic sizes; they are re-read on the next query.
    pub fn invalidate(&mut self) {
        self.dirty_weights_and_gaps = true;
        self.dirty_strip_sizes = true;
        self.dirty_intrinsic_sizes = true;
    }

    fn structure_changed(&mut self) {
        self.table = None;
        self.dirty_weights_and_gaps = true;
        self.dirty_strip_sizes = true;
    }

    fn table(&mut self) -> &PlacementTable {
        let items = &mut self.items;
        self.table.get_or_insert_with(|| PlacementTable::build(items))
    }

    fn ensure_clean<C: Container<Key = K>>(
        &mut self,
        container: &C,
    ) -> Result<(), InvalidArgumentError> {
        let orientation = container.orientation();
        if orientation != self.orientation {
            self.orientation = orientation;
            self.dirty_weights_and_gaps = true;
        }

        let refresh_all = self.dirty_intrinsic_sizes;
        if refresh_all || self.items.values().any(|item| !item.refreshed) {
            if let Some(key) = self.items.keys().find(|key| container.component(key).is_none()) {
                return Err(missing(key));
            }
            for (key, item) in self.items.iter_mut() {
                if !refresh_all && item.refreshed {
                    continue;
                }
                if let Some(component) = container.component(key) {
                    item.refresh(component);
                }
            }
            self.dirty_intrinsic_sizes = false;
            self.dirty_weights_and_gaps = true;
        }

        if !self.dirty_weights_and_gaps && !self.dirty_strip_sizes {
            return Ok(());
        }

        if self.table.is_none() {
            self.table = Some(PlacementTable::build(&mut self.items));
        }
        let Some(table) = self.table.as_ref() else {
            return Ok(());
        };
        let items = &mut self.items;
        let order = table.row_major();

        for axis in Axis::ALL {
            let gap = self.config.gaps[axis];
            if self.dirty_weights_and_gaps {
                self.weights[axis] = resolve_weights(
                    items,
                    order,
                    axis,
                    table.strip_count(axis),
                    gap,
                    self.orientation,
                );
            }
            self.sizes[axis] = resolve_sizes(items, order, axis, &self.weights[axis], gap);

            let sizes = &self.sizes[axis];
            tracing::debug!(
                %axis,
                strips = table.strip_count(axis),
                minimum = sizes.minimum_total,
                preferred = sizes.preferred_total,
                maximum = sizes.maximum_total,
                gap_total = self.weights[axis].gap_total,
                "table sizes recomputed"
            );
        }

        self.dirty_weights_and_gaps = false;
        self.dirty_strip_sizes = false;
        Ok(())
    }

    fn layout_size<C: Container<Key = K>>(
        &self,
        container: &C,
        total: impl Fn(&AxisSizes) -> i64,
    ) -> Size {
        let insets = container.insets() + self.config.insets;
        let mut size = Size::ZERO;
        for axis in Axis::ALL {
            let extent = total(&self.sizes[axis])
                + i64::from(self.weights[axis].gap_total)
                + i64::from(insets.total(axis));
            size.set(axis, saturate(extent));
        }
        size
    }

    pub fn minimum_size<C: Container<Key = K>>(
        &mut self,
        container: &C,
    ) -> Result<Size, InvalidArgumentError> {
        self.ensure_clean(container)?;
        Ok(self.layout_size(container, |sizes| sizes.minimum_total))
    }

    pub fn preferred_size<C: Container<Key = K>>(
        &mut self,
        container: &C,
    ) -> Result<Size, InvalidArgumentError> {
        if self.config.report_minimum_as_preferred {
            return self.minimum_size(container);
        }
        self.ensure_clean(container)?;
        Ok(self.layout_size(container, |sizes| sizes.preferred_total))
    }

    pub fn maximum_size<C: Container<Key = K>>(
        &mut self,
        container: &C,
    ) -> Result<Size, InvalidArgumentError> {
        self.ensure_clean(container)?;
        Ok(self.layout_size(container, |sizes| sizes.maximum_total))
    }

    /// Strip sizes along `axis` for a container offering `available` pixels,
    /// and the segment the table occupies.
    fn arrange_axis(&self, axis: Axis, available: Segment, factor: f64) -> (Vec<i32>, Segment) {
        let sizes = &self.sizes[axis];
        let weights = &self.weights[axis];
        let gap_total = i64::from(weights.gap_total);
        let space = i64::from(available.size);

        let (regime, strips, segment) = if space <= sizes.minimum_total + gap_total {
            let strips = if self.config.shrink_below_minimum {
                shrink_to_fit(&sizes.minimum, space - gap_total)
            } else {
                sizes.minimum.clone()
            };
            (Regime::Minimum, strips, available)
        } else if space >= sizes.maximum_total + gap_total {
            let request = AlignRequest {
                cell: available,
                preferred: saturate(sizes.maximum_total + gap_total),
                maximum: available.size,
                factor,
            };
            let segment = self.config.alignment[axis]
                .resolve_auto(false)
                .align(axis, request, self.orientation);
            (Regime::Maximum, sizes.maximum.clone(), segment)
        } else {
            let strips = distribute_extra(
                &sizes.preferred,
                &sizes.minimum,
                &sizes.maximum,
                &weights.weights,
                weights.total_weight,
                space - sizes.preferred_total - gap_total,
            );
            (Regime::Distributed, strips, available)
        };

        tracing::debug!(%axis, ?regime, available = available.size, "strip sizes chosen");
        (strips, segment)
    }

    fn arrange<C: Container<Key = K>>(&self, container: &C) -> PerAxis<(Vec<i32>, Segment)> {
        let inner = (container.insets() + self.config.insets).inner(container.size());
        PerAxis::from_fn(|axis| {
            self.arrange_axis(axis, inner.segment(axis), container.alignment_factor(axis))
        })
    }

    /// Bounds of every item for the container's current size, in row-major
    /// order. Nothing is written to the components.
    pub fn compute<C: Container<Key = K>>(
        &mut self,
        container: &C,
    ) -> Result<Vec<(K, Rect)>, InvalidArgumentError> {
        self.ensure_clean(container)?;
        let Some(table) = self.table.as_ref() else {
            return Ok(Vec::new());
        };

        let arranged = self.arrange(container);
        let offsets = PerAxis::from_fn(|axis| {
            strip_offsets(
                &arranged[axis].0,
                &self.weights[axis].has_gap,
                self.config.gaps[axis],
            )
        });
        let mirrored = !self.orientation.is_left_to_right();

        let mut placements = Vec::with_capacity(self.items.len());
        for &index in table.row_major() {
            let Some((key, item)) = self.items.get_index(index) else {
                continue;
            };
            let component = container.component(key).ok_or_else(|| missing(key))?;

            let mut bounds = Rect::default();
            for axis in Axis::ALL {
                let (strips, segment) = &arranged[axis];
                let size = saturate(
                    item.strips(axis).map(|strip| i64::from(strips[strip])).sum::<i64>()
                        + i64::from(item.included_gaps[axis]),
                );
                let offset = offsets[axis][item.start(axis)];
                let start = if axis == Axis::Horizontal && mirrored {
                    segment.end() - offset - size
                } else {
                    segment.start + offset
                };

                let request = AlignRequest {
                    cell: Segment::new(start, size),
                    preferred: item.preferred[axis],
                    maximum: item.maximum[axis],
                    factor: component.alignment_factor(axis),
                };
                bounds.set_axis(axis, item.alignment[axis].align(axis, request, self.orientation));
            }
            placements.push((key.clone(), bounds));
        }
        Ok(placements)
    }

    /// Compute bounds and hand them to the components.
    pub fn layout<C: Container<Key = K>>(
        &mut self,
        container: &mut C,
    ) -> Result<(), InvalidArgumentError> {
        let placements = self.compute(&*container)?;
        for (key, bounds) in placements {
            let component = container.component_mut(&key).ok_or_else(|| missing(&key))?;
            component.set_bounds(bounds);
        }
        Ok(())
    }

    /// Strip sizes that [`layout`](Self::layout) would use right now.
    pub fn resolved_strips<C: Container<Key = K>>(
        &mut self,
        container: &C,
    ) -> Result<PerAxis<Vec<i32>>, InvalidArgumentError> {
        self.ensure_clean(container)?;
        Ok(self.arrange(container).map(|_, (strips, _)| strips))
    }

    pub fn strips<C: Container<Key = K>>(
        &mut self,
        container: &C,
        axis: Axis,
    ) -> Result<StripMetrics, InvalidArgumentError> {
        self.ensure_clean(container)?;
        let sizes = &self.sizes[axis];
        let weights = &self.weights[axis];
        Ok(StripMetrics {
            minimum: sizes.minimum.clone(),
            preferred: sizes.preferred.clone(),
            maximum: sizes.maximum.clone(),
            weights: weights.weights.clone(),
            has_gap: weights.has_gap.clone(),
            gap_total: weights.gap_total,
            total_weight: weights.total_weight,
        })
    }

    pub fn strip_count(&mut self, axis: Axis) -> usize {
        self.table().strip_count(axis)
    }

    /// Key of the item covering cell `(column, row)`.
    pub fn item_at(&mut self, column: usize, row: usize) -> Option<&K> {
        let index = self.table().item_at(column, row)?;
        self.items.get_index(index).map(|(key, _)| key)
    }

    pub fn placement(&mut self, key: &K) -> Option<Placement> {
        self.table();
        self.items.get(key).map(|item| Placement {
            origin: item.origin,
            span: item.span,
        })
    }
}
