//! Uniform grid layout: every cell the same size.

use std::rc::Rc;

use trellis_core::{
    AlignRequest, Alignment, Axis, Container, InvalidArgumentError, Orientation, PerAxis, Rect,
    Segment, Size,
};

use crate::config::GridConfig;
use crate::group::{CellMeasure, GridGroup, MemberId};
use crate::slack::saturate;

/// Lays out a container's children in rows and columns of equal cells.
///
/// Children fill the grid row by row in container order. Either the row or
/// the column count is fixed and the other follows from the child count;
/// when both are set the column count is ignored.
///
/// The cell size comes from the [`GridGroup`] the layout belongs to, so
/// grids sharing a group line up.
#[derive(Debug)]
pub struct GridLayout {
    rows: u32,
    columns: u32,
    group: Rc<GridGroup>,
    member: MemberId,
    config: GridConfig,
}

fn check_shape(rows: u32, columns: u32) -> Result<(), InvalidArgumentError> {
    if rows == 0 && columns == 0 {
        return Err(InvalidArgumentError::EmptyGrid);
    }
    if rows > 0 && columns > 0 {
        tracing::warn!(rows, columns, "grid has both row and column count set; column count is ignored");
    }
    Ok(())
}

/// Extent of `count` cells of `cell` pixels with gaps between them.
fn grid_extent(cell: i32, count: usize, gap: i32) -> i64 {
    let count = count as i64;
    count * i64::from(cell) + (count - 1).max(0) * i64::from(gap)
}

/// Sizes of `count` cells sharing `net` pixels.
fn cell_sizes(net: i32, count: usize, distribute_slack: bool, floor: Option<i32>) -> Vec<i32> {
    if count == 0 {
        return Vec::new();
    }
    if !distribute_slack {
        return vec![net / count as i32; count];
    }
    let mut remaining = f64::from(net);
    (0..count)
        .map(|index| {
            let mut cell = (remaining / (count - index) as f64).round() as i32;
            if let Some(floor) = floor {
                cell = cell.max(floor);
            }
            remaining -= f64::from(cell);
            cell
        })
        .collect()
}

impl GridLayout {
    /// A grid with its own private group.
    pub fn new(rows: u32, columns: u32) -> Result<Self, InvalidArgumentError> {
        Self::in_group(rows, columns, Rc::new(GridGroup::new()), MemberId(0))
    }

    /// A grid sharing `group` with other grids, registered as `member`.
    pub fn in_group(
        rows: u32,
        columns: u32,
        group: Rc<GridGroup>,
        member: MemberId,
    ) -> Result<Self, InvalidArgumentError> {
        check_shape(rows, columns)?;
        group.register(member)?;
        Ok(Self {
            rows,
            columns,
            group,
            member,
            config: GridConfig::default(),
        })
    }

    pub fn with_config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GridConfig) {
        self.config = config;
    }

    pub fn group(&self) -> &Rc<GridGroup> {
        &self.group
    }

    pub fn member(&self) -> MemberId {
        self.member
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn set_shape(&mut self, rows: u32, columns: u32) -> Result<(), InvalidArgumentError> {
        check_shape(rows, columns)?;
        self.rows = rows;
        self.columns = columns;
        Ok(())
    }

    /// Column and row count for `children` children.
    pub fn shape(&self, children: usize) -> PerAxis<usize> {
        let (rows, columns) = (self.rows as usize, self.columns as usize);
        let rows = if rows != 0 { rows } else { children.div_ceil(columns) };
        let columns = if columns != 0 && self.rows == 0 {
            columns
        } else {
            children.div_ceil(rows)
        };
        PerAxis::new(columns, rows)
    }

    /// Re-measure this member's children on the next query and tell the
    /// other members of the group.
    pub fn invalidate(&self) -> Result<(), InvalidArgumentError> {
        self.group.invalidate(self.member)
    }

    fn sync<C: Container + ?Sized>(&self, container: &C) -> Result<CellMeasure, InvalidArgumentError> {
        self.group.set_member_visible(self.member, container.is_visible())?;
        if self.group.needs_measure(self.member) {
            self.group.record_measure(self.member, CellMeasure::of(container))?;
        }
        Ok(self.group.shared_measure())
    }

    fn layout_size<C: Container + ?Sized>(
        &self,
        container: &C,
        cell: impl Fn(&CellMeasure) -> Size,
    ) -> Result<Size, InvalidArgumentError> {
        let cell = cell(&self.sync(container)?);
        let shape = self.shape(container.child_count());
        let insets = container.insets() + self.config.insets;
        let mut size = Size::ZERO;
        for axis in Axis::ALL {
            let extent = grid_extent(cell.get(axis), shape[axis], self.group.gap(axis))
                + i64::from(insets.total(axis));
            size.set(axis, saturate(extent));
        }
        Ok(size)
    }

    pub fn minimum_size<C: Container + ?Sized>(&self, container: &C) -> Result<Size, InvalidArgumentError> {
        self.layout_size(container, |measure| measure.minimum)
    }

    pub fn preferred_size<C: Container + ?Sized>(&self, container: &C) -> Result<Size, InvalidArgumentError> {
        self.layout_size(container, |measure| measure.preferred)
    }

    pub fn maximum_size<C: Container + ?Sized>(&self, container: &C) -> Result<Size, InvalidArgumentError> {
        self.layout_size(container, |measure| measure.maximum)
    }

    /// Cells along `axis`, placed inside the aligned grid.
    fn arrange_axis(
        &self,
        axis: Axis,
        available: Segment,
        measure: &CellMeasure,
        count: usize,
        factor: f64,
        orientation: Orientation,
    ) -> Vec<Segment> {
        let gap = self.group.gap(axis);
        let shrink = self.config.shrink_below_minimum;
        let alignment = self.config.grid_alignment[axis].resolve_auto(false);

        let mut minimum = grid_extent(measure.minimum.get(axis), count, gap);
        let preferred = grid_extent(measure.preferred.get(axis), count, gap);
        let mut maximum = grid_extent(measure.maximum.get(axis), count, gap);
        let available_size = i64::from(available.size);
        if shrink {
            minimum = minimum.min(available_size);
        }
        if alignment == Alignment::Fill {
            maximum = maximum.max(available_size);
        }
        let extent = available_size.max(minimum).min(maximum);

        let request = AlignRequest {
            cell: Segment::new(available.start, saturate(extent)),
            preferred: saturate(preferred),
            maximum: saturate(maximum),
            factor,
        };
        let grid = alignment.align(axis, request, orientation);

        let net = saturate(i64::from(grid.size) - (count as i64 - 1).max(0) * i64::from(gap));
        let floor = (!shrink).then(|| measure.minimum.get(axis));
        let sizes = cell_sizes(net, count, self.config.distribute_slack, floor);

        let mut start = grid.start;
        sizes
            .into_iter()
            .map(|size| {
                let cell = Segment::new(start, size);
                start = start.saturating_add(size).saturating_add(gap);
                cell
            })
            .collect()
    }

    /// Bounds of every child in container order. Nothing is written to the
    /// components.
    pub fn compute<C: Container + ?Sized>(
        &self,
        container: &C,
    ) -> Result<Vec<(C::Key, Rect)>, InvalidArgumentError> {
        let children = container.child_count();
        let measure = self.sync(container)?;
        if children == 0 {
            return Ok(Vec::new());
        }

        let shape = self.shape(children);
        let orientation = container.orientation();
        let inner = (container.insets() + self.config.insets).inner(container.size());
        let cells = PerAxis::from_fn(|axis| {
            self.arrange_axis(
                axis,
                inner.segment(axis),
                &measure,
                shape[axis],
                container.alignment_factor(axis),
                orientation,
            )
        });
        tracing::debug!(
            columns = shape.x,
            rows = shape.y,
            group = %self.group.name(),
            "grid arranged"
        );

        let mut placements = Vec::with_capacity(children);
        for index in 0..children {
            let Some(key) = container.child_at(index) else {
                continue;
            };
            let component = container
                .component(&key)
                .ok_or_else(|| InvalidArgumentError::MissingComponent {
                    key: format!("{key:?}"),
                })?;

            let row = index / shape.x;
            let column = index % shape.x;
            let slot = PerAxis::new(
                if orientation.is_left_to_right() {
                    column
                } else {
                    shape.x - column - 1
                },
                row,
            );

            let mut bounds = Rect::default();
            for axis in Axis::ALL {
                let Some(&cell) = cells[axis].get(slot[axis]) else {
                    continue;
                };
                let request = AlignRequest {
                    cell,
                    preferred: component.preferred_size().get(axis),
                    maximum: cell.size,
                    factor: component.alignment_factor(axis),
                };
                let alignment = self.config.component_alignment[axis].resolve_auto(component.is_resizable(axis));
                bounds.set_axis(axis, alignment.align(axis, request, orientation));
            }
            placements.push((key, bounds));
        }
        Ok(placements)
    }

    /// Compute bounds and hand them to the components.
    pub fn layout<C: Container + ?Sized>(&self, container: &mut C) -> Result<(), InvalidArgumentError> {
        let placements = self.compute(&*container)?;
        for (key, bounds) in placements {
            if let Some(component) = container.component_mut(&key) {
                component.set_bounds(bounds);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{Panel, Widget};
    use trellis_core::Insets;

    fn panel(children: usize, width: i32, height: i32) -> Panel<usize> {
        let mut panel = Panel::new(width, height);
        for index in 0..children {
            panel.push(index, Widget::resizable(Size::new(10, 10), Size::new(40, 20)));
        }
        panel
    }

    #[test]
    fn test_shape() {
        let one_row = GridLayout::new(1, 0).unwrap();
        assert_eq!(one_row.shape(5), PerAxis::new(5, 1));

        let three_columns = GridLayout::new(0, 3).unwrap();
        assert_eq!(three_columns.shape(7), PerAxis::new(3, 3));
        assert_eq!(three_columns.shape(0), PerAxis::new(3, 0));

        // Rows win when both are set.
        let both = GridLayout::new(2, 5).unwrap();
        assert_eq!(both.shape(7), PerAxis::new(4, 2));

        assert_eq!(GridLayout::new(0, 0).unwrap_err(), InvalidArgumentError::EmptyGrid);
    }

    #[test]
    fn test_cell_sizes() {
        assert_eq!(cell_sizes(100, 3, true, None), vec![33, 34, 33]);
        assert_eq!(cell_sizes(100, 3, false, None), vec![33, 33, 33]);
        assert_eq!(cell_sizes(10, 2, true, Some(8)), vec![8, 8]);
        assert!(cell_sizes(10, 0, true, None).is_empty());
    }

    #[test]
    fn test_layout_sizes() {
        let grid = GridLayout::new(0, 2).unwrap();
        let panel = panel(3, 0, 0).with_insets(Insets::uniform(1));

        // Two columns, two rows, gap 4.
        assert_eq!(grid.preferred_size(&panel).unwrap(), Size::new(86, 46));
        assert_eq!(grid.minimum_size(&panel).unwrap(), Size::new(26, 26));
    }

    #[test]
    fn test_fill_grid_spreads_cells() {
        let grid = GridLayout::new(1, 0)
            .unwrap()
            .with_config(GridConfig::default().with_grid_alignment(Alignment::Fill, Alignment::Fill));
        let mut panel = panel(3, 108, 30);
        grid.layout(&mut panel).unwrap();

        // 108 - 2 * 4 = 100 over three cells.
        assert_eq!(panel.bounds(&0), Some(Rect::new(0, 0, 33, 30)));
        assert_eq!(panel.bounds(&1), Some(Rect::new(37, 0, 34, 30)));
        assert_eq!(panel.bounds(&2), Some(Rect::new(75, 0, 33, 30)));
    }

    #[test]
    fn test_start_grid_keeps_preferred_size() {
        let grid = GridLayout::new(1, 0).unwrap();
        let mut panel = panel(2, 500, 100);
        grid.layout(&mut panel).unwrap();

        assert_eq!(panel.bounds(&0), Some(Rect::new(0, 0, 40, 20)));
        assert_eq!(panel.bounds(&1), Some(Rect::new(44, 0, 40, 20)));
    }

    #[test]
    fn test_right_to_left_fills_from_the_right() {
        let grid = GridLayout::new(1, 0).unwrap();
        let mut panel = panel(2, 84, 20).with_orientation(Orientation::RightToLeft);
        grid.layout(&mut panel).unwrap();

        assert_eq!(panel.bounds(&0), Some(Rect::new(44, 0, 40, 20)));
        assert_eq!(panel.bounds(&1), Some(Rect::new(0, 0, 40, 20)));
    }

    #[test]
    fn test_shared_group_uses_largest_child() {
        let group = Rc::new(GridGroup::with_gaps(0, 0).unwrap());
        let small = GridLayout::in_group(1, 0, Rc::clone(&group), MemberId(1)).unwrap();
        let large = GridLayout::in_group(1, 0, Rc::clone(&group), MemberId(2)).unwrap();

        let small_panel = Panel::new(0, 0).with_child("a", Widget::fixed(20, 10));
        let large_panel = Panel::new(0, 0).with_child("b", Widget::fixed(60, 30));
        large.preferred_size(&large_panel).unwrap();

        assert_eq!(small.preferred_size(&small_panel).unwrap(), Size::new(60, 30));
        assert_eq!(group.member_count(), 2);
        assert!(matches!(
            GridLayout::in_group(1, 0, group, MemberId(1)),
            Err(InvalidArgumentError::DuplicateMember { id: 1, .. })
        ));
    }

    #[test]
    fn test_empty_container() {
        let grid = GridLayout::new(1, 0).unwrap();
        let panel: Panel<usize> = Panel::new(100, 100);
        assert!(grid.compute(&panel).unwrap().is_empty());
        assert_eq!(grid.preferred_size(&panel).unwrap(), Size::ZERO);
    }
}
