//! Layout configuration.

use trellis_core::{Alignment, Axis, Insets, InvalidArgumentError, PerAxis};

/// Gap between strips when none is configured.
pub const DEFAULT_GAP: i32 = 4;

fn check_gaps(gaps: PerAxis<i32>) -> Result<(), InvalidArgumentError> {
    for axis in Axis::ALL {
        if gaps[axis] < 0 {
            return Err(InvalidArgumentError::NegativeGap {
                axis,
                value: gaps[axis],
            });
        }
    }
    Ok(())
}

fn named(axis: Axis, name: &str) -> Result<Alignment, InvalidArgumentError> {
    Alignment::from_name(axis, name).ok_or_else(|| InvalidArgumentError::UnknownAlignment {
        axis,
        name: name.to_string(),
        expected: Alignment::names(axis),
    })
}

/// Settings of a [`TableLayout`](crate::TableLayout).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableConfig {
    /// Space between neighbouring strips that both hold items.
    pub gaps: PerAxis<i32>,
    /// Extra insets around the table, added to the container's own.
    pub insets: Insets,
    /// Placement of the table once the container exceeds its maximum size.
    pub alignment: PerAxis<Alignment>,
    /// Report the minimum size as the preferred size.
    pub report_minimum_as_preferred: bool,
    /// Scale strips below their minimum when the container is too small.
    pub shrink_below_minimum: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            gaps: PerAxis::splat(DEFAULT_GAP),
            insets: Insets::ZERO,
            alignment: PerAxis::splat(Alignment::Start),
            report_minimum_as_preferred: false,
            shrink_below_minimum: false,
        }
    }
}

impl TableConfig {
    pub fn with_gaps(mut self, x: i32, y: i32) -> Result<Self, InvalidArgumentError> {
        let gaps = PerAxis::new(x, y);
        check_gaps(gaps)?;
        self.gaps = gaps;
        Ok(self)
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn with_alignment(mut self, x: Alignment, y: Alignment) -> Self {
        self.alignment = PerAxis::new(x, y);
        self
    }

    /// Table alignment by name, e.g. `("center", "top")`.
    pub fn with_alignment_names(self, x: &str, y: &str) -> Result<Self, InvalidArgumentError> {
        let x = named(Axis::Horizontal, x)?;
        let y = named(Axis::Vertical, y)?;
        Ok(self.with_alignment(x, y))
    }

    pub fn reporting_minimum_as_preferred(mut self, enabled: bool) -> Self {
        self.report_minimum_as_preferred = enabled;
        self
    }

    pub fn shrinking_below_minimum(mut self, enabled: bool) -> Self {
        self.shrink_below_minimum = enabled;
        self
    }

    /// Check values that may have been set directly on the fields.
    pub fn validate(&self) -> Result<(), InvalidArgumentError> {
        check_gaps(self.gaps)
    }
}

/// Settings of a [`GridLayout`](crate::GridLayout).
///
/// Gaps of a uniform grid belong to its [`GridGroup`](crate::GridGroup).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Placement of the whole grid inside the container.
    pub grid_alignment: PerAxis<Alignment>,
    /// Placement of each component inside its cell.
    pub component_alignment: PerAxis<Alignment>,
    pub insets: Insets,
    /// Spread rounding remainders over the cells instead of leaving them
    /// at the trailing edge.
    pub distribute_slack: bool,
    pub shrink_below_minimum: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_alignment: PerAxis::splat(Alignment::Start),
            component_alignment: PerAxis::splat(Alignment::Fill),
            insets: Insets::ZERO,
            distribute_slack: true,
            shrink_below_minimum: false,
        }
    }
}

impl GridConfig {
    pub fn with_grid_alignment(mut self, x: Alignment, y: Alignment) -> Self {
        self.grid_alignment = PerAxis::new(x, y);
        self
    }

    pub fn with_component_alignment(mut self, x: Alignment, y: Alignment) -> Self {
        self.component_alignment = PerAxis::new(x, y);
        self
    }

    pub fn with_grid_alignment_names(self, x: &str, y: &str) -> Result<Self, InvalidArgumentError> {
        let x = named(Axis::Horizontal, x)?;
        let y = named(Axis::Vertical, y)?;
        Ok(self.with_grid_alignment(x, y))
    }

    pub fn with_component_alignment_names(self, x: &str, y: &str) -> Result<Self, InvalidArgumentError> {
        let x = named(Axis::Horizontal, x)?;
        let y = named(Axis::Vertical, y)?;
        Ok(self.with_component_alignment(x, y))
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn distributing_slack(mut self, enabled: bool) -> Self {
        self.distribute_slack = enabled;
        self
    }

    pub fn shrinking_below_minimum(mut self, enabled: bool) -> Self {
        self.shrink_below_minimum = enabled;
        self
    }
}
