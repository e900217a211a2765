//! Layout drivers for the Trellis grid layout engine.
//!
//! Two drivers are provided:
//!
//! - [`TableLayout`] places keyed items at grid positions given by
//!   constraints and negotiates row and column sizes from the items'
//!   minimum, preferred and maximum sizes and their weights.
//! - [`GridLayout`] arranges a container's children in equal cells, with
//!   the cell size optionally shared between containers through a
//!   [`GridGroup`].
//!
//! # Architecture
//!
//! A table layout runs in stages, each recomputed only when invalidated:
//!
//! 1. **Placement**: resolve relative positions into a cell table
//! 2. **Weights and gaps**: decide which strips grow and where gaps go
//! 3. **Strip sizes**: negotiate minimum, preferred and maximum sizes
//! 4. **Distribution**: share extra or missing space by weight
//! 5. **Alignment**: place each item inside its cell
//!
//! The [`headless`] module implements the component traits in memory.

mod config;
mod distribute;
mod engine;
mod grid;
mod group;
mod item;
mod sizes;
mod slack;
mod table;
mod weights;

pub mod headless;

pub use config::{GridConfig, TableConfig, DEFAULT_GAP};
pub use engine::{IntoConstraint, Placement, StripMetrics, TableLayout};
pub use grid::GridLayout;
pub use group::{CellMeasure, GridGroup, MemberId};
pub use item::ItemDefaults;
