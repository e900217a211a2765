//! Core types and traits for the Trellis grid layout engine.
//!
//! This crate provides the foundational types used across the other trellis crates:
//! - Axis selector and per-axis pairs
//! - Integer geometry (sizes, rectangles, insets, reading direction)
//! - Alignment rule shared by cells and grids
//! - Item placement constraints
//! - Component/container capability traits
//! - Error types

pub mod alignment;
pub mod axis;
pub mod component;
pub mod constraint;
pub mod errors;
pub mod geometry;

pub use alignment::*;
pub use axis::*;
pub use component::*;
pub use constraint::*;
pub use errors::*;
pub use geometry::*;
