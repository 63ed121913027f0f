//! Core types for weighted risk grids.
//!
//! This crate provides the data model shared by the *riskgrid* workspace:
//! the [`Point`] coordinate primitive, the immutable flat-storage
//! [`CostGrid`] of per-cell entry costs, and [`tiling::expand`], which
//! replicates a base grid with wrapping cost increments.
//!
//! Grids are validated once at construction and read-only afterwards, so
//! every later operation can rely on a well-formed rectangle.

pub mod geom;
pub mod grid;
pub mod tiling;

pub use geom::Point;
pub use grid::{CostGrid, GridError};
pub use tiling::expand;
