//! Dijkstra and breadth-first searches over weighted grids.
//!
//! This crate provides the search half of the riskgrid toolkit:
//!
//! - **Single-pair shortest path** with early exit
//!   ([`PathFinder::shortest_path`], or the [`shortest_path`] /
//!   [`shortest_path_between`] conveniences over a
//!   [`CostGrid`](riskgrid_core::CostGrid))
//! - **Dijkstra** multi-source distance maps ([`PathFinder::dijkstra_map`])
//! - **BFS** unweighted distance maps ([`PathFinder::bfs_map`])
//!
//! All queries run through [`PathFinder`], which owns and reuses internal
//! caches so that repeated queries incur zero allocations after warm-up.
//! Results depend only on a query's arguments; two finders over the same
//! inputs always agree.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |
//!
//! `CostGrid` implements both with the destination-entry cost model: a
//! step is charged the entry cost of the cell it lands on, and the cell a
//! route starts from is free.

mod bfs;
mod dijkstra;
mod finder;
mod traits;

pub use dijkstra::{SearchError, shortest_path, shortest_path_between};
pub use finder::{PathFinder, PathNode};
pub use traits::{Pather, WeightedPather};
