//! **delve-core** — the level model shared by the delve crates.
//!
//! This crate provides geometry primitives, the world/grid coordinate
//! mapping, and the read-only [`TileGrid`] that generation publishes and
//! navigation consumes through the [`TileMap`] trait.

pub mod coords;
pub mod geom;
pub mod grid;
pub mod tile;

pub use coords::{WorldPos, grid_to_world, world_to_grid};
pub use geom::{Point, Range};
pub use grid::{ParseError, TileGrid, TileMap};
pub use tile::{Tile, TileFlags, TileKind};
