//! Procedural cave generation for delve.
//!
//! [`CaveGen`] shapes a randomly seeded [`CaveGrid`] with a cellular
//! automaton. The automaton leaves isolated pockets; with connection enabled,
//! every iteration is followed by [`repair`], which finds the regions with a
//! scanline [`flood_fill`] and carves corridors from the largest region to
//! every other one using the `delve-paths` A* search.
//!
//! [`generate_level`] runs the whole pipeline and publishes the result as a
//! read-only [`delve_core::TileGrid`].

pub mod automata;
pub mod cave;
pub mod config;
pub mod connect;
pub mod error;
pub mod level;

pub use automata::{CaveGen, NeighborCounts, count_neighbors};
pub use cave::{CaveGrid, GridType, SkipList};
pub use config::CaveConfig;
pub use connect::{
    Region, RepairReport, corridor_config, corridor_costs, find_regions, flood_fill,
    is_connected, repair,
};
pub use error::GenError;
pub use level::{LevelConfig, generate_level, to_tile_grid};
