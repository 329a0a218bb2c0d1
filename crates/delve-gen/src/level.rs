//! Publishing a generated cave as a [`TileGrid`].

use rand::Rng;

use delve_core::{TileFlags, TileGrid, TileKind};

use crate::automata::CaveGen;
use crate::cave::{CaveGrid, GridType, SkipList};
use crate::config::CaveConfig;
use crate::error::GenError;

/// Parameters for [`generate_level`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelConfig {
    pub cave: CaveConfig,
    /// Side length of a tile in world units.
    pub tile_size: i32,
    /// Run connectivity repair so every open tile is reachable.
    pub connect: bool,
    pub skip_list: SkipList,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            cave: CaveConfig::default(),
            tile_size: 16,
            connect: true,
            skip_list: SkipList::new(),
        }
    }
}

/// Convert a finished cave into tiles: floor becomes open tiles carrying a
/// crumb, rock becomes closed tiles.
pub fn to_tile_grid(cave: &CaveGrid, tile_size: i32) -> TileGrid {
    TileGrid::from_fn(cave.width(), cave.height(), tile_size, |p| match cave.at(p) {
        Some(GridType::Empty) => (TileKind::Open, TileFlags::CRUMB),
        _ => (TileKind::Closed, TileFlags::NONE),
    })
}

/// Generate a random level.
pub fn generate_level<R: Rng>(config: &LevelConfig, rng: R) -> Result<TileGrid, GenError> {
    if config.tile_size <= 0 {
        return Err(GenError::InvalidTileSize(config.tile_size));
    }
    let cave = CaveGen::new(config.cave.clone(), rng)
        .with_skip_list(config.skip_list.clone())
        .generate(config.connect)?;
    Ok(to_tile_grid(&cave, config.tile_size))
}
