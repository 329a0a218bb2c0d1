//! World-space navigation on top of a published level.

use std::collections::VecDeque;

use delve_core::{TileMap, WorldPos, grid_to_world, world_to_grid};

use crate::astar::{Pathfinder, SearchOutcome};
use crate::config::SearchConfig;
use crate::costs::BinaryCosts;
use crate::stop::StopHandle;

/// An ordered list of world-space waypoints. The head is the next waypoint
/// to reach.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    waypoints: VecDeque<WorldPos>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// The waypoint to head for, without consuming it.
    pub fn next_waypoint(&self) -> Option<WorldPos> {
        self.waypoints.front().copied()
    }

    /// Consume the head waypoint once it has been reached.
    pub fn advance(&mut self) -> Option<WorldPos> {
        self.waypoints.pop_front()
    }

    /// Final waypoint of the path.
    pub fn destination(&self) -> Option<WorldPos> {
        self.waypoints.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorldPos> {
        self.waypoints.iter()
    }
}

impl FromIterator<WorldPos> for Path {
    fn from_iter<I: IntoIterator<Item = WorldPos>>(iter: I) -> Self {
        Self {
            waypoints: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Path {
    type Item = WorldPos;
    type IntoIter = std::collections::vec_deque::IntoIter<WorldPos>;

    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.into_iter()
    }
}

/// Answers navigation queries in world coordinates for a level.
///
/// The level's open tiles are snapshotted into a binary cost grid when the
/// provider is built; the level is not expected to change afterwards.
pub struct PathProvider<M: TileMap> {
    grid: M,
    finder: Pathfinder<BinaryCosts>,
    last_outcome: SearchOutcome,
}

impl<M: TileMap> PathProvider<M> {
    /// A provider using [`SearchConfig::navigation`] settings.
    pub fn new(grid: M) -> Self {
        let config = SearchConfig::navigation(grid.width(), grid.height());
        Self::with_config(grid, config)
    }

    pub fn with_config(grid: M, config: SearchConfig) -> Self {
        let finder = Pathfinder::with_config(BinaryCosts::from_tile_map(&grid), config);
        Self {
            grid,
            finder,
            last_outcome: SearchOutcome::Idle,
        }
    }

    pub fn grid(&self) -> &M {
        &self.grid
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.finder.stop_handle()
    }

    /// Why the last query produced the path it did.
    pub fn last_outcome(&self) -> SearchOutcome {
        self.last_outcome
    }

    /// Waypoints leading from `begin` to `end`.
    ///
    /// Both positions are mapped to the tile containing them. The result is
    /// empty when either tile is not open, the map reports a non-positive
    /// tile size, or no path exists. Waypoints are
    /// tile origins in start → goal order; a waypoint equal to `begin` is
    /// left out since the caller is already there.
    pub fn find_path(&mut self, begin: WorldPos, end: WorldPos) -> Path {
        let tile_size = self.grid.tile_size();
        if tile_size <= 0 {
            self.last_outcome = SearchOutcome::InvalidEndpoint;
            return Path::new();
        }
        let start = world_to_grid(begin, tile_size);
        let goal = world_to_grid(end, tile_size);
        if !self.grid.is_tile_open(start) || !self.grid.is_tile_open(goal) {
            self.last_outcome = SearchOutcome::InvalidEndpoint;
            return Path::new();
        }

        let nodes = self.finder.find_path(start, goal);
        self.last_outcome = self.finder.last_outcome();
        nodes
            .iter()
            .rev()
            .map(|n| grid_to_world(n.pos, tile_size))
            .filter(|&w| w != begin)
            .collect()
    }
}
