//! A* pathfinding on 2D grids.
//!
//! - [`Pathfinder`] — reusable A* search over any [`CostGrid`], with
//!   selectable [`Heuristic`], optional diagonal movement, tie-breaking, a
//!   direction-change penalty, an expansion budget and cooperative
//!   cancellation through a [`StopHandle`].
//! - [`PathProvider`] — world-space façade over a published level that
//!   returns [`Path`]s of waypoints.
//!
//! Cost sources:
//!
//! | Type | Costs |
//! |---|---|
//! | [`BinaryCosts`] | 1 for open cells, 0 (impassable) otherwise |
//! | [`WeightedCosts`] | any value in `0..=255` per cell |

mod astar;
mod config;
mod costs;
mod heuristic;
mod node;
mod provider;
mod stop;

pub use astar::{Pathfinder, SearchOutcome};
pub use config::{DEFAULT_SEARCH_LIMIT, SearchConfig};
pub use costs::{BinaryCosts, CostGrid, WeightedCosts};
pub use heuristic::{DIAGONAL_COST, Heuristic, ParseHeuristicError, STEP_COST};
pub use node::PathNode;
pub use provider::{Path, PathProvider};
pub use stop::StopHandle;
