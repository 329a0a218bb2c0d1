use crate::heuristic::Heuristic;

/// Default maximum number of node expansions per search.
pub const DEFAULT_SEARCH_LIMIT: usize = 2000;

/// Settings for a [`Pathfinder`](crate::Pathfinder).
///
/// Tie-breaking and the direction-change penalty change which of several
/// equal-cost paths is returned, so they are part of the configuration
/// rather than fixed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Formula for the remaining-cost estimate.
    pub heuristic: Heuristic,
    /// Multiplier applied to the estimate. 1 keeps admissible heuristics
    /// admissible; larger values search greedier and faster.
    pub heuristic_weight: u32,
    /// Allow the 4 diagonal moves in addition to the orthogonal ones.
    pub diagonals: bool,
    /// Only take a diagonal step when both orthogonal cells it passes are
    /// passable.
    pub heavy_diagonals: bool,
    /// Extra cost, in orthogonal steps, added whenever a step changes
    /// direction. 0 disables the penalty.
    pub direction_change_penalty: u32,
    /// Order nodes of equal f by their straight-line distance to the goal.
    pub tie_breaker: bool,
    /// Give up after this many node expansions.
    pub search_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::Manhattan,
            heuristic_weight: 1,
            diagonals: false,
            heavy_diagonals: false,
            direction_change_penalty: 0,
            tie_breaker: true,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl SearchConfig {
    /// Settings for live agent navigation on a `width`×`height` level: 4-way
    /// movement, tie-breaking, and a budget of one expansion per cell.
    pub fn navigation(width: i32, height: i32) -> Self {
        Self {
            search_limit: (width.max(0) as usize) * (height.max(0) as usize),
            ..Self::default()
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let c: SearchConfig =
            serde_json::from_str(r#"{"heuristic":"euclidean","diagonals":true}"#).unwrap();
        assert_eq!(c.heuristic, Heuristic::Euclidean);
        assert!(c.diagonals);
        assert_eq!(c.search_limit, DEFAULT_SEARCH_LIMIT);
    }
}
