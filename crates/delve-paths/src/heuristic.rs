use std::fmt;
use std::str::FromStr;

use delve_core::Point;

/// Cost of one orthogonal step over terrain of cost 1. All search costs are
/// integers in these units.
pub const STEP_COST: i64 = 100;

/// Cost of one diagonal step over terrain of cost 1 (√2 × [`STEP_COST`]).
pub const DIAGONAL_COST: i64 = 141;

/// Formula estimating the remaining cost from a cell to the goal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Heuristic {
    /// L1 distance. Admissible for 4-way movement.
    #[default]
    Manhattan,
    /// L∞ distance.
    MaxDxDy,
    /// Octile distance: diagonal steps first, then straight ones.
    DiagonalShortcut,
    /// Straight-line distance.
    Euclidean,
    /// Squared straight-line distance. Fast but overestimates.
    EuclideanNoSqr,
}

impl Heuristic {
    pub const ALL: [Heuristic; 5] = [
        Heuristic::Manhattan,
        Heuristic::MaxDxDy,
        Heuristic::DiagonalShortcut,
        Heuristic::Euclidean,
        Heuristic::EuclideanNoSqr,
    ];

    /// Estimated cost from `from` to `to`, in [`STEP_COST`] units.
    #[inline]
    pub fn estimate(self, from: Point, to: Point) -> i64 {
        let dx = (from.x - to.x).abs() as i64;
        let dy = (from.y - to.y).abs() as i64;
        match self {
            Heuristic::Manhattan => STEP_COST * (dx + dy),
            Heuristic::MaxDxDy => STEP_COST * dx.max(dy),
            Heuristic::DiagonalShortcut => {
                let diag = dx.min(dy);
                DIAGONAL_COST * diag + STEP_COST * (dx + dy - 2 * diag)
            }
            Heuristic::Euclidean => straight_line(from, to),
            Heuristic::EuclideanNoSqr => STEP_COST * (dx * dx + dy * dy),
        }
    }

    /// The name accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::MaxDxDy => "max_dx_dy",
            Heuristic::DiagonalShortcut => "diagonal_shortcut",
            Heuristic::Euclidean => "euclidean",
            Heuristic::EuclideanNoSqr => "euclidean_no_sqr",
        }
    }
}

/// Straight-line distance in [`STEP_COST`] units, rounded.
#[inline]
pub(crate) fn straight_line(from: Point, to: Point) -> i64 {
    let dx = (from.x - to.x) as f64;
    let dy = (from.y - to.y) as f64;
    (STEP_COST as f64 * (dx * dx + dy * dy).sqrt()).round() as i64
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = ParseHeuristicError;

    /// Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('-', "_");
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name() == norm)
            .ok_or_else(|| ParseHeuristicError(s.to_string()))
    }
}

/// Unknown heuristic name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseHeuristicError(pub String);

impl fmt::Display for ParseHeuristicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown heuristic \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for ParseHeuristicError {}
