use std::fmt;

use delve_core::Point;

/// Errors rejected before generation starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// Density outside `0..=100`.
    InvalidDensity(i32),
    /// Width or height below 3, leaving no interior to carve.
    InvalidSize { width: i32, height: i32 },
    /// Fill-search radius below 1.
    InvalidRadius(i32),
    /// Tile size must be positive.
    InvalidTileSize(i32),
    /// A skip-list point outside the grid.
    SkipOutOfBounds(Point),
    /// A skip-list point on a grid corner, where no corridor can reach it.
    SkipOnCorner(Point),
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDensity(d) => write!(f, "density {d} is outside 0..=100"),
            Self::InvalidSize { width, height } => {
                write!(f, "cave size {width}x{height} is smaller than 3x3")
            }
            Self::InvalidRadius(r) => write!(f, "fill-search radius {r} must be at least 1"),
            Self::InvalidTileSize(s) => write!(f, "tile size {s} must be positive"),
            Self::SkipOutOfBounds(p) => write!(f, "skip-list point {p} is outside the cave"),
            Self::SkipOnCorner(p) => write!(f, "skip-list point {p} is a cave corner"),
        }
    }
}

impl std::error::Error for GenError {}
