//! The published level: a fixed-size [`TileGrid`] and the [`TileMap`]
//! abstraction navigation code consumes.

use std::fmt;

use crate::geom::{Point, Range};
use crate::tile::{Tile, TileFlags, TileKind};

/// Read-only view of a level, as consumed by path providers.
pub trait TileMap {
    fn width(&self) -> i32;

    fn height(&self) -> i32;

    /// Side length of every tile in world units.
    fn tile_size(&self) -> i32;

    /// The tile at `p`, or `None` if `p` is out of bounds.
    fn tile_at(&self, p: Point) -> Option<&Tile>;

    /// Whether `p` is an open tile. Out-of-bounds points are never open.
    fn is_tile_open(&self, p: Point) -> bool {
        self.tile_at(p).is_some_and(Tile::is_open)
    }

    fn bounds(&self) -> Range {
        Range::with_size(self.width(), self.height())
    }
}

/// A fixed width×height array of tiles with a uniform tile size.
///
/// Every coordinate in the bounds holds exactly one tile. A `TileGrid` has
/// no setters: once built it is published read-only.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    bounds: Range,
    tile_size: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// A grid of closed tiles.
    pub fn new(width: i32, height: i32, tile_size: i32) -> Self {
        Self::from_fn(width, height, tile_size, |_| (TileKind::Closed, TileFlags::NONE))
    }

    /// Build a grid by asking `f` for the kind and payload of every cell, in
    /// row-major order. Tile sizes below 1 are raised to 1.
    pub fn from_fn(
        width: i32,
        height: i32,
        tile_size: i32,
        mut f: impl FnMut(Point) -> (TileKind, TileFlags),
    ) -> Self {
        let bounds = Range::with_size(width, height);
        let tile_size = tile_size.max(1);
        let tiles = bounds
            .iter()
            .map(|p| {
                let (kind, flags) = f(p);
                Tile::new(kind, flags, p, tile_size)
            })
            .collect();
        Self {
            bounds,
            tile_size,
            tiles,
        }
    }

    /// Parse a level drawn with `#` (closed), `.` (open) and `H`
    /// (restricted), one row per line.
    pub fn parse(s: &str, tile_size: i32) -> Result<Self, ParseError> {
        if tile_size <= 0 {
            return Err(ParseError::InvalidTileSize(tile_size));
        }
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let Some(first) = rows.first() else {
            return Err(ParseError::Empty);
        };
        let width = first.chars().count();
        let mut kinds = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(ParseError::InconsistentWidth {
                    row: y,
                    expected: width,
                    found: row.chars().count(),
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let kind = TileKind::from_glyph(ch).ok_or(ParseError::InvalidGlyph {
                    ch,
                    pos: Point::new(x as i32, y as i32),
                })?;
                kinds.push(kind);
            }
        }
        let w = width as i32;
        Ok(Self::from_fn(w, rows.len() as i32, tile_size, |p| {
            (kinds[(p.y * w + p.x) as usize], TileFlags::NONE)
        }))
    }

    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.bounds.width(), self.bounds.height())
    }

    /// Number of open tiles.
    pub fn count_open(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_open()).count()
    }

    /// Iterate over all tiles in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.bounds.width() + p.x) as usize)
    }
}

impl TileMap for TileGrid {
    #[inline]
    fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    fn tile_size(&self) -> i32 {
        self.tile_size
    }

    #[inline]
    fn tile_at(&self, p: Point) -> Option<&Tile> {
        self.index(p).map(|i| &self.tiles[i])
    }

    #[inline]
    fn bounds(&self) -> Range {
        self.bounds
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.bounds.width().max(1) as usize;
        for row in self.tiles.chunks(w) {
            for t in row {
                write!(f, "{}", t.kind.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Errors that can occur when parsing an ASCII level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No non-blank rows.
    Empty,
    /// A row has a different width than the first one.
    InconsistentWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character that is not a tile glyph.
    InvalidGlyph { ch: char, pos: Point },
    /// Tile size must be positive.
    InvalidTileSize(i32),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "level is empty"),
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(f, "row {row} has width {found}, expected {expected}"),
            Self::InvalidGlyph { ch, pos } => {
                write!(f, "invalid tile glyph \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::InvalidTileSize(s) => write!(f, "tile size {s} must be positive"),
        }
    }
}

impl std::error::Error for ParseError {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn tile_grid_round_trip() {
        let g = TileGrid::parse("###\n#.#\n###", 16).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: TileGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }
}
