//! Tiles: [`TileKind`], [`TileFlags`] and [`Tile`].

use std::ops::{BitAnd, BitOr};

use crate::geom::Point;

/// Who may traverse a tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    /// Anyone can go through.
    Open,
    /// No one can go through.
    #[default]
    Closed,
    /// Reserved for special agents. Not open for regular navigation.
    Restricted,
}

impl TileKind {
    /// ASCII glyph used by [`TileGrid::parse`](crate::TileGrid::parse) and
    /// the `Display` impls.
    pub const fn glyph(self) -> char {
        match self {
            TileKind::Open => '.',
            TileKind::Closed => '#',
            TileKind::Restricted => 'H',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub const fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(TileKind::Open),
            '#' => Some(TileKind::Closed),
            'H' => Some(TileKind::Restricted),
            _ => None,
        }
    }
}

/// Decorative payload carried by a tile. Irrelevant to navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileFlags(pub u8);

impl TileFlags {
    pub const NONE: Self = Self(0);
    pub const CRUMB: Self = Self(1 << 0);
    pub const POWER_PILL: Self = Self(1 << 1);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TileFlags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for TileFlags {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// One square of a level.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub kind: TileKind,
    pub flags: TileFlags,
    /// Position in the grid.
    pub pos: Point,
    /// Side length in world units.
    pub size: i32,
}

impl Tile {
    pub const fn new(kind: TileKind, flags: TileFlags, pos: Point, size: i32) -> Self {
        Self {
            kind,
            flags,
            pos,
            size,
        }
    }

    #[inline]
    pub const fn is_open(&self) -> bool {
        matches!(self.kind, TileKind::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_open_tiles_are_open() {
        let p = Point::new(1, 1);
        assert!(Tile::new(TileKind::Open, TileFlags::NONE, p, 16).is_open());
        assert!(!Tile::new(TileKind::Closed, TileFlags::NONE, p, 16).is_open());
        assert!(!Tile::new(TileKind::Restricted, TileFlags::CRUMB, p, 16).is_open());
    }

    #[test]
    fn flags_combine() {
        let f = TileFlags::CRUMB | TileFlags::POWER_PILL;
        assert!(f.contains(TileFlags::CRUMB));
        assert!(f.contains(TileFlags::POWER_PILL));
        assert_eq!(f & TileFlags::CRUMB, TileFlags::CRUMB);
        assert!(TileFlags::NONE.is_empty());
        assert!(!TileFlags::CRUMB.contains(f));
    }

    #[test]
    fn glyphs_round_trip() {
        for kind in [TileKind::Open, TileKind::Closed, TileKind::Restricted] {
            assert_eq!(TileKind::from_glyph(kind.glyph()), Some(kind));
        }
        assert_eq!(TileKind::from_glyph('x'), None);
    }
}
