//! World-space positions and the mapping to and from grid cells.
//!
//! World positions are continuous (`f32`) while grid cells are integral. The
//! mapping is lossy: [`world_to_grid`] truncates toward zero before dividing
//! by the tile size, and [`grid_to_world`] returns the cell's origin (its
//! top-left corner), not its center. A round trip therefore lands on the
//! origin of the cell that contains the original position.

use std::fmt;

use crate::geom::Point;

/// A position in world units.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: WorldPos) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether `other` is strictly closer than `tolerance`.
    #[inline]
    pub fn is_near(self, other: WorldPos, tolerance: f32) -> bool {
        self.distance(other) < tolerance
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Grid cell containing `pos`.
///
/// `tile_size` must be positive.
#[inline]
pub fn world_to_grid(pos: WorldPos, tile_size: i32) -> Point {
    Point::new(pos.x as i32 / tile_size, pos.y as i32 / tile_size)
}

/// World-space origin of cell `p`.
#[inline]
pub fn grid_to_world(p: Point, tile_size: i32) -> WorldPos {
    WorldPos::new((p.x * tile_size) as f32, (p.y * tile_size) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_to_grid_divides_by_tile_size() {
        assert_eq!(world_to_grid(WorldPos::new(0.0, 0.0), 16), Point::new(0, 0));
        assert_eq!(world_to_grid(WorldPos::new(15.9, 16.0), 16), Point::new(0, 1));
        assert_eq!(world_to_grid(WorldPos::new(47.0, 33.5), 16), Point::new(2, 2));
    }

    #[test]
    fn round_trip_lands_on_cell_origin() {
        let p = WorldPos::new(37.25, 20.5);
        let back = grid_to_world(world_to_grid(p, 16), 16);
        assert_eq!(back, WorldPos::new(32.0, 16.0));
        assert_ne!(back, p);

        let origin = WorldPos::new(48.0, 64.0);
        assert_eq!(grid_to_world(world_to_grid(origin, 16), 16), origin);
    }

    #[test]
    fn near_uses_strict_tolerance() {
        let a = WorldPos::new(0.0, 0.0);
        assert!(a.is_near(WorldPos::new(3.0, 0.0), 3.5));
        assert!(!a.is_near(WorldPos::new(3.0, 4.0), 5.0));
    }
}
