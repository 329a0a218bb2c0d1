//! Traversal-cost sources for the pathfinder.

use std::sync::Arc;

use delve_core::{Point, Range, TileMap};

/// A grid of traversal costs.
///
/// A cost of 0 means impassable; larger values are heavier terrain. Points
/// outside [`bounds`](Self::bounds) must report 0.
pub trait CostGrid {
    fn bounds(&self) -> Range;

    /// Cost of entering `p`.
    fn cost(&self, p: Point) -> u32;

    #[inline]
    fn is_passable(&self, p: Point) -> bool {
        self.cost(p) > 0
    }
}

impl<C: CostGrid + ?Sized> CostGrid for &C {
    #[inline]
    fn bounds(&self) -> Range {
        (**self).bounds()
    }

    #[inline]
    fn cost(&self, p: Point) -> u32 {
        (**self).cost(p)
    }
}

impl<C: CostGrid + ?Sized> CostGrid for Arc<C> {
    #[inline]
    fn bounds(&self) -> Range {
        (**self).bounds()
    }

    #[inline]
    fn cost(&self, p: Point) -> u32 {
        (**self).cost(p)
    }
}

#[inline]
fn flat_index(bounds: Range, p: Point) -> Option<usize> {
    if !bounds.contains(p) {
        return None;
    }
    let x = (p.x - bounds.min.x) as usize;
    let y = (p.y - bounds.min.y) as usize;
    Some(y * bounds.width() as usize + x)
}

/// Open/closed costs: open cells cost 1, closed cells are impassable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryCosts {
    bounds: Range,
    open: Vec<bool>,
}

impl BinaryCosts {
    pub fn from_fn(bounds: Range, mut open: impl FnMut(Point) -> bool) -> Self {
        Self {
            bounds,
            open: bounds.iter().map(&mut open).collect(),
        }
    }

    /// Snapshot the open tiles of a level.
    pub fn from_tile_map<M: TileMap + ?Sized>(map: &M) -> Self {
        Self::from_fn(map.bounds(), |p| map.is_tile_open(p))
    }
}

impl CostGrid for BinaryCosts {
    #[inline]
    fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    fn cost(&self, p: Point) -> u32 {
        match flat_index(self.bounds, p) {
            Some(i) if self.open[i] => 1,
            _ => 0,
        }
    }
}

/// Arbitrary per-cell costs in `0..=255`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedCosts {
    bounds: Range,
    costs: Vec<u8>,
}

impl WeightedCosts {
    pub fn from_fn(bounds: Range, mut cost: impl FnMut(Point) -> u8) -> Self {
        Self {
            bounds,
            costs: bounds.iter().map(&mut cost).collect(),
        }
    }

    /// Change the cost of one cell. Does nothing out of bounds.
    pub fn set(&mut self, p: Point, cost: u8) {
        if let Some(i) = flat_index(self.bounds, p) {
            self.costs[i] = cost;
        }
    }
}

impl CostGrid for WeightedCosts {
    #[inline]
    fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    fn cost(&self, p: Point) -> u32 {
        flat_index(self.bounds, p).map_or(0, |i| self.costs[i] as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::TileGrid;

    #[test]
    fn binary_from_tile_map() {
        let g = TileGrid::parse("###\n#.H\n###", 16).unwrap();
        let c = BinaryCosts::from_tile_map(&g);
        assert_eq!(c.cost(Point::new(1, 1)), 1);
        assert_eq!(c.cost(Point::new(2, 1)), 0);
        assert_eq!(c.cost(Point::new(0, 0)), 0);
        assert_eq!(c.cost(Point::new(9, 9)), 0);
        assert!(c.is_passable(Point::new(1, 1)));
    }

    #[test]
    fn weighted_set_and_bounds() {
        let mut c = WeightedCosts::from_fn(Range::new(2, 2, 5, 5), |_| 10);
        assert_eq!(c.cost(Point::new(2, 2)), 10);
        assert_eq!(c.cost(Point::new(1, 2)), 0);
        c.set(Point::new(3, 3), 0);
        c.set(Point::new(8, 8), 7);
        assert!(!c.is_passable(Point::new(3, 3)));
        assert_eq!(c.cost(Point::new(4, 4)), 10);
    }

    #[test]
    fn shared_references_delegate() {
        let c = Arc::new(WeightedCosts::from_fn(Range::with_size(2, 2), |p| (p.x + 1) as u8));
        let r = &c;
        assert_eq!(c.cost(Point::new(1, 0)), 2);
        assert_eq!(r.cost(Point::new(0, 1)), 1);
        assert_eq!(CostGrid::bounds(&r), Range::with_size(2, 2));
    }
}
