//! Cellular automata cave generation.
//!
//! 1. Every interior cell is seeded filled with probability `density/100`.
//!    Border cells stay filled; skip-list cells are forced empty.
//! 2. Each iteration recomputes every unprotected interior cell from the
//!    previous iteration's grid only, then commits the whole sweep at once.
//! 3. Optionally, connectivity repair runs after every iteration.

use rand::Rng;

use delve_core::Point;

use crate::cave::{CaveGrid, GridType, SkipList};
use crate::config::CaveConfig;
use crate::connect::{RepairReport, repair};
use crate::error::GenError;

/// Filled-cell counts around a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NeighborCounts {
    /// Filled cells in the 3×3 window centered on the cell (center included).
    pub walls: i32,
    /// Filled cells in the whole scanned window (center included).
    pub region: i32,
}

/// Count filled cells in the `(2·radius+1)²` window centered on `center`.
/// Out-of-bounds cells count as filled.
pub fn count_neighbors(grid: &CaveGrid, center: Point, radius: i32) -> NeighborCounts {
    let mut counts = NeighborCounts::default();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if !grid.is_filled(center.shift(dx, dy)) {
                continue;
            }
            counts.region += 1;
            if dx.abs() <= 1 && dy.abs() <= 1 {
                counts.walls += 1;
            }
        }
    }
    counts
}

/// Cave generator owning its random number generator.
///
/// Seed the generator explicitly (e.g. `StdRng::seed_from_u64`) to make
/// generation reproducible. Independent generators can run on separate
/// threads.
pub struct CaveGen<R: Rng> {
    pub rng: R,
    pub config: CaveConfig,
    pub skip_list: SkipList,
}

impl<R: Rng> CaveGen<R> {
    pub fn new(config: CaveConfig, rng: R) -> Self {
        Self {
            rng,
            config,
            skip_list: SkipList::new(),
        }
    }

    pub fn with_skip_list(mut self, skip_list: SkipList) -> Self {
        self.skip_list = skip_list;
        self
    }

    /// Run the automaton. With `connect`, every iteration is followed by
    /// connectivity repair so that the returned cave is a single region.
    pub fn generate(&mut self, connect: bool) -> Result<CaveGrid, GenError> {
        self.config.validate()?;
        let bounds = delve_core::Range::with_size(self.config.width, self.config.height);
        if let Some(&p) = self.skip_list.iter().find(|&&p| !bounds.contains(p)) {
            return Err(GenError::SkipOutOfBounds(p));
        }
        let protected = self.skip_list.mask(bounds);

        let mut grid = self.seed();
        if let Some(&p) = self.skip_list.iter().find(|&&p| grid.is_corner(p)) {
            return Err(GenError::SkipOnCorner(p));
        }
        let mut next = grid.clone();
        let mut report = RepairReport::default();

        for iter in 0..self.config.iterations() {
            let fill_phase = iter < self.config.mutate_fill_iterations;
            self.mutate(&grid, &mut next, &protected, fill_phase);
            std::mem::swap(&mut grid, &mut next);
            if connect {
                report += repair(&mut grid, &mut self.rng);
            }
        }
        if connect && self.config.iterations() == 0 {
            report += repair(&mut grid, &mut self.rng);
        }

        log::info!(
            "generated {}x{} cave: {} open cells, {} regions stitched, {} cells carved",
            grid.width(),
            grid.height(),
            grid.count_open(),
            report.stitched,
            report.carved
        );
        Ok(grid)
    }

    /// Initial random fill.
    fn seed(&mut self) -> CaveGrid {
        let mut grid = CaveGrid::new(self.config.width, self.config.height);
        for p in grid.bounds().interior() {
            if self.rng.random_range(0..100) >= self.config.density {
                grid.set(p, GridType::Empty);
            }
        }
        for &p in self.skip_list.iter() {
            grid.set(p, GridType::Empty);
        }
        grid
    }

    /// One sweep of the automaton, reading `prev` and writing `next`.
    fn mutate(&self, prev: &CaveGrid, next: &mut CaveGrid, protected: &[bool], fill_phase: bool) {
        let radius = if fill_phase { self.config.fill_radius } else { 1 };
        for p in prev.bounds().interior() {
            let Some(i) = prev.index(p) else {
                continue;
            };
            if protected[i] {
                continue;
            }
            let counts = count_neighbors(prev, p, radius);
            let filled = counts.walls >= self.config.wall_threshold
                || (fill_phase && counts.region <= self.config.fill_threshold);
            next.set(p, if filled { GridType::Filled } else { GridType::Empty });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect::is_connected;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn config(width: i32, height: i32, density: i32, fill: usize, only: usize) -> CaveConfig {
        CaveConfig {
            width,
            height,
            density,
            mutate_fill_iterations: fill,
            mutate_only_iterations: only,
            ..CaveConfig::default()
        }
    }

    fn gen_with(config: CaveConfig, seed: u64) -> CaveGen<StdRng> {
        CaveGen::new(config, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn out_of_range_density_is_rejected() {
        for density in [-5, 101, 250] {
            let err = gen_with(config(20, 20, density, 1, 1), 1).generate(true);
            assert_eq!(err, Err(GenError::InvalidDensity(density)));
        }
    }

    #[test]
    fn density_zero_opens_the_interior() {
        let grid = gen_with(config(12, 9, 0, 0, 0), 3).generate(false).unwrap();
        assert_eq!(grid.count_open(), 10 * 7);
        for p in grid.bounds() {
            assert_eq!(grid.is_filled(p), grid.is_border(p));
        }
    }

    #[test]
    fn density_hundred_fills_everything() {
        let grid = gen_with(config(12, 9, 100, 0, 0), 3).generate(true).unwrap();
        assert_eq!(grid.count_open(), 0);
    }

    #[test]
    fn iteration_follows_the_neighbor_rule() {
        for (fill, only) in [(1, 0), (0, 1)] {
            let seed_state = gen_with(config(24, 18, 45, 0, 0), 11).generate(false).unwrap();
            let cfg = config(24, 18, 45, fill, only);
            let stepped = gen_with(cfg.clone(), 11).generate(false).unwrap();

            let fill_phase = fill > 0;
            let radius = if fill_phase { cfg.fill_radius } else { 1 };
            for p in seed_state.bounds().interior() {
                let counts = count_neighbors(&seed_state, p, radius);
                let expect = counts.walls >= cfg.wall_threshold
                    || (fill_phase && counts.region <= cfg.fill_threshold);
                assert_eq!(stepped.is_filled(p), expect, "cell {p}");
            }
            for p in seed_state.bounds().iter().filter(|&p| seed_state.is_border(p)) {
                assert!(stepped.is_filled(p));
            }
        }
    }

    #[test]
    fn mutation_on_open_interior_fills_corners() {
        let grid = gen_with(config(8, 8, 0, 0, 1), 5).generate(false).unwrap();
        // Corner cells see five border walls in their 3x3 window.
        assert!(grid.is_filled(Point::new(1, 1)));
        assert!(grid.is_filled(Point::new(6, 6)));
        assert!(!grid.is_filled(Point::new(1, 3)));
        assert!(!grid.is_filled(Point::new(4, 4)));
    }

    #[test]
    fn neighbor_counts_treat_outside_as_filled() {
        let grid = CaveGrid::parse("...\n...\n...").unwrap();
        let c = count_neighbors(&grid, Point::new(0, 0), 1);
        assert_eq!(c, NeighborCounts { walls: 5, region: 5 });
        let c = count_neighbors(&grid, Point::new(1, 1), 2);
        assert_eq!(c, NeighborCounts { walls: 0, region: 16 });
    }

    #[test]
    fn skip_list_cells_stay_empty() {
        let skip: SkipList = [Point::new(3, 3), Point::new(4, 3), Point::new(0, 5)]
            .into_iter()
            .collect();
        let grid = gen_with(config(10, 10, 100, 2, 2), 9)
            .with_skip_list(skip.clone())
            .generate(false)
            .unwrap();
        for &p in skip.iter() {
            assert_eq!(grid.at(p), Some(GridType::Empty));
        }
    }

    #[test]
    fn skip_list_outside_is_rejected() {
        let skip: SkipList = [Point::new(10, 2)].into_iter().collect();
        let res = gen_with(config(10, 10, 40, 1, 1), 9)
            .with_skip_list(skip)
            .generate(false);
        assert_eq!(res, Err(GenError::SkipOutOfBounds(Point::new(10, 2))));

        let skip: SkipList = [Point::new(9, 0)].into_iter().collect();
        let res = gen_with(config(10, 10, 40, 1, 1), 9)
            .with_skip_list(skip)
            .generate(false);
        assert_eq!(res, Err(GenError::SkipOnCorner(Point::new(9, 0))));
    }

    #[test]
    fn border_skip_cells_join_the_cave() {
        for seed in 0..20 {
            let skip: SkipList = [Point::new(0, 15), Point::new(17, 29)]
                .into_iter()
                .collect();
            let grid = gen_with(config(30, 30, 45, 5, 2), seed)
                .with_skip_list(skip)
                .generate(true)
                .unwrap();
            assert!(!grid.is_filled(Point::new(0, 15)));
            assert!(!grid.is_filled(Point::new(17, 29)));
            assert!(is_connected(&grid), "seed {seed}");
        }
    }

    #[test]
    fn same_seed_same_cave() {
        let a = gen_with(CaveConfig::default(), 42).generate(true).unwrap();
        let b = gen_with(CaveConfig::default(), 42).generate(true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn connected_generation_yields_one_region() {
        for seed in 0..6 {
            let grid = gen_with(CaveConfig::default(), seed).generate(true).unwrap();
            assert!(grid.count_open() > 0);
            assert!(is_connected(&grid), "seed {seed}:\n{grid}");
        }
    }

    #[test]
    fn small_caves_connect_too() {
        for seed in 0..10 {
            let grid = gen_with(config(20, 14, 45, 3, 2), seed).generate(true).unwrap();
            assert!(is_connected(&grid), "seed {seed}:\n{grid}");
        }
    }

    #[test]
    fn generators_run_on_separate_threads() {
        let handles: Vec<_> = (0..3)
            .map(|seed| {
                std::thread::spawn(move || {
                    gen_with(config(30, 30, 45, 2, 1), seed).generate(true).unwrap()
                })
            })
            .collect();
        for (seed, h) in handles.into_iter().enumerate() {
            let grid = h.join().unwrap();
            let again = gen_with(config(30, 30, 45, 2, 1), seed as u64)
                .generate(true)
                .unwrap();
            assert_eq!(grid, again);
        }
    }
}
