//! Region segmentation and connectivity repair.
//!
//! The automaton leaves isolated pockets of floor. Repair labels every
//! pocket with a scanline flood fill, then asks the pathfinder for the
//! cheapest route from the largest region to each smaller one over a grid
//! where rock is passable but expensive, and carves that route open.

use std::collections::VecDeque;
use std::ops::AddAssign;

use rand::Rng;
use rand::seq::SliceRandom;

use delve_core::Point;
use delve_paths::{Heuristic, Pathfinder, SearchConfig, WeightedCosts};

use crate::cave::{CaveGrid, GridType};

/// Traversal cost of a floor cell during repair.
pub const OPEN_COST: u8 = 1;
/// Traversal cost of a rock cell during repair: passable, but avoided.
pub const FILLED_COST: u8 = 10;
/// Expansion budget for corridor searches.
pub const CORRIDOR_SEARCH_LIMIT: usize = 500_000;
/// Above this many open cells, corridors are searched with a weighted
/// heuristic.
pub const FAST_CORRIDOR_THRESHOLD: usize = 1000;

/// A connected set of floor cells found by flood fill.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Region {
    /// The cell the fill started from.
    pub seed: Point,
    /// Number of cells in the region.
    pub size: usize,
}

/// Summary of one repair pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Regions found before stitching.
    pub regions: usize,
    /// Minor regions joined to the main one.
    pub stitched: usize,
    /// Rock cells turned into floor.
    pub carved: usize,
    /// Minor regions the corridor search could not reach.
    pub failed: usize,
}

impl AddAssign for RepairReport {
    fn add_assign(&mut self, rhs: Self) {
        self.regions += rhs.regions;
        self.stitched += rhs.stitched;
        self.carved += rhs.carved;
        self.failed += rhs.failed;
    }
}

/// Fill the floor region containing `seed`, marking its cells in `visited`
/// (indexed row-major over the grid).
///
/// Each step fills a whole horizontal run left and right of a queued cell,
/// then queues the open cells directly above and below the run. Returns the
/// number of newly visited cells.
pub fn flood_fill(grid: &CaveGrid, seed: Point, visited: &mut [bool]) -> usize {
    let fillable = |p: Point, visited: &[bool]| {
        !grid.is_filled(p) && grid.index(p).is_some_and(|i| !visited[i])
    };
    if !fillable(seed, visited) {
        return 0;
    }

    let mut queue = VecDeque::from([seed]);
    let mut count = 0;
    while let Some(p) = queue.pop_front() {
        if !fillable(p, visited) {
            continue;
        }
        let mut x0 = p.x;
        while fillable(Point::new(x0 - 1, p.y), visited) {
            x0 -= 1;
        }
        let mut x1 = p.x;
        while fillable(Point::new(x1 + 1, p.y), visited) {
            x1 += 1;
        }
        for x in x0..=x1 {
            let q = Point::new(x, p.y);
            if let Some(i) = grid.index(q) {
                visited[i] = true;
                count += 1;
            }
            for n in [q.shift(0, -1), q.shift(0, 1)] {
                if fillable(n, visited) {
                    queue.push_back(n);
                }
            }
        }
    }
    count
}

/// Split the grid's floor into regions.
///
/// Seeds are drawn at random from the floor cells not yet covered by an
/// earlier region, until the regions cover every floor cell.
pub fn find_regions<R: Rng + ?Sized>(grid: &CaveGrid, rng: &mut R) -> Vec<Region> {
    let mut open = grid.open_cells();
    let total = open.len();
    open.shuffle(rng);

    let mut visited = vec![false; grid.bounds().len()];
    let mut covered = 0;
    let mut regions = Vec::new();
    for seed in open {
        if covered == total {
            break;
        }
        let size = flood_fill(grid, seed, &mut visited);
        if size == 0 {
            continue;
        }
        covered += size;
        regions.push(Region { seed, size });
    }
    debug_assert_eq!(covered, total);
    regions
}

/// Whether all floor cells form a single region. A grid without floor
/// counts as connected.
pub fn is_connected(grid: &CaveGrid) -> bool {
    let open = grid.open_cells();
    let Some(&first) = open.first() else {
        return true;
    };
    let mut visited = vec![false; grid.bounds().len()];
    flood_fill(grid, first, &mut visited) == open.len()
}

/// Repair cost grid: floor is cheap, rock is expensive, border rock is
/// impassable. Open border cells stay passable so protected cells on the
/// edge can be joined.
pub fn corridor_costs(grid: &CaveGrid) -> WeightedCosts {
    WeightedCosts::from_fn(grid.bounds(), |p| {
        if !grid.is_filled(p) {
            OPEN_COST
        } else if grid.is_border(p) {
            0
        } else {
            FILLED_COST
        }
    })
}

/// Search settings for carving corridors in a cave with `open_count` floor
/// cells. Large caves use a greedier heuristic to keep searches fast.
pub fn corridor_config(open_count: usize) -> SearchConfig {
    SearchConfig {
        heuristic: Heuristic::Manhattan,
        heuristic_weight: if open_count > FAST_CORRIDOR_THRESHOLD { 2 } else { 1 },
        diagonals: false,
        heavy_diagonals: false,
        direction_change_penalty: 0,
        tie_breaker: true,
        search_limit: CORRIDOR_SEARCH_LIMIT,
    }
}

/// Connect every region of `grid` to the largest one by carving corridors.
pub fn repair<R: Rng + ?Sized>(grid: &mut CaveGrid, rng: &mut R) -> RepairReport {
    let regions = find_regions(grid, rng);
    let mut report = RepairReport {
        regions: regions.len(),
        ..RepairReport::default()
    };
    if regions.len() <= 1 {
        return report;
    }

    let mut main = regions[0];
    for r in &regions[1..] {
        if r.size > main.size {
            main = *r;
        }
    }
    let open_count: usize = regions.iter().map(|r| r.size).sum();
    log::debug!(
        "repair: {} regions, main region of {} cells at {}",
        regions.len(),
        main.size,
        main.seed
    );

    let mut finder = Pathfinder::with_config(corridor_costs(grid), corridor_config(open_count));
    for region in regions.iter().filter(|r| r.seed != main.seed) {
        let path = finder.find_path(main.seed, region.seed);
        if path.is_empty() {
            log::warn!(
                "repair: no corridor from {} to region at {} ({:?})",
                main.seed,
                region.seed,
                finder.last_outcome()
            );
            report.failed += 1;
            continue;
        }
        let mut carved = 0;
        for node in &path {
            if grid.is_filled(node.pos) {
                carved += 1;
            }
            grid.set(node.pos, GridType::Empty);
            finder.costs_mut().set(node.pos, OPEN_COST);
        }
        log::trace!(
            "repair: joined region of {} cells at {}, carved {carved}",
            region.size,
            region.seed
        );
        report.stitched += 1;
        report.carved += carved;
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::WorldPos;
    use delve_paths::{CostGrid, PathProvider};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::level::to_tile_grid;

    const POCKET: &str = "\
############
#....#######
#....###...#
#....###...#
#....#######
############";

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn scanline_fill_follows_turns() {
        let grid = CaveGrid::parse(
            "\
#######
#.#.#.#
#.#.#.#
#.....#
#######",
        )
        .unwrap();
        let mut visited = vec![false; grid.bounds().len()];
        assert_eq!(flood_fill(&grid, Point::new(5, 1), &mut visited), 11);
        assert_eq!(flood_fill(&grid, Point::new(1, 1), &mut visited), 0);
        assert!(is_connected(&grid));
    }

    #[test]
    fn fill_ignores_walls_and_outside() {
        let grid = CaveGrid::parse("#.#\n...\n###").unwrap();
        let mut visited = vec![false; grid.bounds().len()];
        assert_eq!(flood_fill(&grid, Point::new(0, 0), &mut visited), 0);
        assert_eq!(flood_fill(&grid, Point::new(7, 7), &mut visited), 0);
        assert_eq!(flood_fill(&grid, Point::new(1, 1), &mut visited), 4);
        assert_eq!(flood_fill(&grid, Point::new(1, 0), &mut visited), 0);
    }

    #[test]
    fn regions_partition_the_floor() {
        let grid = CaveGrid::parse(POCKET).unwrap();
        let mut regions = find_regions(&grid, &mut rng());
        regions.sort_by_key(|r| r.size);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].size, 6);
        assert_eq!(regions[1].size, 16);
        assert!(!is_connected(&grid));
    }

    #[test]
    fn corridor_cost_grid() {
        let grid = CaveGrid::parse(POCKET).unwrap();
        let costs = corridor_costs(&grid);
        assert_eq!(costs.cost(Point::new(0, 2)), 0);
        assert_eq!(costs.cost(Point::new(1, 1)), OPEN_COST as u32);
        assert_eq!(costs.cost(Point::new(6, 2)), FILLED_COST as u32);

        let mut grid = grid;
        grid.set(Point::new(0, 2), GridType::Empty);
        assert_eq!(corridor_costs(&grid).cost(Point::new(0, 2)), OPEN_COST as u32);
    }

    #[test]
    fn repair_reaches_an_open_border_cell() {
        let mut grid = CaveGrid::parse(POCKET).unwrap();
        grid.set(Point::new(6, 5), GridType::Empty);
        let report = repair(&mut grid, &mut rng());
        assert_eq!(report.regions, 3);
        assert_eq!(report.stitched, 2);
        assert_eq!(report.failed, 0);
        assert!(is_connected(&grid));
        assert!(!grid.is_filled(Point::new(6, 4)));
        assert!(grid.is_filled(Point::new(5, 5)));
        assert!(grid.is_filled(Point::new(7, 5)));
    }

    #[test]
    fn corridor_config_switches_on_size() {
        assert_eq!(corridor_config(200).heuristic_weight, 1);
        assert_eq!(corridor_config(5000).heuristic_weight, 2);
        let c = corridor_config(10);
        assert!(!c.diagonals);
        assert!(c.tie_breaker);
        assert_eq!(c.search_limit, CORRIDOR_SEARCH_LIMIT);
    }

    #[test]
    fn repair_joins_the_pocket() {
        let mut grid = CaveGrid::parse(POCKET).unwrap();
        let report = repair(&mut grid, &mut rng());
        assert_eq!(report.regions, 2);
        assert_eq!(report.stitched, 1);
        assert_eq!(report.failed, 0);
        // The cheapest corridor crosses the three-cell wall on row 2 or 3.
        assert_eq!(report.carved, 3);
        assert!(is_connected(&grid));
        for p in grid.bounds().iter().filter(|&p| grid.is_border(p)) {
            assert!(grid.is_filled(p));
        }

        let level = to_tile_grid(&grid, 16);
        let mut pp = PathProvider::new(level);
        let path = pp.find_path(WorldPos::new(160.0, 32.0), WorldPos::new(16.0, 16.0));
        assert!(!path.is_empty());
        assert_eq!(path.destination(), Some(WorldPos::new(16.0, 16.0)));
    }

    #[test]
    fn single_region_is_left_alone() {
        let text = "\
######
#....#
#.##.#
#....#
######";
        let mut grid = CaveGrid::parse(text).unwrap();
        let report = repair(&mut grid, &mut rng());
        assert_eq!(report, RepairReport { regions: 1, ..RepairReport::default() });
        assert_eq!(grid, CaveGrid::parse(text).unwrap());
    }

    #[test]
    fn solid_rock_has_no_regions() {
        let mut grid = CaveGrid::new(6, 6);
        assert!(find_regions(&grid, &mut rng()).is_empty());
        assert_eq!(repair(&mut grid, &mut rng()), RepairReport::default());
        assert!(is_connected(&grid));
    }

    #[test]
    fn many_pockets_all_join() {
        let mut grid = CaveGrid::parse(
            "\
#############
#.#.#.#.#.#.#
#############
#.#.#.#.#.#.#
#############",
        )
        .unwrap();
        let report = repair(&mut grid, &mut rng());
        assert_eq!(report.regions, 12);
        assert_eq!(report.stitched, 11);
        assert!(is_connected(&grid));
    }
}
