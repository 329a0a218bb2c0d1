use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use delve_core::{Point, Range};

use crate::config::SearchConfig;
use crate::costs::CostGrid;
use crate::heuristic::{DIAGONAL_COST, STEP_COST, straight_line};
use crate::node::{NO_PARENT, Node, NodeRef, PathNode};
use crate::stop::StopHandle;

const DIRS_4: [Point; 4] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
];

const DIRS_8: [Point; 8] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(1, -1),
    Point::new(1, 1),
    Point::new(-1, 1),
    Point::new(-1, -1),
];

/// Why the last search ended.
///
/// Every outcome other than `Found` produces an empty path; this lets callers
/// that care tell the cases apart.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No search has run yet.
    #[default]
    Idle,
    Found,
    /// Start or goal is out of bounds or impassable.
    InvalidEndpoint,
    /// The open set ran empty.
    Unreachable,
    /// The expansion budget was exceeded.
    LimitReached,
    /// A [`StopHandle`] requested the search to stop.
    Cancelled,
}

/// A* search over a [`CostGrid`].
///
/// A `Pathfinder` owns its node array and open set and reuses them across
/// queries, so repeated searches on the same grid do not reallocate. Every
/// call to [`find_path`](Self::find_path) starts from empty open and closed
/// sets. Searches that should run concurrently need one `Pathfinder` each;
/// the cost grid can be shared through `&C` or `Arc<C>`.
pub struct Pathfinder<C: CostGrid> {
    costs: C,
    config: SearchConfig,
    nodes: Vec<Node>,
    generation: u32,
    open: BinaryHeap<NodeRef>,
    stop: StopHandle,
    last_outcome: SearchOutcome,
    expanded: usize,
    elapsed: Duration,
}

impl<C: CostGrid> Pathfinder<C> {
    pub fn new(costs: C) -> Self {
        Self::with_config(costs, SearchConfig::default())
    }

    pub fn with_config(costs: C, config: SearchConfig) -> Self {
        let len = costs.bounds().len();
        Self {
            costs,
            config,
            nodes: vec![Node::default(); len],
            generation: 0,
            open: BinaryHeap::new(),
            stop: StopHandle::new(),
            last_outcome: SearchOutcome::Idle,
            expanded: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    pub fn costs(&self) -> &C {
        &self.costs
    }

    /// Mutable access to the cost grid, e.g. to update terrain between
    /// searches.
    pub fn costs_mut(&mut self) -> &mut C {
        &mut self.costs
    }

    /// A handle that stops the running search from another thread.
    ///
    /// The signal is cleared when a new search starts, so it only affects
    /// the search in progress.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Why the last search ended.
    pub fn last_outcome(&self) -> SearchOutcome {
        self.last_outcome
    }

    /// Number of nodes expanded by the last search.
    pub fn last_expanded(&self) -> usize {
        self.expanded
    }

    /// Wall-clock time taken by the last search.
    pub fn last_elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Find the cheapest path from `start` to `goal`.
    ///
    /// Returns the path nodes in **goal → start** order, both endpoints
    /// included, or an empty vector when there is no path. A missing path
    /// is a normal result: see [`last_outcome`](Self::last_outcome) for the
    /// reason.
    pub fn find_path(&mut self, start: Point, goal: Point) -> Vec<PathNode> {
        let began = Instant::now();
        self.stop.reset();
        self.expanded = 0;

        let outcome = self.search(start, goal);
        let path = match outcome {
            SearchOutcome::Found => self.reconstruct(goal),
            _ => Vec::new(),
        };
        self.open.clear();

        self.elapsed = began.elapsed();
        self.last_outcome = outcome;
        log::debug!(
            "search {start} -> {goal}: {outcome:?}, {} nodes, {} expanded in {:?}",
            path.len(),
            self.expanded,
            self.elapsed
        );
        path
    }

    /// Bump the generation so that every node from earlier searches reads as
    /// unseen, resizing the node array if the grid changed size.
    fn prepare(&mut self, bounds: Range) {
        let len = bounds.len();
        if self.nodes.len() != len {
            self.nodes.clear();
            self.nodes.resize(len, Node::default());
            self.generation = 0;
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            for n in self.nodes.iter_mut() {
                n.generation = 0;
            }
            self.generation = 1;
        }
        self.open.clear();
    }

    fn search(&mut self, start: Point, goal: Point) -> SearchOutcome {
        if !self.costs.is_passable(start) || !self.costs.is_passable(goal) {
            return SearchOutcome::InvalidEndpoint;
        }
        let bounds = self.costs.bounds();
        let (Some(si), Some(gi)) = (index(bounds, start), index(bounds, goal)) else {
            return SearchOutcome::InvalidEndpoint;
        };
        self.prepare(bounds);
        let cur_gen = self.generation;

        let heuristic = self.config.heuristic;
        let weight = self.config.heuristic_weight as i64;
        let tie_breaker = self.config.tie_breaker;
        let heavy = self.config.heavy_diagonals;
        let penalty = self.config.direction_change_penalty as i64 * STEP_COST;
        let limit = self.config.search_limit;
        let dirs: &[Point] = if self.config.diagonals { &DIRS_8 } else { &DIRS_4 };

        let estimate = |p: Point| heuristic.estimate(p, goal) * weight;
        let tie_key = |p: Point| if tie_breaker { straight_line(p, goal) } else { 0 };

        let h = estimate(start);
        self.nodes[si] = Node {
            g: 0,
            h,
            parent: NO_PARENT,
            generation: cur_gen,
            closed: false,
        };
        let mut seq = 0u64;
        self.open.push(NodeRef {
            idx: si,
            f: h,
            tie: tie_key(start),
            seq,
        });

        loop {
            if self.stop.is_stopped() {
                return SearchOutcome::Cancelled;
            }
            let Some(current) = self.open.pop() else {
                return SearchOutcome::Unreachable;
            };
            let ci = current.idx;
            // Stale entry for a node that was already expanded.
            if self.nodes[ci].closed {
                continue;
            }
            if ci == gi {
                return SearchOutcome::Found;
            }
            self.expanded += 1;
            if self.expanded > limit {
                return SearchOutcome::LimitReached;
            }
            self.nodes[ci].closed = true;

            let cp = point(bounds, ci);
            let cg = self.nodes[ci].g;
            let prev_dir = match self.nodes[ci].parent {
                NO_PARENT => None,
                pi => Some(cp - point(bounds, pi)),
            };

            for &d in dirs {
                let np = cp + d;
                let terrain = self.costs.cost(np) as i64;
                if terrain == 0 {
                    continue;
                }
                let diagonal = d.x != 0 && d.y != 0;
                if diagonal
                    && heavy
                    && (!self.costs.is_passable(cp.shift(d.x, 0))
                        || !self.costs.is_passable(cp.shift(0, d.y)))
                {
                    continue;
                }
                let Some(ni) = index(bounds, np) else {
                    continue;
                };

                let step = if diagonal { DIAGONAL_COST } else { STEP_COST };
                let mut g = cg + terrain * step;
                if penalty > 0 && prev_dir.is_some_and(|pd| pd != d) {
                    g += penalty;
                }

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if n.closed || g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.closed = false;
                    n.h = estimate(np);
                }
                n.g = g;
                n.parent = ci;

                seq += 1;
                self.open.push(NodeRef {
                    idx: ni,
                    f: g + n.h,
                    tie: tie_key(np),
                    seq,
                });
            }
        }
    }

    /// Walk parent links from the goal back to the start.
    fn reconstruct(&self, goal: Point) -> Vec<PathNode> {
        let bounds = self.costs.bounds();
        let mut path = Vec::new();
        let Some(mut ci) = index(bounds, goal) else {
            return path;
        };
        loop {
            let n = &self.nodes[ci];
            let parent = (n.parent != NO_PARENT).then(|| point(bounds, n.parent));
            path.push(PathNode {
                pos: point(bounds, ci),
                parent,
                g: n.g,
                h: n.h,
                f: n.g + n.h,
            });
            if n.parent == NO_PARENT {
                return path;
            }
            ci = n.parent;
        }
    }
}

#[inline]
fn index(bounds: Range, p: Point) -> Option<usize> {
    if !bounds.contains(p) {
        return None;
    }
    let x = (p.x - bounds.min.x) as usize;
    let y = (p.y - bounds.min.y) as usize;
    Some(y * bounds.width() as usize + x)
}

#[inline]
fn point(bounds: Range, idx: usize) -> Point {
    let w = bounds.width() as usize;
    Point::new(
        (idx % w) as i32 + bounds.min.x,
        (idx / w) as i32 + bounds.min.y,
    )
}
