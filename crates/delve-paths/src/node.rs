use std::cmp::Ordering;

use delve_core::Point;

/// One node of a found path.
///
/// Costs are in [`STEP_COST`](crate::STEP_COST) units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    /// The node this one was reached from; `None` for the start.
    pub parent: Option<Point>,
    /// Accumulated cost from the start.
    pub g: i64,
    /// Heuristic estimate to the goal.
    pub h: i64,
    /// Priority, `g + h`.
    pub f: i64,
}

pub(crate) const NO_PARENT: usize = usize::MAX;

/// Per-cell search state, valid only when `generation` matches the
/// pathfinder's current search.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i64,
    pub(crate) h: i64,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            parent: NO_PARENT,
            generation: 0,
            closed: false,
        }
    }
}

/// Open-set entry. Ordered so that `BinaryHeap` pops the smallest `f`, then
/// the smallest tie-break key, then the earliest inserted.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i64,
    pub(crate) tie: i64,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.tie.cmp(&self.tie))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn heap_pops_lowest_f_then_tie_then_oldest() {
        let mut heap = BinaryHeap::new();
        for (idx, f, tie) in [(0, 500, 0), (1, 400, 90), (2, 400, 10), (3, 400, 10)] {
            heap.push(NodeRef {
                idx,
                f,
                tie,
                seq: idx as u64,
            });
        }
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|n| n.idx)).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }
}
