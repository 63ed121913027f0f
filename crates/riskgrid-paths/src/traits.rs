use riskgrid_core::{CostGrid, Point};

/// Minimal search interface — provides neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (non-negative cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be >= 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// A cost grid is searchable directly: every in-bounds cardinal neighbor
/// is reachable, and a step is charged the entry cost of the cell it
/// lands on. The cell a route starts from is never charged.
impl Pather for CostGrid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.contains(n)));
    }
}

impl WeightedPather for CostGrid {
    #[inline]
    fn cost(&self, _from: Point, to: Point) -> i32 {
        self.cost(to)
    }
}
