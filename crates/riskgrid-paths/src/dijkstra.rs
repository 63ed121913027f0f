use std::fmt;

use riskgrid_core::{CostGrid, Point};

use crate::PathFinder;
use crate::finder::{HeapRef, PathNode, UNREACHED};
use crate::traits::WeightedPather;

/// Errors raised by shortest-path queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// An endpoint lies outside the searched area.
    OutOfBounds { pos: Point, width: i32, height: i32 },
    /// The frontier was exhausted before the target was reached.
    Unreachable { from: Point, to: Point },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, width, height } => {
                write!(f, "search: {pos} outside the {width}x{height} area")
            }
            Self::Unreachable { from, to } => {
                write!(f, "search: no route from {from} to {to}")
            }
        }
    }
}

impl std::error::Error for SearchError {}

impl PathFinder {
    /// Compute the cost of the cheapest route from `from` to `to`.
    ///
    /// Dijkstra with early exit: nodes are finalized in cost order and the
    /// search stops the moment `to` is finalized. The cost of a route is
    /// the sum of `pather.cost` over its steps, so a zero-length route
    /// (`from == to`) costs 0.
    pub fn shortest_path<P: WeightedPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Result<i32, SearchError> {
        let Some(start_idx) = self.idx(from) else {
            return Err(self.oob(from));
        };
        let Some(goal_idx) = self.idx(to) else {
            return Err(self.oob(to));
        };

        if start_idx == goal_idx {
            return Ok(0);
        }

        // Bump generation to lazily invalidate all nodes.
        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open = std::mem::take(&mut self.open);
        open.clear();
        open.push(HeapRef { idx: start_idx, g: 0 });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search None;
            };

            let ci = current.idx;

            // Skip stale entries.
            if self.nodes[ci].generation != cur_gen || !self.nodes[ci].open {
                continue;
            }

            if ci == goal_idx {
                break 'search Some(self.nodes[ci].g);
            }

            self.nodes[ci].open = false;
            let current_g = self.nodes[ci].g;
            let current_point = self.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g + pather.cost(current_point, np);

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen && tentative_g >= n.g {
                    continue;
                }
                n.g = tentative_g;
                n.generation = cur_gen;
                n.open = true;

                open.push(HeapRef {
                    idx: ni,
                    g: tentative_g,
                });
            }
        };

        self.nbuf = nbuf;
        self.open = open;

        match found {
            Some(cost) => Ok(cost),
            None => {
                log::debug!("frontier exhausted before reaching {to} from {from}");
                Err(SearchError::Unreachable { from, to })
            }
        }
    }

    /// Compute a multi-source Dijkstra distance map.
    ///
    /// Every in-bounds source starts at cost 0; out-of-bounds sources are
    /// skipped. Expansion stops when the cumulative cost would exceed
    /// `max_cost` (pass `i32::MAX` for no limit). Returns all reached
    /// nodes in finalization order, so costs come out nondecreasing.
    pub fn dijkstra_map<P: WeightedPather>(
        &mut self,
        pather: &P,
        sources: &[Point],
        max_cost: i32,
    ) -> &[PathNode] {
        // Reset the flat cost map.
        for v in self.dijkstra_map.iter_mut() {
            *v = UNREACHED;
        }
        self.results.clear();

        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;

        let mut open = std::mem::take(&mut self.open);
        open.clear();

        // Seed sources.
        for &src in sources {
            if let Some(si) = self.idx(src) {
                let n = &mut self.nodes[si];
                n.g = 0;
                n.generation = cur_gen;
                n.open = true;
                self.dijkstra_map[si] = 0;
                open.push(HeapRef { idx: si, g: 0 });
            }
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = open.pop() {
            let ci = current.idx;
            let cn = &self.nodes[ci];
            if cn.generation != cur_gen || !cn.open {
                continue;
            }
            let current_g = cn.g;
            self.nodes[ci].open = false;

            let cp = self.point(ci);
            self.results.push(PathNode {
                pos: cp,
                cost: current_g,
            });

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative = current_g + pather.cost(cp, np);
                if tentative > max_cost {
                    continue;
                }

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen && tentative >= n.g {
                    continue;
                }
                n.g = tentative;
                n.generation = cur_gen;
                n.open = true;
                self.dijkstra_map[ni] = tentative;
                open.push(HeapRef {
                    idx: ni,
                    g: tentative,
                });
            }
        }

        self.nbuf = nbuf;
        self.open = open;
        &self.results
    }

    /// The cost recorded at `p` by the last [`dijkstra_map`](Self::dijkstra_map)
    /// call, or `None` when `p` is out of range or was not reached.
    pub fn dijkstra_at(&self, p: Point) -> Option<i32> {
        match self.idx(p) {
            Some(i) if self.dijkstra_map[i] != UNREACHED => Some(self.dijkstra_map[i]),
            _ => None,
        }
    }

    fn oob(&self, pos: Point) -> SearchError {
        SearchError::OutOfBounds {
            pos,
            width: self.width,
            height: self.height,
        }
    }
}

/// Cheapest route cost between two cells of `grid`, using a fresh finder.
///
/// Equivalent to [`PathFinder::shortest_path`] on a finder sized to the
/// grid; use a long-lived [`PathFinder`] to amortize allocations over
/// many queries.
pub fn shortest_path_between(
    grid: &CostGrid,
    from: Point,
    to: Point,
) -> Result<i32, SearchError> {
    PathFinder::for_grid(grid).shortest_path(grid, from, to)
}

/// Cheapest route cost from the top-left to the bottom-right corner of `grid`.
pub fn shortest_path(grid: &CostGrid) -> Result<i32, SearchError> {
    shortest_path_between(grid, Point::ZERO, grid.bottom_right())
}
