use std::collections::{BinaryHeap, VecDeque};

use riskgrid_core::{CostGrid, Point};

/// A position with an associated cost, returned from Dijkstra / BFS map queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: i32,
}

// ---------------------------------------------------------------------------
// Internal node for priority-queue searches
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

/// Reference into the node arena, ordered by `g` for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct HeapRef {
    pub(crate) idx: usize,
    pub(crate) g: i32,
}

impl Ord for HeapRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest g first.
        other.g.cmp(&self.g)
    }
}

impl PartialOrd for HeapRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Flat-map sentinel meaning "not reached by the last query".
pub(crate) const UNREACHED: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Central coordinator for searches over a `width` x `height` area.
///
/// `PathFinder` owns all internal caches (node arena, frontier heap, flat
/// distance maps, neighbor scratch buffer) so that repeated queries incur
/// no allocations after warm-up. Reuse is invisible: a generation counter
/// stamped on every node makes the previous query's state unreadable, so
/// each query's result depends only on its arguments.
pub struct PathFinder {
    pub(crate) width: i32,
    pub(crate) height: i32,
    // Dijkstra caches
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) dijkstra_map: Vec<i32>,
    // BFS caches
    pub(crate) bfs_map: Vec<i32>,
    pub(crate) bfs_queue: VecDeque<usize>,
    // shared frontier, query output and neighbor scratch buffers
    pub(crate) open: BinaryHeap<HeapRef>,
    pub(crate) results: Vec<PathNode>,
    pub(crate) nbuf: Vec<Point>,
}

impl PathFinder {
    /// Create a new `PathFinder` for a `width` x `height` area anchored at
    /// the origin. Negative dimensions clamp to zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            nodes: vec![Node::default(); len],
            generation: 0,
            dijkstra_map: vec![UNREACHED; len],
            bfs_map: vec![UNREACHED; len],
            bfs_queue: VecDeque::new(),
            open: BinaryHeap::new(),
            results: Vec::new(),
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Create a `PathFinder` sized to `grid`.
    pub fn for_grid(grid: &CostGrid) -> Self {
        Self::new(grid.width(), grid.height())
    }

    /// Replace the searched area, reallocating caches as needed.
    ///
    /// If the new area fits within existing capacity, allocations are kept
    /// and only the generation counter is bumped so stale entries are
    /// ignored. Otherwise caches are reallocated.
    pub fn resize(&mut self, width: i32, height: i32) {
        let width = width.max(0);
        let height = height.max(0);
        let new_len = width as usize * height as usize;
        let capacity = self.nodes.len();
        self.width = width;
        self.height = height;

        if new_len <= capacity {
            self.generation = self.generation.wrapping_add(1);
            self.results.clear();
            // The flat maps hold distances laid out for the old shape.
            for v in self.dijkstra_map.iter_mut() {
                *v = UNREACHED;
            }
            for v in self.bfs_map.iter_mut() {
                *v = UNREACHED;
            }
            return;
        }

        log::debug!("pathfinder cache realloc: {capacity} -> {new_len} nodes");
        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.generation = 0;

        self.dijkstra_map.clear();
        self.dijkstra_map.resize(new_len, UNREACHED);
        self.bfs_map.clear();
        self.bfs_map.resize(new_len, UNREACHED);

        self.bfs_queue.clear();
        self.open.clear();
        self.results.clear();
    }

    /// Width of the searched area.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the searched area.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size of the searched area as a point (width = x, height = y).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Whether `p` lies inside the searched area.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PathFinder {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.size().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PathFinder {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let size = Point::deserialize(deserializer)?;
        Ok(PathFinder::new(size.x, size.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_smaller_keeps_capacity() {
        let mut pf = PathFinder::new(20, 20);
        let original_cap = pf.nodes.len(); // 400

        // Shrink — should NOT reallocate.
        pf.resize(5, 5);
        assert_eq!(pf.size(), Point::new(5, 5));
        assert_eq!(pf.nodes.len(), original_cap); // still 400
        // Generation bumped so stale entries are ignored.
        assert!(pf.generation > 0);
    }

    #[test]
    fn resize_larger_reallocates() {
        let mut pf = PathFinder::new(5, 5);
        let old_cap = pf.nodes.len(); // 25

        pf.resize(20, 20);
        assert_eq!(pf.size(), Point::new(20, 20));
        assert!(pf.nodes.len() > old_cap);
        assert_eq!(pf.nodes.len(), 400);
        assert_eq!(pf.dijkstra_map.len(), 400);
        assert_eq!(pf.bfs_map.len(), 400);
    }

    #[test]
    fn resize_equal_area_keeps_capacity() {
        let mut pf = PathFinder::new(10, 10);
        let cap = pf.nodes.len();

        // Same cell count, different shape — should preserve.
        pf.resize(20, 5);
        assert_eq!(pf.nodes.len(), cap);
        assert_eq!(pf.size(), Point::new(20, 5));
    }

    #[test]
    fn resize_in_place_clears_previous_maps() {
        let g = CostGrid::from_rows(&vec![vec![1; 6]; 6]).unwrap();
        let mut pf = PathFinder::for_grid(&g);
        pf.dijkstra_map(&g, &[Point::ZERO], i32::MAX);
        pf.bfs_map(&g, &[Point::ZERO], i32::MAX);
        assert_eq!(pf.dijkstra_at(Point::new(2, 2)), Some(4));
        assert_eq!(pf.bfs_at(Point::new(2, 2)), Some(4));

        // Shrink within capacity: distances recorded for the old shape
        // must not leak through the new one's flat layout.
        let cap = pf.nodes.len();
        pf.resize(3, 3);
        assert_eq!(pf.nodes.len(), cap);
        assert_eq!(pf.dijkstra_at(Point::new(2, 2)), None);
        assert_eq!(pf.bfs_at(Point::new(2, 2)), None);
    }

    #[test]
    fn negative_dimensions_clamp_to_zero() {
        let pf = PathFinder::new(-3, 7);
        assert_eq!(pf.size(), Point::new(0, 7));
        assert_eq!(pf.nodes.len(), 0);
        assert!(!pf.contains(Point::ZERO));
    }

    #[test]
    fn idx_and_point_are_inverse() {
        let pf = PathFinder::new(7, 3);
        for y in 0..3 {
            for x in 0..7 {
                let p = Point::new(x, y);
                let i = pf.idx(p).unwrap();
                assert_eq!(pf.point(i), p);
            }
        }
        assert_eq!(pf.idx(Point::new(7, 0)), None);
        assert_eq!(pf.idx(Point::new(0, 3)), None);
        assert_eq!(pf.idx(Point::new(-1, 1)), None);
    }

    #[test]
    fn heap_pops_smallest_cost_first() {
        let mut heap = BinaryHeap::new();
        for (idx, g) in [(0, 5), (1, 1), (2, 3)] {
            heap.push(HeapRef { idx, g });
        }
        let order: Vec<i32> = std::iter::from_fn(|| heap.pop().map(|r| r.g)).collect();
        assert_eq!(order, vec![1, 3, 5]);
    }
}
