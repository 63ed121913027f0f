use riskgrid_core::Point;

use crate::PathFinder;
use crate::finder::{PathNode, UNREACHED};
use crate::traits::Pather;

impl PathFinder {
    /// Compute a multi-source breadth-first distance map.
    ///
    /// Each step costs 1, whatever the pather would charge for it.
    /// Out-of-bounds and duplicate sources are skipped; expansion stops
    /// when the distance would exceed `max_dist` (pass `i32::MAX` for no
    /// limit). Returns all reached nodes in visit order.
    pub fn bfs_map<P: Pather>(
        &mut self,
        pather: &P,
        sources: &[Point],
        max_dist: i32,
    ) -> &[PathNode] {
        // Reset.
        for v in self.bfs_map.iter_mut() {
            *v = UNREACHED;
        }
        self.results.clear();

        let mut queue = std::mem::take(&mut self.bfs_queue);
        queue.clear();

        for &src in sources {
            if let Some(si) = self.idx(src) {
                if self.bfs_map[si] != UNREACHED {
                    continue;
                }
                self.bfs_map[si] = 0;
                queue.push_back(si);
                self.results.push(PathNode { pos: src, cost: 0 });
            }
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = queue.pop_front() {
            let current_dist = self.bfs_map[ci];
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.bfs_map[ni] != UNREACHED {
                    continue;
                }
                let nd = current_dist + 1;
                if nd > max_dist {
                    continue;
                }
                self.bfs_map[ni] = nd;
                queue.push_back(ni);
                self.results.push(PathNode { pos: np, cost: nd });
            }
        }

        self.nbuf = nbuf;
        self.bfs_queue = queue;
        &self.results
    }

    /// The distance recorded at `p` by the last [`bfs_map`](Self::bfs_map)
    /// call, or `None` when `p` is out of range or was not reached.
    pub fn bfs_at(&self, p: Point) -> Option<i32> {
        match self.idx(p) {
            Some(i) if self.bfs_map[i] != UNREACHED => Some(self.bfs_map[i]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use riskgrid_core::CostGrid;

    use super::*;

    // Elevation map where a step may climb at most one level.
    struct HillMap {
        elevations: CostGrid,
    }

    impl HillMap {
        fn parse(rows: &[&str]) -> (Self, Point, Point) {
            let mut start = Point::ZERO;
            let mut end = Point::ZERO;
            let rows: Vec<Vec<i32>> = rows
                .iter()
                .enumerate()
                .map(|(y, row)| {
                    row.chars()
                        .enumerate()
                        .map(|(x, c)| match c {
                            'S' => {
                                start = Point::new(x as i32, y as i32);
                                0
                            }
                            'E' => {
                                end = Point::new(x as i32, y as i32);
                                25
                            }
                            _ => c as i32 - 'a' as i32,
                        })
                        .collect()
                })
                .collect();
            let elevations = CostGrid::from_rows(&rows).unwrap();
            (Self { elevations }, start, end)
        }

        fn lowest_cells(&self) -> Vec<Point> {
            self.elevations
                .iter()
                .filter(|&(_, e)| e == 0)
                .map(|(p, _)| p)
                .collect()
        }
    }

    impl Pather for HillMap {
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            let here = self.elevations.cost(p);
            buf.extend(
                p.neighbors_4()
                    .into_iter()
                    .filter(|&n| self.elevations.at(n).is_some_and(|e| e <= here + 1)),
            );
        }
    }

    fn hill() -> (HillMap, Point, Point) {
        HillMap::parse(&["Sabqponm", "abcryxxl", "accszExk", "acctuvwj", "abdefghi"])
    }

    #[test]
    fn climbs_to_the_summit() {
        let (map, start, end) = hill();
        let mut pf = PathFinder::for_grid(&map.elevations);
        pf.bfs_map(&map, &[start], i32::MAX);
        assert_eq!(pf.bfs_at(end), Some(31));
    }

    #[test]
    fn any_lowest_cell_may_start() {
        let (map, _, end) = hill();
        let mut pf = PathFinder::for_grid(&map.elevations);
        pf.bfs_map(&map, &map.lowest_cells(), i32::MAX);
        assert_eq!(pf.bfs_at(end), Some(29));
    }

    #[test]
    fn open_grid_distance_is_manhattan() {
        let g = CostGrid::from_rows(&vec![vec![1; 4]; 4]).unwrap();
        let mut pf = PathFinder::for_grid(&g);
        pf.bfs_map(&g, &[Point::ZERO], i32::MAX);
        assert_eq!(pf.bfs_at(Point::new(3, 2)), Some(5));
        assert_eq!(pf.bfs_at(Point::new(0, 0)), Some(0));
        assert_eq!(pf.bfs_at(Point::new(3, 3)), Some(6));
    }

    #[test]
    fn max_dist_truncates_expansion() {
        let g = CostGrid::from_rows(&vec![vec![1; 5]; 5]).unwrap();
        let mut pf = PathFinder::for_grid(&g);
        let reached = pf.bfs_map(&g, &[Point::new(2, 2)], 1);
        assert_eq!(reached.len(), 5);
        assert_eq!(pf.bfs_at(Point::new(0, 0)), None);
        assert_eq!(pf.bfs_at(Point::new(2, 0)), None);
        assert_eq!(pf.bfs_at(Point::new(2, 1)), Some(1));
    }

    #[test]
    fn duplicate_and_out_of_bounds_sources_skipped() {
        let g = CostGrid::from_rows(&[vec![1, 1], vec![1, 1]]).unwrap();
        let mut pf = PathFinder::for_grid(&g);
        let src = Point::new(1, 0);
        let reached = pf.bfs_map(&g, &[src, src, Point::new(5, 5)], i32::MAX);
        assert_eq!(reached.iter().filter(|n| n.pos == src).count(), 1);
        assert_eq!(reached.len(), 4);
        assert_eq!(pf.bfs_at(Point::new(5, 5)), None);
    }

    #[test]
    fn bfs_ignores_weights() {
        // The 9s would dominate a weighted search; BFS counts steps only.
        let g = CostGrid::from_rows(&[vec![1, 9, 9, 1]]).unwrap();
        let mut pf = PathFinder::for_grid(&g);
        pf.bfs_map(&g, &[Point::ZERO], i32::MAX);
        assert_eq!(pf.bfs_at(Point::new(3, 0)), Some(3));
    }
}
