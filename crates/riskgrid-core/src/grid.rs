//! The immutable cost grid.
//!
//! [`CostGrid`] stores one non-negative entry cost per cell in a single
//! contiguous row-major buffer (`y * width + x`). It is built once from
//! already-parsed data and read-only afterwards; every shape invariant is
//! checked at construction, so a value of this type is always a
//! well-formed rectangle of at least one cell.

use std::fmt;

use crate::geom::Point;

/// A rectangular grid of non-negative per-cell entry costs.
///
/// The entry cost of a cell is the price of *stepping onto* it; searches
/// over the grid charge it once per entered cell and never charge the
/// cell a path starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CostGrid {
    width: i32,
    height: i32,
    cells: Vec<i32>,
}

impl CostGrid {
    /// Build a grid from parsed rows, top to bottom.
    ///
    /// Fails when there are no rows, the rows are zero-width, any row's
    /// width differs from the first row's, or any cost is negative.
    pub fn from_rows(rows: &[Vec<i32>]) -> Result<Self, GridError> {
        let Some(first) = rows.first() else {
            return Err(GridError::Empty);
        };
        let width = first.len();
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &cost) in row.iter().enumerate() {
                if cost < 0 {
                    return Err(GridError::NegativeCost {
                        pos: Point::new(x as i32, y as i32),
                        cost,
                    });
                }
                cells.push(cost);
            }
        }

        Ok(Self {
            width: width as i32,
            height: rows.len() as i32,
            cells,
        })
    }

    /// Build a grid from an already-flat row-major buffer.
    ///
    /// `cells` must hold exactly `width * height` non-negative values.
    pub fn from_flat(width: i32, height: i32, cells: Vec<i32>) -> Result<Self, GridError> {
        if width < 1 || height < 1 {
            return Err(GridError::Empty);
        }
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(GridError::CellCount {
                expected,
                found: cells.len(),
            });
        }
        if let Some(i) = cells.iter().position(|&c| c < 0) {
            return Err(GridError::NegativeCost {
                pos: Point::new(i as i32 % width, i as i32 / width),
                cost: cells[i],
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size as a point (width = x, height = y).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Total number of cells. Never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// The bottom-right corner cell.
    #[inline]
    pub fn bottom_right(&self) -> Point {
        Point::new(self.width - 1, self.height - 1)
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// The entry cost at `p`, or `None` when `p` is outside the grid.
    #[inline]
    pub fn at(&self, p: Point) -> Option<i32> {
        if !self.contains(p) {
            return None;
        }
        Some(self.cells[(p.y * self.width + p.x) as usize])
    }

    /// The entry cost at `p`.
    ///
    /// # Panics
    ///
    /// Panics when `p` lies outside the grid; use [`at`](Self::at) for a
    /// checked lookup.
    #[inline]
    pub fn cost(&self, p: Point) -> i32 {
        match self.at(p) {
            Some(cost) => cost,
            None => panic!("point {p} outside {}x{} grid", self.width, self.height),
        }
    }

    /// Iterate over the rows as slices, top to bottom.
    #[inline]
    pub fn rows(&self) -> impl Iterator<Item = &[i32]> {
        self.cells.chunks(self.width as usize)
    }

    /// Iterate over `(Point, cost)` pairs in row-major order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Point, i32)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cost)| (Point::new(i as i32 % width, i as i32 / width), cost))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CostGrid {
    /// Deserializes through [`CostGrid::from_flat`] so that decoded data
    /// carries the same invariants as constructed data.
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            width: i32,
            height: i32,
            cells: Vec<i32>,
        }
        let raw = Raw::deserialize(deserializer)?;
        CostGrid::from_flat(raw.width, raw.height, raw.cells).map_err(serde::de::Error::custom)
    }
}

/// Errors raised when building or expanding a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No rows, or rows of width zero.
    Empty,
    /// A row's width differs from the first row's.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A flat buffer's length does not match the requested dimensions.
    CellCount { expected: usize, found: usize },
    /// A cell holds a negative cost.
    NegativeCost { pos: Point, cost: i32 },
    /// A cell's cost lies outside the wrappable `1..=9` range.
    CostOutOfRange { pos: Point, cost: i32 },
    /// A tiling factor of zero was requested.
    ZeroFactor,
    /// An expansion's dimensions would not fit the `i32` index range.
    Oversize { width: u64, height: u64 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => {
                write!(f, "grid: no cells (at least one row and one column required)")
            }
            Self::RaggedRow {
                row,
                expected,
                found,
            } => {
                write!(f, "grid: row {row} has width {found}, expected {expected}")
            }
            Self::CellCount { expected, found } => {
                write!(f, "grid: cell buffer holds {found} values, expected {expected}")
            }
            Self::NegativeCost { pos, cost } => {
                write!(f, "grid: negative cost {cost} at {pos}")
            }
            Self::CostOutOfRange { pos, cost } => {
                write!(f, "grid: cost {cost} at {pos} outside the tileable range 1..=9")
            }
            Self::ZeroFactor => write!(f, "grid: tiling factor must be at least 1"),
            Self::Oversize { width, height } => {
                write!(f, "grid: expansion to {width}x{height} exceeds the supported size")
            }
        }
    }
}

impl std::error::Error for GridError {}
