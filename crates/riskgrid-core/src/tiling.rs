//! Tiled expansion of a base grid.
//!
//! [`expand`] replicates a base grid `factor`x`factor` times. Each tile
//! bumps every cost by the tile's Manhattan index (tile row + tile
//! column), wrapping within `1..=9` so that a 9 bumps to 1 rather than
//! 10. The tile at the origin is the base grid unchanged.

use crate::geom::Point;
use crate::grid::{CostGrid, GridError};

/// Smallest cost a tileable cell may hold.
pub const COST_MIN: i32 = 1;
/// Largest cost a tileable cell may hold; bumping past it wraps back to
/// [`COST_MIN`].
pub const COST_MAX: i32 = 9;

/// Expand `grid` into a `factor`x`factor` tiling of itself.
///
/// Fails with [`GridError::ZeroFactor`] when `factor` is zero, with
/// [`GridError::CostOutOfRange`] when any base cost lies outside
/// `1..=9` (the wrap rule is only defined on that range), and with
/// [`GridError::Oversize`] when either expanded dimension would not
/// fit the grid's `i32` index range. A factor of 1 returns a copy of
/// the base grid.
pub fn expand(grid: &CostGrid, factor: u32) -> Result<CostGrid, GridError> {
    if factor == 0 {
        return Err(GridError::ZeroFactor);
    }
    if let Some((pos, cost)) = grid
        .iter()
        .find(|&(_, c)| !(COST_MIN..=COST_MAX).contains(&c))
    {
        return Err(GridError::CostOutOfRange { pos, cost });
    }
    if factor == 1 {
        return Ok(grid.clone());
    }

    let (bw, bh) = (grid.width(), grid.height());
    let width = bw as u64 * factor as u64;
    let height = bh as u64 * factor as u64;
    if width > i32::MAX as u64 || height > i32::MAX as u64 {
        return Err(GridError::Oversize { width, height });
    }
    let (width, height) = (width as i32, height as i32);
    let mut cells = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        let (tile_y, base_y) = (y / bh, y % bh);
        for x in 0..width {
            let (tile_x, base_x) = (x / bw, x % bw);
            let base = grid.cost(Point::new(base_x, base_y));
            cells.push(wrap(base, tile_y + tile_x));
        }
    }
    CostGrid::from_flat(width, height, cells)
}

/// Bump `cost` by `bump` steps, wrapping within `COST_MIN..=COST_MAX`.
#[inline]
fn wrap(cost: i32, bump: i32) -> i32 {
    (cost - COST_MIN + bump) % (COST_MAX - COST_MIN + 1) + COST_MIN
}
