//! The resident chunk window.
//!
//! The grid is a fixed `(2 * radius + 1)^2` neighborhood of cells around an
//! anchor. Cell enumeration is deterministic (row-major, ascending), and the
//! full-grid build fans rasterization out across rayon workers, keeping each
//! image paired with its coordinate rather than relying on completion order.

use rayon::prelude::*;

use driftwing_common::GridCoord;

use crate::raster::{ChunkImage, ChunkRasterizer};

/// One live, displayable chunk: its cell and the texture uploaded for it.
///
/// The texture handle is owned exclusively by the slot; replacing it drops
/// (destroys) the previous handle.
#[derive(Debug)]
pub struct ChunkSlot<T> {
    /// Cell this slot currently displays.
    pub coord: GridCoord,
    /// Displayable resource handle for the cell's tile.
    pub texture: T,
}

/// Enumerates the cells of a grid window in row-major, ascending order.
#[must_use]
pub fn enumerate_cells(anchor: GridCoord, radius: u32) -> Vec<GridCoord> {
    let r = radius as i32;
    let edge = (2 * r + 1) as usize;
    let mut cells = Vec::with_capacity(edge * edge);
    for dy in -r..=r {
        for dx in -r..=r {
            cells.push(anchor.offset(dx, dy));
        }
    }
    cells
}

/// Rasterizes every cell of a grid window, in parallel.
///
/// Returns one `(coordinate, image)` pair per cell, in enumeration order.
/// The pairing is carried through the parallel map itself, so no
/// reassociation step can mismatch an image with its cell.
#[must_use]
pub fn build_all(
    raster: &ChunkRasterizer,
    anchor: GridCoord,
    radius: u32,
) -> Vec<(GridCoord, ChunkImage)> {
    enumerate_cells(anchor, radius)
        .into_par_iter()
        .map(|cell| (cell, raster.rasterize(cell)))
        .collect()
}
