//! Coordinate types for world points and chunk grid cells.
//!
//! World space is continuous and Y-up. The chunk grid is an infinite integer
//! lattice; a cell with coordinate `c` covers a square of `cell_size` world
//! units centered on `(c.x * cell_size, c.y * cell_size)`.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifies one chunk cell in the infinite integer lattice.
///
/// Two coordinates are equal iff both components match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct GridCoord {
    /// X coordinate in cell space
    pub x: i32,
    /// Y coordinate in cell space
    pub y: i32,
}

impl GridCoord {
    /// The origin cell, where a session starts.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this coordinate shifted by the given cell deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the cell containing the given world point.
    ///
    /// Rounding is symmetric around zero: a point exactly on a cell boundary
    /// rounds away from zero on both the positive and negative side, so the
    /// boundary at `+cell_size/2` belongs to cell 1 and the boundary at
    /// `-cell_size/2` belongs to cell -1.
    #[must_use]
    pub fn containing(point: Vec2, cell_size: f32) -> Self {
        Self {
            x: cell_axis(point.x, cell_size),
            y: cell_axis(point.y, cell_size),
        }
    }

    /// Returns the world-space center of this cell.
    #[must_use]
    pub fn center(self, cell_size: f32) -> Vec2 {
        Vec2::new(self.x as f32 * cell_size, self.y as f32 * cell_size)
    }

    /// Returns the world-space top-left corner of this cell.
    ///
    /// World Y increases upward, so the top-left corner has the maximal Y of
    /// the cell's span.
    #[must_use]
    pub fn top_left(self, cell_size: f32) -> Vec2 {
        let half = cell_size * 0.5;
        self.center(cell_size) + Vec2::new(-half, half)
    }
}

/// One axis of the containment computation.
///
/// The cast truncates toward zero, which together with the half-cell shift
/// gives the away-from-zero boundary behavior.
fn cell_axis(v: f32, cell_size: f32) -> i32 {
    let sign = if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    };
    ((v + sign * cell_size * 0.5) / cell_size) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_equality_componentwise() {
        assert_eq!(GridCoord::new(2, -3), GridCoord::new(2, -3));
        assert_ne!(GridCoord::new(2, -3), GridCoord::new(-3, 2));
    }

    #[test]
    fn test_offset() {
        assert_eq!(GridCoord::new(1, 1).offset(-2, 3), GridCoord::new(-1, 4));
    }

    #[test]
    fn test_containment_interior_points() {
        let size = 2.0;
        assert_eq!(
            GridCoord::containing(Vec2::new(0.0, 0.0), size),
            GridCoord::ORIGIN
        );
        assert_eq!(
            GridCoord::containing(Vec2::new(2.0, 0.0), size),
            GridCoord::new(1, 0)
        );
        assert_eq!(
            GridCoord::containing(Vec2::new(-2.0, -2.0), size),
            GridCoord::new(-1, -1)
        );
        assert_eq!(
            GridCoord::containing(Vec2::new(4.2, -3.9), size),
            GridCoord::new(2, -2)
        );
    }

    #[test]
    fn test_containment_boundary_table() {
        // Cell size 2.0 puts cell boundaries at odd world coordinates.
        // On-boundary points round away from zero on both sides; near-boundary
        // points stay in the cell whose center they are closest to.
        let size = 2.0;
        let table: &[(f32, i32)] = &[
            (1.0, 1),
            (-1.0, -1),
            (0.99, 0),
            (-0.99, 0),
            (1.01, 1),
            (-1.01, -1),
            (3.0, 2),
            (-3.0, -2),
            (2.99, 1),
            (-2.99, -1),
        ];
        for &(world_x, cell_x) in table {
            assert_eq!(
                GridCoord::containing(Vec2::new(world_x, 0.0), size),
                GridCoord::new(cell_x, 0),
                "world x = {world_x}"
            );
        }
        // The two sides of the origin cell land in distinct cells, one on
        // each flank, never collapsing onto a single cell.
        let east = GridCoord::containing(Vec2::new(1.0, 0.0), size);
        let west = GridCoord::containing(Vec2::new(-1.0, 0.0), size);
        assert_ne!(east, west);
        assert_eq!(east.x, -west.x);
    }

    #[test]
    fn test_cell_geometry() {
        let cell = GridCoord::new(1, -1);
        assert_eq!(cell.center(2.0), Vec2::new(2.0, -2.0));
        assert_eq!(cell.top_left(2.0), Vec2::new(1.0, -1.0));
    }

    proptest! {
        #[test]
        fn prop_containment_symmetric_around_zero(
            x in -100.0f32..100.0,
            y in -100.0f32..100.0,
        ) {
            // Truncation toward zero plus the signed half-cell shift makes
            // the mapping an exact odd function.
            let cell = GridCoord::containing(Vec2::new(x, y), 0.5);
            let mirrored = GridCoord::containing(Vec2::new(-x, -y), 0.5);
            prop_assert_eq!(mirrored, GridCoord::new(-cell.x, -cell.y));
        }
    }

    #[test]
    fn test_center_round_trips_through_containment() {
        let size = 0.5;
        for x in -4..=4 {
            for y in -4..=4 {
                let cell = GridCoord::new(x, y);
                assert_eq!(GridCoord::containing(cell.center(size), size), cell);
            }
        }
    }
}
