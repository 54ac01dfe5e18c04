//! Parameters controlling terrain generation and the streaming window.

use serde::{Deserialize, Serialize};

/// Default cell size in world units.
pub const DEFAULT_CELL_SIZE: f32 = 0.5;

/// Default tile edge length in pixels.
pub const DEFAULT_RESOLUTION: u32 = 8;

/// Default streaming radius in cells (radius 1 keeps a 3x3 window).
pub const DEFAULT_RADIUS: u32 = 1;

/// Parameters for terrain generation and the resident chunk window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenParams {
    /// World units covered by one cell edge.
    pub cell_size: f32,
    /// Pixels per tile edge; every chunk image is `resolution^2` pixels.
    pub resolution: u32,
    /// Cells kept resident in each direction around the anchor.
    pub radius: u32,
    /// Octave count for fractal noise summation.
    pub octaves: u32,
    /// Per-octave amplitude falloff.
    pub persistence: f64,
    /// Frequency factor applied to world coordinates before sampling.
    pub gen_scale: f32,
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            resolution: DEFAULT_RESOLUTION,
            radius: DEFAULT_RADIUS,
            octaves: 3,
            persistence: 0.5,
            gen_scale: 0.5,
        }
    }
}

impl GenParams {
    /// Number of resident chunk slots, `(2 * radius + 1)^2`.
    #[must_use]
    pub const fn slot_count(&self) -> usize {
        let edge = (self.radius * 2 + 1) as usize;
        edge * edge
    }

    /// World units between adjacent pixel samples within one tile.
    #[must_use]
    pub fn pixel_step(&self) -> f32 {
        self.cell_size / self.resolution as f32
    }
}
