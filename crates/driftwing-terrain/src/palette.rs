//! Elevation-to-color mapping for terrain tiles.
//!
//! The palette is built once at session start from a fixed ramp of anchor
//! colors (deep water through lowland greens, rock grays, and snowy peaks)
//! and is immutable afterwards, so it is safe for unsynchronized concurrent
//! reads from rasterizer workers.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Number of precomputed entries in the palette lookup table.
pub const TABLE_SIZE: usize = 512;

/// Anchor colors of the terrain ramp, ordered by elevation.
///
/// The run of repeated entries widens the band a color covers: half the
/// ramp is deep water, and the gray and white bands cover wide rocky and
/// snowy elevation ranges.
const ANCHORS: [[u8; 3]; 23] = [
    [38, 33, 190],
    [38, 33, 190],
    [38, 33, 190],
    [38, 33, 190],
    [38, 33, 190],
    [38, 33, 190],
    [38, 33, 190],
    [38, 33, 190],
    [38, 33, 190],
    [38, 33, 190],
    [44, 168, 56],
    [35, 124, 44],
    [49, 88, 52],
    [69, 69, 69],
    [100, 100, 100],
    [192, 192, 192],
    [192, 192, 192],
    [192, 192, 192],
    [192, 192, 192],
    [226, 226, 226],
    [226, 226, 226],
    [226, 226, 226],
    [226, 226, 226],
];

/// One RGBA pixel, 8 bits per channel.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Pod, Zeroable, Default,
)]
#[repr(C)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Rgba {
    /// Creates a fully opaque color.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Precomputed piecewise-linear color ramp.
#[derive(Debug, Clone)]
pub struct Palette {
    table: Box<[Rgba; TABLE_SIZE]>,
}

impl Palette {
    /// Builds the lookup table by evenly subdividing the anchor segments.
    ///
    /// Each of the `ANCHORS.len() - 1` segments gets `TABLE_SIZE /
    /// ANCHORS.len()` interpolated entries; the division remainder at the
    /// top of the table clamps to the final anchor.
    #[must_use]
    pub fn new() -> Self {
        let mut table = Box::new([Rgba::default(); TABLE_SIZE]);
        let step = TABLE_SIZE / ANCHORS.len();

        for (k, anchor) in ANCHORS.iter().enumerate() {
            let next = ANCHORS[(k + 1).min(ANCHORS.len() - 1)];
            for s in 0..step {
                let weight = s as f32 / step as f32;
                table[k * step + s] = lerp_color(*anchor, next, weight);
            }
        }

        let last = ANCHORS[ANCHORS.len() - 1];
        for entry in table.iter_mut().skip(ANCHORS.len() * step) {
            *entry = Rgba::opaque(last[0], last[1], last[2]);
        }

        Self { table }
    }

    /// Looks up the color for a normalized scalar.
    ///
    /// `t` outside [0, 1] clamps to the table ends; in particular `t = 1.0`
    /// maps to the final entry rather than indexing out of bounds.
    #[must_use]
    pub fn color_at(&self, t: f32) -> Rgba {
        let idx = (t.max(0.0) * TABLE_SIZE as f32) as usize;
        self.table[idx.min(TABLE_SIZE - 1)]
    }

    /// Number of entries in the lookup table.
    #[must_use]
    pub const fn len(&self) -> usize {
        TABLE_SIZE
    }

    /// The table is never empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

/// Interpolates two anchor colors channel-wise in normalized space.
fn lerp_color(a: [u8; 3], b: [u8; 3], weight: f32) -> Rgba {
    let channel = |ca: u8, cb: u8| {
        let fa = f32::from(ca) / 255.0;
        let fb = f32::from(cb) / 255.0;
        ((fa + (fb - fa) * weight) * 255.0) as u8
    };
    Rgba::opaque(
        channel(a[0], b[0]),
        channel(a[1], b[1]),
        channel(a[2], b[2]),
    )
}
