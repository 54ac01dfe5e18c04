//! # Driftwing Terrain
//!
//! Concurrent terrain-chunk streaming around a moving viewpoint.
//!
//! This crate procedurally generates a tileable world texture and keeps a
//! small fixed-size window of generated chunks resident while the viewpoint
//! moves, refreshing the window on a background thread without blocking the
//! render thread.
//!
//! ## Architecture
//!
//! - [`noise`] — seeded, multi-octave gradient noise (pure, deterministic)
//! - [`palette`] — precomputed elevation-to-color ramp
//! - [`raster`] — per-chunk pixel generation from noise + palette
//! - [`grid`] — the fixed `(2r+1)^2` window of chunk slots
//! - [`backend`] — seam to the drawing backend that owns real textures
//! - [`streaming`] — the controller: viewpoint watching, background
//!   refreshes, and the swap-under-lock publish discipline
//!
//! ## Concurrency model
//!
//! One detached producer thread per refresh, at most one in flight; within a
//! refresh the per-chunk rasterization fans out over rayon workers. A single
//! mutex guards the slot table, held only for the constant-time handle swap
//! and the render thread's brief read, never during generation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod backend;
pub mod events;
pub mod grid;
pub mod noise;
pub mod palette;
pub mod params;
pub mod raster;
pub mod streaming;

#[cfg(test)]
pub(crate) mod testing;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::backend::*;
    pub use crate::events::*;
    pub use crate::grid::*;
    pub use crate::noise::*;
    pub use crate::palette::*;
    pub use crate::params::*;
    pub use crate::raster::*;
    pub use crate::streaming::*;
}

pub use prelude::*;
