//! Background chunk streaming around a moving viewpoint.
//!
//! [`TerrainStream`] owns the resident chunk grid and keeps it centered on
//! the viewpoint. Each tick the caller reports the viewpoint position; when
//! it crosses into a new cell a detached background thread regenerates the
//! whole grid into private buffers and publishes it under the grid lock.
//!
//! ## State machine
//!
//! The controller is either idle or has exactly one refresh in flight. A
//! further cell change while refreshing is not queued: the in-flight refresh
//! always completes and publishes, and the next `notify_viewpoint` call after
//! it lands starts the follow-up refresh. Worst-case staleness is therefore
//! bounded by one full regeneration.
//!
//! ## Lock discipline
//!
//! One mutex protects the slot table. Generation runs outside the lock; the
//! lock is held only for the N-slot swap (and the render thread's brief read
//! in [`TerrainStream::with_read_lock`]), so a reader sees either the old
//! grid or the new one, never a mix.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use glam::Vec2;
use parking_lot::{Condvar, Mutex};
use tracing::{debug, info, warn};

use driftwing_common::{GridCoord, TerrainError, TerrainResult};

use crate::backend::DisplayBackend;
use crate::events::{RefreshEvent, RefreshEvents};
use crate::grid::{build_all, ChunkSlot};
use crate::palette::Palette;
use crate::params::GenParams;
use crate::raster::ChunkRasterizer;

/// The published grid: slot handles plus the anchor they were built for.
struct SlotTable<T> {
    /// Anchor of the last completed refresh.
    anchor: GridCoord,
    /// Exactly `slot_count` slots, every one holding a live handle.
    slots: Vec<ChunkSlot<T>>,
    /// Whether a background refresh is in flight.
    refreshing: bool,
}

/// State shared between the controller and its refresh threads.
struct StreamShared<T> {
    table: Mutex<SlotTable<T>>,
    /// Signaled when a refresh finishes; `teardown` waits on this.
    idle: Condvar,
}

/// Streams terrain chunks around a moving viewpoint.
pub struct TerrainStream<B: DisplayBackend> {
    raster: Arc<ChunkRasterizer>,
    backend: Arc<B>,
    shared: Arc<StreamShared<B::Texture>>,
    events: RefreshEvents,
    /// Cell of the most recent dispatch target. Only the thread driving
    /// `notify_viewpoint` reads or writes this, so the common same-cell
    /// check needs no lock.
    target: GridCoord,
}

impl<B: DisplayBackend> TerrainStream<B> {
    /// Builds the initial grid synchronously, anchored at the origin.
    ///
    /// All slots are populated before this returns; a backend rejection
    /// during the initial build is fatal because the no-empty-slot grid
    /// invariant could not be established.
    pub fn new(seed: u64, params: GenParams, backend: B) -> TerrainResult<Self> {
        let palette = Arc::new(Palette::new());
        let raster = Arc::new(ChunkRasterizer::new(seed, palette, params.clone()));
        let backend = Arc::new(backend);

        info!(seed, radius = params.radius, "building initial terrain grid");
        let built = build_all(&raster, GridCoord::ORIGIN, params.radius);
        if built.len() != params.slot_count() {
            return Err(TerrainError::InvariantViolation(format!(
                "grid build produced {} chunks, expected {}",
                built.len(),
                params.slot_count()
            )));
        }

        let mut slots = Vec::with_capacity(built.len());
        for (coord, image) in built {
            let texture = backend.create_texture(&image)?;
            slots.push(ChunkSlot { coord, texture });
        }

        Ok(Self {
            raster,
            backend,
            shared: Arc::new(StreamShared {
                table: Mutex::new(SlotTable {
                    anchor: GridCoord::ORIGIN,
                    slots,
                    refreshing: false,
                }),
                idle: Condvar::new(),
            }),
            events: RefreshEvents::default(),
            target: GridCoord::ORIGIN,
        })
    }

    /// Builds a stream with default generation parameters.
    pub fn with_defaults(seed: u64, backend: B) -> TerrainResult<Self> {
        Self::new(seed, GenParams::default(), backend)
    }

    /// Reports the viewpoint position; call once per frame or tick.
    ///
    /// While the viewpoint stays inside the cell of the last dispatch this
    /// is a plain integer comparison: no lock, no allocation. Crossing into
    /// a new cell while idle spawns a detached refresh thread; crossing
    /// while a refresh is in flight does nothing until the next tick after
    /// that refresh lands.
    pub fn notify_viewpoint(&mut self, viewpoint: Vec2) {
        let cell = GridCoord::containing(viewpoint, self.raster.params().cell_size);
        if cell == self.target {
            return;
        }

        {
            let mut table = self.shared.table.lock();
            if table.refreshing {
                return;
            }
            table.refreshing = true;
        }

        self.target = cell;
        debug!(
            cell.x,
            cell.y, "viewpoint crossed into a new cell, spawning refresh"
        );
        self.events.publish(RefreshEvent::Started { anchor: cell });

        let raster = Arc::clone(&self.raster);
        let backend = Arc::clone(&self.backend);
        let shared = Arc::clone(&self.shared);
        let sender = self.events.sender();
        // Detached on purpose: a refresh always runs to completion and
        // publishes, even when already stale by the time it lands.
        thread::spawn(move || run_refresh(&raster, &*backend, &shared, &sender, cell));
    }

    /// Runs `f` with the grid lock held, yielding the published anchor and
    /// the ordered slots.
    ///
    /// The lock is released on every exit path, including a panic in `f`.
    /// Callers must copy out what they need and return; holding the lock
    /// across draw calls or blocking work stalls refresh publication.
    pub fn with_read_lock<R>(&self, f: impl FnOnce(GridCoord, &[ChunkSlot<B::Texture>]) -> R) -> R {
        let table = self.shared.table.lock();
        f(table.anchor, &table.slots)
    }

    /// Anchor of the last completed refresh.
    #[must_use]
    pub fn anchor(&self) -> GridCoord {
        self.shared.table.lock().anchor
    }

    /// Cell targeted by the most recent dispatch.
    ///
    /// Runs ahead of [`anchor`](Self::anchor) while a refresh is in flight.
    #[must_use]
    pub const fn target(&self) -> GridCoord {
        self.target
    }

    /// Whether a background refresh is currently in flight.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.shared.table.lock().refreshing
    }

    /// Returns a receiver for refresh lifecycle events.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<RefreshEvent> {
        self.events.receiver()
    }

    /// Returns the rasterizer driving generation.
    #[must_use]
    pub fn rasterizer(&self) -> &ChunkRasterizer {
        &self.raster
    }

    /// Returns the generation parameters.
    #[must_use]
    pub fn params(&self) -> &GenParams {
        self.raster.params()
    }

    /// Returns the display backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Blocks until no refresh is in flight, then releases every handle.
    pub fn teardown(self) {
        let mut table = self.shared.table.lock();
        while table.refreshing {
            self.shared.idle.wait(&mut table);
        }
        table.slots.clear();
        info!("terrain stream torn down");
    }
}

impl<B: DisplayBackend> std::fmt::Debug for TerrainStream<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let table = self.shared.table.lock();
        f.debug_struct("TerrainStream")
            .field("anchor", &table.anchor)
            .field("target", &self.target)
            .field("slots", &table.slots.len())
            .field("refreshing", &table.refreshing)
            .finish_non_exhaustive()
    }
}

/// Body of one background refresh: generate, then publish under the lock.
fn run_refresh<B: DisplayBackend>(
    raster: &ChunkRasterizer,
    backend: &B,
    shared: &StreamShared<B::Texture>,
    events: &Sender<RefreshEvent>,
    target: GridCoord,
) {
    let radius = raster.params().radius;
    debug!(target.x, target.y, "regenerating terrain grid");

    // The expensive part runs into private buffers with no lock held.
    let built = build_all(raster, target, radius);

    let mut stale_slots = 0usize;
    {
        // Entire N-slot swap under one lock hold: readers see either the
        // old grid or the new one, never a mix.
        let mut table = shared.table.lock();
        assert_eq!(
            table.slots.len(),
            built.len(),
            "refresh produced a different slot count than the live grid"
        );
        for (slot, (coord, image)) in table.slots.iter_mut().zip(built) {
            match backend.create_texture(&image) {
                Ok(texture) => {
                    // Replacing the handle destroys the one it displaces.
                    slot.texture = texture;
                    slot.coord = coord;
                }
                Err(err) => {
                    warn!(coord.x, coord.y, %err, "upload rejected, slot keeps its previous tile");
                    stale_slots += 1;
                }
            }
        }
        table.anchor = target;
        table.refreshing = false;
        shared.idle.notify_all();
    }

    let _ = events.try_send(RefreshEvent::Completed {
        anchor: target,
        stale_slots,
    });
}
