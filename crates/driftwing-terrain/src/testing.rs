//! Test doubles shared by the crate's unit tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use driftwing_common::UploadError;

use crate::backend::DisplayBackend;
use crate::palette::Rgba;
use crate::raster::ChunkImage;

/// Texture handle issued by [`CountingBackend`].
///
/// Keeps a copy of the uploaded pixels so tests can inspect what was
/// published, and decrements the backend's live count on drop, mirroring
/// resource destruction in a real backend.
pub(crate) struct TestTexture {
    /// Pixels that were uploaded for this handle.
    pub pixels: Vec<Rgba>,
    /// Zero-based global upload sequence number.
    pub upload_seq: usize,
    live: Arc<AtomicUsize>,
}

impl Drop for TestTexture {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Display backend double that records uploads and can inject failures.
pub(crate) struct CountingBackend {
    uploads: AtomicUsize,
    live: Arc<AtomicUsize>,
    fail_seqs: Mutex<HashSet<usize>>,
}

impl CountingBackend {
    pub fn new() -> Self {
        Self {
            uploads: AtomicUsize::new(0),
            live: Arc::new(AtomicUsize::new(0)),
            fail_seqs: Mutex::new(HashSet::new()),
        }
    }

    /// Total upload attempts, successful or not.
    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    /// Handles created and not yet dropped.
    pub fn live_textures(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Rejects the upload with the given sequence number.
    pub fn fail_upload(&self, seq: usize) {
        self.fail_seqs.lock().insert(seq);
    }
}

impl DisplayBackend for CountingBackend {
    type Texture = TestTexture;

    fn create_texture(&self, image: &ChunkImage) -> Result<TestTexture, UploadError> {
        let seq = self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.fail_seqs.lock().contains(&seq) {
            return Err(UploadError::new(
                "injected upload failure",
                image.resolution(),
                image.resolution(),
            ));
        }
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(TestTexture {
            pixels: image.pixels().to_vec(),
            upload_seq: seq,
            live: Arc::clone(&self.live),
        })
    }
}
