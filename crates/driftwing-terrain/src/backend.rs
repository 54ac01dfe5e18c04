//! Seam to the drawing backend.
//!
//! The streaming subsystem never talks to a window or GPU directly; it hands
//! finished pixel buffers to a [`DisplayBackend`] and holds on to whatever
//! opaque texture handles come back. Handles are owned exclusively by their
//! slot: dropping a handle releases the underlying resource.

use driftwing_common::UploadError;

use crate::raster::ChunkImage;

/// Creates displayable resources from generated pixel buffers.
///
/// Implementations are called from background refresh threads while the
/// grid lock is held, so `create_texture` must be cheap and must never block
/// on anything other than the upload itself.
pub trait DisplayBackend: Send + Sync + 'static {
    /// Opaque handle to an uploaded texture. Dropping the handle destroys
    /// the resource.
    type Texture: Send;

    /// Uploads a chunk image, returning a displayable handle.
    fn create_texture(&self, image: &ChunkImage) -> Result<Self::Texture, UploadError>;
}

impl<T: DisplayBackend> DisplayBackend for std::sync::Arc<T> {
    type Texture = T::Texture;

    fn create_texture(&self, image: &ChunkImage) -> Result<Self::Texture, UploadError> {
        (**self).create_texture(image)
    }
}
