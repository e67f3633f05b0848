use crate::shared::image::Image;

use super::blur_error::BlurError;

/// Source of short-lived scratch images.
///
/// Acquired content is undefined; callers overwrite it before reading.
/// Implementations must tolerate an acquire/release cycle every frame.
pub trait ImageAllocator: Send {
    fn acquire(&mut self, width: u32, height: u32, channels: u8) -> Result<Image, BlurError>;

    /// Hands an image previously returned by [`acquire`](Self::acquire) back.
    fn release(&mut self, image: Image);
}
