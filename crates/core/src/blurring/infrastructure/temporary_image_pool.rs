use std::collections::HashMap;

use crate::blurring::domain::blur_error::BlurError;
use crate::blurring::domain::image_allocator::ImageAllocator;
use crate::shared::image::{FilterMode, Image};

type PoolKey = (u32, u32, u8);

/// Pooled images not reused within this many acquisitions are dropped.
pub const MAX_IDLE_ACQUISITIONS: u64 = 16;

struct PooledImage {
    image: Image,
    released_at: u64,
}

/// Pooled allocator for per-frame scratch images.
///
/// Released images are kept by `(width, height, channels)` and handed out
/// again on the next matching request, so a steady frame loop stops
/// allocating after its first frame. Every acquired image comes back with
/// [`FilterMode::Point`] regardless of how it was left. Images left idle for
/// more than [`MAX_IDLE_ACQUISITIONS`] acquisitions are evicted, so a change
/// of source size does not keep the old buffers alive.
pub struct TemporaryImagePool {
    free: HashMap<PoolKey, Vec<PooledImage>>,
    acquisitions: u64,
    outstanding: usize,
    outstanding_pixels: u64,
    pixel_budget: Option<u64>,
}

impl TemporaryImagePool {
    pub fn new() -> Self {
        Self {
            free: HashMap::new(),
            acquisitions: 0,
            outstanding: 0,
            outstanding_pixels: 0,
            pixel_budget: None,
        }
    }

    /// Pool that refuses to have more than `max_pixels` pixels acquired at once.
    pub fn with_pixel_budget(max_pixels: u64) -> Self {
        Self {
            pixel_budget: Some(max_pixels),
            ..Self::new()
        }
    }

    /// Images currently acquired and not yet released.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Released images waiting for reuse.
    pub fn pooled(&self) -> usize {
        self.free.values().map(Vec::len).sum()
    }

    /// Drops every pooled image.
    pub fn clear(&mut self) {
        let dropped = self.pooled();
        self.free.clear();
        log::debug!("Cleared {dropped} pooled images");
    }

    fn evict_stale(&mut self) {
        let now = self.acquisitions;
        let before = self.pooled();
        self.free.retain(|_, images| {
            images.retain(|p| now - p.released_at <= MAX_IDLE_ACQUISITIONS);
            !images.is_empty()
        });
        let evicted = before - self.pooled();
        if evicted > 0 {
            log::trace!("Evicted {evicted} idle scratch images");
        }
    }
}

impl Default for TemporaryImagePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageAllocator for TemporaryImagePool {
    fn acquire(&mut self, width: u32, height: u32, channels: u8) -> Result<Image, BlurError> {
        let fail = |reason: String| BlurError::Allocation {
            width,
            height,
            reason,
        };

        if width == 0 || height == 0 {
            return Err(fail("zero-sized image".into()));
        }
        if !(1..=4).contains(&channels) {
            return Err(BlurError::UnsupportedChannels(channels));
        }

        let pixels = width as u64 * height as u64;
        if let Some(budget) = self.pixel_budget {
            if self.outstanding_pixels + pixels > budget {
                return Err(fail(format!(
                    "pixel budget of {budget} exceeded ({} already in use)",
                    self.outstanding_pixels
                )));
            }
        }

        let mut image = match self
            .free
            .get_mut(&(width, height, channels))
            .and_then(Vec::pop)
        {
            Some(pooled) => pooled.image,
            None => {
                log::trace!("Allocating {width}x{height}x{channels} scratch image");
                Image::blank(width, height, channels)
            }
        };
        image.set_filter(FilterMode::Point);

        self.acquisitions += 1;
        self.outstanding += 1;
        self.outstanding_pixels += pixels;
        Ok(image)
    }

    fn release(&mut self, image: Image) {
        debug_assert!(
            self.outstanding > 0,
            "released an image the pool did not hand out"
        );
        self.outstanding = self.outstanding.saturating_sub(1);
        self.outstanding_pixels = self.outstanding_pixels.saturating_sub(image.pixel_count());
        self.free
            .entry((image.width(), image.height(), image.channels()))
            .or_default()
            .push(PooledImage {
                image,
                released_at: self.acquisitions,
            });
        self.evict_stale();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_returns_requested_size() {
        let mut pool = TemporaryImagePool::new();
        let image = pool.acquire(400, 300, 4).unwrap();
        assert_eq!(image.dimensions(), (400, 300));
        assert_eq!(image.channels(), 4);
        assert_eq!(pool.outstanding(), 1);
    }

    #[test]
    fn test_release_returns_image_to_pool() {
        let mut pool = TemporaryImagePool::new();
        let image = pool.acquire(16, 16, 3).unwrap();
        pool.release(image);
        assert_eq!(pool.outstanding(), 0);
        assert_eq!(pool.pooled(), 1);
    }

    #[test]
    fn test_reuses_released_image() {
        let mut pool = TemporaryImagePool::new();
        let mut image = pool.acquire(8, 8, 3).unwrap();
        image.data_mut()[0] = 77;
        pool.release(image);

        let reused = pool.acquire(8, 8, 3).unwrap();
        assert_eq!(reused.data()[0], 77, "pooled buffer should be handed back");
        assert_eq!(pool.pooled(), 0);
    }

    #[test]
    fn test_reuse_resets_filter_mode() {
        let mut pool = TemporaryImagePool::new();
        let mut image = pool.acquire(8, 8, 3).unwrap();
        image.set_filter(FilterMode::Bilinear);
        pool.release(image);

        let reused = pool.acquire(8, 8, 3).unwrap();
        assert_eq!(reused.filter(), FilterMode::Point);
    }

    #[test]
    fn test_different_size_is_not_reused() {
        let mut pool = TemporaryImagePool::new();
        let image = pool.acquire(8, 8, 3).unwrap();
        pool.release(image);

        let other = pool.acquire(4, 4, 3).unwrap();
        assert_eq!(other.dimensions(), (4, 4));
        assert_eq!(pool.pooled(), 1);
    }

    #[test]
    fn test_frame_churn_keeps_pool_bounded() {
        let mut pool = TemporaryImagePool::new();
        for _ in 0..100 {
            let a = pool.acquire(32, 32, 4).unwrap();
            let b = pool.acquire(32, 32, 4).unwrap();
            pool.release(a);
            pool.release(b);
        }
        assert_eq!(pool.outstanding(), 0);
        assert_eq!(pool.pooled(), 2);
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let mut pool = TemporaryImagePool::new();
        let err = pool.acquire(0, 10, 3).unwrap_err();
        assert!(matches!(err, BlurError::Allocation { width: 0, height: 10, .. }));
        assert_eq!(pool.outstanding(), 0);
    }

    #[test]
    fn test_unsupported_channels_rejected() {
        let mut pool = TemporaryImagePool::new();
        let err = pool.acquire(4, 4, 5).unwrap_err();
        assert!(matches!(err, BlurError::UnsupportedChannels(5)));
    }

    #[test]
    fn test_pixel_budget_exceeded() {
        let mut pool = TemporaryImagePool::with_pixel_budget(150);
        let first = pool.acquire(10, 10, 3).unwrap();
        let err = pool.acquire(10, 10, 3).unwrap_err();
        assert!(matches!(err, BlurError::Allocation { .. }));
        assert_eq!(pool.outstanding(), 1);

        pool.release(first);
        assert!(pool.acquire(10, 10, 3).is_ok());
    }

    #[test]
    fn test_changing_sizes_keeps_pool_bounded() {
        let mut pool = TemporaryImagePool::new();
        for w in 0..50 {
            let a = pool.acquire(100 + w, 100, 4).unwrap();
            let b = pool.acquire(100 + w, 100, 4).unwrap();
            pool.release(a);
            pool.release(b);
        }
        // Two images per frame survive for MAX_IDLE_ACQUISITIONS / 2 frames
        assert!(pool.pooled() <= MAX_IDLE_ACQUISITIONS as usize + 2);
        assert_eq!(pool.outstanding(), 0);
    }

    #[test]
    fn test_idle_size_is_evicted() {
        let mut pool = TemporaryImagePool::new();
        let mut old = pool.acquire(64, 64, 3).unwrap();
        old.data_mut()[0] = 77;
        pool.release(old);
        for _ in 0..=MAX_IDLE_ACQUISITIONS {
            let image = pool.acquire(32, 32, 3).unwrap();
            pool.release(image);
        }
        let fresh = pool.acquire(64, 64, 3).unwrap();
        assert_eq!(fresh.data()[0], 0, "idle buffer should have been dropped");
        assert_eq!(pool.pooled(), 1);
    }

    #[test]
    fn test_steady_size_is_not_evicted() {
        let mut pool = TemporaryImagePool::new();
        let mut image = pool.acquire(16, 16, 3).unwrap();
        image.data_mut()[0] = 9;
        pool.release(image);
        for _ in 0..(MAX_IDLE_ACQUISITIONS * 4) {
            let image = pool.acquire(16, 16, 3).unwrap();
            assert_eq!(image.data()[0], 9);
            pool.release(image);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "released an image the pool did not hand out")]
    fn test_foreign_release_panics_in_debug() {
        let mut pool = TemporaryImagePool::new();
        pool.release(Image::blank(8, 8, 3));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "released an image the pool did not hand out")]
    fn test_double_release_panics_in_debug() {
        let mut pool = TemporaryImagePool::new();
        let image = pool.acquire(8, 8, 3).unwrap();
        pool.release(image.clone());
        pool.release(image);
    }

    #[test]
    fn test_clear_drops_pooled_images() {
        let mut pool = TemporaryImagePool::new();
        let image = pool.acquire(8, 8, 3).unwrap();
        pool.release(image);
        pool.clear();
        assert_eq!(pool.pooled(), 0);
    }
}
