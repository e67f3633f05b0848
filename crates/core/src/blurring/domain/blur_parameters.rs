use crate::shared::constants::{
    BASE_BLUR_SIZE, DEFAULT_DOWNSAMPLE, DEFAULT_ITERATIONS, DEFAULT_SPREAD, DOWNSAMPLE_RANGE,
    ITERATIONS_RANGE, SPREAD_RANGE,
};

/// Tuning for one blur invocation.
///
/// Values are taken as given; range enforcement belongs to the
/// configuration layer (see [`BlurParameters::clamped`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlurParameters {
    pub iterations: u32,
    pub spread: f32,
    pub downsample: u32,
}

impl BlurParameters {
    pub fn new(iterations: u32, spread: f32, downsample: u32) -> Self {
        Self {
            iterations,
            spread,
            downsample,
        }
    }

    /// Copy with every field clamped into its supported range.
    pub fn clamped(&self) -> Self {
        let spread = if self.spread.is_nan() {
            DEFAULT_SPREAD
        } else {
            self.spread
                .clamp(*SPREAD_RANGE.start(), *SPREAD_RANGE.end())
        };
        Self {
            iterations: self
                .iterations
                .clamp(*ITERATIONS_RANGE.start(), *ITERATIONS_RANGE.end()),
            spread,
            downsample: self
                .downsample
                .clamp(*DOWNSAMPLE_RANGE.start(), *DOWNSAMPLE_RANGE.end()),
        }
    }

    pub fn is_in_range(&self) -> bool {
        ITERATIONS_RANGE.contains(&self.iterations)
            && SPREAD_RANGE.contains(&self.spread)
            && DOWNSAMPLE_RANGE.contains(&self.downsample)
    }

    /// Blur size for the zero-based iteration `i`: `1 + (i + 1) * spread`.
    pub fn blur_size(&self, iteration: u32) -> f32 {
        BASE_BLUR_SIZE + (iteration + 1) as f32 * self.spread
    }

    pub fn blur_sizes(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.iterations).map(move |i| self.blur_size(i))
    }
}

impl Default for BlurParameters {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS, DEFAULT_SPREAD, DEFAULT_DOWNSAMPLE)
    }
}

/// Size of the downsampled scratch buffers for a `width x height` source.
///
/// Integer division by `downsample` (0 treated as 1), with each side kept
/// at least one pixel. The second value reports whether clamping applied.
pub fn scratch_dimensions(width: u32, height: u32, downsample: u32) -> ((u32, u32), bool) {
    let factor = downsample.max(1);
    let (w, h) = (width / factor, height / factor);
    ((w.max(1), h.max(1)), w == 0 || h == 0)
}
