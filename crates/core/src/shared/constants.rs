use std::ops::RangeInclusive;

pub const ITERATIONS_RANGE: RangeInclusive<u32> = 0..=4;
pub const SPREAD_RANGE: RangeInclusive<f32> = 0.2..=3.0;
pub const DOWNSAMPLE_RANGE: RangeInclusive<u32> = 1..=8;

pub const DEFAULT_ITERATIONS: u32 = 3;
/// Larger values spread samples further apart and start to show ghosting.
pub const DEFAULT_SPREAD: f32 = 0.6;
pub const DEFAULT_DOWNSAMPLE: u32 = 2;

/// Blur size used by the single-pass variant.
pub const BASE_BLUR_SIZE: f32 = 1.0;

pub const SETTINGS_DIR_NAME: &str = "GaussianBlur";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
