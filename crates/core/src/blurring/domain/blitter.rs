use crate::shared::image::Image;

use super::blur_error::BlurError;
use super::blur_shader::{BlurPass, BlurShader};

/// Copy primitive between images.
///
/// Both operations fill `dst` at its own dimensions, resampling `src` with
/// `src`'s filter mode when the sizes differ. `dst` is never resized.
pub trait Blitter: Send {
    /// Plain resampling copy.
    fn blit(&mut self, src: &Image, dst: &mut Image) -> Result<(), BlurError>;

    /// Copy that runs one pass of `shader` with the given blur size.
    fn blit_pass(
        &mut self,
        src: &Image,
        dst: &mut Image,
        shader: &dyn BlurShader,
        pass: BlurPass,
        blur_size: f32,
    ) -> Result<(), BlurError>;
}
