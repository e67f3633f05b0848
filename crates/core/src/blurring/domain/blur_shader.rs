use crate::shared::image::Image;

use super::blur_error::BlurError;

/// One of the two passes of a separable blur program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlurPass {
    Vertical,
    Horizontal,
}

impl BlurPass {
    /// Pass index within the shader program.
    pub fn index(self) -> usize {
        match self {
            BlurPass::Vertical => 0,
            BlurPass::Horizontal => 1,
        }
    }
}

/// Two-pass blur program supplied by the caller.
///
/// The blur size is an explicit argument of every pass rather than a
/// parameter stored on the program, so one shader can serve any number of
/// orchestrators without coordination.
pub trait BlurShader: Send + Sync {
    /// Whether the program loaded and exposes both passes.
    fn is_supported(&self) -> bool {
        true
    }

    /// Runs `pass` reading `src` and writing every pixel of `dst`.
    ///
    /// `src` and `dst` always have the same dimensions and channel count.
    fn run(
        &self,
        pass: BlurPass,
        blur_size: f32,
        src: &Image,
        dst: &mut Image,
    ) -> Result<(), BlurError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_indices() {
        assert_eq!(BlurPass::Vertical.index(), 0);
        assert_eq!(BlurPass::Horizontal.index(), 1);
    }

    struct CopyShader;

    impl BlurShader for CopyShader {
        fn run(
            &self,
            _pass: BlurPass,
            _blur_size: f32,
            src: &Image,
            dst: &mut Image,
        ) -> Result<(), BlurError> {
            dst.data_mut().copy_from_slice(src.data());
            Ok(())
        }
    }

    #[test]
    fn test_shaders_are_supported_by_default() {
        assert!(CopyShader.is_supported());
    }
}
