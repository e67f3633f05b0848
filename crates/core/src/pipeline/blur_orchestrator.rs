use crate::blurring::domain::blitter::Blitter;
use crate::blurring::domain::blur_error::BlurError;
use crate::blurring::domain::blur_parameters::{scratch_dimensions, BlurParameters};
use crate::blurring::domain::blur_shader::{BlurPass, BlurShader};
use crate::blurring::domain::image_allocator::ImageAllocator;
use crate::blurring::infrastructure::cpu_blitter::CpuBlitter;
use crate::blurring::infrastructure::temporary_image_pool::TemporaryImagePool;
use crate::shared::constants::BASE_BLUR_SIZE;
use crate::shared::image::{FilterMode, Image};

/// What a blur invocation ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlurOutcome {
    /// No usable shader; the source was copied straight to the destination.
    PassThrough,
    Blurred {
        scratch_width: u32,
        scratch_height: u32,
        passes_run: u32,
    },
}

/// Downsampled ping-pong blur: source → A, then `iterations` rounds of
/// vertical A → B and horizontal B → A, then A → destination.
///
/// Scratch images come from the allocator and go back to it before every
/// return, including error returns.
pub struct BlurOrchestrator {
    allocator: Box<dyn ImageAllocator>,
    blitter: Box<dyn Blitter>,
}

impl BlurOrchestrator {
    pub fn new(allocator: Box<dyn ImageAllocator>, blitter: Box<dyn Blitter>) -> Self {
        Self { allocator, blitter }
    }

    /// Orchestrator backed by [`TemporaryImagePool`] and [`CpuBlitter`].
    pub fn cpu() -> Self {
        Self::new(
            Box::new(TemporaryImagePool::new()),
            Box::new(CpuBlitter::new()),
        )
    }

    /// Blurs `source` into `destination` with `params.iterations` pass pairs.
    ///
    /// A missing or unsupported shader degrades to a plain copy. The
    /// destination keeps its dimensions.
    pub fn apply(
        &mut self,
        source: &Image,
        destination: &mut Image,
        shader: Option<&dyn BlurShader>,
        params: &BlurParameters,
    ) -> Result<BlurOutcome, BlurError> {
        let Some(shader) = shader.filter(|s| s.is_supported()) else {
            return self.pass_through(source, destination);
        };

        let (width, height) = scratch_size(source, params.downsample);
        let mut ping = self.allocator.acquire(width, height, source.channels())?;
        let mut pong = match self.allocator.acquire(width, height, source.channels()) {
            Ok(image) => image,
            Err(e) => {
                self.allocator.release(ping);
                return Err(e);
            }
        };
        ping.set_filter(FilterMode::Bilinear);

        let result = self.ping_pong(source, destination, shader, params, &mut ping, &mut pong);

        self.allocator.release(ping);
        self.allocator.release(pong);

        let passes_run = result?;
        log::debug!(
            "Blurred {}x{} via {width}x{height} scratch ({} iterations, spread {:.2})",
            source.width(),
            source.height(),
            params.iterations,
            params.spread
        );
        Ok(BlurOutcome::Blurred {
            scratch_width: width,
            scratch_height: height,
            passes_run,
        })
    }

    /// Non-iterative variant: vertical pass source → scratch, horizontal
    /// pass scratch → destination, both at the base blur size.
    pub fn apply_single_pass(
        &mut self,
        source: &Image,
        destination: &mut Image,
        shader: Option<&dyn BlurShader>,
        downsample: u32,
    ) -> Result<BlurOutcome, BlurError> {
        let Some(shader) = shader.filter(|s| s.is_supported()) else {
            return self.pass_through(source, destination);
        };

        let (width, height) = scratch_size(source, downsample);
        let mut buffer = self.allocator.acquire(width, height, source.channels())?;
        buffer.set_filter(FilterMode::Bilinear);

        let result = self.single_pass(source, destination, shader, &mut buffer);
        self.allocator.release(buffer);
        result?;

        Ok(BlurOutcome::Blurred {
            scratch_width: width,
            scratch_height: height,
            passes_run: 2,
        })
    }

    fn pass_through(
        &mut self,
        source: &Image,
        destination: &mut Image,
    ) -> Result<BlurOutcome, BlurError> {
        log::debug!("Blur shader unavailable, copying source to destination");
        self.blitter.blit(source, destination)?;
        Ok(BlurOutcome::PassThrough)
    }

    /// Runs every blit of the iterative blur and returns the shader pass count.
    fn ping_pong(
        &mut self,
        source: &Image,
        destination: &mut Image,
        shader: &dyn BlurShader,
        params: &BlurParameters,
        ping: &mut Image,
        pong: &mut Image,
    ) -> Result<u32, BlurError> {
        self.blitter.blit(source, ping)?;

        let mut passes_run = 0;
        for blur_size in params.blur_sizes() {
            log::trace!("Blur iteration at blur size {blur_size:.2}");
            self.blitter
                .blit_pass(ping, pong, shader, BlurPass::Vertical, blur_size)?;
            self.blitter
                .blit_pass(pong, ping, shader, BlurPass::Horizontal, blur_size)?;
            passes_run += 2;
        }

        // Pairs always end writing A, so A holds the result for any count
        self.blitter.blit(ping, destination)?;
        Ok(passes_run)
    }

    fn single_pass(
        &mut self,
        source: &Image,
        destination: &mut Image,
        shader: &dyn BlurShader,
        buffer: &mut Image,
    ) -> Result<(), BlurError> {
        self.blitter
            .blit_pass(source, buffer, shader, BlurPass::Vertical, BASE_BLUR_SIZE)?;
        self.blitter
            .blit_pass(buffer, destination, shader, BlurPass::Horizontal, BASE_BLUR_SIZE)
    }
}

impl Default for BlurOrchestrator {
    fn default() -> Self {
        Self::cpu()
    }
}

fn scratch_size(source: &Image, downsample: u32) -> (u32, u32) {
    let (size, clamped) = scratch_dimensions(source.width(), source.height(), downsample);
    if clamped {
        log::warn!(
            "Downsample {downsample} collapses {}x{} source; clamping scratch to {}x{}",
            source.width(),
            source.height(),
            size.0,
            size.1
        );
    }
    size
}
