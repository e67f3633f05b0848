use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma, LumaA, Pixel, Rgb, Rgba};

use crate::blurring::domain::blitter::Blitter;
use crate::blurring::domain::blur_error::BlurError;
use crate::blurring::domain::blur_shader::{BlurPass, BlurShader};
use crate::shared::image::{FilterMode, Image};

/// CPU blit primitive.
///
/// Resampling goes through `image::imageops::resize`, picking the filter
/// from the source image. Shader passes whose source and destination sizes
/// differ are fed a staging copy already resampled to the destination size.
pub struct CpuBlitter {
    staging: Option<Image>,
}

impl CpuBlitter {
    pub fn new() -> Self {
        Self { staging: None }
    }
}

impl Default for CpuBlitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Blitter for CpuBlitter {
    fn blit(&mut self, src: &Image, dst: &mut Image) -> Result<(), BlurError> {
        resample_into(src, dst)
    }

    fn blit_pass(
        &mut self,
        src: &Image,
        dst: &mut Image,
        shader: &dyn BlurShader,
        pass: BlurPass,
        blur_size: f32,
    ) -> Result<(), BlurError> {
        check_channels(src, dst)?;
        if src.dimensions() == dst.dimensions() {
            return shader.run(pass, blur_size, src, dst);
        }

        // Reuse the staging buffer while the destination size is stable
        let mut staging = match self.staging.take() {
            Some(s) if s.dimensions() == dst.dimensions() && s.channels() == dst.channels() => s,
            _ => Image::blank(dst.width(), dst.height(), dst.channels()),
        };
        let result =
            resample_into(src, &mut staging).and_then(|()| shader.run(pass, blur_size, &staging, dst));
        self.staging = Some(staging);
        result
    }
}

fn check_channels(src: &Image, dst: &Image) -> Result<(), BlurError> {
    if src.channels() != dst.channels() {
        return Err(BlurError::ChannelMismatch {
            src: src.channels(),
            dst: dst.channels(),
        });
    }
    Ok(())
}

/// Fill `dst` from `src`, resampling to `dst`'s dimensions when they differ.
fn resample_into(src: &Image, dst: &mut Image) -> Result<(), BlurError> {
    check_channels(src, dst)?;
    if src.dimensions() == dst.dimensions() {
        dst.data_mut().copy_from_slice(src.data());
        return Ok(());
    }

    let filter = match src.filter() {
        FilterMode::Point => FilterType::Nearest,
        FilterMode::Bilinear => FilterType::Triangle,
    };
    let (w, h) = src.dimensions();
    let (tw, th) = dst.dimensions();
    let resized = match src.channels() {
        1 => resize_raw::<Luma<u8>>(src.data(), w, h, tw, th, filter),
        2 => resize_raw::<LumaA<u8>>(src.data(), w, h, tw, th, filter),
        3 => resize_raw::<Rgb<u8>>(src.data(), w, h, tw, th, filter),
        4 => resize_raw::<Rgba<u8>>(src.data(), w, h, tw, th, filter),
        other => return Err(BlurError::UnsupportedChannels(other)),
    };
    let resized = resized.ok_or_else(|| BlurError::Allocation {
        width: w,
        height: h,
        reason: "source buffer does not match its dimensions".into(),
    })?;
    dst.data_mut().copy_from_slice(&resized);
    Ok(())
}

fn resize_raw<P>(
    data: &[u8],
    width: u32,
    height: u32,
    target_w: u32,
    target_h: u32,
    filter: FilterType,
) -> Option<Vec<u8>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let buffer = ImageBuffer::<P, &[u8]>::from_raw(width, height, data)?;
    Some(imageops::resize(&buffer, target_w, target_h, filter).into_raw())
}
