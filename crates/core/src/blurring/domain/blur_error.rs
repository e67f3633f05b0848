use thiserror::Error;

use super::blur_shader::BlurPass;

#[derive(Error, Debug)]
pub enum BlurError {
    #[error("failed to allocate {width}x{height} image: {reason}")]
    Allocation {
        width: u32,
        height: u32,
        reason: String,
    },
    #[error("channel count mismatch: source has {src}, destination has {dst}")]
    ChannelMismatch { src: u8, dst: u8 },
    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(u8),
    #[error("shader pass {} ({pass:?}) failed: {message}", .pass.index())]
    Shader { pass: BlurPass, message: String },
}
