pub mod blitter;
pub mod blur_error;
pub mod blur_parameters;
pub mod blur_shader;
pub mod image_allocator;
