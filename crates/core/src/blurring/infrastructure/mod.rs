pub mod cpu_blitter;
pub mod temporary_image_pool;
