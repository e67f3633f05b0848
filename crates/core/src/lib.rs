//! Downsampled, iterative two-pass blur orchestration.
//!
//! [`pipeline::blur_orchestrator::BlurOrchestrator`] drives a caller-supplied
//! [`blurring::domain::blur_shader::BlurShader`] over pooled scratch images.
//! The shader owns the kernel; this crate only sequences the blits.

pub mod blurring;
pub mod config;
pub mod pipeline;
pub mod shared;
