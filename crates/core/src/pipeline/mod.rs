pub mod blur_orchestrator;
pub mod gaussian_blur_effect;
