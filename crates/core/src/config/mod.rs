pub mod blur_settings;
