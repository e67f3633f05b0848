use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blurring::domain::blur_parameters::BlurParameters;
use crate::pipeline::gaussian_blur_effect::BlurMode;
use crate::shared::constants::{
    DEFAULT_DOWNSAMPLE, DEFAULT_ITERATIONS, DEFAULT_SPREAD, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME,
};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to access settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// User-facing blur tuning, persisted as JSON.
///
/// Missing fields take their defaults, so older files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurSettings {
    pub enabled: bool,
    pub mode: BlurMode,
    pub iterations: u32,
    pub spread: f32,
    pub downsample: u32,
}

impl Default for BlurSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: BlurMode::Iterative,
            iterations: DEFAULT_ITERATIONS,
            spread: DEFAULT_SPREAD,
            downsample: DEFAULT_DOWNSAMPLE,
        }
    }
}

impl BlurSettings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Loads from the user config directory, falling back to defaults.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Err(e) = self.save_to(&path) {
                log::warn!("Could not save blur settings: {e}");
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)
    }

    /// Blur parameters clamped into their supported ranges.
    pub fn parameters(&self) -> BlurParameters {
        let raw = BlurParameters::new(self.iterations, self.spread, self.downsample);
        if raw.is_in_range() {
            return raw;
        }
        let clamped = raw.clamped();
        log::warn!("Blur settings out of range ({raw:?}); using {clamped:?}");
        clamped
    }
}
