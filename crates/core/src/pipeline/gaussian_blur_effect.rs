use serde::{Deserialize, Serialize};

use crate::blurring::domain::blur_error::BlurError;
use crate::blurring::domain::blur_parameters::BlurParameters;
use crate::blurring::domain::blur_shader::BlurShader;
use crate::config::blur_settings::BlurSettings;
use crate::shared::image::Image;

use super::blur_orchestrator::{BlurOrchestrator, BlurOutcome};

/// Which blur procedure the effect runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurMode {
    /// One vertical and one horizontal pass through a single scratch image.
    SinglePass,
    /// Repeated pass pairs with a growing blur size.
    #[default]
    Iterative,
}

/// Post-processing blur attached to a render path, run once per frame.
pub struct GaussianBlurEffect {
    pub params: BlurParameters,
    pub mode: BlurMode,
    pub enabled: bool,
    shader: Option<Box<dyn BlurShader>>,
}

impl GaussianBlurEffect {
    pub fn new(shader: Option<Box<dyn BlurShader>>) -> Self {
        Self {
            params: BlurParameters::default(),
            mode: BlurMode::default(),
            enabled: true,
            shader,
        }
    }

    pub fn from_settings(settings: &BlurSettings, shader: Option<Box<dyn BlurShader>>) -> Self {
        Self {
            params: settings.parameters(),
            mode: settings.mode,
            enabled: settings.enabled,
            shader,
        }
    }

    pub fn shader(&self) -> Option<&dyn BlurShader> {
        self.shader.as_deref()
    }

    pub fn set_shader(&mut self, shader: Option<Box<dyn BlurShader>>) {
        self.shader = shader;
    }

    /// Renders `source` into `destination`; a disabled effect is a plain copy.
    pub fn render(
        &self,
        orchestrator: &mut BlurOrchestrator,
        source: &Image,
        destination: &mut Image,
    ) -> Result<BlurOutcome, BlurError> {
        let shader = if self.enabled { self.shader() } else { None };
        match self.mode {
            BlurMode::Iterative => orchestrator.apply(source, destination, shader, &self.params),
            BlurMode::SinglePass => {
                orchestrator.apply_single_pass(source, destination, shader, self.params.downsample)
            }
        }
    }
}
