use serde::{Deserialize, Serialize};
use std::path::Path;
use townwalk_control::{CameraConfig, ControlConfigError, PlayerConfig};
use townwalk_input::{InputConfig, InputConfigError};

/// Errors from loading or validating a game configuration.
#[derive(Debug, thiserror::Error)]
pub enum GameConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("input config: {0}")]
    Input(#[from] InputConfigError),
    #[error("control config: {0}")]
    Control(#[from] ControlConfigError),
}

/// Every tunable of a session. Missing sections and fields fall back to
/// their defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub input: InputConfig,
    pub player: PlayerConfig,
    pub camera: CameraConfig,
}

impl GameConfig {
    /// Read a YAML file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameConfigError> {
        let file = std::fs::File::open(path.as_ref())?;
        let config: Self = serde_yaml::from_reader(file)?;
        config.validate()?;
        tracing::debug!(path = %path.as_ref().display(), "loaded game config");
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GameConfigError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), GameConfigError> {
        self.input.validate()?;
        self.player.validate()?;
        self.camera.validate()?;
        Ok(())
    }
}
