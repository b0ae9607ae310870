use serde::{Deserialize, Serialize};

/// Errors from input configuration validation.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InputConfigError {
    #[error("max_radius must be positive, got {0}")]
    MaxRadius(f32),
    #[error("tap_threshold must be non-negative, got {0}")]
    TapThreshold(f32),
    #[error("look_zone must be in (0, 1], got {0}")]
    LookZone(f32),
}

/// Tunables for the drag tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Drag distance in pixels at which the joystick saturates.
    pub max_radius: f32,
    /// A release that never moved further than this is a tap.
    pub tap_threshold: f32,
    /// Right-hand fraction of the viewport where a touch becomes camera look.
    /// `None` routes every touch to the joystick.
    pub look_zone: Option<f32>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_radius: 80.0,
            tap_threshold: 5.0,
            look_zone: Some(0.5),
        }
    }
}

impl InputConfig {
    pub fn validate(&self) -> Result<(), InputConfigError> {
        if self.max_radius.is_nan() || self.max_radius <= 0.0 {
            return Err(InputConfigError::MaxRadius(self.max_radius));
        }
        if self.tap_threshold.is_nan() || self.tap_threshold < 0.0 {
            return Err(InputConfigError::TapThreshold(self.tap_threshold));
        }
        if let Some(zone) = self.look_zone {
            if zone.is_nan() || zone <= 0.0 || zone > 1.0 {
                return Err(InputConfigError::LookZone(zone));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(InputConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let bad_radius = InputConfig {
            max_radius: 0.0,
            ..Default::default()
        };
        assert_eq!(bad_radius.validate(), Err(InputConfigError::MaxRadius(0.0)));

        let nan_radius = InputConfig {
            max_radius: f32::NAN,
            ..Default::default()
        };
        assert!(nan_radius.validate().is_err());

        let bad_zone = InputConfig {
            look_zone: Some(1.5),
            ..Default::default()
        };
        assert_eq!(bad_zone.validate(), Err(InputConfigError::LookZone(1.5)));
    }
}
