//! Resolver tuning
//!
//! Loaded from the `[aim]` table of a tool config, or built with [`Default`].
//! Every field is optional in the file.

use geom::{Angle, Fixed};
use serde::{Deserialize, Serialize};

/// Autoaim parameters in map units and degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    /// Eye height above the middle of the shooter (default: 8)
    pub eye_offset: f64,
    /// Half-height of the cone for shooters without pitch, as a slope (default: 100/160)
    pub default_slope: f64,
    /// Half-angle of the cone around a pitched shooter's look direction (default: 32°)
    pub pitch_spread: i32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            eye_offset: 8.0,
            default_slope: 100.0 / 160.0,
            pitch_spread: 32,
        }
    }
}

impl AimConfig {
    pub fn eye_offset(&self) -> Fixed {
        Fixed::from_f64(self.eye_offset)
    }

    pub fn default_slope(&self) -> Fixed {
        Fixed::from_f64(self.default_slope)
    }

    pub fn pitch_spread(&self) -> Angle {
        Angle::degrees(self.pitch_spread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AimConfig::default();
        assert_eq!(config.eye_offset(), Fixed::from_int(8));
        // 100/160 in 16.16
        assert_eq!(config.default_slope().raw(), 40960);
        assert_eq!(config.pitch_spread(), Angle::degrees(32));
    }

    #[test]
    fn test_partial_toml() {
        let config: AimConfig = toml::from_str("eye_offset = 12.5").expect("valid toml");
        assert_eq!(config.eye_offset, 12.5);
        assert_eq!(config.pitch_spread, 32);

        let config: AimConfig = toml::from_str("").expect("empty table");
        assert_eq!(config, AimConfig::default());
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(toml::from_str::<AimConfig>("pitch_spread = \"wide\"").is_err());
    }
}
