use aim::AimConfig;
use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Configuration for the aimtool binary.
///
/// ```toml
/// log = "info,aim=trace"
///
/// [aim]
/// default_slope = 0.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimtoolConfig {
    /// `tracing` filter directive used when `AIMTOOL_LOG` is unset.
    pub log: String,
    /// Resolver tuning.
    pub aim: AimConfig,
}

impl Default for AimtoolConfig {
    fn default() -> Self {
        Self {
            log: "info".into(),
            aim: AimConfig::default(),
        }
    }
}

impl AimtoolConfig {
    /// Loads the file given on the command line, else the one named by
    /// `AIMTOOL_CONFIG`, else the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| env::var("AIMTOOL_CONFIG").ok().map(PathBuf::from));
        match path {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in config {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.aim.default_slope > 0.0,
            "aim.default_slope must be positive, got {}",
            self.aim.default_slope
        );
        ensure!(
            (1..90).contains(&self.aim.pitch_spread),
            "aim.pitch_spread must be between 1 and 89 degrees, got {}",
            self.aim.pitch_spread
        );
        ensure!(
            self.aim.eye_offset.abs() < 1024.0,
            "aim.eye_offset {} is out of range",
            self.aim.eye_offset
        );
        Ok(())
    }
}
