//! Level files on disk
//!
//! The format follows the extension: `.toml` or `.ron`. Both deserialize into
//! the same [`LevelDef`].

use crate::def::LevelDef;
use crate::error::LevelError;
use crate::level::Level;
use std::fs;
use std::path::Path;
use tracing::info;

/// Supported level file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelFormat {
    Toml,
    Ron,
}

impl LevelFormat {
    /// Format for a path, by extension
    pub fn from_path(path: &Path) -> Result<Self, LevelError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(LevelFormat::Toml),
            Some("ron") => Ok(LevelFormat::Ron),
            other => Err(LevelError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    pub fn parse(self, text: &str) -> Result<LevelDef, LevelError> {
        Ok(match self {
            LevelFormat::Toml => toml::from_str(text)?,
            LevelFormat::Ron => ron::from_str(text)?,
        })
    }
}

impl Level {
    /// Load, parse and validate a level file
    ///
    /// A level without a name takes the file stem.
    pub fn load(path: impl AsRef<Path>) -> Result<Level, LevelError> {
        let path = path.as_ref();
        let format = LevelFormat::from_path(path)?;
        let text = fs::read_to_string(path)?;
        let mut def = format.parse(&text)?;
        if def.name.is_empty() {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                def.name = stem.to_string();
            }
        }

        let level = Level::from_def(&def)?;
        info!(path = %path.display(), name = %level.name(), "level loaded");
        Ok(level)
    }

    pub fn from_toml_str(text: &str) -> Result<Level, LevelError> {
        Level::from_def(&LevelFormat::Toml.parse(text)?)
    }

    pub fn from_ron_str(text: &str) -> Result<Level, LevelError> {
        Level::from_def(&LevelFormat::Ron.parse(text)?)
    }
}
