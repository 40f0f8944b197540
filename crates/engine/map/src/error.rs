use std::io;
use thiserror::Error;

/// Errors from loading or validating a level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("ron parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("unsupported level format: {0:?} (expected .toml or .ron)")]
    UnsupportedFormat(String),
    #[error("duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },
    #[error("unknown region: {0}")]
    UnknownRegion(String),
    #[error("unknown portal: {0}")]
    UnknownPortal(String),
    #[error("unknown actor: {0}")]
    UnknownActor(String),
    #[error("region {0} needs at least three outline points")]
    EmptyOutline(String),
    #[error("line {index} has zero length")]
    DegenerateLine { index: usize },
    #[error("actor {0} is outside every region")]
    ActorOutside(String),
}
