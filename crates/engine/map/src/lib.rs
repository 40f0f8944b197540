//! Portal levels
//!
//! A concrete world for the autoaim resolver: polygonal regions with floor and
//! ceiling heights, the lines between them, actors standing in them, and the
//! portals that join separate coordinate groups. [`Level`] implements the
//! [`aim::world`] traits, so it can be handed straight to an
//! [`aim::Resolver`].
//!
//! # Modules
//!
//! - [`level`]: the validated in-memory level and its world queries
//! - [`path`]: intercept collection along a trace
//! - [`def`]: serde level descriptions with name references
//! - [`builder`]: programmatic construction
//! - [`loader`]: `.toml` and `.ron` level files
//! - [`error`]: load and validation errors

pub mod builder;
pub mod def;
pub mod error;
pub mod level;
pub mod loader;
pub mod path;

pub use builder::LevelBuilder;
pub use def::{ActorDef, LevelDef, LineDef, PortalDef, RegionDef, SurfaceDef};
pub use error::LevelError;
pub use level::{
    Actor, ActorId, Level, Line, LineFlags, LineId, Portal, PortalId, Region, RegionId, Surface,
};
pub use loader::LevelFormat;
pub use path::PathTraverser;
