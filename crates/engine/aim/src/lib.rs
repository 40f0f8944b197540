//! Portal-aware autoaim
//!
//! Given a shooter, a horizontal angle and a range, finds the closest actor the
//! shooter can aim at and the vertical slope to aim with. The ray is a vertical
//! cone that narrows at every step, ledge and lintel it passes. Where it meets a
//! portal (a floor, ceiling, line band or whole line leading to another group)
//! the search continues on the far side, up to [`RECURSION_LIMIT`] crossings
//! deep.
//!
//! The crate owns no geometry. A level implements the [`world`] traits and the
//! resolver borrows it for the duration of a call.
//!
//! # Modules
//!
//! - [`world`]: traits the level implements
//! - [`traverse`]: intercepts and the segment driver
//! - [`state`]: the per-branch ray state
//! - [`opening`]: vertical openings and cone narrowing
//! - [`crossing`]: portal crossing rules
//! - [`policy`]: which actors qualify as targets
//! - [`arbiter`]: closest-target bookkeeping
//! - [`resolver`]: the entry points
//! - [`config`]: tuning
//!
//! # Example
//!
//! ```ignore
//! use aim::{AimRequest, Resolver};
//! use geom::{Angle, Fixed};
//!
//! let result = Resolver::with_defaults(&level).resolve(&AimRequest {
//!     source: player,
//!     angle: Angle::from_degrees(90.0),
//!     range: Fixed::from_int(2048),
//!     mask: true,
//! });
//! if let Some(target) = result.target {
//!     println!("aim at {:?} with slope {}", target, result.slope);
//! }
//! ```

pub mod arbiter;
pub mod config;
pub mod crossing;
pub mod opening;
pub mod policy;
pub mod resolver;
pub mod state;
pub mod traverse;
pub mod world;

pub use arbiter::{Candidate, TargetArbiter};
pub use config::AimConfig;
pub use crossing::{Crossing, CrossingKind};
pub use policy::{DefaultPolicy, SlopeWindow, TargetPolicy};
pub use resolver::{aim_line_attack, AimRequest, AimResult, AimStats, Resolver};
pub use state::{RayState, RECURSION_LIMIT};
pub use traverse::{Intercept, InterceptKind, Segment, Traverse};
pub use world::{
    ActorFlags, ActorInfo, ActorModel, AimWorld, GroupId, LineInfo, Plane, PortalLink,
    PortalRegistry, PortalSurface, RegionInfo, SpatialIndex,
};
