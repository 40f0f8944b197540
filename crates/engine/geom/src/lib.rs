//! Fixed-point geometry kernel
//!
//! Every distance, height and slope the resolver touches is a 16.16 fixed-point
//! value, and every direction is a 32-bit binary angle. Keeping the arithmetic in
//! integers makes resolutions bit-for-bit reproducible across platforms.
//!
//! # Modules
//!
//! - [`fixed`]: the [`Fixed`] scalar
//! - [`angle`]: binary angles
//! - [`trig`]: fine sine/cosine/tangent lookup tables
//! - [`vec`]: two- and three-component fixed vectors
//! - [`divline`]: parametric lines, side tests and intercepts

pub mod angle;
pub mod divline;
pub mod fixed;
pub mod trig;
pub mod vec;

pub use angle::Angle;
pub use divline::{DivLine, Side};
pub use fixed::Fixed;
pub use trig::{fine_cosine, fine_sine, fine_tangent, slope_for_pitch};
pub use vec::{FVec2, FVec3};

// Re-export glam for convenience
pub use glam;
