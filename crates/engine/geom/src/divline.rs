//! Parametric lines
//!
//! A [`DivLine`] is an origin plus a delta. Traces use it for the segment being
//! walked, and map lines use it for side tests and intercepts. All predicates
//! here use widened integer products, so they are exact for any pair of fixed
//! points.

use crate::fixed::{Fixed, FRACBITS};
use crate::vec::FVec2;

/// Which side of a directed line a point lies on
///
/// Front is the right-hand side when walking from the origin along the delta.
/// Points exactly on the line count as back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Front,
    Back,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DivLine {
    pub origin: FVec2,
    pub delta: FVec2,
}

impl DivLine {
    pub const fn new(origin: FVec2, delta: FVec2) -> Self {
        Self { origin, delta }
    }

    /// Line from `from` to `to`
    pub fn between(from: FVec2, to: FVec2) -> Self {
        Self::new(from, to - from)
    }

    /// End of the segment (`origin + delta`)
    #[inline]
    pub fn end(&self) -> FVec2 {
        self.origin + self.delta
    }

    /// Point at a fraction of the delta
    #[inline]
    pub fn point_at(&self, frac: Fixed) -> FVec2 {
        self.origin + self.delta.scale(frac)
    }

    pub fn side(&self, p: FVec2) -> Side {
        let dx = p.x.raw() as i64 - self.origin.x.raw() as i64;
        let dy = p.y.raw() as i64 - self.origin.y.raw() as i64;
        let left = self.delta.y.raw() as i64 * dx;
        let right = dy * self.delta.x.raw() as i64;
        if right < left {
            Side::Front
        } else {
            Side::Back
        }
    }

    /// Fraction along `self` where it crosses the infinite extension of `other`
    ///
    /// `None` when the lines are parallel.
    pub fn intercept(&self, other: &DivLine) -> Option<Fixed> {
        let den = other.delta.y.raw() as i128 * self.delta.x.raw() as i128
            - other.delta.x.raw() as i128 * self.delta.y.raw() as i128;
        if den == 0 {
            return None;
        }
        let num = (other.origin.x.raw() as i128 - self.origin.x.raw() as i128)
            * other.delta.y.raw() as i128
            + (self.origin.y.raw() as i128 - other.origin.y.raw() as i128)
                * other.delta.x.raw() as i128;
        let frac = (num << FRACBITS) / den;
        Some(Fixed(frac.clamp(i32::MIN as i128, i32::MAX as i128) as i32))
    }
}
