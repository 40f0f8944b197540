//! Binary angles
//!
//! A full turn maps onto the whole `u32` range, so wrapping arithmetic is angle
//! arithmetic. 0 faces +x, `ANG90` faces +y.

use std::ops::{Add, Sub};

/// Shift from a binary angle to a fine-table index
pub const ANGLETOFINESHIFT: u32 = 19;

/// 32-bit binary angle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Angle(pub u32);

impl Angle {
    pub const ZERO: Angle = Angle(0);
    pub const ANG45: Angle = Angle(0x2000_0000);
    pub const ANG90: Angle = Angle(0x4000_0000);
    pub const ANG180: Angle = Angle(0x8000_0000);
    pub const ANG270: Angle = Angle(0xc000_0000);
    /// One degree, truncated the classic way (`ANG45 / 45`)
    pub const ANG1: Angle = Angle(0x2000_0000 / 45);

    /// Angle from degrees; negative values wrap to the equivalent positive turn
    pub fn from_degrees(degrees: f64) -> Self {
        let turns = (degrees / 360.0).rem_euclid(1.0);
        Angle((turns * 4_294_967_296.0) as u64 as u32)
    }

    /// Degrees in `[0, 360)`
    pub fn to_degrees(self) -> f64 {
        self.0 as f64 * 360.0 / 4_294_967_296.0
    }

    /// Degrees in `(-180, 180]`, useful for pitch
    pub fn to_signed_degrees(self) -> f64 {
        self.0 as i32 as f64 * 360.0 / 4_294_967_296.0
    }

    /// Whole degrees as a multiple of [`Angle::ANG1`], wrapping for negatives
    pub const fn degrees(n: i32) -> Self {
        Angle(Self::ANG1.0.wrapping_mul(n as u32))
    }

    /// Index into the fine sine/cosine tables
    #[inline]
    pub const fn fine_index(self) -> usize {
        (self.0 >> ANGLETOFINESHIFT) as usize
    }
}

impl Add for Angle {
    type Output = Angle;

    #[inline]
    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Angle {
    type Output = Angle;

    #[inline]
    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0.wrapping_sub(rhs.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_degrees() {
        assert_eq!(Angle::from_degrees(0.0), Angle::ZERO);
        assert_eq!(Angle::from_degrees(90.0), Angle::ANG90);
        assert_eq!(Angle::from_degrees(180.0), Angle::ANG180);
        assert_eq!(Angle::from_degrees(-90.0), Angle::ANG270);
        assert_eq!(Angle::from_degrees(360.0), Angle::ZERO);
    }

    #[test]
    fn test_signed_degrees() {
        assert!((Angle::from_degrees(-10.0).to_signed_degrees() + 10.0).abs() < 1e-6);
        assert!((Angle::ANG45.to_degrees() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_wrapping() {
        assert_eq!(Angle::ANG270 + Angle::ANG180, Angle::ANG90);
        assert_eq!(Angle::ZERO - Angle::ANG90, Angle::ANG270);
        assert_eq!(Angle::degrees(-1), Angle::ZERO - Angle::ANG1);
    }

    #[test]
    fn test_fine_index() {
        assert_eq!(Angle::ZERO.fine_index(), 0);
        assert_eq!(Angle::ANG90.fine_index(), 2048);
        assert_eq!(Angle::ANG270.fine_index(), 6144);
    }
}
