//! Fixed-point vectors

use crate::fixed::Fixed;
use glam::{DVec2, DVec3};
use std::ops::{Add, AddAssign, Sub};

/// Planar point or displacement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FVec2 {
    pub x: Fixed,
    pub y: Fixed,
}

impl FVec2 {
    pub const ZERO: FVec2 = FVec2::new(Fixed::ZERO, Fixed::ZERO);

    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Point from whole map units
    pub const fn from_int(x: i32, y: i32) -> Self {
        Self::new(Fixed::from_int(x), Fixed::from_int(y))
    }

    /// Component-wise fixed-point scale
    #[inline]
    pub const fn scale(self, s: Fixed) -> FVec2 {
        FVec2::new(self.x.mul(s), self.y.mul(s))
    }

    #[inline]
    pub const fn extend(self, z: Fixed) -> FVec3 {
        FVec3::new(self.x, self.y, z)
    }

    pub fn to_dvec2(self) -> DVec2 {
        DVec2::new(self.x.to_f64(), self.y.to_f64())
    }
}

impl From<DVec2> for FVec2 {
    fn from(v: DVec2) -> Self {
        FVec2::new(Fixed::from_f64(v.x), Fixed::from_f64(v.y))
    }
}

impl Add for FVec2 {
    type Output = FVec2;

    #[inline]
    fn add(self, rhs: FVec2) -> FVec2 {
        FVec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for FVec2 {
    type Output = FVec2;

    #[inline]
    fn sub(self, rhs: FVec2) -> FVec2 {
        FVec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Point or displacement in space; z is up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FVec3 {
    pub x: Fixed,
    pub y: Fixed,
    pub z: Fixed,
}

impl FVec3 {
    pub const ZERO: FVec3 = FVec3::new(Fixed::ZERO, Fixed::ZERO, Fixed::ZERO);

    pub const fn new(x: Fixed, y: Fixed, z: Fixed) -> Self {
        Self { x, y, z }
    }

    pub const fn from_int(x: i32, y: i32, z: i32) -> Self {
        Self::new(Fixed::from_int(x), Fixed::from_int(y), Fixed::from_int(z))
    }

    #[inline]
    pub const fn xy(self) -> FVec2 {
        FVec2::new(self.x, self.y)
    }

    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x.to_f64(), self.y.to_f64(), self.z.to_f64())
    }
}

impl From<DVec3> for FVec3 {
    fn from(v: DVec3) -> Self {
        FVec3::new(Fixed::from_f64(v.x), Fixed::from_f64(v.y), Fixed::from_f64(v.z))
    }
}

impl Add for FVec3 {
    type Output = FVec3;

    #[inline]
    fn add(self, rhs: FVec3) -> FVec3 {
        FVec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for FVec3 {
    #[inline]
    fn add_assign(&mut self, rhs: FVec3) {
        *self = *self + rhs;
    }
}

impl Sub for FVec3 {
    type Output = FVec3;

    #[inline]
    fn sub(self, rhs: FVec3) -> FVec3 {
        FVec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
