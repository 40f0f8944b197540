//! 16.16 signed fixed-point scalar

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Number of fractional bits
pub const FRACBITS: u32 = 16;

/// Raw value of 1.0
pub const FRACUNIT: i32 = 1 << FRACBITS;

/// 16.16 fixed-point number
///
/// Addition and subtraction wrap like the integer they are stored in. Use
/// [`Fixed::mul`] and [`Fixed::div`] for products and quotients; they are
/// deliberately not operator overloads so that every rescale is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(pub i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(FRACUNIT);
    pub const MIN: Fixed = Fixed(i32::MIN);
    pub const MAX: Fixed = Fixed(i32::MAX);

    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Whole map units
    #[inline]
    pub const fn from_int(units: i32) -> Self {
        Self(units.wrapping_shl(FRACBITS))
    }

    /// Rounds to the nearest representable value, saturating at the range ends
    pub fn from_f64(value: f64) -> Self {
        let scaled = (value * FRACUNIT as f64).round();
        Self(scaled.clamp(i32::MIN as f64, i32::MAX as f64) as i32)
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / FRACUNIT as f64
    }

    /// Whole units, truncated toward negative infinity (arithmetic shift)
    #[inline]
    pub const fn to_int(self) -> i32 {
        self.0 >> FRACBITS
    }

    /// Fixed-point product
    #[inline]
    pub const fn mul(self, rhs: Fixed) -> Fixed {
        Fixed(((self.0 as i64 * rhs.0 as i64) >> FRACBITS) as i32)
    }

    /// Product clamped to the representable range
    pub const fn saturating_mul(self, rhs: Fixed) -> Fixed {
        let product = (self.0 as i64 * rhs.0 as i64) >> FRACBITS;
        if product > i32::MAX as i64 {
            Fixed::MAX
        } else if product < i32::MIN as i64 {
            Fixed::MIN
        } else {
            Fixed(product as i32)
        }
    }

    #[inline]
    pub const fn saturating_add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_add(rhs.0))
    }

    /// Fixed-point quotient
    ///
    /// Saturates to [`Fixed::MIN`] / [`Fixed::MAX`] when the result would not fit,
    /// including division by zero.
    pub const fn div(self, rhs: Fixed) -> Fixed {
        let a = self.0 as i64;
        let b = rhs.0 as i64;
        if (a.abs() >> 14) >= b.abs() {
            return if (a ^ b) < 0 { Fixed::MIN } else { Fixed::MAX };
        }
        Fixed(((a << FRACBITS) / b) as i32)
    }

    #[inline]
    pub const fn abs(self) -> Fixed {
        Fixed(self.0.wrapping_abs())
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Midpoint without overflow
    #[inline]
    pub const fn midpoint(self, other: Fixed) -> Fixed {
        Fixed(((self.0 as i64 + other.0 as i64) / 2) as i32)
    }
}

impl Add for Fixed {
    type Output = Fixed;

    #[inline]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, rhs: Fixed) {
        *self = *self + rhs;
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    #[inline]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for Fixed {
    #[inline]
    fn sub_assign(&mut self, rhs: Fixed) {
        *self = *self - rhs;
    }
}

impl Neg for Fixed {
    type Output = Fixed;

    #[inline]
    fn neg(self) -> Fixed {
        Fixed(self.0.wrapping_neg())
    }
}

impl From<i32> for Fixed {
    fn from(units: i32) -> Self {
        Fixed::from_int(units)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.to_f64())
    }
}
