//! Fine trigonometric lookup tables
//!
//! The tables are generated once on first use from the same closed forms the
//! classic precomputed tables were produced with, sampling the middle of each
//! fine angle: `round(FRACUNIT * f((i + 0.5) * 2π / FINEANGLES))`.

use crate::angle::{Angle, ANGLETOFINESHIFT};
use crate::fixed::{Fixed, FRACUNIT};
use std::f64::consts::PI;
use std::sync::LazyLock;

/// Fine angles in a full turn
pub const FINEANGLES: usize = 8192;
/// Mask for wrapping a fine index
pub const FINEMASK: usize = FINEANGLES - 1;
/// Entries in the tangent table (a half turn, -90° to +90°)
pub const FINETANGENT_LEN: usize = FINEANGLES / 2;

/// Sine table with a quarter turn of overlap so cosine can share it
static FINE_SINE: LazyLock<Box<[i32]>> = LazyLock::new(|| {
    (0..FINEANGLES * 5 / 4)
        .map(|i| sample(i, f64::sin))
        .collect()
});

static FINE_TANGENT: LazyLock<Box<[i32]>> = LazyLock::new(|| {
    (0..FINETANGENT_LEN)
        .map(|i| {
            let a = (i as f64 - (FINEANGLES / 4) as f64 + 0.5) * 2.0 * PI / FINEANGLES as f64;
            let t = (a.tan() * FRACUNIT as f64).round();
            t.clamp(i32::MIN as f64, i32::MAX as f64) as i32
        })
        .collect()
});

fn sample(i: usize, f: fn(f64) -> f64) -> i32 {
    let a = (i as f64 + 0.5) * 2.0 * PI / FINEANGLES as f64;
    (f(a) * FRACUNIT as f64).round() as i32
}

#[inline]
pub fn fine_sine(angle: Angle) -> Fixed {
    Fixed(FINE_SINE[angle.fine_index() & FINEMASK])
}

#[inline]
pub fn fine_cosine(angle: Angle) -> Fixed {
    Fixed(FINE_SINE[(angle.fine_index() & FINEMASK) + FINEANGLES / 4])
}

/// Raw tangent table lookup; indices past either end clamp to the last entry
#[inline]
pub fn fine_tangent(index: usize) -> Fixed {
    Fixed(FINE_TANGENT[index.min(FINETANGENT_LEN - 1)])
}

/// Vertical slope for a pitch angle (positive pitch looks down)
///
/// Pitches at or beyond straight up or down clamp to the steepest table entry
/// on that side.
pub fn slope_for_pitch(pitch: Angle) -> Fixed {
    let limit = Angle::ANG90.0 as i32 - 1;
    let signed = (pitch.0 as i32).clamp(-limit, limit);
    let from_down = (Angle::ANG90.0 as i32 - signed) as u32;
    fine_tangent((from_down >> ANGLETOFINESHIFT) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_cosine_cardinals() {
        // Samples sit half a fine angle off the cardinal directions
        assert!((fine_sine(Angle::ANG90).raw() - FRACUNIT).abs() <= 1);
        assert!((fine_cosine(Angle::ZERO).raw() - FRACUNIT).abs() <= 1);
        assert!(fine_sine(Angle::ZERO).raw().abs() < 30);
        assert!(fine_cosine(Angle::ANG90).raw().abs() < 30);
        assert!((fine_cosine(Angle::ANG180).raw() + FRACUNIT).abs() <= 1);
    }

    #[test]
    fn test_tangent_symmetry() {
        assert_eq!(fine_tangent(2048).raw(), -fine_tangent(2047).raw());
        assert!(fine_tangent(2048).raw() > 0);
        assert!(fine_tangent(3072).raw() > FRACUNIT - 100);
    }

    #[test]
    fn test_tangent_clamps() {
        assert_eq!(fine_tangent(FINETANGENT_LEN + 50), fine_tangent(FINETANGENT_LEN - 1));
    }

    #[test]
    fn test_slope_for_pitch() {
        // Level view is a near-zero slope, looking down is negative
        assert!(slope_for_pitch(Angle::ZERO).raw().abs() < 30);
        assert!(slope_for_pitch(Angle::degrees(20)).is_negative());
        assert!(slope_for_pitch(Angle::degrees(-20)).is_positive());
        let down45 = slope_for_pitch(Angle::ANG45).raw();
        assert!((down45 + FRACUNIT).abs() < 100);
    }

    #[test]
    fn test_slope_for_pitch_past_vertical() {
        let straight_down = fine_tangent(0);
        let straight_up = fine_tangent(FINETANGENT_LEN - 1);
        assert_eq!(slope_for_pitch(Angle::degrees(92)), straight_down);
        assert_eq!(slope_for_pitch(Angle::degrees(170)), straight_down);
        assert_eq!(slope_for_pitch(Angle::degrees(-92)), straight_up);
        assert_eq!(slope_for_pitch(Angle::degrees(-170)), straight_up);
        assert_eq!(slope_for_pitch(Angle::ANG90), straight_down);

        // Still monotonic up to the limit
        assert!(slope_for_pitch(Angle::degrees(89)) > straight_down);
        assert!(slope_for_pitch(Angle::degrees(89)) < slope_for_pitch(Angle::degrees(80)));
    }
}
