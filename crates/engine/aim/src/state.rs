//! Ray state propagated across portal crossings

use crate::world::{GroupId, PortalLink};
use geom::{FVec2, FVec3, Fixed};

/// Hard ceiling on portal crossings along one chain
pub const RECURSION_LIMIT: u32 = 64;

/// Context of one traversal branch
///
/// Copied, never shared: a crossing derives a fresh state for the far side and
/// the parent's state is left as it was.
///
/// Heights along the ray are `origin.z + slope * total_distance`, where the total
/// distance counts from the very first origin. Only the planar part of `origin`
/// moves to the crossing point; its height stays the eye height carried through
/// every portal delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayState {
    /// Distance travelled before this segment began
    pub origin_dist: Fixed,
    pub bottom_slope: Fixed,
    pub top_slope: Fixed,
    pub origin: FVec3,
    pub group: GroupId,
    /// Portal crossings so far
    pub depth: u32,
}

impl RayState {
    /// Fresh state at the start of a resolution
    pub fn new(origin: FVec3, group: GroupId, bottom_slope: Fixed, top_slope: Fixed) -> Self {
        Self {
            origin_dist: Fixed::ZERO,
            bottom_slope,
            top_slope,
            origin,
            group,
            depth: 0,
        }
    }

    /// A cone whose top does not clear its bottom lets nothing through
    #[inline]
    pub fn is_open(&self) -> bool {
        self.top_slope > self.bottom_slope
    }

    /// Total distance of a point `frac` along a segment of length `range`
    #[inline]
    pub fn total_dist(&self, range: Fixed, frac: Fixed) -> Fixed {
        self.origin_dist + range.mul(frac)
    }

    /// Height gained along `slope` over a total distance, saturating
    #[inline]
    pub fn rise(&self, slope: Fixed, total: Fixed) -> Fixed {
        slope.saturating_mul(total)
    }

    /// Ray height at a total distance along the given slope
    #[inline]
    pub fn height_at(&self, slope: Fixed, total: Fixed) -> Fixed {
        self.origin.z.saturating_add(self.rise(slope, total))
    }

    /// Slope from the eye to height `z` at a total distance
    #[inline]
    pub fn slope_to(&self, z: Fixed, total: Fixed) -> Fixed {
        (z - self.origin.z).div(total)
    }

    /// Midline of the cone
    pub fn centerline(&self) -> Fixed {
        self.top_slope.midpoint(self.bottom_slope)
    }

    pub fn can_cross(&self) -> bool {
        self.depth < RECURSION_LIMIT
    }

    /// State on the far side of a portal
    ///
    /// `at` is the crossing point in this state's frame. The result is moved into
    /// the destination frame by the portal delta and is one level deeper. Slopes
    /// are carried over; callers clamp them where the crossing requires it.
    pub fn cross(&self, at: FVec2, link: &PortalLink, origin_dist: Fixed) -> RayState {
        RayState {
            origin_dist,
            origin: at.extend(self.origin.z) + link.delta,
            group: link.to_group,
            depth: self.depth + 1,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> RayState {
        RayState::new(
            FVec3::from_int(0, 0, 36),
            GroupId(1),
            Fixed::from_f64(-0.625),
            Fixed::from_f64(0.625),
        )
    }

    #[test]
    fn test_open_cone() {
        let mut s = state();
        assert!(s.is_open());
        s.bottom_slope = s.top_slope;
        assert!(!s.is_open(), "equal slopes must count as collapsed");
    }

    #[test]
    fn test_heights_and_slopes() {
        let s = state();
        let total = Fixed::from_int(160);
        assert_eq!(s.height_at(s.top_slope, total), Fixed::from_int(136));
        assert_eq!(s.slope_to(Fixed::from_int(136), total), Fixed::from_f64(0.625));
        assert_eq!(s.centerline(), Fixed::ZERO);
    }

    #[test]
    fn test_height_saturates_for_near_vertical_slopes() {
        let s = state();
        let total = Fixed::from_int(1000);
        assert_eq!(s.rise(Fixed::from_int(-2600), total), Fixed::MIN);
        assert_eq!(s.height_at(Fixed::from_int(-2600), total), Fixed::MIN + s.origin.z);
        assert_eq!(s.height_at(Fixed::from_int(2600), total), Fixed::MAX);
    }

    #[test]
    fn test_total_dist_accumulates() {
        let mut s = state();
        s.origin_dist = Fixed::from_int(200);
        assert_eq!(
            s.total_dist(Fixed::from_int(800), Fixed::ONE.mul(Fixed::from_f64(0.25))),
            Fixed::from_int(400)
        );
    }

    #[test]
    fn test_cross_translates_and_deepens() {
        let s = state();
        let link = PortalLink {
            to_group: GroupId(2),
            delta: FVec3::from_int(0, 2048, -16),
        };
        let next = s.cross(FVec2::from_int(200, 0), &link, Fixed::from_int(200));
        assert_eq!(next.origin, FVec3::from_int(200, 2048, 20));
        assert_eq!(next.group, GroupId(2));
        assert_eq!(next.depth, 1);
        assert_eq!(next.origin_dist, Fixed::from_int(200));
        assert_eq!(next.top_slope, s.top_slope);
        // The parent is untouched
        assert_eq!(s.depth, 0);
    }

    #[test]
    fn test_recursion_ceiling() {
        let mut s = state();
        s.depth = RECURSION_LIMIT - 1;
        assert!(s.can_cross());
        s.depth = RECURSION_LIMIT;
        assert!(!s.can_cross());
    }
}
