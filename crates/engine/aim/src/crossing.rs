//! Portal crossing rules
//!
//! Each rule looks at one intercept and yields the states to explore on the far
//! side of whatever portal it exposes. None of them recurse; the resolver
//! decides whether a crossing is taken.
//!
//! - [`surface_crossings`]: a region's floor or ceiling plane
//! - [`edge_crossings`]: the lower/upper band of a two-sided line
//! - [`line_crossing`]: a whole line acting as a portal

use crate::state::RayState;
use crate::traverse::Segment;
use crate::world::{LineInfo, Plane, PortalLink, PortalRegistry, PortalSurface};
use geom::{FVec2, Fixed, Side};

/// Which portal a crossing went through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrossingKind {
    Ceiling,
    Floor,
    LowerEdge,
    UpperEdge,
    Line,
}

/// A derived state ready to explore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub kind: CrossingKind,
    /// Far-side state, already in the destination frame
    pub state: RayState,
    /// Fraction of the parent segment where the crossing happens
    pub frac: Fixed,
}

/// Up to two crossings from one intercept
pub type Crossings = std::iter::Flatten<std::array::IntoIter<Option<Crossing>, 2>>;

/// Where a floor or ceiling plane is crossed, if at all
///
/// `total` and `frac` locate the intercept being examined. `inside` tells whether
/// a planar point still belongs to the region that owns the plane.
#[allow(clippy::too_many_arguments)]
pub fn plane_crossing(
    state: &RayState,
    segment: &Segment,
    plane: Plane,
    plane_z: Fixed,
    link: &PortalLink,
    total: Fixed,
    frac: Fixed,
    inside: impl Fn(FVec2) -> bool,
) -> Option<Crossing> {
    let slope = match plane {
        Plane::Ceiling => state.top_slope,
        Plane::Floor => state.bottom_slope,
    };
    let rise = state.rise(slope, total);
    let hit_z = state.height_at(slope, total);
    let reached = match plane {
        Plane::Ceiling => hit_z > plane_z,
        Plane::Floor => hit_z < plane_z,
    };
    if !reached {
        return None;
    }

    let (total, frac, point) = if rise == Fixed::ZERO {
        (total, frac, segment.trace.point_at(frac))
    } else {
        // Scale back to where the ray meets the plane
        let ratio = (plane_z - state.origin.z).div(rise);
        let total = ratio.mul(total);
        let frac = (total - state.origin_dist).div(segment.range);
        // One fraction unit further so the point lands past the boundary
        (total, frac, segment.trace.point_at(frac + Fixed(1)))
    };

    if (frac + Fixed(1)) <= Fixed::ZERO || !inside(point) {
        return None;
    }

    let mut next = state.cross(point, link, total);
    let kind = match plane {
        Plane::Ceiling => {
            next.bottom_slope = next.bottom_slope.max(Fixed::ZERO);
            CrossingKind::Ceiling
        }
        Plane::Floor => {
            next.top_slope = next.top_slope.min(Fixed::ZERO);
            CrossingKind::Floor
        }
    };
    Some(Crossing {
        kind,
        state: next,
        frac,
    })
}

/// Floor and ceiling portals of `region` the ray passes through
///
/// Only slopes pointing at a plane can cross it: the ceiling needs a rising top
/// slope, the floor a falling bottom slope.
pub fn surface_crossings<W>(
    world: &W,
    state: &RayState,
    segment: &Segment,
    region: W::Region,
    total: Fixed,
    frac: Fixed,
) -> Crossings
where
    W: PortalRegistry + ?Sized,
{
    let info = world.region(region);
    let check = |plane: Plane, facing: bool| {
        if !facing {
            return None;
        }
        let link = world.passable_link(PortalSurface::Plane(region, plane))?;
        if link.to_group == state.group {
            return None;
        }
        plane_crossing(
            state,
            segment,
            plane,
            info.height(plane),
            &link,
            total,
            frac,
            |point| world.point_in_region(point) == Some(region),
        )
    };

    [
        check(Plane::Ceiling, state.top_slope.is_positive()),
        check(Plane::Floor, state.bottom_slope.is_negative()),
    ]
    .into_iter()
    .flatten()
}

/// Lower and upper band portals of a two-sided line
///
/// Applies only when approaching from the front with a positive fraction, and
/// only to bands the line flags and whose back-region plane is passable. A band
/// is eligible when the cone reaches the plane height at this distance.
pub fn edge_crossings<W>(
    world: &W,
    state: &RayState,
    segment: &Segment,
    line: &LineInfo<W::Region>,
    total: Fixed,
    frac: Fixed,
) -> Crossings
where
    W: PortalRegistry + ?Sized,
{
    let back = match line.back {
        Some(back) if line.side(segment.trace.origin) == Side::Front && frac.is_positive() => {
            back
        }
        _ => return [None, None].into_iter().flatten(),
    };
    let back_info = world.region(back);
    let at = segment.trace.point_at(frac);

    let band = |flagged: bool, plane: Plane, kind: CrossingKind| {
        if !flagged {
            return None;
        }
        let link = world.passable_link(PortalSurface::Plane(back, plane))?;
        let reference = state.slope_to(back_info.height(plane), total);
        let reaches = match plane {
            Plane::Floor => state.bottom_slope <= reference,
            Plane::Ceiling => state.top_slope >= reference,
        };
        reaches.then(|| Crossing {
            kind,
            state: state.cross(at, &link, total),
            frac,
        })
    };

    [
        band(line.lower_portal, Plane::Floor, CrossingKind::LowerEdge),
        band(line.upper_portal, Plane::Ceiling, CrossingKind::UpperEdge),
    ]
    .into_iter()
    .flatten()
}

/// Crossing through a line that is itself a passable portal
pub fn line_crossing<W>(
    world: &W,
    state: &RayState,
    segment: &Segment,
    line: W::Line,
    info: &LineInfo<W::Region>,
    total: Fixed,
    frac: Fixed,
) -> Option<Crossing>
where
    W: PortalRegistry + ?Sized,
{
    if info.side(segment.trace.origin) != Side::Front || !frac.is_positive() {
        return None;
    }
    let link = world.passable_link(PortalSurface::Line(line))?;
    Some(Crossing {
        kind: CrossingKind::Line,
        state: state.cross(segment.trace.point_at(frac), &link, total),
        frac,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::GroupId;
    use geom::{Angle, FVec3};

    fn state() -> RayState {
        RayState::new(
            FVec3::from_int(0, 0, 36),
            GroupId(1),
            Fixed::from_f64(-0.625),
            Fixed::from_f64(0.46),
        )
    }

    fn segment() -> Segment {
        Segment::toward(FVec2::ZERO, Angle::ZERO, Fixed::from_int(1000))
    }

    fn up_link() -> PortalLink {
        PortalLink {
            to_group: GroupId(2),
            delta: FVec3::from_int(0, 2048, 0),
        }
    }

    #[test]
    fn test_ceiling_crossing_point() {
        let crossing = plane_crossing(
            &state(),
            &segment(),
            Plane::Ceiling,
            Fixed::from_int(128),
            &up_link(),
            Fixed::from_int(1000),
            Fixed::ONE,
            |_| true,
        )
        .expect("ray clears the plane");

        assert_eq!(crossing.kind, CrossingKind::Ceiling);
        // 0.46 rises 92 units in 200
        let x = crossing.state.origin.x.to_f64();
        assert!((x - 200.0).abs() < 0.1, "crossing at {x}");
        assert!((crossing.state.origin.y.to_f64() - 2048.0).abs() < 0.5);
        assert_eq!(crossing.state.origin.z, Fixed::from_int(36));
        assert!((crossing.state.origin_dist.to_f64() - 200.0).abs() < 0.1);
        assert!((crossing.frac.to_f64() - 0.2).abs() < 0.001);
        assert_eq!(crossing.state.bottom_slope, Fixed::ZERO);
        assert_eq!(crossing.state.top_slope, state().top_slope);
        assert_eq!(crossing.state.depth, 1);
    }

    #[test]
    fn test_plane_not_reached() {
        let crossing = plane_crossing(
            &state(),
            &segment(),
            Plane::Ceiling,
            Fixed::from_int(128),
            &up_link(),
            Fixed::from_int(150),
            Fixed(9830),
            |_| true,
        );
        assert!(crossing.is_none());
    }

    #[test]
    fn test_floor_crossing_clamps_top() {
        let mut s = state();
        s.top_slope = Fixed::from_f64(0.3);
        let crossing = plane_crossing(
            &s,
            &segment(),
            Plane::Floor,
            Fixed::from_int(-26),
            &up_link(),
            Fixed::from_int(1000),
            Fixed::ONE,
            |_| true,
        )
        .expect("ray drops through the floor");
        assert_eq!(crossing.kind, CrossingKind::Floor);
        assert_eq!(crossing.state.top_slope, Fixed::ZERO);
        assert_eq!(crossing.state.bottom_slope, s.bottom_slope);
        // 0.625 drops 62 units in 99.2
        assert!((crossing.state.origin_dist.to_f64() - 99.2).abs() < 0.1);
    }

    #[test]
    fn test_crossing_outside_region_rejected() {
        let crossing = plane_crossing(
            &state(),
            &segment(),
            Plane::Ceiling,
            Fixed::from_int(128),
            &up_link(),
            Fixed::from_int(1000),
            Fixed::ONE,
            |point| point.x > Fixed::from_int(500),
        );
        assert!(crossing.is_none());
    }

    #[test]
    fn test_backwards_crossing_rejected() {
        // Already travelled past the plane before this segment began
        let mut s = state();
        s.origin_dist = Fixed::from_int(400);
        let crossing = plane_crossing(
            &s,
            &segment(),
            Plane::Ceiling,
            Fixed::from_int(128),
            &up_link(),
            Fixed::from_int(1000),
            Fixed(39321),
            |_| true,
        );
        assert!(crossing.is_none());
    }
}
