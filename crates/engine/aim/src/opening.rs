//! Vertical openings and cone narrowing
//!
//! Crossing a two-sided boundary, the ray can only continue through the gap
//! between the higher floor and the lower ceiling. A passable portal surface
//! does not bound the gap on its side: the ray is free to leave through it.

use crate::state::RayState;
use crate::world::{Plane, PortalRegistry, PortalSurface};
use geom::Fixed;

/// One plane seen from both sides of a boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanePair {
    pub near: Fixed,
    pub far: Fixed,
    pub near_passable: bool,
    pub far_passable: bool,
}

impl PlanePair {
    /// Whether crossing the boundary changes this plane for the ray
    pub fn differs(&self) -> bool {
        self.near != self.far || self.near_passable != self.far_passable
    }
}

/// Floors and ceilings on both sides of a boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub floors: PlanePair,
    pub ceilings: PlanePair,
}

impl Boundary {
    /// Boundary between the region the ray is in and the one it enters
    pub fn between<W>(world: &W, near: W::Region, far: W::Region) -> Self
    where
        W: PortalRegistry + ?Sized,
    {
        let near_info = world.region(near);
        let far_info = world.region(far);
        let pair = |plane| PlanePair {
            near: near_info.height(plane),
            far: far_info.height(plane),
            near_passable: world.passable(PortalSurface::Plane(near, plane)),
            far_passable: world.passable(PortalSurface::Plane(far, plane)),
        };
        Self {
            floors: pair(Plane::Floor),
            ceilings: pair(Plane::Ceiling),
        }
    }

    pub fn opening(&self) -> Opening {
        let top = match (self.ceilings.near_passable, self.ceilings.far_passable) {
            (true, true) => None,
            (true, false) => Some(self.ceilings.far),
            (false, true) => Some(self.ceilings.near),
            (false, false) => Some(self.ceilings.near.min(self.ceilings.far)),
        };
        let bottom = match (self.floors.near_passable, self.floors.far_passable) {
            (true, true) => None,
            (true, false) => Some(self.floors.far),
            (false, true) => Some(self.floors.near),
            (false, false) => Some(self.floors.near.max(self.floors.far)),
        };
        Opening { top, bottom }
    }
}

/// Vertical gap through a boundary; `None` means unbounded on that side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opening {
    pub top: Option<Fixed>,
    pub bottom: Option<Fixed>,
}

impl Opening {
    /// No vertical room at all
    pub fn is_closed(&self) -> bool {
        matches!((self.top, self.bottom), (Some(top), Some(bottom)) if top <= bottom)
    }
}

/// Narrow the cone to what fits through a boundary at `total` distance
///
/// Only planes that change across the boundary narrow the cone.
///
/// # Returns
/// The narrowed state, or `None` when the cone collapsed
pub fn narrow(
    state: RayState,
    boundary: &Boundary,
    opening: &Opening,
    total: Fixed,
) -> Option<RayState> {
    let mut next = state;

    if boundary.floors.differs() {
        if let Some(bottom) = opening.bottom {
            let slope = next.slope_to(bottom, total);
            if slope > next.bottom_slope {
                next.bottom_slope = slope;
            }
        }
    }

    if boundary.ceilings.differs() {
        if let Some(top) = opening.top {
            let slope = next.slope_to(top, total);
            if slope < next.top_slope {
                next.top_slope = slope;
            }
        }
    }

    next.is_open().then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::GroupId;
    use geom::FVec3;

    fn pair(near: i32, far: i32) -> PlanePair {
        PlanePair {
            near: Fixed::from_int(near),
            far: Fixed::from_int(far),
            near_passable: false,
            far_passable: false,
        }
    }

    fn state() -> RayState {
        RayState::new(
            FVec3::from_int(0, 0, 36),
            GroupId(0),
            Fixed::from_f64(-0.625),
            Fixed::from_f64(0.625),
        )
    }

    #[test]
    fn test_opening_solid() {
        let boundary = Boundary {
            floors: pair(0, 24),
            ceilings: pair(128, 96),
        };
        let opening = boundary.opening();
        assert_eq!(opening.bottom, Some(Fixed::from_int(24)));
        assert_eq!(opening.top, Some(Fixed::from_int(96)));
        assert!(!opening.is_closed());
    }

    #[test]
    fn test_opening_passable_side_is_unbounded() {
        let mut ceilings = pair(128, 128);
        ceilings.far_passable = true;
        let boundary = Boundary {
            floors: pair(0, 0),
            ceilings,
        };
        assert_eq!(boundary.opening().top, Some(Fixed::from_int(128)));

        ceilings.near_passable = true;
        let boundary = Boundary {
            floors: pair(0, 0),
            ceilings,
        };
        assert_eq!(boundary.opening().top, None);
    }

    #[test]
    fn test_closed_door() {
        let boundary = Boundary {
            floors: pair(0, 0),
            ceilings: pair(128, 0),
        };
        assert!(boundary.opening().is_closed());
    }

    #[test]
    fn test_step_raises_bottom() {
        let boundary = Boundary {
            floors: pair(0, 56),
            ceilings: pair(128, 128),
        };
        let narrowed = narrow(state(), &boundary, &boundary.opening(), Fixed::from_int(100))
            .expect("cone stays open");
        assert_eq!(narrowed.bottom_slope, Fixed::from_f64(0.2));
        assert_eq!(narrowed.top_slope, Fixed::from_f64(0.625));
    }

    #[test]
    fn test_same_heights_do_not_narrow() {
        let boundary = Boundary {
            floors: pair(40, 40),
            ceilings: pair(50, 50),
        };
        let narrowed = narrow(state(), &boundary, &boundary.opening(), Fixed::from_int(10))
            .expect("unchanged planes never narrow");
        assert_eq!(narrowed, state());
    }

    #[test]
    fn test_exact_collapse_is_closed() {
        // Floor and ceiling both at eye height: top and bottom meet at slope 0
        let boundary = Boundary {
            floors: pair(0, 36),
            ceilings: pair(128, 37),
        };
        let total = Fixed::from_int(64);
        let mut tight = boundary;
        tight.ceilings.far = Fixed::from_int(36);
        assert!(narrow(state(), &tight, &tight.opening(), total).is_none());
        assert!(narrow(state(), &boundary, &boundary.opening(), total).is_some());
    }

    #[test]
    fn test_passability_change_narrows() {
        // Ceiling height equal on both sides, but only the near one is a portal
        let mut ceilings = pair(128, 128);
        ceilings.near_passable = true;
        let boundary = Boundary {
            floors: pair(0, 0),
            ceilings,
        };
        let narrowed = narrow(state(), &boundary, &boundary.opening(), Fixed::from_int(200))
            .expect("open");
        assert_eq!(narrowed.top_slope, Fixed::from_int(92).div(Fixed::from_int(200)));
    }
}
