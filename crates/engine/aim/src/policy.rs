//! Target selection policy
//!
//! The resolver decides where the ray can go; a [`TargetPolicy`] decides which
//! actors it may lock onto and at what slope.

use crate::world::ActorModel;
use geom::Fixed;

/// The cone at the distance of an actor intercept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlopeWindow {
    /// Eye height in the frame the actor lives in
    pub origin_z: Fixed,
    pub bottom: Fixed,
    pub top: Fixed,
    /// Total distance from the shooter
    pub distance: Fixed,
}

pub trait TargetPolicy<W: ActorModel + ?Sized> {
    /// Whether `candidate` may be targeted by `source` at all
    fn is_eligible(&self, world: &W, candidate: W::Actor, source: W::Actor, mask: bool) -> bool;

    /// Aiming slope for `candidate`, or `None` when it falls outside the window
    fn aim_slope(&self, world: &W, candidate: W::Actor, window: &SlopeWindow) -> Option<Fixed>;
}

/// Classic autoaim rules
///
/// Skips the shooter and anything not shootable. With `mask` set it also skips
/// actors flagged as not autoaimed, and friendly non-players when the shooter is
/// friendly too.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl<W: ActorModel + ?Sized> TargetPolicy<W> for DefaultPolicy {
    fn is_eligible(&self, world: &W, candidate: W::Actor, source: W::Actor, mask: bool) -> bool {
        if candidate == source {
            return false;
        }
        let target = world.actor(candidate).flags;
        if !target.shootable {
            return false;
        }
        if !mask {
            return true;
        }
        let shooter = world.actor(source).flags;
        if shooter.friend && target.friend && !target.player {
            return false;
        }
        !target.not_autoaimed
    }

    fn aim_slope(&self, world: &W, candidate: W::Actor, window: &SlopeWindow) -> Option<Fixed> {
        let info = world.actor(candidate);
        let slope_to = |z: Fixed| (z - window.origin_z).div(window.distance);

        let top = slope_to(info.position.z + info.height);
        if top < window.bottom {
            return None;
        }
        let bottom = slope_to(info.position.z);
        if bottom > window.top {
            return None;
        }

        Some(top.min(window.top).midpoint(bottom.max(window.bottom)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traverse::{Intercept, Traverse};
    use crate::world::{ActorFlags, ActorInfo, LineInfo, RegionInfo, SpatialIndex};
    use geom::{Angle, DivLine, FVec2, FVec3};

    /// Actors only; no geometry
    struct Crowd(Vec<ActorInfo<u32>>);

    impl SpatialIndex for Crowd {
        type Region = u32;
        type Line = u32;
        type Actor = usize;

        fn point_in_region(&self, _point: FVec2) -> Option<u32> {
            Some(0)
        }

        fn region(&self, _region: u32) -> RegionInfo {
            unreachable!()
        }

        fn line(&self, _line: u32) -> LineInfo<u32> {
            unreachable!()
        }

        fn traverse(
            &self,
            _trace: &DivLine,
            _visitor: &mut dyn FnMut(&Intercept<u32, usize>) -> Traverse,
        ) -> bool {
            true
        }
    }

    impl ActorModel for Crowd {
        fn actor(&self, actor: usize) -> ActorInfo<u32> {
            self.0[actor]
        }
    }

    fn actor(flags: ActorFlags) -> ActorInfo<u32> {
        ActorInfo {
            position: FVec3::from_int(0, 0, 0),
            height: Fixed::from_int(56),
            radius: Fixed::from_int(16),
            pitch: Angle::ZERO,
            region: 0,
            group: Default::default(),
            flags,
        }
    }

    fn shootable() -> ActorFlags {
        ActorFlags {
            shootable: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_eligibility() {
        let friend = ActorFlags {
            friend: true,
            ..shootable()
        };
        let crowd = Crowd(vec![
            actor(friend),
            actor(shootable()),
            actor(ActorFlags::default()),
            actor(friend),
            actor(ActorFlags {
                player: true,
                ..friend
            }),
            actor(ActorFlags {
                not_autoaimed: true,
                ..shootable()
            }),
        ]);
        let p = DefaultPolicy;

        assert!(!p.is_eligible(&crowd, 0, 0, true), "never the shooter");
        assert!(p.is_eligible(&crowd, 1, 0, true));
        assert!(!p.is_eligible(&crowd, 2, 0, false), "not shootable");
        assert!(!p.is_eligible(&crowd, 3, 0, true), "friendly fire masked");
        assert!(p.is_eligible(&crowd, 3, 0, false), "unmasked hits friends");
        assert!(p.is_eligible(&crowd, 4, 0, true), "friendly players stay targets");
        assert!(!p.is_eligible(&crowd, 5, 0, true));
        assert!(p.is_eligible(&crowd, 5, 0, false));
        assert!(p.is_eligible(&crowd, 3, 1, true), "hostile shooter");
    }

    fn window(bottom: f64, top: f64) -> SlopeWindow {
        SlopeWindow {
            origin_z: Fixed::from_int(36),
            bottom: Fixed::from_f64(bottom),
            top: Fixed::from_f64(top),
            distance: Fixed::from_int(100),
        }
    }

    #[test]
    fn test_slope_midpoint_of_visible_part() {
        let crowd = Crowd(vec![actor(shootable())]);
        // Body spans slopes -0.36..0.20 at 100 units
        let slope = DefaultPolicy
            .aim_slope(&crowd, 0, &window(-0.625, 0.625))
            .expect("inside the cone");
        let expected = Fixed::from_int(20)
            .div(Fixed::from_int(100))
            .midpoint(Fixed::from_int(-36).div(Fixed::from_int(100)));
        assert_eq!(slope, expected);

        // Clipped by a low ceiling
        let slope = DefaultPolicy
            .aim_slope(&crowd, 0, &window(-0.625, 0.0))
            .expect("partly visible");
        assert_eq!(
            slope,
            Fixed::ZERO.midpoint(Fixed::from_int(-36).div(Fixed::from_int(100)))
        );
    }

    #[test]
    fn test_slope_outside_window() {
        let crowd = Crowd(vec![actor(shootable())]);
        assert!(DefaultPolicy
            .aim_slope(&crowd, 0, &window(0.3, 0.6))
            .is_none());
        assert!(DefaultPolicy
            .aim_slope(&crowd, 0, &window(-0.9, -0.5))
            .is_none());
    }
}
