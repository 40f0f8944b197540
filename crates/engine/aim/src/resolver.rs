//! Autoaim resolution
//!
//! A resolution walks one straight segment from the shooter. Every boundary it
//! crosses can narrow the vertical cone; every portal it meets can spawn a
//! child walk in the destination group, which runs to completion before the
//! parent resumes. All branches share one [`TargetArbiter`], so the closest
//! target across every group wins.

use crate::arbiter::{Candidate, TargetArbiter};
use crate::config::AimConfig;
use crate::crossing::{edge_crossings, line_crossing, surface_crossings, Crossing, Crossings};
use crate::opening::{narrow, Boundary};
use crate::policy::{DefaultPolicy, SlopeWindow, TargetPolicy};
use crate::state::RayState;
use crate::traverse::{drive, Intercept, InterceptKind, Segment, Traverse};
use crate::world::{AimWorld, LineInfo};
use geom::{slope_for_pitch, Angle, FVec3, Fixed, Side};
use serde::Serialize;
use tracing::{debug, trace};

/// One autoaim query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AimRequest<A> {
    /// Shooter
    pub source: A,
    /// Horizontal direction of the shot
    pub angle: Angle,
    /// Maximum planar distance, across portals
    pub range: Fixed,
    /// Apply the friendly-fire and not-autoaimed filters
    pub mask: bool,
}

/// Counters aggregated over every branch of a resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AimStats {
    /// Intercepts handed to the visitor
    pub intercepts: u32,
    /// Portal crossings actually explored
    pub crossings: u32,
    /// Deepest portal level any explored state reached
    pub max_depth: u32,
}

impl AimStats {
    pub fn absorb(&mut self, other: &AimStats) {
        self.intercepts += other.intercepts;
        self.crossings += other.crossings;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

/// Outcome of a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AimResult<A> {
    pub target: Option<A>,
    /// Total distance to the target
    pub distance: Option<Fixed>,
    /// Slope to aim at: the target's, or the shooter's look slope when none
    pub slope: Fixed,
    pub stats: AimStats,
}

/// Resolves autoaim over a borrowed world
///
/// Holds no per-call state; one resolver may serve any number of concurrent
/// resolutions.
pub struct Resolver<'w, W: ?Sized, P = DefaultPolicy> {
    world: &'w W,
    policy: P,
    config: AimConfig,
}

impl<'w, W: AimWorld + ?Sized> Resolver<'w, W> {
    /// Resolver with the default policy and config
    pub fn with_defaults(world: &'w W) -> Self {
        Self::new(world, DefaultPolicy, AimConfig::default())
    }
}

impl<'w, W, P> Resolver<'w, W, P>
where
    W: AimWorld + ?Sized,
    P: TargetPolicy<W>,
{
    pub fn new(world: &'w W, policy: P, config: AimConfig) -> Self {
        Self {
            world,
            policy,
            config,
        }
    }

    /// Resolve from the shooter's own eye
    pub fn resolve(&self, request: &AimRequest<W::Actor>) -> AimResult<W::Actor> {
        self.resolve_from(request, self.initial_state(request.source))
    }

    /// Resolve continuing from an existing ray state
    ///
    /// # Arguments
    /// * `request` - `range` is what remains from `state`'s origin
    /// * `state` - cone, origin and group to start from
    pub fn resolve_from(&self, request: &AimRequest<W::Actor>, state: RayState) -> AimResult<W::Actor> {
        let mut context = AimContext {
            world: self.world,
            policy: &self.policy,
            source: request.source,
            angle: request.angle,
            mask: request.mask,
            arbiter: TargetArbiter::new(),
            stats: AimStats::default(),
        };
        context.run(state, request.range);

        let stats = context.stats;
        let result = match context.arbiter.into_best() {
            Some(best) => AimResult {
                target: Some(best.actor),
                distance: Some(best.distance),
                slope: best.slope,
                stats,
            },
            None => AimResult {
                target: None,
                distance: None,
                slope: self.look_slope(request.source),
                stats,
            },
        };

        debug!(
            source = ?request.source,
            target = ?result.target,
            distance = ?result.distance.map(Fixed::to_f64),
            slope = result.slope.to_f64(),
            intercepts = stats.intercepts,
            crossings = stats.crossings,
            max_depth = stats.max_depth,
            "autoaim resolved"
        );
        result
    }

    /// Ray state at the shooter's eye
    ///
    /// The eye sits `eye_offset` above the shooter's middle. A level shooter gets
    /// a symmetric cone of `default_slope`; a pitched one a cone of
    /// `pitch_spread` either side of its look direction.
    pub fn initial_state(&self, source: W::Actor) -> RayState {
        let info = self.world.actor(source);
        let origin = FVec3::new(
            info.position.x,
            info.position.y,
            info.position.z + Fixed::from_raw(info.height.raw() >> 1) + self.config.eye_offset(),
        );

        let (bottom, top) = if info.pitch == Angle::ZERO {
            let slope = self.config.default_slope();
            (-slope, slope)
        } else {
            let spread = self.config.pitch_spread();
            (
                slope_for_pitch(info.pitch + spread),
                slope_for_pitch(info.pitch - spread),
            )
        };
        RayState::new(origin, info.group, bottom, top)
    }

    /// Slope straight along the shooter's pitch
    pub fn look_slope(&self, source: W::Actor) -> Fixed {
        let pitch = self.world.actor(source).pitch;
        if pitch == Angle::ZERO {
            Fixed::ZERO
        } else {
            slope_for_pitch(pitch)
        }
    }
}

/// Resolve with [`DefaultPolicy`] and the default [`AimConfig`]
pub fn aim_line_attack<W>(
    world: &W,
    source: W::Actor,
    angle: Angle,
    range: Fixed,
    mask: bool,
) -> AimResult<W::Actor>
where
    W: AimWorld + ?Sized,
{
    Resolver::with_defaults(world).resolve(&AimRequest {
        source,
        angle,
        range,
        mask,
    })
}

/// State of the segment currently being walked
#[derive(Debug, Clone, Copy)]
struct Branch {
    state: RayState,
    segment: Segment,
}

/// Per-call context; dropped when the resolution returns
struct AimContext<'a, W: AimWorld + ?Sized, P> {
    world: &'a W,
    policy: &'a P,
    source: W::Actor,
    angle: Angle,
    mask: bool,
    arbiter: TargetArbiter<W::Actor>,
    stats: AimStats,
}

impl<'a, W, P> AimContext<'a, W, P>
where
    W: AimWorld + ?Sized,
    P: TargetPolicy<W>,
{
    /// Walk one segment of `range` from `state`
    fn run(&mut self, state: RayState, range: Fixed) {
        debug_assert!(state.depth <= crate::state::RECURSION_LIMIT);
        self.stats.max_depth = self.stats.max_depth.max(state.depth);

        let world = self.world;
        let segment = Segment::toward(state.origin.xy(), self.angle, range);
        let mut branch = Branch { state, segment };
        let completed = drive(
            world,
            &segment.trace,
            &mut |intercept: &Intercept<W::Line, W::Actor>| self.visit(&mut branch, intercept),
        );

        if completed {
            self.check_end_region(&branch);
        }
    }

    fn visit(&mut self, branch: &mut Branch, intercept: &Intercept<W::Line, W::Actor>) -> Traverse {
        self.stats.intercepts += 1;
        let total = branch.state.total_dist(branch.segment.range, intercept.frac);

        match intercept.kind {
            InterceptKind::Line(line) => {
                let info = self.world.line(line);
                let side = info.side(branch.segment.trace.origin);
                if let Some(near) = info.region_on(side) {
                    if self.cross_surfaces(branch, near, total, intercept.frac) == Traverse::Stop {
                        return Traverse::Stop;
                    }
                }
                self.visit_line(branch, line, &info, side, total, intercept.frac)
            }
            InterceptKind::Actor(actor) => {
                let region = self.world.actor(actor).region;
                if self.cross_surfaces(branch, region, total, intercept.frac) == Traverse::Stop {
                    return Traverse::Stop;
                }
                self.visit_actor(branch, actor, total)
            }
        }
    }

    /// Floor and ceiling portals of the region the ray is passing through
    ///
    /// Stops the segment once a target no farther than this point is held.
    fn cross_surfaces(
        &mut self,
        branch: &Branch,
        region: W::Region,
        total: Fixed,
        frac: Fixed,
    ) -> Traverse {
        if !total.is_positive() {
            return Traverse::Continue;
        }
        let crossings = surface_crossings(
            self.world,
            &branch.state,
            &branch.segment,
            region,
            total,
            frac,
        );
        self.explore_all(branch, crossings);

        if self.arbiter.holds_within(total) {
            trace!(total = total.to_f64(), "closer target already held");
            Traverse::Stop
        } else {
            Traverse::Continue
        }
    }

    fn visit_line(
        &mut self,
        branch: &mut Branch,
        line: W::Line,
        info: &LineInfo<W::Region>,
        side: Side,
        total: Fixed,
        frac: Fixed,
    ) -> Traverse {
        let Some(back) = info.back else {
            trace!(?line, "one-sided line");
            return Traverse::Stop;
        };
        if info.block_all {
            trace!(?line, "line blocks everything");
            return Traverse::Stop;
        }

        let (near, far) = match side {
            Side::Front => (info.front, back),
            Side::Back => (back, info.front),
        };
        let boundary = Boundary::between(self.world, near, far);
        let opening = boundary.opening();
        if opening.is_closed() {
            trace!(?line, "no opening");
            return Traverse::Stop;
        }

        match narrow(branch.state, &boundary, &opening, total) {
            Some(narrowed) => branch.state = narrowed,
            None => {
                trace!(?line, total = total.to_f64(), "cone collapsed");
                return Traverse::Stop;
            }
        }

        let edges = edge_crossings(self.world, &branch.state, &branch.segment, info, total, frac);
        self.explore_all(branch, edges);

        let crossing = line_crossing(
            self.world,
            &branch.state,
            &branch.segment,
            line,
            info,
            total,
            frac,
        );
        match crossing {
            // Everything past the line belongs to the far side
            Some(crossing) if self.explore(branch, crossing) => Traverse::Stop,
            _ => Traverse::Continue,
        }
    }

    fn visit_actor(&mut self, branch: &Branch, actor: W::Actor, total: Fixed) -> Traverse {
        if !self.policy.is_eligible(self.world, actor, self.source, self.mask) {
            return Traverse::Continue;
        }

        let window = SlopeWindow {
            origin_z: branch.state.origin.z,
            bottom: branch.state.bottom_slope,
            top: branch.state.top_slope,
            distance: total,
        };
        let Some(slope) = self.policy.aim_slope(self.world, actor, &window) else {
            trace!(?actor, "outside the cone");
            return Traverse::Continue;
        };

        let replaced = self.arbiter.offer(Candidate {
            actor,
            distance: total,
            slope,
        });
        trace!(?actor, total = total.to_f64(), replaced, "target candidate");
        Traverse::Stop
    }

    /// Surface portals of the region the segment ends in
    fn check_end_region(&mut self, branch: &Branch) {
        let Some(region) = self.world.point_in_region(branch.segment.end()) else {
            return;
        };
        let total = branch.state.total_dist(branch.segment.range, Fixed::ONE);
        let crossings = surface_crossings(
            self.world,
            &branch.state,
            &branch.segment,
            region,
            total,
            Fixed::ONE,
        );
        self.explore_all(branch, crossings);
    }

    fn explore_all(&mut self, branch: &Branch, crossings: Crossings) {
        for crossing in crossings {
            self.explore(branch, crossing);
        }
    }

    /// Walk the far side of a crossing
    ///
    /// # Returns
    /// `false` when the crossing was rejected: it leads back into the same group
    /// or the chain is already at the recursion limit
    fn explore(&mut self, branch: &Branch, crossing: Crossing) -> bool {
        let parent = &branch.state;
        if crossing.state.group == parent.group {
            trace!(group = %parent.group, "portal loops into the same group");
            return false;
        }
        if !parent.can_cross() {
            debug!(depth = parent.depth, "portal recursion limit reached");
            return false;
        }

        let range = branch.segment.range;
        let remaining = range - range.mul(crossing.frac);
        self.stats.crossings += 1;
        debug!(
            kind = ?crossing.kind,
            to = %crossing.state.group,
            depth = crossing.state.depth,
            at = crossing.state.origin_dist.to_f64(),
            remaining = remaining.to_f64(),
            "crossing portal"
        );
        self.run(crossing.state, remaining);
        true
    }
}
