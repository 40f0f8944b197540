//! Intercept collection along a trace
//!
//! Checks every line and actor in the level against the trace, then hands the
//! hits to a visitor nearest first. Lines are hit where they cross the trace;
//! actors are hit on the diagonal of their bounding square that faces across
//! the trace.

use crate::level::{ActorId, Level, LineId};
use aim::{Intercept, Traverse};
use geom::{DivLine, FVec2, Fixed};

pub struct PathTraverser<'a> {
    level: &'a Level,
    trace: DivLine,
}

impl<'a> PathTraverser<'a> {
    pub fn new(level: &'a Level, trace: DivLine) -> Self {
        Self { level, trace }
    }

    /// All intercepts between the trace origin and its end, nearest first
    ///
    /// Intercepts at the same fraction keep lines before actors, each in level
    /// order.
    pub fn intercepts(&self) -> Vec<Intercept<LineId, ActorId>> {
        let mut out: Vec<_> = self.line_intercepts().chain(self.actor_intercepts()).collect();
        out.sort_by_key(|intercept| intercept.frac);
        out
    }

    /// Feed intercepts to `visitor` until it stops
    ///
    /// # Returns
    /// `true` when every intercept was visited
    pub fn traverse(
        &self,
        visitor: &mut dyn FnMut(&Intercept<LineId, ActorId>) -> Traverse,
    ) -> bool {
        self.intercepts()
            .iter()
            .all(|intercept| visitor(intercept) == Traverse::Continue)
    }

    fn line_intercepts(&self) -> impl Iterator<Item = Intercept<LineId, ActorId>> + '_ {
        self.level
            .lines()
            .iter()
            .enumerate()
            .filter_map(move |(i, line)| {
                if self.trace.side(line.v1) == self.trace.side(line.v2) {
                    return None;
                }
                let frac = self.trace.intercept(&line.divline())?;
                (Fixed::ZERO..=Fixed::ONE)
                    .contains(&frac)
                    .then(|| Intercept::line(frac, LineId(i as u32)))
            })
    }

    fn actor_intercepts(&self) -> impl Iterator<Item = Intercept<LineId, ActorId>> + '_ {
        // Pick the diagonal that runs across the trace direction
        let positive = (self.trace.delta.x.raw() ^ self.trace.delta.y.raw()) > 0;

        self.level
            .actors()
            .iter()
            .enumerate()
            .filter_map(move |(i, actor)| {
                let (x, y, r) = (actor.position.x, actor.position.y, actor.radius);
                let (a, b) = if positive {
                    (FVec2::new(x - r, y + r), FVec2::new(x + r, y - r))
                } else {
                    (FVec2::new(x - r, y - r), FVec2::new(x + r, y + r))
                };
                if self.trace.side(a) == self.trace.side(b) {
                    return None;
                }
                let frac = self.trace.intercept(&DivLine::between(a, b))?;
                (frac > Fixed::ZERO && frac <= Fixed::ONE)
                    .then(|| Intercept::actor(frac, ActorId(i as u32)))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::LevelBuilder;
    use crate::def::{ActorDef, LineDef, RegionDef};
    use aim::InterceptKind;
    use glam::{DVec2, DVec3};

    fn corridor() -> Level {
        LevelBuilder::new("corridor")
            .region(RegionDef::rect("a", DVec2::new(-100.0, -100.0), DVec2::new(200.0, 100.0), 0.0, 128.0))
            .region(RegionDef::rect("b", DVec2::new(200.0, -100.0), DVec2::new(600.0, 100.0), 0.0, 128.0))
            .line(LineDef::new(DVec2::new(200.0, 100.0), DVec2::new(200.0, -100.0), "a").back("b"))
            .line(LineDef::new(DVec2::new(600.0, 100.0), DVec2::new(600.0, -100.0), "b"))
            .line(LineDef::new(DVec2::new(-100.0, -100.0), DVec2::new(-100.0, 100.0), "a"))
            .actor(ActorDef::new("shooter", DVec3::new(0.0, 0.0, 0.0)))
            .actor(ActorDef::new("imp", DVec3::new(400.0, 0.0, 0.0)))
            .actor(ActorDef::new("aside", DVec3::new(400.0, 80.0, 0.0)))
            .build()
            .expect("valid level")
    }

    #[test]
    fn test_intercepts_in_order() {
        let level = corridor();
        let trace = DivLine::between(FVec2::ZERO, FVec2::from_int(1000, 0));
        let hits = PathTraverser::new(&level, trace).intercepts();
        let kinds: Vec<_> = hits.iter().map(|i| i.kind).collect();

        // The line behind the origin and the shooter at fraction 0 are skipped
        assert_eq!(
            kinds,
            vec![
                InterceptKind::Line(LineId(0)),
                InterceptKind::Actor(ActorId(1)),
                InterceptKind::Line(LineId(1)),
            ]
        );
        assert_eq!(hits[0].frac, Fixed::from_f64(0.2));
        assert!((hits[1].frac.to_f64() - 0.4).abs() < 1e-4);
    }

    #[test]
    fn test_short_trace_stops_at_end() {
        let level = corridor();
        let trace = DivLine::between(FVec2::ZERO, FVec2::from_int(300, 0));
        let hits = PathTraverser::new(&level, trace).intercepts();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_visitor_stop() {
        let level = corridor();
        let trace = DivLine::between(FVec2::ZERO, FVec2::from_int(1000, 0));
        let mut seen = 0;
        let completed = PathTraverser::new(&level, trace).traverse(&mut |_| {
            seen += 1;
            if seen == 2 {
                Traverse::Stop
            } else {
                Traverse::Continue
            }
        });
        assert!(!completed);
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_negative_direction_diagonal() {
        let level = corridor();
        // Heading -x, +y picks the other diagonal and still hits the imp
        let trace = DivLine::between(FVec2::from_int(500, -50), FVec2::from_int(300, 50));
        let hits = PathTraverser::new(&level, trace).intercepts();
        assert!(hits
            .iter()
            .any(|i| i.kind == InterceptKind::Actor(ActorId(1))));
    }
}
