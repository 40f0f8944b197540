//! Traversal driver
//!
//! One straight segment, one walk. The driver owns no algorithm state: it builds
//! the trace, asks the spatial index for intercepts and forwards each to the
//! visitor until the visitor stops or the intercepts run out.

use crate::world::SpatialIndex;
use geom::{fine_cosine, fine_sine, Angle, DivLine, FVec2, Fixed};

/// Visitor verdict for one intercept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traverse {
    Continue,
    Stop,
}

/// What a trace ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptKind<L, A> {
    Line(L),
    Actor(A),
}

/// One candidate obstruction along a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intercept<L, A> {
    /// Fraction of the segment at which it occurs
    pub frac: Fixed,
    pub kind: InterceptKind<L, A>,
}

impl<L, A> Intercept<L, A> {
    pub fn line(frac: Fixed, line: L) -> Self {
        Self {
            frac,
            kind: InterceptKind::Line(line),
        }
    }

    pub fn actor(frac: Fixed, actor: A) -> Self {
        Self {
            frac,
            kind: InterceptKind::Actor(actor),
        }
    }
}

/// A straight trace together with the range it represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub trace: DivLine,
    pub range: Fixed,
}

impl Segment {
    /// Segment from `origin` toward `angle`, `range` long
    ///
    /// The end point is built from whole units of range times the fine
    /// cosine/sine, so fractional range is dropped the way the classic
    /// hitscan code drops it.
    pub fn toward(origin: FVec2, angle: Angle, range: Fixed) -> Self {
        let units = range.to_int() as i64;
        let step = |trig: Fixed| {
            let v = units * trig.raw() as i64;
            Fixed(v.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
        };
        let delta = FVec2::new(step(fine_cosine(angle)), step(fine_sine(angle)));
        Self {
            trace: DivLine::new(origin, delta),
            range,
        }
    }

    pub fn end(&self) -> FVec2 {
        self.trace.end()
    }
}

/// Walk one segment, feeding intercepts to `visitor` in order
///
/// # Returns
/// `true` when the walk ran to the end without the visitor stopping it
pub fn drive<W>(
    world: &W,
    trace: &DivLine,
    visitor: &mut dyn FnMut(&Intercept<W::Line, W::Actor>) -> Traverse,
) -> bool
where
    W: SpatialIndex + ?Sized,
{
    let mut last = Fixed::MIN;
    world.traverse(trace, &mut |intercept| {
        debug_assert!(
            intercept.frac >= last,
            "spatial index returned intercepts out of order: {:?} after {:?}",
            intercept.frac,
            last
        );
        last = intercept.frac;
        visitor(intercept)
    })
}
