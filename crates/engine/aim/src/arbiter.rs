//! Closest-target bookkeeping shared by every branch of one resolution

use geom::Fixed;

/// An accepted target and how it was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<A> {
    pub actor: A,
    /// Total distance from the shooter, across portals
    pub distance: Fixed,
    /// Vertical slope from the shooter's eye to aim at it
    pub slope: Fixed,
}

/// Keeps the closest candidate seen so far
///
/// A later candidate replaces the held one only when strictly closer, so among
/// equally distant targets the first one found wins.
#[derive(Debug, Clone)]
pub struct TargetArbiter<A> {
    best: Option<Candidate<A>>,
}

impl<A> Default for TargetArbiter<A> {
    fn default() -> Self {
        Self { best: None }
    }
}

impl<A: Copy> TargetArbiter<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate
    ///
    /// # Returns
    /// `true` when it became the held target
    pub fn offer(&mut self, candidate: Candidate<A>) -> bool {
        match self.best {
            Some(best) if best.distance <= candidate.distance => false,
            _ => {
                self.best = Some(candidate);
                true
            }
        }
    }

    pub fn best(&self) -> Option<Candidate<A>> {
        self.best
    }

    /// Whether the held target is no farther than `total`
    ///
    /// Nothing found beyond that distance could win, so a branch reaching it
    /// may stop.
    pub fn holds_within(&self, total: Fixed) -> bool {
        self.best.is_some_and(|best| best.distance <= total)
    }

    pub fn into_best(self) -> Option<Candidate<A>> {
        self.best
    }
}
