//! World access traits
//!
//! The resolver never owns geometry. Whatever holds the level implements these
//! traits and hands the resolver a shared reference for the duration of a call.
//!
//! # Traits
//!
//! - [`SpatialIndex`]: regions, lines and the intercept walk along a trace
//! - [`PortalRegistry`]: which surfaces are portals, where they lead, and whether
//!   they let a ray through
//! - [`ActorModel`]: actor placement and flags
//! - [`AimWorld`]: everything at once

use crate::traverse::{Intercept, Traverse};
use geom::{Angle, DivLine, FVec2, FVec3, Fixed, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a coordinate frame joined to others only through portals
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GroupId(pub u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group {}", self.0)
    }
}

/// Horizontal bounding plane of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    Floor,
    Ceiling,
}

/// Heights and group of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionInfo {
    pub floor: Fixed,
    pub ceiling: Fixed,
    pub group: GroupId,
}

impl RegionInfo {
    pub fn height(&self, plane: Plane) -> Fixed {
        match plane {
            Plane::Floor => self.floor,
            Plane::Ceiling => self.ceiling,
        }
    }
}

/// Geometry and flags of a boundary line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo<R> {
    pub v1: FVec2,
    pub v2: FVec2,
    /// Region on the right-hand side walking v1 → v2
    pub front: R,
    /// Region on the left; `None` for a one-sided wall
    pub back: Option<R>,
    /// Blocks every trace regardless of opening
    pub block_all: bool,
    /// Lower band shows the back region's floor portal
    pub lower_portal: bool,
    /// Upper band shows the back region's ceiling portal
    pub upper_portal: bool,
}

impl<R: Copy> LineInfo<R> {
    pub fn divline(&self) -> DivLine {
        DivLine::between(self.v1, self.v2)
    }

    pub fn side(&self, point: FVec2) -> Side {
        self.divline().side(point)
    }

    /// Region facing the given side
    pub fn region_on(&self, side: Side) -> Option<R> {
        match side {
            Side::Front => Some(self.front),
            Side::Back => self.back,
        }
    }
}

/// A surface that may carry a portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortalSurface<R, L> {
    /// A region's floor or ceiling
    Plane(R, Plane),
    /// A whole boundary line
    Line(L),
}

/// Where a portal leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortalLink {
    pub to_group: GroupId,
    /// Added to a point on the near side to get the matching far-side point
    pub delta: FVec3,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActorFlags {
    /// Can be hit at all
    pub shootable: bool,
    /// Allied with players
    pub friend: bool,
    /// Controlled by a player
    pub player: bool,
    /// Skipped by masked autoaim
    pub not_autoaimed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorInfo<R> {
    /// Feet position
    pub position: FVec3,
    pub height: Fixed,
    pub radius: Fixed,
    /// Vertical look angle; zero is level, positive looks down
    pub pitch: Angle,
    pub region: R,
    pub group: GroupId,
    pub flags: ActorFlags,
}

/// Regions, lines and intercept walks
pub trait SpatialIndex {
    type Region: Copy + Eq + fmt::Debug;
    type Line: Copy + Eq + fmt::Debug;
    type Actor: Copy + Eq + fmt::Debug;

    /// Region containing a point, if any
    fn point_in_region(&self, point: FVec2) -> Option<Self::Region>;

    fn region(&self, region: Self::Region) -> RegionInfo;

    fn line(&self, line: Self::Line) -> LineInfo<Self::Region>;

    /// Walk the intercepts of `trace` between its origin and end
    ///
    /// Intercepts must arrive in non-decreasing fraction order. The walk ends
    /// early when the visitor returns [`Traverse::Stop`].
    ///
    /// # Returns
    /// `true` when every intercept was visited
    fn traverse(
        &self,
        trace: &DivLine,
        visitor: &mut dyn FnMut(&Intercept<Self::Line, Self::Actor>) -> Traverse,
    ) -> bool;
}

/// Portal surfaces and their links
pub trait PortalRegistry: SpatialIndex {
    /// Whether this specific surface lets a ray through
    fn passable(&self, surface: PortalSurface<Self::Region, Self::Line>) -> bool;

    /// Destination of the surface's portal, passable or not
    fn link(&self, surface: PortalSurface<Self::Region, Self::Line>) -> Option<PortalLink>;

    /// Destination of the surface's portal, only when passable
    fn passable_link(&self, surface: PortalSurface<Self::Region, Self::Line>) -> Option<PortalLink> {
        if self.passable(surface) {
            self.link(surface)
        } else {
            None
        }
    }
}

pub trait ActorModel: SpatialIndex {
    fn actor(&self, actor: Self::Actor) -> ActorInfo<Self::Region>;
}

/// Everything the resolver reads
pub trait AimWorld: PortalRegistry + ActorModel {}

impl<T: PortalRegistry + ActorModel + ?Sized> AimWorld for T {}
