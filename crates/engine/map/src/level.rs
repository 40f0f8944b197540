//! In-memory level
//!
//! A [`Level`] is immutable once built. It answers the resolver's world queries
//! directly from flat vectors; ids are indices into them.

use crate::error::LevelError;
use crate::path::PathTraverser;
use aim::{
    ActorFlags, ActorInfo, ActorModel, GroupId, Intercept, LineInfo, Plane, PortalLink,
    PortalRegistry, PortalSurface, RegionInfo, SpatialIndex, Traverse,
};
use geom::{Angle, DivLine, FVec2, FVec3, Fixed};
use std::collections::BTreeSet;
use std::fmt;

macro_rules! level_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $name {
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " #{}"), self.0)
            }
        }
    };
}

level_id!(
    /// Index of a region
    RegionId,
    "region"
);
level_id!(
    /// Index of a line
    LineId,
    "line"
);
level_id!(
    /// Index of an actor
    ActorId,
    "actor"
);
level_id!(
    /// Index of a portal
    PortalId,
    "portal"
);

/// Floor or ceiling of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub height: Fixed,
    pub portal: Option<PortalId>,
    /// Whether the portal, if any, lets rays through
    pub passable: bool,
}

impl Surface {
    pub fn solid(height: Fixed) -> Self {
        Self {
            height,
            portal: None,
            passable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    /// Closed polygon; the last point connects back to the first
    pub outline: Vec<FVec2>,
    pub floor: Surface,
    pub ceiling: Surface,
    pub group: GroupId,
}

impl Region {
    pub fn surface(&self, plane: Plane) -> &Surface {
        match plane {
            Plane::Floor => &self.floor,
            Plane::Ceiling => &self.ceiling,
        }
    }

    /// Even-odd containment test
    pub fn contains(&self, p: FVec2) -> bool {
        let n = self.outline.len();
        let mut inside = false;
        for i in 0..n {
            let a = self.outline[i];
            let b = self.outline[(i + 1) % n];
            if (a.y > p.y) == (b.y > p.y) {
                continue;
            }
            // Sign of (edge x at p.y) - p.x, scaled by the edge's dy
            let ex = b.x.raw() as i128 - a.x.raw() as i128;
            let ey = b.y.raw() as i128 - a.y.raw() as i128;
            let t = ex * (p.y.raw() as i128 - a.y.raw() as i128)
                - (p.x.raw() as i128 - a.x.raw() as i128) * ey;
            if (t > 0) == (ey > 0) && t != 0 {
                inside = !inside;
            }
        }
        inside
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineFlags {
    pub block_all: bool,
    pub lower_portal: bool,
    pub upper_portal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub v1: FVec2,
    pub v2: FVec2,
    /// Region on the right walking v1 → v2
    pub front: RegionId,
    pub back: Option<RegionId>,
    pub flags: LineFlags,
    /// Portal covering the whole line
    pub portal: Option<PortalId>,
    pub passable: bool,
}

impl Line {
    pub fn divline(&self) -> DivLine {
        DivLine::between(self.v1, self.v2)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub name: String,
    /// Feet position
    pub position: FVec3,
    pub radius: Fixed,
    pub height: Fixed,
    pub pitch: Angle,
    pub flags: ActorFlags,
    pub region: RegionId,
    pub group: GroupId,
}

/// Destination of a portal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Portal {
    pub name: String,
    pub to_group: GroupId,
    pub delta: FVec3,
}

impl Portal {
    pub fn link(&self) -> PortalLink {
        PortalLink {
            to_group: self.to_group,
            delta: self.delta,
        }
    }
}

/// A validated level
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub(crate) name: String,
    pub(crate) regions: Vec<Region>,
    pub(crate) lines: Vec<Line>,
    pub(crate) actors: Vec<Actor>,
    pub(crate) portals: Vec<Portal>,
}

impl Level {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    /// Every group some region belongs to
    pub fn groups(&self) -> BTreeSet<GroupId> {
        self.regions.iter().map(|r| r.group).collect()
    }

    /// Actor id by name
    pub fn actor_id(&self, name: &str) -> Result<ActorId, LevelError> {
        self.actors
            .iter()
            .position(|a| a.name == name)
            .map(|i| ActorId(i as u32))
            .ok_or_else(|| LevelError::UnknownActor(name.to_string()))
    }

    pub fn actor_by_id(&self, id: ActorId) -> &Actor {
        &self.actors[id.index()]
    }

    pub fn region_by_id(&self, id: RegionId) -> &Region {
        &self.regions[id.index()]
    }

    pub fn line_by_id(&self, id: LineId) -> &Line {
        &self.lines[id.index()]
    }

    fn portal_of(&self, surface: PortalSurface<RegionId, LineId>) -> Option<(PortalId, bool)> {
        match surface {
            PortalSurface::Plane(region, plane) => {
                let s = self.region_by_id(region).surface(plane);
                s.portal.map(|p| (p, s.passable))
            }
            PortalSurface::Line(line) => {
                let l = self.line_by_id(line);
                l.portal.map(|p| (p, l.passable))
            }
        }
    }
}

impl SpatialIndex for Level {
    type Region = RegionId;
    type Line = LineId;
    type Actor = ActorId;

    fn point_in_region(&self, point: FVec2) -> Option<RegionId> {
        self.regions
            .iter()
            .position(|r| r.contains(point))
            .map(|i| RegionId(i as u32))
    }

    fn region(&self, region: RegionId) -> RegionInfo {
        let r = self.region_by_id(region);
        RegionInfo {
            floor: r.floor.height,
            ceiling: r.ceiling.height,
            group: r.group,
        }
    }

    fn line(&self, line: LineId) -> LineInfo<RegionId> {
        let l = self.line_by_id(line);
        LineInfo {
            v1: l.v1,
            v2: l.v2,
            front: l.front,
            back: l.back,
            block_all: l.flags.block_all,
            lower_portal: l.flags.lower_portal,
            upper_portal: l.flags.upper_portal,
        }
    }

    fn traverse(
        &self,
        trace: &DivLine,
        visitor: &mut dyn FnMut(&Intercept<LineId, ActorId>) -> Traverse,
    ) -> bool {
        PathTraverser::new(self, *trace).traverse(visitor)
    }
}

impl PortalRegistry for Level {
    fn passable(&self, surface: PortalSurface<RegionId, LineId>) -> bool {
        matches!(self.portal_of(surface), Some((_, true)))
    }

    fn link(&self, surface: PortalSurface<RegionId, LineId>) -> Option<PortalLink> {
        self.portal_of(surface)
            .map(|(portal, _)| self.portals[portal.index()].link())
    }
}

impl ActorModel for Level {
    fn actor(&self, actor: ActorId) -> ActorInfo<RegionId> {
        let a = self.actor_by_id(actor);
        ActorInfo {
            position: a.position,
            height: a.height,
            radius: a.radius,
            pitch: a.pitch,
            region: a.region,
            group: a.group,
            flags: a.flags,
        }
    }
}
