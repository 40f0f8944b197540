//! Programmatic level construction
//!
//! Collects the same definitions a level file holds and validates them on
//! [`LevelBuilder::build`].

use crate::def::{ActorDef, LevelDef, LineDef, PortalDef, RegionDef};
use crate::error::LevelError;
use crate::level::Level;
use glam::DVec2;

#[derive(Debug, Clone, Default)]
pub struct LevelBuilder {
    def: LevelDef,
}

impl LevelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            def: LevelDef {
                name: name.into(),
                ..Default::default()
            },
        }
    }

    pub fn portal(mut self, portal: PortalDef) -> Self {
        self.def.portals.push(portal);
        self
    }

    pub fn region(mut self, region: RegionDef) -> Self {
        self.def.regions.push(region);
        self
    }

    pub fn line(mut self, line: LineDef) -> Self {
        self.def.lines.push(line);
        self
    }

    pub fn actor(mut self, actor: ActorDef) -> Self {
        self.def.actors.push(actor);
        self
    }

    /// One-sided wall with `front` on its right
    pub fn wall(self, v1: DVec2, v2: DVec2, front: impl Into<String>) -> Self {
        self.line(LineDef::new(v1, v2, front))
    }

    /// Plain two-sided line between `front` (right) and `back` (left)
    pub fn two_sided(
        self,
        v1: DVec2,
        v2: DVec2,
        front: impl Into<String>,
        back: impl Into<String>,
    ) -> Self {
        self.line(LineDef::new(v1, v2, front).back(back))
    }

    pub fn def(&self) -> &LevelDef {
        &self.def
    }

    pub fn into_def(self) -> LevelDef {
        self.def
    }

    pub fn build(&self) -> Result<Level, LevelError> {
        Level::from_def(&self.def)
    }
}
