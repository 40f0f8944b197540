//! Level description files
//!
//! A [`LevelDef`] is what people write: map units as floats, pitch in degrees,
//! and references by name. [`Level::from_def`] resolves the names, converts to
//! fixed point and validates the result.
//!
//! ```toml
//! name = "hall"
//!
//! [[portals]]
//! name = "up"
//! group = 1
//! delta = [0.0, 2048.0, 0.0]
//!
//! [[regions]]
//! name = "hall"
//! outline = [[0.0, 0.0], [0.0, 256.0], [512.0, 256.0], [512.0, 0.0]]
//! floor = { height = 0.0 }
//! ceiling = { height = 128.0, portal = "up" }
//!
//! [[actors]]
//! name = "player"
//! position = [64.0, 128.0, 0.0]
//! player = true
//! ```

use crate::error::LevelError;
use crate::level::{Actor, Level, Line, LineFlags, Portal, PortalId, Region, RegionId, Surface};
use aim::{ActorFlags, GroupId, SpatialIndex};
use geom::{Angle, FVec2, FVec3, Fixed};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

fn default_true() -> bool {
    true
}

fn default_radius() -> f64 {
    16.0
}

fn default_height() -> f64 {
    56.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub portals: Vec<PortalDef>,
    #[serde(default)]
    pub regions: Vec<RegionDef>,
    #[serde(default)]
    pub lines: Vec<LineDef>,
    #[serde(default)]
    pub actors: Vec<ActorDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalDef {
    pub name: String,
    /// Destination group
    pub group: u32,
    /// Offset from the near side to the far side
    pub delta: DVec3,
}

impl PortalDef {
    pub fn new(name: impl Into<String>, group: u32, delta: DVec3) -> Self {
        Self {
            name: name.into(),
            group,
            delta,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDef {
    pub height: f64,
    #[serde(default)]
    pub portal: Option<String>,
    /// Only meaningful with a portal
    #[serde(default = "default_true")]
    pub passable: bool,
}

impl SurfaceDef {
    pub fn solid(height: f64) -> Self {
        Self {
            height,
            portal: None,
            passable: false,
        }
    }

    /// Passable portal surface
    pub fn portal(height: f64, portal: impl Into<String>) -> Self {
        Self {
            height,
            portal: Some(portal.into()),
            passable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDef {
    pub name: String,
    #[serde(default)]
    pub group: u32,
    pub outline: Vec<DVec2>,
    pub floor: SurfaceDef,
    pub ceiling: SurfaceDef,
}

impl RegionDef {
    /// Axis-aligned rectangle in group 0
    pub fn rect(name: impl Into<String>, min: DVec2, max: DVec2, floor: f64, ceiling: f64) -> Self {
        Self {
            name: name.into(),
            group: 0,
            outline: vec![
                min,
                DVec2::new(min.x, max.y),
                max,
                DVec2::new(max.x, min.y),
            ],
            floor: SurfaceDef::solid(floor),
            ceiling: SurfaceDef::solid(ceiling),
        }
    }

    pub fn group(mut self, group: u32) -> Self {
        self.group = group;
        self
    }

    pub fn floor_portal(mut self, portal: impl Into<String>) -> Self {
        self.floor = SurfaceDef::portal(self.floor.height, portal);
        self
    }

    pub fn ceiling_portal(mut self, portal: impl Into<String>) -> Self {
        self.ceiling = SurfaceDef::portal(self.ceiling.height, portal);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDef {
    pub v1: DVec2,
    pub v2: DVec2,
    /// Region on the right walking v1 → v2
    pub front: String,
    #[serde(default)]
    pub back: Option<String>,
    #[serde(default)]
    pub block_all: bool,
    #[serde(default)]
    pub lower_portal: bool,
    #[serde(default)]
    pub upper_portal: bool,
    #[serde(default)]
    pub portal: Option<String>,
    #[serde(default = "default_true")]
    pub passable: bool,
}

impl LineDef {
    /// One-sided line
    pub fn new(v1: DVec2, v2: DVec2, front: impl Into<String>) -> Self {
        Self {
            v1,
            v2,
            front: front.into(),
            back: None,
            block_all: false,
            lower_portal: false,
            upper_portal: false,
            portal: None,
            passable: true,
        }
    }

    pub fn back(mut self, back: impl Into<String>) -> Self {
        self.back = Some(back.into());
        self
    }

    pub fn block_all(mut self) -> Self {
        self.block_all = true;
        self
    }

    pub fn lower_portal(mut self) -> Self {
        self.lower_portal = true;
        self
    }

    pub fn upper_portal(mut self) -> Self {
        self.upper_portal = true;
        self
    }

    pub fn portal(mut self, portal: impl Into<String>) -> Self {
        self.portal = Some(portal.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorDef {
    pub name: String,
    /// Feet position
    pub position: DVec3,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    /// Degrees, positive looks down
    #[serde(default)]
    pub pitch: f64,
    #[serde(default = "default_true")]
    pub shootable: bool,
    #[serde(default)]
    pub friend: bool,
    #[serde(default)]
    pub player: bool,
    #[serde(default)]
    pub not_autoaimed: bool,
}

impl ActorDef {
    /// Shootable actor with the default size
    pub fn new(name: impl Into<String>, position: DVec3) -> Self {
        Self {
            name: name.into(),
            position,
            radius: default_radius(),
            height: default_height(),
            pitch: 0.0,
            shootable: true,
            friend: false,
            player: false,
            not_autoaimed: false,
        }
    }

    pub fn pitch(mut self, degrees: f64) -> Self {
        self.pitch = degrees;
        self
    }

    pub fn friend(mut self) -> Self {
        self.friend = true;
        self
    }

    pub fn player(mut self) -> Self {
        self.player = true;
        self
    }

    pub fn not_autoaimed(mut self) -> Self {
        self.not_autoaimed = true;
        self
    }

    pub fn not_shootable(mut self) -> Self {
        self.shootable = false;
        self
    }
}

/// Name → index table that rejects duplicates
fn index_names<'a>(
    kind: &'static str,
    names: impl Iterator<Item = &'a str>,
) -> Result<HashMap<&'a str, u32>, LevelError> {
    let mut table = HashMap::new();
    for (i, name) in names.enumerate() {
        if table.insert(name, i as u32).is_some() {
            return Err(LevelError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(table)
}

impl Level {
    /// Build and validate a level from its description
    pub fn from_def(def: &LevelDef) -> Result<Level, LevelError> {
        let portal_ids = index_names("portal", def.portals.iter().map(|p| p.name.as_str()))?;
        let region_ids = index_names("region", def.regions.iter().map(|r| r.name.as_str()))?;
        index_names("actor", def.actors.iter().map(|a| a.name.as_str()))?;

        let portal = |name: &Option<String>| -> Result<Option<PortalId>, LevelError> {
            name.as_deref()
                .map(|n| {
                    portal_ids
                        .get(n)
                        .map(|&i| PortalId(i))
                        .ok_or_else(|| LevelError::UnknownPortal(n.to_string()))
                })
                .transpose()
        };
        let region = |name: &str| -> Result<RegionId, LevelError> {
            region_ids
                .get(name)
                .map(|&i| RegionId(i))
                .ok_or_else(|| LevelError::UnknownRegion(name.to_string()))
        };
        let surface = |s: &SurfaceDef| -> Result<Surface, LevelError> {
            Ok(Surface {
                height: Fixed::from_f64(s.height),
                portal: portal(&s.portal)?,
                passable: s.passable && s.portal.is_some(),
            })
        };

        let portals = def
            .portals
            .iter()
            .map(|p| Portal {
                name: p.name.clone(),
                to_group: GroupId(p.group),
                delta: FVec3::from(p.delta),
            })
            .collect();

        let regions = def
            .regions
            .iter()
            .map(|r| {
                if r.outline.len() < 3 {
                    return Err(LevelError::EmptyOutline(r.name.clone()));
                }
                Ok(Region {
                    name: r.name.clone(),
                    outline: r.outline.iter().map(|&p| FVec2::from(p)).collect(),
                    floor: surface(&r.floor)?,
                    ceiling: surface(&r.ceiling)?,
                    group: GroupId(r.group),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let lines = def
            .lines
            .iter()
            .enumerate()
            .map(|(index, l)| {
                let (v1, v2) = (FVec2::from(l.v1), FVec2::from(l.v2));
                if v1 == v2 {
                    return Err(LevelError::DegenerateLine { index });
                }
                Ok(Line {
                    v1,
                    v2,
                    front: region(l.front.as_str())?,
                    back: l.back.as_deref().map(region).transpose()?,
                    flags: LineFlags {
                        block_all: l.block_all,
                        lower_portal: l.lower_portal,
                        upper_portal: l.upper_portal,
                    },
                    portal: portal(&l.portal)?,
                    passable: l.passable,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut level = Level {
            name: def.name.clone(),
            regions,
            lines,
            actors: Vec::with_capacity(def.actors.len()),
            portals,
        };

        for a in &def.actors {
            let position = FVec3::from(a.position);
            let region = level
                .point_in_region(position.xy())
                .ok_or_else(|| LevelError::ActorOutside(a.name.clone()))?;
            let group = level.region_by_id(region).group;
            level.actors.push(Actor {
                name: a.name.clone(),
                position,
                radius: Fixed::from_f64(a.radius),
                height: Fixed::from_f64(a.height),
                pitch: Angle::from_degrees(a.pitch),
                flags: ActorFlags {
                    shootable: a.shootable,
                    friend: a.friend,
                    player: a.player,
                    not_autoaimed: a.not_autoaimed,
                },
                region,
                group,
            });
        }

        debug!(
            name = %level.name,
            regions = level.regions.len(),
            lines = level.lines.len(),
            actors = level.actors.len(),
            portals = level.portals.len(),
            "level built"
        );
        Ok(level)
    }
}
