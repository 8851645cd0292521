// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw element records as delivered by a host application.
//!
//! These are plain data: the host fills them in, the wrappers in
//! [`crate::wall`] and [`crate::grid`] derive everything else.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::{Curve, Edge, ElementId, Point3D, Reference};

/// A planar face of a solid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanarFaceData {
    /// Present when the host lets dimensions attach to this face.
    #[serde(default)]
    pub reference: Option<Reference>,
    pub origin: Point3D,
    pub edge_loops: Vec<Vec<Edge>>,
    /// Elements whose geometry produced this face (the wall itself, or an
    /// opening cutting through it).
    #[serde(default)]
    pub generating_elements: Vec<ElementId>,
}

impl PlanarFaceData {
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edge_loops.iter().flatten()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FaceData {
    Planar(PlanarFaceData),
    /// Cylindrical, ruled and other non-planar faces. Never dimensioned.
    Curved,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Solid {
    pub volume: f64,
    #[serde(default)]
    pub faces: Vec<FaceData>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Solid {
    pub fn planar_faces(&self) -> impl Iterator<Item = &PlanarFaceData> + '_ {
        self.faces.iter().filter_map(|face| match face {
            FaceData::Planar(planar) => Some(planar),
            FaceData::Curved => None,
        })
    }
}

/// One end of a wall's location curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallEnd {
    Start,
    End,
}

impl WallEnd {
    pub const BOTH: [WallEnd; 2] = [WallEnd::Start, WallEnd::End];
}

/// Walls joined at each end of a wall's location curve.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WallJoins {
    #[serde(default)]
    pub start: SmallVec<[ElementId; 4]>,
    #[serde(default)]
    pub end: SmallVec<[ElementId; 4]>,
}

impl WallJoins {
    pub fn at(&self, end: WallEnd) -> &[ElementId] {
        match end {
            WallEnd::Start => &self.start,
            WallEnd::End => &self.end,
        }
    }

    pub fn at_mut(&mut self, end: WallEnd) -> &mut SmallVec<[ElementId; 4]> {
        match end {
            WallEnd::Start => &mut self.start,
            WallEnd::End => &mut self.end,
        }
    }

    /// Joined at either end.
    pub fn contains(&self, id: ElementId) -> bool {
        self.start.contains(&id) || self.end.contains(&id)
    }

    pub fn all(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.start.iter().chain(self.end.iter()).copied()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WallData {
    pub id: ElementId,
    #[serde(default)]
    pub location: Option<Curve>,
    /// Structural width in model units.
    pub width: f64,
    #[serde(default)]
    pub is_curtain: bool,
    #[serde(default)]
    pub solids: Vec<Solid>,
    /// Doors, windows and other openings hosted by this wall.
    #[serde(default)]
    pub inserts: Vec<ElementId>,
    #[serde(default)]
    pub joins: WallJoins,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridData {
    pub id: ElementId,
    #[serde(default)]
    pub curve: Option<Curve>,
    #[serde(default)]
    pub references: Vec<Reference>,
}

/// Lookup of the solids of an insert (door, window) by id.
pub trait InsertGeometry {
    fn insert_solids(&self, insert: ElementId) -> Vec<Solid>;
}

/// For hosts without openings.
pub struct NoInserts;

impl InsertGeometry for NoInserts {
    fn insert_solids(&self, _insert: ElementId) -> Vec<Solid> {
        Vec::new()
    }
}
