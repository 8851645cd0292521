// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall wrapper: orientation, solid edges and the referenceable planar faces
//! of a wall, including the jamb faces of openings cut through it.

use rustc_hash::FxHashSet;

use crate::face::{AdvancedPlanarFace, Bounds3};
use crate::orientation::{classify, ExtremeSide, Orientation};
use crate::probe::Segment2;
use crate::records::{InsertGeometry, Solid, WallData, WallEnd, WallJoins};
use crate::types::{CurveType, Curve, Edge, ElementId, Point3D, TOLERANCE};

#[derive(Debug, Clone)]
pub struct AdvancedWall {
    pub id: ElementId,
    pub orientation: Orientation,
    pub curve_type: Option<CurveType>,
    pub location: Option<Curve>,
    pub start: Point3D,
    pub end: Point3D,
    /// Chord midpoint of the location curve.
    pub mid: Point3D,
    pub width: f64,
    pub is_curtain: bool,
    pub joins: WallJoins,
    pub solids: Vec<Solid>,
    pub edges: Vec<Edge>,
    pub faces: Vec<AdvancedPlanarFace>,
    /// Bounds of the defined faces (X/Y) and of their edges (Z).
    pub bounds: Bounds3,
    pub is_defined: bool,
}

impl AdvancedWall {
    pub fn new(data: &WallData, inserts: &dyn InsertGeometry) -> Self {
        let curve_type = data.location.as_ref().and_then(Curve::curve_type);
        let (start, end) = data
            .location
            .as_ref()
            .and_then(Curve::endpoints)
            .unwrap_or_default();

        let mut wall = Self {
            id: data.id,
            orientation: Orientation::Undefined,
            curve_type,
            location: data.location.clone(),
            start,
            end,
            mid: start.midpoint(&end),
            width: data.width,
            is_curtain: data.is_curtain,
            joins: data.joins.clone(),
            solids: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            bounds: Bounds3::empty(),
            is_defined: false,
        };

        if curve_type.is_none() {
            return wall;
        }
        wall.orientation = classify(&start, &end, TOLERANCE);

        wall.solids = data
            .solids
            .iter()
            .filter(|solid| solid.volume > 0.0)
            .cloned()
            .collect();
        wall.edges = wall
            .solids
            .iter()
            .flat_map(|solid| solid.edges.iter().copied())
            .collect();
        wall.faces = collect_faces(data, &wall.solids, inserts);

        for face in &wall.faces {
            wall.bounds.merge(&face.bounds);
        }

        wall.is_defined =
            !wall.edges.is_empty() && !wall.faces.is_empty() && wall.orientation.is_strict();
        wall
    }

    pub fn min_x(&self) -> f64 {
        self.bounds.min.x
    }
    pub fn max_x(&self) -> f64 {
        self.bounds.max.x
    }
    pub fn min_y(&self) -> f64 {
        self.bounds.min.y
    }
    pub fn max_y(&self) -> f64 {
        self.bounds.max.y
    }
    pub fn min_z(&self) -> f64 {
        self.bounds.min.z
    }
    pub fn max_z(&self) -> f64 {
        self.bounds.max.z
    }

    /// Location curve as a start→end chord in plan.
    pub fn plan_segment(&self) -> Segment2 {
        Segment2::from_points(&self.start, &self.end)
    }

    /// Joined to `other` at either end. A wall is never joined to itself.
    pub fn is_joined_to(&self, other: ElementId) -> bool {
        other != self.id && self.joins.contains(other)
    }

    pub fn is_joined_at(&self, end: WallEnd, other: ElementId) -> bool {
        other != self.id && self.joins.at(end).contains(&other)
    }

    /// Faces a `side` dimension line measures to.
    pub fn faces_measured_by(
        &self,
        side: ExtremeSide,
    ) -> impl Iterator<Item = &AdvancedPlanarFace> + '_ {
        self.faces
            .iter()
            .filter(move |face| face.is_measured_by(side))
    }

    pub fn width_in_mm(&self, model_units_per_mm: f64) -> f64 {
        self.width / model_units_per_mm
    }
}

/// Referenced, defined planar faces of the wall's solids, plus those of the
/// inserts whose openings produced unreferenced faces on the wall.
fn collect_faces(
    data: &WallData,
    solids: &[Solid],
    inserts: &dyn InsertGeometry,
) -> Vec<AdvancedPlanarFace> {
    let mut faces = Vec::new();
    let mut visited: FxHashSet<ElementId> = FxHashSet::default();

    for planar in solids.iter().flat_map(Solid::planar_faces) {
        if let Some(face) = AdvancedPlanarFace::from_referenced(data.id, planar) {
            if face.is_defined {
                faces.push(face);
            }
            continue;
        }

        for &generator in &planar.generating_elements {
            if generator == data.id || visited.contains(&generator) {
                continue;
            }
            if !data.inserts.contains(&generator) {
                continue;
            }
            for solid in inserts.insert_solids(generator) {
                faces.extend(
                    solid
                        .planar_faces()
                        .filter_map(|f| AdvancedPlanarFace::from_referenced(generator, f))
                        .filter(|f| f.is_defined),
                );
            }
            visited.insert(generator);
        }
    }

    faces
}
