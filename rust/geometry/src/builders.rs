// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Builders for straight box walls, their openings and grid lines.
//!
//! Hosts that do not have a solid modeller (scene files, tests) describe
//! walls by their centerline and let these builders produce the solid,
//! its faces and references.

use nalgebra::{Point2, Vector2};

use crate::probe::Segment2;
use crate::records::{FaceData, GridData, PlanarFaceData, Solid, WallData, WallEnd};
use crate::types::{Curve, Edge, ElementId, Point3D, Reference, TOLERANCE};

/// Corners of a box in plan, counter-clockwise when `dir × normal > 0`.
struct OrientedBox {
    start_left: Point2<f64>,
    end_left: Point2<f64>,
    end_right: Point2<f64>,
    start_right: Point2<f64>,
    z0: f64,
    z1: f64,
}

impl OrientedBox {
    fn new(a: Point2<f64>, b: Point2<f64>, width: f64, z0: f64, z1: f64) -> Option<Self> {
        let dir = b - a;
        let len = dir.norm();
        if len <= f64::EPSILON || width <= 0.0 || z1 <= z0 {
            return None;
        }
        let normal = Vector2::new(-dir.y, dir.x) / len * (0.5 * width);
        Some(Self {
            start_left: a + normal,
            end_left: b + normal,
            end_right: b - normal,
            start_right: a - normal,
            z0,
            z1,
        })
    }

    fn volume(&self) -> f64 {
        (self.end_left - self.start_left).norm()
            * (self.start_left - self.start_right).norm()
            * (self.z1 - self.z0)
    }

    /// Vertical quad between two plan points.
    fn side(&self, p: Point2<f64>, q: Point2<f64>, z0: f64, z1: f64) -> [Point3D; 4] {
        [
            Point3D::new(p.x, p.y, z0),
            Point3D::new(q.x, q.y, z0),
            Point3D::new(q.x, q.y, z1),
            Point3D::new(p.x, p.y, z1),
        ]
    }

    fn cap(&self, z: f64) -> [Point3D; 4] {
        [self.start_left, self.end_left, self.end_right, self.start_right]
            .map(|p| Point3D::new(p.x, p.y, z))
    }

    /// Named faces: both long sides, both end caps, bottom and top.
    fn faces(&self) -> [(&'static str, [Point3D; 4]); 6] {
        [
            ("side-left", self.side(self.start_left, self.end_left, self.z0, self.z1)),
            ("side-right", self.side(self.start_right, self.end_right, self.z0, self.z1)),
            ("end-start", self.side(self.start_right, self.start_left, self.z0, self.z1)),
            ("end-end", self.side(self.end_right, self.end_left, self.z0, self.z1)),
            ("bottom", self.cap(self.z0)),
            ("top", self.cap(self.z1)),
        ]
    }
}

fn quad_edges(corners: &[Point3D; 4]) -> Vec<Edge> {
    (0..4)
        .map(|i| Edge::new(corners[i], corners[(i + 1) % 4]))
        .collect()
}

fn planar(corners: &[Point3D; 4], reference: Option<Reference>, generators: Vec<ElementId>) -> FaceData {
    FaceData::Planar(PlanarFaceData {
        reference,
        origin: corners[0],
        edge_loops: vec![quad_edges(corners)],
        generating_elements: generators,
    })
}

/// Box solid whose faces are referenced as `{prefix}:{face}`.
fn box_solid(prefix: &str, owner: ElementId, shape: &OrientedBox) -> Solid {
    let mut faces = Vec::with_capacity(6);
    let mut edges = Vec::with_capacity(24);
    for (name, corners) in shape.faces() {
        edges.extend(quad_edges(&corners));
        faces.push(planar(
            &corners,
            Some(Reference::new(format!("{prefix}:{name}"))),
            vec![owner],
        ));
    }
    Solid {
        volume: shape.volume(),
        faces,
        edges,
    }
}

#[derive(Debug, Clone, Copy)]
struct OpeningSpec {
    id: ElementId,
    from: f64,
    to: f64,
    sill: f64,
    head: f64,
}

/// A wall record together with the solids of the openings it hosts.
#[derive(Debug, Clone)]
pub struct BuiltWall {
    pub wall: WallData,
    pub inserts: Vec<(ElementId, Vec<Solid>)>,
}

/// Straight wall along a centerline. Defaults are in millimetres:
/// 200 wide, 0 to 3000 high, no end extension.
#[derive(Debug, Clone)]
pub struct WallBuilder {
    id: ElementId,
    start: Point2<f64>,
    end: Point2<f64>,
    width: f64,
    base: f64,
    top: f64,
    extend_start: f64,
    extend_end: f64,
    is_curtain: bool,
    openings: Vec<OpeningSpec>,
}

impl WallBuilder {
    pub fn new(id: i64, start: (f64, f64), end: (f64, f64)) -> Self {
        Self {
            id: ElementId(id),
            start: Point2::new(start.0, start.1),
            end: Point2::new(end.0, end.1),
            width: 200.0,
            base: 0.0,
            top: 3000.0,
            extend_start: 0.0,
            extend_end: 0.0,
            is_curtain: false,
            openings: Vec::new(),
        }
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn heights(mut self, base: f64, top: f64) -> Self {
        self.base = base;
        self.top = top;
        self
    }

    /// Lengthens (positive) or trims (negative) the solid past each end of the
    /// location line, the way joined walls overlap at corners.
    pub fn extend(mut self, at_start: f64, at_end: f64) -> Self {
        self.extend_start = at_start;
        self.extend_end = at_end;
        self
    }

    pub fn curtain(mut self) -> Self {
        self.is_curtain = true;
        self
    }

    /// Opening between `from` and `to` measured along the wall from its
    /// start point, between `sill` and `head` elevations.
    pub fn opening(mut self, id: i64, from: f64, to: f64, sill: f64, head: f64) -> Self {
        self.openings.push(OpeningSpec {
            id: ElementId(id),
            from: from.min(to),
            to: from.max(to),
            sill,
            head,
        });
        self
    }

    pub fn build(&self) -> BuiltWall {
        let location = Curve::line(
            Point3D::new(self.start.x, self.start.y, self.base),
            Point3D::new(self.end.x, self.end.y, self.base),
        );
        let mut wall = WallData {
            id: self.id,
            location: Some(location),
            width: self.width,
            is_curtain: self.is_curtain,
            solids: Vec::new(),
            inserts: self.openings.iter().map(|o| o.id).collect(),
            joins: Default::default(),
        };

        let span = self.end - self.start;
        let len = span.norm();
        if len <= f64::EPSILON {
            return BuiltWall {
                wall,
                inserts: Vec::new(),
            };
        }
        let dir = span / len;

        let a = self.start - dir * self.extend_start;
        let b = self.end + dir * self.extend_end;
        let Some(shape) = OrientedBox::new(a, b, self.width, self.base, self.top) else {
            return BuiltWall {
                wall,
                inserts: Vec::new(),
            };
        };
        let mut solid = box_solid(&self.id.0.to_string(), self.id, &shape);

        let mut inserts = Vec::with_capacity(self.openings.len());
        for opening in &self.openings {
            let from = self.start + dir * opening.from;
            let to = self.start + dir * opening.to;
            let Some(cut) = OrientedBox::new(from, to, self.width, opening.sill, opening.head) else {
                continue;
            };

            // Jambs left in the wall by the cut carry no reference of their own.
            for (name, corners) in cut.faces() {
                if name.starts_with("end-") {
                    solid.faces.push(planar(&corners, None, vec![opening.id]));
                }
            }
            solid.volume -= cut.volume();

            inserts.push((
                opening.id,
                vec![box_solid(&opening.id.0.to_string(), opening.id, &cut)],
            ));
        }

        wall.solids.push(solid);
        BuiltWall { wall, inserts }
    }
}

/// Straight grid line referenced as `grid:{id}`.
pub fn grid_line(id: i64, start: (f64, f64), end: (f64, f64)) -> GridData {
    GridData {
        id: ElementId(id),
        curve: Some(Curve::line(
            Point3D::new(start.0, start.1, 0.0),
            Point3D::new(end.0, end.1, 0.0),
        )),
        references: vec![Reference::new(format!("grid:{id}"))],
    }
}

/// Distance from `p` to the segment.
fn distance_to_segment(p: &Point2<f64>, segment: &Segment2) -> f64 {
    let d = segment.direction();
    let len2 = d.norm_squared();
    if len2 <= f64::EPSILON {
        return (p - segment.start).norm();
    }
    let t = ((p - segment.start).dot(&d) / len2).clamp(0.0, 1.0);
    (p - (segment.start + d * t)).norm()
}

/// Fills in end joins from location geometry.
///
/// An end of wall A is joined to wall B when it lies on B's location line,
/// at B's endpoint (corner) or inside it (T junction). Only the abutting wall
/// records a T junction. Existing joins are kept.
pub fn join_shared_endpoints(walls: &mut [WallData]) {
    let lines: Vec<(ElementId, Option<Segment2>)> = walls
        .iter()
        .map(|w| {
            let segment = w
                .location
                .as_ref()
                .and_then(Curve::endpoints)
                .map(|(s, e)| Segment2::from_points(&s, &e));
            (w.id, segment)
        })
        .collect();

    for wall in walls.iter_mut() {
        let Some((start, end)) = wall.location.as_ref().and_then(Curve::endpoints) else {
            continue;
        };
        for (end_kind, point) in [(WallEnd::Start, start), (WallEnd::End, end)] {
            let p = point.to_plan();
            for (other_id, segment) in &lines {
                let Some(segment) = segment else { continue };
                if *other_id == wall.id || distance_to_segment(&p, segment) >= TOLERANCE {
                    continue;
                }
                let joins = wall.joins.at_mut(end_kind);
                if !joins.contains(other_id) {
                    joins.push(*other_id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_wall_faces() {
        let built = WallBuilder::new(3, (0.0, 0.0), (1000.0, 0.0))
            .extend(100.0, 100.0)
            .build();
        let solid = &built.wall.solids[0];
        assert_eq!(solid.faces.len(), 6);
        assert_eq!(solid.edges.len(), 24);
        assert_relative_eq!(solid.volume, 1200.0 * 200.0 * 3000.0);

        let refs: Vec<_> = solid
            .planar_faces()
            .filter_map(|f| f.reference.as_ref().map(|r| r.as_str().to_owned()))
            .collect();
        assert!(refs.contains(&"3:end-start".to_owned()));

        let start_cap = solid
            .planar_faces()
            .find(|f| f.reference.as_ref().map(Reference::as_str) == Some("3:end-start"))
            .unwrap();
        assert!(start_cap.edges().all(|e| (e.start.x + 100.0).abs() < 1e-9));
    }

    #[test]
    fn test_opening_adds_jambs_and_insert() {
        let built = WallBuilder::new(3, (0.0, 0.0), (0.0, 5000.0))
            .opening(40, 2000.0, 1000.0, 900.0, 2100.0)
            .build();
        assert_eq!(built.wall.inserts, vec![ElementId(40)]);
        assert_eq!(built.inserts.len(), 1);

        let jambs: Vec<_> = built.wall.solids[0]
            .planar_faces()
            .filter(|f| f.reference.is_none())
            .collect();
        assert_eq!(jambs.len(), 2);
        assert!(jambs
            .iter()
            .all(|f| f.generating_elements == vec![ElementId(40)]));
    }

    #[test]
    fn test_degenerate_wall_has_no_solid() {
        let built = WallBuilder::new(1, (5.0, 5.0), (5.0, 5.0)).build();
        assert!(built.wall.solids.is_empty());
    }

    #[test]
    fn test_corner_and_tee_joins() {
        let mut walls = vec![
            WallBuilder::new(1, (0.0, 0.0), (10.0, 0.0)).build().wall,
            WallBuilder::new(2, (10.0, 0.0), (10.0, 6.0)).build().wall,
            WallBuilder::new(3, (4.0, 0.0), (4.0, 6.0)).build().wall,
        ];
        join_shared_endpoints(&mut walls);

        assert_eq!(walls[0].joins.end.as_slice(), &[ElementId(2)]);
        assert_eq!(walls[1].joins.start.as_slice(), &[ElementId(1)]);
        // the partition abuts wall 1, which does not list it back
        assert_eq!(walls[2].joins.start.as_slice(), &[ElementId(1)]);
        assert!(!walls[0].joins.contains(ElementId(3)));
        assert!(walls[2].joins.end.is_empty());
    }

    #[test]
    fn test_grid_line_reference() {
        let grid = grid_line(12, (0.0, 0.0), (0.0, 100.0));
        assert_eq!(grid.references[0].as_str(), "grid:12");
    }
}
