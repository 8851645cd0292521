// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::orientation::ExtremeSide;
use crate::records::PlanarFaceData;
use crate::types::{Edge, ElementId, Point3D, Reference, TOLERANCE};

/// Axis-aligned bounds of a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    pub min: Point3D,
    pub max: Point3D,
}

impl Bounds3 {
    pub fn empty() -> Self {
        Self {
            min: Point3D::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3D::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = &'a Edge>,
    {
        let mut bounds = Self::empty();
        for edge in edges {
            for p in edge.endpoints() {
                bounds.include(&p);
            }
        }
        bounds
    }

    pub fn include(&mut self, p: &Point3D) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn merge(&mut self, other: &Bounds3) {
        if other.is_empty() {
            return;
        }
        self.include(&other.min);
        self.include(&other.max);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }
}

/// A referenceable planar face that is a vertical plane, either parallel to
/// the X axis ("horizontal" in plan) or to the Y axis ("vertical" in plan).
#[derive(Debug, Clone)]
pub struct AdvancedPlanarFace {
    /// Wall (or insert) the face was taken from.
    pub owner: ElementId,
    pub reference: Reference,
    pub origin: Point3D,
    pub edges: Vec<Edge>,
    pub bounds: Bounds3,
    pub is_horizontal: bool,
    pub is_vertical: bool,
    pub is_defined: bool,
}

impl AdvancedPlanarFace {
    pub fn new(owner: ElementId, reference: Reference, face: &PlanarFaceData) -> Self {
        let edges: Vec<Edge> = face.edges().copied().collect();
        let bounds = Bounds3::from_edges(&edges);

        let (is_horizontal, is_vertical) = if bounds.is_empty() {
            (false, false)
        } else {
            (
                (bounds.min.y - bounds.max.y).abs() < TOLERANCE,
                (bounds.min.x - bounds.max.x).abs() < TOLERANCE,
            )
        };
        // Both flat at once means a degenerate sliver, neither means the face
        // is a floor, a ceiling or sloped.
        let is_defined = !edges.is_empty() && (is_horizontal != is_vertical);

        Self {
            owner,
            reference,
            origin: face.origin,
            edges,
            bounds,
            is_horizontal,
            is_vertical,
            is_defined,
        }
    }

    /// Wraps a face only when it carries a reference.
    pub fn from_referenced(owner: ElementId, face: &PlanarFaceData) -> Option<Self> {
        face.reference
            .as_ref()
            .map(|reference| Self::new(owner, reference.clone(), face))
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

    /// Whether the plane at elevation `z` cuts through this face.
    pub fn spans_elevation(&self, z: f64) -> bool {
        self.min_z() <= z && z <= self.max_z()
    }

    /// True when this face is one that a `side` dimension line measures to,
    /// i.e. it is perpendicular to that line.
    pub fn is_measured_by(&self, side: ExtremeSide) -> bool {
        if !self.is_defined {
            false
        } else if side.is_left_or_right() {
            self.is_horizontal
        } else {
            self.is_vertical
        }
    }

    /// Lower bound along the dimension line of `side`.
    pub fn min_along(&self, side: ExtremeSide) -> f64 {
        side.along(&self.bounds.min)
    }

    /// Extent across the dimension line of `side` (how deep the face reaches
    /// into the wall).
    pub fn length_across(&self, side: ExtremeSide) -> f64 {
        side.across(&self.bounds.max) - side.across(&self.bounds.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(points: [(f64, f64, f64); 4]) -> PlanarFaceData {
        let p: Vec<Point3D> = points
            .iter()
            .map(|&(x, y, z)| Point3D::new(x, y, z))
            .collect();
        let edges = (0..4).map(|i| Edge::new(p[i], p[(i + 1) % 4])).collect();
        PlanarFaceData {
            reference: Some(Reference::new("f")),
            origin: p[0],
            edge_loops: vec![edges],
            generating_elements: Vec::new(),
        }
    }

    #[test]
    fn test_face_parallel_to_x_is_horizontal() {
        let data = quad([
            (0.0, 100.0, 0.0),
            (10.0, 100.0, 0.0),
            (10.0, 100.0, 3.0),
            (0.0, 100.0, 3.0),
        ]);
        let face = AdvancedPlanarFace::from_referenced(ElementId(1), &data).unwrap();
        assert!(face.is_defined);
        assert!(face.is_horizontal);
        assert!(!face.is_vertical);
        assert!(face.is_measured_by(ExtremeSide::Left));
        assert!(!face.is_measured_by(ExtremeSide::Top));
        assert_eq!(face.length_across(ExtremeSide::Right), 10.0);
        assert!(face.spans_elevation(1.5));
        assert!(!face.spans_elevation(3.5));
    }

    #[test]
    fn test_floor_face_is_undefined() {
        let data = quad([
            (0.0, 0.0, 0.0),
            (10.0, 0.0, 0.0),
            (10.0, 5.0, 0.0),
            (0.0, 5.0, 0.0),
        ]);
        let face = AdvancedPlanarFace::from_referenced(ElementId(1), &data).unwrap();
        assert!(!face.is_defined);
    }

    #[test]
    fn test_vertical_sliver_is_undefined() {
        // flat in both X and Y: a line standing on end
        let data = quad([
            (2.0, 4.0, 0.0),
            (2.0, 4.0, 1.0),
            (2.0, 4.0, 3.0),
            (2.0, 4.0, 2.0),
        ]);
        let face = AdvancedPlanarFace::from_referenced(ElementId(1), &data).unwrap();
        assert!(face.is_horizontal);
        assert!(face.is_vertical);
        assert!(!face.is_defined);
        assert!(!face.is_measured_by(ExtremeSide::Left));
        assert!(!face.is_measured_by(ExtremeSide::Top));
    }

    #[test]
    fn test_point_face_is_undefined() {
        let data = quad([(1.0, 1.0, 1.0); 4]);
        let face = AdvancedPlanarFace::from_referenced(ElementId(1), &data).unwrap();
        assert!(face.is_horizontal && face.is_vertical);
        assert!(!face.is_defined);
    }

    #[test]
    fn test_face_without_edges_is_undefined() {
        let data = PlanarFaceData {
            reference: Some(Reference::new("f")),
            origin: Point3D::default(),
            edge_loops: Vec::new(),
            generating_elements: Vec::new(),
        };
        let face = AdvancedPlanarFace::from_referenced(ElementId(1), &data).unwrap();
        assert!(!face.is_defined);
    }

    #[test]
    fn test_unreferenced_face_is_not_wrapped() {
        let mut data = quad([
            (0.0, 0.0, 0.0),
            (0.0, 5.0, 0.0),
            (0.0, 5.0, 3.0),
            (0.0, 0.0, 3.0),
        ]);
        data.reference = None;
        assert!(AdvancedPlanarFace::from_referenced(ElementId(1), &data).is_none());
    }
}
