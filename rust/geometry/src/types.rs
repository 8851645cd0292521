// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by every stage: points, element ids, opaque references,
//! edges and location curves.

use std::fmt;

use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// Length tolerance in model units. Every geometric comparison uses it.
pub const TOLERANCE: f64 = 1e-4;

/// A 3D point (simplified for serialization)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_nalgebra(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn from_nalgebra(p: &Point3<f64>) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }

    /// Projection onto the plan (Z dropped).
    pub fn to_plan(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn midpoint(&self, other: &Point3D) -> Point3D {
        Point3D::new(
            0.5 * (self.x + other.x),
            0.5 * (self.y + other.y),
            0.5 * (self.z + other.z),
        )
    }

    pub fn distance_to(&self, other: &Point3D) -> f64 {
        (other.to_nalgebra() - self.to_nalgebra()).norm()
    }

    pub fn is_almost_equal_to(&self, other: &Point3D, tolerance: f64) -> bool {
        self.distance_to(other) < tolerance
    }
}

/// Host element id (wall, grid, opening insert).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub i64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque handle to host geometry a dimension can be anchored to.
///
/// The engine never looks inside; it is handed back to the host untouched
/// when a dimension is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reference(String);

impl Reference {
    pub fn new(stable_representation: impl Into<String>) -> Self {
        Self(stable_representation.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Straight edge of a solid or face, already tessellated by the host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    pub start: Point3D,
    pub end: Point3D,
}

impl Edge {
    pub fn new(start: Point3D, end: Point3D) -> Self {
        Self { start, end }
    }

    pub fn endpoints(&self) -> [Point3D; 2] {
        [self.start, self.end]
    }
}

/// Kind of location curve an element is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveType {
    Line,
    Arc,
}

/// Location curve of a wall or a grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Curve {
    Line {
        start: Point3D,
        end: Point3D,
    },
    Arc {
        start: Point3D,
        end: Point3D,
        /// Any point strictly inside the arc.
        mid: Point3D,
    },
    /// Splines, ellipses and the like. Elements built on them are never
    /// dimensioned.
    Unsupported { kind: String },
}

impl Curve {
    pub fn line(start: Point3D, end: Point3D) -> Self {
        Curve::Line { start, end }
    }

    pub fn curve_type(&self) -> Option<CurveType> {
        match self {
            Curve::Line { .. } => Some(CurveType::Line),
            Curve::Arc { .. } => Some(CurveType::Arc),
            Curve::Unsupported { .. } => None,
        }
    }

    /// Start and end point, for supported curve kinds only.
    pub fn endpoints(&self) -> Option<(Point3D, Point3D)> {
        match self {
            Curve::Line { start, end } | Curve::Arc { start, end, .. } => Some((*start, *end)),
            Curve::Unsupported { .. } => None,
        }
    }
}
