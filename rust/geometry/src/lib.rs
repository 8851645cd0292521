// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Exterior-Dims Geometry
//!
//! Plan-view primitives for exterior dimensioning: orientation classification,
//! probe segments, raw host records and the wall/grid/face wrappers the
//! engine works on. Uses nalgebra for the 2D/3D math.

pub mod builders;
pub mod error;
pub mod export;
pub mod face;
pub mod grid;
pub mod orientation;
pub mod probe;
pub mod records;
pub mod types;
pub mod wall;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2};

pub use builders::{grid_line, join_shared_endpoints, BuiltWall, WallBuilder};
pub use error::{Error, Result};
pub use face::{AdvancedPlanarFace, Bounds3};
pub use grid::AdvancedGrid;
pub use orientation::{classify, ExtremeSide, Orientation};
pub use probe::{ProbePair, Segment2, DEFAULT_PROBE_LENGTH};
pub use records::{
    FaceData, GridData, InsertGeometry, NoInserts, PlanarFaceData, Solid, WallData, WallEnd,
    WallJoins,
};
pub use types::{Curve, CurveType, Edge, ElementId, Point3D, Reference, TOLERANCE};
pub use wall::AdvancedWall;
