// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan segments and the perpendicular probe lines used to tell exterior
//! walls from interior ones.

use nalgebra::{Point2, Vector2};

use crate::orientation::Orientation;
use crate::types::Point3D;

/// Default probe half-length in model units. Long enough to leave any building.
pub const DEFAULT_PROBE_LENGTH: f64 = 1_000_000.0;

#[inline]
fn cross(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// A 2D segment in the plan (Z is always 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2 {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl Segment2 {
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self { start, end }
    }

    /// Drops Z from both points.
    pub fn from_points(start: &Point3D, end: &Point3D) -> Self {
        Self::new(start.to_plan(), end.to_plan())
    }

    pub fn direction(&self) -> Vector2<f64> {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// True when the two segments share a single point, endpoints included.
    ///
    /// Parallel and collinear segments never count, even if they overlap:
    /// a probe running along a wall does not cross it.
    pub fn intersects(&self, other: &Segment2, tolerance: f64) -> bool {
        let r = self.direction();
        let s = other.direction();
        let r_len = r.norm();
        let s_len = s.norm();
        if r_len < tolerance || s_len < tolerance {
            return false;
        }

        let denom = cross(&r, &s);
        if denom.abs() <= 1e-12 * r_len * s_len {
            return false;
        }

        let qp = other.start - self.start;
        let t = cross(&qp, &s) / denom;
        let u = cross(&qp, &r) / denom;

        let t_tol = tolerance / r_len;
        let u_tol = tolerance / s_len;
        (-t_tol..=1.0 + t_tol).contains(&t) && (-u_tol..=1.0 + u_tol).contains(&u)
    }
}

/// The two probes cast from a wall midpoint, one towards each side.
#[derive(Debug, Clone, Copy)]
pub struct ProbePair {
    /// Towards -X for vertical walls, -Y for horizontal ones.
    pub negative: Segment2,
    /// Towards +X for vertical walls, +Y for horizontal ones.
    pub positive: Segment2,
}

impl ProbePair {
    /// Probes perpendicular to a strictly oriented wall through `mid`.
    ///
    /// Returns `None` for anything that is not strictly horizontal or vertical.
    pub fn perpendicular(mid: &Point3D, orientation: Orientation, length: f64) -> Option<Self> {
        let origin = mid.to_plan();
        let axis = match orientation {
            Orientation::Vertical => Vector2::new(1.0, 0.0),
            Orientation::Horizontal => Vector2::new(0.0, 1.0),
            _ => return None,
        };
        Some(Self {
            negative: Segment2::new(origin - axis * length, origin),
            positive: Segment2::new(origin, origin + axis * length),
        })
    }

    /// Which probes hit at least one of `segments`, as `(negative, positive)`.
    pub fn hits<'a, I>(&self, segments: I, tolerance: f64) -> (bool, bool)
    where
        I: IntoIterator<Item = &'a Segment2>,
    {
        let mut negative = false;
        let mut positive = false;
        for segment in segments {
            negative = negative || self.negative.intersects(segment, tolerance);
            positive = positive || self.positive.intersects(segment, tolerance);
            if negative && positive {
                break;
            }
        }
        (negative, positive)
    }
}
