// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan orientation of elements and the four sides of a building footprint.

use serde::{Deserialize, Serialize};

use crate::types::Point3D;

/// Orientation of a location curve in plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
    CloseToHorizontal,
    CloseToVertical,
    Undefined,
}

impl Orientation {
    /// Only strictly horizontal or vertical elements take part in dimensioning.
    pub fn is_strict(self) -> bool {
        matches!(self, Orientation::Horizontal | Orientation::Vertical)
    }

    /// The strict orientation at a right angle to this one.
    pub fn perpendicular(self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::CloseToHorizontal => Orientation::CloseToVertical,
            Orientation::CloseToVertical => Orientation::CloseToHorizontal,
            Orientation::Undefined => Orientation::Undefined,
        }
    }
}

/// Classifies the segment `p0 → p1` by its X/Y deltas.
///
/// Coincident endpoints (in plan) are checked first so that a degenerate
/// segment never reads as horizontal or vertical.
pub fn classify(p0: &Point3D, p1: &Point3D, tolerance: f64) -> Orientation {
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();

    if dx < tolerance && dy < tolerance {
        return Orientation::Undefined;
    }
    if dx < tolerance {
        return Orientation::Vertical;
    }
    if dy < tolerance {
        return Orientation::Horizontal;
    }

    if dx >= dy {
        Orientation::CloseToHorizontal
    } else {
        Orientation::CloseToVertical
    }
}

/// Side of the footprint a group of extreme walls (and its dimensions) sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtremeSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl ExtremeSide {
    /// Order in which sides are dimensioned.
    pub const PROCESSING_ORDER: [ExtremeSide; 4] = [
        ExtremeSide::Right,
        ExtremeSide::Left,
        ExtremeSide::Top,
        ExtremeSide::Bottom,
    ];

    /// Left and right dimension lines run along Y.
    pub fn is_left_or_right(self) -> bool {
        matches!(self, ExtremeSide::Left | ExtremeSide::Right)
    }

    /// Orientation of the walls that define this side (and of its dimension line).
    pub fn wall_orientation(self) -> Orientation {
        if self.is_left_or_right() {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    /// Orientation of walls, grids and faces measured by this side's dimensions.
    pub fn measured_orientation(self) -> Orientation {
        self.wall_orientation().perpendicular()
    }

    /// +1 when the outside of the footprint lies towards +X/+Y.
    pub fn outward_sign(self) -> f64 {
        match self {
            ExtremeSide::Right | ExtremeSide::Top => 1.0,
            ExtremeSide::Left | ExtremeSide::Bottom => -1.0,
        }
    }

    /// Coordinate along the dimension line (Y for left/right, X for top/bottom).
    pub fn along(self, p: &Point3D) -> f64 {
        if self.is_left_or_right() {
            p.y
        } else {
            p.x
        }
    }

    /// Coordinate across the dimension line (X for left/right, Y for top/bottom).
    pub fn across(self, p: &Point3D) -> f64 {
        if self.is_left_or_right() {
            p.x
        } else {
            p.y
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExtremeSide::Left => "left",
            ExtremeSide::Right => "right",
            ExtremeSide::Top => "top",
            ExtremeSide::Bottom => "bottom",
        }
    }
}

impl std::fmt::Display for ExtremeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TOLERANCE;

    fn p(x: f64, y: f64) -> Point3D {
        Point3D::new(x, y, 0.0)
    }

    #[test]
    fn test_coincident_points_are_undefined() {
        assert_eq!(classify(&p(1.0, 1.0), &p(1.0, 1.0), TOLERANCE), Orientation::Undefined);
        assert_eq!(
            classify(&p(1.0, 1.0), &p(1.00005, 0.99995), TOLERANCE),
            Orientation::Undefined
        );
    }

    #[test]
    fn test_vertical_and_horizontal() {
        assert_eq!(classify(&p(0.0, 0.0), &p(0.0, 5.0), TOLERANCE), Orientation::Vertical);
        assert_eq!(classify(&p(0.0, 0.0), &p(0.00005, -5.0), TOLERANCE), Orientation::Vertical);
        assert_eq!(classify(&p(0.0, 2.0), &p(7.0, 2.0), TOLERANCE), Orientation::Horizontal);
        // Exactly at the tolerance on the other axis still counts as distinct
        assert_eq!(classify(&p(0.0, 0.0), &p(0.0, TOLERANCE), TOLERANCE), Orientation::Vertical);
    }

    #[test]
    fn test_sloped_segments() {
        assert_eq!(
            classify(&p(0.0, 0.0), &p(10.0, 1.0), TOLERANCE),
            Orientation::CloseToHorizontal
        );
        assert_eq!(
            classify(&p(0.0, 0.0), &p(1.0, 10.0), TOLERANCE),
            Orientation::CloseToVertical
        );
        // 45 degrees goes to the horizontal side
        assert_eq!(
            classify(&p(0.0, 0.0), &p(3.0, 3.0), TOLERANCE),
            Orientation::CloseToHorizontal
        );
        assert!(!Orientation::CloseToVertical.is_strict());
    }

    #[test]
    fn test_z_is_ignored() {
        let a = Point3D::new(0.0, 0.0, 0.0);
        let b = Point3D::new(0.0, 0.0, 3000.0);
        assert_eq!(classify(&a, &b, TOLERANCE), Orientation::Undefined);
    }

    #[test]
    fn test_side_axes() {
        let pt = p(3.0, 8.0);
        assert_eq!(ExtremeSide::Right.along(&pt), 8.0);
        assert_eq!(ExtremeSide::Right.across(&pt), 3.0);
        assert_eq!(ExtremeSide::Top.along(&pt), 3.0);
        assert_eq!(ExtremeSide::Bottom.outward_sign(), -1.0);
        assert_eq!(ExtremeSide::Left.measured_orientation(), Orientation::Horizontal);
        assert_eq!(ExtremeSide::Top.wall_orientation(), Orientation::Horizontal);
    }
}
