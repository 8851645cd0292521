// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::orientation::{classify, Orientation};
use crate::records::GridData;
use crate::types::{Curve, CurveType, ElementId, Point3D, Reference, TOLERANCE};

/// Grid line wrapper.
#[derive(Debug, Clone)]
pub struct AdvancedGrid {
    pub id: ElementId,
    pub orientation: Orientation,
    pub curve_type: Option<CurveType>,
    pub start: Point3D,
    pub end: Point3D,
    pub references: Vec<Reference>,
    pub is_defined: bool,
}

impl AdvancedGrid {
    pub fn new(data: &GridData) -> Self {
        let curve_type = data.curve.as_ref().and_then(Curve::curve_type);
        let (start, end) = data
            .curve
            .as_ref()
            .and_then(Curve::endpoints)
            .unwrap_or_default();

        let orientation = if curve_type.is_some() {
            classify(&start, &end, TOLERANCE)
        } else {
            Orientation::Undefined
        };

        Self {
            id: data.id,
            orientation,
            curve_type,
            start,
            end,
            references: data.references.clone(),
            is_defined: orientation.is_strict(),
        }
    }

    /// The reference a dimension anchors to.
    pub fn reference(&self) -> Option<&Reference> {
        self.references.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(curve: Option<Curve>) -> GridData {
        GridData {
            id: ElementId(9),
            curve,
            references: vec![Reference::new("grid:9")],
        }
    }

    #[test]
    fn test_vertical_grid() {
        let g = AdvancedGrid::new(&grid(Some(Curve::line(
            Point3D::new(5.0, -10.0, 0.0),
            Point3D::new(5.0, 50.0, 0.0),
        ))));
        assert!(g.is_defined);
        assert_eq!(g.orientation, Orientation::Vertical);
        assert_eq!(g.reference().map(Reference::as_str), Some("grid:9"));
    }

    #[test]
    fn test_arc_grid_is_not_strict() {
        let g = AdvancedGrid::new(&grid(Some(Curve::Arc {
            start: Point3D::new(0.0, 0.0, 0.0),
            end: Point3D::new(10.0, 10.0, 0.0),
            mid: Point3D::new(7.0, 3.0, 0.0),
        })));
        assert_eq!(g.curve_type, Some(CurveType::Arc));
        assert!(!g.is_defined);
    }

    #[test]
    fn test_grid_without_curve() {
        let g = AdvancedGrid::new(&grid(None));
        assert_eq!(g.orientation, Orientation::Undefined);
        assert!(!g.is_defined);
    }
}
