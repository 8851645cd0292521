// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! XML dump of curves and points for inspecting wall geometry in an external
//! viewer.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::{Curve, Edge, Point3D};
use crate::wall::AdvancedWall;

#[derive(Serialize)]
struct PointXml {
    #[serde(rename = "@X")]
    x: f64,
    #[serde(rename = "@Y")]
    y: f64,
    #[serde(rename = "@Z")]
    z: f64,
}

impl From<&Point3D> for PointXml {
    fn from(p: &Point3D) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

#[derive(Serialize)]
struct LineXml {
    #[serde(rename = "StartPoint")]
    start: PointXml,
    #[serde(rename = "EndPoint")]
    end: PointXml,
}

#[derive(Serialize)]
struct ArcXml {
    #[serde(rename = "StartPoint")]
    start: PointXml,
    #[serde(rename = "EndPoint")]
    end: PointXml,
    #[serde(rename = "PointOnArc")]
    on_arc: PointXml,
}

#[derive(Serialize)]
struct LinesXml {
    #[serde(rename = "Line")]
    items: Vec<LineXml>,
}

#[derive(Serialize)]
struct ArcsXml {
    #[serde(rename = "Arc")]
    items: Vec<ArcXml>,
}

#[derive(Serialize)]
#[serde(rename = "Curves")]
struct CurvesXml {
    #[serde(rename = "Lines", skip_serializing_if = "Option::is_none")]
    lines: Option<LinesXml>,
    #[serde(rename = "Arcs", skip_serializing_if = "Option::is_none")]
    arcs: Option<ArcsXml>,
}

#[derive(Serialize)]
#[serde(rename = "Points")]
struct PointsXml {
    #[serde(rename = "Point")]
    items: Vec<PointXml>,
}

/// Serializes lines and arcs. Unsupported curves are skipped.
pub fn curves_to_xml(curves: &[Curve]) -> Result<String> {
    let mut lines = Vec::new();
    let mut arcs = Vec::new();
    for curve in curves {
        match curve {
            Curve::Line { start, end } => lines.push(LineXml {
                start: start.into(),
                end: end.into(),
            }),
            Curve::Arc { start, end, mid } => arcs.push(ArcXml {
                start: start.into(),
                end: end.into(),
                on_arc: mid.into(),
            }),
            Curve::Unsupported { .. } => {}
        }
    }
    if lines.is_empty() && arcs.is_empty() {
        return Err(Error::EmptyExport("no line or arc to write".into()));
    }

    let doc = CurvesXml {
        lines: (!lines.is_empty()).then_some(LinesXml { items: lines }),
        arcs: (!arcs.is_empty()).then_some(ArcsXml { items: arcs }),
    };
    Ok(quick_xml::se::to_string(&doc)?)
}

pub fn edges_to_xml(edges: &[Edge]) -> Result<String> {
    let curves: Vec<Curve> = edges.iter().map(|e| Curve::line(e.start, e.end)).collect();
    curves_to_xml(&curves)
}

pub fn points_to_xml(points: &[Point3D]) -> Result<String> {
    if points.is_empty() {
        return Err(Error::EmptyExport("no point to write".into()));
    }
    let doc = PointsXml {
        items: points.iter().map(PointXml::from).collect(),
    };
    Ok(quick_xml::se::to_string(&doc)?)
}

/// Face edges of every wall, one `Line` per edge.
pub fn wall_faces_to_xml(walls: &[AdvancedWall]) -> Result<String> {
    let edges: Vec<Edge> = walls
        .iter()
        .flat_map(|wall| wall.faces.iter())
        .flat_map(|face| face.edges.iter().copied())
        .collect();
    edges_to_xml(&edges)
}

/// Location curves of every wall (lines and arcs).
pub fn wall_locations_to_xml(walls: &[AdvancedWall]) -> Result<String> {
    let curves: Vec<Curve> = walls.iter().filter_map(|w| w.location.clone()).collect();
    curves_to_xml(&curves)
}

pub fn write_xml(path: impl AsRef<Path>, xml: &str) -> Result<()> {
    std::fs::write(path, xml)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_and_arcs() {
        let curves = vec![
            Curve::line(Point3D::new(0.0, 0.0, 0.0), Point3D::new(1.0, 0.0, 0.0)),
            Curve::Arc {
                start: Point3D::new(0.0, 0.0, 0.0),
                end: Point3D::new(2.0, 0.0, 0.0),
                mid: Point3D::new(1.0, 1.0, 0.0),
            },
        ];
        let xml = curves_to_xml(&curves).unwrap();
        assert!(xml.starts_with("<Curves>"));
        assert!(xml.contains("<Lines><Line><StartPoint X=\"0\" Y=\"0\" Z=\"0\"/>"));
        assert!(xml.contains("<PointOnArc X=\"1\" Y=\"1\" Z=\"0\"/>"));
    }

    #[test]
    fn test_lines_only_omits_arcs() {
        let edges = [Edge::new(
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(0.0, 3.5, 0.0),
        )];
        let xml = edges_to_xml(&edges).unwrap();
        assert!(!xml.contains("<Arcs>"));
        assert!(xml.contains("Y=\"3.5\""));
    }

    #[test]
    fn test_points() {
        let xml = points_to_xml(&[Point3D::new(1.0, 2.0, 3.0)]).unwrap();
        assert!(xml.starts_with("<Points>"));
        assert!(xml.contains("<Point X=\"1\" Y=\"2\" Z=\"3\"/>"));
    }

    #[test]
    fn test_empty_export_is_an_error() {
        assert!(matches!(curves_to_xml(&[]), Err(Error::EmptyExport(_))));
        assert!(points_to_xml(&[]).is_err());
    }
}
