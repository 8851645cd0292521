// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimension lines and the references a chain measures to.
//!
//! Each side of the footprint gets one dimension per chain. The line runs
//! parallel to the side, pushed outwards by the accumulated chain offsets;
//! the references depend on the chain mode. Face references in walls mode go
//! through [`FaceFilter`] so that collinear, buried and crowded faces do not
//! end up on the drawing.

use exterior_dims_config::{ChainMode, DimensionChain, RemoveVariant};
use exterior_dims_geometry::{
    AdvancedPlanarFace, AdvancedWall, ExtremeSide, Point3D, Reference, TOLERANCE,
};
use rustc_hash::FxHashSet;

use crate::arena::{ElementArena, WallKey};
use crate::host::Baseline;

/// Point with `along`/`across` coordinates relative to `side`.
fn side_point(side: ExtremeSide, along: f64, across: f64, z: f64) -> Point3D {
    if side.is_left_or_right() {
        Point3D::new(across, along, z)
    } else {
        Point3D::new(along, across, z)
    }
}

/// Line for a chain on `side`, `offset` model units outside the side walls
/// and at the cut plane elevation. `None` when the side walls span nothing
/// along the side.
///
/// The offset is measured from the location lines of the side walls, not
/// from their outer faces.
pub fn baseline(
    arena: &ElementArena,
    side_walls: &[WallKey],
    side: ExtremeSide,
    offset: f64,
    cut: f64,
) -> Option<Baseline> {
    let mut along_min = f64::INFINITY;
    let mut along_max = f64::NEG_INFINITY;
    let mut across_min = f64::INFINITY;
    let mut across_max = f64::NEG_INFINITY;
    for (_, wall) in arena.resolve(side_walls) {
        for p in [&wall.start, &wall.end] {
            along_min = along_min.min(side.along(p));
            along_max = along_max.max(side.along(p));
            across_min = across_min.min(side.across(p));
            across_max = across_max.max(side.across(p));
        }
    }
    // also true for an empty side, where the span is -inf
    if along_max - along_min < TOLERANCE {
        return None;
    }

    let across = if side.outward_sign() > 0.0 {
        across_max + offset
    } else {
        across_min - offset
    };
    Some(Baseline {
        start: side_point(side, along_min, across, cut),
        end: side_point(side, along_max, across, cut),
    })
}

/// First and last face of `wall` measured by `side`, ordered by origin.
fn outermost_faces(wall: &AdvancedWall, side: ExtremeSide) -> Vec<&AdvancedPlanarFace> {
    let mut faces: Vec<&AdvancedPlanarFace> = wall.faces_measured_by(side).collect();
    faces.sort_by(|a, b| side.along(&a.origin).total_cmp(&side.along(&b.origin)));
    match (faces.first(), faces.last()) {
        (Some(&first), Some(&last)) => vec![first, last],
        _ => {
            tracing::debug!(id = %wall.id, %side, "wall has no faces to measure");
            Vec::new()
        }
    }
}

/// Walls among `candidates` that run into a side wall without being one.
pub fn find_intersecting_walls(
    arena: &ElementArena,
    side_walls: &[WallKey],
    candidates: &[WallKey],
) -> Vec<WallKey> {
    let side_ids: FxHashSet<_> = arena.resolve(side_walls).map(|(_, w)| w.id).collect();
    arena
        .resolve(candidates)
        .filter(|(_, wall)| !side_ids.contains(&wall.id))
        .filter(|(_, wall)| side_ids.iter().any(|&id| wall.is_joined_to(id)))
        .map(|(key, _)| key)
        .collect()
}

/// Unfiltered faces a walls-mode chain measures to.
pub fn wall_faces<'a>(
    arena: &'a ElementArena,
    side: ExtremeSide,
    side_walls: &[WallKey],
    candidates: &[WallKey],
    intersecting_walls: bool,
    openings: bool,
) -> Vec<&'a AdvancedPlanarFace> {
    let measured = side.measured_orientation();
    let mut faces = Vec::new();

    if intersecting_walls {
        for (_, wall) in arena.resolve(side_walls) {
            if wall.orientation == measured {
                faces.extend(outermost_faces(wall, side));
            }
        }
        let intersecting = find_intersecting_walls(arena, side_walls, candidates);
        for (_, wall) in arena.resolve(&intersecting) {
            if wall.orientation == measured {
                faces.extend(outermost_faces(wall, side));
            }
        }
    } else {
        for (_, wall) in arena.resolve(side_walls) {
            faces.extend(outermost_faces(wall, side));
        }
    }

    if openings {
        // Jambs of openings sit in walls running along the side.
        for (_, wall) in arena.resolve(side_walls) {
            if wall.orientation == side.wall_orientation() {
                faces.extend(wall.faces_measured_by(side));
            }
        }
    }
    faces
}

/// Thinning of wall faces before they become references.
#[derive(Debug, Clone, Copy)]
pub struct FaceFilter {
    pub side: ExtremeSide,
    pub cut: f64,
    /// Minimum distance between neighbouring faces, in model units.
    pub min_width_between: f64,
    pub remove_variant: RemoveVariant,
}

impl FaceFilter {
    /// Runs every stage in order. The result is sorted along the side.
    pub fn apply<'a>(
        &self,
        side_walls: &[&AdvancedWall],
        faces: Vec<&'a AdvancedPlanarFace>,
    ) -> Vec<&'a AdvancedPlanarFace> {
        let before = faces.len();
        let faces = self.at_cut_plane(faces);
        let faces = self.without_collinear(faces);
        let faces = self.without_buried(side_walls, faces);
        let faces = self.without_crowded(faces);
        tracing::debug!(side = %self.side, before, after = faces.len(), "faces filtered");
        faces
    }

    pub fn at_cut_plane<'a>(&self, faces: Vec<&'a AdvancedPlanarFace>) -> Vec<&'a AdvancedPlanarFace> {
        faces
            .into_iter()
            .filter(|face| face.spans_elevation(self.cut))
            .collect()
    }

    /// One face per position along the side, the first one found.
    pub fn without_collinear<'a>(
        &self,
        faces: Vec<&'a AdvancedPlanarFace>,
    ) -> Vec<&'a AdvancedPlanarFace> {
        let mut kept: Vec<&AdvancedPlanarFace> = Vec::with_capacity(faces.len());
        for face in faces {
            let position = self.side.along(&face.origin);
            if !kept
                .iter()
                .any(|k| (self.side.along(&k.origin) - position).abs() < TOLERANCE)
            {
                kept.push(face);
            }
        }
        kept
    }

    /// Removes faces that lie deeper than twice the widest side wall behind
    /// the outside of a wall running along the side. Only faces within that
    /// wall's span, widened by its width, are considered.
    pub fn without_buried<'a>(
        &self,
        side_walls: &[&AdvancedWall],
        mut faces: Vec<&'a AdvancedPlanarFace>,
    ) -> Vec<&'a AdvancedPlanarFace> {
        let side = self.side;
        let depth = 2.0 * side_walls.iter().map(|w| w.width).fold(0.0, f64::max);
        let along_walls: Vec<&&AdvancedWall> = side_walls
            .iter()
            .filter(|w| w.orientation == side.wall_orientation())
            .collect();

        faces.retain(|face| {
            let position = face.min_along(side);
            !along_walls.iter().any(|wall| {
                let low = side.along(&wall.bounds.min) - wall.width;
                let high = side.along(&wall.bounds.max) + wall.width;
                if !(low < position && position < high) {
                    return false;
                }
                if side.outward_sign() > 0.0 {
                    side.across(&face.bounds.max) < side.across(&wall.bounds.max) - depth
                } else {
                    side.across(&face.bounds.min) > side.across(&wall.bounds.min) + depth
                }
            })
        });
        faces
    }

    /// Repeatedly removes one face of the first neighbouring pair closer than
    /// `min_width_between`, until no such pair is left.
    pub fn without_crowded<'a>(
        &self,
        mut faces: Vec<&'a AdvancedPlanarFace>,
    ) -> Vec<&'a AdvancedPlanarFace> {
        let side = self.side;
        faces.sort_by(|a, b| a.min_along(side).total_cmp(&b.min_along(side)));

        while let Some(i) = faces.windows(2).position(|pair| {
            (pair[1].min_along(side) - pair[0].min_along(side)).abs() < self.min_width_between
        }) {
            let first = faces[i].length_across(side);
            let second = faces[i + 1].length_across(side);
            let drop_first = match self.remove_variant {
                RemoveVariant::Shorter => first < second,
                RemoveVariant::Longer => first > second,
            };
            faces.remove(if drop_first { i } else { i + 1 });
        }
        faces
    }
}

/// References of a walls-mode chain, filtered.
pub fn wall_references(
    arena: &ElementArena,
    side_walls: &[WallKey],
    candidates: &[WallKey],
    intersecting_walls: bool,
    openings: bool,
    filter: &FaceFilter,
) -> Vec<Reference> {
    let faces = wall_faces(
        arena,
        filter.side,
        side_walls,
        candidates,
        intersecting_walls,
        openings,
    );
    let walls: Vec<&AdvancedWall> = arena.resolve(side_walls).map(|(_, w)| w).collect();
    filter
        .apply(&walls, faces)
        .into_iter()
        .map(|face| face.reference.clone())
        .collect()
}

/// Every grid crossing the dimension line of `side`.
pub fn grid_references(arena: &ElementArena, side: ExtremeSide) -> Vec<Reference> {
    arena
        .grids_with_orientation(side.measured_orientation())
        .flat_map(|grid| grid.references.iter().cloned())
        .collect()
}

/// First and last grid crossing the dimension line of `side`. Empty when
/// there are fewer than two such grids.
pub fn extreme_grid_references(arena: &ElementArena, side: ExtremeSide) -> Vec<Reference> {
    let mut grids: Vec<_> = arena
        .grids_with_orientation(side.measured_orientation())
        .collect();
    if grids.len() < 2 {
        return Vec::new();
    }
    grids.sort_by(|a, b| side.along(&a.start).total_cmp(&side.along(&b.start)));
    [grids[0], grids[grids.len() - 1]]
        .iter()
        .flat_map(|grid| grid.reference().cloned())
        .collect()
}

/// The two outermost faces of the side: those of walls along the side and
/// of the side walls joined to them.
pub fn overall_references(
    arena: &ElementArena,
    side: ExtremeSide,
    side_walls: &[WallKey],
) -> Vec<Reference> {
    let measured = side.measured_orientation();
    let mut faces: Vec<&AdvancedPlanarFace> = Vec::new();

    for (_, wall) in arena.resolve(side_walls) {
        if wall.orientation != side.wall_orientation() {
            continue;
        }
        faces.extend(wall.faces_measured_by(side));
        for (_, joined) in arena.resolve(side_walls) {
            if joined.orientation == measured && wall.is_joined_to(joined.id) {
                faces.extend(joined.faces_measured_by(side));
            }
        }
    }

    faces.sort_by(|a, b| a.min_along(side).total_cmp(&b.min_along(side)));
    match (faces.first(), faces.last()) {
        (Some(first), Some(last)) => vec![first.reference.clone(), last.reference.clone()],
        _ => Vec::new(),
    }
}

/// References for `chain` on `side`.
pub fn chain_references(
    arena: &ElementArena,
    chain: &DimensionChain,
    side_walls: &[WallKey],
    candidates: &[WallKey],
    filter: &FaceFilter,
) -> Vec<Reference> {
    match chain.mode() {
        ChainMode::ExtremeGrids => extreme_grid_references(arena, filter.side),
        ChainMode::Overall => overall_references(arena, filter.side, side_walls),
        ChainMode::Grids => grid_references(arena, filter.side),
        ChainMode::Walls {
            intersecting_walls,
            openings,
        } => wall_references(
            arena,
            side_walls,
            candidates,
            intersecting_walls,
            openings,
            filter,
        ),
    }
}
