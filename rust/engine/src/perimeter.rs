// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outer-wall detection.
//!
//! From the midpoint of every wall two probes are cast at a right angle to
//! the wall, one to each side. An outer wall has other walls on one side
//! only, so exactly one of its probes crosses another wall's location line.
//! Walls missed by the probes (short returns, set-backs) are recovered when
//! both their ends are joined to walls already found to be outer.

use exterior_dims_geometry::{AdvancedWall, ProbePair, Segment2, WallEnd, TOLERANCE};

use crate::arena::{ElementArena, WallKey};

/// Probe hits of `wall` against `others`, as `(negative, positive)`.
/// `None` when the wall is not strictly horizontal or vertical.
pub(crate) fn probe_hits(
    wall: &AdvancedWall,
    key: WallKey,
    others: &[(WallKey, Segment2)],
    probe_length: f64,
) -> Option<(bool, bool)> {
    let probes = ProbePair::perpendicular(&wall.mid, wall.orientation, probe_length)?;
    let segments = others
        .iter()
        .filter(|(other, _)| *other != key)
        .map(|(_, segment)| segment);
    Some(probes.hits(segments, TOLERANCE))
}

pub(crate) fn plan_segments(arena: &ElementArena, walls: &[WallKey]) -> Vec<(WallKey, Segment2)> {
    arena
        .resolve(walls)
        .map(|(key, wall)| (key, wall.plan_segment()))
        .collect()
}

/// Outer walls among `walls`, probe hits first, then recovered ones.
pub fn find_outer_walls(arena: &ElementArena, walls: &[WallKey], probe_length: f64) -> Vec<WallKey> {
    let segments = plan_segments(arena, walls);

    let mut outer: Vec<WallKey> = arena
        .resolve(walls)
        .filter(|&(key, wall)| {
            matches!(
                probe_hits(wall, key, &segments, probe_length),
                Some((negative, positive)) if negative ^ positive
            )
        })
        .map(|(key, _)| key)
        .collect();

    let recovered: Vec<WallKey> = arena
        .resolve(walls)
        .filter(|(key, _)| !outer.contains(key))
        .filter(|(_, wall)| {
            WallEnd::BOTH
                .iter()
                .all(|&end| joined_to_outer_at(arena, &outer, wall, end))
        })
        .map(|(key, _)| key)
        .collect();

    tracing::debug!(
        probed = outer.len(),
        recovered = recovered.len(),
        "outer walls found"
    );
    outer.extend(recovered);
    outer
}

/// Some outer wall is joined to `end` of `wall` and lists `wall` among its
/// own end joins.
fn joined_to_outer_at(
    arena: &ElementArena,
    outer: &[WallKey],
    wall: &AdvancedWall,
    end: WallEnd,
) -> bool {
    arena
        .resolve(outer)
        .any(|(_, candidate)| wall.is_joined_at(end, candidate.id) && candidate.is_joined_to(wall.id))
}
