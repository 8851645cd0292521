// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grouping of outer walls by the side of the footprint they face.

use exterior_dims_geometry::{ExtremeSide, Orientation};

use crate::arena::{ElementArena, WallKey};
use crate::perimeter::{plan_segments, probe_hits};

/// Outer walls per side, in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SideGroups {
    pub left: Vec<WallKey>,
    pub right: Vec<WallKey>,
    pub top: Vec<WallKey>,
    pub bottom: Vec<WallKey>,
}

impl SideGroups {
    pub fn get(&self, side: ExtremeSide) -> &[WallKey] {
        match side {
            ExtremeSide::Left => &self.left,
            ExtremeSide::Right => &self.right,
            ExtremeSide::Top => &self.top,
            ExtremeSide::Bottom => &self.bottom,
        }
    }

    fn get_mut(&mut self, side: ExtremeSide) -> &mut Vec<WallKey> {
        match side {
            ExtremeSide::Left => &mut self.left,
            ExtremeSide::Right => &mut self.right,
            ExtremeSide::Top => &mut self.top,
            ExtremeSide::Bottom => &mut self.bottom,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty() && self.top.is_empty() && self.bottom.is_empty()
    }
}

/// Side a wall faces, judged by which of its probes hit other outer walls.
fn facing_side(orientation: Orientation, negative: bool, positive: bool) -> Option<ExtremeSide> {
    match (orientation, negative, positive) {
        (Orientation::Vertical, false, true) => Some(ExtremeSide::Left),
        (Orientation::Vertical, true, false) => Some(ExtremeSide::Right),
        (Orientation::Horizontal, true, false) => Some(ExtremeSide::Top),
        (Orientation::Horizontal, false, true) => Some(ExtremeSide::Bottom),
        _ => None,
    }
}

/// Splits `outer` walls into the four sides.
///
/// The first pass places walls whose probes hit the rest of the perimeter on
/// one side only. The second pass adds walls running across a side that are
/// joined to one of its walls, so each side also knows its corner returns.
pub fn find_extremes(arena: &ElementArena, outer: &[WallKey], probe_length: f64) -> SideGroups {
    let segments = plan_segments(arena, outer);
    let mut groups = SideGroups::default();

    for (key, wall) in arena.resolve(outer) {
        let Some((negative, positive)) = probe_hits(wall, key, &segments, probe_length) else {
            continue;
        };
        if let Some(side) = facing_side(wall.orientation, negative, positive) {
            groups.get_mut(side).push(key);
        }
    }

    for (key, wall) in arena.resolve(outer) {
        let sides: &[ExtremeSide] = match wall.orientation {
            Orientation::Vertical => &[ExtremeSide::Top, ExtremeSide::Bottom],
            Orientation::Horizontal => &[ExtremeSide::Left, ExtremeSide::Right],
            _ => continue,
        };
        for &side in sides {
            let joined = arena
                .resolve(groups.get(side))
                .any(|(_, member)| wall.is_joined_to(member.id));
            if joined {
                groups.get_mut(side).push(key);
            }
        }
    }

    tracing::debug!(
        left = groups.left.len(),
        right = groups.right.len(),
        top = groups.top.len(),
        bottom = groups.bottom.len(),
        "extreme walls grouped"
    );
    groups
}
