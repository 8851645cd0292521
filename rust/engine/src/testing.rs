// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixtures shared by the unit tests.

use exterior_dims_geometry::{BuiltWall, WallBuilder};

use crate::arena::{ElementArena, WallKey};
use crate::host::{PlanView, ViewInfo};
use crate::scene::Scene;

pub(crate) fn plan_view_info() -> ViewInfo {
    ViewInfo {
        name: "Level 1".into(),
        is_plan: true,
        cut_plane_elevation: Some(1500.0),
        scale: 100.0,
    }
}

pub(crate) fn plan_view() -> PlanView {
    PlanView {
        cut_plane_elevation: 1500.0,
        scale: 100.0,
    }
}

/// Closed rectangle with its lower left corner at `(x0, y0)`. Ids run
/// `first_id..first_id + 4` as south, east, north, west. Horizontal walls
/// run through the corners, vertical ones stop at the horizontal walls.
pub(crate) fn rectangle_at(first_id: i64, x0: f64, y0: f64, w: f64, h: f64) -> Vec<BuiltWall> {
    let (x1, y1) = (x0 + w, y0 + h);
    vec![
        WallBuilder::new(first_id, (x0, y0), (x1, y0))
            .extend(100.0, 100.0)
            .build(),
        WallBuilder::new(first_id + 1, (x1, y0), (x1, y1))
            .extend(-100.0, -100.0)
            .build(),
        WallBuilder::new(first_id + 2, (x0, y1), (x1, y1))
            .extend(100.0, 100.0)
            .build(),
        WallBuilder::new(first_id + 3, (x0, y0), (x0, y1))
            .extend(-100.0, -100.0)
            .build(),
    ]
}

pub(crate) fn rectangle(w: f64, h: f64) -> Vec<BuiltWall> {
    rectangle_at(1, 0.0, 0.0, w, h)
}

pub(crate) fn scene_of(walls: Vec<BuiltWall>) -> Scene {
    let mut scene = Scene::new(plan_view_info());
    for wall in walls {
        scene.add_built_wall(wall);
    }
    scene.connect_walls();
    scene
}

pub(crate) fn arena_of(walls: Vec<BuiltWall>) -> ElementArena {
    let scene = scene_of(walls);
    ElementArena::from_selection(&scene.elements, &scene)
}

pub(crate) fn ids(arena: &ElementArena, keys: &[WallKey]) -> Vec<i64> {
    arena.resolve(keys).map(|(_, wall)| wall.id.0).collect()
}
