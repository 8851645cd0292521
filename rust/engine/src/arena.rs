// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-run storage of wrapped walls and grids.
//!
//! Walls and grids live in slot maps; the stages of a run pass around
//! ordered lists of keys, so filtering never moves or clones geometry.

use exterior_dims_geometry::{AdvancedGrid, AdvancedWall, InsertGeometry, Orientation};
use slotmap::{new_key_type, SlotMap};

use crate::host::SelectedElement;

new_key_type! {
    /// Key for a wrapped wall.
    pub struct WallKey;

    /// Key for a wrapped grid.
    pub struct GridKey;
}

#[derive(Debug, Default)]
pub struct ElementArena {
    walls: SlotMap<WallKey, AdvancedWall>,
    grids: SlotMap<GridKey, AdvancedGrid>,
    wall_order: Vec<WallKey>,
    grid_order: Vec<GridKey>,
}

impl ElementArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the selection, keeping only defined walls and grids.
    pub fn from_selection(elements: &[SelectedElement], inserts: &dyn InsertGeometry) -> Self {
        let mut arena = Self::new();
        for element in elements {
            match element {
                SelectedElement::Wall(data) => {
                    let wall = AdvancedWall::new(data, inserts);
                    if wall.is_defined {
                        arena.add_wall(wall);
                    } else {
                        tracing::debug!(id = %data.id, "skipping undefined wall");
                    }
                }
                SelectedElement::Grid(data) => {
                    let grid = AdvancedGrid::new(data);
                    if grid.is_defined {
                        arena.add_grid(grid);
                    } else {
                        tracing::debug!(id = %data.id, "skipping undefined grid");
                    }
                }
            }
        }
        arena
    }

    pub fn add_wall(&mut self, wall: AdvancedWall) -> WallKey {
        let key = self.walls.insert(wall);
        self.wall_order.push(key);
        key
    }

    pub fn add_grid(&mut self, grid: AdvancedGrid) -> GridKey {
        let key = self.grids.insert(grid);
        self.grid_order.push(key);
        key
    }

    pub fn wall(&self, key: WallKey) -> Option<&AdvancedWall> {
        self.walls.get(key)
    }

    /// Wall keys in selection order.
    pub fn wall_keys(&self) -> &[WallKey] {
        &self.wall_order
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    /// Grids in selection order.
    pub fn grids(&self) -> impl Iterator<Item = &AdvancedGrid> + '_ {
        self.grid_order.iter().filter_map(|&key| self.grids.get(key))
    }

    pub fn grids_with_orientation(
        &self,
        orientation: Orientation,
    ) -> impl Iterator<Item = &AdvancedGrid> + '_ {
        self.grids().filter(move |grid| grid.orientation == orientation)
    }

    /// Resolves keys, skipping stale ones.
    pub fn resolve<'a, 'k>(
        &'a self,
        keys: &'k [WallKey],
    ) -> impl Iterator<Item = (WallKey, &'a AdvancedWall)> + 'k
    where
        'a: 'k,
    {
        keys.iter()
            .filter_map(move |&key| self.walls.get(key).map(|wall| (key, wall)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exterior_dims_geometry::{grid_line, Curve, ElementId, NoInserts, WallBuilder};

    #[test]
    fn test_undefined_elements_are_dropped() {
        let mut sloped = WallBuilder::new(2, (0.0, 0.0), (1000.0, 400.0)).build().wall;
        sloped.location = Some(Curve::Unsupported {
            kind: "ellipse".into(),
        });
        let elements = vec![
            SelectedElement::Wall(WallBuilder::new(1, (0.0, 0.0), (1000.0, 0.0)).build().wall),
            SelectedElement::Wall(sloped),
            SelectedElement::Grid(grid_line(10, (0.0, -500.0), (0.0, 500.0))),
            SelectedElement::Grid(grid_line(11, (0.0, 0.0), (300.0, 300.0))),
        ];
        let arena = ElementArena::from_selection(&elements, &NoInserts);
        assert_eq!(arena.wall_count(), 1);
        assert_eq!(arena.grids().count(), 1);
        let ids: Vec<ElementId> = arena.resolve(arena.wall_keys()).map(|(_, w)| w.id).collect();
        assert_eq!(ids, vec![ElementId(1)]);
        assert_eq!(
            arena.grids_with_orientation(Orientation::Vertical).count(),
            1
        );
    }
}
