// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall filters applied before perimeter detection.

use crate::arena::{ElementArena, WallKey};
use crate::settings::PipelineSettings;

/// Drops walls thinner than the configured minimum. Curtain walls are kept
/// whatever their width.
pub fn filter_by_width(
    arena: &ElementArena,
    walls: &[WallKey],
    settings: &PipelineSettings,
) -> Vec<WallKey> {
    let min_width_mm = settings.user.min_wall_width_mm;
    arena
        .resolve(walls)
        .filter(|(_, wall)| {
            wall.is_curtain || wall.width_in_mm(settings.model_units_per_mm) >= min_width_mm
        })
        .map(|(key, _)| key)
        .collect()
}

/// Keeps walls whose vertical extent contains the cut plane.
pub fn filter_by_cut_plane(arena: &ElementArena, walls: &[WallKey], cut: f64) -> Vec<WallKey> {
    arena
        .resolve(walls)
        .filter(|(_, wall)| wall.min_z() <= cut && cut <= wall.max_z())
        .map(|(key, _)| key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{arena_of, ids};
    use exterior_dims_config::UserSettings;
    use exterior_dims_geometry::WallBuilder;

    fn mm_settings(min_wall_width_mm: f64) -> PipelineSettings {
        PipelineSettings::from_user(UserSettings {
            min_wall_width_mm,
            ..UserSettings::default()
        })
        .with_millimetre_units()
    }

    #[test]
    fn test_thin_walls_are_dropped_but_curtain_walls_stay() {
        let arena = arena_of(vec![
            WallBuilder::new(1, (0.0, 0.0), (1000.0, 0.0)).width(200.0).build(),
            WallBuilder::new(2, (0.0, 500.0), (1000.0, 500.0)).width(40.0).build(),
            WallBuilder::new(3, (0.0, 900.0), (1000.0, 900.0))
                .width(30.0)
                .curtain()
                .build(),
            WallBuilder::new(4, (0.0, 1500.0), (1000.0, 1500.0)).width(50.0).build(),
        ]);
        let kept = filter_by_width(&arena, arena.wall_keys(), &mm_settings(50.0));
        assert_eq!(ids(&arena, &kept), vec![1, 3, 4]);
    }

    #[test]
    fn test_width_is_compared_in_millimetres() {
        // 0.5 ft is about 152 mm
        let arena = arena_of(vec![WallBuilder::new(1, (0.0, 0.0), (10.0, 0.0))
            .width(0.5)
            .heights(0.0, 10.0)
            .build()]);
        let settings = PipelineSettings::from_user(UserSettings {
            min_wall_width_mm: 160.0,
            ..UserSettings::default()
        });
        assert!(filter_by_width(&arena, arena.wall_keys(), &settings).is_empty());
    }

    #[test]
    fn test_cut_plane_filter() {
        let arena = arena_of(vec![
            WallBuilder::new(1, (0.0, 0.0), (1000.0, 0.0)).build(),
            WallBuilder::new(2, (0.0, 500.0), (1000.0, 500.0))
                .heights(2000.0, 3000.0)
                .build(),
            WallBuilder::new(3, (0.0, 900.0), (1000.0, 900.0))
                .heights(0.0, 1500.0)
                .build(),
        ]);
        let kept = filter_by_cut_plane(&arena, arena.wall_keys(), 1500.0);
        assert_eq!(ids(&arena, &kept), vec![1, 3]);
    }
}
