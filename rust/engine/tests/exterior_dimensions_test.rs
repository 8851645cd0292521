// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Whole runs against JSON scenes.

use approx::assert_relative_eq;
use exterior_dims_config::{
    ChainList, ChainMode, ConfigurationStore, DimensionChain, ExteriorConfiguration,
    UserSettings,
};
use exterior_dims_engine::{
    execute, execute_from_store, CommandResult, Notice, PipelineSettings, Scene,
};
use exterior_dims_geometry::{grid_line, ExtremeSide};

/// 10 x 6 m rectangle, 200 mm walls, horizontal walls running through the
/// corners. `east_openings` are spliced into the east wall.
fn rectangle_scene(east_openings: &str) -> Scene {
    let json = format!(
        r#"{{
            "view": {{"name": "Level 1", "is_plan": true, "cut_plane_elevation": 1500.0, "scale": 100.0}},
            "box_walls": [
                {{"id": 1, "start": [0, 0], "end": [10000, 0], "extend": [100, 100]}},
                {{"id": 2, "start": [10000, 0], "end": [10000, 6000], "extend": [-100, -100],
                  "openings": [{east_openings}]}},
                {{"id": 3, "start": [0, 6000], "end": [10000, 6000], "extend": [100, 100]}},
                {{"id": 4, "start": [0, 0], "end": [0, 6000], "extend": [-100, -100]}}
            ]
        }}"#
    );
    Scene::from_json(&json).unwrap()
}

fn right_side(chains: Vec<DimensionChain>) -> (ExteriorConfiguration, PipelineSettings) {
    let mut configuration = ExteriorConfiguration::new("Right");
    configuration.left_dimensions = false;
    configuration.bottom_dimensions = false;
    configuration.right_dimensions = true;
    configuration.chains = ChainList::from_chains(chains);
    let settings = PipelineSettings::from_user(UserSettings {
        default_configuration: Some(configuration.id),
        ..UserSettings::default()
    })
    .with_millimetre_units();
    (configuration, settings)
}

fn reference_names(scene: &Scene, index: usize) -> Vec<String> {
    scene.created()[index]
        .request
        .references
        .iter()
        .map(|r| r.as_str().to_string())
        .collect()
}

#[test]
fn test_rectangle_right_side_end_to_end() {
    let mut scene = rectangle_scene("");
    let (configuration, settings) = right_side(vec![DimensionChain::default()]);

    let result = execute(&mut scene, &[configuration], &settings);
    assert!(matches!(result, CommandResult::Succeeded { ref created } if created.len() == 1));
    assert!(scene.notices().is_empty());

    let dimension = &scene.created()[0].request;
    assert_eq!(dimension.side, ExtremeSide::Right);
    assert_relative_eq!(dimension.baseline.start.x, 10800.0);
    assert_relative_eq!(dimension.baseline.start.y, 0.0);
    assert_relative_eq!(dimension.baseline.end.x, 10800.0);
    assert_relative_eq!(dimension.baseline.end.y, 6000.0);
    assert_relative_eq!(dimension.baseline.end.z, 1500.0);
    assert_eq!(
        reference_names(&scene, 0),
        ["1:side-right", "2:end-start", "2:end-end", "3:side-left"]
    );
}

#[test]
fn test_narrow_pier_between_openings_is_thinned() {
    // 50 mm of wall between the two openings
    let mut scene = rectangle_scene(
        r#"{"id": 20, "from": 2000, "to": 3000, "sill": 900, "head": 2100},
           {"id": 21, "from": 3050, "to": 4000, "sill": 900, "head": 2100}"#,
    );
    let (configuration, settings) = right_side(vec![DimensionChain::new(
        ChainMode::Walls {
            intersecting_walls: false,
            openings: true,
        },
        8,
    )]);

    execute(&mut scene, &[configuration], &settings);
    assert_eq!(
        reference_names(&scene, 0),
        [
            "1:side-right",
            "2:end-start",
            "20:end-start",
            "20:end-end",
            "21:end-end",
            "2:end-end",
            "3:side-left"
        ]
    );
}

#[test]
fn test_grid_chains() {
    let mut scene = rectangle_scene("");
    for (id, y) in [(10, 0.0), (11, 3000.0), (12, 6000.0)] {
        scene.add_grid(grid_line(id, (-2000.0, y), (12000.0, y)));
    }
    let (configuration, settings) = right_side(vec![
        DimensionChain::new(ChainMode::Grids, 8),
        DimensionChain::new(ChainMode::ExtremeGrids, 8),
    ]);

    execute(&mut scene, &[configuration], &settings);
    assert_eq!(scene.created().len(), 2);
    assert_eq!(reference_names(&scene, 0), ["grid:10", "grid:11", "grid:12"]);
    assert_eq!(reference_names(&scene, 1), ["grid:10", "grid:12"]);
    assert_relative_eq!(scene.created()[1].request.baseline.start.x, 11600.0);
}

#[test]
fn test_every_side_of_the_rectangle() {
    let mut scene = rectangle_scene("");
    let (mut configuration, settings) = right_side(vec![DimensionChain::default()]);
    for side in ExtremeSide::PROCESSING_ORDER {
        configuration.set_side(side, true);
    }

    execute(&mut scene, &[configuration], &settings);
    let sides: Vec<ExtremeSide> = scene.created().iter().map(|d| d.request.side).collect();
    assert_eq!(sides, ExtremeSide::PROCESSING_ORDER);
    for dimension in scene.created() {
        assert_eq!(dimension.request.references.len(), 4);
    }
    assert_eq!(scene.committed_transactions(), 4);
}

#[test]
fn test_run_from_configuration_store() {
    let dir = std::env::temp_dir().join(format!("exterior-dims-{}", uuid::Uuid::new_v4()));
    let store = ConfigurationStore::in_data_directory(&dir).unwrap();
    let (configuration, settings) = right_side(vec![DimensionChain::new(ChainMode::Overall, 10)]);
    store.save(&[configuration]).unwrap();

    let mut scene = rectangle_scene("");
    let result = execute_from_store(&mut scene, &store, &settings);
    assert!(matches!(result, CommandResult::Succeeded { .. }));
    assert_eq!(reference_names(&scene, 0), ["1:side-right", "3:side-left"]);
    assert_relative_eq!(scene.created()[0].request.baseline.start.x, 11000.0);
    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_malformed_store_fails_the_command() {
    let dir = std::env::temp_dir().join(format!("exterior-dims-{}", uuid::Uuid::new_v4()));
    let store = ConfigurationStore::in_data_directory(&dir).unwrap();
    std::fs::write(
        store.path(),
        "<Configurations><ExteriorConfigurations><ExteriorConfiguration Name=\"x\"/></ExteriorConfigurations></Configurations>",
    )
    .unwrap();

    let mut scene = rectangle_scene("");
    let settings = PipelineSettings::default();
    let result = execute_from_store(&mut scene, &store, &settings);
    assert!(matches!(result, CommandResult::Failed(_)));
    assert!(matches!(scene.notices(), [Notice::Unexpected(_)]));
    std::fs::remove_dir_all(dir).ok();
}
