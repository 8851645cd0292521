// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Exterior-Dims CLI - places exterior plan dimensions on a JSON scene.
//!
//! The scene stands in for the host document: its view, the elements the
//! pick returns and the solids of openings. Dimensions are printed as JSON
//! together with every notice the run produced.

use anyhow::{Context, Result};
use exterior_dims_config::{ConfigurationStore, EnvSettingsStore};
use exterior_dims_engine::{execute_from_store, CommandResult, PipelineSettings, Scene, SelectedElement};
use exterior_dims_geometry::{export, AdvancedWall};

mod config;

use config::{Config, ModelUnits, USAGE};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn,exterior_dims_engine=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(config) = Config::from_args(std::env::args().skip(1))? else {
        print!("{USAGE}");
        return Ok(());
    };

    let text = std::fs::read_to_string(&config.scene)
        .with_context(|| format!("reading {}", config.scene.display()))?;
    let mut scene = Scene::from_json(&text)?;

    let store = match &config.config_file {
        Some(path) => ConfigurationStore::open(path)?,
        None => ConfigurationStore::in_data_directory(&config.data_dir)?,
    };

    let mut settings = PipelineSettings::load(&EnvSettingsStore);
    if config.units == ModelUnits::Millimetres {
        settings = settings.with_millimetre_units();
    }
    if let Some(id) = config.configuration {
        settings.user.default_configuration = Some(id);
    }

    tracing::info!(
        scene = %config.scene.display(),
        store = %store.path().display(),
        elements = scene.elements.len(),
        "Running exterior dimensions"
    );

    if let Some(path) = &config.export_walls {
        export_walls(&scene, path)?;
    }

    let result = execute_from_store(&mut scene, &store, &settings);
    let status = match &result {
        CommandResult::Succeeded { .. } => "succeeded",
        CommandResult::Cancelled => "cancelled",
        CommandResult::Failed(_) => "failed",
    };
    let notices: Vec<String> = scene.notices().iter().map(ToString::to_string).collect();

    let report = serde_json::json!({
        "status": status,
        "dimensions": scene.created(),
        "notices": notices,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let CommandResult::Failed(message) = result {
        anyhow::bail!(message);
    }
    Ok(())
}

/// Dumps the faces of every wall in the scene.
fn export_walls(scene: &Scene, path: &std::path::Path) -> Result<()> {
    let walls: Vec<AdvancedWall> = scene
        .elements
        .iter()
        .filter_map(|element| match element {
            SelectedElement::Wall(data) => Some(AdvancedWall::new(data, scene)),
            SelectedElement::Grid(_) => None,
        })
        .collect();
    let xml = export::wall_faces_to_xml(&walls)?;
    export::write_xml(path, &xml)?;
    tracing::info!(path = %path.display(), walls = walls.len(), "wall faces exported");
    Ok(())
}
