// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Exterior-Dims Engine
//!
//! Places chains of linear dimensions along the outside of a building
//! footprint in a plan view. The engine finds the outer walls of a selection
//! by casting probes from each wall, groups them by the side of the
//! footprint they face and builds, for every configured chain, a dimension
//! line and the face or grid references it measures to.
//!
//! The host CAD application is reached through [`DimensionHost`]; [`Scene`]
//! is an in-memory host driven by JSON.
//!
//! ```no_run
//! use exterior_dims_config::ExteriorConfiguration;
//! use exterior_dims_engine::{execute, PipelineSettings, Scene};
//!
//! let mut scene = Scene::from_json(&std::fs::read_to_string("scene.json")?)?;
//! let configuration = ExteriorConfiguration::new("Facade");
//! let mut settings = PipelineSettings::default();
//! settings.user.default_configuration = Some(configuration.id);
//! let result = execute(&mut scene, &[configuration], &settings);
//! println!("{result:?}, {} dimensions", scene.created().len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod arena;
pub mod command;
pub mod dimension;
pub mod error;
pub mod extremes;
pub mod filters;
pub mod host;
pub mod orchestrator;
pub mod perimeter;
pub mod scene;
pub mod settings;

#[cfg(test)]
mod testing;

pub use arena::{ElementArena, GridKey, WallKey};
pub use command::{execute, execute_from_store, CommandResult};
pub use dimension::{
    baseline, chain_references, extreme_grid_references, find_intersecting_walls,
    grid_references, overall_references, wall_faces, wall_references, FaceFilter,
};
pub use error::{Error, HostError, Result};
pub use extremes::{find_extremes, SideGroups};
pub use filters::{filter_by_cut_plane, filter_by_width};
pub use host::{
    Baseline, DimensionHandle, DimensionHost, DimensionRequest, Notice, PlanView,
    SelectedElement, Selection, Transaction, ViewInfo,
};
pub use orchestrator::{ExteriorDimensions, RunOutcome, TRANSACTION_NAME};
pub use perimeter::find_outer_walls;
pub use scene::{BoxWallSpec, CreatedDimension, InsertRecord, OpeningSpec, Scene};
pub use settings::{PipelineSettings, FEET_PER_MM};
