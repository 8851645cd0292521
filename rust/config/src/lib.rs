// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Exterior-Dims Configuration
//!
//! Dimension chain recipes, their XML store and the user settings that tune
//! face filtering.

pub mod chain;
pub mod chains;
pub mod configuration;
pub mod error;
pub mod settings;
pub mod store;

pub use chain::{ChainMode, DimensionChain, DEFAULT_ELEMENT_OFFSET, ELEMENT_OFFSETS};
pub use chains::ChainList;
pub use configuration::ExteriorConfiguration;
pub use error::{Error, Result};
pub use settings::{
    EnvSettingsStore, MemorySettingsStore, RemoveVariant, SettingsStore, UserSettings,
};
pub use store::{parse_configurations, select_default, ConfigurationStore};
