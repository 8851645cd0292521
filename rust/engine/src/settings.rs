// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tunables for one dimensioning run.

use exterior_dims_config::{RemoveVariant, SettingsStore, UserSettings};
use exterior_dims_geometry::DEFAULT_PROBE_LENGTH;

/// Model units per millimetre when the model is in feet.
pub const FEET_PER_MM: f64 = 0.00328084;

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub user: UserSettings,
    /// Half-length of the perpendicular probes, in model units.
    pub probe_length: f64,
    /// Conversion factor from millimetres to model units.
    pub model_units_per_mm: f64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_user(UserSettings::default())
    }
}

impl PipelineSettings {
    pub fn from_user(user: UserSettings) -> Self {
        Self {
            user,
            probe_length: DEFAULT_PROBE_LENGTH,
            model_units_per_mm: FEET_PER_MM,
        }
    }

    pub fn load(store: &dyn SettingsStore) -> Self {
        Self::from_user(UserSettings::load(store))
    }

    /// For models drawn in millimetres.
    pub fn with_millimetre_units(mut self) -> Self {
        self.model_units_per_mm = 1.0;
        self
    }

    pub fn mm_to_model(&self, mm: f64) -> f64 {
        mm * self.model_units_per_mm
    }

    /// Distance of a chain from its extreme walls, given the offsets (mm on
    /// paper) of this chain and every chain before it.
    pub fn chain_offset(&self, cumulative_offset_mm: i32, view_scale: f64) -> f64 {
        self.mm_to_model(f64::from(cumulative_offset_mm)) * view_scale
    }

    /// Faces closer than this along a dimension line are thinned out.
    pub fn min_width_between(&self) -> f64 {
        self.mm_to_model(self.user.face_min_width_between_mm)
    }

    pub fn remove_variant(&self) -> RemoveVariant {
        self.user.remove_variant
    }
}
