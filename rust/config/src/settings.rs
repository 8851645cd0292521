// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User-tunable settings kept in an external key/value store.

use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Setting keys.
pub mod keys {
    pub const MIN_WALL_WIDTH: &str = "MinWallWidth";
    pub const FACE_MIN_WIDTH_BETWEEN: &str = "ExteriorFaceMinWidthBetween";
    pub const MIN_WIDTH_FACE_REMOVE: &str = "ExteriorMinWidthFaceRemove";
    pub const DEFAULT_CONFIGURATION: &str = "DefaultExteriorConfiguration";
}

/// Which face of a too-close pair is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemoveVariant {
    #[default]
    Shorter = 0,
    Longer = 1,
}

impl RemoveVariant {
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(RemoveVariant::Shorter),
            1 => Some(RemoveVariant::Longer),
            _ => None,
        }
    }

    pub fn index(self) -> i64 {
        self as i64
    }
}

/// Key/value settings backend.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

/// Settings held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    values: FxHashMap<String, String>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Read-only settings from `EXTERIOR_DIMS_*` environment variables,
/// e.g. `MinWallWidth` is read from `EXTERIOR_DIMS_MIN_WALL_WIDTH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSettingsStore;

impl EnvSettingsStore {
    pub const PREFIX: &'static str = "EXTERIOR_DIMS_";

    /// `ExteriorFaceMinWidthBetween` → `EXTERIOR_DIMS_EXTERIOR_FACE_MIN_WIDTH_BETWEEN`
    pub fn variable_name(key: &str) -> String {
        let mut name = String::from(Self::PREFIX);
        for (i, c) in key.chars().enumerate() {
            if c.is_ascii_uppercase() && i > 0 {
                name.push('_');
            }
            name.push(c.to_ascii_uppercase());
        }
        name
    }
}

impl SettingsStore for EnvSettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(Self::variable_name(key)).ok()
    }

    fn set(&mut self, key: &str, _value: String) -> Result<()> {
        Err(Error::ReadOnlySettings(key.to_owned()))
    }
}

/// Settings the dimensioning run depends on. Lengths are in millimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSettings {
    /// Walls thinner than this are ignored (curtain walls excepted).
    pub min_wall_width_mm: f64,
    /// Faces closer than this along the dimension line are thinned out.
    pub face_min_width_between_mm: f64,
    pub remove_variant: RemoveVariant,
    pub default_configuration: Option<Uuid>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            min_wall_width_mm: 50.0,
            face_min_width_between_mm: 100.0,
            remove_variant: RemoveVariant::Shorter,
            default_configuration: None,
        }
    }
}

impl UserSettings {
    /// Reads every key, falling back to the default for missing or
    /// unparsable values.
    pub fn load(store: &dyn SettingsStore) -> Self {
        let defaults = Self::default();
        let number = |key: &str, default: f64| {
            store
                .get(key)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .unwrap_or(default)
        };

        Self {
            min_wall_width_mm: number(keys::MIN_WALL_WIDTH, defaults.min_wall_width_mm),
            face_min_width_between_mm: number(
                keys::FACE_MIN_WIDTH_BETWEEN,
                defaults.face_min_width_between_mm,
            ),
            remove_variant: store
                .get(keys::MIN_WIDTH_FACE_REMOVE)
                .and_then(|v| v.trim().parse::<i64>().ok())
                .and_then(RemoveVariant::from_index)
                .unwrap_or_default(),
            default_configuration: store
                .get(keys::DEFAULT_CONFIGURATION)
                .and_then(|v| Uuid::parse_str(v.trim()).ok()),
        }
    }

    pub fn save(&self, store: &mut dyn SettingsStore) -> Result<()> {
        store.set(keys::MIN_WALL_WIDTH, self.min_wall_width_mm.to_string())?;
        store.set(
            keys::FACE_MIN_WIDTH_BETWEEN,
            self.face_min_width_between_mm.to_string(),
        )?;
        store.set(
            keys::MIN_WIDTH_FACE_REMOVE,
            self.remove_variant.index().to_string(),
        )?;
        if let Some(id) = self.default_configuration {
            store.set(keys::DEFAULT_CONFIGURATION, id.to_string())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_store() {
        let settings = UserSettings::load(&MemorySettingsStore::new());
        assert_eq!(settings, UserSettings::default());
        assert_eq!(settings.min_wall_width_mm, 50.0);
        assert_eq!(settings.face_min_width_between_mm, 100.0);
    }

    #[test]
    fn test_parse_or_default() {
        let mut store = MemorySettingsStore::new();
        store.set(keys::MIN_WALL_WIDTH, "120".into()).unwrap();
        store.set(keys::FACE_MIN_WIDTH_BETWEEN, "abc".into()).unwrap();
        store.set(keys::MIN_WIDTH_FACE_REMOVE, "1".into()).unwrap();
        store.set(keys::DEFAULT_CONFIGURATION, "not-a-guid".into()).unwrap();

        let settings = UserSettings::load(&store);
        assert_eq!(settings.min_wall_width_mm, 120.0);
        assert_eq!(settings.face_min_width_between_mm, 100.0);
        assert_eq!(settings.remove_variant, RemoveVariant::Longer);
        assert!(settings.default_configuration.is_none());
    }

    #[test]
    fn test_unknown_remove_variant_falls_back() {
        let mut store = MemorySettingsStore::new();
        store.set(keys::MIN_WIDTH_FACE_REMOVE, "7".into()).unwrap();
        assert_eq!(UserSettings::load(&store).remove_variant, RemoveVariant::Shorter);
    }

    #[test]
    fn test_save_then_load() {
        let settings = UserSettings {
            min_wall_width_mm: 80.0,
            face_min_width_between_mm: 60.0,
            remove_variant: RemoveVariant::Longer,
            default_configuration: Some(Uuid::new_v4()),
        };
        let mut store = MemorySettingsStore::new();
        settings.save(&mut store).unwrap();
        assert_eq!(UserSettings::load(&store), settings);
    }

    #[test]
    fn test_env_variable_names() {
        assert_eq!(
            EnvSettingsStore::variable_name(keys::MIN_WALL_WIDTH),
            "EXTERIOR_DIMS_MIN_WALL_WIDTH"
        );
        assert_eq!(
            EnvSettingsStore::variable_name(keys::DEFAULT_CONFIGURATION),
            "EXTERIOR_DIMS_DEFAULT_EXTERIOR_CONFIGURATION"
        );
        assert!(EnvSettingsStore.set(keys::MIN_WALL_WIDTH, "1".into()).is_err());
    }
}
