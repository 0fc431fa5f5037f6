//! Persisted display preferences.
//!
//! Settings only select how values are shown and entered; they never touch
//! stored dive data.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{DistanceUnit, KeyValueStore, Result, TempUnit, SETTINGS_KEY};

/// Display unit preferences, persisted as `{"tempUnit": ..., "distanceUnit": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub temp_unit: TempUnit,
    #[serde(default)]
    pub distance_unit: DistanceUnit,
}

/// Owns the current [`Settings`] and writes them back on every change.
pub struct SettingsStore<S: KeyValueStore> {
    backend: S,
    settings: Settings,
}

impl<S: KeyValueStore> SettingsStore<S> {
    /// Loads settings from `backend`, falling back to defaults.
    pub fn open(backend: S) -> Self {
        let settings = Self::load(&backend);
        Self { backend, settings }
    }

    /// Reads settings without taking ownership of the backend.
    ///
    /// Absent or malformed data yields [`Settings::default`].
    pub fn load(backend: &S) -> Settings {
        match backend.get(SETTINGS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Settings>(&raw) {
                Ok(settings) => {
                    debug!("Loaded settings: {:?}", settings);
                    settings
                }
                Err(e) => {
                    warn!("Stored settings are malformed, using defaults: {}", e);
                    Settings::default()
                }
            },
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!("Failed to read settings, using defaults: {}", e);
                Settings::default()
            }
        }
    }

    pub fn get(&self) -> Settings {
        self.settings
    }

    /// Replaces the settings and persists them.
    pub fn update(&mut self, settings: Settings) -> Result<()> {
        let json = serde_json::to_string(&settings)?;
        self.backend.set(SETTINGS_KEY, &json)?;
        self.settings = settings;
        info!(
            "Settings updated: temperature in {}, distance in {}",
            settings.temp_unit, settings.distance_unit
        );
        Ok(())
    }

    pub fn set_temp_unit(&mut self, unit: TempUnit) -> Result<()> {
        self.update(Settings {
            temp_unit: unit,
            ..self.settings
        })
    }

    pub fn set_distance_unit(&mut self, unit: DistanceUnit) -> Result<()> {
        self.update(Settings {
            distance_unit: unit,
            ..self.settings
        })
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }
}
