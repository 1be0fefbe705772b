//! Editor preferences persisted under `reportDesignerSettings`.

use crate::error::{LoadError, SaveError};
use crate::geometry::GridSettings;
use crate::store::{KeyValueStore, SETTINGS_KEY};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// User-tunable editor settings. Missing keys take their defaults, so
/// settings written by older builds still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    /// Grid pitch in pixels. Default: **10**.
    pub grid_size: f64,
    /// Snap placement, drag and resize to the grid. Default: **true**.
    pub snap_to_grid: bool,
    /// Draw the grid overlay on pages. Default: **true**.
    pub show_grid: bool,
    pub theme: Theme,
    /// UI language tag. Default: **"en"**.
    pub locale: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid_size: 10.0,
            snap_to_grid: true,
            show_grid: true,
            theme: Theme::Light,
            locale: "en".into(),
        }
    }
}

impl EditorSettings {
    /// Grid parameters for the scene and the interaction controller.
    pub fn grid(&self) -> GridSettings {
        GridSettings {
            size: self.grid_size,
            enabled: self.snap_to_grid && self.grid_size > 0.0,
        }
    }

    pub fn try_load(store: &dyn KeyValueStore) -> Result<Self, LoadError> {
        let raw = store
            .get(SETTINGS_KEY)
            .ok_or_else(|| LoadError::Missing(SETTINGS_KEY.to_string()))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Stored settings, or the defaults.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match Self::try_load(store) {
            Ok(settings) => settings,
            Err(LoadError::Missing(_)) => Self::default(),
            Err(e) => {
                log::warn!("settings: using defaults: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), SaveError> {
        store.set(SETTINGS_KEY, &serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn missing_keys_take_defaults() {
        let store = MemoryStore::new().with(SETTINGS_KEY, r#"{"gridSize": 20}"#);
        let settings = EditorSettings::load(&store);
        assert_eq!(settings.grid_size, 20.0);
        assert!(settings.snap_to_grid);
        assert_eq!(settings.locale, "en");
    }

    #[test]
    fn malformed_settings_fall_back() {
        let store = MemoryStore::new().with(SETTINGS_KEY, "[1, 2");
        assert_eq!(EditorSettings::load(&store), EditorSettings::default());
    }

    #[test]
    fn save_then_load() {
        let mut store = MemoryStore::new();
        let settings = EditorSettings {
            theme: Theme::Dark,
            snap_to_grid: false,
            ..Default::default()
        };
        settings.save(&mut store).unwrap();
        assert_eq!(EditorSettings::load(&store), settings);
    }

    #[test]
    fn grid_follows_snap_toggle() {
        let mut settings = EditorSettings::default();
        assert!(settings.grid().enabled);
        settings.snap_to_grid = false;
        assert!(!settings.grid().enabled);
        settings.snap_to_grid = true;
        settings.grid_size = 0.0;
        assert!(!settings.grid().enabled);
    }
}
