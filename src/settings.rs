use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::morph::Easing;
use crate::params::{ParamKey, ParamStore, ParamValue};
use crate::MorphApp;

/// Errors from reading or writing settings files
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to access file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Returns the path to the settings file: `~/.config/shape-morph/settings.json`
fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("shape-morph");
    path.push("settings.json");
    path
}

/// Persisted application settings.
///
/// Parameters are stored by name so the file stays readable and survives
/// parameters being added or removed. Shapes themselves are never saved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub params: BTreeMap<String, ParamValue>,
    pub easing: Easing,
    pub show_panel: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::from_parts(&ParamStore::default(), Easing::default(), true)
    }
}

impl AppSettings {
    fn from_parts(store: &ParamStore, easing: Easing, show_panel: bool) -> Self {
        Self {
            params: store
                .iter()
                .filter(|(key, _)| *key != ParamKey::CurrentDrawMode)
                .map(|(key, param)| (key.name().to_string(), param.value))
                .collect(),
            easing,
            show_panel,
        }
    }

    /// Load settings from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = settings_path();
        match Self::read_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) => {
                log::info!("No settings file found ({}), using defaults", e);
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to parse settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk, logging any failure.
    pub fn save(&self) {
        let path = settings_path();
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {}", e);
                return;
            }
        }
        if let Err(e) = self.write_to(&path) {
            log::warn!("Failed to write settings: {}", e);
        }
    }

    /// Read a settings or preset file
    pub fn read_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write a settings or preset file as pretty JSON
    pub fn write_to(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Extract current settings from the running application.
    pub fn from_app(app: &MorphApp) -> Self {
        Self::from_parts(&app.params, app.controller.easing(), app.show_panel)
    }

    /// Apply settings to the running application.
    pub fn apply(&self, app: &mut MorphApp) {
        self.apply_params(&mut app.params);
        app.controller.set_easing(self.easing);
        app.show_panel = self.show_panel;
    }

    /// Push stored values through the store's validation
    ///
    /// Min/max pairs can fail when applied in the wrong order, so rejected
    /// values get one more pass once their partners are in place. Returns the
    /// number of values that were still rejected.
    pub fn apply_params(&self, store: &mut ParamStore) -> usize {
        let mut pending: Vec<(&String, &ParamValue)> = self.params.iter().collect();
        for _ in 0..2 {
            pending.retain(|(name, value)| store.set_by_name(name, **value).is_err());
            if pending.is_empty() {
                break;
            }
        }
        for (name, value) in &pending {
            if let Err(e) = store.set_by_name(name, **value) {
                log::warn!("Ignoring setting {} = {:?}: {}", name, value, e);
            }
        }
        pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_through_store() {
        let settings = AppSettings::default();
        assert!(settings.params.contains_key("interval"));
        assert!(!settings.params.contains_key("currentDrawMode"));

        let mut store = ParamStore::default();
        assert_eq!(settings.apply_params(&mut store), 0);
        assert_eq!(store.morph_params().unwrap(), ParamStore::default().morph_params().unwrap());
    }

    #[test]
    fn test_order_dependent_pairs_are_applied() {
        // maxSize is applied before minSize and starts out below the old
        // minimum, so it only sticks on the second pass
        let mut settings = AppSettings::default();
        settings.params.insert("minSize".into(), ParamValue::Float(100.0));
        settings.params.insert("maxSize".into(), ParamValue::Float(120.0));

        let mut store = ParamStore::default();
        assert_eq!(settings.apply_params(&mut store), 0);
        let params = store.morph_params().unwrap();
        assert_eq!((params.min_size, params.max_size), (100.0, 120.0));
    }

    #[test]
    fn test_invalid_values_are_skipped() {
        let mut settings = AppSettings::default();
        settings.params.insert("outlineOnly".into(), ParamValue::Float(3.0));
        settings.params.insert("noSuchParam".into(), ParamValue::Bool(true));

        let mut store = ParamStore::default();
        assert_eq!(settings.apply_params(&mut store), 2);
        assert!(!store.morph_params().unwrap().outline_only);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"easing": "SineInOut"}"#).unwrap();
        assert_eq!(settings.easing, Easing::SineInOut);
        assert!(settings.show_panel);
        assert_eq!(settings.params, AppSettings::default().params);
    }

    #[test]
    fn test_preset_file_round_trip() {
        let mut settings = AppSettings::default();
        settings.easing = Easing::QuadInOut;
        settings.params.insert("keyColor".into(), ParamValue::Color(crate::params::Rgb::new(1, 2, 3)));

        let path = std::env::temp_dir().join(format!("shape-morph-test-{}.json", std::process::id()));
        settings.write_to(&path).unwrap();
        let loaded = AppSettings::read_from(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_read_errors() {
        let missing = std::env::temp_dir().join("shape-morph-definitely-missing.json");
        assert!(matches!(AppSettings::read_from(&missing), Err(SettingsError::Io(_))));
    }
}
