use std::fs;
use std::path::{Path, PathBuf};

use image_effects_core::shared::constants::LIGHT_BLUR_TINT;
use image_effects_core::Color;
use serde::{Deserialize, Serialize};

/// Persisted CLI defaults, overridable per invocation by flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub blur_radius: f32,
    /// Tint as `#RRGGBB` or `#RRGGBBAA`; empty for no tint.
    #[serde(default)]
    pub tint: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            blur_radius: 10.0,
            tint: String::new(),
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ImageEffects").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Reads settings from `path`, falling back to defaults if it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|json| match serde_json::from_str(&json) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    log::warn!("Ignoring invalid settings at {}: {e}", path.display());
                    None
                }
            })
            .unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = Self::config_path().ok_or("could not determine config directory")?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// The configured tint, or `None` when unset.
    pub fn tint_color(&self) -> Result<Option<Color>, String> {
        parse_tint(&self.tint)
    }
}

/// Parses a tint argument: empty or `none` means no tint, `light` is the light blur tint.
pub fn parse_tint(value: &str) -> Result<Option<Color>, String> {
    match value.trim() {
        "" | "none" => Ok(None),
        "light" => Ok(Some(LIGHT_BLUR_TINT)),
        hex => Color::from_hex(hex)
            .map(Some)
            .ok_or_else(|| format!("Tint must be #RRGGBB or #RRGGBBAA, got '{hex}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            blur_radius: 4.5,
            tint: "#FFFFFF80".into(),
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load_from(&dir.path().join("absent.json")), Settings::default());
    }

    #[test]
    fn test_invalid_json_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_missing_tint_field_defaults_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "blur_radius": 3.0 }"#).unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.blur_radius, 3.0);
        assert_eq!(settings.tint_color(), Ok(None));
    }

    #[test]
    fn test_parse_tint() {
        assert_eq!(parse_tint(""), Ok(None));
        assert_eq!(parse_tint("none"), Ok(None));
        assert_eq!(parse_tint("light"), Ok(Some(LIGHT_BLUR_TINT)));
        assert_eq!(parse_tint("#00000080"), Ok(Some(Color::new(0, 0, 0, 128))));
        assert!(parse_tint("#12").is_err());
    }
}
