//! Application settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::StorefrontConfig;

/// Viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Enable anti-aliasing
    pub antialiasing: bool,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [248, 250, 252],
            antialiasing: true,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points (overrides the theme size when set)
    #[serde(default)]
    pub font_size: Option<f32>,
}

fn default_asset_root() -> PathBuf {
    PathBuf::from("public")
}

/// All application settings, read once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Viewport settings
    #[serde(default)]
    pub viewport: ViewportSettings,
    /// UI settings
    #[serde(default)]
    pub ui: UiSettings,
    /// Directory that `/`-rooted asset references resolve against
    #[serde(default = "default_asset_root")]
    pub asset_root: PathBuf,
    /// Product, theme and layout configuration
    #[serde(default)]
    pub storefront: StorefrontConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            viewport: ViewportSettings::default(),
            ui: UiSettings::default(),
            asset_root: default_asset_root(),
            storefront: StorefrontConfig::default(),
        }
    }
}

impl AppSettings {
    /// Location of the settings file in the platform config directory
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "ikarus3d", "configurator")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the config directory, or return defaults if not found
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                tracing::info!("No settings file, using built-in storefront configuration");
                Self::default()
            }
        }
    }

    /// Load settings from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to read settings {}: {e}", path.display());
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                tracing::warn!("Ignoring settings {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, String> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        settings.storefront.catalog.validate()?;
        if settings.storefront.breakpoint <= 0.0 {
            return Err("Breakpoint must be positive".to_string());
        }
        Ok(settings)
    }

    /// Effective body font size
    pub fn font_size(&self) -> f32 {
        self.ui
            .font_size
            .unwrap_or(self.storefront.theme.typography.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let s = AppSettings::default();
        assert_eq!(s.font_size(), 16.0);
        assert_eq!(s.asset_root, PathBuf::from("public"));
        assert_eq!(s.storefront.catalog.swatches.len(), 10);
    }

    #[test]
    fn test_from_json_partial() {
        let s = AppSettings::from_json(r#"{"ui": {"font_size": 13.0}, "asset_root": "/srv/media"}"#)
            .unwrap();
        assert_eq!(s.font_size(), 13.0);
        assert_eq!(s.asset_root, PathBuf::from("/srv/media"));
        assert_eq!(s.storefront.catalog.price.sale, 200.0);
    }

    #[test]
    fn test_from_json_rejects_empty_catalog() {
        let err = AppSettings::from_json(r#"{"storefront": {"catalog": {"swatches": []}}}"#)
            .unwrap_err();
        assert!(err.contains("no swatches"));
    }

    #[test]
    fn test_from_json_rejects_bad_color() {
        let json = r#"{"storefront": {"catalog": {"swatches": [{"name": "X", "color": "nope"}]}}}"#;
        assert!(AppSettings::from_json(json).is_err());
    }

    #[test]
    fn test_load_from_malformed_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let s = AppSettings::load_from(file.path());
        assert_eq!(s.storefront.catalog.product_name, "Cozy Lounge chair");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"storefront": {{"catalog": {{"product_name": "Bench"}}}}}}"#).unwrap();
        let s = AppSettings::load_from(file.path());
        assert_eq!(s.storefront.catalog.product_name, "Bench");
    }
}
