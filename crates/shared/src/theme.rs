//! Storefront look-and-feel and static product configuration

use serde::{Deserialize, Serialize};

use crate::{Catalog, HexColor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    /// Font family name; only the proportional/monospace distinction is honored
    pub family: String,
    /// CSS-style weight, 100..=900
    pub weight: u16,
    pub size: f32,
}

impl Typography {
    /// Weights of 600 and above render as strong text
    pub fn is_bold(&self) -> bool {
        self.weight >= 600
    }

    pub fn is_monospace(&self) -> bool {
        let family = self.family.to_ascii_lowercase();
        family.contains("mono") || family.contains("courier")
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            family: "Inter".to_string(),
            weight: 500,
            size: 16.0,
        }
    }
}

/// Primary call-to-action button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonTheme {
    pub radius: u8,
    pub bg: HexColor,
    pub fg: HexColor,
}

impl Default for ButtonTheme {
    fn default() -> Self {
        Self {
            radius: 14,
            bg: HexColor::from_rgb(0xD9, 0x77, 0x62),
            fg: HexColor::from_rgb(0xFF, 0xFF, 0xFF),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryTheme {
    pub gap: f32,
    pub radius: u8,
}

impl Default for GalleryTheme {
    fn default() -> Self {
        Self {
            gap: 10.0,
            radius: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutTheme {
    pub card_radius: u8,
    pub container_padding: f32,
    pub section_bg: HexColor,
}

impl Default for LayoutTheme {
    fn default() -> Self {
        Self {
            card_radius: 18,
            container_padding: 20.0,
            section_bg: HexColor::from_rgb(0xFF, 0xFF, 0xFF),
        }
    }
}

/// Border color and width of cards and sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeTheme {
    pub color: HexColor,
    pub weight: f32,
}

impl Default for StrokeTheme {
    fn default() -> Self {
        Self {
            color: HexColor::from_rgb(0xE5, 0xE7, 0xEB),
            weight: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub typography: Typography,
    pub button: ButtonTheme,
    pub gallery: GalleryTheme,
    pub layout: LayoutTheme,
    pub stroke: StrokeTheme,
}

fn default_breakpoint() -> f32 {
    768.0
}

/// Everything the storefront needs that is fixed for the lifetime of the process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub catalog: Catalog,
    /// Window width (points) below which the page always uses the stacked column
    #[serde(default = "default_breakpoint")]
    pub breakpoint: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            catalog: Catalog::default(),
            breakpoint: default_breakpoint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults() {
        let theme = Theme::default();
        assert_eq!(theme.typography.size, 16.0);
        assert_eq!(theme.typography.weight, 500);
        assert_eq!(theme.button.bg.to_string(), "#D97762");
        assert_eq!(theme.stroke.color.to_string(), "#E5E7EB");
        assert_eq!(theme.layout.card_radius, 18);
    }

    #[test]
    fn test_typography_weight_and_family() {
        let mut t = Typography::default();
        assert!(!t.is_bold());
        assert!(!t.is_monospace());
        t.weight = 600;
        assert!(t.is_bold());
        t.family = "JetBrains Mono".to_string();
        assert!(t.is_monospace());
    }

    #[test]
    fn test_config_from_empty_json() {
        let config: StorefrontConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.breakpoint, 768.0);
    }

    #[test]
    fn test_config_overrides_nested_field() {
        let json = r##"{"theme": {"button": {"bg": "#000000"}}, "breakpoint": 900}"##;
        let config: StorefrontConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.theme.button.bg, HexColor::from_rgb(0, 0, 0));
        assert_eq!(config.theme.button.radius, 14);
        assert_eq!(config.breakpoint, 900.0);
    }
}
