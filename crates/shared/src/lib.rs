use std::fmt;

use serde::{Deserialize, Serialize};

pub mod theme;

pub use theme::{StorefrontConfig, Theme};

/// Unique identifier of a cart line
pub type CartItemId = String;

/// An sRGB color written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor([u8; 3]);

impl HexColor {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parse `#RRGGBB` (the leading `#` is optional, digits are case-insensitive)
    pub fn parse(s: &str) -> Result<Self, String> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex color: {s:?}"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| format!("Invalid hex color {s:?}: {e}"))
        };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.0
    }

    /// Channels normalized to 0.0..=1.0
    pub fn to_f32(&self) -> [f32; 3] {
        [
            self.0[0] as f32 / 255.0,
            self.0[1] as f32 / 255.0,
            self.0[2] as f32 / 255.0,
        ]
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.to_string()
    }
}

/// A named color in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub name: String,
    pub color: HexColor,
}

impl Swatch {
    pub fn new(name: &str, color: HexColor) -> Self {
        Self {
            name: name.to_string(),
            color,
        }
    }
}

/// Arm style option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmStyle {
    #[default]
    Fixed,
    Adjustable,
}

impl ArmStyle {
    pub fn label(&self) -> &'static str {
        match self {
            ArmStyle::Fixed => "Fixed arms",
            ArmStyle::Adjustable => "Adjustable",
        }
    }

    pub fn all() -> &'static [ArmStyle] {
        &[ArmStyle::Fixed, ArmStyle::Adjustable]
    }
}

/// Leg finish option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegFinish {
    #[default]
    Steel,
    Aluminum,
}

impl LegFinish {
    pub fn label(&self) -> &'static str {
        match self {
            LegFinish::Steel => "Steel",
            LegFinish::Aluminum => "Aluminum",
        }
    }

    pub fn all() -> &'static [LegFinish] {
        &[LegFinish::Steel, LegFinish::Aluminum]
    }
}

/// Current shopper choices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub color: HexColor,
    pub arm_style: ArmStyle,
    pub leg_finish: LegFinish,
}

impl Selection {
    pub fn new(color: HexColor) -> Self {
        Self {
            color,
            arm_style: ArmStyle::default(),
            leg_finish: LegFinish::default(),
        }
    }
}

/// A snapshot of a selection placed in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub name: String,
    pub color: HexColor,
    pub arm_style: ArmStyle,
    pub leg_finish: LegFinish,
    pub price: f64,
    pub quantity: u32,
}

impl CartItem {
    /// "Fixed arms · Steel"
    pub fn summary(&self) -> String {
        format!("{} · {}", self.arm_style.label(), self.leg_finish.label())
    }
}

/// List and sale price of the product
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub base: f64,
    pub sale: f64,
}

impl Default for Price {
    fn default() -> Self {
        Self {
            base: 245.0,
            sale: 200.0,
        }
    }
}

/// Format an amount as `$200`, or `$199.50` when it has a fractional part
pub fn format_price(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${amount:.0}")
    } else {
        format!("${amount:.2}")
    }
}

fn default_product_name() -> String {
    "Cozy Lounge chair".to_string()
}

fn default_model_path() -> String {
    "/81438f2b51ac4a78958169b7e419acbb.glb".to_string()
}

fn default_gallery() -> Vec<String> {
    vec!["/cabinet.jpg".to_string(); 5]
}

fn default_swatches() -> Vec<Swatch> {
    vec![
        Swatch::new("Leather Brown", HexColor::from_rgb(0x4A, 0x33, 0x2B)),
        Swatch::new("Green 1", HexColor::from_rgb(0x5B, 0x6F, 0x5D)),
        Swatch::new("Green 2", HexColor::from_rgb(0x5D, 0x75, 0x65)),
        Swatch::new("Teal 1", HexColor::from_rgb(0x5C, 0x7C, 0x7A)),
        Swatch::new("Navy", HexColor::from_rgb(0x4F, 0x51, 0x68)),
        Swatch::new("Purple", HexColor::from_rgb(0x6B, 0x4F, 0x5E)),
        Swatch::new("Blue", HexColor::from_rgb(0x4B, 0x5C, 0x71)),
        Swatch::new("Red 1", HexColor::from_rgb(0xA0, 0x49, 0x46)),
        Swatch::new("Wine", HexColor::from_rgb(0x5C, 0x37, 0x38)),
        Swatch::new("Teal 2", HexColor::from_rgb(0x3F, 0x6D, 0x63)),
    ]
}

/// The single product on sale: name, colors, price and media references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_product_name")]
    pub product_name: String,
    #[serde(default = "default_swatches")]
    pub swatches: Vec<Swatch>,
    #[serde(default)]
    pub price: Price,
    /// 3D model reference (URL or path)
    #[serde(default = "default_model_path")]
    pub model_path: String,
    /// Thumbnail image references
    #[serde(default = "default_gallery")]
    pub gallery: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            product_name: default_product_name(),
            swatches: default_swatches(),
            price: Price::default(),
            model_path: default_model_path(),
            gallery: default_gallery(),
        }
    }
}

impl Catalog {
    /// Color selected on a fresh start
    pub fn default_color(&self) -> Option<HexColor> {
        self.swatches.first().map(|s| s.color)
    }

    pub fn contains_color(&self, color: HexColor) -> bool {
        self.swatches.iter().any(|s| s.color == color)
    }

    pub fn swatch_by_color(&self, color: HexColor) -> Option<&Swatch> {
        self.swatches.iter().find(|s| s.color == color)
    }

    /// Swatches in `start..end`, clamped to the catalog length
    pub fn swatch_range(&self, start: usize, end: usize) -> &[Swatch] {
        let len = self.swatches.len();
        let end = end.min(len);
        let start = start.min(end);
        &self.swatches[start..end]
    }

    /// Check the catalog is usable (at least one swatch, no duplicate colors)
    pub fn validate(&self) -> Result<(), String> {
        if self.swatches.is_empty() {
            return Err("Catalog has no swatches".to_string());
        }
        for (i, swatch) in self.swatches.iter().enumerate() {
            if self.swatches[..i].iter().any(|s| s.color == swatch.color) {
                return Err(format!(
                    "Duplicate swatch color {} ({})",
                    swatch.color, swatch.name
                ));
            }
        }
        if self.price.sale < 0.0 || self.price.base < 0.0 {
            return Err("Negative price".to_string());
        }
        Ok(())
    }
}
