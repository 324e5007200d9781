//! Colors, categorical palettes and continuous color ramps.
//!
//! Palettes color the per-point spectrum curves; gradients color the band
//! image that users click on.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CommonError, CommonResult};

/// An RGBA color. Serialized as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    /// Parse `#RRGGBB` / `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(s: &str) -> CommonResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(CommonError::InvalidColor(s.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| CommonError::InvalidColor(s.to_string()))
        };

        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Hex notation, without the alpha channel when fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Linear interpolation between two colors, `t` clamped to [0, 1].
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 { ((a as f64) * (1.0 - t) + (b as f64) * t).round() as u8 };

        Color::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = CommonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

// ============================================================================
// Categorical palettes
// ============================================================================

const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

const OKABE_ITO: [&str; 8] = [
    "#e69f00", "#56b4e9", "#009e73", "#f0e442", "#0072b2", "#d55e00", "#cc79a7", "#000000",
];

const SET1: [&str; 9] = [
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
    "#999999",
];

/// A cycling list of curve colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    name: String,
    colors: Vec<Color>,
}

impl Palette {
    /// Look up a built-in palette by name (case-insensitive).
    pub fn named(name: &str) -> CommonResult<Self> {
        let hexes: &[&str] = match name.to_lowercase().as_str() {
            "category10" | "tab10" => &CATEGORY10,
            "okabe_ito" | "colorblind" => &OKABE_ITO,
            "set1" => &SET1,
            _ => return Err(CommonError::UnknownPalette(name.to_string())),
        };

        let colors = hexes
            .iter()
            .map(|h| Color::from_hex(h))
            .collect::<CommonResult<Vec<_>>>()?;

        Ok(Self {
            name: name.to_lowercase(),
            colors,
        })
    }

    /// Build a palette from explicit colors.
    pub fn custom(name: impl Into<String>, colors: Vec<Color>) -> CommonResult<Self> {
        if colors.is_empty() {
            return Err(CommonError::UnknownPalette(
                "custom palette must contain at least one color".to_string(),
            ));
        }
        Ok(Self {
            name: name.into(),
            colors,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color assigned to a stable key. Cycles once the palette is exhausted.
    pub fn color_for(&self, key: u32) -> Color {
        self.colors[key as usize % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            name: "category10".to_string(),
            colors: CATEGORY10
                .iter()
                .filter_map(|h| Color::from_hex(h).ok())
                .collect(),
        }
    }
}

// ============================================================================
// Continuous gradients
// ============================================================================

/// A color stop in a gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// The data value at this stop
    pub value: f64,

    /// The color at this stop
    pub color: Color,

    /// Optional label for legend
    #[serde(default)]
    pub label: Option<String>,
}

impl ColorStop {
    pub fn new(value: f64, color: Color) -> Self {
        Self {
            value,
            color,
            label: None,
        }
    }
}

/// Behavior for values outside the gradient range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangeBehavior {
    #[default]
    Clamp,
    Transparent,
}

/// Continuous gradient color mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientConfig {
    /// Color stops defining the gradient, ascending by value
    pub stops: Vec<ColorStop>,

    /// How to handle values outside the defined range
    #[serde(default)]
    pub out_of_range: OutOfRangeBehavior,

    /// Color for NaN (masked or fill) pixels
    #[serde(default = "Color::transparent")]
    pub no_data_color: Color,
}

impl GradientConfig {
    /// Build and validate a gradient from stops.
    pub fn new(stops: Vec<ColorStop>) -> CommonResult<Self> {
        let gradient = Self {
            stops,
            out_of_range: OutOfRangeBehavior::default(),
            no_data_color: Color::transparent(),
        };
        gradient.validate()?;
        Ok(gradient)
    }

    /// Parse a gradient from JSON.
    pub fn from_json(json: &str) -> CommonResult<Self> {
        let gradient: Self = serde_json::from_str(json)?;
        gradient.validate()?;
        Ok(gradient)
    }

    /// A built-in ramp over the normalized range [0, 1].
    pub fn named_ramp(name: &str) -> CommonResult<Self> {
        let hexes: &[&str] = match name.to_lowercase().as_str() {
            "viridis" => &["#440154", "#3b528b", "#21918c", "#5ec962", "#fde725"],
            "greys" | "gray" => &["#000000", "#ffffff"],
            "rdylgn" => &["#d7191c", "#fdae61", "#ffffbf", "#a6d96a", "#1a9641"],
            _ => {
                return Err(CommonError::InvalidGradient(format!(
                    "unknown ramp '{}'",
                    name
                )))
            }
        };

        let last = (hexes.len() - 1) as f64;
        let stops = hexes
            .iter()
            .enumerate()
            .map(|(i, h)| Ok(ColorStop::new(i as f64 / last, Color::from_hex(h)?)))
            .collect::<CommonResult<Vec<_>>>()?;

        Self::new(stops)
    }

    pub fn validate(&self) -> CommonResult<()> {
        if self.stops.len() < 2 {
            return Err(CommonError::InvalidGradient(
                "gradient must have at least 2 color stops".to_string(),
            ));
        }

        if self.stops.windows(2).any(|w| w[1].value <= w[0].value) {
            return Err(CommonError::InvalidGradient(
                "color stops must be in ascending value order".to_string(),
            ));
        }

        Ok(())
    }

    /// Interpolate the color for a value.
    pub fn interpolate(&self, value: f64) -> Color {
        if value.is_nan() {
            return self.no_data_color;
        }

        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return self.no_data_color,
        };

        if value < first.value || value > last.value {
            return match self.out_of_range {
                OutOfRangeBehavior::Transparent => Color::transparent(),
                OutOfRangeBehavior::Clamp if value < first.value => first.color,
                OutOfRangeBehavior::Clamp => last.color,
            };
        }

        for pair in self.stops.windows(2) {
            let (low, high) = (&pair[0], &pair[1]);
            if value <= high.value {
                let t = (value - low.value) / (high.value - low.value);
                return low.color.lerp(&high.color, t);
            }
        }

        last.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let c = Color::from_hex("#1F77B4").unwrap();
        assert_eq!(c, Color::rgb(0x1f, 0x77, 0xb4));
        assert_eq!(c.to_hex(), "#1f77b4");
        assert_eq!(Color::from_hex("00000080").unwrap().a, 0x80);
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("#123").is_err());
    }

    #[test]
    fn test_palette_cycles() {
        let palette = Palette::named("category10").unwrap();
        assert_eq!(palette.len(), 10);
        assert_eq!(palette.color_for(0), palette.color_for(10));
        assert_ne!(palette.color_for(0), palette.color_for(1));
        assert!(Palette::named("nope").is_err());
    }

    #[test]
    fn test_default_palette_matches_category10() {
        assert_eq!(Palette::default(), Palette::named("category10").unwrap());
    }

    #[test]
    fn test_gradient_interpolation() {
        let gradient = GradientConfig::named_ramp("greys").unwrap();
        assert_eq!(gradient.interpolate(0.0), Color::rgb(0, 0, 0));
        assert_eq!(gradient.interpolate(1.0), Color::rgb(255, 255, 255));
        assert_eq!(gradient.interpolate(0.5), Color::rgb(128, 128, 128));
        assert_eq!(gradient.interpolate(2.0), Color::rgb(255, 255, 255));
        assert_eq!(gradient.interpolate(f64::NAN), Color::transparent());
    }

    #[test]
    fn test_gradient_transparent_out_of_range() {
        let mut gradient = GradientConfig::named_ramp("viridis").unwrap();
        gradient.out_of_range = OutOfRangeBehavior::Transparent;
        assert_eq!(gradient.interpolate(-0.1), Color::transparent());
    }

    #[test]
    fn test_gradient_validation() {
        let stops = vec![
            ColorStop::new(1.0, Color::rgb(0, 0, 0)),
            ColorStop::new(0.0, Color::rgb(255, 255, 255)),
        ];
        assert!(GradientConfig::new(stops).is_err());
        assert!(GradientConfig::new(vec![]).is_err());
    }
}
