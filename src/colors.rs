//! Color reference data
//!
//! Static, immutable color definitions the engine deals tiles from. The
//! built-in palette covers twelve everyday colors; a front-end may supply
//! its own list instead (the definitions deserialize from JSON).

use serde::{Deserialize, Serialize};

/// Text contrast to render on top of a color swatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Contrast {
    /// Light (white) text for dark swatches
    Light,
    /// Dark (black) text for bright swatches
    Dark,
}

/// One color a pair of tiles can be bound to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorDefinition {
    /// Stable identifier, also the audio asset key (lowercase)
    pub id: String,
    /// Display name, spoken aloud on a match
    pub name: String,
    /// CSS-style hex value for rendering
    pub hex: String,
    /// Which text color stays readable on this swatch
    pub contrast: Contrast,
}

impl ColorDefinition {
    /// Create a color definition
    pub fn new(id: &str, name: &str, hex: &str, contrast: Contrast) -> Self {
        ColorDefinition {
            id: id.to_string(),
            name: name.to_string(),
            hex: hex.to_string(),
            contrast,
        }
    }
}

/// The built-in twelve-color palette
pub fn default_palette() -> Vec<ColorDefinition> {
    use Contrast::{Dark, Light};
    vec![
        ColorDefinition::new("red", "Red", "#EF4444", Light),
        ColorDefinition::new("orange", "Orange", "#F97316", Light),
        ColorDefinition::new("yellow", "Yellow", "#EAB308", Dark),
        ColorDefinition::new("green", "Green", "#22C55E", Light),
        ColorDefinition::new("cyan", "Cyan", "#06B6D4", Light),
        ColorDefinition::new("blue", "Blue", "#3B82F6", Light),
        ColorDefinition::new("purple", "Purple", "#A855F7", Light),
        ColorDefinition::new("pink", "Pink", "#EC4899", Light),
        ColorDefinition::new("brown", "Brown", "#78350F", Light),
        ColorDefinition::new("black", "Black", "#171717", Light),
        ColorDefinition::new("white", "White", "#FFFFFF", Dark),
        ColorDefinition::new("gray", "Gray", "#6B7280", Light),
    ]
}
