// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::fmt;
use std::str::FromStr;

use crate::error::OverlayError;

/// Color type for overlay drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Red color.
    pub const RED: Color = Color(255, 0, 0);
    /// Green color.
    pub const GREEN: Color = Color(0, 255, 0);
    /// Blue color.
    pub const BLUE: Color = Color(0, 0, 255);
    /// White color.
    pub const WHITE: Color = Color(255, 255, 255);
    /// Black color.
    pub const BLACK: Color = Color(0, 0, 0);

    /// Create a new color from RGB values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    /// Get a color from the limb palette by connection index.
    #[must_use]
    pub const fn from_limb_index(index: usize) -> Self {
        let color = LIMB_COLORS[index % LIMB_COLORS.len()];
        Self(color[0], color[1], color[2])
    }

    /// Hex representation, e.g. `#ff8000`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(color: Color) -> Self {
        Self([color.0, color.1, color.2])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Parses `white`/`black`/`red`/`green`/`blue` or a hex value (`#ff8000`, `ff8000`).
impl FromStr for Color {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "white" => return Ok(Self::WHITE),
            "black" => return Ok(Self::BLACK),
            "red" => return Ok(Self::RED),
            "green" => return Ok(Self::GREEN),
            "blue" => return Ok(Self::BLUE),
            _ => {}
        }

        let invalid = || OverlayError::ConfigError(format!("invalid color '{s}'"));
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Limb palette for coloring bones by connection.
pub const LIMB_COLORS: [[u8; 3]; 8] = [
    [255, 128, 0],   // #ff8000
    [255, 178, 102], // #ffb266
    [230, 230, 0],   // #e6e600
    [153, 204, 255], // #99ccff
    [51, 153, 255],  // #3399ff
    [255, 102, 102], // #ff6666
    [102, 255, 102], // #66ff66
    [255, 51, 255],  // #ff33ff
];
