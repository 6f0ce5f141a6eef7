#![forbid(unsafe_code)]

//! Color values and their construction rules.
//!
//! A [`Color`] is one of five closed variants. Payloads are range-checked at
//! construction: parsing a malformed hex string or asking for an out-of-range
//! palette slot fails with [`ColorParseError`] instead of clamping.

use std::fmt;
use std::str::FromStr;

/// Number of steps per channel in the 6x6x6 palette cube.
pub const CUBE_STEPS: u8 = 6;

/// First palette index of the 6x6x6 color cube.
pub const CUBE_START: u8 = 16;

/// First palette index of the grayscale ramp.
pub const GRAYSCALE_START: u8 = 232;

/// Number of entries in the grayscale ramp.
pub const GRAYSCALE_STEPS: u8 = 24;

/// The eight basic terminal colors, in SGR order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BasicColor {
    /// Black (offset 0).
    Black = 0,
    /// Red (offset 1).
    Red = 1,
    /// Green (offset 2).
    Green = 2,
    /// Yellow (offset 3).
    Yellow = 3,
    /// Blue (offset 4).
    Blue = 4,
    /// Magenta (offset 5).
    Magenta = 5,
    /// Cyan (offset 6).
    Cyan = 6,
    /// White (offset 7).
    White = 7,
}

impl BasicColor {
    /// All basic colors in index order.
    pub const ALL: [Self; 8] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
    ];

    /// Return the SGR offset (0–7).
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Convert an index to a `BasicColor`, returning `None` if it is not in 0..8.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Black),
            1 => Some(Self::Red),
            2 => Some(Self::Green),
            3 => Some(Self::Yellow),
            4 => Some(Self::Blue),
            5 => Some(Self::Magenta),
            6 => Some(Self::Cyan),
            7 => Some(Self::White),
            _ => None,
        }
    }

    /// Lowercase name, as accepted by [`Color::from_str`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for BasicColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's own default color.
    #[default]
    Default,
    /// One of the eight standard colors.
    Standard(BasicColor),
    /// One of the eight bright colors.
    Bright(BasicColor),
    /// An entry of the 256-color palette.
    Palette(u8),
    /// A 24-bit color.
    Rgb(Rgb),
}

impl Color {
    /// Create a true-color RGB value.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    /// Create a standard color from its index.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError::StandardIndexOutOfRange`] if `index >= 8`.
    pub fn standard(index: u8) -> Result<Self, ColorParseError> {
        BasicColor::from_u8(index)
            .map(Self::Standard)
            .ok_or(ColorParseError::StandardIndexOutOfRange(index))
    }

    /// Create a bright color from its index.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError::StandardIndexOutOfRange`] if `index >= 8`.
    pub fn bright(index: u8) -> Result<Self, ColorParseError> {
        BasicColor::from_u8(index)
            .map(Self::Bright)
            .ok_or(ColorParseError::StandardIndexOutOfRange(index))
    }

    /// Select a palette entry from the 6x6x6 color cube.
    ///
    /// # Errors
    ///
    /// Each component must be below 6.
    pub fn cube(r: u8, g: u8, b: u8) -> Result<Self, ColorParseError> {
        for (channel, value) in [('r', r), ('g', g), ('b', b)] {
            if value >= CUBE_STEPS {
                return Err(ColorParseError::CubeComponentOutOfRange { channel, value });
            }
        }
        Ok(Self::Palette(CUBE_START + 36 * r + 6 * g + b))
    }

    /// Select a palette entry from the 24-step grayscale ramp.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError::GrayscaleOutOfRange`] if `level >= 24`.
    pub fn grayscale(level: u8) -> Result<Self, ColorParseError> {
        if level >= GRAYSCALE_STEPS {
            return Err(ColorParseError::GrayscaleOutOfRange(level));
        }
        Ok(Self::Palette(GRAYSCALE_START + level))
    }

    /// Parse `#rrggbb`, `rrggbb` or `#rgb`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError::InvalidHex`] for anything else.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let make_err = || ColorParseError::InvalidHex(s.to_string());

        // Rejecting non-hex first keeps the byte slicing below on char boundaries.
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(make_err());
        }

        match hex.len() {
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map_err(|_| make_err());
                Ok(Self::rgb(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17))
            }
            6 => {
                let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| make_err());
                Ok(Self::rgb(pair(0)?, pair(2)?, pair(4)?))
            }
            _ => Err(make_err()),
        }
    }

    /// Palette index for palette colors, `None` otherwise.
    #[must_use]
    pub const fn palette_index(self) -> Option<u8> {
        match self {
            Self::Palette(idx) => Some(idx),
            _ => None,
        }
    }

    /// True for palette entries 0–7.
    #[must_use]
    pub const fn is_standard_palette(self) -> bool {
        matches!(self, Self::Palette(0..=7))
    }

    /// True for palette entries 8–15.
    #[must_use]
    pub const fn is_bright_palette(self) -> bool {
        matches!(self, Self::Palette(8..=15))
    }

    /// True for palette entries in the 6x6x6 cube (16–231).
    #[must_use]
    pub const fn is_cube(self) -> bool {
        matches!(self, Self::Palette(16..=231))
    }

    /// True for palette entries in the grayscale ramp (232–255).
    #[must_use]
    pub const fn is_grayscale(self) -> bool {
        matches!(self, Self::Palette(232..=255))
    }
}

impl From<BasicColor> for Color {
    fn from(color: BasicColor) -> Self {
        Self::Standard(color)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Accepts `default`, a basic color name, `bright_<name>`, or a hex literal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        if lower == "default" {
            return Ok(Self::Default);
        }
        if let Some(color) = BasicColor::from_name(&lower) {
            return Ok(Self::Standard(color));
        }
        if let Some(color) = lower.strip_prefix("bright_").and_then(BasicColor::from_name) {
            return Ok(Self::Bright(color));
        }
        if trimmed.starts_with('#') {
            return Self::from_hex(trimmed);
        }
        if trimmed.len() == 6 && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Self::from_hex(trimmed);
        }
        Err(ColorParseError::UnknownName(trimmed.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default_color"),
            Self::Standard(c) => write!(f, "(standard_color {c})"),
            Self::Bright(c) => write!(f, "(bright_color {c})"),
            Self::Palette(idx) => write!(f, "(palette_color {idx})"),
            Self::Rgb(Rgb { r, g, b }) => write!(f, "(rgb_color {r} {g} {b})"),
        }
    }
}

/// Errors raised while constructing a [`Color`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Not a `#rrggbb`, `rrggbb` or `#rgb` literal.
    InvalidHex(String),
    /// Not a recognized color name.
    UnknownName(String),
    /// Standard/bright colors are indexed 0–7.
    StandardIndexOutOfRange(u8),
    /// Cube components are 0–5.
    CubeComponentOutOfRange { channel: char, value: u8 },
    /// Grayscale levels are 0–23.
    GrayscaleOutOfRange(u8),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHex(value) => write!(f, "invalid hex color '{value}'"),
            Self::UnknownName(value) => write!(f, "unknown color name '{value}'"),
            Self::StandardIndexOutOfRange(idx) => {
                write!(f, "basic color index {idx} out of range (expected 0-7)")
            }
            Self::CubeComponentOutOfRange { channel, value } => write!(
                f,
                "color cube component {channel}={value} out of range (expected 0-5)"
            ),
            Self::GrayscaleOutOfRange(level) => {
                write!(f, "grayscale level {level} out of range (expected 0-23)")
            }
        }
    }
}

impl std::error::Error for ColorParseError {}
