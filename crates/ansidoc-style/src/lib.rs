#![forbid(unsafe_code)]

//! Style values: colors, font attributes, and the `Style` triple.
//!
//! These are plain comparable values. All escape-sequence knowledge lives in
//! `ansidoc-render`; this crate only guarantees that every value it hands out
//! is in range by construction.

pub mod applier;
pub mod color;
pub mod font;
pub mod style;

pub use applier::{StyleApplier, bg, fg, font, without};
pub use color::{BasicColor, Color, ColorParseError, Rgb};
pub use font::FontAttributes;
pub use style::Style;
