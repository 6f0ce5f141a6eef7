#![forbid(unsafe_code)]

//! Render kernel: document operations, style diffing, and ANSI output.
//!
//! A [`Document`] is a flat list of [`Operation`]s. The [`Renderer`] walks it
//! once, keeping a style stack, an indent level, and a deferred line-start
//! flag, and writes SGR sequences only where the style actually changes.

pub mod ansi;
pub mod compose;
pub mod decode;
pub mod document;
pub mod list;
pub mod logging;
pub mod renderer;
pub mod terminal_model;

pub use ansi::{SgrGroup, StyleDiff, diff};
pub use compose::{flat_list, indented, is_balanced, line, list, map, modified, styled};
pub use decode::{DecodeError, decode_utf8};
pub use document::{Document, Operation};
pub use list::{BulletFormatter, ListItemFormatter, ListPath, NestedFormatter, NumberedFormatter};
pub use renderer::{RenderOptions, Renderer, render, render_to_string};
pub use terminal_model::{StyledRun, TerminalModel};

pub use ansidoc_style::{
    BasicColor, Color, ColorParseError, FontAttributes, Rgb, Style, StyleApplier,
};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
