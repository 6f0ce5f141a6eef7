#![forbid(unsafe_code)]

//! ansidoc public facade crate.
//!
//! Re-exports the style values, the document model and renderer, and the
//! generic formatter, and adds a crate-wide [`Error`], a [`document!`] macro,
//! and helpers that render straight to stdout or stderr.
//!
//! ```
//! use ansidoc::prelude::*;
//!
//! let heading = Style::new().bold();
//! let doc = line(styled(heading, "totals")) + indented(line("a: 1"));
//! assert_eq!(
//!     ansidoc::to_string(&doc).unwrap(),
//!     "\x1b[1mtotals\x1b[22m\x1b[0m\n  a: 1\n"
//! );
//! ```

use std::fmt;
use std::io;

// --- Style re-exports ------------------------------------------------------

pub use ansidoc_style::{
    BasicColor, Color, ColorParseError, FontAttributes, Rgb, Style, StyleApplier, bg, fg, font,
    without,
};

// --- Render re-exports -----------------------------------------------------

pub use ansidoc_render::{
    BulletFormatter, DecodeError, Document, ListItemFormatter, ListPath, NestedFormatter,
    NumberedFormatter, Operation, RenderOptions, Renderer, StyleDiff, decode_utf8, diff,
    flat_list, indented, is_balanced, line, list, map, modified, render, render_to_string,
    styled,
};

// --- Format re-exports -----------------------------------------------------

pub use ansidoc_format::{
    Debugged, Delimited, Displayed, DocumentExt, Format, RecordBuilder, RecordStyle,
    SequenceStyle, Styled, Template, TemplateError, format_document, impl_format_record,
    to_document,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for ansidoc callers.
#[derive(Debug)]
pub enum Error {
    /// The output sink failed.
    Io(io::Error),
    /// A color string did not parse.
    Color(ColorParseError),
    /// Input bytes were not valid UTF-8.
    Decode(DecodeError),
    /// A format string was malformed or referenced a missing argument.
    Template(TemplateError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Color(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "{err}"),
            Self::Template(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Color(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Template(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ColorParseError> for Error {
    fn from(err: ColorParseError) -> Self {
        Self::Color(err)
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

impl From<TemplateError> for Error {
    fn from(err: TemplateError) -> Self {
        Self::Template(err)
    }
}

/// Standard result type for ansidoc APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Output helpers -------------------------------------------------------

/// Render `doc` with default options and return the bytes as a string.
pub fn to_string(doc: &Document<'_>) -> Result<String> {
    Ok(render_to_string(doc)?)
}

/// Render `doc` to stdout.
pub fn print(doc: &Document<'_>) -> Result<()> {
    Ok(render(&mut io::stdout().lock(), doc)?)
}

/// Render `doc` to stderr.
pub fn eprint(doc: &Document<'_>) -> Result<()> {
    Ok(render(&mut io::stderr().lock(), doc)?)
}

/// Build an owned [`Document`] from a format string.
///
/// Each argument is dispatched through [`Format`]; the result borrows nothing.
///
/// ```
/// let doc = ansidoc::document!("Ala ma {} kota", 1.5).unwrap();
/// assert_eq!(ansidoc::to_string(&doc).unwrap(), "Ala ma 1.5 kota");
/// ```
#[macro_export]
macro_rules! document {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::format_document($template, &[$(&$arg as &dyn $crate::Format),*])
            .map($crate::Document::into_owned)
    };
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BasicColor, Color, Document, DocumentExt, Error, FontAttributes, Format, Operation,
        RenderOptions, Renderer, Result, Style, StyleApplier, Styled, Template, bg, fg, font,
        indented, line, list, map, modified, print, render, styled, without,
    };

    pub use crate::{formatter, kernel, style};
}

pub use ansidoc_format as formatter;
pub use ansidoc_render as kernel;
pub use ansidoc_style as style;
