#![forbid(unsafe_code)]

//! Generic value formatting for ansidoc documents.
//!
//! [`Format`] turns typed values into document operations: primitives become
//! text, containers and tuples recurse, and records list their fields once
//! through [`impl_format_record!`]. [`Template`] parses `{}` format strings and
//! dispatches each argument through the same trait.

pub mod format;
pub mod record;
pub mod template;

pub use format::{
    Debugged, Delimited, Displayed, DocumentExt, Format, SequenceStyle, Styled, format_sequence,
    to_document,
};
pub use record::{RecordBuilder, RecordStyle};
pub use template::{Piece, Template, TemplateError, format_document};

pub use ansidoc_render::Document;
