#![forbid(unsafe_code)]

//! List item prefixes.
//!
//! The renderer only counts: `ListStart` opens a level, `ItemStart` asks the
//! configured [`ListItemFormatter`] for a prefix and renders it in place, and
//! `ListEnd` closes the level. Numbering, bullets and line breaks live
//! entirely here; indentation comes from the document around the list.

use std::fmt::Write as _;

use crate::document::Document;

/// Position of the current item within the nesting of open lists.
///
/// `ordinals()[0]` belongs to the outermost list; every entry is the one-based
/// position of the item currently open at that level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListPath<'a> {
    ordinals: &'a [usize],
    at_line_start: bool,
}

impl<'a> ListPath<'a> {
    /// Wrap per-level ordinals, outermost first. The path is not at a line start.
    #[must_use]
    pub const fn new(ordinals: &'a [usize]) -> Self {
        Self {
            ordinals,
            at_line_start: false,
        }
    }

    /// Set whether output is at the start of a line.
    #[must_use]
    pub const fn with_line_start(mut self, at_line_start: bool) -> Self {
        self.at_line_start = at_line_start;
        self
    }

    /// True if nothing has been written on the current line yet, either at
    /// the very start of output or with a line break pending.
    #[must_use]
    pub const fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    /// Number of open lists (1 for a top-level list).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.ordinals.len()
    }

    /// One-based position of the item within the innermost list.
    #[must_use]
    pub fn ordinal(&self) -> usize {
        self.ordinals.last().copied().unwrap_or(1)
    }

    /// Zero-based position of the item within the innermost list.
    #[must_use]
    pub fn index(&self) -> usize {
        self.ordinal().saturating_sub(1)
    }

    /// One-based positions at every level, outermost first.
    #[must_use]
    pub const fn ordinals(&self) -> &'a [usize] {
        self.ordinals
    }
}

/// Produces the operations that introduce a list item.
pub trait ListItemFormatter: Send + Sync {
    /// Prefix for the item at `path`.
    fn item_prefix(&self, path: &ListPath<'_>) -> Document<'static>;
}

impl<F> ListItemFormatter for F
where
    F: Fn(&ListPath<'_>) -> Document<'static> + Send + Sync,
{
    fn item_prefix(&self, path: &ListPath<'_>) -> Document<'static> {
        self(path)
    }
}

/// `NewLine` then `prefix`.
///
/// The break is unconditional: a list at the very start of output begins with
/// an empty line, and its first item is indented like the rest.
fn on_new_line(prefix: String) -> Document<'static> {
    let mut doc = Document::with_capacity(2);
    doc.new_line().text(prefix);
    doc
}

/// `1. `, `2. `, ... on a fresh line. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberedFormatter;

impl ListItemFormatter for NumberedFormatter {
    fn item_prefix(&self, path: &ListPath<'_>) -> Document<'static> {
        on_new_line(format!("{}. ", path.ordinal()))
    }
}

/// A fixed bullet on a fresh line.
#[derive(Debug, Clone, Copy)]
pub struct BulletFormatter {
    bullet: &'static str,
}

impl BulletFormatter {
    /// Use `bullet` followed by a space.
    #[must_use]
    pub const fn new(bullet: &'static str) -> Self {
        Self { bullet }
    }
}

impl Default for BulletFormatter {
    fn default() -> Self {
        Self::new("•")
    }
}

impl ListItemFormatter for BulletFormatter {
    fn item_prefix(&self, _path: &ListPath<'_>) -> Document<'static> {
        on_new_line(format!("{} ", self.bullet))
    }
}

/// Hierarchical numbering: `1. `, then `1.1. `, `1.2. ` for nested lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NestedFormatter;

impl ListItemFormatter for NestedFormatter {
    fn item_prefix(&self, path: &ListPath<'_>) -> Document<'static> {
        let mut prefix = String::with_capacity(path.depth() * 3 + 1);
        for ordinal in path.ordinals() {
            let _ = write!(prefix, "{ordinal}.");
        }
        prefix.push(' ');
        on_new_line(prefix)
    }
}
