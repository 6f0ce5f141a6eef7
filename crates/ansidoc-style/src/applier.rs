#![forbid(unsafe_code)]

//! Relative style changes.
//!
//! A [`StyleApplier`] edits a style in place rather than replacing it, so the
//! same applier can be layered on top of whatever style is current. Appliers
//! compose left to right with `|`:
//!
//! ```
//! use ansidoc_style::{BasicColor, Color, FontAttributes, Style, fg, font};
//!
//! let applier = fg(Color::Standard(BasicColor::Red)) | font(FontAttributes::BOLD);
//! let style = applier.apply(Style::new().italic());
//! assert_eq!(style.attrs, FontAttributes::BOLD | FontAttributes::ITALIC);
//! ```

use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;

use crate::color::Color;
use crate::font::FontAttributes;
use crate::style::Style;

/// A shareable in-place style edit.
#[derive(Clone)]
pub struct StyleApplier(Arc<dyn Fn(&mut Style) + Send + Sync>);

impl StyleApplier {
    /// Wrap an arbitrary edit.
    pub fn new(f: impl Fn(&mut Style) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// An applier that leaves the style unchanged.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(|_| {})
    }

    /// Apply to a copy of `style`.
    #[must_use]
    pub fn apply(&self, mut style: Style) -> Style {
        (self.0)(&mut style);
        style
    }

    /// Run `self`, then `other`.
    #[must_use]
    pub fn then(self, other: Self) -> Self {
        Self::new(move |style| {
            (self.0)(style);
            (other.0)(style);
        })
    }
}

impl fmt::Debug for StyleApplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StyleApplier(..)")
    }
}

/// Appliers compare by identity: two values are equal only if one is a clone
/// of the other.
impl PartialEq for StyleApplier {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl BitOr for StyleApplier {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.then(rhs)
    }
}

/// Set the foreground color.
pub fn fg(color: Color) -> StyleApplier {
    StyleApplier::new(move |style| style.fg = color)
}

/// Set the background color.
pub fn bg(color: Color) -> StyleApplier {
    StyleApplier::new(move |style| style.bg = color)
}

/// Add font attributes (union with the current set).
pub fn font(attrs: FontAttributes) -> StyleApplier {
    StyleApplier::new(move |style| style.attrs |= attrs)
}

/// Remove font attributes from the current set.
pub fn without(attrs: FontAttributes) -> StyleApplier {
    StyleApplier::new(move |style| style.attrs.remove(attrs))
}
