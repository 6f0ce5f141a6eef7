#![forbid(unsafe_code)]

//! The `Style` triple.

use std::fmt;

use crate::color::Color;
use crate::font::FontAttributes;

/// Foreground, background, and font attributes.
///
/// `Style::default()` is "no style": both colors [`Color::Default`] and no
/// attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Font attributes.
    pub attrs: FontAttributes,
}

impl Style {
    /// The default style.
    pub const DEFAULT: Self = Self {
        fg: Color::Default,
        bg: Color::Default,
        attrs: FontAttributes::empty(),
    };

    /// Create the default style.
    #[must_use]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Replace the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Replace the background color.
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Replace the attribute set.
    #[must_use]
    pub const fn attrs(mut self, attrs: FontAttributes) -> Self {
        self.attrs = attrs;
        self
    }

    /// Add attributes to the current set.
    #[must_use]
    pub const fn with(mut self, attrs: FontAttributes) -> Self {
        self.attrs = self.attrs.union(attrs);
        self
    }

    /// Remove attributes from the current set.
    #[must_use]
    pub const fn without(mut self, attrs: FontAttributes) -> Self {
        self.attrs = self.attrs.difference(attrs);
        self
    }

    /// Add bold.
    #[must_use]
    pub const fn bold(self) -> Self {
        self.with(FontAttributes::BOLD)
    }

    /// Add dim.
    #[must_use]
    pub const fn dim(self) -> Self {
        self.with(FontAttributes::DIM)
    }

    /// Add italic.
    #[must_use]
    pub const fn italic(self) -> Self {
        self.with(FontAttributes::ITALIC)
    }

    /// Add underline.
    #[must_use]
    pub const fn underline(self) -> Self {
        self.with(FontAttributes::UNDERLINE)
    }

    /// Add blink.
    #[must_use]
    pub const fn blink(self) -> Self {
        self.with(FontAttributes::BLINK)
    }

    /// Add inverse.
    #[must_use]
    pub const fn inverse(self) -> Self {
        self.with(FontAttributes::INVERSE)
    }

    /// Add hidden.
    #[must_use]
    pub const fn hidden(self) -> Self {
        self.with(FontAttributes::HIDDEN)
    }

    /// Add crossed-out.
    #[must_use]
    pub const fn crossed_out(self) -> Self {
        self.with(FontAttributes::CROSSED_OUT)
    }

    /// True if this is the default style.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

impl From<Color> for Style {
    /// A style with only the foreground set.
    fn from(color: Color) -> Self {
        Self::new().fg(color)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{:foreground {} :background {} :font {}}}",
            self.fg, self.bg, self.attrs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BasicColor;

    #[test]
    fn default_style() {
        assert!(Style::default().is_default());
        assert_eq!(Style::new(), Style::DEFAULT);
    }

    #[test]
    fn builder_chain() {
        let style = Style::new()
            .fg(Color::Standard(BasicColor::Red))
            .bg(Color::Palette(17))
            .bold()
            .underline();
        assert_eq!(style.fg, Color::Standard(BasicColor::Red));
        assert_eq!(style.bg, Color::Palette(17));
        assert_eq!(style.attrs, FontAttributes::BOLD | FontAttributes::UNDERLINE);
        assert!(!style.is_default());
    }

    #[test]
    fn without_removes() {
        let style = Style::new().bold().italic().without(FontAttributes::BOLD);
        assert_eq!(style.attrs, FontAttributes::ITALIC);
    }

    #[test]
    fn equality_needs_all_fields() {
        let a = Style::new().bold();
        assert_ne!(a, a.fg(Color::Standard(BasicColor::Red)));
        assert_ne!(a, a.bg(Color::Standard(BasicColor::Red)));
        assert_ne!(a, a.italic());
    }

    #[test]
    fn display() {
        let style = Style::new().fg(Color::Standard(BasicColor::Green)).bold();
        assert_eq!(
            style.to_string(),
            "{:foreground (standard_color green) :background default_color :font [bold]}"
        );
    }
}
