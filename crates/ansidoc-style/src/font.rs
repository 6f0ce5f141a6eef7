#![forbid(unsafe_code)]

//! Font attribute set.

use std::fmt;

bitflags::bitflags! {
    /// Set of font attributes.
    ///
    /// Only the named bits can ever be set; `from_bits_truncate` drops the rest.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FontAttributes: u16 {
        /// Standout mode. Tracked, but has no SGR code of its own.
        const STANDOUT         = 1 << 0;
        /// Bold / increased intensity.
        const BOLD             = 1 << 1;
        /// Dim / decreased intensity.
        const DIM              = 1 << 2;
        /// Italic text.
        const ITALIC           = 1 << 3;
        /// Underlined text.
        const UNDERLINE        = 1 << 4;
        /// Blinking text.
        const BLINK            = 1 << 5;
        /// Reverse video.
        const INVERSE          = 1 << 6;
        /// Hidden / invisible text.
        const HIDDEN           = 1 << 7;
        /// Strikethrough text.
        const CROSSED_OUT      = 1 << 8;
        /// Double underline.
        const DOUBLE_UNDERLINE = 1 << 9;
    }
}

/// Attribute names in display order.
const NAMES: [(FontAttributes, &str); 10] = [
    (FontAttributes::STANDOUT, "standout"),
    (FontAttributes::BOLD, "bold"),
    (FontAttributes::DIM, "dim"),
    (FontAttributes::ITALIC, "italic"),
    (FontAttributes::UNDERLINE, "underline"),
    (FontAttributes::BLINK, "blink"),
    (FontAttributes::INVERSE, "inverse"),
    (FontAttributes::HIDDEN, "hidden"),
    (FontAttributes::CROSSED_OUT, "crossed_out"),
    (FontAttributes::DOUBLE_UNDERLINE, "double_underline"),
];

impl FontAttributes {
    /// Attributes present in `self` but not in `other`.
    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        self.difference(other)
    }

    /// Look up a single attribute by its lowercase name.
    #[must_use]
    pub fn from_attr_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(flag, _)| *flag)
    }
}

impl fmt::Display for FontAttributes {
    /// Formats as `[bold italic]`; the empty set is `[]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        f.write_str("]")
    }
}
