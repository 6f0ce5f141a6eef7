#![forbid(unsafe_code)]

//! SGR encoding and the style diff engine.
//!
//! This module turns pairs of [`Style`] values into the escape sequences that
//! move a terminal from one to the other. It is pure: no state is kept between
//! calls, so `diff(a, b)` depends only on `a` and `b`.
//!
//! # Sequence Reference
//!
//! | Change | Parameters |
//! |--------|------------|
//! | attribute on | 1 bold, 2 dim, 3 italic, 4 underline, 5 blink, 7 inverse, 8 hidden, 9 crossed-out, 21 double underline |
//! | attribute off | 22 bold/dim, 23, 24 underline/double underline, 25, 27, 28, 29 |
//! | foreground | 39 default, 30–37, 90–97, `38;5;n`, `38;2;r;g;b` |
//! | background | 49 default, 40–47, 100–107, `48;5;n`, `48;2;r;g;b` |
//!
//! Each group is written as `ESC [ p1 ; p2 ; ... m`. Groups are emitted in the
//! order attributes, foreground, background, and only for fields that changed.

use std::fmt;
use std::io::{self, Write};

use ansidoc_style::{Color, FontAttributes, Style};
use smallvec::SmallVec;

// =============================================================================
// SGR (Select Graphic Rendition)
// =============================================================================

/// SGR reset: `CSI 0 m`
pub const SGR_RESET: &[u8] = b"\x1b[0m";

/// Write SGR reset sequence.
#[inline]
pub fn sgr_reset<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    w.write_all(SGR_RESET)
}

/// SGR attribute codes for a font attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SgrCodes {
    /// Enable code
    pub on: u8,
    /// Disable code
    pub off: u8,
}

/// SGR codes for bold (on=1, off=22).
pub const SGR_BOLD: SgrCodes = SgrCodes { on: 1, off: 22 };
/// SGR codes for dim (on=2, off=22).
pub const SGR_DIM: SgrCodes = SgrCodes { on: 2, off: 22 };
/// SGR codes for italic (on=3, off=23).
pub const SGR_ITALIC: SgrCodes = SgrCodes { on: 3, off: 23 };
/// SGR codes for underline (on=4, off=24).
pub const SGR_UNDERLINE: SgrCodes = SgrCodes { on: 4, off: 24 };
/// SGR codes for blink (on=5, off=25).
pub const SGR_BLINK: SgrCodes = SgrCodes { on: 5, off: 25 };
/// SGR codes for inverse video (on=7, off=27).
pub const SGR_INVERSE: SgrCodes = SgrCodes { on: 7, off: 27 };
/// SGR codes for hidden text (on=8, off=28).
pub const SGR_HIDDEN: SgrCodes = SgrCodes { on: 8, off: 28 };
/// SGR codes for crossed-out text (on=9, off=29).
pub const SGR_CROSSED_OUT: SgrCodes = SgrCodes { on: 9, off: 29 };
/// SGR codes for double underline (on=21, off=24).
pub const SGR_DOUBLE_UNDERLINE: SgrCodes = SgrCodes { on: 21, off: 24 };

/// Ordered table of (attribute, on/off codes).
///
/// `STANDOUT` is absent: it is tracked in [`Style`] but never reaches the wire.
pub const ATTR_TABLE: [(FontAttributes, SgrCodes); 9] = [
    (FontAttributes::BOLD, SGR_BOLD),
    (FontAttributes::DIM, SGR_DIM),
    (FontAttributes::ITALIC, SGR_ITALIC),
    (FontAttributes::UNDERLINE, SGR_UNDERLINE),
    (FontAttributes::BLINK, SGR_BLINK),
    (FontAttributes::INVERSE, SGR_INVERSE),
    (FontAttributes::HIDDEN, SGR_HIDDEN),
    (FontAttributes::CROSSED_OUT, SGR_CROSSED_OUT),
    (FontAttributes::DOUBLE_UNDERLINE, SGR_DOUBLE_UNDERLINE),
];

/// Get SGR codes for a single attribute.
#[must_use]
pub fn sgr_codes_for_attr(attr: FontAttributes) -> Option<SgrCodes> {
    ATTR_TABLE
        .iter()
        .find(|(flag, _)| *flag == attr)
        .map(|(_, codes)| *codes)
}

/// Parameters of one SGR group.
pub type SgrParams = SmallVec<[u8; 16]>;

#[inline]
fn write_u8_dec(buf: &mut SmallVec<[u8; 64]>, n: u8) {
    if n >= 100 {
        buf.push(b'0' + n / 100);
    }
    if n >= 10 {
        buf.push(b'0' + (n / 10) % 10);
    }
    buf.push(b'0' + n % 10);
}

/// Write `CSI p1;p2;... m` in a single `write_all`.
///
/// Writes nothing for an empty parameter list.
pub fn write_sgr<W: Write + ?Sized>(w: &mut W, params: &[u8]) -> io::Result<()> {
    if params.is_empty() {
        return Ok(());
    }
    let mut buf: SmallVec<[u8; 64]> = SmallVec::new();
    buf.extend_from_slice(b"\x1b[");
    for (i, &param) in params.iter().enumerate() {
        if i != 0 {
            buf.push(b';');
        }
        write_u8_dec(&mut buf, param);
    }
    buf.push(b'm');
    w.write_all(&buf)
}

/// Which color slot a color parameter targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ground {
    /// Text color (base offset 0).
    Foreground,
    /// Cell color (base offset 10).
    Background,
}

impl Ground {
    const fn offset(self) -> u8 {
        match self {
            Self::Foreground => 0,
            Self::Background => 10,
        }
    }
}

/// SGR parameters selecting `color` for `ground`.
#[must_use]
pub fn color_params(color: Color, ground: Ground) -> SgrParams {
    let base = ground.offset();
    let mut params = SgrParams::new();
    match color {
        Color::Default => params.push(base + 39),
        Color::Standard(c) => params.push(base + 30 + c.as_u8()),
        Color::Bright(c) => params.push(base + 90 + c.as_u8()),
        Color::Palette(idx) => params.extend_from_slice(&[base + 38, 5, idx]),
        Color::Rgb(rgb) => params.extend_from_slice(&[base + 38, 2, rgb.r, rgb.g, rgb.b]),
    }
    params
}

/// SGR parameters moving the attribute set from `old` to `new`.
///
/// Off codes for removed attributes come first, then on codes for added
/// attributes. Bold/dim share off code 22 and underline/double underline share
/// 24; a kept attribute hit by a shared off code is switched back on.
#[must_use]
pub fn attr_params(old: FontAttributes, new: FontAttributes) -> SgrParams {
    let removed = old.difference(new);
    let added = new.difference(old);
    let kept = old.intersection(new);

    let mut params = SgrParams::new();
    for (flag, codes) in ATTR_TABLE {
        if removed.contains(flag) && !params.contains(&codes.off) {
            params.push(codes.off);
        }
    }

    let mut collateral = FontAttributes::empty();
    for (flag, codes) in ATTR_TABLE {
        if kept.contains(flag) && params.contains(&codes.off) {
            collateral |= flag;
        }
    }

    let enable = added | collateral;
    for (flag, codes) in ATTR_TABLE {
        if enable.contains(flag) {
            params.push(codes.on);
        }
    }
    params
}

// =============================================================================
// Style diff
// =============================================================================

/// One `CSI ... m` sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SgrGroup {
    params: SgrParams,
}

impl SgrGroup {
    /// Wrap a parameter list.
    #[must_use]
    pub fn new(params: SgrParams) -> Self {
        Self { params }
    }

    /// The numeric parameters.
    #[must_use]
    pub fn params(&self) -> &[u8] {
        &self.params
    }

    /// Write this group.
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        write_sgr(w, &self.params)
    }
}

impl fmt::Display for SgrGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\x1b[")?;
        for (i, param) in self.params.iter().enumerate() {
            if i != 0 {
                f.write_str(";")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str("m")
    }
}

/// The ordered SGR groups that transition one style to another.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleDiff {
    groups: SmallVec<[SgrGroup; 3]>,
}

impl StyleDiff {
    /// Compute the transition from `old` to `new`.
    #[must_use]
    pub fn between(old: &Style, new: &Style) -> Self {
        let mut groups = SmallVec::new();
        if old.attrs != new.attrs {
            let params = attr_params(old.attrs, new.attrs);
            // Standout-only changes produce no parameters.
            if !params.is_empty() {
                groups.push(SgrGroup::new(params));
            }
        }
        if old.fg != new.fg {
            groups.push(SgrGroup::new(color_params(new.fg, Ground::Foreground)));
        }
        if old.bg != new.bg {
            groups.push(SgrGroup::new(color_params(new.bg, Ground::Background)));
        }
        Self { groups }
    }

    /// True when no output is needed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The groups, in emission order.
    #[must_use]
    pub fn groups(&self) -> &[SgrGroup] {
        &self.groups
    }

    /// Write every group.
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        for group in &self.groups {
            group.write_to(w)?;
        }
        Ok(())
    }
}

impl fmt::Display for StyleDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            write!(f, "{group}")?;
        }
        Ok(())
    }
}

/// Compute the transition from `old` to `new`.
#[must_use]
pub fn diff(old: &Style, new: &Style) -> StyleDiff {
    StyleDiff::between(old, new)
}

/// Write the transition from `old` to `new` without materializing it.
pub fn write_style_diff<W: Write + ?Sized>(w: &mut W, old: &Style, new: &Style) -> io::Result<()> {
    if old == new {
        return Ok(());
    }
    StyleDiff::between(old, new).write_to(w)
}

// =============================================================================
// Tests
// =============================================================================
