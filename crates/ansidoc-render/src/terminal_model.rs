#![forbid(unsafe_code)]

//! SGR-only terminal model for output validation.
//!
//! Replays rendered bytes and reports the style a real terminal would be in,
//! plus the visible text split into styled runs. It understands exactly the
//! sequences the renderer emits: `CSI ... m` and `\n`. Any other escape is
//! skipped.
//!
//! ```
//! use ansidoc_render::terminal_model::TerminalModel;
//! use ansidoc_render::{BasicColor, Color, Style};
//!
//! let mut model = TerminalModel::new();
//! model.process(b"\x1b[1;31mhi");
//! assert_eq!(model.style(), Style::new().fg(Color::Standard(BasicColor::Red)).bold());
//! assert_eq!(model.text(), "hi");
//! ```

use ansidoc_style::{BasicColor, Color, FontAttributes, Rgb, Style};
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Ground,
    Escape,
    Csi,
}

/// Text written while a single style was active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    /// Style in effect.
    pub style: Style,
    /// Text, possibly spanning line breaks.
    pub text: String,
}

/// Minimal SGR interpreter.
#[derive(Debug, Clone)]
pub struct TerminalModel {
    state: ParseState,
    params: SmallVec<[u16; 16]>,
    style: Style,
    runs: Vec<(Style, Vec<u8>)>,
    resets: usize,
}

impl Default for TerminalModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalModel {
    /// A terminal in the default style with no output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_style(Style::DEFAULT)
    }

    /// A terminal already in `style`.
    #[must_use]
    pub fn with_style(style: Style) -> Self {
        Self {
            state: ParseState::Ground,
            params: SmallVec::new(),
            style,
            runs: Vec::new(),
            resets: 0,
        }
    }

    /// Current style.
    #[must_use]
    pub fn style(&self) -> Style {
        self.style
    }

    /// Number of full resets (`CSI 0 m` or `CSI m`) seen.
    #[must_use]
    pub fn resets(&self) -> usize {
        self.resets
    }

    /// All visible text, including line breaks.
    #[must_use]
    pub fn text(&self) -> String {
        self.runs()
            .into_iter()
            .map(|run| run.text)
            .collect::<String>()
    }

    /// Visible text split at line breaks.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.text().split('\n').map(str::to_owned).collect()
    }

    /// Visible text grouped into maximal runs of one style.
    #[must_use]
    pub fn runs(&self) -> Vec<StyledRun> {
        self.runs
            .iter()
            .map(|(style, bytes)| StyledRun {
                style: *style,
                text: String::from_utf8_lossy(bytes).into_owned(),
            })
            .collect()
    }

    /// Feed bytes.
    pub fn process(&mut self, bytes: &[u8]) {
        for &b in bytes {
            match self.state {
                ParseState::Ground => self.ground(b),
                ParseState::Escape => self.escape(b),
                ParseState::Csi => self.csi(b),
            }
        }
    }

    fn ground(&mut self, b: u8) {
        if b == 0x1b {
            self.state = ParseState::Escape;
            return;
        }
        match self.runs.last_mut() {
            Some((style, bytes)) if *style == self.style => bytes.push(b),
            _ => self.runs.push((self.style, vec![b])),
        }
    }

    fn escape(&mut self, b: u8) {
        if b == b'[' {
            self.params.clear();
            self.state = ParseState::Csi;
        } else {
            self.state = ParseState::Ground;
        }
    }

    fn csi(&mut self, b: u8) {
        match b {
            b'0'..=b'9' => {
                if self.params.is_empty() {
                    self.params.push(0);
                }
                if let Some(last) = self.params.last_mut() {
                    *last = last.saturating_mul(10).saturating_add(u16::from(b - b'0'));
                }
            }
            b';' => {
                if self.params.is_empty() {
                    self.params.push(0);
                }
                self.params.push(0);
            }
            b'm' => {
                self.sgr();
                self.state = ParseState::Ground;
            }
            0x40..=0x7e => self.state = ParseState::Ground,
            _ => {}
        }
    }

    fn sgr(&mut self) {
        if self.params.is_empty() {
            self.reset();
            return;
        }
        let params = std::mem::take(&mut self.params);
        let mut i = 0;
        while i < params.len() {
            let code = params[i];
            match code {
                0 => self.reset(),
                1 => self.style.attrs.insert(FontAttributes::BOLD),
                2 => self.style.attrs.insert(FontAttributes::DIM),
                3 => self.style.attrs.insert(FontAttributes::ITALIC),
                4 => self.style.attrs.insert(FontAttributes::UNDERLINE),
                5 => self.style.attrs.insert(FontAttributes::BLINK),
                7 => self.style.attrs.insert(FontAttributes::INVERSE),
                8 => self.style.attrs.insert(FontAttributes::HIDDEN),
                9 => self.style.attrs.insert(FontAttributes::CROSSED_OUT),
                21 => self.style.attrs.insert(FontAttributes::DOUBLE_UNDERLINE),
                22 => self
                    .style
                    .attrs
                    .remove(FontAttributes::BOLD | FontAttributes::DIM),
                23 => self.style.attrs.remove(FontAttributes::ITALIC),
                24 => self
                    .style
                    .attrs
                    .remove(FontAttributes::UNDERLINE | FontAttributes::DOUBLE_UNDERLINE),
                25 => self.style.attrs.remove(FontAttributes::BLINK),
                27 => self.style.attrs.remove(FontAttributes::INVERSE),
                28 => self.style.attrs.remove(FontAttributes::HIDDEN),
                29 => self.style.attrs.remove(FontAttributes::CROSSED_OUT),
                30..=37 => self.style.fg = standard(code - 30),
                39 => self.style.fg = Color::Default,
                40..=47 => self.style.bg = standard(code - 40),
                49 => self.style.bg = Color::Default,
                90..=97 => self.style.fg = bright(code - 90),
                100..=107 => self.style.bg = bright(code - 100),
                38 => {
                    if let Some(color) = extended(&params, &mut i) {
                        self.style.fg = color;
                    }
                }
                48 => {
                    if let Some(color) = extended(&params, &mut i) {
                        self.style.bg = color;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        self.params = params;
    }

    fn reset(&mut self) {
        self.style = Style::DEFAULT;
        self.resets += 1;
    }
}

fn basic(code: u16) -> BasicColor {
    u8::try_from(code)
        .ok()
        .and_then(BasicColor::from_u8)
        .unwrap_or(BasicColor::White)
}

fn standard(code: u16) -> Color {
    Color::Standard(basic(code))
}

fn bright(code: u16) -> Color {
    Color::Bright(basic(code))
}

fn channel(params: &[u16], at: usize) -> Option<u8> {
    params.get(at).and_then(|&p| u8::try_from(p).ok())
}

fn extended(params: &[u16], i: &mut usize) -> Option<Color> {
    match *params.get(*i + 1)? {
        5 => {
            let idx = channel(params, *i + 2)?;
            *i += 2;
            Some(Color::Palette(idx))
        }
        2 => {
            let r = channel(params, *i + 2)?;
            let g = channel(params, *i + 3)?;
            let b = channel(params, *i + 4)?;
            *i += 4;
            Some(Color::Rgb(Rgb::new(r, g, b)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_default_style() {
        let mut model = TerminalModel::new();
        model.process(b"abc");
        assert_eq!(model.text(), "abc");
        assert!(model.style().is_default());
    }

    #[test]
    fn colors_roundtrip_through_model() {
        let mut model = TerminalModel::new();
        model.process(b"\x1b[38;5;200m\x1b[48;2;1;2;3m");
        assert_eq!(model.style().fg, Color::Palette(200));
        assert_eq!(model.style().bg, Color::rgb(1, 2, 3));
        model.process(b"\x1b[97;104m");
        assert_eq!(model.style().fg, Color::Bright(BasicColor::White));
        assert_eq!(model.style().bg, Color::Bright(BasicColor::Blue));
        model.process(b"\x1b[39;49m");
        assert!(model.style().is_default());
    }

    #[test]
    fn shared_off_codes() {
        let mut model = TerminalModel::new();
        model.process(b"\x1b[1;2;4;21m");
        model.process(b"\x1b[22m");
        assert_eq!(
            model.style().attrs,
            FontAttributes::UNDERLINE | FontAttributes::DOUBLE_UNDERLINE
        );
        model.process(b"\x1b[24m");
        assert!(model.style().attrs.is_empty());
    }

    #[test]
    fn reset_forms() {
        let mut model = TerminalModel::new();
        model.process(b"\x1b[1m\x1b[0m\x1b[3m\x1b[m");
        assert!(model.style().is_default());
        assert_eq!(model.resets(), 2);
    }

    #[test]
    fn runs_split_on_style_change() {
        let mut model = TerminalModel::new();
        model.process(b"a\x1b[1mb\x1b[1mc\x1b[22md");
        let runs = model.runs();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1].text, "bc");
        assert_eq!(runs[1].style, Style::new().bold());
    }

    #[test]
    fn utf8_text_and_lines() {
        let mut model = TerminalModel::new();
        model.process("źdźbło\n  trawy".as_bytes());
        assert_eq!(model.lines(), vec!["źdźbło".to_owned(), "  trawy".to_owned()]);
    }

    #[test]
    fn with_style_starts_elsewhere() {
        let start = Style::new().italic();
        let mut model = TerminalModel::with_style(start);
        model.process(b"\x1b[23m");
        assert!(model.style().is_default());
    }
}
