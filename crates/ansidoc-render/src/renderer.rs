#![forbid(unsafe_code)]

//! Single-pass document renderer.
//!
//! The renderer walks a [`Document`] once, left to right, and writes styled
//! text to any [`Write`] sink. State lives only for the duration of one call:
//!
//! - a style stack whose bottom entry is [`Style::DEFAULT`] and is never popped,
//! - the indent level,
//! - a newline-pending flag,
//! - one started-item count per open list.
//!
//! List operations are bookkeeping only. `ItemStart` passes the open counts,
//! and whether output sits at the start of a line, to the configured
//! [`ListItemFormatter`] and renders its prefix in place. Indenting the items
//! is up to the document, see [`list`](crate::compose::list).
//!
//! # Line breaks
//!
//! `NewLine` does not write anything. The break is emitted lazily, just before
//! the next text, as `ESC[0m`, `\n`, the indent, and the SGR needed to restore
//! the active style. Blank lines and the end of output therefore never carry
//! trailing spaces or escape sequences; a break still pending at the end of
//! the document is written as a bare `\n`.
//!
//! # Panics
//!
//! Unbalanced documents are construction bugs. `PopStyle` without a matching
//! push, `ListEnd` without `ListStart`, and `ItemStart`/`ItemEnd` outside a
//! list all panic. `Unindent` below zero panics in debug builds and is
//! ignored in release builds.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use ansidoc_style::Style;
use smallvec::SmallVec;

use crate::ansi::{SGR_RESET, write_style_diff};
use crate::document::{Document, Operation};
use crate::list::{ListItemFormatter, ListPath, NumberedFormatter};

/// Default number of spaces per indent level.
pub const DEFAULT_INDENT_WIDTH: usize = 2;

const SPACES: &[u8; 64] = b"                                                                ";

/// Renderer configuration.
#[derive(Clone)]
pub struct RenderOptions {
    /// Spaces written per indent level at each line start.
    pub indent_width: usize,
    /// Produces the prefix for each list item.
    pub list_formatter: Arc<dyn ListItemFormatter>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            list_formatter: Arc::new(NumberedFormatter),
        }
    }
}

impl RenderOptions {
    /// Set the number of spaces per indent level.
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the list item formatter.
    #[must_use]
    pub fn with_list_formatter(mut self, formatter: impl ListItemFormatter + 'static) -> Self {
        self.list_formatter = Arc::new(formatter);
        self
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("indent_width", &self.indent_width)
            .finish_non_exhaustive()
    }
}

/// Renders documents with a fixed set of options.
///
/// A `Renderer` holds no per-render state and can be reused or shared.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    /// Create a renderer.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `doc` into `sink`, then flush it.
    ///
    /// I/O errors are returned as-is; output already written stays written.
    pub fn render<W: Write + ?Sized>(&self, sink: &mut W, doc: &Document<'_>) -> io::Result<()> {
        let span = crate::debug_span!(
            "render",
            ops = doc.len(),
            indent_width = self.options.indent_width
        );
        let _guard = span.enter();

        let mut state = RenderState::new(sink, &self.options);
        state.run(doc)?;
        state.finish()
    }

    /// Render `doc` into a new string.
    pub fn render_to_string(&self, doc: &Document<'_>) -> io::Result<String> {
        let mut buf = Vec::with_capacity(doc.len() * 8);
        self.render(&mut buf, doc)?;
        String::from_utf8(buf).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}

/// Render `doc` into `sink` with default options.
pub fn render<W: Write + ?Sized>(sink: &mut W, doc: &Document<'_>) -> io::Result<()> {
    Renderer::default().render(sink, doc)
}

/// Render `doc` into a string with default options.
pub fn render_to_string(doc: &Document<'_>) -> io::Result<String> {
    Renderer::default().render_to_string(doc)
}

/// Mutable state of one render call.
struct RenderState<'o, W: Write + ?Sized> {
    sink: &'o mut W,
    options: &'o RenderOptions,
    styles: SmallVec<[Style; 8]>,
    indent: usize,
    newline_pending: bool,
    line_has_text: bool,
    lists: SmallVec<[usize; 4]>,
}

impl<'o, W: Write + ?Sized> RenderState<'o, W> {
    fn new(sink: &'o mut W, options: &'o RenderOptions) -> Self {
        let mut styles = SmallVec::new();
        styles.push(Style::DEFAULT);
        Self {
            sink,
            options,
            styles,
            indent: 0,
            newline_pending: false,
            line_has_text: false,
            lists: SmallVec::new(),
        }
    }

    #[inline]
    fn top(&self) -> Style {
        // The bottom entry is never popped.
        self.styles.last().copied().unwrap_or(Style::DEFAULT)
    }

    fn run(&mut self, doc: &Document<'_>) -> io::Result<()> {
        for op in doc {
            self.apply(op)?;
        }
        Ok(())
    }

    fn apply(&mut self, op: &Operation<'_>) -> io::Result<()> {
        match op {
            Operation::Text(text) => self.text(text),
            Operation::NewLine => {
                self.newline_pending = true;
                Ok(())
            }
            Operation::Indent => {
                self.indent += 1;
                Ok(())
            }
            Operation::Unindent => {
                debug_assert!(self.indent > 0, "Unindent without matching Indent");
                if self.indent == 0 {
                    crate::warn!("unindent below zero ignored");
                }
                self.indent = self.indent.saturating_sub(1);
                Ok(())
            }
            Operation::PushStyle(style) => self.push_style(*style),
            Operation::ModifyStyle(applier) => self.push_style(applier.apply(self.top())),
            Operation::PopStyle => self.pop_style(),
            Operation::ListStart => {
                self.lists.push(0);
                crate::trace!(depth = self.lists.len(), "list start");
                Ok(())
            }
            Operation::ItemStart => self.item_start(),
            Operation::ItemEnd => {
                if self.lists.is_empty() {
                    crate::error!("ItemEnd outside of a list");
                    panic!("ItemEnd outside of a list");
                }
                Ok(())
            }
            Operation::ListEnd => {
                if self.lists.pop().is_none() {
                    crate::error!("ListEnd without matching ListStart");
                    panic!("ListEnd without matching ListStart");
                }
                crate::trace!(depth = self.lists.len(), "list end");
                Ok(())
            }
        }
    }

    fn text(&mut self, text: &str) -> io::Result<()> {
        if self.newline_pending {
            self.newline_pending = false;
            self.line_has_text = false;
            self.sink.write_all(SGR_RESET)?;
            self.sink.write_all(b"\n")?;
            self.write_indent()?;
            let top = self.top();
            write_style_diff(&mut *self.sink, &Style::DEFAULT, &top)?;
        }
        if !text.is_empty() {
            self.line_has_text = true;
        }
        self.sink.write_all(text.as_bytes())
    }

    fn write_indent(&mut self) -> io::Result<()> {
        let mut remaining = self.indent.saturating_mul(self.options.indent_width);
        while remaining > 0 {
            let chunk = remaining.min(SPACES.len());
            self.sink.write_all(&SPACES[..chunk])?;
            remaining -= chunk;
        }
        Ok(())
    }

    fn push_style(&mut self, style: Style) -> io::Result<()> {
        let previous = self.top();
        self.styles.push(style);
        crate::trace!(depth = self.styles.len() - 1, "push style");
        write_style_diff(&mut *self.sink, &previous, &style)
    }

    fn pop_style(&mut self) -> io::Result<()> {
        if self.styles.len() < 2 {
            crate::error!("PopStyle without matching PushStyle");
            panic!("PopStyle without matching PushStyle or ModifyStyle");
        }
        let old = self.top();
        self.styles.pop();
        let new = self.top();
        crate::trace!(depth = self.styles.len() - 1, "pop style");
        write_style_diff(&mut *self.sink, &old, &new)
    }

    fn item_start(&mut self) -> io::Result<()> {
        if self.lists.is_empty() {
            crate::error!("ItemStart outside of a list");
            panic!("ItemStart outside of a list");
        }
        if let Some(counter) = self.lists.last_mut() {
            *counter += 1;
        }
        let at_line_start = self.newline_pending || !self.line_has_text;
        let path = ListPath::new(&self.lists).with_line_start(at_line_start);
        let prefix = self.options.list_formatter.item_prefix(&path);
        self.run(&prefix)
    }

    fn finish(self) -> io::Result<()> {
        if self.styles.len() > 1 {
            crate::debug!(open = self.styles.len() - 1, "render finished with open styles");
        }
        if self.newline_pending {
            self.sink.write_all(b"\n")?;
        }
        self.sink.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::BulletFormatter;
    use ansidoc_style::{BasicColor, Color, FontAttributes, font};

    const RED: Color = Color::Standard(BasicColor::Red);

    fn render_str(doc: &Document<'_>) -> String {
        render_to_string(doc).unwrap()
    }

    #[test]
    fn plain_text() {
        assert_eq!(render_str(&Document::from("hello")), "hello");
    }

    #[test]
    fn empty_document_writes_nothing() {
        assert_eq!(render_str(&Document::new()), "");
    }

    #[test]
    fn push_text_pop() {
        let mut doc = Document::new();
        doc.push_style(Style::new().fg(RED)).text("hi").pop_style();
        assert_eq!(render_str(&doc), "\x1b[31mhi\x1b[39m");
    }

    #[test]
    fn newline_is_deferred() {
        let mut doc = Document::new();
        doc.text("a").new_line().text("b");
        assert_eq!(render_str(&doc), "a\x1b[0m\nb");
    }

    #[test]
    fn trailing_newline_is_bare() {
        let mut doc = Document::new();
        doc.text("a").indent().new_line();
        assert_eq!(render_str(&doc), "a\n");
    }

    #[test]
    fn consecutive_newlines_collapse() {
        let mut doc = Document::new();
        doc.text("a").new_line().new_line().text("b");
        assert_eq!(render_str(&doc), "a\x1b[0m\nb");
    }

    #[test]
    fn newline_restores_style_after_reset() {
        let mut doc = Document::new();
        doc.push_style(Style::new().fg(RED).bold())
            .text("a")
            .new_line()
            .text("b")
            .pop_style();
        assert_eq!(
            render_str(&doc),
            "\x1b[1m\x1b[31ma\x1b[0m\n\x1b[1m\x1b[31mb\x1b[22m\x1b[39m"
        );
    }

    #[test]
    fn indent_applies_at_line_start_only() {
        let mut doc = Document::new();
        doc.indent().text("x").new_line().text("y").unindent();
        assert_eq!(render_str(&doc), "x\x1b[0m\n  y");
    }

    #[test]
    fn indent_width_is_configurable() {
        let renderer = Renderer::new(RenderOptions::default().with_indent_width(4));
        let mut doc = Document::new();
        doc.new_line().indent().text("x").unindent();
        assert_eq!(renderer.render_to_string(&doc).unwrap(), "\x1b[0m\n    x");
    }

    #[test]
    fn wide_indent_spans_buffer_chunks() {
        let renderer = Renderer::new(RenderOptions::default().with_indent_width(50));
        let mut doc = Document::new();
        doc.indent().indent().new_line().text("x");
        let out = renderer.render_to_string(&doc).unwrap();
        assert_eq!(out, format!("\x1b[0m\n{}x", " ".repeat(100)));
    }

    #[test]
    fn modify_style_layers_on_top() {
        let mut doc = Document::new();
        doc.push_style(Style::new().fg(RED))
            .modify_style(font(FontAttributes::BOLD))
            .text("x")
            .pop_style()
            .pop_style();
        assert_eq!(render_str(&doc), "\x1b[31m\x1b[1mx\x1b[22m\x1b[39m");
    }

    #[test]
    fn push_same_style_writes_nothing() {
        let mut doc = Document::new();
        doc.push_style(Style::DEFAULT).text("x").pop_style();
        assert_eq!(render_str(&doc), "x");
    }

    #[test]
    #[should_panic(expected = "PopStyle without matching")]
    fn pop_without_push_panics() {
        let mut doc = Document::new();
        doc.pop_style();
        let _ = render_str(&doc);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "Unindent without matching Indent")]
    fn unindent_underflow_panics_in_debug() {
        let mut doc = Document::new();
        doc.unindent();
        let _ = render_str(&doc);
    }

    #[test]
    #[should_panic(expected = "ItemStart outside of a list")]
    fn item_outside_list_panics() {
        let mut doc = Document::new();
        doc.item_start();
        let _ = render_str(&doc);
    }

    #[test]
    #[should_panic(expected = "ListEnd without matching ListStart")]
    fn list_end_without_start_panics() {
        let mut doc = Document::new();
        doc.list_end();
        let _ = render_str(&doc);
    }

    #[test]
    fn numbered_list() {
        let doc = crate::compose::list(["a", "b"]);
        assert_eq!(render_str(&doc), "\x1b[0m\n  1. a\x1b[0m\n  2. b");
    }

    #[test]
    fn nested_lists_count_per_level() {
        let inner = crate::compose::list(["x"]);
        let mut item = Document::from("a");
        item += inner;
        let doc = crate::compose::list([item, Document::from("b")]);
        assert_eq!(
            render_str(&doc),
            "\x1b[0m\n  1. a\x1b[0m\n    1. x\x1b[0m\n  2. b"
        );
    }

    #[test]
    fn bullet_formatter_option() {
        let renderer = Renderer::new(
            RenderOptions::default().with_list_formatter(BulletFormatter::new("*")),
        );
        let doc = crate::compose::list(["a"]);
        assert_eq!(renderer.render_to_string(&doc).unwrap(), "\x1b[0m\n  * a");
    }

    fn parenthesized(path: &ListPath<'_>) -> Document<'static> {
        let mut doc = Document::new();
        if !path.at_line_start() {
            doc.new_line();
        }
        doc.text(format!("{}) ", path.ordinal()));
        doc
    }

    #[test]
    fn list_operations_do_not_indent() {
        let mut doc = Document::new();
        doc.text("head")
            .list_start()
            .item_start()
            .text("a")
            .item_end()
            .list_end();
        assert_eq!(render_str(&doc), "head\x1b[0m\n1. a");
    }

    #[test]
    fn flat_list_with_custom_formatter() {
        let renderer = Renderer::new(RenderOptions::default().with_list_formatter(parenthesized));
        let doc = Document::from("head") + crate::compose::flat_list(["a", "b"]);
        assert_eq!(
            renderer.render_to_string(&doc).unwrap(),
            "head\x1b[0m\n1) a\x1b[0m\n2) b"
        );
    }

    #[test]
    fn formatter_sees_line_start() {
        let renderer = Renderer::new(RenderOptions::default().with_list_formatter(parenthesized));
        let at_top = crate::compose::flat_list(["a", "b"]);
        assert_eq!(renderer.render_to_string(&at_top).unwrap(), "1) a\x1b[0m\n2) b");

        let after_break = crate::compose::line("head") + crate::compose::flat_list(["a"]);
        assert_eq!(
            renderer.render_to_string(&after_break).unwrap(),
            "head\x1b[0m\n1) a"
        );
    }

    #[test]
    fn styles_alone_do_not_leave_line_start() {
        let renderer = Renderer::new(RenderOptions::default().with_list_formatter(parenthesized));
        let doc = crate::compose::styled(Style::new().bold(), crate::compose::flat_list(["a"]));
        assert_eq!(
            renderer.render_to_string(&doc).unwrap(),
            "\x1b[1m1) a\x1b[22m"
        );
    }

    #[test]
    fn sink_errors_propagate() {
        struct Failing;
        impl Write for Failing {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("sink closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let err = render(&mut Failing, &Document::from("x")).unwrap_err();
        assert_eq!(err.to_string(), "sink closed");
    }

    #[test]
    fn options_debug_hides_formatter() {
        let text = format!("{:?}", RenderOptions::default());
        assert!(text.starts_with("RenderOptions { indent_width: 2"));
    }
}
