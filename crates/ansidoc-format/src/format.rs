#![forbid(unsafe_code)]

//! The [`Format`] trait and its implementations for standard types.
//!
//! Formatting appends operations to a [`Document`] instead of writing text, so
//! a value can contribute styles, line breaks and lists as well as plain text.
//! Dispatch is static: each type picks its strategy through its `Format` impl,
//! containers and tuples recurse into their elements, and anything with only a
//! `Display` or `Debug` impl goes through [`Displayed`] or [`Debugged`].
//!
//! | Shape | Output |
//! |-------|--------|
//! | `bool` | `true` / `false` |
//! | integers, floats | decimal |
//! | strings, `Displayed` | the text itself, borrowed when possible; `\n` becomes `NewLine` |
//! | slices, `Vec`, arrays, sets, `VecDeque` | `[a, b, c]` |
//! | tuples | `(a b c)` |
//! | records | `(Name (field value) ...)`, see [`impl_format_record!`](crate::impl_format_record) |

use std::borrow::Cow;
use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use ansidoc_render::Document;
use ansidoc_style::Style;

/// A value that can describe itself as document operations.
pub trait Format {
    /// Append the operations for `self` to `doc`.
    fn format<'a>(&'a self, doc: &mut Document<'a>);

    /// Append the operations for `self` under a placeholder spec such as `.2`.
    ///
    /// Types without spec support ignore it.
    fn format_spec<'a>(&'a self, doc: &mut Document<'a>, spec: &str) {
        let _ = spec;
        self.format(doc);
    }
}

/// Builder methods for appending formatted values.
pub trait DocumentExt<'a> {
    /// Append `value`.
    fn write<T: Format + ?Sized>(&mut self, value: &'a T) -> &mut Self;

    /// Append `value` under `spec`.
    fn write_spec<T: Format + ?Sized>(&mut self, value: &'a T, spec: &str) -> &mut Self;
}

impl<'a> DocumentExt<'a> for Document<'a> {
    fn write<T: Format + ?Sized>(&mut self, value: &'a T) -> &mut Self {
        value.format(self);
        self
    }

    fn write_spec<T: Format + ?Sized>(&mut self, value: &'a T, spec: &str) -> &mut Self {
        value.format_spec(self, spec);
        self
    }
}

/// A new document holding the operations for `value`.
pub fn to_document<T: Format + ?Sized>(value: &T) -> Document<'_> {
    let mut doc = Document::new();
    value.format(&mut doc);
    doc
}

// =============================================================================
// Primitives
// =============================================================================

impl Format for bool {
    fn format<'a>(&'a self, doc: &mut Document<'a>) {
        doc.text(if *self { "true" } else { "false" });
    }
}

impl Format for char {
    fn format<'a>(&'a self, doc: &mut Document<'a>) {
        if *self == '\n' {
            doc.new_line();
        } else {
            doc.text(self.to_string());
        }
    }
}

macro_rules! impl_format_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Format for $ty {
                fn format<'a>(&'a self, doc: &mut Document<'a>) {
                    doc.text(self.to_string());
                }

                /// Specs `x`, `X`, `o` and `b` select a radix.
                fn format_spec<'a>(&'a self, doc: &mut Document<'a>, spec: &str) {
                    match spec {
                        "x" => doc.text(format!("{:x}", self)),
                        "X" => doc.text(format!("{:X}", self)),
                        "o" => doc.text(format!("{:o}", self)),
                        "b" => doc.text(format!("{:b}", self)),
                        _ => doc.text(self.to_string()),
                    };
                }
            }
        )*
    };
}

impl_format_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Precision from a `.N` spec.
fn precision(spec: &str) -> Option<usize> {
    spec.strip_prefix('.')?.parse().ok()
}

macro_rules! impl_format_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Format for $ty {
                fn format<'a>(&'a self, doc: &mut Document<'a>) {
                    doc.text(self.to_string());
                }

                /// A `.N` spec fixes the number of fractional digits.
                fn format_spec<'a>(&'a self, doc: &mut Document<'a>, spec: &str) {
                    match precision(spec) {
                        Some(digits) => doc.text(format!("{:.*}", digits, self)),
                        None => doc.text(self.to_string()),
                    };
                }
            }
        )*
    };
}

impl_format_float!(f32, f64);

// =============================================================================
// Strings
// =============================================================================

/// Append `text`, turning each `'\n'` into a `NewLine`.
///
/// An empty first or last line adds no text, so a trailing break stays
/// pending. Empty lines in between are kept.
pub(crate) fn push_lines<'a>(doc: &mut Document<'a>, text: Cow<'a, str>) {
    match text {
        Cow::Borrowed(text) => {
            for piece in line_pieces(text) {
                match piece {
                    Some(line) => doc.text(line),
                    None => doc.new_line(),
                };
            }
        }
        Cow::Owned(text) if !text.contains('\n') => {
            if !text.is_empty() {
                doc.text(text);
            }
        }
        Cow::Owned(text) => {
            for piece in line_pieces(&text) {
                match piece {
                    Some(line) => doc.text(line.to_owned()),
                    None => doc.new_line(),
                };
            }
        }
    }
}

/// `Some(line)` for each kept line, `None` for each break between lines.
fn line_pieces(text: &str) -> impl Iterator<Item = Option<&str>> {
    let last = text.matches('\n').count();
    text.split('\n').enumerate().flat_map(move |(i, line)| {
        let brk = (i != 0).then_some(None);
        let keep = !(line.is_empty() && (i == 0 || i == last));
        brk.into_iter().chain(keep.then_some(Some(line)))
    })
}

impl Format for str {
    fn format<'a>(&'a self, doc: &mut Document<'a>) {
        push_lines(doc, Cow::Borrowed(self));
    }
}

impl Format for String {
    fn format<'a>(&'a self, doc: &mut Document<'a>) {
        push_lines(doc, Cow::Borrowed(self.as_str()));
    }
}

impl Format for Cow<'_, str> {
    fn format<'a>(&'a self, doc: &mut Document<'a>) {
        push_lines(doc, Cow::Borrowed(self.as_ref()));
    }
}

// =============================================================================
// Pointers
// =============================================================================

macro_rules! impl_format_deref {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<T: Format + ?Sized> Format for $ptr {
                fn format<'a>(&'a self, doc: &mut Document<'a>) {
                    (**self).format(doc);
                }

                fn format_spec<'a>(&'a self, doc: &mut Document<'a>, spec: &str) {
                    (**self).format_spec(doc, spec);
                }
            }
        )*
    };
}

impl_format_deref!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

impl Format for Document<'_> {
    fn format<'a>(&'a self, doc: &mut Document<'a>) {
        let this: &'a Document<'a> = self;
        doc.extend(this.iter().cloned());
    }
}

// =============================================================================
// Sequences
// =============================================================================

/// Brackets and separator for a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceStyle {
    /// Written before the first element.
    pub open: &'static str,
    /// Written after the last element.
    pub close: &'static str,
    /// Written between elements.
    pub separator: &'static str,
}

impl SequenceStyle {
    /// `[a, b, c]`, used for homogeneous containers.
    pub const LIST: Self = Self::new("[", "]", ", ");
    /// `(a b c)`, used for tuples.
    pub const TUPLE: Self = Self::new("(", ")", " ");

    /// Custom brackets and separator.
    #[must_use]
    pub const fn new(open: &'static str, close: &'static str, separator: &'static str) -> Self {
        Self {
            open,
            close,
            separator,
        }
    }
}

impl Default for SequenceStyle {
    fn default() -> Self {
        Self::LIST
    }
}

/// Append `items` to `doc` in `style`, formatting each element.
pub fn format_sequence<'a, T, I>(doc: &mut Document<'a>, items: I, style: SequenceStyle)
where
    T: Format + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    doc.text(style.open);
    for (i, item) in items.into_iter().enumerate() {
        if i != 0 {
            doc.text(style.separator);
        }
        item.format(doc);
    }
    doc.text(style.close);
}

/// A slice formatted with a chosen [`SequenceStyle`].
///
/// ```
/// use ansidoc_format::{Delimited, SequenceStyle, to_document};
/// use ansidoc_render::render_to_string;
///
/// let values = [1, 2, 3];
/// let braces = Delimited::new(&values, SequenceStyle::new("{", "}", "; "));
/// assert_eq!(render_to_string(&to_document(&braces)).unwrap(), "{1; 2; 3}");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Delimited<'v, T> {
    items: &'v [T],
    style: SequenceStyle,
}

impl<'v, T> Delimited<'v, T> {
    /// Wrap `items`.
    #[must_use]
    pub const fn new(items: &'v [T], style: SequenceStyle) -> Self {
        Self { items, style }
    }
}

impl<T: Format> Format for Delimited<'_, T> {
    fn format<'a>(&'a self, doc: &mut Document<'a>) {
        let items: &'a [T] = self.items;
        format_sequence(doc, items, self.style);
    }
}

impl<T: Format> Format for [T] {
    fn format<'a>(&'a self, doc: &mut Document<'a>) {
        format_sequence(doc, self, SequenceStyle::LIST);
    }
}

impl<T: Format, const N: usize> Format for [T; N] {
    fn format<'a>(&'a self, doc: &mut Document<'a>) {
        format_sequence(doc, self, SequenceStyle::LIST);
    }
}

impl<T: Format> Format for Vec<T> {
    fn format<'a>(&'a self, doc: &mut Document<'a>) {
        format_sequence(doc, self, SequenceStyle::LIST);
    }
}

impl<T: Format> Format for VecDeque<T> {
    fn format<'a>(&'a self, doc: &mut Document<'a>) {
        format_sequence(doc, self, SequenceStyle::LIST);
    }
}

impl<T: Format> Format for BTreeSet<T> {
    fn format<'a>(&'a self, doc: &mut Document<'a>) {
        format_sequence(doc, self, SequenceStyle::LIST);
    }
}

macro_rules! impl_format_tuple {
    ($first:ident $(, $rest:ident)*) => {
        impl<$first: Format, $($rest: Format),*> Format for ($first, $($rest,)*) {
            #[allow(non_snake_case)]
            fn format<'a>(&'a self, doc: &mut Document<'a>) {
                let ($first, $($rest,)*) = self;
                doc.text(SequenceStyle::TUPLE.open);
                $first.format(doc);
                $(
                    doc.text(SequenceStyle::TUPLE.separator);
                    $rest.format(doc);
                )*
                doc.text(SequenceStyle::TUPLE.close);
            }
        }
    };
}

impl_format_tuple!(A);
impl_format_tuple!(A, B);
impl_format_tuple!(A, B, C);
impl_format_tuple!(A, B, C, D);
impl_format_tuple!(A, B, C, D, E);
impl_format_tuple!(A, B, C, D, E, F);
impl_format_tuple!(A, B, C, D, E, F, G);
impl_format_tuple!(A, B, C, D, E, F, G, H);

// =============================================================================
// Adapters
// =============================================================================

/// Formats through the value's `Display` impl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Displayed<T>(pub T);

impl<T: fmt::Display> Format for Displayed<T> {
    fn format<'a>(&'a self, doc: &mut Document<'a>) {
        push_lines(doc, Cow::Owned(self.0.to_string()));
    }
}

/// Formats through the value's `Debug` impl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debugged<T>(pub T);

impl<T: fmt::Debug> Format for Debugged<T> {
    fn format<'a>(&'a self, doc: &mut Document<'a>) {
        push_lines(doc, Cow::Owned(format!("{:?}", self.0)));
    }

    /// `#?` selects the pretty form; its line breaks become `NewLine`s.
    fn format_spec<'a>(&'a self, doc: &mut Document<'a>, spec: &str) {
        if spec != "#?" {
            self.format(doc);
            return;
        }
        push_lines(doc, Cow::Owned(format!("{:#?}", self.0)));
    }
}

/// A value rendered in a fixed style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Styled<T> {
    style: Style,
    value: T,
}

impl<T> Styled<T> {
    /// Render `value` in `style`.
    #[must_use]
    pub const fn new(style: Style, value: T) -> Self {
        Self { style, value }
    }
}

impl<T: Format> Format for Styled<T> {
    fn format<'a>(&'a self, doc: &mut Document<'a>) {
        doc.push_style(self.style);
        self.value.format(doc);
        doc.pop_style();
    }

    fn format_spec<'a>(&'a self, doc: &mut Document<'a>, spec: &str) {
        doc.push_style(self.style);
        self.value.format_spec(doc, spec);
        doc.pop_style();
    }
}
