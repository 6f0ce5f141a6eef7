#![forbid(unsafe_code)]

//! The document: a flat, ordered list of rendering operations.
//!
//! Documents are plain data. Building one never touches a terminal; the
//! [`Renderer`](crate::Renderer) interprets the operations later. Text can be
//! borrowed (`Cow::Borrowed`) so that large strings are not copied just to be
//! printed once.
//!
//! Appending preserves order, so `a + b` renders exactly as `a` followed by
//! `b`, and concatenation is associative with the empty document as identity.

use std::borrow::Cow;
use std::ops::{Add, AddAssign};

use ansidoc_style::{Style, StyleApplier};

use crate::decode::{DecodeError, decode_utf8};

/// One rendering instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation<'a> {
    /// Emit text verbatim. Must not contain a line break.
    Text(Cow<'a, str>),
    /// Request a line break. The break is deferred until the next text.
    NewLine,
    /// Increase the indent level by one.
    Indent,
    /// Decrease the indent level by one.
    Unindent,
    /// Push an absolute style.
    PushStyle(Style),
    /// Push the current style with an edit applied.
    ModifyStyle(StyleApplier),
    /// Pop the most recent style.
    PopStyle,
    /// Open a list scope.
    ListStart,
    /// Begin an item: emits the item prefix.
    ItemStart,
    /// End an item.
    ItemEnd,
    /// Close the innermost list scope.
    ListEnd,
}

impl Operation<'_> {
    /// Detach from any borrowed text.
    #[must_use]
    pub fn into_owned(self) -> Operation<'static> {
        match self {
            Self::Text(text) => Operation::Text(Cow::Owned(text.into_owned())),
            Self::NewLine => Operation::NewLine,
            Self::Indent => Operation::Indent,
            Self::Unindent => Operation::Unindent,
            Self::PushStyle(style) => Operation::PushStyle(style),
            Self::ModifyStyle(applier) => Operation::ModifyStyle(applier),
            Self::PopStyle => Operation::PopStyle,
            Self::ListStart => Operation::ListStart,
            Self::ItemStart => Operation::ItemStart,
            Self::ItemEnd => Operation::ItemEnd,
            Self::ListEnd => Operation::ListEnd,
        }
    }
}

/// An ordered sequence of [`Operation`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document<'a> {
    ops: Vec<Operation<'a>>,
}

impl<'a> Document<'a> {
    /// Create an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Create an empty document with room for `capacity` operations.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ops: Vec::with_capacity(capacity),
        }
    }

    /// Number of operations.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True if there are no operations.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The operations, in order.
    #[inline]
    #[must_use]
    pub fn ops(&self) -> &[Operation<'a>] {
        &self.ops
    }

    /// Iterate over the operations.
    pub fn iter(&self) -> std::slice::Iter<'_, Operation<'a>> {
        self.ops.iter()
    }

    /// Consume into the operation vector.
    #[must_use]
    pub fn into_ops(self) -> Vec<Operation<'a>> {
        self.ops
    }

    /// Append one operation.
    #[inline]
    pub fn push(&mut self, op: Operation<'a>) -> &mut Self {
        self.ops.push(op);
        self
    }

    /// Append text.
    ///
    /// # Panics
    ///
    /// Debug builds panic if `text` contains `'\n'`; use
    /// [`new_line`](Self::new_line) for breaks.
    pub fn text(&mut self, text: impl Into<Cow<'a, str>>) -> &mut Self {
        let text = text.into();
        debug_assert!(
            !text.contains('\n'),
            "text operations must not contain line breaks: {text:?}"
        );
        self.push(Operation::Text(text))
    }

    /// Validate `bytes` as UTF-8 and append them as text.
    pub fn text_utf8(&mut self, bytes: &'a [u8]) -> Result<&mut Self, DecodeError> {
        let text = decode_utf8(bytes)?;
        Ok(self.text(text))
    }

    /// Append a deferred line break.
    pub fn new_line(&mut self) -> &mut Self {
        self.push(Operation::NewLine)
    }

    /// Append an indent.
    pub fn indent(&mut self) -> &mut Self {
        self.push(Operation::Indent)
    }

    /// Append an unindent.
    pub fn unindent(&mut self) -> &mut Self {
        self.push(Operation::Unindent)
    }

    /// Append an absolute style push.
    pub fn push_style(&mut self, style: Style) -> &mut Self {
        self.push(Operation::PushStyle(style))
    }

    /// Append a relative style push.
    pub fn modify_style(&mut self, applier: StyleApplier) -> &mut Self {
        self.push(Operation::ModifyStyle(applier))
    }

    /// Append a style pop.
    pub fn pop_style(&mut self) -> &mut Self {
        self.push(Operation::PopStyle)
    }

    /// Append a list start.
    pub fn list_start(&mut self) -> &mut Self {
        self.push(Operation::ListStart)
    }

    /// Append an item start.
    pub fn item_start(&mut self) -> &mut Self {
        self.push(Operation::ItemStart)
    }

    /// Append an item end.
    pub fn item_end(&mut self) -> &mut Self {
        self.push(Operation::ItemEnd)
    }

    /// Append a list end.
    pub fn list_end(&mut self) -> &mut Self {
        self.push(Operation::ListEnd)
    }

    /// Move every operation of `other` onto the end of `self`.
    pub fn append(&mut self, other: Document<'a>) -> &mut Self {
        if self.ops.is_empty() {
            self.ops = other.ops;
        } else {
            self.ops.extend(other.ops);
        }
        self
    }

    /// Detach from any borrowed text.
    #[must_use]
    pub fn into_owned(self) -> Document<'static> {
        Document {
            ops: self.ops.into_iter().map(Operation::into_owned).collect(),
        }
    }
}

impl<'a> Add for Document<'a> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self.append(rhs);
        self
    }
}

impl<'a> AddAssign for Document<'a> {
    fn add_assign(&mut self, rhs: Self) {
        self.append(rhs);
    }
}

impl<'a> Extend<Operation<'a>> for Document<'a> {
    fn extend<I: IntoIterator<Item = Operation<'a>>>(&mut self, iter: I) {
        self.ops.extend(iter);
    }
}

impl<'a> Extend<Document<'a>> for Document<'a> {
    fn extend<I: IntoIterator<Item = Document<'a>>>(&mut self, iter: I) {
        for doc in iter {
            self.append(doc);
        }
    }
}

impl<'a> FromIterator<Operation<'a>> for Document<'a> {
    fn from_iter<I: IntoIterator<Item = Operation<'a>>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<Document<'a>> for Document<'a> {
    fn from_iter<I: IntoIterator<Item = Document<'a>>>(iter: I) -> Self {
        let mut doc = Self::new();
        doc.extend(iter);
        doc
    }
}

impl<'a> IntoIterator for Document<'a> {
    type Item = Operation<'a>;
    type IntoIter = std::vec::IntoIter<Operation<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'d, 'a> IntoIterator for &'d Document<'a> {
    type Item = &'d Operation<'a>;
    type IntoIter = std::slice::Iter<'d, Operation<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

impl<'a> From<Operation<'a>> for Document<'a> {
    fn from(op: Operation<'a>) -> Self {
        Self { ops: vec![op] }
    }
}

impl<'a> From<Vec<Operation<'a>>> for Document<'a> {
    fn from(ops: Vec<Operation<'a>>) -> Self {
        Self { ops }
    }
}

impl<'a> From<&'a str> for Document<'a> {
    fn from(text: &'a str) -> Self {
        let mut doc = Self::new();
        doc.text(text);
        doc
    }
}

impl From<String> for Document<'static> {
    fn from(text: String) -> Self {
        let mut doc = Self::new();
        doc.text(text);
        doc
    }
}
