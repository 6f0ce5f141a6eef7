#![forbid(unsafe_code)]

//! Composition helpers that wrap a document in balanced scopes.
//!
//! Every helper here emits matching open/close operations, so documents built
//! only from these helpers (plus text and line breaks) are always balanced.
//!
//! ```
//! use ansidoc_render::{Style, indented, line, render_to_string, styled};
//!
//! let doc = line("title") + indented(styled(Style::new().bold(), "body"));
//! assert_eq!(
//!     render_to_string(&doc).unwrap(),
//!     "title\x1b[1m\x1b[0m\n  \x1b[1mbody\x1b[22m"
//! );
//! ```

use ansidoc_style::{Style, StyleApplier};

use crate::document::{Document, Operation};

/// Increase the indent for the duration of `doc`.
pub fn indented<'a>(doc: impl Into<Document<'a>>) -> Document<'a> {
    let doc = doc.into();
    let mut out = Document::with_capacity(doc.len() + 2);
    out.indent().append(doc).unindent();
    out
}

/// `doc` followed by a line break.
pub fn line<'a>(doc: impl Into<Document<'a>>) -> Document<'a> {
    let mut out = doc.into();
    out.new_line();
    out
}

/// Render `doc` in `style`, then restore the previous style.
pub fn styled<'a>(style: Style, doc: impl Into<Document<'a>>) -> Document<'a> {
    let doc = doc.into();
    let mut out = Document::with_capacity(doc.len() + 2);
    out.push_style(style).append(doc).pop_style();
    out
}

/// Render `doc` with `applier` layered over the current style.
pub fn modified<'a>(applier: StyleApplier, doc: impl Into<Document<'a>>) -> Document<'a> {
    let doc = doc.into();
    let mut out = Document::with_capacity(doc.len() + 2);
    out.modify_style(applier).append(doc).pop_style();
    out
}

/// A list with one item per element of `items`, indented one level.
pub fn list<'a, I>(items: I) -> Document<'a>
where
    I: IntoIterator,
    I::Item: Into<Document<'a>>,
{
    indented(flat_list(items))
}

/// A list at the current indent level.
pub fn flat_list<'a, I>(items: I) -> Document<'a>
where
    I: IntoIterator,
    I::Item: Into<Document<'a>>,
{
    let mut out = Document::new();
    out.list_start();
    for item in items {
        out.item_start().append(item.into()).item_end();
    }
    out.list_end();
    out
}

/// Concatenate `f(x)` for every `x` in `iter`.
pub fn map<'a, I, F, D>(iter: I, f: F) -> Document<'a>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> D,
    D: Into<Document<'a>>,
{
    iter.into_iter().map(f).map(Into::into).collect()
}

impl<'a> From<Vec<Document<'a>>> for Document<'a> {
    fn from(docs: Vec<Document<'a>>) -> Self {
        docs.into_iter().collect()
    }
}

/// True if every push has a matching pop, every indent a matching unindent,
/// and every list start a matching end, each properly nested.
#[must_use]
pub fn is_balanced(doc: &Document<'_>) -> bool {
    let mut styles = 0usize;
    let mut indents = 0usize;
    let mut lists = 0usize;
    for op in doc {
        match op {
            Operation::PushStyle(_) | Operation::ModifyStyle(_) => styles += 1,
            Operation::PopStyle => match styles.checked_sub(1) {
                Some(n) => styles = n,
                None => return false,
            },
            Operation::Indent => indents += 1,
            Operation::Unindent => match indents.checked_sub(1) {
                Some(n) => indents = n,
                None => return false,
            },
            Operation::ListStart => lists += 1,
            Operation::ListEnd => match lists.checked_sub(1) {
                Some(n) => lists = n,
                None => return false,
            },
            Operation::ItemStart | Operation::ItemEnd => {
                if lists == 0 {
                    return false;
                }
            }
            Operation::Text(_) | Operation::NewLine => {}
        }
    }
    styles == 0 && indents == 0 && lists == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use ansidoc_style::{FontAttributes, font};

    #[test]
    fn indented_wraps() {
        let doc = indented("x");
        assert_eq!(doc.ops().first(), Some(&Operation::Indent));
        assert_eq!(doc.ops().last(), Some(&Operation::Unindent));
        assert!(is_balanced(&doc));
    }

    #[test]
    fn line_appends_break() {
        assert_eq!(line("x").ops().last(), Some(&Operation::NewLine));
    }

    #[test]
    fn styled_and_modified_balance() {
        let doc = styled(Style::new().bold(), modified(font(FontAttributes::ITALIC), "x"));
        assert_eq!(doc.len(), 5);
        assert!(is_balanced(&doc));
    }

    #[test]
    fn list_brackets_items() {
        let doc = flat_list(["a", "b"]);
        assert_eq!(
            doc.ops(),
            &[
                Operation::ListStart,
                Operation::ItemStart,
                Operation::Text("a".into()),
                Operation::ItemEnd,
                Operation::ItemStart,
                Operation::Text("b".into()),
                Operation::ItemEnd,
                Operation::ListEnd,
            ]
        );
        assert!(is_balanced(&doc));
    }

    #[test]
    fn list_adds_indent_scope() {
        let doc = list(["a"]);
        assert_eq!(doc.ops().first(), Some(&Operation::Indent));
        assert_eq!(doc.ops().last(), Some(&Operation::Unindent));
        assert_eq!(&doc.ops()[1..doc.len() - 1], flat_list(["a"]).ops());
        assert!(is_balanced(&doc));
    }

    #[test]
    fn map_concatenates() {
        let words = ["x", "y", "z"];
        let doc = map(words, |w| line(w));
        assert_eq!(doc.len(), 6);
    }

    #[test]
    fn unbalanced_detected() {
        let mut doc = Document::new();
        doc.pop_style();
        assert!(!is_balanced(&doc));

        let mut doc = Document::new();
        doc.indent();
        assert!(!is_balanced(&doc));

        let mut doc = Document::new();
        doc.item_start();
        assert!(!is_balanced(&doc));
    }
}
