#![forbid(unsafe_code)]

//! Format-string templates.
//!
//! A template is literal text with placeholders:
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `{}` | next argument |
//! | `{2}` | argument 2 |
//! | `{1:.3}` | argument 1, formatted with spec `.3` |
//! | `{{` / `}}` | literal brace |
//!
//! Every placeholder advances the implicit counter, including explicit ones,
//! so `"{1} {}"` refers to arguments 1 and 1.
//!
//! Parsing borrows literal text from the source; applying a template produces
//! one `Text` operation per literal run and dispatches each argument through
//! [`Format`].

use std::borrow::Cow;
use std::fmt;

use ansidoc_render::Document;
use smallvec::SmallVec;

use crate::format::{Format, push_lines};

/// Errors from parsing or applying a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A `{` was never closed.
    UnclosedPlaceholder { position: usize },
    /// A `}` appeared outside a placeholder and was not doubled.
    UnmatchedClosingBrace { position: usize },
    /// The text before `:` is neither empty nor a decimal index.
    InvalidArgumentIndex { text: String, position: usize },
    /// A placeholder refers past the end of the argument list.
    ArgumentIndexOutOfRange {
        index: usize,
        count: usize,
        position: usize,
    },
}

impl TemplateError {
    /// Byte offset of the offending placeholder or brace.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Self::UnclosedPlaceholder { position }
            | Self::UnmatchedClosingBrace { position }
            | Self::InvalidArgumentIndex { position, .. }
            | Self::ArgumentIndexOutOfRange { position, .. } => *position,
        }
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnclosedPlaceholder { position } => {
                write!(f, "unclosed placeholder at position {position}")
            }
            Self::UnmatchedClosingBrace { position } => {
                write!(f, "unmatched '}}' at position {position}")
            }
            Self::InvalidArgumentIndex { text, position } => {
                write!(f, "invalid argument index {text:?} at position {position}")
            }
            Self::ArgumentIndexOutOfRange {
                index,
                count,
                position,
            } => write!(
                f,
                "argument index {index} out of range for {count} argument(s) at position {position}"
            ),
        }
    }
}

impl std::error::Error for TemplateError {}

/// One parsed piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'t> {
    /// Literal text, already unescaped.
    Literal(&'t str),
    /// An argument reference.
    Placeholder {
        /// Argument index.
        index: usize,
        /// Text after `:`, empty if absent.
        spec: &'t str,
        /// Byte offset of the opening brace.
        position: usize,
    },
}

/// A parsed format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'t> {
    pieces: SmallVec<[Piece<'t>; 8]>,
}

impl<'t> Template<'t> {
    /// Parse `source`.
    pub fn parse(source: &'t str) -> Result<Self, TemplateError> {
        match parse_pieces(source) {
            Ok(pieces) => Ok(Self { pieces }),
            Err(err) => {
                ansidoc_render::debug!(error = %err, "template parse failed");
                Err(err)
            }
        }
    }

    /// The pieces, in order.
    #[must_use]
    pub fn pieces(&self) -> &[Piece<'t>] {
        &self.pieces
    }

    /// Number of arguments the template needs: one past the highest index.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.pieces
            .iter()
            .filter_map(|piece| match piece {
                Piece::Placeholder { index, .. } => Some(index + 1),
                Piece::Literal(_) => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Append the template to `doc`, formatting `args` into the placeholders.
    ///
    /// Fails without appending anything if a placeholder is out of range.
    pub fn apply_into<'a>(
        &self,
        doc: &mut Document<'a>,
        args: &[&'a dyn Format],
    ) -> Result<(), TemplateError>
    where
        't: 'a,
    {
        self.check_arity(args.len())?;
        for piece in &self.pieces {
            match *piece {
                Piece::Literal(text) => push_lines(doc, Cow::Borrowed(text)),
                Piece::Placeholder { index, spec, .. } => {
                    let arg: &'a dyn Format = args[index];
                    if spec.is_empty() {
                        arg.format(doc);
                    } else {
                        arg.format_spec(doc, spec);
                    }
                }
            }
        }
        Ok(())
    }

    /// A new document with `args` formatted into the placeholders.
    pub fn apply<'a>(&self, args: &[&'a dyn Format]) -> Result<Document<'a>, TemplateError>
    where
        't: 'a,
    {
        let mut doc = Document::with_capacity(self.pieces.len());
        self.apply_into(&mut doc, args)?;
        Ok(doc)
    }

    fn check_arity(&self, count: usize) -> Result<(), TemplateError> {
        for piece in &self.pieces {
            if let Piece::Placeholder {
                index, position, ..
            } = *piece
            {
                if index >= count {
                    return Err(TemplateError::ArgumentIndexOutOfRange {
                        index,
                        count,
                        position,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Canonical form: every placeholder gets its explicit index.
impl fmt::Display for Template<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => {
                    for ch in text.chars() {
                        match ch {
                            '{' => f.write_str("{{")?,
                            '}' => f.write_str("}}")?,
                            _ => write!(f, "{ch}")?,
                        }
                    }
                }
                Piece::Placeholder { index, spec, .. } if spec.is_empty() => {
                    write!(f, "{{{index}}}")?;
                }
                Piece::Placeholder { index, spec, .. } => write!(f, "{{{index}:{spec}}}")?,
            }
        }
        Ok(())
    }
}

fn parse_pieces(source: &str) -> Result<SmallVec<[Piece<'_>; 8]>, TemplateError> {
    let bytes = source.as_bytes();
    let mut pieces = SmallVec::new();
    let mut literal_start = 0;
    let mut next_implicit = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' if bytes.get(i + 1) == Some(&b'{') => {
                // Keep one brace with the preceding literal.
                push_literal(&mut pieces, &source[literal_start..=i]);
                i += 2;
                literal_start = i;
            }
            b'{' => {
                push_literal(&mut pieces, &source[literal_start..i]);
                let body_start = i + 1;
                let close = source[body_start..]
                    .find(['{', '}'])
                    .map(|offset| body_start + offset)
                    .filter(|&at| bytes[at] == b'}')
                    .ok_or(TemplateError::UnclosedPlaceholder { position: i })?;
                let body = &source[body_start..close];
                let (index_text, spec) = body.split_once(':').unwrap_or((body, ""));
                let index = if index_text.is_empty() {
                    next_implicit
                } else {
                    parse_index(index_text).ok_or_else(|| TemplateError::InvalidArgumentIndex {
                        text: index_text.to_owned(),
                        position: i,
                    })?
                };
                next_implicit += 1;
                pieces.push(Piece::Placeholder {
                    index,
                    spec,
                    position: i,
                });
                i = close + 1;
                literal_start = i;
            }
            b'}' if bytes.get(i + 1) == Some(&b'}') => {
                push_literal(&mut pieces, &source[literal_start..=i]);
                i += 2;
                literal_start = i;
            }
            b'}' => return Err(TemplateError::UnmatchedClosingBrace { position: i }),
            _ => i += 1,
        }
    }
    push_literal(&mut pieces, &source[literal_start..]);
    Ok(pieces)
}

fn push_literal<'t>(pieces: &mut SmallVec<[Piece<'t>; 8]>, text: &'t str) {
    if !text.is_empty() {
        pieces.push(Piece::Literal(text));
    }
}

fn parse_index(text: &str) -> Option<usize> {
    if text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

/// Parse `template` and apply it to `args` in one step.
///
/// ```
/// use ansidoc_format::format_document;
/// use ansidoc_render::render_to_string;
///
/// let doc = format_document("Ala ma {} kota", &[&1.5]).unwrap();
/// assert_eq!(render_to_string(&doc).unwrap(), "Ala ma 1.5 kota");
/// ```
pub fn format_document<'a>(
    template: &'a str,
    args: &[&'a dyn Format],
) -> Result<Document<'a>, TemplateError> {
    Template::parse(template)?.apply(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ansidoc_render::{Operation, render_to_string};
    use std::borrow::Cow;

    fn rendered(template: &str, args: &[&dyn Format]) -> String {
        render_to_string(&format_document(template, args).unwrap()).unwrap()
    }

    #[test]
    fn literal_only() {
        let template = Template::parse("plain").unwrap();
        assert_eq!(template.pieces(), &[Piece::Literal("plain")]);
        assert_eq!(template.arity(), 0);
    }

    #[test]
    fn empty_template() {
        assert!(Template::parse("").unwrap().pieces().is_empty());
    }

    #[test]
    fn implicit_placeholders_count_up() {
        let template = Template::parse("{} and {}").unwrap();
        assert_eq!(
            template.pieces(),
            &[
                Piece::Placeholder { index: 0, spec: "", position: 0 },
                Piece::Literal(" and "),
                Piece::Placeholder { index: 1, spec: "", position: 7 },
            ]
        );
        assert_eq!(template.arity(), 2);
    }

    #[test]
    fn explicit_index_still_advances_counter() {
        let template = Template::parse("{1} {}").unwrap();
        assert_eq!(template.to_string(), "{1} {1}");
    }

    #[test]
    fn spec_is_kept() {
        let template = Template::parse("{0:.2}|{:x}").unwrap();
        assert_eq!(template.to_string(), "{0:.2}|{1:x}");
        assert_eq!(rendered("{0:.2}|{:x}", &[&2.0, &255]), "2.00|ff");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let template = Template::parse("{{x}} = {}").unwrap();
        assert_eq!(template.to_string(), "{{x}} = {0}");
        assert_eq!(rendered("{{x}} = {}", &[&1]), "{x} = 1");
    }

    #[test]
    fn literals_are_borrowed() {
        let doc = format_document("Ala ma {} kota", &[&1.5]).unwrap();
        assert_eq!(
            doc.ops(),
            &[
                Operation::Text(Cow::Borrowed("Ala ma ")),
                Operation::Text(Cow::Owned("1.5".into())),
                Operation::Text(Cow::Borrowed(" kota")),
            ]
        );
        assert!(matches!(doc.ops()[0], Operation::Text(Cow::Borrowed(_))));
    }

    #[test]
    fn unclosed_placeholder() {
        assert_eq!(
            Template::parse("abc {0").unwrap_err(),
            TemplateError::UnclosedPlaceholder { position: 4 }
        );
        assert_eq!(
            Template::parse("{ {}").unwrap_err(),
            TemplateError::UnclosedPlaceholder { position: 0 }
        );
    }

    #[test]
    fn unmatched_closing_brace() {
        let err = Template::parse("a } b").unwrap_err();
        assert_eq!(err, TemplateError::UnmatchedClosingBrace { position: 2 });
        assert_eq!(err.to_string(), "unmatched '}' at position 2");
    }

    #[test]
    fn invalid_index() {
        let err = Template::parse("x {a}").unwrap_err();
        assert_eq!(
            err,
            TemplateError::InvalidArgumentIndex {
                text: "a".into(),
                position: 2
            }
        );
        assert_eq!(err.position(), 2);
        assert!(Template::parse("{-1}").is_err());
        assert!(Template::parse("{+1}").is_err());
    }

    #[test]
    fn index_out_of_range() {
        let template = Template::parse("{} {}").unwrap();
        let err = template.apply(&[&1]).unwrap_err();
        assert_eq!(
            err,
            TemplateError::ArgumentIndexOutOfRange {
                index: 1,
                count: 1,
                position: 3
            }
        );
    }

    #[test]
    fn failed_apply_appends_nothing() {
        let template = Template::parse("a {5}").unwrap();
        let mut doc = Document::new();
        assert!(template.apply_into(&mut doc, &[]).is_err());
        assert!(doc.is_empty());
    }

    #[test]
    fn arguments_can_repeat_and_reorder() {
        assert_eq!(rendered("{1}-{0}-{1}", &[&"a", &"b"]), "b-a-b");
    }

    #[test]
    fn compound_arguments() {
        assert_eq!(
            rendered("{} / {}", &[&vec![1, 2], &(true, 'c')]),
            "[1, 2] / (true c)"
        );
    }

    #[test]
    fn line_breaks_in_literals() {
        assert_eq!(rendered("a\n{}", &[&1]), "a\x1b[0m\n1");
        assert_eq!(rendered("{}\n", &[&1]), "1\n");
    }

    #[test]
    fn unicode_literals() {
        assert_eq!(rendered("żółw {} ü", &[&7]), "żółw 7 ü");
    }
}
