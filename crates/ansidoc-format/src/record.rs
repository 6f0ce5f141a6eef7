#![forbid(unsafe_code)]

//! Record formatting for user-declared structs.
//!
//! A record lists its fields once, through [`impl_format_record!`] or by hand
//! with a [`RecordBuilder`]:
//!
//! ```
//! use ansidoc_format::{impl_format_record, to_document};
//! use ansidoc_render::render_to_string;
//!
//! struct Person {
//!     name: String,
//!     dates: Vec<u32>,
//! }
//!
//! impl_format_record!(Person { name, dates });
//!
//! let chopin = Person { name: "Fryderyk".into(), dates: vec![1810, 1849] };
//! assert_eq!(
//!     render_to_string(&to_document(&chopin)).unwrap(),
//!     "(Person (name Fryderyk) (dates [1810, 1849]))"
//! );
//! ```
//!
//! [`impl_format_record!`]: crate::impl_format_record

use ansidoc_render::Document;

use crate::format::Format;

/// How a record lays out its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordStyle {
    /// `(Name (field value) (field value))`
    #[default]
    Named,
    /// `(value value)`
    Positional,
}

/// Appends one record to a document.
///
/// Call [`field`](Self::field) once per field, in order, then
/// [`finish`](Self::finish) to close the parenthesis.
#[derive(Debug)]
#[must_use = "a record is unterminated until finish() is called"]
pub struct RecordBuilder<'d, 'a> {
    doc: &'d mut Document<'a>,
    style: RecordStyle,
    fields: usize,
}

impl<'d, 'a> RecordBuilder<'d, 'a> {
    /// Open a record. `name` is written only in [`RecordStyle::Named`].
    pub fn new(doc: &'d mut Document<'a>, name: &'a str, style: RecordStyle) -> Self {
        doc.text("(");
        if style == RecordStyle::Named {
            doc.text(name);
        }
        Self {
            doc,
            style,
            fields: 0,
        }
    }

    /// Open a named record.
    pub fn named(doc: &'d mut Document<'a>, name: &'a str) -> Self {
        Self::new(doc, name, RecordStyle::Named)
    }

    /// Open a positional record.
    pub fn positional(doc: &'d mut Document<'a>) -> Self {
        Self::new(doc, "", RecordStyle::Positional)
    }

    /// Append one field.
    pub fn field<T: Format + ?Sized>(&mut self, name: &'a str, value: &'a T) -> &mut Self {
        match self.style {
            RecordStyle::Named => {
                self.doc.text(" (").text(name).text(" ");
                value.format(self.doc);
                self.doc.text(")");
            }
            RecordStyle::Positional => {
                if self.fields != 0 {
                    self.doc.text(" ");
                }
                value.format(self.doc);
            }
        }
        self.fields += 1;
        self
    }

    /// Close the record.
    pub fn finish(self) {
        self.doc.text(")");
    }
}

/// Implement [`Format`](crate::Format) for a struct by listing its fields.
///
/// ```
/// # use ansidoc_format::impl_format_record;
/// struct Point { x: i32, y: i32 }
/// struct Span { from: u32, to: u32 }
/// struct Pair(u8, u8);
///
/// impl_format_record!(Point { x, y });             // (Point (x 1) (y 2))
/// impl_format_record!(Span as "range" { from, to }); // (range (from 1) (to 2))
/// impl_format_record!(positional Pair { 0, 1 });   // (1 2)
/// ```
#[macro_export]
macro_rules! impl_format_record {
    (positional $ty:ident { $($field:tt),* $(,)? }) => {
        impl $crate::Format for $ty {
            fn format<'a>(&'a self, doc: &mut $crate::Document<'a>) {
                #[allow(unused_mut)]
                let mut record = $crate::RecordBuilder::positional(doc);
                $( record.field("", &self.$field); )*
                record.finish();
            }
        }
    };
    ($ty:ident as $name:literal { $($field:tt),* $(,)? }) => {
        $crate::impl_format_record!(@named $ty, $name, $($field),*);
    };
    ($ty:ident { $($field:tt),* $(,)? }) => {
        $crate::impl_format_record!(@named $ty, stringify!($ty), $($field),*);
    };
    (@named $ty:ident, $name:expr, $($field:tt),*) => {
        impl $crate::Format for $ty {
            fn format<'a>(&'a self, doc: &mut $crate::Document<'a>) {
                #[allow(unused_mut)]
                let mut record = $crate::RecordBuilder::named(doc, $name);
                $( record.field(stringify!($field), &self.$field); )*
                record.finish();
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::to_document;
    use ansidoc_render::render_to_string;

    fn text_of<T: Format + ?Sized>(value: &T) -> String {
        render_to_string(&to_document(value)).unwrap()
    }

    struct Person {
        name: String,
        dates: Vec<u32>,
    }

    impl_format_record!(Person { name, dates });

    struct Point {
        x: i32,
        y: i32,
    }

    impl_format_record!(Point as "Pt" { x, y });

    struct Pair(&'static str, f64);

    impl_format_record!(positional Pair { 0, 1 });

    struct Empty;

    impl_format_record!(Empty {});

    #[test]
    fn named_record() {
        let chopin = Person {
            name: "Fryderyk".into(),
            dates: vec![1810, 1849],
        };
        assert_eq!(text_of(&chopin), "(Person (name Fryderyk) (dates [1810, 1849]))");
    }

    #[test]
    fn renamed_record() {
        assert_eq!(text_of(&Point { x: 1, y: -2 }), "(Pt (x 1) (y -2))");
    }

    #[test]
    fn positional_record() {
        assert_eq!(text_of(&Pair("a", 0.5)), "(a 0.5)");
    }

    #[test]
    fn record_without_fields() {
        assert_eq!(text_of(&Empty), "(Empty)");
    }

    #[test]
    fn records_nest_in_containers() {
        let points = vec![Point { x: 0, y: 0 }, Point { x: 1, y: 1 }];
        assert_eq!(text_of(&points), "[(Pt (x 0) (y 0)), (Pt (x 1) (y 1))]");
    }

    #[test]
    fn builder_by_hand() {
        let mut doc = Document::new();
        let mut record = RecordBuilder::new(&mut doc, "Unused", RecordStyle::Positional);
        record.field("a", &1).field("b", "two");
        record.finish();
        assert_eq!(render_to_string(&doc).unwrap(), "(1 two)");
    }
}
