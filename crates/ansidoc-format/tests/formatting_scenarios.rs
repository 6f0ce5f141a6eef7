//! End-to-end formatting: values and templates rendered to terminal text.

use ansidoc_format::{
    Debugged, DocumentExt, Format, SequenceStyle, Styled, Template, TemplateError, format_document,
    impl_format_record, to_document,
};
use ansidoc_render::{BasicColor, Color, Document, Operation, Style, indented, render_to_string};
use std::borrow::Cow;

struct Person {
    name: String,
    dates: Vec<u16>,
}

impl_format_record!(Person { name, dates });

struct Catalog {
    title: &'static str,
    people: Vec<Person>,
}

impl_format_record!(Catalog { title, people });

fn rendered<T: Format + ?Sized>(value: &T) -> String {
    render_to_string(&to_document(value)).unwrap()
}

#[test]
fn person_record() {
    let chopin = Person {
        name: "Fryderyk".to_owned(),
        dates: vec![1810, 1849],
    };
    assert_eq!(rendered(&chopin), "(Person (name Fryderyk) (dates [1810, 1849]))");
}

#[test]
fn multi_line_field_follows_indent() {
    let chopin = Person {
        name: "Fryderyk\nChopin".to_owned(),
        dates: vec![1810, 1849],
    };
    assert_eq!(
        render_to_string(&indented(to_document(&chopin))).unwrap(),
        "(Person (name Fryderyk\x1b[0m\n  Chopin) (dates [1810, 1849]))"
    );
}

#[test]
fn records_inside_records() {
    let catalog = Catalog {
        title: "composers",
        people: vec![Person {
            name: "Stanisław".to_owned(),
            dates: vec![1819, 1872],
        }],
    };
    assert_eq!(
        rendered(&catalog),
        "(Catalog (title composers) (people [(Person (name Stanisław) (dates [1819, 1872]))]))"
    );
}

#[test]
fn template_with_float() {
    let doc = format_document("Ala ma {} kota", &[&1.5]).unwrap();
    let texts: Vec<&str> = doc
        .iter()
        .filter_map(|op| match op {
            Operation::Text(text) => Some(text.as_ref()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, ["Ala ma ", "1.5", " kota"]);
    assert_eq!(render_to_string(&doc).unwrap(), "Ala ma 1.5 kota");
}

#[test]
fn template_with_record_argument() {
    let chopin = Person {
        name: "Fryderyk".to_owned(),
        dates: vec![1810, 1849],
    };
    let doc = format_document("who: {}", &[&chopin]).unwrap();
    assert_eq!(
        render_to_string(&doc).unwrap(),
        "who: (Person (name Fryderyk) (dates [1810, 1849]))"
    );
}

#[test]
fn styled_argument_inside_template() {
    let red = Style::new().fg(Color::Standard(BasicColor::Red));
    let label = Styled::new(red, "error");
    let doc = format_document("[{}]", &[&label]).unwrap();
    assert_eq!(render_to_string(&doc).unwrap(), "[\x1b[31merror\x1b[39m]");
}

#[test]
fn template_reused_with_different_arguments() {
    let template = Template::parse("{}: {:.1}").unwrap();
    let first = template.apply(&[&"a", &0.375]).unwrap();
    let second = template.apply(&[&"b", &10]).unwrap();
    assert_eq!(render_to_string(&first).unwrap(), "a: 0.4");
    assert_eq!(render_to_string(&second).unwrap(), "b: 10");
}

#[test]
fn template_errors_surface() {
    assert_eq!(
        format_document("{0", &[]).unwrap_err(),
        TemplateError::UnclosedPlaceholder { position: 0 }
    );
    assert!(matches!(
        format_document("{3}", &[&1]).unwrap_err(),
        TemplateError::ArgumentIndexOutOfRange { index: 3, count: 1, .. }
    ));
}

#[test]
fn write_mixes_with_layout() {
    let values = vec![1, 2, 3];
    let mut body = Document::new();
    body.write(&values).new_line().write(&("pair", 2));
    let doc = indented(Document::from("head") + body);
    assert_eq!(render_to_string(&doc).unwrap(), "head[1, 2, 3]\x1b[0m\n  (pair 2)");
}

#[test]
fn sequence_style_presets() {
    assert_eq!(SequenceStyle::default(), SequenceStyle::LIST);
    assert_eq!(SequenceStyle::TUPLE.separator, " ");
}

#[test]
fn debug_fallback_quotes_strings() {
    let value = Debugged("quoted");
    let doc = to_document(&value);
    assert_eq!(doc.ops(), &[Operation::Text(Cow::Owned("\"quoted\"".into()))]);
}
