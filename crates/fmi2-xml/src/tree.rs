//! Element tree built from quick-xml pull events.
//!
//! The translators only need tag names, attributes and ordered children, so
//! text, comments and processing instructions are dropped while reading.

use std::borrow::Cow;
use std::fmt;
use std::io::{self, BufRead};
use std::sync::Arc;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::trace;

use crate::ParseError;

/// A single XML element with its attributes and child elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    /// Local tag name (namespace prefix stripped).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unescaped value of the attribute with qualified name `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Child elements with the given tag name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }
}

/// Deepest element nesting accepted by [`read_document`].
pub const MAX_DEPTH: usize = 256;

/// Read a complete document and return its document element.
pub fn read_document<R: BufRead>(source: R) -> Result<Element, ParseError> {
    let mut reader = Reader::from_reader(source);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                check_depth(&reader, &stack)?;
                let element = open_element(&reader, &e)?;
                stack.push(element);
            }
            Ok(Event::Empty(e)) => {
                check_depth(&reader, &stack)?;
                let element = open_element(&reader, &e)?;
                close_element(&reader, element, &mut stack, &mut root)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| syntax_error(&reader, "unexpected closing tag"))?;
                close_element(&reader, element, &mut stack, &mut root)?;
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(map_reader_error(&reader, err)),
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(syntax_error(
            &reader,
            format!("unexpected end of document inside <{}>", open.name),
        ));
    }
    root.ok_or_else(|| syntax_error(&reader, "document has no root element"))
}

fn check_depth<R>(reader: &Reader<R>, stack: &[Element]) -> Result<(), ParseError> {
    if stack.len() >= MAX_DEPTH {
        return Err(syntax_error(
            reader,
            format!("elements nested deeper than {MAX_DEPTH} levels"),
        ));
    }
    Ok(())
}

fn open_element<R>(reader: &Reader<R>, event: &BytesStart<'_>) -> Result<Element, ParseError> {
    let name = decode(reader, event.local_name().as_ref())?.into_owned();
    let mut attributes = Vec::new();
    for attr in event.attributes() {
        let attr = attr.map_err(|err| syntax_error(reader, err))?;
        // FMI attributes are unqualified; prefixed keys never match them.
        let key = decode(reader, attr.key.as_ref())?.into_owned();
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let value = attr
            .decode_and_unescape_value(reader)
            .map_err(|err| syntax_error(reader, err))?
            .into_owned();
        attributes.push((key, value));
    }
    trace!(element = %name, attributes = attributes.len(), "open element");
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn close_element<R>(
    reader: &Reader<R>,
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(syntax_error(
            reader,
            format!("unexpected second root element <{}>", element.name),
        ));
    }
    *root = Some(element);
    Ok(())
}

fn decode<'b, R>(reader: &Reader<R>, bytes: &'b [u8]) -> Result<Cow<'b, str>, ParseError> {
    reader
        .decoder()
        .decode(bytes)
        .map_err(|err| syntax_error(reader, err))
}

fn syntax_error<R>(reader: &Reader<R>, message: impl fmt::Display) -> ParseError {
    ParseError::Xml(format!(
        "{message} (at byte {})",
        reader.buffer_position()
    ))
}

fn map_reader_error<R>(reader: &Reader<R>, err: quick_xml::Error) -> ParseError {
    match err {
        quick_xml::Error::Io(shared) => ParseError::Io(
            Arc::try_unwrap(shared)
                .unwrap_or_else(|shared| io::Error::new(shared.kind(), shared.to_string())),
        ),
        other => syntax_error(reader, other),
    }
}
