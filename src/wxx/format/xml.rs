//! Minimal XML element tree over quick-xml events, plus attribute escaping for the writer.

use std::borrow::Cow;

use log::trace;
use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::wxx::types::error::{Result, WxxError};

/// An element with its attributes in document order and its direct character data.
///
/// `text` concatenates every text and CDATA node that sits directly inside the
/// element, whitespace included. Text of nested elements lives on those elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    /// Value of an attribute, or `""` when it is absent.
    pub fn attr(&self, name: &str) -> &str {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// The first child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Every child with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let attributes = start
            .attributes()
            .map(|attr_result| {
                let attr = attr_result
                    .map_err(|e| WxxError::Xml(format!("<{}>: failed to parse attribute: {}", name, e)))?;
                let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                let value = attr
                    .unescape_value()
                    .map_err(|e| WxxError::Xml(format!("<{}> {}: failed to decode value: {}", name, key, e)))?
                    .into_owned();
                Ok((key, value))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { name, attributes, children: Vec::new(), text: String::new() })
    }
}

/// Parses a document into its root element.
///
/// Anything after the root element is ignored.
///
/// # Errors
/// Returns `Xml` for syntax errors, mismatched tags, or a document without a root.
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| WxxError::Xml(format!("at byte {}: {}", reader.buffer_position(), e)))?;
        match event {
            Event::Start(e) => stack.push(Element::open(&e)?),
            Event::Empty(e) => {
                let element = Element::open(&e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| WxxError::Xml("unexpected closing tag".to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => {
                        trace!("Parsed <{}> with {} children", element.name, element.children.len());
                        return Ok(element);
                    }
                }
            }
            Event::Text(e) => {
                if let Some(current) = stack.last_mut() {
                    let text = e
                        .unescape()
                        .map_err(|e| WxxError::Xml(format!("<{}>: failed to decode text: {}", current.name, e)))?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    let raw = e.into_inner();
                    let text = std::str::from_utf8(&raw)
                        .map_err(|e| WxxError::Xml(format!("<{}>: CDATA is not UTF-8: {}", current.name, e)))?;
                    current.text.push_str(text);
                }
            }
            Event::Eof => {
                return Err(match stack.last() {
                    Some(open) => WxxError::Xml(format!("unexpected end of document inside <{}>", open.name)),
                    None => WxxError::Xml("no root element found".to_string()),
                });
            }
            _ => {}
        }
    }
}

/// Reads one attribute of the root element without parsing the rest of the document.
///
/// # Errors
/// Returns `Xml` if the document has no root element or the root tag is malformed.
pub fn root_attribute(xml: &str, name: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let root = Element::open(&e)?;
                return Ok(root
                    .attributes
                    .into_iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| value));
            }
            Ok(Event::Eof) => return Err(WxxError::Xml("no root element found".to_string())),
            Err(e) => return Err(WxxError::Xml(format!("failed to read root element: {}", e))),
            _ => {}
        }
    }
}

/// Escapes an attribute value. Tab, newline and carriage return become character
/// references so they survive attribute-value normalization.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    let escaped = escape(value);
    if !escaped.contains(['\t', '\n', '\r']) {
        return escaped;
    }
    let mut out = String::with_capacity(escaped.len() + 8);
    for ch in escaped.chars() {
        match ch {
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Escapes character data. Quotes are left as written.
pub fn escape_text(value: &str) -> Cow<'_, str> {
    partial_escape(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_direct_text_only() {
        let root = parse_document("<a>one<b x=\"1\">two</b>three</a>").unwrap();
        assert_eq!(root.text, "onethree");
        assert_eq!(root.child("b").unwrap().text, "two");
        assert_eq!(root.child("b").unwrap().attr("x"), "1");
        assert_eq!(root.child("b").unwrap().attr("missing"), "");
    }

    #[test]
    fn decodes_character_references() {
        let root = parse_document("<a t=\"x&#10;y\">l1&#10;l2 &amp; more</a>").unwrap();
        assert_eq!(root.attr("t"), "x\ny");
        assert_eq!(root.text, "l1\nl2 & more");
    }

    #[test]
    fn rejects_unclosed_document() {
        assert!(matches!(parse_document("<a><b>"), Err(WxxError::Xml(_))));
        assert!(matches!(parse_document("   "), Err(WxxError::Xml(_))));
    }

    #[test]
    fn attribute_escaping_round_trips() {
        let value = "a\"b<c>&\td\ne";
        let xml = format!("<a v=\"{}\"/>", escape_attribute(value));
        assert_eq!(parse_document(&xml).unwrap().attr("v"), value);
    }

    #[test]
    fn text_escaping_keeps_quotes() {
        assert_eq!(escape_text("King's \"road\" <&>"), "King's \"road\" &lt;&amp;&gt;");
        let xml = format!("<a>{}</a>", escape_text("King's \"road\""));
        assert_eq!(parse_document(&xml).unwrap().text, "King's \"road\"");
    }

    #[test]
    fn sniffs_root_attribute() {
        let xml = "<map type=\"WORLD\" version=\"1.73\"><tiles/></map>";
        assert_eq!(root_attribute(xml, "version").unwrap().as_deref(), Some("1.73"));
        assert_eq!(root_attribute(xml, "nope").unwrap(), None);
    }
}
