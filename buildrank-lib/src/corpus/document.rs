use super::{Dialect, Element};
use crate::Result;
use camino::Utf8Path;
use ohno::{IntoAppError, app_err, bail};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fs;

/// One parsed configuration file.
///
/// A document is built once per file, consumed by the flattener and the metric extractor, and then dropped.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    root: Element,
    dialect: Dialect,
    line_count: u64,
}

impl ConfigDocument {
    /// Read and parse a file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not well-formed XML.
    pub fn read(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading '{path}'"))?;
        Self::parse(&text).into_app_err_with(|| format!("parsing '{path}'"))
    }

    /// Parse a document from its text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a single well-formed XML element tree.
    pub fn parse(text: &str) -> Result<Self> {
        let root = parse_tree(text)?;
        let dialect = Dialect::infer(&root);

        Ok(Self {
            root,
            dialect,
            line_count: text.lines().count() as u64,
        })
    }

    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Raw line count of the source text.
    #[must_use]
    pub const fn line_count(&self) -> u64 {
        self.line_count
    }
}

fn parse_tree(text: &str) -> Result<Element> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .into_app_err_with(|| format!("malformed XML at byte {}", reader.buffer_position()))?;

        match event {
            Event::Start(tag) => {
                if root.is_some() && stack.is_empty() {
                    bail!("multiple root elements at byte {}", reader.buffer_position());
                }
                stack.push(open_element(&tag)?);
            }

            Event::Empty(tag) => {
                let element = open_element(&tag)?;
                close_element(element, &mut stack, &mut root, reader.buffer_position())?;
            }

            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| app_err!("unexpected closing tag at byte {}", reader.buffer_position()))?;
                close_element(element, &mut stack, &mut root, reader.buffer_position())?;
            }

            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    let text = t.unescape().into_app_err("decoding text content")?;
                    current.push_text(&text);
                }
            }

            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    let bytes = c.into_inner();
                    current.push_text(&String::from_utf8_lossy(&bytes));
                }
            }

            Event::Eof => break,

            // declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        bail!("unexpected end of document inside <{}>", open.name());
    }

    root.ok_or_else(|| app_err!("document has no root element"))
}

fn open_element(tag: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(tag.name().as_ref()));

    for attr in tag.attributes() {
        let attr = attr.into_app_err("reading attribute")?;
        let value = attr.unescape_value().into_app_err("decoding attribute value")?;
        element.push_attribute(String::from_utf8_lossy(attr.key.as_ref()).into_owned(), value.into_owned());
    }

    Ok(element)
}

fn close_element(element: Element, stack: &mut [Element], root: &mut Option<Element>, position: u64) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(element);
        return Ok(());
    }

    if root.is_some() {
        bail!("multiple root elements at byte {position}");
    }

    *root = Some(element);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builds_tree() {
        let doc = ConfigDocument::parse(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- generated -->
<project id="P1">
  <name>Payments</name>
  <parameters>
    <param name="env" value="prod &amp; staging"/>
  </parameters>
</project>
"#,
        )
        .unwrap();

        let root = doc.root();
        assert_eq!(root.name(), "project");
        assert_eq!(root.attribute("id"), Some("P1"));
        assert_eq!(root.child("name").unwrap().text(), "Payments");

        let param = root.find_children("parameters", "param").next().unwrap();
        assert_eq!(param.attribute("value"), Some("prod & staging"));
        assert_eq!(doc.line_count(), 8);
    }

    #[test]
    fn test_cdata_becomes_text() {
        let doc = ConfigDocument::parse("<param name=\"script\"><![CDATA[echo <hi>]]></param>").unwrap();
        assert_eq!(doc.root().text(), "echo <hi>");
    }

    #[test]
    fn test_mismatched_tags_fail() {
        let _ = ConfigDocument::parse("<a><b></a>").unwrap_err();
    }

    #[test]
    fn test_unclosed_document_fails() {
        let _ = ConfigDocument::parse("<a><b/>").unwrap_err();
    }

    #[test]
    fn test_multiple_roots_fail() {
        let _ = ConfigDocument::parse("<a/><b/>").unwrap_err();
    }

    #[test]
    fn test_empty_document_fails() {
        let _ = ConfigDocument::parse("   ").unwrap_err();
    }
}
