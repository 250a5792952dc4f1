//! Markup parser implementation
//!
//! Drives quick-xml's pull reader and builds owned `fos_dom` nodes.
//! End tag matching is done here rather than by quick-xml so that the
//! lenient mode can accept HTML void elements without a closing tag.

use std::borrow::Cow;

use fos_dom::{ElementData, Node, is_void_element};
use quick_xml::Reader;
use quick_xml::errors::{Error, IllFormedError};
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};

use crate::ParseError;

/// XML-style markup parser
#[derive(Debug, Clone, Default)]
pub struct XmlParser {
    allow_void_elements: bool,
}

impl XmlParser {
    /// Create a strict parser: every start tag needs a matching end tag
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `<img>`, `<br>` and the other void elements without an end tag
    pub fn allow_void_elements(mut self, allow: bool) -> Self {
        self.allow_void_elements = allow;
        self
    }

    /// Parse markup into its top-level nodes
    ///
    /// Adjacent text, entity references and CDATA sections are merged into a
    /// single text node.
    pub fn parse_fragment(&self, markup: &str) -> Result<Vec<Node>, ParseError> {
        let mut reader = Reader::from_str(markup);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;

        let mut builder = TreeBuilder::default();

        loop {
            let event = reader.read_event().map_err(|e| match e {
                Error::IllFormed(IllFormedError::UnmatchedEndTag(tag)) => {
                    ParseError::UnexpectedEndTag { tag: local_part(&tag).to_string() }
                }
                other => ParseError::UnexpectedToken {
                    position: reader.buffer_position() as u64,
                    message: other.to_string(),
                },
            })?;
            let position = reader.buffer_position() as u64;
            let token_error = |message: String| ParseError::UnexpectedToken { position, message };

            match event {
                Event::Start(ref e) => {
                    let element = element_data(e).map_err(token_error)?;
                    if self.allow_void_elements && is_void_element(&element.name) {
                        builder.push(Node::Element(element));
                    } else {
                        builder.open(element);
                    }
                }
                Event::Empty(ref e) => {
                    let element = element_data(e).map_err(token_error)?;
                    builder.push(Node::Element(element));
                }
                Event::End(e) => {
                    let local = e.local_name();
                    let name = utf8(local.as_ref()).map_err(token_error)?;
                    if self.allow_void_elements && is_void_element(&name) {
                        continue;
                    }
                    builder.close(&name)?;
                }
                Event::Text(e) => {
                    let text = e.decode().map_err(|e| token_error(e.to_string()))?;
                    builder.text.push_str(&text);
                }
                Event::GeneralRef(e) => {
                    let raw = e.decode().map_err(|e| token_error(e.to_string()))?;
                    builder.text.push_str(&resolve_entity(&raw));
                }
                Event::CData(e) => {
                    let text = utf8(e.as_ref()).map_err(token_error)?;
                    builder.text.push_str(&text);
                }
                Event::Comment(e) => {
                    let text = utf8(e.as_ref()).map_err(token_error)?;
                    builder.push(Node::Comment(text.into_owned()));
                }
                Event::DocType(e) => {
                    let text = utf8(e.as_ref()).map_err(token_error)?;
                    builder.push(Node::Doctype(text.trim().to_string()));
                }
                Event::PI(e) => {
                    let content = utf8(e.as_ref()).map_err(token_error)?;
                    let (target, data) = content
                        .split_once(char::is_whitespace)
                        .unwrap_or((content.as_ref(), ""));
                    builder.push(Node::ProcessingInstruction {
                        target: target.to_string(),
                        data: data.trim().to_string(),
                    });
                }
                Event::Decl(_) => {
                    tracing::trace!("Skipping XML declaration at byte {}", position);
                }
                Event::Eof => break,
            }
        }

        let nodes = builder.finish()?;
        tracing::debug!("Parsed {} top-level nodes", nodes.len());
        Ok(nodes)
    }
}

/// Open elements plus the pending text run
#[derive(Default)]
struct TreeBuilder {
    roots: Vec<Node>,
    open: Vec<ElementData>,
    text: String,
}

impl TreeBuilder {
    fn push(&mut self, node: Node) {
        self.flush_text();
        self.append(node);
    }

    fn open(&mut self, element: ElementData) {
        self.flush_text();
        self.open.push(element);
    }

    fn close(&mut self, name: &str) -> Result<(), ParseError> {
        self.flush_text();
        let Some(element) = self.open.pop() else {
            return Err(ParseError::UnexpectedEndTag { tag: name.to_string() });
        };
        if element.name != name {
            return Err(ParseError::MismatchedEndTag {
                expected: element.name,
                found: name.to_string(),
            });
        }
        self.append(Node::Element(element));
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Node>, ParseError> {
        self.flush_text();
        if let Some(element) = self.open.last() {
            return Err(ParseError::UnclosedTag { tag: element.name.clone() });
        }
        Ok(self.roots)
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.append(Node::Text(text));
        }
    }

    fn append(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }
}

/// Local tag name plus attributes (qualified names, unescaped values)
fn element_data(start: &BytesStart<'_>) -> Result<ElementData, String> {
    let local = start.local_name();
    let name = utf8(local.as_ref())?;
    let mut element = ElementData::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = utf8(attr.key.as_ref())?;
        let value = attr.unescape_value().map_err(|e| e.to_string())?;
        element.set_attr(key, value);
    }

    Ok(element)
}

/// `svg:rect` -> `rect`
fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

fn utf8(bytes: &[u8]) -> Result<Cow<'_, str>, String> {
    std::str::from_utf8(bytes)
        .map(Cow::Borrowed)
        .map_err(|e| format!("Invalid UTF-8: {e}"))
}

/// Resolve a general entity reference (`amp`, `#60`, `#x3C`)
///
/// Unknown names are kept verbatim.
fn resolve_entity(raw: &str) -> String {
    if let Some(resolved) = resolve_xml_entity(raw) {
        return resolved.to_string();
    }

    if let Some(rest) = raw.strip_prefix('#') {
        let code = match rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => rest.parse::<u32>().ok(),
        };
        if let Some(ch) = code.and_then(char::from_u32) {
            return ch.to_string();
        }
    }

    format!("&{raw};")
}
