//! Backend adapters
//!
//! The renderer only needs four primitive operations from its output type;
//! a backend supplies them. `StringBackend` builds markup strings and
//! `DomBackend` builds `fos_dom` nodes. The tree walk is the same for both.

use fos_dom::{ElementData, Node, is_void_element};
use fos_html::XmlParser;

use crate::{Result, Value};

/// Output strategy for the renderer
pub trait Backend: Clone + 'static {
    type Output: 'static;

    /// Literal markup taken from the template itself
    fn render_static(&self, markup: &str) -> Result<Self::Output>;

    /// A substituted value
    fn render_text(&self, value: &Value) -> Self::Output;

    /// An element with resolved attributes and already-joined children
    fn render_element(
        &self,
        tag: &str,
        attributes: &[(String, String)],
        children: Self::Output,
    ) -> Self::Output;

    /// Concatenate sibling outputs
    fn join_children(&self, children: Vec<Self::Output>) -> Self::Output;
}

/// Renders to markup strings
#[derive(Debug, Clone, Copy, Default)]
pub struct StringBackend;

impl Backend for StringBackend {
    type Output = String;

    fn render_static(&self, markup: &str) -> Result<String> {
        Ok(markup.to_string())
    }

    fn render_text(&self, value: &Value) -> String {
        value.to_string()
    }

    fn render_element(&self, tag: &str, attributes: &[(String, String)], children: String) -> String {
        element_markup(tag, attributes, &children)
    }

    fn join_children(&self, children: Vec<String>) -> String {
        children.concat()
    }
}

/// Markup for one element
///
/// Void elements with blank content are written without a closing tag.
/// Attribute values are written verbatim.
pub fn element_markup(tag: &str, attributes: &[(String, String)], children: &str) -> String {
    let mut markup = String::with_capacity(tag.len() * 2 + children.len() + 5);
    markup.push('<');
    markup.push_str(tag);
    for (name, value) in attributes {
        markup.push(' ');
        markup.push_str(name);
        markup.push_str("=\"");
        markup.push_str(value);
        markup.push('"');
    }
    markup.push('>');

    if is_void_element(tag) && children.trim().is_empty() {
        return markup;
    }

    markup.push_str(children);
    markup.push_str("</");
    markup.push_str(tag);
    markup.push('>');
    markup
}

/// Renders to `fos_dom` nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct DomBackend;

impl Backend for DomBackend {
    type Output = Node;

    /// Template markup (text, folded static elements, comments, doctypes)
    /// is parsed back into nodes, decoding its entity references.
    fn render_static(&self, markup: &str) -> Result<Node> {
        let parser = XmlParser::new().allow_void_elements(true);
        match parser.parse_fragment(markup) {
            Ok(mut nodes) if nodes.len() == 1 => Ok(nodes.remove(0)),
            Ok(nodes) => Ok(Node::fragment(nodes)),
            Err(err) => {
                // A bare '&' or '<' left over from CDATA
                tracing::trace!("Keeping static text as text: {}", err);
                Ok(Node::text(markup))
            }
        }
    }

    fn render_text(&self, value: &Value) -> Node {
        match value {
            Value::Node(node) => node.clone(),
            other => Node::text(other.to_string()),
        }
    }

    fn render_element(&self, tag: &str, attributes: &[(String, String)], children: Node) -> Node {
        let mut element = ElementData::new(tag);
        for (name, value) in attributes {
            element.set_attr(name.as_str(), value.as_str());
        }
        element.append_child(children);
        Node::Element(element)
    }

    fn join_children(&self, children: Vec<Node>) -> Node {
        Node::fragment(children)
    }
}
