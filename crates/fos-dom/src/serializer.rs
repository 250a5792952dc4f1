//! Markup serializer
//!
//! Writes nodes back out as HTML. Empty void elements get no end tag,
//! `script`/`style` content is written raw and everything else is escaped.

use crate::Node;

/// Void elements (no end tag when they have no content)
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input",
    "keygen", "link", "menuitem", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text is written unescaped
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Whether `tag` is written without a closing tag when empty
#[inline]
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Serializer options
#[derive(Debug, Clone)]
pub struct HtmlSerializer {
    /// Put each nested element on its own line
    pub pretty_print: bool,
    /// One level of indentation
    pub indent: String,
}

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self {
            pretty_print: false,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self {
            pretty_print: true,
            indent: "  ".to_string(),
        }
    }

    /// Markup of the node's children
    pub fn serialize_inner(&self, node: &Node) -> String {
        let mut output = String::new();
        self.serialize_children(node.children(), &mut output, 0);
        output
    }

    /// Markup of the node itself
    pub fn serialize_outer(&self, node: &Node) -> String {
        let mut output = String::new();
        self.serialize_node(node, &mut output, 0);
        output
    }

    fn serialize_node(&self, node: &Node, output: &mut String, depth: usize) {
        match node {
            Node::Fragment(children) => {
                self.serialize_children(children, output, depth);
            }
            Node::Element(elem) => {
                let tag = elem.name.as_str();
                let is_void = is_void_element(tag) && elem.children.is_empty();
                let is_raw = RAW_TEXT_ELEMENTS.contains(&tag);

                if depth > 0 {
                    self.line_break(output, depth);
                }

                output.push('<');
                output.push_str(tag);
                for attr in &elem.attrs {
                    output.push(' ');
                    output.push_str(&attr.name);
                    output.push_str("=\"");
                    escape_attribute(&attr.value, output);
                    output.push('"');
                }
                output.push('>');

                if is_void {
                    return;
                }

                if is_raw {
                    output.extend(elem.children.iter().filter_map(Node::as_text));
                } else {
                    self.serialize_children(&elem.children, output, depth + 1);
                }

                if elem.children.iter().any(Node::is_element) {
                    self.line_break(output, depth);
                }
                output.push_str("</");
                output.push_str(tag);
                output.push('>');
            }
            Node::Text(text) => {
                escape_text(text, output);
            }
            Node::Comment(text) => {
                output.push_str("<!--");
                output.push_str(text);
                output.push_str("-->");
            }
            Node::Doctype(name) => {
                output.push_str("<!DOCTYPE ");
                output.push_str(name);
                output.push('>');
            }
            Node::ProcessingInstruction { target, data } => {
                output.push_str("<?");
                output.push_str(target);
                if !data.is_empty() {
                    output.push(' ');
                    output.push_str(data);
                }
                output.push_str("?>");
            }
        }
    }

    fn line_break(&self, output: &mut String, depth: usize) {
        if self.pretty_print {
            output.push('\n');
            output.push_str(&self.indent.repeat(depth));
        }
    }

    fn serialize_children(&self, children: &[Node], output: &mut String, depth: usize) {
        for child in children {
            self.serialize_node(child, output, depth);
        }
    }
}

fn escape_text(text: &str, output: &mut String) {
    escape(text, false, output);
}

fn escape_attribute(value: &str, output: &mut String) {
    escape(value, true, output);
}

fn escape(text: &str, quotes: bool, output: &mut String) {
    for c in text.chars() {
        let entity = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' if quotes => "&quot;",
            _ => {
                output.push(c);
                continue;
            }
        };
        output.push_str(entity);
    }
}
