//! Markup-to-tree transformer
//!
//! Parses marker-encoded markup with the fOS markup parser and converts the
//! resulting DOM nodes into a template tree.

use fos_dom::{ElementData, Node as DomNode};

use crate::fragments::{Segment, decode_markers};
use crate::tree::{AttributeValue, ClassMap, ComponentNode, Element, FRAGMENT_TAG, Node, Part};
use crate::{Error, Result};

/// Transform marker-encoded markup into an unreduced tree
///
/// Several top-level nodes are kept under a `DocumentFragment` component,
/// which renders as the plain concatenation of its children.
pub fn transform<O: 'static>(markup: &str, class_map: &ClassMap<O>) -> Result<Node<O>> {
    let escaped = escape_ampersands(markup.trim());
    let wrapped = format!("<{FRAGMENT_TAG}>{escaped}</{FRAGMENT_TAG}>");
    let mut nodes = fos_html::parse(&wrapped)?;

    // Parsing yields the wrapper alone unless the markup closed it early
    let mut wrapper = ElementData::new(FRAGMENT_TAG);
    match nodes.pop() {
        Some(DomNode::Element(element)) if nodes.is_empty() => wrapper = element,
        Some(other) => {
            nodes.push(other);
            wrapper.children = nodes;
        }
        None => {}
    }

    if wrapper.children.len() != 1 {
        return transform_element(wrapper, class_map);
    }

    let Some(child) = wrapper.children.pop() else {
        return transform_element(wrapper, class_map);
    };
    match child {
        DomNode::Element(element) => transform_element(element, class_map),
        other => {
            let nodes = transform_node(other, class_map)?;
            match <[Node<O>; 1]>::try_from(nodes) {
                Ok([node]) => Ok(node),
                Err(nodes) => Ok(Node::Component(ComponentNode {
                    component: resolve(FRAGMENT_TAG, class_map)?,
                    attributes: Vec::new(),
                    children: nodes,
                })),
            }
        }
    }
}

/// A text node may expand into several tree nodes; everything else maps
/// to exactly one
fn transform_node<O: 'static>(node: DomNode, class_map: &ClassMap<O>) -> Result<Vec<Node<O>>> {
    match node {
        DomNode::Text(text) => Ok(transform_text(&text)),
        DomNode::Element(element) => Ok(vec![transform_element(element, class_map)?]),
        // Comments, doctypes and processing instructions pass through as markup
        other => Ok(vec![Node::Text(unescape_ampersands(&other.outer_html()))]),
    }
}

fn transform_element<O: 'static>(element: ElementData, class_map: &ClassMap<O>) -> Result<Node<O>> {
    let ElementData { name, attrs, children } = element;

    let component = if name.starts_with(char::is_uppercase) {
        Some(resolve(&name, class_map)?)
    } else {
        None
    };

    let attributes = attrs
        .into_iter()
        .map(|attr| {
            let value = transform_attribute(&attr.value);
            (attr.name, value)
        })
        .collect();

    let mut transformed = Vec::with_capacity(children.len());
    for child in children {
        transformed.extend(transform_node(child, class_map)?);
    }

    Ok(match component {
        Some(component) => Node::Component(ComponentNode {
            component,
            attributes,
            children: transformed,
        }),
        None => Node::Element(Element {
            tag: name,
            attributes,
            children: transformed,
        }),
    })
}

fn resolve<O: 'static>(name: &str, class_map: &ClassMap<O>) -> Result<crate::Component<O>> {
    class_map
        .resolve(name)
        .ok_or_else(|| Error::UnresolvedComponent { tag: name.to_string() })
}

fn transform_text<O>(text: &str) -> Vec<Node<O>> {
    let collapsed = collapse_whitespace(text);
    decode_markers(&collapsed)
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(text) => Node::Text(text.to_string()),
            Segment::Reference(index) => Node::Reference(index),
        })
        .collect()
}

fn transform_attribute(value: &str) -> AttributeValue {
    if value.is_empty() {
        return AttributeValue::Single(Part::Text(String::new()));
    }

    let collapsed = collapse_edges(value);
    let parts: Vec<Part> = decode_markers(&collapsed)
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(text) => Part::Text(text.to_string()),
            Segment::Reference(index) => Part::Reference(index),
        })
        .collect();

    match <[Part; 1]>::try_from(parts) {
        Ok([part]) => AttributeValue::Single(part),
        Err(parts) => AttributeValue::Parts(parts),
    }
}

/// Collapse every whitespace run to a single space
///
/// `"   "` becomes `" "` and `"  Hello,\n  world  "` becomes
/// `" Hello, world "`.
pub fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                collapsed.push(' ');
                in_space = true;
            }
        } else {
            collapsed.push(c);
            in_space = false;
        }
    }
    collapsed
}

/// Collapse leading and trailing whitespace runs, keeping interior spacing
///
/// A value that is all whitespace becomes `" "`.
fn collapse_edges(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return " ".to_string();
    }
    let leading = if value.starts_with(char::is_whitespace) { " " } else { "" };
    let trailing = if value.ends_with(char::is_whitespace) { " " } else { "" };
    format!("{leading}{trimmed}{trailing}")
}

/// Escape every `&` so the parser hands entity references back verbatim
fn escape_ampersands(markup: &str) -> String {
    markup.replace('&', "&amp;")
}

/// Undo `escape_ampersands` for content the parser does not unescape
fn unescape_ampersands(markup: &str) -> String {
    markup.replace("&amp;", "&")
}
