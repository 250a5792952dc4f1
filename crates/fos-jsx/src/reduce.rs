//! Constant folding
//!
//! Static subtrees (no references, no components anywhere below) are
//! rendered once at compile time and replaced by their markup.

use crate::backend::element_markup;
use crate::tree::{AttributeValue, Element, Node, Part};

/// Fold every static subtree of `node` into text
pub fn reduce<O>(node: Node<O>) -> Node<O> {
    match node {
        Node::Element(element) => reduce_element(element),
        Node::Component(mut component) => {
            component.children = reduce_children(component.children);
            Node::Component(component)
        }
        leaf => leaf,
    }
}

fn reduce_element<O>(mut element: Element<O>) -> Node<O> {
    element.children = reduce_children(element.children);

    let markup = static_markup(&element);
    match markup {
        Some(markup) => Node::Text(markup),
        None => Node::Element(element),
    }
}

/// Reduce each child, then merge adjacent text runs
fn reduce_children<O>(children: Vec<Node<O>>) -> Vec<Node<O>> {
    let mut merged: Vec<Node<O>> = Vec::with_capacity(children.len());
    for child in children {
        let child = reduce(child);
        if let Node::Text(text) = &child {
            if let Some(Node::Text(previous)) = merged.last_mut() {
                previous.push_str(text);
                continue;
            }
        }
        merged.push(child);
    }
    merged
}

/// Markup of the element if it is fully static
fn static_markup<O>(element: &Element<O>) -> Option<String> {
    let content = match element.children.as_slice() {
        [] => "",
        [Node::Text(text)] => text.as_str(),
        _ => return None,
    };

    let attributes = element
        .attributes
        .iter()
        .map(|(name, value)| match value {
            AttributeValue::Single(Part::Text(text)) => Some((name.clone(), text.clone())),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    Some(element_markup(&element.tag, &attributes, content))
}
