//! DOM Node - Owned representation
//!
//! Unlike an arena tree, every node owns its children. Building a tree is
//! therefore a matter of creating nodes and appending them bottom-up, which
//! is what a renderer walking a template does anyway.

use crate::{DomError, DomResult, HtmlSerializer};

/// DOM node types, numbered like the DOM `nodeType` constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    ProcessingInstruction = 7,
    Comment = 8,
    DocumentType = 10,
    DocumentFragment = 11,
}

/// DOM Node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Element with attributes and children
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
    /// DOCTYPE (the part after `<!DOCTYPE`)
    Doctype(String),
    /// Processing instruction
    ProcessingInstruction { target: String, data: String },
    /// Lightweight container; appending it moves its children instead
    Fragment(Vec<Node>),
}

impl Node {
    /// Create a new element node
    pub fn element(name: impl Into<String>) -> Self {
        Self::Element(ElementData::new(name))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Create a new comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::Comment(content.into())
    }

    /// Create a document fragment holding `children`
    ///
    /// Nested fragments are flattened so a fragment never contains another.
    pub fn fragment(children: Vec<Node>) -> Self {
        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            push_flattened(&mut flat, child);
        }
        Self::Fragment(flat)
    }

    /// The DOM `nodeType` of this node
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Element(_) => NodeType::Element,
            Self::Text(_) => NodeType::Text,
            Self::Comment(_) => NodeType::Comment,
            Self::Doctype(_) => NodeType::DocumentType,
            Self::ProcessingInstruction { .. } => NodeType::ProcessingInstruction,
            Self::Fragment(_) => NodeType::DocumentFragment,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Child nodes (empty for leaf nodes)
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Element(e) => &e.children,
            Self::Fragment(children) => children,
            _ => &[],
        }
    }

    /// Append a child node
    ///
    /// Appending a fragment moves the fragment's children, in order.
    pub fn append_child(&mut self, child: Node) -> DomResult<()> {
        match self {
            Self::Element(e) => {
                e.append_child(child);
                Ok(())
            }
            Self::Fragment(children) => {
                push_flattened(children, child);
                Ok(())
            }
            other => Err(DomError::HierarchyRequest { parent: other.node_type() }),
        }
    }

    /// Remove the child at `index`
    pub fn remove_child(&mut self, index: usize) -> DomResult<Node> {
        let children = match self {
            Self::Element(e) => &mut e.children,
            Self::Fragment(children) => children,
            other => return Err(DomError::HierarchyRequest { parent: other.node_type() }),
        };
        if index >= children.len() {
            return Err(DomError::NotAChild { index, len: children.len() });
        }
        Ok(children.remove(index))
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut output = String::new();
        collect_text(self, &mut output);
        output
    }

    /// Serialize this node (outerHTML)
    pub fn outer_html(&self) -> String {
        HtmlSerializer::new().serialize_outer(self)
    }

    /// Serialize this node's children (innerHTML)
    pub fn inner_html(&self) -> String {
        HtmlSerializer::new().serialize_inner(self)
    }
}

impl From<ElementData> for Node {
    fn from(element: ElementData) -> Self {
        Self::Element(element)
    }
}

/// Element-specific data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name
    pub name: String,
    /// Attributes in insertion order
    pub attrs: Vec<Attribute>,
    /// Child nodes
    pub children: Vec<Node>,
}

impl ElementData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        // Check if attribute already exists
        for attr in self.attrs.iter_mut() {
            if attr.name == name {
                attr.value = value;
                return;
            }
        }
        // Add new attribute
        self.attrs.push(Attribute { name, value });
    }

    /// Append a child, splicing fragments
    pub fn append_child(&mut self, child: Node) {
        push_flattened(&mut self.children, child);
    }
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

fn push_flattened(children: &mut Vec<Node>, child: Node) {
    match child {
        Node::Fragment(inner) => {
            for grandchild in inner {
                push_flattened(children, grandchild);
            }
        }
        other => children.push(other),
    }
}

fn collect_text(node: &Node, output: &mut String) {
    match node {
        Node::Text(text) => output.push_str(text),
        Node::Element(_) | Node::Fragment(_) => {
            for child in node.children() {
                collect_text(child, output);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_fragment_splices_children() {
        let mut div = Node::element("div");
        let fragment = Node::fragment(vec![Node::text("a"), Node::element("br"), Node::text("b")]);
        div.append_child(fragment).unwrap();

        assert_eq!(div.children().len(), 3);
        assert_eq!(div.text_content(), "ab");
    }

    #[test]
    fn test_nested_fragments_flatten() {
        let inner = Node::fragment(vec![Node::text("x"), Node::text("y")]);
        let outer = Node::fragment(vec![Node::text("w"), inner]);

        assert_eq!(outer.children().len(), 3);
        assert!(outer.children().iter().all(Node::is_text));
    }

    #[test]
    fn test_text_node_cannot_have_children() {
        let mut text = Node::text("leaf");
        let err = text.append_child(Node::text("child")).unwrap_err();
        assert_eq!(err, DomError::HierarchyRequest { parent: NodeType::Text });
    }

    #[test]
    fn test_set_attr_replaces_existing() {
        let mut elem = ElementData::new("a");
        elem.set_attr("href", "/one");
        elem.set_attr("id", "link");
        elem.set_attr("href", "/two");

        assert_eq!(elem.attrs.len(), 2);
        assert_eq!(elem.get_attr("href"), Some("/two"));
        assert_eq!(elem.attrs[0].name, "href");
    }

    #[test]
    fn test_remove_child() {
        let mut ul = Node::element("ul");
        ul.append_child(Node::element("li")).unwrap();
        ul.append_child(Node::text("tail")).unwrap();

        let removed = ul.remove_child(1).unwrap();
        assert_eq!(removed, Node::text("tail"));
        assert_eq!(ul.remove_child(5), Err(DomError::NotAChild { index: 5, len: 1 }));
    }
}
