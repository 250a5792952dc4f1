//! Compiled template tree
//!
//! A template compiles to a tree of `Node`s. Literal text is kept verbatim,
//! substitution slots become `Reference`s, lowercase tags become `Element`s
//! and capitalized tags are resolved once, at compile time, to `Component`s.
//!
//! `O` is the output type of the backend the tree will be rendered with;
//! components produce it, so a tree is tied to one kind of output.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::{Props, Rendered, Result};

/// Name of the synthetic container wrapping multiple top-level nodes
pub const FRAGMENT_TAG: &str = "DocumentFragment";

/// Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Node<O> {
    /// Literal markup, rendered as-is
    Text(String),
    /// Placeholder for `substitutions[index]`
    Reference(usize),
    /// Plain element
    Element(Element<O>),
    /// Component invocation
    Component(ComponentNode<O>),
}

/// Plain element
#[derive(Debug, Clone, PartialEq)]
pub struct Element<O> {
    pub tag: String,
    pub attributes: Attributes,
    pub children: Vec<Node<O>>,
}

/// Component invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentNode<O> {
    pub component: Component<O>,
    pub attributes: Attributes,
    pub children: Vec<Node<O>>,
}

/// Attributes in source order
pub type Attributes = Vec<(String, AttributeValue)>;

/// Attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Whole value is one literal or one substitution
    Single(Part),
    /// Literals and substitutions concatenated, e.g. `class="a ${x} b"`
    Parts(Vec<Part>),
}

/// Piece of an attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    Reference(usize),
}

impl<O> Node<O> {
    /// Literal text node
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Reference indices in document order (attributes before children)
    pub fn references(&self) -> Vec<usize> {
        let mut indices = Vec::new();
        self.collect_references(&mut indices);
        indices
    }

    fn collect_references(&self, indices: &mut Vec<usize>) {
        let (attributes, children) = match self {
            Self::Text(_) => return,
            Self::Reference(index) => {
                indices.push(*index);
                return;
            }
            Self::Element(element) => (&element.attributes, &element.children),
            Self::Component(component) => (&component.attributes, &component.children),
        };

        for (_, value) in attributes {
            let parts = match value {
                AttributeValue::Single(part) => std::slice::from_ref(part),
                AttributeValue::Parts(parts) => parts.as_slice(),
            };
            indices.extend(parts.iter().filter_map(|part| match part {
                Part::Reference(index) => Some(*index),
                Part::Text(_) => None,
            }));
        }
        for child in children {
            child.collect_references(indices);
        }
    }
}

/// Component function signature
pub type ComponentFn<O> = dyn Fn(Props<O>) -> Result<Rendered<O>>;

/// User-supplied component
///
/// Equality is identity of the function, so two trees compiled against the
/// same class map compare equal.
pub struct Component<O> {
    name: Rc<str>,
    render: Rc<ComponentFn<O>>,
}

impl<O: 'static> Component<O> {
    /// Wrap a component function
    pub fn new<F>(name: &str, render: F) -> Self
    where
        F: Fn(Props<O>) -> Result<Rendered<O>> + 'static,
    {
        Self {
            name: Rc::from(name),
            render: Rc::new(render),
        }
    }

    /// Built-in component rendering its children unchanged
    pub fn fragment() -> Self {
        Self::new(FRAGMENT_TAG, |props| Ok(Rendered::Ready(props.into_children())))
    }
}

impl<O> Component<O> {
    /// Tag name the component was registered under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the component
    pub fn call(&self, props: Props<O>) -> Result<Rendered<O>> {
        (self.render)(props)
    }
}

impl<O> Clone for Component<O> {
    fn clone(&self) -> Self {
        Self {
            name: Rc::clone(&self.name),
            render: Rc::clone(&self.render),
        }
    }
}

impl<O> PartialEq for Component<O> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.render, &other.render)
    }
}

impl<O> fmt::Debug for Component<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Component").field(&self.name).finish()
    }
}

/// Map from capitalized tag name to component
pub struct ClassMap<O> {
    components: HashMap<String, Component<O>>,
    fragment: Component<O>,
}

impl<O: 'static> ClassMap<O> {
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
            fragment: Component::fragment(),
        }
    }

    /// Register a component function, builder style
    pub fn with<F>(mut self, name: &str, render: F) -> Self
    where
        F: Fn(Props<O>) -> Result<Rendered<O>> + 'static,
    {
        self.insert(name, render);
        self
    }

    /// Register a component function
    pub fn insert<F>(&mut self, name: &str, render: F)
    where
        F: Fn(Props<O>) -> Result<Rendered<O>> + 'static,
    {
        self.insert_component(Component::new(name, render));
    }

    /// Register an existing component under its own name
    pub fn insert_component(&mut self, component: Component<O>) {
        self.components.insert(component.name().to_string(), component);
    }

    /// Registered component
    pub fn get(&self, name: &str) -> Option<&Component<O>> {
        self.components.get(name)
    }

    /// Resolve a tag: registered components first, then built-ins
    pub fn resolve(&self, name: &str) -> Option<Component<O>> {
        match self.components.get(name) {
            Some(component) => Some(component.clone()),
            None if name == FRAGMENT_TAG => Some(self.fragment.clone()),
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl<O: 'static> Default for ClassMap<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> Clone for ClassMap<O> {
    fn clone(&self) -> Self {
        Self {
            components: self.components.clone(),
            fragment: self.fragment.clone(),
        }
    }
}

impl<O> fmt::Debug for ClassMap<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.components.keys()).finish()
    }
}
