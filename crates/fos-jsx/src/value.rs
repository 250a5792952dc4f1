//! Substitution values and component props

use std::fmt;

use indexmap::IndexMap;

/// A runtime value filling one substitution slot
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Renders as nothing
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Already-rendered DOM content, e.g. children forwarded by a component
    Node(fos_dom::Node),
}

impl Value {
    /// String contents, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// DOM node, if this is a node
    pub fn as_node(&self) -> Option<&fos_dom::Node> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }
}

/// String form used by text rendering and attributes
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
            Self::Node(node) => f.write_str(&node.outer_html()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<fos_dom::Node> for Value {
    fn from(node: fos_dom::Node) -> Self {
        Self::Node(node)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Props passed to a component
///
/// Attribute values are always resolved to strings. An attribute that is
/// exactly one substitution also keeps the substituted value itself, so a
/// component can receive a node or number untouched.
#[derive(Debug, Clone)]
pub struct Props<O> {
    attributes: IndexMap<String, String>,
    values: IndexMap<String, Value>,
    children: O,
}

impl<O> Props<O> {
    /// Props with no attributes
    pub fn new(children: O) -> Self {
        Self {
            attributes: IndexMap::new(),
            values: IndexMap::new(),
            children,
        }
    }

    pub(crate) fn from_parts(
        attributes: Vec<(String, String)>,
        values: Vec<(String, Value)>,
        children: O,
    ) -> Self {
        Self {
            attributes: attributes.into_iter().collect(),
            values: values.into_iter().collect(),
            children,
        }
    }

    /// Add a string attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Resolved attribute
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Raw value of a single-substitution attribute
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Attributes in source order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Rendered children
    pub fn children(&self) -> &O {
        &self.children
    }

    pub fn into_children(self) -> O {
        self.children
    }
}
