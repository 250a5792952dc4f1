//! fOS DOM - Owned node graph
//!
//! Nodes own their children, so a rendered tree can be moved between
//! futures, returned from components and spliced into a parent.

mod node;
mod operations;
mod serializer;

pub use node::{Attribute, ElementData, Node, NodeType};
pub use operations::{DomError, DomResult};
pub use serializer::{HtmlSerializer, VOID_ELEMENTS, is_void_element};
