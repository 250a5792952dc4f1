//! DOM Node Operations
//!
//! Errors raised by hierarchy-changing operations.

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Hierarchy error (e.g., appending to a text node)
    #[error("Hierarchy request error: {parent:?} nodes cannot have children")]
    HierarchyRequest { parent: crate::NodeType },
    /// Index out of range
    #[error("Node is not a child (index {index}, {len} children)")]
    NotAChild { index: usize, len: usize },
}
