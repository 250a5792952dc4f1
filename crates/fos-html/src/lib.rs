//! fOS Markup Parser
//!
//! XML-style markup parser built on quick-xml.
//! Produces owned `fos_dom` nodes and reports structural errors
//! instead of repairing them.

mod parser;

pub use fos_dom::Node;
pub use parser::XmlParser;

/// Parse a markup string into its top-level nodes
pub fn parse(markup: &str) -> Result<Vec<Node>, ParseError> {
    XmlParser::new().parse_fragment(markup)
}

/// Parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unexpected token at byte {position}: {message}")]
    UnexpectedToken { position: u64, message: String },

    #[error("Mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEndTag { expected: String, found: String },

    #[error("Unexpected end tag: </{tag}>")]
    UnexpectedEndTag { tag: String },

    #[error("Unclosed tag: <{tag}>")]
    UnclosedTag { tag: String },
}
