//! Template errors

use fos_html::ParseError;

/// Result type for template compilation and rendering
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error raised by a user component
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Template error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The markup could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Capitalized tag with no component registered under that name
    #[error("Couldn't find definition for \"{tag}\"")]
    UnresolvedComponent { tag: String },

    /// A reference points past the end of the substitution array
    #[error("Missing substitution {index} (only {len} provided)")]
    MissingSubstitution { index: usize, len: usize },

    /// A component failed, either immediately or while pending
    #[error("Component failed: {0}")]
    Component(#[source] BoxError),
}

impl Error {
    /// Wrap a component failure
    pub fn component(err: impl Into<BoxError>) -> Self {
        Self::Component(err.into())
    }
}
