use thiserror::Error;

/// Engine-wide error types. Matcher misses are not errors: a matcher that
/// cannot see type information evaluates false and the node is left alone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecastError {
    /// Required recipe configuration is absent or malformed. Raised at
    /// construction; no traversal is attempted.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A template snippet did not parse as the expected fragment kind.
    /// Raised at compile time; recipes compile templates eagerly so this
    /// surfaces at construction, never mid-traversal.
    #[error("Template syntax error in `{snippet}`: {message}")]
    TemplateSyntax { snippet: String, message: String },

    /// An applicator's expected anchor is absent on the concrete node.
    /// A well-formed visitor checks its preconditions before applying, so
    /// this is a programmer error, fatal to the traversal.
    #[error("Coordinate mismatch at {coordinate}: {message}")]
    CoordinateMismatch { coordinate: String, message: String },

    /// A placeholder substitution received the wrong number or kind of
    /// values. Programmer error, fatal to the traversal.
    #[error("Placeholder mismatch: expected {expected}, got {actual}")]
    Placeholder { expected: String, actual: String },
}

impl RecastError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a template syntax error for a snippet
    pub fn template_syntax(snippet: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TemplateSyntax {
            snippet: snippet.into(),
            message: message.into(),
        }
    }

    /// Create a coordinate mismatch error
    pub fn coordinate_mismatch(coordinate: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CoordinateMismatch {
            coordinate: coordinate.into(),
            message: message.into(),
        }
    }

    /// Create a placeholder mismatch error
    pub fn placeholder(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::Placeholder {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
