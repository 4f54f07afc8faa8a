//! Error types for parsing, filtering and patching.

/// Result type alias for nest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compiling or applying nested rules.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structural syntax error, such as an unbalanced brace.
    #[error("Syntax error at offset {offset}: {message}")]
    Syntax { message: String, offset: usize },

    /// A block header that is neither an at-rule, a selector nor a property segment.
    #[error("Illegal selector '{selector}': {message}")]
    IllegalSelector { selector: String, message: String },

    /// Malformed filter or query argument.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// An argument of the wrong shape was passed to a filter or setter constructor.
    #[error("Invalid '{argument}' argument: {message}")]
    Type { argument: String, message: String },

    /// A generated regular expression failed to compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Create a syntax error at an offset of the normalized input.
    pub fn syntax(message: impl Into<String>, offset: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            offset,
        }
    }

    /// Create an illegal selector error.
    pub fn illegal_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::IllegalSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Create an invalid query error.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery(message.into())
    }

    /// Create a type error for the named argument.
    pub fn type_error(argument: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Type {
            argument: argument.into(),
            message: message.into(),
        }
    }

    /// Returns true for errors caused by malformed DSL or query text.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Self::Syntax { .. } | Self::IllegalSelector { .. } | Self::InvalidQuery(_) | Self::Regex(_)
        )
    }

    /// Returns true for errors caused by arguments of the wrong shape.
    pub fn is_type(&self) -> bool {
        matches!(self, Self::Type { .. })
    }
}
