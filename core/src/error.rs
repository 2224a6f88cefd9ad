//! Error types for command matching and tree construction.
//!
//! Every failure is local and deterministic: fix the input text or the
//! command configuration rather than retrying.

use thiserror::Error;

/// Errors raised while building, parsing or reading typed values.
#[derive(Debug, Error)]
pub enum CommandError {
    /// `parse` was called on text that does not satisfy `validate`.
    #[error("input does not satisfy command `{command}`: {input:?}")]
    InvalidInput {
        /// Command whose validation failed.
        command: String,
        /// The rejected text.
        input: String,
    },

    /// Two sibling commands share a name.
    #[error("duplicate command name in scope: {0}")]
    DuplicateCommandName(String),

    /// Typed retrieval was requested for a value kind with no coercion.
    #[error("unsupported value type `{kind}` for command `{command}`")]
    UnsupportedValueType {
        /// Command the value belongs to.
        command: String,
        /// The declared value kind tag.
        kind: String,
    },

    /// A stored raw string could not be parsed as its declared kind.
    #[error("cannot convert {raw:?} to {kind} for command `{command}`")]
    ValueCoercionFailure {
        /// Command the value belongs to.
        command: String,
        /// The declared value kind tag.
        kind: String,
        /// The raw matched text.
        raw: String,
    },

    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,

    /// The value pattern is not a valid regular expression.
    #[error("invalid value pattern for command `{command}`: {source}")]
    InvalidPattern {
        /// Command declaring the pattern.
        command: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// Typed lookup of a name that is not part of the tree.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

impl CommandError {
    pub(crate) fn invalid_input(command: &str, input: &str) -> Self {
        Self::InvalidInput {
            command: command.to_string(),
            input: input.to_string(),
        }
    }
}

/// Convenience alias for results with [`CommandError`].
pub type Result<T> = std::result::Result<T, CommandError>;
