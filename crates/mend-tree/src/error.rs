//! Error types for the parsing capability boundary.

use thiserror::Error;

/// Errors produced by a [`SourceParser`](crate::SourceParser)
/// implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// The source text violates the language grammar.
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        /// One-based line of the offending text.
        line: u32,
        /// One-based column of the offending text.
        column: u32,
        /// Description of the problem.
        message: String,
    },

    /// The source ended while a construct was still open.
    #[error("unexpected end of input: {message}")]
    UnexpectedEof {
        /// Description of the unfinished construct.
        message: String,
    },
}

impl ParseError {
    /// Creates a syntax error at the given one-based position.
    #[must_use]
    pub fn syntax(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    /// Creates an unexpected end-of-input error.
    #[must_use]
    pub fn unexpected_eof(message: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            message: message.into(),
        }
    }
}
