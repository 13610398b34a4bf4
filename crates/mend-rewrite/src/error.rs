//! Error types for pattern compilation, template synthesis, and rewriting.

use mend_tree::ParseError;
use thiserror::Error;

/// Errors from the rewrite core.
///
/// Matching is infallible by design: a pattern evaluated against an
/// incompatible node is simply "no match". Errors arise only from
/// malformed configuration (pattern signatures, template snippets), which
/// indicates a bug in a recipe author's code and is surfaced loudly at
/// first use rather than swallowed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RewriteError {
    /// A method pattern signature could not be parsed.
    #[error("invalid method pattern '{signature}': {message}")]
    InvalidPattern {
        /// The offending signature text.
        signature: String,
        /// Description of the problem.
        message: String,
    },

    /// A template snippet failed to parse. Fatal: the snippet is part of
    /// the recipe's own source, not user input.
    #[error("template '{key}' failed to parse: {source}")]
    TemplateParse {
        /// The template key being compiled.
        key: String,
        /// The underlying parse failure.
        source: ParseError,
    },

    /// A template snippet parsed but does not contain an extractable
    /// replacement expression.
    #[error("template '{key}' has an unusable shape: {message}")]
    TemplateShape {
        /// The template key being compiled.
        key: String,
        /// Description of the problem.
        message: String,
    },

    /// A recipe's rewrite step could not produce a replacement for a node
    /// its own pattern matched.
    #[error("rewrite failed: {message}")]
    Rewrite {
        /// Description of the failure.
        message: String,
    },
}

impl RewriteError {
    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(signature: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            signature: signature.into(),
            message: message.into(),
        }
    }

    /// Creates a template parse error.
    #[must_use]
    pub fn template_parse(key: impl Into<String>, source: ParseError) -> Self {
        Self::TemplateParse {
            key: key.into(),
            source,
        }
    }

    /// Creates a template shape error.
    #[must_use]
    pub fn template_shape(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TemplateShape {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a rewrite failure.
    #[must_use]
    pub fn rewrite(message: impl Into<String>) -> Self {
        Self::Rewrite {
            message: message.into(),
        }
    }
}
