//! Method pattern compilation.
//!
//! A [`MethodPattern`] is the declarative "what to match" half of a
//! recipe: a method signature in `owner name(param, ...)` form, e.g.
//! `kotlin.Char toInt()`. Patterns are compiled once at recipe
//! construction time and are stateless thereafter; the same pattern can
//! be evaluated against any number of nodes from any number of trees.

use std::fmt;

use mend_tree::Node;

use crate::error::RewriteError;
use crate::matcher;

/// How a candidate receiver type is compared with the pattern's owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReceiverStrictness {
    /// The receiver type must name the owner exactly. This is the
    /// default: with overloads sharing a name, fuzzier matching invites
    /// false positives.
    #[default]
    Exact,
    /// The receiver type may be the owner or any recorded supertype of
    /// the receiver.
    Assignable,
}

/// A compiled method signature pattern.
///
/// Matching policy: exact method-name equality, exact argument arity and
/// parameter types, and a receiver whose type satisfies the configured
/// [`ReceiverStrictness`] against the owner. Calls without an explicit
/// receiver never match, and evaluation is safe on every node kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodPattern {
    owner: String,
    method: String,
    parameters: Vec<String>,
    strictness: ReceiverStrictness,
}

impl MethodPattern {
    /// Compiles a pattern from `owner name(param, ...)` signature syntax.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::InvalidPattern`] when the signature is not
    /// of the form `owner name(params)` with non-empty owner and name.
    ///
    /// # Examples
    ///
    /// ```
    /// use mend_rewrite::MethodPattern;
    ///
    /// let pattern = MethodPattern::parse("kotlin.Char toInt()")?;
    /// assert_eq!(pattern.owner(), "kotlin.Char");
    /// assert_eq!(pattern.method(), "toInt");
    /// assert!(pattern.parameters().is_empty());
    /// # Ok::<(), mend_rewrite::RewriteError>(())
    /// ```
    pub fn parse(signature: &str) -> Result<Self, RewriteError> {
        let trimmed = signature.trim();
        let Some((owner, rest)) = trimmed.split_once(char::is_whitespace) else {
            return Err(RewriteError::invalid_pattern(
                signature,
                "expected 'owner name(params)' with a space after the owner type",
            ));
        };
        let Some((method, parenthesised)) = rest.trim_start().split_once('(') else {
            return Err(RewriteError::invalid_pattern(
                signature,
                "missing parameter list",
            ));
        };
        let Some(parameter_text) = parenthesised.strip_suffix(')') else {
            return Err(RewriteError::invalid_pattern(
                signature,
                "parameter list is not closed with ')'",
            ));
        };
        if owner.is_empty() || method.is_empty() {
            return Err(RewriteError::invalid_pattern(
                signature,
                "owner and method name must be non-empty",
            ));
        }

        let parameters = if parameter_text.trim().is_empty() {
            Vec::new()
        } else {
            let mut parameters = Vec::new();
            for entry in parameter_text.split(',') {
                let trimmed_entry = entry.trim();
                if trimmed_entry.is_empty() {
                    return Err(RewriteError::invalid_pattern(
                        signature,
                        "empty parameter type in list",
                    ));
                }
                parameters.push(trimmed_entry.to_owned());
            }
            parameters
        };

        Ok(Self {
            owner: owner.to_owned(),
            method: method.to_owned(),
            parameters,
            strictness: ReceiverStrictness::default(),
        })
    }

    /// Returns a copy with the given receiver strictness.
    #[must_use]
    pub fn with_strictness(mut self, strictness: ReceiverStrictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Returns the declared owner type name.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the method name.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the declared parameter type names.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Returns the configured receiver strictness.
    #[must_use]
    pub const fn strictness(&self) -> ReceiverStrictness {
        self.strictness
    }

    /// Evaluates this pattern against a node.
    ///
    /// Pure and total: returns `false` for non-call kinds, receiver-less
    /// calls, and unannotated nodes, and never panics.
    #[must_use]
    pub fn matches(&self, node: &Node) -> bool {
        matcher::matches(self, node)
    }
}

impl fmt::Display for MethodPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}({})", self.owner, self.method, self.parameters.join(", "))
    }
}
