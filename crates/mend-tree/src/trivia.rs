//! Formatting metadata carried by tree nodes.

/// Whitespace and comments attached to a node.
///
/// `leading` holds everything between the previous token and this node in
/// source order (indentation, blank lines, comments); `trailing` holds
/// markers that follow it without belonging to the next node. Trivia is
/// opaque to the rewrite core: it is transplanted and re-emitted, never
/// interpreted.
///
/// Trivia does not participate in the structural equality of
/// [`Node`](crate::Node): two nodes that differ only in formatting are
/// semantically interchangeable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trivia {
    leading: String,
    trailing: String,
}

impl Trivia {
    /// Creates trivia with the given leading and trailing text.
    #[must_use]
    pub fn new(leading: impl Into<String>, trailing: impl Into<String>) -> Self {
        Self {
            leading: leading.into(),
            trailing: trailing.into(),
        }
    }

    /// Creates trivia with only leading text.
    #[must_use]
    pub fn leading_only(leading: impl Into<String>) -> Self {
        Self {
            leading: leading.into(),
            trailing: String::new(),
        }
    }

    /// Returns the leading text.
    #[must_use]
    pub fn leading(&self) -> &str {
        &self.leading
    }

    /// Returns the trailing text.
    #[must_use]
    pub fn trailing(&self) -> &str {
        &self.trailing
    }

    /// Returns whether both sides are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty()
    }

    /// Returns a copy with the leading text replaced.
    #[must_use]
    pub fn with_leading(&self, leading: impl Into<String>) -> Self {
        Self {
            leading: leading.into(),
            trailing: self.trailing.clone(),
        }
    }

    /// Returns a copy with the trailing text replaced.
    #[must_use]
    pub fn with_trailing(&self, trailing: impl Into<String>) -> Self {
        Self {
            leading: self.leading.clone(),
            trailing: trailing.into(),
        }
    }
}
