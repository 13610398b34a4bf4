//! Capability interfaces between the rewrite core and a language front end.
//!
//! The core never constructs trees from raw text itself; it asks a
//! [`SourceParser`] to do so (template compilation is the only place this
//! happens) and hands finished trees to a [`SourcePrinter`]. Both traits
//! are object-safe so the core can run against a minimal fake in tests.

use crate::error::ParseError;
use crate::node::Node;

/// Parses source text into a lossless tree.
pub trait SourceParser {
    /// Parses `source` into a tree whose re-emission reproduces the input
    /// byte-for-byte.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the text violates the front end's
    /// grammar.
    fn parse(&self, source: &str) -> Result<Node, ParseError>;
}

/// Serialises a tree back to source text.
pub trait SourcePrinter {
    /// Prints `node` with its formatting metadata intact.
    fn print(&self, node: &Node) -> String;
}
