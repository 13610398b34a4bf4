//! Lossless source re-emission.

use mend_tree::{Node, SourcePrinter};

/// Printer for trees produced by [`Parser`](crate::Parser).
///
/// Printing is fully generic over the tree: every leaf carries its lexeme
/// and every node its trivia, so emission is a straight concatenation and
/// parse-then-print is the identity.
#[derive(Debug, Default, Clone, Copy)]
pub struct Printer;

impl Printer {
    /// Creates a printer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SourcePrinter for Printer {
    fn print(&self, node: &Node) -> String {
        node.to_source()
    }
}
