//! Miniature Kotlin-flavoured front end for the `mend` rewrite toolkit.
//!
//! This crate is the reference implementation of the capability interfaces
//! in `mend-tree`: a trivia-preserving lexer and recursive-descent parser
//! that build lossless trees, a printer that re-emits them byte-for-byte,
//! and a resolver that annotates expressions with types from a small
//! builtin table.
//!
//! The language is deliberately tiny: files of `fun` declarations whose
//! bodies are expressions over identifiers, literals, method calls, and
//! property accesses. That is exactly enough surface to host rewrite
//! recipes such as replacing `c.toInt()` with `c.code`, while keeping the
//! grammar small enough to reason about in tests.
//!
//! # Example
//!
//! ```
//! use mend_lang::Parser;
//! use mend_tree::SourceParser;
//!
//! let parser = Parser::new();
//! let tree = parser.parse("fun method(c: Char) { c.toInt() }")?;
//! assert_eq!(tree.to_source(), "fun method(c: Char) { c.toInt() }");
//! # Ok::<(), mend_tree::ParseError>(())
//! ```

mod lexer;
mod parser;
mod printer;
mod resolver;

pub use parser::Parser;
pub use printer::Printer;
