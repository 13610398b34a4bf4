//! Lossless syntax tree model for the `mend` rewrite toolkit.
//!
//! This crate provides the data model that the matcher, template, and
//! traversal machinery in `mend-rewrite` operate on:
//!
//! - **Nodes** via [`Node`]: immutable, reference-counted syntax elements
//!   that carry their original formatting ([`Trivia`]) so a tree can be
//!   re-emitted byte-for-byte
//! - **Semantic annotations** via [`TypeRef`] and [`MethodSignature`],
//!   attached by a front end's type resolver
//! - **Capability interfaces** via [`SourceParser`] and [`SourcePrinter`],
//!   the narrow boundary between the rewrite core and a language front end
//!
//! # Immutability
//!
//! A [`Node`] is never modified in place. Every `with_*` method returns a
//! new node that shares unmodified substructure with the original, so
//! "editing" a tree builds a new parent chain up to the root while leaving
//! untouched branches aliased. [`Node::ptr_eq`] exposes that sharing.
//!
//! # Formatting metadata
//!
//! Composite nodes normally carry empty [`Trivia`]; the whitespace and
//! comments surrounding a construct belong to its first and last leaf
//! tokens. [`Node::leading_trivia`] and [`Node::with_leading_trivia`]
//! resolve through to the owning leaf, which is what lets a splice
//! transplant the prefix of one subtree onto another without touching
//! siblings.
//!
//! # Example
//!
//! ```
//! use mend_tree::{Node, NodeKind};
//!
//! let receiver = Node::leaf(NodeKind::Identifier, "myChar");
//! let access = Node::inner(
//!     NodeKind::PropertyAccess,
//!     vec![receiver, Node::token("."), Node::leaf(NodeKind::Identifier, "code")],
//! );
//! assert_eq!(access.to_source(), "myChar.code");
//! ```

mod error;
mod kind;
mod node;
mod source;
mod trivia;
mod types;

pub use error::ParseError;
pub use kind::NodeKind;
pub use node::Node;
pub use source::{SourceParser, SourcePrinter};
pub use trivia::Trivia;
pub use types::{Annotation, MethodSignature, TypeRef};
