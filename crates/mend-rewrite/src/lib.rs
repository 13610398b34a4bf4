//! Pattern-matching and tree-rewriting core.
//!
//! This crate turns a parsed source tree into a rewritten one in a
//! single deterministic pass. A [`Recipe`] pairs a [`MethodPattern`]
//! (what to match) with a template-driven rewrite (what to produce); the
//! [`Rewriter`] walks the tree, splices replacements in with the
//! original formatting preserved, and reports what changed in a
//! [`RewriteOutcome`].
//!
//! Templates are compiled once per key into a shared [`TemplateStore`]
//! and reused across passes. Matching is pure and infallible; rewriting
//! fails only on malformed recipe configuration, surfaced as
//! [`RewriteError`].

mod driver;
mod error;
mod matcher;
mod pattern;
mod recipe;
mod splice;
mod template;

pub use driver::{RewriteOutcome, Rewriter};
pub use error::RewriteError;
pub use pattern::{MethodPattern, ReceiverStrictness};
pub use recipe::{Context, Recipe};
pub use splice::replace;
pub use template::{Bindings, Template, TemplateStore};

#[cfg(test)]
mod tests;
