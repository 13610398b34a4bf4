//! Replacement fragment synthesis with a compile-once template cache.
//!
//! A template is a small source snippet, a function wrapper used purely
//! as parseable context around a single replacement expression, e.g.
//! `fun subject(receiver: Char) { receiver.code }`. Compiling one means
//! parsing the snippet through the [`SourceParser`] capability and
//! extracting that inner expression.
//!
//! Compilation is deterministic for a fixed snippet and comparatively
//! expensive, so compiled templates live in a keyed [`TemplateStore`]:
//! the first request for a key parses, every later request reuses the
//! cached tree. The cache fill happens under the store lock, so
//! concurrent requests for the same key pay for exactly one parse and
//! observe a single node identity. The cached tree is never mutated;
//! [`Template::instantiate`] only reads it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::Lazy;
use tracing::debug;

use mend_tree::{Node, NodeKind, SourceParser};

use crate::error::RewriteError;

static GLOBAL_STORE: Lazy<TemplateStore> = Lazy::new(TemplateStore::new);

/// A compiled replacement template.
///
/// Holds a shared handle onto the cached replacement tree. Slots are
/// ordinary identifiers in the snippet; instantiation swaps them for
/// bound nodes.
#[derive(Debug, Clone)]
pub struct Template {
    key: String,
    replacement: Arc<Node>,
}

impl Template {
    /// Returns the key this template was compiled under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the compiled replacement tree.
    #[must_use]
    pub fn node(&self) -> &Node {
        &self.replacement
    }

    /// Returns whether two templates share the same cached tree.
    #[must_use]
    pub fn shares_node_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.replacement, &other.replacement)
    }

    /// Builds a fresh replacement tree by substituting `bindings` into
    /// this template's slots.
    ///
    /// Identifier leaves whose name matches a bound slot are replaced by
    /// the bound node wholesale, keeping the bound node's own formatting.
    /// The cached template tree is only read, never modified.
    #[must_use]
    pub fn instantiate(&self, bindings: &Bindings) -> Node {
        substitute(&self.replacement, bindings)
    }
}

/// Slot bindings supplied at rewrite time.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    slots: HashMap<String, Node>,
}

impl Bindings {
    /// Creates an empty set of bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `slot` bound to `node`.
    #[must_use]
    pub fn bind(mut self, slot: impl Into<String>, node: Node) -> Self {
        self.slots.insert(slot.into(), node);
        self
    }

    /// Returns the node bound to `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: &str) -> Option<&Node> {
        self.slots.get(slot)
    }
}

/// Keyed cache of compiled templates.
///
/// The process-wide instance behind [`TemplateStore::global`] is shared
/// by every rewrite pass; fresh instances can be constructed for
/// hermetic tests.
#[derive(Debug, Default)]
pub struct TemplateStore {
    cache: Mutex<HashMap<String, Arc<Node>>>,
}

impl TemplateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide store, created on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_STORE
    }

    /// Returns the compiled template for `key`, compiling `snippet` via
    /// `parser` on the first request.
    ///
    /// The compile happens while the store lock is held, so at most one
    /// caller parses a given key; concurrent callers block and then reuse
    /// the cached tree.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::TemplateParse`] when the snippet is not
    /// valid source and [`RewriteError::TemplateShape`] when it parses
    /// but contains no extractable replacement expression. Both indicate
    /// a bug in the recipe supplying the snippet.
    pub fn get_or_compile(
        &self,
        key: &str,
        snippet: &str,
        parser: &dyn SourceParser,
    ) -> Result<Template, RewriteError> {
        let mut cache = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = cache.get(key) {
            return Ok(Template {
                key: key.to_owned(),
                replacement: Arc::clone(cached),
            });
        }

        debug!(template = key, "compiling replacement template");
        let replacement = Arc::new(compile(key, snippet, parser)?);
        cache.insert(key.to_owned(), Arc::clone(&replacement));
        Ok(Template {
            key: key.to_owned(),
            replacement,
        })
    }

    /// Returns whether `key` has been compiled into this store.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }
}

/// Parses the snippet and extracts the replacement expression: the first
/// expression inside the first function's body.
fn compile(key: &str, snippet: &str, parser: &dyn SourceParser) -> Result<Node, RewriteError> {
    let root = parser
        .parse(snippet)
        .map_err(|source| RewriteError::template_parse(key, source))?;
    let body = root
        .find_first(NodeKind::FunctionDecl)
        .and_then(|function| function.find_first(NodeKind::Block))
        .ok_or_else(|| {
            RewriteError::template_shape(key, "snippet must wrap the expression in a function body")
        })?;
    let expression = body
        .children()
        .iter()
        .find(|child| child.kind() != NodeKind::Token)
        .ok_or_else(|| {
            RewriteError::template_shape(key, "function body contains no replacement expression")
        })?;
    // Strip the wrapper's incidental whitespace; the splice decides the
    // final prefix.
    Ok(expression.with_leading_trivia("").with_trailing_trivia(""))
}

fn substitute(node: &Node, bindings: &Bindings) -> Node {
    if node.kind() == NodeKind::Identifier {
        if let Some(bound) = node.text().and_then(|name| bindings.get(name)) {
            return bound.clone();
        }
    }
    if node.children().is_empty() {
        return node.clone();
    }
    let children = node
        .children()
        .iter()
        .map(|child| substitute(child, bindings))
        .collect();
    node.with_children(children)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use mend_tree::ParseError;

    use super::*;

    const SNIPPET: &str = "fun subject(receiver: Char) { receiver.code }";

    struct CountingParser {
        inner: mend_lang::Parser,
        calls: AtomicUsize,
    }

    impl CountingParser {
        fn new() -> Self {
            Self {
                inner: mend_lang::Parser::new(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl SourceParser for CountingParser {
        fn parse(&self, source: &str) -> Result<Node, ParseError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.parse(source)
        }
    }

    #[test]
    fn compiles_once_and_reuses_the_cached_tree() {
        let store = TemplateStore::new();
        let parser = CountingParser::new();

        let first = store
            .get_or_compile("char-code", SNIPPET, &parser)
            .expect("compile");
        let second = store
            .get_or_compile("char-code", SNIPPET, &parser)
            .expect("lookup");

        assert_eq!(parser.calls.load(Ordering::SeqCst), 1);
        assert!(first.shares_node_with(&second));
        assert!(store.contains("char-code"));
    }

    #[test]
    fn concurrent_requests_pay_for_one_parse() {
        let store = TemplateStore::new();
        let parser = CountingParser::new();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    store
                        .get_or_compile("char-code", SNIPPET, &parser)
                        .expect("compile");
                });
            }
        });

        assert_eq!(parser.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn instantiations_share_the_template_but_not_results() {
        let store = TemplateStore::new();
        let parser = CountingParser::new();
        let template = store
            .get_or_compile("char-code", SNIPPET, &parser)
            .expect("compile");

        let first = template.instantiate(
            &Bindings::new().bind("receiver", Node::leaf(NodeKind::Identifier, "a")),
        );
        let second = template.instantiate(
            &Bindings::new().bind("receiver", Node::leaf(NodeKind::Identifier, "b")),
        );

        assert_eq!(parser.calls.load(Ordering::SeqCst), 1);
        assert_ne!(first, second);
        assert_eq!(first.to_source(), "a.code");
        assert_eq!(second.to_source(), "b.code");
    }

    #[test]
    fn instantiate_leaves_the_cached_tree_untouched() {
        let store = TemplateStore::new();
        let parser = CountingParser::new();
        let template = store
            .get_or_compile("char-code", SNIPPET, &parser)
            .expect("compile");

        let before = template.node().to_source();
        let instantiated = template.instantiate(
            &Bindings::new().bind("receiver", Node::leaf(NodeKind::Identifier, "x")),
        );
        assert_eq!(instantiated.to_source(), "x.code");
        assert_eq!(template.node().to_source(), before);
    }

    #[test]
    fn malformed_snippet_fails_loudly_at_first_use() {
        let store = TemplateStore::new();
        let parser = CountingParser::new();

        let error = store
            .get_or_compile("broken", "fun subject( {", &parser)
            .expect_err("should fail");
        assert!(matches!(error, RewriteError::TemplateParse { .. }));
        // A failed compile is not cached as success.
        assert!(!store.contains("broken"));
    }

    #[test]
    fn snippet_without_expression_is_a_shape_error() {
        let store = TemplateStore::new();
        let parser = CountingParser::new();

        let error = store
            .get_or_compile("empty", "fun subject() {}", &parser)
            .expect_err("should fail");
        assert!(matches!(error, RewriteError::TemplateShape { .. }));
    }
}
