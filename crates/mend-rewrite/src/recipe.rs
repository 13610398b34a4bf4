//! The recipe abstraction and the context a rewrite runs in.

use mend_tree::{Node, SourceParser};

use crate::error::RewriteError;
use crate::template::{Template, TemplateStore};

/// Shared services available to a recipe during a rewrite pass.
///
/// Bundles the parser capability used for template snippets with the
/// template cache. The default context uses the process-wide store, so
/// every pass in the process shares compiled templates; tests substitute
/// a fresh store to stay hermetic.
pub struct Context<'a> {
    parser: &'a dyn SourceParser,
    templates: &'a TemplateStore,
}

impl<'a> Context<'a> {
    /// Creates a context over the process-wide template store.
    #[must_use]
    pub fn new(parser: &'a dyn SourceParser) -> Self {
        Self {
            parser,
            templates: TemplateStore::global(),
        }
    }

    /// Creates a context over a caller-supplied template store.
    #[must_use]
    pub const fn with_templates(parser: &'a dyn SourceParser, templates: &'a TemplateStore) -> Self {
        Self { parser, templates }
    }

    /// Returns the parser capability.
    #[must_use]
    pub const fn parser(&self) -> &'a dyn SourceParser {
        self.parser
    }

    /// Returns the compiled template for `key`, compiling `snippet` on
    /// first use.
    ///
    /// # Errors
    ///
    /// Propagates template compilation failures from the store.
    pub fn template(&self, key: &str, snippet: &str) -> Result<Template, RewriteError> {
        self.templates.get_or_compile(key, snippet, self.parser)
    }
}

/// A single self-contained transformation.
///
/// A recipe pairs a matching predicate with a rewrite step. The driver
/// asks [`Recipe::matches`] about every node it visits and calls
/// [`Recipe::rewrite`] only for nodes the recipe claimed; the rewrite
/// must therefore succeed for any node its own pattern accepts.
pub trait Recipe {
    /// A short stable name, used to select the recipe on the command line.
    fn name(&self) -> &str;

    /// A human-readable display name.
    fn display_name(&self) -> &str;

    /// A sentence or two describing what the recipe does, including any
    /// caveats about when the result is safe to apply.
    fn description(&self) -> &str;

    /// Returns whether this recipe wants to rewrite `node`.
    fn matches(&self, node: &Node) -> bool;

    /// Produces the replacement for a node that [`Recipe::matches`]
    /// accepted. The replacement is returned bare; the driver splices it
    /// into place with the original's formatting.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError`] when the replacement cannot be built,
    /// which for a well-formed recipe indicates a template bug.
    fn rewrite(&self, node: &Node, context: &Context<'_>) -> Result<Node, RewriteError>;
}
