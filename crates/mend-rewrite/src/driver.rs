//! Single-pass tree traversal applying a recipe.
//!
//! The driver walks a tree depth-first, testing each node before its
//! children. When the recipe claims a node, the node's children are
//! rewritten first (a match nested inside the receiver must not survive
//! the pass), the replacement is synthesized from the reconstituted call
//! and spliced in place, and the traversal moves on without descending
//! into the replacement, so a recipe whose output its own pattern cannot
//! match is idempotent by construction. Unchanged subtrees are shared
//! with the input tree rather than copied.

use tracing::debug;

use mend_tree::Node;

use crate::error::RewriteError;
use crate::recipe::{Context, Recipe};
use crate::splice;

/// The result of running a recipe over a tree.
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    root: Node,
    num_replacements: usize,
}

impl RewriteOutcome {
    /// Returns the resulting tree, which is the input tree when nothing
    /// matched.
    #[must_use]
    pub const fn root(&self) -> &Node {
        &self.root
    }

    /// Consumes the outcome and returns the resulting tree.
    #[must_use]
    pub fn into_root(self) -> Node {
        self.root
    }

    /// Returns how many nodes were replaced.
    #[must_use]
    pub const fn num_replacements(&self) -> usize {
        self.num_replacements
    }

    /// Returns whether the pass changed anything.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.num_replacements > 0
    }
}

/// Applies a recipe to whole trees.
pub struct Rewriter<'a> {
    context: Context<'a>,
}

impl<'a> Rewriter<'a> {
    /// Creates a rewriter over the given context.
    #[must_use]
    pub const fn new(context: Context<'a>) -> Self {
        Self { context }
    }

    /// Runs `recipe` over `root` in a single pass.
    ///
    /// # Errors
    ///
    /// Propagates the first [`RewriteError`] from the recipe's rewrite
    /// step; the traversal stops there and no partial tree is returned.
    pub fn apply(&self, recipe: &dyn Recipe, root: &Node) -> Result<RewriteOutcome, RewriteError> {
        let mut num_replacements = 0usize;
        let rewritten = self.rewrite_node(recipe, root, &mut num_replacements)?;
        if num_replacements > 0 {
            debug!(
                recipe = recipe.name(),
                replacements = num_replacements,
                "rewrite pass changed the tree"
            );
        }
        Ok(RewriteOutcome {
            root: rewritten,
            num_replacements,
        })
    }

    /// Runs each recipe in turn, feeding each the previous result.
    ///
    /// # Errors
    ///
    /// Stops at the first recipe that fails.
    pub fn apply_all(
        &self,
        recipes: &[&dyn Recipe],
        root: &Node,
    ) -> Result<RewriteOutcome, RewriteError> {
        let mut current = root.clone();
        let mut total = 0usize;
        for recipe in recipes {
            let outcome = self.apply(*recipe, &current)?;
            total = total.saturating_add(outcome.num_replacements());
            current = outcome.into_root();
        }
        Ok(RewriteOutcome {
            root: current,
            num_replacements: total,
        })
    }

    fn rewrite_node(
        &self,
        recipe: &dyn Recipe,
        node: &Node,
        num_replacements: &mut usize,
    ) -> Result<Node, RewriteError> {
        if recipe.matches(node) {
            // Settle the receiver first: matches nested inside it belong
            // to this pass, and the replacement must carry the rewritten
            // receiver rather than the original.
            let subject = self.rewrite_children(recipe, node, num_replacements)?;
            let replacement = recipe.rewrite(&subject, &self.context)?;
            *num_replacements = num_replacements.saturating_add(1);
            // No descent into the replacement: freshly synthesized code is
            // not rewritten again within this pass.
            return Ok(splice::replace(&subject, replacement));
        }
        self.rewrite_children(recipe, node, num_replacements)
    }

    fn rewrite_children(
        &self,
        recipe: &dyn Recipe,
        node: &Node,
        num_replacements: &mut usize,
    ) -> Result<Node, RewriteError> {
        let mut changed = false;
        let mut children = Vec::with_capacity(node.children().len());
        for child in node.children() {
            let rewritten = self.rewrite_node(recipe, child, num_replacements)?;
            if !rewritten.ptr_eq(child) {
                changed = true;
            }
            children.push(rewritten);
        }
        if changed {
            Ok(node.with_children(children))
        } else {
            Ok(node.clone())
        }
    }
}
