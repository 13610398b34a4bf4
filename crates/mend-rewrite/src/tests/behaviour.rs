//! Behaviour-driven development (BDD) step definitions for rewrite scenarios.

use std::cell::RefCell;

use mend_lang::{Parser, Printer};
use mend_tree::{Node, SourceParser, SourcePrinter};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::{Bindings, Context, MethodPattern, Recipe, RewriteError, Rewriter, TemplateStore};

// =============================================================================
// Test World
// =============================================================================

/// State shared across BDD steps.
#[derive(Default)]
struct TestWorld {
    /// Parsed source under rewrite.
    tree: Option<Node>,
    /// The recipe to apply.
    recipe: Option<CodePropertyRecipe>,
    /// Replacement count from the most recent pass.
    num_replacements: Option<usize>,
}

/// Step-level recipe: calls matching the configured signature become a
/// `.code` property access on the same receiver.
struct CodePropertyRecipe {
    pattern: MethodPattern,
}

impl Recipe for CodePropertyRecipe {
    fn name(&self) -> &str {
        "code-property"
    }

    fn display_name(&self) -> &str {
        "Replace call with code property"
    }

    fn description(&self) -> &str {
        "Replaces matching calls with the receiver's code property."
    }

    fn matches(&self, node: &Node) -> bool {
        self.pattern.matches(node)
    }

    fn rewrite(&self, node: &Node, context: &Context<'_>) -> Result<Node, RewriteError> {
        let receiver = node
            .call_receiver()
            .ok_or_else(|| RewriteError::rewrite("matched call has no receiver"))?;
        let template = context.template(
            "code-property",
            "fun subject(receiver: Char) { receiver.code }",
        )?;
        Ok(template.instantiate(&Bindings::new().bind("receiver", receiver.clone())))
    }
}

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}

/// Strips surrounding double quotes from a string if present.
fn strip_quotes(s: &str) -> &str {
    s.trim_matches('"')
}

fn apply_once(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let tree = w.tree.take().expect("source should be set before applying");
    let recipe = w.recipe.as_ref().expect("recipe should be set");

    let parser = Parser::new();
    let store = TemplateStore::new();
    let rewriter = Rewriter::new(Context::with_templates(&parser, &store));
    let outcome = rewriter.apply(recipe, &tree).expect("rewrite should apply");
    w.num_replacements = Some(outcome.num_replacements());
    w.tree = Some(outcome.into_root());
}

// =============================================================================
// Given Steps
// =============================================================================

#[given("source code {code}")]
fn given_source(world: &RefCell<TestWorld>, code: String) {
    let mut w = world.borrow_mut();
    let source = strip_quotes(&code);
    let tree = Parser::new().parse(source).expect("parse");
    w.tree = Some(tree);
}

#[given("a recipe replacing {signature} with the code property")]
fn given_recipe(world: &RefCell<TestWorld>, signature: String) {
    let mut w = world.borrow_mut();
    let pattern =
        MethodPattern::parse(strip_quotes(&signature)).expect("pattern should compile");
    w.recipe = Some(CodePropertyRecipe { pattern });
}

// =============================================================================
// When Steps
// =============================================================================

#[when("the recipe is applied")]
fn when_applied(world: &RefCell<TestWorld>) {
    apply_once(world);
}

#[when("the recipe is applied again")]
fn when_applied_again(world: &RefCell<TestWorld>) {
    apply_once(world);
}

// =============================================================================
// Then Steps
// =============================================================================

#[then("the output is {expected}")]
fn then_output_is(world: &RefCell<TestWorld>, expected: String) {
    let w = world.borrow();
    let tree = w.tree.as_ref().expect("rewrite result");
    let output = Printer::new().print(tree);
    assert_eq!(output, strip_quotes(&expected));
}

#[then("the rewrite made {count} replacement")]
fn then_replacement_count(world: &RefCell<TestWorld>, count: usize) {
    let w = world.borrow();
    assert_eq!(w.num_replacements, Some(count));
}

// =============================================================================
// Scenario Bindings
// =============================================================================

#[scenario(
    path = "tests/features/rewrite.feature",
    name = "Matching call is rewritten"
)]
fn matching_call_rewritten(world: RefCell<TestWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/rewrite.feature",
    name = "Non-matching receiver type is left alone"
)]
fn non_matching_untouched(world: RefCell<TestWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/rewrite.feature",
    name = "Applying the recipe twice changes nothing further"
)]
fn second_application_is_stable(world: RefCell<TestWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/rewrite.feature",
    name = "Comments around the call survive the rewrite"
)]
fn comments_survive(world: RefCell<TestWorld>) {
    let _ = world;
}
