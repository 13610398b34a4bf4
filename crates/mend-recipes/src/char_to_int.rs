//! Replacement of the deprecated `Char.toInt()` call with `Char.code`.

use mend_rewrite::{Bindings, Context, MethodPattern, Recipe, RewriteError};
use mend_tree::Node;

const TEMPLATE_KEY: &str = "char-to-int-with-code";
const TEMPLATE_SNIPPET: &str = "fun subject(receiver: Char) { receiver.code }";

/// Rewrites `Char.toInt()` calls to the `Char.code` property.
///
/// Only calls whose receiver resolves to exactly `kotlin.Char` are
/// touched; calls on other types that happen to share the `toInt` name
/// are left alone. The replacement keeps the call's receiver expression
/// and surrounding formatting verbatim.
pub struct ReplaceCharToIntWithCode {
    pattern: MethodPattern,
}

impl ReplaceCharToIntWithCode {
    /// Creates the recipe.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::InvalidPattern`] only if the built-in
    /// signature were malformed, which would be a defect in this crate.
    pub fn new() -> Result<Self, RewriteError> {
        Ok(Self {
            pattern: MethodPattern::parse("kotlin.Char toInt()")?,
        })
    }
}

impl Recipe for ReplaceCharToIntWithCode {
    fn name(&self) -> &str {
        "replace-char-to-int-with-code"
    }

    fn display_name(&self) -> &str {
        "Replace Char.toInt() with Char.code"
    }

    fn description(&self) -> &str {
        "Replaces usage of the deprecated Char.toInt() with Char.code. \
         The Char.code property requires Kotlin 1.5 or later; no version \
         check is performed before rewriting."
    }

    fn matches(&self, node: &Node) -> bool {
        self.pattern.matches(node)
    }

    fn rewrite(&self, node: &Node, context: &Context<'_>) -> Result<Node, RewriteError> {
        let receiver = node
            .call_receiver()
            .ok_or_else(|| RewriteError::rewrite("matched toInt call has no receiver"))?;
        let template = context.template(TEMPLATE_KEY, TEMPLATE_SNIPPET)?;
        Ok(template.instantiate(&Bindings::new().bind("receiver", receiver.clone())))
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use mend_lang::{Parser, Printer};
    use mend_rewrite::{Rewriter, TemplateStore};
    use mend_tree::{SourceParser, SourcePrinter};
    use rstest::rstest;

    use super::*;

    fn apply(source: &str) -> (String, usize) {
        let parser = Parser::new();
        let store = TemplateStore::new();
        let rewriter = Rewriter::new(Context::with_templates(&parser, &store));
        let recipe = ReplaceCharToIntWithCode::new().expect("recipe");
        let root = parser.parse(source).expect("parse");
        let outcome = rewriter.apply(&recipe, &root).expect("rewrite");
        let count = outcome.num_replacements();
        (Printer::new().print(outcome.root()), count)
    }

    #[rstest]
    #[case("fun f(c: Char) { c.toInt() }", "fun f(c: Char) { c.code }")]
    #[case(
        "fun f(n: Int) { n.toChar().toInt() }",
        "fun f(n: Int) { n.toChar().code }"
    )]
    #[case(
        "fun f(a: Char, b: Char) { a.toInt() b.toInt() }",
        "fun f(a: Char, b: Char) { a.code b.code }"
    )]
    fn rewrites_char_to_int_calls(#[case] source: &str, #[case] expected: &str) {
        let (output, _) = apply(source);
        assert_eq!(output, expected);
    }

    #[rstest]
    #[case("fun f(s: String) { s.toInt() }")]
    #[case("fun f(c: Char) { c.code }")]
    #[case("fun f() { toInt() }")]
    #[case("fun f(x: Mystery) { x.toInt() }")]
    fn leaves_other_code_untouched(#[case] source: &str) {
        let (output, count) = apply(source);
        assert_eq!(output, source);
        assert_eq!(count, 0);
    }

    #[test]
    fn preserves_indentation_and_comments() {
        let (output, count) = apply(
            "fun f(c: Char) {\n    // keep this comment\n    c.toInt()\n}\n",
        );
        assert_eq!(
            output,
            "fun f(c: Char) {\n    // keep this comment\n    c.code\n}\n"
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn rewriting_the_output_again_is_stable() {
        let (first, first_count) = apply("fun f(c: Char) { c.toInt() }");
        assert_eq!(first_count, 1);
        let (second, second_count) = apply(&first);
        assert_eq!(second, first);
        assert_eq!(second_count, 0);
    }

    #[test]
    fn single_line_rewrite_snapshot() {
        let (output, _) = apply("fun f(c: Char) { c.toInt() }");
        assert_snapshot!(output, @"fun f(c: Char) { c.code }");
    }

    #[test]
    fn description_mentions_the_version_caveat() {
        let recipe = ReplaceCharToIntWithCode::new().expect("recipe");
        assert!(recipe.description().contains("Kotlin 1.5"));
    }
}
