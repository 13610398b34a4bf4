//! Formatting-preserving node replacement.
//!
//! A splice swaps a subtree for its replacement while carrying over the
//! original's surrounding trivia, so a rewrite changes only the code it
//! means to change and the rest of the file prints byte-for-byte as it
//! was.

use mend_tree::Node;

/// Returns `replacement` wearing `original`'s leading and trailing
/// trivia.
///
/// The replacement's own trivia is discarded in favour of whatever
/// surrounded the original, comments included. When the original carried
/// no trivia on a side, the replacement's side is cleared rather than
/// left to leak template formatting into the output.
#[must_use]
pub fn replace(original: &Node, replacement: Node) -> Node {
    replacement
        .with_leading_trivia(original.leading_trivia())
        .with_trailing_trivia(original.trailing_trivia())
}

#[cfg(test)]
mod tests {
    use mend_tree::{NodeKind, SourceParser};
    use rstest::rstest;

    use super::*;

    fn parsed_call(source: &str) -> Node {
        let tree = mend_lang::Parser::new().parse(source).expect("parse");
        tree.find_first(NodeKind::MethodCall).expect("call").clone()
    }

    fn bare_replacement() -> Node {
        let tree = mend_lang::Parser::new()
            .parse("fun f(c: Char) { c.code }")
            .expect("parse");
        tree.find_first(NodeKind::PropertyAccess)
            .expect("access")
            .with_leading_trivia("")
            .with_trailing_trivia("")
    }

    #[rstest]
    #[case("fun f(c: Char) { c.toInt() }", " ")]
    #[case("fun f(c: Char) {\n    c.toInt() }", "\n    ")]
    #[case("fun f(c: Char) { /* keep */ c.toInt() }", " /* keep */ ")]
    fn replacement_wears_the_original_prefix(#[case] source: &str, #[case] prefix: &str) {
        let original = parsed_call(source);
        assert_eq!(original.leading_trivia(), prefix);

        let spliced = replace(&original, bare_replacement());
        assert_eq!(spliced.leading_trivia(), prefix);
        assert_eq!(spliced.to_source(), format!("{prefix}c.code"));
    }

    #[test]
    fn trivia_free_original_strips_replacement_formatting() {
        let original = parsed_call("fun f(c: Char) { c.toInt() }").with_leading_trivia("");
        let formatted = bare_replacement().with_leading_trivia("   ");

        let spliced = replace(&original, formatted);
        assert_eq!(spliced.to_source(), "c.code");
    }

    #[test]
    fn splice_does_not_disturb_the_replacement_interior() {
        let original = parsed_call("fun f(c: Char) {  c.toInt() }");
        let replacement = bare_replacement();
        let interior = replacement
            .children()
            .get(1)
            .expect("dot token")
            .clone();

        let spliced = replace(&original, replacement);
        let spliced_interior = spliced.children().get(1).expect("dot token");
        assert!(interior.ptr_eq(spliced_interior));
    }
}
