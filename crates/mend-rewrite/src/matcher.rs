//! Pattern evaluation against tree nodes.
//!
//! Matching is a pure predicate. Whatever node it is handed (a block, a
//! bare token, a call without a receiver) it answers `false` rather than
//! failing, so a traversal can test every node indiscriminately.

use mend_tree::{MethodSignature, Node, NodeKind, TypeRef};

use crate::pattern::{MethodPattern, ReceiverStrictness};

/// Evaluates `pattern` against `node`.
pub(crate) fn matches(pattern: &MethodPattern, node: &Node) -> bool {
    if node.kind() != NodeKind::MethodCall {
        return false;
    }
    // A pattern over instance methods requires an explicit receiver.
    let Some(receiver) = node.call_receiver() else {
        return false;
    };
    if node.call_name() != Some(pattern.method()) {
        return false;
    }
    // Without a resolved signature there is nothing to compare against.
    let Some(signature) = node.method_signature() else {
        return false;
    };
    if signature.name() != pattern.method() {
        return false;
    }
    if !parameters_match_exactly(signature, pattern) {
        return false;
    }
    if !arguments_match_declaration(node, signature) {
        return false;
    }
    receiver_matches(receiver, signature, pattern)
}

/// Declared arity and parameter types must equal the pattern's exactly;
/// no overload-resolution fuzziness.
fn parameters_match_exactly(signature: &MethodSignature, pattern: &MethodPattern) -> bool {
    signature.parameters().len() == pattern.parameters().len()
        && signature
            .parameters()
            .iter()
            .zip(pattern.parameters())
            .all(|(declared, expected)| declared.name() == expected.as_str())
}

/// Argument arity must equal the declared parameter count, and any
/// argument with a resolved type must carry exactly the declared
/// parameter type. Unresolved arguments are not held against the call.
fn arguments_match_declaration(node: &Node, signature: &MethodSignature) -> bool {
    let arguments = node.call_arguments();
    if arguments.len() != signature.parameters().len() {
        return false;
    }
    arguments
        .iter()
        .zip(signature.parameters())
        .all(|(argument, declared)| {
            expression_type(argument).is_none_or(|actual| actual.name() == declared.name())
        })
}

fn receiver_matches(
    receiver: &Node,
    signature: &MethodSignature,
    pattern: &MethodPattern,
) -> bool {
    let receiver_type = expression_type(receiver).unwrap_or_else(|| signature.owner());
    match pattern.strictness() {
        ReceiverStrictness::Exact => receiver_type.name() == pattern.owner(),
        ReceiverStrictness::Assignable => receiver_type.is_assignable_to(pattern.owner()),
    }
}

/// Resolves an expression's type from its own annotation, falling back to
/// the return type of a nested call.
fn expression_type(node: &Node) -> Option<&TypeRef> {
    node.type_ref()
        .or_else(|| node.method_signature().map(MethodSignature::return_type))
}
