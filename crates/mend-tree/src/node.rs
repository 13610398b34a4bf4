//! The immutable, reference-counted syntax node.

use std::sync::Arc;

use crate::kind::NodeKind;
use crate::trivia::Trivia;
use crate::types::{Annotation, MethodSignature, TypeRef};

/// One element of a parsed source tree.
///
/// A node is a value: cloning is a cheap reference-count bump, and every
/// `with_*` method returns a new node sharing unmodified substructure with
/// the original (path copying). Nodes are never mutated after
/// construction, which is what allows a template's compiled tree to be
/// cached process-wide and read from many rewrites concurrently.
///
/// Equality is structural: kind, leaf text, annotation, and children.
/// Formatting [`Trivia`] is deliberately excluded, so a reformatted node
/// still compares equal to the original.
#[derive(Debug, Clone)]
pub struct Node {
    data: Arc<NodeData>,
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    text: Option<String>,
    children: Vec<Node>,
    trivia: Trivia,
    annotation: Option<Annotation>,
}

impl Node {
    /// Creates a leaf node carrying lexeme text.
    #[must_use]
    pub fn leaf(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            data: Arc::new(NodeData {
                kind,
                text: Some(text.into()),
                children: Vec::new(),
                trivia: Trivia::default(),
                annotation: None,
            }),
        }
    }

    /// Creates a keyword or punctuation leaf.
    #[must_use]
    pub fn token(text: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Token, text)
    }

    /// Creates a composite node from ordered children.
    #[must_use]
    pub fn inner(kind: NodeKind, children: Vec<Self>) -> Self {
        Self {
            data: Arc::new(NodeData {
                kind,
                text: None,
                children,
                trivia: Trivia::default(),
                annotation: None,
            }),
        }
    }

    /// Returns the kind tag.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.data.kind
    }

    /// Returns the lexeme text for leaf nodes.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.data.text.as_deref()
    }

    /// Returns the ordered children.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.data.children
    }

    /// Returns the formatting metadata attached directly to this node.
    ///
    /// For composites this is usually empty; see [`Node::leading_trivia`]
    /// for the effective source-order prefix.
    #[must_use]
    pub fn trivia(&self) -> &Trivia {
        &self.data.trivia
    }

    /// Returns the semantic annotation, if the front end attached one.
    #[must_use]
    pub fn annotation(&self) -> Option<&Annotation> {
        self.data.annotation.as_ref()
    }

    /// Returns the resolved method signature of a call node, if known.
    #[must_use]
    pub fn method_signature(&self) -> Option<&MethodSignature> {
        self.annotation().and_then(Annotation::as_method)
    }

    /// Returns the resolved expression type, if known.
    #[must_use]
    pub fn type_ref(&self) -> Option<&TypeRef> {
        self.annotation().and_then(Annotation::as_type)
    }

    /// Returns whether two handles alias the same underlying node.
    ///
    /// Useful for asserting structural sharing after a path-copying
    /// update.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Returns a copy with the attached trivia replaced.
    #[must_use]
    pub fn with_trivia(&self, trivia: Trivia) -> Self {
        self.rebuild(|data| data.trivia = trivia)
    }

    /// Returns a copy with the children replaced.
    #[must_use]
    pub fn with_children(&self, children: Vec<Self>) -> Self {
        self.rebuild(|data| data.children = children)
    }

    /// Returns a copy with the annotation replaced.
    #[must_use]
    pub fn with_annotation(&self, annotation: Annotation) -> Self {
        self.rebuild(|data| data.annotation = Some(annotation))
    }

    /// Returns the effective leading trivia in source order.
    ///
    /// Resolves through composites to the first leaf, which owns the
    /// whitespace and comments that precede the construct.
    #[must_use]
    pub fn leading_trivia(&self) -> &str {
        self.data.children.first().map_or_else(
            || self.data.trivia.leading(),
            Self::leading_trivia,
        )
    }

    /// Returns the effective trailing trivia in source order.
    #[must_use]
    pub fn trailing_trivia(&self) -> &str {
        self.data.children.last().map_or_else(
            || self.data.trivia.trailing(),
            Self::trailing_trivia,
        )
    }

    /// Returns a copy with the effective leading trivia replaced.
    ///
    /// Rebuilds only the path from this node to its first leaf; all other
    /// substructure is shared with the original.
    #[must_use]
    pub fn with_leading_trivia(&self, leading: impl Into<String>) -> Self {
        self.replace_leading(&leading.into())
    }

    /// Returns a copy with the effective trailing trivia replaced.
    #[must_use]
    pub fn with_trailing_trivia(&self, trailing: impl Into<String>) -> Self {
        self.replace_trailing(&trailing.into())
    }

    /// Re-emits this subtree as source text, byte-for-byte.
    #[must_use]
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        self.write_source(&mut out);
        out
    }

    /// Returns the receiver expression of a call or property access.
    ///
    /// Absent for receiver-less call shapes and for every other node kind;
    /// never panics.
    #[must_use]
    pub fn call_receiver(&self) -> Option<&Self> {
        let expected = match self.kind() {
            NodeKind::MethodCall => 4,
            NodeKind::PropertyAccess => 3,
            _ => return None,
        };
        if self.children().len() == expected {
            self.children().first()
        } else {
            None
        }
    }

    /// Returns the invoked method or accessed property name.
    #[must_use]
    pub fn call_name(&self) -> Option<&str> {
        let name_node = match self.kind() {
            NodeKind::MethodCall => {
                // Children end with [..., name, argument_list].
                let index = self.children().len().checked_sub(2)?;
                self.children().get(index)
            }
            NodeKind::PropertyAccess => self.children().last(),
            _ => None,
        }?;
        if name_node.kind() == NodeKind::Identifier {
            name_node.text()
        } else {
            None
        }
    }

    /// Returns the argument expressions of a method call, skipping
    /// punctuation tokens.
    #[must_use]
    pub fn call_arguments(&self) -> Vec<&Self> {
        if self.kind() != NodeKind::MethodCall {
            return Vec::new();
        }
        self.children()
            .last()
            .filter(|list| list.kind() == NodeKind::ArgumentList)
            .map_or_else(Vec::new, |list| {
                list.children()
                    .iter()
                    .filter(|child| child.kind() != NodeKind::Token)
                    .collect()
            })
    }

    /// Finds the first descendant of the given kind in pre-order,
    /// including this node itself.
    #[must_use]
    pub fn find_first(&self, kind: NodeKind) -> Option<&Self> {
        if self.kind() == kind {
            return Some(self);
        }
        self.children()
            .iter()
            .find_map(|child| child.find_first(kind))
    }

    fn rebuild(&self, edit: impl FnOnce(&mut NodeData)) -> Self {
        let mut data = NodeData {
            kind: self.data.kind,
            text: self.data.text.clone(),
            children: self.data.children.clone(),
            trivia: self.data.trivia.clone(),
            annotation: self.data.annotation.clone(),
        };
        edit(&mut data);
        Self {
            data: Arc::new(data),
        }
    }

    fn replace_leading(&self, leading: &str) -> Self {
        if self.data.children.is_empty() {
            return self.with_trivia(self.data.trivia.with_leading(leading));
        }
        self.rebuild(|data| {
            if let Some(first) = data.children.first_mut() {
                *first = first.replace_leading(leading);
            }
        })
    }

    fn replace_trailing(&self, trailing: &str) -> Self {
        if self.data.children.is_empty() {
            return self.with_trivia(self.data.trivia.with_trailing(trailing));
        }
        self.rebuild(|data| {
            if let Some(last) = data.children.last_mut() {
                *last = last.replace_trailing(trailing);
            }
        })
    }

    fn write_source(&self, out: &mut String) {
        out.push_str(self.data.trivia.leading());
        if let Some(text) = &self.data.text {
            out.push_str(text);
        }
        for child in &self.data.children {
            child.write_source(out);
        }
        out.push_str(self.data.trivia.trailing());
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.data.kind == other.data.kind
            && self.data.text == other.data.text
            && self.data.annotation == other.data.annotation
            && self.data.children == other.data.children
    }
}

impl Eq for Node {}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn property_access(receiver: &str, name: &str) -> Node {
        Node::inner(
            NodeKind::PropertyAccess,
            vec![
                Node::leaf(NodeKind::Identifier, receiver),
                Node::token("."),
                Node::leaf(NodeKind::Identifier, name),
            ],
        )
    }

    fn zero_arg_call(receiver: &str, name: &str) -> Node {
        Node::inner(
            NodeKind::MethodCall,
            vec![
                Node::leaf(NodeKind::Identifier, receiver),
                Node::token("."),
                Node::leaf(NodeKind::Identifier, name),
                Node::inner(
                    NodeKind::ArgumentList,
                    vec![Node::token("("), Node::token(")")],
                ),
            ],
        )
    }

    #[test]
    fn to_source_concatenates_trivia_and_text() {
        let access = property_access("c", "code").with_leading_trivia("  ");
        assert_eq!(access.to_source(), "  c.code");
    }

    #[test]
    fn leading_trivia_resolves_to_first_leaf() {
        let access = property_access("c", "code").with_leading_trivia("/* hi */ ");
        assert_eq!(access.leading_trivia(), "/* hi */ ");
        // The trivia landed on the receiver leaf, not the composite.
        assert!(access.trivia().is_empty());
        let receiver = access.call_receiver().map(Node::leading_trivia);
        assert_eq!(receiver, Some("/* hi */ "));
    }

    #[test]
    fn with_leading_trivia_shares_untouched_children() {
        let original = zero_arg_call("c", "toInt");
        let updated = original.with_leading_trivia("\n    ");

        let original_args = original.children().last().cloned();
        let updated_args = updated.children().last().cloned();
        match (original_args, updated_args) {
            (Some(a), Some(b)) => assert!(a.ptr_eq(&b)),
            _ => panic!("call should have an argument list"),
        }
    }

    #[rstest]
    #[case::same_name_reformatted("code", true)]
    #[case::different_name("kode", false)]
    fn equality_ignores_trivia_but_observes_text(#[case] name: &str, #[case] equal: bool) {
        let formatted = property_access("c", name).with_leading_trivia("   ");
        assert_eq!(property_access("c", "code") == formatted, equal);
    }

    #[test]
    fn equality_observes_shape() {
        assert_ne!(
            property_access("c", "code"),
            Node::leaf(NodeKind::Identifier, "c")
        );
    }

    #[test]
    fn call_accessors_are_safe_on_every_kind() {
        for kind in NodeKind::all() {
            let node = if kind.is_leaf() {
                Node::leaf(*kind, "x")
            } else {
                Node::inner(*kind, Vec::new())
            };
            // None of these may panic, whatever the shape.
            let _receiver = node.call_receiver();
            let _name = node.call_name();
            let _arguments = node.call_arguments();
        }
    }

    #[test]
    fn receiverless_call_has_no_receiver() {
        let call = Node::inner(
            NodeKind::MethodCall,
            vec![
                Node::leaf(NodeKind::Identifier, "free"),
                Node::inner(
                    NodeKind::ArgumentList,
                    vec![Node::token("("), Node::token(")")],
                ),
            ],
        );
        assert!(call.call_receiver().is_none());
        assert_eq!(call.call_name(), Some("free"));
    }

    #[test]
    fn call_name_finds_method_and_property_names() {
        assert_eq!(zero_arg_call("c", "toInt").call_name(), Some("toInt"));
        assert_eq!(property_access("c", "code").call_name(), Some("code"));
    }
}
