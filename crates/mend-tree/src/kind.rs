//! Node kind classification.
//!
//! [`NodeKind`] is a closed enumeration: the traversal and matching code
//! dispatches over it exhaustively, so adding a new rewrite rule never
//! requires touching the tree model.

use std::fmt;

/// The closed set of syntax element kinds understood by the toolkit.
///
/// Leaf kinds carry their lexeme in [`Node::text`](crate::Node::text);
/// composite kinds hold ordered children. Syntax tokens (keywords and
/// punctuation) are ordinary [`NodeKind::Token`] leaves so that every
/// source byte has a home and printing stays lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A whole source file: a sequence of function declarations.
    CompilationUnit,
    /// A `fun name(params) { ... }` declaration.
    FunctionDecl,
    /// The parenthesised parameter list of a function declaration.
    ParameterList,
    /// A single `name: Type` parameter.
    Parameter,
    /// A `{ ... }` block of expressions.
    Block,
    /// A method invocation, with or without an explicit receiver.
    MethodCall,
    /// A `receiver.name` property access.
    PropertyAccess,
    /// The parenthesised argument list of a method call.
    ArgumentList,
    /// An identifier leaf.
    Identifier,
    /// A character literal leaf, e.g. `'a'`.
    CharLiteral,
    /// A string literal leaf, e.g. `"text"`.
    StringLiteral,
    /// An integer literal leaf.
    IntLiteral,
    /// A keyword or punctuation leaf, e.g. `fun`, `.`, `(`.
    Token,
}

impl NodeKind {
    /// Returns whether nodes of this kind carry lexeme text instead of
    /// children.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::CharLiteral
                | Self::StringLiteral
                | Self::IntLiteral
                | Self::Token
        )
    }

    /// Returns whether this kind represents an expression that can appear
    /// as a call receiver.
    #[must_use]
    pub const fn is_expression(self) -> bool {
        matches!(
            self,
            Self::MethodCall
                | Self::PropertyAccess
                | Self::Identifier
                | Self::CharLiteral
                | Self::StringLiteral
                | Self::IntLiteral
        )
    }

    /// Returns the lower-case identifier for this kind.
    ///
    /// This is useful for diagnostics and display purposes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CompilationUnit => "compilation_unit",
            Self::FunctionDecl => "function_decl",
            Self::ParameterList => "parameter_list",
            Self::Parameter => "parameter",
            Self::Block => "block",
            Self::MethodCall => "method_call",
            Self::PropertyAccess => "property_access",
            Self::ArgumentList => "argument_list",
            Self::Identifier => "identifier",
            Self::CharLiteral => "char_literal",
            Self::StringLiteral => "string_literal",
            Self::IntLiteral => "int_literal",
            Self::Token => "token",
        }
    }

    /// Returns every kind in the enumeration.
    ///
    /// Primarily useful for exhaustive safety tests over foreign node
    /// kinds.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::CompilationUnit,
            Self::FunctionDecl,
            Self::ParameterList,
            Self::Parameter,
            Self::Block,
            Self::MethodCall,
            Self::PropertyAccess,
            Self::ArgumentList,
            Self::Identifier,
            Self::CharLiteral,
            Self::StringLiteral,
            Self::IntLiteral,
            Self::Token,
        ]
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_kinds_are_classified() {
        assert!(NodeKind::Identifier.is_leaf());
        assert!(NodeKind::Token.is_leaf());
        assert!(!NodeKind::MethodCall.is_leaf());
        assert!(!NodeKind::CompilationUnit.is_leaf());
    }

    #[test]
    fn all_covers_every_kind_once() {
        let kinds = NodeKind::all();
        for (i, kind) in kinds.iter().enumerate() {
            assert!(
                !kinds.iter().skip(i + 1).any(|other| other == kind),
                "duplicate kind {kind}"
            );
        }
        assert_eq!(kinds.len(), 13);
    }
}
