//! Recursive-descent parser producing lossless `mend-tree` nodes.
//!
//! Grammar:
//!
//! ```text
//! file       := { function }
//! function   := "fun" ident parameter-list block
//! params     := "(" [ param { "," param } ] ")"
//! param      := ident ":" ident
//! block      := "{" { expression } "}"
//! expression := primary [ argument-list ] { "." ident [ argument-list ] }
//! arguments  := "(" [ expression { "," expression } ] ")"
//! primary    := ident | int | char | string
//! ```
//!
//! Every token becomes a leaf node carrying its leading trivia, so the
//! resulting tree re-emits the source byte-for-byte.

use std::iter::Peekable;
use std::vec::IntoIter;

use mend_tree::{Node, NodeKind, ParseError, SourceParser, Trivia};

use crate::lexer::{Token, TokenKind, tokenize};
use crate::resolver;

/// Parser for the miniature language.
///
/// Parsing also runs the type resolver, so the returned tree carries the
/// semantic annotations signature-based patterns match against.
#[derive(Debug, Default, Clone, Copy)]
pub struct Parser;

impl Parser {
    /// Creates a parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SourceParser for Parser {
    fn parse(&self, source: &str) -> Result<Node, ParseError> {
        let tokens = tokenize(source)?;
        let root = FileParser::new(tokens).parse_file()?;
        Ok(resolver::annotate(&root))
    }
}

struct FileParser {
    tokens: Peekable<IntoIter<Token>>,
}

impl FileParser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter().peekable(),
        }
    }

    fn peek_kind(&mut self) -> TokenKind {
        self.tokens.peek().map_or(TokenKind::Eof, |t| t.kind)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        match self.tokens.peek() {
            Some(token) if token.kind == kind => {
                self.tokens.next().ok_or_else(|| {
                    ParseError::unexpected_eof(format!("expected {}", describe(kind)))
                })
            }
            Some(token) => Err(ParseError::syntax(
                token.line,
                token.column,
                format!(
                    "expected {}, found {}",
                    describe(kind),
                    describe(token.kind)
                ),
            )),
            None => Err(ParseError::unexpected_eof(format!(
                "expected {}",
                describe(kind)
            ))),
        }
    }

    fn parse_file(mut self) -> Result<Node, ParseError> {
        let mut functions = Vec::new();
        while self.peek_kind() != TokenKind::Eof {
            functions.push(self.parse_function()?);
        }
        let eof = self.expect(TokenKind::Eof)?;
        Ok(Node::inner(NodeKind::CompilationUnit, functions)
            .with_trivia(Trivia::new("", eof.leading)))
    }

    fn parse_function(&mut self) -> Result<Node, ParseError> {
        let kw = token_leaf(self.expect(TokenKind::KwFun)?);
        let name = ident_leaf(self.expect(TokenKind::Ident)?);
        let parameters = self.parse_parameter_list()?;
        let body = self.parse_block()?;
        Ok(Node::inner(
            NodeKind::FunctionDecl,
            vec![kw, name, parameters, body],
        ))
    }

    fn parse_parameter_list(&mut self) -> Result<Node, ParseError> {
        let mut children = vec![token_leaf(self.expect(TokenKind::LParen)?)];
        if self.peek_kind() != TokenKind::RParen {
            loop {
                children.push(self.parse_parameter()?);
                if self.peek_kind() == TokenKind::Comma {
                    children.push(token_leaf(self.expect(TokenKind::Comma)?));
                } else {
                    break;
                }
            }
        }
        children.push(token_leaf(self.expect(TokenKind::RParen)?));
        Ok(Node::inner(NodeKind::ParameterList, children))
    }

    fn parse_parameter(&mut self) -> Result<Node, ParseError> {
        let name = ident_leaf(self.expect(TokenKind::Ident)?);
        let colon = token_leaf(self.expect(TokenKind::Colon)?);
        let type_name = ident_leaf(self.expect(TokenKind::Ident)?);
        Ok(Node::inner(
            NodeKind::Parameter,
            vec![name, colon, type_name],
        ))
    }

    fn parse_block(&mut self) -> Result<Node, ParseError> {
        let mut children = vec![token_leaf(self.expect(TokenKind::LBrace)?)];
        while !matches!(self.peek_kind(), TokenKind::RBrace | TokenKind::Eof) {
            children.push(self.parse_expression()?);
        }
        children.push(token_leaf(self.expect(TokenKind::RBrace)?));
        Ok(Node::inner(NodeKind::Block, children))
    }

    fn parse_expression(&mut self) -> Result<Node, ParseError> {
        let mut expression = self.parse_primary()?;
        // A bare `name(...)` is a receiver-less call.
        if expression.kind() == NodeKind::Identifier && self.peek_kind() == TokenKind::LParen {
            let arguments = self.parse_argument_list()?;
            expression = Node::inner(NodeKind::MethodCall, vec![expression, arguments]);
        }
        while self.peek_kind() == TokenKind::Dot {
            let dot = token_leaf(self.expect(TokenKind::Dot)?);
            let name = ident_leaf(self.expect(TokenKind::Ident)?);
            expression = if self.peek_kind() == TokenKind::LParen {
                let arguments = self.parse_argument_list()?;
                Node::inner(
                    NodeKind::MethodCall,
                    vec![expression, dot, name, arguments],
                )
            } else {
                Node::inner(NodeKind::PropertyAccess, vec![expression, dot, name])
            };
        }
        Ok(expression)
    }

    fn parse_argument_list(&mut self) -> Result<Node, ParseError> {
        let mut children = vec![token_leaf(self.expect(TokenKind::LParen)?)];
        if self.peek_kind() != TokenKind::RParen {
            loop {
                children.push(self.parse_expression()?);
                if self.peek_kind() == TokenKind::Comma {
                    children.push(token_leaf(self.expect(TokenKind::Comma)?));
                } else {
                    break;
                }
            }
        }
        children.push(token_leaf(self.expect(TokenKind::RParen)?));
        Ok(Node::inner(NodeKind::ArgumentList, children))
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        match self.peek_kind() {
            TokenKind::Ident => Ok(ident_leaf(self.expect(TokenKind::Ident)?)),
            TokenKind::Int => Ok(literal_leaf(
                self.expect(TokenKind::Int)?,
                NodeKind::IntLiteral,
            )),
            TokenKind::Char => Ok(literal_leaf(
                self.expect(TokenKind::Char)?,
                NodeKind::CharLiteral,
            )),
            TokenKind::Str => Ok(literal_leaf(
                self.expect(TokenKind::Str)?,
                NodeKind::StringLiteral,
            )),
            other => {
                let (line, column) = self
                    .tokens
                    .peek()
                    .map_or((0, 0), |t| (t.line, t.column));
                Err(ParseError::syntax(
                    line,
                    column,
                    format!("expected expression, found {}", describe(other)),
                ))
            }
        }
    }
}

fn token_leaf(token: Token) -> Node {
    Node::token(token.text).with_trivia(Trivia::leading_only(token.leading))
}

fn ident_leaf(token: Token) -> Node {
    Node::leaf(NodeKind::Identifier, token.text)
        .with_trivia(Trivia::leading_only(token.leading))
}

fn literal_leaf(token: Token, kind: NodeKind) -> Node {
    Node::leaf(kind, token.text).with_trivia(Trivia::leading_only(token.leading))
}

const fn describe(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::KwFun => "'fun'",
        TokenKind::Ident => "an identifier",
        TokenKind::Int => "an integer literal",
        TokenKind::Char => "a character literal",
        TokenKind::Str => "a string literal",
        TokenKind::LParen => "'('",
        TokenKind::RParen => "')'",
        TokenKind::LBrace => "'{'",
        TokenKind::RBrace => "'}'",
        TokenKind::Comma => "','",
        TokenKind::Colon => "':'",
        TokenKind::Dot => "'.'",
        TokenKind::Eof => "end of input",
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn parse(source: &str) -> Node {
        Parser::new().parse(source).expect("parse")
    }

    #[rstest]
    #[case("fun method(c: Char) { c.toInt() }")]
    #[case("fun f() {}")]
    #[case("// leading comment\nfun f(a: Char, b: String) {\n    a.code\n    b.toInt()\n}\n")]
    #[case("fun f(c: Char) { /* inner */ c.toInt() } // tail")]
    #[case("fun f(s: String) { s.substring(1, 2) }")]
    fn parse_then_print_is_the_identity(#[case] source: &str) {
        assert_eq!(parse(source).to_source(), source);
    }

    #[test]
    fn builds_the_expected_call_shape() {
        let tree = parse("fun method(c: Char) { c.toInt() }");
        let call = tree.find_first(NodeKind::MethodCall).expect("call");
        assert_eq!(call.call_name(), Some("toInt"));
        assert!(call.call_arguments().is_empty());
        let receiver = call.call_receiver().expect("receiver");
        assert_eq!(receiver.text(), Some("c"));
    }

    #[test]
    fn property_access_has_no_argument_list() {
        let tree = parse("fun method(c: Char) { c.code }");
        assert!(tree.find_first(NodeKind::MethodCall).is_none());
        let access = tree.find_first(NodeKind::PropertyAccess).expect("access");
        assert_eq!(access.call_name(), Some("code"));
    }

    #[test]
    fn chained_postfix_nests_left_to_right() {
        let tree = parse("fun f(c: Char) { c.toInt().toChar() }");
        let outer = tree.find_first(NodeKind::MethodCall).expect("outer call");
        assert_eq!(outer.call_name(), Some("toChar"));
        let inner = outer.call_receiver().expect("inner receiver");
        assert_eq!(inner.kind(), NodeKind::MethodCall);
        assert_eq!(inner.call_name(), Some("toInt"));
    }

    #[rstest]
    #[case("fun f( { }", "expected")]
    #[case("fun f() { c.toInt() ", "expected")]
    #[case("fun 1() {}", "expected an identifier")]
    #[case("{ }", "expected 'fun'")]
    fn rejects_malformed_source(#[case] source: &str, #[case] fragment: &str) {
        let error = Parser::new().parse(source).expect_err("should fail");
        assert!(
            error.to_string().contains(fragment),
            "unexpected error: {error}"
        );
    }
}
