//! Trivia-preserving lexer.
//!
//! Every token records the whitespace and comments that precede it, so the
//! token stream carries the complete source text. The final `Eof` token
//! collects any trailing trivia at the end of the file.

use std::iter::Peekable;
use std::str::Chars;

use mend_tree::ParseError;

/// The kinds of token the grammar distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    KwFun,
    Ident,
    Int,
    Char,
    Str,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Dot,
    Eof,
}

/// One lexed token with its leading trivia and source position.
#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) text: String,
    pub(crate) leading: String,
    pub(crate) line: u32,
    pub(crate) column: u32,
}

/// Lexes `source` into tokens, ending with an `Eof` token.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

struct Lexer<'s> {
    chars: Peekable<Chars<'s>>,
    line: u32,
    column: u32,
}

impl<'s> Lexer<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line = self.line.saturating_add(1);
            self.column = 1;
        } else {
            self.column = self.column.saturating_add(1);
        }
        Some(c)
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        let leading = self.consume_trivia()?;
        let line = self.line;
        let column = self.column;

        let Some(&c) = self.chars.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                text: String::new(),
                leading,
                line,
                column,
            });
        };

        let (kind, text) = if c.is_ascii_alphabetic() || c == '_' {
            self.lex_word()
        } else if c.is_ascii_digit() {
            self.lex_int()
        } else if c == '\'' {
            self.lex_quoted('\'', "character literal")?
        } else if c == '"' {
            self.lex_quoted('"', "string literal")?
        } else {
            self.lex_punctuation(c, line, column)?
        };

        Ok(Token {
            kind,
            text,
            leading,
            line,
            column,
        })
    }

    /// Consumes whitespace and comments, returning them verbatim.
    fn consume_trivia(&mut self) -> Result<String, ParseError> {
        let mut trivia = String::new();
        loop {
            match self.chars.peek() {
                Some(&c) if c.is_whitespace() => {
                    trivia.push(c);
                    self.advance();
                }
                Some('/') => {
                    self.advance();
                    match self.chars.peek() {
                        Some('/') => {
                            trivia.push_str("//");
                            self.advance();
                            while let Some(&c) = self.chars.peek() {
                                trivia.push(c);
                                self.advance();
                                if c == '\n' {
                                    break;
                                }
                            }
                        }
                        Some('*') => {
                            trivia.push_str("/*");
                            self.advance();
                            self.consume_block_comment(&mut trivia)?;
                        }
                        _ => {
                            return Err(ParseError::syntax(
                                self.line,
                                self.column.saturating_sub(1),
                                "unexpected character '/'",
                            ));
                        }
                    }
                }
                _ => return Ok(trivia),
            }
        }
    }

    fn consume_block_comment(&mut self, trivia: &mut String) -> Result<(), ParseError> {
        let mut previous = '\0';
        while let Some(c) = self.advance() {
            trivia.push(c);
            if previous == '*' && c == '/' {
                return Ok(());
            }
            previous = c;
        }
        Err(ParseError::unexpected_eof("unterminated block comment"))
    }

    fn lex_word(&mut self) -> (TokenKind, String) {
        let mut text = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = if text == "fun" {
            TokenKind::KwFun
        } else {
            TokenKind::Ident
        };
        (kind, text)
    }

    fn lex_int(&mut self) -> (TokenKind, String) {
        let mut text = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        (TokenKind::Int, text)
    }

    /// Lexes a quote-delimited literal, honouring backslash escapes.
    fn lex_quoted(
        &mut self,
        quote: char,
        description: &str,
    ) -> Result<(TokenKind, String), ParseError> {
        let mut text = String::new();
        // Opening quote.
        if let Some(c) = self.advance() {
            text.push(c);
        }
        loop {
            let Some(c) = self.advance() else {
                return Err(ParseError::unexpected_eof(format!(
                    "unterminated {description}"
                )));
            };
            text.push(c);
            if c == '\\' {
                let Some(escaped) = self.advance() else {
                    return Err(ParseError::unexpected_eof(format!(
                        "unterminated escape in {description}"
                    )));
                };
                text.push(escaped);
            } else if c == quote {
                let kind = if quote == '\'' {
                    TokenKind::Char
                } else {
                    TokenKind::Str
                };
                return Ok((kind, text));
            }
        }
    }

    fn lex_punctuation(
        &mut self,
        c: char,
        line: u32,
        column: u32,
    ) -> Result<(TokenKind, String), ParseError> {
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            other => {
                return Err(ParseError::syntax(
                    line,
                    column,
                    format!("unexpected character '{other}'"),
                ));
            }
        };
        self.advance();
        Ok((kind, c.to_string()))
    }
}
