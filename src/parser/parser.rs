//! Parser state and the top-level statement loop.
//!
//! The `Parser` pulls tokens one at a time from a `TokenSource`, keeping a
//! single lookahead token. Expression and statement parsing
//! live in `expr` and `stmt`; both read the shared, immutable `ParseRules`
//! table the parser was built with.
//!
//! Errors travel as `Result` values. A failed sub-parse drops whatever its
//! caller had built so far, and the statement loop records the error and
//! stops, leaving the statements parsed before it in the returned program.
//! A handler that reports an error and still returns a node (too many call
//! arguments, an unrecognised character) sets the error flag; every loop
//! and closing-delimiter check then unwinds quietly so that one diagnostic
//! is all the parse produces.

use std::mem;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        source::{TokenSource, TokenStream},
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{ParseRules, PARSE_RULES},
    stmt::parse_stmt,
};

/// Most arguments a single call may take.
pub const MAX_ARGUMENTS: usize = 255;

/// The main parser structure that maintains parsing state.
pub struct Parser<'a> {
    /// Where tokens come from
    source: Box<dyn TokenSource + 'a>,
    /// Prefix/infix/binding power and statement lookups
    rules: &'a ParseRules,
    /// The lookahead token, not yet consumed
    current: Token,
    /// Set once any error has been reported
    had_error: bool,
    /// Every error reported during this parse, in order
    diagnostics: Vec<Error>,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `source` using the shared rule table, and loads
    /// the first lookahead token.
    pub fn new(source: impl TokenSource + 'a) -> Self {
        Self::with_rules(source, &PARSE_RULES)
    }

    /// Creates a parser that consults `rules` instead of the shared table.
    pub fn with_rules(source: impl TokenSource + 'a, rules: &'a ParseRules) -> Self {
        let mut source: Box<dyn TokenSource + 'a> = Box::new(source);
        let current = source.next_token();

        Parser {
            source,
            rules,
            current,
            had_error: false,
            diagnostics: vec![],
        }
    }

    pub fn rules(&self) -> &'a ParseRules {
        self.rules
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Advances to the next token and returns the one just consumed.
    pub fn advance(&mut self) -> Token {
        let next = self.source.next_token();
        mem::replace(&mut self.current, next)
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consumes the current token if it has the given kind.
    pub fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a token of the specified kind, with a custom error.
    ///
    /// Returns Ok(Token) and advances if the current token matches, otherwise
    /// returns `error` without consuming anything.
    pub fn expect_error(&mut self, expected_kind: TokenKind, error: Error) -> Result<Token, Error> {
        if self.current.kind != expected_kind {
            Err(error)
        } else {
            Ok(self.advance())
        }
    }

    /// Expects a token of the specified kind.
    ///
    /// `expected` describes the missing token in the `MissingPunctuation`
    /// error raised on a mismatch.
    pub fn expect(&mut self, expected_kind: TokenKind, expected: &str) -> Result<Token, Error> {
        let error = self.missing(expected);
        self.expect_error(expected_kind, error)
    }

    /// Expects the delimiter that closes a construct.
    ///
    /// Once an error has been reported the parse is already failing and the
    /// delimiter may never arrive, so nothing is checked or consumed.
    pub fn expect_closing(&mut self, closing_kind: TokenKind, expected: &str) -> Result<(), Error> {
        if self.had_error {
            return Ok(());
        }
        self.expect(closing_kind, expected).map(|_| ())
    }

    /// Builds a `MissingPunctuation` error at the current token.
    pub fn missing(&self, expected: &str) -> Error {
        Error::new(
            ErrorImpl::MissingPunctuation {
                expected: expected.to_string(),
                found: self.current.value.clone(),
            },
            self.get_position(),
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current.kind != TokenKind::EOF
    }

    /// Records a diagnostic and marks this parse as failed.
    pub fn report(&mut self, error: Error) {
        log::error!("parse error: {}", error);
        self.had_error = true;
        self.diagnostics.push(error);
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    /// The first reported error, which is the one that halted the parse.
    pub fn first_error(&self) -> Option<&Error> {
        self.diagnostics.first()
    }

    /// Returns the position of the current token in the source file.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }
}

/// Runs the statement loop until end of input or the first error.
///
/// The returned program holds every statement parsed before the loop
/// stopped; check `Parser::had_error` to know whether parsing succeeded.
pub fn parse(parser: &mut Parser<'_>) -> Program {
    let mut program = Program::new();

    while parser.has_tokens() && !parser.had_error() {
        match parse_stmt(parser) {
            Ok(stmt) => program.push(stmt),
            Err(error) => {
                parser.report(error);
                break;
            }
        }
    }

    log::debug!(
        "parsed {} statement(s){}",
        program.len(),
        if parser.had_error() { " before an error" } else { "" }
    );

    program
}

/// Parses a stream of already produced tokens.
pub fn parse_tokens(tokens: Vec<Token>) -> (Parser<'static>, Program) {
    let mut parser = Parser::new(TokenStream::new(tokens));
    let program = parse(&mut parser);
    (parser, program)
}

/// Lexes and parses `source` in one go.
pub fn parse_source(source: &str, file: Option<String>) -> (Parser<'static>, Program) {
    let mut parser = Parser::new(Lexer::new(source.to_string(), file));
    let program = parse(&mut parser);
    (parser, program)
}
