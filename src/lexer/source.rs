//! The boundary between the parser and whatever produces its tokens.

use std::vec::IntoIter;

use crate::Position;

use super::tokens::{Token, TokenKind};

/// A pull-based producer of tokens.
///
/// Implementations must keep answering after the end of input has been
/// reached, returning an `EOF` token on every further call.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// A token source over an already tokenized buffer.
pub struct TokenStream {
    tokens: IntoIter<Token>,
    eof: Token,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof = match tokens.last() {
            Some(token) if token.kind == TokenKind::EOF => token.clone(),
            Some(token) => Token::eof(token.span.end.clone()),
            None => Token::eof(Position::null()),
        };

        TokenStream {
            tokens: tokens.into_iter(),
            eof,
        }
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) if token.kind == TokenKind::EOF => {
                // Anything buffered after an EOF is unreachable.
                self.tokens = Vec::new().into_iter();
                self.eof = token.clone();
                token
            }
            Some(token) => token,
            None => self.eof.clone(),
        }
    }
}
