//! Lexical analysis for the front end.
//!
//! This module contains the token source the parser pulls from. It handles:
//!
//! - Tokenization of source code using an ordered table of regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Token position and line tracking for diagnostics
//! - Comments and whitespace handling
//!
//! The parser itself only depends on the `TokenSource` trait.

pub mod lexer;
pub mod source;
pub mod tokens;
