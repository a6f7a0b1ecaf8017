use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnexpectedInfix { .. } => "UnexpectedInfix",
            ErrorImpl::MissingPunctuation { .. } => "MissingPunctuation",
            ErrorImpl::TooManyArguments { .. } => "TooManyArguments",
            ErrorImpl::UnterminatedBlock { .. } => "UnterminatedBlock",
            ErrorImpl::UnterminatedMatch => "UnterminatedMatch",
            ErrorImpl::InvalidPattern { .. } => "InvalidPattern",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected the start of an expression",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnexpectedInfix { token } => ErrorTip::Suggestion(format!(
                "`{}` cannot continue an expression",
                token
            )),
            ErrorImpl::MissingPunctuation { expected, found } => {
                ErrorTip::Suggestion(format!("Expected {}, found `{}`", expected, found))
            }
            ErrorImpl::TooManyArguments { max } => ErrorTip::Suggestion(format!(
                "A call may take at most {} arguments",
                max
            )),
            ErrorImpl::UnterminatedBlock { expected } => ErrorTip::Suggestion(format!(
                "Reached the end of input, did you miss a {}?",
                expected
            )),
            ErrorImpl::UnterminatedMatch => ErrorTip::Suggestion(String::from(
                "Reached the end of input, did you miss a `}` after the match arms?",
            )),
            ErrorImpl::InvalidPattern { message } => {
                ErrorTip::Suggestion(format!("This pattern cannot be matched: {}", message))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}:{})", self.internal_error, self.position.1, self.position.0)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unexpected infix operator: {token:?}")]
    UnexpectedInfix { token: String },
    #[error("expected {expected}, found {found:?}")]
    MissingPunctuation { expected: String, found: String },
    #[error("too many arguments in call (max {max})")]
    TooManyArguments { max: usize },
    #[error("unterminated block: expected {expected} before end of input")]
    UnterminatedBlock { expected: String },
    #[error("unterminated match: expected '}}' after match arms")]
    UnterminatedMatch,
    #[error("invalid pattern: {message}")]
    InvalidPattern { message: String },
}
