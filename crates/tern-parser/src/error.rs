//! Parse errors.
//!
//! Every failure is fatal: the scanner or parser returns the first error it
//! hits and no partial tree is produced.

use thiserror::Error;

use crate::span::Span;
use crate::token::TokenKind;

/// Result alias used throughout the scanner and parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// A lexical or syntactic error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// No lexical rule matches at the cursor.
    #[error("Unsupported token {character}")]
    UnsupportedToken { character: char, span: Span },

    /// The lookahead is not the token the grammar requires here.
    #[error("Token does not match expected type. Expected: {expected} Got: {found}")]
    TokenMismatch {
        expected: TokenKind,
        found: TokenKind,
        span: Span,
    },

    /// The lookahead cannot start the construct being parsed.
    #[error("Unexpected token: {found}")]
    UnexpectedToken { found: TokenKind, span: Span },

    #[error("Encountered return statement outside of function")]
    InvalidReturnStatement { span: Span },

    #[error("Invalid left hand side of assignment operator")]
    InvalidLeftHandSide { span: Span },

    #[error("Invalid function parameters")]
    InvalidFunctionParameters { span: Span },

    #[error("Async keyword is not followed by a function declaration")]
    InvalidAsync { span: Span },

    #[error("Invalid statement in class declaration")]
    InvalidClassStatement { span: Span },

    #[error("Missing catch or finally clause")]
    MissingCatchOrFinally { span: Span },

    #[error("Invalid regular expression flag: {flag}")]
    InvalidRegexFlag { flag: char, span: Span },

    /// Statements or expressions nest deeper than `ParserOptions::max_depth`.
    #[error("Nesting exceeds the maximum depth of {limit}")]
    NestingTooDeep { limit: usize, span: Span },
}

impl ParseError {
    /// Location of the input that was rejected.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnsupportedToken { span, .. }
            | ParseError::TokenMismatch { span, .. }
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::InvalidReturnStatement { span }
            | ParseError::InvalidLeftHandSide { span }
            | ParseError::InvalidFunctionParameters { span }
            | ParseError::InvalidAsync { span }
            | ParseError::InvalidClassStatement { span }
            | ParseError::MissingCatchOrFinally { span }
            | ParseError::InvalidRegexFlag { span, .. }
            | ParseError::NestingTooDeep { span, .. } => *span,
        }
    }

    /// Stable SCREAMING_SNAKE_CASE code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnsupportedToken { .. } => "UNSUPPORTED_TOKEN",
            ParseError::TokenMismatch { .. } => "TOKEN_MISMATCH",
            ParseError::UnexpectedToken { .. } => "UNEXPECTED_TOKEN",
            ParseError::InvalidReturnStatement { .. } => "INVALID_RETURN_STATEMENT",
            ParseError::InvalidLeftHandSide { .. } => "INVALID_LEFT_HAND_SIDE",
            ParseError::InvalidFunctionParameters { .. } => "INVALID_FUNCTION_PARAMETERS",
            ParseError::InvalidAsync { .. } => "INVALID_ASYNC",
            ParseError::InvalidClassStatement { .. } => "INVALID_CLASS_STATEMENT",
            ParseError::MissingCatchOrFinally { .. } => "MISSING_CATCH_OR_FINALLY",
            ParseError::InvalidRegexFlag { .. } => "INVALID_REGEX_FLAG",
            ParseError::NestingTooDeep { .. } => "NESTING_TOO_DEEP",
        }
    }
}
