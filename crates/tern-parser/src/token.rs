//! Token types produced by the scanner.
//!
//! Operators are grouped by precedence class rather than by symbol: the
//! parser decides what to build from the kind and reads the exact operator
//! back out of the token text.

use std::fmt;

use crate::span::Span;

/// A token with its kind, matched text and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact matched text (quotes, delimiters and flags included).
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Create a new token.
    #[inline]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// The end-of-input sentinel at `pos`.
    #[inline]
    pub fn eof(pos: u32) -> Self {
        Self::new(TokenKind::EndOfFile, "", Span::empty(pos))
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Literals ===
    Number,
    /// Digits followed by `n`: `10n`
    BigInt,
    String,
    /// `/pattern/flags`, delimiters included
    Regex,
    Boolean,
    Null,
    Undefined,

    // === Punctuation ===
    Semicolon,  // ;
    LBrace,     // {
    RBrace,     // }
    LBracket,   // [
    RBracket,   // ]
    LParen,     // (
    RParen,     // )
    Dot,        // .
    Comma,      // ,
    Colon,      // :
    Hash,       // #
    Backtick,   // `
    Arrow,      // =>
    /// `${` in expression mode; in template mode, the text before a `${`
    DollarBrace,
    QuestionDot, // ?.

    // === Operators ===
    LogicalAnd,         // &&
    LogicalOrNullish,   // || ??
    BitwiseOr,          // |
    BitwiseAnd,         // &
    BitwiseXor,         // ^
    Power,              // **
    Comparison,         // < > <= >=
    Equality,           // == != === !==
    Assignment,         // =
    ComplexAssignment,  // += -= *= /=
    IncrementDecrement, // ++ --
    Bang,               // !
    Additive,           // + -
    Multiplicative,     // * /

    // === Keywords ===
    /// `let` or `const`
    LetOrConst,
    If,
    Else,
    Of,
    For,
    While,
    Do,
    Continue,
    Break,
    Async,
    Await,
    Yield,
    This,
    Throw,
    Try,
    Catch,
    Finally,
    FunctionStar,
    Function,
    Return,
    Class,
    Static,
    Extends,
    New,

    Identifier,
    /// Raw text of a template literal segment that runs up to the closing backtick.
    TemplateString,
    EndOfFile,
}

impl TokenKind {
    /// Human readable name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::BigInt => "bigint",
            TokenKind::String => "string",
            TokenKind::Regex => "regex",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "null",
            TokenKind::Undefined => "undefined",
            TokenKind::Semicolon => ";",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Hash => "#",
            TokenKind::Backtick => "`",
            TokenKind::Arrow => "=>",
            TokenKind::DollarBrace => "${",
            TokenKind::QuestionDot => "?.",
            TokenKind::LogicalAnd => "&&",
            TokenKind::LogicalOrNullish => "LogicalOrAndNullishCoalescing",
            TokenKind::BitwiseOr => "|",
            TokenKind::BitwiseAnd => "&",
            TokenKind::BitwiseXor => "^",
            TokenKind::Power => "PowerOperator",
            TokenKind::Comparison => "ComparisonOperator",
            TokenKind::Equality => "EqualityOperator",
            TokenKind::Assignment => "AssignmentOperator",
            TokenKind::ComplexAssignment => "ComplexAssignmentOperator",
            TokenKind::IncrementDecrement => "IncrementDecrement",
            TokenKind::Bang => "UnaryOperator",
            TokenKind::Additive => "AdditiveOperator",
            TokenKind::Multiplicative => "MultiplicativeOperator",
            TokenKind::LetOrConst => "VariableDeclaration",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Of => "of",
            TokenKind::For => "for",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::Continue => "continue",
            TokenKind::Break => "break",
            TokenKind::Async => "async",
            TokenKind::Await => "await",
            TokenKind::Yield => "yield",
            TokenKind::This => "this",
            TokenKind::Throw => "throw",
            TokenKind::Try => "try",
            TokenKind::Catch => "catch",
            TokenKind::Finally => "finally",
            TokenKind::FunctionStar => "function*",
            TokenKind::Function => "function",
            TokenKind::Return => "return",
            TokenKind::Class => "class",
            TokenKind::Static => "static",
            TokenKind::Extends => "extends",
            TokenKind::New => "new",
            TokenKind::Identifier => "Identifier",
            TokenKind::TemplateString => "TemplateLiteralString",
            TokenKind::EndOfFile => "EndOfFile",
        }
    }

    /// Check if this is a reserved word, usable as a property name after `.`
    /// or as a key in object literals and class bodies.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Boolean
                | TokenKind::Null
                | TokenKind::Undefined
                | TokenKind::LetOrConst
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Of
                | TokenKind::For
                | TokenKind::While
                | TokenKind::Do
                | TokenKind::Continue
                | TokenKind::Break
                | TokenKind::Async
                | TokenKind::Await
                | TokenKind::Yield
                | TokenKind::This
                | TokenKind::Throw
                | TokenKind::Try
                | TokenKind::Catch
                | TokenKind::Finally
                | TokenKind::Function
                | TokenKind::Return
                | TokenKind::Class
                | TokenKind::Static
                | TokenKind::Extends
                | TokenKind::New
        )
    }

    /// Check if this token ends an expression-less `return` / `yield`.
    pub fn ends_argument(self) -> bool {
        matches!(
            self,
            TokenKind::Semicolon
                | TokenKind::RBrace
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::Comma
                | TokenKind::EndOfFile
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
