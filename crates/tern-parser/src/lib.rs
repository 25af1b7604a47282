//! tern-parser: recursive descent parser for a JavaScript subset
//!
//! Turns source text into a serializable abstract syntax tree.
//!
//! # Design
//!
//! 1. **Lexing on demand**
//!    - The parser pulls one token at a time and keeps one token of lookahead
//!    - Template literal bodies are scanned in a separate mode the parser
//!      switches into, so free text and `${ }` expressions can interleave
//!
//! 2. **Ordered rule table**
//!    - The first lexical rule that matches wins; rule order resolves regex
//!      vs. division and keyword vs. identifier
//!
//! 3. **Precedence ladder**
//!    - One method per precedence level, from sequence down to primary
//!    - Arrow functions are recognised by parsing `( ... )` as an expression
//!      and reinterpreting it when `=>` follows
//!
//! 4. **Plain owned tree**
//!    - A single `Node` enum; children are `Box<Node>` / `Vec<Node>`
//!    - Serializes to JSON objects tagged with `"type"`
//!
//! # Example
//!
//! ```
//! use tern_parser::{Node, Parser, ParserOptions};
//!
//! let ast = Parser::new("const x = 1 + 2;", ParserOptions::default()).parse()?;
//! assert!(matches!(ast.body()[0], Node::VariableDeclaration { .. }));
//! # Ok::<(), tern_parser::ParseError>(())
//! ```

mod ast;
mod error;
mod parser;
mod scanner;
mod span;
mod token;

// Re-exports
pub use ast::*;
pub use error::{ParseError, ParseResult};
pub use parser::{Parser, ParserOptions};
pub use scanner::{tokenize, Scanner};
pub use span::{LineIndex, Span};
pub use token::{Token, TokenKind};

/// Parse source code into a `Program` node with default options.
pub fn parse(source: &str) -> ParseResult<Node> {
    Parser::new(source, ParserOptions::default()).parse()
}
