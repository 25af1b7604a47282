//! Recursive descent parser.
//!
//! The parser keeps exactly one token of lookahead and pulls tokens from the
//! scanner on demand. Expressions are parsed with a precedence ladder, one
//! method per level, each folding its operators left to right over the next
//! tighter level. Assignment, `**` and arrow bodies recurse instead of
//! looping, which makes them right-associative.
//!
//! Two places read past the lookahead: statement dispatch (to tell a named
//! function declaration from a function expression) and object keys (to tell
//! an `async` method from a property called `async`). Both use a cloned
//! scanner, so they never consume input.

use std::mem;

use tracing::{debug, trace};

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::scanner::Scanner;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Parser configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// How deeply statements, unary operands and right-recursive operands
    /// (`=`, `**`, `new`) may nest before the parse fails with `NestingTooDeep`.
    pub max_depth: usize,
}

impl ParserOptions {
    /// Fits a 2 MiB thread stack in unoptimized builds.
    pub const DEFAULT_MAX_DEPTH: usize = 48;
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// The parser.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    /// Next unconsumed token. Primed by `parse`.
    lookahead: Token,
    options: ParserOptions,
    source: &'a str,
    /// Whether a `return` statement is legal here.
    in_function: bool,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser.
    pub fn new(source: &'a str, options: ParserOptions) -> Self {
        Self {
            scanner: Scanner::new(source),
            lookahead: Token::eof(0),
            options,
            source,
            in_function: false,
            depth: 0,
        }
    }

    /// Parse the entire source into a `Program` node.
    pub fn parse(mut self) -> ParseResult<Node> {
        debug!(bytes = self.source.len(), max_depth = self.options.max_depth, "parse start");
        self.lookahead = self.scanner.next_token()?;

        let mut body = Vec::new();
        while let Some(statement) = self.statement()? {
            body.push(statement);
        }

        debug!(statements = body.len(), "parse finished");
        Ok(Node::Program { body })
    }

    // =========================================================================
    // Token Handling
    // =========================================================================

    fn at(&self, kind: TokenKind) -> bool {
        self.lookahead.kind == kind
    }

    /// Consume the lookahead and refill it in expression mode.
    fn advance(&mut self) -> ParseResult<Token> {
        let next = self.scanner.next_token()?;
        Ok(mem::replace(&mut self.lookahead, next))
    }

    /// Consume a token of the given kind, otherwise fail with `TokenMismatch`.
    fn eat(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if !self.at(kind) {
            return Err(self.mismatch(kind));
        }
        self.advance()
    }

    /// Like `eat`, but the next token is read as template literal text.
    fn eat_in_template(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if !self.at(kind) {
            return Err(self.mismatch(kind));
        }
        let next = self.scanner.next_template_token();
        Ok(mem::replace(&mut self.lookahead, next))
    }

    /// Consume the lookahead if it matches, returning true if consumed.
    fn eat_if(&mut self, kind: TokenKind) -> ParseResult<bool> {
        if self.at(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn mismatch(&self, expected: TokenKind) -> ParseError {
        ParseError::TokenMismatch {
            expected,
            found: self.lookahead.kind,
            span: self.lookahead.span,
        }
    }

    fn unexpected(&self) -> ParseError {
        ParseError::UnexpectedToken {
            found: self.lookahead.kind,
            span: self.lookahead.span,
        }
    }

    /// Run `parse` one nesting level deeper.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.options.max_depth,
                span: self.lookahead.span,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Run `parse` with `return` allowed, restoring the enclosing context after.
    fn function_context<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let outer = mem::replace(&mut self.in_function, true);
        let result = parse(self);
        self.in_function = outer;
        result
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Parse one statement, or `None` at the end of input.
    fn statement(&mut self) -> ParseResult<Option<Node>> {
        if self.at(TokenKind::EndOfFile) {
            return Ok(None);
        }
        let statement = self.nested(Self::statement_kind)?;
        trace!(kind = statement.type_name(), depth = self.depth, "statement");
        Ok(Some(statement))
    }

    fn statement_kind(&mut self) -> ParseResult<Node> {
        match self.lookahead.kind {
            TokenKind::LBrace => self.block_statement(),
            TokenKind::LetOrConst => self.variable_declaration(true),
            TokenKind::If => self.if_statement(),
            TokenKind::Function | TokenKind::FunctionStar | TokenKind::Async => {
                if self.starts_function_declaration()? {
                    self.function_declaration()
                } else {
                    self.expression_statement()
                }
            }
            TokenKind::For => self.for_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::Do => self.do_while_statement(),
            TokenKind::Continue => {
                self.advance()?;
                self.eat_if(TokenKind::Semicolon)?;
                Ok(Node::ContinueStatement)
            }
            TokenKind::Break => {
                self.advance()?;
                self.eat_if(TokenKind::Semicolon)?;
                Ok(Node::BreakStatement)
            }
            TokenKind::Return => self.return_statement(),
            TokenKind::Class => self.class_declaration(),
            TokenKind::Throw => self.throw_statement(),
            TokenKind::Try => self.try_statement(),
            _ => self.expression_statement(),
        }
    }

    /// A statement that must be present, such as a loop body.
    fn required_statement(&mut self) -> ParseResult<Node> {
        match self.statement()? {
            Some(statement) => Ok(statement),
            None => Err(self.unexpected()),
        }
    }

    fn block_statement(&mut self) -> ParseResult<Node> {
        self.eat(TokenKind::LBrace)?;
        let mut body = Vec::new();
        while !self.at(TokenKind::RBrace) {
            match self.statement()? {
                Some(statement) => body.push(statement),
                None => return Err(self.mismatch(TokenKind::RBrace)),
            }
        }
        self.eat(TokenKind::RBrace)?;
        Ok(Node::block(body))
    }

    fn expression_statement(&mut self) -> ParseResult<Node> {
        let expression = self.sequence_expression()?;
        self.eat_if(TokenKind::Semicolon)?;
        Ok(expression)
    }

    fn variable_declaration(&mut self, eat_semicolon: bool) -> ParseResult<Node> {
        let keyword = self.eat(TokenKind::LetOrConst)?;
        let kind = VariableKind::from_text(&keyword.text).ok_or(ParseError::UnexpectedToken {
            found: keyword.kind,
            span: keyword.span,
        })?;
        let id = self.identifier()?;

        let value = if self.eat_if(TokenKind::Assignment)? {
            Some(Box::new(self.sequence_expression()?))
        } else {
            None
        };
        if eat_semicolon {
            self.eat_if(TokenKind::Semicolon)?;
        }

        Ok(Node::VariableDeclaration {
            id: Box::new(id),
            value,
            kind,
        })
    }

    fn if_statement(&mut self) -> ParseResult<Node> {
        self.eat(TokenKind::If)?;
        self.eat(TokenKind::LParen)?;
        let test = self.sequence_expression()?;
        self.eat(TokenKind::RParen)?;

        let consequent = self.required_statement()?;
        // `else if` needs no special case: the alternate is just the next if statement.
        let alternate = if self.eat_if(TokenKind::Else)? {
            Some(Box::new(self.required_statement()?))
        } else {
            None
        };

        Ok(Node::IfStatement {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate,
        })
    }

    fn for_statement(&mut self) -> ParseResult<Node> {
        self.eat(TokenKind::For)?;
        self.eat(TokenKind::LParen)?;

        let init = match self.lookahead.kind {
            TokenKind::Semicolon => None,
            TokenKind::LetOrConst => Some(self.variable_declaration(false)?),
            _ => Some(self.sequence_expression()?),
        };

        if self.at(TokenKind::Of) {
            return match init {
                Some(left) => self.for_of_rest(left),
                None => Err(self.unexpected()),
            };
        }

        self.eat(TokenKind::Semicolon)?;
        let test = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.sequence_expression()?))
        };
        self.eat(TokenKind::Semicolon)?;
        let update = if self.at(TokenKind::RParen) {
            None
        } else {
            Some(Box::new(self.sequence_expression()?))
        };
        self.eat(TokenKind::RParen)?;
        let body = self.loop_body()?;

        Ok(Node::ForStatement {
            init: init.map(Box::new),
            test,
            update,
            body: Box::new(body),
        })
    }

    /// `of right) body`, after the left side of a `for...of` head.
    fn for_of_rest(&mut self, left: Node) -> ParseResult<Node> {
        self.eat(TokenKind::Of)?;
        let right = self.assignment_expression()?;
        self.eat(TokenKind::RParen)?;
        let body = self.loop_body()?;

        Ok(Node::ForOfStatement {
            left: Box::new(left),
            right: Box::new(right),
            body: Box::new(body),
        })
    }

    /// `for` bodies are always blocks; a single statement is wrapped in one.
    fn loop_body(&mut self) -> ParseResult<Node> {
        if self.at(TokenKind::LBrace) {
            self.block_statement()
        } else {
            Ok(Node::block(vec![self.required_statement()?]))
        }
    }

    fn while_statement(&mut self) -> ParseResult<Node> {
        self.eat(TokenKind::While)?;
        self.eat(TokenKind::LParen)?;
        let test = self.sequence_expression()?;
        self.eat(TokenKind::RParen)?;
        let body = self.required_statement()?;

        Ok(Node::WhileStatement {
            test: Box::new(test),
            body: Box::new(body),
        })
    }

    fn do_while_statement(&mut self) -> ParseResult<Node> {
        self.eat(TokenKind::Do)?;
        let body = self.required_statement()?;
        self.eat(TokenKind::While)?;
        self.eat(TokenKind::LParen)?;
        let test = self.sequence_expression()?;
        self.eat(TokenKind::RParen)?;
        self.eat_if(TokenKind::Semicolon)?;

        Ok(Node::DoWhileStatement {
            body: Box::new(body),
            test: Box::new(test),
        })
    }

    fn return_statement(&mut self) -> ParseResult<Node> {
        if !self.in_function {
            return Err(ParseError::InvalidReturnStatement {
                span: self.lookahead.span,
            });
        }
        self.eat(TokenKind::Return)?;

        let argument = if self.lookahead.kind.ends_argument() {
            None
        } else {
            Some(Box::new(self.sequence_expression()?))
        };
        self.eat_if(TokenKind::Semicolon)?;

        Ok(Node::ReturnStatement { argument })
    }

    fn throw_statement(&mut self) -> ParseResult<Node> {
        self.eat(TokenKind::Throw)?;
        let argument = self.sequence_expression()?;
        self.eat_if(TokenKind::Semicolon)?;
        Ok(Node::ThrowStatement {
            argument: Box::new(argument),
        })
    }

    fn try_statement(&mut self) -> ParseResult<Node> {
        self.eat(TokenKind::Try)?;
        let block = self.block_statement()?;

        let handler = if self.eat_if(TokenKind::Catch)? {
            let param = if self.eat_if(TokenKind::LParen)? {
                let param = self.identifier()?;
                self.eat(TokenKind::RParen)?;
                Some(Box::new(param))
            } else {
                None
            };
            let body = self.block_statement()?;
            Some(Box::new(Node::CatchClause {
                param,
                body: Box::new(body),
            }))
        } else {
            None
        };

        let finalizer = if self.eat_if(TokenKind::Finally)? {
            Some(Box::new(self.block_statement()?))
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(ParseError::MissingCatchOrFinally {
                span: self.lookahead.span,
            });
        }

        Ok(Node::TryStatement {
            block: Box::new(block),
            handler,
            finalizer,
        })
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// Check for `[async] function[*] name`, which is a declaration rather
    /// than an expression statement.
    fn starts_function_declaration(&self) -> ParseResult<bool> {
        let mut scanner = self.scanner.clone();
        let mut next = scanner.next_token()?;
        if self.at(TokenKind::Async) {
            if !matches!(next.kind, TokenKind::Function | TokenKind::FunctionStar) {
                return Ok(false);
            }
            next = scanner.next_token()?;
        }
        Ok(next.kind == TokenKind::Identifier)
    }

    /// Consume `function` or `function*`, returning whether it was a generator.
    fn function_keyword(&mut self) -> ParseResult<bool> {
        match self.lookahead.kind {
            TokenKind::Function => {
                self.advance()?;
                Ok(false)
            }
            TokenKind::FunctionStar => {
                self.advance()?;
                Ok(true)
            }
            _ => Err(self.mismatch(TokenKind::Function)),
        }
    }

    fn function_declaration(&mut self) -> ParseResult<Node> {
        let is_async = self.eat_if(TokenKind::Async)?;
        let generator = self.function_keyword()?;
        let id = self.identifier()?;
        let params = self.function_params()?;
        let body = self.function_body()?;

        Ok(Node::FunctionDeclaration {
            id: Box::new(id),
            generator,
            is_async,
            params,
            body: Box::new(body),
        })
    }

    fn function_expression(&mut self, is_async: bool) -> ParseResult<Node> {
        let generator = self.function_keyword()?;
        let id = if self.at(TokenKind::Identifier) {
            Some(Box::new(self.identifier()?))
        } else {
            None
        };
        let params = self.function_params()?;
        let body = self.function_body()?;

        Ok(Node::FunctionExpression {
            id,
            generator,
            is_async,
            params,
            body: Box::new(body),
        })
    }

    /// `(a, b = 1)`: identifiers, each with an optional default.
    fn function_params(&mut self) -> ParseResult<Vec<Node>> {
        self.eat(TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.at(TokenKind::RParen) {
            let name = self.identifier()?;
            let param = if self.eat_if(TokenKind::Assignment)? {
                Node::AssignmentPattern {
                    left: Box::new(name),
                    right: Box::new(self.assignment_expression()?),
                }
            } else {
                name
            };
            params.push(param);

            if !self.at(TokenKind::RParen) {
                self.eat(TokenKind::Comma)?;
            }
        }
        self.eat(TokenKind::RParen)?;
        Ok(params)
    }

    fn function_body(&mut self) -> ParseResult<Node> {
        self.function_context(Self::block_statement)
    }

    /// Parse `=> body` for the given parameters.
    fn arrow_function(&mut self, params: Vec<Node>, is_async: bool) -> ParseResult<Node> {
        self.eat(TokenKind::Arrow)?;
        let body = self.function_context(|parser| {
            if parser.at(TokenKind::LBrace) {
                parser.block_statement()
            } else {
                parser.yield_expression()
            }
        })?;

        Ok(Node::ArrowFunctionExpression {
            generator: false,
            is_async,
            params,
            body: Box::new(body),
        })
    }

    /// Expressions after `async`: a function, an arrow with parenthesized
    /// parameters, or an arrow with a single bare parameter.
    fn async_expression(&mut self) -> ParseResult<Node> {
        let keyword = self.eat(TokenKind::Async)?;
        let invalid = ParseError::InvalidAsync { span: keyword.span };

        match self.lookahead.kind {
            TokenKind::Function | TokenKind::FunctionStar => self.function_expression(true),
            TokenKind::LParen => match self.parenthesized_or_arrow()? {
                Node::ArrowFunctionExpression {
                    generator,
                    params,
                    body,
                    ..
                } => Ok(Node::ArrowFunctionExpression {
                    generator,
                    is_async: true,
                    params,
                    body,
                }),
                _ => Err(invalid),
            },
            TokenKind::Identifier => {
                let param = self.identifier()?;
                if !self.at(TokenKind::Arrow) {
                    return Err(invalid);
                }
                self.arrow_function(vec![param], true)
            }
            _ => Err(invalid),
        }
    }

    // =========================================================================
    // Classes
    // =========================================================================

    fn class_declaration(&mut self) -> ParseResult<Node> {
        self.eat(TokenKind::Class)?;
        let id = self.identifier()?;

        let super_class = if self.eat_if(TokenKind::Extends)? {
            let base = self.identifier()?;
            Some(Box::new(self.suffixes(base, false)?))
        } else {
            None
        };

        self.eat(TokenKind::LBrace)?;
        let mut members = Vec::new();
        while !self.at(TokenKind::RBrace) {
            if self.eat_if(TokenKind::Semicolon)? {
                continue;
            }
            if self.at(TokenKind::EndOfFile) {
                return Err(self.mismatch(TokenKind::RBrace));
            }
            members.push(self.class_member()?);
        }
        self.eat(TokenKind::RBrace)?;

        Ok(Node::ClassDeclaration {
            id: Box::new(id),
            super_class,
            body: Box::new(Node::ClassBody { body: members }),
        })
    }

    fn class_member(&mut self) -> ParseResult<Node> {
        let start = self.lookahead.span;
        let is_static = self.eat_modifier(TokenKind::Static)?;
        let is_async = self.eat_modifier(TokenKind::Async)?;
        let generator = self.eat_star()?;
        let private = self.eat_if(TokenKind::Hash)?;

        if !(self.at(TokenKind::Identifier) || self.lookahead.kind.is_keyword()) {
            return Err(ParseError::InvalidClassStatement {
                span: self.lookahead.span,
            });
        }
        let name = self.advance()?.text;
        let is_constructor = !private && name == "constructor";
        let key = if private {
            Node::PrivateName {
                id: Box::new(Node::identifier(name)),
            }
        } else {
            Node::identifier(name)
        };

        if self.at(TokenKind::LParen) {
            let params = self.function_params()?;
            let body = self.function_body()?;
            let kind = if is_constructor {
                MethodKind::Constructor
            } else {
                MethodKind::Method
            };
            return Ok(Node::ClassMethodDefinition {
                key: Box::new(key),
                is_static,
                kind,
                value: Box::new(Node::FunctionExpression {
                    id: None,
                    generator,
                    is_async,
                    params,
                    body: Box::new(body),
                }),
            });
        }

        if is_async || generator {
            return Err(ParseError::InvalidClassStatement {
                span: start.merge(self.lookahead.span),
            });
        }

        let value = if self.eat_if(TokenKind::Assignment)? {
            Some(Box::new(self.assignment_expression()?))
        } else {
            None
        };
        self.eat_if(TokenKind::Semicolon)?;

        let key = Box::new(key);
        Ok(if private {
            Node::ClassPrivateProperty {
                key,
                value,
                is_static,
            }
        } else {
            Node::ClassProperty {
                key,
                value,
                is_static,
            }
        })
    }

    /// Consume `static` or `async` in front of a class member, unless the
    /// keyword is itself the member name (`static() {}`, `async = 1`).
    fn eat_modifier(&mut self, kind: TokenKind) -> ParseResult<bool> {
        if !self.at(kind) {
            return Ok(false);
        }
        let next = self.scanner.peek()?;
        if matches!(
            next.kind,
            TokenKind::LParen | TokenKind::Assignment | TokenKind::Semicolon | TokenKind::RBrace
        ) {
            return Ok(false);
        }
        self.advance()?;
        Ok(true)
    }

    /// Consume a generator `*` in front of a method name.
    fn eat_star(&mut self) -> ParseResult<bool> {
        if self.at(TokenKind::Multiplicative) && self.lookahead.text == "*" {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn sequence_expression(&mut self) -> ParseResult<Node> {
        let first = self.yield_expression()?;
        if !self.at(TokenKind::Comma) {
            return Ok(first);
        }

        let mut expressions = vec![first];
        while self.eat_if(TokenKind::Comma)? {
            expressions.push(self.yield_expression()?);
        }
        Ok(Node::SequenceExpression { expressions })
    }

    fn yield_expression(&mut self) -> ParseResult<Node> {
        if !self.at(TokenKind::Yield) {
            return self.assignment_expression();
        }
        self.eat(TokenKind::Yield)?;

        let argument = if self.lookahead.kind.ends_argument() {
            None
        } else {
            Some(Box::new(self.assignment_expression()?))
        };
        Ok(Node::YieldExpression { argument })
    }

    fn assignment_expression(&mut self) -> ParseResult<Node> {
        let id = self.logical_or_expression()?;

        let complex = match self.lookahead.kind {
            TokenKind::Assignment => false,
            TokenKind::ComplexAssignment => true,
            _ => return Ok(id),
        };
        if !id.is_assignment_target() {
            return Err(ParseError::InvalidLeftHandSide {
                span: self.lookahead.span,
            });
        }

        let token = self.advance()?;
        let operator = operator(&token, AssignmentOperator::from_text)?;
        let value = self.nested(Self::yield_expression)?;

        let (id, value) = (Box::new(id), Box::new(value));
        Ok(if complex {
            Node::ComplexAssignmentExpression {
                id,
                operator,
                value,
            }
        } else {
            Node::AssignmentExpression {
                id,
                operator,
                value,
            }
        })
    }

    fn logical_or_expression(&mut self) -> ParseResult<Node> {
        self.logical_level(TokenKind::LogicalOrNullish, Self::logical_and_expression)
    }

    fn logical_and_expression(&mut self) -> ParseResult<Node> {
        self.logical_level(TokenKind::LogicalAnd, Self::bitwise_or_expression)
    }

    fn bitwise_or_expression(&mut self) -> ParseResult<Node> {
        self.binary_level(TokenKind::BitwiseOr, Self::bitwise_xor_expression)
    }

    fn bitwise_xor_expression(&mut self) -> ParseResult<Node> {
        self.binary_level(TokenKind::BitwiseXor, Self::bitwise_and_expression)
    }

    fn bitwise_and_expression(&mut self) -> ParseResult<Node> {
        self.binary_level(TokenKind::BitwiseAnd, Self::equality_expression)
    }

    fn equality_expression(&mut self) -> ParseResult<Node> {
        self.binary_level(TokenKind::Equality, Self::comparison_expression)
    }

    fn comparison_expression(&mut self) -> ParseResult<Node> {
        self.binary_level(TokenKind::Comparison, Self::additive_expression)
    }

    fn additive_expression(&mut self) -> ParseResult<Node> {
        self.binary_level(TokenKind::Additive, Self::multiplicative_expression)
    }

    fn multiplicative_expression(&mut self) -> ParseResult<Node> {
        self.binary_level(TokenKind::Multiplicative, Self::power_expression)
    }

    fn power_expression(&mut self) -> ParseResult<Node> {
        let left = self.unary_expression()?;
        if !self.at(TokenKind::Power) {
            return Ok(left);
        }

        let token = self.advance()?;
        let operator = operator(&token, BinaryOperator::from_text)?;
        let right = self.nested(Self::power_expression)?;
        Ok(Node::BinaryExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    /// Left-associative `BinaryExpression` level over `next`.
    fn binary_level(
        &mut self,
        kind: TokenKind,
        next: fn(&mut Self) -> ParseResult<Node>,
    ) -> ParseResult<Node> {
        let mut left = next(self)?;
        while self.at(kind) {
            let token = self.advance()?;
            let operator = operator(&token, BinaryOperator::from_text)?;
            let right = next(self)?;
            left = Node::BinaryExpression {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Left-associative `LogicalExpression` level over `next`.
    fn logical_level(
        &mut self,
        kind: TokenKind,
        next: fn(&mut Self) -> ParseResult<Node>,
    ) -> ParseResult<Node> {
        let mut left = next(self)?;
        while self.at(kind) {
            let token = self.advance()?;
            let operator = operator(&token, LogicalOperator::from_text)?;
            let right = next(self)?;
            left = Node::LogicalExpression {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn unary_expression(&mut self) -> ParseResult<Node> {
        self.nested(Self::unary_operand)
    }

    fn unary_operand(&mut self) -> ParseResult<Node> {
        match self.lookahead.kind {
            TokenKind::Bang | TokenKind::Additive => {
                let token = self.advance()?;
                let operator = operator(&token, UnaryOperator::from_text)?;
                let argument = self.unary_expression()?;
                Ok(Node::UnaryExpression {
                    operator,
                    argument: Box::new(argument),
                })
            }
            TokenKind::IncrementDecrement => {
                let token = self.advance()?;
                let operator = operator(&token, UpdateOperator::from_text)?;
                let argument = self.unary_expression()?;
                if !argument.is_assignment_target() {
                    return Err(ParseError::InvalidLeftHandSide { span: token.span });
                }
                Ok(Node::UpdateExpression {
                    operator,
                    prefix: true,
                    argument: Box::new(argument),
                })
            }
            TokenKind::Await => {
                self.advance()?;
                let argument = self.unary_expression()?;
                Ok(Node::AwaitExpression {
                    argument: Box::new(argument),
                })
            }
            _ => self.postfix_expression(),
        }
    }

    fn postfix_expression(&mut self) -> ParseResult<Node> {
        let base = if self.at(TokenKind::New) {
            self.new_expression()?
        } else {
            self.primary_expression()?
        };
        let expression = self.suffixes(base, true)?;

        if !self.at(TokenKind::IncrementDecrement) {
            return Ok(expression);
        }
        if !expression.is_assignment_target() {
            return Err(ParseError::InvalidLeftHandSide {
                span: self.lookahead.span,
            });
        }
        let token = self.advance()?;
        Ok(Node::UpdateExpression {
            operator: operator(&token, UpdateOperator::from_text)?,
            prefix: false,
            argument: Box::new(expression),
        })
    }

    /// `new Callee(args)`. The callee takes member accesses but no calls, so
    /// the first argument list belongs to `new`.
    fn new_expression(&mut self) -> ParseResult<Node> {
        self.eat(TokenKind::New)?;
        let callee = if self.at(TokenKind::New) {
            self.nested(Self::new_expression)?
        } else {
            self.primary_expression()?
        };
        let callee = self.suffixes(callee, false)?;
        let arguments = if self.at(TokenKind::LParen) {
            self.arguments()?
        } else {
            Vec::new()
        };

        Ok(Node::NewExpression {
            callee: Box::new(callee),
            arguments,
        })
    }

    /// Fold `.name`, `[expr]`, `?.` and `(args)` suffixes onto `node`, left
    /// to right.
    fn suffixes(&mut self, mut node: Node, allow_calls: bool) -> ParseResult<Node> {
        loop {
            node = match self.lookahead.kind {
                TokenKind::Dot => {
                    self.advance()?;
                    let property = self.member_name()?;
                    Node::MemberExpression {
                        object: Box::new(node),
                        property: Box::new(property),
                        computed: false,
                    }
                }
                TokenKind::LBracket => {
                    self.advance()?;
                    let property = self.sequence_expression()?;
                    self.eat(TokenKind::RBracket)?;
                    Node::MemberExpression {
                        object: Box::new(node),
                        property: Box::new(property),
                        computed: true,
                    }
                }
                TokenKind::QuestionDot if allow_calls => {
                    self.advance()?;
                    self.optional_suffix(node)?
                }
                TokenKind::LParen if allow_calls => Node::CallExpression {
                    callee: Box::new(node),
                    arguments: self.arguments()?,
                },
                _ => return Ok(node),
            };
        }
    }

    /// The part after `?.`: `(args)`, `[expr]` or a name.
    fn optional_suffix(&mut self, node: Node) -> ParseResult<Node> {
        match self.lookahead.kind {
            TokenKind::LParen => Ok(Node::OptionalCallExpression {
                callee: Box::new(node),
                arguments: self.arguments()?,
                optional: true,
            }),
            TokenKind::LBracket => {
                self.advance()?;
                let property = self.sequence_expression()?;
                self.eat(TokenKind::RBracket)?;
                Ok(Node::OptionalMemberExpression {
                    object: Box::new(node),
                    property: Box::new(property),
                    computed: true,
                    optional: true,
                })
            }
            _ => Ok(Node::OptionalMemberExpression {
                object: Box::new(node),
                property: Box::new(self.member_name()?),
                computed: false,
                optional: true,
            }),
        }
    }

    /// A property name after `.`; reserved words and `#private` names are allowed.
    fn member_name(&mut self) -> ParseResult<Node> {
        if self.eat_if(TokenKind::Hash)? {
            return Ok(Node::PrivateName {
                id: Box::new(self.identifier()?),
            });
        }
        if self.lookahead.kind.is_keyword() {
            return Ok(Node::identifier(self.advance()?.text));
        }
        self.identifier()
    }

    fn arguments(&mut self) -> ParseResult<Vec<Node>> {
        self.eat(TokenKind::LParen)?;
        let mut arguments = Vec::new();
        while !self.at(TokenKind::RParen) {
            arguments.push(self.yield_expression()?);
            if !self.at(TokenKind::RParen) {
                self.eat(TokenKind::Comma)?;
            }
        }
        self.eat(TokenKind::RParen)?;
        Ok(arguments)
    }

    // =========================================================================
    // Primary Expressions
    // =========================================================================

    fn primary_expression(&mut self) -> ParseResult<Node> {
        match self.lookahead.kind {
            TokenKind::Number => {
                let token = self.advance()?;
                let value = token.text.parse::<f64>().map_err(|_| ParseError::UnexpectedToken {
                    found: token.kind,
                    span: token.span,
                })?;
                Ok(Node::NumericLiteral { value })
            }
            TokenKind::BigInt => {
                let token = self.advance()?;
                Ok(Node::BigIntLiteral {
                    value: token.text.trim_end_matches('n').to_string(),
                })
            }
            TokenKind::String => {
                let token = self.advance()?;
                let text = &token.text;
                Ok(Node::StringLiteral {
                    value: text[1..text.len() - 1].to_string(),
                })
            }
            TokenKind::Regex => self.regex_literal(),
            TokenKind::Boolean => {
                let token = self.advance()?;
                Ok(Node::BooleanLiteral {
                    value: token.text == "true",
                })
            }
            TokenKind::Null => {
                self.advance()?;
                Ok(Node::NullLiteral)
            }
            TokenKind::Undefined => {
                self.advance()?;
                Ok(Node::UndefinedLiteral)
            }
            TokenKind::This => {
                self.advance()?;
                Ok(Node::ThisExpression)
            }
            TokenKind::Backtick => self.template_literal(),
            TokenKind::LBracket => self.array_literal(),
            TokenKind::LBrace => self.object_literal(),
            TokenKind::LParen => self.parenthesized_or_arrow(),
            TokenKind::Identifier => {
                let id = self.identifier()?;
                if self.at(TokenKind::Arrow) {
                    return self.arrow_function(vec![id], false);
                }
                Ok(id)
            }
            TokenKind::Function | TokenKind::FunctionStar => self.function_expression(false),
            TokenKind::Async => self.async_expression(),
            TokenKind::Yield => self.yield_expression(),
            _ => Err(self.unexpected()),
        }
    }

    fn identifier(&mut self) -> ParseResult<Node> {
        let token = self.eat(TokenKind::Identifier)?;
        Ok(Node::identifier(token.text))
    }

    /// `/pattern/flags`. The scanner accepts any letters as flags; only the
    /// ones JavaScript defines are allowed here.
    fn regex_literal(&mut self) -> ParseResult<Node> {
        const FLAGS: &str = "dgimsuy";

        let token = self.eat(TokenKind::Regex)?;
        let close = token.text.rfind('/').unwrap_or(0);
        let pattern = token.text.get(1..close).unwrap_or_default();
        let flags = &token.text[close + 1..];

        if let Some(flag) = flags.chars().find(|c| !FLAGS.contains(*c)) {
            return Err(ParseError::InvalidRegexFlag {
                flag,
                span: token.span,
            });
        }

        Ok(Node::RegExpLiteral {
            pattern: pattern.to_string(),
            flags: flags.to_string(),
        })
    }

    /// A template literal. Text segments are read through the template
    /// scanner; each `${` switches back to expression mode until its `}`.
    fn template_literal(&mut self) -> ParseResult<Node> {
        trace!(pos = self.scanner.pos(), "template literal start");
        self.eat_in_template(TokenKind::Backtick)?;

        let mut expressions = Vec::new();
        let mut quasis = Vec::new();
        // Set while the next text segment has not been seen yet, so that an
        // empty segment still gets an element.
        let mut expect_quasi = true;

        loop {
            match self.lookahead.kind {
                TokenKind::TemplateString => {
                    let token = self.eat_in_template(TokenKind::TemplateString)?;
                    quasis.push(Node::TemplateElement { value: token.text });
                    expect_quasi = false;
                }
                TokenKind::DollarBrace => {
                    let token = self.eat(TokenKind::DollarBrace)?;
                    quasis.push(Node::TemplateElement { value: token.text });
                    self.eat(TokenKind::LBrace)?;
                    expressions.push(self.sequence_expression()?);
                    self.eat_in_template(TokenKind::RBrace)?;
                    expect_quasi = true;
                }
                TokenKind::Backtick => {
                    if expect_quasi {
                        quasis.push(Node::TemplateElement {
                            value: String::new(),
                        });
                    }
                    self.eat(TokenKind::Backtick)?;
                    break;
                }
                _ => return Err(self.mismatch(TokenKind::Backtick)),
            }
        }

        trace!(
            expressions = expressions.len(),
            pos = self.scanner.pos(),
            "template literal end"
        );
        Ok(Node::TemplateLiteral {
            expressions,
            quasis,
        })
    }

    fn array_literal(&mut self) -> ParseResult<Node> {
        self.eat(TokenKind::LBracket)?;
        let mut elements = Vec::new();
        while !self.at(TokenKind::RBracket) {
            elements.push(self.yield_expression()?);
            if !self.at(TokenKind::RBracket) {
                self.eat(TokenKind::Comma)?;
            }
        }
        self.eat(TokenKind::RBracket)?;
        Ok(Node::ArrayLiteral { elements })
    }

    fn object_literal(&mut self) -> ParseResult<Node> {
        self.eat(TokenKind::LBrace)?;
        let mut properties = Vec::new();
        while !self.at(TokenKind::RBrace) {
            properties.push(self.property()?);
            if !self.at(TokenKind::RBrace) {
                self.eat(TokenKind::Comma)?;
            }
        }
        self.eat(TokenKind::RBrace)?;
        Ok(Node::ObjectLiteral { properties })
    }

    /// One object literal member: `key: value`, a method, or a shorthand `key`.
    fn property(&mut self) -> ParseResult<Node> {
        let mut is_async = false;
        if self.at(TokenKind::Async) {
            let next = self.scanner.peek()?;
            if !matches!(
                next.kind,
                TokenKind::Colon | TokenKind::LParen | TokenKind::Comma | TokenKind::RBrace
            ) {
                self.advance()?;
                is_async = true;
            }
        }
        let generator = self.eat_star()?;

        let (key, computed) = if self.eat_if(TokenKind::LBracket)? {
            let key = self.yield_expression()?;
            self.eat(TokenKind::RBracket)?;
            (key, true)
        } else {
            (self.property_key()?, false)
        };

        if self.at(TokenKind::LParen) || is_async || generator {
            let params = self.function_params()?;
            let body = self.function_body()?;
            return Ok(Node::Property {
                key: Box::new(key),
                value: Box::new(Node::FunctionExpression {
                    id: None,
                    generator,
                    is_async,
                    params,
                    body: Box::new(body),
                }),
                computed,
                method: true,
            });
        }

        let shorthand = !computed
            && matches!(key, Node::Identifier { .. })
            && matches!(self.lookahead.kind, TokenKind::Comma | TokenKind::RBrace);
        let value = if shorthand {
            key.clone()
        } else {
            self.eat(TokenKind::Colon)?;
            self.yield_expression()?
        };

        Ok(Node::Property {
            key: Box::new(key),
            value: Box::new(value),
            computed,
            method: false,
        })
    }

    fn property_key(&mut self) -> ParseResult<Node> {
        match self.lookahead.kind {
            TokenKind::Identifier => self.identifier(),
            TokenKind::String | TokenKind::Number => self.primary_expression(),
            kind if kind.is_keyword() => Ok(Node::identifier(self.advance()?.text)),
            _ => Err(self.unexpected()),
        }
    }

    /// `(` starts either a parenthesized expression or an arrow function's
    /// parameter list. The contents are parsed as an expression first and
    /// reinterpreted as parameters if `=>` follows the `)`.
    fn parenthesized_or_arrow(&mut self) -> ParseResult<Node> {
        let open = self.eat(TokenKind::LParen)?;

        if self.eat_if(TokenKind::RParen)? {
            if !self.at(TokenKind::Arrow) {
                return Err(self.mismatch(TokenKind::Arrow));
            }
            return self.arrow_function(Vec::new(), false);
        }

        let body = self.sequence_expression()?;
        let close = self.eat(TokenKind::RParen)?;

        if self.at(TokenKind::Arrow) {
            let params = arrow_params(body, open.span.merge(close.span))?;
            return self.arrow_function(params, false);
        }

        Ok(Node::ParenthesizedExpression {
            body: Box::new(body),
        })
    }
}

/// Convert the contents of `( ... )` into arrow function parameters.
fn arrow_params(node: Node, span: Span) -> ParseResult<Vec<Node>> {
    match node {
        Node::SequenceExpression { expressions } => expressions
            .into_iter()
            .map(|expression| arrow_param(expression, span))
            .collect(),
        other => Ok(vec![arrow_param(other, span)?]),
    }
}

fn arrow_param(node: Node, span: Span) -> ParseResult<Node> {
    match node {
        Node::Identifier { .. } => Ok(node),
        Node::AssignmentExpression { id, value, .. } if matches!(*id, Node::Identifier { .. }) => {
            Ok(Node::AssignmentPattern {
                left: id,
                right: value,
            })
        }
        _ => Err(ParseError::InvalidFunctionParameters { span }),
    }
}

/// Read an operator back out of its token text.
fn operator<T>(token: &Token, from_text: fn(&str) -> Option<T>) -> ParseResult<T> {
    from_text(&token.text).ok_or(ParseError::UnexpectedToken {
        found: token.kind,
        span: token.span,
    })
}
