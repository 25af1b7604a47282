//! Scanner (tokenizer).
//!
//! The scanner is driven by the parser one token at a time. In expression
//! mode it walks an ordered rule table and the first rule whose pattern
//! matches at the cursor wins, so the table order decides every lexical
//! ambiguity:
//!
//! - a `/` that has a closing `/` on the same line is a regex literal, not
//!   division, because the regex rule comes before the multiplicative rule;
//! - `function*` is tried before `function`;
//! - multi-character operators come before their one-character prefixes;
//! - keywords match on word boundaries and come before identifiers, so
//!   `forEach` is one identifier.
//!
//! Template literal bodies are free text, so the parser switches to
//! [`Scanner::next_template_token`] while it is between the backticks.

use std::sync::OnceLock;

use regex_lite::Regex;

use crate::error::{ParseError, ParseResult};
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Rule table in match order. `None` marks skippable input.
const RULE_TABLE: &[(&str, Option<TokenKind>)] = &[
    // Whitespace and comments
    (r"^\s+", None),
    (r"^//.*", None),
    (r"(?s)^/\*.*?\*/", None),
    // Literals
    (r"^\d+n", Some(TokenKind::BigInt)),
    (r"^\d+(?:\.\d+)?(?:[eE][+-]?\d+)?", Some(TokenKind::Number)),
    (r"^'.*'", Some(TokenKind::String)),
    (r#"^".*""#, Some(TokenKind::String)),
    (r"^/(?:\\.|[^/\\\n])+/[a-z]*", Some(TokenKind::Regex)),
    // Punctuation
    (r"^;", Some(TokenKind::Semicolon)),
    (r"^\{", Some(TokenKind::LBrace)),
    (r"^\}", Some(TokenKind::RBrace)),
    (r"^\[", Some(TokenKind::LBracket)),
    (r"^\]", Some(TokenKind::RBracket)),
    (r"^\(", Some(TokenKind::LParen)),
    (r"^\)", Some(TokenKind::RParen)),
    (r"^\.", Some(TokenKind::Dot)),
    (r"^,", Some(TokenKind::Comma)),
    (r"^:", Some(TokenKind::Colon)),
    (r"^#", Some(TokenKind::Hash)),
    (r"^`", Some(TokenKind::Backtick)),
    (r"^=>", Some(TokenKind::Arrow)),
    (r"^\$\{", Some(TokenKind::DollarBrace)),
    // Operators
    (r"^&&", Some(TokenKind::LogicalAnd)),
    (r"^(?:\|\||\?\?)", Some(TokenKind::LogicalOrNullish)),
    (r"^\?\.", Some(TokenKind::QuestionDot)),
    (r"^\|", Some(TokenKind::BitwiseOr)),
    (r"^&", Some(TokenKind::BitwiseAnd)),
    (r"^\^", Some(TokenKind::BitwiseXor)),
    (r"^\*\*", Some(TokenKind::Power)),
    (r"^(?:>=|<=|>|<)", Some(TokenKind::Comparison)),
    (r"^(?:===|!==|==|!=)", Some(TokenKind::Equality)),
    (r"^=", Some(TokenKind::Assignment)),
    (r"^[+\-*/]=", Some(TokenKind::ComplexAssignment)),
    (r"^(?:\+\+|--)", Some(TokenKind::IncrementDecrement)),
    (r"^!", Some(TokenKind::Bang)),
    (r"^[+\-]", Some(TokenKind::Additive)),
    (r"^[*/]", Some(TokenKind::Multiplicative)),
    // Keywords
    (r"^\b(?:let|const)\b", Some(TokenKind::LetOrConst)),
    (r"^\bif\b", Some(TokenKind::If)),
    (r"^\belse\b", Some(TokenKind::Else)),
    (r"^\bof\b", Some(TokenKind::Of)),
    (r"^\bfor\b", Some(TokenKind::For)),
    (r"^\bwhile\b", Some(TokenKind::While)),
    (r"^\bdo\b", Some(TokenKind::Do)),
    (r"^\bcontinue\b", Some(TokenKind::Continue)),
    (r"^\bbreak\b", Some(TokenKind::Break)),
    (r"^\basync\b", Some(TokenKind::Async)),
    (r"^\bawait\b", Some(TokenKind::Await)),
    (r"^\byield\b", Some(TokenKind::Yield)),
    (r"^\bthis\b", Some(TokenKind::This)),
    (r"^\bthrow\b", Some(TokenKind::Throw)),
    (r"^\btry\b", Some(TokenKind::Try)),
    (r"^\bcatch\b", Some(TokenKind::Catch)),
    (r"^\bfinally\b", Some(TokenKind::Finally)),
    (r"^function\s*\*", Some(TokenKind::FunctionStar)),
    (r"^\bfunction\b", Some(TokenKind::Function)),
    (r"^\breturn\b", Some(TokenKind::Return)),
    (r"^\b(?:true|false)\b", Some(TokenKind::Boolean)),
    (r"^\bclass\b", Some(TokenKind::Class)),
    (r"^\bstatic\b", Some(TokenKind::Static)),
    (r"^\bextends\b", Some(TokenKind::Extends)),
    (r"^\bnull\b", Some(TokenKind::Null)),
    (r"^\bundefined\b", Some(TokenKind::Undefined)),
    (r"^\bnew\b", Some(TokenKind::New)),
    // Identifiers
    (r"^[A-Za-z_$][\w$]*", Some(TokenKind::Identifier)),
];

struct Rule {
    pattern: Regex,
    kind: Option<TokenKind>,
}

fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        RULE_TABLE
            .iter()
            .map(|&(pattern, kind)| Rule {
                pattern: Regex::new(pattern).expect("rule table patterns are valid"),
                kind,
            })
            .collect()
    })
}

/// The scanner state: the source and a byte cursor into it.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// Get the current byte position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Check if the whole input has been consumed.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Scan the next token in expression mode.
    ///
    /// Returns `EndOfFile` once the input is exhausted, on every call.
    pub fn next_token(&mut self) -> ParseResult<Token> {
        'scan: loop {
            let rest = &self.source[self.pos..];
            if rest.is_empty() {
                return Ok(Token::eof(self.pos as u32));
            }

            for rule in rules() {
                let Some(found) = rule.pattern.find(rest) else {
                    continue;
                };
                let start = self.pos;
                self.pos += found.end();
                match rule.kind {
                    None => continue 'scan,
                    Some(kind) => {
                        return Ok(Token::new(kind, found.as_str(), self.span_from(start)));
                    }
                }
            }

            let character = rest.chars().next().unwrap_or_default();
            let end = self.pos + character.len_utf8();
            return Err(ParseError::UnsupportedToken {
                character,
                span: Span::new(self.pos as u32, end as u32),
            });
        }
    }

    /// Peek at the next expression-mode token without consuming it.
    pub fn peek(&self) -> ParseResult<Token> {
        self.clone().next_token()
    }

    /// Scan the next piece of a template literal body.
    ///
    /// - a leading backtick closes the literal (`Backtick`);
    /// - a leading `}` marks a segment boundary (`RBrace`);
    /// - text up to an unescaped `${` is returned as `DollarBrace`, leaving
    ///   the cursor on the `{` so expression mode resumes there;
    /// - otherwise the text up to the next unescaped backtick (or the end of
    ///   input) is a `TemplateString`;
    /// - an exhausted input yields `EndOfFile`.
    pub fn next_template_token(&mut self) -> Token {
        let start = self.pos;
        let rest = &self.source[start..];
        if rest.is_empty() {
            return Token::eof(start as u32);
        }

        if rest.starts_with('`') {
            self.pos += 1;
            return Token::new(TokenKind::Backtick, "`", self.span_from(start));
        }
        if rest.starts_with('}') {
            self.pos += 1;
            return Token::new(TokenKind::RBrace, "}", self.span_from(start));
        }

        let bytes = rest.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b'`' => break,
                b'$' if bytes.get(i + 1) == Some(&b'{') => {
                    self.pos = start + i + 1;
                    let span = Span::new(start as u32, (start + i) as u32);
                    return Token::new(TokenKind::DollarBrace, &rest[..i], span);
                }
                _ => i += 1,
            }
        }

        let end = i.min(bytes.len());
        self.pos = start + end;
        Token::new(TokenKind::TemplateString, &rest[..end], self.span_from(start))
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start as u32, self.pos as u32)
    }
}

/// Scan a whole source in expression mode, up to and including `EndOfFile`.
pub fn tokenize(source: &str) -> ParseResult<Vec<Token>> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token()?;
        let done = token.kind == TokenKind::EndOfFile;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    fn texts(source: &str) -> Vec<String> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|token| token.text)
            .collect()
    }

    #[test]
    fn test_skips_whitespace_and_comments() {
        assert_eq!(
            kinds("  // line\n /* block\n comment */ a /* b */ 1"),
            vec![TokenKind::Identifier, TokenKind::Number, TokenKind::EndOfFile]
        );
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut scanner = Scanner::new("x");
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Identifier);
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::EndOfFile);
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::EndOfFile);
        assert!(scanner.is_eof());
    }

    #[test]
    fn test_numbers_and_bigints() {
        let tokens = tokenize("10n 42 3.5 1e3").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::BigInt);
        assert_eq!(tokens[0].text, "10n");
        assert_eq!(tokens[1].kind, TokenKind::Number);
        assert_eq!(tokens[2].text, "3.5");
        assert_eq!(tokens[3].text, "1e3");
    }

    #[test]
    fn test_strings_are_greedy_to_last_quote() {
        assert_eq!(texts("'a' + 'b'")[0], "'a' + 'b'");
        assert_eq!(texts("\"abc\";")[0], "\"abc\"");
    }

    #[test]
    fn test_regex_before_division() {
        let tokens = tokenize("/aa/id").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Regex);
        assert_eq!(tokens[0].text, "/aa/id");

        // No closing slash on the line: plain division.
        assert_eq!(
            kinds("10 / 2"),
            vec![
                TokenKind::Number,
                TokenKind::Multiplicative,
                TokenKind::Number,
                TokenKind::EndOfFile
            ]
        );
        assert_eq!(texts(r"/a\/b/g")[0], r"/a\/b/g");
    }

    #[test]
    fn test_longest_operators_first() {
        assert_eq!(
            texts("a === b !== c ** d += e ++ f => g ?. h ?? i"),
            vec![
                "a", "===", "b", "!==", "c", "**", "d", "+=", "e", "++", "f", "=>", "g", "?.",
                "h", "??", "i", ""
            ]
        );
        assert_eq!(kinds("<=")[0], TokenKind::Comparison);
        assert_eq!(kinds("!")[0], TokenKind::Bang);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("forEach for iffy if constant const"),
            vec![
                TokenKind::Identifier,
                TokenKind::For,
                TokenKind::Identifier,
                TokenKind::If,
                TokenKind::Identifier,
                TokenKind::LetOrConst,
                TokenKind::EndOfFile
            ]
        );
        assert_eq!(kinds("function* gen")[0], TokenKind::FunctionStar);
        assert_eq!(kinds("function *gen")[0], TokenKind::FunctionStar);
        assert_eq!(kinds("function gen")[0], TokenKind::Function);
        assert_eq!(kinds("$el _x")[..2], [TokenKind::Identifier, TokenKind::Identifier]);
        assert_eq!(
            kinds("true null undefined")[..3],
            [TokenKind::Boolean, TokenKind::Null, TokenKind::Undefined]
        );
    }

    #[test]
    fn test_unsupported_token() {
        let err = tokenize("a @ b").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnsupportedToken {
                character: '@',
                span: Span::new(2, 3),
            }
        );
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("let  x").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens[1].span, Span::new(5, 6));
        assert_eq!(tokens[2].span, Span::empty(6));

        let source = "total += items[i] ** 2 // done";
        for token in tokenize(source).unwrap() {
            assert_eq!(token.span.text(source), token.text);
        }
    }

    #[test]
    fn test_peek_does_not_advance() {
        let scanner = Scanner::new("a b");
        assert_eq!(scanner.peek().unwrap().text, "a");
        assert_eq!(scanner.pos(), 0);
    }

    #[test]
    fn test_template_mode() {
        let mut scanner = Scanner::new("`head ${a} tail`");
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Backtick);

        let head = scanner.next_template_token();
        assert_eq!(head.kind, TokenKind::DollarBrace);
        assert_eq!(head.text, "head ");

        // Expression mode resumes on the `{`.
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::LBrace);
        assert_eq!(scanner.next_token().unwrap().text, "a");
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::RBrace);

        let tail = scanner.next_template_token();
        assert_eq!(tail.kind, TokenKind::TemplateString);
        assert_eq!(tail.text, " tail");
        assert_eq!(scanner.next_template_token().kind, TokenKind::Backtick);
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::EndOfFile);
    }

    #[test]
    fn test_template_mode_boundaries() {
        let mut scanner = Scanner::new("}rest`");
        assert_eq!(scanner.next_template_token().kind, TokenKind::RBrace);
        assert_eq!(scanner.next_template_token().text, "rest");

        let mut scanner = Scanner::new(r"a \${b} \` c`");
        let segment = scanner.next_template_token();
        assert_eq!(segment.kind, TokenKind::TemplateString);
        assert_eq!(segment.text, r"a \${b} \` c");

        let mut scanner = Scanner::new("unterminated");
        let segment = scanner.next_template_token();
        assert_eq!(segment.text, "unterminated");
        assert!(scanner.is_eof());
        assert_eq!(scanner.next_template_token().kind, TokenKind::EndOfFile);
    }
}
