//! Helpers shared by the integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use tern_parser::{parse, ParseError};

/// Parse `source` and serialize the resulting `Program` to JSON.
pub fn ast(source: &str) -> Value {
    let program = parse(source).unwrap_or_else(|e| panic!("failed to parse {source:?}: {e}"));
    serde_json::to_value(&program).expect("AST serializes to JSON")
}

/// Parse `source`, expecting it to fail.
pub fn parse_error(source: &str) -> ParseError {
    parse(source).expect_err("expected a parse error")
}

pub fn program(body: Value) -> Value {
    json!({ "type": "Program", "body": body })
}

pub fn ident(name: &str) -> Value {
    json!({ "type": "Identifier", "name": name })
}

pub fn num(value: i64) -> Value {
    json!({ "type": "NumericLiteral", "value": value })
}

pub fn string(value: &str) -> Value {
    json!({ "type": "StringLiteral", "value": value })
}

pub fn block(body: Value) -> Value {
    json!({ "type": "BlockStatement", "body": body })
}

pub fn binary(left: Value, operator: &str, right: Value) -> Value {
    json!({ "type": "BinaryExpression", "left": left, "operator": operator, "right": right })
}

pub fn member(object: Value, property: Value, computed: bool) -> Value {
    json!({ "type": "MemberExpression", "object": object, "property": property, "computed": computed })
}

pub fn call(callee: Value, arguments: Value) -> Value {
    json!({ "type": "CallExpression", "callee": callee, "arguments": arguments })
}
