//! Declarations, blocks and control flow.

mod common;

use common::*;
use serde_json::{json, Value};

fn declaration(name: &str, value: Option<Value>, kind: &str) -> Value {
    match value {
        Some(value) => json!({ "type": "VariableDeclaration", "id": ident(name), "value": value, "kind": kind }),
        None => json!({ "type": "VariableDeclaration", "id": ident(name), "kind": kind }),
    }
}

fn update(operator: &str, prefix: bool, argument: Value) -> Value {
    json!({ "type": "UpdateExpression", "operator": operator, "prefix": prefix, "argument": argument })
}

#[test]
fn test_variable_declarations() {
    assert_eq!(
        ast("let x; const y = 20"),
        program(json!([
            declaration("x", None, "let"),
            declaration("y", Some(num(20)), "const"),
        ]))
    );
    assert_eq!(
        ast("const x = []"),
        program(json!([declaration(
            "x",
            Some(json!({ "type": "ArrayLiteral", "elements": [] })),
            "const"
        )]))
    );
}

#[test]
fn test_statement_lists() {
    assert_eq!(
        ast("a;\nb\n1;"),
        program(json!([ident("a"), ident("b"), num(1)]))
    );
}

#[test]
fn test_blocks() {
    assert_eq!(
        ast("{ 1; { } }"),
        program(json!([block(json!([num(1), block(json!([]))]))]))
    );
}

#[test]
fn test_if_else_chain() {
    assert_eq!(
        ast("if (x) {} else if (1+1<2) {} else {}"),
        program(json!([{
            "type": "IfStatement",
            "test": ident("x"),
            "consequent": block(json!([])),
            "alternate": {
                "type": "IfStatement",
                "test": binary(binary(num(1), "+", num(1)), "<", num(2)),
                "consequent": block(json!([])),
                "alternate": block(json!([])),
            },
        }]))
    );
}

#[test]
fn test_if_without_block() {
    assert_eq!(
        ast("if (ok) go()"),
        program(json!([{
            "type": "IfStatement",
            "test": ident("ok"),
            "consequent": call(ident("go"), json!([])),
        }]))
    );
}

#[test]
fn test_for_loop() {
    let source = "\n  for (let i=0; i<10; i++) {\n    console.log(i);\n  }\n";
    assert_eq!(
        ast(source),
        program(json!([{
            "type": "ForStatement",
            "init": declaration("i", Some(num(0)), "let"),
            "test": binary(ident("i"), "<", num(10)),
            "update": update("++", false, ident("i")),
            "body": block(json!([call(
                member(ident("console"), ident("log"), false),
                json!([ident("i")])
            )])),
        }]))
    );
}

#[test]
fn test_for_loop_with_empty_clauses() {
    assert_eq!(
        ast("for (;;) {}"),
        program(json!([{
            "type": "ForStatement",
            "init": null,
            "test": null,
            "update": null,
            "body": block(json!([])),
        }]))
    );
}

#[test]
fn test_for_loop_body_is_wrapped_in_block() {
    assert_eq!(
        ast("for (i = 0; i < n; i += 1) sum += i"),
        program(json!([{
            "type": "ForStatement",
            "init": { "type": "AssignmentExpression", "id": ident("i"), "operator": "=", "value": num(0) },
            "test": binary(ident("i"), "<", ident("n")),
            "update": { "type": "ComplexAssignmentExpression", "id": ident("i"), "operator": "+=", "value": num(1) },
            "body": block(json!([{
                "type": "ComplexAssignmentExpression",
                "id": ident("sum"),
                "operator": "+=",
                "value": ident("i"),
            }])),
        }]))
    );
}

#[test]
fn test_for_of_loop() {
    assert_eq!(
        ast("for (const item of items) { use(item) }"),
        program(json!([{
            "type": "ForOfStatement",
            "left": declaration("item", None, "const"),
            "right": ident("items"),
            "body": block(json!([call(ident("use"), json!([ident("item")]))])),
        }]))
    );
}

#[test]
fn test_while_loops() {
    assert_eq!(
        ast("while (x < 10) { x++ }"),
        program(json!([{
            "type": "WhileStatement",
            "test": binary(ident("x"), "<", num(10)),
            "body": block(json!([update("++", false, ident("x"))])),
        }]))
    );
    assert_eq!(
        ast("do { x-- } while (x)"),
        program(json!([{
            "type": "DoWhileStatement",
            "body": block(json!([update("--", false, ident("x"))])),
            "test": ident("x"),
        }]))
    );
}

#[test]
fn test_continue_and_break() {
    assert_eq!(
        ast("while (true) { continue; break }"),
        program(json!([{
            "type": "WhileStatement",
            "test": { "type": "BooleanLiteral", "value": true },
            "body": block(json!([
                { "type": "ContinueStatement" },
                { "type": "BreakStatement" },
            ])),
        }]))
    );
}

#[test]
fn test_throw_statement() {
    assert_eq!(
        ast("throw new Error('boom');"),
        program(json!([{
            "type": "ThrowStatement",
            "argument": {
                "type": "NewExpression",
                "callee": ident("Error"),
                "arguments": [string("boom")],
            },
        }]))
    );
}

#[test]
fn test_try_statements() {
    let handler = |param: Option<&str>| match param {
        Some(name) => json!({ "type": "CatchClause", "param": ident(name), "body": block(json!([])) }),
        None => json!({ "type": "CatchClause", "body": block(json!([])) }),
    };

    assert_eq!(
        ast("try {} catch(e) {} finally {}"),
        program(json!([{
            "type": "TryStatement",
            "block": block(json!([])),
            "handler": handler(Some("e")),
            "finalizer": block(json!([])),
        }]))
    );
    assert_eq!(
        ast("try {} catch {}"),
        program(json!([{
            "type": "TryStatement",
            "block": block(json!([])),
            "handler": handler(None),
        }]))
    );
    assert_eq!(
        ast("try {} finally {}"),
        program(json!([{
            "type": "TryStatement",
            "block": block(json!([])),
            "finalizer": block(json!([])),
        }]))
    );
}
