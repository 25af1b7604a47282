//! Literal parsing: numbers, strings, regexes, templates, arrays, objects.

mod common;

use common::*;
use serde_json::{json, Value};

#[test]
fn test_numeric_literals() {
    assert_eq!(ast("10"), program(json!([num(10)])));
    assert_eq!(
        ast("3.5"),
        program(json!([{ "type": "NumericLiteral", "value": 3.5 }]))
    );
    assert_eq!(ast("1e3"), program(json!([num(1000)])));
}

#[test]
fn test_bigint_literal() {
    assert_eq!(
        ast("10n"),
        program(json!([{ "type": "BigIntLiteral", "value": "10" }]))
    );
}

#[test]
fn test_string_literals() {
    assert_eq!(ast(r#""hello""#), program(json!([string("hello")])));
    assert_eq!(ast("'hello';"), program(json!([string("hello")])));
}

#[test]
fn test_keyword_literals() {
    assert_eq!(
        ast("true; false; null; undefined; this"),
        program(json!([
            { "type": "BooleanLiteral", "value": true },
            { "type": "BooleanLiteral", "value": false },
            { "type": "NullLiteral" },
            { "type": "UndefinedLiteral" },
            { "type": "ThisExpression" },
        ]))
    );
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(ast("\n  // testing testing\n  10\n"), program(json!([num(10)])));
    assert_eq!(
        ast("/*\n  aaa     qqq\n*/\n10"),
        program(json!([num(10)]))
    );
    assert_eq!(ast("/* a */ x /* b */"), program(json!([ident("x")])));
}

#[test]
fn test_regex_literals() {
    assert_eq!(
        ast("/aa/"),
        program(json!([{ "type": "RegExpLiteral", "pattern": "aa", "flags": "" }]))
    );
    assert_eq!(
        ast("\n  /aa/id\n"),
        program(json!([{ "type": "RegExpLiteral", "pattern": "aa", "flags": "id" }]))
    );
    assert_eq!(
        ast(r"/a\/b/g"),
        program(json!([{ "type": "RegExpLiteral", "pattern": r"a\/b", "flags": "g" }]))
    );
}

#[test]
fn test_template_without_expressions() {
    assert_eq!(
        ast("`testing`"),
        program(json!([{
            "type": "TemplateLiteral",
            "expressions": [],
            "quasis": [{ "type": "TemplateElement", "value": "testing" }],
        }]))
    );
    assert_eq!(
        ast("``"),
        program(json!([{
            "type": "TemplateLiteral",
            "expressions": [],
            "quasis": [{ "type": "TemplateElement", "value": "" }],
        }]))
    );
}

#[test]
fn test_template_with_expression() {
    let template = json!({
        "type": "TemplateLiteral",
        "expressions": [ident("a")],
        "quasis": [
            { "type": "TemplateElement", "value": "test" },
            { "type": "TemplateElement", "value": "test" },
        ],
    });
    assert_eq!(ast("`test${a}test`"), program(json!([template.clone()])));
    assert_eq!(
        ast("`test${a}test` + 'qqq'"),
        program(json!([binary(template, "+", string("qqq"))]))
    );
}

#[test]
fn test_template_expression_boundaries() {
    assert_eq!(
        ast("`${a + 1}${b}`"),
        program(json!([{
            "type": "TemplateLiteral",
            "expressions": [binary(ident("a"), "+", num(1)), ident("b")],
            "quasis": [
                { "type": "TemplateElement", "value": "" },
                { "type": "TemplateElement", "value": "" },
                { "type": "TemplateElement", "value": "" },
            ],
        }]))
    );
}

#[test]
fn test_array_literals() {
    assert_eq!(
        ast("[]"),
        program(json!([{ "type": "ArrayLiteral", "elements": [] }]))
    );
    assert_eq!(
        ast("[1, 'a', [2],]"),
        program(json!([{
            "type": "ArrayLiteral",
            "elements": [
                num(1),
                string("a"),
                { "type": "ArrayLiteral", "elements": [num(2)] },
            ],
        }]))
    );
}

#[test]
fn test_object_literal() {
    let source = "const o = { a: 1, 'b': 2, [c]: 3, d() {}, async e(x) {}, f }";
    let method_value = |is_async: bool, params: Value| {
        json!({
            "type": "FunctionExpression",
            "generator": false,
            "async": is_async,
            "params": params,
            "body": block(json!([])),
        })
    };
    let property = |key: Value, value: Value, computed: bool, method: bool| {
        json!({ "type": "Property", "key": key, "value": value, "computed": computed, "method": method })
    };

    assert_eq!(
        ast(source),
        program(json!([{
            "type": "VariableDeclaration",
            "id": ident("o"),
            "value": {
                "type": "ObjectLiteral",
                "properties": [
                    property(ident("a"), num(1), false, false),
                    property(string("b"), num(2), false, false),
                    property(ident("c"), num(3), true, false),
                    property(ident("d"), method_value(false, json!([])), false, true),
                    property(ident("e"), method_value(true, json!([ident("x")])), false, true),
                    property(ident("f"), ident("f"), false, false),
                ],
            },
            "kind": "const",
        }]))
    );
}

#[test]
fn test_async_as_object_key() {
    assert_eq!(
        ast("x = { async: 1 }"),
        program(json!([{
            "type": "AssignmentExpression",
            "id": ident("x"),
            "operator": "=",
            "value": {
                "type": "ObjectLiteral",
                "properties": [{
                    "type": "Property",
                    "key": ident("async"),
                    "value": num(1),
                    "computed": false,
                    "method": false,
                }],
            },
        }]))
    );
}
