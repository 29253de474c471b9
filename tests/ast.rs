//! Integration tests for AST lowering: golden dumps for the precedence and
//! associativity corners, statement shapes, and the assignment-target check.

use pylite::{Error, Parser};
use rstest::rstest;
use serde_json::{json, Value};

fn ast_repr(text: &str) -> Value {
    Parser::new().to_ast(text).unwrap().repr()
}

#[rstest]
#[case(
    "1 ** 2 ** 3",
    json!({
        "type": "ProgramNode",
        "statements": [{
            "type": "PowNode",
            "left": {"type": "IntNode", "value": 1},
            "right": {
                "type": "PowNode",
                "left": {"type": "IntNode", "value": 2},
                "right": {"type": "IntNode", "value": 3},
            },
        }],
    })
)]
#[case(
    "0 * - 1 ** 2 ** 3",
    json!({
        "type": "ProgramNode",
        "statements": [{
            "type": "MultiplyNode",
            "left": {"type": "IntNode", "value": 0},
            "right": {
                "type": "NegNode",
                "operand": {
                    "type": "PowNode",
                    "left": {"type": "IntNode", "value": 1},
                    "right": {
                        "type": "PowNode",
                        "left": {"type": "IntNode", "value": 2},
                        "right": {"type": "IntNode", "value": 3},
                    },
                },
            },
        }],
    })
)]
#[case(
    "a.b[1](1,2)",
    json!({
        "type": "ProgramNode",
        "statements": [{
            "type": "CallNode",
            "callee": {
                "type": "SubscriptionNode",
                "object": {
                    "type": "AttrRefNode",
                    "object": {"type": "IdentifierNode", "name": "a"},
                    "attr": {"type": "IdentifierNode", "name": "b"},
                },
                "args": {
                    "type": "ArgsNode",
                    "args": [{"type": "IntNode", "value": 1}],
                },
            },
            "args": {
                "type": "ArgsNode",
                "args": [
                    {"type": "IntNode", "value": 1},
                    {"type": "IntNode", "value": 2},
                ],
            },
        }],
    })
)]
#[case(
    "a = 1 + 2 * 3",
    json!({
        "type": "ProgramNode",
        "statements": [{
            "type": "AssignNode",
            "left": {"type": "IdentifierNode", "name": "a"},
            "right": {
                "type": "AddNode",
                "left": {"type": "IntNode", "value": 1},
                "right": {
                    "type": "MultiplyNode",
                    "left": {"type": "IntNode", "value": 2},
                    "right": {"type": "IntNode", "value": 3},
                },
            },
        }],
    })
)]
#[case(
    "a.b[2] = 5",
    json!({
        "type": "ProgramNode",
        "statements": [{
            "type": "AssignNode",
            "left": {
                "type": "SubscriptionNode",
                "object": {
                    "type": "AttrRefNode",
                    "object": {"type": "IdentifierNode", "name": "a"},
                    "attr": {"type": "IdentifierNode", "name": "b"},
                },
                "args": {
                    "type": "ArgsNode",
                    "args": [{"type": "IntNode", "value": 2}],
                },
            },
            "right": {"type": "IntNode", "value": 5},
        }],
    })
)]
#[case(
    "#1234\n   \t    \n  #123",
    json!({"type": "ProgramNode", "statements": []})
)]
fn ast_dumps_match(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(ast_repr(input), expected);
}

#[test]
fn call_expressions_are_not_assignment_targets() {
    let mut parser = Parser::new();
    match parser.to_ast("a(2,3) = 123") {
        Err(Error::Syntax(_)) => {}
        other => panic!("expected a syntax error, got {:?}", other),
    }
}

#[test]
fn boolean_and_comparison_operators_fold_left() {
    assert_eq!(
        ast_repr("a or b and not c is None"),
        json!({
            "type": "ProgramNode",
            "statements": [{
                "type": "OrNode",
                "left": {"type": "IdentifierNode", "name": "a"},
                "right": {
                    "type": "AndNode",
                    "left": {"type": "IdentifierNode", "name": "b"},
                    "right": {
                        "type": "NotNode",
                        "operand": {
                            "type": "IsNode",
                            "left": {"type": "IdentifierNode", "name": "c"},
                            "right": {"type": "NoneNode"},
                        },
                    },
                },
            }],
        })
    );
}

#[test]
fn literals_carry_their_parsed_values() {
    assert_eq!(
        ast_repr("a = \"ab\\ncd\"\nb = 123.5\nc = False\n"),
        json!({
            "type": "ProgramNode",
            "statements": [
                {
                    "type": "AssignNode",
                    "left": {"type": "IdentifierNode", "name": "a"},
                    "right": {"type": "StrNode", "value": "ab\ncd"},
                },
                {
                    "type": "AssignNode",
                    "left": {"type": "IdentifierNode", "name": "b"},
                    "right": {"type": "FloatNode", "value": 123.5},
                },
                {
                    "type": "AssignNode",
                    "left": {"type": "IdentifierNode", "name": "c"},
                    "right": {"type": "FalseNode"},
                },
            ],
        })
    );
}

#[test]
fn compound_statements_lower_with_their_branches() {
    assert_eq!(
        ast_repr("if a:\n    pass\nelif b:\n    break\nelse:\n    continue\n"),
        json!({
            "type": "ProgramNode",
            "statements": [{
                "type": "IfElifElseNode",
                "ifBranch": {
                    "type": "IfBranchNode",
                    "condition": {"type": "IdentifierNode", "name": "a"},
                    "suite": {"type": "SuiteNode", "statements": [{"type": "PassNode"}]},
                },
                "elifBranches": [{
                    "type": "ElifBranchNode",
                    "condition": {"type": "IdentifierNode", "name": "b"},
                    "suite": {"type": "SuiteNode", "statements": [{"type": "BreakNode"}]},
                }],
                "elseBranch": {
                    "type": "ElseBranchNode",
                    "suite": {"type": "SuiteNode", "statements": [{"type": "ContinueNode"}]},
                },
            }],
        })
    );
}

#[test]
fn while_global_and_return_lower() {
    assert_eq!(
        ast_repr("while x > 0:\n    global a, b\n    return x\n"),
        json!({
            "type": "ProgramNode",
            "statements": [{
                "type": "WhileNode",
                "condition": {
                    "type": "GreaterNode",
                    "left": {"type": "IdentifierNode", "name": "x"},
                    "right": {"type": "IntNode", "value": 0},
                },
                "suite": {
                    "type": "SuiteNode",
                    "statements": [
                        {
                            "type": "GlobalNode",
                            "identifiers": [
                                {"type": "IdentifierNode", "name": "a"},
                                {"type": "IdentifierNode", "name": "b"},
                            ],
                        },
                        {
                            "type": "ReturnNode",
                            "expr": {"type": "IdentifierNode", "name": "x"},
                        },
                    ],
                },
            }],
        })
    );
}

#[test]
fn funcdef_lowers_name_params_and_suite() {
    assert_eq!(
        ast_repr("def fn(a, b):\n    return a + b\n"),
        json!({
            "type": "ProgramNode",
            "statements": [{
                "type": "FuncDefNode",
                "funcName": {"type": "IdentifierNode", "name": "fn"},
                "params": {
                    "type": "ParamsNode",
                    "params": [
                        {"type": "IdentifierNode", "name": "a"},
                        {"type": "IdentifierNode", "name": "b"},
                    ],
                },
                "suite": {
                    "type": "SuiteNode",
                    "statements": [{
                        "type": "ReturnNode",
                        "expr": {
                            "type": "AddNode",
                            "left": {"type": "IdentifierNode", "name": "a"},
                            "right": {"type": "IdentifierNode", "name": "b"},
                        },
                    }],
                },
            }],
        })
    );
}

#[test]
fn shift_and_bitwise_levels_sit_between_comparison_and_arithmetic() {
    // "a | b << c + 1" groups as a | (b << (c + 1))
    assert_eq!(
        ast_repr("a | b << c + 1"),
        json!({
            "type": "ProgramNode",
            "statements": [{
                "type": "BitOrNode",
                "left": {"type": "IdentifierNode", "name": "a"},
                "right": {
                    "type": "ShiftLeftNode",
                    "left": {"type": "IdentifierNode", "name": "b"},
                    "right": {
                        "type": "AddNode",
                        "left": {"type": "IdentifierNode", "name": "c"},
                        "right": {"type": "IntNode", "value": 1},
                    },
                },
            }],
        })
    );
}

#[test]
fn ast_repr_twice_is_identical() {
    let mut parser = Parser::new();
    let ast = parser.to_ast("def fn():\n    return fn()[0].x ** -2\n").unwrap();
    assert_eq!(ast.repr(), ast.repr());
}

#[test]
fn parse_tree_and_ast_entry_points_agree() {
    let mut parser = Parser::new();
    let input = "a = fn(1).b[2] ** 3\nif a:\n    pass\n";
    let from_tree = parser.to_parse_tree(input).unwrap().lower();
    let direct = parser.to_ast(input).unwrap();
    assert_eq!(from_tree, direct);
}

#[test]
fn out_of_range_integer_literals_are_syntax_errors() {
    let mut parser = Parser::new();
    match parser.to_ast("a = 99999999999999999999999999\n") {
        Err(Error::Syntax(_)) => {}
        other => panic!("expected a syntax error, got {:?}", other),
    }
}
