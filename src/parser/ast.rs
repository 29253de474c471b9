//! The abstract syntax tree.
//!
//! A single closed enum covers every node kind; operators are fields, not
//! types. Every node answers the same three questions — `node_type` (the
//! serialized type tag), `display` (a short label), `children` — and dumps
//! itself to a nested JSON map via `repr`, with child fields named after
//! their grammar role. Nodes are built once by lowering a parse tree and
//! never mutated.

use crate::parser::operator::Operator;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Binary {
        op: Operator,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
    Unary {
        op: Operator,
        operand: Box<AstNode>,
    },
    True,
    False,
    None,
    Pass,
    Break,
    Continue,
    Identifier {
        name: String,
    },
    Str {
        value: String,
    },
    Int {
        value: i64,
    },
    Float {
        value: f64,
    },
    AttrRef {
        object: Box<AstNode>,
        attr: Box<AstNode>,
    },
    Subscription {
        object: Box<AstNode>,
        args: Box<AstNode>,
    },
    Call {
        callee: Box<AstNode>,
        args: Box<AstNode>,
    },
    Args {
        args: Vec<AstNode>,
    },
    Assign {
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
    Return {
        expr: Option<Box<AstNode>>,
    },
    Global {
        identifiers: Vec<AstNode>,
    },
    Suite {
        statements: Vec<AstNode>,
    },
    While {
        condition: Box<AstNode>,
        suite: Box<AstNode>,
    },
    IfBranch {
        condition: Box<AstNode>,
        suite: Box<AstNode>,
    },
    ElifBranch {
        condition: Box<AstNode>,
        suite: Box<AstNode>,
    },
    ElseBranch {
        suite: Box<AstNode>,
    },
    IfElifElse {
        if_branch: Box<AstNode>,
        elif_branches: Vec<AstNode>,
        else_branch: Option<Box<AstNode>>,
    },
    FuncDef {
        func_name: Box<AstNode>,
        params: Box<AstNode>,
        suite: Box<AstNode>,
    },
    Params {
        params: Vec<AstNode>,
    },
    Program {
        statements: Vec<AstNode>,
    },
}

impl AstNode {
    /// A suite node; suites hold at least one statement.
    pub fn suite(statements: Vec<AstNode>) -> AstNode {
        debug_assert!(!statements.is_empty(), "a suite holds at least one statement");
        AstNode::Suite { statements }
    }

    /// A subscription node; subscripts take at least one argument.
    pub fn subscription(object: AstNode, args: AstNode) -> AstNode {
        if let AstNode::Args { args } = &args {
            debug_assert!(!args.is_empty(), "a subscription takes at least one argument");
        }
        AstNode::Subscription {
            object: Box::new(object),
            args: Box::new(args),
        }
    }

    /// A global node; `global` names at least one identifier.
    pub fn global(identifiers: Vec<AstNode>) -> AstNode {
        debug_assert!(
            !identifiers.is_empty(),
            "global names at least one identifier"
        );
        AstNode::Global { identifiers }
    }

    /// The serialized type tag of this node.
    pub fn node_type(&self) -> &'static str {
        match self {
            AstNode::Binary { op, .. } | AstNode::Unary { op, .. } => op.node_name(),
            AstNode::True => "TrueNode",
            AstNode::False => "FalseNode",
            AstNode::None => "NoneNode",
            AstNode::Pass => "PassNode",
            AstNode::Break => "BreakNode",
            AstNode::Continue => "ContinueNode",
            AstNode::Identifier { .. } => "IdentifierNode",
            AstNode::Str { .. } => "StrNode",
            AstNode::Int { .. } => "IntNode",
            AstNode::Float { .. } => "FloatNode",
            AstNode::AttrRef { .. } => "AttrRefNode",
            AstNode::Subscription { .. } => "SubscriptionNode",
            AstNode::Call { .. } => "CallNode",
            AstNode::Args { .. } => "ArgsNode",
            AstNode::Assign { .. } => "AssignNode",
            AstNode::Return { .. } => "ReturnNode",
            AstNode::Global { .. } => "GlobalNode",
            AstNode::Suite { .. } => "SuiteNode",
            AstNode::While { .. } => "WhileNode",
            AstNode::IfBranch { .. } => "IfBranchNode",
            AstNode::ElifBranch { .. } => "ElifBranchNode",
            AstNode::ElseBranch { .. } => "ElseBranchNode",
            AstNode::IfElifElse { .. } => "IfElifElseNode",
            AstNode::FuncDef { .. } => "FuncDefNode",
            AstNode::Params { .. } => "ParamsNode",
            AstNode::Program { .. } => "ProgramNode",
        }
    }

    /// A short human-readable label, for tree displays.
    pub fn display(&self) -> String {
        match self {
            AstNode::Binary { op, .. } | AstNode::Unary { op, .. } => op.display().to_string(),
            AstNode::True => "True".to_string(),
            AstNode::False => "False".to_string(),
            AstNode::None => "None".to_string(),
            AstNode::Pass => "pass".to_string(),
            AstNode::Break => "break".to_string(),
            AstNode::Continue => "continue".to_string(),
            AstNode::Identifier { name } => format!("id: {}", name),
            AstNode::Str { value } => format!("str: {}", value),
            AstNode::Int { value } => format!("int: {}", value),
            AstNode::Float { value } => format!("float: {}", value),
            AstNode::AttrRef { .. } => "attrref".to_string(),
            AstNode::Subscription { .. } => "subscription".to_string(),
            AstNode::Call { .. } => "call".to_string(),
            AstNode::Args { .. } => "args".to_string(),
            AstNode::Assign { .. } => "=".to_string(),
            AstNode::Return { .. } => "return".to_string(),
            AstNode::Global { .. } => "global".to_string(),
            AstNode::Suite { .. } => "suite".to_string(),
            AstNode::While { .. } => "while".to_string(),
            AstNode::IfBranch { .. } => "if".to_string(),
            AstNode::ElifBranch { .. } => "elif".to_string(),
            AstNode::ElseBranch { .. } => "else".to_string(),
            AstNode::IfElifElse { .. } => "if-elif-else".to_string(),
            AstNode::FuncDef { .. } => "def".to_string(),
            AstNode::Params { .. } => "params".to_string(),
            AstNode::Program { .. } => "program".to_string(),
        }
    }

    /// The node's children, in grammar order.
    pub fn children(&self) -> Vec<&AstNode> {
        match self {
            AstNode::Binary { left, right, .. } | AstNode::Assign { left, right } => {
                vec![left, right]
            }
            AstNode::Unary { operand, .. } => vec![operand],
            AstNode::True
            | AstNode::False
            | AstNode::None
            | AstNode::Pass
            | AstNode::Break
            | AstNode::Continue
            | AstNode::Identifier { .. }
            | AstNode::Str { .. }
            | AstNode::Int { .. }
            | AstNode::Float { .. } => Vec::new(),
            AstNode::AttrRef { object, attr } => vec![object, attr],
            AstNode::Subscription { object, args } => vec![object, args],
            AstNode::Call { callee, args } => vec![callee, args],
            AstNode::Args { args } => args.iter().collect(),
            AstNode::Return { expr } => expr.iter().map(|e| e.as_ref()).collect(),
            AstNode::Global { identifiers } => identifiers.iter().collect(),
            AstNode::Suite { statements } | AstNode::Program { statements } => {
                statements.iter().collect()
            }
            AstNode::While { condition, suite }
            | AstNode::IfBranch { condition, suite }
            | AstNode::ElifBranch { condition, suite } => vec![condition, suite],
            AstNode::ElseBranch { suite } => vec![suite],
            AstNode::IfElifElse {
                if_branch,
                elif_branches,
                else_branch,
            } => {
                let mut children: Vec<&AstNode> = vec![if_branch];
                children.extend(elif_branches.iter());
                if let Some(else_branch) = else_branch {
                    children.push(else_branch);
                }
                children
            }
            AstNode::FuncDef {
                func_name,
                params,
                suite,
            } => vec![func_name, params, suite],
            AstNode::Params { params } => params.iter().collect(),
        }
    }

    /// Structural dump: a nested map with a `type` discriminator and child
    /// fields named per grammar role.
    pub fn repr(&self) -> Value {
        match self {
            AstNode::Binary { left, right, .. } => json!({
                "type": self.node_type(),
                "left": left.repr(),
                "right": right.repr(),
            }),
            AstNode::Unary { operand, .. } => json!({
                "type": self.node_type(),
                "operand": operand.repr(),
            }),
            AstNode::True
            | AstNode::False
            | AstNode::None
            | AstNode::Pass
            | AstNode::Break
            | AstNode::Continue => json!({"type": self.node_type()}),
            AstNode::Identifier { name } => json!({
                "type": "IdentifierNode",
                "name": name,
            }),
            AstNode::Str { value } => json!({
                "type": "StrNode",
                "value": value,
            }),
            AstNode::Int { value } => json!({
                "type": "IntNode",
                "value": value,
            }),
            AstNode::Float { value } => json!({
                "type": "FloatNode",
                "value": value,
            }),
            AstNode::AttrRef { object, attr } => json!({
                "type": "AttrRefNode",
                "object": object.repr(),
                "attr": attr.repr(),
            }),
            AstNode::Subscription { object, args } => json!({
                "type": "SubscriptionNode",
                "object": object.repr(),
                "args": args.repr(),
            }),
            AstNode::Call { callee, args } => json!({
                "type": "CallNode",
                "callee": callee.repr(),
                "args": args.repr(),
            }),
            AstNode::Args { args } => json!({
                "type": "ArgsNode",
                "args": args.iter().map(AstNode::repr).collect::<Vec<_>>(),
            }),
            AstNode::Assign { left, right } => json!({
                "type": "AssignNode",
                "left": left.repr(),
                "right": right.repr(),
            }),
            AstNode::Return { expr } => match expr {
                Some(expr) => json!({"type": "ReturnNode", "expr": expr.repr()}),
                Option::None => json!({"type": "ReturnNode"}),
            },
            AstNode::Global { identifiers } => json!({
                "type": "GlobalNode",
                "identifiers": identifiers.iter().map(AstNode::repr).collect::<Vec<_>>(),
            }),
            AstNode::Suite { statements } => json!({
                "type": "SuiteNode",
                "statements": statements.iter().map(AstNode::repr).collect::<Vec<_>>(),
            }),
            AstNode::While { condition, suite } => json!({
                "type": "WhileNode",
                "condition": condition.repr(),
                "suite": suite.repr(),
            }),
            AstNode::IfBranch { condition, suite } => json!({
                "type": "IfBranchNode",
                "condition": condition.repr(),
                "suite": suite.repr(),
            }),
            AstNode::ElifBranch { condition, suite } => json!({
                "type": "ElifBranchNode",
                "condition": condition.repr(),
                "suite": suite.repr(),
            }),
            AstNode::ElseBranch { suite } => json!({
                "type": "ElseBranchNode",
                "suite": suite.repr(),
            }),
            AstNode::IfElifElse {
                if_branch,
                elif_branches,
                else_branch,
            } => {
                let mut map = serde_json::Map::new();
                map.insert("type".into(), json!("IfElifElseNode"));
                map.insert("ifBranch".into(), if_branch.repr());
                map.insert(
                    "elifBranches".into(),
                    Value::Array(elif_branches.iter().map(AstNode::repr).collect()),
                );
                if let Some(else_branch) = else_branch {
                    map.insert("elseBranch".into(), else_branch.repr());
                }
                Value::Object(map)
            }
            AstNode::FuncDef {
                func_name,
                params,
                suite,
            } => json!({
                "type": "FuncDefNode",
                "funcName": func_name.repr(),
                "params": params.repr(),
                "suite": suite.repr(),
            }),
            AstNode::Params { params } => json!({
                "type": "ParamsNode",
                "params": params.iter().map(AstNode::repr).collect::<Vec<_>>(),
            }),
            AstNode::Program { statements } => json!({
                "type": "ProgramNode",
                "statements": statements.iter().map(AstNode::repr).collect::<Vec<_>>(),
            }),
        }
    }
}
