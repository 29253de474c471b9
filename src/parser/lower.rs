//! Lowering from the parse tree to the AST.
//!
//! Pure tree-to-tree conversion, total over valid parse trees. The flat
//! `{op T}` append lists of the infix levels fold left-associatively;
//! `power` folds right-associatively; trailers fold left over their atom.
//! An expression statement lowers to its expression node directly, and
//! parenthesized expressions lower transparently.

use crate::parser::ast::AstNode;
use crate::parser::expr::{
    Atom, ExprList, ExprNode, Expression, Identifier, InfixExpr, NotTest, PowerExpr, Primary,
    Trailer, UnaryExpr,
};
use crate::parser::operator::Operator;
use crate::parser::stmt::{
    AssignStmt, ElifBranch, ElseBranch, ExpressionStmt, FuncDef, GlobalStmt, IdentifierList,
    IfBranch, IfStmt, Program, ReturnStmt, Statement, Suite, WhileStmt,
};

impl Expression {
    pub fn lower(&self) -> AstNode {
        self.or_test.lower()
    }
}

impl ExprNode {
    pub fn lower(&self) -> AstNode {
        match self {
            ExprNode::Infix(e) => e.lower(),
            ExprNode::Not(e) => e.lower(),
            ExprNode::Unary(e) => e.lower(),
            ExprNode::Power(e) => e.lower(),
        }
    }
}

impl InfixExpr {
    /// Left-associative fold of `first {op expr}`.
    pub fn lower(&self) -> AstNode {
        let mut node = self.first.lower();
        for append in &self.appends {
            node = AstNode::Binary {
                op: append.operator,
                left: Box::new(node),
                right: Box::new(append.expression.lower()),
            };
        }
        node
    }
}

impl NotTest {
    pub fn lower(&self) -> AstNode {
        AstNode::Unary {
            op: Operator::Not,
            operand: Box::new(self.operand.lower()),
        }
    }
}

impl UnaryExpr {
    pub fn lower(&self) -> AstNode {
        AstNode::Unary {
            op: self.operator,
            operand: Box::new(self.operand.lower()),
        }
    }
}

impl PowerExpr {
    /// Right-associative fold: `b ** e1 ** e2` becomes `b ** (e1 ** e2)`.
    pub fn lower(&self) -> AstNode {
        let base = self.base.lower();
        let mut exponents = self.exponents.iter().rev();
        let Some(last) = exponents.next() else {
            return base;
        };
        let mut node = last.lower();
        for exponent in exponents {
            node = AstNode::Binary {
                op: Operator::Pow,
                left: Box::new(exponent.lower()),
                right: Box::new(node),
            };
        }
        AstNode::Binary {
            op: Operator::Pow,
            left: Box::new(base),
            right: Box::new(node),
        }
    }
}

impl Primary {
    /// Left fold of the trailers over the atom.
    pub fn lower(&self) -> AstNode {
        let mut node = self.atom.lower();
        for trailer in &self.trailers {
            node = match trailer {
                Trailer::AttrRef(id) => AstNode::AttrRef {
                    object: Box::new(node),
                    attr: Box::new(id.lower()),
                },
                Trailer::Subscription(args) => AstNode::subscription(node, args.lower()),
                Trailer::Call(args) => AstNode::Call {
                    callee: Box::new(node),
                    args: Box::new(match args {
                        Some(args) => args.lower(),
                        None => AstNode::Args { args: Vec::new() },
                    }),
                },
            };
        }
        node
    }
}

impl Atom {
    pub fn lower(&self) -> AstNode {
        match self {
            Atom::Identifier(id) => id.lower(),
            Atom::Str(s) => AstNode::Str {
                value: s.value.clone(),
            },
            Atom::Int(i) => AstNode::Int { value: i.value },
            Atom::Float(f) => AstNode::Float { value: f.value },
            Atom::True => AstNode::True,
            Atom::False => AstNode::False,
            Atom::None => AstNode::None,
            Atom::Paren(p) => p.expression.lower(),
        }
    }
}

impl Identifier {
    pub fn lower(&self) -> AstNode {
        AstNode::Identifier {
            name: self.name.clone(),
        }
    }
}

impl ExprList {
    pub fn lower(&self) -> AstNode {
        AstNode::Args {
            args: self.expressions.iter().map(Expression::lower).collect(),
        }
    }
}

impl Statement {
    pub fn lower(&self) -> AstNode {
        match self {
            Statement::Expression(s) => s.lower(),
            Statement::Assign(s) => s.lower(),
            Statement::Pass => AstNode::Pass,
            Statement::Break => AstNode::Break,
            Statement::Continue => AstNode::Continue,
            Statement::Return(s) => s.lower(),
            Statement::Global(s) => s.lower(),
            Statement::If(s) => s.lower(),
            Statement::While(s) => s.lower(),
            Statement::FuncDef(s) => s.lower(),
        }
    }
}

impl ExpressionStmt {
    /// An expression statement is its expression; no wrapper node.
    pub fn lower(&self) -> AstNode {
        self.expression.lower()
    }
}

impl AssignStmt {
    pub fn lower(&self) -> AstNode {
        AstNode::Assign {
            left: Box::new(self.left.lower()),
            right: Box::new(self.right.lower()),
        }
    }
}

impl ReturnStmt {
    pub fn lower(&self) -> AstNode {
        AstNode::Return {
            expr: self.expression.as_ref().map(|e| Box::new(e.lower())),
        }
    }
}

impl GlobalStmt {
    pub fn lower(&self) -> AstNode {
        AstNode::global(self.identifiers.lower())
    }
}

impl IdentifierList {
    pub fn lower(&self) -> Vec<AstNode> {
        self.identifiers.iter().map(Identifier::lower).collect()
    }
}

impl Suite {
    pub fn lower(&self) -> AstNode {
        AstNode::suite(self.statements.iter().map(Statement::lower).collect())
    }
}

impl IfStmt {
    pub fn lower(&self) -> AstNode {
        AstNode::IfElifElse {
            if_branch: Box::new(self.if_branch.lower()),
            elif_branches: self.elif_branches.iter().map(ElifBranch::lower).collect(),
            else_branch: self.else_branch.as_ref().map(|b| Box::new(b.lower())),
        }
    }
}

impl IfBranch {
    pub fn lower(&self) -> AstNode {
        AstNode::IfBranch {
            condition: Box::new(self.condition.lower()),
            suite: Box::new(self.suite.lower()),
        }
    }
}

impl ElifBranch {
    pub fn lower(&self) -> AstNode {
        AstNode::ElifBranch {
            condition: Box::new(self.condition.lower()),
            suite: Box::new(self.suite.lower()),
        }
    }
}

impl ElseBranch {
    pub fn lower(&self) -> AstNode {
        AstNode::ElseBranch {
            suite: Box::new(self.suite.lower()),
        }
    }
}

impl WhileStmt {
    pub fn lower(&self) -> AstNode {
        AstNode::While {
            condition: Box::new(self.condition.lower()),
            suite: Box::new(self.suite.lower()),
        }
    }
}

impl FuncDef {
    pub fn lower(&self) -> AstNode {
        AstNode::FuncDef {
            func_name: Box::new(self.name.lower()),
            params: Box::new(AstNode::Params {
                params: self
                    .params
                    .as_ref()
                    .map(IdentifierList::lower)
                    .unwrap_or_default(),
            }),
            suite: Box::new(self.suite.lower()),
        }
    }
}

impl Program {
    pub fn lower(&self) -> AstNode {
        AstNode::Program {
            statements: self.statements.iter().map(Statement::lower).collect(),
        }
    }
}
