//! Statement grammar.
//!
//! ```text
//! program       ::= {statement}
//! statement     ::= simple_stmt | compound_stmt
//! simple_stmt   ::= (expression | assignment | "pass" | "break" | "continue"
//!                    | return_stmt | global_stmt) NEWLINE
//! assignment    ::= expression "=" expression
//! return_stmt   ::= "return" [expression]
//! global_stmt   ::= "global" identifier {"," identifier}
//! compound_stmt ::= if_stmt | while_stmt | funcdef
//! if_stmt       ::= "if" expression ":" NEWLINE suite
//!                   {"elif" expression ":" NEWLINE suite}
//!                   ["else" ":" NEWLINE suite]
//! while_stmt    ::= "while" expression ":" NEWLINE suite
//! funcdef       ::= "def" identifier "(" [identifier {"," identifier}] ")"
//!                   ":" NEWLINE suite
//! suite         ::= INDENT_INC statement {statement} INDENT_DEC
//! ```
//!
//! A statement that starts with an expression is an assignment exactly when
//! the expression is followed by `=`; the left-hand side is kept as-is, with
//! no target-shape validation at this stage.

use crate::error::SyntaxError;
use crate::parser::cursor::TokenCursor;
use crate::parser::expr::{Expression, Identifier};
use crate::scanner::token::{Keyword, Punct, TokenKind};
use serde_json::{json, Value};

/// Any statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(ExpressionStmt),
    Assign(AssignStmt),
    Pass,
    Break,
    Continue,
    Return(ReturnStmt),
    Global(GlobalStmt),
    If(IfStmt),
    While(WhileStmt),
    FuncDef(FuncDef),
}

impl Statement {
    pub fn make(tokens: &mut TokenCursor) -> Result<Statement, SyntaxError> {
        let Some(token) = tokens.peek() else {
            return Err(SyntaxError::ended("Statement"));
        };
        match token.kind {
            TokenKind::Keyword(Keyword::If) => Ok(Statement::If(IfStmt::make(tokens)?)),
            TokenKind::Keyword(Keyword::While) => Ok(Statement::While(WhileStmt::make(tokens)?)),
            TokenKind::Keyword(Keyword::Def) => Ok(Statement::FuncDef(FuncDef::make(tokens)?)),
            TokenKind::Keyword(Keyword::Return) => Ok(Statement::Return(ReturnStmt::make(tokens)?)),
            TokenKind::Keyword(Keyword::Global) => Ok(Statement::Global(GlobalStmt::make(tokens)?)),
            TokenKind::Keyword(Keyword::Pass) => {
                tokens.advance();
                tokens.expect_newline()?;
                Ok(Statement::Pass)
            }
            TokenKind::Keyword(Keyword::Break) => {
                tokens.advance();
                tokens.expect_newline()?;
                Ok(Statement::Break)
            }
            TokenKind::Keyword(Keyword::Continue) => {
                tokens.advance();
                tokens.expect_newline()?;
                Ok(Statement::Continue)
            }
            _ => {
                // Ambiguous: expression statement or assignment. Decided by
                // whether "=" follows the first expression.
                let first = Expression::make(tokens)?;
                if tokens.peek_is_punct(Punct::Assign) {
                    tokens.advance();
                    let right = Expression::make(tokens)?;
                    tokens.expect_newline()?;
                    Ok(Statement::Assign(AssignStmt { left: first, right }))
                } else {
                    tokens.expect_newline()?;
                    Ok(Statement::Expression(ExpressionStmt { expression: first }))
                }
            }
        }
    }

    pub fn repr(&self) -> Value {
        match self {
            Statement::Expression(s) => s.repr(),
            Statement::Assign(s) => s.repr(),
            Statement::Pass => json!({"type": "PassStmt"}),
            Statement::Break => json!({"type": "BreakStmt"}),
            Statement::Continue => json!({"type": "ContinueStmt"}),
            Statement::Return(s) => s.repr(),
            Statement::Global(s) => s.repr(),
            Statement::If(s) => s.repr(),
            Statement::While(s) => s.repr(),
            Statement::FuncDef(s) => s.repr(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expression,
}

impl ExpressionStmt {
    pub fn repr(&self) -> Value {
        json!({"type": "ExpressionStmt", "expression": self.expression.repr()})
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub left: Expression,
    pub right: Expression,
}

impl AssignStmt {
    pub fn repr(&self) -> Value {
        json!({
            "type": "AssignStmt",
            "left": self.left.repr(),
            "right": self.right.repr(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub expression: Option<Expression>,
}

impl ReturnStmt {
    pub fn make(tokens: &mut TokenCursor) -> Result<ReturnStmt, SyntaxError> {
        tokens.expect_keyword(Keyword::Return)?;
        let expression = if tokens.has_next() && !tokens.peek_is(TokenKind::NewLine) {
            Some(Expression::make(tokens)?)
        } else {
            None
        };
        tokens.expect_newline()?;
        Ok(ReturnStmt { expression })
    }

    pub fn repr(&self) -> Value {
        match &self.expression {
            Some(e) => json!({"type": "ReturnStmt", "expression": e.repr()}),
            None => json!({"type": "ReturnStmt"}),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobalStmt {
    pub identifiers: IdentifierList,
}

impl GlobalStmt {
    pub fn make(tokens: &mut TokenCursor) -> Result<GlobalStmt, SyntaxError> {
        tokens.expect_keyword(Keyword::Global)?;
        let identifiers = IdentifierList::make(tokens)?;
        tokens.expect_newline()?;
        Ok(GlobalStmt { identifiers })
    }

    pub fn repr(&self) -> Value {
        json!({"type": "GlobalStmt", "identifiers": self.identifiers.repr()})
    }
}

/// `identifier {"," identifier}` — shared by `global` and parameter lists.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierList {
    pub identifiers: Vec<Identifier>,
}

impl IdentifierList {
    pub fn make(tokens: &mut TokenCursor) -> Result<IdentifierList, SyntaxError> {
        let mut identifiers = vec![Identifier::make(tokens)?];
        while tokens.peek_is_punct(Punct::Comma) {
            tokens.advance();
            identifiers.push(Identifier::make(tokens)?);
        }
        Ok(IdentifierList { identifiers })
    }

    pub fn repr(&self) -> Value {
        json!({
            "type": "IdentifierList",
            "identifiers": self.identifiers.iter().map(Identifier::repr).collect::<Vec<_>>(),
        })
    }
}

/// An indented block: `INDENT_INC statement+ INDENT_DEC`.
#[derive(Debug, Clone, PartialEq)]
pub struct Suite {
    pub statements: Vec<Statement>,
}

impl Suite {
    pub fn make(tokens: &mut TokenCursor) -> Result<Suite, SyntaxError> {
        tokens.expect_indent_inc()?;
        let mut statements = Vec::new();
        while tokens.has_next() && !tokens.peek_is(TokenKind::IndentDec) {
            statements.push(Statement::make(tokens)?);
        }
        tokens.expect_indent_dec()?;
        Ok(Suite { statements })
    }

    pub fn repr(&self) -> Value {
        json!({
            "type": "Suite",
            "statements": self.statements.iter().map(Statement::repr).collect::<Vec<_>>(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub if_branch: IfBranch,
    pub elif_branches: Vec<ElifBranch>,
    pub else_branch: Option<ElseBranch>,
}

impl IfStmt {
    pub fn make(tokens: &mut TokenCursor) -> Result<IfStmt, SyntaxError> {
        let if_branch = IfBranch::make(tokens)?;
        let mut elif_branches = Vec::new();
        while tokens.peek_is_keyword(Keyword::Elif) {
            elif_branches.push(ElifBranch::make(tokens)?);
        }
        let else_branch = if tokens.peek_is_keyword(Keyword::Else) {
            Some(ElseBranch::make(tokens)?)
        } else {
            None
        };
        Ok(IfStmt {
            if_branch,
            elif_branches,
            else_branch,
        })
    }

    pub fn repr(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert("type".into(), json!("IfStmt"));
        map.insert("ifBranch".into(), self.if_branch.repr());
        map.insert(
            "elifBranches".into(),
            Value::Array(self.elif_branches.iter().map(ElifBranch::repr).collect()),
        );
        if let Some(else_branch) = &self.else_branch {
            map.insert("elseBranch".into(), else_branch.repr());
        }
        Value::Object(map)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfBranch {
    pub condition: Expression,
    pub suite: Suite,
}

impl IfBranch {
    pub fn make(tokens: &mut TokenCursor) -> Result<IfBranch, SyntaxError> {
        tokens.expect_keyword(Keyword::If)?;
        let condition = Expression::make(tokens)?;
        tokens.expect_punct(Punct::Colon)?;
        tokens.expect_newline()?;
        let suite = Suite::make(tokens)?;
        Ok(IfBranch { condition, suite })
    }

    pub fn repr(&self) -> Value {
        json!({
            "type": "IfBranch",
            "condition": self.condition.repr(),
            "suite": self.suite.repr(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElifBranch {
    pub condition: Expression,
    pub suite: Suite,
}

impl ElifBranch {
    pub fn make(tokens: &mut TokenCursor) -> Result<ElifBranch, SyntaxError> {
        tokens.expect_keyword(Keyword::Elif)?;
        let condition = Expression::make(tokens)?;
        tokens.expect_punct(Punct::Colon)?;
        tokens.expect_newline()?;
        let suite = Suite::make(tokens)?;
        Ok(ElifBranch { condition, suite })
    }

    pub fn repr(&self) -> Value {
        json!({
            "type": "ElifBranch",
            "condition": self.condition.repr(),
            "suite": self.suite.repr(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseBranch {
    pub suite: Suite,
}

impl ElseBranch {
    pub fn make(tokens: &mut TokenCursor) -> Result<ElseBranch, SyntaxError> {
        tokens.expect_keyword(Keyword::Else)?;
        tokens.expect_punct(Punct::Colon)?;
        tokens.expect_newline()?;
        let suite = Suite::make(tokens)?;
        Ok(ElseBranch { suite })
    }

    pub fn repr(&self) -> Value {
        json!({"type": "ElseBranch", "suite": self.suite.repr()})
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expression,
    pub suite: Suite,
}

impl WhileStmt {
    pub fn make(tokens: &mut TokenCursor) -> Result<WhileStmt, SyntaxError> {
        tokens.expect_keyword(Keyword::While)?;
        let condition = Expression::make(tokens)?;
        tokens.expect_punct(Punct::Colon)?;
        tokens.expect_newline()?;
        let suite = Suite::make(tokens)?;
        Ok(WhileStmt { condition, suite })
    }

    pub fn repr(&self) -> Value {
        json!({
            "type": "WhileStmt",
            "condition": self.condition.repr(),
            "suite": self.suite.repr(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub name: Identifier,
    pub params: Option<IdentifierList>,
    pub suite: Suite,
}

impl FuncDef {
    pub fn make(tokens: &mut TokenCursor) -> Result<FuncDef, SyntaxError> {
        tokens.expect_keyword(Keyword::Def)?;
        let name = Identifier::make(tokens)?;
        tokens.expect_punct(Punct::LeftParentheses)?;
        let params = if tokens.has_next() && !tokens.peek_is_punct(Punct::RightParentheses) {
            Some(IdentifierList::make(tokens)?)
        } else {
            None
        };
        tokens.expect_punct(Punct::RightParentheses)?;
        tokens.expect_punct(Punct::Colon)?;
        tokens.expect_newline()?;
        let suite = Suite::make(tokens)?;
        Ok(FuncDef { name, params, suite })
    }

    pub fn repr(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert("type".into(), json!("FuncDef"));
        map.insert("name".into(), self.name.repr());
        if let Some(params) = &self.params {
            map.insert("params".into(), params.repr());
        }
        map.insert("suite".into(), self.suite.repr());
        Value::Object(map)
    }
}

/// The parse-tree root: every statement in the input, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn make(tokens: &mut TokenCursor) -> Result<Program, SyntaxError> {
        let mut statements = Vec::new();
        while tokens.has_next() {
            statements.push(Statement::make(tokens)?);
        }
        Ok(Program { statements })
    }

    pub fn repr(&self) -> Value {
        json!({
            "type": "Program",
            "statements": self.statements.iter().map(Statement::repr).collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Scanner;

    fn program(text: &str) -> Program {
        let tokens = Scanner::new().scan(text).unwrap();
        let mut cursor = TokenCursor::new(tokens);
        Program::make(&mut cursor).unwrap()
    }

    fn program_err(text: &str) -> SyntaxError {
        let tokens = Scanner::new().scan(text).unwrap();
        let mut cursor = TokenCursor::new(tokens);
        Program::make(&mut cursor).unwrap_err()
    }

    #[test]
    fn expression_vs_assignment_is_decided_by_the_assign_token() {
        let prog = program("a\na = 1\n");
        assert!(matches!(prog.statements[0], Statement::Expression(_)));
        assert!(matches!(prog.statements[1], Statement::Assign(_)));
    }

    #[test]
    fn call_targets_parse_without_validation() {
        let prog = program("a(2,3) = 123\n");
        assert!(matches!(prog.statements[0], Statement::Assign(_)));
    }

    #[test]
    fn compound_statements_require_their_colon() {
        let err = program_err("if a > 0\n    a = 1\n");
        assert!(err.message.contains("ColonToken"));
    }

    #[test]
    fn suites_need_at_least_one_statement() {
        // the block opener promises an indented suite that never comes
        let err = program_err("while a:\n");
        assert!(err.message.contains("IndentIncToken"));
    }

    #[test]
    fn if_elif_else_chains_attach_to_one_statement() {
        let prog = program("if a:\n    pass\nelif b:\n    pass\nelse:\n    pass\n");
        assert_eq!(prog.statements.len(), 1);
        match &prog.statements[0] {
            Statement::If(stmt) => {
                assert_eq!(stmt.elif_branches.len(), 1);
                assert!(stmt.else_branch.is_some());
            }
            other => panic!("expected an if statement, got {:?}", other),
        }
    }

    #[test]
    fn funcdef_params_may_be_absent() {
        let prog = program("def fn():\n    return\n");
        match &prog.statements[0] {
            Statement::FuncDef(def) => {
                assert_eq!(def.name.name, "fn");
                assert!(def.params.is_none());
            }
            other => panic!("expected a funcdef, got {:?}", other),
        }

        let prog = program("def fn(a, b):\n    return a\n");
        match &prog.statements[0] {
            Statement::FuncDef(def) => {
                assert_eq!(def.params.as_ref().unwrap().identifiers.len(), 2);
            }
            other => panic!("expected a funcdef, got {:?}", other),
        }
    }

    #[test]
    fn return_keeps_its_optional_expression() {
        let prog = program("def fn():\n    return 1 + 2\n");
        match &prog.statements[0] {
            Statement::FuncDef(def) => match &def.suite.statements[0] {
                Statement::Return(ret) => assert!(ret.expression.is_some()),
                other => panic!("expected return, got {:?}", other),
            },
            other => panic!("expected a funcdef, got {:?}", other),
        }
    }

    #[test]
    fn global_requires_an_identifier() {
        let prog = program("global a, b\n");
        match &prog.statements[0] {
            Statement::Global(stmt) => {
                assert_eq!(stmt.identifiers.identifiers.len(), 2);
            }
            other => panic!("expected global, got {:?}", other),
        }
        assert!(program_err("global\n").message.contains("IdentifierToken"));
    }

    #[test]
    fn empty_input_is_an_empty_program() {
        let prog = program("#1234\n   \t    \n  #123");
        assert!(prog.statements.is_empty());
    }

    #[test]
    fn trailing_tokens_after_an_expression_fail() {
        // "123abc" scans as an int then an identifier; the identifier is
        // garbage after the expression statement
        let err = program_err("a = 123abc\n");
        assert!(err.message.contains("NewLineToken"));
    }

    #[test]
    fn nested_blocks_parse_through_their_markers() {
        let prog = program(
            "if a >= 0:\n    if b < 0:\n        a = fn(1)\n        b = b << a\n    a = a | b\nb.fn(a + b // c)\n",
        );
        assert_eq!(prog.statements.len(), 2);
    }
}
