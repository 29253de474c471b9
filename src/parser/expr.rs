//! Expression grammar.
//!
//! Every binary precedence level has the shape `E ::= T {op T}` after
//! left-recursion elimination, so a single generic loop parses all of them,
//! parametrized by a static table of (operator set, next lower level) pairs.
//! From loosest to tightest:
//!
//! ```text
//! expression ::= or_test
//! or_test    ::= and_test {"or" and_test}
//! and_test   ::= not_test {"and" not_test}
//! not_test   ::= "not" not_test | comparison
//! comparison ::= or_expr {("<"|"<="|">"|">="|"=="|"!="|"is") or_expr}
//! or_expr    ::= xor_expr {"|" xor_expr}
//! xor_expr   ::= and_expr {"^" and_expr}
//! and_expr   ::= shift_expr {"&" shift_expr}
//! shift_expr ::= a_expr {("<<"|">>") a_expr}
//! a_expr     ::= m_expr {("+"|"-") m_expr}
//! m_expr     ::= u_expr {("*"|"//"|"/"|"%") u_expr}
//! u_expr     ::= ("-"|"+"|"~") u_expr | power
//! power      ::= primary {"**" u_expr}
//! primary    ::= atom {"." identifier | "[" expr_list "]" | "(" [expr_list] ")"}
//! atom       ::= identifier | literal | "(" expression ")"
//! expr_list  ::= expression {"," expression}
//! ```
//!
//! The parse tree keeps the flat `{op T}` append lists; associativity is
//! decided later, when lowering folds them (left for every infix level,
//! right for `power`).

use crate::error::SyntaxError;
use crate::parser::cursor::TokenCursor;
use crate::parser::operator::Operator;
use crate::scanner::token::{Keyword, Punct, TokenKind};
use serde_json::{json, Value};

/// One entry of the precedence table: which operators live on this level
/// and what the operands are.
struct LevelSpec {
    ops: &'static [(TokenKind, Operator)],
    next: NextLevel,
}

/// What an infix level recurses into for its operands.
enum NextLevel {
    Level(InfixLevel),
    NotTest,
    UExpr,
}

/// The binary precedence levels, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixLevel {
    OrTest,
    AndTest,
    Comparison,
    OrExpr,
    XorExpr,
    AndExpr,
    ShiftExpr,
    AExpr,
    MExpr,
}

impl InfixLevel {
    /// Grammar symbol name, used as the parse-tree type tag.
    pub fn symbol_name(&self) -> &'static str {
        match self {
            InfixLevel::OrTest => "OrTest",
            InfixLevel::AndTest => "AndTest",
            InfixLevel::Comparison => "Comparison",
            InfixLevel::OrExpr => "OrExpr",
            InfixLevel::XorExpr => "XorExpr",
            InfixLevel::AndExpr => "AndExpr",
            InfixLevel::ShiftExpr => "ShiftExpr",
            InfixLevel::AExpr => "AExpr",
            InfixLevel::MExpr => "MExpr",
        }
    }

    fn spec(&self) -> LevelSpec {
        match self {
            InfixLevel::OrTest => LevelSpec {
                ops: &[(TokenKind::Keyword(Keyword::Or), Operator::Or)],
                next: NextLevel::Level(InfixLevel::AndTest),
            },
            InfixLevel::AndTest => LevelSpec {
                ops: &[(TokenKind::Keyword(Keyword::And), Operator::And)],
                next: NextLevel::NotTest,
            },
            InfixLevel::Comparison => LevelSpec {
                ops: &[
                    (TokenKind::Punct(Punct::Less), Operator::Less),
                    (TokenKind::Punct(Punct::Leq), Operator::Leq),
                    (TokenKind::Punct(Punct::Greater), Operator::Greater),
                    (TokenKind::Punct(Punct::Geq), Operator::Geq),
                    (TokenKind::Punct(Punct::Equals), Operator::Equals),
                    (TokenKind::Punct(Punct::NotEquals), Operator::NotEquals),
                    (TokenKind::Keyword(Keyword::Is), Operator::Is),
                ],
                next: NextLevel::Level(InfixLevel::OrExpr),
            },
            InfixLevel::OrExpr => LevelSpec {
                ops: &[(TokenKind::Punct(Punct::BitOr), Operator::BitOr)],
                next: NextLevel::Level(InfixLevel::XorExpr),
            },
            InfixLevel::XorExpr => LevelSpec {
                ops: &[(TokenKind::Punct(Punct::BitXor), Operator::BitXor)],
                next: NextLevel::Level(InfixLevel::AndExpr),
            },
            InfixLevel::AndExpr => LevelSpec {
                ops: &[(TokenKind::Punct(Punct::BitAnd), Operator::BitAnd)],
                next: NextLevel::Level(InfixLevel::ShiftExpr),
            },
            InfixLevel::ShiftExpr => LevelSpec {
                ops: &[
                    (TokenKind::Punct(Punct::ShiftLeft), Operator::ShiftLeft),
                    (TokenKind::Punct(Punct::ShiftRight), Operator::ShiftRight),
                ],
                next: NextLevel::Level(InfixLevel::AExpr),
            },
            InfixLevel::AExpr => LevelSpec {
                ops: &[
                    (TokenKind::Punct(Punct::Plus), Operator::Add),
                    (TokenKind::Punct(Punct::Minus), Operator::Minus),
                ],
                next: NextLevel::Level(InfixLevel::MExpr),
            },
            InfixLevel::MExpr => LevelSpec {
                ops: &[
                    (TokenKind::Punct(Punct::Multiply), Operator::Multiply),
                    (TokenKind::Punct(Punct::DivInt), Operator::DivInt),
                    (TokenKind::Punct(Punct::Div), Operator::Div),
                    (TokenKind::Punct(Punct::Mod), Operator::Mod),
                ],
                next: NextLevel::UExpr,
            },
        }
    }

    /// The operator this level recognizes at the cursor, if any.
    fn operator_for(&self, kind: TokenKind) -> Option<Operator> {
        self.spec()
            .ops
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, op)| *op)
    }
}

/// Any expression-grammar node below `expression`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    Infix(InfixExpr),
    Not(NotTest),
    Unary(UnaryExpr),
    Power(PowerExpr),
}

impl ExprNode {
    pub fn repr(&self) -> Value {
        match self {
            ExprNode::Infix(e) => e.repr(),
            ExprNode::Not(e) => e.repr(),
            ExprNode::Unary(e) => e.repr(),
            ExprNode::Power(e) => e.repr(),
        }
    }
}

/// A level of the infix hierarchy: `first {op expr}`.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    pub level: InfixLevel,
    pub first: Box<ExprNode>,
    pub appends: Vec<InfixAppend>,
}

/// One `op expr` unit of an infix node.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixAppend {
    pub operator: Operator,
    pub expression: ExprNode,
}

impl InfixExpr {
    /// Generic `E ::= T {op T}` loop for any level of the table.
    pub fn make(level: InfixLevel, tokens: &mut TokenCursor) -> Result<InfixExpr, SyntaxError> {
        let first = Self::make_operand(level, tokens)?;
        let mut appends = Vec::new();
        loop {
            let op = match tokens.peek() {
                Some(token) => level.operator_for(token.kind),
                None => None,
            };
            let Some(operator) = op else { break };
            tokens.advance();
            let expression = Self::make_operand(level, tokens)?;
            appends.push(InfixAppend {
                operator,
                expression,
            });
        }
        Ok(InfixExpr {
            level,
            first: Box::new(first),
            appends,
        })
    }

    fn make_operand(level: InfixLevel, tokens: &mut TokenCursor) -> Result<ExprNode, SyntaxError> {
        match level.spec().next {
            NextLevel::Level(next) => Ok(ExprNode::Infix(InfixExpr::make(next, tokens)?)),
            NextLevel::NotTest => NotTest::make(tokens),
            NextLevel::UExpr => UnaryExpr::make(tokens),
        }
    }

    pub fn repr(&self) -> Value {
        json!({
            "type": self.level.symbol_name(),
            "expression": self.first.repr(),
            "appends": self.appends.iter().map(|a| json!({
                "operator": a.operator.display(),
                "expression": a.expression.repr(),
            })).collect::<Vec<_>>(),
        })
    }
}

/// `not_test ::= "not" not_test` (the plain branch stays an [`InfixExpr`]).
#[derive(Debug, Clone, PartialEq)]
pub struct NotTest {
    pub operand: Box<ExprNode>,
}

impl NotTest {
    /// Parse a `not_test`: strip any number of leading `not`s, then fall
    /// through to a comparison.
    pub fn make(tokens: &mut TokenCursor) -> Result<ExprNode, SyntaxError> {
        if tokens.peek_is_keyword(Keyword::Not) {
            tokens.advance();
            let operand = NotTest::make(tokens)?;
            Ok(ExprNode::Not(NotTest {
                operand: Box::new(operand),
            }))
        } else {
            Ok(ExprNode::Infix(InfixExpr::make(
                InfixLevel::Comparison,
                tokens,
            )?))
        }
    }

    pub fn repr(&self) -> Value {
        json!({
            "type": "NotTest",
            "operand": self.operand.repr(),
        })
    }
}

/// `u_expr ::= ("-"|"+"|"~") u_expr` (the plain branch is a [`PowerExpr`]).
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: Operator,
    pub operand: Box<ExprNode>,
}

impl UnaryExpr {
    pub fn make(tokens: &mut TokenCursor) -> Result<ExprNode, SyntaxError> {
        let op = tokens.peek().and_then(Operator::unary_from);
        if let Some(operator) = op {
            tokens.advance();
            let operand = UnaryExpr::make(tokens)?;
            Ok(ExprNode::Unary(UnaryExpr {
                operator,
                operand: Box::new(operand),
            }))
        } else {
            Ok(ExprNode::Power(PowerExpr::make(tokens)?))
        }
    }

    pub fn repr(&self) -> Value {
        json!({
            "type": "UExpr",
            "operator": self.operator.display(),
            "operand": self.operand.repr(),
        })
    }
}

/// `power ::= primary {"**" u_expr}`.
///
/// Each exponent is itself a `u_expr`, so a chain like `1 ** 2 ** 3`
/// naturally nests to the right; lowering folds whatever list remains
/// right-associatively.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerExpr {
    pub base: Primary,
    pub exponents: Vec<ExprNode>,
}

impl PowerExpr {
    pub fn make(tokens: &mut TokenCursor) -> Result<PowerExpr, SyntaxError> {
        let base = Primary::make(tokens)?;
        let mut exponents = Vec::new();
        while tokens.peek_is_punct(Punct::Pow) {
            tokens.advance();
            exponents.push(UnaryExpr::make(tokens)?);
        }
        Ok(PowerExpr { base, exponents })
    }

    pub fn repr(&self) -> Value {
        json!({
            "type": "Power",
            "primary": self.base.repr(),
            "exponents": self.exponents.iter().map(ExprNode::repr).collect::<Vec<_>>(),
        })
    }
}

/// `primary ::= atom {trailer}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Primary {
    pub atom: Atom,
    pub trailers: Vec<Trailer>,
}

/// A postfix applied to a primary.
#[derive(Debug, Clone, PartialEq)]
pub enum Trailer {
    /// `"." identifier`
    AttrRef(Identifier),
    /// `"[" expr_list "]"`
    Subscription(ExprList),
    /// `"(" [expr_list] ")"`
    Call(Option<ExprList>),
}

impl Primary {
    pub fn make(tokens: &mut TokenCursor) -> Result<Primary, SyntaxError> {
        let atom = Atom::make(tokens)?;
        let mut trailers = Vec::new();
        loop {
            if tokens.peek_is_punct(Punct::Dot) {
                tokens.advance();
                trailers.push(Trailer::AttrRef(Identifier::make(tokens)?));
            } else if tokens.peek_is_punct(Punct::LeftBracket) {
                tokens.advance();
                let args = ExprList::make(tokens)?;
                tokens.expect_punct(Punct::RightBracket)?;
                trailers.push(Trailer::Subscription(args));
            } else if tokens.peek_is_punct(Punct::LeftParentheses) {
                tokens.advance();
                let args = if tokens.peek_is_punct(Punct::RightParentheses) {
                    None
                } else {
                    Some(ExprList::make(tokens)?)
                };
                tokens.expect_punct(Punct::RightParentheses)?;
                trailers.push(Trailer::Call(args));
            } else {
                break;
            }
        }
        Ok(Primary { atom, trailers })
    }

    pub fn repr(&self) -> Value {
        json!({
            "type": "Primary",
            "atom": self.atom.repr(),
            "trailers": self.trailers.iter().map(Trailer::repr).collect::<Vec<_>>(),
        })
    }
}

impl Trailer {
    pub fn repr(&self) -> Value {
        match self {
            Trailer::AttrRef(id) => json!({
                "type": "AttrRef",
                "identifier": id.repr(),
            }),
            Trailer::Subscription(args) => json!({
                "type": "Subscription",
                "args": args.repr(),
            }),
            Trailer::Call(args) => match args {
                Some(args) => json!({"type": "Call", "args": args.repr()}),
                None => json!({"type": "Call"}),
            },
        }
    }
}

/// `atom ::= identifier | literal | "(" expression ")"`.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Identifier(Identifier),
    Str(StrLiteral),
    Int(IntLiteral),
    Float(FloatLiteral),
    True,
    False,
    None,
    Paren(ParenExpr),
}

impl Atom {
    pub fn make(tokens: &mut TokenCursor) -> Result<Atom, SyntaxError> {
        let Some(token) = tokens.peek() else {
            return Err(SyntaxError::ended("Atom"));
        };
        match token.kind {
            TokenKind::Identifier => Ok(Atom::Identifier(Identifier::make(tokens)?)),
            TokenKind::Str => Ok(Atom::Str(StrLiteral::make(tokens)?)),
            TokenKind::Int => Ok(Atom::Int(IntLiteral::make(tokens)?)),
            TokenKind::Float => Ok(Atom::Float(FloatLiteral::make(tokens)?)),
            TokenKind::Keyword(Keyword::True) => {
                tokens.advance();
                Ok(Atom::True)
            }
            TokenKind::Keyword(Keyword::False) => {
                tokens.advance();
                Ok(Atom::False)
            }
            TokenKind::Keyword(Keyword::None) => {
                tokens.advance();
                Ok(Atom::None)
            }
            TokenKind::Punct(Punct::LeftParentheses) => {
                Ok(Atom::Paren(ParenExpr::make(tokens)?))
            }
            _ => Err(SyntaxError::expected("Atom", token.type_name())),
        }
    }

    pub fn repr(&self) -> Value {
        match self {
            Atom::Identifier(id) => id.repr(),
            Atom::Str(s) => s.repr(),
            Atom::Int(i) => i.repr(),
            Atom::Float(f) => f.repr(),
            Atom::True => json!({"type": "TrueLiteral"}),
            Atom::False => json!({"type": "FalseLiteral"}),
            Atom::None => json!({"type": "NoneLiteral"}),
            Atom::Paren(p) => p.repr(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn make(tokens: &mut TokenCursor) -> Result<Identifier, SyntaxError> {
        let token = tokens.expect_identifier()?;
        Ok(Identifier {
            name: token.text.clone(),
        })
    }

    pub fn repr(&self) -> Value {
        json!({"type": "Identifier", "name": self.name})
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrLiteral {
    pub value: String,
}

impl StrLiteral {
    pub fn make(tokens: &mut TokenCursor) -> Result<StrLiteral, SyntaxError> {
        let token = tokens.expect(TokenKind::Str)?;
        Ok(StrLiteral {
            value: token.unescaped_string(),
        })
    }

    pub fn repr(&self) -> Value {
        json!({"type": "StrLiteral", "value": self.value})
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntLiteral {
    pub value: i64,
}

impl IntLiteral {
    pub fn make(tokens: &mut TokenCursor) -> Result<IntLiteral, SyntaxError> {
        let token = tokens.expect(TokenKind::Int)?;
        let value = token
            .text
            .parse::<i64>()
            .map_err(|_| SyntaxError::new(format!("integer literal {} is out of range", token.text)))?;
        Ok(IntLiteral { value })
    }

    pub fn repr(&self) -> Value {
        json!({"type": "IntLiteral", "value": self.value})
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatLiteral {
    pub value: f64,
}

impl FloatLiteral {
    pub fn make(tokens: &mut TokenCursor) -> Result<FloatLiteral, SyntaxError> {
        let token = tokens.expect(TokenKind::Float)?;
        let value = token
            .text
            .parse::<f64>()
            .map_err(|_| SyntaxError::new(format!("malformed float literal {}", token.text)))?;
        Ok(FloatLiteral { value })
    }

    pub fn repr(&self) -> Value {
        json!({"type": "FloatLiteral", "value": self.value})
    }
}

/// `"(" expression ")"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpr {
    pub expression: Box<Expression>,
}

impl ParenExpr {
    pub fn make(tokens: &mut TokenCursor) -> Result<ParenExpr, SyntaxError> {
        tokens.expect_punct(Punct::LeftParentheses)?;
        let expression = Expression::make(tokens)?;
        tokens.expect_punct(Punct::RightParentheses)?;
        Ok(ParenExpr {
            expression: Box::new(expression),
        })
    }

    pub fn repr(&self) -> Value {
        json!({"type": "ParenthesesExpr", "expression": self.expression.repr()})
    }
}

/// `expr_list ::= expression {"," expression}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprList {
    pub expressions: Vec<Expression>,
}

impl ExprList {
    pub fn make(tokens: &mut TokenCursor) -> Result<ExprList, SyntaxError> {
        let mut expressions = vec![Expression::make(tokens)?];
        while tokens.peek_is_punct(Punct::Comma) {
            tokens.advance();
            expressions.push(Expression::make(tokens)?);
        }
        Ok(ExprList { expressions })
    }

    pub fn repr(&self) -> Value {
        json!({
            "type": "ExprList",
            "expressions": self.expressions.iter().map(Expression::repr).collect::<Vec<_>>(),
        })
    }
}

/// The grammar's `expression` symbol: an `or_test` at top level.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub or_test: InfixExpr,
}

impl Expression {
    pub fn make(tokens: &mut TokenCursor) -> Result<Expression, SyntaxError> {
        Ok(Expression {
            or_test: InfixExpr::make(InfixLevel::OrTest, tokens)?,
        })
    }

    pub fn repr(&self) -> Value {
        json!({"type": "Expression", "orTest": self.or_test.repr()})
    }
}
