//! Syntactic analysis: grammar engine, parse tree, and AST.
//!
//! [`expr`] and [`stmt`] implement the recursive-descent grammar and own the
//! parse-tree node types; [`ast`] holds the normalized tree handed to
//! consumers; [`lower`] converts between the two; [`parser`] is the facade
//! callers use.

pub mod ast;
pub mod cursor;
pub mod expr;
pub mod lower;
pub mod operator;
pub mod parser;
pub mod stmt;

pub use ast::AstNode;
pub use cursor::TokenCursor;
pub use operator::Operator;
pub use parser::Parser;
pub use stmt::Program;
