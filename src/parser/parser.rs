//! The front-end facade.
//!
//! [`Parser`] wires the pipeline together: text → scanner → token cursor →
//! parse tree, and optionally on to the AST. Parsing is all-or-nothing: the
//! first mismatch aborts with a syntax error and no tree is produced.

use crate::error::{Result, SyntaxError};
use crate::parser::ast::AstNode;
use crate::parser::cursor::TokenCursor;
use crate::parser::stmt::Program;
use crate::scanner::Scanner;

/// Owns a scanner and runs the pipeline over one input at a time.
#[derive(Debug, Default)]
pub struct Parser {
    scanner: Scanner,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            scanner: Scanner::new(),
        }
    }

    /// Parse `text` into the parse-tree root, consuming every token.
    pub fn to_parse_tree(&mut self, text: &str) -> Result<Program> {
        let tokens = self.scanner.scan(text)?;
        let mut cursor = TokenCursor::new(tokens);
        let program = Program::make(&mut cursor)?;
        Ok(program)
    }

    /// Parse `text` all the way to the AST.
    ///
    /// On top of the grammar this checks assignment targets: the left side
    /// of `=` must be an identifier, attribute reference, or subscription.
    /// The parse tree itself stays permissive; the check runs on the
    /// lowered tree.
    pub fn to_ast(&mut self, text: &str) -> Result<AstNode> {
        let tree = self.to_parse_tree(text)?;
        let ast = tree.lower();
        check_assign_targets(&ast)?;
        Ok(ast)
    }
}

/// Reject assignments whose target cannot be assigned to (e.g. a call).
fn check_assign_targets(node: &AstNode) -> std::result::Result<(), SyntaxError> {
    if let AstNode::Assign { left, .. } = node {
        if !is_assign_target(left) {
            return Err(SyntaxError::new(format!(
                "cannot assign to {}",
                left.node_type()
            )));
        }
    }
    for child in node.children() {
        check_assign_targets(child)?;
    }
    Ok(())
}

fn is_assign_target(node: &AstNode) -> bool {
    matches!(
        node,
        AstNode::Identifier { .. } | AstNode::AttrRef { .. } | AstNode::Subscription { .. }
    )
}
