//! # pylite
//!
//! Front end for a Python-like language. Raw source text goes through three
//! stages and comes out as a typed abstract syntax tree:
//!
//! ```text
//! text → preprocessor → logical characters → scanner → tokens
//!      → grammar engine → parse tree → lowering → AST
//! ```
//!
//! The preprocessor makes indentation explicit (`IndentInc`/`IndentDec`/
//! `NewLine` markers), the scanner drives a hand-built automaton over the
//! flattened character stream, and the parser is a recursive-descent,
//! left-recursion-eliminated implementation of the expression and statement
//! grammar. Both trees serialize to nested JSON maps with a `type`
//! discriminator, which is the only interface exposed for display tooling.
//!
//! The pipeline is synchronous and pure: no I/O, no shared state, and every
//! failure is a typed error ([`error::Error`]) rather than a partial tree.
//!
//! ```text
//! let mut parser = pylite::Parser::new();
//! let ast = parser.to_ast("a = fn(1) + 2\n")?;
//! println!("{}", serde_json::to_string_pretty(&ast.repr())?);
//! ```

pub mod error;
pub mod parser;
pub mod scanner;

pub use error::{Error, IndentationError, LexicalError, Result, SyntaxError};
pub use parser::{AstNode, Parser, Program};
pub use scanner::{make_char_segments, Scanner, SourceCode};

/// One-shot convenience: parse `text` straight to its AST.
pub fn parse(text: &str) -> Result<AstNode> {
    Parser::new().to_ast(text)
}
