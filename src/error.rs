//! Error types for the front-end pipeline.
//!
//! Each stage surfaces its own error kind: the preprocessor raises
//! [`IndentationError`], the scanner raises [`LexicalError`], and the parser
//! raises [`SyntaxError`]. [`Error`] wraps the three so a caller can run the
//! whole pipeline behind a single `Result`. No stage retries or recovers; a
//! failed stage produces no output.

use crate::scanner::position::Position;
use std::fmt;

/// Any error produced by the front end.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Indentation(IndentationError),
    Lexical(LexicalError),
    Syntax(SyntaxError),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Indentation(e) => e.fmt(f),
            Error::Lexical(e) => e.fmt(f),
            Error::Syntax(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<IndentationError> for Error {
    fn from(e: IndentationError) -> Self {
        Error::Indentation(e)
    }
}

impl From<LexicalError> for Error {
    fn from(e: LexicalError) -> Self {
        Error::Lexical(e)
    }
}

impl From<SyntaxError> for Error {
    fn from(e: SyntaxError) -> Self {
        Error::Syntax(e)
    }
}

/// Inconsistent indentation in the raw source: tabs mixed into a pending
/// space run, or a leading space run that never completes an indent unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentationError {
    /// 0-based line the offending indentation appears on.
    pub line: usize,
    pub message: String,
}

impl IndentationError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for IndentationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "indentation error on line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for IndentationError {}

/// A character sequence the automaton cannot shape into any token.
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalError {
    /// The offending text, as buffered up to the failure point.
    pub text: String,
    /// Span covering the buffered text.
    pub position: Position,
}

impl LexicalError {
    pub fn new(text: impl Into<String>, position: Position) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lexical error on line {} ({}..{}): cannot read {:?}",
            self.position.line, self.position.start, self.position.stop, self.text
        )
    }
}

impl std::error::Error for LexicalError {}

/// An expected-vs-actual token mismatch, or a token stream that ended while
/// a grammar rule still needed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Mismatch between the token a rule expected and the one it found.
    pub fn expected(expected: &str, actual: &str) -> Self {
        Self::new(format!("expected {}, but got {} here", expected, actual))
    }

    /// The token stream ran out while a rule still expected input.
    pub fn ended(expected: &str) -> Self {
        Self::new(format!(
            "expected {}, but the token sequence ended",
            expected
        ))
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "syntax error: {}", self.message)
    }
}

impl std::error::Error for SyntaxError {}
