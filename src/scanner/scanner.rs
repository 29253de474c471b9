//! The tokenizer.
//!
//! [`Scanner`] drives the automaton over the preprocessed character stream.
//! Characters that transition are committed and buffered; a character with
//! no transition forces the buffered lexeme to finalize through the
//! per-state token factory, after which the same character is retried from
//! the start state. A failure to finalize (current state not acceptable) is
//! a lexical error carrying the offending text and its span.

use crate::error::{LexicalError, Result};
use crate::scanner::dfa::{Automaton, State};
use crate::scanner::position::Position;
use crate::scanner::preprocessor::{LogicalChar, SourceCode};
use crate::scanner::token::{Keyword, Punct, Token, TokenKind};

/// Stateful tokenizer. One instance processes one input at a time; `scan`
/// resets all cursor state on entry, so instances are reusable sequentially.
#[derive(Debug)]
pub struct Scanner {
    automaton: Automaton,
    chars: String,
    positions: Vec<Position>,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            automaton: Automaton::new(),
            chars: String::new(),
            positions: Vec::new(),
        }
    }

    /// Drop all buffered state and return the automaton to its start state.
    pub fn clear(&mut self) {
        self.automaton.reset();
        self.chars.clear();
        self.positions.clear();
    }

    /// Tokenize `text`, running the preprocessor first.
    ///
    /// Comment lexemes are recognized and silently dropped. Fails with an
    /// indentation error from the preprocessor or a lexical error from the
    /// automaton; no tokens are produced on failure.
    pub fn scan(&mut self, text: &str) -> Result<Vec<Token>> {
        self.clear();
        let source = SourceCode::new(text)?;
        let mut tokens = Vec::new();
        for (pos, ch) in source.iter_chars_with_pos() {
            loop {
                if self.automaton.can_consume(&ch) {
                    self.automaton.consume(&ch);
                    if self.automaton.current() != State::Start {
                        if let LogicalChar::Char(c) = ch {
                            self.chars.push(c);
                        }
                        self.positions.push(pos);
                    }
                    break;
                }
                if !self.automaton.current().acceptable() {
                    return Err(self.fail(Some((pos, &ch))).into());
                }
                self.flush_token(&mut tokens);
            }
        }
        if self.automaton.current() != State::Start {
            if !self.automaton.current().acceptable() {
                return Err(self.fail(None).into());
            }
            self.flush_token(&mut tokens);
        }
        Ok(tokens)
    }

    /// Finalize the buffered lexeme into a token and reset for the next one.
    ///
    /// Only called with the automaton in an acceptable state.
    fn flush_token(&mut self, tokens: &mut Vec<Token>) {
        let state = self.automaton.current();
        let position = self.buffered_span();
        let text = std::mem::take(&mut self.chars);
        if let Some(kind) = Self::token_kind(state, &text) {
            tokens.push(Token::new(kind, text, position));
        }
        self.positions.clear();
        self.automaton.reset();
    }

    /// The token kind produced by an accepting state, `None` for lexemes
    /// that are recognized but not emitted (comments).
    fn token_kind(state: State, text: &str) -> Option<TokenKind> {
        match state {
            State::Ident => Some(match Keyword::lookup(text) {
                Some(keyword) => TokenKind::Keyword(keyword),
                None => TokenKind::Identifier,
            }),
            State::Int => Some(TokenKind::Int),
            State::Float => Some(TokenKind::Float),
            State::StringEnd => Some(TokenKind::Str),
            State::NewLine => Some(TokenKind::NewLine),
            State::IndentInc => Some(TokenKind::IndentInc),
            State::IndentDec => Some(TokenKind::IndentDec),
            State::Comment => None,
            _ => {
                let punct = Punct::lookup(text)
                    .expect("accepting punctuator state holds non-punctuator text");
                Some(TokenKind::Punct(punct))
            }
        }
    }

    /// Span covering the buffered lexeme.
    fn buffered_span(&self) -> Position {
        match (self.positions.first(), self.positions.last()) {
            (Some(first), Some(last)) => Position::new(first.line, first.start, last.stop),
            _ => Position::default(),
        }
    }

    /// Build the lexical error for the current (unfinalizable) buffer,
    /// including the character that had no transition, if any.
    fn fail(&self, offending: Option<(Position, &LogicalChar)>) -> LexicalError {
        let mut text = self.chars.clone();
        let mut span = self.buffered_span();
        if let Some((pos, ch)) = offending {
            if let LogicalChar::Char(c) = ch {
                text.push(*c);
            }
            span = if self.positions.is_empty() {
                pos
            } else {
                span.cover(&pos)
            };
        }
        LexicalError::new(text, span)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}
