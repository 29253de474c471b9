//! Source positions attached to segments and tokens.

use serde::Serialize;

/// A half-open column span on a single source line.
///
/// `line` is 0-based; `start`/`stop` are 0-based character columns with
/// `stop` exclusive. Structural markers synthesized by the preprocessor get
/// zero-width spans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub start: usize,
    pub stop: usize,
}

impl Position {
    pub fn new(line: usize, start: usize, stop: usize) -> Self {
        Self { line, start, stop }
    }

    /// Smallest span covering both positions. Falls back to `self`'s line
    /// when the two spans sit on different lines.
    pub fn cover(&self, other: &Position) -> Position {
        Position {
            line: self.line,
            start: self.start.min(other.start),
            stop: self.stop.max(other.stop),
        }
    }
}
