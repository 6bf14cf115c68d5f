use core::fmt;
use std::io;

use thiserror::Error;

/// Failure of a single [`minify`](crate::minify) call.
///
/// Every error aborts the call. Output written before the failure is
/// incomplete and must not be used.
#[derive(Error, Debug)]
pub enum MinifyError {
    /// The input ended inside a literal or comment.
    #[error("{source} at {line}:{column}")]
    Syntax {
        /// What went wrong.
        source: SyntaxError,
        /// 1-based line of the byte that opened the literal.
        line: usize,
        /// 1-based byte column of the byte that opened the literal.
        column: usize,
    },
    /// Reading the input or writing the output failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl MinifyError {
    pub(crate) fn unterminated(kind: LiteralKind, (line, column): (usize, usize)) -> Self {
        Self::Syntax {
            source: SyntaxError::UnterminatedLiteral(kind),
            line,
            column,
        }
    }

    /// Returns the syntax error, if this is one.
    #[must_use]
    pub fn syntax(&self) -> Option<SyntaxError> {
        match self {
            Self::Syntax { source, .. } => Some(*source),
            Self::Io(_) => None,
        }
    }

    /// Returns `(line, column)` of the literal that was left open.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Self::Syntax { line, column, .. } => Some((*line, *column)),
            Self::Io(_) => None,
        }
    }

    /// Returns `true` if the error came from the underlying streams.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Lexical errors detected by the minifier.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// A string, regular expression or block comment was never closed.
    #[error("unterminated {0}")]
    UnterminatedLiteral(LiteralKind),
}

/// The kinds of literal that need a terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LiteralKind {
    /// A single- or double-quoted string.
    String,
    /// A `/* ... */` comment.
    BlockComment,
    /// A `/.../flags` regular expression.
    Regex,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string literal",
            Self::BlockComment => "block comment",
            Self::Regex => "regular expression literal",
        })
    }
}
