//! Lexical mode state machine.
//!
//! The minifier is always in exactly one [`LexMode`]. [`LexMode::next`] is the
//! whole transition table: given the current byte, the byte after it, and
//! whether a `/` here would begin an operand, it returns the mode for the
//! following byte. The driver only decides what to do with the bytes (copy
//! them, drop them, or turn them into a gap).
//!
//! ```text
//!            "//"             "\n" | EOF
//!   Normal ───────▶ LineComment ─────────▶ Normal
//!          "/*"              "*/"
//!          ───────▶ BlockComment ────────▶ Normal
//!          "'" | "\""          quote
//!          ───────▶ String{Single,Double} ─▶ Normal
//!          "/" (operand)       "/" outside [...]
//!          ───────▶ Regex ────────────────▶ Normal
//! ```
//!
//! EOF inside a block comment, string or regex, and a raw line break inside a
//! string or regex, are errors. A line comment ends cleanly at EOF.

use crate::error::LiteralKind;

/// Lexical context of the byte being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum LexMode {
    #[default]
    Normal,
    LineComment,
    BlockComment,
    StringSingle,
    StringDouble,
    /// `in_class` is set between `[` and `]`, where `/` does not close the
    /// literal.
    Regex { in_class: bool },
}

/// Result of feeding one byte to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Transition {
    /// Mode for the byte after this one (or after the lookahead, see below).
    pub mode: LexMode,
    /// The lookahead byte belongs to the same construct as this byte and must
    /// be consumed along with it: the second byte of `//`, `/*` and `*/`, or
    /// the byte after a backslash.
    pub takes_lookahead: bool,
}

impl Transition {
    const fn to(mode: LexMode) -> Self {
        Self {
            mode,
            takes_lookahead: false,
        }
    }

    const fn with_lookahead(mode: LexMode) -> Self {
        Self {
            mode,
            takes_lookahead: true,
        }
    }
}

impl LexMode {
    /// Kind of the literal this mode is inside of, if it needs a terminator.
    pub(crate) const fn literal_kind(self) -> Option<LiteralKind> {
        match self {
            Self::Normal | Self::LineComment => None,
            Self::BlockComment => Some(LiteralKind::BlockComment),
            Self::StringSingle | Self::StringDouble => Some(LiteralKind::String),
            Self::Regex { .. } => Some(LiteralKind::Regex),
        }
    }

    pub(crate) const fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    pub(crate) const fn is_regex(self) -> bool {
        matches!(self, Self::Regex { .. })
    }

    /// Computes the transition for `byte` (`None` at end of input).
    ///
    /// `operand` is only consulted in `Normal` mode: it tells whether a `/`
    /// that does not start a comment begins a regular expression.
    ///
    /// # Errors
    ///
    /// Returns the kind of the literal left open when `byte` cannot appear
    /// inside it.
    pub(crate) fn next(
        self,
        byte: Option<u8>,
        lookahead: Option<u8>,
        operand: bool,
    ) -> Result<Transition, LiteralKind> {
        let Some(byte) = byte else {
            return self.close_at_eof();
        };

        let transition = match (self, byte) {
            (Self::Normal, b'/') => match lookahead {
                Some(b'/') => Transition::with_lookahead(Self::LineComment),
                Some(b'*') => Transition::with_lookahead(Self::BlockComment),
                _ if operand => Transition::to(Self::Regex { in_class: false }),
                _ => Transition::to(Self::Normal),
            },
            (Self::Normal, b'\'') => Transition::to(Self::StringSingle),
            (Self::Normal, b'"') => Transition::to(Self::StringDouble),

            (Self::LineComment, b'\n') => Transition::to(Self::Normal),

            (Self::BlockComment, b'*') if lookahead == Some(b'/') => {
                Transition::with_lookahead(Self::Normal)
            }

            (Self::StringSingle | Self::StringDouble | Self::Regex { .. }, b'\n') => {
                return self.close_at_eof();
            }
            (Self::StringSingle | Self::StringDouble | Self::Regex { .. }, b'\\') => {
                if lookahead.is_none() {
                    return self.close_at_eof();
                }
                Transition::with_lookahead(self)
            }
            (Self::StringSingle, b'\'') | (Self::StringDouble, b'"') => {
                Transition::to(Self::Normal)
            }
            (Self::Regex { in_class: false }, b'/') => Transition::to(Self::Normal),
            (Self::Regex { .. }, b'[') => Transition::to(Self::Regex { in_class: true }),
            (Self::Regex { in_class: true }, b']') => {
                Transition::to(Self::Regex { in_class: false })
            }

            (mode, _) => Transition::to(mode),
        };
        Ok(transition)
    }

    fn close_at_eof(self) -> Result<Transition, LiteralKind> {
        match self.literal_kind() {
            Some(kind) => Err(kind),
            None => Ok(Transition::to(Self::Normal)),
        }
    }
}
