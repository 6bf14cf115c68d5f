//! Whitespace-collision resolver.
//!
//! Between two significant tokens the input may contain any mix of spaces,
//! line breaks and comments. [`separator`] decides what, if anything, has to
//! be written in their place so the output still tokenizes (and, across line
//! breaks, still inserts semicolons) the same way.

use crate::class::{is_word_byte, may_begin_statement, may_end_statement};

/// The strongest kind of insignificant input seen between two tokens.
///
/// Ordered by strength: merging two gaps keeps the stronger one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub(crate) enum Gap {
    #[default]
    None,
    Space,
    Newline,
    /// A line break standing in for a removed comment.
    CommentBreak,
}

impl Gap {
    pub(crate) fn widen(&mut self, other: Gap) {
        *self = (*self).max(other);
    }
}

/// What the output ended with before the gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Last {
    /// Nothing has been written yet.
    #[default]
    Start,
    /// A byte outside any literal.
    Byte(u8),
    /// A digit ending a number, where a following `.` would be read as its
    /// decimal point.
    Number,
    /// The closing quote of a string literal.
    StringEnd,
    /// The closing slash of a regular expression literal.
    RegexEnd,
}

impl Last {
    /// A line break after this may terminate a statement.
    fn may_end_statement(self) -> bool {
        match self {
            Self::Start => false,
            Self::Byte(b) => may_end_statement(b),
            Self::Number | Self::StringEnd | Self::RegexEnd => true,
        }
    }

    /// Glues to a following word byte. A regex glues because the word would
    /// be read as its flags.
    fn glues_to_word(self) -> bool {
        match self {
            Self::Byte(b) => is_word_byte(b),
            Self::Number | Self::RegexEnd => true,
            Self::Start | Self::StringEnd => false,
        }
    }

    /// `next` written right after this would lex as a different token.
    fn fuses_with(self, next: u8) -> bool {
        match self {
            // `+ +`, `- -`, `/ /`, and `/ *` which would open a comment.
            Self::Byte(b'/') => matches!(next, b'/' | b'*'),
            Self::Byte(b @ (b'+' | b'-')) => next == b,
            // `1 .toString()`
            Self::Number => next == b'.',
            // `/re/ /x` would read as a line comment after the regex.
            Self::RegexEnd => next == b'/',
            _ => false,
        }
    }
}

/// Chooses the byte written between `last` and `next` given the gap that
/// separated them in the input.
///
/// `next_opens_regex` is set when `next` is a `/` that starts a regular
/// expression literal.
///
/// | last | next | result |
/// |---|---|---|
/// | word | word | space |
/// | word | punctuator | nothing |
/// | punctuator | word | nothing |
/// | punctuator | punctuator | nothing, unless they would fuse |
///
/// A line break is kept instead when the gap held one and both sides could
/// sit at a statement boundary. A [`Gap::CommentBreak`] only needs the right
/// side to qualify.
pub(crate) fn separator(last: Last, gap: Gap, next: u8, next_opens_regex: bool) -> Option<u8> {
    if gap == Gap::None || last == Last::Start {
        return None;
    }

    if gap >= Gap::Newline {
        let left = gap == Gap::CommentBreak || last.may_end_statement();
        let right = next_opens_regex || may_begin_statement(next);
        if left && right {
            return Some(b'\n');
        }
    }

    if (last.glues_to_word() && is_word_byte(next)) || last.fuses_with(next) {
        return Some(b' ');
    }

    None
}
