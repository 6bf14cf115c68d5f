//! Byte classification.
//!
//! Everything the minifier needs to know about a single byte is answered by
//! one lookup into a 256-entry table built at compile time. None of the
//! functions here carry state.

const WHITESPACE: u8 = 0b0000_0001;
const NEWLINE: u8 = 0b0000_0010;
const WORD: u8 = 0b0000_0100;
const QUOTE: u8 = 0b0000_1000;
/// `{ [ (` may open a statement on the next line.
const OPENER: u8 = 0b0001_0000;
/// `} ] )` may end a statement on the previous line.
const CLOSER: u8 = 0b0010_0000;
/// `+ -` may be prefix operators on the next line or postfix ones on the
/// previous line.
const SIGN: u8 = 0b0100_0000;
/// `! ~` are prefix-only and may open an expression statement.
const PREFIX: u8 = 0b1000_0000;

const CLASS_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;

    while i < 256 {
        #[allow(clippy::cast_possible_truncation)]
        let c = i as u8;
        let mut flags = 0u8;

        if matches!(c, b' ' | b'\t' | 0x0B | 0x0C) {
            flags |= WHITESPACE;
        }

        if matches!(c, b'\n' | b'\r') {
            flags |= NEWLINE;
        }

        // Identifier and number text. Backslash covers `\uXXXX` identifier
        // escapes; anything outside ASCII is treated as identifier text.
        if matches!(c, b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'$' | b'\\') || c > 126 {
            flags |= WORD;
        }

        if matches!(c, b'"' | b'\'') {
            flags |= QUOTE;
        }

        if matches!(c, b'{' | b'[' | b'(') {
            flags |= OPENER;
        }

        if matches!(c, b'}' | b']' | b')') {
            flags |= CLOSER;
        }

        if matches!(c, b'+' | b'-') {
            flags |= SIGN;
        }

        if matches!(c, b'!' | b'~') {
            flags |= PREFIX;
        }

        table[i] = flags;
        i += 1;
    }

    table
};

/// Coarse class of one input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// The input is exhausted.
    Eof,
    /// Space, tab, vertical tab or form feed.
    Whitespace,
    /// Line feed or carriage return.
    Newline,
    /// Any other byte. It is significant and passed through verbatim.
    Other,
}

/// Classifies one byte of input, or end of input when `byte` is `None`.
///
/// ```rust
/// use jsmin::{CharClass, classify};
///
/// assert_eq!(classify(Some(b'\t')), CharClass::Whitespace);
/// assert_eq!(classify(Some(b'\r')), CharClass::Newline);
/// assert_eq!(classify(Some(b'x')), CharClass::Other);
/// assert_eq!(classify(None), CharClass::Eof);
/// ```
#[must_use]
#[inline]
pub const fn classify(byte: Option<u8>) -> CharClass {
    let Some(byte) = byte else {
        return CharClass::Eof;
    };
    let flags = CLASS_TABLE[byte as usize];
    if flags & WHITESPACE != 0 {
        CharClass::Whitespace
    } else if flags & NEWLINE != 0 {
        CharClass::Newline
    } else {
        CharClass::Other
    }
}

/// Returns `true` for bytes that glue together into a single identifier,
/// keyword or number when written next to each other.
#[must_use]
#[inline]
pub const fn is_word_byte(byte: u8) -> bool {
    CLASS_TABLE[byte as usize] & WORD != 0
}

#[inline]
pub(crate) const fn is_closer(byte: u8) -> bool {
    CLASS_TABLE[byte as usize] & CLOSER != 0
}

/// A line break after this byte may be load-bearing: the byte can end a
/// statement.
#[inline]
pub(crate) const fn may_end_statement(byte: u8) -> bool {
    CLASS_TABLE[byte as usize] & (WORD | CLOSER | SIGN) != 0
}

/// A line break before this byte may be load-bearing: the byte can begin a
/// statement.
#[inline]
pub(crate) const fn may_begin_statement(byte: u8) -> bool {
    CLASS_TABLE[byte as usize] & (WORD | OPENER | SIGN | PREFIX | QUOTE) != 0
}
