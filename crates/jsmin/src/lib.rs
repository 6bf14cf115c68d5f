//! A streaming, single-pass JavaScript minifier.
//!
//! The minifier removes comments and every piece of whitespace whose removal
//! does not change how the program tokenizes, keeping a line break only where
//! dropping it could let automatic semicolon insertion merge two statements.
//! Strings and regular expression literals are copied verbatim.
//!
//! It is a lexer, not a parser: anything it does not recognise is passed
//! through as opaque token text, and telling a regular expression from a
//! division relies on a heuristic over the preceding token.
//!
//! ```rust
//! let out = jsmin::minify_str("return   x ; // done\n").unwrap();
//! assert_eq!(out, "return x;");
//! ```
//!
//! Streams of any size can be minified without holding them in memory:
//!
//! ```rust
//! use std::io::Cursor;
//!
//! let mut out = Vec::new();
//! jsmin::minify(Cursor::new("a   +   b"), &mut out).unwrap();
//! assert_eq!(out, b"a+b");
//! ```

use std::io::{self, Read, Write};

mod class;
mod error;
mod minifier;
mod mode;
mod options;
mod separator;
mod source;

#[cfg(test)]
mod tests;

pub use class::{CharClass, classify, is_word_byte};
pub use error::{LiteralKind, MinifyError, SyntaxError};
pub use minifier::{Minifier, MinifyStats};
pub use options::MinifyOptions;

/// Minifies `input` into `output` with the default options.
///
/// # Errors
///
/// See [`Minifier::minify`].
pub fn minify<R: Read, W: Write>(input: R, output: W) -> Result<(), MinifyError> {
    minify_with_options(input, output, MinifyOptions::default())
}

/// Minifies `input` into `output`.
///
/// # Errors
///
/// See [`Minifier::minify`].
pub fn minify_with_options<R: Read, W: Write>(
    input: R,
    output: W,
    options: MinifyOptions,
) -> Result<(), MinifyError> {
    Minifier::new(options).minify(input, output)?;
    Ok(())
}

/// Minifies an in-memory buffer with the default options.
///
/// # Errors
///
/// Returns [`MinifyError::Syntax`] for an unterminated literal.
pub fn minify_to_vec(input: &[u8]) -> Result<Vec<u8>, MinifyError> {
    Minifier::default().minify_to_vec(input)
}

/// Minifies a string with the default options.
///
/// The minifier only ever drops or inserts ASCII bytes between whole tokens,
/// so valid UTF-8 in gives valid UTF-8 out.
///
/// # Errors
///
/// Returns [`MinifyError::Syntax`] for an unterminated literal.
pub fn minify_str(input: &str) -> Result<String, MinifyError> {
    let out = minify_to_vec(input.as_bytes())?;
    String::from_utf8(out).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}
