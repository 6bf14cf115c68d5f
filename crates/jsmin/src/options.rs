/// Configuration options for the minifier.
///
/// The defaults produce the smallest output that keeps every line break a
/// removed comment may have been standing in for.
///
/// # Examples
///
/// ```rust
/// use jsmin::{Minifier, MinifyOptions};
///
/// let minifier = Minifier::new(MinifyOptions {
///     keep_trailing_newline: true,
///     ..Default::default()
/// });
/// let mut out = Vec::new();
/// minifier.minify(&b"var a = 1;"[..], &mut out).unwrap();
/// assert_eq!(out, b"var a=1;\n");
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MinifyOptions {
    /// Whether a line break left behind by a removed comment is treated like
    /// any other line break.
    ///
    /// By default such a break is kept whenever the next token could begin a
    /// statement, even if the token before it is `;` or `{`. This keeps
    /// commented-out lines on their own line:
    ///
    /// ```js
    /// x = 1; // comment
    /// y = 2;
    /// ```
    ///
    /// becomes `x=1;\ny=2;`. When `true`, it becomes `x=1;y=2;`, and running
    /// the minifier over its own output is a no-op.
    ///
    /// # Default
    ///
    /// `false`
    pub collapse_comment_line_breaks: bool,

    /// Whether non-empty output ends with a single line feed.
    ///
    /// # Default
    ///
    /// `false`
    pub keep_trailing_newline: bool,
}
