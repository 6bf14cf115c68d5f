use std::io::{self, BufWriter, Read, Write};

use tracing::{debug, instrument, trace};

use crate::{
    class::{CharClass, classify, is_closer, is_word_byte},
    error::MinifyError,
    mode::LexMode,
    options::MinifyOptions,
    separator::{Gap, Last, separator},
    source::{Position, Source},
};

/// Byte counts of one [`Minifier::minify`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinifyStats {
    /// Raw bytes pulled from the input, line endings included.
    pub bytes_read: u64,
    /// Bytes written to the output.
    pub bytes_written: u64,
}

/// A reusable minifier configuration.
///
/// `Minifier` holds no lexical state of its own: every call to
/// [`minify`](Self::minify) starts from scratch, so one value can serve any
/// number of streams, from any number of threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Minifier {
    options: MinifyOptions,
    chunk_size: Option<usize>,
}

impl Minifier {
    /// Creates a minifier with the given options.
    #[must_use]
    pub const fn new(options: MinifyOptions) -> Self {
        Self {
            options,
            chunk_size: None,
        }
    }

    /// Returns the options this minifier was built with.
    #[must_use]
    pub const fn options(&self) -> MinifyOptions {
        self.options
    }

    /// Reads the input in chunks of `chunk_size` bytes.
    ///
    /// Only exposed to exercise chunk boundaries; output does not depend on
    /// it.
    #[cfg(any(test, feature = "fuzzing"))]
    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Minifies `input` into `output`, draining `input` to its end.
    ///
    /// Neither stream is closed. `output` is flushed before a successful
    /// return.
    ///
    /// # Errors
    ///
    /// Returns [`MinifyError::Syntax`] when the input ends inside a string,
    /// regular expression or block comment, or when a string or regular
    /// expression contains an unescaped line break. Returns
    /// [`MinifyError::Io`] when either stream fails. Output written before an
    /// error is incomplete.
    #[instrument(level = "trace", skip_all)]
    pub fn minify<R: Read, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<MinifyStats, MinifyError> {
        let source = match self.chunk_size {
            Some(size) => Source::with_chunk_size(input, size),
            None => Source::new(input),
        };
        Engine::new(source, output, self.options).run()
    }

    /// Minifies an in-memory buffer.
    ///
    /// # Errors
    ///
    /// See [`minify`](Self::minify). I/O errors cannot occur.
    pub fn minify_to_vec(&self, input: &[u8]) -> Result<Vec<u8>, MinifyError> {
        let mut out = Vec::with_capacity(input.len());
        self.minify(input, &mut out)?;
        Ok(out)
    }
}

/// Buffered output that counts what it writes.
struct Sink<W: Write> {
    inner: BufWriter<W>,
    written: u64,
}

impl<W: Write> Sink<W> {
    fn new(inner: W) -> Self {
        Self {
            inner: BufWriter::new(inner),
            written: 0,
        }
    }

    fn put(&mut self, byte: u8) -> io::Result<()> {
        self.inner.write_all(&[byte])?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Longest keyword after which `/` opens a regular expression.
const KEYWORD_MAX: usize = "instanceof".len();

/// Keywords that leave the parser expecting an operand.
const OPERAND_KEYWORDS: &[&[u8]] = &[
    b"return",
    b"typeof",
    b"instanceof",
    b"in",
    b"of",
    b"new",
    b"delete",
    b"void",
    b"throw",
    b"case",
    b"do",
    b"else",
    b"yield",
    b"await",
];

/// The identifier or number most recently written, as far as it is needed to
/// tell keywords apart.
#[derive(Debug, Default)]
struct WordTail {
    bytes: [u8; KEYWORD_MAX],
    len: usize,
    /// Too long, a property name (`a.return`), or regex flags.
    opaque: bool,
    /// Starts with a digit.
    numeric: bool,
}

impl WordTail {
    fn start(&mut self, opaque: bool) {
        self.len = 0;
        self.opaque = opaque;
        self.numeric = false;
    }

    fn push(&mut self, byte: u8) {
        if self.len == 0 {
            self.numeric = byte.is_ascii_digit();
        }
        if self.len == KEYWORD_MAX {
            self.opaque = true;
        } else {
            self.bytes[self.len] = byte;
            self.len += 1;
        }
    }

    fn is_operand_keyword(&self) -> bool {
        !self.opaque && OPERAND_KEYWORDS.contains(&&self.bytes[..self.len])
    }
}

/// State of one minification pass.
struct Engine<R, W: Write> {
    source: Source<R>,
    sink: Sink<W>,
    options: MinifyOptions,

    last: Last,
    /// `last` completes a `++` or `--`.
    doubled: bool,
    word: WordTail,
    gap: Gap,
}

impl<R: Read, W: Write> Engine<R, W> {
    fn new(source: Source<R>, output: W, options: MinifyOptions) -> Self {
        Self {
            source,
            sink: Sink::new(output),
            options,
            last: Last::Start,
            doubled: false,
            word: WordTail::default(),
            gap: Gap::None,
        }
    }

    fn run(mut self) -> Result<MinifyStats, MinifyError> {
        while let Some(byte) = self.source.get()? {
            match classify(Some(byte)) {
                CharClass::Whitespace => self.gap.widen(Gap::Space),
                CharClass::Newline => self.gap.widen(Gap::Newline),
                CharClass::Other | CharClass::Eof => self.significant(byte)?,
            }
        }

        if self.options.keep_trailing_newline && self.last != Last::Start {
            self.sink.put(b'\n')?;
        }
        self.sink.flush()?;

        let stats = MinifyStats {
            bytes_read: self.source.bytes_read(),
            bytes_written: self.sink.written,
        };
        debug!(
            bytes_read = stats.bytes_read,
            bytes_written = stats.bytes_written,
            "minified"
        );
        Ok(stats)
    }

    /// Handles a byte that is neither whitespace nor a line break in normal
    /// mode.
    fn significant(&mut self, byte: u8) -> Result<(), MinifyError> {
        let start = self.source.position();
        let operand = byte == b'/' && self.operand_position();
        let lookahead = self.source.peek()?;
        let transition = LexMode::Normal
            .next(Some(byte), lookahead, operand)
            .map_err(|kind| MinifyError::unterminated(kind, start.into()))?;
        if transition.takes_lookahead {
            self.source.get()?;
        }

        match transition.mode {
            LexMode::Normal => self.token(byte),
            mode if mode.is_comment() => self.skip_comment(mode, start),
            mode => self.copy_literal(byte, mode, start),
        }
    }

    /// Whether a `/` written now would begin an operand, and so a regular
    /// expression, rather than divide.
    ///
    /// This looks only at what was written last and is a heuristic: without a
    /// parser, `)` and `}` can end either an expression or a statement.
    fn operand_position(&self) -> bool {
        match self.last {
            Last::Start => true,
            Last::Number | Last::StringEnd | Last::RegexEnd => false,
            Last::Byte(b) if is_word_byte(b) => self.word.is_operand_keyword(),
            Last::Byte(b) if is_closer(b) => false,
            Last::Byte(b'+' | b'-') => !self.doubled,
            Last::Byte(_) => true,
        }
    }

    /// Writes whatever the pending gap collapses to in front of `next`.
    /// Returns `true` if a separator was written.
    fn separate(&mut self, next: u8, opens_regex: bool) -> io::Result<bool> {
        let gap = std::mem::take(&mut self.gap);
        match separator(self.last, gap, next, opens_regex) {
            Some(sep) => {
                self.sink.put(sep)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn token(&mut self, byte: u8) -> Result<(), MinifyError> {
        let separated = self.separate(byte, false)?;

        if is_word_byte(byte) {
            let continues = !separated
                && match self.last {
                    Last::Number => true,
                    Last::Byte(b) => is_word_byte(b),
                    Last::Start | Last::StringEnd | Last::RegexEnd => false,
                };
            if !continues {
                let opaque = self.last == Last::Byte(b'.')
                    || (!separated && self.last == Last::RegexEnd);
                self.word.start(opaque);
            }
            self.word.push(byte);
        }

        self.doubled = matches!(byte, b'+' | b'-')
            && !separated
            && !self.doubled
            && self.last == Last::Byte(byte);
        self.sink.put(byte)?;
        self.last = if self.word.numeric && byte.is_ascii_digit() {
            Last::Number
        } else {
            Last::Byte(byte)
        };
        Ok(())
    }

    fn skip_comment(&mut self, mut mode: LexMode, start: Position) -> Result<(), MinifyError> {
        let mut multiline = mode == LexMode::LineComment;
        while mode != LexMode::Normal {
            let byte = self.source.get()?;
            multiline |= byte == Some(b'\n');
            let lookahead = self.source.peek()?;
            let transition = mode
                .next(byte, lookahead, false)
                .map_err(|kind| MinifyError::unterminated(kind, start.into()))?;
            if transition.takes_lookahead {
                self.source.get()?;
            }
            mode = transition.mode;
        }

        let gap = match (multiline, self.options.collapse_comment_line_breaks) {
            (false, _) => Gap::Space,
            (true, false) => Gap::CommentBreak,
            (true, true) => Gap::Newline,
        };
        self.gap.widen(gap);
        Ok(())
    }

    fn copy_literal(
        &mut self,
        open: u8,
        mut mode: LexMode,
        start: Position,
    ) -> Result<(), MinifyError> {
        let regex = mode.is_regex();
        trace!(line = start.line, column = start.column, regex, "literal");

        self.separate(open, regex)?;
        self.sink.put(open)?;

        while mode != LexMode::Normal {
            let byte = self.source.get()?;
            let lookahead = self.source.peek()?;
            let transition = mode
                .next(byte, lookahead, false)
                .map_err(|kind| MinifyError::unterminated(kind, start.into()))?;
            if let Some(b) = byte {
                self.sink.put(b)?;
            }
            if transition.takes_lookahead {
                if let Some(b) = self.source.get()? {
                    self.sink.put(b)?;
                }
            }
            mode = transition.mode;
        }

        self.last = if regex { Last::RegexEnd } else { Last::StringEnd };
        self.doubled = false;
        Ok(())
    }
}
