//! Source: chunked byte reader with a single-slot lookahead.
//!
//! What it does
//! - Pulls bytes from any `Read` in fixed-size chunks, so callers need not
//!   wrap their input in a `BufReader`.
//! - Normalises `\r\n` and lone `\r` to `\n` before anything else sees them.
//!   A `\r` at the end of one chunk still pairs with a `\n` at the start of the
//!   next.
//! - Tracks the 1-based line and byte column of every byte it hands out.
//! - Offers `get`/`unget` over one slot of pushback; `peek` is `get` followed
//!   by `unget`.
//!
//! Invariants
//! - At most one byte is ever pushed back. `unget` into an occupied slot is a
//!   logic error.
//! - End of input is sticky: once `get` returns `None` it keeps returning
//!   `None`.
//! - `Interrupted` reads are retried; any other read error is returned as is.

use std::io::{self, Read};

const CHUNK_SIZE: usize = 8 * 1024;

/// Line and column of a byte, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    const START: Self = Self { line: 1, column: 1 };

    fn advance(&mut self, byte: u8) {
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl From<Position> for (usize, usize) {
    fn from(p: Position) -> Self {
        (p.line, p.column)
    }
}

/// A byte handed back by `unget`, with the position it was read at.
#[derive(Debug, Clone, Copy)]
struct Pending {
    byte: Option<u8>,
    at: Position,
}

pub(crate) struct Source<R> {
    reader: R,
    chunk: Box<[u8]>,
    pos: usize,
    len: usize,
    exhausted: bool,
    bytes_read: u64,

    pending: Option<Pending>,
    // Position of the next byte taken from the chunk.
    cursor: Position,
    // Position of the byte most recently returned by `get`.
    last: Position,
}

impl<R: Read> Source<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, CHUNK_SIZE)
    }

    pub(crate) fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk: vec![0u8; chunk_size.max(1)].into_boxed_slice(),
            pos: 0,
            len: 0,
            exhausted: false,
            bytes_read: 0,
            pending: None,
            cursor: Position::START,
            last: Position::START,
        }
    }

    /// Returns the next byte, or `None` at end of input.
    pub(crate) fn get(&mut self) -> io::Result<Option<u8>> {
        if let Some(pending) = self.pending.take() {
            self.last = pending.at;
            return Ok(pending.byte);
        }

        let at = self.cursor;
        let byte = match self.next_raw()? {
            Some(b'\r') => {
                if self.peek_raw()? == Some(b'\n') {
                    self.pos += 1;
                }
                Some(b'\n')
            }
            other => other,
        };
        if let Some(b) = byte {
            self.cursor.advance(b);
        }
        self.last = at;
        Ok(byte)
    }

    /// Pushes back the byte most recently returned by `get`.
    pub(crate) fn unget(&mut self, byte: Option<u8>) {
        debug_assert!(self.pending.is_none(), "lookahead slot already occupied");
        self.pending = Some(Pending {
            byte,
            at: self.last,
        });
    }

    /// Returns the next byte without consuming it.
    pub(crate) fn peek(&mut self) -> io::Result<Option<u8>> {
        if let Some(pending) = self.pending {
            return Ok(pending.byte);
        }
        let last = self.last;
        let byte = self.get()?;
        self.unget(byte);
        // `get` moved `last` onto the peeked byte; a peek is not a read.
        self.last = last;
        Ok(byte)
    }

    /// Position of the byte most recently returned by `get`.
    pub(crate) fn position(&self) -> Position {
        self.last
    }

    /// Number of raw bytes pulled from the reader so far.
    pub(crate) fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    fn fill(&mut self) -> io::Result<bool> {
        if self.pos < self.len {
            return Ok(true);
        }
        if self.exhausted {
            return Ok(false);
        }
        loop {
            match self.reader.read(&mut self.chunk) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(false);
                }
                Ok(n) => {
                    self.pos = 0;
                    self.len = n;
                    self.bytes_read += n as u64;
                    return Ok(true);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    fn next_raw(&mut self) -> io::Result<Option<u8>> {
        if !self.fill()? {
            return Ok(None);
        }
        let b = self.chunk[self.pos];
        self.pos += 1;
        Ok(Some(b))
    }

    fn peek_raw(&mut self) -> io::Result<Option<u8>> {
        if !self.fill()? {
            return Ok(None);
        }
        Ok(Some(self.chunk[self.pos]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out at most `step` bytes per `read` call.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    fn drain<R: Read>(mut s: Source<R>) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(b) = s.get().unwrap() {
            out.push(b);
        }
        out
    }

    #[test]
    fn normalises_line_endings() {
        let s = Source::new(&b"a\r\nb\rc\n\r\r\nd"[..]);
        assert_eq!(drain(s), b"a\nb\nc\n\n\nd");
    }

    #[test]
    fn crlf_split_across_chunks() {
        for step in 1..=4 {
            let reader = Trickle {
                data: b"ab\r\ncd\r",
                step,
            };
            let s = Source::with_chunk_size(reader, step);
            assert_eq!(drain(s), b"ab\ncd\n", "step {step}");
        }
    }

    #[test]
    fn peek_does_not_consume() {
        let mut s = Source::new(&b"xy"[..]);
        assert_eq!(s.peek().unwrap(), Some(b'x'));
        assert_eq!(s.peek().unwrap(), Some(b'x'));
        assert_eq!(s.get().unwrap(), Some(b'x'));
        assert_eq!(s.peek().unwrap(), Some(b'y'));
        assert_eq!(s.get().unwrap(), Some(b'y'));
        assert_eq!(s.peek().unwrap(), None);
        assert_eq!(s.get().unwrap(), None);
        assert_eq!(s.get().unwrap(), None);
    }

    #[test]
    fn unget_replays_byte_and_position() {
        let mut s = Source::new(&b"a\nbc"[..]);
        assert_eq!(s.get().unwrap(), Some(b'a'));
        assert_eq!(s.get().unwrap(), Some(b'\n'));
        assert_eq!(s.get().unwrap(), Some(b'b'));
        assert_eq!(s.position(), Position { line: 2, column: 1 });
        s.unget(Some(b'b'));
        assert_eq!(s.get().unwrap(), Some(b'b'));
        assert_eq!(s.position(), Position { line: 2, column: 1 });
        assert_eq!(s.get().unwrap(), Some(b'c'));
        assert_eq!(s.position(), Position { line: 2, column: 2 });
    }

    #[test]
    fn peek_keeps_position_of_last_get() {
        let mut s = Source::new(&b"\"ab"[..]);
        assert_eq!(s.get().unwrap(), Some(b'"'));
        assert_eq!(s.peek().unwrap(), Some(b'a'));
        assert_eq!(s.position(), Position { line: 1, column: 1 });
    }

    #[test]
    fn counts_raw_bytes() {
        let mut s = Source::new(&b"a\r\nb"[..]);
        while s.get().unwrap().is_some() {}
        assert_eq!(s.bytes_read(), 4);
    }

    #[test]
    fn retries_interrupted_reads() {
        struct Flaky {
            interrupted: bool,
        }
        impl Read for Flaky {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(io::ErrorKind::Interrupted.into());
                }
                buf[0] = b'z';
                Ok(1)
            }
        }
        let mut s = Source::new(Flaky { interrupted: false });
        assert_eq!(s.get().unwrap(), Some(b'z'));
    }

    #[test]
    fn surfaces_read_errors() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk on fire"))
            }
        }
        let mut s = Source::new(Broken);
        let err = s.get().unwrap_err();
        assert_eq!(err.to_string(), "disk on fire");
    }
}
