use std::io::{self, Read};

use quickcheck::{Arbitrary, Gen};

use crate::{Minifier, MinifyOptions};

/// A reader that hands out at most `step` bytes per call.
pub struct Trickle<'a> {
    pub data: &'a [u8],
    pub step: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.step.max(1).min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Minifies `input`, flattening the error to its message so results compare.
pub fn run(input: &[u8], options: MinifyOptions) -> Result<Vec<u8>, String> {
    Minifier::new(options)
        .minify_to_vec(input)
        .map_err(|e| e.to_string())
}

/// Fragments that, glued together at random, exercise every separator rule.
const PIECES: &[&str] = &[
    "a", "b1", "$_", "0", "1.5", "return", "in", "typeof", "else", ".", "+", "++", "-", "--", "/",
    "*", "=", "==", "!", "~", "?", ":", "(", ")", "[", "]", "{", "}", ";", ",", "'s'", "\"d\\\"q\"",
    "/re/g", "/[/]/", " ", "  ", "\t", "\n", "\r\n", "\r", "\x0b", "// line\n", "/* block */",
    "/*\n*/", "/**/",
];

/// Fragments with no significant bytes at all.
const BLANKS: &[&str] = &[
    " ", "\t", "\x0b", "\x0c", "\n", "\r", "\r\n", "// line\n", "//", "/* block */", "/*\n\n*/",
    "/***/",
];

fn render(pieces: &[&str], picks: &[usize]) -> Vec<u8> {
    picks
        .iter()
        .flat_map(|&i| pieces[i % pieces.len()].bytes())
        .collect()
}

/// Script-shaped input built from [`PIECES`].
#[derive(Debug, Clone)]
pub struct Script(Vec<usize>);

impl Script {
    pub fn bytes(&self) -> Vec<u8> {
        render(PIECES, &self.0)
    }
}

impl Arbitrary for Script {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(Vec::arbitrary(g))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}

/// Input made only of whitespace and comments.
#[derive(Debug, Clone)]
pub struct Blank(Vec<usize>);

impl Blank {
    pub fn bytes(&self) -> Vec<u8> {
        // A trailing `//` would swallow whatever follows it on the line.
        let mut picks = self.0.clone();
        picks.retain(|&i| BLANKS[i % BLANKS.len()] != "//");
        let mut out = render(BLANKS, &picks);
        if self.0.iter().any(|&i| BLANKS[i % BLANKS.len()] == "//") {
            out.extend_from_slice(b"//");
        }
        out
    }
}

impl Arbitrary for Blank {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(Vec::arbitrary(g))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}

pub fn quickcheck_tests() -> u64 {
    #[cfg(not(any(miri, feature = "test-fast")))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(any(miri, feature = "test-fast"))]
    let tests = 10;
    tests
}
