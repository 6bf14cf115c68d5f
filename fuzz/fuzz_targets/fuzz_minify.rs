#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsmin::{Minifier, MinifyOptions};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

/// Fragments spliced into inputs so the fuzzer reaches literals, comments and
/// separator edge cases quickly.
static JS_TABLE: &[&[u8]] = &[
    b" ",
    b"\n",
    b"\r\n",
    b"\r",
    b"\t",
    b"//",
    b"/*",
    b"*/",
    b"/",
    b"\\",
    b"'",
    b"\"",
    b"[",
    b"]",
    b"++",
    b"--",
    b"return",
    b"typeof",
    b"in",
    b"a.",
    b"1.",
    b")",
    b"}",
    b"=",
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Inserts one fragment at a random offset. Returns the new size.
fn splice(data: &mut [u8], size: usize, max_size: usize) -> usize {
    with_rng(|rng| {
        let frag = JS_TABLE[rng.random_range(0..JS_TABLE.len())];
        if size + frag.len() > max_size {
            return size;
        }
        let at = rng.random_range(0..=size);
        data.copy_within(at..size, at + frag.len());
        data[at..at + frag.len()].copy_from_slice(frag);
        size + frag.len()
    })
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    if seed % 4 == 0 {
        splice(data, size, max_size)
    } else {
        fuzzer_mutate(data, size, max_size)
    }
});

#[derive(Debug, Arbitrary)]
struct Case {
    collapse_comment_line_breaks: bool,
    chunk_size: u8,
    source: Vec<u8>,
}

fn minify(case: &Case) {
    let options = MinifyOptions {
        collapse_comment_line_breaks: case.collapse_comment_line_breaks,
        keep_trailing_newline: false,
    };
    let whole = Minifier::new(options).minify_to_vec(&case.source);

    // Chunk boundaries must not change the result.
    let chunked = Minifier::new(options)
        .with_chunk_size(usize::from(case.chunk_size).max(1))
        .minify_to_vec(&case.source);
    match (&whole, &chunked) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
        _ => panic!("chunked run disagrees: {whole:?} vs {chunked:?}"),
    }

    let Ok(out) = whole else {
        return;
    };
    assert!(out.len() <= case.source.len());

    // Minified output is itself valid minifier input.
    let again = Minifier::new(options)
        .minify_to_vec(&out)
        .expect("minified output re-minifies");
    if case.collapse_comment_line_breaks {
        assert_eq!(again, out);
    }
}

fuzz_target!(|case: Case| minify(&case));
