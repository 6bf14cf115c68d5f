//! Minifies standard input onto standard output, streaming.
//!
//! Neither side is held in memory, so this works on arbitrarily large files:
//!
//! ```bash
//! cargo run -p jsmin --example minify_stdin < app.js > app.min.js
//! ```
//!
//! Byte counts are reported on standard error. An unterminated literal is
//! reported with its position and a non-zero exit status.

use std::{io, process::ExitCode};

use jsmin::{Minifier, MinifyOptions};

fn main() -> ExitCode {
    let minifier = Minifier::new(MinifyOptions {
        keep_trailing_newline: true,
        ..Default::default()
    });

    match minifier.minify(io::stdin().lock(), io::stdout().lock()) {
        Ok(stats) => {
            eprintln!("{} -> {} bytes", stats.bytes_read, stats.bytes_written);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("minify_stdin: {err}");
            ExitCode::FAILURE
        }
    }
}
