//! `jsmin-dir`: minify every `.js` file in a directory.

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use jsmin::MinifyOptions;
use jsmin_dir::{BatchOptions, minify_stdio, minify_tree};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Minify every .js file in a directory, keeping each original as name-dev.js.
///
/// Running again first restores the -dev.js originals, so edit those and
/// re-run.
#[derive(Parser, Debug)]
#[command(name = "jsmin-dir", version)]
struct Cli {
    /// Directory to process
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Include sub-directories
    #[arg(short, long)]
    recursive: bool,

    /// Restore the -dev.js originals and stop
    #[arg(short, long)]
    undo: bool,

    /// Minify standard input to standard output and ignore DIR
    #[arg(short = 'o', long)]
    stdio: bool,

    /// Treat line breaks left by removed comments like any other line break
    #[arg(long)]
    collapse_comment_line_breaks: bool,

    /// End non-empty output with a line feed
    #[arg(long)]
    keep_trailing_newline: bool,

    /// Log every file (overridden by JSMIN_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("JSMIN_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Returns `false` when some file failed.
fn run(cli: &Cli) -> Result<bool> {
    let minify = MinifyOptions {
        collapse_comment_line_breaks: cli.collapse_comment_line_breaks,
        keep_trailing_newline: cli.keep_trailing_newline,
    };

    if cli.stdio {
        minify_stdio(minify).context("cannot minify standard input")?;
        return Ok(true);
    }

    let options = BatchOptions {
        recursive: cli.recursive,
        undo: cli.undo,
        minify,
    };
    let report = minify_tree(&cli.dir, &options)
        .with_context(|| format!("cannot process {}", cli.dir.display()))?;

    info!(
        minified = report.minified,
        restored = report.restored,
        failed = report.failures.len(),
        bytes_in = report.bytes_in,
        bytes_out = report.bytes_out,
        "done"
    );
    Ok(report.is_success())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
