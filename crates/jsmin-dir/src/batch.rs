//! Batch coordinator.
//!
//! What it does
//! - Finds `.js` files directly in a directory, or in the whole tree below it.
//! - Undoes an earlier run by copying every `name-dev.js` back over `name.js`
//!   and deleting the dev twin.
//! - Minifies every source file in place after saving its original text as
//!   the dev twin.
//!
//! Failure policy
//! - A file that cannot be minified is left exactly as it was, and no dev twin
//!   is written for it. The failure is recorded and the batch moves on.
//! - An existing dev twin is never overwritten. If restoring it failed, its
//!   source file is skipped.
//! - Only a failure to walk the directory aborts the run.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use jsmin::{Minifier, MinifyError, MinifyOptions, MinifyStats};
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use crate::{
    error::BatchError,
    naming::{dev_name, is_dev, min_name},
};

/// Configuration for [`minify_tree`].
///
/// # Default
///
/// Only the top-level directory is processed, and the minifier runs with its
/// default options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Descend into sub-directories.
    pub recursive: bool,
    /// Only restore an earlier run; minify nothing.
    pub undo: bool,
    /// Options passed to the minifier for every file.
    pub minify: MinifyOptions,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct Report {
    /// Files minified in place.
    pub minified: usize,
    /// Dev twins copied back over their minified file.
    pub restored: usize,
    /// Files that could not be processed.
    pub failures: Vec<BatchError>,
    /// Bytes read from the minified files' originals.
    pub bytes_in: u64,
    /// Bytes written to the minified files.
    pub bytes_out: u64,
}

impl Report {
    /// Returns `true` if no file failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn merge(&mut self, other: Report) {
        self.minified += other.minified;
        self.restored += other.restored;
        self.failures.extend(other.failures);
        self.bytes_in += other.bytes_in;
        self.bytes_out += other.bytes_out;
    }
}

/// Lists the regular files in `root`, or below it when `recursive` is set,
/// sorted by path.
///
/// # Errors
///
/// Returns [`BatchError::Walk`] if `root` or one of its sub-directories cannot
/// be read.
pub fn discover(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, BatchError> {
    let walker = WalkDir::new(root).min_depth(1);
    let walker = if recursive { walker } else { walker.max_depth(1) };

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Undoes an earlier run: every `name-dev.js` is copied over `name.js` and
/// then deleted.
///
/// # Errors
///
/// Returns [`BatchError::Walk`] if the directory cannot be listed. Failures on
/// individual files are collected in the report.
#[instrument(level = "debug", skip_all, fields(root = %root.display()))]
pub fn restore(root: &Path, recursive: bool) -> Result<Report, BatchError> {
    let mut report = Report::default();
    for dev in discover(root, recursive)?.into_iter().filter(|p| is_dev(p)) {
        match restore_file(&dev) {
            Ok(()) => report.restored += 1,
            Err(err) => {
                warn!("{err}");
                report.failures.push(err);
            }
        }
    }
    Ok(report)
}

fn restore_file(dev: &Path) -> Result<(), BatchError> {
    let Some(min) = min_name(dev) else {
        return Ok(());
    };
    fs::copy(dev, &min).map_err(BatchError::io(&min))?;
    fs::remove_file(dev).map_err(BatchError::io(dev))?;
    debug!(file = %min.display(), "restored");
    Ok(())
}

/// Restores any earlier run below `root`, then, unless
/// [`undo`](BatchOptions::undo) is set, minifies every source file in place,
/// saving its original text as the `-dev.js` twin.
///
/// # Errors
///
/// Returns [`BatchError::Walk`] if the directory cannot be listed. Failures on
/// individual files are collected in the report.
#[instrument(level = "debug", skip_all, fields(root = %root.display()))]
pub fn minify_tree(root: &Path, options: &BatchOptions) -> Result<Report, BatchError> {
    let mut report = Report::default();
    report.merge(restore(root, options.recursive)?);
    if options.undo {
        return Ok(report);
    }

    let minifier = Minifier::new(options.minify);
    for path in discover(root, options.recursive)? {
        let Some(dev) = dev_name(&path) else {
            continue;
        };
        match minify_file(&minifier, &path, &dev) {
            Ok(stats) => {
                info!(
                    file = %path.display(),
                    bytes_in = stats.bytes_read,
                    bytes_out = stats.bytes_written,
                    "minified"
                );
                report.minified += 1;
                report.bytes_in += stats.bytes_read;
                report.bytes_out += stats.bytes_written;
            }
            Err(err) => {
                warn!("{err}");
                report.failures.push(err);
            }
        }
    }
    Ok(report)
}

/// Minifies `path` in place, keeping the original as `dev`.
///
/// The minified text is produced before anything is written, so a file that
/// does not minify is never touched. `dev` must not exist yet.
fn minify_file(minifier: &Minifier, path: &Path, dev: &Path) -> Result<MinifyStats, BatchError> {
    let original = fs::read(path).map_err(BatchError::io(path))?;
    let mut minified = Vec::with_capacity(original.len());
    let stats = minifier
        .minify(original.as_slice(), &mut minified)
        .map_err(|source| BatchError::Minify {
            path: path.to_owned(),
            source,
        })?;

    let mut twin = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dev)
        .map_err(|source| match source.kind() {
            io::ErrorKind::AlreadyExists => BatchError::DevExists {
                path: dev.to_owned(),
            },
            _ => BatchError::Io {
                path: dev.to_owned(),
                source,
            },
        })?;
    twin.write_all(&original).map_err(BatchError::io(dev))?;
    fs::write(path, &minified).map_err(BatchError::io(path))?;
    Ok(stats)
}

/// Minifies standard input onto standard output.
///
/// # Errors
///
/// See [`Minifier::minify`].
pub fn minify_stdio(options: MinifyOptions) -> Result<MinifyStats, MinifyError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stats = Minifier::new(options).minify(io::stdin().lock(), &mut out)?;
    out.flush()?;
    Ok(stats)
}
