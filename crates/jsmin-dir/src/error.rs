use std::{io, path::PathBuf};

use jsmin::MinifyError;
use thiserror::Error;

/// Failure of one step of a batch run.
///
/// Per-file failures are collected in a [`Report`](crate::Report) and do not
/// stop the batch. Only a failure to list the directory does.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Reading, writing, copying or deleting `path` failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// The file being worked on.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// `path` could not be minified. It was left as it was.
    #[error("{}: {source}", path.display())]
    Minify {
        /// The file being minified.
        path: PathBuf,
        /// Why the minifier gave up.
        source: MinifyError,
    },
    /// `path`, the dev twin of a source file, already exists. It holds the
    /// only copy of an earlier original and is never overwritten.
    #[error("{}: dev twin already exists and was not restored", path.display())]
    DevExists {
        /// The dev twin.
        path: PathBuf,
    },
    /// Walking the directory tree failed.
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

impl BatchError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    /// The file the error is about, if there is one.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. } | Self::Minify { path, .. } | Self::DevExists { path } => {
                Some(path)
            }
            Self::Walk(err) => err.path(),
        }
    }
}
