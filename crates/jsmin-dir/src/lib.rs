//! Directory front end for [`jsmin`].
//!
//! Every `name.js` in a directory is minified in place and its original text
//! is kept next to it as `name-dev.js`. Running again first puts the originals
//! back, so edits made to the dev files are picked up; running with
//! [`BatchOptions::undo`] only puts them back.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use jsmin_dir::{BatchOptions, minify_tree};
//!
//! let report = minify_tree(Path::new("static/js"), &BatchOptions {
//!     recursive: true,
//!     ..Default::default()
//! })?;
//! assert!(report.is_success());
//! # Ok::<(), jsmin_dir::BatchError>(())
//! ```

mod batch;
mod error;
mod naming;

pub use batch::{BatchOptions, Report, discover, minify_stdio, minify_tree, restore};
pub use error::BatchError;
pub use naming::{dev_name, is_dev, is_source, min_name};
