//! The `-dev.js` twin convention.
//!
//! A minified `name.js` keeps its original text next to it as `name-dev.js`.
//! Both functions are pure: they look at the file name only.

use std::path::{Path, PathBuf};

const JS: &str = ".js";
const DEV_JS: &str = "-dev.js";

fn file_name(path: &Path) -> Option<&str> {
    path.file_name()?.to_str()
}

/// Returns `true` for a `.js` file that is not itself a dev twin.
#[must_use]
pub fn is_source(path: &Path) -> bool {
    file_name(path).is_some_and(|name| name.ends_with(JS) && !name.ends_with(DEV_JS))
}

/// Returns `true` for a `-dev.js` file.
#[must_use]
pub fn is_dev(path: &Path) -> bool {
    file_name(path).is_some_and(|name| name.ends_with(DEV_JS))
}

/// Path of the dev twin of a source file: `app.js` becomes `app-dev.js`.
///
/// Returns `None` if `path` is not a source file.
#[must_use]
pub fn dev_name(path: &Path) -> Option<PathBuf> {
    if !is_source(path) {
        return None;
    }
    let name = file_name(path)?;
    let stem = &name[..name.len() - JS.len()];
    Some(path.with_file_name(format!("{stem}{DEV_JS}")))
}

/// Path of the minified file a dev twin belongs to: `app-dev.js` becomes
/// `app.js`.
///
/// Returns `None` if `path` is not a dev twin.
#[must_use]
pub fn min_name(path: &Path) -> Option<PathBuf> {
    let name = file_name(path)?;
    let stem = name.strip_suffix(DEV_JS)?;
    Some(path.with_file_name(format!("{stem}{JS}")))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("app.js", Some("app-dev.js"))]
    #[case("lib/app.min.js", Some("lib/app.min-dev.js"))]
    #[case(".js", Some("-dev.js"))]
    #[case("app-dev.js", None)]
    #[case("app.jsx", None)]
    #[case("app.JS", None)]
    #[case("notes.txt", None)]
    #[case("js", None)]
    fn dev_names(#[case] path: &str, #[case] expected: Option<&str>) {
        assert_eq!(dev_name(Path::new(path)), expected.map(PathBuf::from));
    }

    #[rstest]
    #[case("app-dev.js", Some("app.js"))]
    #[case("lib/app-dev-dev.js", Some("lib/app-dev.js"))]
    #[case("app.js", None)]
    #[case("app-dev.jsx", None)]
    fn min_names(#[case] path: &str, #[case] expected: Option<&str>) {
        assert_eq!(min_name(Path::new(path)), expected.map(PathBuf::from));
    }

    #[test]
    fn twins_round_trip() {
        let src = Path::new("dir/widget.js");
        let dev = dev_name(src).unwrap();
        assert!(is_dev(&dev));
        assert!(!is_source(&dev));
        assert_eq!(min_name(&dev).as_deref(), Some(src));
    }
}
