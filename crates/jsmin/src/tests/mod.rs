mod minify_bad;
mod utils;
