//! Wrapper around globset's Glob type that couples Glob and GlobMatcher into a
//! single type and knows which leading part of the pattern is a plain path.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use globset::{Glob as InnerGlob, GlobMatcher};

pub use globset::Error;

#[derive(Debug, Clone)]
pub struct Glob {
    inner: InnerGlob,
    matcher: GlobMatcher,
}

impl Glob {
    pub fn new(glob: &str) -> Result<Self, Error> {
        let inner = InnerGlob::new(glob)?;
        let matcher = inner.compile_matcher();

        Ok(Glob { inner, matcher })
    }

    pub fn is_match<P: AsRef<Path>>(&self, path: P) -> bool {
        self.matcher.is_match(path)
    }

    /// The leading directories of the pattern that contain no pattern syntax.
    /// Only files under this prefix can match, so searches can start there.
    pub fn get_prefix(&self) -> PathBuf {
        get_non_pattern_prefix(Path::new(self.inner.glob()))
    }
}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.inner.fmt(f)
    }
}

// Characters that might indicate the use of glob pattern syntax. This has
// false positives for escapes like `[*]`, which only makes the search start
// higher up than it needs to.
//
// Glob syntax described here: https://docs.rs/globset/0.4.4/globset/#syntax
const GLOB_PATTERN_CHARACTERS: &str = "*?{}[]";

fn get_non_pattern_prefix(glob_path: &Path) -> PathBuf {
    let mut prefix = PathBuf::new();

    for component in glob_path.iter() {
        let is_pattern = match component.to_str() {
            Some(component_str) => GLOB_PATTERN_CHARACTERS
                .chars()
                .any(|special_char| component_str.contains(special_char)),
            None => true,
        };

        if is_pattern {
            break;
        }

        prefix.push(component);
    }

    prefix
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn simple_prefix() {
        assert_eq!(
            get_non_pattern_prefix(Path::new("a/b/**/*.png")),
            PathBuf::from("a/b")
        );
    }

    #[test]
    fn no_prefix() {
        assert_eq!(
            get_non_pattern_prefix(Path::new("**/glyphs/*.png")),
            PathBuf::from("")
        );
    }

    #[test]
    fn matches_relative_paths() {
        let glob = Glob::new("icons/**/*.png").unwrap();

        assert!(glob.is_match("icons/small/close.png"));
        assert!(!glob.is_match("fonts/a.png"));
        assert!(!glob.is_match("icons/readme.txt"));
        assert_eq!(glob.get_prefix(), PathBuf::from("icons"));
    }
}
