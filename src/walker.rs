use globset::{Glob, GlobMatcher};
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{FtsearchError, Result};

/// Compile one file-type pattern into a glob matcher.
///
/// Matching uses default glob semantics, where `*` may also cross directory
/// separators. A bare `*.md` therefore matches at any depth below the root,
/// and `**/*.md` is accepted as well.
pub fn compile_pattern(pattern: &str) -> Result<GlobMatcher> {
    Glob::new(pattern)
        .map(|g| g.compile_matcher())
        .map_err(|source| FtsearchError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Enumerate the files under `root` whose path (relative to `root`) matches
/// the glob, in deterministic directory order.
///
/// Unreadable directories and entries are logged and skipped; enumeration
/// never fails as a whole.
pub fn walk_matches<'a>(
    root: &Path,
    matcher: &'a GlobMatcher,
) -> impl Iterator<Item = PathBuf> + 'a {
    let root = root.to_path_buf();
    WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry during enumeration: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(move |entry| {
            let path = entry.into_path();
            let relative = path.strip_prefix(&root).unwrap_or(&path);
            if matcher.is_match(relative) {
                Some(path)
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_pattern_matches_nested_paths() {
        let m = compile_pattern("*.md").unwrap();
        assert!(m.is_match("notes.md"));
        assert!(m.is_match("a/b/notes.md"));
        assert!(!m.is_match("notes.txt"));
    }

    #[test]
    fn recursive_pattern_is_accepted() {
        let m = compile_pattern("**/*.rs").unwrap();
        assert!(m.is_match("src/lib.rs"));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(compile_pattern("a[").is_err());
    }
}
