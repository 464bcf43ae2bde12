use log::{debug, warn};
use std::path::PathBuf;

use crate::channel::ResultSink;
use crate::error::{FtsearchError, Result};
use crate::processor::inspect_file;
use crate::record::SearchItem;
use crate::task::CancelToken;
use crate::walker::{compile_pattern, walk_matches};

/// What to search: a root directory, a comma-joined list of file-type glob
/// patterns, and the query string.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub root: PathBuf,
    pub file_types: String,
    pub query: String,
}

impl SearchRequest {
    /// The caller is expected to validate its input (the CLI requires a
    /// query of at least 3 characters); the core only refuses requests it
    /// cannot execute at all.
    pub fn new(
        root: impl Into<PathBuf>,
        file_types: impl Into<String>,
        query: impl Into<String>,
    ) -> Result<Self> {
        let query = query.into();
        if query.is_empty() {
            return Err(FtsearchError::InvalidRequest(
                "query must not be empty".to_string(),
            ));
        }
        let file_types = file_types.into();
        if file_types.split(',').all(|p| p.trim().is_empty()) {
            return Err(FtsearchError::InvalidRequest(
                "at least one file-type pattern is required".to_string(),
            ));
        }
        Ok(Self {
            root: root.into(),
            file_types,
            query,
        })
    }

    /// The patterns in input order. Files matched by more than one pattern
    /// are deliberately enumerated once per pattern; see DESIGN.md.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.file_types
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Run one search to completion, publishing every [`FileMatch`] found and
/// then exactly one [`SearchItem::Done`].
///
/// Two phases, mirroring the request: first all patterns are enumerated
/// (in order), then every enumerated file is inspected (in order). The
/// cancel token is observed before each pattern and before each file, never
/// mid-file. A cancelled scan still ends with the terminal marker so the
/// consumer can always tell the stream is over.
///
/// No failure in here is fatal: bad patterns, unreadable directories and
/// unopenable files are logged and skipped.
///
/// [`FileMatch`]: crate::record::FileMatch
pub fn run_scan(request: &SearchRequest, token: &CancelToken, sink: &ResultSink) {
    let mut files: Vec<PathBuf> = Vec::new();

    for pattern in request.patterns() {
        if token.is_cancelled() {
            break;
        }
        let matcher = match compile_pattern(pattern) {
            Ok(m) => m,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };
        files.extend(walk_matches(&request.root, &matcher));
    }
    debug!(
        "Enumerated {} candidate file(s) under {}",
        files.len(),
        request.root.display()
    );

    let mut published = 0usize;
    for path in &files {
        if token.is_cancelled() {
            debug!("Scan cancelled after {published} match(es)");
            break;
        }
        match inspect_file(path, &request.query) {
            Ok(Some(found)) => {
                sink.publish(SearchItem::Match(found));
                published += 1;
            }
            Ok(None) => {}
            Err(e) => warn!("Skipping file [{}]: {e}", path.display()),
        }
    }

    sink.publish(SearchItem::Done);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_split_on_comma_in_order() {
        let req = SearchRequest::new("/tmp", "*.md, *.txt,*.rs", "abc").unwrap();
        let patterns: Vec<_> = req.patterns().collect();
        assert_eq!(patterns, vec!["*.md", "*.txt", "*.rs"]);
    }

    #[test]
    fn empty_query_is_rejected() {
        assert!(SearchRequest::new("/tmp", "*.md", "").is_err());
    }

    #[test]
    fn blank_pattern_list_is_rejected() {
        assert!(SearchRequest::new("/tmp", " , ", "abc").is_err());
    }
}
