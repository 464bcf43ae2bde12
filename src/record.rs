use std::path::PathBuf;

/// Synthetic line prepended when the query occurs in the file path itself.
pub const PATH_MARKER: &str = "<<text found in path>>\n";

/// One file's search result: the file path and every line that matched.
///
/// `lines` keeps file order; the path marker, when present, comes first.
/// Content lines are formatted as `"<line_number>: <raw line>"` with the
/// original line terminator preserved. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatch {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl FileMatch {
    pub fn new(path: PathBuf, lines: Vec<String>) -> Self {
        Self { path, lines }
    }
}

/// Item flowing over the result channel.
///
/// The terminal marker is a dedicated variant rather than a reserved path
/// value, so it can never collide with a real file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchItem {
    Match(FileMatch),
    /// End of stream: the scan completed or was cancelled. Emitted exactly
    /// once per search, in both cases.
    Done,
}

impl SearchItem {
    pub fn is_done(&self) -> bool {
        matches!(self, SearchItem::Done)
    }
}
