use log::warn;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;
use crate::record::{FileMatch, PATH_MARKER};

/// Inspect a single file for the query.
///
/// Two checks, in order:
/// 1. If the query occurs verbatim (case-sensitive) in the path string, the
///    synthetic path marker is recorded first.
/// 2. The content is read line by line (1-indexed) and every line containing
///    the query case-insensitively is recorded as `"<n>: <line>"`, keeping
///    the original line terminator.
///
/// Invalid UTF-8 or a read error mid-file is recoverable: it is logged, the
/// lines accumulated so far are kept, and the rest of the file is skipped.
/// Only the initial open can fail; the caller skips the file on error.
///
/// Returns `None` when neither path nor content matched.
pub fn inspect_file(path: &Path, query: &str) -> Result<Option<FileMatch>> {
    let mut lines = Vec::new();

    if path.to_string_lossy().contains(query) {
        lines.push(PATH_MARKER.to_string());
    }

    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let needle = query.to_lowercase();

    let mut buf = Vec::new();
    let mut line_number = 0usize;
    loop {
        buf.clear();
        let read = match reader.read_until(b'\n', &mut buf) {
            Ok(n) => n,
            Err(e) => {
                warn!("Error while reading file [{}]: {e}", path.display());
                break;
            }
        };
        if read == 0 {
            break;
        }
        line_number += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(s) => s,
            Err(e) => {
                // Past this point the byte stream cannot be trusted as text;
                // keep what was found on earlier lines and move on.
                warn!("Error while reading file [{}]: {e}", path.display());
                break;
            }
        };

        if line.to_lowercase().contains(&needle) {
            lines.push(format!("{line_number}: {line}"));
        }
    }

    if lines.is_empty() {
        Ok(None)
    } else {
        Ok(Some(FileMatch::new(path.to_path_buf(), lines)))
    }
}
