use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FtsearchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid search request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("An unexpected error occurred: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, FtsearchError>;
