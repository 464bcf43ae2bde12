use clap::Parser;
use std::path::PathBuf;

use crate::error::{FtsearchError, Result};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Text to search for
    pub query: String,

    /// Directory to search under
    #[clap(default_value = ".")]
    pub path: PathBuf,

    /// Comma-separated file-type glob patterns, e.g. "*.md,*.txt"
    #[clap(short, long)]
    pub types: Option<String>,

    #[clap(long, value_parser, default_value_t = false)]
    pub verbose: bool,

    #[clap(long, value_parser)]
    pub log: Option<PathBuf>,

    /// Worker poll interval in milliseconds (overrides the config file)
    #[clap(long)]
    pub poll_interval: Option<u64>,
}

impl Cli {
    /// Caller-side input checks, applied before a search task is built.
    pub fn validate(&self, min_query_len: usize) -> Result<()> {
        if self.query.chars().count() < min_query_len {
            return Err(FtsearchError::InvalidRequest(format!(
                "a text string of at least {min_query_len} characters is required"
            )));
        }
        if !self.path.is_dir() {
            return Err(FtsearchError::InvalidRequest(format!(
                "search path is not a directory: {}",
                self.path.display()
            )));
        }
        Ok(())
    }
}
