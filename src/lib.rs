pub mod channel;
pub mod cli;
pub mod config;
pub mod error;
pub mod processor;
pub mod record;
pub mod search;
pub mod task;
pub mod walker;

pub use channel::{ResultChannel, ResultSink};
pub use cli::Cli;
pub use config::Config;
pub use error::{FtsearchError, Result};
pub use record::{FileMatch, SearchItem, PATH_MARKER};
pub use search::{run_scan, SearchRequest};
pub use task::{CancelToken, SearchTask};
