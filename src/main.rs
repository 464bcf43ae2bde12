use clap::Parser;
use colored::*;
use env_logger::{Builder, Env, Target};
use log::{debug, info};
use std::fs;
use std::thread;
use std::time::{Duration, Instant};

use ftsearch::error::FtsearchError;
use ftsearch::{
    Cli, Config, FileMatch, Result, ResultChannel, SearchItem, SearchRequest, SearchTask,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli)?;

    let config = Config::load_or_default();
    cli.validate(config.min_query_len)?;

    let start_time = Instant::now();
    info!(
        "Searching for {:?} under {}",
        cli.query,
        cli.path.display()
    );

    let file_types = cli
        .types
        .clone()
        .unwrap_or_else(|| config.default_file_types.clone());
    let request = SearchRequest::new(cli.path.clone(), file_types, cli.query.clone())?;

    let channel = ResultChannel::new();
    let mut task = SearchTask::new(request, channel.sink());

    let cancel = task.cancel_token();
    ctrlc::set_handler(move || cancel.request_cancel())
        .map_err(|e| FtsearchError::Other(e.to_string()))?;

    task.start();
    println!("{}", "Searching...".yellow());

    let interval = Duration::from_millis(cli.poll_interval.unwrap_or(config.poll_interval_ms));
    loop {
        if task.is_cancelled() {
            channel.clear();
            println!("{}", "Search cancelled.".yellow());
            return Ok(());
        }
        if task.is_finished() {
            break;
        }
        thread::sleep(interval);
    }

    if let Some(matches) = drain_results(&task, &channel, &cli.query)? {
        println!(
            "\n{} (matches: {}, elapsed: {:.2?})",
            "Search done".green().bold(),
            matches,
            start_time.elapsed()
        );
    }
    Ok(())
}

/// Read the channel in one pass until the terminal marker.
///
/// Returns the number of matched files, or `None` when cancellation arrived
/// while reading out the queue. An empty channel before the marker means the
/// worker died without terminating its stream, which is an error.
fn drain_results(task: &SearchTask, channel: &ResultChannel, query: &str) -> Result<Option<usize>> {
    let mut matches = 0usize;
    loop {
        match channel.try_take() {
            Some(SearchItem::Match(found)) => {
                // Cancel can also arrive while the queue is being read out.
                if task.is_cancelled() {
                    channel.clear();
                    println!("{}", "Search cancelled.".yellow());
                    return Ok(None);
                }
                print_match(&found, query);
                matches += 1;
            }
            Some(SearchItem::Done) => {
                debug!("Terminal marker received after {matches} match(es)");
                return Ok(Some(matches));
            }
            None => {
                println!("{}", "Search failed.".red());
                return Err(FtsearchError::SearchFailed(
                    "result stream ended without a terminal marker".to_string(),
                ));
            }
        }
    }
}

fn print_match(found: &FileMatch, query: &str) {
    println!("\n{} {}", "File".green().bold(), found.path.display());
    for line in &found.lines {
        print!("  {}", highlight_first(line, query));
        if !line.ends_with('\n') {
            println!();
        }
    }
}

/// Color the first occurrence of the query in a line, case-insensitively.
fn highlight_first(line: &str, query: &str) -> String {
    match find_case_insensitive(line, query) {
        Some((start, end)) => {
            format!(
                "{}{}{}",
                &line[..start],
                line[start..end].yellow().bold(),
                &line[end..]
            )
        }
        None => line.to_string(),
    }
}

/// Byte range of the first case-insensitive occurrence of `query` in `line`.
///
/// The offsets are found by walking `line` itself, so they are valid char
/// boundaries in the original string even when lowercasing changes byte
/// lengths (e.g. `İ` lowercases to two characters).
fn find_case_insensitive(line: &str, query: &str) -> Option<(usize, usize)> {
    let query_lower = query.to_lowercase();
    if query_lower.is_empty() {
        return None;
    }
    line.char_indices().find_map(|(start, _)| {
        match_len_at(&line[start..], &query_lower).map(|len| (start, start + len))
    })
}

/// How many bytes of `rest` lowercase to exactly `query_lower`, counting
/// whole characters only. `None` if `rest` does not start with the query.
fn match_len_at(rest: &str, query_lower: &str) -> Option<usize> {
    let mut matched = 0usize;
    let mut consumed = 0usize;
    for c in rest.chars() {
        consumed += c.len_utf8();
        for lc in c.to_lowercase() {
            if matched >= query_lower.len() {
                // The query ended inside this character's lowercase
                // expansion; the whole character is highlighted.
                break;
            }
            let mut buf = [0u8; 4];
            let lc_str = lc.encode_utf8(&mut buf);
            if query_lower[matched..].starts_with(&*lc_str) {
                matched += lc_str.len();
            } else {
                return None;
            }
        }
        if matched >= query_lower.len() {
            return Some(consumed);
        }
    }
    None
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let default_level = if cli.verbose { "debug" } else { "info" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    if let Some(log_path) = &cli.log {
        if let Some(parent_dir) = log_path.parent() {
            if !parent_dir.exists() {
                fs::create_dir_all(parent_dir)?;
            }
        }
        let log_file = fs::File::create(log_path)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| FtsearchError::Other(e.to_string()))?;
    Ok(())
}
