use std::fs;
use std::time::{Duration, Instant};

use tempfile::TempDir;

use ftsearch::{ResultChannel, SearchItem, SearchRequest, SearchTask};

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    for n in 0..20 {
        fs::write(
            dir.path().join(format!("file{n:02}.txt")),
            "one needle per file\n",
        )
        .unwrap();
    }
    dir
}

fn drain(channel: &ResultChannel) -> Vec<SearchItem> {
    let mut items = Vec::new();
    while let Some(item) = channel.try_take() {
        items.push(item);
    }
    items
}

#[test]
fn start_publishes_all_records_then_done() {
    let dir = fixture();
    let request = SearchRequest::new(dir.path(), "*.txt", "needle").unwrap();
    let channel = ResultChannel::new();
    let mut task = SearchTask::new(request, channel.sink());

    assert!(!task.is_finished());
    task.start();
    task.wait();
    assert!(task.is_finished());

    let items = drain(&channel);
    assert_eq!(items.len(), 21);
    assert_eq!(items.last(), Some(&SearchItem::Done));
    assert_eq!(items.iter().filter(|i| i.is_done()).count(), 1);
}

#[test]
fn is_finished_stays_true_after_the_worker_is_joined() {
    let dir = fixture();
    let request = SearchRequest::new(dir.path(), "*.txt", "needle").unwrap();
    let channel = ResultChannel::new();
    let mut task = SearchTask::new(request, channel.sink());

    task.start();
    task.wait();
    assert!(task.is_finished());
    // Still finished on repeated queries, joining must not reset the state.
    assert!(task.is_finished());
}

#[test]
fn cancel_before_start_yields_only_the_terminal_marker() {
    let dir = fixture();
    let request = SearchRequest::new(dir.path(), "*.txt", "needle").unwrap();
    let channel = ResultChannel::new();
    let mut task = SearchTask::new(request, channel.sink());

    task.request_cancel();
    task.start();
    task.wait();

    assert_eq!(drain(&channel), vec![SearchItem::Done]);
}

#[test]
fn cancel_mid_scan_still_terminates_the_stream_exactly_once() {
    let dir = fixture();
    let request = SearchRequest::new(dir.path(), "*.txt", "needle").unwrap();
    let channel = ResultChannel::new();
    let mut task = SearchTask::new(request, channel.sink());

    task.start();
    task.request_cancel();
    task.wait();

    let items = drain(&channel);
    // The worker may have processed any number of files before it saw the
    // flag, but the marker is always last and always unique.
    assert!(items.len() <= 21);
    assert_eq!(items.last(), Some(&SearchItem::Done));
    assert_eq!(items.iter().filter(|i| i.is_done()).count(), 1);
}

#[test]
fn records_published_before_cancel_stay_retrievable() {
    let dir = fixture();
    let request = SearchRequest::new(dir.path(), "*.txt", "needle").unwrap();
    let channel = ResultChannel::new();
    let mut task = SearchTask::new(request, channel.sink());

    task.start();
    task.wait();
    task.request_cancel();

    let items = drain(&channel);
    assert_eq!(items.len(), 21);
}

#[test]
fn request_cancel_is_idempotent() {
    let dir = fixture();
    let request = SearchRequest::new(dir.path(), "*.txt", "needle").unwrap();
    let channel = ResultChannel::new();
    let mut task = SearchTask::new(request, channel.sink());

    let token = task.cancel_token();
    token.request_cancel();
    token.request_cancel();
    task.request_cancel();
    assert!(task.is_cancelled());

    task.start();
    task.wait();
    assert_eq!(drain(&channel), vec![SearchItem::Done]);
}

#[test]
fn polling_consumer_observes_completion_without_blocking() {
    let dir = fixture();
    let request = SearchRequest::new(dir.path(), "*.txt", "needle").unwrap();
    let channel = ResultChannel::new();
    let mut task = SearchTask::new(request, channel.sink());
    task.start();

    let deadline = Instant::now() + Duration::from_secs(10);
    while !task.is_finished() {
        assert!(Instant::now() < deadline, "worker never finished");
        std::thread::sleep(Duration::from_millis(10));
    }

    let items = drain(&channel);
    assert_eq!(items.last(), Some(&SearchItem::Done));
}

#[test]
fn second_start_is_a_no_op() {
    let dir = fixture();
    let request = SearchRequest::new(dir.path(), "*.txt", "needle").unwrap();
    let channel = ResultChannel::new();
    let mut task = SearchTask::new(request, channel.sink());

    task.start();
    task.wait();
    task.start();
    task.wait();

    let items = drain(&channel);
    assert_eq!(items.iter().filter(|i| i.is_done()).count(), 1);
}
