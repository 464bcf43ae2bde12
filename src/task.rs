use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::channel::ResultSink;
use crate::search::{run_scan, SearchRequest};

/// Shared cooperative cancellation flag.
///
/// Set at most once per search, observed by the worker between patterns and
/// between files. Clones share the same flag, so a clone can live in a
/// signal handler while the task keeps its own.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent; callable from any thread at any time.
    pub fn request_cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// One background search: a worker thread running [`run_scan`] against an
/// injected [`ResultSink`].
///
/// `start` never blocks the calling thread. Records already published stay
/// retrievable after cancellation, and the worker always ends the stream
/// with the terminal marker, cancelled or not.
pub struct SearchTask {
    token: CancelToken,
    pending: Option<(SearchRequest, ResultSink)>,
    handle: Option<JoinHandle<()>>,
    joined: bool,
}

impl SearchTask {
    pub fn new(request: SearchRequest, sink: ResultSink) -> Self {
        Self {
            token: CancelToken::new(),
            pending: Some((request, sink)),
            handle: None,
            joined: false,
        }
    }

    /// Launch the worker thread. A second call is a no-op.
    pub fn start(&mut self) {
        let Some((request, sink)) = self.pending.take() else {
            return;
        };
        let token = self.token.clone();
        debug!(
            "Starting search for {:?} in {} ({})",
            request.query,
            request.root.display(),
            request.file_types
        );
        self.handle = Some(thread::spawn(move || {
            run_scan(&request, &token, &sink);
        }));
    }

    /// A clone of the cancellation flag, e.g. for a Ctrl-C handler.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn request_cancel(&self) {
        self.token.request_cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the worker thread has returned. This says nothing about how
    /// much of the channel the consumer has drained, and is `false` before
    /// `start`. Stays `true` once the worker is done, joined or not.
    pub fn is_finished(&self) -> bool {
        self.joined || self.handle.as_ref().is_some_and(JoinHandle::is_finished)
    }

    /// Block until the worker has returned. Intended for tests and teardown;
    /// a polling consumer should use [`is_finished`](Self::is_finished).
    pub fn wait(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            self.joined = true;
        }
    }
}
