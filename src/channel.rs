use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::record::SearchItem;

/// Producer half of a [`ResultChannel`]. Cloneable; safe to move into the
/// worker thread.
#[derive(Clone)]
pub struct ResultSink {
    tx: Sender<SearchItem>,
}

impl ResultSink {
    /// Publish one item. A vanished consumer is not an error for the worker;
    /// the item is simply dropped.
    pub fn publish(&self, item: SearchItem) {
        let _ = self.tx.send(item);
    }
}

/// Unbounded FIFO stream of [`SearchItem`]s from the search worker to a
/// single polling consumer.
///
/// Dequeue order equals publish order and no item is ever lost. The consumer
/// drains with [`try_take`](Self::try_take) until [`SearchItem::Done`]
/// appears, or calls [`clear`](Self::clear) to discard leftovers after a
/// cancelled search.
pub struct ResultChannel {
    tx: Sender<SearchItem>,
    rx: Receiver<SearchItem>,
}

impl ResultChannel {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sink(&self) -> ResultSink {
        ResultSink {
            tx: self.tx.clone(),
        }
    }

    /// Non-blocking dequeue; `None` when the channel is currently empty.
    pub fn try_take(&self) -> Option<SearchItem> {
        self.rx.try_recv().ok()
    }

    /// Blocking dequeue, for consumers that prefer to wait instead of poll.
    pub fn take(&self) -> SearchItem {
        // The channel owns a sender, so recv can only fail if self is gone.
        self.rx.recv().expect("result channel disconnected")
    }

    /// Discard everything currently queued. Used by the consumer when a
    /// cancelled search leaves items behind.
    pub fn clear(&self) {
        self.rx.try_iter().for_each(drop);
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl Default for ResultChannel {
    fn default() -> Self {
        Self::new()
    }
}
