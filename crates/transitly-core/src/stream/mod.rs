// ── Reactive snapshot streams ──
//
// Subscription type for consuming snapshot replacements from the DataStore.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::{SnapshotView, TransitSnapshot};

/// A subscription to the transit snapshot.
///
/// Provides both point-in-time access and reactive change notification via
/// the `changed()` method or by converting to a `Stream`.
pub struct SnapshotStream {
    current: Arc<TransitSnapshot>,
    receiver: watch::Receiver<Arc<TransitSnapshot>>,
}

impl SnapshotStream {
    pub(crate) fn new(mut receiver: watch::Receiver<Arc<TransitSnapshot>>) -> Self {
        let current = receiver.borrow_and_update().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation time or at the last `changed()`.
    pub fn current(&self) -> &Arc<TransitSnapshot> {
        &self.current
    }

    /// The latest published snapshot (may have changed since creation).
    pub fn latest(&self) -> Arc<TransitSnapshot> {
        self.receiver.borrow().clone()
    }

    /// The latest snapshot with derived read-side flags.
    pub fn view(&self) -> SnapshotView {
        SnapshotView::from(self.latest())
    }

    /// Wait for the next replacement, returning the new snapshot.
    /// Returns `None` if the store has been dropped.
    ///
    /// Replacements published faster than the caller polls are coalesced;
    /// only the newest is returned.
    pub async fn changed(&mut self) -> Option<Arc<TransitSnapshot>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = Arc::clone(&snap);
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    ///
    /// The first item is the snapshot current at conversion time.
    pub fn into_stream(self) -> SnapshotWatchStream {
        SnapshotWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct SnapshotWatchStream {
    inner: WatchStream<Arc<TransitSnapshot>>,
}

impl Stream for SnapshotWatchStream {
    type Item = Arc<TransitSnapshot>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
