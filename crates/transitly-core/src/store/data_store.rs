// ── Central snapshot store ──
//
// Holds exactly one current `TransitSnapshot`. Reads are wait-free
// (`ArcSwap`), writers are serialized, and every committed replacement is
// broadcast to subscribers via a `watch` channel.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwap;
use tokio::sync::watch;

use super::snapshot::{SnapshotView, TransitSnapshot};
use crate::stream::SnapshotStream;

/// Single source of truth for transit state.
///
/// `get()` never blocks. `update()` computes the next snapshot from the
/// current one while holding the writer lock, so concurrent updates are
/// applied one after another and none is lost.
pub struct DataStore {
    current: ArcSwap<TransitSnapshot>,
    writer: Mutex<()>,
    published: watch::Sender<Arc<TransitSnapshot>>,
}

impl DataStore {
    pub fn new(initial: TransitSnapshot) -> Self {
        let initial = Arc::new(initial);
        let (published, _) = watch::channel(Arc::clone(&initial));

        Self {
            current: ArcSwap::new(initial),
            writer: Mutex::new(()),
            published,
        }
    }

    /// The current snapshot (cheap `Arc` clone).
    pub fn get(&self) -> Arc<TransitSnapshot> {
        self.current.load_full()
    }

    /// The current snapshot with derived read-side flags.
    pub fn view(&self) -> SnapshotView {
        SnapshotView::from(self.get())
    }

    /// Derive the next snapshot from the current one and publish it.
    ///
    /// Returns the snapshot that was published.
    pub fn update<F>(&self, f: F) -> Arc<TransitSnapshot>
    where
        F: FnOnce(&TransitSnapshot) -> TransitSnapshot,
    {
        let _guard = self.lock_writer();
        self.publish(f(&self.current.load()))
    }

    /// Like [`update`](Self::update), but `f` may decline by returning
    /// `None`, in which case nothing is published and subscribers are not
    /// woken.
    pub fn try_update<F>(&self, f: F) -> Option<Arc<TransitSnapshot>>
    where
        F: FnOnce(&TransitSnapshot) -> Option<TransitSnapshot>,
    {
        let _guard = self.lock_writer();
        f(&self.current.load()).map(|next| self.publish(next))
    }

    /// Replace the snapshot wholesale (session restart).
    pub fn reset(&self, snapshot: TransitSnapshot) -> Arc<TransitSnapshot> {
        self.update(|_| snapshot)
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        // The guard protects no data, so a poisoned lock is still usable.
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Must be called with the writer lock held.
    fn publish(&self, next: TransitSnapshot) -> Arc<TransitSnapshot> {
        let next = Arc::new(next);
        self.current.store(Arc::clone(&next));
        // `send_replace` updates unconditionally, even with zero receivers.
        self.published.send_replace(Arc::clone(&next));
        next
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe(&self) -> SnapshotStream {
        SnapshotStream::new(self.published.subscribe())
    }

    pub fn subscriber_count(&self) -> usize {
        self.published.receiver_count()
    }
}
