//! In-memory snapshots of remote collections.
//!
//! A [`ResourceStore`] holds the last successfully loaded collection as an
//! immutable [`Snapshot`]. `load` swaps in a new snapshot only when the fetch
//! succeeded; on failure the previous one stays available.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use nextjob_core::resource::{Resource, ResourceSource};
use nextjob_core::{NextJobError, Result};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// One complete copy of a collection as the server returned it.
#[derive(Debug, Clone)]
pub struct Snapshot<R: Resource> {
    items: Vec<R>,
    loaded_at: Option<DateTime<Utc>>,
    /// Bumped on every replacement, starting at 0 for the empty initial snapshot
    generation: u64,
}

impl<R: Resource> Snapshot<R> {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            loaded_at: None,
            generation: 0,
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn get(&self, key: &R::Key) -> Option<&R> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn contains(&self, key: &R::Key) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// When the collection was last fetched; `None` before the first load.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of the reload that follows a successful mutation.
///
/// The mutation itself has been applied in both cases.
#[derive(Debug, Clone)]
pub enum Refresh<R: Resource> {
    Fresh(Arc<Snapshot<R>>),
    /// The reload failed; the snapshot is the one from before the mutation.
    Stale {
        snapshot: Arc<Snapshot<R>>,
        reload_error: NextJobError,
    },
}

impl<R: Resource> Refresh<R> {
    pub fn snapshot(&self) -> &Arc<Snapshot<R>> {
        match self {
            Refresh::Fresh(snapshot) => snapshot,
            Refresh::Stale { snapshot, .. } => snapshot,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Refresh::Stale { .. })
    }

    pub fn reload_error(&self) -> Option<&NextJobError> {
        match self {
            Refresh::Fresh(_) => None,
            Refresh::Stale { reload_error, .. } => Some(reload_error),
        }
    }
}

/// Cache of one remote collection, replaced wholesale on every load.
pub struct ResourceStore<R: Resource> {
    source: Arc<dyn ResourceSource<R>>,
    snapshot: RwLock<Arc<Snapshot<R>>>,
}

impl<R: Resource> ResourceStore<R> {
    pub fn new(source: Arc<dyn ResourceSource<R>>) -> Self {
        Self {
            source,
            snapshot: RwLock::new(Arc::new(Snapshot::empty())),
        }
    }

    /// Fetches the whole collection and replaces the snapshot.
    ///
    /// On failure the current snapshot is kept and the error returned.
    pub async fn load(&self, cancel: &CancellationToken) -> Result<Arc<Snapshot<R>>> {
        let items = match self.source.list(cancel).await {
            Ok(items) => items,
            Err(e) => {
                warn!(kind = R::KIND, error = %e, "Reload failed, keeping previous snapshot");
                return Err(e);
            }
        };

        let mut current = self.snapshot.write().await;
        let next = Arc::new(Snapshot {
            items,
            loaded_at: Some(Utc::now()),
            generation: current.generation + 1,
        });
        debug!(
            kind = R::KIND,
            count = next.len(),
            generation = next.generation,
            "Snapshot replaced"
        );
        *current = Arc::clone(&next);
        Ok(next)
    }

    /// The current snapshot. Cheap: only the `Arc` is cloned.
    pub async fn snapshot(&self) -> Arc<Snapshot<R>> {
        Arc::clone(&*self.snapshot.read().await)
    }

    pub async fn get(&self, key: &R::Key) -> Option<R> {
        self.snapshot.read().await.get(key).cloned()
    }

    /// Reloads after a mutation that has already been applied remotely.
    pub(crate) async fn refresh(&self, cancel: &CancellationToken) -> Refresh<R> {
        match self.load(cancel).await {
            Ok(snapshot) => Refresh::Fresh(snapshot),
            Err(reload_error) => Refresh::Stale {
                snapshot: self.snapshot().await,
                reload_error,
            },
        }
    }

    /// Replaces a single record with the server's authoritative copy.
    ///
    /// Builds a new snapshot with that one record swapped (or appended when
    /// absent); the rest of the collection is carried over untouched.
    pub(crate) async fn replace_record(&self, record: R) -> Arc<Snapshot<R>> {
        let mut current = self.snapshot.write().await;
        let mut items = current.items.clone();
        match items.iter_mut().find(|item| item.key() == record.key()) {
            Some(slot) => *slot = record,
            None => items.push(record),
        }
        let next = Arc::new(Snapshot {
            items,
            loaded_at: current.loaded_at,
            generation: current.generation + 1,
        });
        *current = Arc::clone(&next);
        next
    }
}
