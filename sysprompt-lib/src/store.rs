//! Record Store: the in-memory snapshot of the role collection.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::RwLock;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use tokio_util::sync::CancellationToken;

use crate::api::RoleApi;
use crate::error::Error;
use crate::model::Record;

/// Holds the current collection and refreshes it from the service.
///
/// Only [`refresh`](RecordStore::refresh) writes the snapshot; readers take
/// cheap `Arc` snapshots with [`get`](RecordStore::get). A refresh that
/// fails leaves the previous snapshot in place. Starting a refresh cancels
/// any refresh still in flight, so the latest request always wins.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct RecordStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    api: Arc<dyn RoleApi>,
    snapshot: RwLock<Arc<Vec<Record>>>,
    /// Bumped on every successful refresh.
    version: AtomicU64,
    /// Sequence source for refresh requests.
    requests: AtomicU64,
    in_flight: Mutex<Option<InFlight>>,
}

struct InFlight {
    seq: u64,
    token: CancellationToken,
}

impl RecordStore {
    /// Creates an empty store backed by `api`.
    pub fn new(api: Arc<dyn RoleApi>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                api,
                snapshot: RwLock::new(Arc::new(Vec::new())),
                version: AtomicU64::new(0),
                requests: AtomicU64::new(0),
                in_flight: Mutex::new(None),
            }),
        }
    }

    /// Current snapshot of the collection.
    pub fn get(&self) -> Arc<Vec<Record>> {
        self.inner
            .snapshot
            .read()
            .map(|g| Arc::clone(&g))
            .unwrap_or_default()
    }

    /// Number of successful refreshes so far.
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::SeqCst)
    }

    /// The API this store reads from.
    pub fn api(&self) -> &Arc<dyn RoleApi> {
        &self.inner.api
    }

    /// Refetches the full collection and replaces the snapshot.
    ///
    /// Returns the new version. Returns [`Error::Cancelled`] if a newer
    /// refresh or [`cancel`](RecordStore::cancel) superseded this one.
    pub async fn refresh(&self) -> Result<u64, Error> {
        let (seq, token) = self.begin();
        log::debug!("refreshing role collection");

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => {
                log::debug!("refresh superseded before response");
                return Err(Error::Cancelled);
            }
            result = self.inner.api.list() => result,
        };

        match result {
            Ok(records) => {
                if token.is_cancelled() {
                    return Err(Error::Cancelled);
                }
                let count = records.len();
                if let Ok(mut guard) = self.inner.snapshot.write() {
                    *guard = Arc::new(records);
                }
                let version = self.inner.version.fetch_add(1, Ordering::SeqCst) + 1;
                self.finish(seq);
                log::info!("loaded {} roles (version {})", count, version);
                Ok(version)
            }
            Err(e) => {
                self.finish(seq);
                log::warn!("failed to fetch roles, keeping previous data: {}", e);
                Err(e)
            }
        }
    }

    /// Cancels an in-flight refresh, if any.
    pub fn cancel(&self) {
        if let Ok(mut slot) = self.inner.in_flight.lock()
            && let Some(in_flight) = slot.take()
        {
            in_flight.token.cancel();
        }
    }

    /// Registers a new refresh, cancelling the previous one.
    fn begin(&self) -> (u64, CancellationToken) {
        let seq = self.inner.requests.fetch_add(1, Ordering::SeqCst);
        let token = CancellationToken::new();
        if let Ok(mut slot) = self.inner.in_flight.lock() {
            let next = InFlight {
                seq,
                token: token.clone(),
            };
            if let Some(previous) = slot.replace(next) {
                log::debug!("cancelling refresh #{}", previous.seq);
                previous.token.cancel();
            }
        }
        (seq, token)
    }

    /// Clears the in-flight slot if it still belongs to refresh `seq`.
    fn finish(&self, seq: u64) {
        if let Ok(mut slot) = self.inner.in_flight.lock()
            && slot.as_ref().is_some_and(|current| current.seq == seq)
        {
            slot.take();
        }
    }
}
