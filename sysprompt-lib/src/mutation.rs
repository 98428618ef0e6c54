//! Mutation Coordinator: create/update/delete, then refetch.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::api::RoleApi;
use crate::error::Error;
use crate::model::RecordDraft;
use crate::model::RecordId;
use crate::notify::Notifier;
use crate::store::RecordStore;

/// A pending write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create(RecordDraft),
    Update { id: RecordId, draft: RecordDraft },
    Delete(RecordId),
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Self::Create(_) => MutationKind::Create,
            Self::Update { .. } => MutationKind::Update,
            Self::Delete(_) => MutationKind::Delete,
        }
    }
}

/// Kind of write, used for user-facing copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    /// Message for a settled, successful write.
    pub fn success_message(&self) -> &'static str {
        match self {
            Self::Create => "Data created successfully.",
            Self::Update => "Data updated successfully.",
            Self::Delete => "Data deleted successfully.",
        }
    }

    /// Message for a failed write.
    pub fn failure_message(&self, error: &Error) -> String {
        let verb = match self {
            Self::Create => "creating",
            Self::Update => "updating",
            Self::Delete => "deleting",
        };
        format!("Error {verb} data: {error}")
    }
}

/// Executes writes against the service and keeps the store in step.
///
/// After a successful write the whole collection is refetched (no local
/// patching) and a success notice is shown. A failed write shows an error
/// notice and leaves the store alone. Either way the mutation version is
/// bumped once the write has settled.
#[derive(Clone)]
pub struct MutationCoordinator {
    api: Arc<dyn RoleApi>,
    store: RecordStore,
    notifier: Notifier,
    version: Arc<watch::Sender<u64>>,
    shutdown: CancellationToken,
    require_fields: bool,
}

impl MutationCoordinator {
    pub fn new(store: RecordStore, notifier: Notifier) -> Self {
        let (version, _) = watch::channel(0);
        Self {
            api: Arc::clone(store.api()),
            store,
            notifier,
            version: Arc::new(version),
            shutdown: CancellationToken::new(),
            require_fields: false,
        }
    }

    /// Reject drafts with empty name/content before sending.
    pub fn with_require_fields(mut self, require: bool) -> Self {
        self.require_fields = require;
        self
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Number of settled mutations.
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    /// Receiver that ticks each time a mutation settles.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    /// Cancels writes still in flight; later calls fail immediately.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub async fn create(&self, draft: RecordDraft) -> Result<(), Error> {
        self.apply(Mutation::Create(draft)).await
    }

    pub async fn update(&self, id: RecordId, draft: RecordDraft) -> Result<(), Error> {
        self.apply(Mutation::Update { id, draft }).await
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), Error> {
        self.apply(Mutation::Delete(id)).await
    }

    /// Runs one mutation to completion.
    pub async fn apply(&self, mutation: Mutation) -> Result<(), Error> {
        let kind = mutation.kind();

        let result = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => Err(Error::Cancelled),
            result = self.send(&mutation) => result,
        };

        match result {
            Ok(()) => {
                match self.store.refresh().await {
                    Ok(_) | Err(Error::Cancelled) => {}
                    Err(e) => log::warn!("{:?} succeeded but refresh failed: {}", kind, e),
                }
                log::info!("{:?} settled: ok", kind);
                self.notifier.success(kind.success_message());
                self.bump();
                Ok(())
            }
            Err(Error::Cancelled) => {
                log::debug!("{:?} cancelled", kind);
                Err(Error::Cancelled)
            }
            Err(e) => {
                log::error!("{:?} failed: {}", kind, e);
                self.notifier.error(kind.failure_message(&e));
                self.bump();
                Err(e)
            }
        }
    }

    async fn send(&self, mutation: &Mutation) -> Result<(), Error> {
        match mutation {
            Mutation::Create(draft) => {
                self.check(draft)?;
                self.api.create(draft).await
            }
            Mutation::Update { id, draft } => {
                self.check(draft)?;
                self.api.update(*id, draft).await
            }
            Mutation::Delete(id) => self.api.delete(*id).await,
        }
    }

    fn check(&self, draft: &RecordDraft) -> Result<(), Error> {
        if self.require_fields {
            draft.validate()?;
        }
        Ok(())
    }

    fn bump(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}
