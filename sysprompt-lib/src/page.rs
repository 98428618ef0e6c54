//! `RolePage`: the composition root for one role management page.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::Context;
use std::task::Poll;

use tokio::sync::watch;

use crate::Config;
use crate::api::RoleApi;
use crate::confirm::Answer;
use crate::confirm::DeleteFlow;
use crate::confirm::DeleteOutcome;
use crate::confirm::DeleteStep;
use crate::editor::RecordEditor;
use crate::error::Error;
use crate::model::Record;
use crate::model::RecordId;
use crate::mutation::MutationCoordinator;
use crate::notify::Notice;
use crate::notify::NoticeTiming;
use crate::notify::Notifier;
use crate::store::RecordStore;
use crate::table::CheckState;
use crate::table::ColumnId;
use crate::table::Debouncer;
use crate::table::PageSize;
use crate::table::SortState;
use crate::table::TableEngine;
use crate::table::TableView;
use crate::table::ViewState;

/// A request started by [`RolePage`] that runs without borrowing it.
///
/// Await or spawn it, then hand its result to the matching `finish_*`
/// method. The page stays usable in between. Dropping the page cancels
/// it.
#[must_use = "a pending request does nothing unless awaited"]
pub struct Pending<T> {
    future: Pin<Box<dyn Future<Output = Result<T, Error>> + Send>>,
}

impl<T> Pending<T> {
    fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, Error>> + Send + 'static,
    {
        Self {
            future: Box::pin(future),
        }
    }
}

impl<T> std::fmt::Debug for Pending<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pending").finish_non_exhaustive()
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T, Error>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.future.as_mut().poll(cx)
    }
}

/// Owns everything one page needs and wires it together.
///
/// Built once per page lifetime from an API handle and a [`Config`]; child
/// components borrow from it instead of reaching for shared globals.
/// Dropping the page cancels the in-flight refresh, pending filter input
/// and notice timers.
///
/// Must be created inside a tokio runtime.
///
/// # Example
///
/// ```ignore
/// let client = RoleClient::from_config(&config)?;
/// let mut page = RolePage::new(Arc::new(client), &config);
/// page.load().await?;
///
/// page.type_filter("tutor");
/// page.next_filter().await;
/// let view = page.table();
///
/// // keep rendering while a delete runs
/// page.request_delete(7);
/// if let DeleteStep::Pending(request) = page.begin_delete(Answer::Affirm) {
///     let task = tokio::spawn(request);
///     let _ = page.table();
///     let outcome = page.finish_delete(task.await?);
/// }
/// ```
pub struct RolePage {
    store: RecordStore,
    engine: TableEngine,
    view: ViewState,
    filter_input: Debouncer<String>,
    filter_committed: watch::Receiver<String>,
    coordinator: MutationCoordinator,
    notifier: Notifier,
    deletes: DeleteFlow,
    editor: Option<RecordEditor>,
}

impl RolePage {
    pub fn new(api: Arc<dyn RoleApi>, config: &Config) -> Self {
        let store = RecordStore::new(api);
        let notifier = Notifier::new(NoticeTiming {
            auto_hide: config.notice_auto_hide,
            fade: config.notice_fade,
        });
        let coordinator = MutationCoordinator::new(store.clone(), notifier.clone())
            .with_require_fields(config.require_fields);
        let filter_input = Debouncer::new(String::new(), config.filter_debounce);
        let filter_committed = filter_input.subscribe();

        Self {
            store,
            engine: TableEngine::new().with_budget(config.truncate_budget),
            view: ViewState::new(config.page_size),
            filter_input,
            filter_committed,
            coordinator,
            notifier,
            deletes: DeleteFlow::new(),
            editor: None,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn coordinator(&self) -> &MutationCoordinator {
        &self.coordinator
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Starts a refetch of the collection.
    pub fn begin_load(&self) -> Pending<u64> {
        let store = self.store.clone();
        Pending::new(async move { store.refresh().await })
    }

    /// Applies a finished refetch.
    pub fn finish_load(&mut self, result: Result<u64, Error>) -> Result<(), Error> {
        result?;
        self.prune_selection();
        Ok(())
    }

    /// Fetches the collection. Failures are logged by the store and leave
    /// the previous data in place.
    pub async fn load(&mut self) -> Result<(), Error> {
        let result = self.begin_load().await;
        self.finish_load(result)
    }

    // -------------------------------------------------------------------------
    // Filter
    // -------------------------------------------------------------------------

    /// Raw keystroke input; committed after the debounce period.
    pub fn type_filter(&self, text: impl Into<String>) {
        self.filter_input.push(text.into());
    }

    /// Commits filter text immediately, bypassing the debounce.
    pub fn set_filter(&mut self, text: impl Into<String>) -> bool {
        self.view.set_filter(text)
    }

    /// Applies committed filter text, if any arrived. Returns `true` if the
    /// filter changed.
    pub fn sync_filter(&mut self) -> bool {
        if !self.filter_committed.has_changed().unwrap_or(false) {
            return false;
        }
        let text = self.filter_committed.borrow_and_update().clone();
        self.view.set_filter(text)
    }

    /// Waits for the next committed filter value and applies it.
    pub async fn next_filter(&mut self) -> bool {
        if self.filter_committed.changed().await.is_err() {
            return false;
        }
        let text = self.filter_committed.borrow_and_update().clone();
        self.view.set_filter(text)
    }

    // -------------------------------------------------------------------------
    // Table
    // -------------------------------------------------------------------------

    /// Renders the current page from a fresh store snapshot.
    pub fn table(&mut self) -> TableView {
        self.sync_filter();
        let records = self.store.get();
        self.engine.render(&records, &self.view)
    }

    pub fn toggle_sort(&mut self, column: ColumnId) -> Option<SortState> {
        self.engine.toggle_sort(&mut self.view, column)
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        self.view.page.set_size(size);
    }

    pub fn set_page_index(&mut self, index: usize) {
        self.view.page.index = index;
    }

    pub fn toggle_row(&mut self, id: RecordId) -> bool {
        self.view.selection.toggle(id)
    }

    /// Select-all over every record passing the filter.
    pub fn toggle_all(&mut self) -> CheckState {
        let records = self.store.get();
        self.engine.toggle_all(&records, &mut self.view)
    }

    /// Selected records present in the current snapshot, in store order.
    pub fn selected_records(&self) -> Vec<Record> {
        self.store
            .get()
            .iter()
            .filter(|r| self.view.selection.is_selected(r.id))
            .cloned()
            .collect()
    }

    fn find(&self, id: RecordId) -> Option<Record> {
        self.store.get().iter().find(|r| r.id == id).cloned()
    }

    /// Forgets selected ids that no longer exist after a refresh.
    fn prune_selection(&mut self) {
        let records = self.store.get();
        let gone = self
            .view
            .selection
            .retain_existing(|id| records.iter().any(|r| r.id == id));
        if !gone.is_empty() {
            log::debug!("dropped {} stale selections", gone.len());
        }
    }

    // -------------------------------------------------------------------------
    // Delete
    // -------------------------------------------------------------------------

    /// Stages a delete and opens the confirmation prompt.
    ///
    /// Returns `false` if the id is not in the current snapshot.
    pub fn request_delete(&mut self, id: RecordId) -> bool {
        match self.find(id) {
            Some(record) => {
                self.deletes.request(record);
                true
            }
            None => false,
        }
    }

    pub fn delete_flow(&self) -> &DeleteFlow {
        &self.deletes
    }

    /// Answers the delete prompt.
    ///
    /// An affirmative answer leaves the prompt in `Submitting` and returns
    /// the delete request; pass its result to
    /// [`finish_delete`](RolePage::finish_delete).
    pub fn begin_delete(&mut self, answer: Answer) -> DeleteStep<Pending<()>> {
        match self.deletes.answer(answer) {
            DeleteStep::Settled(outcome) => DeleteStep::Settled(outcome),
            DeleteStep::Pending(id) => {
                let coordinator = self.coordinator.clone();
                DeleteStep::Pending(Pending::new(async move { coordinator.delete(id).await }))
            }
        }
    }

    /// Closes the delete prompt after its request settled.
    pub fn finish_delete(&mut self, result: Result<(), Error>) -> DeleteOutcome {
        let outcome = self.deletes.settle(result);
        if matches!(outcome, DeleteOutcome::Deleted) {
            self.prune_selection();
        }
        outcome
    }

    /// Answers the delete prompt and waits for the request, if any.
    pub async fn respond_delete(&mut self, answer: Answer) -> DeleteOutcome {
        match self.begin_delete(answer) {
            DeleteStep::Settled(outcome) => outcome,
            DeleteStep::Pending(request) => {
                let result = request.await;
                self.finish_delete(result)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Editor
    // -------------------------------------------------------------------------

    fn submitting(&self) -> bool {
        self.editor.as_ref().is_some_and(RecordEditor::is_submitting)
    }

    /// Opens a blank form. Returns `None` while a submit is running.
    pub fn open_create(&mut self) -> Option<&mut RecordEditor> {
        if self.submitting() {
            return None;
        }
        Some(self.editor.insert(RecordEditor::create()))
    }

    /// Opens the edit form for `id`. Returns `None` if it is not loaded or
    /// a submit is running.
    pub fn open_edit(&mut self, id: RecordId) -> Option<&mut RecordEditor> {
        if self.submitting() {
            return None;
        }
        let record = self.find(id)?;
        Some(self.editor.insert(RecordEditor::edit(&record)))
    }

    pub fn editor(&self) -> Option<&RecordEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut RecordEditor> {
        self.editor.as_mut()
    }

    /// Starts the open form's write. The form stays open and submitting
    /// until [`finish_submit`](RolePage::finish_submit).
    pub fn begin_submit(&mut self) -> Option<Pending<()>> {
        let mutation = self.editor.as_mut()?.begin_submit()?;
        let coordinator = self.coordinator.clone();
        Some(Pending::new(async move { coordinator.apply(mutation).await }))
    }

    /// Closes the form after its write settled.
    pub fn finish_submit(&mut self, result: Result<(), Error>) -> Result<(), Error> {
        if self.submitting() {
            self.editor = None;
        }
        result
    }

    /// Submits the open form. The form closes once the request settles.
    pub async fn submit_editor(&mut self) -> Result<(), Error> {
        let Some(request) = self.begin_submit() else {
            return Ok(());
        };
        let result = request.await;
        self.finish_submit(result)
    }

    /// Closes the form without sending. Ignored while a submit is running.
    pub fn close_editor(&mut self) {
        if !self.submitting() {
            self.editor = None;
        }
    }

    // -------------------------------------------------------------------------
    // Notices
    // -------------------------------------------------------------------------

    pub fn notice(&self) -> Option<Notice> {
        self.notifier.current()
    }

    pub fn dismiss_notice(&self) {
        self.notifier.dismiss();
    }

    pub fn subscribe_notice(&self) -> watch::Receiver<Option<Notice>> {
        self.notifier.subscribe()
    }

    /// Number of settled mutations; front ends re-render when it moves.
    pub fn mutation_version(&self) -> u64 {
        self.coordinator.version()
    }
}

impl Drop for RolePage {
    fn drop(&mut self) {
        self.store.cancel();
        self.coordinator.shutdown();
        self.notifier.cancel_timers();
    }
}
