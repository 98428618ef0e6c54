//! Selection/Confirmation Flow.
//!
//! Destructive actions never run straight from the row control: the target
//! is staged, a confirmation prompt opens, and only an affirmative answer
//! reaches the Mutation Coordinator.

use crate::error::Error;
use crate::model::Record;
use crate::model::RecordId;
use crate::mutation::MutationCoordinator;

/// What the prompt is confirming. Affects copy and whether an
/// acknowledgement step follows; never the gating itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKind {
    Delete,
    DeleteAccount,
    Unsubscribe,
    SuspendAccount,
}

impl ConfirmKind {
    pub fn question(&self) -> &'static str {
        match self {
            Self::Delete => "Are you sure you want to deactivate this data?",
            Self::DeleteAccount => "Are you sure you want to deactivate your account?",
            Self::Unsubscribe => "Are you sure to cancel your subscription?",
            Self::SuspendAccount => "Are you sure?",
        }
    }

    /// Extra line under the question.
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            Self::SuspendAccount => Some("You won't be able to revert user!"),
            _ => None,
        }
    }

    pub fn confirm_label(&self) -> &'static str {
        match self {
            Self::SuspendAccount => "Yes, Suspend User!",
            _ => "Yes",
        }
    }

    pub fn cancel_label(&self) -> &'static str {
        "Cancel"
    }

    /// Whether answering opens an acknowledgement dialog.
    pub fn has_follow_up(&self) -> bool {
        !matches!(self, Self::Delete)
    }

    /// Acknowledgement heading for the given answer.
    pub fn outcome_title(&self, confirmed: bool) -> &'static str {
        if !confirmed {
            return "Cancelled";
        }
        match self {
            Self::Delete | Self::DeleteAccount => "Deactivated",
            Self::Unsubscribe => "Unsubscribed",
            Self::SuspendAccount => "Suspended!",
        }
    }

    /// Acknowledgement body for the given answer.
    pub fn outcome_message(&self, confirmed: bool) -> &'static str {
        match (self, confirmed) {
            (Self::Delete, true) => "Your data has been deactivated successfully.",
            (Self::DeleteAccount, true) => "Your account has been deactivated successfully.",
            (Self::Unsubscribe, true) => "Your subscription cancelled successfully.",
            (Self::SuspendAccount, true) => "User has been suspended.",
            (Self::Delete, false) => "Data Deactivation Cancelled!",
            (Self::DeleteAccount, false) => "Account Deactivation Cancelled!",
            (Self::Unsubscribe, false) => "Unsubscription Cancelled!!",
            (Self::SuspendAccount, false) => "Cancelled Suspension :)",
        }
    }
}

/// The user's answer. Closing the prompt counts as [`Answer::Decline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Affirm,
    Decline,
}

impl Answer {
    pub fn is_affirm(&self) -> bool {
        matches!(self, Self::Affirm)
    }
}

/// Dialog state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    /// The question is showing.
    Prompting,
    /// Affirmed; the action is running and the prompt stays open.
    Submitting,
    /// Answered; showing the acknowledgement for kinds that have one.
    Acknowledging { confirmed: bool },
}

/// A reusable confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    kind: ConfirmKind,
    state: DialogState,
}

impl ConfirmDialog {
    pub fn new(kind: ConfirmKind) -> Self {
        Self {
            kind,
            state: DialogState::Closed,
        }
    }

    pub fn kind(&self) -> ConfirmKind {
        self.kind
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DialogState::Closed
    }

    pub fn open(&mut self) {
        self.state = DialogState::Prompting;
    }

    /// Records the answer. Returns `true` if it was affirmative and the
    /// prompt was showing.
    ///
    /// An affirmative answer moves to `Submitting`; call [`settle`] once the
    /// action finishes. A decline closes, or acknowledges for kinds with a
    /// follow-up.
    ///
    /// [`settle`]: ConfirmDialog::settle
    pub fn answer(&mut self, answer: Answer) -> bool {
        if self.state != DialogState::Prompting {
            return false;
        }
        if answer.is_affirm() {
            self.state = DialogState::Submitting;
            true
        } else {
            self.finish(false);
            false
        }
    }

    /// Marks the confirmed action as settled.
    pub fn settle(&mut self) {
        if self.state == DialogState::Submitting {
            self.finish(true);
        }
    }

    /// Closes the acknowledgement dialog.
    pub fn acknowledge(&mut self) {
        if matches!(self.state, DialogState::Acknowledging { .. }) {
            self.state = DialogState::Closed;
        }
    }

    /// Closes the prompt without an answer; same as declining.
    pub fn dismiss(&mut self) {
        match self.state {
            DialogState::Prompting => {
                self.answer(Answer::Decline);
            }
            DialogState::Acknowledging { .. } => self.state = DialogState::Closed,
            DialogState::Closed | DialogState::Submitting => {}
        }
    }

    fn finish(&mut self, confirmed: bool) {
        self.state = if self.kind.has_follow_up() {
            DialogState::Acknowledging { confirmed }
        } else {
            DialogState::Closed
        };
    }
}

/// Result of answering a staged delete.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// Nothing was staged or the prompt was not showing.
    Idle,
    /// Declined; no request was made.
    Declined,
    Deleted,
    /// The request failed; the error is also shown as a notice.
    Failed(Error),
}

/// What an answer calls for: a finished outcome, or a request `W` that
/// has to run before the prompt can settle.
#[derive(Debug)]
pub enum DeleteStep<W> {
    Settled(DeleteOutcome),
    Pending(W),
}

/// Delete gate: stage a record, prompt, delete only on affirm.
#[derive(Debug, Clone)]
pub struct DeleteFlow {
    dialog: ConfirmDialog,
    staged: Option<Record>,
}

impl Default for DeleteFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl DeleteFlow {
    pub fn new() -> Self {
        Self {
            dialog: ConfirmDialog::new(ConfirmKind::Delete),
            staged: None,
        }
    }

    pub fn dialog(&self) -> &ConfirmDialog {
        &self.dialog
    }

    pub fn staged(&self) -> Option<&Record> {
        self.staged.as_ref()
    }

    /// Stages `record` and opens the prompt. Replaces any earlier target.
    ///
    /// Ignored while a confirmed delete is still running.
    pub fn request(&mut self, record: Record) {
        if self.dialog.state() == DialogState::Submitting {
            log::debug!("delete of role {} ignored; another delete is running", record.id);
            return;
        }
        log::debug!("delete of role {} awaiting confirmation", record.id);
        self.staged = Some(record);
        self.dialog.open();
    }

    /// Applies the answer without touching the network.
    ///
    /// On affirm the prompt moves to `Submitting` and the id to delete is
    /// returned; call [`settle`](DeleteFlow::settle) with the request's
    /// result once it completes.
    pub fn answer(&mut self, answer: Answer) -> DeleteStep<RecordId> {
        let Some(target) = self.staged.as_ref().map(|r| r.id) else {
            return DeleteStep::Settled(DeleteOutcome::Idle);
        };
        if self.dialog.answer(answer) {
            return DeleteStep::Pending(target);
        }
        if self.dialog.state() == DialogState::Submitting {
            return DeleteStep::Settled(DeleteOutcome::Idle);
        }
        self.staged = None;
        if answer.is_affirm() {
            DeleteStep::Settled(DeleteOutcome::Idle)
        } else {
            log::debug!("delete of role {} declined", target);
            DeleteStep::Settled(DeleteOutcome::Declined)
        }
    }

    /// Closes the prompt once the confirmed delete has settled.
    pub fn settle(&mut self, result: Result<(), Error>) -> DeleteOutcome {
        if self.dialog.state() != DialogState::Submitting {
            return DeleteOutcome::Idle;
        }
        self.dialog.settle();
        self.staged = None;
        match result {
            Ok(()) => DeleteOutcome::Deleted,
            Err(e) => DeleteOutcome::Failed(e),
        }
    }

    /// Applies the answer and, if confirmed, runs the delete to completion.
    pub async fn respond(&mut self, answer: Answer, coordinator: &MutationCoordinator) -> DeleteOutcome {
        match self.answer(answer) {
            DeleteStep::Settled(outcome) => outcome,
            DeleteStep::Pending(id) => {
                let result = coordinator.delete(id).await;
                self.settle(result)
            }
        }
    }

    /// Closes the prompt and discards the staged record.
    ///
    /// Ignored while a confirmed delete is still running.
    pub fn dismiss(&mut self) {
        if self.dialog.state() == DialogState::Submitting {
            return;
        }
        self.dialog.dismiss();
        self.staged = None;
    }
}
