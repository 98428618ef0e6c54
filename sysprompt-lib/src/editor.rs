//! Add/edit form state.

use crate::error::Error;
use crate::model::Record;
use crate::model::RecordDraft;
use crate::model::RecordId;
use crate::mutation::Mutation;
use crate::mutation::MutationCoordinator;

/// Whether the form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(RecordId),
}

/// Form for adding or editing a record.
///
/// Submitting routes to create or update and closes the form only after
/// the request settles, whether it succeeded or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEditor {
    mode: EditorMode,
    pub draft: RecordDraft,
    open: bool,
    submitting: bool,
}

impl RecordEditor {
    /// A blank form for a new record.
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            draft: RecordDraft::default(),
            open: true,
            submitting: false,
        }
    }

    /// A form pre-filled from `record`.
    pub fn edit(record: &Record) -> Self {
        Self {
            mode: EditorMode::Edit(record.id),
            draft: RecordDraft::from(record),
            open: true,
            submitting: false,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "Add New System Prompt",
            EditorMode::Edit(_) => "Edit System Prompt",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "Submit",
            EditorMode::Edit(_) => "Update",
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    pub fn set_content_alt(&mut self, content_alt: impl Into<String>) {
        self.draft.content_alt = content_alt.into();
    }

    /// Marks the form as submitting and returns the write to run.
    ///
    /// Returns `None` if the form is closed or already submitting. Call
    /// [`settle`](RecordEditor::settle) once the write completes.
    pub fn begin_submit(&mut self) -> Option<Mutation> {
        if !self.open || self.submitting {
            return None;
        }
        self.submitting = true;
        let draft = self.draft.clone();
        Some(match self.mode {
            EditorMode::Create => Mutation::Create(draft),
            EditorMode::Edit(id) => Mutation::Update { id, draft },
        })
    }

    /// Closes the form after its write settled, whatever the result.
    pub fn settle(&mut self) {
        self.submitting = false;
        self.open = false;
    }

    /// Sends the draft, then closes.
    pub async fn submit(&mut self, coordinator: &MutationCoordinator) -> Result<(), Error> {
        let Some(mutation) = self.begin_submit() else {
            return Ok(());
        };
        let result = coordinator.apply(mutation).await;
        self.settle();
        result
    }

    /// Closes without sending anything. Ignored while submitting.
    pub fn cancel(&mut self) {
        if !self.submitting {
            self.open = false;
        }
    }
}
