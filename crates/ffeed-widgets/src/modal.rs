#![forbid(unsafe_code)]

//! Confirmation modal state.
//!
//! The modal is a plain state machine: closed, or open around a
//! [`ModalPrompt`]. Hosts render the prompt while it is open and feed
//! confirm, cancel, and key events back in; each event yields a
//! [`ModalAction`] telling the host what the user decided.
//!
//! # Invariants
//!
//! - A closed modal ignores every event.
//! - Confirm and dismiss both close the modal, so one open yields at most
//!   one [`ModalAction::Confirmed`] or [`ModalAction::Dismissed`].

use crate::input::Key;

const CONFIRM_LABEL: &str = "Confirm";
const CANCEL_LABEL: &str = "Cancel";

/// What an open modal asks the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalPrompt {
    title: String,
    message: String,
    confirm_label: String,
    cancel_label: String,
    danger: bool,
}

impl ModalPrompt {
    /// Prompt with the default button labels.
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: CONFIRM_LABEL.to_owned(),
            cancel_label: CANCEL_LABEL.to_owned(),
            danger: false,
        }
    }

    #[must_use]
    pub fn with_confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = label.into();
        self
    }

    #[must_use]
    pub fn with_cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = label.into();
        self
    }

    /// Marks the prompt as destructive so hosts can style it accordingly.
    #[must_use]
    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn confirm_label(&self) -> &str {
        &self.confirm_label
    }

    #[must_use]
    pub fn cancel_label(&self) -> &str {
        &self.cancel_label
    }

    #[must_use]
    pub fn is_danger(&self) -> bool {
        self.danger
    }
}

/// What the user decided, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// The event did not apply; nothing changed.
    Ignored,
    /// The user accepted the prompt.
    Confirmed,
    /// The user backed out.
    Dismissed,
}

/// Modal dialog that is either closed or open around one prompt.
#[derive(Debug, Default)]
pub struct ConfirmationModal {
    prompt: Option<ModalPrompt>,
}

impl ConfirmationModal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the modal, replacing any prompt already showing.
    pub fn open(&mut self, prompt: ModalPrompt) {
        self.prompt = Some(prompt);
    }

    /// Closes the modal without reporting a decision.
    pub fn close(&mut self) {
        self.prompt = None;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.prompt.is_some()
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&ModalPrompt> {
        self.prompt.as_ref()
    }

    /// The confirm button.
    pub fn confirm(&mut self) -> ModalAction {
        if self.prompt.take().is_some() {
            ModalAction::Confirmed
        } else {
            ModalAction::Ignored
        }
    }

    /// The cancel button or a click outside the dialog.
    pub fn dismiss(&mut self) -> ModalAction {
        if self.prompt.take().is_some() {
            ModalAction::Dismissed
        } else {
            ModalAction::Ignored
        }
    }

    /// Escape dismisses; every other key is ignored.
    pub fn handle_key(&mut self, key: Key) -> ModalAction {
        match key {
            Key::Escape => self.dismiss(),
            _ => ModalAction::Ignored,
        }
    }
}
