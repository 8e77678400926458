#![forbid(unsafe_code)]

//! Post card with a gated optimistic delete.
//!
//! Each card runs its own [`UpdateCoordinator`], so `is_deleting` and the
//! delete outcome are per card. The delete flow mirrors the feed UI: the
//! delete button opens a confirmation modal, confirming hides the card
//! optimistically and calls the store, and a failed call brings the card
//! back. Toasts report the outcome; an offline rejection shows nothing and
//! leaves the card in place.
//!
//! # Invariants
//!
//! - The confirmation modal closes after the delete settles or is
//!   rejected, never before.
//! - The delete trigger is inert while a delete is in flight or the card
//!   is hidden.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ffeed_core::{DeleteReceipt, PostId, PostWithAuthor, Toast, ToastQueue};
use ffeed_runtime::{UpdateCallbacks, UpdateCmd, UpdateCoordinator, UpdateError, UpdateState};
use ffeed_store::PostStore;

use crate::input::Key;
use crate::modal::{ConfirmationModal, ModalAction, ModalPrompt};

/// Toast shown after a committed delete.
pub const DELETE_SUCCESS_TOAST: &str = "Post deleted successfully";

/// Toast shown after a rolled-back delete.
pub const DELETE_FAILURE_TOAST: &str = "Failed to delete post. Please try again.";

/// Author line fallback when the author has no recorded name.
pub const UNKNOWN_AUTHOR: &str = "Unknown user";

const MODAL_TITLE: &str = "Delete Post";
const MODAL_CONFIRM: &str = "Delete Post";
const MODAL_CANCEL: &str = "Cancel";

/// One post in the feed, with its delete flow.
pub struct PostCard {
    post: PostWithAuthor,
    hidden: Arc<AtomicBool>,
    modal: ConfirmationModal,
    update: UpdateCoordinator,
    store: Arc<dyn PostStore>,
    toasts: ToastQueue,
}

impl PostCard {
    #[must_use]
    pub fn new(
        post: PostWithAuthor,
        store: Arc<dyn PostStore>,
        update: UpdateCoordinator,
        toasts: ToastQueue,
    ) -> Self {
        Self {
            post,
            hidden: Arc::new(AtomicBool::new(false)),
            modal: ConfirmationModal::new(),
            update,
            store,
            toasts,
        }
    }

    #[must_use]
    pub fn id(&self) -> PostId {
        self.post.id()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.post.post.title
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.post.post.body
    }

    /// The author line. A missing name reads as [`UNKNOWN_AUTHOR`]; a blank
    /// one is shown as recorded.
    #[must_use]
    pub fn author_label(&self) -> &str {
        self.post.author.name.as_deref().unwrap_or(UNKNOWN_AUTHOR)
    }

    /// Whether the card is optimistically removed from view.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn is_deleting(&self) -> bool {
        self.update.state().is_optimistic
    }

    #[must_use]
    pub fn delete_disabled(&self) -> bool {
        self.is_deleting()
    }

    #[must_use]
    pub fn delete_label(&self) -> &'static str {
        if self.is_deleting() { "Deleting..." } else { "Delete" }
    }

    /// Snapshot of the delete coordinator.
    #[must_use]
    pub fn delete_state(&self) -> UpdateState {
        self.update.state()
    }

    #[must_use]
    pub fn modal(&self) -> &ConfirmationModal {
        &self.modal
    }

    /// The delete button: opens the confirmation modal.
    ///
    /// Returns `false` while the trigger is inert.
    pub fn request_delete(&mut self) -> bool {
        if self.is_hidden() || self.delete_disabled() {
            return false;
        }
        let message = format!(
            "Are you sure you want to delete \"{}\"? This action cannot be undone.",
            self.title()
        );
        self.modal.open(
            ModalPrompt::new(MODAL_TITLE, message)
                .with_confirm_label(MODAL_CONFIRM)
                .with_cancel_label(MODAL_CANCEL)
                .danger(),
        );
        true
    }

    /// The modal's cancel button.
    pub fn cancel_delete(&mut self) {
        self.modal.close();
    }

    /// Forwards a key press to the open modal.
    pub fn handle_key(&mut self, key: Key) -> ModalAction {
        self.modal.handle_key(key)
    }

    /// Runs the confirmed delete: hide the card, call the store, and bring
    /// the card back if the call fails.
    ///
    /// Callers route [`ModalAction::Confirmed`] here. The modal closes once
    /// the outcome is known, whatever it is.
    pub async fn confirm_delete(&mut self) -> Result<DeleteReceipt, UpdateError> {
        let id = self.id();
        let hide = Arc::clone(&self.hidden);
        let unhide = Arc::clone(&self.hidden);
        let store = Arc::clone(&self.store);
        let cmd = UpdateCmd::new(
            move || hide.store(true, Ordering::Relaxed),
            async move { store.delete_post(id).await.map_err(Into::into) },
            move || unhide.store(false, Ordering::Relaxed),
        );

        let success_toasts = self.toasts.clone();
        let failure_toasts = self.toasts.clone();
        let callbacks = UpdateCallbacks::new()
            .with_success(move |_receipt: &DeleteReceipt| {
                success_toasts.push(Toast::success(DELETE_SUCCESS_TOAST));
            })
            .with_error(move |error: &UpdateError| {
                tracing::error!(message = "card.delete_failed", error = %error);
                failure_toasts.push(Toast::error(DELETE_FAILURE_TOAST));
            });

        let settled = self.update.execute(cmd, callbacks).await;
        // The dialog goes away however the delete ended, rejection included.
        self.modal.close();
        settled
    }
}

impl fmt::Debug for PostCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostCard")
            .field("post", &self.post.id())
            .field("hidden", &self.is_hidden())
            .field("modal_open", &self.modal.is_open())
            .finish_non_exhaustive()
    }
}
