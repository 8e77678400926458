#![forbid(unsafe_code)]

//! Author filter dropdown.
//!
//! Tracks the open flag and the focused option of a listbox over the known
//! authors. Focus indexes the author list only; `None` stands for the
//! leading "all authors" row. The widget holds no query: hosts read the
//! focused author and hand the selection to their feed controller, which
//! rewrites the query and reloads.
//!
//! # Invariants
//!
//! - Arrow keys wrap within the author list; on an open empty list, down
//!   lands on index zero and up lands on `None`.
//! - Escape, an outside click, and a selection all close the dropdown and
//!   clear the focus. The open-toggle keys leave the focus alone.

use ffeed_core::{User, UserId};

use crate::input::Key;

/// Trigger label when no author filter is active.
pub const ALL_AUTHORS: &str = "All authors";

/// Option label for authors without a name on record.
pub const UNNAMED_USER: &str = "Unnamed user";

/// Dropdown state for filtering the feed by author.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorFilter {
    open: bool,
    focus: Option<usize>,
}

impl AuthorFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Focused position in the author list, if any.
    #[must_use]
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// The trigger button; toggles without touching the focus.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// An outside click: close and clear the focus.
    pub fn close(&mut self) {
        self.open = false;
        self.focus = None;
    }

    /// Applies one key press given the current author count.
    ///
    /// Returns whether the widget state changed.
    pub fn handle_key(&mut self, key: Key, user_count: usize) -> bool {
        let before = (self.open, self.focus);
        match key {
            Key::Enter | Key::Space => self.toggle(),
            Key::Escape => {
                self.open = false;
                self.focus = None;
            }
            Key::ArrowDown => {
                if self.open {
                    self.focus = Some(match self.focus {
                        Some(index) if index + 1 < user_count => index + 1,
                        _ => 0,
                    });
                } else {
                    self.open = true;
                    self.focus = Some(0);
                }
            }
            Key::ArrowUp => {
                if self.open {
                    self.focus = match self.focus {
                        Some(index) if index > 0 => Some(index - 1),
                        _ => user_count.checked_sub(1),
                    };
                } else {
                    self.open = true;
                    self.focus = user_count.checked_sub(1);
                }
            }
        }
        (self.open, self.focus) != before
    }

    /// The author under the keyboard focus, when the list is open.
    #[must_use]
    pub fn focused_user<'a>(&self, users: &'a [User]) -> Option<&'a User> {
        if !self.open {
            return None;
        }
        self.focus.and_then(|index| users.get(index))
    }

    /// Label for the trigger button.
    ///
    /// A selected author shows under their recorded name, even when that
    /// name is blank; only an absent selection falls back to
    /// [`ALL_AUTHORS`].
    #[must_use]
    pub fn trigger_label<'a>(users: &'a [User], selected: Option<UserId>) -> &'a str {
        match selected.and_then(|id| users.iter().find(|user| user.id == id)) {
            Some(user) => user.name.as_deref().unwrap_or_default(),
            None => ALL_AUTHORS,
        }
    }

    /// Label for one author row; blank and missing names both read as
    /// [`UNNAMED_USER`].
    #[must_use]
    pub fn option_label(user: &User) -> &str {
        user.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNNAMED_USER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Vec<User> {
        vec![
            User::new(1, "Leanne Graham"),
            User::new(2, "Ervin Howell"),
            User::new(3, "Clementine Bauch"),
        ]
    }

    #[test]
    fn enter_toggles_without_resetting_focus() {
        let mut filter = AuthorFilter::new();
        assert!(filter.handle_key(Key::ArrowDown, 3));
        assert!(filter.handle_key(Key::ArrowDown, 3));
        assert_eq!(filter.focus(), Some(1));

        assert!(filter.handle_key(Key::Enter, 3));
        assert!(!filter.is_open());
        assert_eq!(filter.focus(), Some(1));

        assert!(filter.handle_key(Key::Space, 3));
        assert!(filter.is_open());
        assert_eq!(filter.focus(), Some(1));
    }

    #[test]
    fn arrow_down_opens_on_the_first_author() {
        let mut filter = AuthorFilter::new();
        assert!(filter.handle_key(Key::ArrowDown, 3));
        assert!(filter.is_open());
        assert_eq!(filter.focus(), Some(0));
    }

    #[test]
    fn arrow_down_wraps_to_the_top() {
        let mut filter = AuthorFilter::new();
        filter.handle_key(Key::ArrowDown, 3);
        filter.handle_key(Key::ArrowDown, 3);
        filter.handle_key(Key::ArrowDown, 3);
        assert_eq!(filter.focus(), Some(2));
        filter.handle_key(Key::ArrowDown, 3);
        assert_eq!(filter.focus(), Some(0));
    }

    #[test]
    fn arrow_up_opens_on_the_last_author() {
        let mut filter = AuthorFilter::new();
        assert!(filter.handle_key(Key::ArrowUp, 3));
        assert!(filter.is_open());
        assert_eq!(filter.focus(), Some(2));
    }

    #[test]
    fn arrow_up_wraps_to_the_bottom() {
        let mut filter = AuthorFilter::new();
        filter.handle_key(Key::ArrowUp, 3);
        filter.handle_key(Key::ArrowUp, 3);
        assert_eq!(filter.focus(), Some(1));
        filter.handle_key(Key::ArrowUp, 3);
        assert_eq!(filter.focus(), Some(0));
        filter.handle_key(Key::ArrowUp, 3);
        assert_eq!(filter.focus(), Some(2));
    }

    #[test]
    fn arrow_up_from_the_all_authors_row_jumps_to_the_last_author() {
        let mut filter = AuthorFilter::new();
        filter.toggle();
        assert_eq!(filter.focus(), None);
        filter.handle_key(Key::ArrowUp, 3);
        assert_eq!(filter.focus(), Some(2));
    }

    #[test]
    fn empty_list_keeps_the_upstream_quirks() {
        let mut filter = AuthorFilter::new();
        // Down opens focused on slot zero even with nothing to focus.
        filter.handle_key(Key::ArrowDown, 0);
        assert_eq!(filter.focus(), Some(0));
        // Up from that slot falls back off the list.
        filter.handle_key(Key::ArrowUp, 0);
        assert_eq!(filter.focus(), None);

        filter.close();
        filter.handle_key(Key::ArrowUp, 0);
        assert!(filter.is_open());
        assert_eq!(filter.focus(), None);
    }

    #[test]
    fn escape_closes_and_clears_focus() {
        let mut filter = AuthorFilter::new();
        filter.handle_key(Key::ArrowDown, 3);
        assert!(filter.handle_key(Key::Escape, 3));
        assert!(!filter.is_open());
        assert_eq!(filter.focus(), None);
        // Nothing left to change.
        assert!(!filter.handle_key(Key::Escape, 3));
    }

    #[test]
    fn outside_click_resets_focus() {
        let mut filter = AuthorFilter::new();
        filter.handle_key(Key::ArrowDown, 3);
        filter.close();
        assert!(!filter.is_open());
        assert_eq!(filter.focus(), None);
    }

    #[test]
    fn focused_user_only_reports_while_open() {
        let users = users();
        let mut filter = AuthorFilter::new();
        filter.handle_key(Key::ArrowDown, users.len());
        assert_eq!(
            filter.focused_user(&users).map(|user| user.id),
            Some(UserId(1))
        );
        filter.handle_key(Key::Enter, users.len());
        assert_eq!(filter.focused_user(&users), None);
    }

    #[test]
    fn trigger_label_tracks_the_selection() {
        let mut users = users();
        users.push(User::unnamed(4));
        assert_eq!(AuthorFilter::trigger_label(&users, None), ALL_AUTHORS);
        assert_eq!(
            AuthorFilter::trigger_label(&users, Some(UserId(2))),
            "Ervin Howell"
        );
        // A selection pointing at nobody reads as unfiltered.
        assert_eq!(
            AuthorFilter::trigger_label(&users, Some(UserId(99))),
            ALL_AUTHORS
        );
        // The trigger shows the recorded name verbatim, blank included.
        assert_eq!(AuthorFilter::trigger_label(&users, Some(UserId(4))), "");
    }

    #[test]
    fn option_label_falls_back_for_blank_names() {
        assert_eq!(
            AuthorFilter::option_label(&User::new(1, "Leanne Graham")),
            "Leanne Graham"
        );
        assert_eq!(AuthorFilter::option_label(&User::new(2, "")), UNNAMED_USER);
        assert_eq!(AuthorFilter::option_label(&User::unnamed(3)), UNNAMED_USER);
    }
}
