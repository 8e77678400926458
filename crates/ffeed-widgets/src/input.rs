#![forbid(unsafe_code)]

//! Keyboard inputs the feed widgets respond to.
//!
//! Hosts translate their own event type into [`Key`] before calling a
//! widget's `handle_key`. Keys outside this set never reach the widgets.

/// A key press, reduced to the set the widgets care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Space,
    Escape,
    ArrowUp,
    ArrowDown,
}
