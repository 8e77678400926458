#![forbid(unsafe_code)]

//! FrankenFeed public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users.

pub mod prelude {
    pub use ffeed_core as core;
    pub use ffeed_runtime as runtime;
    pub use ffeed_store as store;
    pub use ffeed_widgets as widgets;
}
