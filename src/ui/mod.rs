//! UI module for handling user interactions and UI updates.
//!
//! Threading model: everything runs on the Slint event loop.
//! - `slint::spawn_local`: the gallery picker, which must run on the main thread
//! - `slint::Timer`: the once-per-second elapsed-time tick
//! - image decoding during refresh is spread over `rayon` inside the reconciler

pub mod handlers;
pub mod presenter;
mod state_helpers;

pub use handlers::setup_handlers;
pub use presenter::SlintPresenter;
pub use state_helpers::*;
