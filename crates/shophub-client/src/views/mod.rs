//! Per-screen state containers.
//!
//! Each view owns its own state and is driven by explicit calls: `load()`
//! when the screen becomes active, then one method per user event.

mod admin;
mod catalog;
mod detail;
mod load_state;
mod login;

pub use admin::{AdminView, DeleteOutcome, SubmitOutcome};
pub use catalog::{CatalogView, FetchTicket};
pub use detail::ProductDetailView;
pub use load_state::{LoadState, Status};
pub use login::{LoginOutcome, LoginView};

/// Characters of the title shown in toasts.
pub const TOAST_TITLE_CHARS: usize = 30;
