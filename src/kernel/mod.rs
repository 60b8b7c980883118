//! Headless workbench core (state/action/effect).

pub mod action;
pub mod dirty;
pub mod documents;
pub mod effect;
pub mod files;
pub mod services;
pub mod state;
pub mod store;

pub use action::Action;
pub use dirty::{DirtyState, DirtyStatus};
pub use documents::{Document, DocumentCache, ScrollPosition};
pub use effect::Effect;
pub use files::{File, FileTable};
pub use state::{SelectionState, UiState, WorkbenchState};
pub use store::{DispatchResult, Store};
