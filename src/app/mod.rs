//! Application layer: the composed workbench facade.

pub mod workbench;

pub use workbench::{ResetError, SaveError, Workbench, WorkbenchSnapshot};
