//! workbench - headless document/state engine for a code workbench.
//!
//! Module structure:
//! - kernel: headless core (Store, Action, Effect, substates)
//! - kernel::services: ports (contracts) and adapters (IO/async)
//! - app: the Workbench facade consumed by UI surfaces
//! - logging: tracing initialization

pub mod app;
pub mod kernel;
pub mod logging;
