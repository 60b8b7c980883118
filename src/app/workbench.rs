//! The workbench facade: the single reactive surface UI code touches.
//!
//! Composes the store, the filesystem provider, the executor and the
//! action bus. Reads are captured under one store lock, so a consumer
//! holding a `WorkbenchSnapshot` never sees the file table, document
//! cache and unsaved set out of step with each other.

use rustc_hash::FxHashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

use crate::kernel::services::bus::{
    workbench_bus, WorkbenchBusReceiver, WorkbenchBusSender, WorkbenchMessage,
};
use crate::kernel::services::ports::file::{FileError, FileProvider};
use crate::kernel::services::ports::AsyncExecutor;
use crate::kernel::{
    Action, DirtyStatus, Document, Effect, File, ScrollPosition, Store, WorkbenchState,
};

#[derive(Debug)]
pub enum SaveError {
    /// No backing file exists for the path (never pushed, or deleted
    /// upstream while the document was open).
    NoBaseline(PathBuf),
    Write(FileError),
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::NoBaseline(p) => write!(f, "no baseline for {}", p.display()),
            SaveError::Write(e) => write!(f, "write failed: {}", e),
        }
    }
}

impl std::error::Error for SaveError {}

#[derive(Debug)]
pub enum ResetError {
    NoBaseline(PathBuf),
}

impl std::fmt::Display for ResetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetError::NoBaseline(p) => write!(f, "no baseline for {}", p.display()),
        }
    }
}

impl std::error::Error for ResetError {}

/// A fully consistent view of the workbench at one revision.
#[derive(Debug, Clone)]
pub struct WorkbenchSnapshot {
    pub revision: u64,
    pub visible: bool,
    pub selected_file: Option<PathBuf>,
    pub current_document: Option<Document>,
    pub unsaved_files: Vec<PathBuf>,
}

struct Shared {
    store: Mutex<Store>,
    provider: Arc<dyn FileProvider>,
    executor: Arc<dyn AsyncExecutor>,
    revision: watch::Sender<u64>,
    io_locks: Mutex<FxHashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>,
}

#[derive(Clone)]
pub struct Workbench {
    shared: Arc<Shared>,
    bus: WorkbenchBusSender,
}

impl Workbench {
    pub fn new(provider: Arc<dyn FileProvider>, executor: Arc<dyn AsyncExecutor>) -> Self {
        let (bus, rx) = workbench_bus();
        let (revision, _) = watch::channel(0);
        let shared = Arc::new(Shared {
            store: Mutex::new(Store::new(WorkbenchState::new())),
            provider,
            executor,
            revision,
            io_locks: Mutex::new(FxHashMap::default()),
        });

        let workbench = Self { shared, bus };
        workbench.spawn_bus_pump(rx);
        workbench
    }

    /// Sender half of the action bus, for adapters that push state (the
    /// snapshot watcher). Bus actions go through the same dispatch path
    /// as direct commands.
    pub fn bus(&self) -> WorkbenchBusSender {
        self.bus.clone()
    }

    /// Revision channel. A bumped revision means "take a fresh
    /// snapshot"; the snapshot itself is the consistency unit.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.revision.subscribe()
    }

    pub fn snapshot(&self) -> WorkbenchSnapshot {
        let store = lock_store(&self.shared);
        let state = store.state();
        let mut unsaved: Vec<PathBuf> = state.unsaved_files().iter().cloned().collect();
        unsaved.sort_unstable();
        WorkbenchSnapshot {
            revision: *self.shared.revision.borrow(),
            visible: state.ui.visible,
            selected_file: state.selection.current().map(Path::to_path_buf),
            current_document: state.current_document().cloned(),
            unsaved_files: unsaved,
        }
    }

    pub fn current_document(&self) -> Option<Document> {
        lock_store(&self.shared).state().current_document().cloned()
    }

    pub fn selected_file(&self) -> Option<PathBuf> {
        lock_store(&self.shared)
            .state()
            .selection
            .current()
            .map(Path::to_path_buf)
    }

    pub fn unsaved_files(&self) -> Vec<PathBuf> {
        let mut unsaved: Vec<PathBuf> = lock_store(&self.shared)
            .state()
            .unsaved_files()
            .iter()
            .cloned()
            .collect();
        unsaved.sort_unstable();
        unsaved
    }

    pub fn dirty_status(&self, path: &Path) -> DirtyStatus {
        lock_store(&self.shared).state().dirty.status(path)
    }

    /// Read-through to the file table baseline mapping.
    pub fn files(&self) -> FxHashMap<PathBuf, File> {
        lock_store(&self.shared).state().files.snapshot()
    }

    pub fn is_visible(&self) -> bool {
        lock_store(&self.shared).state().ui.visible
    }

    /// Wholesale baseline push from the filesystem collaborator.
    pub fn set_documents(&self, files: FxHashMap<PathBuf, File>) {
        self.command(Action::SetFiles { files });
    }

    pub fn select_file(&self, path: Option<PathBuf>) {
        self.command(Action::SelectFile { path });
    }

    /// Silent no-op without a current document.
    pub fn edit_current_document(&self, content: impl Into<String>) {
        self.command(Action::EditCurrent {
            content: content.into(),
        });
    }

    /// Silent no-op without a current document.
    pub fn scroll_current_document(&self, position: ScrollPosition) {
        self.command(Action::ScrollCurrent { position });
    }

    pub fn set_visible(&self, visible: bool) {
        self.command(Action::SetVisible { visible });
    }

    /// Writes the current document through the provider and commits the
    /// new baseline. A failure leaves the file table and unsaved set
    /// exactly as before the call. Serializes with concurrent save or
    /// reset on the same path; other paths stay fully interactive. The
    /// commit is keyed by path, so it lands even if the selection moved
    /// away while the write was in flight.
    pub async fn save_current_document(&self) -> Result<(), SaveError> {
        let Some(path) = self.selected_file() else {
            return Ok(());
        };

        let lock = self.io_lock(&path);
        let _guard = lock.lock().await;

        let content = {
            let mut store = lock_store(&self.shared);
            let Some(doc) = store.state().documents.get(&path) else {
                return Ok(());
            };
            if doc.is_binary || doc.loading {
                return Ok(());
            }
            if !store.state().files.contains(&path) {
                return Err(SaveError::NoBaseline(path));
            }
            let content = doc.content.clone();
            dispatch_locked(
                &self.shared,
                &mut store,
                Action::SaveStarted { path: path.clone() },
            );
            content
        };

        let write = {
            let provider = Arc::clone(&self.shared.provider);
            let write_path = path.clone();
            let write_content = content.clone();
            tokio::task::spawn_blocking(move || provider.write_file(&write_path, &write_content))
                .await
        };

        match write {
            Ok(Ok(())) => {
                dispatch_action(&self.shared, Action::SaveCompleted { path, content });
                Ok(())
            }
            Ok(Err(e)) => {
                dispatch_action(&self.shared, Action::SaveFailed { path: path.clone() });
                tracing::warn!(path = %path.display(), error = %e, "save failed");
                Err(SaveError::Write(e))
            }
            Err(e) => {
                dispatch_action(&self.shared, Action::SaveFailed { path: path.clone() });
                Err(SaveError::Write(FileError::Io(io::Error::other(e))))
            }
        }
    }

    /// Restores the current document to its baseline and clears its
    /// dirtiness. Already-clean documents are a no-op, not an error.
    pub async fn reset_current_document(&self) -> Result<(), ResetError> {
        let Some(path) = self.selected_file() else {
            return Ok(());
        };

        let lock = self.io_lock(&path);
        let _guard = lock.lock().await;

        let mut store = lock_store(&self.shared);
        let Some(doc) = store.state().documents.get(&path) else {
            return Ok(());
        };
        if doc.is_binary {
            return Ok(());
        }
        if store.state().files.baseline(&path).is_none() {
            return Err(ResetError::NoBaseline(path));
        }
        dispatch_locked(&self.shared, &mut store, Action::ResetDocument { path });
        Ok(())
    }

    fn command(&self, action: Action) {
        let effects = dispatch_action(&self.shared, action);
        run_effects(&self.shared, effects);
    }

    fn io_lock(&self, path: &Path) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .shared
            .io_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(path.to_path_buf()).or_default())
    }

    fn spawn_bus_pump(&self, mut rx: WorkbenchBusReceiver) {
        let weak = Arc::downgrade(&self.shared);
        self.shared.executor.spawn(Box::pin(async move {
            while let Some(WorkbenchMessage::Action(action)) = rx.recv().await {
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                let effects = dispatch_action(&shared, action);
                run_effects(&shared, effects);
            }
        }));
    }
}

fn lock_store(shared: &Shared) -> MutexGuard<'_, Store> {
    shared.store.lock().unwrap_or_else(PoisonError::into_inner)
}

fn dispatch_locked(shared: &Shared, store: &mut Store, action: Action) -> Vec<Effect> {
    let result = store.dispatch(action);
    if result.state_changed {
        shared.revision.send_modify(|rev| *rev += 1);
    }
    result.effects
}

fn dispatch_action(shared: &Shared, action: Action) -> Vec<Effect> {
    let mut store = lock_store(shared);
    dispatch_locked(shared, &mut store, action)
}

fn run_effects(shared: &Arc<Shared>, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::LoadFile(path) => {
                let task_shared = Arc::clone(shared);
                shared.executor.spawn(Box::pin(async move {
                    let action = match task_shared.provider.read_file(&path) {
                        Ok(content) => Action::FileLoaded { path, content },
                        Err(e) => {
                            tracing::warn!(path = %path.display(), error = %e, "deferred load failed");
                            Action::FileLoadFailed { path }
                        }
                    };
                    let effects = dispatch_action(&task_shared, action);
                    run_effects(&task_shared, effects);
                }));
            }
        }
    }
}
