use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Component, Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::local::should_ignore;
use crate::kernel::services::bus::WorkbenchBusSender;
use crate::kernel::services::ports::file::FileProvider;
use crate::kernel::Action;

const WATCHER_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Watches a workspace root and pushes a fresh provider snapshot over
/// the bus whenever the tree settles after a change. Snapshots are
/// wholesale (`Action::SetFiles`); the store reconciles open documents.
pub struct SnapshotWatcher {
    watcher: Option<RecommendedWatcher>,
    thread: Option<thread::JoinHandle<()>>,
}

impl SnapshotWatcher {
    /// Starts watching `root`. An initial snapshot is pushed before any
    /// filesystem event arrives so consumers start from a full table.
    pub fn spawn(
        root: &Path,
        provider: Arc<dyn FileProvider>,
        bus: WorkbenchBusSender,
        debounce: Duration,
    ) -> Result<Self, notify::Error> {
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());

        let (tx, rx) = mpsc::channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<notify::Event, notify::Error>| {
                let Ok(event) = res else { return };
                let _ = tx.send(event);
            },
            Config::default().with_poll_interval(WATCHER_POLL_INTERVAL),
        )?;
        watcher.watch(&root, RecursiveMode::Recursive)?;

        push_snapshot(&root, provider.as_ref(), &bus);

        let thread = thread::spawn({
            let root = root.clone();
            move || watch_loop(root, provider, bus, rx, debounce)
        });

        Ok(Self {
            watcher: Some(watcher),
            thread: Some(thread),
        })
    }
}

impl Drop for SnapshotWatcher {
    fn drop(&mut self) {
        // Dropping the watcher closes the event channel, which stops the
        // drain thread.
        self.watcher.take();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn watch_loop(
    root: PathBuf,
    provider: Arc<dyn FileProvider>,
    bus: WorkbenchBusSender,
    rx: Receiver<notify::Event>,
    debounce: Duration,
) {
    while let Ok(event) = rx.recv() {
        let mut relevant = is_relevant(&event, &root);

        // Absorb the burst until the tree goes quiet.
        loop {
            match rx.recv_timeout(debounce) {
                Ok(event) => relevant |= is_relevant(&event, &root),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }

        if relevant && !push_snapshot(&root, provider.as_ref(), &bus) {
            return;
        }
    }
}

/// Returns whether the snapshot was delivered (false once the bus
/// receiver is gone). A failed rebuild is logged and skipped; the next
/// event retries.
fn push_snapshot(root: &Path, provider: &dyn FileProvider, bus: &WorkbenchBusSender) -> bool {
    match provider.snapshot(root) {
        Ok(files) => bus.send_action(Action::SetFiles { files }).is_ok(),
        Err(e) => {
            tracing::warn!(root = %root.display(), error = %e, "snapshot rebuild failed");
            true
        }
    }
}

fn is_relevant(event: &notify::Event, root: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Remove(_) | EventKind::Modify(_)
    ) && event
        .paths
        .iter()
        .any(|path| !contains_ignored_component(path, root))
}

fn contains_ignored_component(path: &Path, root: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().any(|component| {
        if let Component::Normal(name) = component {
            should_ignore(&name.to_string_lossy())
        } else {
            false
        }
    })
}
