use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

use super::dirty::DirtyStatus;
use super::files::File;
use super::{Action, Effect, WorkbenchState};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

pub struct Store {
    state: WorkbenchState,
}

impl Store {
    pub fn new(state: WorkbenchState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &WorkbenchState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::SetFiles { files } => self.apply_set_files(files),
            Action::SelectFile { path } => self.apply_select(path),
            Action::EditCurrent { content } => {
                let Some(path) = self.current_path() else {
                    return DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                };
                let state_changed = self.state.documents.set_content(&path, &content);
                if state_changed {
                    self.recompute_dirty(&path);
                }
                DispatchResult {
                    effects: Vec::new(),
                    state_changed,
                }
            }
            Action::ScrollCurrent { position } => {
                let Some(path) = self.current_path() else {
                    return DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                };
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: self.state.documents.set_scroll(&path, position),
                }
            }
            Action::SetVisible { visible } => {
                let prev = self.state.ui.visible;
                self.state.ui.visible = visible;
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: prev != visible,
                }
            }
            Action::SaveStarted { path } => DispatchResult {
                effects: Vec::new(),
                // The dirty status is deliberately left alone: the path
                // stays unsaved until the write commits.
                state_changed: self.state.documents.set_loading(&path, true),
            },
            Action::SaveCompleted { path, content } => {
                let mut state_changed = self.state.files.commit(&path, content);
                state_changed |= self.state.documents.set_loading(&path, false);
                state_changed |= self.recompute_dirty(&path);
                DispatchResult {
                    effects: Vec::new(),
                    state_changed,
                }
            }
            Action::SaveFailed { path } => DispatchResult {
                effects: Vec::new(),
                state_changed: self.state.documents.set_loading(&path, false),
            },
            Action::ResetDocument { path } => {
                let Some(baseline) = self.state.files.baseline(&path).map(str::to_string) else {
                    return DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                };
                let mut state_changed = self.state.documents.overwrite_content(&path, &baseline);
                state_changed |= self.recompute_dirty(&path);
                DispatchResult {
                    effects: Vec::new(),
                    state_changed,
                }
            }
            Action::FileLoaded { path, content } => {
                let mut state_changed = self.state.files.fill_content(&path, &content);
                state_changed |= self.state.documents.apply_loaded(&path, &content);
                state_changed |= self.recompute_dirty(&path);
                DispatchResult {
                    effects: Vec::new(),
                    state_changed,
                }
            }
            Action::FileLoadFailed { path } => DispatchResult {
                effects: Vec::new(),
                state_changed: self.state.documents.set_loading(&path, false),
            },
        }
    }

    fn apply_set_files(&mut self, files: FxHashMap<PathBuf, File>) -> DispatchResult {
        let mut state_changed = self.state.files.replace_all(files);
        let open: Vec<PathBuf> = self.state.documents.paths().cloned().collect();
        for path in open {
            state_changed |= self.reconcile_document(&path);
        }
        DispatchResult {
            effects: Vec::new(),
            state_changed,
        }
    }

    fn apply_select(&mut self, path: Option<PathBuf>) -> DispatchResult {
        let Some(path) = path else {
            return DispatchResult {
                effects: Vec::new(),
                state_changed: self.state.selection.set(None),
            };
        };

        if self.state.selection.current() == Some(path.as_path()) {
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        }

        self.state.selection.set(Some(path.clone()));

        let mut effects = Vec::new();
        if let Some(file) = self.state.files.get(&path) {
            // Only first materialization may fetch: a reselect while a
            // save is in flight must not clobber live content with a
            // stale disk read.
            let created = !self.state.documents.contains(&path);
            let needs_fetch = created && self.state.documents.ensure(&path, file).loading;
            if created {
                self.recompute_dirty(&path);
            }
            if needs_fetch {
                effects.push(Effect::LoadFile(path));
            }
        } else if !self.state.documents.contains(&path) {
            // No file and no document: the selection moves, the current
            // document stays empty.
            tracing::debug!(path = %path.display(), "selected path has no backing file");
        }

        DispatchResult {
            effects,
            state_changed: true,
        }
    }

    /// Re-derives one open document after a wholesale baseline push:
    /// clean text documents follow the new baseline, dirty ones keep
    /// their live edits, dropped baselines become `Orphaned`.
    fn reconcile_document(&mut self, path: &Path) -> bool {
        let follow_baseline = match self.state.documents.get(path) {
            Some(doc)
                if !doc.is_binary
                    && !doc.loading
                    && self.state.dirty.status(path) == DirtyStatus::InSync =>
            {
                self.state
                    .files
                    .baseline(path)
                    .filter(|baseline| *baseline != doc.content)
                    .map(str::to_string)
            }
            _ => None,
        };

        let mut changed = false;
        if let Some(baseline) = follow_baseline {
            changed |= self.state.documents.overwrite_content(path, &baseline);
        }
        changed |= self.recompute_dirty(path);
        changed
    }

    fn recompute_dirty(&mut self, path: &Path) -> bool {
        self.state.dirty.recompute(
            path,
            self.state.files.get(path),
            self.state.documents.get(path),
        )
    }

    fn current_path(&self) -> Option<PathBuf> {
        self.state.selection.current().map(Path::to_path_buf)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
