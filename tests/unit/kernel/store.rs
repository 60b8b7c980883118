use super::*;
use crate::kernel::ScrollPosition;

fn table(entries: &[(&str, &str)]) -> FxHashMap<PathBuf, File> {
    entries
        .iter()
        .map(|(path, content)| (PathBuf::from(path), File::text(*content)))
        .collect()
}

fn new_store(entries: &[(&str, &str)]) -> Store {
    let mut store = Store::new(WorkbenchState::new());
    store.dispatch(Action::SetFiles {
        files: table(entries),
    });
    store
}

fn select(store: &mut Store, path: &str) -> DispatchResult {
    store.dispatch(Action::SelectFile {
        path: Some(PathBuf::from(path)),
    })
}

fn edit(store: &mut Store, content: &str) -> DispatchResult {
    store.dispatch(Action::EditCurrent {
        content: content.to_string(),
    })
}

#[test]
fn selecting_a_file_materializes_its_document_from_the_baseline() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);

    let result = select(&mut store, "/ws/a.txt");

    assert!(result.state_changed);
    assert!(result.effects.is_empty());
    let doc = store.state.current_document().unwrap();
    assert_eq!(doc.content, "hello");
    assert!(!doc.loading);
    assert!(store.state.unsaved_files().is_empty());
}

#[test]
fn selecting_the_selected_path_is_a_noop() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);
    select(&mut store, "/ws/a.txt");

    let result = select(&mut store, "/ws/a.txt");

    assert!(!result.state_changed);
    assert!(result.effects.is_empty());
}

#[test]
fn selecting_an_unknown_path_moves_selection_to_an_empty_document() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);

    let result = select(&mut store, "/ws/ghost.txt");

    assert!(result.state_changed);
    assert!(result.effects.is_empty());
    assert_eq!(
        store.state.selection.current(),
        Some(Path::new("/ws/ghost.txt"))
    );
    assert!(store.state.current_document().is_none());
    assert!(!store.state.documents.contains(Path::new("/ws/ghost.txt")));
}

#[test]
fn deselecting_clears_the_current_document_but_keeps_the_cache() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);
    select(&mut store, "/ws/a.txt");

    let result = store.dispatch(Action::SelectFile { path: None });

    assert!(result.state_changed);
    assert!(store.state.current_document().is_none());
    assert!(store.state.documents.contains(Path::new("/ws/a.txt")));
}

#[test]
fn editing_marks_the_path_dirty_and_reverting_the_content_clears_it() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);
    select(&mut store, "/ws/a.txt");

    assert!(edit(&mut store, "hello world").state_changed);
    assert!(store.state.unsaved_files().contains(Path::new("/ws/a.txt")));
    assert_eq!(
        store.state.dirty.status(Path::new("/ws/a.txt")),
        DirtyStatus::Modified
    );

    assert!(edit(&mut store, "hello").state_changed);
    assert!(store.state.unsaved_files().is_empty());
}

#[test]
fn edit_and_scroll_without_a_selection_are_noops() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);

    assert!(!edit(&mut store, "x").state_changed);
    assert!(!store
        .dispatch(Action::ScrollCurrent {
            position: ScrollPosition { line: 3, column: 1 },
        })
        .state_changed);
}

#[test]
fn edits_and_scroll_survive_switching_files_and_back() {
    let mut store = new_store(&[("/ws/a.txt", "alpha"), ("/ws/b.txt", "beta")]);

    select(&mut store, "/ws/a.txt");
    edit(&mut store, "alpha edited");
    store.dispatch(Action::ScrollCurrent {
        position: ScrollPosition { line: 5, column: 7 },
    });

    select(&mut store, "/ws/b.txt");
    assert_eq!(store.state.current_document().unwrap().content, "beta");

    select(&mut store, "/ws/a.txt");
    let doc = store.state.current_document().unwrap();
    assert_eq!(doc.content, "alpha edited");
    assert_eq!(doc.scroll, Some(ScrollPosition { line: 5, column: 7 }));
    assert!(store.state.unsaved_files().contains(Path::new("/ws/a.txt")));
}

#[test]
fn save_lifecycle_commits_the_baseline_and_clears_dirtiness() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);
    select(&mut store, "/ws/a.txt");
    edit(&mut store, "hello world");

    store.dispatch(Action::SaveStarted {
        path: PathBuf::from("/ws/a.txt"),
    });
    // In flight: the document suspends but stays unsaved.
    assert!(store.state.current_document().unwrap().loading);
    assert!(store.state.unsaved_files().contains(Path::new("/ws/a.txt")));
    assert!(!edit(&mut store, "blocked while saving").state_changed);

    store.dispatch(Action::SaveCompleted {
        path: PathBuf::from("/ws/a.txt"),
        content: "hello world".to_string(),
    });
    assert_eq!(
        store.state.files.baseline(Path::new("/ws/a.txt")),
        Some("hello world")
    );
    assert!(!store.state.current_document().unwrap().loading);
    assert!(store.state.unsaved_files().is_empty());
}

#[test]
fn failed_save_leaves_the_table_and_unsaved_set_untouched() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);
    select(&mut store, "/ws/a.txt");
    edit(&mut store, "hello world");

    store.dispatch(Action::SaveStarted {
        path: PathBuf::from("/ws/a.txt"),
    });
    store.dispatch(Action::SaveFailed {
        path: PathBuf::from("/ws/a.txt"),
    });

    assert_eq!(
        store.state.files.baseline(Path::new("/ws/a.txt")),
        Some("hello")
    );
    assert!(store.state.unsaved_files().contains(Path::new("/ws/a.txt")));
    assert_eq!(store.state.current_document().unwrap().content, "hello world");
    assert!(!store.state.current_document().unwrap().loading);
}

#[test]
fn save_completed_for_a_deselected_path_still_commits() {
    let mut store = new_store(&[("/ws/a.txt", "one"), ("/ws/b.txt", "two")]);
    select(&mut store, "/ws/a.txt");
    edit(&mut store, "one edited");
    store.dispatch(Action::SaveStarted {
        path: PathBuf::from("/ws/a.txt"),
    });

    select(&mut store, "/ws/b.txt");
    store.dispatch(Action::SaveCompleted {
        path: PathBuf::from("/ws/a.txt"),
        content: "one edited".to_string(),
    });

    assert_eq!(
        store.state.files.baseline(Path::new("/ws/a.txt")),
        Some("one edited")
    );
    assert!(store.state.unsaved_files().is_empty());
}

#[test]
fn reset_restores_the_baseline_and_clears_dirtiness() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);
    select(&mut store, "/ws/a.txt");
    edit(&mut store, "oops");

    let result = store.dispatch(Action::ResetDocument {
        path: PathBuf::from("/ws/a.txt"),
    });

    assert!(result.state_changed);
    assert_eq!(store.state.current_document().unwrap().content, "hello");
    assert!(store.state.unsaved_files().is_empty());
}

#[test]
fn reset_of_a_clean_document_is_a_noop() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);
    select(&mut store, "/ws/a.txt");

    let result = store.dispatch(Action::ResetDocument {
        path: PathBuf::from("/ws/a.txt"),
    });

    assert!(!result.state_changed);
}

#[test]
fn reset_without_a_baseline_changes_nothing() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);
    select(&mut store, "/ws/a.txt");
    edit(&mut store, "edited");
    store.dispatch(Action::SetFiles {
        files: FxHashMap::default(),
    });

    let result = store.dispatch(Action::ResetDocument {
        path: PathBuf::from("/ws/a.txt"),
    });

    assert!(!result.state_changed);
    assert_eq!(store.state.current_document().unwrap().content, "edited");
}

#[test]
fn save_then_reset_is_a_noop_chain() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);
    select(&mut store, "/ws/a.txt");
    edit(&mut store, "hello world");
    store.dispatch(Action::SaveStarted {
        path: PathBuf::from("/ws/a.txt"),
    });
    store.dispatch(Action::SaveCompleted {
        path: PathBuf::from("/ws/a.txt"),
        content: "hello world".to_string(),
    });

    let after_save = store.state.current_document().unwrap().clone();
    store.dispatch(Action::ResetDocument {
        path: PathBuf::from("/ws/a.txt"),
    });

    assert_eq!(store.state.current_document().unwrap(), &after_save);
    assert!(store.state.unsaved_files().is_empty());
}

#[test]
fn edit_save_edit_reset_matches_the_observable_contract() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);

    select(&mut store, "/ws/a.txt");
    assert_eq!(store.state.current_document().unwrap().content, "hello");
    assert!(store.state.unsaved_files().is_empty());

    edit(&mut store, "hello world");
    assert!(store.state.unsaved_files().contains(Path::new("/ws/a.txt")));

    store.dispatch(Action::SaveStarted {
        path: PathBuf::from("/ws/a.txt"),
    });
    store.dispatch(Action::SaveCompleted {
        path: PathBuf::from("/ws/a.txt"),
        content: "hello world".to_string(),
    });
    assert_eq!(
        store.state.files.baseline(Path::new("/ws/a.txt")),
        Some("hello world")
    );
    assert!(store.state.unsaved_files().is_empty());

    edit(&mut store, "oops");
    store.dispatch(Action::ResetDocument {
        path: PathBuf::from("/ws/a.txt"),
    });
    assert_eq!(
        store.state.current_document().unwrap().content,
        "hello world"
    );
    assert!(store.state.unsaved_files().is_empty());
}

#[test]
fn dropping_a_dirty_path_from_the_table_orphans_it() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);
    select(&mut store, "/ws/a.txt");
    edit(&mut store, "edited");

    store.dispatch(Action::SetFiles {
        files: FxHashMap::default(),
    });

    assert_eq!(
        store.state.dirty.status(Path::new("/ws/a.txt")),
        DirtyStatus::Orphaned
    );
    assert!(store.state.unsaved_files().contains(Path::new("/ws/a.txt")));
    assert_eq!(store.state.current_document().unwrap().content, "edited");
}

#[test]
fn a_reappearing_baseline_keeps_the_live_edit() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);
    select(&mut store, "/ws/a.txt");
    edit(&mut store, "edited");
    store.dispatch(Action::SetFiles {
        files: FxHashMap::default(),
    });

    store.dispatch(Action::SetFiles {
        files: table(&[("/ws/a.txt", "rewritten upstream")]),
    });

    assert_eq!(store.state.current_document().unwrap().content, "edited");
    assert_eq!(
        store.state.dirty.status(Path::new("/ws/a.txt")),
        DirtyStatus::Modified
    );

    // A push matching the live edit reconverges to clean.
    store.dispatch(Action::SetFiles {
        files: table(&[("/ws/a.txt", "edited")]),
    });
    assert!(store.state.unsaved_files().is_empty());
}

#[test]
fn external_baseline_changes_flow_into_clean_open_documents() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);
    select(&mut store, "/ws/a.txt");

    let result = store.dispatch(Action::SetFiles {
        files: table(&[("/ws/a.txt", "hello from outside")]),
    });

    assert!(result.state_changed);
    assert_eq!(
        store.state.current_document().unwrap().content,
        "hello from outside"
    );
    assert!(store.state.unsaved_files().is_empty());
}

#[test]
fn external_baseline_changes_never_clobber_dirty_documents() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);
    select(&mut store, "/ws/a.txt");
    edit(&mut store, "my edit");

    store.dispatch(Action::SetFiles {
        files: table(&[("/ws/a.txt", "theirs")]),
    });

    assert_eq!(store.state.current_document().unwrap().content, "my edit");
    assert_eq!(
        store.state.dirty.status(Path::new("/ws/a.txt")),
        DirtyStatus::Modified
    );
}

#[test]
fn selecting_a_deferred_file_requests_its_content() {
    let mut store = Store::new(WorkbenchState::new());
    let mut files = FxHashMap::default();
    files.insert(PathBuf::from("/ws/big.txt"), File::deferred());
    store.dispatch(Action::SetFiles { files });

    let result = select(&mut store, "/ws/big.txt");

    assert_eq!(
        result.effects,
        vec![Effect::LoadFile(PathBuf::from("/ws/big.txt"))]
    );
    let doc = store.state.current_document().unwrap();
    assert!(doc.loading);
    assert!(!edit(&mut store, "too early").state_changed);

    store.dispatch(Action::FileLoaded {
        path: PathBuf::from("/ws/big.txt"),
        content: "lazy content".to_string(),
    });
    let doc = store.state.current_document().unwrap();
    assert!(!doc.loading);
    assert_eq!(doc.content, "lazy content");
    assert_eq!(
        store.state.files.baseline(Path::new("/ws/big.txt")),
        Some("lazy content")
    );
    assert!(store.state.unsaved_files().is_empty());

    assert!(edit(&mut store, "now editable").state_changed);
}

#[test]
fn a_failed_deferred_load_clears_the_loading_flag() {
    let mut store = Store::new(WorkbenchState::new());
    let mut files = FxHashMap::default();
    files.insert(PathBuf::from("/ws/big.txt"), File::deferred());
    store.dispatch(Action::SetFiles { files });
    select(&mut store, "/ws/big.txt");

    let result = store.dispatch(Action::FileLoadFailed {
        path: PathBuf::from("/ws/big.txt"),
    });

    assert!(result.state_changed);
    assert!(!store.state.current_document().unwrap().loading);
    assert!(store.state.unsaved_files().is_empty());
}

#[test]
fn binary_documents_reject_edits_and_never_turn_dirty() {
    let mut store = Store::new(WorkbenchState::new());
    let mut files = FxHashMap::default();
    files.insert(PathBuf::from("/ws/logo.png"), File::binary());
    store.dispatch(Action::SetFiles { files });

    let result = select(&mut store, "/ws/logo.png");
    assert!(result.effects.is_empty());
    let doc = store.state.current_document().unwrap();
    assert!(doc.is_binary);
    assert!(!doc.loading);

    assert!(!edit(&mut store, "not text").state_changed);
    assert!(store.state.unsaved_files().is_empty());

    store.dispatch(Action::SetFiles {
        files: FxHashMap::default(),
    });
    assert!(store.state.unsaved_files().is_empty());
}

#[test]
fn visibility_toggles_and_reports_changes_only() {
    let mut store = Store::new(WorkbenchState::new());
    assert!(!store.state.ui.visible);

    assert!(store
        .dispatch(Action::SetVisible { visible: true })
        .state_changed);
    assert!(store.state.ui.visible);
    assert!(!store
        .dispatch(Action::SetVisible { visible: true })
        .state_changed);
}

#[test]
fn identical_snapshot_pushes_do_not_report_changes() {
    let mut store = new_store(&[("/ws/a.txt", "hello")]);
    select(&mut store, "/ws/a.txt");

    let result = store.dispatch(Action::SetFiles {
        files: table(&[("/ws/a.txt", "hello")]),
    });

    assert!(!result.state_changed);
}
