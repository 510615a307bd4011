use super::*;
use std::fs;
use tempfile::TempDir;

fn temp_store() -> (TempDir, CategoryStore) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = CategoryStore::new(StoreLayout::new(dir.path().join("config")));
    (dir, store)
}

#[test]
fn category_names_parse_case_insensitively() {
    assert_eq!("  Artists ".parse::<Category>().unwrap(), Category::Artists);
    assert_eq!("NEGATIVE".parse::<Category>().unwrap(), Category::Negative);
    let error = "colors".parse::<Category>().expect_err("unknown category");
    assert_eq!(error.to_string(), "unknown category 'colors'");
}

#[test]
fn layout_names_live_and_backup_files() {
    let layout = StoreLayout::new("config");
    assert_eq!(
        layout.live_path(Category::Genres),
        Path::new("config").join("genres.json")
    );
    assert_eq!(
        layout.backup_path(Category::Genres),
        Path::new("config").join("_backup").join("genres.bak.json")
    );
}

#[test]
fn load_missing_category_is_empty() {
    let (_dir, store) = temp_store();
    assert!(store.load(Category::Artists).unwrap().is_empty());
    assert!(!store.layout().category_dir().exists());
}

#[test]
fn save_writes_sorted_unique_pretty_json() {
    let (_dir, store) = temp_store();
    let outcome = store
        .save(Category::Genres, &["sci-fi", "fantasy", "sci-fi", "Noir"])
        .expect("save genres");
    assert_eq!(
        outcome,
        SaveOutcome {
            backed_up: false,
            entries: 3
        }
    );

    let contents = fs::read_to_string(store.layout().live_path(Category::Genres)).unwrap();
    assert_eq!(contents, "[\n  \"Noir\",\n  \"fantasy\",\n  \"sci-fi\"\n]");
    assert_eq!(
        store.load(Category::Genres).unwrap(),
        vec!["Noir", "fantasy", "sci-fi"]
    );
    assert!(store.layout().backup_dir().is_dir());
    assert!(!store.layout().backup_path(Category::Genres).exists());
}

#[test]
fn second_save_backs_up_previous_file_verbatim() {
    let (_dir, store) = temp_store();
    store.save(Category::Artists, &["b", "a"]).unwrap();
    let first = fs::read_to_string(store.layout().live_path(Category::Artists)).unwrap();

    let outcome = store.save(Category::Artists, &["c"]).unwrap();
    assert!(outcome.backed_up);

    let backup = fs::read_to_string(store.layout().backup_path(Category::Artists)).unwrap();
    assert_eq!(backup, first);
    assert_eq!(store.load(Category::Artists).unwrap(), vec!["c"]);
}

#[test]
fn restore_after_two_saves_brings_back_first_state() {
    let (_dir, store) = temp_store();
    store.save(Category::Rendering, &["oil painting"]).unwrap();
    store.save(Category::Rendering, &["watercolor"]).unwrap();

    assert_eq!(
        store.restore(Category::Rendering).unwrap(),
        RestoreOutcome::Restored
    );
    assert_eq!(store.load(Category::Rendering).unwrap(), vec!["oil painting"]);

    let backup = fs::read_to_string(store.layout().backup_path(Category::Rendering)).unwrap();
    let live = fs::read_to_string(store.layout().live_path(Category::Rendering)).unwrap();
    assert_eq!(backup, live);
}

#[test]
fn restore_right_after_first_save_is_no_backup() {
    let (_dir, store) = temp_store();
    store.save(Category::Descriptors, &["dark"]).unwrap();
    assert_eq!(
        store.restore(Category::Descriptors).unwrap(),
        RestoreOutcome::NoBackup
    );
    assert_eq!(store.load(Category::Descriptors).unwrap(), vec!["dark"]);
}

#[test]
fn restore_leaves_content_and_slot_unchanged_after_single_save_over_existing() {
    let (_dir, store) = temp_store();
    store.save(Category::Descriptors, &["dark"]).unwrap();
    store.save(Category::Descriptors, &["dark"]).unwrap();
    let slot_before = fs::read_to_string(store.layout().backup_path(Category::Descriptors)).unwrap();

    assert_eq!(
        store.restore(Category::Descriptors).unwrap(),
        RestoreOutcome::Restored
    );
    assert_eq!(store.load(Category::Descriptors).unwrap(), vec!["dark"]);
    let slot_after = fs::read_to_string(store.layout().backup_path(Category::Descriptors)).unwrap();
    assert_eq!(slot_before, slot_after);
}

#[test]
fn restore_without_any_save_creates_nothing() {
    let (_dir, store) = temp_store();
    assert_eq!(
        store.restore(Category::Negative).unwrap(),
        RestoreOutcome::NoBackup
    );
    assert!(!store.layout().live_path(Category::Negative).exists());
    assert!(!store.layout().category_dir().exists());
}

#[test]
fn malformed_file_surfaces_parse_error_with_path() {
    let (_dir, store) = temp_store();
    let path = store.layout().live_path(Category::Genres);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ not a list").unwrap();

    match store.load(Category::Genres) {
        Err(error @ StoreError::Parse { .. }) => {
            let message = error.to_string();
            assert!(message.contains(&path.display().to_string()));
            assert!(message.contains("line 1 column"), "cause missing: {message}");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn load_all_covers_every_category() {
    let (_dir, store) = temp_store();
    store.save(Category::Negative, &["blurry", "lowres"]).unwrap();

    let all = store.load_all().unwrap();
    assert_eq!(all.len(), Category::ALL.len());
    assert_eq!(all[&Category::Negative], vec!["blurry", "lowres"]);
    assert!(all[&Category::Artists].is_empty());
}

#[test]
fn save_into_a_file_path_reports_os_cause() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let blocker = dir.path().join("config");
    fs::write(&blocker, "not a directory").unwrap();
    let store = CategoryStore::new(StoreLayout::new(&blocker));

    let error = store.save(Category::Genres, &["a"]).expect_err("config dir is a file");
    assert!(matches!(error, StoreError::Io { .. }));
    let message = error.to_string();
    assert!(message.contains("_backup"));
    assert!(message.contains("os error"), "cause missing: {message}");
}
