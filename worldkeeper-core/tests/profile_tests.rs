use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use worldkeeper_core::{CoreError, Profile, TrackedItem, NEVER_BACKED_UP, WORLD_MARKER};

fn make_world(root: &Path, name: &str) -> PathBuf {
    let world = root.join(name);
    fs::create_dir_all(&world).unwrap();
    fs::write(world.join(WORLD_MARKER), b"").unwrap();
    world
}

#[test]
fn new_items_start_never_backed_up() {
    let tmp = tempdir().unwrap();
    let world = make_world(tmp.path(), "Alpha");

    let mut profile = Profile::new_empty();
    let item = profile.add_item(&world, "Alpha").unwrap();
    assert_eq!(item.last_backup, NEVER_BACKED_UP);
    assert!(profile.is_dirty());
}

#[test]
fn duplicate_names_are_rejected() {
    let tmp = tempdir().unwrap();
    let first = make_world(tmp.path(), "one");
    let second = make_world(tmp.path(), "two");

    let mut profile = Profile::new_empty();
    profile.add_item(&first, "Alpha").unwrap();
    let err = profile.add_item(&second, "Alpha").unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert_eq!(profile.items().len(), 1);
}

#[test]
fn registration_requires_marker_file() {
    let tmp = tempdir().unwrap();
    let not_a_world = tmp.path().join("screenshots");
    fs::create_dir_all(&not_a_world).unwrap();

    let mut profile = Profile::new_empty();
    let err = profile.add_item(&not_a_world, "Alpha").unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert!(profile.items().is_empty());
    assert!(!profile.is_dirty());
}

#[test]
fn item_names_may_not_contain_colons() {
    let mut profile = Profile::new_empty();
    let err = profile
        .push_item(TrackedItem::new("/tmp/x", "bad:name"))
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
}

#[test]
fn source_paths_with_colons_are_rejected() {
    let tmp = tempdir().unwrap();
    // Legal directory name on Linux, but unrepresentable in the profile file.
    let world = make_world(tmp.path(), "my:world");

    let mut profile = Profile::new_empty();
    let err = profile.add_item(&world, "Alpha").unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert!(profile.items().is_empty());
    assert!(!profile.is_dirty());
}

#[test]
fn last_backup_descriptions_with_colons_are_rejected() {
    let mut profile = Profile::new_empty();
    let mut item = TrackedItem::new("/tmp/w", "Alpha");
    item.last_backup = "10:30:00".to_string();

    let err = profile.push_item(item).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert!(profile.items().is_empty());
}

#[test]
fn loaded_duplicate_names_keep_the_first_occurrence() {
    let profile = Profile::loaded(
        None,
        vec![
            TrackedItem::new("/tmp/a", "Alpha"),
            TrackedItem::new("/tmp/b", "Alpha"),
            TrackedItem::new("/tmp/c", "Beta"),
        ],
    );
    let names: Vec<&str> = profile.items().iter().map(|it| it.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Beta"]);
    assert_eq!(
        profile.item("Alpha").unwrap().source_path,
        Path::new("/tmp/a")
    );
}

#[test]
fn remove_unknown_item_is_not_found() {
    let mut profile = Profile::new_empty();
    let err = profile.remove_item("ghost").unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

#[test]
fn removal_keeps_other_items_in_order() {
    let tmp = tempdir().unwrap();
    let mut profile = Profile::new_empty();
    for name in ["a", "b", "c"] {
        let world = make_world(tmp.path(), name);
        profile.add_item(&world, name).unwrap();
    }
    profile.remove_item("b").unwrap();
    let names: Vec<&str> = profile.items().iter().map(|it| it.name.as_str()).collect();
    assert_eq!(names, ["a", "c"]);
}

#[test]
fn loaded_profile_with_missing_output_dir_is_new() {
    let gone = PathBuf::from("/definitely/not/a/real/output/dir");
    let profile = Profile::loaded(Some(gone), vec![TrackedItem::new("/tmp/x", "Alpha")]);
    assert!(profile.is_new());
    // The loaded data is kept; only the output dir must be re-resolved.
    assert_eq!(profile.items().len(), 1);
}

#[test]
fn loaded_profile_with_existing_output_dir_is_not_new() {
    let tmp = tempdir().unwrap();
    let profile = Profile::loaded(Some(tmp.path().to_path_buf()), Vec::new());
    assert!(!profile.is_new());
}

#[test]
fn set_output_dir_requires_existing_directory() {
    let mut profile = Profile::new_empty();
    let err = profile
        .set_output_dir("/definitely/not/a/real/output/dir")
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert!(profile.is_new());

    let tmp = tempdir().unwrap();
    profile.set_output_dir(tmp.path()).unwrap();
    assert!(!profile.is_new());
    assert_eq!(profile.output_dir(), Some(tmp.path()));
}
