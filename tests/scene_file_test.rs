//! Scene files on disk.

mod common;

use std::fs;

use tempfile::TempDir;

use groupnode::infrastructure::scene_file::{load_scene, save_scene};
use groupnode::infrastructure::InfraError;
use groupnode::convert_collections_to_empties;

use common::{load_fixture, parent_name, scene_fixture};

#[test]
fn given_converted_scene_when_saved_and_loaded_then_hierarchy_survives() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("out.toml");
    let mut scene = load_fixture("building.toml");
    convert_collections_to_empties(&mut scene);

    save_scene(&scene, &path).expect("save");
    let loaded = load_scene(&path, "ignored").expect("load");

    assert_eq!(loaded.container(loaded.root()).unwrap().name, "Scene Collection");
    assert_eq!(parent_name(&loaded, "Tile").as_deref(), Some("Roof"));
    assert_eq!(parent_name(&loaded, "Roof").as_deref(), Some("Building"));
    assert_eq!(loaded.containers().len(), 1);

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("display_type = \"PLAIN_AXES\""), "{text}");
}

#[test]
fn given_existing_file_when_saving_then_replaced_without_leftovers() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("scene.toml");
    fs::copy(scene_fixture("building.toml"), &path).unwrap();
    let mut scene = load_scene(&path, "Scene Collection").unwrap();
    convert_collections_to_empties(&mut scene);

    save_scene(&scene, &path).unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "temp file must be persisted over the target");
    let reloaded = load_scene(&path, "Scene Collection").unwrap();
    assert!(reloaded.find_container("Building").is_none());
}

#[test]
fn given_missing_file_when_loading_then_io_error() {
    let temp = TempDir::new().unwrap();

    let err = load_scene(&temp.path().join("nope.toml"), "Scene Collection").unwrap_err();

    assert!(matches!(err, InfraError::Io { .. }), "{err:?}");
}

#[test]
fn given_malformed_file_when_loading_then_scene_format_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.toml");
    fs::write(&path, "[[objects]]\nname = \"Door\"\nkind = \"lamp\"\n").unwrap();

    let err = load_scene(&path, "Scene Collection").unwrap_err();

    match err {
        InfraError::SceneFormat { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_collection_cycle_when_loading_then_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cycle.toml");
    fs::write(
        &path,
        r#"
[[collections]]
name = "A"
children = ["B"]

[[collections]]
name = "B"
children = ["A"]
"#,
    )
    .unwrap();

    let err = load_scene(&path, "Scene Collection").unwrap_err();

    assert!(matches!(err, InfraError::SceneFormat { .. }), "{err:?}");
}
