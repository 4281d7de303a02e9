#![allow(dead_code)]

use std::path::PathBuf;

use groupnode::domain::{ObjectKind, Scene};
use groupnode::infrastructure::scene_file::load_scene;

pub fn scene_fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources/scenes")
        .join(name)
}

pub fn load_fixture(name: &str) -> Scene {
    load_scene(&scene_fixture(name), "Scene Collection").expect("load fixture")
}

/// Building collection holding Door and the Roof collection, Roof holding Tile.
pub fn building_scene() -> Scene {
    let mut scene = Scene::default();
    let building = scene.new_container("Building");
    let roof = scene.new_container("Roof");
    scene.link_container(scene.root(), building).unwrap();
    scene.link_container(building, roof).unwrap();
    let door = scene.add_object("Door", ObjectKind::Item);
    let tile = scene.add_object("Tile", ObjectKind::Item);
    scene.link_object(building, door).unwrap();
    scene.link_object(roof, tile).unwrap();
    scene
}

pub fn parent_name(scene: &Scene, object: &str) -> Option<String> {
    let id = scene.find_object(object).expect("object exists");
    scene
        .object(id)
        .unwrap()
        .parent
        .map(|p| scene.object(p).unwrap().name.clone())
}

pub fn collection_names(scene: &Scene) -> Vec<String> {
    scene
        .containers()
        .into_iter()
        .map(|c| scene.container(c).unwrap().name.clone())
        .collect()
}
