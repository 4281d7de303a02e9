//! Group→Node followed by Node→Group.

mod common;

use groupnode::{convert_collections_to_empties, convert_empties_to_collections};

use common::{building_scene, collection_names};

#[test]
fn given_nested_collections_when_round_tripping_then_nesting_flattens_to_root_groups() {
    let mut scene = building_scene();

    assert!(convert_collections_to_empties(&mut scene).is_finished());
    let report = convert_empties_to_collections(&mut scene);

    assert!(report.is_finished());
    assert_eq!(report.stats.containers_created, 1);
    // Roof no longer exists as a nested collection
    assert_eq!(collection_names(&scene), vec!["Scene Collection", "Building"]);

    let group = scene.find_container("Building").unwrap();
    let mut members: Vec<String> = scene
        .container(group)
        .unwrap()
        .objects
        .iter()
        .map(|o| scene.object(*o).unwrap().name.clone())
        .collect();
    members.sort();
    assert_eq!(members, vec!["Building", "Door", "Roof", "Tile"]);
    assert!(scene.container(scene.root()).unwrap().objects.is_empty());
}
