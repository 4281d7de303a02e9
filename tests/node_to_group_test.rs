//! Empties → collections, driven through the public converter API.

mod common;

use std::sync::Arc;

use rstest::rstest;

use groupnode::application::services::hierarchy::descendant_closure;
use groupnode::application::services::{ClosureStrategy, NodeToGroupConverter};
use groupnode::application::{convert_empties_to_collections, Outcome, Severity};
use groupnode::config::Settings;
use groupnode::domain::{ObjectKind, Scene};
use groupnode::util::testing::{init_test_setup, FailingStore};

use common::{collection_names, load_fixture};

fn member_names(scene: &Scene, collection: &str) -> Vec<String> {
    let id = scene.find_container(collection).expect("collection exists");
    scene
        .container(id)
        .unwrap()
        .objects
        .iter()
        .map(|o| scene.object(*o).unwrap().name.clone())
        .collect()
}

#[test]
fn given_building_with_roof_when_grouping_then_collection_holds_both() {
    init_test_setup();
    let mut scene = load_fixture("nodes.toml");

    let report = convert_empties_to_collections(&mut scene);

    assert_eq!(report.outcome, Outcome::Finished);
    assert_eq!(
        report.messages[0].text,
        "Created 1 collection(s) from root empties"
    );
    assert_eq!(member_names(&scene, "Building"), vec!["Building", "Roof"]);
    assert_eq!(member_names(&scene, "Scene Collection"), vec!["Lamp"]);
    // Tile is not parented to an empty, so its collection is untouched
    assert_eq!(member_names(&scene, "X"), vec!["Tile"]);

    // parent links are untouched
    let roof = scene.find_object("Roof").unwrap();
    let building = scene.find_object("Building").unwrap();
    assert_eq!(scene.object(roof).unwrap().parent, Some(building));
}

#[test]
fn given_parented_items_when_grouping_then_items_move_with_their_root() {
    let mut scene = Scene::default();
    let root = scene.root();
    let building = scene.add_object("Building", ObjectKind::Anchor);
    let door = scene.add_object("Door", ObjectKind::Item);
    let knob = scene.add_object("Knob", ObjectKind::Item);
    scene.set_parent(door, Some(building)).unwrap();
    scene.set_parent(knob, Some(door)).unwrap();
    for object in [building, door, knob] {
        scene.link_object(root, object).unwrap();
    }

    let report = convert_empties_to_collections(&mut scene);

    assert!(report.is_finished());
    assert_eq!(report.stats.objects_moved, 3);
    assert_eq!(member_names(&scene, "Building"), vec!["Building", "Door", "Knob"]);
    assert!(scene.container(root).unwrap().objects.is_empty());
}

#[test]
fn given_several_roots_when_grouping_then_one_collection_each_under_scene_root() {
    let mut scene = Scene::default();
    let root = scene.root();
    for name in ["Props", "Lights"] {
        let anchor = scene.add_object(name, ObjectKind::Anchor);
        scene.link_object(root, anchor).unwrap();
    }

    let report = convert_empties_to_collections(&mut scene);

    assert_eq!(report.stats.containers_created, 2);
    assert_eq!(report.messages[0].text, "Created 2 collection(s) from root empties");
    for name in ["Props", "Lights"] {
        let group = scene.find_container(name).unwrap();
        assert_eq!(scene.container_parent(group).unwrap(), Some(root));
    }
}

#[test]
fn given_no_root_empties_when_grouping_then_warns_and_cancels() {
    let mut scene = load_fixture("items_only.toml");

    let report = convert_empties_to_collections(&mut scene);

    assert_eq!(report.outcome, Outcome::Cancelled);
    assert_eq!(report.messages.len(), 1);
    assert_eq!(report.messages[0].severity, Severity::Warning);
    assert_eq!(report.messages[0].text, "No root empties found");
    assert_eq!(collection_names(&scene), vec!["Scene Collection"]);
}

#[test]
fn given_parented_anchor_only_when_grouping_then_it_is_not_a_root() {
    let mut scene = Scene::default();
    let lamp = scene.add_object("Lamp", ObjectKind::Item);
    let bulb = scene.add_object("Bulb", ObjectKind::Anchor);
    scene.set_parent(bulb, Some(lamp)).unwrap();

    let report = convert_empties_to_collections(&mut scene);

    assert_eq!(report.outcome, Outcome::Cancelled);
}

#[test]
fn given_host_failure_when_grouping_then_cancels_keeping_partial_work() {
    let scene = load_fixture("nodes.toml");
    let mut store = FailingStore::new(scene).fail_users("Roof");

    let report = convert_empties_to_collections(&mut store);

    assert_eq!(report.outcome, Outcome::Cancelled);
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0].text.starts_with("Error during conversion"),
        "{}",
        errors[0].text
    );
    // no rollback: the group exists and Building already moved
    assert_eq!(member_names(&store.scene, "Building"), vec!["Building"]);
    let members = member_names(&store.scene, "Scene Collection");
    assert!(members.contains(&"Roof".to_string()));
}

#[test]
fn given_link_failure_when_grouping_then_cancels_with_single_error() {
    let scene = load_fixture("nodes.toml");
    let mut store = FailingStore::new(scene).fail_link("Roof");

    let report = convert_empties_to_collections(&mut store);

    assert_eq!(report.outcome, Outcome::Cancelled);
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0].text.starts_with("Error during conversion"),
        "{}",
        errors[0].text
    );
    assert_eq!(report.warnings().count(), 0);
    assert_eq!(member_names(&store.scene, "Building"), vec!["Building"]);
    assert_eq!(member_names(&store.scene, "X"), vec!["Tile"]);
}

#[rstest]
#[case::scan(ClosureStrategy::Scan)]
#[case::index(ClosureStrategy::Index)]
fn given_deep_hierarchy_when_computing_closure_then_strategies_agree(
    #[case] strategy: ClosureStrategy,
) {
    let mut scene = Scene::default();
    let a = scene.add_object("A", ObjectKind::Anchor);
    // children created before their parents force the scan to repeat
    let c = scene.add_object("C", ObjectKind::Item);
    let b = scene.add_object("B", ObjectKind::Anchor);
    let other = scene.add_object("Other", ObjectKind::Anchor);
    scene.set_parent(b, Some(a)).unwrap();
    scene.set_parent(c, Some(b)).unwrap();

    let mut closure = descendant_closure(&scene, a, strategy).unwrap();

    assert_eq!(closure[0], a);
    closure.sort_by_key(|id| scene.object(*id).unwrap().name.clone());
    assert_eq!(closure, vec![a, b, c]);
    assert!(!closure.contains(&other));
}

#[rstest]
#[case::scan(ClosureStrategy::Scan)]
#[case::index(ClosureStrategy::Index)]
fn given_strategy_setting_when_grouping_then_result_is_identical(
    #[case] strategy: ClosureStrategy,
) {
    let mut scene = load_fixture("nodes.toml");
    let settings = Settings {
        closure: strategy,
        ..Settings::default()
    };

    let report = NodeToGroupConverter::new(Arc::new(settings)).convert(&mut scene);

    assert!(report.is_finished());
    let mut members = member_names(&scene, "Building");
    members.sort();
    assert_eq!(members, vec!["Building", "Roof"]);
}
