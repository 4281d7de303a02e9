//! Command dispatch without spawning a process.

mod common;

use std::fs;

use clap::Parser;
use tempfile::TempDir;

use groupnode::cli::args::Cli;
use groupnode::cli::commands::execute_command;
use groupnode::exitcode;
use groupnode::infrastructure::scene_file::load_scene;

use common::{parent_name, scene_fixture};

fn run(args: &[&str]) -> Result<i32, groupnode::cli::CliError> {
    let cli = Cli::try_parse_from(std::iter::once("groupnode").chain(args.iter().copied()))
        .expect("valid arguments");
    execute_command(&cli)
}

#[test]
fn given_scene_when_to_nodes_with_output_then_writes_converted_scene() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("nodes.toml");
    let input = scene_fixture("building.toml");

    let code = run(&[
        "to-nodes",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(code, exitcode::OK);
    let scene = load_scene(&out, "Scene Collection").unwrap();
    assert_eq!(parent_name(&scene, "Door").as_deref(), Some("Building"));
    assert_eq!(scene.containers().len(), 1);
}

#[test]
fn given_dry_run_when_to_nodes_then_scene_file_unchanged() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("scene.toml");
    fs::copy(scene_fixture("building.toml"), &path).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let code = run(&["to-nodes", path.to_str().unwrap(), "--dry-run"]).unwrap();

    assert_eq!(code, exitcode::OK);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn given_scene_without_empties_when_to_groups_then_cancelled_and_untouched() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("scene.toml");
    fs::copy(scene_fixture("items_only.toml"), &path).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let code = run(&["to-groups", path.to_str().unwrap()]).unwrap();

    assert_eq!(code, exitcode::CANCELLED);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn given_non_toml_path_when_converting_then_usage_error() {
    let err = run(&["to-nodes", "scene.blend"]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_missing_scene_when_converting_then_noinput() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing.toml");

    let err = run(&["tree", path.to_str().unwrap()]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_explicit_config_when_converting_then_display_type_applied() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("custom.toml");
    fs::write(&config, "anchor_display = \"SPHERE\"\n").unwrap();
    let out = temp.path().join("out.toml");

    let code = run(&[
        "-c",
        config.to_str().unwrap(),
        "to-nodes",
        scene_fixture("building.toml").to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(code, exitcode::OK);
    assert!(fs::read_to_string(&out).unwrap().contains("SPHERE"));
}
