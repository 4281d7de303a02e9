//! Command dispatch and handlers

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, ConvertArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::tree_view::TreeView;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::Scene;
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::scene_file::{load_scene, save_scene};
use crate::infrastructure::InfraError;
use crate::util::path::{ensure_file_exists, expand_path, PathExt};

#[derive(Debug, Clone, Copy)]
enum Direction {
    ToNodes,
    ToGroups,
}

/// Run the selected command; the returned value is the process exit code.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    match &cli.command {
        Some(Commands::ToNodes(args)) => cmd_convert(cli, args, Direction::ToNodes),
        Some(Commands::ToGroups(args)) => cmd_convert(cli, args, Direction::ToGroups),
        Some(Commands::Tree { scene }) => cmd_tree(cli, scene),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(exitcode::OK)
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

fn load_settings(cli: &Cli, scene_dir: Option<&Path>) -> CliResult<Settings> {
    let settings = match &cli.config {
        Some(path) => Settings::from_file(&expand_path(path))?,
        None => Settings::load(scene_dir)?,
    };
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn open_scene(cli: &Cli, scene: &Path) -> CliResult<(PathBuf, ServiceContainer, Scene)> {
    let path = expand_path(scene);
    if !path.is_scene_file() {
        return Err(CliError::InvalidArgs(format!(
            "not a scene file (expected .toml): {}",
            path.display()
        )));
    }
    ensure_file_exists(&path)?;

    let settings = load_settings(cli, Some(path.scene_dir()))?;
    let services = ServiceContainer::new(settings);
    let scene = load_scene(&path, &services.settings.root_name)?;
    Ok((path, services, scene))
}

#[instrument(skip(cli))]
fn cmd_convert(cli: &Cli, args: &ConvertArgs, direction: Direction) -> CliResult<i32> {
    let (path, services, mut scene) = open_scene(cli, &args.scene)?;

    let report = match direction {
        Direction::ToNodes => services.group_to_node.convert(&mut scene),
        Direction::ToGroups => services.node_to_group.convert(&mut scene),
    };
    output::report(&report);

    if args.tree {
        print_trees(&scene)?;
    }

    if !report.is_finished() {
        output::warning(&format!("{} left unchanged", path.display()));
        return Ok(exitcode::CANCELLED);
    }

    if args.dry_run {
        output::info(&format!("Dry run, not writing {}", path.display()));
    } else {
        let target = args.output.as_deref().map(expand_path).unwrap_or(path);
        save_scene(&scene, &target)?;
        output::action("Wrote", &target.display());
    }
    Ok(exitcode::OK)
}

fn cmd_tree(cli: &Cli, scene: &Path) -> CliResult<i32> {
    let (_, _, scene) = open_scene(cli, scene)?;
    print_trees(&scene)?;
    Ok(exitcode::OK)
}

fn print_trees(scene: &Scene) -> CliResult<()> {
    let tree = scene.collection_tree().map_err(InfraError::from)?;
    output::header("Collections");
    output::info(&tree);

    let forest = scene.object_forest().map_err(InfraError::from)?;
    output::header("Objects");
    output::info(&forest.iter().join(""));
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<i32> {
    match command {
        ConfigCommands::Show { scene } => {
            let scene_dir = scene
                .as_deref()
                .map(|p| expand_path(p).scene_dir().to_path_buf());
            let settings = load_settings(cli, scene_dir.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => {
                    let marker = if path.exists() { "" } else { " (not found)" };
                    output::action("Global", &format!("{}{marker}", path.display()));
                }
                None => output::action("Global", "(no config directory)"),
            }
            let cwd = std::env::current_dir()
                .map_err(|e| InfraError::io("read current directory", e))?;
            output::action("Local", &local_config_path(&cwd).display());
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                let cwd = std::env::current_dir()
                    .map_err(|e| InfraError::io("read current directory", e))?;
                local_config_path(&cwd)
            };
            init_config(&path)?;
            output::action("Created", &path.display());
        }
    }
    Ok(exitcode::OK)
}

fn init_config(path: &Path) -> CliResult<()> {
    if path.exists() {
        return Err(CliError::Usage(format!(
            "config already exists: {}",
            path.display()
        )));
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| InfraError::io(format!("create {}", dir.display()), e))?;
    }
    std::fs::write(path, Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    Ok(())
}
