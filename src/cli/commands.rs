//! Command dispatch: settings, container wiring and terminal output

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::InfraError;
use crate::tree_traits::TreeNodeConvert;
use crate::util::path::expand_path;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Xml {
            organism,
            genes,
            rna,
            empty_classes,
            max_depth,
            output,
        }) => {
            let mut settings = load_settings(cli)?;
            settings.export.include_genes |= *genes;
            settings.export.include_rna |= *rna;
            settings.export.include_empty_classes |= *empty_classes;
            if let Some(depth) = max_depth {
                settings.export.max_depth = *depth;
            }
            apply_output_override(&mut settings, output.as_deref());
            cmd_xml(settings, organism)
        }
        Some(Commands::Xgmml {
            organism,
            pathways,
            output,
        }) => {
            let mut settings = load_settings(cli)?;
            apply_output_override(&mut settings, output.as_deref());
            cmd_xgmml(settings, organism, pathways)
        }
        Some(Commands::Tree {
            organism,
            empty_classes,
        }) => {
            let mut settings = load_settings(cli)?;
            settings.export.include_empty_classes |= *empty_classes;
            cmd_tree(settings, organism)
        }
        Some(Commands::Organisms) => cmd_organisms(load_settings(cli)?),
        Some(Commands::Pathways { organism }) => cmd_pathways(load_settings(cli)?, organism),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            cmd_completion(*shell);
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run with --help for usage".to_string(),
        )),
    }
}

/// Directory searched for the local config file.
fn config_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.config_dir {
        Some(dir) => Ok(expand_path(dir)),
        None => env::current_dir()
            .map_err(|e| CliError::Infra(InfraError::io("get current directory", e))),
    }
}

/// Layered settings with the global `--catalog` flag applied on top.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let dir = config_dir(cli)?;
    let mut settings = Settings::load(Some(dir.as_path()))?;
    if let Some(catalog) = &cli.catalog {
        settings.catalog = expand_path(catalog);
    }
    debug!("effective settings: {:?}", settings);
    Ok(settings)
}

fn apply_output_override(settings: &mut Settings, output: Option<&Path>) {
    if let Some(dir) = output {
        settings.output_dir = expand_path(dir);
    }
}

#[instrument(skip(settings))]
fn cmd_xml(settings: Settings, organism: &str) -> CliResult<()> {
    let container = ServiceContainer::new(settings)?;
    let options = container.settings.export.render_options();
    let path = container
        .export_service()
        .export_xml(organism, &options, &container.settings.output_dir)?;
    output::success(&format!("exported {}", path.display()));
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_xgmml(settings: Settings, organism: &str, pathways: &[String]) -> CliResult<()> {
    let container = ServiceContainer::new(settings)?;
    let written = container.export_service().export_networks(
        organism,
        pathways,
        &container.settings.output_dir,
    )?;
    if written.is_empty() {
        output::info(&format!("no pathways for {organism}"));
        return Ok(());
    }
    output::success(&format!("exported {} networks", written.len()));
    for path in &written {
        output::detail(&path.display());
    }
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_tree(settings: Settings, organism: &str) -> CliResult<()> {
    let container = ServiceContainer::new(settings)?;
    let tree = container.export_service().build_tree(organism)?;
    let include_empty = container.settings.export.include_empty_classes;
    print!("{}", tree.to_tree_string(include_empty));
    output::detail(&format!(
        "{} classes, {} pathways",
        tree.len(),
        tree.pathway_count()
    ));
    Ok(())
}

fn cmd_organisms(settings: Settings) -> CliResult<()> {
    let container = ServiceContainer::new(settings)?;
    for organism in container.export_service().organisms()? {
        output::info(&organism);
    }
    Ok(())
}

fn cmd_pathways(settings: Settings, organism: &str) -> CliResult<()> {
    let container = ServiceContainer::new(settings)?;
    for pathway in container.export_service().pathways(organism)? {
        output::info(&format!("{}\t{}", pathway.id, pathway.name));
    }
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(&config_dir(cli)?)
            };
            init_config(&RealFileSystem, &path)?;
            output::action("Created", &path.display());
            Ok(())
        }
        ConfigCommands::Path => {
            output::header("Config files");
            if let Some(global) = global_config_path() {
                output::detail(&format!("global: {}{}", global.display(), marker(&global)));
            }
            let local = local_config_path(&config_dir(cli)?);
            output::detail(&format!("local:  {}{}", local.display(), marker(&local)));
            Ok(())
        }
    }
}

fn marker(path: &Path) -> &'static str {
    if path.exists() {
        ""
    } else {
        " (missing)"
    }
}

/// Write the config template to `path`, refusing to overwrite.
fn init_config(fs: &dyn FileSystem, path: &Path) -> CliResult<()> {
    if fs.exists(path) {
        return Err(CliError::InvalidArgs(format!(
            "config already exists: {}",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs.create_dir_all(parent)
                .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
        }
    }
    fs.write(path, &Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    Ok(())
}

fn cmd_completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
