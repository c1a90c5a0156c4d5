//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use seraf_core::{EntityName, FieldDescriptor, SerafConfig};

pub mod build;
pub mod common;
pub mod inspect;
pub mod module;
pub mod usecase;

/// Seraf - scaffold layered Express + Mongoose modules
#[derive(Parser)]
#[command(name = "seraf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory (defaults to current directory)
    #[arg(short, long, global = true, env = "SERAF_PROJECT")]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a module from its model interface
    Build(build::BuildArgs),

    /// Show the fields read from a model interface
    Inspect(inspect::InspectArgs),

    /// Module scaffolding
    #[command(subcommand)]
    Module(module::ModuleCommands),

    /// Custom use-case scaffolding
    #[command(subcommand)]
    Usecase(usecase::UseCaseCommands),

    /// Write the shared common module
    Common(common::CommonArgs),
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let project_dir = match self.project {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to resolve current directory")?,
        };
        let config = SerafConfig::load(&project_dir)
            .with_context(|| format!("Failed to load config from {}", project_dir.display()))?;

        match self.command {
            Commands::Build(args) => build::execute(args, &project_dir, &config),
            Commands::Inspect(args) => inspect::execute(args, &project_dir, &config),
            Commands::Module(cmd) => module::execute(cmd, &project_dir, &config),
            Commands::Usecase(cmd) => usecase::execute(cmd, &project_dir, &config),
            Commands::Common(args) => common::execute(args, &project_dir, &config),
        }
    }
}

/// Parse an entity name argument.
pub(crate) fn entity_arg(raw: &str) -> Result<EntityName> {
    EntityName::new(raw).context("Entity names are identifiers such as `user` or `orderItem`")
}

/// Read the fields of an entity's model, from `--model` or the configured location.
pub(crate) fn read_model(
    config: &SerafConfig,
    project_dir: &Path,
    entity: &EntityName,
    model: Option<PathBuf>,
) -> Result<(PathBuf, Vec<FieldDescriptor>)> {
    let path = model.unwrap_or_else(|| config.model_path(project_dir, entity));
    let fields = seraf_core::introspect_file(&path, entity)
        .with_context(|| format!("Failed to read model {}", path.display()))?;
    Ok((path, fields))
}
