//! `seraf usecase`: blank custom use-cases inside an existing module.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::Path;

use seraf_codegen::{generate_blank_use_case, write_files};
use seraf_core::SerafConfig;

use crate::output;

#[derive(Subcommand)]
pub enum UseCaseCommands {
    /// Create `use-cases/<name>/` with a blank use-case and controller
    New {
        /// Entity (module) name
        entity: String,
        /// Use-case name in kebab-case (e.g. `approve-order`)
        name: String,
        /// Preview without writing files
        #[arg(long)]
        dry_run: bool,
    },
}

pub fn execute(cmd: UseCaseCommands, project_dir: &Path, config: &SerafConfig) -> Result<()> {
    match cmd {
        UseCaseCommands::New { entity, name, dry_run } => {
            cmd_new(&entity, &name, dry_run, project_dir, config)
        }
    }
}

fn cmd_new(raw: &str, name: &str, dry_run: bool, project_dir: &Path, config: &SerafConfig) -> Result<()> {
    let entity = super::entity_arg(raw)?;
    let module_dir = config.module_dir(project_dir, &entity);
    let files = generate_blank_use_case(&entity, name)?;

    if dry_run {
        output::print_planned(&module_dir, &files);
        return Ok(());
    }

    if !module_dir.exists() {
        anyhow::bail!(
            "Module {} not found. Create it with 'seraf module new {}'.",
            module_dir.display(),
            entity
        );
    }

    let summary = write_files(&module_dir, &files, false)
        .with_context(|| format!("Failed to write use-case to {}", module_dir.display()))?;

    println!("{} Created use-case {}", "✓".green().bold(), name.cyan());
    output::print_summary(&module_dir, &summary);

    Ok(())
}
