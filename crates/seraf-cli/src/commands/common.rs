//! `seraf common`: the shared module every generated module imports.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::Path;

use seraf_codegen::{generate_common_module, write_files};
use seraf_core::SerafConfig;

use crate::output;

#[derive(Args)]
pub struct CommonArgs {
    /// Preview without writing files
    #[arg(long)]
    pub dry_run: bool,
}

pub fn execute(args: CommonArgs, project_dir: &Path, config: &SerafConfig) -> Result<()> {
    let common_dir = config.modules_dir(project_dir).join("common");
    let files = generate_common_module()?;

    if args.dry_run {
        output::print_planned(&common_dir, &files);
        return Ok(());
    }

    let summary = write_files(&common_dir, &files, false)
        .with_context(|| format!("Failed to write common module to {}", common_dir.display()))?;

    println!("{} Common module ready", "✓".green().bold());
    output::print_summary(&common_dir, &summary);

    Ok(())
}
