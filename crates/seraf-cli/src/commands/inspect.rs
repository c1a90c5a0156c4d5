//! `seraf inspect`: show what the introspector reads from a model.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use seraf_codegen::synthesizer::preview_filter_keys;
use seraf_codegen::SynthesisOptions;
use seraf_core::SerafConfig;

use crate::output;

#[derive(Args)]
pub struct InspectArgs {
    /// Entity name (e.g. `user`)
    pub entity: String,

    /// Model file to read instead of `<module>/models/I<Entity>.ts`
    #[arg(long)]
    pub model: Option<PathBuf>,
}

pub fn execute(args: InspectArgs, project_dir: &Path, config: &SerafConfig) -> Result<()> {
    let entity = super::entity_arg(&args.entity)?;
    let (model_path, fields) = super::read_model(config, project_dir, &entity, args.model)?;

    println!(
        "{} {}",
        entity.model_name().cyan().bold(),
        format!("({})", model_path.display()).dimmed()
    );
    println!();
    output::print_fields_table(&fields);

    let options = SynthesisOptions::from_config(config);
    let filter_keys = preview_filter_keys(&fields, &options)?;
    if !filter_keys.is_empty() {
        println!();
        output::print_filter_keys(&filter_keys);
    }

    Ok(())
}
