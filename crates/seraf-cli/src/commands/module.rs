//! `seraf module`: start a new module from an empty model interface.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::Path;

use seraf_codegen::{generate_model_stub, write_files};
use seraf_core::SerafConfig;

use crate::output;

#[derive(Subcommand)]
pub enum ModuleCommands {
    /// Create `models/I<Entity>.ts` for a new module
    New {
        /// Entity name (e.g. `user`)
        entity: String,
    },
}

pub fn execute(cmd: ModuleCommands, project_dir: &Path, config: &SerafConfig) -> Result<()> {
    match cmd {
        ModuleCommands::New { entity } => cmd_new(&entity, project_dir, config),
    }
}

fn cmd_new(raw: &str, project_dir: &Path, config: &SerafConfig) -> Result<()> {
    let entity = super::entity_arg(raw)?;
    let module_dir = config.module_dir(project_dir, &entity);
    let stub = generate_model_stub(&entity)?;

    let summary = write_files(&module_dir, &[stub], false)
        .with_context(|| format!("Failed to write model to {}", module_dir.display()))?;

    if summary.written.is_empty() {
        println!(
            "{} Model {} already exists, left untouched",
            "→".dimmed(),
            entity.model_name().cyan()
        );
    } else {
        println!("{} Created module {}", "✓".green().bold(), entity.as_str().cyan());
        output::print_summary(&module_dir, &summary);
        println!(
            "\nAdd fields to {}, then run {}",
            entity.model_name().cyan(),
            format!("seraf build {}", entity).bold()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_module_then_build_reads_it() {
        let tmp = TempDir::new().unwrap();
        let config = SerafConfig::default();
        cmd_new("order", tmp.path(), &config).unwrap();

        let model = tmp.path().join("api/src/modules/order/models/IOrder.ts");
        assert!(fs::read_to_string(&model).unwrap().contains("export interface IOrder extends ICommon"));

        // An empty interface reads as no fields.
        let entity = seraf_core::EntityName::new("order").unwrap();
        assert!(seraf_core::introspect_file(&model, &entity).unwrap().is_empty());
    }

    #[test]
    fn test_new_module_keeps_existing_model() {
        let tmp = TempDir::new().unwrap();
        let model = tmp.path().join("api/src/modules/order/models/IOrder.ts");
        fs::create_dir_all(model.parent().unwrap()).unwrap();
        fs::write(&model, "export interface IOrder { total: number }").unwrap();

        cmd_new("order", tmp.path(), &SerafConfig::default()).unwrap();
        assert_eq!(
            fs::read_to_string(&model).unwrap(),
            "export interface IOrder { total: number }"
        );
    }
}
