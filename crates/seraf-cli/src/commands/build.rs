//! `seraf build`: introspect, synthesize, emit.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::Confirm;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::warn;

use seraf_codegen::{synthesize, write_artifacts, ArtifactSet, SynthesisOptions};
use seraf_core::SerafConfig;

use crate::output;

#[derive(Args)]
pub struct BuildArgs {
    /// Entity name (e.g. `user`)
    pub entity: String,

    /// Field usable as a repository list filter (repeatable)
    #[arg(long = "filter-key", value_name = "FIELD")]
    pub filter_keys: Vec<String>,

    /// Model file to read instead of `<module>/models/I<Entity>.ts`
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Preview without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Print the generated artifacts as JSON instead of writing them
    #[arg(long)]
    pub json: bool,

    /// Overwrite existing files without asking
    #[arg(long)]
    pub force: bool,
}

pub fn execute(args: BuildArgs, project_dir: &Path, config: &SerafConfig) -> Result<()> {
    let entity = super::entity_arg(&args.entity)?;
    let (model_path, fields) = super::read_model(config, project_dir, &entity, args.model)?;

    if fields.is_empty() {
        warn!(
            model = %model_path.display(),
            "No {} interface with typed members found, generating an empty module",
            entity.model_name()
        );
    }

    let options = SynthesisOptions::from_config(config).with_filter_keys(args.filter_keys);
    let set = synthesize(&entity, &fields, &options).context("Failed to generate module")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&set)?);
        return Ok(());
    }

    let module_dir = config.module_dir(project_dir, &entity);

    if args.dry_run {
        output::print_planned(&module_dir, &set.artifacts);
        output::print_report(&set.report);
        return Ok(());
    }

    let overwrite = if already_built(&set, &module_dir) {
        args.force || confirm_overwrite(&entity.to_string())?
    } else {
        false
    };

    let summary = write_artifacts(&set, &module_dir, overwrite)
        .with_context(|| format!("Failed to write module to {}", module_dir.display()))?;

    println!(
        "{} Built module {} ({} fields)",
        "✓".green().bold(),
        entity.as_str().cyan(),
        fields.len()
    );
    output::print_summary(&module_dir, &summary);
    output::print_report(&set.report);

    Ok(())
}

/// Whether any generated file already exists on disk.
fn already_built(set: &ArtifactSet, module_dir: &Path) -> bool {
    set.iter().any(|a| module_dir.join(&a.path).exists())
}

/// Ask before overwriting. Non-interactive sessions answer no.
fn confirm_overwrite(entity: &str) -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        return Ok(false);
    }
    let confirmed = Confirm::new()
        .with_prompt(format!("Module '{}' already has generated files. Overwrite them?", entity))
        .default(false)
        .interact()?;
    Ok(confirmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MODEL: &str = r#"
import { ICommon } from "../../common";

export interface IUser extends ICommon {
  email: string;
  roles: string[];
  isActive?: boolean;
}
"#;

    fn project() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let models = tmp.path().join("api/src/modules/user/models");
        fs::create_dir_all(&models).unwrap();
        fs::write(models.join("IUser.ts"), MODEL).unwrap();
        tmp
    }

    fn args() -> BuildArgs {
        BuildArgs {
            entity: "user".to_string(),
            filter_keys: vec!["email".to_string()],
            model: None,
            dry_run: false,
            json: false,
            force: false,
        }
    }

    #[test]
    fn test_build_writes_module() {
        let tmp = project();
        execute(args(), tmp.path(), &SerafConfig::default()).unwrap();

        let module = tmp.path().join("api/src/modules/user");
        let contract =
            fs::read_to_string(module.join("repositories/interfaces/IUserRepository.ts")).unwrap();
        assert!(contract.contains("email?: string;"));
        assert!(module.join("routes/userExpressRoutes.ts").exists());
        assert!(module.join("use-cases/find-user-by-id/setupController.ts").exists());

        let index = fs::read_to_string(module.join("index.ts")).unwrap();
        assert!(index.contains("export * from './use-cases'"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let tmp = project();
        let mut dry = args();
        dry.dry_run = true;
        execute(dry, tmp.path(), &SerafConfig::default()).unwrap();
        assert!(!tmp.path().join("api/src/modules/user/index.ts").exists());
    }

    #[test]
    fn test_missing_model_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = execute(args(), tmp.path(), &SerafConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to read model"));
    }

    #[test]
    fn test_malformed_filter_key_writes_nothing() {
        let tmp = project();
        let mut bad = args();
        bad.filter_keys = vec!["first-name".to_string()];
        let err = execute(bad, tmp.path(), &SerafConfig::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid filter key"));
        assert!(!tmp.path().join("api/src/modules/user/index.ts").exists());
    }

    #[test]
    fn test_forced_rebuild_overwrites() {
        let tmp = project();
        execute(args(), tmp.path(), &SerafConfig::default()).unwrap();

        let validator = tmp.path().join("api/src/modules/user/utils/ValidateUser.ts");
        fs::write(&validator, "// edited").unwrap();

        let mut forced = args();
        forced.force = true;
        execute(forced, tmp.path(), &SerafConfig::default()).unwrap();
        assert!(fs::read_to_string(&validator).unwrap().contains("validateUser"));
    }

    #[test]
    fn test_already_built_detects_existing_files() {
        let tmp = project();
        let entity = seraf_core::EntityName::new("user").unwrap();
        let set = synthesize(&entity, &[], &SynthesisOptions::default()).unwrap();
        let module_dir = tmp.path().join("api/src/modules/user");
        assert!(!already_built(&set, &module_dir));

        write_artifacts(&set, &module_dir, false).unwrap();
        assert!(already_built(&set, &module_dir));
    }
}
