//! Writes generated files to disk and keeps the `index.ts` barrels in sync.
//!
//! Every `.ts` file is exported from its directory's `index.ts`, and every
//! directory on the way up is exported from its parent's, stopping at the
//! write root. `types` directories are not exported upward: every use-case
//! has its own `IRequest`/`IResponse` and re-exporting them would collide.
//! Barrel updates only append missing lines, so emitting twice is a no-op.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use seraf_core::SerafResult;

use crate::artifact::{ArtifactSet, OutputFile};

const BARREL: &str = "index.ts";
const PRIVATE_DIRS: &[&str] = &["types"];

/// What a write pass did, with paths relative to the write root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmitSummary {
    pub written: Vec<PathBuf>,
    /// Existing files left untouched (no overwrite requested).
    pub skipped: Vec<PathBuf>,
    pub barrels_updated: Vec<PathBuf>,
}

/// Write an artifact set into a module directory.
pub fn write_artifacts(set: &ArtifactSet, module_dir: &Path, overwrite: bool) -> SerafResult<EmitSummary> {
    let summary = write_files(module_dir, &set.artifacts, overwrite)?;
    info!(
        entity = %set.entity,
        written = summary.written.len(),
        skipped = summary.skipped.len(),
        "Emitted module"
    );
    Ok(summary)
}

/// Write files relative to `root`, then update barrels for all of them.
pub fn write_files<F: OutputFile>(root: &Path, files: &[F], overwrite: bool) -> SerafResult<EmitSummary> {
    let mut summary = EmitSummary::default();
    // barrel path -> export lines, in first-seen order
    let mut barrels: BTreeMap<PathBuf, Vec<String>> = BTreeMap::new();

    for file in files {
        let relative = file.path();
        let target = root.join(relative);

        if target.exists() && !overwrite {
            debug!(path = %target.display(), "Exists, skipping");
            summary.skipped.push(relative.to_path_buf());
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, file.content())?;
            debug!(path = %target.display(), "Written");
            summary.written.push(relative.to_path_buf());
        }

        for (barrel, line) in barrel_entries(relative) {
            let lines = barrels.entry(barrel).or_default();
            if !lines.contains(&line) {
                lines.push(line);
            }
        }
    }

    for (barrel, lines) in barrels {
        if append_missing(&root.join(&barrel), &lines)? {
            summary.barrels_updated.push(barrel);
        }
    }

    Ok(summary)
}

/// `(barrel, export line)` pairs needed to reach `relative` from the root.
fn barrel_entries(relative: &Path) -> Vec<(PathBuf, String)> {
    if relative.extension().and_then(|e| e.to_str()) != Some("ts") {
        return Vec::new();
    }
    let Some(stem) = relative.file_stem().and_then(|s| s.to_str()) else {
        return Vec::new();
    };
    if stem == "index" {
        return Vec::new();
    }

    let mut entries = Vec::new();
    let mut dir = relative.parent().unwrap_or(Path::new(""));
    entries.push((dir.join(BARREL), export_line(stem)));

    while let Some(name) = dir.file_name().and_then(|n| n.to_str()) {
        if PRIVATE_DIRS.contains(&name) {
            break;
        }
        let parent = dir.parent().unwrap_or(Path::new(""));
        entries.push((parent.join(BARREL), export_line(name)));
        dir = parent;
    }

    entries
}

fn export_line(target: &str) -> String {
    format!("export * from './{}'", target)
}

/// Append the lines `path` does not already contain. Returns whether it changed.
fn append_missing(path: &Path, lines: &[String]) -> SerafResult<bool> {
    let existing = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };
    let present: Vec<String> = existing.lines().map(normalize).collect();

    let missing: Vec<&String> = lines
        .iter()
        .filter(|line| !present.contains(&normalize(line)))
        .collect();
    if missing.is_empty() {
        return Ok(false);
    }

    let mut content = existing;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    for line in missing {
        content.push_str(line);
        content.push('\n');
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(true)
}

/// Compare export lines regardless of quote style and trailing `;`.
fn normalize(line: &str) -> String {
    line.trim().trim_end_matches(';').replace('"', "'")
}
