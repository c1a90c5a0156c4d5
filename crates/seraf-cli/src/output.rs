//! Terminal output formatting.

use colored::Colorize;
use std::path::Path;

use seraf_codegen::{persistence_for, EmitSummary, FilterKey, Mapping, OutputFile, SynthesisReport};
use seraf_core::FieldDescriptor;

/// Print introspected fields with their persistence mapping.
pub fn print_fields_table(fields: &[FieldDescriptor]) {
    if fields.is_empty() {
        println!("{}", "No typed members found.".dimmed());
        return;
    }

    println!("{:<24} {:<32} {:<10} {:<12}", "Field", "Type", "Required", "Stored as");
    println!("{}", "─".repeat(80));

    for field in fields {
        let required = if field.is_optional {
            "no".dimmed()
        } else {
            "yes".green()
        };
        let stored = match persistence_for(&field.shape()) {
            Mapping::Supported(ty) => ty.mongoose().normal(),
            Mapping::Omitted => "omitted".yellow(),
        };

        println!(
            "{:<24} {:<32} {:<10} {:<12}",
            field.name,
            truncate(&field.declared_type, 30),
            required,
            stored
        );
    }
}

pub fn print_filter_keys(keys: &[FilterKey]) {
    println!("{}", "List filters".bold());
    for key in keys {
        if key.is_resolved() {
            println!("  {}?: {}", key.name(), key.declared_type());
        } else {
            println!("  {}?: {} {}", key.name(), key.declared_type().yellow(), "(no such field)".dimmed());
        }
    }
}

/// Print the files a run would write.
pub fn print_planned<F: OutputFile>(root: &Path, files: &[F]) {
    println!("{} Would generate {} files in {}:", "→".dimmed(), files.len(), root.display());
    for file in files {
        println!("  {}", file.path().display());
    }
}

pub fn print_summary(root: &Path, summary: &EmitSummary) {
    for path in &summary.written {
        println!("  {} {}", "+".green(), root.join(path).display());
    }
    for path in &summary.skipped {
        println!("  {} {} {}", "=".dimmed(), root.join(path).display(), "(exists)".dimmed());
    }
    if !summary.barrels_updated.is_empty() {
        println!(
            "  {} {} index file(s) updated",
            "~".cyan(),
            summary.barrels_updated.len()
        );
    }
}

/// Print degradations, if any.
pub fn print_report(report: &SynthesisReport) {
    if report.is_clean() {
        return;
    }

    println!();
    for field in &report.omitted_fields {
        println!(
            "{} {} has an unsupported type and was left out of the schema",
            "!".yellow().bold(),
            field.bold()
        );
    }
    for key in &report.unresolved_filter_keys {
        println!(
            "{} filter key {} names no field, typed as unknown",
            "!".yellow().bold(),
            key.bold()
        );
    }
}

/// Truncate a string with ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
