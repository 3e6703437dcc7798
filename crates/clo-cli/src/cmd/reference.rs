use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use clo_core::config::WarnLevel;
use clo_core::reference::ReferenceData;
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum ReferenceSubcommand {
    /// Check config and reference tables for common mistakes
    Validate,
    /// Replace a profile's outcome table from a CSV file
    /// (columns: code, skill_code, skill_description, values_tag, domain)
    Import {
        #[arg(long)]
        profile: String,
        csv: PathBuf,
    },
}

pub fn run(root: &Path, subcmd: ReferenceSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ReferenceSubcommand::Validate => validate(root, json),
        ReferenceSubcommand::Import { profile, csv } => {
            super::load_reference(root)?;
            let count = ReferenceData::import_outcomes_csv(root, &profile, &csv)
                .with_context(|| format!("failed to import {}", csv.display()))?;
            if json {
                print_json(&serde_json::json!({ "profile": profile, "rows": count }))
            } else {
                println!("Imported {count} outcomes into profile '{profile}'.");
                Ok(())
            }
        }
    }
}

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = clo_core::config::Config::load(root).context("failed to load config")?;
    let reference = super::load_reference(root)?;
    let mut warnings = config.validate();
    warnings.extend(reference.validate());

    if json {
        print_json(&serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!("Reference data is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("reference validation found errors");
    }
    Ok(())
}
