use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::{Subcommand, ValueEnum};
use clo_core::export;
use clo_core::history::{History, RecordPatch};
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum HistorySubcommand {
    /// List saved CLOs
    List,
    /// Clear the table; ids restart at 1
    Reset,
    /// Write the table (or its rubric) to a file
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Xlsx)]
        format: ExportFormat,
        /// Output path (default: <file_stem>.<ext> in the project root)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Edit one saved row
    Edit {
        id: u64,
        #[arg(long)]
        course: Option<String>,
        #[arg(long)]
        sentence: Option<String>,
        #[arg(long)]
        assessment: Option<String>,
        #[arg(long)]
        evidence: Option<String>,
        #[arg(long)]
        weight: Option<f64>,
        /// Remove the row's weight
        #[arg(long, conflicts_with = "weight")]
        clear_weight: bool,
    },
    /// Delete one saved row
    Delete { id: u64 },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Rubric,
}

pub fn run(root: &Path, subcmd: HistorySubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        HistorySubcommand::List => list(root, json),
        HistorySubcommand::Reset => {
            History::new().save(root).context("failed to write history")?;
            tracing::info!("history table reset");
            if json {
                print_json(&serde_json::json!({ "status": "reset" }))
            } else {
                println!("History cleared.");
                Ok(())
            }
        }
        HistorySubcommand::Export { format, output } => export_to(root, format, output, json),
        HistorySubcommand::Edit {
            id,
            course,
            sentence,
            assessment,
            evidence,
            weight,
            clear_weight,
        } => {
            let patch = RecordPatch {
                course,
                sentence,
                assessment,
                evidence,
                weight: if clear_weight { Some(None) } else { weight.map(Some) },
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to change: pass at least one of --course, --sentence, --assessment, --evidence, --weight, --clear-weight");
            }
            let mut history = History::load(root)?;
            let row = history.update(id, patch)?.clone();
            history.save(root)?;
            if json {
                print_json(&row)
            } else {
                println!("Updated #{id}: {}", row.sentence);
                Ok(())
            }
        }
        HistorySubcommand::Delete { id } => {
            let mut history = History::load(root)?;
            let row = history.remove(id)?;
            history.save(root)?;
            if json {
                print_json(&row)
            } else {
                println!("Deleted #{id}.");
                Ok(())
            }
        }
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let history = History::load(root)?;
    if json {
        return print_json(&history.rows);
    }
    if history.rows.is_empty() {
        println!("No saved CLOs.");
        return Ok(());
    }
    print_table(
        &["ID", "COURSE", "OUTCOME", "LEVEL", "WEIGHT", "CLO"],
        history
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.course.clone(),
                    r.outcome_code.clone(),
                    r.level.clone(),
                    r.weight_display(),
                    r.sentence.clone(),
                ]
            })
            .collect(),
    );
    Ok(())
}

fn export_to(
    root: &Path,
    format: ExportFormat,
    output: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let history = History::load(root)?;
    let (bytes, name) = match format {
        ExportFormat::Xlsx => (
            export::history_xlsx(&history, &config.export)?,
            export::file_name(&config.export, "", "xlsx"),
        ),
        ExportFormat::Csv => (
            export::history_csv(&history)?,
            export::file_name(&config.export, "", "csv"),
        ),
        ExportFormat::Rubric => {
            let reference = super::load_reference(root)?;
            (
                export::rubric_xlsx(&history, &reference, &config.export)?,
                export::file_name(&config.export, "rubric", "xlsx"),
            )
        }
    };
    let path = output.unwrap_or_else(|| root.join(name));
    clo_core::io::atomic_write(&path, &bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;

    if json {
        print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "rows": history.rows.len(),
        }))
    } else {
        println!("Wrote {} rows to {}", history.rows.len(), path.display());
        Ok(())
    }
}
