use crate::output::print_json;
use clap::Args;
use clo_core::generate::GenerateRequest;
use clo_core::history::History;
use std::path::Path;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Outcome (PLO) code, e.g. PLO3
    #[arg(long)]
    pub outcome: String,
    /// Taxonomy level, e.g. Apply or "Guided Response"
    #[arg(long)]
    pub level: String,
    /// Action verb
    #[arg(long)]
    pub verb: String,
    /// What the learner acts on
    #[arg(long)]
    pub content: String,
    /// Outcome table profile (default: config defaults.profile)
    #[arg(long)]
    pub profile: Option<String>,
    #[arg(long, default_value = "")]
    pub course: String,
    /// Weight in percent, 0-100
    #[arg(long)]
    pub weight: Option<f64>,
    /// Values connector: guided, aligned, in_accordance_with
    #[arg(long)]
    pub style: Option<String>,
    /// Don't append the result to the history table
    #[arg(long)]
    pub no_save: bool,
    /// Also print the sentence variants
    #[arg(long)]
    pub variants: bool,
    /// Also print the rubric bands
    #[arg(long)]
    pub rubric: bool,
}

pub fn run(root: &Path, args: GenerateArgs, json: bool) -> anyhow::Result<()> {
    let reference = super::load_reference(root)?;
    let config = super::load_config(root)?;

    let req = GenerateRequest {
        profile: args.profile.unwrap_or_default(),
        outcome: args.outcome,
        level: args.level,
        verb: args.verb,
        content: args.content,
        course: args.course,
        weight: args.weight,
        style: args.style,
        save: !args.no_save,
    };
    let generated = clo_core::generate::generate(&reference, &config.defaults, &req)?;

    let id = if req.save {
        let mut history = History::load(root)?;
        let id = history.append(&req, &generated);
        history.save(root)?;
        Some(id)
    } else {
        None
    };

    if json {
        let mut value = serde_json::to_value(&generated)?;
        if let Some(id) = id {
            value["id"] = serde_json::json!(id);
        }
        return print_json(&value);
    }

    println!("{}", generated.sentence);
    if !generated.assessment.is_empty() {
        println!("\nAssessment: {}", generated.assessment);
        println!("Evidence:   {}", generated.evidence);
    }
    if args.variants {
        println!();
        for v in &generated.variants {
            println!("[{}] {}", v.label, v.sentence);
        }
    }
    if args.rubric {
        println!();
        for (band, text) in generated.rubric.bands() {
            println!("{band:<13} {text}");
        }
    }
    if let Some(id) = id {
        println!("\nSaved as #{id}");
    }
    Ok(())
}
