use crate::output::{print_json, print_table};
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum LookupSubcommand {
    /// List outcome codes with skill, values and domain
    Outcomes {
        #[arg(long)]
        profile: Option<String>,
    },
    /// Taxonomy levels for an outcome's domain
    Levels {
        outcome: String,
        #[arg(long)]
        profile: Option<String>,
    },
    /// Verbs for an outcome and level
    Verbs {
        outcome: String,
        level: String,
        #[arg(long)]
        profile: Option<String>,
    },
    /// Skill, values, criterion, condition, assessment and evidence
    Meta {
        outcome: String,
        level: String,
        #[arg(long)]
        profile: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: LookupSubcommand, json: bool) -> anyhow::Result<()> {
    let reference = super::load_reference(root)?;
    let config = super::load_config(root)?;

    match subcmd {
        LookupSubcommand::Outcomes { profile } => {
            let profile = super::profile_or_default(profile, &config);
            let rows = reference.outcomes.table(&profile).unwrap_or_default();
            if json {
                return print_json(&rows);
            }
            print_table(
                &["CODE", "SKILL", "VALUES", "DOMAIN"],
                rows.iter()
                    .map(|r| {
                        vec![
                            r.code.clone(),
                            format!("{}: {}", r.skill_code, r.skill_description),
                            r.values_tag.clone(),
                            r.domain.clone(),
                        ]
                    })
                    .collect(),
            );
        }
        LookupSubcommand::Levels { outcome, profile } => {
            let profile = super::profile_or_default(profile, &config);
            let levels = clo_core::generate::levels_for(&reference, &profile, &outcome);
            print_list(&levels, json)?;
        }
        LookupSubcommand::Verbs {
            outcome,
            level,
            profile,
        } => {
            let profile = super::profile_or_default(profile, &config);
            let verbs = clo_core::generate::verbs_for(&reference, &profile, &outcome, &level);
            print_list(&verbs, json)?;
        }
        LookupSubcommand::Meta {
            outcome,
            level,
            profile,
        } => {
            let profile = super::profile_or_default(profile, &config);
            let meta = clo_core::generate::meta(&reference, &profile, &outcome, &level);
            if json {
                return match meta {
                    Some(m) => print_json(&m),
                    None => print_json(&serde_json::json!({})),
                };
            }
            let Some(m) = meta else {
                println!("No outcome '{outcome}' in profile '{profile}'.");
                return Ok(());
            };
            for (k, v) in [
                ("Skill", format!("{}: {}", m.skill_code, m.skill)),
                ("Values", m.values),
                ("Domain", m.domain),
                ("Criterion", m.criterion),
                ("Condition", m.condition),
                ("Assessment", m.assessment),
                ("Evidence", m.evidence),
            ] {
                println!("{k:<11} {v}");
            }
        }
    }
    Ok(())
}

fn print_list(items: &[String], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&items);
    }
    for item in items {
        println!("{item}");
    }
    Ok(())
}
