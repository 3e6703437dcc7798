use crate::output::{print_json, print_table};
use clap::Subcommand;
use clo_core::types::GoalLevel;
use std::path::Path;

#[derive(Subcommand)]
pub enum GoalsSubcommand {
    /// Show the IEG → PEO → PLO mapping
    Show,
    /// PEOs linked to an IEG
    Peos { ieg: String },
    /// PLOs linked to a PEO
    Plos { peo: String },
}

pub fn run(root: &Path, subcmd: GoalsSubcommand, json: bool) -> anyhow::Result<()> {
    let goals = super::load_reference(root)?.goals;

    let (level, codes) = match subcmd {
        GoalsSubcommand::Show => {
            if json {
                return print_json(&goals);
            }
            let mut rows = Vec::new();
            for ieg in &goals.ieg {
                for peo in goals.peos_for(ieg) {
                    let plos = goals.plos_for(&peo).join(", ");
                    rows.push(vec![ieg.clone(), peo, plos]);
                }
            }
            print_table(&["IEG", "PEO", "PLOS"], rows);
            return Ok(());
        }
        GoalsSubcommand::Peos { ieg } => (GoalLevel::Peo, goals.peos_for(&ieg)),
        GoalsSubcommand::Plos { peo } => (GoalLevel::Plo, goals.plos_for(&peo)),
    };

    if json {
        return print_json(&codes);
    }
    let rows = codes
        .iter()
        .map(|c| {
            vec![
                c.clone(),
                goals.statement(level, c).unwrap_or_default().to_string(),
            ]
        })
        .collect();
    print_table(&["CODE", "STATEMENT"], rows);
    Ok(())
}
