use crate::error::Result;
use crate::types::GoalLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Institutional goals → program objectives → program outcomes.
///
/// Read-only reference data loaded once at startup. Adjacency lookups on
/// unknown codes return empty lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalGraph {
    #[serde(default)]
    pub ieg: Vec<String>,
    #[serde(default)]
    pub peo: Vec<String>,
    #[serde(default)]
    pub plo: Vec<String>,
    #[serde(default)]
    pub ieg_to_peo: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub peo_to_plo: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub statements: BTreeMap<GoalLevel, BTreeMap<String, String>>,
}

fn key(code: &str) -> String {
    code.trim().to_uppercase()
}

fn check_links(
    parents: &[String],
    children: &[String],
    map: &BTreeMap<String, Vec<String>>,
    label: &str,
    out: &mut Vec<String>,
) {
    for (parent, kids) in map {
        if !parents.iter().any(|p| key(p) == key(parent)) {
            out.push(format!("{label}: unknown parent '{parent}'"));
        }
        for kid in kids {
            if !children.iter().any(|c| key(c) == key(kid)) {
                out.push(format!("{label}: '{parent}' -> unknown child '{kid}'"));
            }
        }
    }
}

fn codes(prefix: &str, n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("{prefix}{i}")).collect()
}

fn links(pairs: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    pairs
        .iter()
        .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
        .collect()
}

fn texts(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl GoalGraph {
    pub fn from_json(data: &str) -> Result<Self> {
        let graph: GoalGraph = serde_json::from_str(data)?;
        Ok(graph)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn children<'a>(map: &'a BTreeMap<String, Vec<String>>, code: &str) -> &'a [String] {
        let wanted = key(code);
        map.iter()
            .find(|(k, _)| key(k) == wanted)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn peos_for(&self, ieg: &str) -> Vec<String> {
        Self::children(&self.ieg_to_peo, ieg).to_vec()
    }

    pub fn plos_for(&self, peo: &str) -> Vec<String> {
        Self::children(&self.peo_to_plo, peo).to_vec()
    }

    pub fn statement(&self, level: GoalLevel, code: &str) -> Option<&str> {
        let wanted = key(code);
        self.statements
            .get(&level)?
            .iter()
            .find(|(k, _)| key(k) == wanted)
            .map(|(_, v)| v.as_str())
    }

    /// Adjacency entries that point at codes missing from the flat lists.
    pub fn dangling_links(&self) -> Vec<String> {
        let mut out = Vec::new();
        check_links(&self.ieg, &self.peo, &self.ieg_to_peo, "ieg_to_peo", &mut out);
        check_links(&self.peo, &self.plo, &self.peo_to_plo, "peo_to_plo", &mut out);
        out
    }

    pub fn builtin() -> Self {
        let mut statements = BTreeMap::new();
        statements.insert(
            GoalLevel::Ieg,
            texts(&[
                ("IEG1", "Graduates with sound knowledge and competence in their field."),
                ("IEG2", "Graduates who think critically and solve problems creatively."),
                ("IEG3", "Graduates who communicate and work effectively with others."),
                ("IEG4", "Graduates who act ethically and engage in lifelong learning."),
            ]),
        );
        statements.insert(
            GoalLevel::Peo,
            texts(&[
                ("PEO1", "Practise competently in their discipline using current knowledge and skills."),
                ("PEO2", "Solve complex problems through analysis, evaluation and innovation."),
                ("PEO3", "Lead and collaborate in diverse teams with effective communication."),
                ("PEO4", "Uphold professional ethics and pursue continuous development."),
            ]),
        );
        statements.insert(
            GoalLevel::Plo,
            texts(&[
                ("PLO1", "Apply knowledge and understanding of the discipline."),
                ("PLO2", "Demonstrate critical thinking in analysing problems."),
                ("PLO3", "Perform practical skills competently and safely."),
                ("PLO4", "Work effectively in teams with respect for others."),
                ("PLO5", "Communicate clearly with diverse audiences."),
                ("PLO6", "Use digital and numerical tools responsibly."),
                ("PLO7", "Lead with autonomy and accountability."),
                ("PLO8", "Engage in lifelong learning and entrepreneurship."),
                ("PLO9", "Practise with integrity and professional ethics."),
            ]),
        );

        Self {
            ieg: codes("IEG", 4),
            peo: codes("PEO", 4),
            plo: codes("PLO", 9),
            ieg_to_peo: links(&[
                ("IEG1", &["PEO1"]),
                ("IEG2", &["PEO2"]),
                ("IEG3", &["PEO3"]),
                ("IEG4", &["PEO4"]),
            ]),
            peo_to_plo: links(&[
                ("PEO1", &["PLO1", "PLO3", "PLO6"]),
                ("PEO2", &["PLO2"]),
                ("PEO3", &["PLO4", "PLO5", "PLO7"]),
                ("PEO4", &["PLO8", "PLO9"]),
            ]),
            statements,
        }
    }
}
