use crate::error::Result;
use crate::types::Domain;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// TaxonomyEntry
// ---------------------------------------------------------------------------

/// One rung of a domain's taxonomy: the verbs it admits plus the criterion
/// adverb and condition clause that qualify a sentence at this level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub level: String,
    #[serde(default, deserialize_with = "verbs_from_list_or_csv")]
    pub verbs: Vec<String>,
    #[serde(default)]
    pub criterion: String,
    #[serde(default)]
    pub condition: String,
}

impl TaxonomyEntry {
    fn new(level: &str, verbs: &str, criterion: &str, condition: &str) -> Self {
        Self {
            level: level.to_string(),
            verbs: split_verbs(verbs),
            criterion: criterion.to_string(),
            condition: condition.to_string(),
        }
    }
}

/// Split a comma-separated verb cell, dropping blanks.
pub fn split_verbs(s: &str) -> Vec<String> {
    s.split(',')
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VerbCell {
    List(Vec<String>),
    Csv(String),
}

fn verbs_from_list_or_csv<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match VerbCell::deserialize(deserializer)? {
        VerbCell::List(items) => items
            .iter()
            .flat_map(|item| split_verbs(item))
            .collect(),
        VerbCell::Csv(s) => split_verbs(&s),
    })
}

/// Level names compare case-insensitively; `_` and `-` count as spaces so
/// URL segments like `guided_response` match "Guided Response".
pub fn normalize_level(level: &str) -> String {
    level
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ---------------------------------------------------------------------------
// CriterionLookup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CriterionLookup {
    pub criterion: String,
    pub condition: String,
}

// ---------------------------------------------------------------------------
// Taxonomy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Taxonomy {
    #[serde(default)]
    pub domains: BTreeMap<Domain, Vec<TaxonomyEntry>>,
    /// Generic condition used when a level is not in the table.
    #[serde(default)]
    pub fallback_conditions: BTreeMap<Domain, String>,
}

impl Taxonomy {
    pub fn from_yaml(data: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(data)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Level display names for a domain, lowest rung first.
    pub fn levels(&self, domain: Option<Domain>) -> Vec<String> {
        domain
            .and_then(|d| self.domains.get(&d))
            .map(|entries| entries.iter().map(|e| e.level.clone()).collect())
            .unwrap_or_default()
    }

    pub fn entry(&self, domain: Option<Domain>, level: &str) -> Option<&TaxonomyEntry> {
        let wanted = normalize_level(level);
        if wanted.is_empty() {
            return None;
        }
        self.domains
            .get(&domain?)?
            .iter()
            .find(|e| normalize_level(&e.level) == wanted)
    }

    pub fn verbs(&self, domain: Option<Domain>, level: &str) -> Vec<String> {
        self.entry(domain, level)
            .map(|e| e.verbs.clone())
            .unwrap_or_default()
    }

    /// Criterion and condition for a level. A level miss keeps the criterion
    /// empty and falls back to the domain's generic condition; an unknown
    /// domain yields both empty.
    pub fn criterion(&self, domain: Option<Domain>, level: &str) -> CriterionLookup {
        if let Some(entry) = self.entry(domain, level) {
            return CriterionLookup {
                criterion: entry.criterion.clone(),
                condition: entry.condition.clone(),
            };
        }
        CriterionLookup {
            criterion: String::new(),
            condition: domain
                .and_then(|d| self.fallback_conditions.get(&d))
                .cloned()
                .unwrap_or_default(),
        }
    }

    pub fn builtin() -> Self {
        let cognitive = vec![
            TaxonomyEntry::new(
                "Remember",
                "define, describe, identify, list, name, outline, recall, recognise, state",
                "accurately",
                "when recalling key concepts, principles, or foundational information",
            ),
            TaxonomyEntry::new(
                "Understand",
                "classify, compare, discuss, distinguish, explain, interpret, paraphrase, summarise",
                "clearly and coherently",
                "when interpreting relationships, processes, or mechanisms in a given context",
            ),
            TaxonomyEntry::new(
                "Apply",
                "apply, calculate, demonstrate, execute, illustrate, implement, solve, use",
                "effectively",
                "when applying knowledge, data, tools, or methods to relevant tasks, results, or case scenarios",
            ),
            TaxonomyEntry::new(
                "Analyze",
                "analyse, analyze, categorise, deconstruct, differentiate, examine, investigate, organise",
                "critically",
                "when examining information from multiple sources or breaking down complex issues",
            ),
            TaxonomyEntry::new(
                "Evaluate",
                "appraise, assess, critique, defend, evaluate, judge, justify, recommend",
                "independently and with sound judgment",
                "when assessing alternatives or making decisions in analytical or problem-solving situations",
            ),
            TaxonomyEntry::new(
                "Create",
                "construct, create, design, develop, formulate, generate, plan, propose",
                "innovatively and systematically",
                "when generating new ideas, solutions, designs, or approaches",
            ),
        ];
        let affective = vec![
            TaxonomyEntry::new(
                "Receive",
                "accept, acknowledge, attend, follow, listen, observe",
                "with openness and respect",
                "when engaging with information, peers, stakeholders, or diverse perspectives in academic or professional contexts",
            ),
            TaxonomyEntry::new(
                "Respond",
                "answer, assist, comply, contribute, cooperate, discuss, participate, respond",
                "actively and responsibly",
                "when participating in teamwork, collaboration, dialogue, or structured feedback activities",
            ),
            TaxonomyEntry::new(
                "Value",
                "appreciate, commit, demonstrate, initiate, justify, share, support, value",
                "consistently and sincerely",
                "when demonstrating ethical, professional, or socially responsible behaviour",
            ),
            TaxonomyEntry::new(
                "Organization",
                "adapt, adhere, arrange, balance, integrate, prioritise, reconcile, synthesise",
                "constructively",
                "when integrating, prioritising, or balancing multiple perspectives, values, or sources of information",
            ),
            TaxonomyEntry::new(
                "Characterization",
                "act, display, exemplify, influence, practise, qualify, serve, uphold",
                "ethically and with integrity",
                "sustaining academic, organisational, or professional practice over time",
            ),
        ];
        let psychomotor = vec![
            TaxonomyEntry::new(
                "Perception",
                "detect, differentiate, distinguish, identify, observe, recognise, select",
                "accurately and attentively",
                "when identifying relevant cues, signals, data, or movement patterns during observation or demonstration",
            ),
            TaxonomyEntry::new(
                "Set",
                "arrange, begin, display, position, prepare, show, start",
                "with readiness and precision",
                "when preparing to initiate a task, procedure, operation, or motor skill performance",
            ),
            TaxonomyEntry::new(
                "Guided Response",
                "copy, follow, imitate, practise, reproduce, respond, trace",
                "under supervision and with control",
                "following structured practice or supervised execution of tasks, skills, or procedures",
            ),
            TaxonomyEntry::new(
                "Mechanism",
                "assemble, calibrate, construct, handle, manipulate, measure, perform",
                "competently",
                "when performing learned procedures, operations, or techniques consistently",
            ),
            TaxonomyEntry::new(
                "Complex Overt Response",
                "coordinate, demonstrate, execute, manipulate, operate, perform",
                "efficiently and confidently",
                "when executing advanced or multi-step tasks requiring coordination, fluency, or sustained performance",
            ),
            TaxonomyEntry::new(
                "Adaptation",
                "adapt, alter, modify, rearrange, reorganise, revise, vary",
                "appropriately and safely",
                "when modifying actions, techniques, or workflows in response to new demands or conditions",
            ),
            TaxonomyEntry::new(
                "Origination",
                "combine, compose, construct, create, design, initiate, originate",
                "creatively and effectively",
                "when developing new strategies, techniques, patterns, or movement innovations",
            ),
        ];

        let mut domains = BTreeMap::new();
        domains.insert(Domain::Cognitive, cognitive);
        domains.insert(Domain::Affective, affective);
        domains.insert(Domain::Psychomotor, psychomotor);

        let mut fallback_conditions = BTreeMap::new();
        fallback_conditions.insert(Domain::Cognitive, "interpreting tasks".to_string());
        fallback_conditions.insert(
            Domain::Affective,
            "engaging in professional and academic contexts".to_string(),
        );
        fallback_conditions.insert(
            Domain::Psychomotor,
            "performing practical procedures".to_string(),
        );

        Self {
            domains,
            fallback_conditions,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_in_order() {
        let t = Taxonomy::builtin();
        let levels = t.levels(Some(Domain::Cognitive));
        assert_eq!(levels.first().map(String::as_str), Some("Remember"));
        assert_eq!(levels.last().map(String::as_str), Some("Create"));
        assert_eq!(t.levels(Some(Domain::Psychomotor)).len(), 7);
        assert!(t.levels(None).is_empty());
    }

    #[test]
    fn level_match_ignores_case_and_separators() {
        let t = Taxonomy::builtin();
        let entry = t.entry(Some(Domain::Psychomotor), "guided_response").unwrap();
        assert_eq!(entry.level, "Guided Response");
        assert!(t.entry(Some(Domain::Psychomotor), "  COMPLEX   overt-response ").is_some());
    }

    #[test]
    fn verbs_miss_is_empty() {
        let t = Taxonomy::builtin();
        assert!(t.verbs(Some(Domain::Cognitive), "apply").contains(&"solve".to_string()));
        assert!(t.verbs(Some(Domain::Cognitive), "transcend").is_empty());
        assert!(t.verbs(None, "apply").is_empty());
        // Levels belong to one domain only.
        assert!(t.verbs(Some(Domain::Affective), "apply").is_empty());
    }

    #[test]
    fn criterion_hit_and_fallback() {
        let t = Taxonomy::builtin();
        let hit = t.criterion(Some(Domain::Psychomotor), "Mechanism");
        assert_eq!(hit.criterion, "competently");
        assert!(hit.condition.starts_with("when performing learned procedures"));

        let miss = t.criterion(Some(Domain::Cognitive), "transcend");
        assert_eq!(miss.criterion, "");
        assert_eq!(miss.condition, "interpreting tasks");

        assert_eq!(t.criterion(None, "apply"), CriterionLookup::default());
    }

    #[test]
    fn yaml_accepts_comma_separated_verbs() {
        let yaml = "domains:\n  cognitive:\n    - level: Apply\n      verbs: \"Apply, Solve , ,use\"\n      criterion: effectively\n      condition: when solving problems\n    - level: Create\n      verbs: [design, \"build, plan\"]\n";
        let t = Taxonomy::from_yaml(yaml).unwrap();
        assert_eq!(
            t.verbs(Some(Domain::Cognitive), "apply"),
            vec!["apply", "solve", "use"]
        );
        assert_eq!(
            t.verbs(Some(Domain::Cognitive), "create"),
            vec!["design", "build", "plan"]
        );
        assert!(t.fallback_conditions.is_empty());
    }

    #[test]
    fn builtin_roundtrips_through_yaml() {
        let t = Taxonomy::builtin();
        let parsed = Taxonomy::from_yaml(&t.to_yaml().unwrap()).unwrap();
        assert_eq!(parsed.domains, t.domains);
    }
}
