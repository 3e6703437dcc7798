use crate::error::Result;
use crate::taxonomy::normalize_level;
use crate::types::Domain;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentEntry {
    pub level: String,
    #[serde(default)]
    pub assessment: String,
    #[serde(default)]
    pub evidence: String,
}

impl AssessmentEntry {
    fn new(level: &str, assessment: &str, evidence: &str) -> Self {
        Self {
            level: level.to_string(),
            assessment: assessment.to_string(),
            evidence: evidence.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssessmentLookup {
    pub assessment: String,
    pub evidence: String,
}

/// Suggested assessment methods, split between written work (`cognitive`)
/// and observed performance (`practical`: affective and psychomotor).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentTables {
    #[serde(default)]
    pub cognitive: Vec<AssessmentEntry>,
    #[serde(default)]
    pub practical: Vec<AssessmentEntry>,
}

impl AssessmentTables {
    pub fn from_yaml(data: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(data)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn table_for(&self, domain: Option<Domain>) -> &[AssessmentEntry] {
        match domain {
            Some(d) if d.is_practical() => &self.practical,
            _ => &self.cognitive,
        }
    }

    /// A miss returns two empty strings.
    pub fn lookup(&self, level: &str, domain: Option<Domain>) -> AssessmentLookup {
        let wanted = normalize_level(level);
        if wanted.is_empty() {
            return AssessmentLookup::default();
        }
        self.table_for(domain)
            .iter()
            .find(|e| normalize_level(&e.level) == wanted)
            .map(|e| AssessmentLookup {
                assessment: e.assessment.clone(),
                evidence: e.evidence.clone(),
            })
            .unwrap_or_default()
    }

    pub fn builtin() -> Self {
        let cognitive = vec![
            AssessmentEntry::new("Remember", "Quiz / objective test", "Marked quiz scripts, answer sheets"),
            AssessmentEntry::new("Understand", "Short-answer test / concept map", "Marked test scripts, concept maps"),
            AssessmentEntry::new("Apply", "Problem set / case study", "Worked solutions, case study report"),
            AssessmentEntry::new("Analyze", "Analytical report / data interpretation task", "Written report, annotated data analysis"),
            AssessmentEntry::new("Evaluate", "Critical review / debate / position paper", "Review paper, debate notes, marking rubric"),
            AssessmentEntry::new("Create", "Project / design proposal", "Project report, design portfolio, presentation slides"),
        ];
        let practical = vec![
            AssessmentEntry::new("Receive", "Reflective journal / observation", "Journal entries, attendance and observation log"),
            AssessmentEntry::new("Respond", "Group work participation / peer evaluation", "Peer evaluation forms, meeting minutes"),
            AssessmentEntry::new("Value", "Reflective essay / professional behaviour checklist", "Reflective essay, behaviour checklist"),
            AssessmentEntry::new("Organization", "Portfolio / group project", "Portfolio entries, project plan"),
            AssessmentEntry::new("Characterization", "Practicum evaluation / supervisor appraisal", "Supervisor appraisal form, practicum logbook"),
            AssessmentEntry::new("Perception", "Observation checklist", "Completed observation checklist"),
            AssessmentEntry::new("Set", "Practical readiness check", "Pre-practical checklist, preparation log"),
            AssessmentEntry::new("Guided Response", "Supervised practical / lab exercise", "Lab sheets, supervisor sign-off"),
            AssessmentEntry::new("Mechanism", "Practical test / OSCE station", "Practical test score sheet, skills logbook"),
            AssessmentEntry::new("Complex Overt Response", "Practical examination / OSCE", "OSCE score sheets, video of performance"),
            AssessmentEntry::new("Adaptation", "Simulation / scenario-based assessment", "Simulation debrief record, performance rubric"),
            AssessmentEntry::new("Origination", "Innovation project / capstone practical", "Prototype, capstone report, demonstration video"),
        ];
        Self {
            cognitive,
            practical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_selects_table() {
        let t = AssessmentTables::builtin();
        let hit = t.lookup("mechanism", Some(Domain::Psychomotor));
        assert_eq!(hit.assessment, "Practical test / OSCE station");

        let hit = t.lookup("VALUE", Some(Domain::Affective));
        assert!(hit.evidence.contains("Reflective essay"));

        // Cognitive levels are not in the practical table.
        assert_eq!(
            t.lookup("apply", Some(Domain::Psychomotor)),
            AssessmentLookup::default()
        );
    }

    #[test]
    fn unknown_domain_reads_cognitive_table() {
        let t = AssessmentTables::builtin();
        assert_eq!(t.lookup("Apply", None).assessment, "Problem set / case study");
    }

    #[test]
    fn miss_is_empty() {
        let t = AssessmentTables::builtin();
        let miss = t.lookup("transcend", Some(Domain::Cognitive));
        assert!(miss.assessment.is_empty());
        assert!(miss.evidence.is_empty());
        assert_eq!(AssessmentTables::default().lookup("apply", None), AssessmentLookup::default());
    }
}
