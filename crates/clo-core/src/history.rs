use crate::error::{CloError, Result};
use crate::generate::{GenerateRequest, Generated};
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// GeneratedRecord
// ---------------------------------------------------------------------------

/// One saved CLO, as it appears in the history table and its exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedRecord {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub course: String,
    pub outcome_code: String,
    pub level: String,
    pub sentence: String,
    #[serde(default)]
    pub skill_values: String,
    #[serde(default)]
    pub assessment: String,
    #[serde(default)]
    pub evidence: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub profile: String,
    #[serde(default)]
    pub verb: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub style: String,
}

/// Column headers shared by the history exports.
pub const HISTORY_COLUMNS: &[&str] = &[
    "ID",
    "Timestamp",
    "Course",
    "Outcome",
    "Level",
    "CLO Statement",
    "Skill / Values",
    "Assessment",
    "Evidence",
    "Weight (%)",
    "Profile",
];

impl GeneratedRecord {
    pub fn weight_display(&self) -> String {
        self.weight.map(|w| format!("{w}")).unwrap_or_default()
    }

    /// Cell values in `HISTORY_COLUMNS` order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            self.course.clone(),
            self.outcome_code.clone(),
            self.level.clone(),
            self.sentence.clone(),
            self.skill_values.clone(),
            self.assessment.clone(),
            self.evidence.clone(),
            self.weight_display(),
            self.profile.clone(),
        ]
    }
}

// ---------------------------------------------------------------------------
// RecordPatch
// ---------------------------------------------------------------------------

/// Manual edits to a saved row. `None` leaves a field unchanged; a weight of
/// `Some(None)` (JSON `null`) clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub sentence: Option<String>,
    #[serde(default)]
    pub assessment: Option<String>,
    #[serde(default)]
    pub evidence: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<Option<f64>>,
}

/// A field that is present, even as `null`, deserializes to `Some`.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.course.is_none()
            && self.sentence.is_none()
            && self.assessment.is_none()
            && self.evidence.is_none()
            && self.weight.is_none()
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_next_id")]
    pub next_id: u64,
    #[serde(default)]
    pub rows: Vec<GeneratedRecord>,
    pub last_updated: DateTime<Utc>,
}

fn default_version() -> u32 {
    1
}

fn default_next_id() -> u64 {
    1
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            version: 1,
            next_id: 1,
            rows: Vec::new(),
            last_updated: Utc::now(),
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Load the history table; a missing file is an empty table.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::history_path(root);
        let Some(data) = crate::io::read_optional(&path)? else {
            return Ok(Self::new());
        };
        let mut history: History = serde_yaml::from_str(&data)?;
        // Hand-edited files may carry ids past next_id.
        let max_id = history.rows.iter().map(|r| r.id).max().unwrap_or(0);
        history.next_id = history.next_id.max(max_id + 1);
        Ok(history)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::history_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append a generated CLO with a fresh id and timestamp. Returns the id.
    pub fn append(&mut self, req: &GenerateRequest, generated: &Generated) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.push(GeneratedRecord {
            id,
            timestamp: Utc::now(),
            course: req.course.trim().to_string(),
            outcome_code: generated.outcome.clone(),
            level: generated.level.clone(),
            sentence: generated.sentence.clone(),
            skill_values: generated.skill_values.clone(),
            assessment: generated.assessment.clone(),
            evidence: generated.evidence.clone(),
            weight: req.weight,
            profile: generated.profile.clone(),
            verb: req.verb.trim().to_string(),
            content: req.content.trim().to_string(),
            style: generated.style.as_str().to_string(),
        });
        self.last_updated = Utc::now();
        id
    }

    /// Replace the table with an empty one; ids restart at 1.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.next_id = 1;
        self.last_updated = Utc::now();
    }

    pub fn get(&self, id: u64) -> Option<&GeneratedRecord> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn update(&mut self, id: u64, patch: RecordPatch) -> Result<&GeneratedRecord> {
        if let Some(Some(w)) = patch.weight {
            if !w.is_finite() || !(0.0..=100.0).contains(&w) {
                return Err(CloError::invalid("weight", format!("{w} is not between 0 and 100")));
            }
        }
        let row = find_mut(&mut self.rows, id)?;
        if let Some(course) = patch.course {
            row.course = course.trim().to_string();
        }
        if let Some(sentence) = patch.sentence {
            row.sentence = sentence.trim().to_string();
        }
        if let Some(assessment) = patch.assessment {
            row.assessment = assessment.trim().to_string();
        }
        if let Some(evidence) = patch.evidence {
            row.evidence = evidence.trim().to_string();
        }
        if let Some(weight) = patch.weight {
            row.weight = weight;
        }
        self.last_updated = Utc::now();
        self.get(id).ok_or(CloError::RecordNotFound(id))
    }

    pub fn remove(&mut self, id: u64) -> Result<GeneratedRecord> {
        let pos = self
            .rows
            .iter()
            .position(|r| r.id == id)
            .ok_or(CloError::RecordNotFound(id))?;
        self.last_updated = Utc::now();
        Ok(self.rows.remove(pos))
    }
}

fn find_mut(rows: &mut [GeneratedRecord], id: u64) -> Result<&mut GeneratedRecord> {
    rows.iter_mut()
        .find(|r| r.id == id)
        .ok_or(CloError::RecordNotFound(id))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultsConfig;
    use crate::reference::ReferenceData;
    use tempfile::TempDir;

    fn generated(outcome: &str) -> (GenerateRequest, Generated) {
        let req = GenerateRequest {
            outcome: outcome.into(),
            level: "apply".into(),
            verb: "apply".into(),
            content: "ratio analysis".into(),
            course: " ACC201 ".into(),
            weight: Some(15.0),
            ..Default::default()
        };
        let out = crate::generate::generate(
            &ReferenceData::builtin(),
            &DefaultsConfig::default(),
            &req,
        )
        .unwrap();
        (req, out)
    }

    #[test]
    fn append_assigns_sequential_ids() {
        let mut h = History::new();
        let (req, out) = generated("PLO1");
        assert_eq!(h.append(&req, &out), 1);
        assert_eq!(h.append(&req, &out), 2);
        assert_eq!(h.rows[0].course, "ACC201");
        assert_eq!(h.rows[1].outcome_code, "PLO1");
        assert_eq!(h.rows[1].style, "guided");
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut h = History::new();
        let (req, out) = generated("PLO2");
        h.append(&req, &out);
        h.save(dir.path()).unwrap();

        let loaded = History::load(dir.path()).unwrap();
        assert_eq!(loaded.rows.len(), 1);
        assert_eq!(loaded.rows[0].sentence, out.sentence);
        assert_eq!(loaded.next_id, 2);
    }

    #[test]
    fn load_missing_is_empty() {
        let dir = TempDir::new().unwrap();
        let h = History::load(dir.path()).unwrap();
        assert!(h.rows.is_empty());
        assert_eq!(h.next_id, 1);
    }

    #[test]
    fn load_repairs_next_id() {
        let dir = TempDir::new().unwrap();
        let mut h = History::new();
        let (req, out) = generated("PLO1");
        h.append(&req, &out);
        h.rows[0].id = 41;
        h.next_id = 1;
        h.save(dir.path()).unwrap();
        assert_eq!(History::load(dir.path()).unwrap().next_id, 42);
    }

    #[test]
    fn reset_clears_and_restarts_ids() {
        let mut h = History::new();
        let (req, out) = generated("PLO1");
        h.append(&req, &out);
        h.append(&req, &out);
        h.reset();
        assert!(h.rows.is_empty());
        assert_eq!(h.append(&req, &out), 1);
    }

    #[test]
    fn update_and_remove() {
        let mut h = History::new();
        let (req, out) = generated("PLO1");
        let id = h.append(&req, &out);

        let row = h
            .update(
                id,
                RecordPatch {
                    sentence: Some("Apply ratio analysis to annual reports.".into()),
                    weight: Some(Some(30.0)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(row.sentence, "Apply ratio analysis to annual reports.");
        assert_eq!(row.weight, Some(30.0));
        assert_eq!(row.course, "ACC201");

        assert!(matches!(
            h.update(id, RecordPatch { weight: Some(Some(-1.0)), ..Default::default() }),
            Err(CloError::InvalidField { .. })
        ));
        assert!(matches!(
            h.update(99, RecordPatch::default()),
            Err(CloError::RecordNotFound(99))
        ));

        let removed = h.remove(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(matches!(h.remove(id), Err(CloError::RecordNotFound(_))));
    }

    #[test]
    fn patch_weight_null_clears_and_absent_keeps() {
        let mut h = History::new();
        let (req, out) = generated("PLO1");
        let id = h.append(&req, &out);

        let keep: RecordPatch = serde_json::from_str(r#"{"course": "ACC202"}"#).unwrap();
        assert_eq!(keep.weight, None);
        assert_eq!(h.update(id, keep).unwrap().weight, Some(15.0));

        let clear: RecordPatch = serde_json::from_str(r#"{"weight": null}"#).unwrap();
        assert_eq!(clear.weight, Some(None));
        assert!(!clear.is_empty());
        let row = h.update(id, clear).unwrap();
        assert_eq!(row.weight, None);
        assert_eq!(row.course, "ACC202");

        let set: RecordPatch = serde_json::from_str(r#"{"weight": 40}"#).unwrap();
        assert_eq!(h.update(id, set).unwrap().weight, Some(40.0));
    }

    #[test]
    fn cells_follow_header_order() {
        let mut h = History::new();
        let (req, out) = generated("PLO1");
        h.append(&req, &out);
        let cells = h.rows[0].cells();
        assert_eq!(cells.len(), HISTORY_COLUMNS.len());
        assert_eq!(cells[0], "1");
        assert_eq!(cells[9], "15");
    }
}
