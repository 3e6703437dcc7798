use crate::config::DEFAULT_PROFILE;
use crate::error::Result;
use crate::types::Domain;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// OutcomeRecord
// ---------------------------------------------------------------------------

/// One row of a profile's mapping table: a program learning outcome and the
/// skill, values tag and domain it is taught under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    #[serde(alias = "outcome", alias = "plo")]
    pub code: String,
    #[serde(default, alias = "sc")]
    pub skill_code: String,
    #[serde(default, alias = "skill")]
    pub skill_description: String,
    #[serde(default, alias = "vbe", alias = "values")]
    pub values_tag: String,
    #[serde(default)]
    pub domain: String,
}

impl OutcomeRecord {
    pub fn new(
        code: &str,
        skill_code: &str,
        skill_description: &str,
        values_tag: &str,
        domain: Domain,
    ) -> Self {
        Self {
            code: code.to_string(),
            skill_code: skill_code.to_string(),
            skill_description: skill_description.to_string(),
            values_tag: values_tag.to_string(),
            domain: domain.as_str().to_string(),
        }
    }

    /// Parsed domain; rows with an unrecognised domain yield `None`.
    pub fn domain(&self) -> Option<Domain> {
        Domain::parse(&self.domain)
    }

    /// "SC3: clinical skills | patient safety" summary used in history rows.
    pub fn skill_values_summary(&self) -> String {
        let skill = match (self.skill_code.trim(), self.skill_description.trim()) {
            ("", d) => d.to_string(),
            (c, "") => c.to_string(),
            (c, d) => format!("{c}: {d}"),
        };
        match self.values_tag.trim() {
            "" => skill,
            v if skill.is_empty() => v.to_string(),
            v => format!("{skill} | {v}"),
        }
    }
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

pub fn normalize_profile(profile: &str) -> String {
    profile.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// OutcomeTables
// ---------------------------------------------------------------------------

/// Mapping tables keyed by profile (discipline). Profile names are stored
/// lower-cased.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutcomeTables {
    #[serde(default)]
    pub profiles: BTreeMap<String, Vec<OutcomeRecord>>,
}

impl OutcomeTables {
    pub fn from_yaml(data: &str) -> Result<Self> {
        let raw: OutcomeTables = serde_yaml::from_str(data)?;
        Ok(raw.normalized())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn normalized(self) -> Self {
        let mut profiles: BTreeMap<String, Vec<OutcomeRecord>> = BTreeMap::new();
        for (name, rows) in self.profiles {
            profiles
                .entry(normalize_profile(&name))
                .or_default()
                .extend(rows);
        }
        Self { profiles }
    }

    pub fn profile_names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    /// The table for `profile`, falling back to the generic table when the
    /// profile is blank or has no table of its own.
    pub fn table(&self, profile: &str) -> Option<&[OutcomeRecord]> {
        let key = normalize_profile(profile);
        self.profiles
            .get(&key)
            .or_else(|| self.profiles.get(DEFAULT_PROFILE))
            .map(|rows| rows.as_slice())
    }

    /// Exact, case-insensitive match on the outcome code.
    pub fn lookup(&self, profile: &str, code: &str) -> Option<&OutcomeRecord> {
        let code = normalize_code(code);
        if code.is_empty() {
            return None;
        }
        self.table(profile)?
            .iter()
            .find(|row| normalize_code(&row.code) == code)
    }

    pub fn outcome_codes(&self, profile: &str) -> Vec<String> {
        self.table(profile)
            .map(|rows| rows.iter().map(|r| normalize_code(&r.code)).collect())
            .unwrap_or_default()
    }

    /// Replace one profile's table wholesale.
    pub fn set_profile(&mut self, profile: &str, rows: Vec<OutcomeRecord>) {
        self.profiles.insert(normalize_profile(profile), rows);
    }

    /// Parse a mapping sheet exported as CSV. The header row names the
    /// columns (`code`, `skill_code`, `skill_description`, `values_tag`,
    /// `domain`, or their short aliases).
    pub fn read_csv(path: &Path) -> Result<Vec<OutcomeRecord>> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        let mut rows = Vec::new();
        for result in rdr.deserialize::<OutcomeRecord>() {
            let row = result?;
            if row.code.trim().is_empty() {
                continue;
            }
            rows.push(row);
        }
        Ok(rows)
    }

    pub fn builtin() -> Self {
        use Domain::{Affective, Cognitive, Psychomotor};

        let generic = vec![
            OutcomeRecord::new("PLO1", "SC1", "knowledge and understanding", "intellectual integrity", Cognitive),
            OutcomeRecord::new("PLO2", "SC2", "cognitive and critical thinking skills", "objectivity", Cognitive),
            OutcomeRecord::new("PLO3", "SC3", "practical skills", "safety and quality", Psychomotor),
            OutcomeRecord::new("PLO4", "SC4", "interpersonal and teamwork skills", "respect for others", Affective),
            OutcomeRecord::new("PLO5", "SC5", "communication skills", "honesty and clarity", Affective),
            OutcomeRecord::new("PLO6", "SC6", "digital and numeracy skills", "responsible use of data", Cognitive),
            OutcomeRecord::new("PLO7", "SC7", "leadership, autonomy and responsibility", "accountability", Affective),
            OutcomeRecord::new("PLO8", "SC8", "personal and entrepreneurial skills", "lifelong learning", Affective),
            OutcomeRecord::new("PLO9", "SC9", "ethics and professionalism", "professional ethics", Affective),
        ];
        let health = vec![
            OutcomeRecord::new("PLO1", "SC1", "biomedical knowledge", "evidence-based practice", Cognitive),
            OutcomeRecord::new("PLO2", "SC2", "clinical reasoning", "patient-centred care", Cognitive),
            OutcomeRecord::new("PLO3", "SC3", "clinical skills", "patient safety", Psychomotor),
            OutcomeRecord::new("PLO4", "SC4", "therapeutic communication", "empathy and compassion", Affective),
            OutcomeRecord::new("PLO5", "SC5", "professional conduct", "professional ethics", Affective),
        ];
        let engineering = vec![
            OutcomeRecord::new("PLO1", "SC1", "engineering knowledge", "intellectual integrity", Cognitive),
            OutcomeRecord::new("PLO2", "SC2", "problem analysis", "objectivity", Cognitive),
            OutcomeRecord::new("PLO3", "SC3", "design and development of solutions", "public health and safety", Cognitive),
            OutcomeRecord::new("PLO4", "SC4", "modern tool usage", "responsible practice", Psychomotor),
            OutcomeRecord::new("PLO5", "SC5", "individual and team work", "respect for others", Affective),
            OutcomeRecord::new("PLO6", "SC6", "engineering ethics", "professional ethics", Affective),
        ];

        let mut profiles = BTreeMap::new();
        profiles.insert(DEFAULT_PROFILE.to_string(), generic);
        profiles.insert("health sciences".to_string(), health);
        profiles.insert("engineering".to_string(), engineering);
        Self { profiles }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lookup_normalizes_code_and_profile() {
        let tables = OutcomeTables::builtin();
        let row = tables.lookup("  Health Sciences ", " plo3 ").unwrap();
        assert_eq!(row.skill_description, "clinical skills");
        assert_eq!(row.domain(), Some(Domain::Psychomotor));
    }

    #[test]
    fn unknown_profile_falls_back_to_generic() {
        let tables = OutcomeTables::builtin();
        let row = tables.lookup("astrophysics", "PLO5").unwrap();
        assert_eq!(row.skill_description, "communication skills");
        assert_eq!(tables.outcome_codes("").len(), 9);
    }

    #[test]
    fn miss_is_none_not_error() {
        let tables = OutcomeTables::builtin();
        assert!(tables.lookup("generic", "PLO99").is_none());
        assert!(tables.lookup("generic", "PLO").is_none());
        assert!(tables.lookup("generic", "").is_none());

        let empty = OutcomeTables::default();
        assert!(empty.lookup("generic", "PLO1").is_none());
        assert!(empty.outcome_codes("generic").is_empty());
    }

    #[test]
    fn yaml_profiles_are_lowercased() {
        let yaml = "profiles:\n  Nursing:\n    - code: plo1\n      skill_code: SC1\n      skill_description: care planning\n      values_tag: compassion\n      domain: Cognitive\n";
        let tables = OutcomeTables::from_yaml(yaml).unwrap();
        assert_eq!(tables.profile_names(), vec!["nursing".to_string()]);
        assert_eq!(tables.outcome_codes("NURSING"), vec!["PLO1".to_string()]);
        assert_eq!(
            tables.lookup("nursing", "PLO1").unwrap().domain(),
            Some(Domain::Cognitive)
        );
    }

    #[test]
    fn skill_values_summary_skips_blanks() {
        let row = OutcomeRecord::new("PLO3", "SC3", "clinical skills", "patient safety", Domain::Psychomotor);
        assert_eq!(row.skill_values_summary(), "SC3: clinical skills | patient safety");

        let mut bare = row.clone();
        bare.skill_code.clear();
        bare.values_tag.clear();
        assert_eq!(bare.skill_values_summary(), "clinical skills");
    }

    #[test]
    fn read_csv_accepts_aliases() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mapping.csv");
        std::fs::write(
            &path,
            "plo, sc, skill, vbe, domain\nPLO1, SC1, lab technique, safety, psychomotor\n, , , ,\n",
        )
        .unwrap();
        let rows = OutcomeTables::read_csv(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].skill_description, "lab technique");
        assert_eq!(rows[0].values_tag, "safety");
    }
}
