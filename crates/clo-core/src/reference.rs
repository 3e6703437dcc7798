use crate::assessment::AssessmentTables;
use crate::config::{ConfigWarning, WarnLevel};
use crate::error::Result;
use crate::goals::GoalGraph;
use crate::outcome::{OutcomeRecord, OutcomeTables};
use crate::taxonomy::Taxonomy;
use crate::types::Domain;
use crate::{io, paths};
use std::path::Path;

// ---------------------------------------------------------------------------
// ReferenceData
// ---------------------------------------------------------------------------

/// All read-only lookup tables, loaded once per process.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub outcomes: OutcomeTables,
    pub taxonomy: Taxonomy,
    pub assessment: AssessmentTables,
    pub goals: GoalGraph,
}

impl ReferenceData {
    pub fn builtin() -> Self {
        Self {
            outcomes: OutcomeTables::builtin(),
            taxonomy: Taxonomy::builtin(),
            assessment: AssessmentTables::builtin(),
            goals: GoalGraph::builtin(),
        }
    }

    /// Load every table under `.clo/reference/`.
    ///
    /// A missing file yields an empty table and a warning; a malformed file
    /// yields an empty table and an error log. Loading never fails.
    pub fn load(root: &Path) -> Self {
        let data = Self {
            outcomes: load_table(&paths::outcomes_path(root), OutcomeTables::from_yaml),
            taxonomy: load_table(&paths::taxonomy_path(root), Taxonomy::from_yaml),
            assessment: load_table(&paths::assessment_path(root), AssessmentTables::from_yaml),
            goals: load_table(&paths::goals_path(root), GoalGraph::from_json),
        };
        tracing::info!(
            profiles = data.outcomes.profiles.len(),
            ieg = data.goals.ieg.len(),
            peo = data.goals.peo.len(),
            plo = data.goals.plo.len(),
            "reference data loaded"
        );
        data
    }

    /// Write the built-in tables into `.clo/reference/`. Existing files are
    /// kept unless `force` is set. Returns the paths that were written.
    pub fn seed(root: &Path, force: bool) -> Result<Vec<String>> {
        io::ensure_dir(&paths::reference_dir(root))?;
        let builtin = Self::builtin();
        let files = [
            (paths::outcomes_path(root), builtin.outcomes.to_yaml()?),
            (paths::taxonomy_path(root), builtin.taxonomy.to_yaml()?),
            (paths::assessment_path(root), builtin.assessment.to_yaml()?),
            (paths::goals_path(root), builtin.goals.to_json()?),
        ];
        let mut written = Vec::new();
        for (path, body) in files {
            let did_write = if force {
                io::atomic_write(&path, body.as_bytes())?;
                true
            } else {
                io::write_if_missing(&path, body.as_bytes())?
            };
            if did_write {
                written.push(path.display().to_string());
            }
        }
        Ok(written)
    }

    /// Replace one profile's mapping table with rows read from a CSV export
    /// and persist the outcome tables. Returns the number of rows imported.
    pub fn import_outcomes_csv(root: &Path, profile: &str, csv_path: &Path) -> Result<usize> {
        let rows: Vec<OutcomeRecord> = OutcomeTables::read_csv(csv_path)?;
        let path = paths::outcomes_path(root);
        let mut tables = match io::read_optional(&path)? {
            Some(data) => OutcomeTables::from_yaml(&data)?,
            None => OutcomeTables::default(),
        };
        let count = rows.len();
        tables.set_profile(profile, rows);
        io::atomic_write(&path, tables.to_yaml()?.as_bytes())?;
        tracing::info!(profile, count, "imported outcome mapping");
        Ok(count)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let warn = |level: WarnLevel, message: String| ConfigWarning { level, message };

        if self.outcomes.profiles.is_empty() {
            warnings.push(warn(WarnLevel::Error, "no outcome mapping tables loaded".into()));
        }
        for (profile, rows) in &self.outcomes.profiles {
            let mut seen = std::collections::HashSet::new();
            for row in rows {
                let code = crate::outcome::normalize_code(&row.code);
                if !seen.insert(code.clone()) {
                    warnings.push(warn(
                        WarnLevel::Warning,
                        format!("profile '{profile}': duplicate outcome code {code}, first row wins"),
                    ));
                }
                match row.domain() {
                    None => warnings.push(warn(
                        WarnLevel::Warning,
                        format!("profile '{profile}': {code} has unknown domain '{}'", row.domain),
                    )),
                    Some(d) if self.taxonomy.levels(Some(d)).is_empty() => warnings.push(warn(
                        WarnLevel::Warning,
                        format!("profile '{profile}': {code} uses domain '{d}' which has no taxonomy levels"),
                    )),
                    Some(_) => {}
                }
            }
        }

        for &domain in Domain::all() {
            for level in self.taxonomy.levels(Some(domain)) {
                let entry = self.taxonomy.entry(Some(domain), &level);
                if entry.is_some_and(|e| e.verbs.is_empty()) {
                    warnings.push(warn(
                        WarnLevel::Warning,
                        format!("taxonomy {domain}/{level} has no verbs"),
                    ));
                }
                let hit = self.assessment.lookup(&level, Some(domain));
                if hit.assessment.is_empty() {
                    warnings.push(warn(
                        WarnLevel::Warning,
                        format!("no assessment entry for {domain}/{level}"),
                    ));
                }
            }
        }

        for link in self.goals.dangling_links() {
            warnings.push(warn(WarnLevel::Warning, format!("goal graph {link}")));
        }

        warnings
    }
}

fn load_table<T: Default>(path: &Path, parse: fn(&str) -> Result<T>) -> T {
    let data = match io::read_optional(path) {
        Ok(Some(data)) => data,
        Ok(None) => {
            tracing::warn!(path = %path.display(), "reference file missing, using empty table");
            return T::default();
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to read reference file");
            return T::default();
        }
    };
    parse(&data).unwrap_or_else(|e| {
        tracing::error!(path = %path.display(), error = %e, "malformed reference file, using empty table");
        T::default()
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
