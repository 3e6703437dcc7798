use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const CLO_DIR: &str = ".clo";
pub const REFERENCE_DIR: &str = ".clo/reference";

pub const CONFIG_FILE: &str = ".clo/config.yaml";
pub const HISTORY_FILE: &str = ".clo/history.yaml";

pub const OUTCOMES_FILE: &str = "outcomes.yaml";
pub const TAXONOMY_FILE: &str = "taxonomy.yaml";
pub const ASSESSMENT_FILE: &str = "assessment.yaml";
pub const GOALS_FILE: &str = "goals.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn clo_dir(root: &Path) -> PathBuf {
    root.join(CLO_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn history_path(root: &Path) -> PathBuf {
    root.join(HISTORY_FILE)
}

pub fn reference_dir(root: &Path) -> PathBuf {
    root.join(REFERENCE_DIR)
}

pub fn outcomes_path(root: &Path) -> PathBuf {
    reference_dir(root).join(OUTCOMES_FILE)
}

pub fn taxonomy_path(root: &Path) -> PathBuf {
    reference_dir(root).join(TAXONOMY_FILE)
}

pub fn assessment_path(root: &Path) -> PathBuf {
    reference_dir(root).join(ASSESSMENT_FILE)
}

pub fn goals_path(root: &Path) -> PathBuf {
    reference_dir(root).join(GOALS_FILE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/proj/.clo/config.yaml")
        );
        assert_eq!(
            history_path(root),
            PathBuf::from("/tmp/proj/.clo/history.yaml")
        );
        assert_eq!(
            goals_path(root),
            PathBuf::from("/tmp/proj/.clo/reference/goals.json")
        );
    }
}
