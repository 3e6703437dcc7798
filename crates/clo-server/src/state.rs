use clo_core::config::Config;
use clo_core::reference::ReferenceData;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub reference: Arc<ReferenceData>,
    pub config: Arc<Config>,
    /// Held across load/modify/save of `.clo/history.yaml`.
    pub history_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Load reference tables and config from `root`. Neither step fails:
    /// missing tables are empty and a broken config falls back to defaults.
    pub fn new(root: PathBuf) -> Self {
        let reference = ReferenceData::load(&root);
        let config = match Config::load_or_default(&root) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::error!(error = %e, "unreadable .clo/config.yaml, using defaults");
                Config::default()
            }
        };
        for w in config.validate() {
            tracing::warn!(level = ?w.level, "{}", w.message);
        }
        Self::with_data(root, reference, config)
    }

    pub fn with_data(root: PathBuf, reference: ReferenceData, config: Config) -> Self {
        Self {
            root,
            reference: Arc::new(reference),
            config: Arc::new(config),
            history_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Request profile, or the configured default when blank.
    pub fn profile_or_default(&self, profile: Option<&str>) -> String {
        match profile.map(str::trim) {
            Some(p) if !p.is_empty() => clo_core::outcome::normalize_profile(p),
            _ => clo_core::outcome::normalize_profile(&self.config.defaults.profile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_stores_root() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = AppState::new(dir.path().to_path_buf());
        assert_eq!(state.root, dir.path());
        assert!(state.reference.outcomes.profiles.is_empty());
        assert_eq!(state.config.defaults.profile, "generic");
    }

    #[test]
    fn blank_profile_uses_default() {
        let state = AppState::with_data(
            PathBuf::from("/tmp/clo"),
            ReferenceData::builtin(),
            Config::default(),
        );
        assert_eq!(state.profile_or_default(None), "generic");
        assert_eq!(state.profile_or_default(Some("  ")), "generic");
        assert_eq!(state.profile_or_default(Some(" Engineering ")), "engineering");
    }
}
