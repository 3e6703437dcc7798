use crate::error::{CloError, Result};
use crate::paths;
use crate::types::Style;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PROFILE: &str = "generic";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// InstitutionConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstitutionConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// DefaultsConfig
// ---------------------------------------------------------------------------

/// Form defaults applied when a request leaves a field blank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default = "default_style")]
    pub style: String,
}

fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}

fn default_style() -> String {
    Style::Guided.as_str().to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            style: default_style(),
        }
    }
}

impl DefaultsConfig {
    /// The configured style, or `Guided` when the configured value is unusable.
    pub fn style(&self) -> Style {
        self.style.parse().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// ExportConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_history_sheet")]
    pub history_sheet: String,
    #[serde(default = "default_rubric_sheet")]
    pub rubric_sheet: String,
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
}

fn default_history_sheet() -> String {
    "History".to_string()
}

fn default_rubric_sheet() -> String {
    "Rubric".to_string()
}

fn default_file_stem() -> String {
    "clo_history".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            history_sheet: default_history_sheet(),
            rubric_sheet: default_rubric_sheet(),
            file_stem: default_file_stem(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub institution: InstitutionConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Config::new("CLO Composer")
    }
}

impl Config {
    pub fn new(institution: impl Into<String>) -> Self {
        Self {
            version: 1,
            institution: InstitutionConfig {
                name: institution.into(),
                description: None,
            },
            defaults: DefaultsConfig::default(),
            export: ExportConfig::default(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(CloError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Load the config, falling back to defaults when the project has not
    /// been initialized. Parse errors are still reported.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Config::load(root) {
            Ok(cfg) => Ok(cfg),
            Err(CloError::NotInitialized) => {
                tracing::warn!(root = %root.display(), "no .clo/config.yaml, using defaults");
                Ok(Config::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.defaults.style.parse::<Style>().is_err() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "unknown defaults.style '{}', falling back to 'guided'",
                    self.defaults.style
                ),
            });
        }

        if self.defaults.profile.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("defaults.profile is empty, '{DEFAULT_PROFILE}' will be used"),
            });
        }

        for (key, name) in [
            ("export.history_sheet", &self.export.history_sheet),
            ("export.rubric_sheet", &self.export.rubric_sheet),
        ] {
            // Spreadsheet applications reject empty names and names over 31 chars.
            if name.trim().is_empty() || name.chars().count() > 31 {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("{key} must be 1-31 characters, got '{name}'"),
                });
            }
        }

        if self.export.file_stem.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "export.file_stem must not be empty".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
