pub mod generate;
pub mod goals;
pub mod history;
pub mod init;
pub mod lookup;
pub mod reference;
pub mod serve;

use anyhow::Context;
use clo_core::config::Config;
use clo_core::reference::ReferenceData;
use clo_core::{paths, CloError};
use std::path::Path;

/// Reference tables for an initialized project.
pub fn load_reference(root: &Path) -> anyhow::Result<ReferenceData> {
    if !paths::clo_dir(root).is_dir() {
        return Err(CloError::NotInitialized.into());
    }
    Ok(ReferenceData::load(root))
}

pub fn load_config(root: &Path) -> anyhow::Result<Config> {
    Config::load_or_default(root).context("failed to load .clo/config.yaml")
}

/// `--profile`, or the configured default when omitted.
pub fn profile_or_default(profile: Option<String>, config: &Config) -> String {
    match profile {
        Some(p) if !p.trim().is_empty() => clo_core::outcome::normalize_profile(&p),
        _ => clo_core::outcome::normalize_profile(&config.defaults.profile),
    }
}
