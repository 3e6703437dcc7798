use anyhow::Context;
use clo_core::{config::Config, io, paths, reference::ReferenceData};
use std::path::Path;

pub fn run(root: &Path, force: bool) -> anyhow::Result<()> {
    let institution = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "CLO Composer".to_string());

    println!("Initializing CLO composer in: {}", root.display());

    let dir = paths::clo_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let config_path = paths::config_path(root);
    if force || !config_path.exists() {
        Config::new(&institution)
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }

    let written = ReferenceData::seed(root, force).context("failed to seed reference tables")?;
    for path in [
        paths::outcomes_path(root),
        paths::taxonomy_path(root),
        paths::assessment_path(root),
        paths::goals_path(root),
    ] {
        let shown = path.strip_prefix(root).unwrap_or(&path).display().to_string();
        if written.contains(&path.display().to_string()) {
            println!("  created: {shown}");
        } else {
            println!("  exists:  {shown}");
        }
    }

    println!("\nRun `clo serve` to open the composer form.");
    Ok(())
}
