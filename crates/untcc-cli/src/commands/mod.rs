//! CLI subcommands.

pub mod classify;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use untcc_core::UntccConfig;

/// Load configuration, preferring an explicit `--config` path.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<UntccConfig> {
    match config_path {
        Some(path) => Ok(UntccConfig::from_file(Path::new(path))?),
        None => Ok(UntccConfig::default()),
    }
}

/// Discover input reports: every `*.pdf` directly under `dir`, sorted by
/// name for a stable processing order.
pub fn discover_reports(dir: &Path, limit: Option<usize>) -> anyhow::Result<Vec<PathBuf>> {
    let pattern = dir.join("*.pdf");
    let pattern = pattern
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("input directory is not valid UTF-8: {}", dir.display()))?;

    let mut files: Vec<PathBuf> = glob::glob(pattern)?.filter_map(|r| r.ok()).collect();
    files.sort();

    if let Some(limit) = limit {
        files.truncate(limit);
    }

    Ok(files)
}
