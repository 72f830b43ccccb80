use anyhow::Context;
use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default prospector data directory: ~/.prospector
pub fn get_prospector_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".prospector"))
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    toml::from_str::<AppConfig>(&s).with_context(|| format!("parse config {}", path.display()))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.prospector/config.toml
    let home_dir = get_prospector_data_dir().ok();
    let home_config = home_dir.as_ref().map(|d| d.join("config.toml"));

    // Priority 2: ./config.toml
    let local_config = Path::new("config.toml");

    let mut cfg = match home_config.filter(|p| p.exists()) {
        Some(p) => load_from_path(&p)?,
        None if local_config.exists() => load_from_path(local_config)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());

    let cwd = std::env::current_dir().context("resolve current directory")?;
    resolve_paths(&mut cfg, &cwd);

    Ok(cfg)
}

/// Environment overrides, highest priority. Blank values are ignored.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("PROSPECTOR_DATA_DIR") {
        cfg.data.directory = v;
    }
    if let Some(v) = get("PROSPECTOR_WORKFLOW_VARIANT") {
        match v.parse() {
            Ok(variant) => cfg.workflow.variant = variant,
            Err(e) => tracing::warn!("ignoring PROSPECTOR_WORKFLOW_VARIANT: {}", e),
        }
    }
    if let Some(v) = get("PROSPECTOR_LOG_LEVEL") {
        cfg.logging.level = v;
    }
}

/// Makes relative data, export and log directories absolute against `cwd`.
pub fn resolve_paths(cfg: &mut AppConfig, cwd: &Path) {
    let absolutize = |p: &str| -> String {
        let path = Path::new(p);
        if path.is_absolute() {
            p.to_string()
        } else {
            cwd.join(path).to_string_lossy().to_string()
        }
    };

    cfg.data.directory = absolutize(&cfg.data.directory);
    if let Some(dir) = cfg.export.directory.as_deref().filter(|d| !d.trim().is_empty()) {
        cfg.export.directory = Some(absolutize(dir));
    }
    if let Some(dir) = cfg.logging.directory.as_deref().filter(|d| !d.trim().is_empty()) {
        cfg.logging.directory = Some(absolutize(dir));
    }
}
