use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use once_cell::sync::Lazy;

const DB_FILE: &str = "ticklist.sqlite3";
const LOG_FILE: &str = "ticklist.log";
const DATA_DIR_VAR: &str = "TICKLIST_DATA_DIR";

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("dev", "ticklist", "ticklist"));

/// Where the data directory came from, logged once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataDirSource {
    Flag,
    Environment,
    DevTree,
    Platform,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
    db_path: PathBuf,
    log_path: PathBuf,
}

impl AppConfig {
    /// Resolve the data directory (flag, `TICKLIST_DATA_DIR`, dev tree in
    /// debug builds, platform dirs) and create it when missing.
    pub fn discover(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let env_value = env::var(DATA_DIR_VAR).ok();
        let (data_dir, source) = pick_data_dir(data_dir_override, env_value.as_deref())?;
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory at {}", data_dir.display()))?;
        tracing::debug!(dir = %data_dir.display(), ?source, "resolved data directory");
        Self::from_data_dir(data_dir)
    }

    /// Lay out file paths under an already resolved directory.
    pub fn from_data_dir(data_dir: PathBuf) -> Result<Self> {
        Ok(Self {
            db_path: data_dir.join(DB_FILE),
            log_path: data_dir.join(LOG_FILE),
            data_dir,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

/// Blank environment values count as unset.
fn pick_data_dir(
    flag: Option<PathBuf>,
    env_value: Option<&str>,
) -> Result<(PathBuf, DataDirSource)> {
    if let Some(dir) = flag {
        return Ok((dir, DataDirSource::Flag));
    }
    if let Some(dir) = env_value.map(str::trim).filter(|value| !value.is_empty()) {
        return Ok((PathBuf::from(dir), DataDirSource::Environment));
    }
    if cfg!(debug_assertions) {
        let dev_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("tmp")
            .join("dev-ticklist");
        return Ok((dev_dir, DataDirSource::DevTree));
    }
    if let Some(project) = PROJECT_DIRS.as_ref() {
        return Ok((project.data_dir().to_path_buf(), DataDirSource::Platform));
    }
    let home = match BaseDirs::new() {
        Some(base) => base.home_dir().to_path_buf(),
        None => env::current_dir().context("no home or working directory")?,
    };
    Ok((home.join(".ticklist"), DataDirSource::Fallback))
}
