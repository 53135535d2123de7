use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::host::fs::AppDirs;

const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    pub profile_dir: String,
    pub temp_dir: String,
    pub log_filter: String,
}

/// User config file shape. Every key is optional and overlays the defaults.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    general: UserGeneralConfig,
}

#[derive(Debug, Default, Deserialize)]
struct UserGeneralConfig {
    profile_dir: Option<String>,
    temp_dir: Option<String>,
    log_filter: Option<String>,
}

impl RunnerConfig {
    /// Load configuration with layering: defaults → user config.
    ///
    /// An explicit `path` must exist; the per-user config file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config: RunnerConfig = toml::from_str(DEFAULT_CONFIG)?;

        let user_path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => project_dirs()
                .map(|dirs| dirs.config_dir().join("config.toml"))
                .filter(|candidate| candidate.exists()),
        };

        if let Some(user_path) = user_path {
            let user_str = fs::read_to_string(&user_path)
                .map_err(|err| anyhow!("{}: {err}", user_path.display()))?;
            config.overlay(&user_str)?;
        }

        Ok(config)
    }

    fn overlay(&mut self, user_str: &str) -> Result<()> {
        let user: UserConfig = toml::from_str(user_str)?;
        if let Some(profile_dir) = user.general.profile_dir {
            self.general.profile_dir = profile_dir;
        }
        if let Some(temp_dir) = user.general.temp_dir {
            self.general.temp_dir = temp_dir;
        }
        if let Some(log_filter) = user.general.log_filter {
            self.general.log_filter = log_filter;
        }
        Ok(())
    }

    pub fn profile_dir(&self) -> Result<PathBuf> {
        if self.general.profile_dir.trim().is_empty() {
            return default_data_dir().ok_or_else(|| anyhow!("cannot determine data directory"));
        }
        expand_tilde(&self.general.profile_dir)
    }

    pub fn temp_dir(&self) -> Result<PathBuf> {
        if self.general.temp_dir.trim().is_empty() {
            return Ok(std::env::temp_dir());
        }
        expand_tilde(&self.general.temp_dir)
    }

    pub fn app_dirs(&self) -> Result<AppDirs> {
        Ok(AppDirs::new(self.profile_dir()?, self.temp_dir()?))
    }
}

pub fn default_data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "webrunner")
}

fn expand_tilde(path: &str) -> Result<PathBuf> {
    if !path.starts_with('~') {
        return Ok(PathBuf::from(path));
    }

    let home = directories::BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .ok_or_else(|| anyhow!("cannot determine home directory"))?;
    Ok(PathBuf::from(path.replacen('~', &home.to_string_lossy(), 1)))
}
