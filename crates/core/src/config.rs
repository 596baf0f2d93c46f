//! Client runtime configuration and search paths.
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;

/// Root directories assets are looked up in.
///
/// `config` holds user overrides (custom themes), `data` the installed assets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppPaths {
    pub config: PathBuf,
    pub data: PathBuf,
}

impl AppPaths {
    pub fn new(config: impl Into<PathBuf>, data: impl Into<PathBuf>) -> Self {
        Self {
            config: config.into(),
            data: data.into(),
        }
    }

    /// Platform directories, or `./data` for both when none can be determined.
    pub fn platform_default() -> Self {
        match project_dirs() {
            Some(dirs) => Self::new(dirs.config_dir(), dirs.data_dir()),
            None => Self::new("data", "data"),
        }
    }

    pub fn font(&self, file_name: &str) -> PathBuf {
        self.data.join("fonts").join(file_name)
    }
}

/// Configuration required to start the client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub theme: String,
    pub players: usize,
    pub seed: u32,
    pub draw_gauge: bool,
    pub paths: AppPaths,
    pub log_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let paths = AppPaths::platform_default();
        let log_dir = default_log_dir(&paths);
        Self {
            theme: "default".to_string(),
            players: 1,
            seed: 1,
            draw_gauge: false,
            paths,
            log_dir,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BLOK_THEME` - Theme directory name (default: default)
    /// - `BLOK_PLAYERS` - Number of player areas, 1 or 2 (default: 1)
    /// - `BLOK_SEED` - Seed for previews and theme picks (default: 1)
    /// - `BLOK_GAUGE` - Draw garbage gauges (default: on with 2 players)
    /// - `BLOK_DATA_DIR` - Installed asset directory
    /// - `BLOK_CONFIG_DIR` - User override directory
    /// - `BLOK_LOG_DIR` - Log file directory
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(theme) = env::var("BLOK_THEME") {
            if !theme.trim().is_empty() {
                config.theme = theme.trim().to_string();
            }
        }

        if let Some(players) = read_env::<usize>("BLOK_PLAYERS") {
            config.players = players.clamp(1, 2);
        }

        if let Some(seed) = read_env::<u32>("BLOK_SEED") {
            config.seed = seed;
        }

        config.draw_gauge = read_env_bool("BLOK_GAUGE").unwrap_or(config.players > 1);

        if let Ok(dir) = env::var("BLOK_DATA_DIR") {
            config.paths.data = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("BLOK_CONFIG_DIR") {
            config.paths.config = PathBuf::from(dir);
        }

        config.log_dir = env::var("BLOK_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_log_dir(&config.paths));

        config
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "blok", "blok")
}

fn default_log_dir(paths: &AppPaths) -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| Path::new(&paths.config).join("logs"))
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

fn read_env_bool(key: &str) -> Option<bool> {
    let value = env::var(key).ok()?;
    crate::config_file::parse_bool(&value.trim().to_lowercase())
        .or_else(|| match value.trim() {
            "1" => Some(true),
            "0" => Some(false),
            _ => None,
        })
}
