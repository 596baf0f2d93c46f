//! Theme loading - asset search path, random picks and `theme.cfg` parsing
//!
//! A theme is a directory `themes/<name>/` that may exist in two places: the
//! user's config directory (overrides) and the installed data directory. Any
//! file missing from both falls back to `themes/default/` in the data directory.
//!
//! `theme.cfg` understands three blocks:
//!
//! ```text
//! [meta]
//! name = anything
//!
//! [colors]
//! primary = #0a0aff
//! accent = #ffa500
//! text = #eeeeee
//!
//! [gameplay]
//! draw_wellbg = on
//! draw_labels = yes
//! draw_panels = true
//! ```
//!
//! Problems never abort loading. Each bad line is skipped and reported as a
//! [`ThemeWarning`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::config::AppPaths;
use crate::config_file::{self, ConfigError};
use crate::rng::SimpleRng;
use crate::types::Rgb;

const DEFAULT_THEME: &str = "default";

/// Color slots a theme can override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    /// Panel and box fill.
    pub primary: Rgb,
    /// Attention color (low goal counter).
    pub accent: Rgb,
    /// HUD text.
    pub text: Rgb,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: Rgb::from_hex(0x0A0AFF),
            accent: Rgb::from_hex(0xFFA500),
            text: Rgb::from_hex(0xEEEEEE),
        }
    }
}

/// Gameplay screen switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameplayTheme {
    pub draw_wellbg: bool,
    pub draw_labels: bool,
    pub draw_panels: bool,
}

impl Default for GameplayTheme {
    fn default() -> Self {
        Self {
            draw_wellbg: true,
            draw_labels: true,
            draw_panels: true,
        }
    }
}

/// Recoverable problem found while reading `theme.cfg`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeWarning {
    #[error("unknown settings block '{block}', skipped")]
    UnknownBlock { block: String },

    #[error("line {line}: unknown value '{value}' for '{key}' under '{block}', skipped")]
    InvalidValue {
        block: String,
        key: String,
        value: String,
        line: usize,
    },

    #[error("line {line}: unknown option '{key}' under '{block}', ignored")]
    UnknownOption {
        block: String,
        key: String,
        line: usize,
    },

    #[error("line {line}: could not parse color '{value}' for '{key}', ignored")]
    InvalidColor {
        key: String,
        value: String,
        line: usize,
    },

    #[error("config could not be read: {reason}")]
    Unreadable { reason: String },
}

/// A loaded theme: resolved location plus parsed settings.
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    paths: AppPaths,
    theme_dir: PathBuf,
    pub colors: ThemeColors,
    pub gameplay: GameplayTheme,
}

impl ThemeConfig {
    /// A theme with default settings, without reading `theme.cfg`.
    pub fn new(paths: AppPaths, name: &str) -> Self {
        Self {
            paths,
            theme_dir: Path::new("themes").join(name),
            colors: ThemeColors::default(),
            gameplay: GameplayTheme::default(),
        }
    }

    /// Load `theme.cfg` of the named theme.
    ///
    /// A missing file yields defaults and no warnings.
    pub fn load(paths: AppPaths, name: &str) -> (Self, Vec<ThemeWarning>) {
        let mut theme = Self::new(paths, name);
        let config_path = theme.config_path();
        let mut warnings = Vec::new();

        match config_file::load(&config_path) {
            Ok(blocks) => {
                info!(target: "themecfg", "Loading {}", config_path.display());
                theme.apply_blocks(&blocks, &mut warnings);
            }
            Err(ConfigError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warnings.push(ThemeWarning::Unreadable {
                reason: err.to_string(),
            }),
        }

        for w in &warnings {
            warn!(target: "themecfg", "{}: {}", config_path.display(), w);
        }
        (theme, warnings)
    }

    fn apply_blocks(
        &mut self,
        blocks: &[config_file::ConfigBlock],
        warnings: &mut Vec<ThemeWarning>,
    ) {
        for block in blocks {
            match block.name.as_str() {
                "meta" => continue,
                "colors" | "gameplay" => {}
                other => {
                    warnings.push(ThemeWarning::UnknownBlock {
                        block: other.to_string(),
                    });
                    continue;
                }
            }

            for entry in &block.entries {
                if !is_valid_value(&entry.value) {
                    warnings.push(ThemeWarning::InvalidValue {
                        block: block.name.clone(),
                        key: entry.key.clone(),
                        value: entry.value.clone(),
                        line: entry.line,
                    });
                    continue;
                }

                let applied = if block.name == "gameplay" {
                    self.apply_gameplay(entry)
                } else {
                    self.apply_color(entry)
                };
                if let Err(w) = applied {
                    warnings.push(w);
                }
            }
        }
    }

    fn apply_gameplay(&mut self, entry: &config_file::ConfigEntry) -> Result<(), ThemeWarning> {
        let slot = match entry.key.as_str() {
            "draw_wellbg" => &mut self.gameplay.draw_wellbg,
            "draw_labels" => &mut self.gameplay.draw_labels,
            "draw_panels" => &mut self.gameplay.draw_panels,
            _ => {
                return Err(ThemeWarning::UnknownOption {
                    block: "gameplay".to_string(),
                    key: entry.key.clone(),
                    line: entry.line,
                })
            }
        };
        *slot = config_file::parse_bool(&entry.value).ok_or_else(|| ThemeWarning::InvalidValue {
            block: "gameplay".to_string(),
            key: entry.key.clone(),
            value: entry.value.clone(),
            line: entry.line,
        })?;
        Ok(())
    }

    fn apply_color(&mut self, entry: &config_file::ConfigEntry) -> Result<(), ThemeWarning> {
        let slot = match entry.key.as_str() {
            "primary" => &mut self.colors.primary,
            "accent" => &mut self.colors.accent,
            "text" => &mut self.colors.text,
            _ => {
                return Err(ThemeWarning::UnknownOption {
                    block: "colors".to_string(),
                    key: entry.key.clone(),
                    line: entry.line,
                })
            }
        };
        *slot = parse_color(&entry.value).ok_or_else(|| ThemeWarning::InvalidColor {
            key: entry.key.clone(),
            value: entry.value.clone(),
            line: entry.line,
        })?;
        Ok(())
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn config_path(&self) -> PathBuf {
        self.resolve_path("theme.cfg")
    }

    pub fn texture(&self, file_name: &str) -> PathBuf {
        self.resolve_path(&format!("graphics/{}", file_name))
    }

    pub fn sfx(&self, file_name: &str) -> PathBuf {
        self.resolve_path(&format!("sfx/{}", file_name))
    }

    /// Find a theme file: user theme dir, then installed theme dir, then the
    /// default theme. The last candidate is returned even if it is missing.
    pub fn resolve_path(&self, file_name: &str) -> PathBuf {
        let user = self.paths.config.join(&self.theme_dir).join(file_name);
        if user.exists() {
            return user;
        }

        let installed = self.paths.data.join(&self.theme_dir).join(file_name);
        if installed.exists() {
            return installed;
        }

        self.default_theme_path(file_name)
    }

    fn default_theme_path(&self, file_name: &str) -> PathBuf {
        self.paths
            .data
            .join("themes")
            .join(DEFAULT_THEME)
            .join(file_name)
    }

    pub fn random_game_music(&self, rng: &mut SimpleRng) -> PathBuf {
        self.random_file_from("music/gameplay", rng)
            .unwrap_or_else(|| self.default_theme_path("music/gameplay/gameplay.ogg"))
    }

    pub fn random_menu_music(&self, rng: &mut SimpleRng) -> PathBuf {
        self.random_file_from("music/menu", rng)
            .unwrap_or_else(|| self.default_theme_path("music/menu/menu.ogg"))
    }

    pub fn random_game_background(&self, rng: &mut SimpleRng) -> Option<PathBuf> {
        self.random_file_from("backgrounds/gameplay", rng)
    }

    /// Pick a regular file from a resolved theme directory.
    ///
    /// Candidates are sorted by name so that a seed always picks the same file.
    pub fn random_file_from(&self, dir_name: &str, rng: &mut SimpleRng) -> Option<PathBuf> {
        let dir = self.resolve_path(dir_name);
        let entries = fs::read_dir(&dir).ok()?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        files.sort();

        rng.choose(&files).cloned()
    }
}

/// Accepted value shapes: 1-3 digits, a lowercase word, or `#RRGGBB`.
fn is_valid_value(value: &str) -> bool {
    let digits = !value.is_empty() && value.len() <= 3 && value.bytes().all(|b| b.is_ascii_digit());
    let word = !value.is_empty() && value.bytes().all(|b| b.is_ascii_lowercase());
    digits || word || parse_color(value).is_some()
}

/// Parse `#RRGGBB`.
pub fn parse_color(value: &str) -> Option<Rgb> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}
