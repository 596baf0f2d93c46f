//! Block based key/value config files.
//!
//! ```text
//! # comment
//! [colors]
//! primary = #0a0aff
//! ```

use std::fs;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// A `key = value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    /// 1-based source line.
    pub line: usize,
}

/// A `[name]` header and the entries below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigBlock {
    pub name: String,
    pub entries: Vec<ConfigEntry>,
}

/// Read and parse a config file.
pub fn load(path: &Path) -> Result<Vec<ConfigBlock>, ConfigError> {
    let src = fs::read_to_string(path)?;
    parse(&src)
}

/// Parse config text. Blocks are returned in file order.
pub fn parse(src: &str) -> Result<Vec<ConfigBlock>, ConfigError> {
    let mut blocks: Vec<ConfigBlock> = Vec::new();

    for (idx, raw) in src.lines().enumerate() {
        let line = idx + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') || text.starts_with(';') {
            continue;
        }

        if let Some(rest) = text.strip_prefix('[') {
            let name = rest.strip_suffix(']').ok_or_else(|| ConfigError::Parse {
                line,
                message: format!("unterminated block header '{}'", text),
            })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::Parse {
                    line,
                    message: "empty block name".to_string(),
                });
            }
            blocks.push(ConfigBlock {
                name: name.to_string(),
                entries: Vec::new(),
            });
            continue;
        }

        let (key, value) = text.split_once('=').ok_or_else(|| ConfigError::Parse {
            line,
            message: format!("expected 'key = value', found '{}'", text),
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::Parse {
                line,
                message: "missing key".to_string(),
            });
        }

        let block = blocks.last_mut().ok_or_else(|| ConfigError::Parse {
            line,
            message: format!("'{}' appears before any [block] header", key),
        })?;
        block.entries.push(ConfigEntry {
            key: key.to_string(),
            value: value.trim().to_string(),
            line,
        });
    }

    Ok(blocks)
}

/// Interpret `on|yes|true` and `off|no|false`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "on" | "yes" | "true" => Some(true),
        "off" | "no" | "false" => Some(false),
        _ => None,
    }
}
