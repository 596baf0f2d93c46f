//! Client core - configuration, themes and deterministic helpers
//!
//! This crate holds everything the client needs before anything is drawn.
//! It has no dependency on a graphics backend.
//!
//! # Module Structure
//!
//! - [`config`]: search paths and `ClientConfig` read from the environment
//! - [`config_file`]: `[block]` + `key = value` config parser
//! - [`theme`]: theme asset resolution, random picks and `theme.cfg` loading
//! - [`rng`]: seeded generator and the 7-bag preview source
//! - [`timing`]: gametime formatting
//!
//! # Example
//!
//! ```
//! use blok_core::{AppPaths, SimpleRng, ThemeConfig};
//!
//! let paths = AppPaths::new("/nonexistent/config", "/nonexistent/data");
//! let (theme, warnings) = ThemeConfig::load(paths, "default");
//! assert!(warnings.is_empty());
//! assert!(theme.gameplay.draw_panels);
//!
//! // No backgrounds installed: nothing to pick.
//! let mut rng = SimpleRng::new(42);
//! assert!(theme.random_game_background(&mut rng).is_none());
//! ```

pub mod config;
pub mod config_file;
pub mod rng;
pub mod theme;
pub mod timing;

pub use blok_types as types;

pub use config::{AppPaths, ClientConfig};
pub use config_file::{ConfigBlock, ConfigEntry, ConfigError};
pub use rng::{PieceBag, SimpleRng};
pub use theme::{GameplayTheme, ThemeColors, ThemeConfig, ThemeWarning};
pub use timing::format_gametime;
