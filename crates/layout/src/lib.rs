//! Player area layout - the in-game HUD of one player
//!
//! A [`PlayerArea`] owns a well, an optional garbage gauge, the next and hold
//! queues and the level/score/goal/time counters. It arranges them in one of
//! two layouts depending on the width it is given, and draws them in two
//! passes through any [`blok_gfx::GraphicsContext`].
//!
//! # Module Structure
//!
//! - [`player_area`]: layout selection, geometry and draw dispatch
//! - [`label`]: text textures cached together with their string
//! - [`well`]: the play field frame and locked minos
//! - [`gauge`]: incoming-garbage gauge
//! - [`queue`]: next and hold previews
//! - [`screen`]: placing areas in per-player columns
//!
//! # Example
//!
//! ```
//! use blok_gfx::TermContext;
//! use blok_layout::{HudStyle, PlayerArea};
//! use blok_layout::types::LayoutMode;
//!
//! let mut gcx = TermContext::new(120, 45);
//! let mut area = PlayerArea::new(&mut gcx, HudStyle::default(), false).unwrap();
//! assert_eq!(area.mode(), LayoutMode::Wide);
//!
//! area.set_max_width(&mut gcx, 480).unwrap();
//! assert_eq!(area.mode(), LayoutMode::Narrow);
//! assert!(area.regions().goal.is_none());
//! ```

pub mod gauge;
pub mod label;
pub mod player_area;
pub mod queue;
pub mod screen;
pub mod well;

pub use blok_types as types;

pub use gauge::GarbageGauge;
pub use label::CachedLabel;
pub use player_area::{BoundRegions, HudStyle, PlayerArea};
pub use queue::{HoldQueue, NextQueue};
pub use screen::{arrange, column_width};
pub use well::{WellMatrix, WellView};
