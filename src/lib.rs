//! Blok (workspace facade crate).
//!
//! Re-exports the workspace crates under short names so the binary, the
//! integration tests and the benches share one import path:
//! `blok::{core, gfx, layout, types}`.

pub use blok_core as core;
pub use blok_gfx as gfx;
pub use blok_layout as layout;
pub use blok_types as types;
