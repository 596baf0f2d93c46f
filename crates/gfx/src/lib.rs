//! Graphics backends for the HUD.
//!
//! HUD code draws through the [`GraphicsContext`] trait and never touches a
//! backend directly. Two backends exist:
//!
//! - [`TermContext`]: logical pixels mapped onto a character framebuffer,
//!   flushed to the terminal by [`TerminalRenderer`]
//! - `SdlContext` (feature `sdl`): an SDL2 window with TTF text
//!
//! The terminal backend is pure and is also what the tests draw into.

pub mod context;
pub mod fb;
pub mod renderer;
#[cfg(feature = "sdl")]
pub mod sdl;
pub mod term_context;

pub use blok_types as types;

pub use context::{GfxError, GraphicsContext, Texture};
pub use fb::{Cell, CellStyle, FrameBuffer};
pub use renderer::{encode_frame, TerminalRenderer};
#[cfg(feature = "sdl")]
pub use sdl::{SdlContext, SdlFont, SdlTexture, WindowEvent};
pub use term_context::{TermContext, TermFont, TermTexture, CELL_PX_H, CELL_PX_W};
