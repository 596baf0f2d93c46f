//! The drawing surface seen by HUD code.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::{Rect, Rgb, Rgba};

#[derive(Debug, Error)]
pub enum GfxError {
    #[error("graphics init failed: {0}")]
    Init(String),

    #[error("could not load font {}: {}", .path.display(), .reason)]
    FontLoad { path: PathBuf, reason: String },

    #[error("text rendering failed: {0}")]
    TextRender(String),

    #[error("draw failed: {0}")]
    Draw(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A rendered image with known pixel size.
pub trait Texture {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
}

/// Backend that HUD elements draw through.
///
/// Coordinates are logical pixels. Fonts and textures are owned by whoever
/// requested them; the context only creates and draws them.
pub trait GraphicsContext {
    type Font;
    type Texture: Texture;

    fn screen_width(&self) -> i32;
    fn screen_height(&self) -> i32;

    fn load_font(&mut self, path: &Path, size_pt: u16) -> Result<Self::Font, GfxError>;

    /// Render `text` into a new texture. Newlines start a new line.
    fn render_text(
        &mut self,
        font: &Self::Font,
        text: &str,
        color: Rgb,
    ) -> Result<Self::Texture, GfxError>;

    fn draw_filled_rect(&mut self, rect: Rect, color: Rgba) -> Result<(), GfxError>;

    /// Load an image file. A `tint` multiplies every pixel's color.
    fn load_texture(&mut self, path: &Path, tint: Option<Rgb>) -> Result<Self::Texture, GfxError>;

    /// Draw a texture with its top-left corner at `(x, y)`.
    fn draw_texture(&mut self, texture: &Self::Texture, x: i32, y: i32) -> Result<(), GfxError>;

    /// Draw a texture stretched over `rect`.
    fn draw_texture_scaled(&mut self, texture: &Self::Texture, rect: Rect) -> Result<(), GfxError>;
}
