//! TermContext: a `GraphicsContext` that draws into a terminal framebuffer.
//!
//! Logical pixels map onto character cells, `CELL_PX_W` x `CELL_PX_H` pixels
//! per cell. This is pure (no I/O); `TerminalRenderer` puts the frame on screen.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::context::{GfxError, GraphicsContext, Texture};
use crate::fb::{Cell, FrameBuffer};
use crate::types::{Rect, Rgb, Rgba};

/// Logical pixels per terminal column.
pub const CELL_PX_W: i32 = 8;

/// Logical pixels per terminal row.
pub const CELL_PX_H: i32 = 16;

/// Font sizes at or above this render bold.
const BOLD_PT: u16 = 32;

/// Terminal "font": only the size survives, as boldness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermFont {
    size_pt: u16,
}

impl TermFont {
    pub fn size_pt(&self) -> u16 {
        self.size_pt
    }

    pub fn is_bold(&self) -> bool {
        self.size_pt >= BOLD_PT
    }
}

/// Rendered text waiting to be placed on the framebuffer.
///
/// Images have no pixels here; they only remember their file and tint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermTexture {
    lines: Vec<String>,
    color: Rgb,
    bold: bool,
    image: Option<PathBuf>,
}

impl TermTexture {
    pub fn image_path(&self) -> Option<&Path> {
        self.image.as_deref()
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }
}

impl Texture for TermTexture {
    fn width(&self) -> i32 {
        if self.image.is_some() {
            return 0;
        }
        let cols = self.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        cols as i32 * CELL_PX_W
    }

    fn height(&self) -> i32 {
        if self.image.is_some() {
            return 0;
        }
        self.lines.len().max(1) as i32 * CELL_PX_H
    }
}

pub struct TermContext {
    fb: FrameBuffer,
    text_renders: u64,
}

impl TermContext {
    /// A context covering `cols` x `rows` terminal cells.
    pub fn new(cols: u16, rows: u16) -> Self {
        info!(target: "video", "{}x{} terminal surface created", cols, rows);
        Self {
            fb: FrameBuffer::new(cols, rows),
            text_renders: 0,
        }
    }

    /// Follow a terminal resize. The next frame starts blank.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.fb.resize(cols, rows);
    }

    pub fn clear(&mut self) {
        self.fb.clear(Cell::default());
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.fb
    }

    /// Number of `render_text` calls so far.
    pub fn text_render_count(&self) -> u64 {
        self.text_renders
    }

    /// Cell span `[start, end)` covering the pixel span `[start_px, start_px + len_px)`.
    ///
    /// Any non-empty span covers at least one cell.
    fn cell_span(start_px: i32, len_px: i32, cell_px: i32, limit: u16) -> Option<(u16, u16)> {
        if len_px <= 0 {
            return None;
        }
        let start = start_px.div_euclid(cell_px);
        let end = (start_px + len_px).div_euclid(cell_px).max(start + 1);
        let start = start.max(0);
        let end = end.min(limit as i32);
        if start >= end {
            return None;
        }
        Some((start as u16, end as u16))
    }
}

impl GraphicsContext for TermContext {
    type Font = TermFont;
    type Texture = TermTexture;

    fn screen_width(&self) -> i32 {
        self.fb.width() as i32 * CELL_PX_W
    }

    fn screen_height(&self) -> i32 {
        self.fb.height() as i32 * CELL_PX_H
    }

    fn load_font(&mut self, path: &Path, size_pt: u16) -> Result<TermFont, GfxError> {
        info!(target: "video", "Loading {} ({}pt)", path.display(), size_pt);
        Ok(TermFont { size_pt })
    }

    fn render_text(&mut self, font: &TermFont, text: &str, color: Rgb) -> Result<TermTexture, GfxError> {
        self.text_renders += 1;
        Ok(TermTexture {
            lines: text.lines().map(str::to_string).collect(),
            color,
            bold: font.is_bold(),
            image: None,
        })
    }

    fn load_texture(&mut self, path: &Path, tint: Option<Rgb>) -> Result<TermTexture, GfxError> {
        info!(target: "video", "Loading {}", path.display());
        std::fs::metadata(path)?;
        Ok(TermTexture {
            lines: Vec::new(),
            color: tint.unwrap_or(Rgb::new(0xFF, 0xFF, 0xFF)),
            bold: false,
            image: Some(path.to_path_buf()),
        })
    }

    fn draw_filled_rect(&mut self, rect: Rect, color: Rgba) -> Result<(), GfxError> {
        let cols = Self::cell_span(rect.x, rect.w, CELL_PX_W, self.fb.width());
        let rows = Self::cell_span(rect.y, rect.h, CELL_PX_H, self.fb.height());
        if let (Some((x0, x1)), Some((y0, y1))) = (cols, rows) {
            self.fb.blend_rect(x0, y0, x1 - x0, y1 - y0, color);
        }
        Ok(())
    }

    fn draw_texture(&mut self, texture: &TermTexture, x: i32, y: i32) -> Result<(), GfxError> {
        let col = x.div_euclid(CELL_PX_W);
        let row = y.div_euclid(CELL_PX_H);
        if col < 0 || col > u16::MAX as i32 {
            return Ok(());
        }
        for (i, line) in texture.lines.iter().enumerate() {
            let r = row + i as i32;
            if r < 0 || r >= self.fb.height() as i32 {
                continue;
            }
            self.fb.put_str(col as u16, r as u16, line, texture.color, texture.bold);
        }
        Ok(())
    }

    /// Cells cannot be stretched: text lands at the top-left of `rect` and
    /// images draw nothing.
    fn draw_texture_scaled(&mut self, texture: &TermTexture, rect: Rect) -> Result<(), GfxError> {
        if texture.image.is_some() {
            return Ok(());
        }
        self.draw_texture(texture, rect.x, rect.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_size_is_measured_in_logical_pixels() {
        let gcx = TermContext::new(120, 45);
        assert_eq!(gcx.screen_width(), 960);
        assert_eq!(gcx.screen_height(), 720);
    }

    #[test]
    fn thin_rect_still_covers_a_cell() {
        assert_eq!(TermContext::cell_span(470, 10, CELL_PX_W, 100), Some((58, 60)));
        assert_eq!(TermContext::cell_span(3, 2, CELL_PX_W, 100), Some((0, 1)));
        assert_eq!(TermContext::cell_span(3, 0, CELL_PX_W, 100), None);
    }

    #[test]
    fn offscreen_rect_is_ignored() {
        assert_eq!(TermContext::cell_span(-40, 16, CELL_PX_W, 100), None);
        assert_eq!(TermContext::cell_span(900, 16, CELL_PX_W, 100), None);
    }

    #[test]
    fn multi_line_texture_size() {
        let mut gcx = TermContext::new(10, 10);
        let font = gcx.load_font(Path::new("unused.ttf"), 28).unwrap();
        let tex = gcx.render_text(&font, "AB\nCDEF", Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(tex.width(), 4 * CELL_PX_W);
        assert_eq!(tex.height(), 2 * CELL_PX_H);
        assert!(!tex.is_bold());
    }

    #[test]
    fn image_texture_keeps_its_path_and_tint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bg.png");
        std::fs::write(&path, b"png").unwrap();

        let mut gcx = TermContext::new(10, 10);
        let tex = gcx.load_texture(&path, Some(Rgb::new(10, 20, 30))).unwrap();
        assert_eq!(tex.image_path(), Some(path.as_path()));
        assert_eq!(tex.color(), Rgb::new(10, 20, 30));
        assert_eq!((tex.width(), tex.height()), (0, 0));

        gcx.draw_texture_scaled(&tex, Rect::new(0, 0, 80, 160)).unwrap();
        assert_eq!(gcx.frame().get(0, 0), Some(Cell::default()));
    }

    #[test]
    fn missing_image_is_an_io_error() {
        let mut gcx = TermContext::new(10, 10);
        let err = gcx.load_texture(Path::new("no/such/bg.png"), None).unwrap_err();
        assert!(matches!(err, GfxError::Io(_)));
    }

    #[test]
    fn scaled_text_lands_at_the_rect_origin() {
        let mut gcx = TermContext::new(10, 10);
        let font = gcx.load_font(Path::new("unused.ttf"), 28).unwrap();
        let tex = gcx.render_text(&font, "HI", Rgb::new(1, 2, 3)).unwrap();
        gcx.draw_texture_scaled(&tex, Rect::new(16, 32, 200, 200)).unwrap();
        assert_eq!(gcx.frame().get(2, 2).map(|c| c.ch), Some('H'));
    }
}
