//! Incoming-garbage gauge drawn beside the well.

use blok_gfx::{GfxError, GraphicsContext};

use crate::types::{Rect, Rgba, GAUGE_WIDTH, MINO_SIZE, WELL_ROWS};

/// Empty track color.
pub const GAUGE_TRACK_COLOR: Rgba = Rgba::new(60, 60, 70, 200);

/// Filled part color.
pub const GAUGE_FILL_COLOR: Rgba = Rgba::new(220, 40, 40, 255);

#[derive(Debug, Clone)]
pub struct GarbageGauge {
    x: i32,
    y: i32,
    height: i32,
    lines: u32,
}

impl GarbageGauge {
    pub fn new(height: i32) -> Self {
        Self {
            x: 0,
            y: 0,
            height,
            lines: 0,
        }
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn width(&self) -> i32 {
        GAUGE_WIDTH
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, GAUGE_WIDTH, self.height)
    }

    /// Clamped to the number of visible well rows.
    pub fn set_line_count(&mut self, lines: u32) {
        self.lines = lines.min(WELL_ROWS as u32);
    }

    pub fn line_count(&self) -> u32 {
        self.lines
    }

    pub fn draw_passive<G: GraphicsContext>(&self, gcx: &mut G) -> Result<(), GfxError> {
        gcx.draw_filled_rect(self.rect(), GAUGE_TRACK_COLOR)
    }

    /// The filled part grows upwards from the bottom, one mino per line.
    pub fn draw_active<G: GraphicsContext>(&self, gcx: &mut G) -> Result<(), GfxError> {
        if self.lines == 0 {
            return Ok(());
        }
        let fill = (self.lines as i32 * MINO_SIZE).min(self.height);
        let rect = Rect::new(self.x, self.y + self.height - fill, GAUGE_WIDTH, fill);
        gcx.draw_filled_rect(rect, GAUGE_FILL_COLOR)
    }
}
