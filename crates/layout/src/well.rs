//! The play field widget.
//!
//! The well owns its geometry: callers position it and then read back its
//! outer bounds and the inner play-field bounds.

use blok_gfx::{GfxError, GraphicsContext};

use crate::types::{PieceKind, Rect, Rgba, MINO_SIZE, WELL_BORDER, WELL_COLUMNS, WELL_ROWS};

const FRAME_COLOR: Rgba = Rgba::new(200, 200, 200, 255);
const BACKGROUND_COLOR: Rgba = Rgba::new(30, 30, 40, 220);

/// Locked cells, row-major, row 0 at the top.
pub type WellMatrix = [[Option<PieceKind>; WELL_COLUMNS]; WELL_ROWS];

#[derive(Debug, Clone)]
pub struct WellView {
    x: i32,
    y: i32,
    matrix: WellMatrix,
}

impl Default for WellView {
    fn default() -> Self {
        Self::new()
    }
}

impl WellView {
    pub fn new() -> Self {
        Self {
            x: 0,
            y: 0,
            matrix: [[None; WELL_COLUMNS]; WELL_ROWS],
        }
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        WELL_COLUMNS as i32 * MINO_SIZE + 2 * WELL_BORDER
    }

    pub fn height(&self) -> i32 {
        WELL_ROWS as i32 * MINO_SIZE + 2 * WELL_BORDER
    }

    pub fn well_x(&self) -> i32 {
        self.x + WELL_BORDER
    }

    pub fn well_y(&self) -> i32 {
        self.y + WELL_BORDER
    }

    pub fn well_width(&self) -> i32 {
        WELL_COLUMNS as i32 * MINO_SIZE
    }

    pub fn well_height(&self) -> i32 {
        WELL_ROWS as i32 * MINO_SIZE
    }

    pub fn outer_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width(), self.height())
    }

    pub fn inner_rect(&self) -> Rect {
        Rect::new(self.well_x(), self.well_y(), self.well_width(), self.well_height())
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<PieceKind> {
        self.matrix.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Returns false when `(col, row)` is outside the well.
    pub fn set_cell(&mut self, col: usize, row: usize, value: Option<PieceKind>) -> bool {
        match self.matrix.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.matrix = [[None; WELL_COLUMNS]; WELL_ROWS];
    }

    /// Frame, plus the play-field background when `draw_background` is set.
    pub fn draw_base<G: GraphicsContext>(
        &self,
        gcx: &mut G,
        draw_background: bool,
    ) -> Result<(), GfxError> {
        let outer = self.outer_rect();
        let inner = self.inner_rect();

        gcx.draw_filled_rect(Rect::new(outer.x, outer.y, outer.w, WELL_BORDER), FRAME_COLOR)?;
        gcx.draw_filled_rect(
            Rect::new(outer.x, inner.bottom(), outer.w, WELL_BORDER),
            FRAME_COLOR,
        )?;
        gcx.draw_filled_rect(Rect::new(outer.x, inner.y, WELL_BORDER, inner.h), FRAME_COLOR)?;
        gcx.draw_filled_rect(
            Rect::new(inner.right(), inner.y, WELL_BORDER, inner.h),
            FRAME_COLOR,
        )?;

        if draw_background {
            gcx.draw_filled_rect(inner, BACKGROUND_COLOR)?;
        }
        Ok(())
    }

    pub fn draw_content<G: GraphicsContext>(&self, gcx: &mut G) -> Result<(), GfxError> {
        for (row, cells) in self.matrix.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let Some(kind) = cell else { continue };
                let rect = Rect::new(
                    self.well_x() + col as i32 * MINO_SIZE,
                    self.well_y() + row as i32 * MINO_SIZE,
                    MINO_SIZE,
                    MINO_SIZE,
                );
                gcx.draw_filled_rect(rect, kind.color().with_alpha(255))?;
            }
        }
        Ok(())
    }
}
