//! Next and hold queue widgets.
//!
//! Both draw small pieces into slots `SIDEBAR_WIDTH` wide, each piece
//! centered horizontally in its slot.

use arrayvec::ArrayVec;
use blok_gfx::{GfxError, GraphicsContext};

use crate::types::{PieceKind, Rect, INNER_PADDING, MINO_SIZE, SIDEBAR_WIDTH, WIDE_PREVIEW_COUNT};

/// Mino size used for queue previews.
pub const MINI_MINO: i32 = MINO_SIZE / 2;

/// Vertical distance between consecutive preview slots.
pub const SLOT_HEIGHT: i32 = 2 * MINI_MINO + INNER_PADDING;

/// Frames the hold slot stays highlighted after a swap.
pub const HOLD_HIGHLIGHT_FRAMES: u32 = 20;

fn draw_mini_piece<G: GraphicsContext>(
    gcx: &mut G,
    kind: PieceKind,
    slot_x: i32,
    slot_y: i32,
    alpha: u8,
) -> Result<(), GfxError> {
    let x = slot_x + (SIDEBAR_WIDTH - 4 * MINI_MINO) / 2;
    let color = kind.color().with_alpha(alpha);
    for (dx, dy) in kind.preview_shape() {
        let rect = Rect::new(
            x + dx as i32 * MINI_MINO,
            slot_y + dy as i32 * MINI_MINO,
            MINI_MINO,
            MINI_MINO,
        );
        gcx.draw_filled_rect(rect, color)?;
    }
    Ok(())
}

/// Upcoming pieces, of which the first `preview_count` are shown.
#[derive(Debug, Clone)]
pub struct NextQueue {
    preview_count: usize,
    pieces: ArrayVec<PieceKind, WIDE_PREVIEW_COUNT>,
}

impl Default for NextQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl NextQueue {
    pub fn new() -> Self {
        Self {
            preview_count: WIDE_PREVIEW_COUNT,
            pieces: ArrayVec::new(),
        }
    }

    /// Clamped to `1..=5`.
    pub fn set_preview_count(&mut self, count: usize) {
        self.preview_count = count.clamp(1, WIDE_PREVIEW_COUNT);
    }

    pub fn preview_count(&self) -> usize {
        self.preview_count
    }

    /// Replace the upcoming pieces; anything past five is dropped.
    pub fn set_pieces(&mut self, pieces: &[PieceKind]) {
        self.pieces.clear();
        self.pieces
            .extend(pieces.iter().copied().take(WIDE_PREVIEW_COUNT));
    }

    /// The pieces that are actually drawn.
    pub fn visible(&self) -> &[PieceKind] {
        let n = self.preview_count.min(self.pieces.len());
        &self.pieces[..n]
    }

    pub fn draw<G: GraphicsContext>(&self, gcx: &mut G, x: i32, y: i32) -> Result<(), GfxError> {
        for (i, kind) in self.visible().iter().enumerate() {
            draw_mini_piece(gcx, *kind, x, y + i as i32 * SLOT_HEIGHT, 255)?;
        }
        Ok(())
    }
}

/// The held piece. A fresh swap is drawn faded until the highlight runs out.
#[derive(Debug, Clone, Default)]
pub struct HoldQueue {
    piece: Option<PieceKind>,
    highlight: u32,
}

impl HoldQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn piece(&self) -> Option<PieceKind> {
        self.piece
    }

    /// Put `piece` on hold and return the previously held one.
    pub fn swap(&mut self, piece: PieceKind) -> Option<PieceKind> {
        self.highlight = HOLD_HIGHLIGHT_FRAMES;
        self.piece.replace(piece)
    }

    pub fn clear(&mut self) {
        self.piece = None;
        self.highlight = 0;
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight > 0
    }

    /// Advance one frame.
    pub fn update(&mut self) {
        self.highlight = self.highlight.saturating_sub(1);
    }

    pub fn draw<G: GraphicsContext>(&self, gcx: &mut G, x: i32, y: i32) -> Result<(), GfxError> {
        let Some(kind) = self.piece else {
            return Ok(());
        };
        let alpha = if self.is_highlighted() { 120 } else { 255 };
        draw_mini_piece(gcx, kind, x, y, alpha)
    }
}
