//! Character-cell framebuffer that `TermContext` draws into.

use crate::types::{Rgb, Rgba};

/// Colors and weight of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// Row-major grid of styled cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer, keeping the allocation when possible.
    ///
    /// Contents are reset; callers redraw every frame anyway.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.clear();
        self.cells.resize(len, Cell::default());
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Write glyphs over the existing background.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, fg: Rgb, bold: bool) {
        for (dx, ch) in s.chars().enumerate() {
            let cx = x as usize + dx;
            if cx >= self.width as usize {
                break;
            }
            if let Some(i) = self.idx(cx as u16, y) {
                let cell = &mut self.cells[i];
                cell.ch = ch;
                cell.style.fg = fg;
                cell.style.bold = bold;
            }
        }
    }

    /// Paint a block of cell backgrounds.
    ///
    /// Opaque fills erase glyphs; translucent fills tint what is below.
    pub fn blend_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgba) {
        for cy in y..y.saturating_add(h).min(self.height) {
            for cx in x..x.saturating_add(w).min(self.width) {
                if let Some(i) = self.idx(cx, cy) {
                    let cell = &mut self.cells[i];
                    cell.style.bg = color.blend_over(cell.style.bg);
                    if color.a == u8::MAX {
                        cell.ch = ' ';
                    }
                }
            }
        }
    }

    /// The glyphs of one row, for inspection.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_str_clips_at_right_edge_and_keeps_background() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.blend_rect(0, 0, 4, 1, Rgba::new(10, 20, 30, 255));
        fb.put_str(2, 0, "ABC", Rgb::new(255, 255, 255), false);

        assert_eq!(fb.row_text(0), "  AB");
        assert_eq!(fb.get(2, 0).unwrap().style.bg, Rgb::new(10, 20, 30));
    }

    #[test]
    fn translucent_fill_keeps_glyphs() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.put_str(0, 0, "X", Rgb::new(255, 255, 255), false);
        fb.blend_rect(0, 0, 2, 1, Rgba::new(255, 0, 0, 128));
        assert_eq!(fb.get(0, 0).unwrap().ch, 'X');
        assert_ne!(fb.get(0, 0).unwrap().style.bg, Rgb::new(0, 0, 0));
    }

    #[test]
    fn resize_resets_contents() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.put_str(0, 0, "Z", Rgb::new(1, 1, 1), false);
        fb.resize(3, 1);
        assert_eq!(fb.row_text(0), "   ");
    }
}
