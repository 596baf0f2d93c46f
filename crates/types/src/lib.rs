//! Shared types and constants - geometry, color and piece definitions
//!
//! This crate defines the plain data types used by every other crate of the
//! client. It has no dependencies, so layout code, graphics backends and the
//! theme loader can all agree on the same `Rect` and color types.
//!
//! # Logical Screen
//!
//! All positions are expressed in logical pixels of a 960x720 screen. Graphics
//! backends scale this logical space to whatever the window or terminal offers.
//!
//! # Player Area Metrics
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MINO_SIZE` | 30 | Edge of a single block inside the well |
//! | `WELL_BORDER` | 5 | Frame thickness around the play field |
//! | `SIDEBAR_WIDTH` | 150 | Width of each side panel in wide layout |
//! | `INNER_PADDING` | 10 | Gap between adjacent HUD elements |
//! | `TOPBAR_HEIGHT` | 50 | Queue strip above the well in narrow layout |
//! | `LABEL_HEIGHT` | 30 | Height reserved for one line of HUD text |
//! | `TEXT_BOX_HEIGHT` | 50 | Counter box height in wide layout |
//! | `BOTTOMBAR_HEIGHT` | 40 | Counter strip height in narrow layout |
//! | `GAUGE_WIDTH` | 10 | Garbage gauge width |
//!
//! # Examples
//!
//! ```
//! use blok_types::{LayoutMode, PieceKind, Rect};
//!
//! let mut r = Rect::new(0, 0, 150, 50);
//! r.set_position(10, 20);
//! assert_eq!(r.right(), 160);
//! assert_eq!(r.bottom(), 70);
//!
//! assert_eq!(PieceKind::T.as_str(), "t");
//! assert_eq!(LayoutMode::Wide.preview_count(), 5);
//! ```

/// Logical screen width in pixels
pub const LOGICAL_WIDTH: i32 = 960;

/// Logical screen height in pixels
pub const LOGICAL_HEIGHT: i32 = 720;

/// Well width in cells (10 columns)
pub const WELL_COLUMNS: usize = 10;

/// Visible well height in cells (20 rows)
pub const WELL_ROWS: usize = 20;

/// Size of one mino in the well, in pixels
pub const MINO_SIZE: i32 = 30;

/// Thickness of the frame drawn around the play field
pub const WELL_BORDER: i32 = 5;

/// Side panel width in wide layout
pub const SIDEBAR_WIDTH: i32 = 150;

/// Gap between HUD elements
pub const INNER_PADDING: i32 = 10;

/// Height of the queue strip above the well in narrow layout
pub const TOPBAR_HEIGHT: i32 = 50;

/// Height reserved for a single line of HUD text
pub const LABEL_HEIGHT: i32 = 30;

/// Counter box height in wide layout
pub const TEXT_BOX_HEIGHT: i32 = LABEL_HEIGHT + 2 * INNER_PADDING;

/// Counter strip height in narrow layout
pub const BOTTOMBAR_HEIGHT: i32 = LABEL_HEIGHT + 2 * 5;

/// Width of the garbage gauge next to the well
pub const GAUGE_WIDTH: i32 = 10;

/// Number of upcoming pieces previewed in wide layout
pub const WIDE_PREVIEW_COUNT: usize = 5;

/// Number of upcoming pieces previewed in narrow layout
pub const NARROW_PREVIEW_COUNT: usize = 1;

/// Goal counters at or below this value are drawn highlighted
pub const GOAL_HIGHLIGHT_THRESHOLD: u32 = 5;

/// Axis-aligned rectangle in logical pixels.
///
/// The origin is the top-left corner; `w` and `h` extend right and down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn set_size(&mut self, w: i32, h: i32) {
        self.w = w;
        self.h = h;
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// True if the two rectangles share at least one pixel.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// True if `other` lies completely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

/// RGB color with alpha, used for translucent fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Composite this color over `below` (straight alpha).
    pub fn blend_over(self, below: Rgb) -> Rgb {
        let a = self.a as u16;
        let mix = |top: u8, bottom: u8| -> u8 {
            ((top as u16 * a + bottom as u16 * (255 - a)) / 255) as u8
        };
        Rgb::new(mix(self.r, below.r), mix(self.g, below.g), mix(self.b, below.b))
    }
}

/// Player area layout variant.
///
/// - **Wide**: side panels left and right of the well
/// - **Narrow**: queue strip above and counter strip below the well
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    Wide,
    Narrow,
}

impl LayoutMode {
    /// Next-queue preview depth used by this layout.
    pub fn preview_count(&self) -> usize {
        match self {
            LayoutMode::Wide => WIDE_PREVIEW_COUNT,
            LayoutMode::Narrow => NARROW_PREVIEW_COUNT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Wide => "wide",
            LayoutMode::Narrow => "narrow",
        }
    }
}

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Lowercase single-letter name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Fill color used for minos of this kind.
    pub fn color(&self) -> Rgb {
        match self {
            PieceKind::I => Rgb::new(80, 220, 220),
            PieceKind::O => Rgb::new(240, 220, 80),
            PieceKind::T => Rgb::new(200, 120, 220),
            PieceKind::S => Rgb::new(100, 220, 120),
            PieceKind::Z => Rgb::new(220, 80, 80),
            PieceKind::J => Rgb::new(80, 120, 220),
            PieceKind::L => Rgb::new(255, 165, 0),
        }
    }

    /// Spawn-orientation mino offsets, used for queue previews.
    pub fn preview_shape(&self) -> [MinoOffset; 4] {
        match self {
            PieceKind::I => [(0, 1), (1, 1), (2, 1), (3, 1)],
            PieceKind::O => [(1, 0), (2, 0), (1, 1), (2, 1)],
            PieceKind::T => [(1, 0), (0, 1), (1, 1), (2, 1)],
            PieceKind::S => [(1, 0), (2, 0), (0, 1), (1, 1)],
            PieceKind::Z => [(0, 0), (1, 0), (1, 1), (2, 1)],
            PieceKind::J => [(0, 0), (0, 1), (1, 1), (2, 1)],
            PieceKind::L => [(2, 0), (0, 1), (1, 1), (2, 1)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_metrics_match_their_parts() {
        assert_eq!(TEXT_BOX_HEIGHT, 50);
        assert_eq!(BOTTOMBAR_HEIGHT, 40);
    }

    #[test]
    fn rect_intersection_is_exclusive_at_edges() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Rect::new(9, 9, 5, 5)));
        assert!(a.contains_rect(&Rect::new(2, 2, 8, 8)));
        assert!(!a.contains_rect(&Rect::new(2, 2, 9, 8)));
    }

    #[test]
    fn rgb_from_hex_splits_channels() {
        assert_eq!(Rgb::from_hex(0xFFA500), Rgb::new(255, 165, 0));
        assert_eq!(Rgb::from_hex(0xEEEEEE).with_alpha(128).a, 128);
    }

    #[test]
    fn blend_extremes() {
        let below = Rgb::new(0, 0, 0);
        assert_eq!(Rgba::new(200, 100, 50, 255).blend_over(below), Rgb::new(200, 100, 50));
        assert_eq!(Rgba::new(200, 100, 50, 0).blend_over(below), below);
    }

    #[test]
    fn preview_depth_per_mode() {
        assert_eq!(LayoutMode::Wide.preview_count(), 5);
        assert_eq!(LayoutMode::Narrow.preview_count(), 1);
    }

    #[test]
    fn every_preview_shape_fits_a_4x2_box() {
        for kind in PieceKind::ALL {
            for (dx, dy) in kind.preview_shape() {
                assert!((0..4).contains(&dx), "{:?}", kind);
                assert!((0..2).contains(&dy), "{:?}", kind);
            }
        }
    }
}
