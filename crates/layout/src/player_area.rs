//! PlayerArea: one player's well and HUD, in a wide or a narrow layout.
//!
//! The layout is picked from the width the area may occupy:
//!
//! ```text
//! Wide (>= threshold)                Narrow (< threshold)
//! +------+ +--------+ +------+       +--------+--------+
//! | HOLD | |        |g| NEXT |       |  HOLD  |  NEXT  |   top bar
//! |      | |  well  |a|      |       +--------+--------+
//! |LEVEL | |        |u| TIME |       |                 |
//! |[ 3  ]| |        |g|SCORE |       |      well       |
//! |GOAL  | |        |e|[1200]|       |                 |
//! |[ 5  ]| |        | |      |       +--------+--------+
//! +------+ +--------+ +------+       |LEVEL 3 |   1200 |   bottom bar
//!                                    +--------+--------+
//! ```
//!
//! The current [`LayoutMode`] is the only strategy state. Layout, active draw
//! and passive draw each match on it, so the three can never disagree.

use std::path::PathBuf;
use std::time::Duration;

use blok_core::{format_gametime, AppPaths, ThemeConfig};
use blok_gfx::{GfxError, GraphicsContext, Texture};
use tracing::debug;

use crate::gauge::GarbageGauge;
use crate::label::CachedLabel;
use crate::queue::{HoldQueue, NextQueue};
use crate::types::{
    LayoutMode, Rect, Rgb, Rgba, BOTTOMBAR_HEIGHT, GOAL_HIGHLIGHT_THRESHOLD, INNER_PADDING,
    LABEL_HEIGHT, SIDEBAR_WIDTH, TEXT_BOX_HEIGHT, TOPBAR_HEIGHT,
};
use crate::well::WellView;

pub const LABEL_FONT_FILE: &str = "PTN57F.ttf";
pub const CONTENT_FONT_FILE: &str = "PTN77F.ttf";

const LABEL_PT: u16 = 28;
const CONTENT_PT: u16 = 30;
const HIGHLIGHT_PT: u16 = 32;

/// Counter inset from the box edge in narrow layout.
const NARROW_TEXT_INSET: i32 = 10;
/// Queue label inset from the area edge in narrow layout.
const NARROW_LABEL_INSET: i32 = 5;

/// Fonts, colors and theme switches of the HUD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudStyle {
    pub label_font: PathBuf,
    pub content_font: PathBuf,
    pub text: Rgb,
    pub highlight: Rgb,
    pub panel: Rgba,
    pub draw_wellbg: bool,
    pub draw_labels: bool,
    pub draw_panels: bool,
}

impl HudStyle {
    pub fn from_theme(theme: &ThemeConfig) -> Self {
        let paths = theme.paths();
        Self {
            label_font: paths.font(LABEL_FONT_FILE),
            content_font: paths.font(CONTENT_FONT_FILE),
            text: theme.colors.text,
            highlight: theme.colors.accent,
            panel: theme.colors.primary.with_alpha(0x80),
            draw_wellbg: theme.gameplay.draw_wellbg,
            draw_labels: theme.gameplay.draw_labels,
            draw_panels: theme.gameplay.draw_panels,
        }
    }
}

impl Default for HudStyle {
    fn default() -> Self {
        Self::from_theme(&ThemeConfig::new(AppPaths::new("data", "data"), "default"))
    }
}

/// Counter boxes and play field of the current layout.
///
/// Goal and time boxes only exist in wide layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundRegions {
    pub level: Rect,
    pub score: Rect,
    pub goal: Option<Rect>,
    pub time: Option<Rect>,
    pub well: Rect,
}

struct HudFonts<F> {
    label: F,
    content: F,
    highlight: F,
}

struct StaticLabels<T> {
    next: T,
    hold: T,
    score: T,
    goal: T,
    level: T,
}

pub struct PlayerArea<G: GraphicsContext> {
    bounds: Rect,
    mode: LayoutMode,
    draw_gauge: bool,
    style: HudStyle,

    well: WellView,
    gauge: GarbageGauge,
    next_queue: NextQueue,
    hold_queue: HoldQueue,
    regions: BoundRegions,

    fonts: HudFonts<G::Font>,
    labels: StaticLabels<G::Texture>,
    level: u32,
    level_counter: CachedLabel<G::Texture>,
    score_counter: CachedLabel<G::Texture>,
    goal_counter: CachedLabel<G::Texture>,
    goal_highlighted: bool,
    time_counter: CachedLabel<G::Texture>,
}

impl<G: GraphicsContext> PlayerArea<G> {
    /// Load fonts, render the static labels and lay out for the full screen
    /// width. The area is positioned at the origin afterwards.
    pub fn new(gcx: &mut G, style: HudStyle, draw_gauge: bool) -> Result<Self, GfxError> {
        let fonts = HudFonts {
            label: gcx.load_font(&style.label_font, LABEL_PT)?,
            content: gcx.load_font(&style.content_font, CONTENT_PT)?,
            highlight: gcx.load_font(&style.content_font, HIGHLIGHT_PT)?,
        };

        let color = style.text;
        let labels = StaticLabels {
            next: gcx.render_text(&fonts.label, "NEXT", color)?,
            hold: gcx.render_text(&fonts.label, "HOLD", color)?,
            score: gcx.render_text(&fonts.label, "SCORE", color)?,
            goal: gcx.render_text(&fonts.label, "GOAL", color)?,
            level: gcx.render_text(&fonts.label, "LEVEL", color)?,
        };
        let level_counter = CachedLabel::render(gcx, &fonts.content, "0", color)?;
        let score_counter = CachedLabel::render(gcx, &fonts.content, "0", color)?;
        let goal_counter = CachedLabel::render(gcx, &fonts.content, "0", color)?;
        let time_counter =
            CachedLabel::render(gcx, &fonts.content, format_gametime(Duration::ZERO), color)?;

        let well = WellView::new();
        let gauge = GarbageGauge::new(well.height());

        let mut area = Self {
            bounds: Rect::default(),
            mode: LayoutMode::Wide,
            draw_gauge,
            style,
            well,
            gauge,
            next_queue: NextQueue::new(),
            hold_queue: HoldQueue::new(),
            regions: BoundRegions::default(),
            fonts,
            labels,
            level: 0,
            level_counter,
            score_counter,
            goal_counter,
            goal_highlighted: false,
            time_counter,
        };

        let screen_width = gcx.screen_width();
        area.set_max_width(gcx, screen_width)?;
        Ok(area)
    }

    fn gauge_extra(&self) -> i32 {
        if self.draw_gauge {
            self.gauge.width()
        } else {
            0
        }
    }

    /// Smallest width that selects the wide layout.
    pub fn wide_width_threshold(&self) -> i32 {
        self.well.width() + 2 * INNER_PADDING + 2 * SIDEBAR_WIDTH + self.gauge_extra()
    }

    fn narrow_width(&self) -> i32 {
        self.well.width() + self.gauge_extra()
    }

    /// Pick the layout for `max_width` and lay everything out again.
    ///
    /// An exact fit selects the wide layout. The level counter is re-rendered
    /// whenever its text no longer matches the mode.
    pub fn set_max_width(&mut self, gcx: &mut G, max_width: i32) -> Result<(), GfxError> {
        let mode = if max_width < self.wide_width_threshold() {
            LayoutMode::Narrow
        } else {
            LayoutMode::Wide
        };

        let (w, h) = match mode {
            LayoutMode::Wide => (self.wide_width_threshold(), self.well.height()),
            LayoutMode::Narrow => (
                self.narrow_width(),
                self.well.height() + 2 * INNER_PADDING + TOPBAR_HEIGHT + BOTTOMBAR_HEIGHT,
            ),
        };
        self.bounds.set_size(w, h);

        if mode != self.mode {
            debug!(target: "layout", mode = mode.as_str(), max_width, "layout mode switched");
        }
        self.mode = mode;
        self.next_queue.set_preview_count(mode.preview_count());
        self.set_position(self.bounds.x, self.bounds.y);

        // Compared by text, so a failed render is retried on the next call.
        if self.level_counter.text() != self.level_text() {
            self.render_level_counter(gcx)?;
        }
        Ok(())
    }

    /// Move the area and recompute every region for the current mode.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.bounds.set_position(x, y);
        let (level, score, goal, time) = match self.mode {
            LayoutMode::Wide => self.calc_wide_layout(),
            LayoutMode::Narrow => self.calc_narrow_layout(),
        };
        self.regions = BoundRegions {
            level,
            score,
            goal,
            time,
            well: self.well.inner_rect(),
        };
    }

    fn calc_wide_layout(&mut self) -> (Rect, Rect, Option<Rect>, Option<Rect>) {
        let Rect { x, y, w, h } = self.bounds;

        self.well.set_position(x + SIDEBAR_WIDTH + INNER_PADDING, y);
        self.gauge
            .set_position(self.well.x() + self.well.width(), self.well.y());

        let goal = Rect::new(x, y + h - TEXT_BOX_HEIGHT, SIDEBAR_WIDTH, TEXT_BOX_HEIGHT);

        let mut level = goal;
        level.y = goal.y - TEXT_BOX_HEIGHT - INNER_PADDING - goal.h;

        let mut score = goal;
        score.x = x + w - SIDEBAR_WIDTH;

        let mut time = score;
        time.y = level.y;

        (level, score, Some(goal), Some(time))
    }

    fn calc_narrow_layout(&mut self) -> (Rect, Rect, Option<Rect>, Option<Rect>) {
        let Rect { x, y, w, .. } = self.bounds;

        self.well.set_position(x, y + TOPBAR_HEIGHT + INNER_PADDING);
        self.gauge
            .set_position(self.well.x() + self.well.width(), self.well.y());

        let bottombar_y = self.well.y() + self.well.height() + INNER_PADDING;
        let block_w = self.well.well_width() / 2;

        let level = Rect::new(x, bottombar_y, block_w, BOTTOMBAR_HEIGHT);
        let score = Rect::new(x + w - block_w, bottombar_y, block_w, BOTTOMBAR_HEIGHT);

        (level, score, None, None)
    }

    pub fn x(&self) -> i32 {
        self.bounds.x
    }

    pub fn y(&self) -> i32 {
        self.bounds.y
    }

    pub fn width(&self) -> i32 {
        self.bounds.w
    }

    pub fn height(&self) -> i32 {
        self.bounds.h
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn is_narrow(&self) -> bool {
        self.mode == LayoutMode::Narrow
    }

    pub fn draws_gauge(&self) -> bool {
        self.draw_gauge
    }

    pub fn regions(&self) -> &BoundRegions {
        &self.regions
    }

    pub fn well(&self) -> &WellView {
        &self.well
    }

    /// Well contents may change freely; its position belongs to the area.
    pub fn well_mut(&mut self) -> &mut WellView {
        &mut self.well
    }

    pub fn gauge(&self) -> &GarbageGauge {
        &self.gauge
    }

    pub fn next_queue(&self) -> &NextQueue {
        &self.next_queue
    }

    pub fn next_queue_mut(&mut self) -> &mut NextQueue {
        &mut self.next_queue
    }

    pub fn hold_queue(&self) -> &HoldQueue {
        &self.hold_queue
    }

    pub fn hold_queue_mut(&mut self) -> &mut HoldQueue {
        &mut self.hold_queue
    }

    pub fn level_label(&self) -> &CachedLabel<G::Texture> {
        &self.level_counter
    }

    pub fn score_label(&self) -> &CachedLabel<G::Texture> {
        &self.score_counter
    }

    pub fn goal_label(&self) -> &CachedLabel<G::Texture> {
        &self.goal_counter
    }

    pub fn time_label(&self) -> &CachedLabel<G::Texture> {
        &self.time_counter
    }

    /// Whether the goal counter currently uses the attention styling.
    pub fn goal_highlighted(&self) -> bool {
        self.goal_highlighted
    }

    fn level_text(&self) -> String {
        match self.mode {
            LayoutMode::Wide => self.level.to_string(),
            LayoutMode::Narrow => format!("LEVEL {}", self.level),
        }
    }

    fn render_level_counter(&mut self, gcx: &mut G) -> Result<(), GfxError> {
        let text = self.level_text();
        self.level_counter
            .replace(gcx, &self.fonts.content, text, self.style.text)
    }

    pub fn set_level_counter(&mut self, gcx: &mut G, level: u32) -> Result<(), GfxError> {
        self.level = level;
        self.render_level_counter(gcx)
    }

    pub fn set_score(&mut self, gcx: &mut G, score: u32) -> Result<(), GfxError> {
        self.score_counter
            .replace(gcx, &self.fonts.content, score.to_string(), self.style.text)
    }

    /// Goals of 5 or less switch to the highlight font and accent color.
    pub fn set_goal_counter(&mut self, gcx: &mut G, goal: u32) -> Result<(), GfxError> {
        let highlighted = goal <= GOAL_HIGHLIGHT_THRESHOLD;
        let (font, color) = if highlighted {
            (&self.fonts.highlight, self.style.highlight)
        } else {
            (&self.fonts.content, self.style.text)
        };
        self.goal_counter.replace(gcx, font, goal.to_string(), color)?;
        self.goal_highlighted = highlighted;
        Ok(())
    }

    /// Re-renders only when the `MM:SS` text changes.
    ///
    /// Unlike the other setters this reports whether a new texture was
    /// rendered, as [`CachedLabel::refresh`] does.
    pub fn set_gametime(&mut self, gcx: &mut G, gametime: Duration) -> Result<bool, GfxError> {
        let text = format_gametime(gametime);
        self.time_counter
            .refresh(gcx, &self.fonts.content, &text, self.style.text)
    }

    pub fn set_garbage_count(&mut self, lines: u32) {
        self.gauge.set_line_count(lines);
    }

    /// Advance per-frame animations.
    pub fn update(&mut self) {
        self.hold_queue.update();
    }

    /// Dynamic pass: well contents and the gauge fill.
    pub fn draw_active(&self, gcx: &mut G) -> Result<(), GfxError> {
        match self.mode {
            LayoutMode::Wide => self.draw_wide_active(gcx),
            LayoutMode::Narrow => self.draw_narrow_active(gcx),
        }
    }

    /// Static pass: frames, panels, labels, queues and counters.
    pub fn draw_passive(&self, gcx: &mut G) -> Result<(), GfxError> {
        match self.mode {
            LayoutMode::Wide => self.draw_wide_passive(gcx),
            LayoutMode::Narrow => self.draw_narrow_passive(gcx),
        }
    }

    fn draw_panel(&self, gcx: &mut G, rect: Rect) -> Result<(), GfxError> {
        if self.style.draw_panels {
            gcx.draw_filled_rect(rect, self.style.panel)?;
        }
        Ok(())
    }

    fn draw_label(&self, gcx: &mut G, texture: &G::Texture, x: i32, y: i32) -> Result<(), GfxError> {
        if self.style.draw_labels {
            gcx.draw_texture(texture, x, y)?;
        }
        Ok(())
    }

    /// Panel with the counter centered inside it.
    fn draw_centered_box(
        &self,
        gcx: &mut G,
        rect: Rect,
        counter: &CachedLabel<G::Texture>,
    ) -> Result<(), GfxError> {
        self.draw_panel(gcx, rect)?;
        counter.draw(
            gcx,
            rect.x + (rect.w - counter.width()) / 2,
            rect.y + (rect.h - counter.height()) / 2,
        )
    }

    fn draw_wide_passive(&self, gcx: &mut G) -> Result<(), GfxError> {
        self.well.draw_base(gcx, self.style.draw_wellbg)?;
        if self.draw_gauge {
            self.gauge.draw_passive(gcx)?;
        }

        let Rect { x, y, .. } = self.bounds;
        let rightside_x = self.bounds.right();
        let queue_y = y + LABEL_HEIGHT + INNER_PADDING;
        let labels = &self.labels;

        // next queue
        self.draw_label(gcx, &labels.next, rightside_x - labels.next.width(), y)?;
        self.next_queue.draw(gcx, rightside_x - SIDEBAR_WIDTH, queue_y)?;

        // score
        let score = self.regions.score;
        self.draw_centered_box(gcx, score, &self.score_counter)?;
        self.draw_label(
            gcx,
            &labels.score,
            rightside_x - labels.score.width(),
            score.y - INNER_PADDING - LABEL_HEIGHT,
        )?;

        // time
        if let Some(time) = self.regions.time {
            self.draw_centered_box(gcx, time, &self.time_counter)?;
        }

        // hold queue
        self.draw_label(gcx, &labels.hold, x, y)?;
        self.hold_queue.draw(gcx, x, queue_y)?;

        // goal
        if let Some(goal) = self.regions.goal {
            self.draw_centered_box(gcx, goal, &self.goal_counter)?;
            self.draw_label(gcx, &labels.goal, goal.x, goal.y - INNER_PADDING - LABEL_HEIGHT)?;
        }

        // level
        let level = self.regions.level;
        self.draw_centered_box(gcx, level, &self.level_counter)?;
        self.draw_label(gcx, &labels.level, level.x, level.y - INNER_PADDING - LABEL_HEIGHT)
    }

    fn draw_wide_active(&self, gcx: &mut G) -> Result<(), GfxError> {
        self.well.draw_content(gcx)?;
        if self.draw_gauge {
            self.gauge.draw_active(gcx)?;
        }
        Ok(())
    }

    fn draw_narrow_passive(&self, gcx: &mut G) -> Result<(), GfxError> {
        self.well.draw_base(gcx, self.style.draw_wellbg)?;
        if self.draw_gauge {
            self.gauge.draw_passive(gcx)?;
        }

        let Rect { x, y, .. } = self.bounds;
        let labels = &self.labels;

        // hold queue
        self.hold_queue.draw(gcx, x, y)?;
        self.draw_label(gcx, &labels.hold, x + NARROW_LABEL_INSET, y)?;

        // next queue
        let next_x = self.bounds.right() - self.well.well_width() / 2;
        self.next_queue.draw(gcx, next_x, y)?;
        self.draw_label(
            gcx,
            &labels.next,
            self.bounds.right() - labels.next.width() - NARROW_LABEL_INSET,
            y,
        )?;

        // level, left-aligned
        let level = self.regions.level;
        self.draw_panel(gcx, level)?;
        self.level_counter.draw(
            gcx,
            level.x + NARROW_TEXT_INSET,
            level.y + (level.h - self.level_counter.height()) / 2,
        )?;

        // score, right-aligned
        let score = self.regions.score;
        self.draw_panel(gcx, score)?;
        self.score_counter.draw(
            gcx,
            score.right() - self.score_counter.width() - NARROW_TEXT_INSET,
            score.y + (score.h - self.score_counter.height()) / 2,
        )
    }

    fn draw_narrow_active(&self, gcx: &mut G) -> Result<(), GfxError> {
        self.well.draw_content(gcx)?;
        if self.draw_gauge {
            self.gauge.draw_active(gcx)?;
        }
        Ok(())
    }
}
