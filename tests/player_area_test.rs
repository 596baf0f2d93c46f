use std::path::Path;
use std::time::Duration;

use blok::gfx::{GfxError, GraphicsContext, Texture};
use blok::layout::gauge::{GAUGE_FILL_COLOR, GAUGE_TRACK_COLOR};
use blok::layout::{HudStyle, PlayerArea};
use blok::types::{LayoutMode, PieceKind, Rect, Rgb, Rgba, LOGICAL_HEIGHT, LOGICAL_WIDTH};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Fill(Rect, Rgba),
    Blit(String, i32, i32),
}

#[derive(Debug, Clone, PartialEq)]
struct MockFont {
    size_pt: u16,
}

#[derive(Debug, Clone, PartialEq)]
struct MockTexture {
    text: String,
    color: Rgb,
    size_pt: u16,
}

impl Texture for MockTexture {
    fn width(&self) -> i32 {
        self.text.chars().count() as i32 * 12
    }

    fn height(&self) -> i32 {
        self.size_pt as i32
    }
}

/// Records every call instead of drawing.
#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
    renders: Vec<String>,
    fail_renders: bool,
}

impl Recorder {
    fn fills_with(&self, color: Rgba) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Fill(_, c) if *c == color))
            .count()
    }

    fn blits_of(&self, text: &str) -> Vec<(i32, i32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Blit(t, x, y) if t == text => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }
}

impl GraphicsContext for Recorder {
    type Font = MockFont;
    type Texture = MockTexture;

    fn screen_width(&self) -> i32 {
        LOGICAL_WIDTH
    }

    fn screen_height(&self) -> i32 {
        LOGICAL_HEIGHT
    }

    fn load_font(&mut self, _path: &Path, size_pt: u16) -> Result<MockFont, GfxError> {
        Ok(MockFont { size_pt })
    }

    fn render_text(&mut self, font: &MockFont, text: &str, color: Rgb) -> Result<MockTexture, GfxError> {
        if self.fail_renders {
            return Err(GfxError::TextRender(format!("cannot render '{text}'")));
        }
        self.renders.push(text.to_string());
        Ok(MockTexture {
            text: text.to_string(),
            color,
            size_pt: font.size_pt,
        })
    }

    fn draw_filled_rect(&mut self, rect: Rect, color: Rgba) -> Result<(), GfxError> {
        self.ops.push(Op::Fill(rect, color));
        Ok(())
    }

    fn load_texture(&mut self, path: &Path, tint: Option<Rgb>) -> Result<MockTexture, GfxError> {
        Ok(MockTexture {
            text: path.display().to_string(),
            color: tint.unwrap_or(Rgb::new(0xFF, 0xFF, 0xFF)),
            size_pt: 0,
        })
    }

    fn draw_texture(&mut self, texture: &MockTexture, x: i32, y: i32) -> Result<(), GfxError> {
        self.ops.push(Op::Blit(texture.text.clone(), x, y));
        Ok(())
    }

    fn draw_texture_scaled(&mut self, texture: &MockTexture, rect: Rect) -> Result<(), GfxError> {
        self.ops.push(Op::Blit(texture.text.clone(), rect.x, rect.y));
        Ok(())
    }
}

fn area(gcx: &mut Recorder, draw_gauge: bool) -> PlayerArea<Recorder> {
    PlayerArea::new(gcx, HudStyle::default(), draw_gauge).unwrap()
}

#[test]
fn wide_is_selected_from_the_threshold_up() {
    let mut gcx = Recorder::default();
    let mut area = area(&mut gcx, false);
    let threshold = area.wide_width_threshold();

    for width in [threshold, threshold + 1, LOGICAL_WIDTH, 4000] {
        area.set_max_width(&mut gcx, width).unwrap();
        assert_eq!(area.mode(), LayoutMode::Wide, "width {width}");
    }
    for width in [threshold - 1, 500, 310, 0] {
        area.set_max_width(&mut gcx, width).unwrap();
        assert_eq!(area.mode(), LayoutMode::Narrow, "width {width}");
    }
}

#[test]
fn set_position_moves_the_origin_in_both_modes() {
    let mut gcx = Recorder::default();
    let mut area = area(&mut gcx, true);

    for width in [LOGICAL_WIDTH, 480] {
        area.set_max_width(&mut gcx, width).unwrap();
        for (x, y) in [(0, 0), (165, 55), (-20, 300)] {
            area.set_position(x, y);
            assert_eq!((area.x(), area.y()), (x, y));

            let bounds = area.bounds();
            let regions = *area.regions();
            assert!(bounds.contains_rect(&regions.well));
            assert!(bounds.contains_rect(&regions.level));
            assert!(bounds.contains_rect(&regions.score));
        }
    }
}

#[test]
fn switching_to_wide_leaves_no_narrow_geometry() {
    let mut gcx = Recorder::default();
    let mut area = area(&mut gcx, false);

    area.set_max_width(&mut gcx, 400).unwrap();
    area.set_position(10, 20);
    let narrow = *area.regions();
    assert_eq!(narrow.goal, None);

    area.set_max_width(&mut gcx, LOGICAL_WIDTH).unwrap();
    area.set_position(100, 50);
    let wide = *area.regions();

    assert_eq!(area.bounds(), Rect::new(100, 50, 630, 610));
    assert_eq!(wide.well, Rect::new(100 + 160 + 5, 55, 300, 600));
    assert_eq!(wide.goal, Some(Rect::new(100, 610, 150, 50)));
    assert_eq!(wide.level, Rect::new(100, 500, 150, 50));
    assert_eq!(wide.score, Rect::new(580, 610, 150, 50));
    assert_eq!(wide.time, Some(Rect::new(580, 500, 150, 50)));
    assert_ne!(wide.level, narrow.level);
}

#[test]
fn narrow_geometry_stacks_top_bar_well_and_bottom_bar() {
    let mut gcx = Recorder::default();
    let mut area = area(&mut gcx, false);

    area.set_max_width(&mut gcx, 480).unwrap();
    area.set_position(40, 0);
    let regions = *area.regions();

    assert_eq!(area.bounds(), Rect::new(40, 0, 310, 720));
    assert_eq!(area.well().outer_rect(), Rect::new(40, 60, 310, 610));
    assert_eq!(regions.level, Rect::new(40, 680, 150, 40));
    assert_eq!(regions.score, Rect::new(200, 680, 150, 40));
    assert_eq!(regions.level.bottom(), area.bounds().bottom());
    assert_eq!(area.next_queue().preview_count(), 1);
}

#[test]
fn goal_styling_switches_at_five() {
    let mut gcx = Recorder::default();
    let mut area = area(&mut gcx, false);
    let style = HudStyle::default();

    area.set_goal_counter(&mut gcx, 6).unwrap();
    assert!(!area.goal_highlighted());
    let six = area.goal_label().texture().clone();
    assert_eq!(six.color, style.text);

    area.set_goal_counter(&mut gcx, 5).unwrap();
    assert!(area.goal_highlighted());
    let five = area.goal_label().texture().clone();
    assert_eq!(five.color, style.highlight);
    assert!(five.size_pt > six.size_pt);
}

#[test]
fn gametime_renders_only_on_change() {
    let mut gcx = Recorder::default();
    let mut area = area(&mut gcx, false);
    let before = gcx.renders.len();

    assert!(area
        .set_gametime(&mut gcx, Duration::from_millis(65_200))
        .unwrap());
    assert_eq!(gcx.renders.len(), before + 1);

    // same second, same text
    assert!(!area
        .set_gametime(&mut gcx, Duration::from_millis(65_900))
        .unwrap());
    assert_eq!(gcx.renders.len(), before + 1);

    assert!(area.set_gametime(&mut gcx, Duration::from_secs(66)).unwrap());
    assert_eq!(gcx.renders.len(), before + 2);
    assert_eq!(area.time_label().text(), "01:06");
}

#[test]
fn level_label_mentions_level_only_when_narrow() {
    let mut gcx = Recorder::default();
    let mut area = area(&mut gcx, false);

    area.set_level_counter(&mut gcx, 3).unwrap();
    assert!(!area.level_label().text().contains("LEVEL"));

    area.set_max_width(&mut gcx, 400).unwrap();
    area.set_level_counter(&mut gcx, 3).unwrap();
    assert!(area.level_label().text().contains("LEVEL"));
    assert_eq!(area.level_label().text(), "LEVEL 3");

    // switching back re-renders without the prefix
    area.set_max_width(&mut gcx, LOGICAL_WIDTH).unwrap();
    assert_eq!(area.level_label().text(), "3");
}

#[test]
fn failed_level_render_is_retried_on_the_next_width() {
    let mut gcx = Recorder::default();
    let mut area = area(&mut gcx, false);
    area.set_level_counter(&mut gcx, 3).unwrap();

    gcx.fail_renders = true;
    assert!(area.set_max_width(&mut gcx, 400).is_err());
    assert_eq!(area.mode(), LayoutMode::Narrow);
    assert_eq!(area.level_label().text(), "3");

    gcx.fail_renders = false;
    area.set_max_width(&mut gcx, 400).unwrap();
    assert_eq!(area.level_label().text(), "LEVEL 3");
}

#[test]
fn same_mode_width_change_renders_nothing() {
    let mut gcx = Recorder::default();
    let mut area = area(&mut gcx, false);
    let before = gcx.renders.len();

    area.set_max_width(&mut gcx, 900).unwrap();
    area.set_max_width(&mut gcx, 700).unwrap();
    assert_eq!(gcx.renders.len(), before);
}

#[test]
fn well_background_follows_the_theme_switch() {
    let mut with_bg = Recorder::default();
    let area = PlayerArea::new(&mut with_bg, HudStyle::default(), false).unwrap();
    area.draw_passive(&mut with_bg).unwrap();
    let inner = area.regions().well;
    assert!(with_bg.ops.iter().any(|op| matches!(op, Op::Fill(r, _) if *r == inner)));

    let mut without_bg = Recorder::default();
    let style = HudStyle {
        draw_wellbg: false,
        ..HudStyle::default()
    };
    let area = PlayerArea::new(&mut without_bg, style, false).unwrap();
    area.draw_passive(&mut without_bg).unwrap();
    let inner = area.regions().well;
    assert!(!without_bg.ops.iter().any(|op| matches!(op, Op::Fill(r, _) if *r == inner)));
}

#[test]
fn narrow_without_gauge_never_draws_it() {
    let mut gcx = Recorder::default();
    let mut area = area(&mut gcx, false);
    area.set_garbage_count(6);

    area.set_max_width(&mut gcx, 500).unwrap();
    assert_eq!(area.mode(), LayoutMode::Narrow);

    area.draw_passive(&mut gcx).unwrap();
    area.draw_active(&mut gcx).unwrap();
    assert_eq!(gcx.fills_with(GAUGE_TRACK_COLOR), 0);
    assert_eq!(gcx.fills_with(GAUGE_FILL_COLOR), 0);
}

#[test]
fn gauge_is_drawn_when_enabled() {
    let mut gcx = Recorder::default();
    let mut area = area(&mut gcx, true);
    area.set_garbage_count(3);

    area.draw_passive(&mut gcx).unwrap();
    area.draw_active(&mut gcx).unwrap();
    assert_eq!(gcx.fills_with(GAUGE_TRACK_COLOR), 1);
    assert_eq!(gcx.fills_with(GAUGE_FILL_COLOR), 1);
}

#[test]
fn wide_passive_draws_every_label_and_counter() {
    let mut gcx = Recorder::default();
    let mut area = area(&mut gcx, false);
    area.set_score(&mut gcx, 1200).unwrap();
    area.draw_passive(&mut gcx).unwrap();

    for text in ["NEXT", "HOLD", "SCORE", "GOAL", "LEVEL", "1200", "00:00"] {
        assert_eq!(gcx.blits_of(text).len(), 1, "{text}");
    }
    // HOLD sits at the area origin
    assert_eq!(gcx.blits_of("HOLD"), vec![(0, 0)]);
    // NEXT is right-aligned
    assert_eq!(gcx.blits_of("NEXT"), vec![(630 - 4 * 12, 0)]);
}

#[test]
fn narrow_passive_aligns_counters_to_the_bar_edges() {
    let mut gcx = Recorder::default();
    let mut area = area(&mut gcx, false);
    area.set_max_width(&mut gcx, 400).unwrap();
    area.set_level_counter(&mut gcx, 2).unwrap();
    area.set_score(&mut gcx, 75).unwrap();
    area.draw_passive(&mut gcx).unwrap();

    let level = area.regions().level;
    let score = area.regions().score;
    let (level_x, _) = gcx.blits_of("LEVEL 2")[0];
    let (score_x, _) = gcx.blits_of("75")[0];
    assert_eq!(level_x, level.x + 10);
    assert_eq!(score_x, score.right() - 2 * 12 - 10);

    assert!(gcx.blits_of("GOAL").is_empty());
    assert!(gcx.blits_of("SCORE").is_empty());
}

#[test]
fn hidden_labels_and_panels_are_skipped() {
    let mut gcx = Recorder::default();
    let style = HudStyle {
        draw_labels: false,
        draw_panels: false,
        ..HudStyle::default()
    };
    let panel = style.panel;
    let area = PlayerArea::new(&mut gcx, style, false).unwrap();
    area.draw_passive(&mut gcx).unwrap();

    assert!(gcx.blits_of("NEXT").is_empty());
    assert_eq!(gcx.fills_with(panel), 0);
    // counters stay visible
    assert_eq!(gcx.blits_of("00:00").len(), 1);
}

#[test]
fn queues_follow_the_mode() {
    let mut gcx = Recorder::default();
    let mut area = area(&mut gcx, false);
    area.next_queue_mut().set_pieces(&PieceKind::ALL);
    assert_eq!(area.next_queue().visible().len(), 5);

    area.set_max_width(&mut gcx, 320).unwrap();
    assert_eq!(area.next_queue().visible(), &[PieceKind::I]);

    assert_eq!(area.hold_queue_mut().swap(PieceKind::S), None);
    assert!(area.hold_queue().is_highlighted());
    for _ in 0..blok::layout::queue::HOLD_HIGHLIGHT_FRAMES {
        area.update();
    }
    assert!(!area.hold_queue().is_highlighted());
}
