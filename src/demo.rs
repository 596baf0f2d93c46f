//! Synthetic HUD feed.
//!
//! Stands in for a rules engine: pieces come from a 7-bag, are stacked into
//! the lowest columns of the well, full rows are cleared and counted, and the
//! counters follow from that.

use std::time::Duration;

use blok::core::{PieceBag, SimpleRng};
use blok::gfx::{GfxError, GraphicsContext};
use blok::layout::{PlayerArea, WellView};
use blok::types::{PieceKind, WELL_COLUMNS, WELL_ROWS};
use tracing::debug;

/// Frames between two piece drops.
pub const DROP_FRAMES: u64 = 30;
/// Every n-th drop goes to the hold slot instead of the well.
const HOLD_EVERY: u64 = 7;
/// Every n-th drop changes the incoming garbage.
const GARBAGE_EVERY: u64 = 4;
const LINES_PER_LEVEL: u32 = 10;
const LINE_POINTS: [u32; 5] = [0, 100, 300, 500, 800];

pub struct DemoFeed {
    bag: PieceBag,
    rng: SimpleRng,
    frame: u64,
    score: u32,
    level: u32,
    goal: u32,
}

impl DemoFeed {
    pub fn new(seed: u32) -> Self {
        Self {
            bag: PieceBag::new(seed),
            rng: SimpleRng::new(seed.wrapping_add(1)),
            frame: 0,
            score: 0,
            level: 1,
            goal: LINES_PER_LEVEL,
        }
    }

    #[cfg(test)]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Push the current values into a freshly built area.
    pub fn attach<G: GraphicsContext>(
        &self,
        gcx: &mut G,
        area: &mut PlayerArea<G>,
    ) -> Result<(), GfxError> {
        area.next_queue_mut().set_pieces(&self.bag.peek_5());
        area.set_level_counter(gcx, self.level)?;
        area.set_goal_counter(gcx, self.goal)?;
        area.set_score(gcx, self.score)
    }

    /// Advance one frame.
    pub fn tick<G: GraphicsContext>(
        &mut self,
        gcx: &mut G,
        area: &mut PlayerArea<G>,
        gametime: Duration,
    ) -> Result<(), GfxError> {
        self.frame += 1;
        area.update();
        area.set_gametime(gcx, gametime)?;

        if self.frame % DROP_FRAMES != 0 {
            return Ok(());
        }
        let drops = self.frame / DROP_FRAMES;

        let piece = self.bag.draw();
        area.next_queue_mut().set_pieces(&self.bag.peek_5());

        if drops % HOLD_EVERY == 0 {
            area.hold_queue_mut().swap(piece);
            return Ok(());
        }

        let cleared = self.lock(area.well_mut(), piece);
        let points = LINE_POINTS[cleared.min(4) as usize].saturating_mul(self.level);
        self.score = self.score.saturating_add(points.saturating_add(10));
        area.set_score(gcx, self.score)?;

        if cleared > 0 {
            self.goal = self.goal.saturating_sub(cleared);
            if self.goal == 0 {
                self.level = self.level.saturating_add(1);
                self.goal = LINES_PER_LEVEL;
                debug!(level = self.level, "level up");
                area.set_level_counter(gcx, self.level)?;
            }
            area.set_goal_counter(gcx, self.goal)?;
        }

        if drops % GARBAGE_EVERY == 0 {
            area.set_garbage_count(self.rng.next_range(8));
        }
        Ok(())
    }

    /// Stack four minos of `piece` and clear full rows. Returns the rows cleared.
    fn lock(&mut self, well: &mut WellView, piece: PieceKind) -> u32 {
        for _ in 0..4 {
            let col = self.pick_column(well);
            if let Some(row) = free_row(well, col) {
                well.set_cell(col, row, Some(piece));
            }
        }

        let cleared = clear_full_rows(well);
        if (0..WELL_COLUMNS).any(|col| well.cell(col, 0).is_some()) {
            well.clear();
        }
        cleared
    }

    /// Mostly the lowest column, sometimes a random one.
    fn pick_column(&mut self, well: &WellView) -> usize {
        let random = self.rng.next_range(WELL_COLUMNS as u32) as usize;
        if self.rng.next_range(4) == 0 {
            return random;
        }
        (0..WELL_COLUMNS)
            .map(|i| (random + i) % WELL_COLUMNS)
            .max_by_key(|&col| free_row(well, col).map_or(-1, |row| row as i32))
            .unwrap_or(random)
    }
}

/// Lowest empty row of `col`.
fn free_row(well: &WellView, col: usize) -> Option<usize> {
    (0..WELL_ROWS).rev().find(|&row| well.cell(col, row).is_none())
}

fn clear_full_rows(well: &mut WellView) -> u32 {
    let mut cleared = 0;
    let mut row = WELL_ROWS;
    while row > 0 {
        row -= 1;
        if !(0..WELL_COLUMNS).all(|col| well.cell(col, row).is_some()) {
            continue;
        }
        for r in (1..=row).rev() {
            for col in 0..WELL_COLUMNS {
                let above = well.cell(col, r - 1);
                well.set_cell(col, r, above);
            }
        }
        for col in 0..WELL_COLUMNS {
            well.set_cell(col, 0, None);
        }
        cleared += 1;
        // the row above moved into this one
        row += 1;
    }
    cleared
}

#[cfg(test)]
mod tests {
    use blok::gfx::TermContext;
    use blok::layout::HudStyle;

    use super::*;

    #[test]
    fn full_rows_are_cleared_and_shifted() {
        let mut well = WellView::new();
        for col in 0..WELL_COLUMNS {
            well.set_cell(col, WELL_ROWS - 1, Some(PieceKind::I));
        }
        well.set_cell(3, WELL_ROWS - 2, Some(PieceKind::T));

        assert_eq!(clear_full_rows(&mut well), 1);
        assert_eq!(well.cell(3, WELL_ROWS - 1), Some(PieceKind::T));
        assert_eq!(well.cell(0, WELL_ROWS - 1), None);
    }

    #[test]
    fn feed_scores_after_drops() {
        let mut gcx = TermContext::new(120, 45);
        let mut area = PlayerArea::new(&mut gcx, HudStyle::default(), false).unwrap();
        let mut feed = DemoFeed::new(3);
        feed.attach(&mut gcx, &mut area).unwrap();

        for frame in 1..=DROP_FRAMES * 6 {
            feed.tick(&mut gcx, &mut area, Duration::from_millis(frame * 16))
                .unwrap();
        }
        assert!(feed.score() >= 60);
        assert_eq!(area.score_label().text(), feed.score().to_string());
        assert_eq!(area.time_label().text(), "00:02");
    }

    #[test]
    fn score_saturates_instead_of_overflowing() {
        let mut gcx = TermContext::new(120, 45);
        let mut area = PlayerArea::new(&mut gcx, HudStyle::default(), false).unwrap();
        let mut feed = DemoFeed::new(3);
        feed.score = u32::MAX - 5;
        feed.level = u32::MAX;
        feed.attach(&mut gcx, &mut area).unwrap();

        for frame in 1..=DROP_FRAMES * 3 {
            feed.tick(&mut gcx, &mut area, Duration::from_millis(frame * 16))
                .unwrap();
        }
        assert_eq!(feed.score(), u32::MAX);
        assert_eq!(area.score_label().text(), u32::MAX.to_string());
    }
}
