//! RNG module - seeded generator and 7-bag preview source
//!
//! Everything random in the client goes through an injected [`SimpleRng`], so
//! a seed reproduces the same theme picks and the same piece previews.
//!
//! [`PieceBag`] implements the "7-bag" sequence: one of each piece, shuffled,
//! then the next bag.

use std::collections::VecDeque;

use crate::types::PieceKind;

/// Seeded linear congruential generator.
///
/// Not suitable for anything but picks that must repeat for a given seed.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

const LCG_MUL: u32 = 1_664_525;
const LCG_INC: u32 = 1_013_904_223;

impl SimpleRng {
    /// A zero seed is replaced by 1.
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC);
        self.state
    }

    /// Value in `0..max`; `max` must be non-zero.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Pick one element uniformly, or `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let i = self.next_range(items.len() as u32) as usize;
        items.get(i)
    }

    /// Fisher-Yates, back to front.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for hi in (1..items.len()).rev() {
            let lo = self.next_range(hi as u32 + 1) as usize;
            items.swap(hi, lo);
        }
    }
}

/// Upcoming pieces are always known this far ahead.
pub const BAG_LOOKAHEAD: usize = 5;

/// 7-bag piece sequence feeding the next-queue preview.
///
/// Whole bags are appended to `upcoming` whenever fewer than
/// [`BAG_LOOKAHEAD`] pieces remain, so peeking never needs to predict.
#[derive(Debug, Clone)]
pub struct PieceBag {
    upcoming: VecDeque<PieceKind>,
    rng: SimpleRng,
}

impl PieceBag {
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            upcoming: VecDeque::with_capacity(2 * PieceKind::ALL.len()),
            rng: SimpleRng::new(seed),
        };
        bag.top_up();
        bag
    }

    fn top_up(&mut self) {
        while self.upcoming.len() < BAG_LOOKAHEAD {
            let mut next = PieceKind::ALL;
            self.rng.shuffle(&mut next);
            self.upcoming.extend(next);
        }
    }

    /// The next five pieces, in draw order.
    pub fn peek_5(&self) -> [PieceKind; BAG_LOOKAHEAD] {
        let mut out = [PieceKind::I; BAG_LOOKAHEAD];
        for (slot, kind) in out.iter_mut().zip(self.upcoming.iter()) {
            *slot = *kind;
        }
        out
    }

    pub fn draw(&mut self) -> PieceKind {
        let piece = self.upcoming.pop_front().unwrap_or(PieceKind::I);
        self.top_up();
        piece
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}
