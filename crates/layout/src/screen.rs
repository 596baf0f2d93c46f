//! Placement of player areas on the screen.
//!
//! The screen is split into equal-width columns, one per player. Each area is
//! centered in its column and vertically on the screen. Areas larger than the
//! column are pinned to its top-left corner.

/// Width of one column when `slot_count` areas share `screen_w`.
pub fn column_width(screen_w: i32, slot_count: usize) -> i32 {
    screen_w / slot_count.max(1) as i32
}

/// Top-left corner for area `slot` of `slot_count`.
pub fn arrange(
    slot: usize,
    slot_count: usize,
    screen_w: i32,
    screen_h: i32,
    area_w: i32,
    area_h: i32,
) -> (i32, i32) {
    let column_w = column_width(screen_w, slot_count);
    let column_x = column_w * slot as i32;
    let x = column_x + ((column_w - area_w) / 2).max(0);
    let y = ((screen_h - area_h) / 2).max(0);
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_area_is_centered() {
        assert_eq!(arrange(0, 1, 960, 720, 630, 610), (165, 55));
    }

    #[test]
    fn two_areas_get_a_column_each() {
        assert_eq!(column_width(960, 2), 480);
        assert_eq!(arrange(0, 2, 960, 720, 320, 720), (80, 0));
        assert_eq!(arrange(1, 2, 960, 720, 320, 720), (560, 0));
    }

    #[test]
    fn oversized_area_is_pinned() {
        assert_eq!(arrange(1, 2, 600, 500, 320, 720), (300, 0));
    }
}
