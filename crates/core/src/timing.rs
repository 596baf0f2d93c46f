//! Gametime formatting for the HUD clock.

use std::time::Duration;

/// Format a duration as `MM:SS`.
///
/// Minutes keep counting past 59, so a long session reads `75:03`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use blok_core::format_gametime;
///
/// assert_eq!(format_gametime(Duration::from_secs(0)), "00:00");
/// assert_eq!(format_gametime(Duration::from_millis(61_999)), "01:01");
/// ```
pub fn format_gametime(gametime: Duration) -> String {
    let secs = gametime.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
