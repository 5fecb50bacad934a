//! Print layout advice.
//!
//! The engine accepts any positive day count; these helpers only tell
//! callers which counts fit a single landscape A4 page comfortably.

/// Day counts offered by the sheet settings
pub const RECOMMENDED_DAY_COUNTS: [u32; 5] = [7, 14, 21, 28, 30];

/// Widest sheet that still fits one landscape page
pub const MAX_PRINTABLE_DAYS: u32 = 30;

pub fn is_recommended_day_count(day_count: u32) -> bool {
    RECOMMENDED_DAY_COUNTS.contains(&day_count)
}

/// Advisory text for day counts that print poorly, if any
pub fn advise(day_count: u32) -> Option<String> {
    if day_count > MAX_PRINTABLE_DAYS {
        Some(format!(
            "{} days will not fit on one landscape A4 page (max {})",
            day_count, MAX_PRINTABLE_DAYS
        ))
    } else if !is_recommended_day_count(day_count) {
        Some(format!(
            "{} days is not one of the recommended counts {:?}",
            day_count, RECOMMENDED_DAY_COUNTS
        ))
    } else {
        None
    }
}
