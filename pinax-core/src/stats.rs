//! Statistics text rendering
//!
//! The statistics screen shows durations and filament usage as fixed
//! 15-character text fields; rendering truncates silently if a value ever
//! outgrows the field.

use core::fmt::Write;

use heapless::String;

/// Width of the panel's statistics text fields
pub const STATS_TEXT_LEN: usize = 15;

/// Render a duration as compact `y d h m s` text
///
/// Leading units are omitted while zero: `"59s"`, `"5m 3s"`,
/// `"2d 7h 30m 12s"`.
pub fn format_duration(secs: u32) -> String<STATS_TEXT_LEN> {
    let years = secs / (365 * 24 * 3600);
    let days = (secs / (24 * 3600)) % 365;
    let hours = (secs / 3600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;

    let mut out = String::new();
    let _ = if years > 0 {
        write!(
            out,
            "{}y {}d {}h {}m {}s",
            years, days, hours, minutes, seconds
        )
    } else if days > 0 {
        write!(out, "{}d {}h {}m {}s", days, hours, minutes, seconds)
    } else if hours > 0 {
        write!(out, "{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        write!(out, "{}m {}s", minutes, seconds)
    } else {
        write!(out, "{}s", seconds)
    };
    out
}

/// Render filament usage as `meters.decimeter` text, e.g. `"12.3m"`
pub fn format_filament(mm: u32) -> String<STATS_TEXT_LEN> {
    let meters = mm / 1000;
    let decimeters = (mm / 100) % 10;

    let mut out = String::new();
    let _ = write!(out, "{}.{}m", meters, decimeters);
    out
}
