//! Calendar-month arithmetic for staleness boundaries
//!
//! Branch age is measured in whole calendar months computed from year/month
//! components only, never elapsed days. Two commits eleven days apart can
//! differ by one month if they straddle a month boundary.

use chrono::{DateTime, Datelike, LocalResult, TimeZone};

/// First instant of the month that is `months` calendar months before
/// `now`'s month, in `now`'s timezone.
///
/// The boundary is pinned to the 1st of the month at 00:00. Month
/// subtraction that underflows below January wraps through December with a
/// year decrement, so `cutoff_boundary(2024-01-.., 2)` is `2023-11-01T00:00`.
///
/// Pure: `now` is injected by the caller, never read from the wall clock.
pub fn cutoff_boundary<Tz: TimeZone>(now: &DateTime<Tz>, months: u32) -> DateTime<Tz> {
    let mut year = now.year();
    let mut month = now.month() as i64 - months as i64;
    while month <= 0 {
        month += 12;
        year -= 1;
    }

    match now.timezone().with_ymd_and_hms(year, month as u32, 1, 0, 0, 0) {
        LocalResult::Single(boundary) => boundary,
        // Fall-back DST transition duplicates the hour; the boundary is the
        // first of the two instants.
        LocalResult::Ambiguous(earliest, _) => earliest,
        // Spring-forward gap at midnight on the 1st. US Eastern never shifts
        // there, but the arithmetic stays total for zones that do.
        LocalResult::None => now
            .timezone()
            .with_ymd_and_hms(year, month as u32, 1, 1, 0, 0)
            .earliest()
            .unwrap_or_else(|| now.clone()),
    }
}

/// Whole-calendar-month difference between two timestamps, from year/month
/// components alone. Negative when `earlier` is actually in a later month.
///
/// Both arguments must already be in the reporting timezone; the component
/// arithmetic is only meaningful when they share one.
pub fn months_between<Tz: TimeZone>(later: &DateTime<Tz>, earlier: &DateTime<Tz>) -> i64 {
    (later.year() as i64 - earlier.year() as i64) * 12
        + (later.month() as i64 - earlier.month() as i64)
}
