//! Time bucketing helpers (UTC calendar policy)
//!
//! Every calendar decision in the engine (what counts as "today", which
//! month an order falls in, the 7-day series buckets) is made on the UTC
//! calendar. The remote store records RFC 3339 timestamps; converting to a
//! viewer-local calendar is a presentation concern left to the UI.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

/// UTC calendar date of a timestamp.
pub fn utc_date(ts: DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Whether two timestamps fall in the same UTC calendar month.
pub fn same_utc_month(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// The `n` UTC calendar days ending at `now`'s date inclusive, ascending.
///
/// Always returns exactly `n` entries.
pub fn trailing_days(now: DateTime<Utc>, n: u64) -> Vec<NaiveDate> {
    let today = now.date_naive();
    (0..n)
        .rev()
        .map(|back| {
            today
                .checked_sub_days(Days::new(back))
                .unwrap_or(NaiveDate::MIN)
        })
        .collect()
}
