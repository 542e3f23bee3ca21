//! Read-time rewrite of demo-owner dates.
//!
//! Record at position `i` of a demo result set is shown as dated
//! `today - (i + 2)` days, so the sample data always looks recent. Only the
//! returned copies change; the store keeps whatever it was given.

use time::{macros::format_description, Date, Duration, OffsetDateTime};

use super::repo_types::Record;

/// Days between `today` and the first demo record.
const FIRST_OFFSET_DAYS: i64 = 2;

pub trait Clock: Send + Sync {
    fn today(&self) -> Date;
}

/// Current UTC calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().date()
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Date);

#[cfg(test)]
impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

/// Date shown for the demo record at `index`.
pub fn demo_date(today: Date, index: usize) -> Option<Date> {
    let back = FIRST_OFFSET_DAYS.checked_add(i64::try_from(index).ok()?)?;
    today.checked_sub(Duration::days(back))
}

/// `YYYY-MM-DD`.
pub fn format_ymd(date: Date) -> Option<String> {
    date.format(format_description!("[year]-[month]-[day]")).ok()
}

/// Overwrites `date` on each record with its demo date. A record whose demo
/// date cannot be computed or formatted keeps its stored value.
pub fn shift_demo_dates(records: &mut [Record], today: Date) {
    for (i, record) in records.iter_mut().enumerate() {
        if let Some(date) = demo_date(today, i).and_then(format_ymd) {
            record.date = date;
        }
    }
}
