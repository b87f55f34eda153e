// Date utility functions
// Week enumeration and slot-to-datetime helpers for the weekly grid

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::utils::time::{Slot, SLOT_MINUTES};

pub const DAYS_PER_WEEK: usize = 7;

pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::default())
}

/// The moment a slot starts on the given day.
pub fn at_slot(date: NaiveDate, slot: Slot) -> NaiveDateTime {
    start_of_day(date) + Duration::minutes(slot as i64 * SLOT_MINUTES as i64)
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64).rem_euclid(7);
    date - Duration::days(offset)
}

/// The seven days of the week containing `date`, in display order.
pub fn week_days(date: NaiveDate, first_day_of_week: u8) -> [NaiveDate; DAYS_PER_WEEK] {
    let start = week_start(date, first_day_of_week);
    std::array::from_fn(|offset| start + Duration::days(offset as i64))
}
