//! Slot arithmetic for the weekly time grid.
//!
//! A day is split into 288 slots of 5 minutes each. Slot `n` starts at
//! `n * 5` minutes past midnight and is drawn `n * slot_height` pixels below
//! the top of a day column.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use thiserror::Error;

/// Index of a 5-minute interval within a day, `0..SLOTS_PER_DAY`.
pub type Slot = u16;

pub const SLOT_MINUTES: u32 = 5;
pub const SLOTS_PER_HOUR: Slot = 12;
pub const SLOTS_PER_DAY: Slot = 288;
pub const LAST_SLOT: Slot = SLOTS_PER_DAY - 1;

/// Pixel height of a single slot (84px per hour).
pub const DEFAULT_SLOT_HEIGHT: f32 = 7.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("Time must be formatted as HH:MM, got '{0}'")]
    Format(String),
    #[error("Time '{0}' is outside 00:00-23:59")]
    OutOfRange(String),
}

/// Format a slot as "HH:MM". Slots past the end of the day are clamped.
pub fn slot_to_time(slot: Slot) -> String {
    let slot = slot.min(LAST_SLOT);
    format!(
        "{:02}:{:02}",
        slot / SLOTS_PER_HOUR,
        (slot % SLOTS_PER_HOUR) as u32 * SLOT_MINUTES
    )
}

/// Parse "HH:MM" into the slot containing that time.
pub fn time_to_slot(time: &str) -> Result<Slot, TimeParseError> {
    let (hour, minute) = time
        .trim()
        .split_once(':')
        .ok_or_else(|| TimeParseError::Format(time.to_string()))?;

    let hour: u32 = hour
        .parse()
        .map_err(|_| TimeParseError::Format(time.to_string()))?;
    let minute: u32 = minute
        .parse()
        .map_err(|_| TimeParseError::Format(time.to_string()))?;

    if hour > 23 || minute > 59 {
        return Err(TimeParseError::OutOfRange(time.to_string()));
    }

    Ok((hour * SLOTS_PER_HOUR as u32 + minute / SLOT_MINUTES) as Slot)
}

/// Slot containing the given wall-clock time.
pub fn slot_of(time: NaiveTime) -> Slot {
    (time.hour() * SLOTS_PER_HOUR as u32 + time.minute() / SLOT_MINUTES) as Slot
}

/// Wall-clock time at which a slot starts.
pub fn slot_start(slot: Slot) -> NaiveTime {
    let minutes = slot.min(LAST_SLOT) as u32 * SLOT_MINUTES;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or_default()
}

/// Round to the nearest 5-minute boundary (half-up on the minute) and drop
/// seconds. Rounding past :55 rolls into the next hour, and past 23:55 into
/// the next day.
pub fn snap_to_grid(datetime: NaiveDateTime) -> NaiveDateTime {
    let hour_start = datetime
        .date()
        .and_hms_opt(datetime.hour(), 0, 0)
        .unwrap_or(datetime);
    let minutes = (datetime.minute() + SLOT_MINUTES / 2) / SLOT_MINUTES * SLOT_MINUTES;
    hour_start + Duration::minutes(minutes as i64)
}

/// Vertical pixel offset of a slot from the top of a day column.
pub fn slot_to_offset(slot: Slot, slot_height: f32) -> f32 {
    slot as f32 * slot_height
}

/// Unclamped slot index for a vertical offset; negative above the grid.
pub fn offset_to_slot(offset: f32, slot_height: f32) -> i64 {
    if slot_height <= 0.0 || !offset.is_finite() {
        return 0;
    }
    (offset / slot_height).floor() as i64
}

/// Clamp an arbitrary index into `0..=LAST_SLOT`.
pub fn clamp_slot(index: i64) -> Slot {
    index.clamp(0, LAST_SLOT as i64) as Slot
}

/// Half-open interval intersection, `[a_start, a_end)` against `[b_start, b_end)`.
pub fn intervals_overlap<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start < b_end && a_end > b_start
}

/// Parse a manually typed time.
///
/// Accepts `9`, `09`, `9:30`, `0930`, `930` and an optional `am`/`pm`
/// (or `a`/`p`) suffix. Hours are clamped to 0-23 and minutes to 0-59.
/// Returns `None` when the text is not a time yet, so the caller can keep it
/// as free text until it parses.
pub fn parse_time_input(input: &str) -> Option<NaiveTime> {
    let text = input.trim().to_ascii_lowercase();
    if text.is_empty() || !text.is_ascii() {
        return None;
    }

    let (text, meridiem) = if let Some(rest) = text.strip_suffix("am").or_else(|| text.strip_suffix('a')) {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = text.strip_suffix("pm").or_else(|| text.strip_suffix('p')) {
        (rest.trim_end(), Some(true))
    } else {
        (text.as_str(), None)
    };

    let (hour_text, minute_text) = match text.split_once(':') {
        Some((hour, minute)) => (hour, minute),
        None => match text.len() {
            1 | 2 => (text, "0"),
            3 => text.split_at(1),
            4 => text.split_at(2),
            _ => return None,
        },
    };

    if hour_text.is_empty()
        || minute_text.is_empty()
        || !hour_text.chars().all(|c| c.is_ascii_digit())
        || !minute_text.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let mut hour: u32 = hour_text.parse().ok()?;
    let minute: u32 = minute_text.parse::<u32>().ok()?.min(59);

    match meridiem {
        Some(false) if hour == 12 => hour = 0,
        Some(true) if hour < 12 => hour += 12,
        _ => {}
    }

    NaiveTime::from_hms_opt(hour.min(23), minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use test_case::test_case;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test_case(0, "00:00")]
    #[test_case(1, "00:05")]
    #[test_case(108, "09:00")]
    #[test_case(159, "13:15")]
    #[test_case(287, "23:55")]
    fn test_slot_to_time(slot: Slot, expected: &str) {
        assert_eq!(slot_to_time(slot), expected);
    }

    #[test]
    fn test_slot_to_time_clamps_past_end_of_day() {
        assert_eq!(slot_to_time(400), "23:55");
    }

    #[test_case("00:00", 0)]
    #[test_case("09:00", 108)]
    #[test_case("09:04", 108)]
    #[test_case("09:05", 109)]
    #[test_case("23:59", 287)]
    fn test_time_to_slot(time: &str, expected: Slot) {
        assert_eq!(time_to_slot(time).unwrap(), expected);
    }

    #[test]
    fn test_time_to_slot_rejects_garbage() {
        assert_eq!(
            time_to_slot("nine"),
            Err(TimeParseError::Format("nine".to_string()))
        );
        assert!(matches!(time_to_slot("9:xx"), Err(TimeParseError::Format(_))));
        assert!(matches!(time_to_slot("24:00"), Err(TimeParseError::OutOfRange(_))));
        assert!(matches!(time_to_slot("10:60"), Err(TimeParseError::OutOfRange(_))));
    }

    #[test]
    fn test_slot_of_and_slot_start_agree() {
        let time = NaiveTime::from_hms_opt(14, 35, 0).unwrap();
        assert_eq!(slot_of(time), 175);
        assert_eq!(slot_start(175), time);
        assert_eq!(slot_start(0), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_snap_rounds_half_up() {
        assert_eq!(snap_to_grid(at(10, 2, 0)), at(10, 0, 0));
        assert_eq!(snap_to_grid(at(10, 3, 0)), at(10, 5, 0));
        assert_eq!(snap_to_grid(at(10, 7, 59)), at(10, 5, 0));
        assert_eq!(snap_to_grid(at(10, 8, 0)), at(10, 10, 0));
    }

    #[test]
    fn test_snap_zeroes_seconds() {
        assert_eq!(snap_to_grid(at(10, 15, 42)), at(10, 15, 0));
    }

    #[test]
    fn test_snap_rolls_over_hour_and_day() {
        assert_eq!(snap_to_grid(at(10, 58, 0)), at(11, 0, 0));
        let next_day = NaiveDate::from_ymd_opt(2025, 3, 11)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(snap_to_grid(at(23, 59, 0)), next_day);
    }

    #[test]
    fn test_offsets() {
        assert_eq!(slot_to_offset(12, DEFAULT_SLOT_HEIGHT), 84.0);
        assert_eq!(offset_to_slot(84.0, DEFAULT_SLOT_HEIGHT), 12);
        assert_eq!(offset_to_slot(83.9, DEFAULT_SLOT_HEIGHT), 11);
        assert_eq!(offset_to_slot(-1.0, DEFAULT_SLOT_HEIGHT), -1);
        assert_eq!(offset_to_slot(10.0, 0.0), 0);
    }

    #[test]
    fn test_clamp_slot() {
        assert_eq!(clamp_slot(-5), 0);
        assert_eq!(clamp_slot(100), 100);
        assert_eq!(clamp_slot(10_000), LAST_SLOT);
    }

    #[test]
    fn test_intervals_overlap_is_half_open() {
        assert!(intervals_overlap(0, 10, 5, 15));
        assert!(intervals_overlap(5, 15, 0, 10));
        assert!(!intervals_overlap(0, 10, 10, 20));
        assert!(!intervals_overlap(10, 20, 0, 10));
    }

    #[test_case("9", Some((9, 0)))]
    #[test_case("09:30", Some((9, 30)))]
    #[test_case("930", Some((9, 30)))]
    #[test_case("1745", Some((17, 45)))]
    #[test_case("2pm", Some((14, 0)))]
    #[test_case("12am", Some((0, 0)))]
    #[test_case("12:15 pm", Some((12, 15)))]
    #[test_case("7:05a", Some((7, 5)))]
    #[test_case("27:75", Some((23, 59)))]
    #[test_case("", None)]
    #[test_case("noon", None)]
    #[test_case("12345", None)]
    #[test_case(":30", None)]
    #[test_case("é1", None)]
    #[test_case("€1", None)]
    #[test_case("9€", None)]
    fn test_parse_time_input(input: &str, expected: Option<(u32, u32)>) {
        let expected = expected.map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap());
        assert_eq!(parse_time_input(input), expected);
    }
}
