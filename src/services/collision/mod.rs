//! Conflict detection for a candidate time range.
//!
//! Only used to warn while dragging; a conflict never blocks a drop.

use chrono::{Duration, NaiveDateTime};

use crate::models::item::{CalendarItem, ItemId};
use crate::utils::time::{intervals_overlap, SLOT_MINUTES};

/// Items, other than `item_id`, on the candidate's calendar day whose time
/// range intersects `[start, end)`.
///
/// A zero-length candidate or item is treated as covering one slot, the same
/// way the overlap layout treats milestones.
pub fn find_conflicts<'a, I>(
    items: I,
    item_id: Option<ItemId>,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<&'a CalendarItem>
where
    I: IntoIterator<Item = &'a CalendarItem>,
{
    let day = start.date();
    let end = if end > start {
        end
    } else {
        start + Duration::minutes(SLOT_MINUTES as i64)
    };

    items
        .into_iter()
        .filter(|item| Some(item.id) != item_id)
        .filter(|item| item.day() == day)
        .filter(|item| {
            let (other_start, other_end) = item.occupied_range();
            intervals_overlap(start, end, other_start, other_end)
        })
        .collect()
}

pub fn has_conflicts<'a, I>(
    items: I,
    item_id: Option<ItemId>,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> bool
where
    I: IntoIterator<Item = &'a CalendarItem>,
{
    !find_conflicts(items, item_id, start, end).is_empty()
}
