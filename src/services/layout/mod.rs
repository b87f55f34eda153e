//! Side-by-side layout of overlapping items within a day column.
//!
//! Every call recomputes positions from the current items; nothing here is
//! cached across mutations.

use chrono::{Duration, NaiveDate};

use crate::models::item::{CalendarItem, ItemId};
use crate::services::item::ItemStore;
use crate::utils::date::DAYS_PER_WEEK;
use crate::utils::time::{intervals_overlap, slot_of, Slot, SLOTS_PER_DAY};

/// An item with the column it is drawn in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedItem<'a> {
    pub item: &'a CalendarItem,
    pub column: usize,
    pub total_columns: usize,
    pub start_slot: Slot,
    /// Exclusive.
    pub end_slot: Slot,
}

/// Slot range `[start, end)` an item covers on its own day.
///
/// Items ending after their day runs out are cut at the end of the grid, and
/// zero-length items cover one slot.
pub fn slot_range(item: &CalendarItem) -> (Slot, Slot) {
    let start = slot_of(item.start.time());
    let end = if item.end.date() > item.start.date() {
        SLOTS_PER_DAY
    } else {
        slot_of(item.end.time())
    };
    (start, end.max(start + 1))
}

/// Assign each item a column and column count so overlapping items sit side
/// by side.
///
/// Items are seeded in input order. A seed's group is every item whose slot
/// range directly intersects the seed's, including items already placed by
/// an earlier seed; the group is sorted by start slot (stable) and each
/// member takes its index as column and the group size as column count,
/// replacing any earlier assignment. Grouping is single-hop: items that only
/// share a neighbour are not merged into one cluster.
///
/// `exclude` (an item being resized) is laid out alone at full width and
/// does not push the others around.
pub fn resolve_overlaps<'a>(
    items: &[&'a CalendarItem],
    exclude: Option<ItemId>,
) -> Vec<PositionedItem<'a>> {
    let mut excluded: Option<(usize, PositionedItem<'a>)> = None;
    let mut ranged: Vec<(&'a CalendarItem, Slot, Slot)> = Vec::with_capacity(items.len());

    for (index, &item) in items.iter().enumerate() {
        let (start_slot, end_slot) = slot_range(item);
        if excluded.is_none() && Some(item.id) == exclude {
            excluded = Some((
                index,
                PositionedItem {
                    item,
                    column: 0,
                    total_columns: 1,
                    start_slot,
                    end_slot,
                },
            ));
        } else {
            ranged.push((item, start_slot, end_slot));
        }
    }

    let mut columns: Vec<(usize, usize)> = vec![(0, 1); ranged.len()];
    let mut placed = vec![false; ranged.len()];

    for seed in 0..ranged.len() {
        if placed[seed] {
            continue;
        }

        let (_, seed_start, seed_end) = ranged[seed];
        let mut group: Vec<usize> = (0..ranged.len())
            .filter(|&other| {
                let (_, start, end) = ranged[other];
                intervals_overlap(seed_start, seed_end, start, end)
            })
            .collect();
        group.sort_by_key(|&member| ranged[member].1);

        let total_columns = group.len();
        for (column, &member) in group.iter().enumerate() {
            columns[member] = (column, total_columns);
            placed[member] = true;
        }
    }

    let mut positioned: Vec<PositionedItem<'a>> = ranged
        .into_iter()
        .zip(columns)
        .map(|((item, start_slot, end_slot), (column, total_columns))| PositionedItem {
            item,
            column,
            total_columns,
            start_slot,
            end_slot,
        })
        .collect();

    if let Some((index, item)) = excluded {
        positioned.insert(index.min(positioned.len()), item);
    }

    positioned
}

/// Layout for the items drawn on `date`.
pub fn layout_day(store: &ItemStore, date: NaiveDate, exclude: Option<ItemId>) -> Vec<PositionedItem<'_>> {
    resolve_overlaps(&store.items_on(date), exclude)
}

/// Layout for the seven days starting at `week_start`.
pub fn layout_week(
    store: &ItemStore,
    week_start: NaiveDate,
    exclude: Option<ItemId>,
) -> [Vec<PositionedItem<'_>>; DAYS_PER_WEEK] {
    std::array::from_fn(|offset| layout_day(store, week_start + Duration::days(offset as i64), exclude))
}
