//! In-memory calendar item collection.
//! Mutation and query operations are split across focused submodules; the
//! collection lives for the session only.

use crate::models::item::{CalendarItem, ItemError, ItemId};

pub mod crud;
pub mod queries;
mod selection;

pub use selection::Selection;

/// The session's calendar items in insertion order, plus the ids the UI has
/// selected.
#[derive(Debug, Clone)]
pub struct ItemStore {
    pub(crate) items: Vec<CalendarItem>,
    /// `None` once `u64::MAX` has been used.
    pub(crate) next_id: Option<u64>,
    pub(crate) selection: Selection,
}

impl ItemStore {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: Some(1),
            selection: Selection::default(),
        }
    }

    /// Seed a store with existing items. Ids must be unique.
    pub fn with_items(items: impl IntoIterator<Item = CalendarItem>) -> Result<Self, ItemError> {
        let mut store = Self::new();
        for item in items {
            store.add(item)?;
        }
        Ok(store)
    }

    /// Hand out an id no item in this store has used.
    pub fn allocate_id(&mut self) -> Result<ItemId, ItemError> {
        let id = self.next_id.ok_or(ItemError::IdsExhausted)?;
        self.next_id = id.checked_add(1);
        Ok(ItemId(id))
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::{ItemPatch, ItemType};
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;

    fn monday_at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn sample_item(store: &mut ItemStore, title: &str, hour: u32) -> CalendarItem {
        let start = monday_at(hour, 0);
        CalendarItem::new(
            store.allocate_id().unwrap(),
            ItemType::Event,
            title,
            start,
            start + Duration::hours(1),
        )
        .unwrap()
    }

    #[test]
    fn test_add_item() {
        let mut store = ItemStore::new();
        let item = sample_item(&mut store, "Sync", 9);
        let id = store.add(item.clone()).unwrap();

        assert_eq!(id, item.id);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id), Some(&item));
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut store = ItemStore::new();
        let item = sample_item(&mut store, "Sync", 9);
        store.add(item.clone()).unwrap();

        let result = store.add(item.clone());
        assert_eq!(result, Err(ItemError::DuplicateId(item.id)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_rejects_invalid_item() {
        let mut store = ItemStore::new();
        let mut item = sample_item(&mut store, "Sync", 9);
        item.end = item.start - Duration::minutes(5);

        assert_eq!(store.add(item), Err(ItemError::EndBeforeStart));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_with_foreign_id_advances_allocator() {
        let mut store = ItemStore::new();
        let start = monday_at(9, 0);
        let item = CalendarItem::new(ItemId(41), ItemType::Task, "Imported", start, start).unwrap();
        store.add(item).unwrap();

        assert_eq!(store.allocate_id(), Ok(ItemId(42)));
    }

    #[test]
    fn test_largest_id_exhausts_allocator() {
        let mut store = ItemStore::new();
        let start = monday_at(9, 0);
        let last = CalendarItem::new(ItemId(u64::MAX), ItemType::Event, "Last", start, start).unwrap();
        let early = CalendarItem::new(ItemId(3), ItemType::Event, "Early", start, start).unwrap();

        assert_eq!(store.add(last), Ok(ItemId(u64::MAX)));
        assert_eq!(store.add(early), Ok(ItemId(3)));
        assert_eq!(store.allocate_id(), Err(ItemError::IdsExhausted));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_allocator_hands_out_the_last_id_once() {
        let mut store = ItemStore::new();
        store.next_id = Some(u64::MAX);

        assert_eq!(store.allocate_id(), Ok(ItemId(u64::MAX)));
        assert_eq!(store.allocate_id(), Err(ItemError::IdsExhausted));
    }

    #[test]
    fn test_update_item() {
        let mut store = ItemStore::new();
        let item = sample_item(&mut store, "Sync", 9);
        let id = store.add(item).unwrap();

        let updated = store
            .update(id, ItemPatch::default().title("Weekly sync"))
            .unwrap()
            .cloned();

        assert_eq!(updated.map(|i| i.title), Some("Weekly sync".to_string()));
        assert_eq!(store.get(id).unwrap().title, "Weekly sync");
    }

    #[test]
    fn test_update_missing_item_is_noop() {
        let mut store = ItemStore::new();
        let result = store.update(ItemId(99), ItemPatch::default().title("Ghost"));
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_update_rejects_invalid_result_and_keeps_original() {
        let mut store = ItemStore::new();
        let item = sample_item(&mut store, "Sync", 9);
        let id = store.add(item.clone()).unwrap();

        let patch = ItemPatch {
            end: Some(item.start - Duration::hours(1)),
            ..ItemPatch::default()
        };
        assert_eq!(store.update(id, patch), Err(ItemError::EndBeforeStart));
        assert_eq!(store.get(id), Some(&item));
    }

    #[test]
    fn test_delete_item_clears_selection() {
        let mut store = ItemStore::new();
        let item = sample_item(&mut store, "Sync", 9);
        let id = store.add(item.clone()).unwrap();
        store.selection_mut().select(id);

        let removed = store.delete(id);
        assert_eq!(removed, Some(item));
        assert!(store.get(id).is_none());
        assert!(!store.selection().contains(id));
    }

    #[test]
    fn test_delete_missing_item_is_noop() {
        let mut store = ItemStore::new();
        assert_eq!(store.delete(ItemId(7)), None);
    }

    #[test]
    fn test_items_on_day() {
        let mut store = ItemStore::new();
        let monday = sample_item(&mut store, "Monday", 9);
        let mut tuesday = sample_item(&mut store, "Tuesday", 9);
        tuesday.start += Duration::days(1);
        tuesday.end += Duration::days(1);
        store.add(monday).unwrap();
        store.add(tuesday).unwrap();

        let titles: Vec<&str> = store
            .items_on(monday_at(0, 0).date())
            .into_iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Monday"]);
    }

    #[test]
    fn test_toggle_completed_only_for_tasks() {
        let mut store = ItemStore::new();
        let event = sample_item(&mut store, "Event", 9);
        let start = monday_at(11, 0);
        let task = CalendarItem::new(
            store.allocate_id().unwrap(),
            ItemType::Task,
            "Write notes",
            start,
            start + Duration::hours(1),
        )
        .unwrap();
        let event_id = store.add(event).unwrap();
        let task_id = store.add(task).unwrap();

        assert_eq!(store.toggle_completed(task_id), Some(true));
        assert_eq!(store.toggle_completed(task_id), Some(false));
        assert_eq!(store.toggle_completed(event_id), None);
        assert_eq!(store.toggle_completed(ItemId(500)), None);
    }

    #[test]
    fn test_with_items_rejects_duplicates() {
        let start = monday_at(9, 0);
        let a = CalendarItem::new(ItemId(1), ItemType::Event, "A", start, start).unwrap();
        let b = CalendarItem::new(ItemId(1), ItemType::Event, "B", start, start).unwrap();

        assert!(ItemStore::with_items(vec![a.clone()]).is_ok());
        assert_eq!(
            ItemStore::with_items(vec![a, b]).unwrap_err(),
            ItemError::DuplicateId(ItemId(1))
        );
    }
}
