use chrono::NaiveDate;

use super::ItemStore;
use crate::models::item::{CalendarItem, ItemId};

impl ItemStore {
    pub fn get(&self, id: ItemId) -> Option<&CalendarItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index_of(id).is_some()
    }

    /// All items in insertion order.
    pub fn items(&self) -> &[CalendarItem] {
        &self.items
    }

    /// Items drawn on `date`, i.e. starting on that calendar day.
    pub fn items_on(&self, date: NaiveDate) -> Vec<&CalendarItem> {
        self.items.iter().filter(|item| item.day() == date).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}
