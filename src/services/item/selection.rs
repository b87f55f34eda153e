use std::collections::HashSet;

use crate::models::item::ItemId;

/// Ids the UI currently has selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<ItemId>,
}

impl Selection {
    pub fn select(&mut self, id: ItemId) {
        self.ids.insert(id);
    }

    /// Returns true if the id was selected.
    pub fn deselect(&mut self, id: ItemId) -> bool {
        self.ids.remove(&id)
    }

    /// Returns the new selection state of `id`.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.ids.iter().copied()
    }
}
