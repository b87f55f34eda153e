use super::ItemStore;
use crate::models::item::{CalendarItem, ItemError, ItemId, ItemPatch, ItemType};

impl ItemStore {
    /// Append an item. The id must not already be in use.
    pub fn add(&mut self, item: CalendarItem) -> Result<ItemId, ItemError> {
        item.validate()?;

        if self.contains(item.id) {
            return Err(ItemError::DuplicateId(item.id));
        }

        let id = item.id;
        // Ids are never reused, so the allocator skips past foreign ones
        self.next_id = match id.0.checked_add(1) {
            Some(after) => self.next_id.map(|next| next.max(after)),
            None => None,
        };
        log::debug!("Added {:?} item {} '{}'", item.item_type, id, item.title);
        self.items.push(item);
        Ok(id)
    }

    /// Merge `patch` into the item with `id`.
    ///
    /// Returns `Ok(None)` when no such item exists (it may have been removed
    /// by another UI action). A patch that would leave the item invalid is
    /// rejected and the stored item is left untouched.
    pub fn update(
        &mut self,
        id: ItemId,
        patch: ItemPatch,
    ) -> Result<Option<&CalendarItem>, ItemError> {
        let Some(index) = self.index_of(id) else {
            log::debug!("Ignoring update for missing item {}", id);
            return Ok(None);
        };

        let mut updated = self.items[index].clone();
        updated.apply(patch);
        updated.validate()?;

        self.items[index] = updated;
        log::debug!("Updated item {}", id);
        Ok(Some(&self.items[index]))
    }

    /// Remove the item with `id` and drop it from the selection.
    pub fn delete(&mut self, id: ItemId) -> Option<CalendarItem> {
        self.selection.deselect(id);

        let Some(index) = self.index_of(id) else {
            log::debug!("Ignoring delete for missing item {}", id);
            return None;
        };

        log::debug!("Deleted item {}", id);
        Some(self.items.remove(index))
    }

    /// Flip the completed flag of a task. Returns the new value, or `None`
    /// when the id is unknown or not a task.
    pub fn toggle_completed(&mut self, id: ItemId) -> Option<bool> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id && item.item_type == ItemType::Task)?;
        item.completed = !item.completed;
        Some(item.completed)
    }
}
