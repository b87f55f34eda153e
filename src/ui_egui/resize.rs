// Item Resize System
//
// Enables resizing items by dragging handles on their top and bottom edges.
// - Top handle: adjusts the start time
// - Bottom handle: adjusts the end time
// While a resize is active the item is left out of the overlap layout so its
// neighbours keep their columns.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use egui::{Pos2, Rect, Vec2};

use crate::models::item::{CalendarItem, ItemError, ItemId, ItemPatch};
use crate::services::item::ItemStore;
use crate::ui_egui::geometry::{GridGeometry, GridLayout};
use crate::utils::date::at_slot;
use crate::utils::time::{Slot, LAST_SLOT, SLOT_MINUTES};

/// Which edge of the item is being resized
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeHandle {
    /// Top edge - adjusts start time
    Top,
    /// Bottom edge - adjusts end time
    Bottom,
}

/// Height of the grab zone for tall items.
pub const HANDLE_ZONE: f32 = 10.0;

/// Context for an active resize operation
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeContext {
    pub item_id: ItemId,
    pub handle: ResizeHandle,
    pub original_start: NaiveDateTime,
    pub original_end: NaiveDateTime,
    /// Slot under the pointer, if it is over the grid
    pub hovered_slot: Option<Slot>,
    pub pointer_pos: Option<Pos2>,
}

impl ResizeContext {
    /// Returns `None` for items that cannot be resized (milestones).
    pub fn new(item: &CalendarItem, handle: ResizeHandle) -> Option<Self> {
        if !item.item_type.is_resizable() {
            return None;
        }

        Some(Self {
            item_id: item.id,
            handle,
            original_start: item.start,
            original_end: item.end,
            hovered_slot: None,
            pointer_pos: None,
        })
    }

    fn day(&self) -> NaiveDate {
        self.original_start.date()
    }

    /// New start and end for the hovered slot, at least one slot long.
    ///
    /// The top handle snaps the start to the top of the hovered slot, the
    /// bottom handle snaps the end to its bottom.
    pub fn hovered_times(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let slot = self.hovered_slot?;
        let min_duration = Duration::minutes(SLOT_MINUTES as i64);

        match self.handle {
            ResizeHandle::Top => {
                let latest = self.original_end - min_duration;
                let start = at_slot(self.day(), slot).min(latest);
                Some((start, self.original_end))
            }
            ResizeHandle::Bottom => {
                let earliest = self.original_start + min_duration;
                let end = at_slot(self.day(), slot + 1).max(earliest);
                Some((self.original_start, end))
            }
        }
    }
}

/// Owner of the current resize gesture.
#[derive(Clone, Debug, Default)]
pub struct ResizeSession {
    active: Option<ResizeContext>,
}

impl ResizeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a resize operation. Ignored for milestones and while another
    /// resize is running.
    pub fn begin(&mut self, item: &CalendarItem, handle: ResizeHandle) -> bool {
        if self.active.is_some() {
            return false;
        }

        match ResizeContext::new(item, handle) {
            Some(context) => {
                log::debug!("Resize start: item {} {:?}", item.id, handle);
                self.active = Some(context);
                true
            }
            None => false,
        }
    }

    pub fn active(&self) -> Option<&ResizeContext> {
        self.active.as_ref()
    }

    /// Item to leave out of the overlap layout while resizing.
    pub fn resizing_item(&self) -> Option<ItemId> {
        self.active.as_ref().map(|context| context.item_id)
    }

    /// Track the pointer; only the slot matters, the day stays the item's own.
    pub fn update_pointer<G: GridGeometry + ?Sized>(
        &mut self,
        geometry: &G,
        pointer: Pos2,
    ) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let cell = GridLayout::capture(geometry).and_then(|layout| layout.hit_test(pointer));
        let context = self.active.as_mut()?;
        context.pointer_pos = Some(pointer);
        if let Some(cell) = cell {
            context.hovered_slot = Some(cell.slot);
        }
        context.hovered_times()
    }

    pub fn update_slot(&mut self, slot: Slot) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let context = self.active.as_mut()?;
        context.hovered_slot = Some(slot.min(LAST_SLOT));
        context.hovered_times()
    }

    /// Finish the resize operation and write the new times to the store.
    /// Returns the item id if it was changed.
    pub fn finish(&mut self, store: &mut ItemStore) -> Result<Option<ItemId>, ItemError> {
        let Some(context) = self.active.take() else {
            return Ok(None);
        };
        let Some((start, end)) = context.hovered_times() else {
            return Ok(None);
        };
        if (start, end) == (context.original_start, context.original_end) {
            return Ok(None);
        }

        let updated = store
            .update(context.item_id, ItemPatch::reschedule(start, end))?
            .map(|item| item.id);
        if updated.is_some() {
            log::info!("Resized item {} to {} - {}", context.item_id, start, end);
        }
        Ok(updated)
    }

    /// Cancel the resize operation
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

/// Hit zones for an item's resize handles.
pub struct HandleRects {
    pub top: Rect,
    pub bottom: Rect,
}

impl HandleRects {
    pub fn for_item(item_rect: Rect) -> Self {
        let height = item_rect.height();

        // Short items are split in half; taller ones get a fixed zone per edge
        let zone_height = if height < HANDLE_ZONE * 4.0 {
            height / 2.0
        } else {
            HANDLE_ZONE
        };

        Self {
            top: Rect::from_min_size(item_rect.min, Vec2::new(item_rect.width(), zone_height)),
            bottom: Rect::from_min_size(
                Pos2::new(item_rect.left(), item_rect.bottom() - zone_height),
                Vec2::new(item_rect.width(), zone_height),
            ),
        }
    }

    /// Check if a point hits any handle and return which one
    pub fn hit_test(&self, pos: Pos2) -> Option<ResizeHandle> {
        if self.top.contains(pos) {
            Some(ResizeHandle::Top)
        } else if self.bottom.contains(pos) {
            Some(ResizeHandle::Bottom)
        } else {
            None
        }
    }
}
