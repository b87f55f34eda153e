// Drag and Drop Session
//
// Tracks one pointer drag at a time, from either the tool palette (creates a
// new item) or the grid (moves an existing item). The target cell is
// recomputed on every pointer move; the store is only touched when the drag
// starts as a duplicate, when it is dropped, and when a duplicate is
// cancelled.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use egui::{Modifiers, Pos2};

use crate::models::item::{CalendarItem, ItemError, ItemId, ItemPatch, ItemType};
use crate::models::settings::{DuplicateModifier, GridSettings};
use crate::models::template::ToolTemplate;
use crate::services::collision::find_conflicts;
use crate::services::item::ItemStore;
use crate::ui_egui::geometry::{GridCell, GridGeometry, GridLayout};
use crate::utils::date::{at_slot, week_start, DAYS_PER_WEEK};
use crate::utils::time::{snap_to_grid, Slot, LAST_SLOT};

/// Where the dragged thing came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragSource {
    /// Palette template, creates an item on drop.
    Tools,
    /// Existing item on the grid, moved on drop.
    Calendar,
}

/// What is being dragged.
#[derive(Clone, Debug, PartialEq)]
pub enum DraggedItem {
    Template(ToolTemplate),
    Existing(ItemId),
}

impl DraggedItem {
    pub fn source(&self) -> DragSource {
        match self {
            DraggedItem::Template(_) => DragSource::Tools,
            DraggedItem::Existing(_) => DragSource::Calendar,
        }
    }

    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            DraggedItem::Template(_) => None,
            DraggedItem::Existing(id) => Some(*id),
        }
    }

    pub fn item_type(&self, store: &ItemStore) -> Option<ItemType> {
        match self {
            DraggedItem::Template(template) => Some(template.item_type),
            DraggedItem::Existing(id) => store.get(*id).map(|item| item.item_type),
        }
    }
}

/// State of an active drag, exposed to the render layer for the ghost
/// preview and validity styling.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    pub dragged: DraggedItem,
    pub target_day: Option<usize>,
    pub target_slot: Option<Slot>,
    pub is_valid_drop: bool,
    pub pointer_pos: Option<Pos2>,
    /// Original item when the dragged item is a duplicate made for this drag.
    pub duplicated_from: Option<ItemId>,
    /// Duration the dropped item will have.
    pub duration: Duration,
}

impl DragState {
    fn new(dragged: DraggedItem, duration: Duration) -> Self {
        Self {
            dragged,
            target_day: None,
            target_slot: None,
            is_valid_drop: false,
            pointer_pos: None,
            duplicated_from: None,
            duration,
        }
    }

    pub fn source(&self) -> DragSource {
        self.dragged.source()
    }

    pub fn target_cell(&self) -> Option<GridCell> {
        match (self.target_day, self.target_slot) {
            (Some(day), Some(slot)) => Some(GridCell { day, slot }),
            _ => None,
        }
    }

    fn set_target(&mut self, cell: Option<GridCell>) {
        let cell = cell.filter(|c| c.day < DAYS_PER_WEEK && c.slot <= LAST_SLOT);
        self.target_day = cell.map(|c| c.day);
        self.target_slot = cell.map(|c| c.slot);
        self.is_valid_drop = cell.is_some();
    }
}

/// Result of ending a drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// A palette template was dropped and became a new item.
    Created(ItemId),
    /// An existing item (or its duplicate) was moved.
    Moved(ItemId),
    /// The dragged item disappeared from the store during the drag.
    Missing(ItemId),
    /// Nothing changed, apart from removing a duplicate made for the drag.
    Cancelled { removed_duplicate: Option<ItemId> },
    /// No drag was active.
    Idle,
}

/// Owner of the current drag gesture for one weekly grid.
#[derive(Clone, Debug)]
pub struct DragSession {
    week_start: NaiveDate,
    duplicate_modifier: DuplicateModifier,
    state: Option<DragState>,
}

impl DragSession {
    pub fn new(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            duplicate_modifier: DuplicateModifier::Command,
            state: None,
        }
    }

    /// Session for the week containing `date`, starting on the configured
    /// first day of the week.
    pub fn with_settings(date: NaiveDate, settings: &GridSettings) -> Self {
        Self {
            duplicate_modifier: settings.duplicate_modifier,
            ..Self::new(week_start(date, settings.first_day_of_week))
        }
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    pub fn set_week_start(&mut self, week_start: NaiveDate) {
        self.week_start = week_start;
        if let Some(state) = self.state.as_mut() {
            state.set_target(None);
        }
    }

    pub fn state(&self) -> Option<&DragState> {
        self.state.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_some()
    }

    /// Start dragging a palette template. Ignored while another drag is
    /// active or when the template is invalid.
    pub fn begin_template(&mut self, template: ToolTemplate) -> bool {
        if self.is_dragging() {
            log::warn!("Ignoring template drag start while a drag is active");
            return false;
        }

        if let Err(e) = template.validate() {
            log::warn!("Ignoring drag of invalid {:?} template: {}", template.item_type, e);
            return false;
        }

        log::debug!("Drag start: {:?} template", template.item_type);
        let duration = template.duration();
        self.state = Some(DragState::new(DraggedItem::Template(template), duration));
        true
    }

    /// Start dragging an existing item.
    ///
    /// With the duplicate modifier held a copy is added to the store straight
    /// away and the copy is what gets dragged. Returns the id being dragged,
    /// or `None` if the drag did not start.
    pub fn begin_item(
        &mut self,
        store: &mut ItemStore,
        id: ItemId,
        modifiers: Modifiers,
    ) -> Result<Option<ItemId>, ItemError> {
        if self.is_dragging() {
            log::warn!("Ignoring drag start on item {} while a drag is active", id);
            return Ok(None);
        }

        let Some(original) = store.get(id).cloned() else {
            log::debug!("Ignoring drag start on missing item {}", id);
            return Ok(None);
        };

        let duration = original.duration();
        let state = if self.duplicate_modifier.is_held(&modifiers) {
            let copy = original.duplicate(store.allocate_id()?);
            let copy_id = store.add(copy)?;
            log::debug!("Drag start: duplicating item {} as {}", id, copy_id);
            DragState {
                duplicated_from: Some(id),
                ..DragState::new(DraggedItem::Existing(copy_id), duration)
            }
        } else {
            log::debug!("Drag start: item {}", id);
            DragState::new(DraggedItem::Existing(id), duration)
        };

        let dragged_id = state.dragged.item_id();
        self.state = Some(state);
        Ok(dragged_id)
    }

    /// Recompute the drop target from the pointer. Returns whether dropping
    /// now would succeed.
    pub fn update_pointer<G: GridGeometry + ?Sized>(&mut self, geometry: &G, pointer: Pos2) -> bool {
        let cell = GridLayout::capture(geometry).and_then(|layout| layout.hit_test(pointer));
        match self.state.as_mut() {
            Some(state) => {
                state.pointer_pos = Some(pointer);
                state.set_target(cell);
                state.is_valid_drop
            }
            None => false,
        }
    }

    /// Set the drop target directly, for hosts that hit-test themselves.
    pub fn update_target(&mut self, cell: Option<GridCell>) -> bool {
        match self.state.as_mut() {
            Some(state) => {
                state.set_target(cell);
                state.is_valid_drop
            }
            None => false,
        }
    }

    /// Start time the dragged item would get if dropped now.
    pub fn candidate_start(&self) -> Option<NaiveDateTime> {
        let cell = self.state.as_ref()?.target_cell()?;
        let date = self.week_start + Duration::days(cell.day as i64);
        Some(snap_to_grid(at_slot(date, cell.slot)))
    }

    /// Time range the dragged item would occupy if dropped now.
    pub fn preview(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let duration = self.state.as_ref()?.duration;
        let start = self.candidate_start()?;
        Some((start, start + duration))
    }

    /// Items the dragged item would overlap at the current target.
    pub fn conflicts<'a>(&self, store: &'a ItemStore) -> Vec<&'a CalendarItem> {
        let (Some(state), Some((start, end))) = (self.state.as_ref(), self.preview()) else {
            return Vec::new();
        };
        find_conflicts(store.items(), state.dragged.item_id(), start, end)
    }

    /// Move to `pointer` and finish the drag there.
    pub fn drop_at<G: GridGeometry + ?Sized>(
        &mut self,
        store: &mut ItemStore,
        geometry: &G,
        pointer: Pos2,
    ) -> Result<DropOutcome, ItemError> {
        self.update_pointer(geometry, pointer);
        self.finish(store)
    }

    /// Finish the drag at the current target.
    ///
    /// Without a valid target this is a cancel. The session is idle again
    /// afterwards whatever the outcome.
    pub fn finish(&mut self, store: &mut ItemStore) -> Result<DropOutcome, ItemError> {
        let Some(start) = self.candidate_start() else {
            return Ok(self.cancel(store));
        };
        let Some(state) = self.state.take() else {
            return Ok(DropOutcome::Idle);
        };

        let result = Self::commit(&state, store, start);
        if result.is_err() {
            Self::discard_duplicate(&state, store);
        }
        result
    }

    /// Abort the drag. Removes a duplicate made for it, never the original.
    /// Calling this with no active drag does nothing.
    pub fn cancel(&mut self, store: &mut ItemStore) -> DropOutcome {
        let Some(state) = self.state.take() else {
            return DropOutcome::Idle;
        };

        log::debug!("Drag cancelled: {:?}", state.dragged);
        DropOutcome::Cancelled {
            removed_duplicate: Self::discard_duplicate(&state, store),
        }
    }

    fn commit(
        state: &DragState,
        store: &mut ItemStore,
        start: NaiveDateTime,
    ) -> Result<DropOutcome, ItemError> {
        match &state.dragged {
            DraggedItem::Template(template) => {
                let item = template.instantiate(store.allocate_id()?, start)?;
                let id = store.add(item)?;
                log::info!("Created {:?} item {} at {}", template.item_type, id, start);
                Ok(DropOutcome::Created(id))
            }
            DraggedItem::Existing(id) => {
                let Some(duration) = store.get(*id).map(CalendarItem::duration) else {
                    log::warn!("Dropped item {} no longer exists", id);
                    return Ok(DropOutcome::Missing(*id));
                };
                let patch = ItemPatch::reschedule(start, start + duration);
                match store.update(*id, patch)? {
                    Some(_) => {
                        log::info!("Moved item {} to {}", id, start);
                        Ok(DropOutcome::Moved(*id))
                    }
                    None => Ok(DropOutcome::Missing(*id)),
                }
            }
        }
    }

    fn discard_duplicate(state: &DragState, store: &mut ItemStore) -> Option<ItemId> {
        state.duplicated_from?;
        let copy_id = state.dragged.item_id()?;
        store.delete(copy_id).map(|copy| copy.id)
    }
}
