// Calendar item module
// The scheduled unit placed on the weekly time grid

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::time::SLOT_MINUTES;

/// Identifier of an item, unique within an `ItemStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of calendar item. Decides default duration and color only; the grid
/// treats every kind the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Event,
    Task,
    Milestone,
    Highlight,
}

impl ItemType {
    pub const ALL: [ItemType; 4] = [
        ItemType::Event,
        ItemType::Task,
        ItemType::Milestone,
        ItemType::Highlight,
    ];

    /// Duration given to an item dropped from the palette.
    pub fn default_duration(&self) -> Duration {
        match self {
            ItemType::Event | ItemType::Task => Duration::minutes(60),
            ItemType::Highlight => Duration::minutes(120),
            ItemType::Milestone => Duration::zero(),
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            ItemType::Event => "New event",
            ItemType::Task => "New task",
            ItemType::Milestone => "New milestone",
            ItemType::Highlight => "New highlight",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemType::Event => "Event",
            ItemType::Task => "Task",
            ItemType::Milestone => "Milestone",
            ItemType::Highlight => "Highlight",
        }
    }

    /// Hex color used by the render layer.
    pub fn color(&self) -> &'static str {
        match self {
            ItemType::Event => "#5B5FC7",
            ItemType::Task => "#13A10E",
            ItemType::Milestone => "#C4314B",
            ItemType::Highlight => "#FFAA44",
        }
    }

    /// Milestones are points in time and have no edges to drag.
    pub fn is_resizable(&self) -> bool {
        !matches!(self, ItemType::Milestone)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("Item title cannot be empty")]
    EmptyTitle,
    #[error("Item end time must not be before start time")]
    EndBeforeStart,
    #[error("Item with id {0} already exists")]
    DuplicateId(ItemId),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("No item ids left to allocate")]
    IdsExhausted,
}

/// A scheduled item on the calendar.
///
/// The item belongs to the calendar day of `start`; nothing spans midnight
/// as far as the grid is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarItem {
    pub id: ItemId,
    pub item_type: ItemType,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Only meaningful for tasks.
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Recurrence pattern as entered (e.g. an RRULE); stored, never expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_pattern: Option<String>,
}

impl CalendarItem {
    /// Create a new item with required fields
    ///
    /// # Examples
    /// ```
    /// use meeting_scheduler::models::item::{CalendarItem, ItemId, ItemType};
    /// use chrono::{Duration, NaiveDate};
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let item = CalendarItem::new(ItemId(1), ItemType::Event, "Standup", start, start + Duration::minutes(15)).unwrap();
    /// assert_eq!(item.duration(), Duration::minutes(15));
    /// ```
    pub fn new(
        id: ItemId,
        item_type: ItemType,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, ItemError> {
        let item = Self {
            id,
            item_type,
            title: title.into(),
            start,
            end,
            completed: false,
            description: None,
            participants: Vec::new(),
            location: None,
            recurrence_pattern: None,
        };
        item.validate()?;
        Ok(item)
    }

    /// Create a builder for constructing items with optional fields
    pub fn builder() -> ItemBuilder {
        ItemBuilder::new()
    }

    pub fn validate(&self) -> Result<(), ItemError> {
        if self.title.trim().is_empty() {
            return Err(ItemError::EmptyTitle);
        }

        if self.end < self.start {
            return Err(ItemError::EndBeforeStart);
        }

        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// The calendar day the item is drawn on.
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn is_milestone(&self) -> bool {
        self.item_type == ItemType::Milestone
    }

    /// Time range used for overlap tests. Zero-length items occupy one slot
    /// so they still collide with their neighbours.
    pub fn occupied_range(&self) -> (NaiveDateTime, NaiveDateTime) {
        if self.end > self.start {
            (self.start, self.end)
        } else {
            (self.start, self.start + Duration::minutes(SLOT_MINUTES as i64))
        }
    }

    /// Copy with a new id and " (Copy)" appended to the title.
    pub fn duplicate(&self, id: ItemId) -> Self {
        Self {
            id,
            title: format!("{} (Copy)", self.title),
            ..self.clone()
        }
    }

    /// Merge the set fields of `patch` into this item. Does not validate.
    pub fn apply(&mut self, patch: ItemPatch) {
        let ItemPatch {
            item_type,
            title,
            start,
            end,
            completed,
            description,
            participants,
            location,
            recurrence_pattern,
        } = patch;

        if let Some(item_type) = item_type {
            self.item_type = item_type;
        }
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(start) = start {
            self.start = start;
        }
        if let Some(end) = end {
            self.end = end;
        }
        if let Some(completed) = completed {
            self.completed = completed;
        }
        if let Some(description) = description {
            self.description = Some(description);
        }
        if let Some(participants) = participants {
            self.participants = participants;
        }
        if let Some(location) = location {
            self.location = Some(location);
        }
        if let Some(recurrence_pattern) = recurrence_pattern {
            self.recurrence_pattern = Some(recurrence_pattern);
        }
    }
}

/// Partial update for `ItemStore::update`; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub item_type: Option<ItemType>,
    pub title: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub completed: Option<bool>,
    pub description: Option<String>,
    pub participants: Option<Vec<String>>,
    pub location: Option<String>,
    pub recurrence_pattern: Option<String>,
}

impl ItemPatch {
    /// Patch that moves an item to a new time range.
    pub fn reschedule(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}

/// Builder for creating items with optional fields
pub struct ItemBuilder {
    id: Option<ItemId>,
    item_type: ItemType,
    title: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    description: Option<String>,
    participants: Vec<String>,
    location: Option<String>,
    recurrence_pattern: Option<String>,
}

impl ItemBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            item_type: ItemType::Event,
            title: None,
            start: None,
            end: None,
            description: None,
            participants: Vec::new(),
            location: None,
            recurrence_pattern: None,
        }
    }

    pub fn id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = item_type;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn participant(mut self, participant: impl Into<String>) -> Self {
        self.participants.push(participant.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn recurrence_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.recurrence_pattern = Some(pattern.into());
        self
    }

    /// Build the item. A missing title or end falls back to the item type's
    /// defaults.
    pub fn build(self) -> Result<CalendarItem, ItemError> {
        let id = self.id.ok_or(ItemError::MissingField("Item id"))?;
        let start = self.start.ok_or(ItemError::MissingField("Item start time"))?;
        let end = self
            .end
            .unwrap_or_else(|| start + self.item_type.default_duration());
        let title = self
            .title
            .unwrap_or_else(|| self.item_type.default_title().to_string());

        let item = CalendarItem {
            id,
            item_type: self.item_type,
            title,
            start,
            end,
            completed: false,
            description: self.description,
            participants: self.participants,
            location: self.location,
            recurrence_pattern: self.recurrence_pattern,
        };

        item.validate()?;
        Ok(item)
    }
}

impl Default for ItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}
