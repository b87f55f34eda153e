// Tool template model
// Palette prototypes that become calendar items once dropped on the grid

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::item::{CalendarItem, ItemError, ItemId, ItemType};

/// Longest duration a template may carry.
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

/// A palette entry the user drags onto the grid to create an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolTemplate {
    pub item_type: ItemType,
    pub title: String,
    pub duration_minutes: i64,
    pub color: Option<String>,
}

impl ToolTemplate {
    /// Template with the item type's default title, duration and color.
    pub fn for_type(item_type: ItemType) -> Self {
        Self {
            item_type,
            title: item_type.default_title().to_string(),
            duration_minutes: item_type.default_duration().num_minutes(),
            color: Some(item_type.color().to_string()),
        }
    }

    /// The standard palette: event, task, milestone, highlight.
    pub fn palette() -> Vec<ToolTemplate> {
        ItemType::ALL.into_iter().map(Self::for_type).collect()
    }

    /// Duration of the created item, clamped to `0..=MAX_DURATION_MINUTES`.
    pub fn duration(&self) -> Duration {
        Duration::try_minutes(self.duration_minutes.clamp(0, MAX_DURATION_MINUTES))
            .unwrap_or_default()
    }

    /// Validate the template
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Template title cannot be empty".to_string());
        }

        if self.duration_minutes < 0 {
            return Err("Duration cannot be negative".to_string());
        }

        if self.duration_minutes == 0 && self.item_type != ItemType::Milestone {
            return Err("Only milestones may have zero duration".to_string());
        }

        if self.duration_minutes > MAX_DURATION_MINUTES {
            return Err("Duration cannot exceed 1 day".to_string());
        }

        if let Some(ref color) = self.color {
            if !color.starts_with('#') || (color.len() != 7 && color.len() != 4) {
                return Err("Color must be in hex format (#RRGGBB or #RGB)".to_string());
            }
        }

        Ok(())
    }

    /// Turn the template into a real item starting at `start`.
    pub fn instantiate(&self, id: ItemId, start: NaiveDateTime) -> Result<CalendarItem, ItemError> {
        CalendarItem::new(
            id,
            self.item_type,
            self.title.clone(),
            start,
            start + self.duration(),
        )
    }
}
