// Grid Geometry
//
// Maps between screen positions and (day, slot) cells of the weekly grid.
// The render layer owns the actual layout and exposes it through
// `GridGeometry`; drag and resize sessions query it when the pointer moves.

use egui::{pos2, vec2, Pos2, Rect};

use crate::models::settings::GridSettings;
use crate::services::layout::PositionedItem;
use crate::utils::date::DAYS_PER_WEEK;
use crate::utils::time::{clamp_slot, offset_to_slot, slot_to_offset, Slot, SLOTS_PER_DAY};

/// Fixed sizes of the grid chrome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMetrics {
    /// Width of the hour labels on the left.
    pub time_column_width: f32,
    /// Height of the day headers above the first slot.
    pub header_height: f32,
    pub slot_height: f32,
}

impl GridMetrics {
    pub fn from_settings(settings: &GridSettings) -> Self {
        Self {
            time_column_width: settings.time_column_width,
            header_height: settings.header_height,
            slot_height: settings.slot_height,
        }
    }
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self::from_settings(&GridSettings::default())
    }
}

/// Source of the grid's on-screen bounds, read at drag time.
#[cfg_attr(test, mockall::automock)]
pub trait GridGeometry {
    /// Bounding box of the whole grid (time column and headers included),
    /// or `None` while it is not laid out.
    fn grid_rect(&self) -> Option<Rect>;

    fn metrics(&self) -> GridMetrics;
}

/// Geometry with a fixed rectangle, for hosts that lay the grid out once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticGeometry {
    pub rect: Rect,
    pub metrics: GridMetrics,
}

impl StaticGeometry {
    pub fn new(rect: Rect, metrics: GridMetrics) -> Self {
        Self { rect, metrics }
    }
}

impl GridGeometry for StaticGeometry {
    fn grid_rect(&self) -> Option<Rect> {
        Some(self.rect)
    }

    fn metrics(&self) -> GridMetrics {
        self.metrics
    }
}

/// A day column and slot under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    /// 0-based column from the first day of the displayed week.
    pub day: usize,
    pub slot: Slot,
}

/// Snapshot of the grid geometry taken for one pointer event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    rect: Rect,
    metrics: GridMetrics,
}

impl GridLayout {
    pub fn new(rect: Rect, metrics: GridMetrics) -> Self {
        Self { rect, metrics }
    }

    pub fn capture<G: GridGeometry + ?Sized>(geometry: &G) -> Option<Self> {
        geometry
            .grid_rect()
            .map(|rect| Self::new(rect, geometry.metrics()))
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn metrics(&self) -> GridMetrics {
        self.metrics
    }

    pub fn day_column_width(&self) -> f32 {
        ((self.rect.width() - self.metrics.time_column_width) / DAYS_PER_WEEK as f32).max(0.0)
    }

    /// Cell under `pointer`.
    ///
    /// Outside the grid, over the time column, or with no room for day
    /// columns there is no cell. Vertically the slot is clamped, so the
    /// header maps to the first slot and anything past the last row to the
    /// last slot.
    pub fn hit_test(&self, pointer: Pos2) -> Option<GridCell> {
        if !self.rect.contains(pointer) {
            return None;
        }

        let column_width = self.day_column_width();
        if column_width <= 0.0 {
            return None;
        }

        let x = pointer.x - self.rect.left() - self.metrics.time_column_width;
        if x < 0.0 {
            return None;
        }

        let day = (x / column_width).floor() as usize;
        if day >= DAYS_PER_WEEK {
            return None;
        }

        let y = pointer.y - self.rect.top() - self.metrics.header_height;
        let slot = clamp_slot(offset_to_slot(y, self.metrics.slot_height));

        Some(GridCell { day, slot })
    }

    /// Area of a day column below the header.
    pub fn day_rect(&self, day: usize) -> Option<Rect> {
        if day >= DAYS_PER_WEEK {
            return None;
        }

        let column_width = self.day_column_width();
        let left = self.rect.left() + self.metrics.time_column_width + day as f32 * column_width;
        let top = self.rect.top() + self.metrics.header_height;
        Some(Rect::from_min_size(
            pos2(left, top),
            vec2(column_width, slot_to_offset(SLOTS_PER_DAY, self.metrics.slot_height)),
        ))
    }

    /// Where a positioned item is drawn inside its day column.
    pub fn item_rect(&self, day: usize, positioned: &PositionedItem<'_>) -> Option<Rect> {
        let day_rect = self.day_rect(day)?;
        let columns = positioned.total_columns.max(1) as f32;
        let width = day_rect.width() / columns;
        let slot_height = self.metrics.slot_height;

        Some(Rect::from_min_size(
            pos2(
                day_rect.left() + positioned.column as f32 * width,
                day_rect.top() + slot_to_offset(positioned.start_slot, slot_height),
            ),
            vec2(
                width,
                slot_to_offset(positioned.end_slot.saturating_sub(positioned.start_slot), slot_height),
            ),
        ))
    }
}
