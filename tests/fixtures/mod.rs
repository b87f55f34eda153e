// Test fixtures - reusable test data
// Provides a fixed week, grid geometry and item factories across test files
#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use egui::{pos2, vec2, Pos2, Rect};
use meeting_scheduler::models::item::{CalendarItem, ItemType};
use meeting_scheduler::services::item::ItemStore;
use meeting_scheduler::ui_egui::geometry::{GridMetrics, StaticGeometry};
use meeting_scheduler::utils::time::Slot;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Sunday, Jan 5, 2025 - first day of the fixture week
    pub fn week_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()
    }

    /// `day` days into the fixture week at the given time
    pub fn week_at(day: i64, hour: u32, minute: u32) -> NaiveDateTime {
        (week_start() + Duration::days(day))
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }
}

/// Grid laid out at the origin: 64px time column, 48px header, seven
/// 100px day columns, 7px slots.
pub mod grid {
    use super::*;

    pub const TIME_COLUMN: f32 = 64.0;
    pub const HEADER: f32 = 48.0;
    pub const DAY_WIDTH: f32 = 100.0;
    pub const SLOT_HEIGHT: f32 = 7.0;

    pub fn geometry() -> StaticGeometry {
        StaticGeometry::new(
            Rect::from_min_size(
                pos2(0.0, 0.0),
                vec2(TIME_COLUMN + 7.0 * DAY_WIDTH, HEADER + 288.0 * SLOT_HEIGHT),
            ),
            GridMetrics {
                time_column_width: TIME_COLUMN,
                header_height: HEADER,
                slot_height: SLOT_HEIGHT,
            },
        )
    }

    /// A point inside the given cell
    pub fn pointer(day: usize, slot: Slot) -> Pos2 {
        pos2(
            TIME_COLUMN + day as f32 * DAY_WIDTH + DAY_WIDTH / 2.0,
            HEADER + slot as f32 * SLOT_HEIGHT + SLOT_HEIGHT / 2.0,
        )
    }

    /// A point well outside the grid
    pub fn outside() -> Pos2 {
        pos2(-50.0, -50.0)
    }
}

/// Sample items for testing
pub mod items {
    use super::*;

    /// Adds a one-hour event and returns it
    pub fn add_meeting(store: &mut ItemStore, title: &str, start: NaiveDateTime) -> CalendarItem {
        add(store, ItemType::Event, title, start, start + Duration::hours(1))
    }

    pub fn add(
        store: &mut ItemStore,
        item_type: ItemType,
        title: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> CalendarItem {
        let item = CalendarItem::new(store.allocate_id().unwrap(), item_type, title, start, end).unwrap();
        store.add(item.clone()).unwrap();
        item
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
