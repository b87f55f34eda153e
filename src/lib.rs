// Meeting Scheduler Library
// Time-grid model behind the weekly meeting editor: slots, overlap layout,
// drag and drop, resizing and the autocomplete history

pub mod models;
pub mod services;
pub mod ui_egui; // Interaction sessions speaking egui geometry
pub mod utils;
