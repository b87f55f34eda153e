// Service module exports

pub mod collision;
pub mod history;
pub mod item;
pub mod layout;
