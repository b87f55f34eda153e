// Pointer interaction for the weekly grid.
// The render layer forwards pointer positions and modifiers; these sessions
// turn them into item mutations.

pub mod drag;
pub mod geometry;
pub mod resize;

pub use drag::{DragSession, DragSource, DragState, DraggedItem, DropOutcome};
pub use geometry::{GridCell, GridGeometry, GridLayout, GridMetrics, StaticGeometry};
pub use resize::{HandleRects, ResizeHandle, ResizeSession};
