//! UI state machine and overlays drawn over the world

pub mod panels;
pub mod placement;
pub mod state;

pub use panels::{buildings_panel, inventory_panel, RowAnchor, RowLayout, UiFrame};
pub use placement::placement_overlay;
pub use state::{UiMode, UiState};
