//! Edit history and per-frame UI focus state.
//!
//! `history` owns the undo/redo engine used by editable screens. `focus`
//! holds the pager and cursor descriptors that screens hand to the layout
//! pass and receive back, updated, for the next frame.

pub mod focus;
pub mod history;

pub use focus::{CursorState, Focus, PagerState, UiState};
pub use history::{
    ActionKind, Clock, DEBOUNCE_MS, Delta, EVENT_LIMIT, History, HistoryLimits, ManualClock,
    SystemClock, TextAction, TextEvent, apply_delta,
};
