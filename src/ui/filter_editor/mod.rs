//! Inline editor for free-text column filters.
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Closed, or editing one column's text
//! - `intent.rs` - Key-level edits (Open, Insert, Backspace, Clear, Close)
//! - `reducer.rs` - State transitions (pure, no side effects)
//!
//! Every edit that changes the text is forwarded to the view service by the
//! caller; the editor itself never talks to the network.

mod intent;
mod reducer;
mod state;

pub use intent::FilterEditorIntent;
pub use reducer::FilterEditorReducer;
pub use state::FilterEditorState;
