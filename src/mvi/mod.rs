//! Model-View-Intent (MVI) primitives.
//!
//! Every piece of mutable view intent in this crate (the table's query
//! parameters, the filter editor) changes only through a reducer.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: Immutable value replaced wholesale on every change
//! - **Intent**: User actions (page turn, sort click, filter keystroke)
//! - **Reducer**: Pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
