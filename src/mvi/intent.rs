//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent user actions such as a paginator click, a column sort
/// toggle or a keystroke in a column filter. They are processed by reducers
/// to produce new states.
pub trait Intent: Send + 'static {}
