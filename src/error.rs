//! Errors seen by callers of the view service.

use std::time::Duration;

use thiserror::Error;

use crate::query::TransportError;
use crate::view::ValidationError;

#[derive(Debug, Error)]
pub enum DataViewError {
    /// Intent outside the table's contract; nothing was changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The current query failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("View service disconnected")]
    Disconnected,

    /// Command queue full; the intent was dropped.
    #[error("View service busy")]
    Busy,

    #[error("View service did not answer within {0:?}")]
    Timeout(Duration),
}
