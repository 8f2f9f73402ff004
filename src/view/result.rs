//! What the latest applied query produced.

use serde::Serialize;

use crate::query::TransportError;
use crate::view::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    /// No query issued yet.
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

impl ViewStatus {
    pub fn label(self) -> &'static str {
        match self {
            ViewStatus::Idle => "Idle",
            ViewStatus::Loading => "Loading…",
            ViewStatus::Ready => "Ready",
            ViewStatus::Error => "Error",
        }
    }
}

/// Rows, total and status. Written only by the query controller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewResult {
    pub rows: Vec<Record>,
    /// Total matching records on the server, not `rows.len()`.
    pub total_count: u64,
    pub status: ViewStatus,
    /// Failure of the latest current query; cleared by the next success.
    pub error: Option<TransportError>,
}

impl ViewResult {
    pub fn is_loading(&self) -> bool {
        self.status == ViewStatus::Loading
    }
}
