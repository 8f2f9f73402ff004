use std::time::Duration;

use tokio::sync::oneshot;

use crate::config::ViewConfig;
use crate::view::{ParamsSnapshot, ValidationError, ViewIntent, ViewResult};

/// Everything a renderer needs: the current parameters and what the latest
/// applied query produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewSnapshot {
    pub params: ParamsSnapshot,
    pub result: ViewResult,
}

impl ViewSnapshot {
    /// Number of pages for the current total, at least one.
    pub fn page_count(&self) -> usize {
        let page_size = self.params.params.page_size.max(1) as u64;
        self.result.total_count.div_ceil(page_size).max(1) as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Filter intents wait this long before fetching; a newer version
    /// cancels the wait.
    pub filter_debounce: Duration,
    /// Abort the previous fetch task when a new version is issued.
    pub abort_superseded: bool,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            filter_debounce: Duration::ZERO,
            abort_superseded: true,
        }
    }
}

impl From<&ViewConfig> for ServiceOptions {
    fn from(config: &ViewConfig) -> Self {
        Self {
            filter_debounce: Duration::from_millis(config.filter_debounce_ms),
            abort_superseded: config.abort_superseded,
        }
    }
}

pub enum ViewCommand {
    /// Apply an intent and report the new parameters or the rejection.
    Apply {
        intent: ViewIntent,
        respond_to: oneshot::Sender<Result<ParamsSnapshot, ValidationError>>,
    },
    /// Apply an intent without waiting for the outcome.
    Dispatch { intent: ViewIntent },
}
