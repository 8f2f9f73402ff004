use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot, watch};

use crate::error::DataViewError;
use crate::view::{
    MatchMode, ParamsSnapshot, SortDirection, ValidationError, ViewIntent, ViewSchema, ViewStatus,
};

use super::types::{ViewCommand, ViewSnapshot};

const SERVICE_TIMEOUT: Duration = Duration::from_secs(1);

/// Cheap, cloneable handle to a running [`ViewServer`](super::ViewServer).
#[derive(Clone)]
pub struct ViewHandle {
    sender: mpsc::Sender<ViewCommand>,
    snapshots: watch::Receiver<ViewSnapshot>,
    schema: Arc<ViewSchema>,
}

impl ViewHandle {
    pub(crate) fn new(
        sender: mpsc::Sender<ViewCommand>,
        snapshots: watch::Receiver<ViewSnapshot>,
        schema: Arc<ViewSchema>,
    ) -> Self {
        Self {
            sender,
            snapshots,
            schema,
        }
    }

    pub fn schema(&self) -> &Arc<ViewSchema> {
        &self.schema
    }

    /// Applies `intent` and returns the parameters it produced.
    ///
    /// The fetch for those parameters is already under way when this returns.
    pub async fn apply(&self, intent: ViewIntent) -> Result<ParamsSnapshot, DataViewError> {
        let (respond_to, receiver) = oneshot::channel();
        self.sender
            .send(ViewCommand::Apply { intent, respond_to })
            .await
            .map_err(|_| DataViewError::Disconnected)?;

        let result: Result<ParamsSnapshot, ValidationError> = recv_with_timeout(receiver).await?;
        Ok(result?)
    }

    pub async fn set_page(
        &self,
        offset: usize,
        page_size: usize,
    ) -> Result<ParamsSnapshot, DataViewError> {
        self.apply(ViewIntent::SetPage { offset, page_size }).await
    }

    pub async fn set_sort(
        &self,
        field: &str,
        direction: SortDirection,
    ) -> Result<ParamsSnapshot, DataViewError> {
        self.apply(ViewIntent::SetSort {
            field: field.to_string(),
            direction,
        })
        .await
    }

    pub async fn set_filter(
        &self,
        column: &str,
        value: Option<&str>,
        match_mode: MatchMode,
    ) -> Result<ParamsSnapshot, DataViewError> {
        self.apply(ViewIntent::SetFilter {
            column: column.to_string(),
            value: value.map(str::to_string),
            match_mode,
        })
        .await
    }

    pub async fn refresh(&self) -> Result<ParamsSnapshot, DataViewError> {
        self.apply(ViewIntent::Refresh).await
    }

    /// Queues `intent` without waiting. For callers outside the runtime.
    ///
    /// Rejections are only logged by the service.
    pub fn dispatch(&self, intent: ViewIntent) -> Result<(), DataViewError> {
        self.sender
            .try_send(ViewCommand::Dispatch { intent })
            .map_err(|err| match err {
                TrySendError::Full(_) => DataViewError::Busy,
                TrySendError::Closed(_) => DataViewError::Disconnected,
            })
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> ViewSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A fresh receiver that sees every snapshot published from now on.
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.snapshots.clone()
    }

    /// Waits until the current query settles as `Ready` or `Error`.
    pub async fn wait_settled(&self) -> Result<ViewSnapshot, DataViewError> {
        let mut receiver = self.subscribe();
        let snapshot = receiver
            .wait_for(|s| matches!(s.result.status, ViewStatus::Ready | ViewStatus::Error))
            .await
            .map_err(|_| DataViewError::Disconnected)?
            .clone();

        match &snapshot.result.error {
            Some(err) if snapshot.result.status == ViewStatus::Error => {
                Err(DataViewError::Transport(err.clone()))
            }
            _ => Ok(snapshot),
        }
    }
}

async fn recv_with_timeout<T>(receiver: oneshot::Receiver<T>) -> Result<T, DataViewError> {
    match tokio::time::timeout(SERVICE_TIMEOUT, receiver).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(_)) => Err(DataViewError::Disconnected),
        Err(_) => Err(DataViewError::Timeout(SERVICE_TIMEOUT)),
    }
}
