use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::query::{Completion, QueryController, RemoteSource, TransportError};
use crate::view::{ParamsSnapshot, RemotePage, ValidationError, Version, ViewIntent, ViewState};

use super::types::{ServiceOptions, ViewCommand, ViewSnapshot};

/// Answer of one fetch task, tagged with the version that started it.
struct FetchDone {
    version: Version,
    outcome: Result<RemotePage, TransportError>,
}

/// The one task that owns the view parameters and the view result.
///
/// Commands and fetch answers are handled strictly one at a time, so the
/// version check in [`QueryController`] never races with a parameter change.
pub struct ViewServer<S: RemoteSource> {
    receiver: mpsc::Receiver<ViewCommand>,
    state: ViewState,
    controller: QueryController,
    source: Arc<S>,
    options: ServiceOptions,
    publisher: watch::Sender<ViewSnapshot>,
    done_tx: mpsc::UnboundedSender<FetchDone>,
    done_rx: mpsc::UnboundedReceiver<FetchDone>,
    in_flight: Option<JoinHandle<()>>,
    /// Latest issued version, readable by debounced fetch tasks.
    latest: Arc<AtomicU64>,
}

impl<S: RemoteSource> ViewServer<S> {
    pub(crate) fn new(
        receiver: mpsc::Receiver<ViewCommand>,
        state: ViewState,
        source: S,
        options: ServiceOptions,
        publisher: watch::Sender<ViewSnapshot>,
    ) -> Self {
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        Self {
            receiver,
            state,
            controller: QueryController::new(),
            source: Arc::new(source),
            options,
            publisher,
            done_tx,
            done_rx,
            in_flight: None,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Issues the initial load, then serves until every handle is dropped.
    pub async fn run(mut self) {
        let initial = self.state.snapshot();
        self.issue(initial, Duration::ZERO);

        loop {
            tokio::select! {
                command = self.receiver.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(done) = self.done_rx.recv() => self.handle_done(done),
            }
        }

        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
        tracing::debug!("View service stopped");
    }

    fn handle_command(&mut self, command: ViewCommand) {
        match command {
            ViewCommand::Apply { intent, respond_to } => {
                let result = self.accept(intent);
                if respond_to.send(result).is_err() {
                    tracing::trace!("View: Apply response dropped (receiver gone)");
                }
            }
            ViewCommand::Dispatch { intent } => {
                let _ = self.accept(intent);
            }
        }
    }

    fn accept(&mut self, intent: ViewIntent) -> Result<ParamsSnapshot, ValidationError> {
        let delay = if intent.is_filter() {
            self.options.filter_debounce
        } else {
            Duration::ZERO
        };

        match self.state.apply(intent) {
            Ok(snapshot) => {
                self.issue(snapshot.clone(), delay);
                Ok(snapshot)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Rejected view intent");
                Err(err)
            }
        }
    }

    /// Begins the query for `snapshot` and spawns its fetch.
    fn issue(&mut self, snapshot: ParamsSnapshot, delay: Duration) {
        let ticket = self.controller.begin(&snapshot);
        self.publish();

        if let Some(previous) = self.in_flight.take() {
            if self.options.abort_superseded {
                previous.abort();
            }
        }

        tracing::info!(
            version = %ticket.version,
            limit = ticket.request.limit,
            skip = ticket.request.skip,
            sort = %ticket.request.sort,
            filters = ticket.request.filters.len(),
            "Issuing query"
        );

        let version = ticket.version;
        self.latest.store(version.get(), Ordering::SeqCst);
        let latest = Arc::clone(&self.latest);
        let source = Arc::clone(&self.source);
        let done_tx = self.done_tx.clone();

        self.in_flight = Some(tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
                if latest.load(Ordering::SeqCst) != version.get() {
                    return;
                }
            }
            let outcome = source.fetch(ticket.request).await;
            let _ = done_tx.send(FetchDone { version, outcome });
        }));
    }

    fn handle_done(&mut self, done: FetchDone) {
        let version = done.version;
        match self.controller.complete(version, done.outcome) {
            Completion::Applied => {
                let result = self.controller.result();
                tracing::debug!(
                    version = %version,
                    rows = result.rows.len(),
                    total = result.total_count,
                    "Applied query result"
                );
                self.publish();
            }
            Completion::OutOfRange { total_count } => {
                let page_size = self.state.params().page_size;
                tracing::info!(
                    version = %version,
                    offset = self.state.params().offset,
                    total = total_count,
                    "Offset past total, returning to first page"
                );
                match self.state.set_page(0, page_size) {
                    Ok(snapshot) => self.issue(snapshot, Duration::ZERO),
                    Err(err) => tracing::warn!(error = %err, "Could not reset page"),
                }
            }
            Completion::Failed(err) => {
                tracing::warn!(
                    version = %version,
                    error_type = err.error_type(),
                    error = %err,
                    "Query failed"
                );
                self.publish();
            }
            Completion::Stale { latest } => {
                tracing::debug!(version = %version, latest = %latest, "Discarding stale response");
            }
        }
    }

    fn publish(&self) {
        self.publisher.send_replace(ViewSnapshot {
            params: self.state.snapshot(),
            result: self.controller.result().clone(),
        });
    }
}
