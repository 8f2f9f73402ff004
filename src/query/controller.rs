//! Reconciles versioned parameter sets with remote answers.
//!
//! Every new parameter version begins exactly one query and moves the view
//! to `Loading`. An answer is applied only if it belongs to the latest
//! issued version; anything older is stale and dropped without a trace in
//! the result. Network completion order is never trusted.

use crate::query::error::TransportError;
use crate::query::request::QueryRequest;
use crate::view::{ParamsSnapshot, RemotePage, Version, ViewResult, ViewStatus};

/// A query to run, tagged with the version that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub version: Version,
    pub request: QueryRequest,
}

/// What `complete` did with an answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Rows and total replaced; status is `Ready`.
    Applied,
    /// Applied, but the requested offset lies past the new total. Status
    /// stays `Loading`; the caller must go back to the first page.
    OutOfRange { total_count: u64 },
    /// Current query failed; prior rows and total are kept.
    Failed(TransportError),
    /// A newer version was issued (or this one already settled).
    Stale { latest: Version },
}

#[derive(Debug, Clone, Copy)]
struct Issued {
    version: Version,
    offset: usize,
    settled: bool,
}

/// Sole writer of [`ViewResult`].
#[derive(Debug, Default)]
pub struct QueryController {
    latest: Option<Issued>,
    result: ViewResult,
}

impl QueryController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(&self) -> &ViewResult {
        &self.result
    }

    /// Version of the most recently issued query.
    pub fn latest_version(&self) -> Option<Version> {
        self.latest.map(|issued| issued.version)
    }

    /// Starts the query for `snapshot`, superseding any outstanding one.
    ///
    /// Status turns `Loading` immediately; rows and total stay until an
    /// answer for this version is applied.
    pub fn begin(&mut self, snapshot: &ParamsSnapshot) -> Ticket {
        debug_assert!(
            self.latest_version().map_or(true, |v| snapshot.version > v),
            "parameter versions must increase"
        );

        self.latest = Some(Issued {
            version: snapshot.version,
            offset: snapshot.params.offset,
            settled: false,
        });
        self.result.status = ViewStatus::Loading;

        Ticket {
            version: snapshot.version,
            request: QueryRequest::from_params(&snapshot.params),
        }
    }

    /// Hands the answer for `version` to the controller.
    pub fn complete(
        &mut self,
        version: Version,
        outcome: Result<RemotePage, TransportError>,
    ) -> Completion {
        let issued = match self.latest.as_mut() {
            Some(issued) if issued.version == version && !issued.settled => issued,
            other => {
                return Completion::Stale {
                    latest: other.map(|i| i.version).unwrap_or_default(),
                }
            }
        };
        issued.settled = true;
        let offset = issued.offset;

        match outcome {
            Ok(page) => {
                let (rows, total_count) = page.into_records();
                self.result.rows = rows;
                self.result.total_count = total_count;
                self.result.error = None;

                if offset > 0 && offset as u64 >= total_count {
                    Completion::OutOfRange { total_count }
                } else {
                    self.result.status = ViewStatus::Ready;
                    Completion::Applied
                }
            }
            Err(err) => {
                self.result.status = ViewStatus::Error;
                self.result.error = Some(err.clone());
                Completion::Failed(err)
            }
        }
    }
}
