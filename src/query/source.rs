//! The remote collection as seen by the query controller.

use std::future::Future;

use crate::query::error::TransportError;
use crate::query::request::QueryRequest;
use crate::view::RemotePage;

/// Something that can answer a [`QueryRequest`] with one page of users.
///
/// Implementations must not retry on their own; retry is a caller decision.
pub trait RemoteSource: Send + Sync + 'static {
    fn fetch(
        &self,
        request: QueryRequest,
    ) -> impl Future<Output = Result<RemotePage, TransportError>> + Send;
}
