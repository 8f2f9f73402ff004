//! Remote querying: request shape, transport, and the version-checked
//! controller that applies answers.

mod controller;
mod error;
mod http;
mod request;
mod source;

pub use controller::{Completion, QueryController, Ticket};
pub use error::TransportError;
pub use http::{HttpSource, RemoteOptions};
pub use request::QueryRequest;
pub use source::RemoteSource;
