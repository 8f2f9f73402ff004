//! The view service: one task owning [`ViewState`] and [`QueryController`],
//! driven through a [`ViewHandle`].
//!
//! [`ViewState`]: crate::view::ViewState
//! [`QueryController`]: crate::query::QueryController

mod client;
mod server;
mod types;

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::query::RemoteSource;
use crate::view::{ViewSchema, ViewState};

pub use client::ViewHandle;
pub use server::ViewServer;
pub use types::{ServiceOptions, ViewSnapshot};

const COMMAND_BUFFER: usize = 64;

pub struct ViewLayer;

impl ViewLayer {
    /// Wires a handle to a server. Nothing runs until [`ViewServer::run`] is
    /// spawned; the initial load is issued from there.
    pub fn new<S: RemoteSource>(
        schema: Arc<ViewSchema>,
        source: S,
        options: ServiceOptions,
    ) -> (ViewHandle, ViewServer<S>) {
        let (sender, receiver) = mpsc::channel(COMMAND_BUFFER);
        let state = ViewState::new(Arc::clone(&schema));
        let (publisher, snapshots) = watch::channel(ViewSnapshot {
            params: state.snapshot(),
            result: Default::default(),
        });

        let handle = ViewHandle::new(sender, snapshots, schema);
        let server = ViewServer::new(receiver, state, source, options, publisher);
        (handle, server)
    }
}
