//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use dataview::query::{QueryRequest, RemoteSource, TransportError};
use dataview::view::{RemoteAddress, RemoteCompany, RemotePage, RemoteUser};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::oneshot;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn remote_user(id: u64) -> RemoteUser {
    RemoteUser {
        id,
        first_name: format!("First{}", id),
        last_name: format!("Last{}", id),
        age: 20 + (id % 40) as u32,
        gender: if id % 2 == 0 { "female" } else { "male" }.to_string(),
        email: format!("user{}@example.com", id),
        address: RemoteAddress {
            city: "Springfield".to_string(),
            state: "Oregon".to_string(),
        },
        company: RemoteCompany {
            name: "Acme".to_string(),
        },
    }
}

/// A page holding users with `ids`, out of `total`.
pub fn page(ids: &[u64], total: u64) -> RemotePage {
    RemotePage {
        users: ids.iter().copied().map(remote_user).collect(),
        total,
    }
}

/// JSON body of a collection response, as the remote service sends it.
pub fn users_body(ids: &[u64], total: u64) -> String {
    let users: Vec<serde_json::Value> = ids
        .iter()
        .map(|&id| {
            let user = remote_user(id);
            serde_json::json!({
                "id": user.id,
                "firstName": user.first_name,
                "lastName": user.last_name,
                "maidenName": "",
                "age": user.age,
                "gender": user.gender,
                "email": user.email,
                "phone": "+1 555 0100",
                "address": {
                    "address": "1 Main St",
                    "city": user.address.city,
                    "state": user.address.state,
                    "country": "United States"
                },
                "company": { "name": user.company.name, "title": "Engineer" }
            })
        })
        .collect();
    serde_json::json!({
        "users": users,
        "total": total,
        "skip": 0,
        "limit": ids.len()
    })
    .to_string()
}

/// One fetch parked in a [`ScriptedSource`], waiting for the test to answer.
pub struct PendingFetch {
    pub request: QueryRequest,
    respond: oneshot::Sender<Result<RemotePage, TransportError>>,
}

impl PendingFetch {
    /// Completes the fetch. Returns false if its task was already aborted.
    pub fn respond(self, outcome: Result<RemotePage, TransportError>) -> bool {
        self.respond.send(outcome).is_ok()
    }

    /// True once the fetch task has been dropped.
    pub fn is_abandoned(&self) -> bool {
        self.respond.is_closed()
    }
}

/// Remote source whose answers are scripted by the test, in any order.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    pending: Arc<Mutex<VecDeque<PendingFetch>>>,
    requests: Arc<Mutex<Vec<QueryRequest>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request that reached the source, in arrival order.
    pub fn requests(&self) -> Vec<QueryRequest> {
        self.requests.lock().clone()
    }

    /// Waits for the next parked fetch.
    pub async fn next_fetch(&self) -> PendingFetch {
        let wait = async {
            loop {
                if let Some(fetch) = self.pending.lock().pop_front() {
                    return fetch;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        };
        tokio::time::timeout(Duration::from_secs(2), wait)
            .await
            .expect("no fetch reached the source")
    }

    /// Number of fetches parked and not yet taken.
    pub fn parked(&self) -> usize {
        self.pending.lock().len()
    }
}

impl RemoteSource for ScriptedSource {
    async fn fetch(&self, request: QueryRequest) -> Result<RemotePage, TransportError> {
        let (respond, answer) = oneshot::channel();
        self.requests.lock().push(request.clone());
        self.pending.lock().push_back(PendingFetch { request, respond });
        match answer.await {
            Ok(outcome) => outcome,
            Err(_) => std::future::pending().await,
        }
    }
}
