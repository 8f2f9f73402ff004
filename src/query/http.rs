use std::time::Duration;

use reqwest::{Client, Url};
use tokio::time::timeout;

use crate::config::RemoteConfig;
use crate::query::error::TransportError;
use crate::query::request::QueryRequest;
use crate::query::source::RemoteSource;
use crate::view::RemotePage;

/// Longest slice of an error body kept in a `Status` error.
const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Clone)]
pub struct RemoteOptions {
    pub endpoint: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl From<&RemoteConfig> for RemoteOptions {
    fn from(config: &RemoteConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            request_timeout: Duration::from_secs(u64::from(config.timeout_seconds)),
            connect_timeout: Duration::from_secs(u64::from(config.connect_timeout_seconds)),
        }
    }
}

/// `GET <endpoint>?limit=&skip=&sort=&<column>=…` over reqwest.
pub struct HttpSource {
    client: Client,
    endpoint: Url,
    request_timeout: Duration,
}

impl HttpSource {
    pub fn new(options: RemoteOptions) -> Result<Self, TransportError> {
        let endpoint = Url::parse(&options.endpoint).map_err(|e| TransportError::Connection {
            endpoint: options.endpoint.clone(),
            message: format!("invalid endpoint URL: {}", e),
        })?;

        let client = Client::builder()
            .connect_timeout(options.connect_timeout)
            .build()
            .map_err(|e| TransportError::Connection {
                endpoint: options.endpoint.clone(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint,
            request_timeout: options.request_timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full URL that `request` is sent to.
    pub fn url_for(&self, request: &QueryRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(request.query_pairs());
        url
    }

    async fn do_fetch(&self, url: Url) -> Result<RemotePage, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.connection_error(e))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: text.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| TransportError::Decode {
            message: e.to_string(),
        })
    }

    fn connection_error(&self, err: reqwest::Error) -> TransportError {
        TransportError::Connection {
            endpoint: self.endpoint.to_string(),
            message: err.to_string(),
        }
    }
}

impl RemoteSource for HttpSource {
    async fn fetch(&self, request: QueryRequest) -> Result<RemotePage, TransportError> {
        let url = self.url_for(&request);
        tracing::debug!(url = %url, "Fetching page");

        match timeout(self.request_timeout, self.do_fetch(url)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout {
                duration: self.request_timeout,
            }),
        }
    }
}
