//! Where table views get their raw collections from.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::envelope::ShapeError;
use crate::http::Client;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("response was not valid JSON: {0}")]
    Parse(String),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("load was superseded")]
    Cancelled,
}

/// A remote collection reachable by endpoint path.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// One GET, no retries. Returns the decoded JSON body.
    async fn fetch(&self, endpoint: &str) -> Result<Value, LoadError>;
}

/// [`CollectionSource`] backed by the BrightPath HTTP API.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn shared(client: Client) -> Arc<dyn CollectionSource> {
        Arc::new(Self::new(client))
    }
}

#[async_trait]
impl CollectionSource for HttpSource {
    async fn fetch(&self, endpoint: &str) -> Result<Value, LoadError> {
        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.message))?;

        if !response.is_success() {
            return Err(LoadError::Status(response.status));
        }

        response
            .json::<Value>()
            .map_err(|e| LoadError::Parse(e.to_string()))
    }
}

/// Identifies one load attempt of one view.
///
/// Generations grow monotonically per view; only the newest ticket's result is
/// applied. Starting a newer load cancels this ticket's token so an in-flight
/// fetch can stop early.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    cancel: CancellationToken,
}

impl LoadTicket {
    pub(crate) fn new(generation: u64) -> Self {
        Self {
            generation,
            cancel: CancellationToken::new(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub(crate) fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Fetch `endpoint` unless this ticket gets cancelled first.
    pub async fn fetch(
        &self,
        source: &dyn CollectionSource,
        endpoint: &str,
    ) -> Result<Value, LoadError> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(LoadError::Cancelled),
            result = source.fetch(endpoint) => result,
        }
    }
}
