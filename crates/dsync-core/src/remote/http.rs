//! HTTP client for the design service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{DesignService, RemoteError};
use crate::artifact::ArtifactKind;

/// Request timeout used by [`HttpDesignService::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Path segment of the stylesheet resource.
const STYLESHEET_RESOURCE: &str = "css";

/// [`DesignService`] over HTTP.
///
/// Resources live at `<endpoint>/<resource>/<id>`.
#[derive(Debug, Clone)]
pub struct HttpDesignService {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct ClearRequest<'a> {
    checksum: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Value,
}

impl HttpDesignService {
    /// Client for `endpoint` with [`DEFAULT_TIMEOUT`].
    pub fn new(endpoint: impl Into<String>) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(transport)?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn url(&self, resource: &str, id: &str) -> String {
        format!("{}/{}/{}", self.endpoint.trim_end_matches('/'), resource, id)
    }
}

#[async_trait]
impl DesignService for HttpDesignService {
    async fn fetch(&self, kind: ArtifactKind, id: &str) -> Result<Value, RemoteError> {
        let url = self.url(kind.resource(), id);
        tracing::debug!(url = %url, "Fetching definitions");

        let response = self.client.get(&url).send().await.map_err(transport)?;
        let response = ensure_success(response).await?;
        response.json::<Value>().await.map_err(transport)
    }

    async fn clear(&self, kind: ArtifactKind, id: &str, checksum: &str) -> Result<(), RemoteError> {
        let url = self.url(kind.resource(), id);
        tracing::debug!(url = %url, checksum, "Clearing definitions");

        let response = self
            .client
            .delete(&url)
            .json(&ClearRequest { checksum })
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn fetch_stylesheet(&self, id: &str) -> Result<Option<String>, RemoteError> {
        let url = self.url(STYLESHEET_RESOURCE, id);
        tracing::debug!(url = %url, "Fetching stylesheet");

        let response = self.client.get(&url).send().await.map_err(transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(response).await?;
        response.text().await.map(Some).map_err(transport)
    }
}

async fn ensure_success(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_failure(status, &body))
}

/// Map a failed response to a [`RemoteError`].
///
/// A `400` whose body carries an `error` field is the service explaining the
/// problem, and that explanation is surfaced. Anything else is reported by
/// its status text.
pub fn classify_failure(status: StatusCode, body: &str) -> RemoteError {
    if status == StatusCode::BAD_REQUEST
        && let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(body)
    {
        let message = match &error {
            Value::String(message) => message.clone(),
            Value::Object(fields) => match fields.get("message") {
                Some(Value::String(message)) => message.clone(),
                _ => error.to_string(),
            },
            other => other.to_string(),
        };
        return RemoteError::Client { message };
    }

    RemoteError::Transport {
        status: status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_u16().to_string()),
    }
}

fn transport(err: reqwest::Error) -> RemoteError {
    RemoteError::Transport {
        status: err.to_string(),
    }
}
