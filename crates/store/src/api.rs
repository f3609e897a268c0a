//! Remote API client.
//!
//! [`Transport`] is the seam between the stores and HTTP: the stores only know paths and JSON
//! bodies. [`ApiClient`] is the reqwest implementation used by the application.

use std::{future::Future, time::Duration};

use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Failure of a single request, as kept in a store's `error` slot.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, timeout...).
    #[error("server unreachable: {0}")]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("{status}: {message}")]
    Rejected { status: u16, message: String },
    /// A 2xx response whose body does not have the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Builds a rejection from a status and a raw response body.
    ///
    /// The message is taken from an `error` or `message` string field when the body is a JSON
    /// object, from the string itself when the body is a JSON string, and from the raw text
    /// otherwise.
    pub fn rejected(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::Object(map)) => ["error", "message"]
                .iter()
                .find_map(|key| map.get(*key).and_then(|v| v.as_str()).map(str::to_string))
                .unwrap_or_else(|| body.trim().to_string()),
            Ok(serde_json::Value::String(text)) => text,
            _ => body.trim().to_string(),
        };
        let message = if message.is_empty() {
            "unknown error".to_string()
        } else {
            message
        };
        Self::Rejected { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Error raised while building an [`ApiClient`].
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("invalid base_url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// JSON-over-HTTP operations the stores need.
///
/// `path` is relative to the API root (`bills`, `bills/42`, `installments/card/7`).
pub trait Transport: Clone + Send + Sync + 'static {
    fn get<T>(&self, path: &str) -> impl Future<Output = Result<T, ApiError>> + Send
    where
        T: DeserializeOwned + Send;

    fn post<B, T>(&self, path: &str, body: &B) -> impl Future<Output = Result<T, ApiError>> + Send
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;

    fn put<B, T>(&self, path: &str, body: &B) -> impl Future<Output = Result<T, ApiError>> + Send
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;

    fn delete(&self, path: &str) -> impl Future<Output = Result<(), ApiError>> + Send;
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client rooted at `base_url` (e.g. `http://127.0.0.1:5000/api`).
    ///
    /// Without a `timeout` requests wait as long as the transport allows.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientBuildError> {
        reqwest::Url::parse(base_url).map_err(|err| ClientBuildError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn read_json<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ApiError> {
        let res = Self::check_status(res).await?;
        let body = res.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn check_status(res: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().await.unwrap_or_default();
        tracing::debug!(%status, body = %body, "request rejected");
        Err(ApiError::rejected(status.as_u16(), &body))
    }
}

impl Transport for ApiClient {
    async fn get<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        let res = self.http.get(self.url(path)).send().await?;
        Self::read_json(res).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let res = self.http.post(self.url(path)).json(body).send().await?;
        Self::read_json(res).await
    }

    async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let res = self.http.put(self.url(path)).json(body).send().await?;
        Self::read_json(res).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let res = self.http.delete(self.url(path)).send().await?;
        Self::check_status(res).await.map(|_| ())
    }
}
