use std::fmt;
use std::sync::Arc;

use crate::api::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::utils::url::construct_api_url;

/// Failure of a single remote call. None of these are fatal to the session.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// The request never produced a response.
    Transport(TransportError),
    /// The server answered with something other than 200.
    Status { status: u16, body: String },
    /// The server answered 200 but the body did not have the expected shape.
    Malformed(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(err) => write!(f, "network error: {err}"),
            ApiError::Status { status, body } => {
                if body.trim().is_empty() {
                    write!(f, "HTTP {status}")
                } else {
                    write!(f, "HTTP {status}: {}", body.trim())
                }
            }
            ApiError::Malformed(detail) => write!(f, "malformed response: {detail}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Transport(err)
    }
}

impl ApiError {
    pub(crate) fn from_status(response: &HttpResponse) -> Self {
        ApiError::Status {
            status: response.status,
            body: response.text(),
        }
    }
}

/// One HTTP server: base URL, optional bearer token and the transport.
///
/// Shared by the completion client and the speech pipeline, which talk to
/// different servers with the same request conventions.
#[derive(Clone)]
pub struct ServerClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    api_key: Option<String>,
}

impl ServerClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            api_key,
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        construct_api_url(&self.base_url, path)
    }

    pub(crate) fn authorized(&self, request: HttpRequest) -> HttpRequest {
        request.bearer_auth(self.api_key.as_deref())
    }

    pub(crate) async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        Ok(self.transport.send(request).await?)
    }
}

/// Client for an OpenAI-compatible inference server (LM Studio style).
///
/// Operations live in [`crate::api::models`] and [`crate::api::chat`].
#[derive(Clone)]
pub struct CompletionClient {
    pub(crate) server: ServerClient,
}

impl CompletionClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            server: ServerClient::new(transport, base_url, api_key),
        }
    }
}
