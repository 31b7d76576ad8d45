use serde_json::json;
use tracing::{debug, info, warn};

use crate::api::client::{ApiError, CompletionClient};
use crate::api::transport::HttpRequest;
use crate::api::ModelsResponse;

/// Result of the unauthenticated startup probe of `GET {base}/models`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// 200, or 401 which still proves the server is listening.
    Reachable { status: u16 },
    Unexpected { status: u16, body: String },
    Unreachable(String),
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable { .. })
    }
}

impl CompletionClient {
    pub async fn fetch_models(&self) -> Result<ModelsResponse, ApiError> {
        let url = self.server.endpoint("models");
        let request = self.server.authorized(HttpRequest::get(url));
        let response = self.server.send(request).await?;

        if !response.is_ok() {
            return Err(ApiError::from_status(&response));
        }

        response
            .json::<ModelsResponse>()
            .map_err(|err| ApiError::Malformed(format!("model list: {err}")))
    }

    /// Ask the server to load `model`. Only a 200 counts as success.
    pub async fn load_model(&self, model: &str) -> Result<(), ApiError> {
        let body = json!({ "model": model });
        let url = self.server.endpoint("models");
        let request = self.server.authorized(HttpRequest::post(url, body));
        let response = self.server.send(request).await?;

        if response.is_ok() {
            debug!(model, "Model load accepted");
            Ok(())
        } else {
            Err(ApiError::from_status(&response))
        }
    }

    /// Connectivity diagnostics only; the caller proceeds whatever the outcome.
    pub async fn probe(&self) -> ProbeOutcome {
        let url = self.server.endpoint("models");
        info!(url = %url, "Testing API endpoint");
        let outcome = match self.server.send(HttpRequest::get(url)).await {
            Ok(response) if matches!(response.status, 200 | 401) => ProbeOutcome::Reachable {
                status: response.status,
            },
            Ok(response) => ProbeOutcome::Unexpected {
                status: response.status,
                body: response.text(),
            },
            Err(err) => ProbeOutcome::Unreachable(err.to_string()),
        };

        match &outcome {
            ProbeOutcome::Reachable { status } => info!(status, "API connectivity confirmed"),
            ProbeOutcome::Unexpected { status, body } => {
                warn!(status, body = %body, "API test returned an unexpected status")
            }
            ProbeOutcome::Unreachable(err) => warn!(error = %err, "API test failed"),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::{client_for, ScriptedTransport};
    use reqwest::Method;

    #[tokio::test]
    async fn fetch_models_sends_bearer_and_parses_ids() {
        let transport = ScriptedTransport::new();
        transport.push_json(
            200,
            r#"{"data":[{"id":"phi-4"},{"id":"mistral-7b","owned_by":"me"}]}"#,
        );
        let client = client_for(&transport, "http://h/v1/", Some("k123"));

        let models = client.fetch_models().await.unwrap();
        let ids: Vec<&str> = models.data.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["phi-4", "mistral-7b"]);

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::GET);
        assert_eq!(sent[0].url, "http://h/v1/models");
        assert_eq!(sent[0].header_value("Authorization"), Some("Bearer k123"));
    }

    #[tokio::test]
    async fn fetch_models_reports_status_and_parse_failures() {
        let transport = ScriptedTransport::new();
        transport.push_json(503, "busy");
        transport.push_json(200, r#"{"models":[]}"#);
        let client = client_for(&transport, "http://h", None);

        match client.fetch_models().await {
            Err(ApiError::Status { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "busy");
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(matches!(
            client.fetch_models().await,
            Err(ApiError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn load_model_posts_name_and_surfaces_body_on_failure() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, "{}");
        transport.push_json(404, "no such model");
        let client = client_for(&transport, "http://h", Some("k123"));

        client.load_model("mistral-7b").await.unwrap();
        let err = client.load_model("ghost").await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 404: no such model");

        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::POST);
        assert_eq!(sent[0].url, "http://h/models");
        assert_eq!(
            sent[0].json_body,
            Some(serde_json::json!({"model": "mistral-7b"}))
        );
    }

    #[tokio::test]
    async fn probe_treats_unauthorized_as_reachable_and_sends_no_auth() {
        let transport = ScriptedTransport::new();
        transport.push_json(401, "unauthorized");
        transport.push_json(500, "boom");
        let client = client_for(&transport, "http://h", Some("k123"));

        assert_eq!(client.probe().await, ProbeOutcome::Reachable { status: 401 });
        assert!(!client.probe().await.is_reachable());
        assert!(transport.requests()[0].header_value("Authorization").is_none());
    }

    #[tokio::test]
    async fn probe_reports_transport_failure() {
        let transport = ScriptedTransport::new();
        transport.push_transport_error("connection refused");
        let client = client_for(&transport, "http://h", None);

        match client.probe().await {
            ProbeOutcome::Unreachable(message) => {
                assert!(message.contains("connection refused"))
            }
            other => panic!("expected unreachable, got {other:?}"),
        }
    }
}
