//! HTTP request/response capability used by every remote call.
//!
//! The session never talks to `reqwest` directly; it builds an [`HttpRequest`]
//! and hands it to an [`HttpTransport`]. Production code uses
//! [`ReqwestTransport`], tests substitute a scripted fake.

use std::fmt;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A single outbound request. Built per call and dropped afterwards.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub json_body: Option<Value>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: Vec::new(),
            json_body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            json_body: Some(body),
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Attach `Authorization: Bearer <token>` when a non-blank token is configured.
    pub fn bearer_auth(self, token: Option<&str>) -> Self {
        match token.map(str::trim) {
            Some(token) if !token.is_empty() => {
                self.header("Authorization", format!("Bearer {token}"))
            }
            _ => self,
        }
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn content(&self) -> &[u8] {
        &self.body
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Connection-level failure: DNS, refused connection, TLS, broken body stream.
#[derive(Debug, Clone)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportError {}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `reqwest`-backed transport. TLS is negotiated automatically for `https` URLs.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            json_body,
        } = request;

        let mut builder = self.client.request(method, &url);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &json_body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| TransportError::new(format!("request to {url} failed: {err}")))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| {
                TransportError::new(format!("reading body from {url} failed: {err}"))
            })?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bearer_auth_skips_blank_tokens() {
        let request = HttpRequest::get("http://h/models").bearer_auth(Some("   "));
        assert!(request.header_value("Authorization").is_none());

        let request = HttpRequest::get("http://h/models").bearer_auth(None);
        assert!(request.header_value("Authorization").is_none());
    }

    #[test]
    fn bearer_auth_attaches_token() {
        let request = HttpRequest::get("http://h/models").bearer_auth(Some("k123"));
        assert_eq!(request.header_value("authorization"), Some("Bearer k123"));
    }

    #[test]
    fn post_sets_json_content_type() {
        let request = HttpRequest::post("http://h/models", json!({"model": "x"}));
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.header_value("Content-Type"), Some("application/json"));
        assert_eq!(request.json_body, Some(json!({"model": "x"})));
    }

    #[test]
    fn response_accessors_decode_body() {
        let response = HttpResponse {
            status: 200,
            body: br#"{"data":[]}"#.to_vec(),
        };
        assert!(response.is_ok());
        assert_eq!(response.text(), r#"{"data":[]}"#);
        let value: Value = response.json().unwrap();
        assert_eq!(value, json!({"data": []}));
    }
}
