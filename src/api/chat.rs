use tracing::debug;

use crate::api::client::{ApiError, CompletionClient};
use crate::api::transport::HttpRequest;
use crate::api::{ChatCompletionResponse, ChatMessage, ChatRequest};

impl CompletionClient {
    /// One non-streaming completion. Returns `choices[0].message.content`.
    pub async fn complete_chat(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<String, ApiError> {
        let request = ChatRequest {
            model: model.to_string(),
            messages,
        };
        let body = serde_json::to_value(&request)
            .map_err(|err| ApiError::Malformed(format!("chat request: {err}")))?;
        let url = self.server.endpoint("chat/completions");
        debug!(url = %url, model, "Sending chat request");

        let request = self.server.authorized(HttpRequest::post(url, body));
        let response = self.server.send(request).await?;
        if !response.is_ok() {
            return Err(ApiError::from_status(&response));
        }

        let parsed = response
            .json::<ChatCompletionResponse>()
            .map_err(|err| ApiError::Malformed(format!("chat completion: {err}")))?;
        parsed
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| ApiError::Malformed("missing choices[0].message.content".to_string()))
    }
}
