//! AiClient trait implementation for GeminiClient (generate + streaming),
//! with retry of transient failures.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::streaming::{parse_sse_stream, SseEvent};
use crate::{AiClient, ChatError, ModelReply, TokenUsage, Turn};

use super::client::{chunk_text, error_message, parse_response, parse_usage, GeminiClient};

impl GeminiClient {
    /// POST `body`, re-sending it on 429, 5xx, connect errors and timeouts
    /// up to `max_retries` times. Any other outcome is returned as is.
    pub(crate) async fn post_with_retry(
        &self,
        stream: bool,
        body: &Value,
    ) -> Result<reqwest::Response, ChatError> {
        let url = self.api_url(stream);
        let mut attempt: u32 = 0;

        loop {
            let mut request = self
                .http
                .post(&url)
                .header("content-type", "application/json");
            if stream {
                request = request.query(&[("alt", "sse")]);
            }
            let result = request
                .query(&[("key", self.config.api_key.as_str())])
                .json(body)
                .send()
                .await;

            let reason = match &result {
                Ok(response) if is_transient_status(response.status()) => {
                    Some(format!("HTTP {}", response.status()))
                }
                Ok(_) => None,
                Err(e) if e.is_timeout() => Some("timeout".to_string()),
                Err(e) if e.is_connect() => Some("connect error".to_string()),
                Err(_) => None,
            };

            match reason {
                Some(reason) if attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = self.config.retry_backoff * attempt;
                    warn!(
                        model = %self.config.model,
                        attempt,
                        max_retries = self.config.max_retries,
                        ?delay,
                        %reason,
                        "Gemini request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                _ => return result.map_err(transport_error),
            }
        }
    }
}

fn is_transient_status(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// The URL carries the API key, so it is stripped before the error is shown.
fn transport_error(e: reqwest::Error) -> ChatError {
    if e.is_timeout() {
        ChatError::Timeout
    } else {
        ChatError::RequestFailed(e.without_url().to_string())
    }
}

#[async_trait]
impl AiClient for GeminiClient {
    async fn generate(&self, contents: &[Turn]) -> Result<ModelReply, ChatError> {
        let body = self.build_request_body(contents);

        debug!(model = %self.config.model, turns = contents.len(), "Gemini API request");

        let response = self.post_with_retry(false, &body).await?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(ChatError::RequestFailed(error_message(&text, status)));
        }

        let json: Value = serde_json::from_str(&text)
            .map_err(|e| ChatError::RequestFailed(format!("malformed response: {e}")))?;

        parse_response(&json)
    }

    async fn generate_streaming(
        &self,
        contents: &[Turn],
        on_chunk: Box<dyn Fn(String) + Send + Sync>,
    ) -> Result<ModelReply, ChatError> {
        let body = self.build_request_body(contents);

        debug!(model = %self.config.model, turns = contents.len(), "Gemini API streaming request");

        let response = self.post_with_retry(true, &body).await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.map_err(transport_error)?;
            return Err(ChatError::RequestFailed(error_message(&text, status)));
        }

        let mut full_text = String::new();
        let mut usage = TokenUsage::default();

        parse_sse_stream(response, |event: SseEvent| {
            let data: Value = serde_json::from_str(&event.data)
                .map_err(|e| ChatError::RequestFailed(format!("malformed stream event: {e}")))?;

            if let Some(message) = data["error"]["message"].as_str() {
                return Err(ChatError::RequestFailed(message.to_string()));
            }
            if data.get("usageMetadata").is_some() {
                usage = parse_usage(&data);
            }

            let chunk = chunk_text(&data);
            if !chunk.is_empty() {
                full_text.push_str(&chunk);
                on_chunk(chunk);
            }
            Ok(())
        })
        .await?;

        if full_text.is_empty() {
            return Err(ChatError::RequestFailed("response contained no text".into()));
        }

        Ok(ModelReply {
            text: full_text,
            usage,
        })
    }
}
