//! Gemini API client struct, request building, and response parsing.

use serde_json::Value;

use crate::{ChatError, ModelReply, TokenUsage, Turn};

use super::config::GeminiConfig;

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ChatError::RequestFailed(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    /// Endpoint without the key; the key is added as a query parameter.
    pub(crate) fn api_url(&self, stream: bool) -> String {
        let method = if stream {
            "streamGenerateContent"
        } else {
            "generateContent"
        };
        format!("{}/{}:{}", self.config.base_url, self.config.model, method)
    }

    /// Build the JSON request body: the whole transcript plus optional settings.
    pub(crate) fn build_request_body(&self, contents: &[Turn]) -> Value {
        let mut body = serde_json::json!({ "contents": contents });

        let mut generation = serde_json::Map::new();
        if let Some(temperature) = self.config.temperature {
            generation.insert("temperature".into(), temperature.into());
        }
        if let Some(max_tokens) = self.config.max_output_tokens {
            generation.insert("maxOutputTokens".into(), max_tokens.into());
        }
        if !generation.is_empty() {
            body["generationConfig"] = Value::Object(generation);
        }

        if let Some(ref system) = self.config.system_instruction {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": system }]
            });
        }

        body
    }
}

/// Extract the first text part of the first candidate.
pub(crate) fn parse_response(json: &Value) -> Result<ModelReply, ChatError> {
    if let Some(message) = json["error"]["message"].as_str() {
        return Err(ChatError::RequestFailed(message.to_string()));
    }

    let candidate = json["candidates"]
        .as_array()
        .and_then(|candidates| candidates.first())
        .ok_or_else(|| ChatError::RequestFailed("response has no candidates".into()))?;

    let text = candidate["content"]["parts"]
        .as_array()
        .and_then(|parts| parts.iter().find_map(|part| part["text"].as_str()))
        .ok_or_else(|| no_text_error(candidate))?;

    Ok(ModelReply {
        text: text.to_string(),
        usage: parse_usage(json),
    })
}

/// Concatenated text of the first candidate in one stream event.
pub(crate) fn chunk_text(json: &Value) -> String {
    json["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part["text"].as_str())
                .collect::<String>()
        })
        .unwrap_or_default()
}

pub(crate) fn parse_usage(json: &Value) -> TokenUsage {
    TokenUsage {
        prompt_tokens: json["usageMetadata"]["promptTokenCount"]
            .as_u64()
            .unwrap_or(0),
        candidate_tokens: json["usageMetadata"]["candidatesTokenCount"]
            .as_u64()
            .unwrap_or(0),
    }
}

/// Message for a failed response: the server's `error.message` if the body
/// carries one, otherwise a generic line with the status.
pub(crate) fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| format!("request failed with HTTP {status}"))
}

fn no_text_error(candidate: &Value) -> ChatError {
    match candidate["finishReason"].as_str() {
        Some(reason) => {
            ChatError::RequestFailed(format!("response contained no text (finish reason: {reason})"))
        }
        None => ChatError::RequestFailed("response contained no text".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Attachment, Part};
    use serde_json::json;

    fn client(config: GeminiConfig) -> GeminiClient {
        GeminiClient::new(config).unwrap()
    }

    #[test]
    fn api_url_uses_model_and_method() {
        let c = client(GeminiConfig::new("k").with_base_url("http://h/v1beta/models/"));
        assert_eq!(c.api_url(false), "http://h/v1beta/models/gemini-1.5-flash:generateContent");
        assert_eq!(
            c.api_url(true),
            "http://h/v1beta/models/gemini-1.5-flash:streamGenerateContent"
        );
        assert!(!c.api_url(false).contains("key="));
    }

    #[test]
    fn body_is_bare_contents_by_default() {
        let c = client(GeminiConfig::new("k"));
        let turns = vec![
            Turn::user(vec![Part::text("Hello")]),
            Turn::model("Hi"),
            Turn::user(vec![Part::text("Look"), Attachment::new("AAAA", "image/png").into()]),
        ];
        let body = c.build_request_body(&turns);
        assert_eq!(
            body,
            json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "Hello" }] },
                    { "role": "model", "parts": [{ "text": "Hi" }] },
                    { "role": "user", "parts": [
                        { "text": "Look" },
                        { "inlineData": { "data": "AAAA", "mimeType": "image/png" } }
                    ] }
                ]
            })
        );
    }

    #[test]
    fn body_includes_optional_settings() {
        let c = client(
            GeminiConfig::new("k")
                .with_temperature(0.5)
                .with_max_output_tokens(100)
                .with_system_instruction("be brief"),
        );
        let body = c.build_request_body(&[]);
        assert_eq!(body["generationConfig"]["temperature"], 0.5);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 100);
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be brief");
    }

    #[test]
    fn parses_first_text_part_of_first_candidate() {
        let json = json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "first" }, { "text": "second" }] } },
                { "content": { "role": "model", "parts": [{ "text": "other" }] } }
            ],
            "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 3 }
        });
        let reply = parse_response(&json).unwrap();
        assert_eq!(reply.text, "first");
        assert_eq!(reply.usage.prompt_tokens, 12);
        assert_eq!(reply.usage.candidate_tokens, 3);
    }

    #[test]
    fn missing_usage_is_zero() {
        let json = json!({ "candidates": [{ "content": { "parts": [{ "text": "x" }] } }] });
        assert_eq!(parse_response(&json).unwrap().usage, TokenUsage::default());
    }

    #[test]
    fn empty_candidates_is_request_failed() {
        let err = parse_response(&json!({ "candidates": [] })).unwrap_err();
        assert_eq!(err.to_string(), "response has no candidates");
    }

    #[test]
    fn candidate_without_text_reports_finish_reason() {
        let json = json!({ "candidates": [{ "finishReason": "SAFETY" }] });
        let err = parse_response(&json).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn error_body_on_success_status_is_request_failed() {
        let err = parse_response(&json!({ "error": { "message": "quota" } })).unwrap_err();
        assert_eq!(err.to_string(), "quota");
    }

    #[test]
    fn error_message_prefers_server_message() {
        let msg = error_message(
            r#"{"error":{"code":400,"message":"bad key","status":"INVALID_ARGUMENT"}}"#,
            reqwest::StatusCode::BAD_REQUEST,
        );
        assert_eq!(msg, "bad key");
    }

    #[test]
    fn error_message_falls_back_to_status() {
        let msg = error_message("<html>oops</html>", reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(msg, "request failed with HTTP 502 Bad Gateway");
    }

    #[test]
    fn chunk_text_joins_parts() {
        let json = json!({ "candidates": [{ "content": { "parts": [{ "text": "a" }, { "text": "b" }] } }] });
        assert_eq!(chunk_text(&json), "ab");
        assert_eq!(chunk_text(&json!({})), "");
    }
}
