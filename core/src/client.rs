//! Descriptor execution against a live HTTP backend.
//!
//! # Design
//! `ApiClient` holds a normalized `base_url` and a shared `reqwest::Client`;
//! it carries no other state between calls. `execute` is the single entry
//! point: it sends the descriptor, classifies any transport failure into the
//! `ClientError` taxonomy, decodes the body, and applies the descriptor's
//! transform. Request and response hooks are `tracing` events, emitted for
//! every call regardless of outcome.

use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::error::ClientError;
use crate::http::{Method, RequestDescriptor, ResponseEnvelope};

/// Async client bound to one base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full URL for a descriptor path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Execute one descriptor and return the decoded envelope.
    ///
    /// A non-2xx reply is an error, not a success with an odd status: it
    /// comes back as `ClientError::Status` carrying the reply's status,
    /// headers and decoded body. If the descriptor carries a cancellation
    /// token, the token races the call and wins with `ClientError::Canceled`.
    pub async fn execute(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<ResponseEnvelope, ClientError> {
        let url = self.url_for(&descriptor.path);

        // Request hook.
        tracing::debug!(method = descriptor.method.as_str(), %url, "sending request");

        let send = self.send(&descriptor, &url);
        let response = match descriptor.cancel.clone() {
            Some(token) => tokio::select! {
                _ = token.cancelled() => return Err(ClientError::Canceled),
                result = send => result?,
            },
            None => send.await?,
        };

        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let text = response.text().await.map_err(|e| ClientError::NoResponse {
            descriptor: descriptor.clone(),
            reason: e.to_string(),
        })?;
        let body = decode_body(&text);

        // Response hook.
        tracing::debug!(status, "received response");

        if !(200..300).contains(&status) {
            return Err(ClientError::Status {
                status,
                headers,
                body,
            });
        }

        let body = match descriptor.transform {
            Some(transform) => transform(body),
            None => body,
        };

        Ok(ResponseEnvelope {
            status,
            headers,
            body,
            descriptor,
        })
    }

    async fn send(
        &self,
        descriptor: &RequestDescriptor,
        url: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let mut request = match descriptor.method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
            Method::Patch => self.http.patch(url),
            Method::Delete => self.http.delete(url),
        };
        // Custom headers go on before the body so an explicit Content-Type
        // is not shadowed by the JSON default.
        for (name, value) in &descriptor.headers {
            request = request.header(name, value);
        }
        if let Some(body) = &descriptor.body {
            request = request.json(body);
        }
        request
            .send()
            .await
            .map_err(|e| classify_send_error(e, descriptor))
    }
}

/// Map a reqwest transport error onto the failure taxonomy: builder
/// failures never left the client, everything else went out unanswered.
fn classify_send_error(error: reqwest::Error, descriptor: &RequestDescriptor) -> ClientError {
    if error.is_builder() {
        return ClientError::Setup(error.to_string());
    }
    ClientError::NoResponse {
        descriptor: descriptor.clone(),
        reason: error.to_string(),
    }
}

/// Default body decoding: empty bodies become null, non-JSON bodies are
/// kept verbatim as a JSON string.
fn decode_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn collect_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn url_for_joins_base_and_path() {
        let client = ApiClient::new("http://localhost:3000");
        assert_eq!(client.url_for("/todos"), "http://localhost:3000/todos");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(client.url_for("/todos"), "http://localhost:3000/todos");
    }

    #[test]
    fn decode_body_parses_json() {
        assert_eq!(
            decode_body(r#"{"title":"abc"}"#),
            json!({"title": "abc"})
        );
    }

    #[test]
    fn decode_body_empty_is_null() {
        assert_eq!(decode_body(""), Value::Null);
    }

    #[test]
    fn decode_body_keeps_raw_text_when_not_json() {
        assert_eq!(
            decode_body("not json"),
            Value::String("not json".to_string())
        );
    }
}
