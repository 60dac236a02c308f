//! Request and response value types.
//!
//! # Design
//! A `RequestDescriptor` describes one outbound call as plain data: method,
//! path, and the optional body, headers, transform and cancellation token.
//! Descriptors are built with chainable constructors, consumed by
//! `ApiClient::execute`, and echoed back inside the resulting
//! `ResponseEnvelope` so callers can see which call produced which result.
//!
//! The transform is a plain `fn` pointer rather than a boxed closure so
//! descriptors stay `Clone` and `Debug`; it runs after the client's default
//! JSON decoding and replaces the decoded body with its return value.

use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Post-decode body transform. Receives the decoded JSON body and returns
/// the body the caller will see.
pub type BodyTransform = fn(Value) -> Value;

/// One outbound call described as plain data.
///
/// Built with the chainable constructors below, executed once by
/// `ApiClient::execute`, and discarded after the call resolves.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    pub transform: Option<BodyTransform>,
    pub cancel: Option<CancellationToken>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            body: None,
            headers: Vec::new(),
            transform: None,
            cancel: None,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn patch(path: &str) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: &str) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append one header. Headers set here are sent in addition to the
    /// transport's defaults.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Append a post-decode body transform.
    pub fn transform(mut self, transform: BodyTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Attach a cancellation token. Triggering the token while the call is
    /// in flight fails it with `ClientError::Canceled`; triggering it after
    /// the call resolved has no effect.
    pub fn cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// The structured result of one successful call.
///
/// Produced by `ApiClient::execute`, consumed once by the caller's sink.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Value,
    /// Echo of the descriptor that produced this response.
    pub descriptor: RequestDescriptor,
}
