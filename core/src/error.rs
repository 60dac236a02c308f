//! Error types for the request demo client.
//!
//! # Design
//! One variant per failure category, mutually exclusive by construction:
//! `Status` means the server replied with a non-2xx status, `NoResponse`
//! means the request went out but nothing came back, `Setup` means the
//! request never left the client. `Canceled` is the recognized sub-case for
//! a cancellation token winning the race against the in-flight call;
//! `is_canceled` is the predicate callers use to report it distinctly.

use std::fmt;

use serde_json::Value;

use crate::http::RequestDescriptor;

/// Errors returned by `ApiClient::execute`.
#[derive(Debug, Clone)]
pub enum ClientError {
    /// The server replied with a non-2xx status.
    Status {
        status: u16,
        headers: Vec<(String, String)>,
        body: Value,
    },

    /// The request was sent but no response arrived.
    NoResponse {
        /// The descriptor of the request that got no reply.
        descriptor: RequestDescriptor,
        reason: String,
    },

    /// The request could not be built; it never left the client.
    Setup(String),

    /// The attached cancellation token fired before the call resolved.
    Canceled,
}

impl ClientError {
    /// Whether this failure originated from a cancellation token.
    pub fn is_canceled(&self) -> bool {
        matches!(self, ClientError::Canceled)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Status { status, body, .. } => {
                write!(f, "server responded with HTTP {status}: {body}")
            }
            ClientError::NoResponse { descriptor, reason } => {
                write!(
                    f,
                    "no response for {} {}: {reason}",
                    descriptor.method.as_str(),
                    descriptor.path
                )
            }
            ClientError::Setup(msg) => write!(f, "request setup failed: {msg}"),
            ClientError::Canceled => write!(f, "request canceled"),
        }
    }
}

impl std::error::Error for ClientError {}
