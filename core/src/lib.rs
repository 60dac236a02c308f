//! Async HTTP client core for the request demo.
//!
//! # Overview
//! Builds `RequestDescriptor` values, executes them with reqwest, and hands
//! back `ResponseEnvelope` values with the body already decoded to JSON.
//! Every failure lands in exactly one `ClientError` variant, so callers can
//! classify "server rejected", "nothing came back", "never left the client"
//! and "canceled" without inspecting strings.
//!
//! # Design
//! - `ApiClient` is stateless beyond `base_url` and the shared reqwest pool.
//! - A descriptor is plain data built with a chainable constructor; it is
//!   created fresh per call and echoed back inside the envelope.
//! - Response transforms run after default JSON decoding, never instead of it.
//! - Cancellation is advisory: an attached `CancellationToken` races the
//!   in-flight request and wins with `ClientError::Canceled`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::ApiClient;
pub use error::ClientError;
pub use http::{BodyTransform, Method, RequestDescriptor, ResponseEnvelope};
pub use types::{CreateTodo, Post, Todo, UpdateTodo};
