//! Demo operations for the request-core client.
//!
//! # Overview
//! Nine operations, each one UI-triggerable action: build a descriptor,
//! execute it, render the envelope on success, log a categorized error on
//! failure. Operations are independent; a failure in one never affects
//! another and nothing propagates to the caller.

pub mod ops;
pub mod render;
