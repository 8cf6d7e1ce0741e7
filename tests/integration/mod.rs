//! Integration tests for the Gemini relay.
//!
//! Each test builds a fresh router pointed at its own mock upstream and sends
//! requests through the full middleware stack.

pub mod common;
pub mod env_key_test;
