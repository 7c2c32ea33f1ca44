//! Common test utilities for REST API testing.
//!
//! - [`harness`] - Sends the same request through either router
//! - [`recording_store`] - Item store double with call counters and canned errors
//! - [`fixtures`] - Request payloads

#![allow(dead_code)]

pub mod fixtures;
pub mod harness;
pub mod recording_store;
