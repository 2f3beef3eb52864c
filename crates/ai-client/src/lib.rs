//! AI collaborator client for the skill-tracking system.
//!
//! This crate provides the caller side of the two external contracts:
//! - Recommendation scoring: machine requirements + roster in, ranked
//!   shortlist with scores, reasoning, and gap lists out
//! - Chat: free-text question plus a condensed plant snapshot in, free
//!   text out
//!
//! It handles payload construction, the HTTP round trip, response
//! validation, and an error taxonomy that keeps "not configured" distinct
//! from "failed this time". It performs no scoring itself; the
//! deterministic default lives in the `scoring` crate.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;

// Re-export commonly used types
pub use client::AiClient;
pub use config::{AiClientConfig, API_KEY_ENV};
pub use error::{AiClientError, Result};
pub use payload::{ChatContext, RecommendationPayload};
