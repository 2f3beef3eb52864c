//! Deterministic suitability scoring for operator assignment.
//!
//! This crate provides:
//! - The local gap-distance scorer over required-vs-actual skill levels
//! - Ranking with a documented tie-break
//!
//! ## Architecture
//! Scoring is a pure function of (machine, operator, roster, date); the
//! orchestrator always computes it, and uses the external collaborator's
//! answer only as an optional enhancement on top.
//!
//! ## Example Usage
//! ```ignore
//! use scoring::{rank, score_roster, DEFAULT_SHORTLIST};
//!
//! let scored = score_roster(machine, &roster, today);
//! let shortlist = rank(scored, DEFAULT_SHORTLIST);
//! ```

pub mod rank;
pub mod score;

// Re-export main types
pub use rank::{DEFAULT_SHORTLIST, Ranked, rank};
pub use score::{ScoredOperator, score_operator, score_roster};
