//! Server crate for the SkillMatrix assignment engine.
//!
//! This crate contains the orchestrator that coordinates the roster, the
//! deterministic scorer, and the optional AI collaborator, plus the chat
//! copilot session.

pub mod copilot;
pub mod orchestrator;

pub use copilot::{ChatMessage, ChatRole, CopilotSession, FALLBACK_REPLY};
pub use orchestrator::AssignmentOrchestrator;
