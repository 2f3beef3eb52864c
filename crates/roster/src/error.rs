//! Error types for the roster crate.

use thiserror::Error;

/// Errors that can occur while loading or mutating the roster.
#[derive(Error, Debug)]
pub enum RosterError {
    /// I/O error while reading a roster file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Roster file was not valid JSON or did not match the schema
    #[error("Failed to parse roster file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A mutation referenced an operator that is not in the roster.
    ///
    /// The roster is left unchanged when this is returned.
    #[error("Unknown operator: {id}")]
    UnknownOperator { id: String },

    /// A lookup referenced a machine that is not in the roster
    #[error("Unknown machine: {id}")]
    UnknownMachine { id: String },

    /// A roster file referenced a skill id no skill defines
    #[error("Unknown skill {skill_id} referenced by {referenced_by}")]
    UnknownSkill {
        skill_id: String,
        referenced_by: String,
    },
}

/// Convenience type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, RosterError>;
