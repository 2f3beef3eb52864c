//! # Roster Crate
//!
//! In-memory roster store for the skill-tracking system.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Skill, Operator, Certification, Machine,
//!   Recommendation)
//! - **index**: The RosterIndex store with its read/write API
//! - **fixtures**: Built-in demo roster
//! - **stats**: Derived dashboard statistics
//! - **error**: Error types for loading and mutation
//!
//! ## Example Usage
//!
//! ```ignore
//! use roster::{RosterIndex, SkillLevel, fixtures};
//!
//! let mut index = fixtures::demo();
//!
//! // Reads
//! let machine = index.get_machine("m1").unwrap();
//! let operator = index.get_operator("op1").unwrap();
//!
//! // Single-writer mutation
//! index.set_skill_level("op4", "s1", SkillLevel::Independent)?;
//! ```
//!
//! The index is owned by the application root and shared by reference;
//! mutation goes through `set_skill_level`/`cycle_skill_level` only, so
//! ownership rules enforce the single-writer edit model.

// Public modules
pub mod error;
pub mod fixtures;
pub mod index;
pub mod stats;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{Result, RosterError};
pub use index::{RosterFile, RosterIndex};
pub use types::{
    // Type aliases
    MachineId,
    OperatorId,
    SkillId,
    // Core types
    Certification,
    Machine,
    Operator,
    Recommendation,
    Skill,
    SkillRequirement,
    // Enums
    MachineStatus,
    Shift,
    SkillCategory,
    SkillLevel,
};
