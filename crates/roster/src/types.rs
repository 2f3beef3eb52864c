//! Core domain types for the plant roster.
//!
//! This module defines the fundamental data structures used throughout the
//! system: skills, operators with their proficiency maps and certifications,
//! machines with their skill requirements, and the recommendation record
//! produced by the scoring layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up skill ids with
// operator or machine ids in signatures.

/// Unique identifier for a skill (e.g. "s1")
pub type SkillId = String;

/// Unique identifier for an operator (e.g. "op1")
pub type OperatorId = String;

/// Unique identifier for a machine (e.g. "m1")
pub type MachineId = String;

// =============================================================================
// Skill Level
// =============================================================================

/// Proficiency level on a single skill.
///
/// The closed range 0..=4 with fixed semantic labels. Serialized as the bare
/// integer so roster files and wire payloads stay compact.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum SkillLevel {
    #[default]
    None = 0,
    Novice = 1,
    Supervised = 2,
    Independent = 3,
    Expert = 4,
}

impl SkillLevel {
    /// Parse a raw integer, returning `None` for values outside 0..=4.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Novice),
            2 => Some(Self::Supervised),
            3 => Some(Self::Independent),
            4 => Some(Self::Expert),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Human-readable label for matrix and dashboard rendering.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Novice => "Novice",
            Self::Supervised => "Supervised",
            Self::Independent => "Independent",
            Self::Expert => "Expert",
        }
    }

    /// The next level in the cycling interaction: 0 -> 1 -> 2 -> 3 -> 4 -> 0.
    ///
    /// Five applications return the original level.
    pub fn cycle(self) -> Self {
        match self {
            Self::None => Self::Novice,
            Self::Novice => Self::Supervised,
            Self::Supervised => Self::Independent,
            Self::Independent => Self::Expert,
            Self::Expert => Self::None,
        }
    }
}

impl From<SkillLevel> for u8 {
    fn from(level: SkillLevel) -> u8 {
        level as u8
    }
}

impl TryFrom<u8> for SkillLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SkillLevel::from_u8(value).ok_or_else(|| format!("skill level out of range: {value}"))
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.as_u8())
    }
}

// =============================================================================
// Skill
// =============================================================================

/// Fixed set of skill categories used for dashboard grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    Machine,
    Process,
    Quality,
    Safety,
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Machine => "Machine",
            Self::Process => "Process",
            Self::Quality => "Quality",
            Self::Safety => "Safety",
        };
        write!(f, "{name}")
    }
}

/// Immutable reference data describing one trackable skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub category: SkillCategory,
    pub description: String,
}

// =============================================================================
// Certification
// =============================================================================

/// A certification held by an operator.
///
/// The stored `is_valid` flag is accepted on the wire for compatibility with
/// upstream data sources, but validity is always derived from the expiry
/// date at read time via [`Certification::is_valid_on`] — the flag and the
/// date can disagree in real exports, and the date wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issued_date: NaiveDate,
    pub expiry_date: NaiveDate,
    #[serde(default)]
    pub is_valid: bool,
}

impl Certification {
    /// A certification expiring today is still valid (`today <= expiry`).
    pub fn is_valid_on(&self, today: NaiveDate) -> bool {
        today <= self.expiry_date
    }

    /// Days until expiry; negative when already expired.
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry_date - today).num_days()
    }
}

// =============================================================================
// Operator
// =============================================================================

/// Fixed set of shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    Morning,
    Evening,
    Night,
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Morning => "Morning",
            Self::Evening => "Evening",
            Self::Night => "Night",
        };
        write!(f, "{name}")
    }
}

/// An operator on the plant floor with their skill map and certifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operator {
    pub id: OperatorId,
    pub name: String,
    pub role: String,
    pub shift: Shift,
    /// Skill id -> proficiency level. Absent entries mean level 0.
    #[serde(default)]
    pub skills: HashMap<SkillId, SkillLevel>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
}

impl Operator {
    /// Proficiency on one skill, defaulting to [`SkillLevel::None`] when the
    /// skill has never been recorded for this operator.
    pub fn skill_level(&self, skill_id: &str) -> SkillLevel {
        self.skills.get(skill_id).copied().unwrap_or_default()
    }
}

// =============================================================================
// Machine
// =============================================================================

/// Operating status of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineStatus {
    Operational,
    Maintenance,
    Down,
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Operational => "Operational",
            Self::Maintenance => "Maintenance",
            Self::Down => "Down",
        };
        write!(f, "{name}")
    }
}

/// One entry in a machine's ordered requirement list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequirement {
    pub skill_id: SkillId,
    pub min_level: SkillLevel,
}

/// A machine and the skills required to run it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: MachineId,
    pub name: String,
    #[serde(rename = "type")]
    pub machine_type: String,
    pub status: MachineStatus,
    #[serde(default)]
    pub required_skills: Vec<SkillRequirement>,
}

// =============================================================================
// Recommendation
// =============================================================================

/// A scored operator suggestion for a machine.
///
/// Produced either by the deterministic local scorer or by the external
/// collaborator; in both cases the list is treated as unordered on arrival
/// and ranked by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub operator_id: OperatorId,
    /// Suitability score in 0..=100.
    pub score: u8,
    pub reasoning: String,
    pub missing_skills: Vec<String>,
}
