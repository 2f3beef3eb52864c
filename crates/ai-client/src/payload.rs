//! Caller-side payload construction.
//!
//! Projects the roster into the wire shapes the collaborator contract
//! defines: skill ids are resolved to display names, certification validity
//! is derived from expiry dates, and the chat context is a condensed
//! snapshot rather than the full object graph to bound payload size.

use chrono::NaiveDate;
use serde::Serialize;

use roster::{Machine, Operator, RosterIndex};

// =============================================================================
// Recommendation request
// =============================================================================

/// Full scoring request: one machine's requirements plus the operator roster.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationPayload {
    pub machine_name: String,
    pub requirements: Vec<RequirementEntry>,
    pub operators: Vec<OperatorEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementEntry {
    pub skill: String,
    pub min_level: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorEntry {
    pub id: String,
    pub name: String,
    pub skills: Vec<SkillEntry>,
    pub certifications: Vec<CertificationEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    pub name: String,
    pub level: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationEntry {
    pub name: String,
    pub is_valid: bool,
}

impl RecommendationPayload {
    /// Build the request for one machine against the full roster.
    ///
    /// An empty roster yields an empty operator list with the requirement
    /// list intact; a machine with zero requirements yields a well-formed
    /// empty requirements array. Neither is an error here.
    pub fn build(machine: &Machine, roster: &RosterIndex, today: NaiveDate) -> Self {
        let requirements = machine
            .required_skills
            .iter()
            .map(|req| RequirementEntry {
                skill: roster.skill_name(&req.skill_id).to_string(),
                min_level: req.min_level.as_u8(),
            })
            .collect();

        let operators = roster
            .operators()
            .map(|op| operator_entry(op, roster, today))
            .collect();

        Self {
            machine_name: machine.name.clone(),
            requirements,
            operators,
        }
    }
}

fn operator_entry(operator: &Operator, roster: &RosterIndex, today: NaiveDate) -> OperatorEntry {
    let mut skills: Vec<SkillEntry> = operator
        .skills
        .iter()
        .map(|(skill_id, level)| SkillEntry {
            name: roster.skill_name(skill_id).to_string(),
            level: level.as_u8(),
        })
        .collect();
    // HashMap iteration order is arbitrary; keep payloads reproducible
    skills.sort_by(|a, b| a.name.cmp(&b.name));

    let certifications = operator
        .certifications
        .iter()
        .map(|cert| CertificationEntry {
            name: cert.name.clone(),
            is_valid: cert.is_valid_on(today),
        })
        .collect();

    OperatorEntry {
        id: operator.id.clone(),
        name: operator.name.clone(),
        skills,
        certifications,
    }
}

// =============================================================================
// Chat context snapshot
// =============================================================================

/// Condensed plant snapshot grounding a chat turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    pub operators: Vec<ChatOperatorEntry>,
    pub machines: Vec<ChatMachineEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatOperatorEntry {
    pub name: String,
    pub role: String,
    pub shift: String,
    /// Labeled strings like "CNC Milling (L4)"
    pub skills: Vec<String>,
    /// Labeled strings like "OSHA 30 (Valid)"
    pub certs: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMachineEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub machine_type: String,
    pub status: String,
}

impl ChatContext {
    /// Build the condensed snapshot for one chat turn.
    pub fn build(roster: &RosterIndex, today: NaiveDate) -> Self {
        let operators = roster
            .operators()
            .map(|op| {
                let mut skills: Vec<String> = op
                    .skills
                    .iter()
                    .map(|(skill_id, level)| {
                        format!("{} ({level})", roster.skill_name(skill_id))
                    })
                    .collect();
                skills.sort();

                let certs = op
                    .certifications
                    .iter()
                    .map(|cert| {
                        let validity = if cert.is_valid_on(today) {
                            "Valid"
                        } else {
                            "Expired"
                        };
                        format!("{} ({validity})", cert.name)
                    })
                    .collect();

                ChatOperatorEntry {
                    name: op.name.clone(),
                    role: op.role.clone(),
                    shift: op.shift.to_string(),
                    skills,
                    certs,
                }
            })
            .collect();

        let machines = roster
            .machines()
            .map(|machine| ChatMachineEntry {
                name: machine.name.clone(),
                machine_type: machine.machine_type.clone(),
                status: machine.status.to_string(),
            })
            .collect();

        Self {
            operators,
            machines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster::fixtures;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn test_payload_resolves_skill_names() {
        let roster = fixtures::demo();
        let machine = roster.get_machine("m1").unwrap();

        let payload = RecommendationPayload::build(machine, &roster, today());

        assert_eq!(payload.machine_name, "Haas VF-2");
        assert_eq!(payload.requirements.len(), 2);
        assert_eq!(payload.requirements[0].skill, "CNC Milling");
        assert_eq!(payload.requirements[0].min_level, 3);
        assert_eq!(payload.operators.len(), 5);
    }

    #[test]
    fn test_payload_on_empty_roster() {
        let empty = roster::RosterIndex::new();
        let demo = fixtures::demo();
        let machine = demo.get_machine("m1").unwrap();

        let payload = RecommendationPayload::build(machine, &empty, today());

        assert!(payload.operators.is_empty());
        // Requirement list survives; unknown skill ids fall back to raw ids
        assert_eq!(payload.requirements.len(), 2);
        assert_eq!(payload.requirements[0].skill, "s1");
    }

    #[test]
    fn test_payload_on_machine_with_no_requirements() {
        let roster = fixtures::demo();
        let mut machine = roster.get_machine("m1").unwrap().clone();
        machine.required_skills.clear();

        let payload = RecommendationPayload::build(&machine, &roster, today());

        assert!(payload.requirements.is_empty());
        assert_eq!(payload.operators.len(), 5);

        // Still serializes to a well-formed document
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["requirements"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_payload_derives_certification_validity() {
        let roster = fixtures::demo();
        let machine = roster.get_machine("m1").unwrap();

        let payload = RecommendationPayload::build(machine, &roster, today());

        let op1 = payload.operators.iter().find(|o| o.id == "op1").unwrap();
        // OSHA 30 expired 2025-01-01; the stored flag says valid
        assert_eq!(op1.certifications[0].name, "OSHA 30");
        assert!(!op1.certifications[0].is_valid);
    }

    #[test]
    fn test_chat_context_is_condensed() {
        let roster = fixtures::demo();
        let context = ChatContext::build(&roster, today());

        assert_eq!(context.operators.len(), 5);
        assert_eq!(context.machines.len(), 4);

        let john = context
            .operators
            .iter()
            .find(|o| o.name == "John Doe")
            .unwrap();
        assert!(john.skills.contains(&"CNC Milling (L4)".to_string()));
        assert!(john.certs.contains(&"OSHA 30 (Expired)".to_string()));

        // No ids, descriptions, or requirement lists in the snapshot
        let json = serde_json::to_string(&context).unwrap();
        assert!(!json.contains("\"id\""));
        assert!(!json.contains("requirements"));
    }
}
