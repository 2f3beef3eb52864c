//! The in-memory roster store.
//!
//! [`RosterIndex`] owns all skills, operators, and machines for one plant
//! and is the single place roster state is mutated. Consumers hold it behind
//! an `Arc` and read through reference-returning getters; the two mutation
//! operations take `&mut self`, so the usual borrow rules give us the
//! single-writer discipline the edit model assumes.
//!
//! State lives only for the life of the process: the index is built once at
//! startup from fixtures or a JSON file and never persisted.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, RosterError};
use crate::types::{Machine, MachineId, Operator, OperatorId, Skill, SkillId, SkillLevel};

/// Serialized form of a full roster, used for JSON roster files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterFile {
    pub skills: Vec<Skill>,
    pub operators: Vec<Operator>,
    pub machines: Vec<Machine>,
}

/// Main data structure holding all roster data.
///
/// HashMaps give O(1) lookups by id; separate insertion-order lists keep
/// iteration deterministic for matrix rendering and ranking tie-breaks.
#[derive(Debug, Default)]
pub struct RosterIndex {
    skills: HashMap<SkillId, Skill>,
    operators: HashMap<OperatorId, Operator>,
    machines: HashMap<MachineId, Machine>,

    // Insertion order, so listings are stable across runs
    skill_order: Vec<SkillId>,
    operator_order: Vec<OperatorId>,
    machine_order: Vec<MachineId>,
}

impl RosterIndex {
    /// Creates a new, empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a deserialized roster file.
    ///
    /// Validates that every skill id referenced by an operator skill map or
    /// a machine requirement is defined in the skill list.
    pub fn from_roster_file(file: RosterFile) -> Result<Self> {
        let mut index = Self::new();

        for skill in file.skills {
            index.insert_skill(skill);
        }
        for operator in file.operators {
            for skill_id in operator.skills.keys() {
                if !index.skills.contains_key(skill_id) {
                    return Err(RosterError::UnknownSkill {
                        skill_id: skill_id.clone(),
                        referenced_by: format!("operator {}", operator.id),
                    });
                }
            }
            index.insert_operator(operator);
        }
        for machine in file.machines {
            for req in &machine.required_skills {
                if !index.skills.contains_key(&req.skill_id) {
                    return Err(RosterError::UnknownSkill {
                        skill_id: req.skill_id.clone(),
                        referenced_by: format!("machine {}", machine.id),
                    });
                }
            }
            index.insert_machine(machine);
        }

        let (skills, operators, machines) = index.counts();
        debug!(skills, operators, machines, "Built roster index");
        Ok(index)
    }

    /// Load a roster from a JSON file on disk.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let file: RosterFile = serde_json::from_str(&contents)?;
        Self::from_roster_file(file)
    }

    // -------------------------------------------------------------------------
    // Getters - return references, never owned values
    // -------------------------------------------------------------------------

    pub fn get_skill(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    pub fn get_operator(&self, id: &str) -> Option<&Operator> {
        self.operators.get(id)
    }

    pub fn get_machine(&self, id: &str) -> Option<&Machine> {
        self.machines.get(id)
    }

    /// Resolve a skill id to its display name, falling back to the raw id
    /// for skills the roster does not define.
    ///
    /// The returned borrow comes from either the index or the caller's id,
    /// so both inputs share one lifetime.
    pub fn skill_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.skills.get(id).map(|s| s.name.as_str()).unwrap_or(id)
    }

    /// All skills in insertion order.
    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        self.skill_order.iter().filter_map(|id| self.skills.get(id))
    }

    /// All operators in insertion order.
    pub fn operators(&self) -> impl Iterator<Item = &Operator> {
        self.operator_order
            .iter()
            .filter_map(|id| self.operators.get(id))
    }

    /// All machines in insertion order.
    pub fn machines(&self) -> impl Iterator<Item = &Machine> {
        self.machine_order
            .iter()
            .filter_map(|id| self.machines.get(id))
    }

    /// (skills, operators, machines) counts for logging and validation.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.skills.len(), self.operators.len(), self.machines.len())
    }

    // -------------------------------------------------------------------------
    // Mutators
    // -------------------------------------------------------------------------

    pub fn insert_skill(&mut self, skill: Skill) {
        if !self.skills.contains_key(&skill.id) {
            self.skill_order.push(skill.id.clone());
        }
        self.skills.insert(skill.id.clone(), skill);
    }

    pub fn insert_operator(&mut self, operator: Operator) {
        if !self.operators.contains_key(&operator.id) {
            self.operator_order.push(operator.id.clone());
        }
        self.operators.insert(operator.id.clone(), operator);
    }

    pub fn insert_machine(&mut self, machine: Machine) {
        if !self.machines.contains_key(&machine.id) {
            self.machine_order.push(machine.id.clone());
        }
        self.machines.insert(machine.id.clone(), machine);
    }

    /// Replace a single entry in one operator's skill map.
    ///
    /// All other operator fields, and all other operators, are untouched.
    /// An unknown operator id leaves the roster unchanged and is signaled
    /// with [`RosterError::UnknownOperator`] rather than ignored.
    pub fn set_skill_level(
        &mut self,
        operator_id: &str,
        skill_id: &str,
        level: SkillLevel,
    ) -> Result<()> {
        let operator =
            self.operators
                .get_mut(operator_id)
                .ok_or_else(|| RosterError::UnknownOperator {
                    id: operator_id.to_string(),
                })?;
        operator.skills.insert(skill_id.to_string(), level);
        debug!(operator_id, skill_id, level = level.as_u8(), "Set skill level");
        Ok(())
    }

    /// Advance one skill cell by a single level, wrapping 4 back to 0.
    ///
    /// A derived convenience built on [`RosterIndex::set_skill_level`], not a
    /// separate primitive. Returns the new level.
    pub fn cycle_skill_level(&mut self, operator_id: &str, skill_id: &str) -> Result<SkillLevel> {
        let current = self
            .operators
            .get(operator_id)
            .ok_or_else(|| RosterError::UnknownOperator {
                id: operator_id.to_string(),
            })?
            .skill_level(skill_id);
        let next = current.cycle();
        self.set_skill_level(operator_id, skill_id, next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::types::{Shift, Skill, SkillCategory};

    fn test_index() -> RosterIndex {
        fixtures::demo()
    }

    #[test]
    fn test_empty_index() {
        let index = RosterIndex::new();
        assert_eq!(index.counts(), (0, 0, 0));
        assert!(index.get_operator("op1").is_none());
        assert!(index.get_machine("m1").is_none());
        assert_eq!(index.skill_name("s1"), "s1");
    }

    #[test]
    fn test_skill_name_resolves_or_echoes_raw_id() {
        let index = test_index();
        assert_eq!(index.skill_name("s1"), "CNC Milling");

        // Unknown ids echo back the caller's borrow
        let raw = String::from("s99");
        assert_eq!(index.skill_name(&raw), "s99");
    }

    #[test]
    fn test_set_skill_level_replaces_single_entry() {
        let mut index = test_index();
        let before: Vec<Operator> = index.operators().cloned().collect();

        index
            .set_skill_level("op2", "s1", SkillLevel::Independent)
            .unwrap();

        for original in &before {
            let current = index.get_operator(&original.id).unwrap();
            if original.id == "op2" {
                assert_eq!(current.skill_level("s1"), SkillLevel::Independent);
                // Every other entry in op2's map is unchanged
                for (skill_id, level) in &original.skills {
                    if skill_id != "s1" {
                        assert_eq!(current.skills.get(skill_id), Some(level));
                    }
                }
                assert_eq!(current.name, original.name);
                assert_eq!(current.certifications.len(), original.certifications.len());
            } else {
                // Other operators are untouched
                assert_eq!(current.skills, original.skills);
            }
        }
    }

    #[test]
    fn test_set_skill_level_unknown_operator_leaves_roster_unchanged() {
        let mut index = test_index();
        let before: Vec<Operator> = index.operators().cloned().collect();

        let result = index.set_skill_level("op999", "s1", SkillLevel::Expert);
        assert!(matches!(
            result,
            Err(RosterError::UnknownOperator { ref id }) if id == "op999"
        ));

        let after: Vec<Operator> = index.operators().cloned().collect();
        assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(after.iter()) {
            assert_eq!(a.skills, b.skills);
        }
    }

    #[test]
    fn test_cycle_skill_level_five_times_is_identity() {
        let mut index = test_index();
        let original = index.get_operator("op1").unwrap().skill_level("s2");

        for _ in 0..5 {
            index.cycle_skill_level("op1", "s2").unwrap();
        }

        assert_eq!(index.get_operator("op1").unwrap().skill_level("s2"), original);
    }

    #[test]
    fn test_cycle_skill_level_on_unrecorded_skill_starts_at_none() {
        let mut index = RosterIndex::new();
        index.insert_skill(Skill {
            id: "s1".to_string(),
            name: "CNC Milling".to_string(),
            category: SkillCategory::Machine,
            description: String::new(),
        });
        index.insert_operator(Operator {
            id: "op1".to_string(),
            name: "Test".to_string(),
            role: "Machinist".to_string(),
            shift: Shift::Morning,
            skills: HashMap::new(),
            certifications: vec![],
        });

        let next = index.cycle_skill_level("op1", "s1").unwrap();
        assert_eq!(next, SkillLevel::Novice);
    }

    #[test]
    fn test_insertion_order_is_stable() {
        let index = test_index();
        let skill_ids: Vec<&str> = index.skills().map(|s| s.id.as_str()).collect();
        assert_eq!(skill_ids, vec!["s1", "s2", "s3", "s4", "s5", "s6"]);

        let operator_ids: Vec<&str> = index.operators().map(|o| o.id.as_str()).collect();
        assert_eq!(operator_ids, vec!["op1", "op2", "op3", "op4", "op5"]);
    }

    #[test]
    fn test_from_roster_file_rejects_unknown_skill_reference() {
        let file = RosterFile {
            skills: vec![],
            operators: vec![Operator {
                id: "op1".to_string(),
                name: "Test".to_string(),
                role: "Machinist".to_string(),
                shift: Shift::Morning,
                skills: HashMap::from([("s1".to_string(), SkillLevel::Expert)]),
                certifications: vec![],
            }],
            machines: vec![],
        };

        let result = RosterIndex::from_roster_file(file);
        assert!(matches!(result, Err(RosterError::UnknownSkill { .. })));
    }

    #[test]
    fn test_roster_file_round_trip() {
        let index = test_index();
        let file = RosterFile {
            skills: index.skills().cloned().collect(),
            operators: index.operators().cloned().collect(),
            machines: index.machines().cloned().collect(),
        };

        let json = serde_json::to_string(&file).unwrap();
        let parsed: RosterFile = serde_json::from_str(&json).unwrap();
        let rebuilt = RosterIndex::from_roster_file(parsed).unwrap();

        assert_eq!(rebuilt.counts(), index.counts());
        assert_eq!(
            rebuilt.get_operator("op1").unwrap().skill_level("s1"),
            SkillLevel::Expert
        );
        assert_eq!(
            rebuilt.get_machine("m1").unwrap().required_skills.len(),
            2
        );
    }
}
