//! Built-in demo roster.
//!
//! A small machining plant: six skills, four machines, five operators.
//! Everything is created once at process start; there is no persistence.
//!
//! Note that op1's OSHA 30 certification is past its expiry date while its
//! stored flag still says valid. That is deliberate: validity is derived
//! from the expiry date at read time, and this entry keeps the stale-flag
//! path exercised.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::index::RosterIndex;
use crate::types::{
    Certification, Machine, MachineStatus, Operator, Shift, Skill, SkillCategory, SkillLevel,
    SkillRequirement,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // Fixture dates are compile-time constants; invalid ones are a bug here.
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

fn skill(id: &str, name: &str, category: SkillCategory, description: &str) -> Skill {
    Skill {
        id: id.to_string(),
        name: name.to_string(),
        category,
        description: description.to_string(),
    }
}

fn requirement(skill_id: &str, min_level: SkillLevel) -> SkillRequirement {
    SkillRequirement {
        skill_id: skill_id.to_string(),
        min_level,
    }
}

fn skill_map(entries: &[(&str, u8)]) -> HashMap<String, SkillLevel> {
    entries
        .iter()
        .map(|(id, level)| {
            (
                id.to_string(),
                SkillLevel::from_u8(*level).expect("valid fixture level"),
            )
        })
        .collect()
}

/// Build the demo roster index.
pub fn demo() -> RosterIndex {
    let mut index = RosterIndex::new();

    index.insert_skill(skill(
        "s1",
        "CNC Milling",
        SkillCategory::Machine,
        "Operate 3-axis CNC mill",
    ));
    index.insert_skill(skill(
        "s2",
        "Lathe Ops",
        SkillCategory::Machine,
        "Manual lathe operation",
    ));
    index.insert_skill(skill(
        "s3",
        "QC Inspection",
        SkillCategory::Quality,
        "Use calipers and micrometers",
    ));
    index.insert_skill(skill(
        "s4",
        "Forklift",
        SkillCategory::Safety,
        "Standard forklift license",
    ));
    index.insert_skill(skill(
        "s5",
        "Assembly",
        SkillCategory::Process,
        "Manual assembly line",
    ));
    index.insert_skill(skill(
        "s6",
        "Welding TIG",
        SkillCategory::Process,
        "TIG welding for aluminum",
    ));

    index.insert_machine(Machine {
        id: "m1".to_string(),
        name: "Haas VF-2".to_string(),
        machine_type: "CNC Mill".to_string(),
        status: MachineStatus::Operational,
        required_skills: vec![
            requirement("s1", SkillLevel::Independent),
            requirement("s3", SkillLevel::Supervised),
        ],
    });
    index.insert_machine(Machine {
        id: "m2".to_string(),
        name: "Doosan Puma".to_string(),
        machine_type: "Lathe".to_string(),
        status: MachineStatus::Operational,
        required_skills: vec![
            requirement("s2", SkillLevel::Independent),
            requirement("s3", SkillLevel::Supervised),
        ],
    });
    index.insert_machine(Machine {
        id: "m3".to_string(),
        name: "Assembly Line A".to_string(),
        machine_type: "Assembly".to_string(),
        status: MachineStatus::Operational,
        required_skills: vec![requirement("s5", SkillLevel::Supervised)],
    });
    index.insert_machine(Machine {
        id: "m4".to_string(),
        name: "Warehouse Loader".to_string(),
        machine_type: "Logistics".to_string(),
        status: MachineStatus::Operational,
        required_skills: vec![requirement("s4", SkillLevel::Expert)],
    });

    index.insert_operator(Operator {
        id: "op1".to_string(),
        name: "John Doe".to_string(),
        role: "Senior Machinist".to_string(),
        shift: Shift::Morning,
        skills: skill_map(&[
            ("s1", 4),
            ("s2", 3),
            ("s3", 4),
            ("s4", 2),
            ("s5", 1),
            ("s6", 0),
        ]),
        certifications: vec![Certification {
            id: "c1".to_string(),
            name: "OSHA 30".to_string(),
            issued_date: date(2023, 1, 1),
            expiry_date: date(2025, 1, 1),
            is_valid: true,
        }],
    });
    index.insert_operator(Operator {
        id: "op2".to_string(),
        name: "Jane Smith".to_string(),
        role: "Line Lead".to_string(),
        shift: Shift::Morning,
        skills: skill_map(&[
            ("s1", 1),
            ("s2", 1),
            ("s3", 4),
            ("s4", 0),
            ("s5", 4),
            ("s6", 0),
        ]),
        certifications: vec![],
    });
    index.insert_operator(Operator {
        id: "op3".to_string(),
        name: "Mike Johnson".to_string(),
        role: "Welder".to_string(),
        shift: Shift::Evening,
        skills: skill_map(&[
            ("s1", 0),
            ("s2", 0),
            ("s3", 2),
            ("s4", 3),
            ("s5", 2),
            ("s6", 4),
        ]),
        certifications: vec![Certification {
            id: "c2".to_string(),
            name: "AWS D1.1".to_string(),
            issued_date: date(2023, 6, 1),
            expiry_date: date(2024, 6, 1),
            is_valid: true,
        }],
    });
    index.insert_operator(Operator {
        id: "op4".to_string(),
        name: "Sarah Lee".to_string(),
        role: "Apprentice".to_string(),
        shift: Shift::Evening,
        skills: skill_map(&[
            ("s1", 2),
            ("s2", 1),
            ("s3", 1),
            ("s4", 0),
            ("s5", 2),
            ("s6", 0),
        ]),
        certifications: vec![],
    });
    index.insert_operator(Operator {
        id: "op5".to_string(),
        name: "Chris Evans".to_string(),
        role: "Logistics Lead".to_string(),
        shift: Shift::Night,
        skills: skill_map(&[
            ("s1", 0),
            ("s2", 0),
            ("s3", 0),
            ("s4", 4),
            ("s5", 1),
            ("s6", 0),
        ]),
        certifications: vec![Certification {
            id: "c3".to_string(),
            name: "Forklift Cert".to_string(),
            issued_date: date(2022, 5, 15),
            expiry_date: date(2025, 5, 15),
            is_valid: true,
        }],
    });

    index
}
