//! Derived dashboard statistics.
//!
//! Pure read-side aggregations over a [`RosterIndex`]: how skill levels are
//! distributed across the matrix, average proficiency per category, and
//! which certifications are about to lapse.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::index::RosterIndex;
use crate::types::SkillCategory;

/// Count of matrix cells at each level, indexed by level 0..=4.
pub type LevelDistribution = [usize; 5];

/// One certification inside the expiry warning window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiringCertification {
    pub operator_name: String,
    pub certification_name: String,
    /// Days until expiry as of the reference date; 0 means expires today.
    pub days_left: i64,
}

/// Distribution of recorded skill levels across all operators.
///
/// Only recorded entries count; a skill an operator has never been assessed
/// on does not appear as an implicit level 0 here, matching how the matrix
/// is rendered.
pub fn skill_level_distribution(roster: &RosterIndex) -> LevelDistribution {
    let mut counts = [0usize; 5];
    for operator in roster.operators() {
        for level in operator.skills.values() {
            counts[level.as_u8() as usize] += 1;
        }
    }
    counts
}

/// Mean recorded level per skill category, in category display order.
pub fn category_averages(roster: &RosterIndex) -> Vec<(SkillCategory, f32)> {
    let mut totals: HashMap<SkillCategory, (u32, u32)> = HashMap::new();

    for operator in roster.operators() {
        for (skill_id, level) in &operator.skills {
            if let Some(skill) = roster.get_skill(skill_id) {
                let entry = totals.entry(skill.category).or_insert((0, 0));
                entry.0 += level.as_u8() as u32;
                entry.1 += 1;
            }
        }
    }

    let mut averages: Vec<(SkillCategory, f32)> = totals
        .into_iter()
        .map(|(category, (sum, count))| (category, sum as f32 / count as f32))
        .collect();
    averages.sort_by_key(|(category, _)| format!("{category}"));
    averages
}

/// Certifications expiring within `within_days` of `today`, soonest first.
///
/// Already-expired certifications are excluded; they are a validity problem,
/// not an upcoming one.
pub fn expiring_certifications(
    roster: &RosterIndex,
    today: NaiveDate,
    within_days: i64,
) -> Vec<ExpiringCertification> {
    let mut expiring = Vec::new();

    for operator in roster.operators() {
        for cert in &operator.certifications {
            let days_left = cert.days_until_expiry(today);
            if (0..=within_days).contains(&days_left) {
                expiring.push(ExpiringCertification {
                    operator_name: operator.name.clone(),
                    certification_name: cert.name.clone(),
                    days_left,
                });
            }
        }
    }

    expiring.sort_by(|a, b| {
        a.days_left
            .cmp(&b.days_left)
            .then_with(|| a.operator_name.cmp(&b.operator_name))
    });
    expiring
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_skill_level_distribution_totals_match_matrix_cells() {
        let roster = fixtures::demo();
        let distribution = skill_level_distribution(&roster);

        // 5 operators x 6 recorded skills each
        let total: usize = distribution.iter().sum();
        assert_eq!(total, 30);

        // Experts in the demo roster: op1 s1, op1 s3, op2 s3, op2 s5,
        // op3 s6, op5 s4
        assert_eq!(distribution[4], 6);
    }

    #[test]
    fn test_category_averages_cover_all_categories() {
        let roster = fixtures::demo();
        let averages = category_averages(&roster);

        assert_eq!(averages.len(), 4);
        for (_, avg) in &averages {
            assert!((0.0..=4.0).contains(avg));
        }

        // Quality is s3 alone: levels 4, 4, 2, 1, 0 -> 2.2
        let quality = averages
            .iter()
            .find(|(c, _)| *c == SkillCategory::Quality)
            .unwrap();
        assert!((quality.1 - 2.2).abs() < 0.01);
    }

    #[test]
    fn test_expiring_certifications_window() {
        let roster = fixtures::demo();

        // 30 days before the Forklift Cert expiry (2025-05-15)
        let today = NaiveDate::from_ymd_opt(2025, 4, 20).unwrap();
        let expiring = expiring_certifications(&roster, today, 30);

        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].certification_name, "Forklift Cert");
        assert_eq!(expiring[0].days_left, 25);
    }

    #[test]
    fn test_expiring_certifications_excludes_already_expired() {
        let roster = fixtures::demo();

        // All fixture certs are expired by 2026
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let expiring = expiring_certifications(&roster, today, 365);
        assert!(expiring.is_empty());
    }

    #[test]
    fn test_expiring_certifications_includes_expiry_today() {
        let roster = fixtures::demo();

        let today = NaiveDate::from_ymd_opt(2025, 5, 15).unwrap();
        let expiring = expiring_certifications(&roster, today, 30);

        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].days_left, 0);
    }
}
