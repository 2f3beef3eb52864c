//! Deterministic operator-to-machine suitability scoring.
//!
//! Deciding who should run which machine is a local, testable function:
//! weighted gap-distance over required-vs-actual skill levels, with a
//! surplus bonus for headroom and a penalty for expired certifications.
//! The external collaborator is an optional enhancement layered on top by
//! the orchestrator; this scorer is the default and the fallback.

use chrono::NaiveDate;
use tracing::debug;

use roster::{Machine, Operator, OperatorId, Recommendation, RosterIndex};

/// Extra points per level of headroom above a requirement, and its cap.
const SURPLUS_BONUS_PER_LEVEL: f32 = 2.0;
const SURPLUS_BONUS_CAP: f32 = 10.0;

/// Penalty per expired certification, and its cap.
const EXPIRED_CERT_PENALTY: f32 = 5.0;
const EXPIRED_CERT_PENALTY_CAP: f32 = 15.0;

/// Result of scoring one operator against one machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredOperator {
    pub operator_id: OperatorId,
    /// Suitability in 0..=100.
    pub score: u8,
    pub reasoning: String,
    /// Display names of required skills the operator is below minimum on.
    pub missing_skills: Vec<String>,
}

impl From<ScoredOperator> for Recommendation {
    fn from(scored: ScoredOperator) -> Self {
        Recommendation {
            operator_id: scored.operator_id,
            score: scored.score,
            reasoning: scored.reasoning,
            missing_skills: scored.missing_skills,
        }
    }
}

/// Score one operator against one machine.
///
/// ## Algorithm
/// 1. Per requirement, satisfaction = min(actual, min) / min (1.0 when the
///    minimum is zero). A requirement with actual < min contributes the
///    skill name to the missing list.
/// 2. Base score = mean satisfaction x 100. A machine with no requirements
///    trivially qualifies every operator at base 100.
/// 3. Fully-qualified operators earn a surplus bonus for levels above the
///    minimums, capped; operators with gaps earn none.
/// 4. Each certification expired as of `today` costs a penalty, capped.
///    Validity is derived from the expiry date, never the stored flag.
/// 5. Clamp to [0, 100] and round to the nearest integer.
pub fn score_operator(
    machine: &Machine,
    operator: &Operator,
    roster: &RosterIndex,
    today: NaiveDate,
) -> ScoredOperator {
    let requirements = &machine.required_skills;

    let mut satisfaction_sum = 0.0f32;
    let mut surplus_levels = 0u32;
    let mut missing_skills = Vec::new();
    let mut met = 0usize;

    for req in requirements {
        let actual = operator.skill_level(&req.skill_id).as_u8() as f32;
        let min = req.min_level.as_u8() as f32;

        if min == 0.0 {
            satisfaction_sum += 1.0;
            met += 1;
            continue;
        }

        satisfaction_sum += (actual / min).min(1.0);
        if actual >= min {
            met += 1;
            surplus_levels += (actual - min) as u32;
        } else {
            missing_skills.push(roster.skill_name(&req.skill_id).to_string());
        }
    }

    let base = if requirements.is_empty() {
        100.0
    } else {
        satisfaction_sum / requirements.len() as f32 * 100.0
    };

    let bonus = if missing_skills.is_empty() {
        (surplus_levels as f32 * SURPLUS_BONUS_PER_LEVEL).min(SURPLUS_BONUS_CAP)
    } else {
        0.0
    };

    let expired_certs = operator
        .certifications
        .iter()
        .filter(|cert| !cert.is_valid_on(today))
        .count();
    let penalty = (expired_certs as f32 * EXPIRED_CERT_PENALTY).min(EXPIRED_CERT_PENALTY_CAP);

    let score = (base + bonus - penalty).clamp(0.0, 100.0).round() as u8;

    let reasoning = build_reasoning(
        operator,
        requirements.len(),
        met,
        &missing_skills,
        surplus_levels,
        expired_certs,
    );

    debug!(
        machine_id = %machine.id,
        operator_id = %operator.id,
        score,
        met,
        missing = missing_skills.len(),
        expired_certs,
        "Scored operator"
    );

    ScoredOperator {
        operator_id: operator.id.clone(),
        score,
        reasoning,
        missing_skills,
    }
}

/// Score every operator in the roster against one machine.
///
/// The returned list is unordered; callers rank it with [`crate::rank`].
pub fn score_roster(
    machine: &Machine,
    roster: &RosterIndex,
    today: NaiveDate,
) -> Vec<ScoredOperator> {
    roster
        .operators()
        .map(|operator| score_operator(machine, operator, roster, today))
        .collect()
}

fn build_reasoning(
    operator: &Operator,
    total: usize,
    met: usize,
    missing: &[String],
    surplus_levels: u32,
    expired_certs: usize,
) -> String {
    let mut parts = vec![format!("{} meets {met}/{total} requirements", operator.name)];

    if !missing.is_empty() {
        parts.push(format!("below minimum on {}", missing.join(", ")));
    } else if surplus_levels > 0 {
        parts.push(format!(
            "{surplus_levels} level{} of headroom above the minimums",
            if surplus_levels == 1 { "" } else { "s" }
        ));
    }

    if expired_certs > 0 {
        parts.push(format!(
            "{expired_certs} expired certification{}",
            if expired_certs == 1 { "" } else { "s" }
        ));
    }

    parts.join("; ")
}
