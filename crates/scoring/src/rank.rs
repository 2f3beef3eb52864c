//! Ranking of scored operators.
//!
//! Scored lists arrive unordered, whether they came from the local scorer
//! or the external collaborator. Ranking is total and deterministic: score
//! descending, then operator id ascending so equal scores never shuffle
//! between runs.

use roster::Recommendation;

use crate::score::ScoredOperator;

/// Default shortlist length for a machine.
pub const DEFAULT_SHORTLIST: usize = 3;

/// Anything with a score and an operator id can be ranked.
pub trait Ranked {
    fn score(&self) -> u8;
    fn operator_id(&self) -> &str;
}

impl Ranked for ScoredOperator {
    fn score(&self) -> u8 {
        self.score
    }

    fn operator_id(&self) -> &str {
        &self.operator_id
    }
}

impl Ranked for Recommendation {
    fn score(&self) -> u8 {
        self.score
    }

    fn operator_id(&self) -> &str {
        &self.operator_id
    }
}

/// Sort by descending score with the id tie-break and keep the top `limit`.
///
/// Returning fewer than `limit` entries is normal, not an error.
pub fn rank<T: Ranked>(mut scored: Vec<T>, limit: usize) -> Vec<T> {
    scored.sort_by(|a, b| {
        b.score()
            .cmp(&a.score())
            .then_with(|| a.operator_id().cmp(b.operator_id()))
    });
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(operator_id: &str, score: u8) -> ScoredOperator {
        ScoredOperator {
            operator_id: operator_id.to_string(),
            score,
            reasoning: String::new(),
            missing_skills: vec![],
        }
    }

    #[test]
    fn test_rank_sorts_by_score_descending() {
        let ranked = rank(
            vec![scored("op1", 40), scored("op2", 90), scored("op3", 70)],
            10,
        );

        let ids: Vec<&str> = ranked.iter().map(|s| s.operator_id.as_str()).collect();
        assert_eq!(ids, vec!["op2", "op3", "op1"]);
    }

    #[test]
    fn test_rank_breaks_ties_by_operator_id() {
        let ranked = rank(
            vec![scored("op3", 80), scored("op1", 80), scored("op2", 80)],
            10,
        );

        let ids: Vec<&str> = ranked.iter().map(|s| s.operator_id.as_str()).collect();
        assert_eq!(ids, vec!["op1", "op2", "op3"]);
    }

    #[test]
    fn test_rank_truncates_to_limit() {
        let ranked = rank(
            vec![
                scored("op1", 10),
                scored("op2", 20),
                scored("op3", 30),
                scored("op4", 40),
            ],
            DEFAULT_SHORTLIST,
        );

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].operator_id, "op4");
    }

    #[test]
    fn test_rank_accepts_fewer_than_limit() {
        let ranked = rank(vec![scored("op1", 50)], DEFAULT_SHORTLIST);
        assert_eq!(ranked.len(), 1);

        let empty: Vec<ScoredOperator> = rank(vec![], DEFAULT_SHORTLIST);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_rank_works_on_recommendations() {
        let recs = vec![
            Recommendation {
                operator_id: "op2".to_string(),
                score: 60,
                reasoning: String::new(),
                missing_skills: vec![],
            },
            Recommendation {
                operator_id: "op1".to_string(),
                score: 95,
                reasoning: String::new(),
                missing_skills: vec![],
            },
        ];

        let ranked = rank(recs, 10);
        assert_eq!(ranked[0].operator_id, "op1");
    }
}
