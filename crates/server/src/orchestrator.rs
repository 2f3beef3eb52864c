//! # Assignment Orchestrator
//!
//! Coordinates the recommendation path end to end:
//! 1. Resolve the machine
//! 2. Score every operator with the deterministic local scorer
//! 3. If the AI collaborator is configured, ask it for its shortlist
//! 4. Prefer the collaborator's answer when it arrives intact; otherwise
//!    degrade to the deterministic ranking, logging the cause by kind
//! 5. Rank (score descending, operator id tie-break) and truncate
//!
//! The deterministic path is always computed, so a missing credential or a
//! flaky collaborator never turns a legitimate shortlist into an empty one.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Result, anyhow};
use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use ai_client::AiClient;
use roster::{Recommendation, RosterIndex, SkillLevel};
use scoring::{DEFAULT_SHORTLIST, rank, score_roster};

/// Coordinates roster, local scorer, and the optional AI collaborator.
pub struct AssignmentOrchestrator {
    roster: Arc<RosterIndex>,
    ai: AiClient,
}

impl AssignmentOrchestrator {
    pub fn new(roster: Arc<RosterIndex>, ai: AiClient) -> Self {
        Self { roster, ai }
    }

    /// Build an orchestrator with AI configuration from the environment.
    pub fn from_env(roster: Arc<RosterIndex>) -> Self {
        Self::new(roster, AiClient::from_env())
    }

    pub fn roster(&self) -> &RosterIndex {
        &self.roster
    }

    /// Today's date; scoring and payload validity checks key off this.
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Main entry point: ranked shortlist of operators for a machine.
    ///
    /// Returns at most `limit` recommendations; fewer is normal. Unknown
    /// machine ids are an error, not an empty list.
    pub async fn recommend(&self, machine_id: &str, limit: usize) -> Result<Vec<Recommendation>> {
        let start = Instant::now();
        let machine = self
            .roster
            .get_machine(machine_id)
            .ok_or_else(|| anyhow!("Machine {machine_id} not found"))?;
        let today = self.today();

        // Always computed; this is the default path and the fallback
        let local = score_roster(machine, &self.roster, today);
        debug!(
            machine_id,
            candidates = local.len(),
            "Scored roster deterministically"
        );

        let recommendations = match self.ai_shortlist(machine_id, today).await {
            Some(ai_recs) => {
                info!(
                    machine_id,
                    count = ai_recs.len(),
                    "Using AI collaborator shortlist"
                );
                rank(ai_recs, limit)
            }
            None => rank(local.into_iter().map(Recommendation::from).collect(), limit),
        };

        info!(
            machine_id,
            count = recommendations.len(),
            elapsed = ?start.elapsed(),
            "Recommendation complete"
        );
        Ok(recommendations)
    }

    /// Shortlist with the default length of 3.
    pub async fn recommend_default(&self, machine_id: &str) -> Result<Vec<Recommendation>> {
        self.recommend(machine_id, DEFAULT_SHORTLIST).await
    }

    /// Ask the collaborator, mapping every failure to `None` with a log
    /// line that distinguishes "unavailable" from "try again".
    async fn ai_shortlist(
        &self,
        machine_id: &str,
        today: NaiveDate,
    ) -> Option<Vec<Recommendation>> {
        // Cheap pre-check so the common unconfigured case stays quiet
        if !self.ai.is_configured() {
            debug!(
                machine_id,
                "AI recommendations unavailable: no credential configured"
            );
            return None;
        }

        let machine = self.roster.get_machine(machine_id)?;
        match self
            .ai
            .recommend_operators(machine, &self.roster, today)
            .await
        {
            Ok(recs) if recs.is_empty() => {
                // The collaborator is free to return fewer than asked, but an
                // empty answer carries no information the local scorer lacks
                warn!(
                    machine_id,
                    "AI collaborator returned no recommendations, using local scoring"
                );
                None
            }
            Ok(recs) => Some(recs),
            Err(err) if err.is_unconfigured() => {
                debug!(machine_id, "AI recommendations unavailable: {err}");
                None
            }
            Err(err) => {
                warn!(
                    machine_id,
                    "AI recommendation failed, using local scoring: {err}"
                );
                None
            }
        }
    }

    /// Training-focus analysis for one operator.
    ///
    /// AI-written when the collaborator is configured and reachable,
    /// deterministic gap summary otherwise.
    pub async fn analyze(&self, operator_id: &str) -> Result<String> {
        let operator = self
            .roster
            .get_operator(operator_id)
            .ok_or_else(|| anyhow!("Operator {operator_id} not found"))?;

        if self.ai.is_configured() {
            match self.ai.analyze_operator(operator, &self.roster).await {
                Ok(text) => return Ok(text),
                Err(err) => {
                    warn!(operator_id, "AI analysis failed, using local summary: {err}");
                }
            }
        }

        Ok(self.local_analysis(operator_id))
    }

    /// Deterministic analysis: name the weakest skills worth training next.
    fn local_analysis(&self, operator_id: &str) -> String {
        let Some(operator) = self.roster.get_operator(operator_id) else {
            return String::new();
        };

        let mut gaps: Vec<(&str, SkillLevel)> = operator
            .skills
            .iter()
            .filter(|(_, level)| **level < SkillLevel::Independent)
            .map(|(skill_id, level)| (self.roster.skill_name(skill_id), *level))
            .collect();
        gaps.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));

        if gaps.is_empty() {
            return format!(
                "{} works independently across every recorded skill; focus on mentoring and cross-training others.",
                operator.name
            );
        }

        let focus: Vec<String> = gaps
            .iter()
            .take(2)
            .map(|(name, level)| format!("{name} (currently {})", level.label()))
            .collect();
        format!(
            "{} ({}) should focus training on {}.",
            operator.name,
            operator.role,
            focus.join(" and ")
        )
    }

    /// One chat turn against this orchestrator's roster.
    ///
    /// The transcript lives in the session; any collaborator failure is
    /// recorded as the fixed fallback reply, never an error, while the
    /// cause is logged by kind.
    pub async fn chat(&self, session: &mut super::CopilotSession, message: &str) -> String {
        session.send(&self.ai, &self.roster, message).await
    }
}
