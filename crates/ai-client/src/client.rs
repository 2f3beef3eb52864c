//! HTTP client for the AI collaborator.
//!
//! Three operations share one completion call: operator recommendation
//! (structured JSON out), per-operator skill analysis (free text), and the
//! chat copilot (free text). Each call is a single request-response round
//! trip with no retry, no application timeout, and no cancellation; the
//! credential check happens before any I/O.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use roster::{Machine, Operator, Recommendation, RosterIndex};

use crate::config::{AiClientConfig, API_KEY_ENV, CHAT_MAX_TOKENS, RECOMMEND_MAX_TOKENS};
use crate::error::{AiClientError, Result};
use crate::payload::{ChatContext, RecommendationPayload};

const RECOMMEND_SYSTEM_PROMPT: &str = "\
You are an expert manufacturing workforce planner. Analyze the provided \
operators and machine requirements. Rank the top 3 operators suitable for \
this machine. Consider skill levels (0-4) versus requirements and \
certification validity. Score them from 0-100 and provide a concise \
reasoning string and a list of missing skills. Respond with only a JSON \
array of objects with keys operatorId, score, reasoning, missingSkills.";

const CHAT_SYSTEM_PROMPT: &str = "\
You are the SkillMatrix copilot, an assistant for factory managers. Answer \
questions accurately based only on the plant data JSON provided below. Be \
professional, concise, and data-driven.";

/// Shape of one recommendation as the collaborator returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRecommendation {
    operator_id: String,
    score: f64,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    missing_skills: Vec<String>,
}

impl From<WireRecommendation> for Recommendation {
    fn from(wire: WireRecommendation) -> Self {
        Recommendation {
            operator_id: wire.operator_id,
            // The contract says 0-100; clamp rather than reject drift
            score: wire.score.clamp(0.0, 100.0).round() as u8,
            reasoning: wire.reasoning,
            missing_skills: wire.missing_skills,
        }
    }
}

/// Client for the hosted completion API.
pub struct AiClient {
    http: reqwest::Client,
    config: AiClientConfig,
}

impl AiClient {
    pub fn new(config: AiClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Build a client from environment configuration.
    pub fn from_env() -> Self {
        Self::new(AiClientConfig::from_env())
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// One non-streaming completion call.
    ///
    /// Returns the concatenated text blocks of the response.
    async fn complete(&self, system: &str, user: &str, max_tokens: usize) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AiClientError::MissingCredential {
                env_var: API_KEY_ENV,
            })?;

        let body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": max_tokens,
            "system": system,
            "messages": [{
                "role": "user",
                "content": user
            }]
        });

        debug!(url = %self.config.api_url, model = %self.config.model, "Calling AI service");
        let response = self
            .http
            .post(&self.config.api_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AiClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| AiClientError::MalformedResponse(e.to_string()))?;
        let text = collect_text_blocks(&json);
        if text.trim().is_empty() {
            return Err(AiClientError::MalformedResponse(
                "empty completion".to_string(),
            ));
        }
        Ok(text)
    }

    /// Ask the collaborator for a ranked shortlist for one machine.
    ///
    /// The returned list is contract-unordered; callers re-sort it.
    /// Recommendations naming operators that are not in the roster are
    /// dropped with a warning.
    pub async fn recommend_operators(
        &self,
        machine: &Machine,
        roster: &RosterIndex,
        today: NaiveDate,
    ) -> Result<Vec<Recommendation>> {
        let payload = RecommendationPayload::build(machine, roster, today);
        let payload_json = serde_json::to_string(&payload)
            .map_err(|e| AiClientError::MalformedResponse(e.to_string()))?;

        let text = self
            .complete(RECOMMEND_SYSTEM_PROMPT, &payload_json, RECOMMEND_MAX_TOKENS)
            .await?;

        let known_ids: HashSet<&str> = roster.operators().map(|op| op.id.as_str()).collect();
        let wire = parse_recommendations(&text)?;

        let recommendations = wire
            .into_iter()
            .filter(|rec| {
                let known = known_ids.contains(rec.operator_id.as_str());
                if !known {
                    warn!(
                        operator_id = %rec.operator_id,
                        "Dropping recommendation for operator not in roster"
                    );
                }
                known
            })
            .map(Recommendation::from)
            .collect();

        Ok(recommendations)
    }

    /// Short free-text training-focus analysis for one operator.
    pub async fn analyze_operator(
        &self,
        operator: &Operator,
        roster: &RosterIndex,
    ) -> Result<String> {
        let skill_list: Vec<String> = operator
            .skills
            .iter()
            .map(|(skill_id, level)| {
                format!("{}: Level {}/4", roster.skill_name(skill_id), level.as_u8())
            })
            .collect();

        let prompt = format!(
            "Analyze the skill profile for operator {}. Role: {}. Skills: {}. \
             Suggest 2 key training focus areas to advance their career to a \
             senior level. Keep it brief (max 2 sentences).",
            operator.name,
            operator.role,
            skill_list.join(", ")
        );

        self.complete(CHAT_SYSTEM_PROMPT, &prompt, CHAT_MAX_TOKENS)
            .await
    }

    /// One chat turn: free text in, free text out.
    ///
    /// The collaborator is stateless per call; it sees only the current
    /// message and the current snapshot, never prior turns.
    pub async fn chat(&self, message: &str, context: &ChatContext) -> Result<String> {
        let context_json = serde_json::to_string(context)
            .map_err(|e| AiClientError::MalformedResponse(e.to_string()))?;
        let system = format!("{CHAT_SYSTEM_PROMPT}\n\nData context: {context_json}");

        self.complete(&system, message, CHAT_MAX_TOKENS).await
    }
}

/// Concatenate the `text` content blocks of a messages-API response.
fn collect_text_blocks(response: &Value) -> String {
    let mut text = String::new();
    if let Some(blocks) = response.get("content").and_then(|c| c.as_array()) {
        for block in blocks {
            if block.get("type").and_then(|t| t.as_str()) != Some("text") {
                continue;
            }
            if let Some(chunk) = block.get("text").and_then(|t| t.as_str()) {
                text.push_str(chunk);
            }
        }
    }
    text
}

/// Parse the completion text as a JSON recommendation array.
///
/// Models often wrap JSON in markdown fences; strip them before parsing.
/// Anything that still fails to parse is a [`AiClientError::MalformedResponse`].
fn parse_recommendations(text: &str) -> Result<Vec<WireRecommendation>> {
    let trimmed = strip_code_fences(text);
    serde_json::from_str(trimmed).map_err(|e| AiClientError::MalformedResponse(e.to_string()))
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the fence line
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches(['\r', '\n'])
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster::fixtures;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    fn unconfigured_client() -> AiClient {
        AiClient::new(AiClientConfig::unconfigured())
    }

    #[tokio::test]
    async fn test_recommend_without_credential_is_distinct_error() {
        let client = unconfigured_client();
        let roster = fixtures::demo();
        let machine = roster.get_machine("m1").unwrap();

        let result = client.recommend_operators(machine, &roster, today()).await;
        match result {
            Err(err) => assert!(err.is_unconfigured()),
            Ok(_) => panic!("expected MissingCredential"),
        }
    }

    #[tokio::test]
    async fn test_chat_without_credential_is_distinct_error() {
        let client = unconfigured_client();
        let roster = fixtures::demo();
        let context = ChatContext::build(&roster, today());

        let result = client.chat("Who can run the Haas?", &context).await;
        assert!(matches!(
            result,
            Err(AiClientError::MissingCredential { .. })
        ));
    }

    #[tokio::test]
    async fn test_analyze_without_credential_is_distinct_error() {
        let client = unconfigured_client();
        let roster = fixtures::demo();
        let operator = roster.get_operator("op4").unwrap();

        let result = client.analyze_operator(operator, &roster).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().is_unconfigured());
    }

    #[test]
    fn test_parse_recommendations_plain_json() {
        let text = r#"[
            {"operatorId": "op1", "score": 92, "reasoning": "strong", "missingSkills": []},
            {"operatorId": "op4", "score": 40.5, "reasoning": "gaps", "missingSkills": ["CNC Milling"]}
        ]"#;

        let parsed = parse_recommendations(text).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].operator_id, "op1");
        assert_eq!(parsed[1].missing_skills, vec!["CNC Milling"]);
    }

    #[test]
    fn test_parse_recommendations_fenced_json() {
        let text = "```json\n[{\"operatorId\": \"op1\", \"score\": 80}]\n```";
        let parsed = parse_recommendations(text).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(parsed[0].reasoning.is_empty());
    }

    #[test]
    fn test_parse_recommendations_rejects_non_json() {
        let result = parse_recommendations("I cannot answer that.");
        assert!(matches!(
            result,
            Err(AiClientError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_wire_scores_are_clamped() {
        let wire = WireRecommendation {
            operator_id: "op1".to_string(),
            score: 250.0,
            reasoning: String::new(),
            missing_skills: vec![],
        };
        let rec = Recommendation::from(wire);
        assert_eq!(rec.score, 100);

        let wire = WireRecommendation {
            operator_id: "op1".to_string(),
            score: -3.0,
            reasoning: String::new(),
            missing_skills: vec![],
        };
        assert_eq!(Recommendation::from(wire).score, 0);
    }

    #[test]
    fn test_collect_text_blocks_skips_non_text() {
        let response = serde_json::json!({
            "content": [
                {"type": "thinking", "thinking": "..."},
                {"type": "text", "text": "hello "},
                {"type": "text", "text": "world"}
            ]
        });
        assert_eq!(collect_text_blocks(&response), "hello world");
    }
}
