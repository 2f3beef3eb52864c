//! Simple test harness for the assignment orchestrator.
//!
//! Runs the demo roster end to end: shortlist for every machine, plus one
//! copilot turn. Works fully offline; set SKILLMATRIX_API_KEY to exercise
//! the AI path.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use roster::fixtures;
use server::{AssignmentOrchestrator, CopilotSession};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,scoring=debug,ai_client=debug")
        .init();

    info!("Starting SkillMatrix test harness");

    let roster = Arc::new(fixtures::demo());
    let (skills, operators, machines) = roster.counts();
    info!(skills, operators, machines, "Demo roster loaded");

    let orchestrator = AssignmentOrchestrator::from_env(roster.clone());

    let machine_ids: Vec<String> = roster.machines().map(|m| m.id.clone()).collect();
    for machine_id in machine_ids {
        let machine = roster.get_machine(&machine_id).unwrap();
        info!("Shortlist for {} ({}):", machine.name, machine.machine_type);

        let recommendations = orchestrator.recommend_default(&machine_id).await?;
        for (i, rec) in recommendations.iter().enumerate() {
            let name = roster
                .get_operator(&rec.operator_id)
                .map(|op| op.name.as_str())
                .unwrap_or(rec.operator_id.as_str());
            info!("  {}. {} - score {}", i + 1, name, rec.score);
            info!("     {}", rec.reasoning);
            if !rec.missing_skills.is_empty() {
                info!("     Missing: {}", rec.missing_skills.join(", "));
            }
        }
    }

    let mut session = CopilotSession::new();
    let reply = orchestrator
        .chat(&mut session, "Which certifications expire soonest?")
        .await;
    info!("Copilot: {reply}");

    Ok(())
}
