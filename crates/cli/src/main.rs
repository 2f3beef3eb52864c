use std::io::{BufRead, Write as _};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;

use ai_client::{AiClient, AiClientConfig};
use roster::{RosterIndex, SkillLevel, stats};
use scoring::DEFAULT_SHORTLIST;
use server::{AssignmentOrchestrator, CopilotSession};

/// SkillMatrix - workforce skill tracking and operator assignment
#[derive(Parser)]
#[command(name = "skill-matrix")]
#[command(about = "Skill matrix, dashboards, and AI-assisted operator assignment", long_about = None)]
struct Cli {
    /// Path to a roster JSON file; omit to use the built-in demo roster
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Skip the AI collaborator even when a credential is configured
    #[arg(long)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plant overview: level distribution, category averages, expiring certs
    Dashboard,

    /// Print the operator x skill matrix
    Matrix,

    /// Ranked operator shortlist for a machine
    Recommend {
        /// Machine id to staff
        #[arg(long)]
        machine_id: String,

        /// Shortlist length
        #[arg(long, default_value_t = DEFAULT_SHORTLIST)]
        limit: usize,
    },

    /// Set one operator's level on one skill
    SetSkill {
        #[arg(long)]
        operator_id: String,

        #[arg(long)]
        skill_id: String,

        /// Target level, 0-4
        #[arg(long)]
        level: u8,
    },

    /// Advance one skill cell by a single level (4 wraps to 0)
    CycleSkill {
        #[arg(long)]
        operator_id: String,

        #[arg(long)]
        skill_id: String,
    },

    /// Training-focus analysis for one operator
    Analyze {
        #[arg(long)]
        operator_id: String,
    },

    /// Interactive copilot chat
    Chat,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut index = match &cli.data {
        Some(path) => RosterIndex::load_from_file(path)
            .with_context(|| format!("Failed to load roster from {}", path.display()))?,
        None => roster::fixtures::demo(),
    };

    let ai = if cli.offline {
        AiClient::new(AiClientConfig::unconfigured())
    } else {
        AiClient::from_env()
    };

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Dashboard => handle_dashboard(&index),
        Commands::Matrix => handle_matrix(&index),
        Commands::Recommend { machine_id, limit } => {
            handle_recommend(Arc::new(index), ai, &machine_id, limit).await?
        }
        Commands::SetSkill {
            operator_id,
            skill_id,
            level,
        } => handle_set_skill(&mut index, &operator_id, &skill_id, level)?,
        Commands::CycleSkill {
            operator_id,
            skill_id,
        } => handle_cycle_skill(&mut index, &operator_id, &skill_id)?,
        Commands::Analyze { operator_id } => {
            handle_analyze(Arc::new(index), ai, &operator_id).await?
        }
        Commands::Chat => handle_chat(Arc::new(index), ai).await?,
    }

    Ok(())
}

/// Handle the 'dashboard' command
fn handle_dashboard(index: &RosterIndex) {
    let (skills, operators, machines) = index.counts();
    println!(
        "{}",
        format!("Plant overview: {operators} operators, {skills} skills, {machines} machines")
            .bold()
    );

    println!("\n{}", "Skill level distribution".bold().blue());
    let distribution = stats::skill_level_distribution(index);
    for (level, count) in distribution.iter().enumerate() {
        let label = SkillLevel::from_u8(level as u8).map(|l| l.label()).unwrap_or("?");
        println!("  L{level} {:12} {}", label, "#".repeat(*count).green());
    }

    println!("\n{}", "Category averages".bold().blue());
    for (category, avg) in stats::category_averages(index) {
        println!("  {:10} {avg:.1} / 4.0", category.to_string());
    }

    println!("\n{}", "Certifications expiring within 60 days".bold().blue());
    let expiring = stats::expiring_certifications(index, Utc::now().date_naive(), 60);
    if expiring.is_empty() {
        println!("  none");
    }
    for entry in expiring {
        println!(
            "  {} - {} ({} days left)",
            entry.operator_name,
            entry.certification_name.yellow(),
            entry.days_left
        );
    }
}

/// Handle the 'matrix' command
fn handle_matrix(index: &RosterIndex) {
    let skills: Vec<_> = index.skills().collect();

    print!("{:22}", "");
    for skill in &skills {
        print!("{:>14}", skill.name.chars().take(13).collect::<String>());
    }
    println!();

    for operator in index.operators() {
        print!("{:22}", format!("{} ({})", operator.name, operator.id).bold());
        for skill in &skills {
            let level = operator.skill_level(&skill.id);
            let cell = format!("{level}");
            let colored_cell = match level {
                SkillLevel::Expert | SkillLevel::Independent => cell.green(),
                SkillLevel::Supervised => cell.yellow(),
                _ => cell.red(),
            };
            print!("{:>14}", colored_cell);
        }
        println!();
    }
}

/// Handle the 'recommend' command
async fn handle_recommend(
    index: Arc<RosterIndex>,
    ai: AiClient,
    machine_id: &str,
    limit: usize,
) -> Result<()> {
    let machine = index
        .get_machine(machine_id)
        .ok_or_else(|| anyhow!("Machine {machine_id} not found"))?;
    println!(
        "{}",
        format!("Shortlist for {} ({}, {})", machine.name, machine.machine_type, machine.status)
            .bold()
    );

    let orchestrator = AssignmentOrchestrator::new(index.clone(), ai);
    let recommendations = orchestrator.recommend(machine_id, limit).await?;

    if recommendations.is_empty() {
        println!("{}", "No operators in roster".yellow());
        return Ok(());
    }

    for (i, rec) in recommendations.iter().enumerate() {
        let name = index
            .get_operator(&rec.operator_id)
            .map(|op| op.name.as_str())
            .unwrap_or(rec.operator_id.as_str());
        println!(
            "{} {} {}",
            format!("{}.", i + 1).bold(),
            name.green(),
            format!("(score {})", rec.score).bold()
        );
        println!("   {}", rec.reasoning);
        if !rec.missing_skills.is_empty() {
            println!("   Missing: {}", rec.missing_skills.join(", ").red());
        }
    }
    Ok(())
}

/// Handle the 'set-skill' command
fn handle_set_skill(
    index: &mut RosterIndex,
    operator_id: &str,
    skill_id: &str,
    level: u8,
) -> Result<()> {
    let level = SkillLevel::from_u8(level)
        .ok_or_else(|| anyhow!("Level must be in 0..=4, got {level}"))?;

    index.set_skill_level(operator_id, skill_id, level)?;

    let operator = index.get_operator(operator_id).expect("just mutated");
    println!(
        "{} {} on {} is now {} ({})",
        "✓".green(),
        operator.name.bold(),
        index.skill_name(skill_id),
        level,
        level.label()
    );
    Ok(())
}

/// Handle the 'cycle-skill' command
fn handle_cycle_skill(index: &mut RosterIndex, operator_id: &str, skill_id: &str) -> Result<()> {
    let next = index.cycle_skill_level(operator_id, skill_id)?;

    let operator = index.get_operator(operator_id).expect("just mutated");
    println!(
        "{} {} on {} cycled to {} ({})",
        "✓".green(),
        operator.name.bold(),
        index.skill_name(skill_id),
        next,
        next.label()
    );
    Ok(())
}

/// Handle the 'analyze' command
async fn handle_analyze(index: Arc<RosterIndex>, ai: AiClient, operator_id: &str) -> Result<()> {
    let orchestrator = AssignmentOrchestrator::new(index, ai);
    let analysis = orchestrator.analyze(operator_id).await?;
    println!("{analysis}");
    Ok(())
}

/// Handle the 'chat' command: interactive loop until EOF or "quit"
async fn handle_chat(index: Arc<RosterIndex>, ai: AiClient) -> Result<()> {
    if !ai.is_configured() {
        println!(
            "{}",
            "Copilot is unavailable: no API credential configured. Replies will be a fixed fallback."
                .yellow()
        );
    }

    let orchestrator = AssignmentOrchestrator::new(index, ai);
    let mut session = CopilotSession::new();
    println!("{}", session.transcript()[0].text.blue());

    let stdin = std::io::stdin();
    loop {
        print!("{} ", ">".bold());
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("quit") || message.eq_ignore_ascii_case("exit") {
            break;
        }

        let reply = orchestrator.chat(&mut session, message).await;
        println!("{}", reply.blue());
    }

    Ok(())
}
