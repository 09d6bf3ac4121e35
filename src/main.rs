use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use tacticore::analysis::{analyze_key_event, compute_match_patterns, generate_tactical_narrative};
use tacticore::events::{EventStore, MatchEvent};
use tacticore::llm::report::{render_report, CoachReportGenerator, Sport};
use tacticore::Config;

#[derive(Parser)]
#[command(name = "tacticore")]
#[command(version, about = "Match event analysis and coaching recommendations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to tacticore.toml or the environment)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List matches with their score and event counts
    Matches,
    /// Show the timeline of a match
    Events {
        #[arg(long)]
        match_id: i64,
    },
    /// Split responsibility for a key event
    Analyze {
        #[arg(long)]
        match_id: i64,
        /// Position of the event among the match's key events (1-based)
        #[arg(long, conflicts_with = "event_type")]
        index: Option<usize>,
        /// Event type for a manually annotated action (GOAL, SHOT, TURNOVER)
        #[arg(long = "type")]
        event_type: Option<String>,
        #[arg(long, default_value_t = 0)]
        minute: i32,
        #[arg(long, default_value_t = 0)]
        second: i32,
        #[arg(long, default_value = "")]
        phase: String,
        #[arg(long, default_value_t = 50.0)]
        x: f64,
        #[arg(long, default_value_t = 50.0)]
        y: f64,
        #[arg(long, default_value = "")]
        team: String,
        #[arg(long, default_value = "")]
        player: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Aggregate the events of a match into patterns and insights
    Patterns {
        #[arg(long)]
        match_id: i64,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ask the LLM for a coaching report
    Report {
        /// football or pickleball
        #[arg(long)]
        sport: Option<Sport>,
        /// JSON file with match statistics
        #[arg(long, conflicts_with = "match_id")]
        stats: Option<PathBuf>,
        /// Build the statistics from this match's events instead
        #[arg(long)]
        match_id: Option<i64>,
        /// Print the raw report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Store a video clip for a match
    StoreClip {
        #[arg(long)]
        match_id: i64,
        #[arg(long)]
        file: PathBuf,
    },
    /// Serve the JSON API (requires the `api` feature)
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("tacticore=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = config.validate() {
        warn!("Configuration problem: {}", e);
    }
    debug!("{}", config.summary());

    match cli.command {
        Commands::Matches => {
            let store = load_store(&config)?;
            if store.matches().is_empty() {
                info!("📭 No matches found");
            }
            for info in store.matches() {
                let overview = store.overview(info.match_id)?;
                println!(
                    "[{}] {} ({} events, {} goals)",
                    info.match_id, overview.label, overview.event_count, overview.goal_count
                );
            }
        }

        Commands::Events { match_id } => {
            let store = load_store(&config)?;
            let info = store.match_info(match_id)?;
            println!("{}", info.label());
            for event in store.events_for_match(match_id) {
                println!("  {}  [{}] {}", event.timeline_label(), event.phase, event.description);
            }
        }

        Commands::Analyze {
            match_id,
            index,
            event_type,
            minute,
            second,
            phase,
            x,
            y,
            team,
            player,
            json,
        } => {
            let store = load_store(&config)?;
            store.match_info(match_id)?;

            let event = match (index, event_type) {
                (Some(index), _) => {
                    let key_events = store.key_events(match_id);
                    index
                        .checked_sub(1)
                        .and_then(|i| key_events.get(i).cloned())
                        .ok_or_else(|| {
                            anyhow!(
                                "Key event {} not found, match {} has {} key events",
                                index,
                                match_id,
                                key_events.len()
                            )
                        })?
                }
                (None, Some(event_type)) => MatchEvent::new(match_id, event_type)
                    .with_time(minute, second)
                    .with_phase(phase)
                    .with_position(x, y)
                    .with_actor(team, player)
                    .with_description("Manual annotation"),
                (None, None) => {
                    for (i, event) in store.key_events(match_id).iter().enumerate() {
                        println!("  {:>2}. {}", i + 1, event.timeline_label());
                    }
                    return Err(anyhow!("Pick a key event with --index or annotate one with --type"));
                }
            };

            let result = analyze_key_event(&event, store.events_for_match(match_id));
            let narrative = generate_tactical_narrative(&result, &event);

            if json {
                let output = serde_json::json!({ "event": event, "result": result, "narrative": narrative });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}\n", narrative);
                println!("Individual: {:>3} %", result.individual);
                println!("Collective: {:>3} %", result.collective);
                println!("Tactical:   {:>3} %", result.tactical);
                println!("Confidence: {}\n", result.confidence);
                println!("{}\n", result.explanation);
                println!("Recommendations:");
                for (i, rec) in result.recommendations.iter().enumerate() {
                    println!("  {}. {}", i + 1, rec);
                }
            }
        }

        Commands::Patterns { match_id, json } => {
            let store = load_store(&config)?;
            let info = store.match_info(match_id)?;
            let summary = compute_match_patterns(store.events_for_match(match_id));

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", info.label());
                println!(
                    "Events: {}  Goals: {}  Shots: {}  Turnovers: {}",
                    summary.total_events, summary.total_goals, summary.total_shots, summary.total_turnovers
                );
                println!("\nBy phase:");
                for (phase, count) in &summary.phase_distribution {
                    println!("  {:<20} {}", phase, count);
                }
                println!("\nBy zone:");
                for (zone, count) in &summary.zone_distribution {
                    println!("  {:<20} {}", zone.label(), count);
                }
                println!("\nTransition risk ratio: {:.2}", summary.transition_risk_ratio);
                println!("\nInsights:");
                for insight in &summary.insights {
                    println!("  • {}", insight);
                }
                println!("\nPriority level: {}", summary.priority_level);
            }
        }

        Commands::Report {
            sport,
            stats,
            match_id,
            json,
        } => {
            let sport = sport.unwrap_or(config.reports.default_sport);
            let match_stats = match (stats, match_id) {
                (Some(path), _) => {
                    let raw = tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    serde_json::from_str(&raw)
                        .with_context(|| format!("{} is not valid JSON", path.display()))?
                }
                (None, Some(match_id)) => {
                    let store = load_store(&config)?;
                    let overview = store.overview(match_id)?;
                    let patterns = compute_match_patterns(store.events_for_match(match_id));
                    serde_json::json!({ "match": overview, "patterns": patterns })
                }
                (None, None) => return Err(anyhow!("Provide match statistics with --stats or --match-id")),
            };

            let profile = config.reports.load_profile(sport).await?;
            let generator = CoachReportGenerator::from_config(&config.llm, profile)?;
            let report = generator.generate(&match_stats).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render_report(&report, generator.profile()));
            }
        }

        Commands::StoreClip { match_id, file } => {
            let store = load_store(&config)?;
            store.match_info(match_id)?;

            let name = file
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow!("Invalid clip path: {}", file.display()))?;
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let path = config.data.clip_store().save(match_id, name, &bytes).await?;
            println!("{}", path.display());
        }

        Commands::Serve { port } => {
            let mut config = config;
            if let Some(port) = port {
                config.api.port = port;
            }
            serve(config).await?;
        }
    }

    Ok(())
}

#[cfg(feature = "api")]
async fn serve(config: Config) -> Result<()> {
    use std::sync::Arc;

    let store = Arc::new(load_store(&config)?);
    tacticore::api::ApiServer::new(store, Arc::new(config)).start().await
}

#[cfg(not(feature = "api"))]
async fn serve(_config: Config) -> Result<()> {
    Err(anyhow!("tacticore was built without the `api` feature"))
}

fn load_store(config: &Config) -> Result<EventStore> {
    EventStore::load(&config.data.events_file, &config.data.matches_file).with_context(|| {
        format!(
            "Failed to load event tables ({}, {})",
            config.data.events_file.display(),
            config.data.matches_file.display()
        )
    })
}
