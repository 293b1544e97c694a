use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coach_agent::api::state::AppState;
use coach_agent::config::AppConfig;
use coach_agent::enrich::backend::{AiBackend, OllamaBackend};
use coach_agent::enrich::TextEnricher;
use coach_agent::ingest::ingest_series;
use coach_agent::insights::player::analyze_player;
use coach_agent::insights::scenario::predict_scenario;
use coach_agent::models::{Game, ScenarioRequest, SeriesState};
use coach_agent::store::{PlayerKey, StatStore};
use coach_agent::telemetry::grid::{GridClient, GridClientConfig};

#[derive(Parser)]
#[command(name = "coach-agent")]
#[command(about = "Esports assistant coach with AI-powered insights")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Log all HTTP requests
        #[arg(long)]
        access_log: bool,
    },

    /// Derive metrics from a local series end-state JSON file
    IngestFile {
        /// Path to the end-state JSON
        path: String,

        /// Game the series belongs to
        #[arg(long, default_value = "lol")]
        game: String,

        /// Series identifier to stamp on derived records
        #[arg(long, default_value = "local-series")]
        series_id: String,

        /// Also print this player's analysis after ingesting
        #[arg(long)]
        player: Option<String>,
    },

    /// Run a scenario JSON file through the hypothetical projector
    Predict {
        /// Path to the scenario JSON
        path: String,

        /// Game the scenario belongs to
        #[arg(long, default_value = "lol")]
        game: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let mut filter_spec = cli.log_level.clone();
    if matches!(&cli.command, Commands::Serve { access_log: true, .. }) {
        filter_spec.push_str(",tower_http=debug");
    }
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&filter_spec));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting coach-agent v{}", env!("CARGO_PKG_VERSION"));

    let config_path = PathBuf::from(&cli.config);
    let config = if config_path.exists() {
        AppConfig::from_file(&config_path)?
    } else {
        tracing::warn!("Config file {} not found, using defaults", cli.config);
        AppConfig::default()
    };

    match cli.command {
        Commands::Serve { host, port, .. } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let api_key = std::env::var(&config.grid.api_key_env).unwrap_or_else(|_| {
                tracing::warn!(
                    "{} not set; upstream requests will be rejected",
                    config.grid.api_key_env
                );
                String::new()
            });

            let telemetry = GridClient::new(GridClientConfig {
                api_key,
                central_data_url: url::Url::parse(&config.grid.central_data_url)?,
                file_download_url: url::Url::parse(&config.grid.file_download_url)?,
                timeout_seconds: config.grid.timeout_seconds,
            })?;

            let state = AppState {
                store: Arc::new(StatStore::new()),
                telemetry: Arc::new(telemetry),
                enricher: Arc::new(select_enricher(&config)),
            };

            let app = coach_agent::api::build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Assistant Coach API: http://{}", addr);
            axum::serve(listener, app).await?;
        }

        Commands::IngestFile {
            path,
            game,
            series_id,
            player,
        } => {
            let game = Game::parse(&game)
                .ok_or_else(|| anyhow::anyhow!("unknown game: use lol or valorant"))?;
            let contents = std::fs::read_to_string(&path)?;
            let end_state: SeriesState = serde_json::from_str(&contents)?;

            let store = StatStore::new();
            let outcome = ingest_series(&store, game, &series_id, &end_state).await;

            println!("\n=== Ingest Results ===");
            println!("Player records:  {}", outcome.player_records);
            println!("Team records:    {}", outcome.team_records);
            println!("{}", serde_json::to_string_pretty(&outcome.insight)?);

            if let Some(name) = player {
                let history = store
                    .players
                    .window(&PlayerKey::new(game, name.clone()))
                    .await;
                match analyze_player(&name, game, &history) {
                    Some(analysis) => {
                        println!("\n=== {} ===", name);
                        println!("{}", serde_json::to_string_pretty(&analysis)?);
                    }
                    None => eprintln!("No records found for {}", name),
                }
            }
        }

        Commands::Predict { path, game } => {
            let game = Game::parse(&game)
                .ok_or_else(|| anyhow::anyhow!("unknown game: use lol or valorant"))?;
            let contents = std::fs::read_to_string(&path)?;
            let scenario: ScenarioRequest = serde_json::from_str(&contents)?;

            let prediction = predict_scenario(game, &scenario);
            println!("{}", serde_json::to_string_pretty(&prediction)?);
        }
    }

    Ok(())
}

/// Pick the commentary backend from configuration: "none" disables
/// enrichment, "anthropic" requires the remote-ai feature and a key in the
/// configured env var, anything else uses local Ollama.
fn select_enricher(config: &AppConfig) -> TextEnricher {
    match config.ai.backend.as_str() {
        "none" => {
            tracing::info!("AI commentary disabled");
            TextEnricher::disabled()
        }

        #[cfg(feature = "remote-ai")]
        "anthropic" => {
            use coach_agent::enrich::backend::AnthropicBackend;
            match AnthropicBackend::from_env(
                &config.ai.api_key_env,
                config.ai.model.clone(),
                config.ai.timeout_seconds,
            ) {
                Ok(backend) => {
                    tracing::info!("Using Anthropic backend ({})", config.ai.model);
                    TextEnricher::new(Arc::new(backend))
                }
                Err(e) => {
                    tracing::warn!("Anthropic backend unavailable ({}), disabling AI", e);
                    TextEnricher::disabled()
                }
            }
        }

        _ => {
            tracing::info!("Using Ollama backend ({})", config.ai.model);
            let backend: Arc<dyn AiBackend> = Arc::new(OllamaBackend::new(
                config.ai.base_url.clone(),
                config.ai.model.clone(),
                config.ai.timeout_seconds,
            ));
            TextEnricher::new(backend)
        }
    }
}
