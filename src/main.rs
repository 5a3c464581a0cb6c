use anyhow::Result;
use clap::Parser;
use researchgpt_server::api::{self, AppState};
use researchgpt_server::config::{get_config, load_config};
use researchgpt_server::llm::MockLanguageModel;
use researchgpt_server::services::{PaperService, PlannerService};
use researchgpt_server::sources::{ScholarSource, SemanticScholarSource, SyntheticSource};
use researchgpt_server::store::{MemoryPlanStore, MemorySessionStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// ResearchGPT Server - research plan generation, plan-scoped chat and paper gap analysis
#[derive(Parser, Debug)]
#[command(name = "researchgpt-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Research assistant backend serving plans, chat and paper analysis", long_about = None)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind address (overrides configuration)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides configuration)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("researchgpt_server={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from file if specified, otherwise from the environment
    let mut config = if let Some(config_path) = &cli.config {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(config_path)?
    } else {
        get_config()
    };

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    // The mock is the only language model backend currently wired up
    if config.llm.use_remote {
        tracing::warn!("Remote language model backend requested but not available, using mock");
    }
    tracing::info!(
        model_path = %config.llm.model_path.display(),
        use_remote = config.llm.use_remote,
        "Language model configured"
    );
    let model = Arc::new(MockLanguageModel::new());

    let planner = Arc::new(PlannerService::new(
        Arc::new(MemoryPlanStore::new()),
        Arc::new(MemorySessionStore::new()),
        model,
    ));

    let external: Arc<dyn ScholarSource> = match &config.papers.api_base {
        Some(base) => Arc::new(SemanticScholarSource::with_api_base(
            base,
            config.papers.api_key.clone(),
        )),
        None => Arc::new(SemanticScholarSource::new(config.papers.api_key.clone())),
    };
    let papers = Arc::new(PaperService::new(
        Some(external),
        Arc::new(SyntheticSource::new()),
    ));

    let app = api::router(AppState::new(planner, papers));

    let listener = tokio::net::TcpListener::bind(config.server.address()).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
