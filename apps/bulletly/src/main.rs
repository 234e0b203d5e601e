mod assessment;
mod cli;
mod config;
mod errors;
mod files;
mod interactive;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::pipeline::assess_bullet;
use crate::assessment::suggestions::{build_generator, ModelSettings};
use crate::cli::{Cli, Commands, RewriteArgs};
use crate::config::Config;
use crate::llm_client::{CompletionClient, GroqClient};
use crate::render::{render, OutputFormat};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first
    let config = Config::from_env()?;

    // Logs go to stderr so stdout stays clean for rendered output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let completion = build_completion_client(&config);

    match cli.command {
        Commands::Assess {
            bullets,
            file,
            format,
            save,
            rewrite,
        } => run_assess(bullets, file, format, save, &rewrite, completion).await,
        Commands::Interactive { rewrite } => run_interactive(&rewrite, completion).await,
        Commands::Serve { port, model } => {
            run_serve(&config, port, model.model_settings(), completion).await
        }
    }
}

/// `None` only when the HTTP client itself cannot be built; a missing key is
/// reported per call and handled by the offline fallback.
fn build_completion_client(config: &Config) -> Option<Arc<dyn CompletionClient>> {
    match GroqClient::new(config.groq_api_key.clone(), config.groq_api_url.clone()) {
        Ok(client) => {
            if config.groq_api_key.is_none() {
                info!("GROQ_API_KEY not set; suggestions will use offline templates");
            }
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!("Completion client unavailable, running offline: {e}");
            None
        }
    }
}

async fn run_assess(
    bullets: Vec<String>,
    file: Option<PathBuf>,
    format: OutputFormat,
    save: Option<PathBuf>,
    rewrite: &RewriteArgs,
    completion: Option<Arc<dyn CompletionClient>>,
) -> Result<()> {
    let bullets = match file {
        Some(path) => files::read_bullets_from_file(&path)?,
        None => bullets,
    };

    let options = rewrite.assess_options();
    let generator = build_generator(rewrite.dry_run, completion, rewrite.model_settings());

    let mut results = Vec::new();
    for bullet in &bullets {
        let feedback = match assess_bullet(bullet, &options, generator.as_ref()).await {
            Ok(feedback) => feedback,
            Err(e) => {
                println!("Validation error: {e}");
                continue;
            }
        };
        println!("{}", render(&feedback, format).context("Failed to render feedback")?);
        results.push(feedback);
    }

    if let Some(path) = save {
        files::save_json(&path, &results)?;
        info!("Saved {} results to {}", results.len(), path.display());
    }

    Ok(())
}

async fn run_interactive(
    rewrite: &RewriteArgs,
    completion: Option<Arc<dyn CompletionClient>>,
) -> Result<()> {
    let options = rewrite.assess_options();
    let generator = build_generator(rewrite.dry_run, completion, rewrite.model_settings());

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    interactive::run(
        stdin,
        tokio::io::stdout(),
        &options,
        generator.as_ref(),
        rewrite.dry_run,
    )
    .await
}

async fn run_serve(
    config: &Config,
    port: Option<u16>,
    model: ModelSettings,
    completion: Option<Arc<dyn CompletionClient>>,
) -> Result<()> {
    info!("Starting Bulletly API v{}", env!("CARGO_PKG_VERSION"));

    info!("HTTP suggestions use model {}", model.model);
    let state = AppState { completion, model };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", port.unwrap_or(config.port)).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
