//! Chat copilot memory service entry point.
//!
//! Binary name: `copilot-webapi`
//!
//! Parses CLI arguments, loads configuration, initializes the database and
//! services, then dispatches to a session command or starts the REST API.

mod cli;
mod http;
mod state;

use clap::Parser;
use copilot_infra::config::{default_config_path, load_service_config, resolve_data_dir};
use copilot_observe::tracing_setup::{
    filter_for_verbosity, init_tracing, shutdown_tracing, TracingOptions,
};
use copilot_types::config::ServiceConfig;

use cli::{Cli, Commands, SessionAction};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&TracingOptions {
        default_filter: filter_for_verbosity(cli.verbose, cli.quiet).to_string(),
        json: cli.json_logs,
        otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let data_dir = resolve_data_dir();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| default_config_path(&data_dir));
    let mut config = load_service_config(&config_path).await;

    match cli.command {
        Commands::Config => {
            println!("{}", render_config(&config)?);
        }

        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }

            let state = AppState::init(&config, &data_dir).await?;
            let addr = format!("{}:{}", config.server.host, config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, "chat memory API listening");

            let router = http::router::build_router(state.clone());
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            state.db_pool.close().await;
            tracing::info!("server stopped");
        }

        Commands::Session { action } => {
            let state = AppState::init(&config, &data_dir).await?;
            match action {
                SessionAction::Create {
                    title,
                    system_description,
                } => {
                    cli::session::create_session(&state, title, system_description, cli.json)
                        .await?;
                }
                SessionAction::List => {
                    cli::session::list_sessions(&state, cli.json).await?;
                }
                SessionAction::Delete { id } => {
                    cli::session::delete_session(&state, &id, cli.json).await?;
                }
                SessionAction::AddParticipant { chat_id, user_id } => {
                    cli::session::add_participant(&state, &chat_id, &user_id, cli.json).await?;
                }
            }
            state.db_pool.close().await;
        }
    }

    Ok(())
}

/// Effective configuration as pretty JSON. Secrets are never serialized.
fn render_config(config: &ServiceConfig) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
