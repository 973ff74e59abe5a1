//! CLI command definitions for the `copilot-webapi` binary.
//!
//! Uses clap derive macros for argument parsing. `serve` runs the REST API;
//! the remaining commands administer the chat session store directly.

pub mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Chat copilot memory service.
#[derive(Parser)]
#[command(name = "copilot-webapi", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config.toml (defaults to `<data dir>/config.toml`).
    #[arg(long, global = true, env = "COPILOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON instead of plain text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides `[server] port`).
        #[arg(short, long, env = "COPILOT_PORT")]
        port: Option<u16>,

        /// Host to bind to (overrides `[server] host`).
        #[arg(long, env = "COPILOT_HOST")]
        host: Option<String>,
    },

    /// Manage chat sessions.
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Print the effective configuration.
    Config,
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Create a chat session.
    Create {
        /// Session title.
        title: String,

        /// System description (prompt) for the chat.
        #[arg(long, default_value = "")]
        system_description: String,
    },

    /// List chat sessions.
    #[command(alias = "ls")]
    List,

    /// Delete a chat session.
    #[command(alias = "rm")]
    Delete {
        /// Session id.
        id: String,
    },

    /// Add a user as participant of a chat session.
    AddParticipant {
        /// Session id.
        chat_id: String,

        /// User id.
        user_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from(["copilot-webapi", "serve", "--port", "8080", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Serve { port, host } => {
                assert_eq!(port, Some(8080));
                assert!(host.is_none());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn parses_session_create() {
        let cli = Cli::try_parse_from([
            "copilot-webapi",
            "session",
            "create",
            "Planning",
            "--system-description",
            "Be brief.",
        ])
        .unwrap();
        match cli.command {
            Commands::Session {
                action:
                    SessionAction::Create {
                        title,
                        system_description,
                    },
            } => {
                assert_eq!(title, "Planning");
                assert_eq!(system_description, "Be brief.");
            }
            _ => panic!("expected session create"),
        }
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
