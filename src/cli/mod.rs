pub mod commands;
pub mod config;
pub mod render;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::sync::SyncError;

#[derive(Parser)]
#[command(name = "contacts")]
#[command(about = "Contacts CLI - Command-line client for the contacts API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, env = "CONTACTS_SERVER", help = "Server URL (defaults to the logged-in server)")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Authentication and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "List, filter and edit contacts")]
    Contact {
        #[command(subcommand)]
        cmd: commands::contact::ContactCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, cli.server, output_format).await,
        Commands::Contact { cmd } => commands::contact::handle(cmd, cli.server, output_format).await,
    }
}

/// Print a failed command, listing offending fields for validation errors
pub fn report_error(output_format: &OutputFormat, error: &anyhow::Error) -> anyhow::Result<()> {
    let (code, fields) = match error.downcast_ref::<SyncError>() {
        Some(SyncError::Network(_)) => (Some("NETWORK_ERROR"), Vec::new()),
        Some(SyncError::Auth(_)) => (Some("AUTH_ERROR"), Vec::new()),
        Some(SyncError::Validation { fields, .. }) => (Some("VALIDATION_ERROR"), fields.clone()),
        Some(SyncError::NotFound(_)) => (Some("NOT_FOUND"), Vec::new()),
        None => (None, Vec::new()),
    };
    utils::output_error(output_format, &error.to_string(), code, &fields)
}
