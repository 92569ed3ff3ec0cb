use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{clear_session, load_session, ping_server, resolve_server, save_session, CliSession};
use crate::cli::utils::{output_success, prompt_line};
use crate::cli::OutputFormat;
use crate::sync::{Credentials, HttpContactsApi, SyncController};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to server")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout from server")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, server: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt_line("Password: ")?,
            };
            let server = resolve_server(server, load_session()?.as_ref());

            let mut controller = SyncController::new(HttpContactsApi::new(&server)?);
            let session = controller.login(&Credentials { username, password }).await?;
            save_session(&CliSession::new(server.clone(), session.clone()))?;

            output_success(
                &output_format,
                &format!(
                    "Logged in as '{}' ({} contacts)",
                    session.username,
                    controller.engine().contacts().len()
                ),
                Some(json!({ "username": session.username, "server": server })),
            )
        }
        AuthCommands::Logout => {
            let removed = clear_session()?;
            let message = if removed { "Logged out" } else { "No active session" };
            output_success(&output_format, message, None)
        }
        AuthCommands::Status => {
            let saved = load_session()?;
            let server = resolve_server(server, saved.as_ref());
            let status = ping_server(&server).await;

            match (&output_format, saved) {
                (OutputFormat::Json, saved) => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({
                            "server": server,
                            "server_status": status,
                            "username": saved.as_ref().map(|s| s.username.clone()),
                            "logged_in_at": saved.as_ref().map(|s| s.logged_in_at),
                        }))?
                    );
                }
                (OutputFormat::Text, Some(saved)) => {
                    println!("Server: {} ({:?})", server, status);
                    println!("Logged in as: {} since {}", saved.username, saved.logged_in_at);
                }
                (OutputFormat::Text, None) => {
                    println!("Server: {} ({:?})", server, status);
                    println!("Not logged in");
                }
            }
            Ok(())
        }
    }
}
