mod backend;
mod board;
mod cli_messages;
mod config;
mod consts;
mod environment;
mod events;
mod logging;
mod network;
mod order;
mod push;
mod session;
mod sync;
mod ui;
mod workers;

use crate::backend::{Backend, BackendClient};
use crate::board::OrderBoard;
use crate::board::report::{summary_line, view_lines};
use crate::board::view::{BoardStats, SortOrder, Tab, ViewState};
use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use crate::order::OrderStatus;
use crate::session::setup::SessionError;
use crate::session::{run_headless_mode, run_tui_mode, setup_session, verify_identity};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Save a session token issued by the restaurant backend.
    Login {
        /// Bearer token from the restaurant dashboard
        #[arg(long, value_name = "TOKEN")]
        token: String,
    },
    /// Clear the stored session.
    Logout,
    /// Open the live kitchen order board.
    Start {
        /// Print events to the console instead of drawing the dashboard
        #[arg(long, default_value_t = false)]
        headless: bool,

        /// Paint a dark background behind the dashboard
        #[arg(long, default_value_t = false)]
        with_background: bool,
    },
    /// Print the current orders once and exit.
    Orders {
        /// Show served, paid and cancelled orders instead of active ones
        #[arg(long, default_value_t = false)]
        history: bool,

        /// List the newest orders first
        #[arg(long, default_value_t = false)]
        newest: bool,
    },
    /// Move an order to a new status.
    SetStatus {
        /// Identifier of the order
        #[arg(value_name = "ORDER_ID")]
        order_id: String,

        /// pending, preparing, served, paid or cancelled
        #[arg(value_name = "STATUS")]
        status: OrderStatus,
    },
}

/// Environment from `KITCHEN_ENVIRONMENT`, else the one stored at login.
fn resolve_environment(stored: Option<&Config>) -> Environment {
    match std::env::var("KITCHEN_ENVIRONMENT") {
        Ok(value) if !value.trim().is_empty() => value.parse().unwrap_or_else(|_| {
            print_cmd_warn!(
                "Unknown KITCHEN_ENVIRONMENT",
                "{:?}, using the local backend",
                value
            );
            Environment::default()
        }),
        _ => stored
            .map(|config| config.environment.clone())
            .unwrap_or_default(),
    }
}

fn load_session_config(config_path: &Path) -> Result<Config, Box<dyn Error>> {
    if !config_path.exists() {
        let error = SessionError::NotLoggedIn;
        print_cmd_error!("No session", error.to_string().as_str());
        return Err(error.into());
    }
    Config::load_from_file(config_path)
        .map_err(|e| format!("Failed to load config {}: {}", config_path.display(), e).into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let args = Args::parse();

    match args.command {
        Command::Login { token } => {
            let stored = Config::load_from_file(&config_path).ok();
            let environment = resolve_environment(stored.as_ref());
            let backend = BackendClient::new(environment.clone(), token.clone())?;
            let identity = match verify_identity(&backend).await {
                Ok(identity) => identity,
                Err(e) => {
                    print_cmd_error!("Login failed", e.to_string().as_str());
                    return Err(e.into());
                }
            };
            let config = Config::new(
                token,
                identity.user_id.clone(),
                identity.restaurant_id.clone(),
                environment,
            );
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!(
                "Logged in",
                "{} at {}",
                identity.user_name.as_deref().unwrap_or(&identity.user_id),
                identity.kitchen()
            );
            Ok(())
        }
        Command::Logout => {
            print_cmd_info!("Logging out", "clearing {}", config_path.display());
            Config::clear(&config_path).map_err(Into::into)
        }
        Command::Start {
            headless,
            with_background,
        } => {
            let config = load_session_config(&config_path)?;
            let environment = resolve_environment(Some(&config));
            let session = match setup_session(config, environment).await {
                Ok(session) => session,
                Err(e) => {
                    print_cmd_error!("Could not open the board", e.to_string().as_str());
                    return Err(e);
                }
            };
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, with_background).await
            }
        }
        Command::Orders { history, newest } => {
            let config = load_session_config(&config_path)?;
            let environment = resolve_environment(Some(&config));
            let backend = BackendClient::new(environment, config.token)?;

            let mut board = OrderBoard::new();
            board.on_full_refresh(backend.get_orders().await?);
            let view = ViewState {
                tab: if history { Tab::History } else { Tab::Active },
                sort: if newest {
                    SortOrder::Newest
                } else {
                    SortOrder::Oldest
                },
            };
            let now = chrono::Utc::now();
            for line in view_lines(&board, &view, now) {
                println!("{}", line);
            }
            println!("{}", summary_line(&BoardStats::compute(&board, now)));
            Ok(())
        }
        Command::SetStatus { order_id, status } => {
            let config = load_session_config(&config_path)?;
            let environment = resolve_environment(Some(&config));
            let backend = BackendClient::new(environment, config.token)?;
            match backend.set_order_status(&order_id, status).await {
                Ok(order) => {
                    print_cmd_success!("Status updated", "{}", order);
                    Ok(())
                }
                Err(e) => {
                    print_cmd_error!("Failed to update order status", e.to_string().as_str());
                    Err(e.into())
                }
            }
        }
    }
}
