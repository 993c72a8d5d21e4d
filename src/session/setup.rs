//! Session setup and initialization

use crate::backend::error::BackendError;
use crate::backend::{Backend, BackendClient};
use crate::board::OrderBoard;
use crate::config::Config;
use crate::environment::Environment;
use crate::events::Event;
use crate::sync::Synchronizer;
use crate::workers::core::{EventSender, WorkerConfig};
use std::error::Error;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Not logged in. Run `kitchen-board login --token <TOKEN>` first.")]
    NotLoggedIn,

    #[error("The backend rejected the stored session. Please log in again.")]
    Expired,

    #[error("User {0} is not linked to a restaurant. Join a restaurant before opening the board.")]
    NoRestaurant(String),

    #[error(transparent)]
    Backend(BackendError),
}

impl From<BackendError> for SessionError {
    fn from(error: BackendError) -> Self {
        if error.is_auth_failure() {
            SessionError::Expired
        } else {
            SessionError::Backend(error)
        }
    }
}

/// Who is signed in, and whose kitchen they work in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub user_name: Option<String>,
    pub restaurant_id: String,
    pub restaurant_name: Option<String>,
}

impl Identity {
    /// Restaurant name for display, falling back to its id.
    pub fn kitchen(&self) -> &str {
        self.restaurant_name.as_deref().unwrap_or(&self.restaurant_id)
    }
}

/// Checks the token with the backend and resolves the user's restaurant.
pub async fn verify_identity(backend: &dyn Backend) -> Result<Identity, SessionError> {
    let user = backend.get_current_user().await?;
    let restaurant = user
        .restaurant
        .ok_or_else(|| SessionError::NoRestaurant(user.id.clone()))?;
    Ok(Identity {
        user_id: user.id,
        user_name: user.name,
        restaurant_id: restaurant.id().to_string(),
        restaurant_name: restaurant.name().map(str::to_string),
    })
}

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Event receiver for worker events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Owner of the order board, already initialized
    pub synchronizer: Synchronizer,
    pub environment: Environment,
    pub identity: Identity,
}

/// Sets up a board session
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Verifies the stored token and the user's restaurant
/// 2. Creates the worker event channel
/// 3. Starts the synchronizer (push subscription and periodic refresh)
///
/// No workers are started when any check fails.
pub async fn setup_session(config: Config, env: Environment) -> Result<SessionData, Box<dyn Error>> {
    if config.token.trim().is_empty() {
        return Err(SessionError::NotLoggedIn.into());
    }

    let backend = BackendClient::new(env.clone(), config.token)?;
    let identity = verify_identity(&backend).await?;
    if !config.restaurant_id.is_empty() && config.restaurant_id != identity.restaurant_id {
        log::info!(
            "Restaurant changed since login: {} -> {}",
            config.restaurant_id,
            identity.restaurant_id
        );
    }

    let (event_sender, event_receiver) =
        mpsc::channel::<Event>(crate::consts::cli_consts::EVENT_QUEUE_SIZE);
    let mut synchronizer = Synchronizer::new(
        OrderBoard::new(),
        Arc::new(backend),
        WorkerConfig::new(env.clone()),
        EventSender::new(event_sender),
    );
    synchronizer.initialize()?;

    Ok(SessionData {
        event_receiver,
        synchronizer,
        environment: env,
        identity,
    })
}
