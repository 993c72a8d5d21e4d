//! Core worker utilities

use crate::consts::cli_consts::{board, push};
use crate::environment::Environment;
use crate::events::{Event, EventType, PushState};
use crate::logging::LogLevel;
use std::time::Duration;
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_refresh_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::refresher_with_level(message, event_type, log_level))
            .await;
    }

    pub async fn send_push_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::push_listener_with_level(
            message, event_type, log_level,
        ))
        .await;
    }

    pub async fn send_push_state(&self, state: PushState, message: String) {
        self.send_event(Event::push_state_change(state, message)).await;
    }

    pub async fn send_status_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::status_updater_with_level(
            message, event_type, log_level,
        ))
        .await;
    }
}

/// Worker configuration shared across all worker types
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub environment: Environment,
    /// Period of the full refresh
    pub refresh_interval: Duration,
    /// Pause before reopening a dropped push connection
    pub reconnect_delay: Duration,
}

impl WorkerConfig {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            refresh_interval: board::refresh_interval(),
            reconnect_delay: push::reconnect_delay(),
        }
    }
}
