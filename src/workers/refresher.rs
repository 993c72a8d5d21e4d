//! Periodic full refresh of the board

use super::core::EventSender;
use crate::backend::Backend;
use crate::backend::error::BackendError;
use crate::board::BoardUpdate;
use crate::events::EventType;
use crate::logging::LogLevel;
use crate::network::ErrorHandler;
use crate::sync::SyncMessage;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// Fetches the complete order list and hands it to the board as a replacement.
#[derive(Clone)]
pub struct Refresher {
    backend: Arc<dyn Backend>,
    updates: mpsc::Sender<SyncMessage>,
    event_sender: EventSender,
    error_handler: ErrorHandler,
}

impl Refresher {
    pub fn new(
        backend: Arc<dyn Backend>,
        updates: mpsc::Sender<SyncMessage>,
        event_sender: EventSender,
    ) -> Self {
        Self {
            backend,
            updates,
            event_sender,
            error_handler: ErrorHandler::new(),
        }
    }

    /// One full refresh. On failure nothing is sent, so the board keeps its last good state.
    pub async fn refresh_once(&self) -> Result<usize, BackendError> {
        match self.backend.get_orders().await {
            Ok(orders) => {
                let count = orders.len();
                let _ = self
                    .updates
                    .send(SyncMessage::Update(BoardUpdate::Refreshed(orders)))
                    .await;
                self.event_sender
                    .send_refresh_event(
                        format!("Refreshed {} orders", count),
                        EventType::Refresh,
                        LogLevel::Debug,
                    )
                    .await;
                Ok(count)
            }
            Err(e) => {
                let log_level = self.error_handler.classify_error(&e);
                log::warn!("Order refresh failed: {}", e);
                self.event_sender
                    .send_refresh_event(
                        format!("Failed to refresh orders: {}", e),
                        EventType::Error,
                        log_level,
                    )
                    .await;
                if !self.error_handler.is_transient(&e) {
                    let _ = self.updates.send(SyncMessage::SessionExpired).await;
                }
                Err(e)
            }
        }
    }

    /// Refreshes immediately, then on every tick of `period`, until cancelled.
    ///
    /// Failures do not change the period. An authentication failure ends the
    /// loop since no later tick can succeed with the same token.
    pub async fn run(self, period: Duration, cancel: CancellationToken) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(e) = self.refresh_once().await {
                        if !self.error_handler.is_transient(&e) {
                            break;
                        }
                    }
                }
            }
        }
    }
}
