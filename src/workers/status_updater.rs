//! Operator-requested status transitions

use super::core::EventSender;
use super::refresher::Refresher;
use crate::backend::Backend;
use crate::backend::error::BackendError;
use crate::events::EventType;
use crate::logging::LogLevel;
use crate::network::ErrorHandler;
use crate::order::OrderStatus;
use crate::sync::SyncMessage;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Sends status changes to the backend. The board is never changed
/// optimistically: a successful change is picked up by a full refresh.
#[derive(Clone)]
pub struct StatusUpdater {
    backend: Arc<dyn Backend>,
    refresher: Refresher,
    updates: mpsc::Sender<SyncMessage>,
    event_sender: EventSender,
    error_handler: ErrorHandler,
}

impl StatusUpdater {
    pub fn new(
        backend: Arc<dyn Backend>,
        refresher: Refresher,
        updates: mpsc::Sender<SyncMessage>,
        event_sender: EventSender,
    ) -> Self {
        Self {
            backend,
            refresher,
            updates,
            event_sender,
            error_handler: ErrorHandler::new(),
        }
    }

    pub async fn transition(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), BackendError> {
        match self.backend.set_order_status(order_id, status).await {
            Ok(order) => {
                self.event_sender
                    .send_status_event(
                        format!("Order {} is now {}", order.short_id(), order.status.label()),
                        EventType::Success,
                        LogLevel::Info,
                    )
                    .await;
                // A failed follow-up refresh is reported by the refresher itself.
                let _ = self.refresher.refresh_once().await;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to set order {} to {}: {}", order_id, status, e);
                self.event_sender
                    .send_status_event(
                        format!("Failed to update order status: {}", e),
                        EventType::Error,
                        LogLevel::Error,
                    )
                    .await;
                if !self.error_handler.is_transient(&e) {
                    let _ = self.updates.send(SyncMessage::SessionExpired).await;
                }
                Err(e)
            }
        }
    }
}
