//! Real-time push subscription
//!
//! Turns the backend's Socket.IO order events into board updates.

pub mod client;
pub mod codec;

pub use client::{PushClient, PushConnection, PushEvent};

use crate::board::BoardUpdate;
use crate::order::Order;
use codec::FrameError;
use serde_json::Value;
use thiserror::Error;

/// Event carrying a newly placed order.
pub const ORDER_CREATED_EVENT: &str = "order:new";
/// Event carrying an order after any change.
pub const ORDER_UPDATED_EVENT: &str = "order:update";
/// Event carrying an order the customer cancelled.
pub const ORDER_CANCELLED_EVENT: &str = "order:cancelled";

#[derive(Debug, Error)]
pub enum PushError {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Protocol error: {0}")]
    Protocol(#[from] FrameError),

    #[error("Event {event} has an unexpected payload: {source}")]
    Payload {
        event: String,
        source: serde_json::Error,
    },

    #[error("Subscription rejected by server: {0}")]
    Rejected(String),

    #[error("Connection closed by server")]
    Closed,
}

/// Maps a pushed event to a board update.
///
/// Returns `Ok(None)` for events the board does not follow.
pub fn board_update_for_event(
    name: &str,
    payload: Value,
) -> Result<Option<BoardUpdate>, PushError> {
    let decode = |payload: Value| {
        serde_json::from_value::<Order>(payload).map_err(|source| PushError::Payload {
            event: name.to_string(),
            source,
        })
    };
    match name {
        ORDER_CREATED_EVENT => Ok(Some(BoardUpdate::Created(decode(payload)?))),
        ORDER_UPDATED_EVENT | ORDER_CANCELLED_EVENT => {
            Ok(Some(BoardUpdate::Updated(decode(payload)?)))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderStatus;
    use serde_json::json;

    fn payload(status: &str) -> Value {
        json!({"_id": "o1", "status": status, "createdAt": "2024-05-01T11:50:00Z"})
    }

    #[test]
    fn maps_order_events() {
        let created = board_update_for_event(ORDER_CREATED_EVENT, payload("pending")).unwrap();
        assert!(matches!(created, Some(BoardUpdate::Created(o)) if o.id == "o1"));

        let updated = board_update_for_event(ORDER_UPDATED_EVENT, payload("served")).unwrap();
        assert!(
            matches!(updated, Some(BoardUpdate::Updated(o)) if o.status == OrderStatus::Served)
        );

        let cancelled =
            board_update_for_event(ORDER_CANCELLED_EVENT, payload("cancelled")).unwrap();
        assert!(
            matches!(cancelled, Some(BoardUpdate::Updated(o)) if o.status == OrderStatus::Cancelled)
        );
    }

    #[test]
    fn ignores_unrelated_events() {
        let update = board_update_for_event("inventory:update", json!([])).unwrap();
        assert!(update.is_none());
    }

    #[test]
    fn rejects_malformed_order_payload() {
        let err = board_update_for_event(ORDER_CREATED_EVENT, json!({"_id": 5})).unwrap_err();
        assert!(matches!(err, PushError::Payload { ref event, .. } if event == "order:new"));
    }
}
