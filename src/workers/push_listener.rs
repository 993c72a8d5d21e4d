//! Live order events from the push subscription

use super::core::EventSender;
use crate::events::{EventType, PushState};
use crate::logging::LogLevel;
use crate::push::{PushClient, PushConnection, PushError, PushEvent};
use crate::sync::SyncMessage;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Keeps a push subscription open and forwards order events to the board.
pub struct PushListener {
    client: PushClient,
    updates: mpsc::Sender<SyncMessage>,
    event_sender: EventSender,
    reconnect_delay: Duration,
    reported: Option<PushState>,
}

impl PushListener {
    pub fn new(
        client: PushClient,
        updates: mpsc::Sender<SyncMessage>,
        event_sender: EventSender,
        reconnect_delay: Duration,
    ) -> Self {
        Self {
            client,
            updates,
            event_sender,
            reconnect_delay,
            reported: None,
        }
    }

    /// Connects, listens, and reconnects after `reconnect_delay` whenever the
    /// connection drops, until cancelled.
    pub async fn run(mut self, cancel: CancellationToken) {
        loop {
            let connected = tokio::select! {
                _ = cancel.cancelled() => break,
                connected = self.client.connect() => connected,
            };

            match connected {
                Ok(mut connection) => match self.listen(&mut connection, &cancel).await {
                    Some(e) => self.went_offline(&e).await,
                    None => {
                        connection.close().await;
                        break;
                    }
                },
                Err(e) => self.went_offline(&e).await,
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.reconnect_delay) => {}
            }
        }
        log::debug!("Push listener stopped");
    }

    /// Reads events until the connection fails (`Some`) or the listener is cancelled (`None`).
    async fn listen(
        &mut self,
        connection: &mut PushConnection,
        cancel: &CancellationToken,
    ) -> Option<PushError> {
        loop {
            let next = tokio::select! {
                _ = cancel.cancelled() => return None,
                next = connection.next_event() => next,
            };
            match next {
                Ok(PushEvent::Subscribed) => {
                    self.report(PushState::Live, "Live order updates connected".to_string())
                        .await;
                }
                Ok(PushEvent::Update(update)) => {
                    if self.updates.send(SyncMessage::Update(update)).await.is_err() {
                        return None;
                    }
                }
                Ok(PushEvent::Dropped(e)) => {
                    log::warn!("Dropped push frame: {}", e);
                    self.event_sender
                        .send_push_event(
                            format!("Ignored malformed order event: {}", e),
                            EventType::Error,
                            LogLevel::Warn,
                        )
                        .await;
                }
                Err(e) => return Some(e),
            }
        }
    }

    async fn went_offline(&mut self, error: &PushError) {
        log::debug!("Push connection to {} lost: {}", self.client.url(), error);
        self.event_sender
            .send_push_event(
                format!("Live updates unavailable: {}", error),
                EventType::Waiting,
                LogLevel::Debug,
            )
            .await;
        self.report(
            PushState::Offline,
            "Live updates offline, relying on refresh".to_string(),
        )
        .await;
    }

    /// Sends a state change only when it differs from the last one reported.
    async fn report(&mut self, state: PushState, message: String) {
        if self.reported == Some(state) {
            return;
        }
        self.reported = Some(state);
        self.event_sender.send_push_state(state, message).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardUpdate;
    use crate::events::Event;
    use crate::push::client::testing::serve;

    const NEW_ORDER: &str =
        r#"42["order:new",{"_id":"o1","status":"pending","createdAt":"2024-05-01T11:50:00Z"}]"#;

    fn listener(
        url: String,
    ) -> (
        PushListener,
        mpsc::Receiver<SyncMessage>,
        mpsc::Receiver<Event>,
    ) {
        let (update_tx, update_rx) = mpsc::channel(16);
        let (event_tx, event_rx) = mpsc::channel(16);
        let listener = PushListener::new(
            PushClient::new(url),
            update_tx,
            EventSender::new(event_tx),
            Duration::from_millis(20),
        );
        (listener, update_rx, event_rx)
    }

    async fn next_state(events: &mut mpsc::Receiver<Event>) -> Option<PushState> {
        while let Some(event) = events.recv().await {
            if event.push_state.is_some() {
                return event.push_state;
            }
        }
        None
    }

    #[tokio::test]
    async fn forwards_order_events_until_cancelled() {
        let (url, _seen) = serve(vec![NEW_ORDER.to_string()], false).await;
        let (listener, mut updates, mut events) = listener(url);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(listener.run(cancel.clone()));

        assert_eq!(next_state(&mut events).await, Some(PushState::Live));
        assert!(matches!(
            updates.recv().await,
            Some(SyncMessage::Update(BoardUpdate::Created(o))) if o.id == "o1"
        ));

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn reports_offline_once_when_the_server_goes_away() {
        let (url, _seen) = serve(Vec::new(), true).await;
        let (listener, _updates, mut events) = listener(url);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(listener.run(cancel.clone()));

        assert_eq!(next_state(&mut events).await, Some(PushState::Live));
        assert_eq!(next_state(&mut events).await, Some(PushState::Offline));

        // Reconnect attempts keep failing without repeating the state change.
        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel.cancel();
        handle.await.unwrap();
        while let Ok(event) = events.try_recv() {
            assert!(event.push_state.is_none());
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_offline() {
        let (listener, _updates, mut events) =
            listener("ws://127.0.0.1:1/socket.io/?EIO=4&transport=websocket".to_string());
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(listener.run(cancel.clone()));

        assert_eq!(next_state(&mut events).await, Some(PushState::Offline));
        cancel.cancel();
        handle.await.unwrap();
    }
}
