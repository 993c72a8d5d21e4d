//! Order board session
//!
//! Owns the board and is its only writer. Background workers (refresher, push
//! listener, status transitions) send [`SyncMessage`]s over a channel; the
//! owner drains that channel with [`Synchronizer::pump`] between frames.

use crate::backend::Backend;
use crate::board::{BoardUpdate, OrderBoard};
use crate::consts::cli_consts::UPDATE_QUEUE_SIZE;
use crate::order::OrderStatus;
use crate::push::PushClient;
use crate::workers::core::{EventSender, WorkerConfig};
use crate::workers::push_listener::PushListener;
use crate::workers::refresher::Refresher;
use crate::workers::status_updater::StatusUpdater;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// How long a stopped worker gets to finish an in-flight request before it is aborted.
const WORKER_STOP_GRACE: Duration = Duration::from_secs(2);

/// Message from a worker to the board owner.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncMessage {
    Update(BoardUpdate),
    /// The backend rejected the session token.
    SessionExpired,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("Order board is already initialized")]
    AlreadyInitialized,

    #[error("Order board has been torn down")]
    TornDown,
}

/// What one [`Synchronizer::pump`] call did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Pumped {
    /// Number of updates applied to the board
    pub applied: usize,
    /// A worker saw the token rejected; the session should end.
    pub session_expired: bool,
}

pub struct Synchronizer {
    board: OrderBoard,
    backend: Arc<dyn Backend>,
    config: WorkerConfig,
    event_sender: EventSender,
    update_sender: mpsc::Sender<SyncMessage>,
    update_receiver: mpsc::Receiver<SyncMessage>,
    cancel: CancellationToken,
    initialized: bool,
    alive: bool,
    join_handles: Vec<JoinHandle<()>>,
}

impl Synchronizer {
    /// Creates a session around `board`. Nothing runs until [`initialize`](Self::initialize).
    pub fn new(
        board: OrderBoard,
        backend: Arc<dyn Backend>,
        config: WorkerConfig,
        event_sender: EventSender,
    ) -> Self {
        let (update_sender, update_receiver) = mpsc::channel(UPDATE_QUEUE_SIZE);
        Self {
            board,
            backend,
            config,
            event_sender,
            update_sender,
            update_receiver,
            cancel: CancellationToken::new(),
            initialized: false,
            alive: true,
            join_handles: Vec::new(),
        }
    }

    /// Starts the push subscription and the periodic refresh, whose first
    /// fetch happens immediately.
    ///
    /// # Errors
    /// `AlreadyInitialized` on a second call; `TornDown` after [`teardown`](Self::teardown).
    /// Neither starts anything.
    pub fn initialize(&mut self) -> Result<(), SyncError> {
        if !self.alive {
            return Err(SyncError::TornDown);
        }
        if self.initialized {
            return Err(SyncError::AlreadyInitialized);
        }
        self.initialized = true;

        let listener = PushListener::new(
            PushClient::new(self.config.environment.socket_url()),
            self.update_sender.clone(),
            self.event_sender.clone(),
            self.config.reconnect_delay,
        );
        self.join_handles
            .push(tokio::spawn(listener.run(self.cancel.child_token())));

        let refresher = self.refresher();
        self.join_handles.push(tokio::spawn(
            refresher.run(self.config.refresh_interval, self.cancel.child_token()),
        ));

        log::debug!(
            "Order board started against {}",
            self.config.environment.backend_url()
        );
        Ok(())
    }

    /// Applies every queued update in arrival order.
    ///
    /// After teardown queued messages are discarded instead.
    pub fn pump(&mut self) -> Pumped {
        let mut pumped = Pumped::default();
        while let Ok(message) = self.update_receiver.try_recv() {
            if !self.alive {
                continue;
            }
            match message {
                SyncMessage::Update(update) => {
                    self.board.apply(update);
                    pumped.applied += 1;
                }
                SyncMessage::SessionExpired => pumped.session_expired = true,
            }
        }
        pumped
    }

    pub fn board(&self) -> &OrderBoard {
        &self.board
    }

    /// Sends a status change in the background. The board changes only through
    /// the full refresh that follows a success; a failure is reported as an event.
    pub fn request_status_transition(
        &mut self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), SyncError> {
        if !self.alive {
            return Err(SyncError::TornDown);
        }
        let updater = StatusUpdater::new(
            self.backend.clone(),
            self.refresher(),
            self.update_sender.clone(),
            self.event_sender.clone(),
        );
        let order_id = order_id.to_string();
        let cancel = self.cancel.child_token();
        self.join_handles.retain(|handle| !handle.is_finished());
        self.join_handles.push(tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = updater.transition(&order_id, status) => {}
            }
        }));
        Ok(())
    }

    /// Stops every worker. Safe to call more than once; no update reaches the
    /// board afterwards, including ones already queued.
    pub fn teardown(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.cancel.cancel();
        while self.update_receiver.try_recv().is_ok() {}
        log::debug!("Order board torn down");
    }

    /// Waits for stopped workers to exit, aborting any that take too long.
    pub async fn wait_for_workers(&mut self) {
        for mut handle in self.join_handles.drain(..) {
            if tokio::time::timeout(WORKER_STOP_GRACE, &mut handle)
                .await
                .is_err()
            {
                handle.abort();
            }
        }
    }

    fn refresher(&self) -> Refresher {
        Refresher::new(
            self.backend.clone(),
            self.update_sender.clone(),
            self.event_sender.clone(),
        )
    }

    #[cfg(test)]
    fn sender(&self) -> mpsc::Sender<SyncMessage> {
        self.update_sender.clone()
    }
}

impl Drop for Synchronizer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
