//! Event System
//!
//! Types and implementations for worker events and logging

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Worker {
    /// Worker that periodically replaces the board with the backend's order list.
    Refresher,
    /// Worker that listens for pushed order events.
    PushListener,
    /// Worker that sends operator status changes to the backend.
    StatusUpdater,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
    StateChange,
}

/// State of the live push connection
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum PushState {
    /// Subscribed and receiving order events
    Live,
    /// Not connected; the board relies on periodic refresh
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Optional state information for state change events
    pub push_state: Option<PushState>,
}

impl Event {
    fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            push_state: None,
        }
    }

    pub fn push_state_change(state: PushState, msg: String) -> Self {
        Self {
            push_state: Some(state),
            ..Self::new(
                Worker::PushListener,
                msg,
                EventType::StateChange,
                LogLevel::Info,
            )
        }
    }

    pub fn refresher_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Refresher, msg, event_type, log_level)
    }

    pub fn push_listener_with_level(
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self::new(Worker::PushListener, msg, event_type, log_level)
    }

    pub fn status_updater_with_level(
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self::new(Worker::StatusUpdater, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // StateChange events are shown through the header, not the log
        if self.event_type == EventType::StateChange {
            return false;
        }
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}
