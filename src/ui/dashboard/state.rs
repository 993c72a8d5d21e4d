//! Dashboard state management
//!
//! Contains the main dashboard state struct and related enums. The board itself
//! is not held here: renderers receive it as a read-only reference.

use crate::board::view::{BoardStats, ViewState};
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::{Event as WorkerEvent, PushState};
use crate::order::OrderStatus;
use crate::ui::app::UIConfig;

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::Instant;

/// What a key press asks the application to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    None,
    Quit,
    /// Send a status change for an order to the backend.
    Transition {
        order_id: String,
        status: OrderStatus,
    },
}

/// A short message shown above the key hints until it expires.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
    pub shown_at: Instant,
}

#[derive(Debug)]
pub struct DashboardState {
    /// The backend the board talks to.
    pub environment: Environment,
    /// Restaurant whose kitchen is shown, if the backend named it.
    pub restaurant_name: Option<String>,
    /// Signed-in staff member.
    pub user_name: Option<String>,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,

    /// Tab and sort order
    pub view: ViewState,
    /// Row index into the visible orders
    pub selected: usize,
    /// Whether the details overlay for the selected order is open
    pub show_details: bool,
    /// Counters for the header, recomputed every update
    pub stats: BoardStats,
    /// Clock used for ages and urgency during this frame
    pub now: DateTime<Utc>,

    push_state: PushState,
    last_refresh: Option<String>,
    notice: Option<Notice>,
}

impl DashboardState {
    pub fn new(environment: Environment, start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            environment,
            restaurant_name: ui_config.restaurant_name,
            user_name: ui_config.user_name,
            start_time,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            tick: 0,
            view: ViewState::default(),
            selected: 0,
            show_details: false,
            stats: BoardStats::default(),
            now: Utc::now(),
            push_state: PushState::Offline,
            last_refresh: None,
            notice: None,
        }
    }

    pub fn push_state(&self) -> PushState {
        self.push_state
    }

    pub fn set_push_state(&mut self, state: PushState) {
        self.push_state = state;
    }

    pub fn last_refresh(&self) -> Option<&str> {
        self.last_refresh.as_deref()
    }

    pub fn set_last_refresh(&mut self, timestamp: String) {
        self.last_refresh = Some(timestamp);
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, text: String, is_error: bool) {
        self.notice = Some(Notice {
            text,
            is_error,
            shown_at: Instant::now(),
        });
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }
}
