//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from worker events and
//! key presses.

use super::state::{DashboardAction, DashboardState};

use crate::board::OrderBoard;
use crate::board::view::BoardStats;
use crate::consts::cli_consts::ui::NOTICE_DURATION;
use crate::events::{Event as WorkerEvent, EventType, Worker};
use crate::order::{Order, OrderStatus};

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

impl DashboardState {
    /// Update the dashboard state with new tick, events and board counters.
    pub fn update(&mut self, board: &OrderBoard) {
        self.update_at(board, Utc::now());
    }

    pub(crate) fn update_at(&mut self, board: &OrderBoard, now: DateTime<Utc>) {
        self.tick += 1;
        self.now = now;

        // Process all queued events one by one
        while let Some(event) = self.pending_events.pop_front() {
            self.add_to_activity_log(event.clone());
            self.process_event(&event);
        }

        self.stats = BoardStats::compute(board, now);
        self.clamp_selection(board);

        let expired = self
            .notice()
            .is_some_and(|notice| notice.shown_at.elapsed() >= NOTICE_DURATION);
        if expired {
            self.clear_notice();
        }
    }

    /// Process a single event and update relevant state
    fn process_event(&mut self, event: &WorkerEvent) {
        if event.event_type == EventType::StateChange {
            if let Some(state) = event.push_state {
                self.set_push_state(state);
            }
            return;
        }

        match (event.worker, event.event_type) {
            (Worker::Refresher, EventType::Refresh) => {
                self.set_last_refresh(event.timestamp.clone());
            }
            (Worker::StatusUpdater, EventType::Success) => {
                self.set_notice(event.msg.clone(), false);
            }
            (Worker::StatusUpdater, EventType::Error) => {
                self.set_notice(event.msg.clone(), true);
            }
            _ => {}
        }
    }

    /// The order under the cursor on the current tab.
    pub fn selected_order<'a>(&self, board: &'a OrderBoard) -> Option<&'a Order> {
        self.view.visible(board).get(self.selected).copied()
    }

    /// Applies a key press and returns what the application should do next.
    pub fn handle_key(&mut self, key: KeyEvent, board: &OrderBoard) -> DashboardAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return DashboardAction::Quit;
        }

        match key.code {
            KeyCode::Esc if self.show_details => self.show_details = false,
            KeyCode::Esc | KeyCode::Char('q') => return DashboardAction::Quit,
            KeyCode::Tab => {
                self.view.tab = self.view.tab.toggled();
                self.selected = 0;
                self.show_details = false;
            }
            KeyCode::Char('s') => {
                self.view.sort = self.view.sort.toggled();
                self.selected = 0;
            }
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                let visible = self.view.visible(board).len();
                if self.selected + 1 < visible {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => {
                self.show_details = !self.show_details && self.selected_order(board).is_some();
            }
            KeyCode::Char('p') => return self.request_step(board, OrderStatus::Preparing),
            KeyCode::Char('r') => return self.request_step(board, OrderStatus::Served),
            _ => {}
        }
        DashboardAction::None
    }

    /// Asks for the selected order's next kitchen step, if `target` is that step.
    fn request_step(&mut self, board: &OrderBoard, target: OrderStatus) -> DashboardAction {
        let Some(order) = self.selected_order(board) else {
            return DashboardAction::None;
        };
        if order.status.next_kitchen_step() != Some(target) {
            self.set_notice(
                format!(
                    "Order {} is {} and cannot move to {}",
                    order.short_id(),
                    order.status.label(),
                    target.label()
                ),
                true,
            );
            return DashboardAction::None;
        }

        let action = DashboardAction::Transition {
            order_id: order.id.clone(),
            status: target,
        };
        self.set_notice(
            format!("Updating order {} to {}...", order.short_id(), target.label()),
            false,
        );
        action
    }

    fn clamp_selection(&mut self, board: &OrderBoard) {
        let visible = self.view.visible(board).len();
        if visible == 0 {
            self.selected = 0;
            self.show_details = false;
        } else if self.selected >= visible {
            self.selected = visible - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::view::Tab;
    use crate::environment::Environment;
    use crate::events::PushState;
    use crate::logging::LogLevel;
    use crate::order::testing::{order_at, t0};
    use crate::ui::app::UIConfig;
    use chrono::Duration;
    use std::time::Instant;

    fn dashboard() -> DashboardState {
        DashboardState::new(
            Environment::Local,
            Instant::now(),
            UIConfig::new(false, None, None),
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn board() -> OrderBoard {
        let mut board = OrderBoard::new();
        board.on_order_created(order_at("p1", OrderStatus::Pending, t0()));
        board.on_order_created(order_at(
            "c1",
            OrderStatus::Preparing,
            t0() + Duration::minutes(1),
        ));
        board.on_order_created(order_at(
            "s1",
            OrderStatus::Served,
            t0() + Duration::minutes(2),
        ));
        board
    }

    #[test]
    fn start_preparing_on_pending_order() {
        let board = board();
        let mut state = dashboard();
        state.update_at(&board, t0() + Duration::minutes(20));

        assert_eq!(
            state.handle_key(press(KeyCode::Char('p')), &board),
            DashboardAction::Transition {
                order_id: "p1".to_string(),
                status: OrderStatus::Preparing,
            }
        );
        // Wrong step for a pending order.
        assert_eq!(
            state.handle_key(press(KeyCode::Char('r')), &board),
            DashboardAction::None
        );
        assert!(state.notice().is_some_and(|n| n.is_error));
    }

    #[test]
    fn mark_ready_on_preparing_order() {
        let board = board();
        let mut state = dashboard();
        state.update_at(&board, t0());

        state.handle_key(press(KeyCode::Down), &board);
        assert_eq!(
            state.handle_key(press(KeyCode::Char('r')), &board),
            DashboardAction::Transition {
                order_id: "c1".to_string(),
                status: OrderStatus::Served,
            }
        );
    }

    #[test]
    fn history_tab_offers_no_actions() {
        let board = board();
        let mut state = dashboard();
        state.handle_key(press(KeyCode::Tab), &board);
        state.update_at(&board, t0());

        assert_eq!(state.view.tab, Tab::History);
        assert_eq!(state.selected_order(&board).map(|o| o.id.as_str()), Some("s1"));
        assert_eq!(
            state.handle_key(press(KeyCode::Char('p')), &board),
            DashboardAction::None
        );
        assert_eq!(
            state.handle_key(press(KeyCode::Char('r')), &board),
            DashboardAction::None
        );
    }

    #[test]
    fn selection_follows_sort_and_stays_in_range() {
        let board = board();
        let mut state = dashboard();
        state.update_at(&board, t0());

        for _ in 0..5 {
            state.handle_key(press(KeyCode::Down), &board);
        }
        assert_eq!(state.selected, 1);

        state.handle_key(press(KeyCode::Char('s')), &board);
        assert_eq!(state.selected_order(&board).map(|o| o.id.as_str()), Some("c1"));

        // The selected order moves to history; the cursor is pulled back in range.
        let mut board = board;
        board.on_order_updated(order_at(
            "p1",
            OrderStatus::Served,
            t0(),
        ));
        state.selected = 1;
        state.update_at(&board, t0());
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn escape_closes_details_before_quitting() {
        let board = board();
        let mut state = dashboard();
        state.update_at(&board, t0());

        state.handle_key(press(KeyCode::Enter), &board);
        assert!(state.show_details);
        assert_eq!(
            state.handle_key(press(KeyCode::Esc), &board),
            DashboardAction::None
        );
        assert!(!state.show_details);
        assert_eq!(
            state.handle_key(press(KeyCode::Esc), &board),
            DashboardAction::Quit
        );
        assert_eq!(
            state.handle_key(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &board
            ),
            DashboardAction::Quit
        );
    }

    #[test]
    fn events_update_header_and_notice() {
        let board = board();
        let mut state = dashboard();
        state.add_event(WorkerEvent::push_state_change(
            PushState::Live,
            "Live order updates connected".to_string(),
        ));
        state.add_event(WorkerEvent::refresher_with_level(
            "Refreshed 3 orders".to_string(),
            EventType::Refresh,
            LogLevel::Debug,
        ));
        state.add_event(WorkerEvent::status_updater_with_level(
            "Failed to update order status: HTTP error with status 500: boom".to_string(),
            EventType::Error,
            LogLevel::Error,
        ));
        state.update_at(&board, t0() + Duration::minutes(16));

        assert_eq!(state.push_state(), PushState::Live);
        assert!(state.last_refresh().is_some());
        assert!(state.notice().is_some_and(|n| n.is_error));
        assert_eq!(state.activity_logs.len(), 3);
        assert_eq!(state.stats.active, 2);
        assert_eq!(state.stats.urgent, 1);
    }
}
