//! Presentation filter and sort over the board.
//!
//! Nothing here is stored: tabs, sorting and urgency are derived from the board
//! on every render pass.

use super::OrderBoard;
use crate::consts::cli_consts::board::URGENT_AFTER_MINUTES;
use crate::order::Order;
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, strum::Display)]
pub enum Tab {
    /// Pending and preparing orders
    #[default]
    Active,
    /// Served, paid and cancelled orders
    History,
}

impl Tab {
    pub fn toggled(self) -> Self {
        match self {
            Tab::Active => Tab::History,
            Tab::History => Tab::Active,
        }
    }

    pub fn includes(self, order: &Order) -> bool {
        match self {
            Tab::Active => order.status.is_active(),
            Tab::History => !order.status.is_active(),
        }
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, strum::Display)]
pub enum SortOrder {
    #[default]
    Oldest,
    Newest,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Oldest => SortOrder::Newest,
            SortOrder::Newest => SortOrder::Oldest,
        }
    }
}

/// An active order is urgent once strictly more than the threshold has passed
/// since it was created. `now` is the local clock, not the backend's.
pub fn is_urgent(order: &Order, now: DateTime<Utc>) -> bool {
    order.status.is_active() && now - order.created_at > Duration::minutes(URGENT_AFTER_MINUTES)
}

/// Counters shown above the order list.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct BoardStats {
    pub active: usize,
    pub history: usize,
    pub urgent: usize,
}

impl BoardStats {
    pub fn compute(board: &OrderBoard, now: DateTime<Utc>) -> Self {
        board
            .orders()
            .iter()
            .fold(BoardStats::default(), |mut stats, order| {
                if order.status.is_active() {
                    stats.active += 1;
                } else {
                    stats.history += 1;
                }
                if is_urgent(order, now) {
                    stats.urgent += 1;
                }
                stats
            })
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ViewState {
    pub tab: Tab,
    pub sort: SortOrder,
}

impl ViewState {
    /// Orders on the selected tab, sorted by creation time.
    ///
    /// The sort is stable, so equal timestamps keep collection order.
    pub fn visible<'a>(&self, board: &'a OrderBoard) -> Vec<&'a Order> {
        let mut orders: Vec<&Order> = board
            .orders()
            .iter()
            .filter(|order| self.tab.includes(order))
            .collect();
        match self.sort {
            SortOrder::Oldest => orders.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortOrder::Newest => orders.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
        orders
    }
}
