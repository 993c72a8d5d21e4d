//! Plain-text rendering of the board for the console.

use super::OrderBoard;
use super::view::{BoardStats, ViewState, is_urgent};
use crate::order::Order;
use chrono::{DateTime, Utc};

/// One line per order: id, table, status, age, items.
pub fn order_line(order: &Order, now: DateTime<Utc>) -> String {
    let items = order
        .items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} #{:<6} {:<10} {:<9} {:<11} {}",
        if is_urgent(order, now) { "!" } else { " " },
        order.short_id(),
        order.table_label(),
        order.status.label(),
        order.age_label(now),
        items
    )
}

pub fn summary_line(stats: &BoardStats) -> String {
    format!(
        "Board: {} active ({} urgent), {} in history",
        stats.active, stats.urgent, stats.history
    )
}

/// The visible orders for `view`, or a placeholder when there are none.
pub fn view_lines(board: &OrderBoard, view: &ViewState, now: DateTime<Utc>) -> Vec<String> {
    let visible = view.visible(board);
    if visible.is_empty() {
        return vec![format!("No {} orders.", view.tab.to_string().to_lowercase())];
    }
    visible
        .into_iter()
        .map(|order| order_line(order, now))
        .collect()
}
