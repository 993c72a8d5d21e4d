//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Worker;
use crate::order::OrderStatus;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::Color;
use std::time::Duration;

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::Refresher => Color::Cyan,
        Worker::PushListener => Color::LightMagenta,
        Worker::StatusUpdater => Color::Green,
    }
}

pub fn get_status_color(status: OrderStatus) -> Color {
    match status {
        OrderStatus::Pending => Color::Yellow,
        OrderStatus::Preparing => Color::LightBlue,
        OrderStatus::Served => Color::Green,
        OrderStatus::Paid => Color::Gray,
        OrderStatus::Cancelled => Color::DarkGray,
    }
}

/// Format compact timestamp with date and time from full timestamp
/// Whole minutes, with hours once past the first one.
pub fn format_uptime(uptime: Duration) -> String {
    let minutes = uptime.as_secs() / 60;
    if minutes >= 60 {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}

pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("Reqwest error") && msg.contains("timed out") {
        return "Request timed out - retrying...".to_string();
    }
    if msg.contains("Reqwest error") {
        return "Network error - retrying...".to_string();
    }
    msg.to_string()
}

/// A rectangle of the given percentage size centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compacts_event_timestamps() {
        assert_eq!(format_compact_timestamp("2024-05-01 12:34:56"), "05-01 12:34");
        assert_eq!(format_compact_timestamp("garbled"), "garbled");
        assert_eq!(format_uptime(Duration::from_secs(59)), "0m");
        assert_eq!(format_uptime(Duration::from_secs(61 * 60)), "1h 01m");
    }

    #[test]
    fn hides_transport_error_details() {
        assert_eq!(
            clean_http_error_message("Failed to refresh orders: Reqwest error: error sending request"),
            "Network error - retrying..."
        );
        assert_eq!(
            clean_http_error_message("HTTP error with status 404: Order not found"),
            "HTTP error with status 404: Order not found"
        );
    }
}
