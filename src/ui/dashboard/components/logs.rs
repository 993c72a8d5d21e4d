//! Dashboard logs panel component
//!
//! Renders the worker activity log, newest first

use super::super::state::DashboardState;
use super::super::utils::{clean_http_error_message, format_compact_timestamp, get_worker_color};
use crate::events::EventType;
use crate::logging::LogLevel;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_logs_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    // Borders plus padding take three rows
    let log_count = (area.height.saturating_sub(3) as usize).max(1);

    let log_lines: Vec<Line> = state
        .activity_logs
        .iter()
        .filter(|event| event.should_display())
        .rev()
        .take(log_count)
        .map(|event| {
            let status_icon = match (event.event_type, event.log_level) {
                (EventType::Success, _) => "✔",
                (EventType::Error, LogLevel::Error) => "✖",
                (EventType::Error, _) => "!",
                (EventType::Refresh, _) => "↻",
                (EventType::Waiting, _) | (EventType::StateChange, _) => "·",
            };
            let icon_color = match event.event_type {
                EventType::Success => Color::Green,
                EventType::Error => Color::LightRed,
                _ => Color::DarkGray,
            };

            Line::from(vec![
                Span::styled(format!("{} ", status_icon), Style::default().fg(icon_color)),
                Span::styled(
                    format!("{} ", format_compact_timestamp(&event.timestamp)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    clean_http_error_message(&event.msg),
                    Style::default().fg(get_worker_color(&event.worker)),
                ),
            ])
        })
        .collect();

    let log_paragraph = if log_lines.is_empty() {
        Paragraph::new(vec![Line::from("Connecting to the kitchen...")])
    } else {
        Paragraph::new(log_lines)
    };

    let logs_block = Block::default()
        .title("ACTIVITY")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    f.render_widget(
        log_paragraph.block(logs_block).wrap(Wrap { trim: true }),
        area,
    );
}
