//! Dashboard header component
//!
//! Renders the title, connection badge, counters and tab bar

use super::super::state::DashboardState;
use super::super::utils::{format_compact_timestamp, format_uptime};
use crate::board::view::Tab;
use crate::events::PushState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use std::time::Duration;

/// Restaurant, signed-in user, environment and uptime on one line.
fn title_text(state: &DashboardState, uptime: Duration) -> String {
    let mut title = format!("KITCHEN BOARD v{}", env!("CARGO_PKG_VERSION"));
    if let Some(name) = &state.restaurant_name {
        title.push_str(&format!(" - {}", name.to_uppercase()));
    }
    title.push_str(&format!(
        "  |  {} @ {}  |  up {}",
        state.user_name.as_deref().unwrap_or("staff"),
        state.environment,
        format_uptime(uptime)
    ));
    title
}

/// Render header with title, live state and tabs.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let title = Paragraph::new(title_text(state, state.start_time.elapsed()))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let status_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(header_chunks[1]);

    let selected = match state.view.tab {
        Tab::Active => 0,
        Tab::History => 1,
    };
    let tabs = Tabs::new(vec![
        format!("ACTIVE ({})", state.stats.active),
        format!("HISTORY ({})", state.stats.history),
    ])
    .select(selected)
    .style(Style::default().fg(Color::Gray))
    .highlight_style(
        Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD),
    )
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(tabs, status_chunks[0]);

    // Blink the live dot so a frozen screen is noticeable.
    let (badge, badge_color) = match state.push_state() {
        PushState::Live if (state.tick / 5) % 2 == 0 => ("● LIVE", Color::LightGreen),
        PushState::Live => ("○ LIVE", Color::LightGreen),
        PushState::Offline => ("○ OFFLINE", Color::LightRed),
    };
    let urgent_style = if state.stats.urgent > 0 {
        Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let refreshed = state
        .last_refresh()
        .map(format_compact_timestamp)
        .unwrap_or_else(|| "never".to_string());

    let status_line = Line::from(vec![
        Span::styled(
            badge,
            Style::default()
                .fg(badge_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("Urgent: {}", state.stats.urgent), urgent_style),
        Span::raw("  "),
        Span::styled(
            format!("Sort: {}", state.view.sort),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Refreshed: {}", refreshed),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let status = Paragraph::new(status_line)
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(status, status_chunks[1]);
}
