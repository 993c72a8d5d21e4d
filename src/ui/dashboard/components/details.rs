//! Order details overlay
//!
//! Line items with modifications and totals, plus the notes attached to the
//! order. Notes are shown as stored; they are not edited from the board.

use super::super::state::DashboardState;
use super::super::utils::{centered_rect, get_status_color};
use crate::order::Order;

use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

fn detail_lines(order: &Order, state: &DashboardState) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Gray);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Table: ", label),
            Span::raw(order.table_label().to_string()),
            Span::raw("   "),
            Span::styled("Status: ", label),
            Span::styled(
                order.status.label(),
                Style::default().fg(get_status_color(order.status)),
            ),
            Span::raw("   "),
            Span::styled("Placed: ", label),
            Span::raw(order.age_label(state.now)),
        ]),
        Line::from(""),
    ];

    for item in &order.items {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} x {}", item.quantity, item.display_name()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {:.2}", item.line_total()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        for modification in &item.modifications {
            lines.push(Line::from(Span::styled(
                format!("    - {}", modification),
                Style::default().fg(Color::LightYellow),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Total: ", label),
        Span::styled(
            format!("{:.2}", order.total()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]));

    if let Some(instructions) = order.special_instructions.as_deref() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Special instructions", label)));
        lines.push(Line::from(Span::styled(
            instructions.to_string(),
            Style::default().fg(Color::LightRed),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Kitchen note", label)));
    lines.push(match order.note.as_deref() {
        Some(note) if !note.trim().is_empty() => Line::from(note.to_string()),
        _ => Line::from(Span::styled(
            "(none)",
            Style::default().fg(Color::DarkGray),
        )),
    });
    lines
}

pub fn render_details_overlay(f: &mut Frame, order: &Order, state: &DashboardState) {
    let area = centered_rect(60, 70, f.area());
    let block = Block::default()
        .title(format!("ORDER #{}", order.short_id()))
        .title_bottom(Line::from(" [Enter/Esc] Close ").centered())
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::LightYellow))
        .padding(Padding::uniform(1));

    let details = Paragraph::new(detail_lines(order, state))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, area);
    f.render_widget(details, area);
}
