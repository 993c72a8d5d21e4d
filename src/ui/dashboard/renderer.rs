//! Dashboard main renderer

use super::components::{details, footer, header, logs, orders};
use super::state::DashboardState;
use crate::board::OrderBoard;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState, board: &OrderBoard) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_chunks[1]);

    orders::render_orders_panel(f, content_chunks[0], state, board);
    logs::render_logs_panel(f, content_chunks[1], state);
    footer::render_footer(f, main_chunks[2], state);

    if state.show_details {
        if let Some(order) = state.selected_order(board) {
            details::render_details_overlay(f, order, state);
        }
    }
}
