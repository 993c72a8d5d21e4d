//! Order list component

use super::super::state::DashboardState;
use super::super::utils::get_status_color;
use crate::board::OrderBoard;
use crate::board::view::{Tab, is_urgent};
use crate::order::{Order, OrderStatus};

use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table};

/// Label of the action the kitchen can take on an order, if any.
pub fn action_label(status: OrderStatus) -> Option<&'static str> {
    match status.next_kitchen_step()? {
        OrderStatus::Preparing => Some("[P] Start Preparing"),
        OrderStatus::Served => Some("[R] Mark Ready"),
        _ => None,
    }
}

fn items_summary(order: &Order) -> String {
    order
        .items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_orders_panel(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    state: &DashboardState,
    board: &OrderBoard,
) {
    let visible = state.view.visible(board);
    let title = format!("{} ORDERS", state.view.tab.to_string().to_uppercase());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    if visible.is_empty() {
        let message = match state.view.tab {
            Tab::Active => "No active orders. New orders will appear here.",
            Tab::History => "No completed orders yet.",
        };
        let empty = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let show_actions = state.view.tab == Tab::Active;
    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .map(|(index, order)| {
            let urgent = is_urgent(order, state.now);
            let age_style = if urgent {
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let action = if show_actions {
                action_label(order.status).unwrap_or("")
            } else {
                ""
            };

            let mut row = Row::new(vec![
                Cell::from(if urgent { "!" } else { " " }).style(age_style),
                Cell::from(format!("#{}", order.short_id())),
                Cell::from(order.table_label().to_string()),
                Cell::from(items_summary(order)),
                Cell::from(order.status.label())
                    .style(Style::default().fg(get_status_color(order.status))),
                Cell::from(order.age_label(state.now)).style(age_style),
                Cell::from(action).style(Style::default().fg(Color::LightYellow)),
            ]);
            if index == state.selected {
                row = row.style(
                    Style::default()
                        .bg(Color::Rgb(40, 48, 60))
                        .add_modifier(Modifier::BOLD),
                );
            }
            row
        })
        .collect();

    let header = Row::new(vec!["", "ORDER", "TABLE", "ITEMS", "STATUS", "AGE", ""])
        .style(Style::default().fg(Color::DarkGray))
        .bottom_margin(1);

    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Fill(1),
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Length(20),
        ],
    )
    .header(header)
    .column_spacing(1)
    .block(block);

    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::testing::order;

    #[test]
    fn actions_match_the_kitchen_steps() {
        assert_eq!(action_label(OrderStatus::Pending), Some("[P] Start Preparing"));
        assert_eq!(action_label(OrderStatus::Preparing), Some("[R] Mark Ready"));
        assert_eq!(action_label(OrderStatus::Served), None);
        assert_eq!(action_label(OrderStatus::Cancelled), None);
    }

    #[test]
    fn summarises_items() {
        assert_eq!(
            items_summary(&order("a", OrderStatus::Pending)),
            "1x Margherita"
        );
    }
}
