//! Dashboard footer component
//!
//! Renders the latest notice above the key hints

use super::super::state::DashboardState;
use crate::board::view::Tab;

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn key_hints(tab: Tab) -> &'static str {
    match tab {
        Tab::Active => {
            "[Q] Quit | [Tab] History | [S] Sort | [↑↓] Select | [Enter] Details | [P] Start Preparing | [R] Mark Ready"
        }
        Tab::History => "[Q] Quit | [Tab] Active | [S] Sort | [↑↓] Select | [Enter] Details",
    }
}

pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let notice_line = match state.notice() {
        Some(notice) => {
            let color = if notice.is_error {
                Color::LightRed
            } else {
                Color::LightGreen
            };
            Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)))
        }
        None => Line::from(""),
    };
    let hints_line = Line::from(Span::styled(
        key_hints(state.view.tab),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));

    let footer = Paragraph::new(vec![notice_line, hints_line])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
