//! Splash screen shown while the first refresh is in flight.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub const LOGO_NAME: &str = r#"
  ██╗  ██╗ ██╗ ████████╗  ██████╗ ██╗  ██╗ ███████╗ ███╗   ██╗
  ██║ ██╔╝ ██║ ╚══██╔══╝ ██╔════╝ ██║  ██║ ██╔════╝ ████╗  ██║
  █████╔╝  ██║    ██║    ██║      ███████║ █████╗   ██╔██╗ ██║
  ██╔═██╗  ██║    ██║    ██║      ██╔══██║ ██╔══╝   ██║╚██╗██║
  ██║  ██╗ ██║    ██║    ╚██████╗ ██║  ██║ ███████╗ ██║ ╚████║
  ╚═╝  ╚═╝ ╚═╝    ╚═╝     ╚═════╝ ╚═╝  ╚═╝ ╚══════╝ ╚═╝  ╚═══╝
"#;

pub fn render_splash(f: &mut Frame) {
    let mut lines: Vec<Line> = LOGO_NAME
        .trim_matches('\n')
        .lines()
        .map(|line| {
            Span::styled(
                line.to_string(),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )
            .into()
        })
        .collect();

    lines.push(Line::from(Span::raw(" ")));

    lines.push(
        Span::styled(
            "order board",
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        )
        .into(),
    );
    lines.push(
        Span::styled(
            format!("Version {}", env!("CARGO_PKG_VERSION")),
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::ITALIC),
        )
        .into(),
    );

    let height = lines.len() as u16;
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(f.area());

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
