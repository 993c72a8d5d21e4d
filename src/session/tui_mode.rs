//! TUI mode execution

use super::{
    SessionData,
    messages::{
        print_session_exit_success, print_session_expired, print_session_shutdown,
        print_session_starting,
    },
};
use crate::ui::{self, ExitReason, UIConfig};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{error::Error, io};

/// Runs the application in TUI mode
///
/// This function handles:
/// 1. Terminal setup and cleanup
/// 2. UI application initialization and execution
/// 3. Stopping the board's workers once the UI exits
pub async fn run_tui_mode(
    session: SessionData,
    with_background: bool,
) -> Result<(), Box<dyn Error>> {
    print_session_starting("TUI", session.identity.kitchen());

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Initialize the terminal with Crossterm backend
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let ui_config = UIConfig::new(
        with_background,
        session.identity.restaurant_name.clone(),
        session.identity.user_name.clone(),
    );
    let mut app = ui::App::new(
        session.environment,
        session.event_receiver,
        session.synchronizer,
        ui_config,
    );

    let result = ui::run(&mut terminal, &mut app).await;

    // Clean up the terminal after running the application
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Stop workers whether the UI exited cleanly or not
    let mut synchronizer = app.into_synchronizer();
    synchronizer.teardown();
    print_session_shutdown();
    synchronizer.wait_for_workers().await;

    match result? {
        ExitReason::Quit => print_session_exit_success(),
        ExitReason::SessionExpired => print_session_expired(),
    }
    Ok(())
}
