//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::ui::{FRAME_INTERVAL, SPLASH_DURATION};
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::sync::Synchronizer;
use crate::ui::dashboard::{DashboardAction, DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::Instant;
use tokio::sync::mpsc;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub restaurant_name: Option<String>,
    pub user_name: Option<String>,
}

impl UIConfig {
    pub fn new(
        with_background_color: bool,
        restaurant_name: Option<String>,
        user_name: Option<String>,
    ) -> Self {
        Self {
            with_background_color,
            restaurant_name,
            user_name,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// The kitchen order board.
    Dashboard(Box<DashboardState>),
}

/// Why the UI loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The operator quit.
    Quit,
    /// The backend rejected the token; the operator must log in again.
    SessionExpired,
}

/// Application state
pub struct App {
    /// The start time of the application, used for computing uptime.
    start_time: Instant,

    /// The environment in which the application is running.
    environment: Environment,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives events from worker tasks.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Owner of the order board.
    synchronizer: Synchronizer,

    ui_config: UIConfig,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        synchronizer: Synchronizer,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            environment,
            current_screen: Screen::Splash,
            event_receiver,
            synchronizer,
            ui_config,
        }
    }

    fn show_dashboard(&mut self) {
        let state = DashboardState::new(
            self.environment.clone(),
            self.start_time,
            self.ui_config.clone(),
        );
        self.current_screen = Screen::Dashboard(Box::new(state));
    }

    /// Hands the synchronizer back so the caller can wait for its workers.
    pub fn into_synchronizer(self) -> Synchronizer {
        self.synchronizer
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
///
/// The board is synchronized from the start, including while the splash is shown.
pub async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> std::io::Result<ExitReason> {
    let splash_start = Instant::now();

    loop {
        // Apply worker updates before drawing so every frame sees a consistent board
        if app.synchronizer.pump().session_expired {
            app.synchronizer.teardown();
            return Ok(ExitReason::SessionExpired);
        }

        while let Ok(event) = app.event_receiver.try_recv() {
            if let Screen::Dashboard(state) = &mut app.current_screen {
                state.add_event(event);
            }
        }

        if let Screen::Dashboard(state) = &mut app.current_screen {
            state.update(app.synchronizer.board());
        }
        terminal.draw(|f| render(f, &app.current_screen, &app.synchronizer))?;

        if matches!(app.current_screen, Screen::Splash) && splash_start.elapsed() >= SPLASH_DURATION
        {
            app.show_dashboard();
            continue;
        }

        // Poll for key events without blocking the runtime's other tasks for long
        if !event::poll(FRAME_INTERVAL)? {
            tokio::task::yield_now().await;
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == event::KeyEventKind::Release {
            continue;
        }

        let action = if let Screen::Dashboard(state) = &mut app.current_screen {
            state.handle_key(key, app.synchronizer.board())
        } else if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
            DashboardAction::Quit
        } else {
            // Any other key skips the splash screen
            app.show_dashboard();
            DashboardAction::None
        };

        match action {
            DashboardAction::None => {}
            DashboardAction::Quit => {
                app.synchronizer.teardown();
                return Ok(ExitReason::Quit);
            }
            DashboardAction::Transition { order_id, status } => {
                if let Err(e) = app.synchronizer.request_status_transition(&order_id, status) {
                    if let Screen::Dashboard(state) = &mut app.current_screen {
                        state.set_notice(e.to_string(), true);
                    }
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen, synchronizer: &Synchronizer) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state, synchronizer.board()),
    }
}
