//! Headless mode execution

use super::{
    SessionData,
    messages::{
        print_session_exit_success, print_session_expired, print_session_shutdown,
        print_session_starting,
    },
};
use crate::board::report::summary_line;
use crate::board::view::BoardStats;
use crate::consts::cli_consts::ui::FRAME_INTERVAL;
use crate::logging::init_console_logger;
use chrono::Utc;
use std::error::Error;

/// Runs the board without a terminal UI
///
/// This function handles:
/// 1. Console event logging
/// 2. Ctrl+C shutdown handling
/// 3. Applying board updates and printing a summary whenever the counts change
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    init_console_logger();
    print_session_starting("headless", session.identity.kitchen());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ticker = tokio::time::interval(FRAME_INTERVAL);
    let mut last_stats: Option<BoardStats> = None;
    let mut expired = false;

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            Some(event) = session.event_receiver.recv() => {
                if event.should_display() {
                    println!("{}", event);
                }
            }
            _ = ticker.tick() => {
                let pumped = session.synchronizer.pump();
                if pumped.session_expired {
                    expired = true;
                    break;
                }
                if pumped.applied > 0 {
                    log::debug!("Applied {} board updates", pumped.applied);
                }
                let stats = BoardStats::compute(session.synchronizer.board(), Utc::now());
                if last_stats != Some(stats) {
                    println!("{}", summary_line(&stats));
                    last_stats = Some(stats);
                }
            }
        }
    }

    session.synchronizer.teardown();
    print_session_shutdown();
    session.synchronizer.wait_for_workers().await;
    if expired {
        print_session_expired();
    } else {
        print_session_exit_success();
    }
    Ok(())
}
