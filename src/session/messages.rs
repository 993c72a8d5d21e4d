//! Unified messaging system for session operations

// ANSI Color Codes for session messages
pub const COLOR_INFO: &str = "\x1b[1;36m"; // Bold Cyan
pub const COLOR_SUCCESS: &str = "\x1b[1;32m"; // Bold Green
pub const COLOR_ERROR: &str = "\x1b[1;31m"; // Bold Red
pub const COLOR_RESET: &str = "\x1b[0m";

/// Session-specific message types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMessage {
    /// Normal session start/shutdown messages
    Info(String),
    /// Success messages for completed operations
    Success(String),
    /// The session ended because of a problem the operator has to fix
    Error(String),
}

impl SessionMessage {
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self::Success(msg.into())
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error(msg.into())
    }

    /// The message with its colored tag, as printed.
    pub fn render(&self) -> String {
        match self {
            Self::Info(msg) => format!("{}[INFO]{} {}", COLOR_INFO, COLOR_RESET, msg),
            Self::Success(msg) => format!("{}[SUCCESS]{} {}", COLOR_SUCCESS, COLOR_RESET, msg),
            Self::Error(msg) => format!("{}[ERROR]{} {}", COLOR_ERROR, COLOR_RESET, msg),
        }
    }

    pub fn print(&self) {
        match self {
            Self::Error(_) => eprintln!("{}", self.render()),
            _ => println!("{}", self.render()),
        }
    }
}

/// Print session startup message
pub fn print_session_starting(mode: &str, restaurant: &str) {
    SessionMessage::info(format!("Starting {} mode for kitchen: {}", mode, restaurant)).print();
}

/// Print session shutdown message
pub fn print_session_shutdown() {
    SessionMessage::info("Shutting down...").print();
}

/// Print session exit message
pub fn print_session_exit_success() {
    SessionMessage::success("Kitchen board exited successfully").print();
}

/// Print the message shown when the backend stops accepting the stored token
pub fn print_session_expired() {
    SessionMessage::error(
        "Your session has expired. Please log in again with `kitchen-board login --token <TOKEN>`.",
    )
    .print();
}
