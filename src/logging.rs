use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "kitchen_board=info,warn";

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Most verbose level any directive in `directives` enables, or `None` when
/// everything is switched off.
pub fn threshold_for(directives: &str) -> Option<LogLevel> {
    threshold_of(&EnvFilter::new(directives))
}

fn threshold_of(filter: &EnvFilter) -> Option<LogLevel> {
    match filter.max_level_hint() {
        Some(hint) if hint == LevelFilter::OFF => None,
        Some(hint) if hint == LevelFilter::ERROR => Some(LogLevel::Error),
        Some(hint) if hint == LevelFilter::WARN => Some(LogLevel::Warn),
        Some(hint) if hint == LevelFilter::INFO => Some(LogLevel::Info),
        Some(hint) if hint == LevelFilter::DEBUG => Some(LogLevel::Debug),
        Some(_) => Some(LogLevel::Trace),
        None => Some(LogLevel::Info),
    }
}

pub fn should_log(event_level: LogLevel, threshold: Option<LogLevel>) -> bool {
    threshold.is_some_and(|threshold| event_level >= threshold)
}

/// Whether a worker event at `event_level` passes the `RUST_LOG` filter.
pub fn should_log_with_env(event_level: LogLevel) -> bool {
    should_log(event_level, threshold_of(&env_filter()))
}

/// Installs a stderr subscriber filtered by `RUST_LOG`. Only headless mode
/// calls this; `log` records are bridged into it.
///
/// Calling this more than once is harmless; later calls keep the first subscriber.
pub fn init_console_logger() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_follows_the_most_verbose_directive() {
        assert_eq!(threshold_for("debug"), Some(LogLevel::Debug));
        assert_eq!(threshold_for("warn"), Some(LogLevel::Warn));
        assert_eq!(threshold_for("error"), Some(LogLevel::Error));
        assert_eq!(threshold_for("trace"), Some(LogLevel::Trace));
        assert_eq!(
            threshold_for("hyper=warn,kitchen_board=debug"),
            Some(LogLevel::Debug)
        );
        assert_eq!(threshold_for(DEFAULT_FILTER), Some(LogLevel::Info));
    }

    #[test]
    fn off_disables_everything() {
        assert_eq!(threshold_for("off"), None);
        assert!(!should_log(LogLevel::Error, threshold_for("off")));
    }

    #[test]
    fn test_should_log() {
        assert!(should_log(LogLevel::Error, Some(LogLevel::Debug)));
        assert!(should_log(LogLevel::Warn, Some(LogLevel::Warn)));
        assert!(!should_log(LogLevel::Debug, Some(LogLevel::Error)));
        assert!(!should_log(LogLevel::Info, Some(LogLevel::Error)));
    }
}
