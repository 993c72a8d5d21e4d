pub mod cli_consts {
    //! Board Configuration Constants
    //!
    //! This module contains the tunables of the order board,
    //! organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of buffered worker events
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Maximum number of board updates waiting to be applied
    pub const UPDATE_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // BOARD CONFIGURATION
    // =============================================================================

    /// Order classification thresholds
    pub mod board {
        use std::time::Duration;

        /// Active orders older than this (strictly) are urgent.
        pub const URGENT_AFTER_MINUTES: i64 = 15;

        /// Full refresh period. Fixed: failures do not back off.
        pub const REFRESH_INTERVAL_MS: u64 = 5_000;

        /// Helper function to get the refresh interval
        pub const fn refresh_interval() -> Duration {
            Duration::from_millis(REFRESH_INTERVAL_MS)
        }
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// HTTP client configuration
    pub mod http {
        use std::time::Duration;

        pub const CONNECT_TIMEOUT_SECS: u64 = 10;
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    /// Push subscription configuration
    pub mod push {
        use std::time::Duration;

        /// Delay before reopening a dropped push connection (milliseconds)
        pub const RECONNECT_DELAY_MS: u64 = 3_000;

        /// Helper function to get the reconnect delay
        pub const fn reconnect_delay() -> Duration {
            Duration::from_millis(RECONNECT_DELAY_MS)
        }
    }

    // =============================================================================
    // DASHBOARD CONFIGURATION
    // =============================================================================

    pub mod ui {
        use std::time::Duration;

        /// How long the splash screen stays up unless a key is pressed
        pub const SPLASH_DURATION: Duration = Duration::from_secs(2);

        /// Key poll timeout, which is also the redraw period
        pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

        /// How long a footer notice stays visible
        pub const NOTICE_DURATION: Duration = Duration::from_secs(6);
    }
}
