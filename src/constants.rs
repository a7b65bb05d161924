//! Application constants
//!
//! Centralized location for storage keys, timings and layout thresholds.

/// Application name
pub const APP_NAME: &str = "Folio";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Suffix appended to every page title
pub const SITE_TITLE: &str = "Developer Portfolio";

/// Directory name under the platform data/config dirs
pub const DATA_DIR_NAME: &str = "folio";

/// Key/value file inside the data directory
pub const STORAGE_FILE: &str = "storage.json";

/// Storage key holding `"dark"` or `"light"`
pub const THEME_KEY: &str = "theme";

/// Storage key set once the welcome flow has run
pub const FIRST_VISIT_KEY: &str = "has_visited";

/// Key that starts a two-key "go to" sequence
pub const SEQUENCE_PREFIX: char = 'g';

pub const DEFAULT_SEQUENCE_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_NOTIFICATION_SECS: u64 = 5;
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1000;

/// Delay before the shortcut help opens on a first visit
pub const WELCOME_HELP_DELAY_MS: u64 = 2000;

/// App actor timer resolution
pub const TICK_MS: u64 = 100;

/// Terminals narrower than this get the collapsed menu
pub const NARROW_WIDTH: u16 = 70;

/// Route history depth kept for "back"
pub const MAX_HISTORY: usize = 32;

/// Column width page text is wrapped to
pub const CONTENT_WIDTH: usize = 72;

pub const WELCOME_MESSAGE: &str = "Welcome! Press 'K' to view keyboard shortcuts";
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const SUBMIT_FAILURE_MESSAGE: &str = "Failed to send message. Please try again.";
