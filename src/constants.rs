//! Constants used throughout the application
//!
//! This module centralizes UI text and other constant values
//! to improve maintainability and consistency.

// Panel labels
pub const NAME_LABEL_PLACEHOLDER: &str = "No Project Synced";
pub const NAME_LABEL_PREFIX: &str = "Project Tag: ";
pub const TIMESTAMP_LABEL_PREFIX: &str = "Last Synced at: ";

// Progress indicator titles
pub const PROJECT_PROGRESS_TITLE: &str = "Syncing Project Data";
pub const CONTAINER_PROGRESS_PREFIX: &str = "Syncing ";
pub const OUTCOME_DONE: &str = "Done";
pub const OUTCOME_FAILED: &str = "Failed";

// Trigger buttons
pub const SYNC_PROJECT_BUTTON: &str = "Sync Project";
pub const SYNC_CONTAINERS_BUTTON: &str = "Sync Containers";

// Section titles
pub const PANEL_TITLE: &str = " Project Sync ";
pub const PROGRESS_SECTION_TITLE: &str = " Progress ";
pub const LOCALES_SECTION_TITLE: &str = " Locales ";
pub const LOCALE_NONE: &str = "None";
pub const PANEL_HIDDEN_HINT: &str = "Panel hidden - press 'v' to show it again";
pub const KEY_HINTS: &str = "p: sync project • c: sync containers • ↑/↓: locale • Enter: cycle • v: hide • G: logs • q: quit";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const DIALOG_TITLE_LOGS: &str = "🔍 Logs - Press 'Esc', 'G' or 'q' to close";

// Timing defaults and limits (milliseconds)
pub const DEFAULT_TICK_RATE_MS: u64 = 100;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
pub const MAX_INTERVAL_MS: u64 = 60_000;

/// Smallest in-memory log buffer the config accepts
pub const MIN_LOG_ENTRIES: usize = 10;
