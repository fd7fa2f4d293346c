use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use chrono::Local;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const DEFAULT_MAX_ENTRIES: usize = 500;

/// Shared log buffer that backs the in-app log view.
///
/// [`Logger::install`] routes the `log` facade into it, so every `info!`,
/// `warn!` and friends shows up in the UI. Writing to a file is optional.
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<VecDeque<String>>>,
    max_entries: usize,
}

impl Logger {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    /// Keep at most `max_entries` entries, dropping the oldest first.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            logs: Arc::new(Mutex::new(VecDeque::with_capacity(max_entries.min(DEFAULT_MAX_ENTRIES)))),
            max_entries: max_entries.max(1),
        }
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        Self::with_capacity(config.max_entries)
    }

    /// Add a log entry
    pub fn log(&self, message: String) {
        let timestamp = Local::now().format("%H:%M:%S%.3f").to_string();
        let formatted_message = format!("[{}] {}", timestamp, message);

        if let Ok(mut logs) = self.logs.lock() {
            logs.push_back(formatted_message);
            while logs.len() > self.max_entries {
                logs.pop_front();
            }
        }
    }

    /// Get all logs sorted by date (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    pub fn len(&self) -> usize {
        self.logs.lock().map(|logs| logs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    /// Install the global `log` backend.
    ///
    /// Records always land in this buffer; with `config.enabled` they are also
    /// appended to [`Logger::get_log_file_path`]. Fails if a global logger is
    /// already installed.
    pub fn install(&self, config: &LoggingConfig) -> Result<()> {
        let buffer = self.clone();
        let mut dispatch = fern::Dispatch::new().level(config.level_filter()?).chain(
            fern::Dispatch::new()
                .format(|out, message, record| out.finish(format_args!("{:<5} {}", record.level(), message)))
                .chain(fern::Output::call(move |record| buffer.log(record.args().to_string()))),
        );

        if config.enabled {
            let path = Self::get_log_file_path()?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }
            let file = fern::log_file(&path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(
                fern::Dispatch::new()
                    .format(|out, message, record| {
                        out.finish(format_args!(
                            "[{} {} {}] {}",
                            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                            record.level(),
                            record.target(),
                            message
                        ))
                    })
                    .chain(file),
            );
        }

        dispatch.apply().context("A global logger is already installed")?;
        Ok(())
    }

    /// Location of the log file written when file logging is enabled
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))
            .map(|dir| dir.join("syncpanel").join("syncpanel.log"))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
