//! Action affordance notifications

use colored::Colorize;

/// Badge shown when a lookup fails
pub const ERROR_BADGE: &str = "!";

pub const ERROR_TITLE: &str = "Error connecting, are you logged in?";

pub const SUCCESS_TITLE: &str = "Open in editor";

/// Receiver for per-tab UI state changes
pub trait NotificationSink: Send + Sync {
    fn enable(&self, tab_id: u64);

    /// Disable one tab's action, or every tab's when `tab_id` is `None`
    fn disable(&self, tab_id: Option<u64>);

    fn set_badge(&self, tab_id: u64, text: &str);

    fn set_title(&self, tab_id: u64, title: &str);
}

/// Writes notifications to stderr
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn enable(&self, tab_id: u64) {
        log::debug!("tab {}: action enabled", tab_id);
    }

    fn disable(&self, tab_id: Option<u64>) {
        match tab_id {
            Some(id) => log::debug!("tab {}: action disabled", id),
            None => log::debug!("action disabled for all tabs"),
        }
    }

    fn set_badge(&self, tab_id: u64, text: &str) {
        if text == ERROR_BADGE {
            eprintln!("{} tab {}", text.red().bold(), tab_id);
        } else {
            log::debug!("tab {}: badge {:?}", tab_id, text);
        }
    }

    fn set_title(&self, tab_id: u64, title: &str) {
        if title == ERROR_TITLE {
            eprintln!("  {} {}", "→".dimmed(), title);
        } else {
            log::debug!("tab {}: title {:?}", tab_id, title);
        }
    }
}
