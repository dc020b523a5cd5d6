//! Operator-visible history of what the dashboard did.
//!
//! Entries are [`Notice`]s drained from the dashboard after every transition,
//! plus the odd UI-side warning, stamped with the local time they arrived.

use api::{Notice, Severity};
use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub notice: Notice,
}

#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
    pub visible: bool,
    pub errors_only: bool,
}

impl ActivityLog {
    pub fn record(&mut self, notice: Notice) {
        self.record_at(current_time(), notice);
    }

    fn record_at(&mut self, timestamp: String, notice: Notice) {
        self.entries.push(LogEntry { timestamp, notice });
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.record(Notice {
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.notice.severity == Severity::Error)
            .count()
    }

    /// Newest first, restricted to errors when `errors_only` is set.
    pub fn shown(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        let errors_only = self.errors_only;
        self.entries
            .iter()
            .rev()
            .filter(move |e| !errors_only || e.notice.severity == Severity::Error)
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
