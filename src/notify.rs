//! User-facing notifications and activity history.

use chrono::{DateTime, Local, TimeDelta};

/// How long a notice stays on screen.
pub const NOTICE_TTL_SECS: i64 = 4;

/// Maximum number of entries kept in the activity history.
pub const HISTORY_LIMIT: usize = 100;

/// Notice severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A transient status message shown after a user interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Local>,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, message)
    }

    fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
            created_at: Local::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Visible notices plus a bounded history of everything shown.
#[derive(Default)]
pub struct Notices {
    active: Vec<Notice>,
    history: Vec<Notice>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        self.active.push(notice.clone());
        self.history.push(notice);

        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
    }

    /// Drop notices older than [`NOTICE_TTL_SECS`].
    pub fn expire(&mut self, now: DateTime<Local>) {
        let ttl = TimeDelta::seconds(NOTICE_TTL_SECS);
        self.active.retain(|n| now - n.created_at < ttl);
    }

    /// Dismiss a visible notice by position.
    pub fn dismiss(&mut self, index: usize) {
        if index < self.active.len() {
            self.active.remove(index);
        }
    }

    pub fn active(&self) -> &[Notice] {
        &self.active
    }

    pub fn history(&self) -> &[Notice] {
        &self.history
    }

    pub fn has_active(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_shows_and_records() {
        let mut notices = Notices::new();
        notices.push(Notice::info("Student Added", "Asha has been added successfully"));

        assert_eq!(notices.active().len(), 1);
        assert_eq!(notices.history().len(), 1);
        assert!(!notices.active()[0].is_error());
    }

    #[test]
    fn test_expire_keeps_history() {
        let mut notices = Notices::new();
        notices.push(Notice::error("Login Failed", "Invalid login credentials"));

        notices.expire(Local::now() + TimeDelta::seconds(NOTICE_TTL_SECS + 1));

        assert!(!notices.has_active());
        assert_eq!(notices.history().len(), 1);
    }

    #[test]
    fn test_fresh_notice_survives_expire() {
        let mut notices = Notices::new();
        notices.push(Notice::info("Signed Out", "See you soon"));
        notices.expire(Local::now());
        assert!(notices.has_active());
    }

    #[test]
    fn test_history_is_capped() {
        let mut notices = Notices::new();
        for i in 0..(HISTORY_LIMIT + 5) {
            notices.push(Notice::info("n", i.to_string()));
        }

        assert_eq!(notices.history().len(), HISTORY_LIMIT);
        assert_eq!(notices.history()[0].message, "5");
    }

    #[test]
    fn test_dismiss_out_of_range_is_ignored() {
        let mut notices = Notices::new();
        notices.push(Notice::info("a", "b"));
        notices.dismiss(3);
        assert_eq!(notices.active().len(), 1);
        notices.dismiss(0);
        assert!(!notices.has_active());
    }
}
