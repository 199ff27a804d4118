//! Transient notifications for backend outcomes.
//!
//! Failed backend calls are reported here and nowhere else: the operation is
//! abandoned and the message disappears after the configured timeout.

use std::time::Duration;

use dioxus::prelude::*;

use crate::time::{current_time, sleep};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl NoticeLevel {
    fn class(self) -> &'static str {
        match self {
            NoticeLevel::Info => "notice info",
            NoticeLevel::Success => "notice success",
            NoticeLevel::Error => "notice error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub timestamp: String,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notifications {
    entries: Vec<Notice>,
    next_id: u64,
    timeout_secs: u32,
}

impl Default for Notifications {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            timeout_secs: 5,
        }
    }
}

impl Notifications {
    pub fn entries(&self) -> &[Notice] {
        &self.entries
    }

    pub fn timeout_secs(&self) -> u32 {
        self.timeout_secs
    }

    /// 0 keeps notices until dismissed.
    pub fn set_timeout_secs(&mut self, secs: u32) {
        self.timeout_secs = secs;
    }

    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.entries.push(Notice {
            id: self.next_id,
            timestamp: current_time(),
            level,
            message: message.into(),
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

pub fn use_notifications() -> Signal<Notifications> {
    use_context::<Signal<Notifications>>()
}

/// Show a notice and schedule its dismissal.
pub fn notify(notifications: &mut Signal<Notifications>, level: NoticeLevel, message: &str) {
    if level == NoticeLevel::Error {
        tracing::warn!("{message}");
    }
    let id = notifications.write().push(level, message);
    let timeout = notifications.peek().timeout_secs();
    if timeout == 0 {
        return;
    }
    let mut notifications = *notifications;
    spawn(async move {
        sleep(Duration::from_secs(u64::from(timeout))).await;
        notifications.write().dismiss(id);
    });
}

#[component]
pub fn NotificationList() -> Element {
    let mut notifications = use_notifications();
    let entries = notifications().entries().to_vec();

    if entries.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "notice-list",
            for entry in entries {
                div {
                    key: "{entry.id}",
                    class: entry.level.class(),
                    role: "status",
                    span { class: "notice-time", "{entry.timestamp}" }
                    span { class: "notice-message", " {entry.message}" }
                    button {
                        class: "notice-dismiss",
                        title: "Dismiss",
                        onclick: move |_| {
                            notifications.write().dismiss(entry.id);
                        },
                        "\u{00D7}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut notes = Notifications::default();
        let a = notes.push(NoticeLevel::Info, "saved");
        let b = notes.push(NoticeLevel::Error, "network error: offline");
        assert!(b > a);
        assert_eq!(notes.entries().len(), 2);
        assert_eq!(notes.entries()[1].level, NoticeLevel::Error);
    }

    #[test]
    fn test_dismiss_removes_only_that_notice() {
        let mut notes = Notifications::default();
        let a = notes.push(NoticeLevel::Info, "one");
        let b = notes.push(NoticeLevel::Info, "two");
        assert!(notes.dismiss(a));
        assert!(!notes.dismiss(a));
        assert_eq!(notes.entries().len(), 1);
        assert_eq!(notes.entries()[0].id, b);
    }

    #[test]
    fn test_default_timeout() {
        let mut notes = Notifications::default();
        assert_eq!(notes.timeout_secs(), 5);
        notes.set_timeout_secs(0);
        assert_eq!(notes.timeout_secs(), 0);
    }
}
