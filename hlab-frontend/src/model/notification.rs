use std::time::Duration;

use chrono::{DateTime, Local};

pub const NOTIFICATION_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
    Danger,
    Info,
    Success,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: usize,
    pub level: Level,
    pub text: String,
    pub created: DateTime<Local>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Notifications {
    next_id: usize,
    pub entries: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, level: Level, text: impl Into<String>) -> usize {
        let id = self.next_id;
        self.next_id += 1;

        self.entries.push(Notification {
            id,
            level,
            text: text.into(),
            created: Local::now(),
        });

        id
    }

    pub fn remove(&mut self, id: usize) {
        self.entries.retain(|notification| notification.id != id);
    }

    /// Drops every notification older than the lifetime.
    pub fn prune(&mut self, now: DateTime<Local>) {
        let lifetime = chrono::Duration::from_std(NOTIFICATION_LIFETIME).unwrap_or_default();
        self.entries
            .retain(|notification| now - notification.created < lifetime);
    }
}
