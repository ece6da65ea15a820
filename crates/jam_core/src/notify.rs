use std::collections::VecDeque;

/// UI ticks a notification stays on screen.
pub const NOTIFICATION_TTL_TICKS: u32 = 20;
pub const MAX_NOTIFICATIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub text: String,
    ttl: u32,
}

/// Transient toasts, newest last.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notifications {
    items: VecDeque<Notification>,
    next_id: u64,
}

impl Notifications {
    pub fn push(&mut self, level: NotificationLevel, text: impl Into<String>) {
        let text = text.into();
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.level == level && item.text == text)
        {
            existing.ttl = NOTIFICATION_TTL_TICKS;
            return;
        }
        self.next_id += 1;
        self.items.push_back(Notification {
            id: self.next_id,
            level,
            text,
            ttl: NOTIFICATION_TTL_TICKS,
        });
        while self.items.len() > MAX_NOTIFICATIONS {
            self.items.pop_front();
        }
    }

    /// Ages every notification by one tick. Returns whether any expired.
    pub fn tick(&mut self) -> bool {
        let before = self.items.len();
        for item in self.items.iter_mut() {
            item.ttl = item.ttl.saturating_sub(1);
        }
        self.items.retain(|item| item.ttl > 0);
        self.items.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
