//! Notification model shown by the panel

use heapless::{String, Vec};

use crate::error::{PanelError, truncated};

/// Maximum number of notifications held at once.
pub const MAX_NOTIFICATIONS: usize = 8;

pub const TITLE_LEN: usize = 32;
pub const BODY_LEN: usize = 96;

pub type NotificationId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: NotificationId,
    title: String<TITLE_LEN>,
    body: String<BODY_LEN>,
}

impl Notification {
    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Fixed-capacity store with monotonically assigned ids starting at 1.
///
/// Ids are never reused, so a stale id held by a widget can only miss.
#[derive(Debug, Clone)]
pub struct NotificationStore {
    items: Vec<Notification, MAX_NOTIFICATIONS>,
    next_id: NotificationId,
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationStore {
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a notification; over-long text is truncated.
    pub fn push(&mut self, title: &str, body: &str) -> Result<NotificationId, PanelError> {
        let id = self.next_id;
        self.items
            .push(Notification {
                id,
                title: truncated(title),
                body: truncated(body),
            })
            .map_err(|_| PanelError::StoreFull)?;
        self.next_id = self.next_id.wrapping_add(1);
        Ok(id)
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    /// Remove by id, keeping the remaining notifications in order.
    pub fn remove(&mut self, id: NotificationId) -> Option<Notification> {
        let index = self.items.iter().position(|n| n.id == id)?;
        Some(self.items.remove(index))
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

/// A handful of notifications to show until a real source is attached.
pub fn sample_notifications() -> NotificationStore {
    const SAMPLES: [(&str, &str); 4] = [
        ("Front door", "The front door was opened at 18:42."),
        ("Laundry", "The washer finished the delicate cycle."),
        ("Battery low", "Kitchen smoke detector battery is at 10%. Replace it soon."),
        ("Package", "A parcel was delivered to the mailbox."),
    ];

    let mut store = NotificationStore::new();
    for (title, body) in SAMPLES {
        // SAMPLES is shorter than MAX_NOTIFICATIONS
        let _ = store.push(title, body);
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_not_reused() {
        let mut store = NotificationStore::new();
        let a = store.push("a", "").unwrap();
        let b = store.push("b", "").unwrap();
        assert_eq!((a, b), (1, 2));

        store.remove(b).unwrap();
        let c = store.push("c", "").unwrap();
        assert_eq!(c, 3);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut store = NotificationStore::new();
        let ids: [NotificationId; 3] = [
            store.push("one", "").unwrap(),
            store.push("two", "").unwrap(),
            store.push("three", "").unwrap(),
        ];

        assert_eq!(store.remove(ids[1]).map(|n| n.id()), Some(ids[1]));
        assert!(store.remove(ids[1]).is_none());

        let titles: Vec<&str, 4> = store.iter().map(|n| n.title()).collect();
        assert_eq!(titles.as_slice(), &["one", "three"]);
    }

    #[test]
    fn test_full_store_rejects_push() {
        let mut store = NotificationStore::new();
        for _ in 0..MAX_NOTIFICATIONS {
            store.push("n", "").unwrap();
        }
        assert_eq!(store.push("overflow", ""), Err(PanelError::StoreFull));
        assert_eq!(store.len(), MAX_NOTIFICATIONS);
    }

    #[test]
    fn test_long_text_is_truncated() {
        let mut store = NotificationStore::new();
        let long = "Basement water sensor reported a leak near the heater";
        assert!(long.len() > TITLE_LEN);
        let id = store.push(long, "body").unwrap();
        assert_eq!(store.get(id).unwrap().title().len(), TITLE_LEN);
    }
}
