//! Application state the callbacks read and write

use crate::notifications::{Notification, NotificationId, NotificationStore};
use crate::ui::core::ScreenId;

/// Everything a callback may touch.
///
/// The runtime rebuilds the active screen from this after each action chain,
/// so callbacks never hold widget references.
#[derive(Debug, Clone)]
pub struct UiState {
    notifications: NotificationStore,
    selected: Option<NotificationId>,
    detail: Option<Notification>,
    screen: ScreenId,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(NotificationStore::new())
    }
}

impl UiState {
    pub fn new(notifications: NotificationStore) -> Self {
        Self {
            notifications,
            selected: None,
            detail: None,
            screen: ScreenId::Main,
        }
    }

    pub fn notifications(&self) -> &NotificationStore {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationStore {
        &mut self.notifications
    }

    /// Notification id most recently picked by `get_id`
    pub fn selected(&self) -> Option<NotificationId> {
        self.selected
    }

    pub fn select(&mut self, id: Option<NotificationId>) {
        self.selected = id;
    }

    /// Snapshot shown on the detail screen
    pub fn detail(&self) -> Option<&Notification> {
        self.detail.as_ref()
    }

    pub fn show_detail(&mut self, notification: Option<Notification>) {
        self.detail = notification;
    }

    pub fn screen(&self) -> ScreenId {
        self.screen
    }

    pub fn navigate(&mut self, screen: ScreenId) {
        self.screen = screen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_main_with_nothing_selected() {
        let state = UiState::default();
        assert_eq!(state.screen(), ScreenId::Main);
        assert_eq!(state.selected(), None);
        assert!(state.detail().is_none());
        assert!(state.notifications().is_empty());
    }

    #[test]
    fn test_detail_is_a_snapshot() {
        let mut state = UiState::default();
        let id = state.notifications_mut().push("Door", "Front door opened").unwrap();
        let snapshot = state.notifications().get(id).cloned();
        state.show_detail(snapshot);

        state.notifications_mut().remove(id);
        assert_eq!(state.detail().map(|n| n.id()), Some(id));
    }
}
