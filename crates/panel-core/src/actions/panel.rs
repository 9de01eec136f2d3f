//! Application handlers for the notification panel

use log::{debug, info, warn};

use super::{ActionEvent, ActionHandlers};
use crate::ui::core::ScreenId;

/// Hand-written bodies for the notification panel's callback slots.
///
/// - `get_id` stores the notification id carried in the event's user data
///   as the current selection.
/// - `get_notify_info` publishes the selected notification to the detail
///   screen and shows it.
/// - `delete_notification` removes the selected notification (or the one
///   named by the event's user data) and returns to the main screen.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanelActions;

impl ActionHandlers for PanelActions {
    fn get_id(&mut self, event: &mut ActionEvent<'_>) {
        let id = event.user_data();
        debug!("get_id: widget {} selects notification {}", event.target(), id);
        event.state().select(Some(id));
    }

    fn get_notify_info(&mut self, event: &mut ActionEvent<'_>) {
        let state = event.state();
        let Some(id) = state.selected() else {
            warn!("get_notify_info: no notification selected");
            return;
        };

        match state.notifications().get(id).cloned() {
            Some(notification) => {
                info!("Showing notification {}: {}", id, notification.title());
                state.show_detail(Some(notification));
                state.navigate(ScreenId::Detail);
            }
            None => warn!("get_notify_info: notification {} not found", id),
        }
    }

    fn delete_notification(&mut self, event: &mut ActionEvent<'_>) {
        let fallback = event.user_data();
        let state = event.state();
        let id = state.selected().unwrap_or(fallback);

        match state.notifications_mut().remove(id) {
            Some(removed) => info!("Deleted notification {}: {}", id, removed.title()),
            None => warn!("delete_notification: notification {} not found", id),
        }

        state.select(None);
        state.show_detail(None);
        state.navigate(ScreenId::Main);
    }
}
