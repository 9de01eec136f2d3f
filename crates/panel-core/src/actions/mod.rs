//! Named action callbacks bound by the UI description
//!
//! The UI description ([`crate::ui::screens`]) refers to event handlers by
//! name. Every name it may declare is a variant of [`ActionId`], and every
//! variant is a required method of [`ActionHandlers`]. An implementation that
//! leaves out a slot does not compile; a description that declares a name
//! with no slot is rejected at startup by [`ActionRegistry::from_declared`].
//!
//! Callbacks run only from [`UiRuntime::tick`](crate::sequencer::UiRuntime::tick),
//! with the render lock held.

mod panel;

pub use panel::PanelActions;

use core::fmt;

use heapless::Vec;
use log::debug;

use crate::error::{PanelError, truncated};
use crate::ui::core::WidgetId;
use crate::ui::state::UiState;

/// Number of callback slots.
pub const ACTION_COUNT: usize = 3;

/// Identifier of a callback slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    GetId,
    GetNotifyInfo,
    DeleteNotification,
}

impl ActionId {
    /// Every slot, in declaration order.
    pub const ALL: [ActionId; ACTION_COUNT] = [
        ActionId::GetId,
        ActionId::GetNotifyInfo,
        ActionId::DeleteNotification,
    ];

    /// Name the UI description uses for this slot.
    pub const fn name(self) -> &'static str {
        match self {
            ActionId::GetId => "get_id",
            ActionId::GetNotifyInfo => "get_notify_info",
            ActionId::DeleteNotification => "delete_notification",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Event context handed to a callback.
///
/// Carries the widget that fired the action, the user-data word the UI
/// description attached to it, and mutable access to the UI state.
pub struct ActionEvent<'a> {
    action: ActionId,
    target: WidgetId,
    user_data: u32,
    state: &'a mut UiState,
}

impl<'a> ActionEvent<'a> {
    pub fn new(action: ActionId, target: WidgetId, user_data: u32, state: &'a mut UiState) -> Self {
        Self {
            action,
            target,
            user_data,
            state,
        }
    }

    /// Slot being invoked.
    pub fn action(&self) -> ActionId {
        self.action
    }

    /// Widget that fired the event.
    pub fn target(&self) -> WidgetId {
        self.target
    }

    /// User-data word attached to the target widget.
    pub fn user_data(&self) -> u32 {
        self.user_data
    }

    pub fn state(&mut self) -> &mut UiState {
        self.state
    }
}

/// One method per callback slot.
///
/// No slot has a default body; every slot must be written out by the
/// implementor (an empty body is fine, see [`NoopActions`]).
pub trait ActionHandlers {
    fn get_id(&mut self, event: &mut ActionEvent<'_>);

    fn get_notify_info(&mut self, event: &mut ActionEvent<'_>);

    fn delete_notification(&mut self, event: &mut ActionEvent<'_>);
}

/// Route an event to the handler method for its slot.
pub fn dispatch<H: ActionHandlers + ?Sized>(handlers: &mut H, event: &mut ActionEvent<'_>) {
    debug!(
        "Dispatching {} (widget {}, user data {})",
        event.action(),
        event.target(),
        event.user_data()
    );
    match event.action() {
        ActionId::GetId => handlers.get_id(event),
        ActionId::GetNotifyInfo => handlers.get_notify_info(event),
        ActionId::DeleteNotification => handlers.delete_notification(event),
    }
}

/// Empty-bodied handlers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopActions;

impl ActionHandlers for NoopActions {
    fn get_id(&mut self, _event: &mut ActionEvent<'_>) {}

    fn get_notify_info(&mut self, _event: &mut ActionEvent<'_>) {}

    fn delete_notification(&mut self, _event: &mut ActionEvent<'_>) {}
}

/// The set of slots a UI description declares, verified against [`ActionId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRegistry {
    declared: Vec<ActionId, ACTION_COUNT>,
}

impl ActionRegistry {
    /// Resolve every declared name to a slot.
    ///
    /// Fails on the first name with no slot, or on a name declared twice.
    pub fn from_declared(names: &[&str]) -> Result<Self, PanelError> {
        let mut declared = Vec::new();
        for name in names {
            let id = ActionId::from_name(name)
                .ok_or_else(|| PanelError::UnboundAction(truncated(name)))?;
            if declared.contains(&id) {
                return Err(PanelError::DuplicateAction(id));
            }
            // Distinct ids never exceed ACTION_COUNT
            declared.push(id).ok();
        }

        for id in ActionId::ALL {
            if !declared.contains(&id) {
                debug!("Action {} has a handler but is not declared by the UI", id);
            }
        }

        Ok(Self { declared })
    }

    pub fn contains(&self, id: ActionId) -> bool {
        self.declared.contains(&id)
    }

    pub fn declared(&self) -> &[ActionId] {
        &self.declared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records which slots were invoked, in order.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(ActionId, u32), 8>,
    }

    impl ActionHandlers for Recorder {
        fn get_id(&mut self, event: &mut ActionEvent<'_>) {
            self.calls.push((ActionId::GetId, event.user_data())).ok();
        }

        fn get_notify_info(&mut self, event: &mut ActionEvent<'_>) {
            self.calls.push((ActionId::GetNotifyInfo, event.user_data())).ok();
        }

        fn delete_notification(&mut self, event: &mut ActionEvent<'_>) {
            self.calls.push((ActionId::DeleteNotification, event.user_data())).ok();
        }
    }

    #[test]
    fn test_names_round_trip() {
        for id in ActionId::ALL {
            assert_eq!(ActionId::from_name(id.name()), Some(id));
        }
        assert_eq!(ActionId::from_name("get_weather"), None);
    }

    #[test]
    fn test_three_declared_callbacks_resolve() {
        let registry =
            ActionRegistry::from_declared(&["get_id", "get_notify_info", "delete_notification"])
                .unwrap();
        assert_eq!(registry.declared(), &ActionId::ALL);

        // Three empty bodies are enough to satisfy the contract
        let mut handlers = NoopActions;
        let mut state = UiState::default();
        for id in registry.declared() {
            let mut event = ActionEvent::new(*id, 0, 0, &mut state);
            dispatch(&mut handlers, &mut event);
        }
    }

    #[test]
    fn test_unknown_declared_name_is_rejected() {
        let err = ActionRegistry::from_declared(&["get_id", "open_settings"]).unwrap_err();
        assert_eq!(err, PanelError::UnboundAction(truncated("open_settings")));
    }

    #[test]
    fn test_duplicate_declared_name_is_rejected() {
        let err = ActionRegistry::from_declared(&["get_id", "get_id"]).unwrap_err();
        assert_eq!(err, PanelError::DuplicateAction(ActionId::GetId));
    }

    #[test]
    fn test_partial_declaration_is_allowed() {
        let registry = ActionRegistry::from_declared(&["delete_notification"]).unwrap();
        assert!(registry.contains(ActionId::DeleteNotification));
        assert!(!registry.contains(ActionId::GetId));
    }

    #[test]
    fn test_dispatch_routes_to_matching_slot() {
        let mut recorder = Recorder::default();
        let mut state = UiState::default();

        let mut event = ActionEvent::new(ActionId::GetNotifyInfo, 4, 17, &mut state);
        dispatch(&mut recorder, &mut event);
        let mut event = ActionEvent::new(ActionId::DeleteNotification, 5, 18, &mut state);
        dispatch(&mut recorder, &mut event);

        assert_eq!(
            recorder.calls.as_slice(),
            &[
                (ActionId::GetNotifyInfo, 17),
                (ActionId::DeleteNotification, 18)
            ]
        );
    }
}
