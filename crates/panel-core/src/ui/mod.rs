//! Panel UI runtime - widget tree, screens and touch handling
//!
//! This module provides:
//! - Core traits for drawable and touchable elements
//! - Styled components (buttons, text)
//! - The UI description: declared actions and per-screen widget trees
//! - Flow variables shared with the action callbacks
//! - The runtime that ticks the flow and draws the active screen

pub mod components;
pub mod core;
pub mod input;
pub mod runtime;
pub mod screens;
pub mod state;
pub mod styling;

// Re-export commonly used items
pub use components::{Button, MultiLineText, TextComponent, TextSize};
pub use self::core::{Action, Drawable, ScreenId, TouchEvent, TouchPoint, TouchResult, Touchable, WidgetId};
pub use input::TouchTracker;
pub use runtime::PanelUi;
pub use screens::{DECLARED_ACTIONS, Screen};
pub use state::UiState;
pub use styling::{ButtonVariant, ColorPalette, Style};
