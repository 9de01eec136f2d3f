//! Hardware-independent core library for panel-rs
//!
//! This crate contains the platform-agnostic pieces of the touchscreen panel:
//! the action callback registry, the render lock guarding the UI runtime,
//! the one-shot entry sequencer, the notification model and the UI runtime
//! itself (screens, widgets, touch handling).
//!
//! It is `#![no_std]` so it compiles on both the ESP32-S3 firmware and
//! desktop hosts (for the simulator and tests).

#![no_std]

pub mod actions;
pub mod config;
pub mod error;
pub mod notifications;
pub mod render_lock;
pub mod sequencer;
pub mod ui;

pub use actions::{ActionEvent, ActionHandlers, ActionId, ActionRegistry, NoopActions, PanelActions};
pub use error::PanelError;
pub use render_lock::{LockTimeout, RenderGuard, RenderLock};
pub use sequencer::{Backlight, DisplayPanel, EntrySequencer, SequencerState, StartupReport, UiRuntime};
