//! Runtime configuration shared by the firmware and the simulator

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::render_lock::LockTimeout;

/// Native resolution of the ILI9342C panel
pub const DISPLAY_WIDTH_PX: u16 = 320;
pub const DISPLAY_HEIGHT_PX: u16 = 240;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub width: u16,
    pub height: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DISPLAY_WIDTH_PX,
            height: DISPLAY_HEIGHT_PX,
        }
    }
}

impl DisplayConfig {
    /// Full-screen bounding rectangle.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(
            Point::zero(),
            Size::new(self.width as u32, self.height as u32),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelConfig {
    pub display: DisplayConfig,
    /// Delay between UI ticks of the render task
    pub tick_interval_ms: u32,
    /// Delay between touch controller polls
    pub touch_poll_ms: u32,
    /// How long the touch task waits for the render lock before dropping an event
    pub input_lock_timeout: LockTimeout,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            tick_interval_ms: 30,
            touch_poll_ms: 20,
            input_lock_timeout: LockTimeout::Millis(50),
        }
    }
}

impl PanelConfig {
    pub fn with_tick_interval_ms(mut self, ms: u32) -> Self {
        // A zero interval would starve the touch task
        self.tick_interval_ms = ms.max(1);
        self
    }

    pub fn with_touch_poll_ms(mut self, ms: u32) -> Self {
        self.touch_poll_ms = ms.max(1);
        self
    }

    pub fn with_input_lock_timeout(mut self, timeout: LockTimeout) -> Self {
        self.input_lock_timeout = timeout;
        self
    }
}
