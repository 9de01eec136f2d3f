//! ESP32-S3 firmware-specific modules for panel-rs
//!
//! This crate holds everything that only builds for the device: the shared
//! I2C bus, PMIC/IO-expander bring-up, the ILI9342C display and FT6336U touch
//! controller, build-time configuration and the embassy tasks that drive the
//! `panel-core` UI runtime.

#![no_std]

pub mod async_i2c_bus;
pub mod backlight;
pub mod config;
pub mod display;
pub mod hardware;
pub mod tasks;
pub mod touch;
