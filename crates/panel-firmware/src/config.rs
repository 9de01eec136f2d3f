//! Build-time panel configuration
//!
//! `build.rs` forwards `PANEL_*` variables from the environment or `.env`;
//! anything unset or unparsable keeps the `PanelConfig` default.

use core::str::FromStr;

use log::warn;
use panel_core::LockTimeout;
use panel_core::config::PanelConfig;

pub fn panel_config() -> PanelConfig {
    let mut config = PanelConfig::default();

    if let Some(ms) = parse("PANEL_TICK_MS", option_env!("PANEL_TICK_MS")) {
        config = config.with_tick_interval_ms(ms);
    }
    if let Some(ms) = parse("PANEL_TOUCH_POLL_MS", option_env!("PANEL_TOUCH_POLL_MS")) {
        config = config.with_touch_poll_ms(ms);
    }
    // Negative waits forever, zero never waits
    if let Some(ms) = parse::<i32>(
        "PANEL_INPUT_LOCK_TIMEOUT_MS",
        option_env!("PANEL_INPUT_LOCK_TIMEOUT_MS"),
    ) {
        config = config.with_input_lock_timeout(LockTimeout::from_millis(ms));
    }

    config
}

fn parse<T: FromStr>(key: &str, value: Option<&str>) -> Option<T> {
    let value = value?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a number", key, value);
            None
        }
    }
}
