//! Embassy tasks driving the UI after the entry sequence
//!
//! Both tasks reach the UI runtime only through the render lock. The render
//! task holds it for one tick plus one draw; the touch task holds it just
//! long enough to queue an event, and drops the event when the lock stays
//! busy past the configured timeout.

use embassy_time::{Duration, Timer};
use log::{debug, info, warn};
use panel_core::config::PanelConfig;
use panel_core::ui::{PanelUi, TouchEvent, TouchTracker};
use panel_core::{LockTimeout, PanelActions, PanelError, RenderGuard, RenderLock, UiRuntime};

use crate::display::{Lcd, Touch};

pub type PanelRuntime = PanelUi<PanelActions>;
pub type SharedUi = RenderLock<PanelRuntime>;

#[embassy_executor::task]
pub async fn ui_task(lock: &'static SharedUi, mut display: Option<Lcd>, tick_interval_ms: u32) {
    if display.is_none() {
        warn!("No display, UI runs headless");
    }
    let interval = Duration::from_millis(tick_interval_ms as u64);
    info!("UI task running every {} ms", tick_interval_ms);

    loop {
        {
            let mut ui = lock.lock().await;
            ui.tick();
            if let Some(display) = display.as_mut()
                && let Err(e) = ui.draw(display)
            {
                warn!("Draw failed: {:?}", e);
            }
        }
        Timer::after(interval).await;
    }
}

#[embassy_executor::task]
pub async fn touch_task(lock: &'static SharedUi, mut touch: Touch, config: PanelConfig) {
    let mut tracker = TouchTracker::new();
    let poll = Duration::from_millis(config.touch_poll_ms as u64);
    let mut failing = false;

    loop {
        match touch.read_point().await {
            Ok(sample) => {
                if failing {
                    info!("Touch controller responding again");
                    failing = false;
                }
                if let Some(event) = tracker.update(sample) {
                    enqueue(lock, event, config.input_lock_timeout).await;
                }
            }
            Err(e) => {
                // Only the first error of a run is logged
                if !failing {
                    warn!("Touch read failed: {:?}", e);
                    failing = true;
                }
            }
        }
        Timer::after(poll).await;
    }
}

async fn enqueue(lock: &'static SharedUi, event: TouchEvent, timeout: LockTimeout) {
    match acquire(lock, timeout).await {
        Ok(mut ui) => ui.push_touch(event),
        Err(e) => debug!("Dropping {:?}: {}", event, e),
    }
}

async fn acquire(
    lock: &'static SharedUi,
    timeout: LockTimeout,
) -> Result<RenderGuard<'static, PanelRuntime>, PanelError> {
    match timeout {
        LockTimeout::Forever => Ok(lock.lock().await),
        LockTimeout::Immediate => lock.try_lock(),
        LockTimeout::Millis(ms) => lock.lock_until(Timer::after_millis(ms as u64)).await,
    }
}
