//! Desktop simulator for the panel-rs notification UI.
//!
//! Runs the same entry sequence and UI runtime as the firmware, rendering
//! into an SDL2 window via `embedded-graphics-simulator`.
//!
//! # Key bindings
//!
//! | Key     | Action                         |
//! |---------|--------------------------------|
//! | B       | Toggle the backlight           |
//! | N       | Push a new notification        |
//! | Q / Esc | Quit                           |
//!
//! Mouse press, drag and release are forwarded as touch events.

use std::convert::Infallible;
use std::time::{Duration, Instant};

use embassy_futures::block_on;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info, warn};

use panel_core::config::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, PanelConfig};
use panel_core::notifications::sample_notifications;
use panel_core::ui::{PanelUi, TouchPoint, TouchTracker, UiState};
use panel_core::{
    Backlight, DisplayPanel, EntrySequencer, PanelActions, PanelError, RenderLock, UiRuntime,
};

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Notifications pushed with the N key, in rotation.
const INCOMING: [(&str, &str); 3] = [
    ("Doorbell", "Someone rang the doorbell."),
    ("Timer", "The oven timer has finished."),
    ("Garage", "The garage door has been open for 10 minutes."),
];

/// The SDL window needs no bring-up of its own.
struct SimPanel;

impl DisplayPanel for SimPanel {
    type Error = Infallible;

    async fn init(&mut self) -> Result<(), Self::Error> {
        info!("Simulated display ready");
        Ok(())
    }
}

/// Backlight off renders the window black.
#[derive(Default)]
struct SimBacklight {
    lit: bool,
}

impl Backlight for SimBacklight {
    type Error = Infallible;

    async fn on(&mut self) -> Result<(), Self::Error> {
        self.lit = true;
        Ok(())
    }

    async fn off(&mut self) -> Result<(), Self::Error> {
        self.lit = false;
        Ok(())
    }
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        error!("Simulator stopped: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PanelError> {
    let config = PanelConfig::default();
    let frame_duration = Duration::from_millis(config.tick_interval_ms as u64);

    info!("Starting panel-rs simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: B=Backlight  N=New notification  Q=Quit");

    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Panel Simulator", &output_settings);

    let ui = PanelUi::new(
        PanelActions,
        UiState::new(sample_notifications()),
        config.display.bounds(),
    )?;
    let lock = RenderLock::new(ui);

    let mut panel = SimPanel;
    let mut backlight = SimBacklight::default();
    let report = block_on(EntrySequencer::new().run(&mut panel, &mut backlight, &lock))?;
    info!("Entry sequence done: {:?}", report);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = display.clear(Rgb565::BLACK);
    window.update(&display);

    let mut tracker = TouchTracker::new();
    let mut finger: Option<TouchPoint> = None;
    let mut incoming = INCOMING.iter().cycle();

    'running: loop {
        let frame_start = Instant::now();
        let mut samples: Vec<Option<TouchPoint>> = Vec::new();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Q | Keycode::Escape => break 'running,
                    Keycode::B => {
                        let result = if backlight.lit {
                            block_on(backlight.off())
                        } else {
                            block_on(backlight.on())
                        };
                        if result.is_ok() {
                            info!("Backlight {}", if backlight.lit { "on" } else { "off" });
                        }
                        let mut ui = lock.try_lock()?;
                        ui.invalidate();
                    }
                    Keycode::N => {
                        if let Some((title, body)) = incoming.next() {
                            let mut ui = lock.try_lock()?;
                            match ui.update_state(|state| state.notifications_mut().push(title, body)) {
                                Ok(id) => info!("Notification {} arrived: {}", id, title),
                                Err(e) => warn!("Dropped incoming notification: {}", e),
                            }
                        }
                    }
                    _ => {}
                },

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    finger = Some(to_touch_point(point));
                    samples.push(finger);
                }

                SimulatorEvent::MouseMove { point } if finger.is_some() => {
                    finger = Some(to_touch_point(point));
                    samples.push(finger);
                }

                SimulatorEvent::MouseButtonUp { .. } => {
                    finger = None;
                    samples.push(None);
                }

                _ => {}
            }
        }

        // --- Tick and render under the render lock -------------------------
        {
            let mut ui = lock.try_lock()?;
            for sample in samples {
                if let Some(event) = tracker.update(sample) {
                    ui.push_touch(event);
                }
            }
            ui.tick();

            if backlight.lit {
                if let Err(e) = ui.draw(&mut display) {
                    error!("Draw error: {:?}", e);
                }
            } else {
                let _ = display.clear(Rgb565::BLACK);
            }
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            std::thread::sleep(frame_duration - elapsed);
        }
    }

    info!("Simulator exiting");
    Ok(())
}

fn to_touch_point(point: Point) -> TouchPoint {
    TouchPoint::new(
        point.x.clamp(0, DISPLAY_WIDTH_PX as i32 - 1) as u16,
        point.y.clamp(0, DISPLAY_HEIGHT_PX as i32 - 1) as u16,
    )
}
