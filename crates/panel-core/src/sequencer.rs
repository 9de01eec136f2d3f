//! One-shot application entry sequence
//!
//! Brings the panel up in a fixed order:
//!
//! 1. display + touch controller init
//! 2. backlight on
//! 3. render lock acquired (wait forever)
//! 4. UI runtime init (builds the widget tree)
//! 5. render lock released
//! 6. render lock acquired again
//! 7. one UI tick
//! 8. render lock released
//!
//! Driver failures in steps 1 and 2 are logged and recorded in the
//! [`StartupReport`], and the sequence carries on regardless: the backlight is
//! still switched on after a failed display init. Continuous ticking and
//! drawing afterwards belong to the render task, not to the sequencer.

use core::fmt::Debug;

use log::{info, warn};

use crate::error::PanelError;
use crate::render_lock::RenderLock;

/// Display and touch peripheral bring-up.
#[allow(async_fn_in_trait)]
pub trait DisplayPanel {
    type Error: Debug;

    /// Initialize the display and touch controller. Must complete before any
    /// rendering call.
    async fn init(&mut self) -> Result<(), Self::Error>;
}

/// Backlight output.
#[allow(async_fn_in_trait)]
pub trait Backlight {
    type Error: Debug;

    async fn on(&mut self) -> Result<(), Self::Error>;

    async fn off(&mut self) -> Result<(), Self::Error>;
}

/// The UI runtime driven under the render lock.
pub trait UiRuntime {
    /// Construct the widget tree.
    fn init(&mut self);

    /// Advance the UI flow by one step.
    fn tick(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    NotStarted,
    Running,
    Returned,
}

/// Outcome of the fallible driver steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupReport {
    pub display_ok: bool,
    pub backlight_ok: bool,
}

impl StartupReport {
    pub fn all_ok(&self) -> bool {
        self.display_ok && self.backlight_ok
    }
}

#[derive(Debug)]
pub struct EntrySequencer {
    state: SequencerState,
}

impl Default for EntrySequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntrySequencer {
    pub const fn new() -> Self {
        Self {
            state: SequencerState::NotStarted,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Run the entry sequence. Only the first call does anything; later
    /// calls return [`PanelError::AlreadyStarted`] without touching any
    /// collaborator.
    pub async fn run<P, B, U>(
        &mut self,
        panel: &mut P,
        backlight: &mut B,
        lock: &RenderLock<U>,
    ) -> Result<StartupReport, PanelError>
    where
        P: DisplayPanel,
        B: Backlight,
        U: UiRuntime,
    {
        if self.state != SequencerState::NotStarted {
            warn!("Entry sequence requested again in state {:?}", self.state);
            return Err(PanelError::AlreadyStarted);
        }
        self.state = SequencerState::Running;

        info!("Initializing display and touch controller");
        let display_ok = match panel.init().await {
            Ok(()) => {
                info!("Display ready");
                true
            }
            Err(e) => {
                warn!("Display init failed: {:?}", e);
                false
            }
        };

        let backlight_ok = match backlight.on().await {
            Ok(()) => {
                info!("Backlight on");
                true
            }
            Err(e) => {
                warn!("Backlight on failed: {:?}", e);
                false
            }
        };

        {
            let mut ui = lock.lock().await;
            info!("Building UI");
            ui.init();
        }

        {
            let mut ui = lock.lock().await;
            ui.tick();
        }

        self.state = SequencerState::Returned;
        info!("Entry sequence complete");

        Ok(StartupReport {
            display_ok,
            backlight_ok,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use embassy_futures::block_on;
    use heapless::Vec;

    use crate::actions::{ActionEvent, ActionHandlers};
    use crate::ui::core::{ScreenId, TouchEvent, TouchPoint};
    use crate::ui::runtime::PanelUi;
    use crate::ui::state::UiState;

    type Journal = RefCell<Vec<&'static str, 16>>;

    fn record(journal: &Journal, step: &'static str) {
        journal.borrow_mut().push(step).ok();
    }

    struct MockPanel<'a> {
        journal: &'a Journal,
        fail: bool,
    }

    impl DisplayPanel for MockPanel<'_> {
        type Error = &'static str;

        async fn init(&mut self) -> Result<(), Self::Error> {
            record(self.journal, "panel_init");
            if self.fail {
                return Err("no ack from LCD");
            }
            Ok(())
        }
    }

    struct MockBacklight<'a> {
        journal: &'a Journal,
        fail: bool,
    }

    impl Backlight for MockBacklight<'_> {
        type Error = &'static str;

        async fn on(&mut self) -> Result<(), Self::Error> {
            record(self.journal, "backlight_on");
            if self.fail {
                return Err("PMIC busy");
            }
            Ok(())
        }

        async fn off(&mut self) -> Result<(), Self::Error> {
            record(self.journal, "backlight_off");
            Ok(())
        }
    }

    struct MockUi<'a> {
        journal: &'a Journal,
    }

    impl UiRuntime for MockUi<'_> {
        fn init(&mut self) {
            record(self.journal, "ui_init");
        }

        fn tick(&mut self) {
            record(self.journal, "ui_tick");
        }
    }

    #[derive(Default)]
    struct CountingActions {
        calls: u32,
    }

    impl ActionHandlers for CountingActions {
        fn get_id(&mut self, _event: &mut ActionEvent<'_>) {
            self.calls += 1;
        }

        fn get_notify_info(&mut self, _event: &mut ActionEvent<'_>) {
            self.calls += 1;
        }

        fn delete_notification(&mut self, _event: &mut ActionEvent<'_>) {
            self.calls += 1;
        }
    }

    fn run_once(
        journal: &Journal,
        panel_fails: bool,
        backlight_fails: bool,
    ) -> (Result<StartupReport, PanelError>, RenderLock<MockUi<'_>>) {
        let mut sequencer = EntrySequencer::new();
        let mut panel = MockPanel {
            journal,
            fail: panel_fails,
        };
        let mut backlight = MockBacklight {
            journal,
            fail: backlight_fails,
        };
        let lock = RenderLock::new(MockUi { journal });

        let result = block_on(sequencer.run(&mut panel, &mut backlight, &lock));
        assert_eq!(sequencer.state(), SequencerState::Returned);
        (result, lock)
    }

    #[test]
    fn test_steps_run_in_order_exactly_once() {
        let journal = Journal::default();
        let (result, _lock) = run_once(&journal, false, false);

        assert!(result.unwrap().all_ok());
        assert_eq!(
            journal.borrow().as_slice(),
            &["panel_init", "backlight_on", "ui_init", "ui_tick"]
        );
    }

    #[test]
    fn test_lock_is_balanced_and_free_afterwards() {
        let journal = Journal::default();
        let (_, lock) = run_once(&journal, false, false);

        assert_eq!(lock.acquisitions(), 2);
        assert_eq!(lock.releases(), 2);
        assert!(!lock.is_held());
        assert!(lock.try_lock().is_ok());
    }

    #[test]
    fn test_failures_do_not_stop_the_sequence() {
        let journal = Journal::default();
        let (result, _lock) = run_once(&journal, true, true);

        let report = result.unwrap();
        assert!(!report.display_ok);
        assert!(!report.backlight_ok);
        // Backlight is still switched on after a failed display init
        assert_eq!(
            journal.borrow().as_slice(),
            &["panel_init", "backlight_on", "ui_init", "ui_tick"]
        );
    }

    #[test]
    fn test_second_run_is_rejected() {
        let journal = Journal::default();
        let mut sequencer = EntrySequencer::new();
        let mut panel = MockPanel {
            journal: &journal,
            fail: false,
        };
        let mut backlight = MockBacklight {
            journal: &journal,
            fail: false,
        };
        let lock = RenderLock::new(MockUi { journal: &journal });

        block_on(sequencer.run(&mut panel, &mut backlight, &lock)).unwrap();
        let again = block_on(sequencer.run(&mut panel, &mut backlight, &lock));

        assert_eq!(again, Err(PanelError::AlreadyStarted));
        assert_eq!(journal.borrow().len(), 4);
        assert_eq!(lock.acquisitions(), 2);
    }

    #[test]
    fn test_no_action_runs_during_startup() {
        let journal = Journal::default();
        let mut state = UiState::default();
        state.notifications_mut().push("Door", "Front door opened").unwrap();

        let ui = PanelUi::new(
            CountingActions::default(),
            state,
            crate::config::DisplayConfig::default().bounds(),
        )
        .unwrap();
        let lock = RenderLock::new(ui);

        let mut sequencer = EntrySequencer::new();
        let mut panel = MockPanel {
            journal: &journal,
            fail: false,
        };
        let mut backlight = MockBacklight {
            journal: &journal,
            fail: false,
        };
        block_on(sequencer.run(&mut panel, &mut backlight, &lock)).unwrap();

        let ui = lock.try_lock().unwrap();
        assert_eq!(ui.handlers().calls, 0);
        assert_eq!(ui.ticks(), 1);
    }

    #[test]
    fn test_touch_queued_before_startup_is_discarded() {
        let journal = Journal::default();
        let mut state = UiState::default();
        state.notifications_mut().push("Door", "Front door opened").unwrap();

        let mut ui = PanelUi::new(
            CountingActions::default(),
            state,
            crate::config::DisplayConfig::default().bounds(),
        )
        .unwrap();
        // Press and release on the first row of the main screen
        let row = TouchPoint::new(160, 50);
        ui.push_touch(TouchEvent::Press(row));
        ui.push_touch(TouchEvent::Release(row));
        let lock = RenderLock::new(ui);

        let mut sequencer = EntrySequencer::new();
        let mut panel = MockPanel {
            journal: &journal,
            fail: false,
        };
        let mut backlight = MockBacklight {
            journal: &journal,
            fail: false,
        };
        block_on(sequencer.run(&mut panel, &mut backlight, &lock)).unwrap();

        let ui = lock.try_lock().unwrap();
        assert_eq!(ui.handlers().calls, 0);
        assert_eq!(ui.pending_events(), 0);
        assert_eq!(ui.dropped_events(), 2);
        assert_eq!(ui.screen_id(), Some(ScreenId::Main));
    }
}
