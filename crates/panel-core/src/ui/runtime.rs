//! The UI runtime driven by the render task
//!
//! [`PanelUi`] owns the application state, the active [`Screen`] and the
//! callback handlers. Touch input is queued by [`PanelUi::push_touch`] and
//! consumed on the next [`UiRuntime::tick`]; callbacks therefore only ever
//! run from inside a tick, with the render lock held by the caller.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Deque;
use log::{debug, info, warn};

use crate::actions::{ActionEvent, ActionHandlers, ActionRegistry, dispatch};
use crate::error::PanelError;
use crate::sequencer::UiRuntime;
use crate::ui::core::{Action, ScreenId, TouchEvent};
use crate::ui::screens::{DECLARED_ACTIONS, Fired, Screen};
use crate::ui::state::UiState;

/// Touch events buffered between ticks
pub const INPUT_QUEUE_LEN: usize = 8;

pub struct PanelUi<H: ActionHandlers> {
    handlers: H,
    state: UiState,
    registry: ActionRegistry,
    bounds: Rectangle,
    screen: Option<Screen>,
    input: Deque<TouchEvent, INPUT_QUEUE_LEN>,
    ticks: u32,
    dropped_events: u32,
}

impl<H: ActionHandlers> PanelUi<H> {
    /// Create the runtime. Fails if the screens declare an action with no
    /// handler slot.
    ///
    /// No widget exists until [`UiRuntime::init`] is called.
    pub fn new(handlers: H, state: UiState, bounds: Rectangle) -> Result<Self, PanelError> {
        let registry = ActionRegistry::from_declared(DECLARED_ACTIONS)?;
        Ok(Self {
            handlers,
            state,
            registry,
            bounds,
            screen: None,
            input: Deque::new(),
            ticks: 0,
            dropped_events: 0,
        })
    }

    /// Queue a touch event for the next tick, dropping the oldest when full.
    pub fn push_touch(&mut self, event: TouchEvent) {
        if self.input.is_full() {
            self.input.pop_front();
            self.dropped_events = self.dropped_events.wrapping_add(1);
            warn!("Touch queue full, dropped oldest event");
        }
        // Space was made above
        let _ = self.input.push_back(event);
    }

    /// Change the state from outside an action chain, e.g. when a new
    /// notification arrives. The active screen is rebuilt afterwards.
    pub fn update_state<R>(&mut self, f: impl FnOnce(&mut UiState) -> R) -> R {
        let result = f(&mut self.state);
        if self.screen.is_some() {
            self.rebuild();
        }
        result
    }

    /// Draw the active screen if anything changed.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<bool, D::Error> {
        match self.screen.as_mut() {
            Some(screen) => screen.draw(display),
            None => Ok(false),
        }
    }

    /// Force a full redraw on the next [`draw`](Self::draw).
    pub fn invalidate(&mut self) {
        if let Some(screen) = self.screen.as_mut() {
            screen.mark_dirty();
        }
    }

    pub fn handlers(&self) -> &H {
        &self.handlers
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn screen(&self) -> Option<&Screen> {
        self.screen.as_ref()
    }

    pub fn screen_id(&self) -> Option<ScreenId> {
        self.screen.as_ref().map(Screen::id)
    }

    pub fn is_initialized(&self) -> bool {
        self.screen.is_some()
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn dropped_events(&self) -> u32 {
        self.dropped_events
    }

    pub fn pending_events(&self) -> usize {
        self.input.len()
    }

    fn rebuild(&mut self) {
        let screen = Screen::build(&self.state, self.bounds);
        debug!("Built {:?} screen with {} widgets", screen.id(), screen.elements().len());
        self.screen = Some(screen);
    }

    fn run(&mut self, fired: Fired) {
        match fired.action {
            Action::Run(chain) => {
                for &action in chain {
                    if !self.registry.contains(action) {
                        warn!("Action {} is not declared, skipping", action);
                        continue;
                    }
                    let mut event =
                        ActionEvent::new(action, fired.widget, fired.user_data, &mut self.state);
                    dispatch(&mut self.handlers, &mut event);
                }
            }
            Action::Navigate(screen) => {
                debug!("Navigating to {:?}", screen);
                self.state.navigate(screen);
            }
        }
    }
}

impl<H: ActionHandlers> UiRuntime for PanelUi<H> {
    fn init(&mut self) {
        // Input from before the screen existed never reaches a callback
        let stale = self.input.len();
        if stale > 0 {
            self.input.clear();
            self.dropped_events = self.dropped_events.wrapping_add(stale as u32);
            warn!("Discarded {} touch events queued before init", stale);
        }
        self.rebuild();
        info!("UI ready on {:?}", self.state.screen());
    }

    fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);

        if self.screen.is_none() {
            warn!("UI tick before init, {} events pending", self.input.len());
            return;
        }

        while let Some(event) = self.input.pop_front() {
            let fired = self
                .screen
                .as_mut()
                .and_then(|screen| screen.handle_touch(event));

            // Later events in the queue land on the rebuilt screen
            if let Some(fired) = fired {
                self.run(fired);
                self.rebuild();
            }
        }
    }
}
