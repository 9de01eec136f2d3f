//! Turns raw touch samples into press / drag / release events

use crate::ui::core::{TouchEvent, TouchPoint};

/// Edge detector over polled touch samples.
///
/// The touch controller only reports "finger at (x, y)" or "no finger"; the
/// widgets want transitions.
#[derive(Debug, Default, Clone, Copy)]
pub struct TouchTracker {
    last: Option<TouchPoint>,
}

impl TouchTracker {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Feed one sample. Returns an event only when something changed.
    pub fn update(&mut self, sample: Option<TouchPoint>) -> Option<TouchEvent> {
        let event = match (self.last, sample) {
            (None, Some(point)) => Some(TouchEvent::Press(point)),
            (Some(previous), Some(point)) if previous != point => Some(TouchEvent::Drag(point)),
            (Some(previous), None) => Some(TouchEvent::Release(previous)),
            _ => None,
        };
        self.last = sample;
        event
    }

    pub fn is_touching(&self) -> bool {
        self.last.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_drag_release() {
        let mut tracker = TouchTracker::new();
        let a = TouchPoint::new(10, 20);
        let b = TouchPoint::new(12, 20);

        assert_eq!(tracker.update(None), None);
        assert_eq!(tracker.update(Some(a)), Some(TouchEvent::Press(a)));
        assert!(tracker.is_touching());
        assert_eq!(tracker.update(Some(a)), None);
        assert_eq!(tracker.update(Some(b)), Some(TouchEvent::Drag(b)));
        assert_eq!(tracker.update(None), Some(TouchEvent::Release(b)));
        assert!(!tracker.is_touching());
        assert_eq!(tracker.update(None), None);
    }
}
