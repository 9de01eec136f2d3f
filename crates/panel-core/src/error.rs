//! Error types for the panel

use core::fmt::{Debug, Write};

use thiserror_no_std::Error;

use crate::actions::ActionId;

/// Short diagnostic message carried by driver errors.
pub type ErrorMessage = heapless::String<64>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    #[error("Display init failed: {0}")]
    Display(ErrorMessage),
    #[error("Backlight control failed: {0}")]
    Backlight(ErrorMessage),
    #[error("Touch controller error: {0}")]
    Touch(ErrorMessage),
    #[error("UI declares action `{0}` with no handler")]
    UnboundAction(ErrorMessage),
    #[error("UI declares action `{0}` more than once")]
    DuplicateAction(ActionId),
    #[error("Entry sequence has already been started")]
    AlreadyStarted,
    #[error("Render lock is held elsewhere")]
    LockBusy,
    #[error("Timed out waiting for the render lock")]
    LockTimeout,
    #[error("Notification store is full")]
    StoreFull,
}

impl PanelError {
    pub fn display<E: Debug>(err: &E) -> Self {
        Self::Display(message(err))
    }

    /// Display failure with a fixed reason instead of a driver error
    pub fn display_reason(reason: &str) -> Self {
        Self::Display(truncated(reason))
    }

    pub fn backlight<E: Debug>(err: &E) -> Self {
        Self::Backlight(message(err))
    }

    pub fn touch<E: Debug>(err: &E) -> Self {
        Self::Touch(message(err))
    }
}

/// Format a driver error into a bounded message, truncating on overflow.
pub fn message<E: Debug>(err: &E) -> ErrorMessage {
    let mut out = ErrorMessage::new();
    // A full buffer just truncates the message
    let _ = write!(out, "{:?}", err);
    out
}

/// Copy a `&str` into a bounded string, keeping as many whole chars as fit.
pub fn truncated<const N: usize>(value: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in value.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    #[allow(dead_code)]
    enum BusError {
        Nack(u8),
    }

    #[test]
    fn test_driver_error_is_formatted() {
        let err = PanelError::display(&BusError::Nack(0x38));
        assert_eq!(err, PanelError::Display(truncated("Nack(56)")));
    }

    #[test]
    fn test_display_reason_reads_as_display_failure() {
        let err = PanelError::display_reason("display already initialized");
        assert_ne!(err, PanelError::AlreadyStarted);

        let mut text: heapless::String<64> = heapless::String::new();
        write!(text, "{}", err).unwrap();
        assert_eq!(text.as_str(), "Display init failed: display already initialized");
    }

    #[test]
    fn test_truncated_keeps_whole_chars() {
        let s: heapless::String<4> = truncated("héllo");
        assert_eq!(s.as_str(), "hél");
    }
}
