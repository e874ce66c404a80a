//! One-shot "interest registered" notification signal.

use std::time::{Duration, Instant};

/// How long a raised notice stays visible before the presentation layer
/// should auto-dismiss it.
pub const NOTICE_VISIBLE: Duration = Duration::from_secs(3);

/// One-shot, caller-acknowledged signal that a register-interest action
/// completed. Carries no payload beyond completion. Not queued and not
/// retried; raising it again while visible restarts the visible window.
#[derive(Debug, Default)]
pub struct InterestNotice {
    raised_at: Option<Instant>,
}

impl InterestNotice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the signal, restarting the visible window if already raised.
    pub fn raise(&mut self) {
        self.raised_at = Some(Instant::now());
    }

    /// True while the notice should be shown.
    pub fn is_visible(&self) -> bool {
        self.raised_at
            .is_some_and(|raised| raised.elapsed() < NOTICE_VISIBLE)
    }

    /// Acknowledges and clears the signal.
    pub fn dismiss(&mut self) {
        self.raised_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden() {
        assert!(!InterestNotice::new().is_visible());
    }

    #[test]
    fn raise_then_dismiss() {
        let mut notice = InterestNotice::new();
        notice.raise();
        assert!(notice.is_visible());
        notice.dismiss();
        assert!(!notice.is_visible());
    }

    #[test]
    fn reraise_restarts_the_window() {
        let mut notice = InterestNotice::new();
        notice.raise();
        let first = notice.raised_at.unwrap();
        notice.raise();
        assert!(notice.raised_at.unwrap() >= first);
        assert!(notice.is_visible());
    }

    #[test]
    fn expires_after_the_visible_window() {
        let mut notice = InterestNotice::new();
        notice.raised_at = Some(Instant::now() - NOTICE_VISIBLE);
        assert!(!notice.is_visible());
    }
}
