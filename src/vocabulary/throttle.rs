//! Rate limiting for change-driven rebuilds.

use std::time::{Duration, Instant};

/// Whether a rebuild proposed at `now` may run.
///
/// Allowed when nothing was built yet, or when strictly more than `window`
/// has passed since `last`. A clock reading earlier than `last` counts as no
/// time elapsed.
///
/// ```rust
/// use std::time::{Duration, Instant};
/// use libcompletion::vocabulary::should_rebuild;
///
/// let window = Duration::from_millis(5000);
/// let last = Instant::now();
///
/// assert!(should_rebuild(last, None, window));
/// assert!(!should_rebuild(last + Duration::from_millis(4999), Some(last), window));
/// assert!(should_rebuild(last + Duration::from_millis(5001), Some(last), window));
/// ```
#[inline]
pub fn should_rebuild(now: Instant, last: Option<Instant>, window: Duration) -> bool {
    match last {
        None => true,
        Some(last) => now.saturating_duration_since(last) > window,
    }
}

/// [`should_rebuild`] bound to a fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebuildThrottle {
    window: Duration,
}

impl RebuildThrottle {
    /// Throttle allowing one change-driven rebuild per `window`.
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    /// Minimum spacing between rebuilds.
    #[inline]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// See [`should_rebuild`].
    #[inline]
    pub fn should_rebuild(&self, now: Instant, last: Option<Instant>) -> bool {
        should_rebuild(now, last, self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(5000);

    #[test]
    fn test_first_rebuild_always_allowed() {
        assert!(should_rebuild(Instant::now(), None, WINDOW));
    }

    #[test]
    fn test_window_boundaries() {
        let last = Instant::now();
        let ms = Duration::from_millis;

        assert!(!should_rebuild(last, Some(last), WINDOW));
        assert!(!should_rebuild(last + ms(4999), Some(last), WINDOW));
        assert!(!should_rebuild(last + WINDOW, Some(last), WINDOW));
        assert!(should_rebuild(last + ms(5001), Some(last), WINDOW));
    }

    #[test]
    fn test_clock_before_last_rebuild() {
        let now = Instant::now();
        let last = now + Duration::from_secs(1);
        assert!(!should_rebuild(now, Some(last), WINDOW));
    }

    #[test]
    fn test_zero_window() {
        let last = Instant::now();
        assert!(!should_rebuild(last, Some(last), Duration::ZERO));
        assert!(should_rebuild(last + Duration::from_nanos(1), Some(last), Duration::ZERO));
    }

    #[test]
    fn test_throttle_wraps_window() {
        let throttle = RebuildThrottle::new(Duration::from_millis(100));
        let last = Instant::now();

        assert_eq!(throttle.window(), Duration::from_millis(100));
        assert!(throttle.should_rebuild(last, None));
        assert!(!throttle.should_rebuild(last + Duration::from_millis(50), Some(last)));
        assert!(throttle.should_rebuild(last + Duration::from_millis(150), Some(last)));
    }
}
