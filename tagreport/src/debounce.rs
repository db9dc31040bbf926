//! Minimum-interval gate between accepted send attempts.

/// Tracks the timestamp of the last accepted send. Owned by the reporter
/// loop; execution is single threaded, so no locking.
#[derive(Debug, Clone, Copy)]
pub struct Debounce {
    window_ms: u64,
    last_accepted: Option<u64>,
}

impl Debounce {
    pub const fn new(window_ms: u64) -> Self {
        Self { window_ms, last_accepted: None }
    }

    /// Returns `true` and records `now_ms` when enough time has elapsed
    /// since the last accepted send. The timestamp is only updated on
    /// acceptance, so rejected reads never extend the window.
    pub fn try_accept(&mut self, now_ms: u64) -> bool {
        let ok = match self.last_accepted {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.window_ms,
        };
        if ok {
            self.last_accepted = Some(now_ms);
        }
        ok
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_read_is_always_accepted() {
        let mut d = Debounce::new(2000);
        assert!(d.try_accept(0));
    }

    #[test]
    fn send_inside_window_is_suppressed() {
        let mut d = Debounce::new(2000);
        assert!(d.try_accept(10_000));
        assert!(!d.try_accept(11_000));
    }

    #[test]
    fn send_after_window_proceeds() {
        let mut d = Debounce::new(2000);
        assert!(d.try_accept(10_000));
        assert!(d.try_accept(12_001));
    }

    #[test]
    fn boundary_is_inclusive() {
        let mut d = Debounce::new(2000);
        assert!(d.try_accept(10_000));
        assert!(d.try_accept(12_000));
    }

    #[test]
    fn rejected_reads_do_not_extend_the_window() {
        let mut d = Debounce::new(2000);
        assert!(d.try_accept(10_000));
        assert!(!d.try_accept(11_999));
        // still measured from the accepted send at t=10_000
        assert!(d.try_accept(12_000));
    }

    #[test]
    fn zero_window_always_accepts() {
        let mut d = Debounce::new(0);
        assert!(d.try_accept(5));
        assert!(d.try_accept(5));
        assert!(d.try_accept(6));
    }
}
