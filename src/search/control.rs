//! Per-search cancellation and node accounting (spec §5, §9's "global mutable
//! state" flag resolved by owning this on the `Engine`, not a process-wide
//! `static`, so a host embedding several engines gives each its own clock).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Checked every node; flipped when the search is cut short (spec §5
/// "cancellation: the `timeUp` callback is the only cancellation mechanism").
pub struct SearchControl {
    stop: Arc<AtomicBool>,
    deadline: Instant,
    nodes: u64,
    check_counter: u32,
}

/// How often `should_stop` actually reads the clock/flag, in nodes. Reading
/// `Instant::now()` every node would dominate runtime at high NPS.
const CHECK_INTERVAL: u32 = 2048;

impl SearchControl {
    #[must_use]
    pub fn new(stop: Arc<AtomicBool>, time_limit: Duration) -> Self {
        SearchControl { stop, deadline: Instant::now() + time_limit, nodes: 0, check_counter: 0 }
    }

    #[inline]
    pub fn node_visited(&mut self) {
        self.nodes += 1;
    }

    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// True once the time budget is exhausted or the external stop flag is
    /// set. Cheap on most calls; only samples the clock every
    /// [`CHECK_INTERVAL`] nodes.
    pub fn should_stop(&mut self) -> bool {
        self.check_counter = self.check_counter.wrapping_add(1);
        if self.check_counter % CHECK_INTERVAL != 0 {
            return false;
        }
        self.stop.load(Ordering::Relaxed) || Instant::now() >= self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_control_does_not_stop_immediately() {
        let mut control = SearchControl::new(Arc::new(AtomicBool::new(false)), Duration::from_secs(10));
        assert!(!control.should_stop());
    }

    #[test]
    fn external_flag_stops_search_once_sampled() {
        let stop = Arc::new(AtomicBool::new(true));
        let mut control = SearchControl::new(stop, Duration::from_secs(10));
        for _ in 0..CHECK_INTERVAL {
            control.should_stop();
        }
        assert!(control.should_stop());
    }

    #[test]
    fn expired_deadline_stops_search() {
        let mut control = SearchControl::new(Arc::new(AtomicBool::new(false)), Duration::from_millis(0));
        std::thread::sleep(Duration::from_millis(2));
        for _ in 0..CHECK_INTERVAL {
            control.should_stop();
        }
        assert!(control.should_stop());
    }
}
