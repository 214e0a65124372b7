// Frame scheduling and the radar clock
//
// The radar never sleeps or loops on its own. It asks a FrameScheduler for the
// next frame and the host delivers that frame back through Radar::on_frame.
// In the terminal the host is the main event loop polling a FrameQueue; tests
// drive the same queue by hand with explicit timestamps.

use std::time::{Duration, Instant};

/// Ticket for one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Something that can deliver "next frame" callbacks
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Single-slot frame queue polled by the host loop
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending frame, if any, for delivery
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

/// Monotonic clock reporting time since the radar was created
#[derive(Debug, Clone, Copy)]
pub struct RadarClock {
    origin: Instant,
}

impl RadarClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl Default for RadarClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_replaces_pending() {
        let mut queue = FrameQueue::new();
        assert!(!queue.is_pending());

        let first = queue.request_frame();
        let second = queue.request_frame();
        assert_ne!(first, second);
        assert_eq!(queue.take_due(), Some(second));
        assert_eq!(queue.take_due(), None);
    }

    #[test]
    fn test_cancel_only_matching_handle() {
        let mut queue = FrameQueue::new();
        let stale = queue.request_frame();
        let current = queue.request_frame();

        queue.cancel_frame(stale);
        assert!(queue.is_pending());

        queue.cancel_frame(current);
        assert!(!queue.is_pending());
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = RadarClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
