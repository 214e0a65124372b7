// Expanding ripple rings marking recent samples

use std::time::Duration;

use super::sample::Quality;

/// Radius every ripple starts from
pub const RIPPLE_BASE_RADIUS: f64 = 8.0;

/// A transient ring animation on the radar surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub started_at: Duration,
    /// Lifetime in seconds
    pub duration_secs: f64,
    /// Growth beyond RIPPLE_BASE_RADIUS at the end of the lifetime
    pub max_radius: f64,
    pub quality: Quality,
}

impl Ripple {
    /// Animation progress in [0, 1) at `now`, or None once the ripple has expired
    pub fn progress(&self, now: Duration) -> Option<f64> {
        let elapsed = now.saturating_sub(self.started_at).as_secs_f64();
        if elapsed >= self.duration_secs {
            None
        } else {
            Some(elapsed / self.duration_secs)
        }
    }

    #[cfg(test)]
    pub fn is_expired(&self, now: Duration) -> bool {
        self.progress(now).is_none()
    }

    pub fn radius_at(&self, progress: f64) -> f64 {
        RIPPLE_BASE_RADIUS + progress * self.max_radius
    }

    /// Linear fade out
    pub fn opacity_at(progress: f64) -> f64 {
        1.0 - progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ripple(started_ms: u64, duration_secs: f64) -> Ripple {
        Ripple {
            started_at: Duration::from_millis(started_ms),
            duration_secs,
            max_radius: 100.0,
            quality: Quality::Good,
        }
    }

    #[test]
    fn test_progress_and_expiry() {
        let r = ripple(1000, 1.5);
        assert_eq!(r.progress(Duration::from_millis(1000)), Some(0.0));
        let mid = r.progress(Duration::from_millis(1750)).unwrap();
        assert!((mid - 0.5).abs() < 1e-9);
        assert!(!r.is_expired(Duration::from_millis(2499)));
        assert!(r.is_expired(Duration::from_millis(2500)));
        assert!(r.is_expired(Duration::from_millis(9000)));
    }

    #[test]
    fn test_radius_and_opacity() {
        let r = ripple(0, 1.2);
        assert_eq!(r.radius_at(0.0), 8.0);
        assert_eq!(r.radius_at(0.5), 58.0);
        assert_eq!(Ripple::opacity_at(0.0), 1.0);
        assert_eq!(Ripple::opacity_at(0.25), 0.75);
    }

    #[test]
    fn test_render_before_start_counts_as_start() {
        let r = ripple(5000, 1.2);
        assert_eq!(r.progress(Duration::from_millis(4000)), Some(0.0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_ripple_lives_exactly_its_duration(
            started_ms in 0u64..1_000_000u64,
            spread in 0.0f64..0.6f64,
            offset_ms in 0u64..3000u64,
        ) {
            let duration_secs = 1.2 + spread;
            let r = ripple(started_ms, duration_secs);
            let now = Duration::from_millis(started_ms + offset_ms);
            let lifetime_ms = duration_secs * 1000.0;

            if (offset_ms as f64) < lifetime_ms.floor() {
                prop_assert!(r.progress(now).is_some());
            }
            if (offset_ms as f64) > lifetime_ms.ceil() {
                prop_assert!(r.progress(now).is_none());
            }
        }
    }
}
