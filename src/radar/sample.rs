// Latency samples, quality classification and the sample generator

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::app::config::{SamplerConfig, BAD_FROM_MS, GOOD_BELOW_MS, LOST_SENTINEL};

/// One latency measurement for an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// Round-trip latency in milliseconds
    Latency(u32),
    /// No reply
    Lost,
}

impl Sample {
    /// Decode the injection wire format, where 999 means lost
    pub fn from_wire(value: u32) -> Self {
        if value == LOST_SENTINEL {
            Sample::Lost
        } else {
            Sample::Latency(value)
        }
    }

    pub fn latency_ms(&self) -> Option<u32> {
        match self {
            Sample::Latency(ms) => Some(*ms),
            Sample::Lost => None,
        }
    }

    pub fn is_lost(&self) -> bool {
        matches!(self, Sample::Lost)
    }

    pub fn quality(&self) -> Quality {
        match self {
            Sample::Lost => Quality::Bad,
            Sample::Latency(ms) => Quality::from_latency(*ms),
        }
    }

    /// Text shown for the numeric reading
    pub fn display(&self) -> String {
        match self {
            Sample::Latency(ms) => format!("{}ms", ms),
            Sample::Lost => "--".to_string(),
        }
    }
}

/// Three-valued classification used for ripple color and reading color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    /// < 60ms
    Good,
    /// 60-149ms
    Warn,
    /// >= 150ms or lost
    Bad,
}

impl Quality {
    pub fn from_latency(latency_ms: u32) -> Self {
        if latency_ms >= BAD_FROM_MS {
            Quality::Bad
        } else if latency_ms < GOOD_BELOW_MS {
            Quality::Good
        } else {
            Quality::Warn
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quality::Good => "good",
            Quality::Warn => "warn",
            Quality::Bad => "bad",
        }
    }
}

/// Source of uniform random numbers in [0, 1)
///
/// The radar draws every random decision through this trait so the simulation
/// can be replayed from a seed or scripted in tests.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// `StdRng`-backed random source
#[derive(Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Loss probability for a given noise delta, clamped to the configured range
pub fn loss_chance(delta: f64, config: &SamplerConfig) -> f64 {
    (config.loss_base + delta.abs() / config.loss_divisor).clamp(config.loss_min, config.loss_max)
}

/// Round to the nearest integer, ties toward positive infinity (-1.5 -> -1)
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Produce one simulated sample around `baseline_ms`
///
/// Two uniform draws are summed into a roughly triangular noise term, scaled
/// and rounded into `delta`; a third draw adds a small jitter. The loss
/// probability grows with |delta| so that noisy samples drop more often.
/// Exactly four draws are taken, in a fixed order.
pub fn simulate_ping(
    baseline_ms: u32,
    config: &SamplerConfig,
    rng: &mut dyn RandomSource,
) -> Sample {
    let noise = (rng.next_unit() - 0.5) + (rng.next_unit() - 0.5);
    let delta = round_half_up(noise * config.variance * config.amplify);
    let jitter = (rng.next_unit() - 0.5) * config.jitter_ms;

    let ping = round_half_up(f64::from(baseline_ms) + delta + jitter)
        .clamp(f64::from(config.min_ms), f64::from(config.max_ms)) as u32;

    if rng.next_unit() < loss_chance(delta, config) {
        Sample::Lost
    } else {
        Sample::Latency(ping)
    }
}
