// Deterministic random sources for tests

use super::sample::{RandomSource, SeededRandom};

/// Replays a fixed sequence of draws, cycling when exhausted
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "scripted sequence must not be empty");
        Self { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// Neutral noise draws with a real loss draw, matching `simulate_ping`'s
/// four-draw layout
pub struct NoiselessRandom {
    inner: SeededRandom,
    calls: usize,
}

impl NoiselessRandom {
    pub fn new(inner: SeededRandom) -> Self {
        Self { inner, calls: 0 }
    }
}

impl RandomSource for NoiselessRandom {
    fn next_unit(&mut self) -> f64 {
        let slot = self.calls % 4;
        self.calls += 1;
        if slot == 3 {
            self.inner.next_unit()
        } else {
            0.5
        }
    }
}
