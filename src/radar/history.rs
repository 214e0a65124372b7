// Rolling per-endpoint sample history

use std::collections::VecDeque;

use super::sample::Sample;

/// Bounded FIFO of samples, oldest first
///
/// Recording past capacity evicts from the front, so the buffer always holds
/// the most recent `capacity` samples in chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn record(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.samples.iter()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<Sample> {
        self.samples.back().copied()
    }

    /// Mean latency over non-lost samples
    pub fn average_ms(&self) -> Option<f64> {
        let (sum, count) = self
            .samples
            .iter()
            .filter_map(Sample::latency_ms)
            .fold((0u64, 0u32), |(sum, count), ms| (sum + u64::from(ms), count + 1));
        if count == 0 {
            None
        } else {
            Some(sum as f64 / f64::from(count))
        }
    }

    /// Fraction of samples that were lost (0.0 when empty)
    pub fn loss_ratio(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let lost = self.samples.iter().filter(|s| s.is_lost()).count();
        lost as f64 / self.samples.len() as f64
    }
}
