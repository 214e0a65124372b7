// Endpoint registry and per-endpoint radar state

use std::time::Duration;

use serde::Deserialize;

use super::history::History;
use super::ripple::Ripple;
use super::sample::Sample;

/// A monitored endpoint. Immutable once the radar is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Endpoint {
    /// Unique key, also used by the injection API
    pub id: String,
    pub name: String,
    pub region: String,
    /// Latency the simulation centres on (ms)
    pub baseline_ms: u32,
}

impl Endpoint {
    pub fn new(id: &str, name: &str, region: &str, baseline_ms: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            region: region.to_string(),
            baseline_ms,
        }
    }
}

/// Built-in endpoint set used when no registry file is given
pub fn default_registry() -> Vec<Endpoint> {
    vec![
        Endpoint::new("eu", "EU - London", "eu-west-2", 28),
        Endpoint::new("us", "US - Virginia", "us-east-1", 42),
        Endpoint::new("in", "Asia - Mumbai", "ap-south-1", 72),
        Endpoint::new("au", "Oceania - Sydney", "ap-southeast-2", 118),
        Endpoint::new("sa", "SA - Sao Paulo", "sa-east-1", 160),
    ]
}

/// Mutable radar state for one endpoint
#[derive(Debug, Clone)]
pub struct EndpointState {
    pub endpoint: Endpoint,

    /// Screen position on the radar surface (y grows downward)
    pub x: f64,
    pub y: f64,

    /// Rolling window of recent samples, oldest first
    pub history: History,

    /// Ripples still animating on the radar
    pub ripples: Vec<Ripple>,

    /// When the next simulated sample is due; unset until the first tick
    pub next_due: Option<Duration>,

    /// Most recent sample shown as the numeric reading
    pub latest: Option<Sample>,
}

impl EndpointState {
    pub fn new(endpoint: Endpoint, history_len: usize) -> Self {
        Self {
            endpoint,
            x: 0.0,
            y: 0.0,
            history: History::with_capacity(history_len),
            ripples: Vec::new(),
            next_due: None,
            latest: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.endpoint.id
    }

    /// Text of the numeric reading: "--" before the first sample and for lost samples
    pub fn reading(&self) -> String {
        match self.latest {
            Some(sample) => sample.display(),
            None => "--".to_string(),
        }
    }

    /// Whether a sample is due at `now`
    pub fn is_due(&self, now: Duration) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }
}
