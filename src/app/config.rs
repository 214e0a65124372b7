// Application configuration types
//
// This module contains configuration structs and constants for:
// - Frame pacing (refresh interval)
// - Sample generation and scheduling
// - The endpoint registry (built-in or loaded from TOML)

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Deserialize;
use thiserror::Error;

use crate::radar::endpoint::{default_registry, Endpoint};

// ============================================================================
// Constants
// ============================================================================

/// Default frame interval in milliseconds (~60Hz)
pub const DEFAULT_FRAME_MS: u64 = 16;

/// Minimum frame interval in milliseconds
pub const MIN_FRAME_MS: u64 = 8;

/// Maximum frame interval in milliseconds
pub const MAX_FRAME_MS: u64 = 1000;

/// Frame interval adjustment step in milliseconds
pub const FRAME_STEP_MS: u64 = 8;

/// Duration to highlight a recently changed frame interval
pub const CHANGE_HIGHLIGHT_DURATION: Duration = Duration::from_millis(500);

/// Number of samples kept per endpoint
pub const HISTORY_LEN: usize = 28;

/// Samples pre-seeded into each history at startup
pub const DEFAULT_SEED_SAMPLES: usize = 6;

/// Latency below this is classified as good
pub const GOOD_BELOW_MS: u32 = 60;

/// Latency at or above this is classified as bad
pub const BAD_FROM_MS: u32 = 150;

/// Wire value meaning "sample lost"
pub const LOST_SENTINEL: u32 = 999;

// ============================================================================
// Errors
// ============================================================================

/// Failures while loading the endpoint registry
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read endpoint registry {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid endpoint registry {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("endpoint registry is empty")]
    EmptyRegistry,

    #[error("endpoint id must not be blank")]
    BlankId,

    #[error("duplicate endpoint id '{0}'")]
    DuplicateId(String),

    #[error("endpoint '{0}' must have a positive baseline latency")]
    ZeroBaseline(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Constants of the simulated latency distribution
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    /// Scale applied to the combined noise term
    pub variance: f64,
    /// Extra amplification on top of the variance
    pub amplify: f64,
    /// Width of the small independent jitter term (ms)
    pub jitter_ms: f64,
    /// Lowest latency a generated sample may report
    pub min_ms: u32,
    /// Highest latency a generated sample may report
    pub max_ms: u32,
    /// Loss probability floor before deviation is added
    pub loss_base: f64,
    /// Divisor turning |delta| into extra loss probability
    pub loss_divisor: f64,
    pub loss_min: f64,
    pub loss_max: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            variance: 20.0,
            amplify: 1.2,
            jitter_ms: 10.0,
            min_ms: 2,
            max_ms: 2000,
            loss_base: 0.02,
            loss_divisor: 600.0,
            loss_min: 0.01,
            loss_max: 0.35,
        }
    }
}

/// Radar behaviour: history depth, sampling cadence and ripple timing
#[derive(Debug, Clone, PartialEq)]
pub struct RadarConfig {
    /// Maximum samples kept per endpoint
    pub history_len: usize,

    /// Samples generated into each history before the first frame
    pub seed_samples: usize,

    pub sampler: SamplerConfig,

    /// First due offset is base + two independent draws of this jitter (ms)
    pub first_due_base_ms: f64,
    pub first_due_jitter_ms: f64,

    /// Every later due offset is base + one draw of this jitter (ms)
    pub due_base_ms: f64,
    pub due_jitter_ms: f64,

    /// Ripple lifetime is min + one draw of spread (seconds)
    pub ripple_min_secs: f64,
    pub ripple_spread_secs: f64,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            history_len: HISTORY_LEN,
            seed_samples: DEFAULT_SEED_SAMPLES,
            sampler: SamplerConfig::default(),
            first_due_base_ms: 900.0,
            first_due_jitter_ms: 200.0,
            due_base_ms: 900.0,
            due_jitter_ms: 260.0,
            ripple_min_secs: 1.2,
            ripple_spread_secs: 0.6,
        }
    }
}

/// Configuration for the frame interval
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Frame interval in milliseconds (MIN_FRAME_MS..=MAX_FRAME_MS)
    pub frame_ms: u64,

    /// Timestamp of last interval change (for visual feedback)
    pub last_change: Option<Instant>,
}

impl RefreshConfig {
    pub fn new(frame_ms: u64) -> Self {
        Self {
            frame_ms: frame_ms.clamp(MIN_FRAME_MS, MAX_FRAME_MS),
            last_change: None,
        }
    }

    /// Get frame interval as Duration
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Whether the interval changed within CHANGE_HIGHLIGHT_DURATION
    pub fn recently_changed(&self) -> bool {
        self.last_change
            .is_some_and(|at| at.elapsed() < CHANGE_HIGHLIGHT_DURATION)
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_MS)
    }
}

/// Everything the application needs at startup, resolved from the CLI
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoints: Vec<Endpoint>,
    pub radar: RadarConfig,
    /// Fixed RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
    pub frame_ms: u64,
    /// Start sampling immediately instead of waiting for the start key
    pub autostart: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoints: default_registry(),
            radar: RadarConfig::default(),
            seed: None,
            frame_ms: DEFAULT_FRAME_MS,
            autostart: false,
        }
    }
}

// ============================================================================
// Endpoint registry loading
// ============================================================================

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(rename = "endpoint", default)]
    endpoints: Vec<Endpoint>,
}

/// Load and validate an endpoint registry from a TOML file
///
/// The file holds one `[[endpoint]]` table per endpoint:
///
/// ```toml
/// [[endpoint]]
/// id = "eu"
/// name = "EU - London"
/// region = "eu-west-2"
/// baseline_ms = 28
/// ```
pub fn load_registry(path: &Path) -> Result<Vec<Endpoint>, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: RegistryFile = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_registry(&file.endpoints)?;
    tracing::info!(path = %path.display(), endpoints = file.endpoints.len(), "loaded endpoint registry");
    Ok(file.endpoints)
}

/// Check registry invariants: non-empty, unique non-blank ids, positive baselines
pub fn validate_registry(endpoints: &[Endpoint]) -> Result<(), ConfigError> {
    if endpoints.is_empty() {
        return Err(ConfigError::EmptyRegistry);
    }

    let mut seen = HashSet::new();
    for endpoint in endpoints {
        if endpoint.id.trim().is_empty() {
            return Err(ConfigError::BlankId);
        }
        if !seen.insert(endpoint.id.as_str()) {
            return Err(ConfigError::DuplicateId(endpoint.id.clone()));
        }
        if endpoint.baseline_ms == 0 {
            return Err(ConfigError::ZeroBaseline(endpoint.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn endpoint(id: &str, baseline_ms: u32) -> Endpoint {
        Endpoint {
            id: id.to_string(),
            name: format!("{id} name"),
            region: "test-1".to_string(),
            baseline_ms,
        }
    }

    #[test]
    fn test_default_registry_is_valid() {
        assert!(validate_registry(&default_registry()).is_ok());
    }

    #[test]
    fn test_validate_registry_rejects_empty() {
        assert!(matches!(
            validate_registry(&[]),
            Err(ConfigError::EmptyRegistry)
        ));
    }

    #[test]
    fn test_validate_registry_rejects_duplicates() {
        let endpoints = vec![endpoint("eu", 28), endpoint("eu", 42)];
        match validate_registry(&endpoints) {
            Err(ConfigError::DuplicateId(id)) => assert_eq!(id, "eu"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_registry_rejects_zero_baseline_and_blank_id() {
        assert!(matches!(
            validate_registry(&[endpoint("eu", 0)]),
            Err(ConfigError::ZeroBaseline(_))
        ));
        assert!(matches!(
            validate_registry(&[endpoint("  ", 10)]),
            Err(ConfigError::BlankId)
        ));
    }

    #[test]
    fn test_load_registry_from_toml() {
        let path = std::env::temp_dir().join(format!(
            "pingradar-registry-{}.toml",
            std::process::id()
        ));
        {
            let mut file = fs::File::create(&path).unwrap();
            writeln!(
                file,
                r#"
[[endpoint]]
id = "fra"
name = "EU - Frankfurt"
region = "eu-central-1"
baseline_ms = 31

[[endpoint]]
id = "tok"
name = "Asia - Tokyo"
region = "ap-northeast-1"
baseline_ms = 140
"#
            )
            .unwrap();
        }

        let endpoints = load_registry(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0].id, "fra");
        assert_eq!(endpoints[1].baseline_ms, 140);
    }

    #[test]
    fn test_load_registry_missing_file() {
        let path = Path::new("/nonexistent/pingradar/registry.toml");
        assert!(matches!(
            load_registry(path),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_refresh_config_clamps_interval() {
        assert_eq!(RefreshConfig::new(1).frame_ms, MIN_FRAME_MS);
        assert_eq!(RefreshConfig::new(60_000).frame_ms, MAX_FRAME_MS);
        assert_eq!(
            RefreshConfig::default().frame_interval(),
            Duration::from_millis(DEFAULT_FRAME_MS)
        );
    }
}
