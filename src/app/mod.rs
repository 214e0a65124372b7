// Application state management
//
// This module contains the main AppState struct, which owns the radar, the
// frame queue driving it and the UI selection state. Configuration types live
// in the config submodule.

pub mod config;
pub mod event;
pub mod feed;

pub use config::{RefreshConfig, Settings};

use crate::radar::sample::{RandomSource, SeededRandom};
use crate::radar::schedule::{FrameQueue, RadarClock};
use crate::radar::Radar;
use config::{FRAME_STEP_MS, MAX_FRAME_MS, MIN_FRAME_MS};
use feed::FeedEntry;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

/// Main application state
pub struct AppState {
    /// Whether the application is running (false once the user quits)
    pub running: bool,

    /// The latency radar
    pub radar: Radar,

    /// Frame requests from the radar, delivered by on_tick
    frames: FrameQueue,

    /// Time source for radar timestamps
    clock: RadarClock,

    /// Frame interval configuration
    pub refresh_config: RefreshConfig,

    /// Index of the highlighted endpoint in the endpoint list
    pub selected_endpoint: usize,

    /// External measurements, when a feed is attached
    feed: Option<Receiver<FeedEntry>>,

    /// Number of samples accepted from the feed
    pub feed_samples: u64,
}

impl AppState {
    /// Create a new AppState from resolved settings
    pub fn new(settings: Settings) -> Self {
        let rng: Box<dyn RandomSource> = match settings.seed {
            Some(seed) => Box::new(SeededRandom::from_seed(seed)),
            None => Box::new(SeededRandom::from_entropy()),
        };

        let radar = Radar::new(settings.endpoints, settings.radar, rng);

        let mut state = Self {
            running: true,
            radar,
            frames: FrameQueue::new(),
            clock: RadarClock::new(),
            refresh_config: RefreshConfig::new(settings.frame_ms),
            selected_endpoint: 0,
            feed: None,
            feed_samples: 0,
        };

        if settings.autostart {
            state.start_radar();
        }

        state
    }

    /// Attach a stream of external measurements
    pub fn with_feed(mut self, feed: Receiver<FeedEntry>) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Whether a feed is attached and still open
    pub fn has_feed(&self) -> bool {
        self.feed.is_some()
    }

    /// Advance the application by one loop iteration
    pub fn on_tick(&mut self) {
        let now = self.clock.now();
        self.tick_at(now);
    }

    /// One loop iteration at radar time `now`
    ///
    /// Drains pending feed entries, then delivers the radar's pending frame.
    fn tick_at(&mut self, now: Duration) {
        self.drain_feed(now);

        if let Some(handle) = self.frames.take_due() {
            self.radar.on_frame(handle, now, &mut self.frames);
        }
    }

    fn drain_feed(&mut self, now: Duration) {
        let Some(feed) = &self.feed else {
            return;
        };

        let mut closed = false;
        loop {
            match feed.try_recv() {
                Ok(entry) => {
                    if self.radar.update_ping_for(&entry.endpoint_id, entry.value, now) {
                        self.feed_samples += 1;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    closed = true;
                    break;
                }
            }
        }

        if closed {
            tracing::info!(samples = self.feed_samples, "feed closed");
            self.feed = None;
        }
    }

    /// Start sampling (no-op when already running)
    pub fn start_radar(&mut self) {
        self.radar.start(&mut self.frames);
    }

    /// Stop sampling (no-op when already stopped)
    pub fn stop_radar(&mut self) {
        self.radar.stop(&mut self.frames);
    }

    pub fn toggle_radar(&mut self) {
        if self.radar.is_running() {
            self.stop_radar();
        } else {
            self.start_radar();
        }
    }

    /// Resize the radar surface if the visual host changed size
    pub fn fit_radar(&mut self, width: f64, height: f64) {
        if self.radar.surface_size() != (width, height) {
            self.radar.resize(width, height);
        }
    }

    /// Move endpoint selection up (decrease index)
    pub fn select_previous_endpoint(&mut self) {
        self.selected_endpoint = self.selected_endpoint.saturating_sub(1);
    }

    /// Move endpoint selection down (increase index)
    pub fn select_next_endpoint(&mut self) {
        let last = self.radar.states().len().saturating_sub(1);
        if self.selected_endpoint < last {
            self.selected_endpoint += 1;
        }
    }

    /// Increase frame rate (decrease interval by FRAME_STEP_MS, clamp to minimum)
    pub fn increase_frame_rate(&mut self) {
        let new_interval = self
            .refresh_config
            .frame_ms
            .saturating_sub(FRAME_STEP_MS);
        self.refresh_config.frame_ms = new_interval.max(MIN_FRAME_MS);
        self.refresh_config.last_change = Some(Instant::now());
    }

    /// Decrease frame rate (increase interval by FRAME_STEP_MS, clamp to maximum)
    pub fn decrease_frame_rate(&mut self) {
        let new_interval = self
            .refresh_config
            .frame_ms
            .saturating_add(FRAME_STEP_MS);
        self.refresh_config.frame_ms = new_interval.min(MAX_FRAME_MS);
        self.refresh_config.last_change = Some(Instant::now());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
