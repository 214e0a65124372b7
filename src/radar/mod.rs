// Latency radar core
//
// This module owns the simulated radar: the endpoint states, the sample
// generator, the per-frame tick and the start/stop lifecycle. It has no
// knowledge of the terminal; drawing goes through render::Surface and frame
// callbacks through schedule::FrameScheduler.

pub mod endpoint;
pub mod history;
pub mod render;
pub mod ripple;
pub mod sample;
pub mod schedule;

#[cfg(test)]
pub mod testing;

use std::collections::HashMap;
use std::time::Duration;

use crate::app::config::RadarConfig;
use endpoint::{Endpoint, EndpointState};
use render::{layout_positions, render_radar, ripple_reach, Scene};
use ripple::Ripple;
use sample::{simulate_ping, RandomSource, Sample};
use schedule::{FrameHandle, FrameScheduler};

/// The radar controller
pub struct Radar {
    config: RadarConfig,

    /// Endpoint states in registry order (drives the angular layout)
    states: Vec<EndpointState>,

    /// Endpoint id -> index into `states`
    index: HashMap<String, usize>,

    rng: Box<dyn RandomSource>,

    /// Most recent radar frame
    scene: Scene,

    /// Time of the most recent render, reused when a resize forces a redraw
    rendered_at: Duration,

    running: bool,

    /// Frame requested from the scheduler and not yet delivered
    pending_frame: Option<FrameHandle>,

    /// Total samples recorded since startup (simulated and injected)
    samples_recorded: u64,
}

impl Radar {
    /// Build a stopped radar and warm each history with `config.seed_samples`
    pub fn new(endpoints: Vec<Endpoint>, config: RadarConfig, mut rng: Box<dyn RandomSource>) -> Self {
        let mut states = Vec::with_capacity(endpoints.len());
        let mut index = HashMap::with_capacity(endpoints.len());

        for endpoint in endpoints {
            let mut state = EndpointState::new(endpoint, config.history_len);
            for _ in 0..config.seed_samples {
                let sample = simulate_ping(state.endpoint.baseline_ms, &config.sampler, rng.as_mut());
                state.history.record(sample);
            }
            index.insert(state.endpoint.id.clone(), states.len());
            states.push(state);
        }

        Self {
            config,
            states,
            index,
            rng,
            scene: Scene::default(),
            rendered_at: Duration::ZERO,
            running: false,
            pending_frame: None,
            samples_recorded: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn states(&self) -> &[EndpointState] {
        &self.states
    }

    #[cfg(test)]
    pub fn state(&self, id: &str) -> Option<&EndpointState> {
        self.index.get(id).map(|&i| &self.states[i])
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn surface_size(&self) -> (f64, f64) {
        (self.scene.width(), self.scene.height())
    }

    pub fn samples_recorded(&self) -> u64 {
        self.samples_recorded
    }

    /// Resize the radar surface and recompute endpoint positions
    ///
    /// The current frame is redrawn at the last render time so a stopped radar
    /// still shows a correctly laid out picture.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.scene.set_size(width, height);
        let positions = layout_positions(self.states.len(), width, height);
        for (state, (x, y)) in self.states.iter_mut().zip(positions) {
            state.x = x;
            state.y = y;
        }
        render_radar(&mut self.states, &mut self.scene, self.rendered_at);
        tracing::debug!(width, height, "radar surface resized");
    }

    /// Transition to Running and request the first frame. No-op when running.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.pending_frame = Some(scheduler.request_frame());
        tracing::info!(endpoints = self.states.len(), "radar started");
        true
    }

    /// Transition to Stopped and cancel the pending frame. No-op when stopped.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        if let Some(handle) = self.pending_frame.take() {
            scheduler.cancel_frame(handle);
        }
        tracing::info!(samples = self.samples_recorded, "radar stopped");
        true
    }

    /// Deliver a frame: run one tick and request the next frame
    ///
    /// Frames that are not the pending one (cancelled or superseded) are
    /// ignored, as is any frame arriving while stopped.
    pub fn on_frame(&mut self, handle: FrameHandle, now: Duration, scheduler: &mut dyn FrameScheduler) {
        if !self.running || self.pending_frame != Some(handle) {
            return;
        }
        self.pending_frame = None;
        self.tick(now);
        if self.running {
            self.pending_frame = Some(scheduler.request_frame());
        }
    }

    /// One frame of work: schedule, sample due endpoints, then render
    ///
    /// All due endpoints are sampled before the single render pass. Does
    /// nothing while stopped.
    pub fn tick(&mut self, now: Duration) {
        if !self.running {
            return;
        }

        for i in 0..self.states.len() {
            if self.states[i].next_due.is_none() {
                let offset = self.config.first_due_base_ms
                    + self.rng.next_unit() * self.config.first_due_jitter_ms
                    + self.rng.next_unit() * self.config.first_due_jitter_ms;
                self.states[i].next_due = Some(now + millis(offset));
            }

            if self.states[i].is_due(now) {
                let baseline = self.states[i].endpoint.baseline_ms;
                let sample = simulate_ping(baseline, &self.config.sampler, self.rng.as_mut());
                self.apply_sample(i, sample, now);

                let offset = self.config.due_base_ms + self.rng.next_unit() * self.config.due_jitter_ms;
                self.states[i].next_due = Some(now + millis(offset));
            }
        }

        render_radar(&mut self.states, &mut self.scene, now);
        self.rendered_at = now;
    }

    /// Feed an externally measured sample, bypassing the simulation
    ///
    /// `value` 999 means lost; any other value is a latency in ms. Unknown
    /// endpoint ids are ignored. Returns whether the sample was recorded.
    pub fn update_ping_for(&mut self, id: &str, value: u32, now: Duration) -> bool {
        let Some(&i) = self.index.get(id) else {
            tracing::debug!(endpoint = id, value, "ignoring sample for unknown endpoint");
            return false;
        };
        self.apply_sample(i, Sample::from_wire(value), now);
        true
    }

    /// Record a sample, update the reading and emit a ripple
    fn apply_sample(&mut self, i: usize, sample: Sample, now: Duration) {
        let duration_secs =
            self.config.ripple_min_secs + self.rng.next_unit() * self.config.ripple_spread_secs;
        let max_radius = ripple_reach(self.scene.width(), self.scene.height());

        let state = &mut self.states[i];
        state.history.record(sample);
        state.latest = Some(sample);
        state.ripples.push(Ripple {
            started_at: now,
            duration_secs,
            max_radius,
            quality: sample.quality(),
        });
        self.samples_recorded += 1;

        tracing::debug!(
            endpoint = %state.endpoint.id,
            reading = %sample.display(),
            quality = sample.quality().label(),
            "sample recorded"
        );
    }
}

/// Fractional milliseconds as a Duration, rounded to the microsecond
fn millis(ms: f64) -> Duration {
    Duration::from_micros((ms * 1000.0).round() as u64)
}
