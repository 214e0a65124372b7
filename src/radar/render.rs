// Radar and sparkline renderers
//
// Renderers draw onto an abstract Surface using screen coordinates where y
// grows downward. Scene is the recording Surface: the terminal paints a Scene
// onto a ratatui canvas and tests inspect its shapes directly.

use std::f64::consts::PI;
use std::time::Duration;

use super::endpoint::EndpointState;
use super::history::History;
use super::ripple::Ripple;
use super::sample::{Quality, Sample};

/// Number of faint range rings
pub const RANGE_RING_COUNT: u32 = 4;

/// Spacing between range rings as a fraction of min(width, height)
pub const RANGE_RING_STEP: f64 = 0.08;

/// Radius of the endpoint orbit as a fraction of min(width, height)
pub const ORBIT_RATIO: f64 = 0.35;

/// Ripple growth as a fraction of min(width, height)
pub const RIPPLE_REACH_RATIO: f64 = 0.45;

/// Extent assumed for an unsized surface when sizing ripples
pub const FALLBACK_EXTENT: f64 = 300.0;

pub const DOT_RADIUS: f64 = 5.0;

/// Sparkline scale never shrinks below [0, SPARK_MIN_CEILING]
pub const SPARK_MIN_CEILING: f64 = 200.0;

/// Abstract paint roles; the theme decides actual colors
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    RangeRing,
    EndpointDot,
    Ripple { quality: Quality, opacity: f64 },
    SparkLine,
    SparkFill,
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        paint: Paint,
        filled: bool,
    },
    /// Open polyline
    Polyline { points: Vec<(f64, f64)>, paint: Paint },
    /// Region between the polyline and the bottom edge
    Area { points: Vec<(f64, f64)>, paint: Paint },
}

/// Drawable surface
pub trait Surface {
    /// (width, height) in surface units
    fn size(&self) -> (f64, f64);
    fn clear(&mut self);
    fn circle(&mut self, x: f64, y: f64, radius: f64, paint: Paint, filled: bool);
    fn polyline(&mut self, points: &[(f64, f64)], paint: Paint);
    fn area(&mut self, points: &[(f64, f64)], paint: Paint);
}

/// Recording surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    width: f64,
    height: f64,
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Ripple circles currently recorded
    #[cfg(test)]
    pub fn ripples(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.shapes.iter().filter(|shape| {
            matches!(
                shape,
                Shape::Circle {
                    paint: Paint::Ripple { .. },
                    ..
                }
            )
        })
    }

    fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

impl Surface for Scene {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn circle(&mut self, x: f64, y: f64, radius: f64, paint: Paint, filled: bool) {
        self.shapes.push(Shape::Circle {
            x,
            y,
            radius,
            paint,
            filled,
        });
    }

    fn polyline(&mut self, points: &[(f64, f64)], paint: Paint) {
        self.shapes.push(Shape::Polyline {
            points: points.to_vec(),
            paint,
        });
    }

    fn area(&mut self, points: &[(f64, f64)], paint: Paint) {
        self.shapes.push(Shape::Area {
            points: points.to_vec(),
            paint,
        });
    }
}

/// Endpoint positions evenly spaced on the orbit, first at the top, clockwise
pub fn layout_positions(count: usize, width: f64, height: f64) -> Vec<(f64, f64)> {
    let (cx, cy) = (width / 2.0, height / 2.0);
    let radius = width.min(height) * ORBIT_RATIO;

    (0..count)
        .map(|i| {
            let angle = (i as f64 / count as f64) * PI * 2.0 - PI / 2.0;
            (cx + angle.cos() * radius, cy + angle.sin() * radius)
        })
        .collect()
}

/// Maximum ripple growth for a surface, substituting FALLBACK_EXTENT for a zero side
pub fn ripple_reach(width: f64, height: f64) -> f64 {
    let w = if width > 0.0 { width } else { FALLBACK_EXTENT };
    let h = if height > 0.0 { height } else { FALLBACK_EXTENT };
    w.min(h) * RIPPLE_REACH_RATIO
}

/// Redraw the radar for `now`
///
/// Expired ripples are dropped from their endpoint; nothing else in `states`
/// is modified. An unsized surface draws nothing but still expires ripples.
pub fn render_radar(states: &mut [EndpointState], surface: &mut dyn Surface, now: Duration) {
    surface.clear();
    let (w, h) = surface.size();
    let drawable = w > 0.0 && h > 0.0;

    if drawable {
        let (cx, cy) = (w / 2.0, h / 2.0);
        let step = w.min(h) * RANGE_RING_STEP;
        for ring in 1..=RANGE_RING_COUNT {
            surface.circle(cx, cy, step * f64::from(ring), Paint::RangeRing, false);
        }
    }

    for state in states.iter_mut() {
        if drawable {
            surface.circle(state.x, state.y, DOT_RADIUS, Paint::EndpointDot, true);
        }

        let (x, y) = (state.x, state.y);
        state.ripples.retain(|ripple| match ripple.progress(now) {
            Some(progress) => {
                if drawable {
                    surface.circle(
                        x,
                        y,
                        ripple.radius_at(progress),
                        Paint::Ripple {
                            quality: ripple.quality,
                            opacity: Ripple::opacity_at(progress),
                        },
                        false,
                    );
                }
                true
            }
            None => false,
        });
    }
}

/// Map a history onto sparkline points for a `width` x `height` chart
///
/// The scale covers at least [0, 200] and widens to the largest non-lost
/// sample. Lost samples sit on the bottom edge. Returns None for an empty
/// history.
pub fn sparkline_points(history: &History, width: f64, height: f64) -> Option<Vec<(f64, f64)>> {
    if history.is_empty() {
        return None;
    }

    let valid: Vec<f64> = history
        .iter()
        .filter_map(Sample::latency_ms)
        .map(f64::from)
        .collect();
    let max = valid.iter().copied().fold(SPARK_MIN_CEILING, f64::max);
    let min = valid.iter().copied().fold(0.0, f64::min);
    let span = max - min;

    let last = (history.len() - 1).max(1) as f64;
    let points = history
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let x = (i as f64 / last) * width;
            let y = match sample.latency_ms() {
                Some(ms) => height - ((f64::from(ms) - min) / span) * height,
                None => height,
            };
            (x, y)
        })
        .collect();
    Some(points)
}

/// Draw a history as a filled line chart
pub fn render_sparkline(history: &History, surface: &mut dyn Surface) {
    surface.clear();
    let (w, h) = surface.size();
    if w <= 0.0 || h <= 0.0 {
        return;
    }

    let Some(points) = sparkline_points(history, w, h) else {
        return;
    };
    surface.polyline(&points, Paint::SparkLine);
    surface.area(&points, Paint::SparkFill);
}

impl Scene {
    /// Render a sparkline into a fresh scene of the given size
    pub fn sparkline(history: &History, width: f64, height: f64) -> Self {
        let mut scene = Scene::new(width, height);
        if scene.is_drawable() {
            render_sparkline(history, &mut scene);
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radar::endpoint::Endpoint;

    fn state_at(x: f64, y: f64) -> EndpointState {
        let mut state = EndpointState::new(Endpoint::new("eu", "EU", "eu-west-2", 28), 28);
        state.x = x;
        state.y = y;
        state
    }

    fn history_of(samples: &[Sample]) -> History {
        let mut history = History::with_capacity(28);
        for sample in samples {
            history.record(*sample);
        }
        history
    }

    #[test]
    fn test_layout_first_endpoint_at_top_clockwise() {
        let positions = layout_positions(4, 200.0, 100.0);
        // radius = 100 * 0.35 = 35 around (100, 50)
        let expected = [(100.0, 15.0), (135.0, 50.0), (100.0, 85.0), (65.0, 50.0)];
        for ((x, y), (ex, ey)) in positions.iter().zip(expected.iter()) {
            assert!((x - ex).abs() < 1e-9, "x {} != {}", x, ex);
            assert!((y - ey).abs() < 1e-9, "y {} != {}", y, ey);
        }
    }

    #[test]
    fn test_layout_preserves_count() {
        assert!(layout_positions(0, 100.0, 100.0).is_empty());
        assert_eq!(layout_positions(7, 80.0, 40.0).len(), 7);
    }

    #[test]
    fn test_render_draws_rings_dots_and_live_ripples() {
        let mut states = vec![state_at(50.0, 20.0)];
        states[0].ripples.push(Ripple {
            started_at: Duration::from_millis(0),
            duration_secs: 1.5,
            max_radius: 45.0,
            quality: Quality::Warn,
        });
        let mut scene = Scene::new(100.0, 100.0);

        render_radar(&mut states, &mut scene, Duration::from_millis(750));

        let rings: Vec<_> = scene
            .shapes()
            .iter()
            .filter(|s| matches!(s, Shape::Circle { paint: Paint::RangeRing, .. }))
            .collect();
        assert_eq!(rings.len(), 4);
        if let Shape::Circle { radius, .. } = rings[3] {
            assert!((radius - 32.0).abs() < 1e-9);
        }

        let ripples: Vec<_> = scene.ripples().collect();
        assert_eq!(ripples.len(), 1);
        match ripples[0] {
            Shape::Circle {
                radius,
                paint: Paint::Ripple { quality, opacity },
                ..
            } => {
                assert!((radius - (8.0 + 0.5 * 45.0)).abs() < 1e-9);
                assert!((opacity - 0.5).abs() < 1e-9);
                assert_eq!(*quality, Quality::Warn);
            }
            other => panic!("unexpected shape {:?}", other),
        }
        assert_eq!(states[0].ripples.len(), 1);
    }

    #[test]
    fn test_render_expires_ripples() {
        let mut states = vec![state_at(10.0, 10.0)];
        states[0].ripples.push(Ripple {
            started_at: Duration::from_millis(0),
            duration_secs: 1.2,
            max_radius: 45.0,
            quality: Quality::Good,
        });
        let mut scene = Scene::new(100.0, 100.0);

        render_radar(&mut states, &mut scene, Duration::from_millis(1200));

        assert!(states[0].ripples.is_empty());
        assert_eq!(scene.ripples().count(), 0);
    }

    #[test]
    fn test_render_on_unsized_surface_draws_nothing() {
        let mut states = vec![state_at(0.0, 0.0)];
        states[0].ripples.push(Ripple {
            started_at: Duration::from_millis(0),
            duration_secs: 1.2,
            max_radius: 135.0,
            quality: Quality::Bad,
        });
        let mut scene = Scene::new(0.0, 0.0);

        render_radar(&mut states, &mut scene, Duration::from_millis(10));
        assert!(scene.shapes().is_empty());
        assert_eq!(states[0].ripples.len(), 1);

        render_radar(&mut states, &mut scene, Duration::from_secs(5));
        assert!(states[0].ripples.is_empty());
    }

    #[test]
    fn test_ripple_reach_fallback() {
        assert_eq!(ripple_reach(200.0, 100.0), 45.0);
        assert_eq!(ripple_reach(0.0, 0.0), 135.0);
        assert_eq!(ripple_reach(0.0, 100.0), 45.0);
    }

    #[test]
    fn test_sparkline_lost_point_on_bottom_edge() {
        let history = history_of(&[Sample::Latency(50), Sample::Lost, Sample::Latency(150)]);
        let points = sparkline_points(&history, 100.0, 40.0).unwrap();

        assert_eq!(points.len(), 3);
        // scale [0, 200]
        assert_eq!(points[0], (0.0, 30.0));
        assert_eq!(points[1], (50.0, 40.0));
        assert_eq!(points[2], (100.0, 10.0));
    }

    #[test]
    fn test_sparkline_scale_grows_with_large_samples() {
        let history = history_of(&[Sample::Latency(400), Sample::Latency(100)]);
        let points = sparkline_points(&history, 10.0, 40.0).unwrap();
        assert_eq!(points[0], (0.0, 0.0));
        assert_eq!(points[1], (10.0, 30.0));
    }

    #[test]
    fn test_sparkline_edge_cases() {
        let empty = History::with_capacity(28);
        assert!(sparkline_points(&empty, 100.0, 40.0).is_none());

        let single = history_of(&[Sample::Latency(100)]);
        assert_eq!(
            sparkline_points(&single, 100.0, 40.0).unwrap(),
            vec![(0.0, 20.0)]
        );

        let all_lost = history_of(&[Sample::Lost, Sample::Lost]);
        assert_eq!(
            sparkline_points(&all_lost, 100.0, 40.0).unwrap(),
            vec![(0.0, 40.0), (100.0, 40.0)]
        );
    }

    #[test]
    fn test_render_sparkline_is_repeatable() {
        let history = history_of(&[Sample::Latency(20), Sample::Latency(80)]);
        let first = Scene::sparkline(&history, 60.0, 8.0);
        let second = Scene::sparkline(&history, 60.0, 8.0);
        assert_eq!(first, second);
        assert_eq!(first.shapes().len(), 2);

        let empty = Scene::sparkline(&History::with_capacity(28), 60.0, 8.0);
        assert!(empty.shapes().is_empty());
    }
}
