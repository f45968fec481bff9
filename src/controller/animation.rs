use crate::config::AnimationConfig;
use std::time::Duration;

/// The easing used by the feature item reveal, as a CSS `cubic-bezier(x1, y1, x2, y2)` curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    /// `cubic-bezier(0.39, 0.575, 0.565, 1)`, a sine-like ease out.
    pub const REVEAL: CubicBezier = CubicBezier { x1: 0.39, y1: 0.575, x2: 0.565, y2: 1.0 };

    const NEWTON_ITERATIONS: usize = 8;
    const BISECTION_ITERATIONS: usize = 32;
    const EPSILON: f64 = 1e-6;

    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        // x control points outside [0, 1] make the curve non monotonic in time.
        Self { x1: x1.clamp(0.0, 1.0), y1, x2: x2.clamp(0.0, 1.0), y2 }
    }

    /// Get the eased output for an input progress in `[0, 1]`.
    pub fn evaluate(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        let t = self.solve_t(x);
        Self::sample(self.y1, self.y2, t)
    }

    fn solve_t(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..Self::NEWTON_ITERATIONS {
            let error = Self::sample(self.x1, self.x2, t) - x;
            if error.abs() < Self::EPSILON {
                return t;
            }
            let slope = Self::slope(self.x1, self.x2, t);
            if slope.abs() < Self::EPSILON {
                break;
            }
            t -= error / slope;
        }

        // Newton didn't converge, fall back to bisecting.
        let (mut low, mut high) = (0.0, 1.0);
        t = x;
        for _ in 0..Self::BISECTION_ITERATIONS {
            let value = Self::sample(self.x1, self.x2, t);
            if (value - x).abs() < Self::EPSILON {
                break;
            }
            if value < x {
                low = t;
            } else {
                high = t;
            }
            t = (low + high) / 2.0;
        }
        t
    }

    // B(t) = 3(1-t)^2 t p1 + 3(1-t) t^2 p2 + t^3
    fn sample(p1: f64, p2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    fn slope(p1: f64, p2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }
}

/// The timing of the staggered feature item reveal.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealTiming {
    pub(crate) enabled: bool,
    pub(crate) base_delay: Duration,
    pub(crate) stagger: Duration,
    pub(crate) duration: Duration,
    pub(crate) easing: CubicBezier,
}

impl RevealTiming {
    /// Get the start delay for the item at the given index within its slide.
    pub fn delay_for(&self, index: usize) -> Duration {
        self.stagger * index as u32 + self.base_delay
    }

    /// The state a freshly revealed item at the given index starts in.
    pub(crate) fn schedule(&self, index: usize) -> AnimationState {
        if self.enabled { AnimationState::Scheduled { delay: self.delay_for(index) } } else { AnimationState::Done }
    }

    /// Compute the state of an item with the given delay once `elapsed` time has passed since it
    /// was scheduled.
    pub(crate) fn state_at(&self, delay: Duration, elapsed: Duration) -> AnimationState {
        let Some(running) = elapsed.checked_sub(delay) else {
            return AnimationState::Scheduled { delay };
        };
        if running >= self.duration || self.duration.is_zero() {
            return AnimationState::Done;
        }
        let progress = running.as_secs_f64() / self.duration.as_secs_f64();
        AnimationState::Playing { progress: self.easing.evaluate(progress) }
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self::from(&AnimationConfig::default())
    }
}

impl From<&AnimationConfig> for RevealTiming {
    fn from(config: &AnimationConfig) -> Self {
        Self {
            enabled: config.enabled,
            base_delay: Duration::from_millis(config.base_delay_ms),
            stagger: Duration::from_millis(config.stagger_ms),
            duration: Duration::from_millis(config.duration_ms),
            easing: CubicBezier::REVEAL,
        }
    }
}

/// The state of a feature item's reveal animation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AnimationState {
    /// Not revealed: the item's slide is not active.
    #[default]
    NotStarted,

    /// Waiting for its start delay to elapse.
    Scheduled { delay: Duration },

    /// Fading in, with the eased progress in `[0, 1]`.
    Playing { progress: f64 },

    /// Fully visible. This is held until the next reset.
    Done,
}

impl AnimationState {
    /// How visible an item in this state is, from 0 to 1.
    pub fn opacity(&self) -> f64 {
        match self {
            Self::NotStarted | Self::Scheduled { .. } => 0.0,
            Self::Playing { progress } => progress.clamp(0.0, 1.0),
            Self::Done => 1.0,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Scheduled { .. } | Self::Playing { .. })
    }
}
