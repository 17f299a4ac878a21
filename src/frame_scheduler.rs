//! Animation scheduling and frame timing
//!
//! The host calls [`AnimationScheduler::tick`] from its per-frame callback
//! (or from a loop that sleeps for the returned duration). Nothing here
//! blocks or owns a timer.

use embassy_time::{Duration, Instant};
use log::debug;
use rand::RngCore;

use crate::OutputDriver;
use crate::grid::{GridEvaluator, GridFrame};
use crate::params::SessionParams;

/// Default target frame rate (60 FPS).
pub const DEFAULT_FPS: u32 = 60;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    /// A frame is rendered on every tick
    Running,
    /// Ticks are ignored; frames are rendered on demand at the frozen time
    Paused,
    /// Torn down, nothing is rendered anymore
    Stopped,
}

/// Convert a host timestamp to pattern time
#[allow(clippy::cast_precision_loss)]
pub fn pattern_time(timestamp: Instant, speed: f32) -> f64 {
    timestamp.as_millis() as f64 * f64::from(speed) / 1000.0
}

/// Drives the grid evaluator from host ticks and publishes frames.
///
/// While running, every tick renders at the host timestamp. Pausing
/// freezes the last seen timestamp and renders once at that time, so the
/// static frame matches where the motion stopped. Parameter changes during
/// a pause re-render at the same frozen time via [`AnimationScheduler::refresh`].
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = AnimationScheduler::new(driver, rng);
///
/// loop {
///     let now = Instant::from_millis(get_current_time_ms());
///     match scheduler.tick(now, &params) {
///         Some(result) => sleep_ms(result.sleep_duration.as_millis()),
///         None => wait_for_input(),
///     }
/// }
/// ```
pub struct AnimationScheduler<O: OutputDriver, R: RngCore, const MAX_CELLS: usize> {
    output: O,
    evaluator: GridEvaluator<R, MAX_CELLS>,
    state: AnimationState,
    last_seen: Instant,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<O: OutputDriver, R: RngCore, const MAX_CELLS: usize> AnimationScheduler<O, R, MAX_CELLS> {
    /// Create a running scheduler at clock zero.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (60 FPS) for frame timing.
    pub fn new(output: O, rng: R) -> Self {
        Self::with_frame_duration(output, rng, DEFAULT_FRAME_DURATION)
    }

    /// Create a running scheduler with custom frame duration.
    pub fn with_frame_duration(output: O, rng: R, frame_duration: Duration) -> Self {
        Self {
            output,
            evaluator: GridEvaluator::new(rng),
            state: AnimationState::Running,
            last_seen: Instant::from_millis(0),
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Render and publish one frame if running.
    ///
    /// Returns `None` when paused or stopped: no frame is due until the
    /// scheduler is resumed.
    pub fn tick(&mut self, now: Instant, params: &SessionParams) -> Option<FrameResult> {
        if self.state != AnimationState::Running {
            return None;
        }

        // Drift correction: if we've fallen too far behind, reset to now
        // This prevents catch-up bursts after long stalls
        let max_drift = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift {
            self.next_frame = now;
        }

        self.last_seen = now;
        self.render_at(now, params);

        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        Some(FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        })
    }

    /// Stop ticking and render one static frame at the last seen timestamp.
    pub fn pause(&mut self, params: &SessionParams) {
        if self.state != AnimationState::Running {
            return;
        }
        debug!("animation paused at {} ms", self.last_seen.as_millis());
        self.state = AnimationState::Paused;
        self.render_at(self.last_seen, params);
    }

    /// Continue ticking; the next tick renders at whatever `now` it gets.
    pub fn resume(&mut self, now: Instant) {
        if self.state != AnimationState::Paused {
            return;
        }
        debug!("animation resumed at {} ms", now.as_millis());
        self.state = AnimationState::Running;
        self.next_frame = now;
    }

    /// Re-render the static frame after a parameter change.
    ///
    /// Does nothing while running, the next tick already picks the change up.
    pub fn refresh(&mut self, params: &SessionParams) {
        if self.state == AnimationState::Paused {
            self.render_at(self.last_seen, params);
        }
    }

    /// Cancel all future rendering.
    pub fn cancel(&mut self) {
        debug!("animation scheduler stopped");
        self.state = AnimationState::Stopped;
    }

    pub const fn state(&self) -> AnimationState {
        self.state
    }

    /// Timestamp of the last tick, frozen while paused
    pub const fn last_seen(&self) -> Instant {
        self.last_seen
    }

    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    fn render_at(&mut self, timestamp: Instant, params: &SessionParams) {
        let t = pattern_time(timestamp, params.speed);
        let frame: GridFrame<'_> =
            self.evaluator
                .evaluate(params.pattern, params.size, t, &params.palette);
        self.output.write(&frame, params.brightness);
    }
}
