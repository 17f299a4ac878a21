//! Session state
//!
//! Owns the parameters every frame is rendered from and turns user/device
//! events into scheduler transitions.

use embassy_time::Instant;
use log::{debug, info, warn};
use rand::RngCore;

use crate::OutputDriver;
use crate::color::Rgb;
use crate::config::{ResolutionPolicy, SessionConfig};
use crate::device::{DisplayDevice, PowerRetention};
use crate::error::{ConfigError, SuggestionError};
use crate::frame_scheduler::{AnimationScheduler, AnimationState, FrameResult};
use crate::intent::{IntentReceiver, SessionIntent};
use crate::palette::Palette;
use crate::params::SessionParams;
use crate::pattern::{PatternId, PatternKind};
use crate::suggestion::{PaletteSuggester, validate_theme};

/// Session controller - the main orchestrator
///
/// Selecting a pattern also decides how it is scheduled: the static solid
/// color pattern pauses the animation and switches to the dense grid, every
/// animated pattern resumes it on the coarse grid.
pub struct SessionController<
    'a,
    O: OutputDriver,
    R: RngCore,
    D: DisplayDevice,
    const MAX_CELLS: usize,
    const INTENT_CHANNEL_SIZE: usize,
> {
    // External dependencies and configuration
    intents: IntentReceiver<'a, INTENT_CHANNEL_SIZE>,
    resolution: ResolutionPolicy,

    // Internal state
    params: SessionParams,
    /// Palette in the order it was set, source for primary color cycling
    base_palette: Palette,
    primary_index: usize,

    // Internal dependencies
    scheduler: AnimationScheduler<O, R, MAX_CELLS>,
    power: PowerRetention<D>,
}

impl<'a, O, R, D, const MAX_CELLS: usize, const INTENT_CHANNEL_SIZE: usize>
    SessionController<'a, O, R, D, MAX_CELLS, INTENT_CHANNEL_SIZE>
where
    O: OutputDriver,
    R: RngCore,
    D: DisplayDevice,
{
    /// Create a session at clock zero.
    ///
    /// A static initial pattern renders its first frame right away.
    pub fn new(
        intents: IntentReceiver<'a, INTENT_CHANNEL_SIZE>,
        output: O,
        rng: R,
        device: D,
        config: &SessionConfig,
    ) -> Result<Self, ConfigError> {
        config.validate(MAX_CELLS)?;

        let mut session = Self {
            intents,
            resolution: config.resolution,
            params: SessionParams::new(
                config.pattern,
                config.palette.clone(),
                config.resolution.size_for(config.pattern.kind()),
            )
            .with_speed(config.speed)
            .with_brightness(config.brightness),
            base_palette: config.palette.clone(),
            primary_index: 0,
            scheduler: AnimationScheduler::with_frame_duration(
                output,
                rng,
                config.frame_duration,
            ),
            power: PowerRetention::new(device),
        };
        session.select_pattern(config.pattern, Instant::from_millis(0));
        Ok(session)
    }

    /// Per-frame callback.
    ///
    /// Applies queued intents, then renders if the animation is running.
    /// `None` means no frame is due until something resumes the animation.
    pub fn on_frame(&mut self, now: Instant) -> Option<FrameResult> {
        self.process_intents(now);
        self.scheduler.tick(now, &self.params)
    }

    /// Apply all queued intents (non-blocking)
    pub fn process_intents(&mut self, now: Instant) {
        let intents = self.intents;
        for intent in intents.drain() {
            self.apply(intent, now);
        }
    }

    /// Apply a single intent
    pub fn apply(&mut self, intent: SessionIntent, now: Instant) {
        match intent {
            SessionIntent::SelectPattern(pattern) => self.select_pattern(pattern, now),
            SessionIntent::SetSpeed(speed) => self.set_speed(speed),
            SessionIntent::SetBrightness(brightness) => self.set_brightness(brightness),
            SessionIntent::SetPalette(palette) => self.set_palette(palette),
            SessionIntent::SetColor { index, color } => self.set_color(index, color),
            SessionIntent::SetAnimationEnabled(enabled) => {
                self.set_animation_enabled(enabled, now);
            }
            SessionIntent::CyclePrimaryColor => {
                self.cycle_primary_color();
            }
            SessionIntent::ToggleFullscreen => self.toggle_fullscreen(),
            SessionIntent::FullscreenExited => self.fullscreen_exited(),
        }
    }

    /// Switch pattern, grid size and animation mode together
    pub fn select_pattern(&mut self, pattern: PatternId, now: Instant) {
        let kind = pattern.kind();
        self.params.pattern = pattern;
        self.params.size = self.resolution.size_for(kind);
        info!(
            "pattern {} selected, grid {}x{}",
            pattern.as_str(),
            self.params.size.cols,
            self.params.size.rows
        );
        self.set_animation_enabled(kind == PatternKind::Animated, now);
    }

    /// Pause or resume the animation
    ///
    /// Pausing renders one static frame at the moment of the pause.
    pub fn set_animation_enabled(&mut self, enabled: bool, now: Instant) {
        self.params.animation_enabled = enabled;
        match (enabled, self.scheduler.state()) {
            (true, AnimationState::Paused) => self.scheduler.resume(now),
            (false, AnimationState::Running) => self.scheduler.pause(&self.params),
            _ => self.scheduler.refresh(&self.params),
        }
    }

    /// Change the time multiplier
    ///
    /// Non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f32) {
        if !speed.is_finite() {
            warn!("ignoring non-finite speed");
            return;
        }
        self.params.speed = speed;
        self.scheduler.refresh(&self.params);
    }

    /// Change the presentation brightness factor
    ///
    /// Range checks belong to the input surface; any value is stored.
    pub fn set_brightness(&mut self, brightness: f32) {
        self.params.brightness = brightness;
        self.scheduler.refresh(&self.params);
    }

    /// Replace the palette
    pub fn set_palette(&mut self, palette: Palette) {
        debug!("palette replaced, {} colors", palette.len());
        self.base_palette = palette.clone();
        self.params.palette = palette;
        self.primary_index = 0;
        self.scheduler.refresh(&self.params);
    }

    /// Replace one palette entry
    ///
    /// The edited palette becomes the new cycling order.
    pub fn set_color(&mut self, index: usize, color: Rgb) {
        if !self.params.palette.set(index, color) {
            warn!("palette index {} out of range", index);
            return;
        }
        self.base_palette = self.params.palette.clone();
        self.primary_index = 0;
        self.scheduler.refresh(&self.params);
    }

    /// Bring the next color of the palette to the front
    ///
    /// Only active in solid color mode; returns whether anything changed.
    pub fn cycle_primary_color(&mut self) -> bool {
        if self.params.pattern != PatternId::SolidColor {
            return false;
        }
        self.primary_index = (self.primary_index + 1) % self.base_palette.len();
        self.params.palette = self.base_palette.with_primary(self.primary_index);
        debug!("primary color cycled to entry {}", self.primary_index);
        self.scheduler.refresh(&self.params);
        true
    }

    /// Ask the suggestion service for a palette and apply it
    ///
    /// On any error the current palette stays in place.
    pub fn request_palette<S: PaletteSuggester>(
        &mut self,
        suggester: &mut S,
        theme: &str,
    ) -> Result<(), SuggestionError> {
        let theme = validate_theme(theme)?;
        let result = suggester.suggest(theme);
        self.apply_suggestion(result)
    }

    /// Apply the outcome of a suggestion request made by the host
    pub fn apply_suggestion(
        &mut self,
        result: Result<Palette, SuggestionError>,
    ) -> Result<(), SuggestionError> {
        match result {
            Ok(palette) => {
                self.set_palette(palette);
                Ok(())
            }
            Err(err) => {
                warn!("palette suggestion failed: {}", err);
                Err(err)
            }
        }
    }

    /// Enter or leave fullscreen, keeping the screen awake while in it
    pub fn toggle_fullscreen(&mut self) {
        self.power.toggle();
    }

    /// The platform left fullscreen without being asked
    pub fn fullscreen_exited(&mut self) {
        self.power.exited();
    }

    /// Stop rendering and give back device resources
    pub fn shutdown(&mut self) {
        self.scheduler.cancel();
        self.power.release();
    }

    pub const fn params(&self) -> &SessionParams {
        &self.params
    }

    pub const fn state(&self) -> AnimationState {
        self.scheduler.state()
    }

    pub const fn is_fullscreen(&self) -> bool {
        self.power.is_fullscreen()
    }

    pub const fn holds_wake_lock(&self) -> bool {
        self.power.holds_wake_lock()
    }

    pub const fn resolution(&self) -> ResolutionPolicy {
        self.resolution
    }

    pub fn scheduler(&self) -> &AnimationScheduler<O, R, MAX_CELLS> {
        &self.scheduler
    }

    pub fn output(&self) -> &O {
        self.scheduler.output()
    }

    pub fn output_mut(&mut self) -> &mut O {
        self.scheduler.output_mut()
    }

    pub fn device(&self) -> &D {
        self.power.device()
    }

    pub fn device_mut(&mut self) -> &mut D {
        self.power.device_mut()
    }
}
