use embassy_time::Duration;

use crate::frame_scheduler::DEFAULT_FRAME_DURATION;
use crate::grid::GridSize;
use crate::palette::Palette;
use crate::pattern::{PatternId, PatternKind};
use crate::error::ConfigError;

/// Speed used at startup
pub const DEFAULT_SPEED: f32 = 20.0;

/// Brightness factor used at startup
pub const DEFAULT_BRIGHTNESS: f32 = 1.0;

/// Grid for static patterns: evaluated only on change, so it can be dense
pub const DEFAULT_STATIC_SIZE: GridSize = GridSize::new(96, 128);

/// Grid for animated patterns: evaluated every frame
pub const DEFAULT_ANIMATED_SIZE: GridSize = GridSize::new(24, 32);

/// Grid size per pattern kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionPolicy {
    pub static_size: GridSize,
    pub animated_size: GridSize,
}

impl ResolutionPolicy {
    /// Grid size for a pattern of the given kind
    pub const fn size_for(&self, kind: PatternKind) -> GridSize {
        match kind {
            PatternKind::Static => self.static_size,
            PatternKind::Animated => self.animated_size,
        }
    }
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            static_size: DEFAULT_STATIC_SIZE,
            animated_size: DEFAULT_ANIMATED_SIZE,
        }
    }
}

/// Configuration for a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub pattern: PatternId,
    pub palette: Palette,
    pub speed: f32,
    pub brightness: f32,
    pub resolution: ResolutionPolicy,
    pub frame_duration: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pattern: PatternId::default(),
            palette: Palette::default(),
            speed: DEFAULT_SPEED,
            brightness: DEFAULT_BRIGHTNESS,
            resolution: ResolutionPolicy::default(),
            frame_duration: DEFAULT_FRAME_DURATION,
        }
    }
}

impl SessionConfig {
    /// Check the configuration against a frame buffer of `max_cells`
    pub fn validate(&self, max_cells: usize) -> Result<(), ConfigError> {
        for size in [self.resolution.static_size, self.resolution.animated_size] {
            if size.is_empty() {
                return Err(ConfigError::EmptyGrid);
            }
            if size.count() > max_cells {
                return Err(ConfigError::GridTooLarge {
                    cells: size.count(),
                    max_cells,
                });
            }
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ConfigError::InvalidSpeed);
        }
        if !(self.brightness.is_finite() && self.brightness > 0.0) {
            return Err(ConfigError::InvalidBrightness);
        }
        Ok(())
    }
}
