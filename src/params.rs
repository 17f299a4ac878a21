use crate::config::{DEFAULT_BRIGHTNESS, DEFAULT_SPEED};
use crate::grid::GridSize;
use crate::palette::Palette;
use crate::pattern::{PatternId, PatternKind};

/// Everything a frame is rendered from
///
/// Mutated only by [`crate::SessionController`]; the scheduler and evaluator
/// read it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionParams {
    pub(crate) pattern: PatternId,
    pub(crate) palette: Palette,
    pub(crate) speed: f32,
    pub(crate) brightness: f32,
    pub(crate) animation_enabled: bool,
    pub(crate) size: GridSize,
}

impl SessionParams {
    /// Parameters at default speed and brightness
    ///
    /// Animation is enabled for animated patterns only.
    pub fn new(pattern: PatternId, palette: Palette, size: GridSize) -> Self {
        Self {
            pattern,
            palette,
            speed: DEFAULT_SPEED,
            brightness: DEFAULT_BRIGHTNESS,
            animation_enabled: pattern.kind() == PatternKind::Animated,
            size,
        }
    }

    #[must_use]
    pub const fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub const fn with_brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    /// Active pattern
    pub const fn pattern(&self) -> PatternId {
        self.pattern
    }

    /// Active palette
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Time multiplier, pattern time advances `speed` units per second
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Presentation brightness factor
    pub const fn brightness(&self) -> f32 {
        self.brightness
    }

    pub const fn animation_enabled(&self) -> bool {
        self.animation_enabled
    }

    /// Grid size used for the active pattern
    pub const fn size(&self) -> GridSize {
        self.size
    }
}
