//! Pattern library
//!
//! Every pattern maps one cell (position, pattern time, grid size, palette)
//! to a color. Patterns hold no state, so the registry is a plain enum and
//! a static table of descriptors.

mod festive;
mod gradient;
mod plasma;
mod rainbow;
mod solid;
mod sparkle;

pub use festive::{blink_random, twinkle};
pub use gradient::gradient;
pub use plasma::plasma;
pub use rainbow::{rainbow_wave, rainbow_wave_hsl};
pub use solid::solid_color;
pub use sparkle::{sparkle, sparkle_triggered};

use rand::RngCore;

use crate::{color::Rgb, grid::GridSize};

const PATTERN_NAME_PLASMA: &str = "plasma";
const PATTERN_NAME_RAINBOW_WAVE: &str = "rainbow-wave";
const PATTERN_NAME_SPARKLE: &str = "sparkle";
const PATTERN_NAME_GRADIENT: &str = "gradient";
const PATTERN_NAME_BLINK_RANDOM: &str = "christmas-blink-random";
const PATTERN_NAME_TWINKLE: &str = "christmas-twinkle";
const PATTERN_NAME_SOLID_COLOR: &str = "solid-color";

const PATTERN_ID_PLASMA: u8 = 0;
const PATTERN_ID_RAINBOW_WAVE: u8 = 1;
const PATTERN_ID_SPARKLE: u8 = 2;
const PATTERN_ID_GRADIENT: u8 = 3;
const PATTERN_ID_BLINK_RANDOM: u8 = 4;
const PATTERN_ID_TWINKLE: u8 = 5;
const PATTERN_ID_SOLID_COLOR: u8 = 6;

/// Fixed-pattern contribution of deterministic "random" triggers
///
/// Returns a value in `0.00..=0.99` (negative for negative buckets) that
/// only depends on the cell and the time bucket.
#[inline]
pub(crate) fn cell_hash(x: u16, y: u16, bucket: f64) -> f64 {
    (f64::from(x) * 13.0 + f64::from(y) * 29.0 + bucket * 41.0) % 100.0 / 100.0
}

/// How a pattern wants to be scheduled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternKind {
    /// Rendered once per parameter change, at high resolution
    Static,
    /// Rendered every frame, at reduced resolution
    Animated,
}

/// Known pattern ids
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum PatternId {
    #[default]
    Plasma = PATTERN_ID_PLASMA,
    RainbowWave = PATTERN_ID_RAINBOW_WAVE,
    Sparkle = PATTERN_ID_SPARKLE,
    Gradient = PATTERN_ID_GRADIENT,
    BlinkRandom = PATTERN_ID_BLINK_RANDOM,
    Twinkle = PATTERN_ID_TWINKLE,
    SolidColor = PATTERN_ID_SOLID_COLOR,
}

/// Registry entry shown to selection controls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatternDescriptor {
    pub id: PatternId,
    pub name: &'static str,
}

/// All patterns in display order
pub const PATTERNS: [PatternDescriptor; 7] = [
    PatternDescriptor {
        id: PatternId::Plasma,
        name: "Plasma",
    },
    PatternDescriptor {
        id: PatternId::RainbowWave,
        name: "Rainbow Wave",
    },
    PatternDescriptor {
        id: PatternId::Sparkle,
        name: "Sparkle",
    },
    PatternDescriptor {
        id: PatternId::Gradient,
        name: "Gradient",
    },
    PatternDescriptor {
        id: PatternId::BlinkRandom,
        name: "Festive Lights",
    },
    PatternDescriptor {
        id: PatternId::Twinkle,
        name: "Festive Twinkle",
    },
    PatternDescriptor {
        id: PatternId::SolidColor,
        name: "Solid Color",
    },
];

impl PatternId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            PATTERN_ID_PLASMA => Self::Plasma,
            PATTERN_ID_RAINBOW_WAVE => Self::RainbowWave,
            PATTERN_ID_SPARKLE => Self::Sparkle,
            PATTERN_ID_GRADIENT => Self::Gradient,
            PATTERN_ID_BLINK_RANDOM => Self::BlinkRandom,
            PATTERN_ID_TWINKLE => Self::Twinkle,
            PATTERN_ID_SOLID_COLOR => Self::SolidColor,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plasma => PATTERN_NAME_PLASMA,
            Self::RainbowWave => PATTERN_NAME_RAINBOW_WAVE,
            Self::Sparkle => PATTERN_NAME_SPARKLE,
            Self::Gradient => PATTERN_NAME_GRADIENT,
            Self::BlinkRandom => PATTERN_NAME_BLINK_RANDOM,
            Self::Twinkle => PATTERN_NAME_TWINKLE,
            Self::SolidColor => PATTERN_NAME_SOLID_COLOR,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            PATTERN_NAME_PLASMA => Some(Self::Plasma),
            PATTERN_NAME_RAINBOW_WAVE => Some(Self::RainbowWave),
            PATTERN_NAME_SPARKLE => Some(Self::Sparkle),
            PATTERN_NAME_GRADIENT => Some(Self::Gradient),
            PATTERN_NAME_BLINK_RANDOM => Some(Self::BlinkRandom),
            PATTERN_NAME_TWINKLE => Some(Self::Twinkle),
            PATTERN_NAME_SOLID_COLOR => Some(Self::SolidColor),
            _ => None,
        }
    }

    /// Scheduling kind of the pattern
    pub const fn kind(self) -> PatternKind {
        match self {
            Self::SolidColor => PatternKind::Static,
            _ => PatternKind::Animated,
        }
    }

    /// Registry entry for this id
    pub const fn descriptor(self) -> PatternDescriptor {
        PATTERNS[self as usize]
    }

    /// Compute the color of one cell
    ///
    /// `rng` is only consulted by [`PatternId::Sparkle`] to pick the color
    /// of a lit cell.
    pub fn color_at<R: RngCore>(
        self,
        x: u16,
        y: u16,
        t: f64,
        size: GridSize,
        palette: &[Rgb],
        rng: &mut R,
    ) -> Rgb {
        match self {
            Self::Plasma => plasma(x, y, t, size, palette),
            Self::RainbowWave => rainbow_wave(x, y, t, size, palette),
            Self::Sparkle => sparkle(x, y, t, size, palette, rng),
            Self::Gradient => gradient(x, y, t, size, palette),
            Self::BlinkRandom => blink_random(x, y, t, size, palette),
            Self::Twinkle => twinkle(x, y, t, size, palette),
            Self::SolidColor => solid_color(x, y, t, size, palette),
        }
    }
}
