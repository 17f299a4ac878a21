//! Error types
//!
//! Nothing on the render path can fail. These errors only come out of
//! configuration, palette construction and the external collaborators.

use core::fmt;

/// Palette construction failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteError {
    /// A palette needs at least one color
    Empty,
    /// More colors than [`crate::palette::MAX_PALETTE_COLORS`]
    TooManyColors,
    /// Entry at `index` is not a `#RRGGBB` string
    InvalidColor { index: usize },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("palette has no colors"),
            Self::TooManyColors => f.write_str("palette has too many colors"),
            Self::InvalidColor { index } => {
                write!(f, "palette entry {} is not a #RRGGBB color", index)
            }
        }
    }
}

impl core::error::Error for PaletteError {}

/// Palette suggestion failure
///
/// Always recoverable: the current palette is kept and the request can be
/// retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionError {
    /// Theme is shorter than [`crate::suggestion::MIN_THEME_LEN`] characters
    ThemeTooShort,
    /// The service answered without any colors
    NoColors,
    /// The service answered with a count other than
    /// [`crate::suggestion::SUGGESTED_COLORS`]
    WrongColorCount(usize),
    /// Suggested entry at `index` is not a `#RRGGBB` string
    InvalidColor { index: usize },
    /// The service itself failed
    Unavailable,
}

impl fmt::Display for SuggestionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThemeTooShort => f.write_str("theme must be at least 3 characters long"),
            Self::NoColors => f.write_str("could not generate a palette, try another theme"),
            Self::WrongColorCount(count) => {
                write!(f, "expected 6 suggested colors, got {}", count)
            }
            Self::InvalidColor { index } => {
                write!(f, "suggested color {} is not a #RRGGBB color", index)
            }
            Self::Unavailable => f.write_str("palette service is unavailable, try again"),
        }
    }
}

impl core::error::Error for SuggestionError {}

impl From<PaletteError> for SuggestionError {
    fn from(err: PaletteError) -> Self {
        match err {
            PaletteError::Empty => Self::NoColors,
            PaletteError::TooManyColors => Self::WrongColorCount(usize::MAX),
            PaletteError::InvalidColor { index } => Self::InvalidColor { index },
        }
    }
}

/// Invalid [`crate::config::SessionConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A grid size has zero columns or rows
    EmptyGrid,
    /// A grid size needs more cells than the frame buffer holds
    GridTooLarge { cells: usize, max_cells: usize },
    /// Speed must be a positive finite number
    InvalidSpeed,
    /// Brightness must be a positive finite number
    InvalidBrightness,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => f.write_str("grid must have at least one column and one row"),
            Self::GridTooLarge { cells, max_cells } => write!(
                f,
                "grid needs {} cells but the frame buffer holds {}",
                cells, max_cells
            ),
            Self::InvalidSpeed => f.write_str("speed must be positive"),
            Self::InvalidBrightness => f.write_str("brightness must be positive"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Fullscreen or wake-lock request failure
///
/// Reported by [`crate::device::DisplayDevice`] implementations and always
/// swallowed by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    /// The platform has no such capability
    Unsupported,
    /// The platform refused the request
    Rejected,
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => f.write_str("not supported by this display"),
            Self::Rejected => f.write_str("request rejected by the display"),
        }
    }
}

impl core::error::Error for DeviceError {}
