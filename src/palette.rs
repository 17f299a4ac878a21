//! Ordered color palettes
//!
//! Index 0 is the primary color: Solid Color reads only that entry, the
//! other patterns use the whole sequence as gradient stops or twinkle colors.

use core::ops::Deref;

use heapless::Vec;

use crate::color::{Rgb, hex_to_rgb, is_strict_hex, rgb_from_u32};
use crate::error::PaletteError;

/// Maximum number of colors in a palette
pub const MAX_PALETTE_COLORS: usize = 16;

/// Palette used at startup
#[allow(clippy::unreadable_literal)]
pub const DEFAULT_PALETTE: [Rgb; 6] = [
    rgb_from_u32(0x7DF9FF), // Electric blue
    rgb_from_u32(0x7FFFD4), // Aquamarine
    rgb_from_u32(0xFF7F50), // Coral
    rgb_from_u32(0xFF00FF), // Magenta
    rgb_from_u32(0xFFFF00), // Yellow
    rgb_from_u32(0x00FFFF), // Cyan
];

/// Non-empty ordered sequence of colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb, MAX_PALETTE_COLORS>,
}

impl Palette {
    /// Build a palette from colors
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        let colors = Vec::from_slice(colors).map_err(|()| PaletteError::TooManyColors)?;
        Ok(Self { colors })
    }

    /// Parse strict `#RRGGBB` strings
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        let mut parsed = Vec::new();
        for (index, hex) in colors.iter().enumerate() {
            let hex = hex.as_ref();
            if !is_strict_hex(hex) {
                return Err(PaletteError::InvalidColor { index });
            }
            parsed
                .push(hex_to_rgb(hex))
                .map_err(|_| PaletteError::TooManyColors)?;
        }
        Ok(Self { colors: parsed })
    }

    /// Primary color
    pub fn primary(&self) -> Rgb {
        self.colors[0]
    }

    pub fn as_slice(&self) -> &[Rgb] {
        &self.colors
    }

    /// Replace a single entry
    ///
    /// Returns `false` if `index` is out of range.
    pub fn set(&mut self, index: usize, color: Rgb) -> bool {
        match self.colors.get_mut(index) {
            Some(slot) => {
                *slot = color;
                true
            }
            None => false,
        }
    }

    /// Copy of this palette with entry `index` moved to the front
    ///
    /// The remaining colors keep their relative order. An out-of-range
    /// index returns an unchanged copy.
    #[must_use]
    pub fn with_primary(&self, index: usize) -> Self {
        let Some(&primary) = self.colors.get(index) else {
            return self.clone();
        };
        let mut colors = Vec::new();
        // Same length as self, cannot overflow
        let _ = colors.push(primary);
        for (i, &color) in self.colors.iter().enumerate() {
            if i != index {
                let _ = colors.push(color);
            }
        }
        Self { colors }
    }
}

impl Default for Palette {
    fn default() -> Self {
        let mut colors = Vec::new();
        for color in DEFAULT_PALETTE {
            let _ = colors.push(color);
        }
        Self { colors }
    }
}

impl Deref for Palette {
    type Target = [Rgb];

    fn deref(&self) -> &[Rgb] {
        &self.colors
    }
}
